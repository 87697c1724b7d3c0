//! DOM tree implementation for naming-tree.
//!
//! This crate provides an arena-based DOM tree structure following the
//! [DOM Living Standard](https://dom.spec.whatwg.org/), with the pieces a
//! hosted widget needs: class lists, inline style, trusted inner markup,
//! event listeners with bubbling dispatch, and a layout seam for geometry.
//!
//! # Design
//!
//! The tree uses arena allocation with [`NodeId`] indices for all relationships,
//! providing O(1) access and traversal without borrow checker issues. Removed
//! nodes stay in the arena, detached, so ids handed out earlier never dangle.

pub mod events;
pub mod geometry;
pub mod serialize;

use indexmap::IndexMap;

pub use events::{Event, EventKind, EventListeners, ListenerId};
pub use geometry::{Layout, Rect, StaticLayout, Viewport};
pub use serialize::{inner_html, outer_html, print_tree};

/// Map of attribute names to values for an element, in insertion order.
pub type AttributesMap = IndexMap<String, String>;

/// A type-safe index into the DOM tree.
///
/// [§ 4.4 Interface Node](https://dom.spec.whatwg.org/#interface-node)
/// "Each node has an associated node document..."
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct NodeId(pub usize);

impl NodeId {
    /// The root document node is always at index 0.
    pub const ROOT: Self = Self(0);
}

/// [§ 4.4 Interface Node](https://dom.spec.whatwg.org/#interface-node)
///
/// "Node is an abstract interface that is used by all nodes in a tree."
#[derive(Debug, Clone)]
pub struct Node {
    /// "Each node has an associated node type"
    pub node_type: NodeType,

    /// [§ 4.4](https://dom.spec.whatwg.org/#concept-tree-parent)
    /// "An object that participates in a tree has a parent, which is either
    /// null or an object."
    pub parent: Option<NodeId>,

    /// [§ 4.4](https://dom.spec.whatwg.org/#concept-tree-child)
    /// "A node has an associated list of children"
    pub children: Vec<NodeId>,

    /// [§ 4.4](https://dom.spec.whatwg.org/#concept-tree-next-sibling)
    pub next_sibling: Option<NodeId>,

    /// [§ 4.4](https://dom.spec.whatwg.org/#concept-tree-previous-sibling)
    pub prev_sibling: Option<NodeId>,
}

/// [§ 4.4 Interface Node](https://dom.spec.whatwg.org/#interface-node)
///
/// "Each node has an associated node type"
#[derive(Debug, Clone)]
pub enum NodeType {
    /// [§ 4.5 Interface Document](https://dom.spec.whatwg.org/#interface-document)
    Document,
    /// [§ 4.9 Interface Element](https://dom.spec.whatwg.org/#interface-element)
    Element(ElementData),
    /// [§ 4.10 Interface Text](https://dom.spec.whatwg.org/#interface-text)
    Text(String),
    /// Trusted markup assigned through `innerHTML`.
    ///
    /// NOTE: The fragment is not parsed into nodes. It is kept as one opaque
    /// child and serialized verbatim, which is all the widget needs for icons
    /// and tooltip content.
    Markup(String),
}

/// Element-specific data.
///
/// Per [§ 4.9 Interface Element](https://dom.spec.whatwg.org/#interface-element):
/// "When an element is created, its local name is always given."
#[derive(Debug, Clone)]
pub struct ElementData {
    /// "An element's local name"
    pub tag_name: String,
    /// "An element has an associated attribute list"
    pub attrs: AttributesMap,
}

impl ElementData {
    /// Create element data with no attributes.
    #[must_use]
    pub fn new(tag_name: &str) -> Self {
        Self {
            tag_name: tag_name.to_ascii_lowercase(),
            attrs: AttributesMap::new(),
        }
    }

    /// Returns the element's id attribute value if present.
    #[must_use]
    pub fn id(&self) -> Option<&str> {
        self.attrs.get("id").map(String::as_str)
    }

    /// [§ 4.9 classList](https://dom.spec.whatwg.org/#dom-element-classlist)
    ///
    /// "The class attribute, if specified, must have a value that is a set of
    /// space-separated tokens". Tokens are returned in attribute order.
    #[must_use]
    pub fn class_list(&self) -> Vec<&str> {
        self.attrs
            .get("class")
            .map(|classes| classes.split_ascii_whitespace().collect())
            .unwrap_or_default()
    }

    /// Whether `class` is one of the element's class tokens.
    #[must_use]
    pub fn has_class(&self, class: &str) -> bool {
        self.class_list().contains(&class)
    }

    fn set_class_list(&mut self, classes: &[&str]) {
        let _ = self.attrs.insert("class".to_string(), classes.join(" "));
    }
}

/// Arena-based DOM tree with O(1) node access and traversal.
///
/// [§ 4 Nodes](https://dom.spec.whatwg.org/#nodes)
///
/// "The DOM represents a document as a tree."
#[derive(Debug, Clone)]
pub struct DomTree {
    /// All nodes in the tree, indexed by `NodeId`.
    /// The Document node is always at index 0 (`NodeId::ROOT`).
    nodes: Vec<Node>,
    /// Event listeners registered on nodes of this tree.
    listeners: EventListeners,
}

impl DomTree {
    /// Create a new DOM tree with just the Document node.
    #[must_use]
    pub fn new() -> Self {
        let document = Node {
            node_type: NodeType::Document,
            parent: None,
            children: Vec::new(),
            next_sibling: None,
            prev_sibling: None,
        };
        Self {
            nodes: vec![document],
            listeners: EventListeners::default(),
        }
    }

    /// Create a document with `<html>`, `<head>` and `<body>` in place, the
    /// shape a host page has before any component attaches.
    #[must_use]
    pub fn new_html_document() -> Self {
        let mut tree = Self::new();
        let html = tree.create_element("html");
        let head = tree.create_element("head");
        let body = tree.create_element("body");
        tree.append_child(NodeId::ROOT, html);
        tree.append_child(html, head);
        tree.append_child(html, body);
        tree
    }

    /// Get the root document node ID.
    #[must_use]
    pub const fn root(&self) -> NodeId {
        NodeId::ROOT
    }

    /// Get a node by its ID.
    #[must_use]
    pub fn get(&self, id: NodeId) -> Option<&Node> {
        self.nodes.get(id.0)
    }

    /// Get a mutable reference to a node by its ID.
    pub fn get_mut(&mut self, id: NodeId) -> Option<&mut Node> {
        self.nodes.get_mut(id.0)
    }

    /// Number of nodes ever allocated, attached or not.
    #[must_use]
    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    /// Check if the tree is empty (should always have at least the Document).
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    /// Allocate a new node and return its ID.
    /// The node is not yet attached to the tree.
    pub fn alloc(&mut self, node_type: NodeType) -> NodeId {
        let id = NodeId(self.nodes.len());
        self.nodes.push(Node {
            node_type,
            parent: None,
            children: Vec::new(),
            next_sibling: None,
            prev_sibling: None,
        });
        id
    }

    /// [§ 4.5 createElement](https://dom.spec.whatwg.org/#dom-document-createelement)
    ///
    /// "Creates an element with the given local name." The element is detached.
    pub fn create_element(&mut self, tag_name: &str) -> NodeId {
        self.alloc(NodeType::Element(ElementData::new(tag_name)))
    }

    /// Create a detached element with an initial `class` attribute.
    /// An empty `class_name` still sets the attribute, like `el.className = ''`.
    pub fn create_element_with_class(&mut self, tag_name: &str, class_name: &str) -> NodeId {
        let id = self.create_element(tag_name);
        self.set_attribute(id, "class", class_name);
        id
    }

    /// [§ 4.5 createTextNode](https://dom.spec.whatwg.org/#dom-document-createtextnode)
    pub fn create_text_node(&mut self, data: &str) -> NodeId {
        self.alloc(NodeType::Text(data.to_string()))
    }

    /// [§ 4.2.2 Append](https://dom.spec.whatwg.org/#concept-node-append)
    ///
    /// "To append a node to a parent, pre-insert node into parent before null."
    ///
    /// A child that already has a parent is removed from it first.
    pub fn append_child(&mut self, parent: NodeId, child: NodeId) {
        if let Some(old_parent) = self.parent(child) {
            self.remove_child(old_parent, child);
        }

        let prev_last_child = self.nodes[parent.0].children.last().copied();
        self.nodes[parent.0].children.push(child);
        self.nodes[child.0].parent = Some(parent);

        if let Some(prev_id) = prev_last_child {
            self.nodes[prev_id.0].next_sibling = Some(child);
            self.nodes[child.0].prev_sibling = Some(prev_id);
        }
    }

    /// [§ 4.2.3 Remove](https://dom.spec.whatwg.org/#concept-node-remove)
    ///
    /// Detaches `child` from `parent`, relinking its former siblings. Does
    /// nothing if `child` is not a child of `parent`.
    pub fn remove_child(&mut self, parent: NodeId, child: NodeId) {
        let Some(index) = self.nodes[parent.0].children.iter().position(|&c| c == child) else {
            return;
        };
        let _ = self.nodes[parent.0].children.remove(index);

        let prev = self.nodes[child.0].prev_sibling.take();
        let next = self.nodes[child.0].next_sibling.take();
        if let Some(prev_id) = prev {
            self.nodes[prev_id.0].next_sibling = next;
        }
        if let Some(next_id) = next {
            self.nodes[next_id.0].prev_sibling = prev;
        }
        self.nodes[child.0].parent = None;
    }

    /// Detach every child of `id`.
    pub fn remove_all_children(&mut self, id: NodeId) {
        let children = self.children(id).to_vec();
        for child in children {
            self.remove_child(id, child);
        }
    }

    /// Get the parent of a node.
    #[must_use]
    pub fn parent(&self, id: NodeId) -> Option<NodeId> {
        self.get(id).and_then(|n| n.parent)
    }

    /// Get all children of a node.
    #[must_use]
    pub fn children(&self, id: NodeId) -> &[NodeId] {
        self.get(id).map_or(&[], |n| n.children.as_slice())
    }

    /// Get the first child of a node.
    #[must_use]
    pub fn first_child(&self, id: NodeId) -> Option<NodeId> {
        self.get(id).and_then(|n| n.children.first().copied())
    }

    /// Get the last child of a node.
    #[must_use]
    pub fn last_child(&self, id: NodeId) -> Option<NodeId> {
        self.get(id).and_then(|n| n.children.last().copied())
    }

    /// Get the next sibling of a node.
    #[must_use]
    pub fn next_sibling(&self, id: NodeId) -> Option<NodeId> {
        self.get(id).and_then(|n| n.next_sibling)
    }

    /// Get the previous sibling of a node.
    #[must_use]
    pub fn prev_sibling(&self, id: NodeId) -> Option<NodeId> {
        self.get(id).and_then(|n| n.prev_sibling)
    }

    /// Iterate over all ancestors of a node, from parent to root.
    #[must_use]
    pub fn ancestors(&self, id: NodeId) -> AncestorIterator<'_> {
        AncestorIterator {
            tree: self,
            current: self.parent(id),
        }
    }

    /// [§ 4.2.6 Descendant](https://dom.spec.whatwg.org/#concept-tree-descendant)
    ///
    /// Descendants of `id` in tree order (pre-order), excluding `id` itself.
    #[must_use]
    pub fn descendants(&self, id: NodeId) -> Vec<NodeId> {
        let mut out = Vec::new();
        let mut stack: Vec<NodeId> = self.children(id).iter().rev().copied().collect();
        while let Some(current) = stack.pop() {
            out.push(current);
            stack.extend(self.children(current).iter().rev().copied());
        }
        out
    }

    /// Check if `descendant` is a descendant of `ancestor`.
    #[must_use]
    pub fn is_descendant_of(&self, descendant: NodeId, ancestor: NodeId) -> bool {
        self.ancestors(descendant).any(|id| id == ancestor)
    }

    /// [§ 4.4 isConnected](https://dom.spec.whatwg.org/#dom-node-isconnected)
    ///
    /// "Returns true if node is connected; otherwise false." A node is
    /// connected when its root is the document.
    #[must_use]
    pub fn is_connected(&self, id: NodeId) -> bool {
        id == NodeId::ROOT || self.is_descendant_of(id, NodeId::ROOT)
    }

    /// Get element data if this node is an element.
    #[must_use]
    pub fn as_element(&self, id: NodeId) -> Option<&ElementData> {
        self.get(id).and_then(|n| match &n.node_type {
            NodeType::Element(data) => Some(data),
            _ => None,
        })
    }

    /// Get mutable element data if this node is an element.
    pub fn as_element_mut(&mut self, id: NodeId) -> Option<&mut ElementData> {
        self.get_mut(id).and_then(|n| match &mut n.node_type {
            NodeType::Element(data) => Some(data),
            _ => None,
        })
    }

    /// Get text content if this node is a text node.
    #[must_use]
    pub fn as_text(&self, id: NodeId) -> Option<&str> {
        self.get(id).and_then(|n| match &n.node_type {
            NodeType::Text(s) => Some(s.as_str()),
            _ => None,
        })
    }

    /// Tag name of an element, `None` for other node types.
    #[must_use]
    pub fn tag_name(&self, id: NodeId) -> Option<&str> {
        self.as_element(id).map(|e| e.tag_name.as_str())
    }

    // ----- attributes -----

    /// [§ 4.9 getAttribute](https://dom.spec.whatwg.org/#dom-element-getattribute)
    #[must_use]
    pub fn get_attribute(&self, id: NodeId, name: &str) -> Option<&str> {
        self.as_element(id)
            .and_then(|e| e.attrs.get(name))
            .map(String::as_str)
    }

    /// [§ 4.9 setAttribute](https://dom.spec.whatwg.org/#dom-element-setattribute)
    ///
    /// Existing attributes keep their position; new ones are appended.
    pub fn set_attribute(&mut self, id: NodeId, name: &str, value: &str) {
        if let Some(element) = self.as_element_mut(id) {
            let _ = element.attrs.insert(name.to_string(), value.to_string());
        }
    }

    /// [§ 4.9 removeAttribute](https://dom.spec.whatwg.org/#dom-element-removeattribute)
    pub fn remove_attribute(&mut self, id: NodeId, name: &str) {
        if let Some(element) = self.as_element_mut(id) {
            let _ = element.attrs.shift_remove(name);
        }
    }

    /// [§ 4.9 hasAttribute](https://dom.spec.whatwg.org/#dom-element-hasattribute)
    #[must_use]
    pub fn has_attribute(&self, id: NodeId, name: &str) -> bool {
        self.as_element(id).is_some_and(|e| e.attrs.contains_key(name))
    }

    // ----- class list -----

    /// [§ 7.1 DOMTokenList contains](https://dom.spec.whatwg.org/#dom-domtokenlist-contains)
    #[must_use]
    pub fn has_class(&self, id: NodeId, class: &str) -> bool {
        self.as_element(id).is_some_and(|e| e.has_class(class))
    }

    /// [§ 7.1 DOMTokenList add](https://dom.spec.whatwg.org/#dom-domtokenlist-add)
    ///
    /// Appends the token unless it is already present.
    pub fn add_class(&mut self, id: NodeId, class: &str) {
        if let Some(element) = self.as_element_mut(id) {
            let mut classes = element.class_list();
            if !classes.contains(&class) {
                classes.push(class);
                let joined = classes.join(" ");
                let _ = element.attrs.insert("class".to_string(), joined);
            }
        }
    }

    /// [§ 7.1 DOMTokenList remove](https://dom.spec.whatwg.org/#dom-domtokenlist-remove)
    pub fn remove_class(&mut self, id: NodeId, class: &str) {
        if let Some(element) = self.as_element_mut(id) {
            if element.has_class(class) {
                let remaining: Vec<String> = element
                    .class_list()
                    .into_iter()
                    .filter(|c| *c != class)
                    .map(str::to_string)
                    .collect();
                let refs: Vec<&str> = remaining.iter().map(String::as_str).collect();
                element.set_class_list(&refs);
            }
        }
    }

    /// [§ 7.1 DOMTokenList toggle](https://dom.spec.whatwg.org/#dom-domtokenlist-toggle)
    ///
    /// "If token is present, remove it and return false. Otherwise, append
    /// token and return true."
    pub fn toggle_class(&mut self, id: NodeId, class: &str) -> bool {
        if self.has_class(id, class) {
            self.remove_class(id, class);
            false
        } else {
            self.add_class(id, class);
            true
        }
    }

    // ----- inline style -----

    /// [CSSOM § 6.6 setProperty](https://drafts.csswg.org/cssom/#dom-cssstyledeclaration-setproperty)
    ///
    /// Updates one declaration of the `style` attribute, keeping the order of
    /// the others.
    pub fn set_style_property(&mut self, id: NodeId, property: &str, value: &str) {
        let mut declarations = self.style_declarations(id);
        match declarations.iter_mut().find(|(name, _)| name == property) {
            Some(existing) => existing.1 = value.to_string(),
            None => declarations.push((property.to_string(), value.to_string())),
        }
        let style = declarations
            .iter()
            .map(|(name, value)| format!("{name}: {value};"))
            .collect::<Vec<_>>()
            .join(" ");
        self.set_attribute(id, "style", &style);
    }

    /// [CSSOM § 6.6 getPropertyValue](https://drafts.csswg.org/cssom/#dom-cssstyledeclaration-getpropertyvalue)
    #[must_use]
    pub fn style_property(&self, id: NodeId, property: &str) -> Option<String> {
        self.style_declarations(id)
            .into_iter()
            .find(|(name, _)| name == property)
            .map(|(_, value)| value)
    }

    fn style_declarations(&self, id: NodeId) -> Vec<(String, String)> {
        self.get_attribute(id, "style")
            .map(|style| {
                style
                    .split(';')
                    .filter_map(|decl| decl.split_once(':'))
                    .map(|(name, value)| (name.trim().to_string(), value.trim().to_string()))
                    .filter(|(name, _)| !name.is_empty())
                    .collect()
            })
            .unwrap_or_default()
    }

    // ----- content -----

    /// [§ 4.4 textContent](https://dom.spec.whatwg.org/#dom-node-textcontent)
    ///
    /// Setting replaces all children with a single text node (or none for an
    /// empty string).
    pub fn set_text_content(&mut self, id: NodeId, text: &str) {
        self.remove_all_children(id);
        if !text.is_empty() {
            let text_node = self.create_text_node(text);
            self.append_child(id, text_node);
        }
    }

    /// [§ 4.4 textContent](https://dom.spec.whatwg.org/#dom-node-textcontent)
    ///
    /// "The descendant text content of node." Opaque markup is not included.
    #[must_use]
    pub fn text_content(&self, id: NodeId) -> String {
        let mut out = String::new();
        if let Some(text) = self.as_text(id) {
            out.push_str(text);
        }
        for node in self.descendants(id) {
            if let Some(text) = self.as_text(node) {
                out.push_str(text);
            }
        }
        out
    }

    /// [§ 3.5 innerHTML](https://html.spec.whatwg.org/multipage/dynamic-markup-insertion.html#dom-element-innerhtml)
    ///
    /// Replaces the children of `id` with trusted markup. No sanitization.
    ///
    /// When the only child is already a markup node it is rewritten in
    /// place, so repeated assignments do not grow the arena.
    pub fn set_inner_html(&mut self, id: NodeId, markup: &str) {
        let only_child = match self.children(id) {
            [only] => Some(*only),
            _ => None,
        };
        if let Some(child) = only_child.filter(|_| !markup.is_empty()) {
            if let Some(NodeType::Markup(existing)) = self.get_mut(child).map(|n| &mut n.node_type) {
                if existing.as_str() != markup {
                    markup.clone_into(existing);
                }
                return;
            }
        }
        self.remove_all_children(id);
        if !markup.is_empty() {
            let fragment = self.alloc(NodeType::Markup(markup.to_string()));
            self.append_child(id, fragment);
        }
    }

    // ----- queries -----

    /// [§ 4.9 closest](https://dom.spec.whatwg.org/#dom-element-closest)
    ///
    /// The inclusive ancestor of `id` nearest to it that carries attribute
    /// `name`, the equivalent of `closest('[name]')`.
    #[must_use]
    pub fn closest_with_attribute(&self, id: NodeId, name: &str) -> Option<NodeId> {
        std::iter::once(id)
            .chain(self.ancestors(id))
            .find(|&node| self.has_attribute(node, name))
    }

    /// [§ 4.5 getElementsByClassName](https://dom.spec.whatwg.org/#dom-document-getelementsbyclassname)
    ///
    /// Elements under `scope` carrying `class`, in tree order.
    #[must_use]
    pub fn elements_with_class(&self, scope: NodeId, class: &str) -> Vec<NodeId> {
        self.descendants(scope)
            .into_iter()
            .filter(|&id| self.has_class(id, class))
            .collect()
    }

    /// [§ 5.1 getElementById](https://dom.spec.whatwg.org/#dom-nonelementparentnode-getelementbyid)
    ///
    /// "If elementId is the empty string, return null."
    #[must_use]
    pub fn get_element_by_id(&self, element_id: &str) -> Option<NodeId> {
        if element_id.is_empty() {
            return None;
        }
        self.descendants(NodeId::ROOT)
            .into_iter()
            .find(|&id| self.as_element(id).and_then(ElementData::id) == Some(element_id))
    }

    /// First child of `id` that is an element with tag `tag_name`.
    #[must_use]
    pub fn child_element_by_tag(&self, id: NodeId, tag_name: &str) -> Option<NodeId> {
        self.children(id)
            .iter()
            .copied()
            .find(|&child| self.tag_name(child) == Some(tag_name))
    }

    /// [§ 3.1.1 The document element](https://html.spec.whatwg.org/multipage/dom.html#the-html-element-2)
    ///
    /// "The document element of a document is the element whose parent is that
    /// document, if it exists; otherwise null."
    #[must_use]
    pub fn document_element(&self) -> Option<NodeId> {
        self.children(NodeId::ROOT)
            .iter()
            .find(|&&id| self.as_element(id).is_some())
            .copied()
    }

    /// [§ 3.1.3 The body element](https://html.spec.whatwg.org/multipage/dom.html#the-body-element-2)
    ///
    /// "The body element of a document is the first of the html element's children
    /// that is either a body element or a frameset element, or null if there is
    /// no such element."
    #[must_use]
    pub fn body(&self) -> Option<NodeId> {
        let html = self.document_element()?;
        self.children(html)
            .iter()
            .find(|&&id| matches!(self.tag_name(id), Some("body" | "frameset")))
            .copied()
    }

    // ----- events -----

    /// [§ 2.7 addEventListener](https://dom.spec.whatwg.org/#dom-eventtarget-addeventlistener)
    ///
    /// Registers `callback` for `kind` events reaching `target` (directly or
    /// by bubbling). Returns an id for [`Self::remove_event_listener`].
    pub fn add_event_listener<F>(&mut self, target: NodeId, kind: EventKind, callback: F) -> ListenerId
    where
        F: Fn(&mut Self, &dyn Layout, &Event) + 'static,
    {
        self.listeners.add(target, kind, callback)
    }

    /// [§ 2.7 removeEventListener](https://dom.spec.whatwg.org/#dom-eventtarget-removeeventlistener)
    ///
    /// Returns whether a listener was removed.
    pub fn remove_event_listener(&mut self, listener: ListenerId) -> bool {
        self.listeners.remove(listener)
    }

    /// Number of listeners registered on `target` for `kind`.
    #[must_use]
    pub fn listener_count(&self, target: NodeId, kind: EventKind) -> usize {
        self.listeners.count(target, kind)
    }

    /// [§ 2.9 Dispatching events](https://dom.spec.whatwg.org/#concept-event-dispatch)
    ///
    /// Invokes listeners on `target`, then on each ancestor up to the
    /// document. Listeners added or removed during dispatch take effect for
    /// the next event.
    pub fn dispatch_event(&mut self, layout: &dyn Layout, kind: EventKind, target: NodeId) {
        let path: Vec<NodeId> = std::iter::once(target).chain(self.ancestors(target)).collect();
        for current_target in path {
            let callbacks = self.listeners.snapshot(current_target, kind);
            let event = Event {
                kind,
                target,
                current_target,
            };
            for callback in callbacks {
                callback(self, layout, &event);
            }
        }
    }
}

impl Default for DomTree {
    fn default() -> Self {
        Self::new()
    }
}

/// Iterator over ancestors of a node.
pub struct AncestorIterator<'a> {
    tree: &'a DomTree,
    current: Option<NodeId>,
}

impl Iterator for AncestorIterator<'_> {
    type Item = NodeId;

    fn next(&mut self) -> Option<Self::Item> {
        let id = self.current?;
        self.current = self.tree.parent(id);
        Some(id)
    }
}
