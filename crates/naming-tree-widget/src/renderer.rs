//! Building the tree's DOM.
//!
//! The structure produced for a document is:
//!
//! ```text
//! div.tree-outer
//! ├── div.tree-toolbar
//! │   ├── span.tree-toolbar-title
//! │   └── div.tree-toolbar-actions
//! │       ├── button[data-action=expand]
//! │       └── button[data-action=collapse]
//! └── div.tree-scroll
//!     └── ul.t
//!         └── li.company.co-<company>        one per root
//!             ├── div.n                      the row
//!             │   ├── span.n-toggle          only with children
//!             │   ├── span.n-name | span.n-section
//!             │   ├── span.n-date
//!             │   ├── span.n-note
//!             │   ├── span.n-note-dim
//!             │   └── span.n-count           only with children
//!             └── ul.t                       only with children
//!                 └── li.co-<company> ...
//! ```
//!
//! The DOM is built once. Afterwards only the `collapsed` class changes.

use naming_tree_data::{Forest, TreeNode};
use naming_tree_dom::{DomTree, EventKind, NodeId};

use crate::config::TreeConfig;
use crate::tooltip::TIP_ATTRIBUTE;

/// Class marking a collapsed `li`.
pub const COLLAPSED: &str = "collapsed";
/// Role class of root-level `li`s.
pub const COMPANY: &str = "company";
/// Class of `li`s for dead nodes.
pub const DEAD: &str = "n-dead";
/// Class of every tree list, root and nested.
pub const LIST: &str = "t";
/// Prefix of the category class derived from a node's company.
pub const COMPANY_PREFIX: &str = "co-";

/// Chevron drawn in every toggle.
const CHEVRON: &str = r#"<svg viewBox="0 0 10 10"><path d="M3 1l4 4-4 4"/></svg>"#;

/// Handles to the parts of a rendered tree.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RenderedTree {
    /// `div.tree-outer`, the element appended to the host.
    pub outer: NodeId,
    /// `div.tree-toolbar`.
    pub toolbar: NodeId,
    /// The "expand all" button.
    pub expand_button: NodeId,
    /// The "collapse all" button.
    pub collapse_button: NodeId,
    /// The root `ul.t`.
    pub list: NodeId,
    /// One `li` per root node, in document order.
    pub root_items: Vec<NodeId>,
}

/// Category class for a company id: `co-<id>`.
#[must_use]
pub fn company_class(company: &str) -> String {
    format!("{COMPANY_PREFIX}{company}")
}

/// Render `forest` and append the result to `host`.
///
/// Resolves company inheritance first (a no-op if it already ran), then
/// builds the toolbar and the nested lists and wires the toggle and
/// toolbar handlers.
pub fn render(dom: &mut DomTree, host: NodeId, forest: &mut Forest, config: &TreeConfig) -> RenderedTree {
    forest.resolve_companies();

    let outer = dom.create_element_with_class("div", "tree-outer");

    let (toolbar, expand_button, collapse_button) = build_toolbar(dom, config);
    dom.append_child(outer, toolbar);

    let scroll = dom.create_element_with_class("div", "tree-scroll");
    let list = dom.create_element_with_class("ul", LIST);
    let root_items: Vec<NodeId> = forest
        .roots()
        .iter()
        .map(|company| {
            let li = render_node(dom, company, true);
            dom.append_child(list, li);
            li
        })
        .collect();
    dom.append_child(scroll, list);
    dom.append_child(outer, scroll);

    let _ = dom.add_event_listener(expand_button, EventKind::Click, move |dom, _, _| {
        expand_all(dom, outer);
    });
    let _ = dom.add_event_listener(collapse_button, EventKind::Click, move |dom, _, _| {
        collapse_all(dom, list);
    });

    dom.append_child(host, outer);

    RenderedTree {
        outer,
        toolbar,
        expand_button,
        collapse_button,
        list,
        root_items,
    }
}

fn build_toolbar(dom: &mut DomTree, config: &TreeConfig) -> (NodeId, NodeId, NodeId) {
    let toolbar = dom.create_element_with_class("div", "tree-toolbar");

    let title = dom.create_element_with_class("span", "tree-toolbar-title");
    dom.set_text_content(title, &config.title);
    dom.append_child(toolbar, title);

    let actions = dom.create_element_with_class("div", "tree-toolbar-actions");
    let expand = dom.create_element("button");
    dom.set_attribute(expand, "data-action", "expand");
    dom.set_text_content(expand, &config.expand_label);
    let collapse = dom.create_element("button");
    dom.set_attribute(collapse, "data-action", "collapse");
    dom.set_text_content(collapse, &config.collapse_label);
    dom.append_child(actions, expand);
    dom.append_child(actions, collapse);
    dom.append_child(toolbar, actions);

    (toolbar, expand, collapse)
}

/// Class attribute of a node's `li`.
fn item_classes(node: &TreeNode, is_root: bool) -> Vec<String> {
    let mut classes = Vec::new();
    if is_root {
        classes.push(COMPANY.to_string());
    }
    if let Some(company) = node.company_id() {
        classes.push(company_class(company));
    }
    if node.is_collapsed() {
        classes.push(COLLAPSED.to_string());
    }
    if !is_root && node.is_dead() {
        classes.push(DEAD.to_string());
    }
    classes
}

fn render_node(dom: &mut DomTree, node: &TreeNode, is_root: bool) -> NodeId {
    let li = dom.create_element_with_class("li", &item_classes(node, is_root).join(" "));
    let row = dom.create_element_with_class("div", "n");
    let info = node.info();
    let has_children = node.has_children();

    if has_children {
        let toggle = dom.create_element_with_class("span", "n-toggle");
        dom.set_inner_html(toggle, CHEVRON);
        let _ = dom.add_event_listener(toggle, EventKind::Click, move |dom, _, _| {
            let _ = dom.toggle_class(li, COLLAPSED);
        });
        dom.append_child(row, toggle);
    }

    let name_class = if node.is_section() { "n-section" } else { "n-name" };
    let name = dom.create_element_with_class("span", name_class);
    dom.set_text_content(name, &info.name);
    if let Some(tip) = &info.tip {
        dom.set_attribute(name, TIP_ATTRIBUTE, tip);
        dom.set_style_property(name, "cursor", "help");
    }
    dom.append_child(row, name);

    let labels = [
        ("n-date", info.date.clone()),
        ("n-note", info.note.as_ref().map(|note| format!("\u{2190} {note}"))),
        ("n-note-dim", info.note_dim.clone()),
    ];
    for (class, text) in labels {
        if let Some(text) = text {
            let span = dom.create_element_with_class("span", class);
            dom.set_text_content(span, &text);
            dom.append_child(row, span);
        }
    }

    if has_children {
        let count = dom.create_element_with_class("span", "n-count");
        dom.set_text_content(count, &node.leaf_count().to_string());
        dom.append_child(row, count);
    }

    dom.append_child(li, row);

    if has_children {
        let list = dom.create_element_with_class("ul", LIST);
        for child in node.children() {
            let child_li = render_node(dom, child, false);
            dom.append_child(list, child_li);
        }
        dom.append_child(li, list);
    }

    li
}

/// Remove the collapsed class from every element under `scope`.
pub fn expand_all(dom: &mut DomTree, scope: NodeId) {
    for id in dom.elements_with_class(scope, COLLAPSED) {
        dom.remove_class(id, COLLAPSED);
    }
}

/// Collapse every node that owns a nested list, except root-level
/// (company) items.
///
/// `list` is the root `ul.t`; every `ul.t` below it is nested.
pub fn collapse_all(dom: &mut DomTree, list: NodeId) {
    let nested: Vec<NodeId> = dom
        .descendants(list)
        .into_iter()
        .filter(|&id| dom.tag_name(id) == Some("ul") && dom.has_class(id, LIST))
        .collect();
    for ul in nested {
        if let Some(owner) = dom.parent(ul) {
            if !dom.has_class(owner, COMPANY) {
                dom.add_class(owner, COLLAPSED);
            }
        }
    }
}
