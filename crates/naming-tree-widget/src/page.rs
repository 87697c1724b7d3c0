//! A minimal host page: a document, its layout, and pointer input.
//!
//! This is what the CLI and the tests use in place of a browser window.

use naming_tree_dom::{DomTree, EventKind, NodeId, Rect, StaticLayout, Viewport};

use crate::component::{LoadOutcome, ModelTree, SRC_ATTRIBUTE, TAG_NAME};
use crate::config::TreeConfig;
use crate::loader::Fetcher;

/// A host document with `<html>`, `<head>` and `<body>`.
#[derive(Debug)]
pub struct Page {
    /// The document.
    pub dom: DomTree,
    /// Geometry answers for the document.
    pub layout: StaticLayout,
}

impl Default for Page {
    fn default() -> Self {
        Self::new(Viewport::default())
    }
}

impl Page {
    /// An empty page with the given viewport.
    #[must_use]
    pub fn new(viewport: Viewport) -> Self {
        Self {
            dom: DomTree::new_html_document(),
            layout: StaticLayout::new(viewport),
        }
    }

    /// The `<body>` element.
    #[must_use]
    pub fn body(&self) -> NodeId {
        self.dom.body().unwrap_or(NodeId::ROOT)
    }

    /// Create a detached `<model-tree>` element, optionally with a `src`,
    /// and bind a component to it.
    pub fn create_model_tree(&mut self, src: Option<&str>, config: TreeConfig) -> ModelTree {
        let host = self.dom.create_element(TAG_NAME);
        if let Some(src) = src {
            self.dom.set_attribute(host, SRC_ATTRIBUTE, src);
        }
        ModelTree::new(host, config)
    }

    /// Append the component's host to the body if it is not in the
    /// document yet, then connect it.
    pub fn insert(&mut self, tree: &mut ModelTree, fetcher: &dyn Fetcher) -> LoadOutcome {
        if !self.dom.is_connected(tree.host()) {
            let body = self.body();
            self.dom.append_child(body, tree.host());
        }
        tree.connect(&mut self.dom, fetcher)
    }

    /// Take the component's host out of the document and disconnect it.
    pub fn remove(&mut self, tree: &mut ModelTree) {
        if let Some(parent) = self.dom.parent(tree.host()) {
            self.dom.remove_child(parent, tree.host());
        }
        tree.disconnected_callback(&mut self.dom);
    }

    /// Give `id` a bounding box.
    pub fn set_rect(&mut self, id: NodeId, rect: Rect) {
        self.layout.set_rect(id, rect);
    }

    /// Click `target`.
    pub fn click(&mut self, target: NodeId) {
        self.dom.dispatch_event(&self.layout, EventKind::Click, target);
    }

    /// Move the pointer onto `target`.
    pub fn hover(&mut self, target: NodeId) {
        self.dom.dispatch_event(&self.layout, EventKind::MouseOver, target);
    }

    /// Move the pointer off `target`.
    pub fn unhover(&mut self, target: NodeId) {
        self.dom.dispatch_event(&self.layout, EventKind::MouseOut, target);
    }
}
