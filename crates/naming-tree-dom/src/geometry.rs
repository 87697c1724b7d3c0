//! Layout geometry seen by event handlers.
//!
//! [CSSOM View Module](https://drafts.csswg.org/cssom-view/)
//!
//! The tree does not lay anything out itself. A host supplies a [`Layout`]
//! that answers the handful of CSSOM View queries handlers make.

use std::collections::HashMap;

use crate::{DomTree, NodeId};

/// [§ 6.1 DOMRect](https://drafts.fxtf.org/geometry/#DOMRect)
///
/// A rectangle in viewport coordinates, in CSS pixels.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct Rect {
    /// "left": x coordinate of the left edge
    pub left: f64,
    /// "top": y coordinate of the top edge
    pub top: f64,
    /// "width"
    pub width: f64,
    /// "height"
    pub height: f64,
}

impl Rect {
    /// Create a rectangle from its top-left corner and size.
    #[must_use]
    pub const fn new(left: f64, top: f64, width: f64, height: f64) -> Self {
        Self {
            left,
            top,
            width,
            height,
        }
    }

    /// "right": `left + width`
    #[must_use]
    pub fn right(&self) -> f64 {
        self.left + self.width
    }

    /// "bottom": `top + height`
    #[must_use]
    pub fn bottom(&self) -> f64 {
        self.top + self.height
    }
}

/// Size of the layout viewport.
///
/// [§ 4 innerWidth / innerHeight](https://drafts.csswg.org/cssom-view/#dom-window-innerwidth)
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Viewport {
    /// "innerWidth"
    pub width: f64,
    /// "innerHeight"
    pub height: f64,
}

impl Viewport {
    /// Create a viewport of the given size.
    #[must_use]
    pub const fn new(width: f64, height: f64) -> Self {
        Self { width, height }
    }
}

impl Default for Viewport {
    fn default() -> Self {
        Self::new(1280.0, 800.0)
    }
}

/// Geometry queries available to event handlers.
pub trait Layout {
    /// Size of the viewport.
    fn viewport(&self) -> Viewport;

    /// [§ 6.1 getBoundingClientRect](https://drafts.csswg.org/cssom-view/#dom-element-getboundingclientrect)
    fn bounding_client_rect(&self, dom: &DomTree, id: NodeId) -> Rect;

    /// [§ 7 offsetHeight](https://drafts.csswg.org/cssom-view/#dom-htmlelement-offsetheight)
    ///
    /// "If the element does not have any associated box return zero."
    fn offset_height(&self, dom: &DomTree, id: NodeId) -> f64;
}

/// A [`Layout`] whose boxes are set by the host.
///
/// Elements without a recorded rectangle report an empty one. Elements
/// hidden with `display: none` (on themselves or an ancestor) have no box
/// and report zero height.
#[derive(Debug, Clone, Default)]
pub struct StaticLayout {
    viewport: Viewport,
    rects: HashMap<NodeId, Rect>,
    heights: HashMap<NodeId, f64>,
}

impl StaticLayout {
    /// A layout with the given viewport and no boxes.
    #[must_use]
    pub fn new(viewport: Viewport) -> Self {
        Self {
            viewport,
            ..Self::default()
        }
    }

    /// Record the bounding rectangle of `id`.
    pub fn set_rect(&mut self, id: NodeId, rect: Rect) {
        let _ = self.rects.insert(id, rect);
    }

    /// Record the rendered height of `id` when displayed, independently of
    /// its bounding rectangle (e.g. an absolutely positioned tooltip whose
    /// height depends on its content).
    pub fn set_height(&mut self, id: NodeId, height: f64) {
        let _ = self.heights.insert(id, height);
    }

    /// Change the viewport size.
    pub fn set_viewport(&mut self, viewport: Viewport) {
        self.viewport = viewport;
    }
}

fn has_box(dom: &DomTree, id: NodeId) -> bool {
    std::iter::once(id)
        .chain(dom.ancestors(id))
        .all(|node| dom.style_property(node, "display").as_deref() != Some("none"))
}

impl Layout for StaticLayout {
    fn viewport(&self) -> Viewport {
        self.viewport
    }

    fn bounding_client_rect(&self, dom: &DomTree, id: NodeId) -> Rect {
        if !has_box(dom, id) {
            return Rect::default();
        }
        self.rects.get(&id).copied().unwrap_or_default()
    }

    fn offset_height(&self, dom: &DomTree, id: NodeId) -> f64 {
        if !has_box(dom, id) {
            return 0.0;
        }
        self.heights
            .get(&id)
            .copied()
            .or_else(|| self.rects.get(&id).map(|r| r.height))
            .unwrap_or(0.0)
    }
}
