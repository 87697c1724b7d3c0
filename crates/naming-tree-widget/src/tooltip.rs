//! The floating tooltip.
//!
//! One tooltip element per component instance, appended to the body and
//! driven by two document-level listeners (`mouseover` / `mouseout`). The
//! element and the listeners are acquired together by
//! [`TooltipController::attach`] and released together by
//! [`TooltipController::detach`], which consumes the controller so a
//! release cannot happen twice. A detached element can be handed back to
//! [`TooltipController::reattach`] so reconnecting does not allocate.

use std::cell::RefCell;
use std::rc::Rc;

use naming_tree_dom::{DomTree, Event, EventKind, Layout, ListenerId, NodeId, Rect, Viewport};

use crate::config::TooltipConfig;

/// Attribute carrying tooltip content on a target element.
pub const TIP_ATTRIBUTE: &str = "data-tip";

/// Where the tooltip is drawn, in viewport px.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Position {
    /// CSS `left`
    pub left: f64,
    /// CSS `top`
    pub top: f64,
}

/// Tooltip state machine.
#[derive(Debug, Clone, PartialEq, Default)]
pub enum TooltipState {
    /// Nothing shown.
    #[default]
    Hidden,
    /// Showing `content` at `position`.
    Visible {
        /// Rich-text content, inserted verbatim.
        content: String,
        /// Placement of the tooltip's top-left corner.
        position: Position,
    },
}

impl TooltipState {
    /// Whether the tooltip is showing.
    #[must_use]
    pub const fn is_visible(&self) -> bool {
        matches!(self, Self::Visible { .. })
    }
}

/// Place a tooltip of height `tooltip_height` next to `target`.
///
/// Above the target and left-aligned with it by default. Pulled left when
/// the assumed width would cross the right inset, pushed right when it
/// would cross the left inset, and flipped below the target when there is
/// no room above.
#[must_use]
pub fn place_tooltip(
    target: Rect,
    tooltip_height: f64,
    viewport: Viewport,
    config: &TooltipConfig,
) -> Position {
    let mut left = target.left;
    let mut top = target.top - tooltip_height - config.gap;

    if left + config.assumed_width > viewport.width - config.inset {
        left = viewport.width - config.assumed_width - config.inset;
    }
    if left < config.inset {
        left = config.inset;
    }
    if top < config.inset {
        top = target.bottom() + config.gap;
    }

    Position { left, top }
}

/// Owner of one tooltip element and its two page-wide listeners.
#[derive(Debug)]
pub struct TooltipController {
    element: NodeId,
    over: ListenerId,
    out: ListenerId,
    state: Rc<RefCell<TooltipState>>,
}

impl TooltipController {
    /// Create the tooltip element, append it to the body (or the document
    /// element when there is no body), and start listening for hover
    /// events anywhere on the page.
    ///
    /// Only tip-bearing elements inside `scope` show the tooltip; moving
    /// onto anything else hides it.
    pub fn attach(dom: &mut DomTree, scope: NodeId, config: &TooltipConfig) -> Self {
        let element = dom.create_element("div");
        Self::reattach(dom, element, scope, config)
    }

    /// Like [`Self::attach`], but reuse an element returned by an earlier
    /// [`Self::detach`] instead of allocating a new one.
    pub fn reattach(dom: &mut DomTree, element: NodeId, scope: NodeId, config: &TooltipConfig) -> Self {
        dom.set_attribute(element, "id", &config.element_id);
        hide(dom, element);
        let parent = dom.body().or_else(|| dom.document_element()).unwrap_or(NodeId::ROOT);
        dom.append_child(parent, element);

        let state = Rc::new(RefCell::new(TooltipState::Hidden));

        let over = {
            let state = Rc::clone(&state);
            let config = config.clone();
            dom.add_event_listener(NodeId::ROOT, EventKind::MouseOver, move |dom, layout, event| {
                let next = on_over(dom, layout, event, scope, element, &config);
                *state.borrow_mut() = next;
            })
        };

        let out = {
            let state = Rc::clone(&state);
            dom.add_event_listener(NodeId::ROOT, EventKind::MouseOut, move |dom, _, event| {
                if tip_target(dom, event.target, scope).is_some() {
                    hide(dom, element);
                    *state.borrow_mut() = TooltipState::Hidden;
                }
            })
        };

        Self {
            element,
            over,
            out,
            state,
        }
    }

    /// Remove both listeners and take the tooltip element out of the
    /// document. Returns the detached element for [`Self::reattach`].
    pub fn detach(self, dom: &mut DomTree) -> NodeId {
        let _ = dom.remove_event_listener(self.over);
        let _ = dom.remove_event_listener(self.out);
        if let Some(parent) = dom.parent(self.element) {
            dom.remove_child(parent, self.element);
        }
        self.element
    }

    /// The tooltip element.
    #[must_use]
    pub const fn element(&self) -> NodeId {
        self.element
    }

    /// Current state.
    #[must_use]
    pub fn state(&self) -> TooltipState {
        self.state.borrow().clone()
    }
}

/// The tip-bearing inclusive ancestor of `target`, if it lies in `scope`.
fn tip_target(dom: &DomTree, target: NodeId, scope: NodeId) -> Option<NodeId> {
    dom.closest_with_attribute(target, TIP_ATTRIBUTE)
        .filter(|&node| node == scope || dom.is_descendant_of(node, scope))
}

fn hide(dom: &mut DomTree, element: NodeId) {
    dom.set_style_property(element, "display", "none");
}

fn on_over(
    dom: &mut DomTree,
    layout: &dyn Layout,
    event: &Event,
    scope: NodeId,
    element: NodeId,
    config: &TooltipConfig,
) -> TooltipState {
    let Some(target) = tip_target(dom, event.target, scope) else {
        hide(dom, element);
        return TooltipState::Hidden;
    };
    let content = dom.get_attribute(target, TIP_ATTRIBUTE).unwrap_or_default().to_string();

    // Shown before measuring: a hidden element has no height.
    dom.set_inner_html(element, &content);
    dom.set_style_property(element, "display", "block");

    let rect = layout.bounding_client_rect(dom, target);
    let height = layout.offset_height(dom, element);
    let position = place_tooltip(rect, height, layout.viewport(), config);

    dom.set_style_property(element, "left", &format!("{}px", position.left));
    dom.set_style_property(element, "top", &format!("{}px", position.top));

    TooltipState::Visible { content, position }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn config() -> TooltipConfig {
        TooltipConfig::default()
    }

    #[test]
    fn test_above_and_left_aligned_by_default() {
        let target = Rect::new(100.0, 300.0, 80.0, 18.0);
        let pos = place_tooltip(target, 40.0, Viewport::new(1024.0, 768.0), &config());
        assert_eq!(pos, Position { left: 100.0, top: 252.0 });
    }

    #[test]
    fn test_flips_below_near_top() {
        let target = Rect::new(100.0, 30.0, 80.0, 18.0);
        let pos = place_tooltip(target, 40.0, Viewport::new(1024.0, 768.0), &config());
        assert_eq!(pos.top, 56.0);
    }

    #[test]
    fn test_clamped_at_right_edge() {
        let target = Rect::new(900.0, 300.0, 80.0, 18.0);
        let pos = place_tooltip(target, 40.0, Viewport::new(1024.0, 768.0), &config());
        assert_eq!(pos.left, 1024.0 - 280.0 - 12.0);
    }

    #[test]
    fn test_clamped_at_left_inset() {
        let target = Rect::new(3.0, 300.0, 80.0, 18.0);
        let pos = place_tooltip(target, 40.0, Viewport::new(1024.0, 768.0), &config());
        assert_eq!(pos.left, 12.0);
    }

    #[test]
    fn test_narrow_viewport_prefers_left_inset() {
        let target = Rect::new(50.0, 300.0, 80.0, 18.0);
        let pos = place_tooltip(target, 40.0, Viewport::new(200.0, 768.0), &config());
        assert_eq!(pos.left, 12.0);
    }
}
