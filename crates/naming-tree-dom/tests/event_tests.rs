//! Tests for listener registration, bubbling dispatch and layout queries.

use std::cell::RefCell;
use std::rc::Rc;
use std::str::FromStr;

use naming_tree_dom::{DomTree, EventKind, Layout, NodeId, Rect, StaticLayout, Viewport};

fn nested(tree: &mut DomTree) -> (NodeId, NodeId) {
    let outer = tree.create_element("li");
    let inner = tree.create_element("span");
    tree.append_child(NodeId::ROOT, outer);
    tree.append_child(outer, inner);
    (outer, inner)
}

#[test]
fn test_event_kind_names() {
    assert_eq!(EventKind::MouseOver.as_ref(), "mouseover");
    assert_eq!(EventKind::Click.to_string(), "click");
    assert_eq!(EventKind::from_str("mouseout").unwrap(), EventKind::MouseOut);
}

#[test]
fn test_click_bubbles_to_ancestors_and_document() {
    let mut tree = DomTree::new();
    let (outer, inner) = nested(&mut tree);
    let seen = Rc::new(RefCell::new(Vec::new()));

    for node in [inner, outer, NodeId::ROOT] {
        let seen = Rc::clone(&seen);
        let _ = tree.add_event_listener(node, EventKind::Click, move |_, _, event| {
            seen.borrow_mut().push((event.target, event.current_target));
        });
    }

    tree.dispatch_event(&StaticLayout::default(), EventKind::Click, inner);

    assert_eq!(
        *seen.borrow(),
        vec![(inner, inner), (inner, outer), (inner, NodeId::ROOT)]
    );
}

#[test]
fn test_listener_for_other_kind_is_not_called() {
    let mut tree = DomTree::new();
    let (outer, _) = nested(&mut tree);
    let calls = Rc::new(RefCell::new(0));
    let counter = Rc::clone(&calls);
    let _ = tree.add_event_listener(outer, EventKind::MouseOver, move |_, _, _| {
        *counter.borrow_mut() += 1;
    });

    tree.dispatch_event(&StaticLayout::default(), EventKind::Click, outer);
    assert_eq!(*calls.borrow(), 0);
}

#[test]
fn test_handler_can_mutate_tree() {
    let mut tree = DomTree::new();
    let (outer, inner) = nested(&mut tree);
    let _ = tree.add_event_listener(inner, EventKind::Click, move |dom, _, _| {
        let _ = dom.toggle_class(outer, "collapsed");
    });

    let layout = StaticLayout::default();
    tree.dispatch_event(&layout, EventKind::Click, inner);
    assert!(tree.has_class(outer, "collapsed"));
    tree.dispatch_event(&layout, EventKind::Click, inner);
    assert!(!tree.has_class(outer, "collapsed"));
}

#[test]
fn test_remove_event_listener() {
    let mut tree = DomTree::new();
    let (outer, _) = nested(&mut tree);
    let id = tree.add_event_listener(outer, EventKind::Click, |_, _, _| {});
    assert_eq!(tree.listener_count(outer, EventKind::Click), 1);

    assert!(tree.remove_event_listener(id));
    assert!(!tree.remove_event_listener(id));
    assert_eq!(tree.listener_count(outer, EventKind::Click), 0);
}

#[test]
fn test_static_layout_hides_boxes_under_display_none() {
    let mut tree = DomTree::new();
    let (outer, inner) = nested(&mut tree);
    let mut layout = StaticLayout::new(Viewport::new(800.0, 600.0));
    layout.set_rect(inner, Rect::new(10.0, 20.0, 100.0, 18.0));
    layout.set_height(outer, 40.0);

    let rect = layout.bounding_client_rect(&tree, inner);
    assert_eq!(rect.bottom(), 38.0);
    assert_eq!(rect.right(), 110.0);
    assert_eq!(layout.offset_height(&tree, inner), 18.0);
    assert_eq!(layout.offset_height(&tree, outer), 40.0);

    tree.set_style_property(outer, "display", "none");
    assert_eq!(layout.offset_height(&tree, outer), 0.0);
    assert_eq!(layout.bounding_client_rect(&tree, inner), Rect::default());
    assert_eq!(layout.viewport().width, 800.0);
}
