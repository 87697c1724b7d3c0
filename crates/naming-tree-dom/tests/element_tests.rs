//! Tests for element state: attributes, class list, inline style and content.

use naming_tree_dom::{DomTree, NodeId, inner_html};

fn attached_element(tree: &mut DomTree, tag: &str) -> NodeId {
    let id = tree.create_element(tag);
    tree.append_child(NodeId::ROOT, id);
    id
}

#[test]
fn test_class_list_keeps_order() {
    let mut tree = DomTree::new();
    let li = attached_element(&mut tree, "li");
    tree.set_attribute(li, "class", "company co-x");
    tree.add_class(li, "collapsed");

    assert_eq!(tree.get_attribute(li, "class"), Some("company co-x collapsed"));
}

#[test]
fn test_add_class_is_idempotent() {
    let mut tree = DomTree::new();
    let li = attached_element(&mut tree, "li");
    tree.add_class(li, "collapsed");
    tree.add_class(li, "collapsed");

    assert_eq!(tree.get_attribute(li, "class"), Some("collapsed"));
}

#[test]
fn test_remove_class_leaves_others() {
    let mut tree = DomTree::new();
    let li = attached_element(&mut tree, "li");
    tree.set_attribute(li, "class", "co-x collapsed n-dead");
    tree.remove_class(li, "collapsed");

    assert_eq!(tree.get_attribute(li, "class"), Some("co-x n-dead"));
    assert!(!tree.has_class(li, "collapsed"));
}

#[test]
fn test_toggle_class_reports_new_state() {
    let mut tree = DomTree::new();
    let li = attached_element(&mut tree, "li");

    assert!(tree.toggle_class(li, "collapsed"));
    assert!(tree.has_class(li, "collapsed"));
    assert!(!tree.toggle_class(li, "collapsed"));
    assert!(!tree.has_class(li, "collapsed"));
}

#[test]
fn test_class_ops_on_text_node_are_ignored() {
    let mut tree = DomTree::new();
    let text = tree.create_text_node("x");
    tree.add_class(text, "collapsed");
    assert!(!tree.has_class(text, "collapsed"));
}

#[test]
fn test_style_property_update_keeps_order() {
    let mut tree = DomTree::new();
    let tip = attached_element(&mut tree, "div");
    tree.set_style_property(tip, "display", "block");
    tree.set_style_property(tip, "left", "12px");
    tree.set_style_property(tip, "display", "none");

    assert_eq!(tree.get_attribute(tip, "style"), Some("display: none; left: 12px;"));
    assert_eq!(tree.style_property(tip, "left").as_deref(), Some("12px"));
    assert_eq!(tree.style_property(tip, "top"), None);
}

#[test]
fn test_text_content_replaces_children() {
    let mut tree = DomTree::new();
    let span = attached_element(&mut tree, "span");
    tree.set_text_content(span, "first");
    tree.set_text_content(span, "second");

    assert_eq!(tree.children(span).len(), 1);
    assert_eq!(tree.text_content(span), "second");

    tree.set_text_content(span, "");
    assert!(tree.children(span).is_empty());
}

#[test]
fn test_inner_html_is_opaque() {
    let mut tree = DomTree::new();
    let div = attached_element(&mut tree, "div");
    tree.set_inner_html(div, "<b>bold</b>");

    assert_eq!(tree.children(div).len(), 1);
    assert_eq!(tree.text_content(div), "");
}

#[test]
fn test_inner_html_reuses_markup_node() {
    let mut tree = DomTree::new();
    let div = attached_element(&mut tree, "div");
    tree.set_inner_html(div, "<b>one</b>");
    let fragment = tree.first_child(div).unwrap();
    let nodes = tree.len();

    for _ in 0..100 {
        tree.set_inner_html(div, "<i>two</i>");
        tree.set_inner_html(div, "<b>one</b>");
    }

    assert_eq!(tree.len(), nodes);
    assert_eq!(tree.children(div), &[fragment]);
    assert_eq!(inner_html(&tree, div), "<b>one</b>");

    tree.set_inner_html(div, "");
    assert!(tree.children(div).is_empty());
}

#[test]
fn test_remove_attribute() {
    let mut tree = DomTree::new();
    let span = attached_element(&mut tree, "span");
    tree.set_attribute(span, "data-tip", "hello");
    tree.set_attribute(span, "class", "n-name");

    tree.remove_attribute(span, "data-tip");
    tree.remove_attribute(span, "missing");

    assert!(!tree.has_attribute(span, "data-tip"));
    assert_eq!(tree.get_attribute(span, "class"), Some("n-name"));
}

#[test]
fn test_closest_with_attribute_is_inclusive() {
    let mut tree = DomTree::new();
    let row = attached_element(&mut tree, "div");
    let name = tree.create_element("span");
    tree.append_child(row, name);
    let text = tree.create_text_node("label");
    tree.append_child(name, text);
    tree.set_attribute(name, "data-tip", "hello");

    assert_eq!(tree.closest_with_attribute(text, "data-tip"), Some(name));
    assert_eq!(tree.closest_with_attribute(name, "data-tip"), Some(name));
    assert_eq!(tree.closest_with_attribute(row, "data-tip"), None);
}

#[test]
fn test_elements_with_class_is_scoped() {
    let mut tree = DomTree::new();
    let inside = attached_element(&mut tree, "div");
    let outside = attached_element(&mut tree, "div");
    let a = tree.create_element_with_class("li", "collapsed");
    let b = tree.create_element_with_class("li", "collapsed");
    tree.append_child(inside, a);
    tree.append_child(outside, b);

    assert_eq!(tree.elements_with_class(inside, "collapsed"), vec![a]);
    assert_eq!(tree.elements_with_class(NodeId::ROOT, "collapsed"), vec![a, b]);
}

#[test]
fn test_get_element_by_id() {
    let mut tree = DomTree::new_html_document();
    let body = tree.body().unwrap();
    let tip = tree.create_element("div");
    tree.set_attribute(tip, "id", "tip");

    assert_eq!(tree.get_element_by_id("tip"), None);
    tree.append_child(body, tip);
    assert_eq!(tree.get_element_by_id("tip"), Some(tip));
    assert_eq!(tree.get_element_by_id(""), None);
}
