//! Tests for DOM tree mutation: append, remove, re-parenting and connectivity.

use naming_tree_dom::{DomTree, NodeId};

// ========== append_child ==========

#[test]
fn test_append_links_siblings() {
    let mut tree = DomTree::new();
    let list = tree.create_element("ul");
    tree.append_child(NodeId::ROOT, list);

    let a = tree.create_element("li");
    let b = tree.create_element("li");
    tree.append_child(list, a);
    tree.append_child(list, b);

    assert_eq!(tree.children(list), &[a, b]);
    assert_eq!(tree.next_sibling(a), Some(b));
    assert_eq!(tree.prev_sibling(b), Some(a));
    assert_eq!(tree.first_child(list), Some(a));
    assert_eq!(tree.last_child(list), Some(b));
}

#[test]
fn test_append_reparents_attached_child() {
    let mut tree = DomTree::new();
    let from = tree.create_element("ul");
    let to = tree.create_element("ul");
    tree.append_child(NodeId::ROOT, from);
    tree.append_child(NodeId::ROOT, to);

    let item = tree.create_element("li");
    tree.append_child(from, item);
    tree.append_child(to, item);

    assert!(tree.children(from).is_empty());
    assert_eq!(tree.children(to), &[item]);
    assert_eq!(tree.parent(item), Some(to));
}

// ========== remove_child ==========

#[test]
fn test_remove_child_single_child() {
    let mut tree = DomTree::new();
    let parent = tree.create_element("div");
    tree.append_child(NodeId::ROOT, parent);

    let child = tree.create_element("p");
    tree.append_child(parent, child);
    tree.remove_child(parent, child);

    assert!(tree.children(parent).is_empty());
    assert_eq!(tree.parent(child), None);
    assert_eq!(tree.prev_sibling(child), None);
    assert_eq!(tree.next_sibling(child), None);
}

#[test]
fn test_remove_child_middle_of_three() {
    let mut tree = DomTree::new();
    let parent = tree.create_element("div");
    tree.append_child(NodeId::ROOT, parent);

    let a = tree.create_element("a");
    let b = tree.create_element("b");
    let c = tree.create_element("c");
    tree.append_child(parent, a);
    tree.append_child(parent, b);
    tree.append_child(parent, c);

    tree.remove_child(parent, b);

    assert_eq!(tree.children(parent), &[a, c]);
    assert_eq!(tree.next_sibling(a), Some(c));
    assert_eq!(tree.prev_sibling(c), Some(a));
}

#[test]
fn test_remove_child_of_other_parent_is_noop() {
    let mut tree = DomTree::new();
    let parent = tree.create_element("div");
    let other = tree.create_element("div");
    tree.append_child(NodeId::ROOT, parent);
    tree.append_child(NodeId::ROOT, other);
    let child = tree.create_element("p");
    tree.append_child(parent, child);

    tree.remove_child(other, child);

    assert_eq!(tree.parent(child), Some(parent));
}

// ========== connectivity ==========

#[test]
fn test_is_connected_follows_removal() {
    let mut tree = DomTree::new_html_document();
    let body = tree.body().unwrap();
    let outer = tree.create_element("div");
    let inner = tree.create_element("span");
    tree.append_child(outer, inner);

    assert!(!tree.is_connected(inner));
    tree.append_child(body, outer);
    assert!(tree.is_connected(inner));
    tree.remove_child(body, outer);
    assert!(!tree.is_connected(inner));
}

#[test]
fn test_descendants_are_in_tree_order() {
    let mut tree = DomTree::new();
    let a = tree.create_element("a");
    let b = tree.create_element("b");
    let c = tree.create_element("c");
    let d = tree.create_element("d");
    tree.append_child(NodeId::ROOT, a);
    tree.append_child(a, b);
    tree.append_child(b, c);
    tree.append_child(a, d);

    assert_eq!(tree.descendants(NodeId::ROOT), vec![a, b, c, d]);
    assert_eq!(tree.descendants(b), vec![c]);
}

#[test]
fn test_html_document_shape() {
    let tree = DomTree::new_html_document();
    let html = tree.document_element().unwrap();
    assert_eq!(tree.tag_name(html), Some("html"));
    let body = tree.body().unwrap();
    assert_eq!(tree.parent(body), Some(html));
    assert!(tree.child_element_by_tag(html, "head").is_some());
}
