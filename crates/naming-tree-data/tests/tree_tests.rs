//! Tests for leaf counting, company inheritance and statistics.

use naming_tree_data::{Forest, TreeNode, parse_document};
use quickcheck::{Arbitrary, Gen};
use quickcheck_macros::quickcheck;

/// Depth-4 fixture:
///
/// ```text
/// Acme (x)
/// ├── Models (section)
/// │   ├── Rocket
/// │   │   ├── R1
/// │   │   └── R2
/// │   └── Anvil
/// └── Spare
/// ```
fn fixture() -> Forest {
    Forest::new(vec![TreeNode::company(
        "Acme",
        "x",
        vec![
            TreeNode::section(
                "Models",
                vec![
                    TreeNode::group("Rocket", vec![TreeNode::leaf("R1"), TreeNode::leaf("R2")]),
                    TreeNode::leaf("Anvil"),
                ],
            ),
            TreeNode::leaf("Spare"),
        ],
    )])
}

#[test]
fn test_leaf_count_on_nested_fixture() {
    let forest = fixture();
    let acme = &forest.roots()[0];
    let models = &acme.children()[0];
    let rocket = &models.children()[0];

    assert_eq!(rocket.leaf_count(), 2);
    assert_eq!(models.leaf_count(), 3);
    assert_eq!(acme.leaf_count(), 4);
    assert_eq!(acme.children()[1].leaf_count(), 1);
    assert_eq!(forest.leaf_count(), 4);
    assert_eq!(forest.depth(), 4);
}

#[test]
fn test_childless_section_counts_as_one_leaf() {
    assert_eq!(TreeNode::section("Header", vec![]).leaf_count(), 1);
    assert_eq!(TreeNode::company("Solo", "s", vec![]).leaf_count(), 1);
}

#[test]
fn test_company_inherited_from_nearest_ancestor() {
    let mut forest = parse_document(
        r"
- name: Acme
  company: x
  children:
    - name: Sub
      company: y
      children:
        - name: Deep
    - name: Plain
      children:
        - name: Deeper
",
    )
    .unwrap();
    forest.resolve_companies();

    let acme = &forest.roots()[0];
    let sub = &acme.children()[0];
    let plain = &acme.children()[1];
    assert_eq!(sub.company_id(), Some("y"));
    assert_eq!(sub.children()[0].company_id(), Some("y"));
    assert_eq!(plain.company_id(), Some("x"));
    assert_eq!(plain.children()[0].company_id(), Some("x"));
}

#[test]
fn test_root_without_company_leaves_children_without_one() {
    let mut forest = parse_document("- name: A\n  children: [{name: B}]\n").unwrap();
    forest.resolve_companies();
    assert_eq!(forest.roots()[0].children()[0].company_id(), None);
}

#[test]
fn test_resolve_companies_runs_once() {
    let mut forest = fixture();
    assert!(!forest.companies_resolved());
    forest.resolve_companies();
    assert!(forest.companies_resolved());
    assert_eq!(forest.roots()[0].children()[1].company_id(), Some("x"));

    let again = forest.clone();
    forest.resolve_companies();
    assert_eq!(forest, again);
}

#[test]
fn test_stats() {
    let mut forest = parse_document(
        r"
- name: Acme
  company: x
  children:
    - name: Models
      section: true
      collapsed: true
      children:
        - {name: R1, dead: true, tip: old}
        - {name: R2}
- name: Globex
  company: g
",
    )
    .unwrap();
    forest.resolve_companies();
    let stats = forest.stats();

    assert_eq!(stats.nodes, 5);
    assert_eq!(stats.leaves, 3);
    assert_eq!(stats.sections, 1);
    assert_eq!(stats.dead, 1);
    assert_eq!(stats.tooltips, 1);
    assert_eq!(stats.collapsed, 1);
    assert_eq!(stats.max_depth, 3);
    assert_eq!(stats.companies, vec!["g".to_string(), "x".to_string()]);
    assert!(stats.to_string().contains("leaves:    3"));
}

/// A randomly shaped tree below one company.
#[derive(Debug, Clone)]
struct ArbTree(TreeNode);

fn arbitrary_node(g: &mut Gen, depth: usize) -> TreeNode {
    let fanout = if depth >= 4 { 0 } else { usize::arbitrary(g) % 4 };
    let children: Vec<TreeNode> = (0..fanout).map(|_| arbitrary_node(g, depth + 1)).collect();
    let mut node = if children.is_empty() {
        TreeNode::leaf(String::arbitrary(g))
    } else if bool::arbitrary(g) {
        TreeNode::section(String::arbitrary(g), children)
    } else {
        TreeNode::group(String::arbitrary(g), children)
    };
    if bool::arbitrary(g) {
        node.info_mut().company = Some(format!("c{}", u8::arbitrary(g) % 3));
    }
    node
}

impl Arbitrary for ArbTree {
    fn arbitrary(g: &mut Gen) -> Self {
        let children = (0..usize::arbitrary(g) % 4).map(|_| arbitrary_node(g, 1)).collect();
        Self(TreeNode::company("root", "r", children))
    }
}

fn leaf_count_by_definition(node: &TreeNode) -> usize {
    if node.children().is_empty() {
        1
    } else {
        node.children().iter().map(leaf_count_by_definition).sum()
    }
}

fn every_node_has_company(node: &TreeNode) -> bool {
    node.company_id().is_some() && node.children().iter().all(every_node_has_company)
}

fn explicit_companies_kept(before: &TreeNode, after: &TreeNode) -> bool {
    let own_kept = before.company_id().is_none() || before.company_id() == after.company_id();
    own_kept
        && before
            .children()
            .iter()
            .zip(after.children())
            .all(|(b, a)| explicit_companies_kept(b, a))
}

#[quickcheck]
fn prop_leaf_count_is_sum_over_children(tree: ArbTree) -> bool {
    tree.0.leaf_count() == leaf_count_by_definition(&tree.0)
}

#[quickcheck]
fn prop_leaf_count_matches_stats(tree: ArbTree) -> bool {
    let forest = Forest::new(vec![tree.0]);
    forest.leaf_count() == forest.stats().leaves
}

#[quickcheck]
fn prop_resolution_fills_and_keeps_companies(tree: ArbTree) -> bool {
    let before = tree.0.clone();
    let mut forest = Forest::new(vec![tree.0]);
    forest.resolve_companies();
    let after = &forest.roots()[0];
    every_node_has_company(after) && explicit_companies_kept(&before, after)
}
