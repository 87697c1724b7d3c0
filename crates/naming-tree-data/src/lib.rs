//! Tree model for naming-tree documents.
//!
//! # Scope
//!
//! This crate provides:
//! - **Node model** - a tagged tree of companies, sections, groups and leaves
//! - **Document parsing** - lenient YAML loading via `serde_yaml_ng`
//! - **Derived data** - leaf counts, company inheritance and statistics
//!
//! # Example
//!
//! ```
//! use naming_tree_data::parse_document;
//!
//! let mut forest = parse_document("- {name: A, company: x, children: [{name: B}]}").unwrap();
//! forest.resolve_companies();
//! assert_eq!(forest.roots()[0].leaf_count(), 1);
//! assert_eq!(forest.roots()[0].children()[0].company_id(), Some("x"));
//! ```

pub mod node;
pub mod parse;
pub mod stats;

use serde::Serialize;

pub use node::{Annotations, Branch, Company, Leaf, TreeNode};
pub use parse::{ParseError, forest_from_value, parse_document};
pub use stats::TreeStats;

/// The parsed document: an ordered sequence of company trees.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct Forest {
    roots: Vec<TreeNode>,
    #[serde(skip)]
    companies_resolved: bool,
}

impl Forest {
    /// Wrap root nodes. Companies are not resolved yet.
    #[must_use]
    pub const fn new(roots: Vec<TreeNode>) -> Self {
        Self {
            roots,
            companies_resolved: false,
        }
    }

    /// Root nodes in document order.
    #[must_use]
    pub fn roots(&self) -> &[TreeNode] {
        &self.roots
    }

    /// Number of root nodes.
    #[must_use]
    pub fn len(&self) -> usize {
        self.roots.len()
    }

    /// Whether the document had no root nodes.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.roots.is_empty()
    }

    /// Propagate companies top-down so that every node lacking one takes
    /// its nearest ancestor's.
    ///
    /// This is a one-time derivation: it rewrites the nodes in place and
    /// later calls do nothing, even if nodes were edited in between.
    pub fn resolve_companies(&mut self) {
        if self.companies_resolved {
            return;
        }
        for root in &mut self.roots {
            root.inherit_company();
        }
        self.companies_resolved = true;
    }

    /// Whether [`Self::resolve_companies`] has run.
    #[must_use]
    pub const fn companies_resolved(&self) -> bool {
        self.companies_resolved
    }

    /// Leaves across all roots.
    #[must_use]
    pub fn leaf_count(&self) -> usize {
        self.roots.iter().map(TreeNode::leaf_count).sum()
    }

    /// Deepest root, in levels. 0 for an empty forest.
    #[must_use]
    pub fn depth(&self) -> usize {
        self.roots.iter().map(TreeNode::depth).max().unwrap_or(0)
    }

    /// Visit every node in document order with its depth (roots are 0).
    pub fn walk<F>(&self, mut visit: F)
    where
        F: FnMut(&TreeNode, usize),
    {
        fn walk_node<F: FnMut(&TreeNode, usize)>(node: &TreeNode, depth: usize, visit: &mut F) {
            visit(node, depth);
            for child in node.children() {
                walk_node(child, depth + 1, visit);
            }
        }
        for root in &self.roots {
            walk_node(root, 0, &mut visit);
        }
    }

    /// Summary counts over the whole forest.
    #[must_use]
    pub fn stats(&self) -> TreeStats {
        TreeStats::collect(self)
    }
}
