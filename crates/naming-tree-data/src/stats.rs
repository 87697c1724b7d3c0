//! Summary statistics over a forest.

use std::collections::BTreeSet;
use std::fmt;

use serde::Serialize;

use crate::Forest;

/// Counts over every node of a forest.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct TreeStats {
    /// All nodes, roots included.
    pub nodes: usize,
    /// Nodes without children.
    pub leaves: usize,
    /// Section headers.
    pub sections: usize,
    /// Nodes marked dead.
    pub dead: usize,
    /// Nodes with tooltip content.
    pub tooltips: usize,
    /// Nodes starting collapsed.
    pub collapsed: usize,
    /// Distinct company ids, sorted.
    pub companies: Vec<String>,
    /// Levels in the deepest tree.
    pub max_depth: usize,
}

impl TreeStats {
    /// Walk `forest` once and count.
    #[must_use]
    pub fn collect(forest: &Forest) -> Self {
        let mut stats = Self::default();
        let mut companies = BTreeSet::new();
        forest.walk(|node, depth| {
            stats.nodes += 1;
            stats.max_depth = stats.max_depth.max(depth + 1);
            if !node.has_children() {
                stats.leaves += 1;
            }
            if node.is_section() {
                stats.sections += 1;
            }
            if node.is_dead() {
                stats.dead += 1;
            }
            if node.is_collapsed() {
                stats.collapsed += 1;
            }
            if node.info().tip.is_some() {
                stats.tooltips += 1;
            }
            if let Some(company) = node.company_id() {
                let _ = companies.insert(company.to_string());
            }
        });
        stats.companies = companies.into_iter().collect();
        stats
    }
}

impl fmt::Display for TreeStats {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "nodes:     {}", self.nodes)?;
        writeln!(f, "leaves:    {}", self.leaves)?;
        writeln!(f, "sections:  {}", self.sections)?;
        writeln!(f, "dead:      {}", self.dead)?;
        writeln!(f, "tooltips:  {}", self.tooltips)?;
        writeln!(f, "collapsed: {}", self.collapsed)?;
        writeln!(f, "depth:     {}", self.max_depth)?;
        write!(f, "companies: {}", self.companies.join(", "))
    }
}
