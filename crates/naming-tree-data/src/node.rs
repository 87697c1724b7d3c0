//! Tree node types.
//!
//! A document is a sequence of company trees. Below the company level a
//! node is a section header, a group of items, or a leaf. Every kind shares
//! the same display [`Annotations`]; only the flags that mean something for
//! a kind are stored on it.

use serde::Serialize;

/// Display fields common to every node kind.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct Annotations {
    /// Display label. Empty when the document gives none.
    pub name: String,
    /// Category / color group. Inherited from the parent when absent, once
    /// [`crate::Forest::resolve_companies`] has run.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub company: Option<String>,
    /// Free-form date label, e.g. `"2019–2023"`.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub date: Option<String>,
    /// Emphasized note.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub note: Option<String>,
    /// Muted note.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub note_dim: Option<String>,
    /// Trusted rich-text tooltip content.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub tip: Option<String>,
}

impl Annotations {
    /// Annotations with only a name.
    #[must_use]
    pub fn named(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            ..Self::default()
        }
    }

    /// Set the company.
    #[must_use]
    pub fn with_company(mut self, company: impl Into<String>) -> Self {
        self.company = Some(company.into());
        self
    }
}

/// A top-level category container.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct Company {
    /// Display fields.
    #[serde(flatten)]
    pub info: Annotations,
    /// Label styled as a section header. The role stays `company`.
    pub section: bool,
    /// Starts collapsed.
    pub collapsed: bool,
    /// Nested nodes, in document order.
    pub children: Vec<TreeNode>,
}

/// A section header or a group of items below the company level.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct Branch {
    /// Display fields.
    #[serde(flatten)]
    pub info: Annotations,
    /// Starts collapsed.
    pub collapsed: bool,
    /// Deprecated / defunct.
    pub dead: bool,
    /// Nested nodes, in document order. Never empty for a group; a section
    /// header may have none.
    pub children: Vec<TreeNode>,
}

/// A node with no children.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct Leaf {
    /// Display fields.
    #[serde(flatten)]
    pub info: Annotations,
    /// Starts collapsed. Kept for the class contract even without children.
    pub collapsed: bool,
    /// Deprecated / defunct.
    pub dead: bool,
}

/// One node of the taxonomy.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum TreeNode {
    /// Root-level entry. Every top-level record is a company, whatever its flags.
    Company(Company),
    /// Grouping header with distinct styling.
    Section(Branch),
    /// Ordinary node with children.
    Group(Branch),
    /// Ordinary node without children.
    Leaf(Leaf),
}

impl TreeNode {
    /// A leaf with the given name.
    #[must_use]
    pub fn leaf(name: impl Into<String>) -> Self {
        Self::Leaf(Leaf {
            info: Annotations::named(name),
            collapsed: false,
            dead: false,
        })
    }

    /// A group with the given name and children.
    #[must_use]
    pub fn group(name: impl Into<String>, children: Vec<Self>) -> Self {
        Self::Group(Branch {
            info: Annotations::named(name),
            collapsed: false,
            dead: false,
            children,
        })
    }

    /// A section header with the given name and children.
    #[must_use]
    pub fn section(name: impl Into<String>, children: Vec<Self>) -> Self {
        Self::Section(Branch {
            info: Annotations::named(name),
            collapsed: false,
            dead: false,
            children,
        })
    }

    /// A company with the given name, company id and children.
    #[must_use]
    pub fn company(name: impl Into<String>, company: impl Into<String>, children: Vec<Self>) -> Self {
        Self::Company(Company {
            info: Annotations::named(name).with_company(company),
            section: false,
            collapsed: false,
            children,
        })
    }

    /// Display fields.
    #[must_use]
    pub const fn info(&self) -> &Annotations {
        match self {
            Self::Company(c) => &c.info,
            Self::Section(b) | Self::Group(b) => &b.info,
            Self::Leaf(l) => &l.info,
        }
    }

    /// Mutable display fields.
    pub fn info_mut(&mut self) -> &mut Annotations {
        match self {
            Self::Company(c) => &mut c.info,
            Self::Section(b) | Self::Group(b) => &mut b.info,
            Self::Leaf(l) => &mut l.info,
        }
    }

    /// Display label.
    #[must_use]
    pub fn name(&self) -> &str {
        &self.info().name
    }

    /// Company id, explicit or (after resolution) inherited.
    #[must_use]
    pub fn company_id(&self) -> Option<&str> {
        self.info().company.as_deref()
    }

    /// Child nodes; empty for leaves.
    #[must_use]
    pub fn children(&self) -> &[Self] {
        match self {
            Self::Company(c) => &c.children,
            Self::Section(b) | Self::Group(b) => &b.children,
            Self::Leaf(_) => &[],
        }
    }

    /// Mutable child nodes. Leaves have none.
    pub fn children_mut(&mut self) -> Option<&mut Vec<Self>> {
        match self {
            Self::Company(c) => Some(&mut c.children),
            Self::Section(b) | Self::Group(b) => Some(&mut b.children),
            Self::Leaf(_) => None,
        }
    }

    /// Whether the node has at least one child.
    #[must_use]
    pub fn has_children(&self) -> bool {
        !self.children().is_empty()
    }

    /// Starts collapsed.
    #[must_use]
    pub const fn is_collapsed(&self) -> bool {
        match self {
            Self::Company(c) => c.collapsed,
            Self::Section(b) | Self::Group(b) => b.collapsed,
            Self::Leaf(l) => l.collapsed,
        }
    }

    /// Marked deprecated. Companies never are.
    #[must_use]
    pub const fn is_dead(&self) -> bool {
        match self {
            Self::Company(_) => false,
            Self::Section(b) | Self::Group(b) => b.dead,
            Self::Leaf(l) => l.dead,
        }
    }

    /// Whether the label is styled as a section header. True for section
    /// nodes and for companies flagged `section`.
    #[must_use]
    pub const fn is_section(&self) -> bool {
        match self {
            Self::Company(c) => c.section,
            Self::Section(_) => true,
            Self::Group(_) | Self::Leaf(_) => false,
        }
    }

    /// Whether this is a root-level company.
    #[must_use]
    pub const fn is_company(&self) -> bool {
        matches!(self, Self::Company(_))
    }

    /// Number of leaves below this node: 1 for a node without children,
    /// otherwise the sum over its children.
    #[must_use]
    pub fn leaf_count(&self) -> usize {
        if self.has_children() {
            self.children().iter().map(Self::leaf_count).sum()
        } else {
            1
        }
    }

    /// Number of levels in this subtree, 1 for a node without children.
    #[must_use]
    pub fn depth(&self) -> usize {
        1 + self.children().iter().map(Self::depth).max().unwrap_or(0)
    }

    /// Give every descendant lacking a company the company of its nearest
    /// ancestor that has one. Explicit companies are kept.
    pub fn inherit_company(&mut self) {
        let company = self.info().company.clone();
        let Some(children) = self.children_mut() else {
            return;
        };
        for child in children {
            if child.info().company.is_none() {
                child.info_mut().company.clone_from(&company);
            }
            child.inherit_company();
        }
    }
}
