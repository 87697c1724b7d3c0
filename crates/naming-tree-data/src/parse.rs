//! Lenient conversion of a YAML document into a [`Forest`].
//!
//! No schema is enforced. Unknown keys are ignored, missing ones default to
//! absent / false, and scalars of the wrong type are coerced rather than
//! rejected: a number used as a name renders as that number, a non-empty
//! string used as a flag counts as set. The only hard failures are invalid
//! YAML and a document whose root is not a sequence.

use serde_yaml_ng::{Mapping, Value};
use thiserror::Error;

use crate::Forest;
use crate::node::{Annotations, Branch, Company, Leaf, TreeNode};

/// Why a document could not be turned into a tree.
#[derive(Debug, Error)]
pub enum ParseError {
    /// The text is not valid YAML.
    #[error("invalid YAML: {0}")]
    Yaml(#[from] serde_yaml_ng::Error),

    /// The document root is not a sequence of nodes.
    #[error("expected a sequence of nodes at the document root, found {0}")]
    NotASequence(&'static str),
}

/// Parse YAML text into a forest of company trees.
///
/// # Errors
///
/// Returns [`ParseError::Yaml`] for malformed YAML and
/// [`ParseError::NotASequence`] when the root is anything but a sequence
/// (including an empty document).
pub fn parse_document(text: &str) -> Result<Forest, ParseError> {
    if text.trim().is_empty() {
        return Err(ParseError::NotASequence("an empty document"));
    }
    let value: Value = serde_yaml_ng::from_str(text)?;
    forest_from_value(&value)
}

/// Build a forest from an already-parsed YAML value.
///
/// # Errors
///
/// Returns [`ParseError::NotASequence`] when `value` is not a sequence.
pub fn forest_from_value(value: &Value) -> Result<Forest, ParseError> {
    match untag(value) {
        Value::Sequence(items) => Ok(Forest::new(items.iter().map(company_from_value).collect())),
        other => Err(ParseError::NotASequence(kind_name(other))),
    }
}

fn company_from_value(value: &Value) -> TreeNode {
    let record = Record::new(value);
    TreeNode::Company(Company {
        info: record.annotations(),
        section: record.flag("section"),
        collapsed: record.flag("collapsed"),
        children: record.children(),
    })
}

fn node_from_value(value: &Value) -> TreeNode {
    let record = Record::new(value);
    let info = record.annotations();
    let dead = record.flag("dead");
    let collapsed = record.flag("collapsed");
    let children = record.children();

    if record.flag("section") {
        TreeNode::Section(Branch {
            info,
            collapsed,
            dead,
            children,
        })
    } else if children.is_empty() {
        TreeNode::Leaf(Leaf {
            info,
            collapsed,
            dead,
        })
    } else {
        TreeNode::Group(Branch {
            info,
            collapsed,
            dead,
            children,
        })
    }
}

/// Field access over one node record. A record that is not a mapping
/// behaves as an empty one.
struct Record<'a> {
    fields: Option<&'a Mapping>,
}

impl<'a> Record<'a> {
    fn new(value: &'a Value) -> Self {
        Self {
            fields: untag(value).as_mapping(),
        }
    }

    fn get(&self, key: &str) -> Option<&'a Value> {
        self.fields.and_then(|m| m.get(key)).map(untag)
    }

    /// A text field that is present only when truthy.
    fn text(&self, key: &str) -> Option<String> {
        self.get(key).filter(|v| truthy(v)).and_then(scalar_text)
    }

    fn flag(&self, key: &str) -> bool {
        self.get(key).is_some_and(truthy)
    }

    fn annotations(&self) -> Annotations {
        Annotations {
            name: self.get("name").and_then(scalar_text).unwrap_or_default(),
            company: self.text("company"),
            date: self.text("date"),
            note: self.text("note"),
            note_dim: self.text("note_dim"),
            tip: self.text("tip"),
        }
    }

    fn children(&self) -> Vec<TreeNode> {
        match self.get("children") {
            Some(Value::Sequence(items)) => items.iter().map(node_from_value).collect(),
            _ => Vec::new(),
        }
    }
}

/// Strip YAML tags (`!foo value`) down to the tagged value.
fn untag(value: &Value) -> &Value {
    match value {
        Value::Tagged(tagged) => untag(&tagged.value),
        other => other,
    }
}

/// Truthiness of a field value: `false`, `null`, `0`, NaN and the empty
/// string are false; everything else, including collections, is true.
fn truthy(value: &Value) -> bool {
    match untag(value) {
        Value::Null => false,
        Value::Bool(b) => *b,
        Value::Number(n) => n.as_f64().is_some_and(|f| f != 0.0 && !f.is_nan()),
        Value::String(s) => !s.is_empty(),
        Value::Sequence(_) | Value::Mapping(_) | Value::Tagged(_) => true,
    }
}

/// Text form of a scalar. Collections have none.
fn scalar_text(value: &Value) -> Option<String> {
    match untag(value) {
        Value::String(s) => Some(s.clone()),
        Value::Number(n) => Some(n.to_string()),
        Value::Bool(b) => Some(b.to_string()),
        Value::Null | Value::Sequence(_) | Value::Mapping(_) | Value::Tagged(_) => None,
    }
}

const fn kind_name(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "a boolean",
        Value::Number(_) => "a number",
        Value::String(_) => "a string",
        Value::Sequence(_) => "a sequence",
        Value::Mapping(_) => "a mapping",
        Value::Tagged(_) => "a tagged value",
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn value(yaml: &str) -> Value {
        serde_yaml_ng::from_str(yaml).unwrap()
    }

    #[test]
    fn test_truthy() {
        assert!(!truthy(&value("null")));
        assert!(!truthy(&value("0")));
        assert!(!truthy(&value("''")));
        assert!(!truthy(&value("false")));
        assert!(truthy(&value("yes please")));
        assert!(truthy(&value("1")));
        assert!(truthy(&value("[]")));
    }

    #[test]
    fn test_scalar_text() {
        assert_eq!(scalar_text(&value("2019")).as_deref(), Some("2019"));
        assert_eq!(scalar_text(&value("true")).as_deref(), Some("true"));
        assert_eq!(scalar_text(&value("{a: 1}")), None);
    }

    #[test]
    fn test_tags_are_stripped() {
        assert_eq!(scalar_text(&value("!label Alpha")).as_deref(), Some("Alpha"));
    }
}
