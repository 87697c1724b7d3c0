//! Serialization of DOM subtrees.
//!
//! [§ 13.3 Serializing HTML fragments](https://html.spec.whatwg.org/multipage/parsing.html#serialising-html-fragments)

use std::fmt::Write;

use crate::{DomTree, NodeId, NodeType};

/// [§ 13.1.2 Void elements](https://html.spec.whatwg.org/multipage/syntax.html#void-elements)
const VOID_ELEMENTS: &[&str] = &[
    "area", "base", "br", "col", "embed", "hr", "img", "input", "link", "meta", "source", "track",
    "wbr",
];

/// [§ 3.5 outerHTML](https://html.spec.whatwg.org/multipage/dynamic-markup-insertion.html#dom-element-outerhtml)
///
/// Serialize `id` and its subtree.
#[must_use]
pub fn outer_html(tree: &DomTree, id: NodeId) -> String {
    let mut out = String::new();
    serialize_node(tree, id, &mut out);
    out
}

/// [§ 3.5 innerHTML](https://html.spec.whatwg.org/multipage/dynamic-markup-insertion.html#dom-element-innerhtml)
///
/// Serialize the children of `id`.
#[must_use]
pub fn inner_html(tree: &DomTree, id: NodeId) -> String {
    let mut out = String::new();
    for &child in tree.children(id) {
        serialize_node(tree, child, &mut out);
    }
    out
}

fn serialize_node(tree: &DomTree, id: NodeId, out: &mut String) {
    let Some(node) = tree.get(id) else {
        return;
    };
    match &node.node_type {
        NodeType::Document => {
            for &child in tree.children(id) {
                serialize_node(tree, child, out);
            }
        }
        NodeType::Element(data) => {
            out.push('<');
            out.push_str(&data.tag_name);
            for (name, value) in &data.attrs {
                let _ = write!(out, " {name}=\"{}\"", escape(value, true));
            }
            out.push('>');
            if VOID_ELEMENTS.contains(&data.tag_name.as_str()) {
                return;
            }
            for &child in tree.children(id) {
                serialize_node(tree, child, out);
            }
            let _ = write!(out, "</{}>", data.tag_name);
        }
        NodeType::Text(text) => out.push_str(&escape(text, false)),
        NodeType::Markup(markup) => out.push_str(markup),
    }
}

/// [§ 13.3 Escaping a string](https://html.spec.whatwg.org/multipage/parsing.html#escapingString)
///
/// "Replace any occurrence of the "&" character by the string "&amp;"...
/// If the algorithm was invoked in attribute mode, replace any occurrences
/// of the """ character by the string "&quot;". If the algorithm was not
/// invoked in attribute mode, replace any occurrences of the "<" character
/// by the string "&lt;", and any occurrences of the ">" character by the
/// string "&gt;"."
fn escape(input: &str, attribute_mode: bool) -> String {
    let mut out = String::with_capacity(input.len());
    for c in input.chars() {
        match c {
            '&' => out.push_str("&amp;"),
            '\u{00A0}' => out.push_str("&nbsp;"),
            '"' if attribute_mode => out.push_str("&quot;"),
            '<' if !attribute_mode => out.push_str("&lt;"),
            '>' if !attribute_mode => out.push_str("&gt;"),
            other => out.push(other),
        }
    }
    out
}

/// Indented outline of a subtree, one node per line, for debugging.
#[must_use]
pub fn print_tree(tree: &DomTree, id: NodeId) -> String {
    let mut out = String::new();
    outline(tree, id, 0, &mut out);
    out
}

fn outline(tree: &DomTree, id: NodeId, indent: usize, out: &mut String) {
    let prefix = "  ".repeat(indent);
    let Some(node) = tree.get(id) else {
        return;
    };
    match &node.node_type {
        NodeType::Document => {
            let _ = writeln!(out, "{prefix}Document");
        }
        NodeType::Element(data) => {
            if data.attrs.is_empty() {
                let _ = writeln!(out, "{prefix}<{}>", data.tag_name);
            } else {
                let attrs: Vec<String> = data
                    .attrs
                    .iter()
                    .map(|(k, v)| {
                        if v.is_empty() {
                            k.clone()
                        } else {
                            format!("{k}=\"{v}\"")
                        }
                    })
                    .collect();
                let _ = writeln!(out, "{prefix}<{} {}>", data.tag_name, attrs.join(" "));
            }
        }
        NodeType::Text(data) => {
            let _ = writeln!(out, "{prefix}\"{}\"", data.replace('\n', "\\n"));
        }
        NodeType::Markup(markup) => {
            let _ = writeln!(out, "{prefix}#markup {markup}");
        }
    }
    for &child in tree.children(id) {
        outline(tree, child, indent + 1, out);
    }
}
