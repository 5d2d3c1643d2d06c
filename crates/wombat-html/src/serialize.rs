//! Text renderings of a parsed [`DomTree`].
//!
//! [`dump_tree`] writes the format used by the html5lib tree-construction
//! tests; [`print_tree`] is a looser, human-oriented view for debugging.

use std::fmt::Write;

use wombat_dom::{DomTree, NodeId, NodeType};

/// Render the document's children in html5lib `#document` format.
///
/// Each node is one line starting with `| ` followed by two spaces per level
/// of depth. Attributes follow their element, sorted by name, one level
/// deeper.
///
/// ```
/// let tree = wombat_html::parse_document("<!DOCTYPE html><p class=x>Hi");
/// assert_eq!(
///     wombat_html::dump_tree(&tree),
///     "| <!DOCTYPE html>\n\
///      | <html>\n\
///      |   <head>\n\
///      |   <body>\n\
///      |     <p>\n\
///      |       class=\"x\"\n\
///      |       \"Hi\"\n"
/// );
/// ```
#[must_use]
pub fn dump_tree(tree: &DomTree) -> String {
    let mut out = String::new();
    for &child in tree.children(tree.root()) {
        dump_node(tree, child, 0, &mut out);
    }
    out
}

fn dump_node(tree: &DomTree, id: NodeId, depth: usize, out: &mut String) {
    let Some(node) = tree.get(id) else {
        return;
    };
    let indent = "  ".repeat(depth);
    match &node.node_type {
        NodeType::Document => {}
        NodeType::DocumentType(doctype) => {
            if doctype.public_id.is_empty() && doctype.system_id.is_empty() {
                let _ = writeln!(out, "| {indent}<!DOCTYPE {}>", doctype.name);
            } else {
                let _ = writeln!(
                    out,
                    "| {indent}<!DOCTYPE {} \"{}\" \"{}\">",
                    doctype.name, doctype.public_id, doctype.system_id
                );
            }
        }
        NodeType::Element(data) => {
            let _ = writeln!(out, "| {indent}<{}>", data.tag_name);
            let mut attrs: Vec<(&str, &str)> = data.attrs.iter().collect();
            attrs.sort_unstable_by(|a, b| a.0.cmp(b.0));
            for (name, value) in attrs {
                let _ = writeln!(out, "| {indent}  {name}=\"{value}\"");
            }
        }
        NodeType::Text(data) => {
            let _ = writeln!(out, "| {indent}\"{data}\"");
        }
        NodeType::Comment(data) => {
            let _ = writeln!(out, "| {indent}<!-- {data} -->");
        }
    }
    for &child in tree.children(id) {
        dump_node(tree, child, depth + 1, out);
    }
}

/// Print a DOM tree for debugging.
pub fn print_tree(tree: &DomTree, id: NodeId, indent: usize) {
    let prefix = "  ".repeat(indent);
    if let Some(node) = tree.get(id) {
        match &node.node_type {
            NodeType::Document => {
                println!("{prefix}Document ({})", tree.quirks_mode());
            }
            NodeType::DocumentType(doctype) => {
                println!("{prefix}<!DOCTYPE {}>", doctype.name);
            }
            NodeType::Element(data) => {
                if data.attrs.is_empty() {
                    println!("{prefix}<{}>", data.tag_name);
                } else {
                    let attrs: Vec<String> = data
                        .attrs
                        .iter()
                        .map(|(k, v)| {
                            if v.is_empty() {
                                k.to_string()
                            } else {
                                format!("{k}=\"{v}\"")
                            }
                        })
                        .collect();
                    println!("{prefix}<{} {}>", data.tag_name, attrs.join(" "));
                }
            }
            NodeType::Text(data) => {
                let display = data.replace('\n', "\\n").replace(' ', "\u{00B7}");
                println!("{prefix}\"{display}\"");
            }
            NodeType::Comment(data) => {
                println!("{prefix}<!-- {data} -->");
            }
        }
        for &child_id in tree.children(id) {
            print_tree(tree, child_id, indent + 1);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::parse_document;

    #[test]
    fn doctype_with_identifiers_is_quoted() {
        let tree = parse_document(
            r#"<!DOCTYPE html PUBLIC "-//W3C//DTD HTML 4.01//EN" "http://www.w3.org/TR/html4/strict.dtd">"#,
        );
        let dump = dump_tree(&tree);
        assert!(dump.starts_with(
            "| <!DOCTYPE html \"-//W3C//DTD HTML 4.01//EN\" \"http://www.w3.org/TR/html4/strict.dtd\">\n"
        ));
    }

    #[test]
    fn attributes_are_sorted() {
        let tree = parse_document("<div z=1 a=2 m=3></div>");
        let dump = dump_tree(&tree);
        assert!(dump.contains("|       a=\"2\"\n|       m=\"3\"\n|       z=\"1\"\n"));
    }

    #[test]
    fn comments_before_html_sit_at_top_level() {
        let tree = parse_document("<!-- hi --><p>");
        assert!(dump_tree(&tree).starts_with("| <!--  hi  -->\n| <html>\n"));
    }
}
