//! HTML tree construction.
//!
//! [§ 13.2.6 Tree construction](https://html.spec.whatwg.org/multipage/parsing.html#tree-construction)

mod after_body;
mod before_body;
mod core;
mod formatting;
mod in_body;
mod in_select;
mod in_table;
mod insertion;
mod options;
mod quirks;
mod sink;
mod stack;

use wombat_dom::DomTree;

use crate::error::ParseIssue;

pub use self::core::{HTMLParser, InsertionMode};
pub use options::ParserOptions;
pub use quirks::{doctype_is_conforming, quirks_mode_for_doctype};
pub use sink::TreeSink;
pub use stack::{Scope, is_formatting_element, is_special_element};

/// Parse a complete document into a [`DomTree`] with default options.
///
/// ```
/// let tree = wombat_html::parse_document("<title>Hi</title><p>Hello");
/// let body = tree.body().unwrap();
/// assert_eq!(tree.text_content(body), "Hello");
/// ```
#[must_use]
pub fn parse_document(input: &str) -> DomTree {
    HTMLParser::new(input).run()
}

/// Parse a complete document, returning the tree and every parse issue.
#[must_use]
pub fn parse_document_with_options(
    input: &str,
    options: ParserOptions,
) -> (DomTree, Vec<ParseIssue>) {
    HTMLParser::with_options(input, options).run_with_issues()
}
