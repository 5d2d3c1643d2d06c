//! HTML tokenizer and tree constructor.
//!
//! # Scope
//!
//! This crate implements:
//! - **HTML Tokenizer** ([WHATWG § 13.2.5](https://html.spec.whatwg.org/multipage/parsing.html#tokenization))
//!   - All tokenizer states, including script data escapes, CDATA sections
//!     and character references
//!   - The full named character reference table
//!   - A pull interface: the tree constructor asks for one token at a time
//!     and redirects the tokenizer into RCDATA, RAWTEXT, script data or
//!     PLAINTEXT as elements require
//!
//! - **HTML Parser / Tree Builder** ([WHATWG § 13.2.6](https://html.spec.whatwg.org/multipage/parsing.html#tree-construction))
//!   - Every insertion mode except "in template"
//!   - Active formatting elements, the adoption agency algorithm, foster
//!     parenting and quirks-mode detection
//!   - Output through the [`TreeSink`] trait; [`wombat_dom::DomTree`] is the
//!     default sink
//!
//! # Not Implemented
//!
//! - Byte decoding and encoding sniffing (input is already a `&str`)
//! - Foreign content (SVG and MathML are parsed as ordinary elements)
//! - Template contents and the fragment parsing algorithm
//! - Script execution

/// Parse error codes and issue records.
pub mod error;
/// Character sources feeding the tokenizer.
pub mod input;
/// Sorted-table prefix matching.
pub mod lookup;
/// HTML parser and tree construction.
pub mod parser;
/// Text renderings of parsed trees.
pub mod serialize;
/// HTML tokenizer for converting input into tokens.
pub mod tokenizer;

pub use error::{ParseError, ParseIssue};
pub use input::{CharSource, StringSource};
pub use parser::{
    HTMLParser, InsertionMode, ParserOptions, TreeSink, parse_document,
    parse_document_with_options,
};
pub use serialize::{dump_tree, print_tree};
pub use tokenizer::{Attribute, HTMLTokenizer, LexMode, Token};
