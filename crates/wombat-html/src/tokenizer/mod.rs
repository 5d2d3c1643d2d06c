//! HTML tokenizer module.
//!
//! Implements [§ 13.2.5 Tokenization](https://html.spec.whatwg.org/multipage/parsing.html#tokenization)
//! of the WHATWG HTML Living Standard.

/// Character reference states per § 13.2.5.72 through § 13.2.5.80.
mod character_reference;
/// Comment, markup declaration and CDATA states.
mod comment;
/// HTML tokenizer state machine implementation.
mod core;
/// DOCTYPE states.
mod doctype;
/// The generated named character reference table.
mod entities;
/// Helper methods for tokenizer state transitions.
mod helpers;
/// Named character reference lookup table per § 13.5.
pub mod named_character_references;
/// Script data states, including the escaped and double-escaped variants.
mod script;
/// Tag and attribute states.
mod tag;
/// Data, RCDATA, RAWTEXT and PLAINTEXT states.
mod text;
/// Token types produced by the tokenizer.
pub mod token;

pub use self::core::{HTMLTokenizer, LexMode, TokenizerState};
pub use token::{Attribute, Token};
