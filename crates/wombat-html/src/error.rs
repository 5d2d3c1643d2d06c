//! Parse error codes and the issue record.
//!
//! [§ 13.2.2 Parse errors](https://html.spec.whatwg.org/multipage/parsing.html#parse-errors)
//!
//! "This specification defines the parsing rules for HTML documents, whether
//! they are syntactically correct or not. Certain points in the parsing
//! algorithm are said to be parse errors. The error handling for parse errors
//! is well-defined."
//!
//! None of these are fatal. They are reported to the tree sink and collected
//! by the parser so callers can inspect them after the fact.

use std::fmt;

use thiserror::Error;

/// A tokenizer-level parse error, named by its WHATWG error code.
///
/// The `Display` form is the code itself, e.g. `eof-in-tag`. Variant names
/// are the codes in upper camel case.
#[allow(missing_docs)]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Error)]
pub enum ParseError {
    #[error("abrupt-closing-of-empty-comment")]
    AbruptClosingOfEmptyComment,
    #[error("abrupt-doctype-public-identifier")]
    AbruptDoctypePublicIdentifier,
    #[error("abrupt-doctype-system-identifier")]
    AbruptDoctypeSystemIdentifier,
    #[error("absence-of-digits-in-numeric-character-reference")]
    AbsenceOfDigitsInNumericCharacterReference,
    #[error("cdata-in-html-content")]
    CdataInHtmlContent,
    #[error("character-reference-outside-unicode-range")]
    CharacterReferenceOutsideUnicodeRange,
    #[error("control-character-reference")]
    ControlCharacterReference,
    #[error("duplicate-attribute")]
    DuplicateAttribute,
    #[error("end-tag-with-attributes")]
    EndTagWithAttributes,
    #[error("end-tag-with-trailing-solidus")]
    EndTagWithTrailingSolidus,
    #[error("eof-before-tag-name")]
    EofBeforeTagName,
    #[error("eof-in-cdata")]
    EofInCdata,
    #[error("eof-in-comment")]
    EofInComment,
    #[error("eof-in-doctype")]
    EofInDoctype,
    #[error("eof-in-script-html-comment-like-text")]
    EofInScriptHtmlCommentLikeText,
    #[error("eof-in-tag")]
    EofInTag,
    #[error("incorrectly-closed-comment")]
    IncorrectlyClosedComment,
    #[error("incorrectly-opened-comment")]
    IncorrectlyOpenedComment,
    #[error("invalid-character-sequence-after-doctype-name")]
    InvalidCharacterSequenceAfterDoctypeName,
    #[error("invalid-first-character-of-tag-name")]
    InvalidFirstCharacterOfTagName,
    #[error("missing-attribute-value")]
    MissingAttributeValue,
    #[error("missing-doctype-name")]
    MissingDoctypeName,
    #[error("missing-doctype-public-identifier")]
    MissingDoctypePublicIdentifier,
    #[error("missing-doctype-system-identifier")]
    MissingDoctypeSystemIdentifier,
    #[error("missing-end-tag-name")]
    MissingEndTagName,
    #[error("missing-quote-before-doctype-public-identifier")]
    MissingQuoteBeforeDoctypePublicIdentifier,
    #[error("missing-quote-before-doctype-system-identifier")]
    MissingQuoteBeforeDoctypeSystemIdentifier,
    #[error("missing-semicolon-after-character-reference")]
    MissingSemicolonAfterCharacterReference,
    #[error("missing-whitespace-after-doctype-public-keyword")]
    MissingWhitespaceAfterDoctypePublicKeyword,
    #[error("missing-whitespace-after-doctype-system-keyword")]
    MissingWhitespaceAfterDoctypeSystemKeyword,
    #[error("missing-whitespace-before-doctype-name")]
    MissingWhitespaceBeforeDoctypeName,
    #[error("missing-whitespace-between-attributes")]
    MissingWhitespaceBetweenAttributes,
    #[error("missing-whitespace-between-doctype-public-and-system-identifiers")]
    MissingWhitespaceBetweenDoctypePublicAndSystemIdentifiers,
    #[error("nested-comment")]
    NestedComment,
    #[error("noncharacter-character-reference")]
    NoncharacterCharacterReference,
    #[error("null-character-reference")]
    NullCharacterReference,
    #[error("surrogate-character-reference")]
    SurrogateCharacterReference,
    #[error("unexpected-character-after-doctype-system-identifier")]
    UnexpectedCharacterAfterDoctypeSystemIdentifier,
    #[error("unexpected-character-in-attribute-name")]
    UnexpectedCharacterInAttributeName,
    #[error("unexpected-character-in-unquoted-attribute-value")]
    UnexpectedCharacterInUnquotedAttributeValue,
    #[error("unexpected-equals-sign-before-attribute-name")]
    UnexpectedEqualsSignBeforeAttributeName,
    #[error("unexpected-null-character")]
    UnexpectedNullCharacter,
    #[error("unexpected-question-mark-instead-of-tag-name")]
    UnexpectedQuestionMarkInsteadOfTagName,
    #[error("unexpected-solidus-in-tag")]
    UnexpectedSolidusInTag,
    #[error("unknown-named-character-reference")]
    UnknownNamedCharacterReference,
}

/// A recorded problem encountered while building the tree.
///
/// Lexical errors carry their [`ParseError`] code; structural errors from the
/// tree constructor carry only a message.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ParseIssue {
    /// Human-readable description. For lexical errors this is the error code.
    pub message: String,
    /// The WHATWG error code, for errors raised by the tokenizer.
    pub code: Option<ParseError>,
    /// Number of tokens the tree constructor had consumed when this was raised.
    pub token_index: usize,
    /// `false` for advisory warnings that are not spec parse errors.
    pub is_error: bool,
}

impl ParseIssue {
    /// An issue for a tokenizer error code.
    #[must_use]
    pub fn lexical(code: ParseError, token_index: usize) -> Self {
        Self {
            message: code.to_string(),
            code: Some(code),
            token_index,
            is_error: true,
        }
    }

    /// A tree-construction parse error.
    #[must_use]
    pub fn structural(message: impl Into<String>, token_index: usize) -> Self {
        Self {
            message: message.into(),
            code: None,
            token_index,
            is_error: true,
        }
    }
}

impl fmt::Display for ParseIssue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let kind = if self.is_error { "error" } else { "warning" };
        write!(f, "token {}: {kind}: {}", self.token_index, self.message)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn display_is_the_whatwg_code() {
        assert_eq!(ParseError::EofInTag.to_string(), "eof-in-tag");
        assert_eq!(
            ParseError::MissingWhitespaceBetweenDoctypePublicAndSystemIdentifiers.to_string(),
            "missing-whitespace-between-doctype-public-and-system-identifiers"
        );
    }

    #[test]
    fn lexical_issue_keeps_code() {
        let issue = ParseIssue::lexical(ParseError::DuplicateAttribute, 3);
        assert_eq!(issue.code, Some(ParseError::DuplicateAttribute));
        assert_eq!(issue.message, "duplicate-attribute");
        assert!(issue.is_error);
        assert_eq!(issue.to_string(), "token 3: error: duplicate-attribute");
    }
}
