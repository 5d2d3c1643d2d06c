//! Helper functions for the HTML tokenizer.
//!
//! [§ 13.2.5 Tokenization](https://html.spec.whatwg.org/multipage/parsing.html#tokenization)
//!
//! This module contains utility functions used throughout the tokenizer:
//! - State transitions ("Switch to", "Reconsume in")
//! - Token emission ("Emit the current token")
//! - Attribute bookkeeping and duplicate detection
//! - End tag matching for raw text elements

use wombat_common::warning::warn_once;

use super::core::{HTMLTokenizer, TokenizerState};
use super::token::{Attribute, Token};
use crate::error::ParseError;
use crate::input::CharSource;

// =============================================================================
// State Transition Helpers
// =============================================================================

impl<C: CharSource> HTMLTokenizer<C> {
    /// "Switch to the X state"
    ///
    /// The next character will be consumed on the next step.
    pub(super) const fn switch_state(&mut self, new_state: TokenizerState) {
        self.state = new_state;
    }

    /// "Reconsume in the X state"
    ///
    /// The same character will be processed again in the new state.
    pub(super) const fn reconsume_in(&mut self, new_state: TokenizerState) {
        self.reconsume = true;
        self.state = new_state;
    }

    /// Give the current input character back to the input, for states that
    /// are entered by reconsuming but read ahead on their own.
    pub(super) fn unconsume(&mut self) {
        if let Some(c) = self.current_input_character {
            self.input.pushback(c);
        }
    }

    /// Switch to the return state set by the state that started a character
    /// reference.
    pub(super) fn switch_to_return_state(&mut self) {
        let state = self.take_return_state();
        self.switch_state(state);
    }

    /// Reconsume in the return state.
    pub(super) fn reconsume_in_return_state(&mut self) {
        let state = self.take_return_state();
        self.reconsume_in(state);
    }

    fn take_return_state(&mut self) -> TokenizerState {
        self.return_state.take().unwrap_or(TokenizerState::Data)
    }

    /// [§ 13.2.5 Tokenization](https://html.spec.whatwg.org/multipage/parsing.html#tokenization)
    ///
    /// "U+0009 CHARACTER TABULATION (tab), U+000A LINE FEED (LF),
    /// U+000C FORM FEED (FF), U+0020 SPACE"
    ///
    /// CR never reaches the tokenizer; the input stream normalizes it away.
    pub(super) const fn is_whitespace_char(input_char: char) -> bool {
        matches!(input_char, ' ' | '\t' | '\n' | '\x0C')
    }
}

// =============================================================================
// Token Emission Helpers
// =============================================================================

impl<C: CharSource> HTMLTokenizer<C> {
    /// "Emit the current token"
    ///
    /// Any attribute still being built joins the tag first. Emitting a start
    /// tag records its name for the appropriate end tag check.
    pub(super) fn emit_token(&mut self) {
        self.commit_attribute();
        let Some(token) = self.current_token.take() else {
            return;
        };
        match &token {
            Token::StartTag { name, .. } => {
                self.last_start_tag_name = Some(name.clone());
            }
            // "When an end tag token is emitted with attributes, that is an
            // end-tag-with-attributes parse error."
            Token::EndTag { attributes, .. } if !attributes.is_empty() => {
                self.parse_error(ParseError::EndTagWithAttributes);
            }
            _ => {}
        }
        self.pending.push_back(token);
    }

    /// "Emit the current input character as a character token."
    pub(super) fn emit_character_token(&mut self, c: char) {
        self.pending.push_back(Token::new_character(c));
    }

    /// Emit one character token per character of `s`.
    pub(super) fn emit_characters(&mut self, s: &str) {
        self.pending.extend(s.chars().map(Token::new_character));
    }

    /// "Emit an end-of-file token."
    pub(super) fn emit_eof_token(&mut self) {
        self.pending.push_back(Token::EndOfFile);
        self.at_eof = true;
    }

    /// [§ 13.2.2 Parse errors](https://html.spec.whatwg.org/multipage/parsing.html#parse-errors)
    ///
    /// Parse errors are not fatal. They go into the token stream for the
    /// consumer to record.
    pub(super) fn parse_error(&mut self, error: ParseError) {
        if self.log_errors {
            warn_once("HTML Tokenizer", &error.to_string());
        }
        self.pending.push_back(Token::ParseError(error));
    }
}

// =============================================================================
// Attribute Helpers
// =============================================================================

impl<C: CharSource> HTMLTokenizer<C> {
    /// "Start a new attribute in the current tag token."
    pub(super) fn start_new_attribute(&mut self) {
        self.commit_attribute();
        self.current_attribute = Some(Attribute::new(String::new(), String::new()));
    }

    pub(super) fn append_to_attribute_name(&mut self, c: char) {
        if let Some(attr) = self.current_attribute.as_mut() {
            attr.name.push(c);
        }
    }

    pub(super) fn append_to_attribute_value(&mut self, c: char) {
        if let Some(attr) = self.current_attribute.as_mut() {
            attr.value.push(c);
        }
    }

    /// [§ 13.2.5.33 Attribute name state](https://html.spec.whatwg.org/multipage/parsing.html#attribute-name-state)
    ///
    /// "When the user agent leaves the attribute name state (and before
    /// emitting the tag token, if appropriate), the complete attribute's name
    /// must be compared to the other attributes on the same token; if there is
    /// already an attribute on the token with the exact same name, then this is
    /// a duplicate-attribute parse error and the new attribute must be removed
    /// from the token."
    ///
    /// The error is reported here. Removal happens in
    /// [`Self::commit_attribute`], so that the duplicate's value is still
    /// parsed but lands nowhere.
    pub(super) fn check_duplicate_attribute(&mut self) {
        let is_duplicate = match (&self.current_attribute, &self.current_token) {
            (Some(attr), Some(token)) => token.has_attribute(&attr.name),
            _ => false,
        };
        if is_duplicate {
            self.current_attribute_is_duplicate = true;
            self.parse_error(ParseError::DuplicateAttribute);
        }
    }

    /// Move the attribute being built onto the current tag, unless it was a
    /// duplicate.
    pub(super) fn commit_attribute(&mut self) {
        let duplicate = std::mem::take(&mut self.current_attribute_is_duplicate);
        let Some(attr) = self.current_attribute.take() else {
            return;
        };
        if duplicate {
            return;
        }
        if let Some(token) = self.current_token.as_mut() {
            token.push_attribute(attr);
        }
    }
}

// =============================================================================
// End Tag Matching for RCDATA, RAWTEXT and Script Data
// =============================================================================

impl<C: CharSource> HTMLTokenizer<C> {
    /// "An appropriate end tag token is an end tag token whose tag name matches
    /// the tag name of the last start tag to have been emitted from this
    /// tokenizer, if any. If no start tag has been emitted from this tokenizer,
    /// then no end tag token is appropriate."
    pub(super) fn is_appropriate_end_tag_token(&self) -> bool {
        match (&self.last_start_tag_name, &self.current_token) {
            (Some(last_start_tag), Some(Token::EndTag { name, .. })) => name == last_start_tag,
            _ => false,
        }
    }

    /// The "less-than sign" states of RCDATA, RAWTEXT and script data.
    ///
    /// "U+002F SOLIDUS (/): Set the temporary buffer to the empty string.
    /// Switch to the X end tag open state."
    ///
    /// "Anything else: Emit a U+003C LESS-THAN SIGN character token. Reconsume
    /// in the X state."
    pub(super) fn less_than_sign_in(&mut self, end_tag_open: TokenizerState, text: TokenizerState) {
        if self.current_input_character == Some('/') {
            self.temporary_buffer.clear();
            self.switch_state(end_tag_open);
        } else {
            self.emit_character_token('<');
            self.reconsume_in(text);
        }
    }

    /// The "end tag open" states of RCDATA, RAWTEXT and script data.
    ///
    /// "ASCII alpha: Create a new end tag token, set its tag name to the empty
    /// string. Reconsume in the X end tag name state."
    ///
    /// "Anything else: Emit a U+003C LESS-THAN SIGN character token and a
    /// U+002F SOLIDUS character token. Reconsume in the X state."
    pub(super) fn end_tag_open_in(&mut self, end_tag_name: TokenizerState, text: TokenizerState) {
        match self.current_input_character {
            Some(c) if c.is_ascii_alphabetic() => {
                self.current_token = Some(Token::new_end_tag());
                self.reconsume_in(end_tag_name);
            }
            _ => {
                self.emit_characters("</");
                self.reconsume_in(text);
            }
        }
    }

    /// The "end tag name" states of RCDATA, RAWTEXT, script data and script
    /// data escaped. They differ only in the state they fall back to.
    pub(super) fn end_tag_name_in(&mut self, text: TokenizerState) {
        match self.current_input_character {
            // "If the current end tag token is an appropriate end tag token,
            // then switch to the before attribute name state."
            Some(c) if Self::is_whitespace_char(c) && self.is_appropriate_end_tag_token() => {
                self.switch_state(TokenizerState::BeforeAttributeName);
            }
            // "...then switch to the self-closing start tag state."
            Some('/') if self.is_appropriate_end_tag_token() => {
                self.switch_state(TokenizerState::SelfClosingStartTag);
            }
            // "...then switch to the data state and emit the current tag token."
            Some('>') if self.is_appropriate_end_tag_token() => {
                self.switch_state(TokenizerState::Data);
                self.emit_token();
            }
            // "ASCII alpha: Append the lowercase version of the current input
            // character to the current tag token's tag name. Append the current
            // input character to the temporary buffer."
            Some(c) if c.is_ascii_alphabetic() => {
                if let Some(token) = self.current_token.as_mut() {
                    token.append_to_tag_name(c.to_ascii_lowercase());
                }
                self.temporary_buffer.push(c);
            }
            // "Anything else: Emit a U+003C LESS-THAN SIGN character token, a
            // U+002F SOLIDUS character token, and a character token for each
            // of the characters in the temporary buffer (in the order they were
            // added to the buffer). Reconsume in the X state."
            _ => {
                self.current_token = None;
                self.emit_characters("</");
                let buffer = std::mem::take(&mut self.temporary_buffer);
                self.emit_characters(&buffer);
                self.reconsume_in(text);
            }
        }
    }
}
