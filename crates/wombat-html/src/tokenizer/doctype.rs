//! DOCTYPE states.
//!
//! [§ 13.2.5.53](https://html.spec.whatwg.org/multipage/parsing.html#doctype-state)
//! through [§ 13.2.5.68](https://html.spec.whatwg.org/multipage/parsing.html#bogus-doctype-state).
//!
//! The public and system identifier states come in pairs that differ only in
//! which identifier they fill and which error codes they report, so each pair
//! shares one handler parameterised by [`DoctypeIdentifier`].

use super::core::{HTMLTokenizer, TokenizerState};
use super::token::Token;
use crate::error::ParseError;
use crate::input::CharSource;
use crate::lookup::{CaseMatching, KeyLookup};

/// Which DOCTYPE identifier a shared DOCTYPE state is working on.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(super) enum DoctypeIdentifier {
    Public,
    System,
}

/// [§ 13.2.5.56 After DOCTYPE name state](https://html.spec.whatwg.org/multipage/parsing.html#after-doctype-name-state)
///
/// "If the six characters starting from the current input character are an
/// ASCII case-insensitive match for the word "PUBLIC" ... "SYSTEM" ..."
static DOCTYPE_KEYWORDS: KeyLookup<DoctypeIdentifier> = KeyLookup::new(
    &[
        ("PUBLIC", DoctypeIdentifier::Public),
        ("SYSTEM", DoctypeIdentifier::System),
    ],
    CaseMatching::AsciiInsensitive,
);

impl DoctypeIdentifier {
    const fn before_state(self) -> TokenizerState {
        match self {
            Self::Public => TokenizerState::BeforeDOCTYPEPublicIdentifier,
            Self::System => TokenizerState::BeforeDOCTYPESystemIdentifier,
        }
    }

    const fn quoted_state(self, quote: char) -> TokenizerState {
        match (self, quote) {
            (Self::Public, '"') => TokenizerState::DOCTYPEPublicIdentifierDoubleQuoted,
            (Self::Public, _) => TokenizerState::DOCTYPEPublicIdentifierSingleQuoted,
            (Self::System, '"') => TokenizerState::DOCTYPESystemIdentifierDoubleQuoted,
            (Self::System, _) => TokenizerState::DOCTYPESystemIdentifierSingleQuoted,
        }
    }

    const fn after_state(self) -> TokenizerState {
        match self {
            Self::Public => TokenizerState::AfterDOCTYPEPublicIdentifier,
            Self::System => TokenizerState::AfterDOCTYPESystemIdentifier,
        }
    }

    const fn keyword_state(self) -> TokenizerState {
        match self {
            Self::Public => TokenizerState::AfterDOCTYPEPublicKeyword,
            Self::System => TokenizerState::AfterDOCTYPESystemKeyword,
        }
    }

    const fn missing_whitespace_after_keyword(self) -> ParseError {
        match self {
            Self::Public => ParseError::MissingWhitespaceAfterDoctypePublicKeyword,
            Self::System => ParseError::MissingWhitespaceAfterDoctypeSystemKeyword,
        }
    }

    const fn missing_identifier(self) -> ParseError {
        match self {
            Self::Public => ParseError::MissingDoctypePublicIdentifier,
            Self::System => ParseError::MissingDoctypeSystemIdentifier,
        }
    }

    const fn missing_quote(self) -> ParseError {
        match self {
            Self::Public => ParseError::MissingQuoteBeforeDoctypePublicIdentifier,
            Self::System => ParseError::MissingQuoteBeforeDoctypeSystemIdentifier,
        }
    }

    const fn abrupt_end(self) -> ParseError {
        match self {
            Self::Public => ParseError::AbruptDoctypePublicIdentifier,
            Self::System => ParseError::AbruptDoctypeSystemIdentifier,
        }
    }
}

impl<C: CharSource> HTMLTokenizer<C> {
    fn doctype_token(&mut self) -> Option<&mut Token> {
        self.current_token.as_mut()
    }

    fn set_force_quirks(&mut self) {
        if let Some(token) = self.doctype_token() {
            token.set_force_quirks();
        }
    }

    /// "EOF: This is an eof-in-doctype parse error. Set the current DOCTYPE
    /// token's force-quirks flag to on. Emit the current DOCTYPE token. Emit an
    /// end-of-file token."
    fn eof_in_doctype(&mut self) {
        self.parse_error(ParseError::EofInDoctype);
        if self.current_token.is_none() {
            self.current_token = Some(Token::new_doctype());
        }
        self.set_force_quirks();
        self.emit_token();
        self.emit_eof_token();
    }

    /// "Switch to the data state. Emit the current DOCTYPE token."
    fn finish_doctype(&mut self) {
        self.switch_state(TokenizerState::Data);
        self.emit_token();
    }

    /// Report `error`, set force-quirks and reconsume in the bogus DOCTYPE
    /// state.
    fn bogus_doctype(&mut self, error: ParseError) {
        self.parse_error(error);
        self.set_force_quirks();
        self.reconsume_in(TokenizerState::BogusDOCTYPE);
    }

    fn start_identifier(&mut self, which: DoctypeIdentifier) {
        if let Some(token) = self.doctype_token() {
            match which {
                DoctypeIdentifier::Public => token.start_public_identifier(),
                DoctypeIdentifier::System => token.start_system_identifier(),
            }
        }
    }

    fn append_identifier(&mut self, which: DoctypeIdentifier, c: char) {
        if let Some(token) = self.doctype_token() {
            match which {
                DoctypeIdentifier::Public => token.append_to_public_identifier(c),
                DoctypeIdentifier::System => token.append_to_system_identifier(c),
            }
        }
    }

    /// [§ 13.2.5.53 DOCTYPE state](https://html.spec.whatwg.org/multipage/parsing.html#doctype-state)
    pub(super) fn handle_doctype_state(&mut self) {
        match self.current_input_character {
            Some(c) if Self::is_whitespace_char(c) => {
                self.switch_state(TokenizerState::BeforeDOCTYPEName);
            }
            Some('>') => self.reconsume_in(TokenizerState::BeforeDOCTYPEName),
            None => self.eof_in_doctype(),
            Some(_) => {
                self.parse_error(ParseError::MissingWhitespaceBeforeDoctypeName);
                self.reconsume_in(TokenizerState::BeforeDOCTYPEName);
            }
        }
    }

    /// [§ 13.2.5.54 Before DOCTYPE name state](https://html.spec.whatwg.org/multipage/parsing.html#before-doctype-name-state)
    pub(super) fn handle_before_doctype_name_state(&mut self) {
        match self.current_input_character {
            Some(c) if Self::is_whitespace_char(c) => {}
            // "This is a missing-doctype-name parse error. Create a new DOCTYPE
            // token. Set its force-quirks flag to on. Switch to the data state.
            // Emit the current token."
            Some('>') => {
                self.parse_error(ParseError::MissingDoctypeName);
                self.current_token = Some(Token::new_doctype());
                self.set_force_quirks();
                self.finish_doctype();
            }
            None => self.eof_in_doctype(),
            Some(c) => {
                let first = if c == '\0' {
                    self.parse_error(ParseError::UnexpectedNullCharacter);
                    '\u{FFFD}'
                } else {
                    c.to_ascii_lowercase()
                };
                let mut token = Token::new_doctype();
                token.append_to_doctype_name(first);
                self.current_token = Some(token);
                self.switch_state(TokenizerState::DOCTYPEName);
            }
        }
    }

    /// [§ 13.2.5.55 DOCTYPE name state](https://html.spec.whatwg.org/multipage/parsing.html#doctype-name-state)
    pub(super) fn handle_doctype_name_state(&mut self) {
        match self.current_input_character {
            Some(c) if Self::is_whitespace_char(c) => {
                self.switch_state(TokenizerState::AfterDOCTYPEName);
            }
            Some('>') => self.finish_doctype(),
            Some('\0') => {
                self.parse_error(ParseError::UnexpectedNullCharacter);
                if let Some(token) = self.doctype_token() {
                    token.append_to_doctype_name('\u{FFFD}');
                }
            }
            None => self.eof_in_doctype(),
            Some(c) => {
                if let Some(token) = self.doctype_token() {
                    token.append_to_doctype_name(c.to_ascii_lowercase());
                }
            }
        }
    }

    /// [§ 13.2.5.56 After DOCTYPE name state](https://html.spec.whatwg.org/multipage/parsing.html#after-doctype-name-state)
    pub(super) fn handle_after_doctype_name_state(&mut self) {
        match self.current_input_character {
            Some(c) if Self::is_whitespace_char(c) => {}
            Some('>') => self.finish_doctype(),
            None => self.eof_in_doctype(),
            Some(_) => {
                // The keyword starts at the current input character, so give
                // it back and match from the input.
                self.unconsume();
                let mut matcher = DOCTYPE_KEYWORDS.matcher();
                while let Some(c) = self.input.peek() {
                    if !matcher.feed(c) {
                        break;
                    }
                    let _ = self.input.next();
                }
                if let Some(&which) = matcher.exact_match() {
                    self.switch_state(which.keyword_state());
                } else {
                    for c in matcher.consumed().chars().rev() {
                        self.input.pushback(c);
                    }
                    // "This is an invalid-character-sequence-after-doctype-name
                    // parse error. Set the current DOCTYPE token's force-quirks
                    // flag to on. Reconsume in the bogus DOCTYPE state."
                    self.parse_error(ParseError::InvalidCharacterSequenceAfterDoctypeName);
                    self.set_force_quirks();
                    self.switch_state(TokenizerState::BogusDOCTYPE);
                }
            }
        }
    }

    /// [§ 13.2.5.57 After DOCTYPE public keyword state](https://html.spec.whatwg.org/multipage/parsing.html#after-doctype-public-keyword-state)
    /// and [§ 13.2.5.63 After DOCTYPE system keyword state](https://html.spec.whatwg.org/multipage/parsing.html#after-doctype-system-keyword-state)
    pub(super) fn handle_after_doctype_keyword_state(&mut self, which: DoctypeIdentifier) {
        match self.current_input_character {
            Some(c) if Self::is_whitespace_char(c) => self.switch_state(which.before_state()),
            // "This is a missing-whitespace-after-doctype-public-keyword parse
            // error. Set the current DOCTYPE token's public identifier to the
            // empty string (not missing), then switch to the DOCTYPE public
            // identifier (double-quoted) state."
            Some(quote @ ('"' | '\'')) => {
                self.parse_error(which.missing_whitespace_after_keyword());
                self.start_identifier(which);
                self.switch_state(which.quoted_state(quote));
            }
            Some('>') => {
                self.parse_error(which.missing_identifier());
                self.set_force_quirks();
                self.finish_doctype();
            }
            None => self.eof_in_doctype(),
            Some(_) => self.bogus_doctype(which.missing_quote()),
        }
    }

    /// [§ 13.2.5.58 Before DOCTYPE public identifier state](https://html.spec.whatwg.org/multipage/parsing.html#before-doctype-public-identifier-state)
    /// and [§ 13.2.5.64 Before DOCTYPE system identifier state](https://html.spec.whatwg.org/multipage/parsing.html#before-doctype-system-identifier-state)
    pub(super) fn handle_before_doctype_identifier_state(&mut self, which: DoctypeIdentifier) {
        match self.current_input_character {
            Some(c) if Self::is_whitespace_char(c) => {}
            Some(quote @ ('"' | '\'')) => {
                self.start_identifier(which);
                self.switch_state(which.quoted_state(quote));
            }
            Some('>') => {
                self.parse_error(which.missing_identifier());
                self.set_force_quirks();
                self.finish_doctype();
            }
            None => self.eof_in_doctype(),
            Some(_) => self.bogus_doctype(which.missing_quote()),
        }
    }

    /// The four quoted identifier states, §§ 13.2.5.59, 60, 65 and 66.
    pub(super) fn handle_doctype_identifier_quoted_state(
        &mut self,
        which: DoctypeIdentifier,
        quote: char,
    ) {
        match self.current_input_character {
            Some(c) if c == quote => self.switch_state(which.after_state()),
            Some('\0') => {
                self.parse_error(ParseError::UnexpectedNullCharacter);
                self.append_identifier(which, '\u{FFFD}');
            }
            // "This is an abrupt-doctype-public-identifier parse error. Set the
            // current DOCTYPE token's force-quirks flag to on. Switch to the
            // data state. Emit the current DOCTYPE token."
            Some('>') => {
                self.parse_error(which.abrupt_end());
                self.set_force_quirks();
                self.finish_doctype();
            }
            None => self.eof_in_doctype(),
            Some(c) => self.append_identifier(which, c),
        }
    }

    /// [§ 13.2.5.61 After DOCTYPE public identifier state](https://html.spec.whatwg.org/multipage/parsing.html#after-doctype-public-identifier-state)
    pub(super) fn handle_after_doctype_public_identifier_state(&mut self) {
        match self.current_input_character {
            Some(c) if Self::is_whitespace_char(c) => {
                self.switch_state(TokenizerState::BetweenDOCTYPEPublicAndSystemIdentifiers);
            }
            Some('>') => self.finish_doctype(),
            Some(quote @ ('"' | '\'')) => {
                self.parse_error(
                    ParseError::MissingWhitespaceBetweenDoctypePublicAndSystemIdentifiers,
                );
                self.start_identifier(DoctypeIdentifier::System);
                self.switch_state(DoctypeIdentifier::System.quoted_state(quote));
            }
            None => self.eof_in_doctype(),
            Some(_) => self.bogus_doctype(ParseError::MissingQuoteBeforeDoctypeSystemIdentifier),
        }
    }

    /// [§ 13.2.5.62 Between DOCTYPE public and system identifiers state](https://html.spec.whatwg.org/multipage/parsing.html#between-doctype-public-and-system-identifiers-state)
    pub(super) fn handle_between_doctype_public_and_system_identifiers_state(&mut self) {
        match self.current_input_character {
            Some(c) if Self::is_whitespace_char(c) => {}
            Some('>') => self.finish_doctype(),
            Some(quote @ ('"' | '\'')) => {
                self.start_identifier(DoctypeIdentifier::System);
                self.switch_state(DoctypeIdentifier::System.quoted_state(quote));
            }
            None => self.eof_in_doctype(),
            Some(_) => self.bogus_doctype(ParseError::MissingQuoteBeforeDoctypeSystemIdentifier),
        }
    }

    /// [§ 13.2.5.67 After DOCTYPE system identifier state](https://html.spec.whatwg.org/multipage/parsing.html#after-doctype-system-identifier-state)
    pub(super) fn handle_after_doctype_system_identifier_state(&mut self) {
        match self.current_input_character {
            Some(c) if Self::is_whitespace_char(c) => {}
            Some('>') => self.finish_doctype(),
            None => self.eof_in_doctype(),
            // "This is an unexpected-character-after-doctype-system-identifier
            // parse error. Reconsume in the bogus DOCTYPE state. (This does not
            // set the current DOCTYPE token's force-quirks flag to on.)"
            Some(_) => {
                self.parse_error(ParseError::UnexpectedCharacterAfterDoctypeSystemIdentifier);
                self.reconsume_in(TokenizerState::BogusDOCTYPE);
            }
        }
    }

    /// [§ 13.2.5.68 Bogus DOCTYPE state](https://html.spec.whatwg.org/multipage/parsing.html#bogus-doctype-state)
    pub(super) fn handle_bogus_doctype_state(&mut self) {
        match self.current_input_character {
            Some('>') => self.finish_doctype(),
            Some('\0') => self.parse_error(ParseError::UnexpectedNullCharacter),
            // "EOF: Emit the DOCTYPE token. Emit an end-of-file token."
            None => {
                self.emit_token();
                self.emit_eof_token();
            }
            Some(_) => {}
        }
    }
}
