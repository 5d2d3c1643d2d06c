//! Markup declarations, comments, bogus comments and CDATA sections.

use super::core::{HTMLTokenizer, TokenizerState};
use super::token::Token;
use crate::error::ParseError;
use crate::input::CharSource;
use crate::lookup::{CaseMatching, KeyLookup};

/// What can follow `<!`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum MarkupDeclaration {
    Comment,
    Doctype,
    Cdata,
}

/// [§ 13.2.5.42 Markup declaration open state](https://html.spec.whatwg.org/multipage/parsing.html#markup-declaration-open-state)
///
/// `DOCTYPE` is matched case-insensitively; `[CDATA[` must match exactly,
/// which the handler checks against the raw consumed text.
static MARKUP_DECLARATIONS: KeyLookup<MarkupDeclaration> = KeyLookup::new(
    &[
        ("--", MarkupDeclaration::Comment),
        ("DOCTYPE", MarkupDeclaration::Doctype),
        ("[CDATA[", MarkupDeclaration::Cdata),
    ],
    CaseMatching::AsciiInsensitive,
);

impl<C: CharSource> HTMLTokenizer<C> {
    /// [§ 13.2.5.42 Markup declaration open state](https://html.spec.whatwg.org/multipage/parsing.html#markup-declaration-open-state)
    ///
    /// "If the next few characters are:"
    pub(super) fn handle_markup_declaration_open_state(&mut self) {
        let mut matcher = MARKUP_DECLARATIONS.matcher();
        while let Some(c) = self.input.peek() {
            if !matcher.feed(c) {
                break;
            }
            let _ = self.input.next();
        }

        match matcher.exact_match() {
            // "Two U+002D HYPHEN-MINUS characters (-): Consume those two
            // characters, create a comment token whose data is the empty
            // string, and switch to the comment start state."
            Some(MarkupDeclaration::Comment) => {
                self.current_token = Some(Token::new_comment());
                self.switch_state(TokenizerState::CommentStart);
            }
            // "ASCII case-insensitive match for the word "DOCTYPE": Consume
            // those characters and switch to the DOCTYPE state."
            Some(MarkupDeclaration::Doctype) => self.switch_state(TokenizerState::DOCTYPE),
            // "The string "[CDATA[" (the five uppercase letters "CDATA" with a
            // U+005B LEFT SQUARE BRACKET character before and after): Consume
            // those characters. If there is an adjusted current node and it is
            // not an element in the HTML namespace, then switch to the CDATA
            // section state. Otherwise, this is a cdata-in-html-content parse
            // error. Create a comment token whose data is the "[CDATA[" string.
            // Switch to the bogus comment state."
            Some(MarkupDeclaration::Cdata) if matcher.consumed() == "[CDATA[" => {
                if self.cdata_allowed {
                    self.switch_state(TokenizerState::CDATASection);
                } else {
                    self.parse_error(ParseError::CdataInHtmlContent);
                    self.current_token = Some(Token::comment("[CDATA["));
                    self.switch_state(TokenizerState::BogusComment);
                }
            }
            // "Anything else: This is an incorrectly-opened-comment parse
            // error. Create a comment token whose data is the empty string.
            // Switch to the bogus comment state (don't consume anything in the
            // current state)."
            _ => {
                for c in matcher.consumed().chars().rev() {
                    self.input.pushback(c);
                }
                self.parse_error(ParseError::IncorrectlyOpenedComment);
                self.current_token = Some(Token::new_comment());
                self.switch_state(TokenizerState::BogusComment);
            }
        }
    }

    /// [§ 13.2.5.41 Bogus comment state](https://html.spec.whatwg.org/multipage/parsing.html#bogus-comment-state)
    pub(super) fn handle_bogus_comment_state(&mut self) {
        match self.current_input_character {
            Some('>') => {
                self.switch_state(TokenizerState::Data);
                self.emit_token();
            }
            // "EOF: Emit the comment. Emit an end-of-file token."
            None => {
                self.emit_token();
                self.emit_eof_token();
            }
            Some('\0') => {
                self.parse_error(ParseError::UnexpectedNullCharacter);
                self.append_comment('\u{FFFD}');
            }
            Some(c) => self.append_comment(c),
        }
    }

    fn append_comment(&mut self, c: char) {
        if let Some(token) = self.current_token.as_mut() {
            token.append_to_comment(c);
        }
    }

    fn append_comment_str(&mut self, s: &str) {
        if let Some(token) = self.current_token.as_mut() {
            token.append_str_to_comment(s);
        }
    }

    /// "EOF: This is an eof-in-comment parse error. Emit the current comment
    /// token. Emit an end-of-file token."
    fn eof_in_comment(&mut self) {
        self.parse_error(ParseError::EofInComment);
        self.emit_token();
        self.emit_eof_token();
    }

    /// [§ 13.2.5.43 Comment start state](https://html.spec.whatwg.org/multipage/parsing.html#comment-start-state)
    pub(super) fn handle_comment_start_state(&mut self) {
        match self.current_input_character {
            Some('-') => self.switch_state(TokenizerState::CommentStartDash),
            // "This is an abrupt-closing-of-empty-comment parse error. Switch
            // to the data state. Emit the current comment token."
            Some('>') => {
                self.parse_error(ParseError::AbruptClosingOfEmptyComment);
                self.switch_state(TokenizerState::Data);
                self.emit_token();
            }
            _ => self.reconsume_in(TokenizerState::Comment),
        }
    }

    /// [§ 13.2.5.44 Comment start dash state](https://html.spec.whatwg.org/multipage/parsing.html#comment-start-dash-state)
    pub(super) fn handle_comment_start_dash_state(&mut self) {
        match self.current_input_character {
            Some('-') => self.switch_state(TokenizerState::CommentEnd),
            Some('>') => {
                self.parse_error(ParseError::AbruptClosingOfEmptyComment);
                self.switch_state(TokenizerState::Data);
                self.emit_token();
            }
            None => self.eof_in_comment(),
            Some(_) => {
                self.append_comment('-');
                self.reconsume_in(TokenizerState::Comment);
            }
        }
    }

    /// [§ 13.2.5.45 Comment state](https://html.spec.whatwg.org/multipage/parsing.html#comment-state)
    pub(super) fn handle_comment_state(&mut self) {
        match self.current_input_character {
            Some('<') => {
                self.append_comment('<');
                self.switch_state(TokenizerState::CommentLessThanSign);
            }
            Some('-') => self.switch_state(TokenizerState::CommentEndDash),
            Some('\0') => {
                self.parse_error(ParseError::UnexpectedNullCharacter);
                self.append_comment('\u{FFFD}');
            }
            None => self.eof_in_comment(),
            Some(c) => self.append_comment(c),
        }
    }

    /// [§ 13.2.5.46 Comment less-than sign state](https://html.spec.whatwg.org/multipage/parsing.html#comment-less-than-sign-state)
    pub(super) fn handle_comment_less_than_sign_state(&mut self) {
        match self.current_input_character {
            Some('!') => {
                self.append_comment('!');
                self.switch_state(TokenizerState::CommentLessThanSignBang);
            }
            Some('<') => self.append_comment('<'),
            _ => self.reconsume_in(TokenizerState::Comment),
        }
    }

    /// [§ 13.2.5.47 Comment less-than sign bang state](https://html.spec.whatwg.org/multipage/parsing.html#comment-less-than-sign-bang-state)
    pub(super) fn handle_comment_less_than_sign_bang_state(&mut self) {
        if self.current_input_character == Some('-') {
            self.switch_state(TokenizerState::CommentLessThanSignBangDash);
        } else {
            self.reconsume_in(TokenizerState::Comment);
        }
    }

    /// [§ 13.2.5.48 Comment less-than sign bang dash state](https://html.spec.whatwg.org/multipage/parsing.html#comment-less-than-sign-bang-dash-state)
    pub(super) fn handle_comment_less_than_sign_bang_dash_state(&mut self) {
        if self.current_input_character == Some('-') {
            self.switch_state(TokenizerState::CommentLessThanSignBangDashDash);
        } else {
            self.reconsume_in(TokenizerState::CommentEndDash);
        }
    }

    /// [§ 13.2.5.49 Comment less-than sign bang dash dash state](https://html.spec.whatwg.org/multipage/parsing.html#comment-less-than-sign-bang-dash-dash-state)
    pub(super) fn handle_comment_less_than_sign_bang_dash_dash_state(&mut self) {
        match self.current_input_character {
            Some('>') | None => self.reconsume_in(TokenizerState::CommentEnd),
            // "This is a nested-comment parse error. Reconsume in the comment
            // end state."
            Some(_) => {
                self.parse_error(ParseError::NestedComment);
                self.reconsume_in(TokenizerState::CommentEnd);
            }
        }
    }

    /// [§ 13.2.5.50 Comment end dash state](https://html.spec.whatwg.org/multipage/parsing.html#comment-end-dash-state)
    pub(super) fn handle_comment_end_dash_state(&mut self) {
        match self.current_input_character {
            Some('-') => self.switch_state(TokenizerState::CommentEnd),
            None => self.eof_in_comment(),
            Some(_) => {
                self.append_comment('-');
                self.reconsume_in(TokenizerState::Comment);
            }
        }
    }

    /// [§ 13.2.5.51 Comment end state](https://html.spec.whatwg.org/multipage/parsing.html#comment-end-state)
    pub(super) fn handle_comment_end_state(&mut self) {
        match self.current_input_character {
            Some('>') => {
                self.switch_state(TokenizerState::Data);
                self.emit_token();
            }
            Some('!') => self.switch_state(TokenizerState::CommentEndBang),
            Some('-') => self.append_comment('-'),
            None => self.eof_in_comment(),
            // "Append two U+002D HYPHEN-MINUS characters (-) to the comment
            // token's data. Reconsume in the comment state."
            Some(_) => {
                self.append_comment_str("--");
                self.reconsume_in(TokenizerState::Comment);
            }
        }
    }

    /// [§ 13.2.5.52 Comment end bang state](https://html.spec.whatwg.org/multipage/parsing.html#comment-end-bang-state)
    pub(super) fn handle_comment_end_bang_state(&mut self) {
        match self.current_input_character {
            Some('-') => {
                self.append_comment_str("--!");
                self.switch_state(TokenizerState::CommentEndDash);
            }
            Some('>') => {
                self.parse_error(ParseError::IncorrectlyClosedComment);
                self.switch_state(TokenizerState::Data);
                self.emit_token();
            }
            None => self.eof_in_comment(),
            Some(_) => {
                self.append_comment_str("--!");
                self.reconsume_in(TokenizerState::Comment);
            }
        }
    }

    /// [§ 13.2.5.69 CDATA section state](https://html.spec.whatwg.org/multipage/parsing.html#cdata-section-state)
    pub(super) fn handle_cdata_section_state(&mut self) {
        match self.current_input_character {
            Some(']') => self.switch_state(TokenizerState::CDATASectionBracket),
            None => {
                self.parse_error(ParseError::EofInCdata);
                self.emit_eof_token();
            }
            // NULL is emitted as is here; the tree constructor deals with it.
            Some(c) => self.emit_character_token(c),
        }
    }

    /// [§ 13.2.5.70 CDATA section bracket state](https://html.spec.whatwg.org/multipage/parsing.html#cdata-section-bracket-state)
    pub(super) fn handle_cdata_section_bracket_state(&mut self) {
        if self.current_input_character == Some(']') {
            self.switch_state(TokenizerState::CDATASectionEnd);
        } else {
            self.emit_character_token(']');
            self.reconsume_in(TokenizerState::CDATASection);
        }
    }

    /// [§ 13.2.5.71 CDATA section end state](https://html.spec.whatwg.org/multipage/parsing.html#cdata-section-end-state)
    pub(super) fn handle_cdata_section_end_state(&mut self) {
        match self.current_input_character {
            Some(']') => self.emit_character_token(']'),
            Some('>') => self.switch_state(TokenizerState::Data),
            _ => {
                self.emit_characters("]]");
                self.reconsume_in(TokenizerState::CDATASection);
            }
        }
    }
}
