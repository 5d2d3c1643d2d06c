//! Text content states: data, RCDATA, RAWTEXT and PLAINTEXT, with the
//! end-tag recognition states of RCDATA and RAWTEXT.

use super::core::{HTMLTokenizer, TokenizerState};
use crate::error::ParseError;
use crate::input::CharSource;

impl<C: CharSource> HTMLTokenizer<C> {
    /// [§ 13.2.5.1 Data state](https://html.spec.whatwg.org/multipage/parsing.html#data-state)
    pub(super) fn handle_data_state(&mut self) {
        match self.current_input_character {
            // "U+0026 AMPERSAND (&): Set the return state to the data state.
            // Switch to the character reference state."
            Some('&') => {
                self.return_state = Some(TokenizerState::Data);
                self.switch_state(TokenizerState::CharacterReference);
            }
            // "U+003C LESS-THAN SIGN (<): Switch to the tag open state."
            Some('<') => self.switch_state(TokenizerState::TagOpen),
            // "U+0000 NULL: This is an unexpected-null-character parse error.
            // Emit the current input character as a character token."
            Some('\0') => {
                self.parse_error(ParseError::UnexpectedNullCharacter);
                self.emit_character_token('\0');
            }
            // "EOF: Emit an end-of-file token."
            None => self.emit_eof_token(),
            // "Anything else: Emit the current input character as a character token."
            Some(c) => self.emit_character_token(c),
        }
    }

    /// [§ 13.2.5.2 RCDATA state](https://html.spec.whatwg.org/multipage/parsing.html#rcdata-state)
    pub(super) fn handle_rcdata_state(&mut self) {
        match self.current_input_character {
            Some('&') => {
                self.return_state = Some(TokenizerState::RCDATA);
                self.switch_state(TokenizerState::CharacterReference);
            }
            Some('<') => self.switch_state(TokenizerState::RCDATALessThanSign),
            _ => self.raw_character(),
        }
    }

    /// [§ 13.2.5.3 RAWTEXT state](https://html.spec.whatwg.org/multipage/parsing.html#rawtext-state)
    pub(super) fn handle_rawtext_state(&mut self) {
        match self.current_input_character {
            Some('<') => self.switch_state(TokenizerState::RAWTEXTLessThanSign),
            _ => self.raw_character(),
        }
    }

    /// [§ 13.2.5.5 PLAINTEXT state](https://html.spec.whatwg.org/multipage/parsing.html#plaintext-state)
    ///
    /// There is no way out of this state short of end of input.
    pub(super) fn handle_plaintext_state(&mut self) {
        self.raw_character();
    }

    /// The shared tail of the RCDATA, RAWTEXT, script data and PLAINTEXT states.
    ///
    /// "U+0000 NULL: This is an unexpected-null-character parse error. Emit a
    /// U+FFFD REPLACEMENT CHARACTER character token."
    /// "EOF: Emit an end-of-file token."
    /// "Anything else: Emit the current input character as a character token."
    pub(super) fn raw_character(&mut self) {
        match self.current_input_character {
            Some('\0') => {
                self.parse_error(ParseError::UnexpectedNullCharacter);
                self.emit_character_token('\u{FFFD}');
            }
            None => self.emit_eof_token(),
            Some(c) => self.emit_character_token(c),
        }
    }

    /// [§ 13.2.5.9 RCDATA less-than sign state](https://html.spec.whatwg.org/multipage/parsing.html#rcdata-less-than-sign-state)
    pub(super) fn handle_rcdata_less_than_sign_state(&mut self) {
        self.less_than_sign_in(TokenizerState::RCDATAEndTagOpen, TokenizerState::RCDATA);
    }

    /// [§ 13.2.5.10 RCDATA end tag open state](https://html.spec.whatwg.org/multipage/parsing.html#rcdata-end-tag-open-state)
    pub(super) fn handle_rcdata_end_tag_open_state(&mut self) {
        self.end_tag_open_in(TokenizerState::RCDATAEndTagName, TokenizerState::RCDATA);
    }

    /// [§ 13.2.5.11 RCDATA end tag name state](https://html.spec.whatwg.org/multipage/parsing.html#rcdata-end-tag-name-state)
    pub(super) fn handle_rcdata_end_tag_name_state(&mut self) {
        self.end_tag_name_in(TokenizerState::RCDATA);
    }

    /// [§ 13.2.5.12 RAWTEXT less-than sign state](https://html.spec.whatwg.org/multipage/parsing.html#rawtext-less-than-sign-state)
    pub(super) fn handle_rawtext_less_than_sign_state(&mut self) {
        self.less_than_sign_in(TokenizerState::RAWTEXTEndTagOpen, TokenizerState::RAWTEXT);
    }

    /// [§ 13.2.5.13 RAWTEXT end tag open state](https://html.spec.whatwg.org/multipage/parsing.html#rawtext-end-tag-open-state)
    pub(super) fn handle_rawtext_end_tag_open_state(&mut self) {
        self.end_tag_open_in(TokenizerState::RAWTEXTEndTagName, TokenizerState::RAWTEXT);
    }

    /// [§ 13.2.5.14 RAWTEXT end tag name state](https://html.spec.whatwg.org/multipage/parsing.html#rawtext-end-tag-name-state)
    pub(super) fn handle_rawtext_end_tag_name_state(&mut self) {
        self.end_tag_name_in(TokenizerState::RAWTEXT);
    }
}
