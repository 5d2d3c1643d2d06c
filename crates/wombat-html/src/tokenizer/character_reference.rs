//! Character reference states.
//!
//! [§ 13.2.5.72 Character reference state](https://html.spec.whatwg.org/multipage/parsing.html#character-reference-state)
//! through [§ 13.2.5.80 Numeric character reference end state](https://html.spec.whatwg.org/multipage/parsing.html#numeric-character-reference-end-state)

use super::core::{HTMLTokenizer, TokenizerState};
use super::named_character_references::NAMED_CHARACTER_REFERENCES;
use crate::error::ParseError;
use crate::input::CharSource;

/// Anything above this is outside Unicode. Accumulation stops growing here.
const MAX_CODE_POINT: u32 = 0x10_FFFF;

/// [§ 13.2.5.80](https://html.spec.whatwg.org/multipage/parsing.html#numeric-character-reference-end-state)
///
/// "If the number is one of the numbers in the first column of the following
/// table, then find the row with that number in the first column, and set the
/// character reference code to the number in the second column."
///
/// These are the C1 control positions that Windows-1252 fills with printable
/// characters.
const C1_REPLACEMENTS: [(u32, u32); 27] = [
    (0x80, 0x20AC), // EURO SIGN (€)
    (0x82, 0x201A), // SINGLE LOW-9 QUOTATION MARK (‚)
    (0x83, 0x0192), // LATIN SMALL LETTER F WITH HOOK (ƒ)
    (0x84, 0x201E), // DOUBLE LOW-9 QUOTATION MARK („)
    (0x85, 0x2026), // HORIZONTAL ELLIPSIS (…)
    (0x86, 0x2020), // DAGGER (†)
    (0x87, 0x2021), // DOUBLE DAGGER (‡)
    (0x88, 0x02C6), // MODIFIER LETTER CIRCUMFLEX ACCENT (ˆ)
    (0x89, 0x2030), // PER MILLE SIGN (‰)
    (0x8A, 0x0160), // LATIN CAPITAL LETTER S WITH CARON (Š)
    (0x8B, 0x2039), // SINGLE LEFT-POINTING ANGLE QUOTATION MARK (‹)
    (0x8C, 0x0152), // LATIN CAPITAL LIGATURE OE (Œ)
    (0x8E, 0x017D), // LATIN CAPITAL LETTER Z WITH CARON (Ž)
    (0x91, 0x2018), // LEFT SINGLE QUOTATION MARK (')
    (0x92, 0x2019), // RIGHT SINGLE QUOTATION MARK (')
    (0x93, 0x201C), // LEFT DOUBLE QUOTATION MARK (")
    (0x94, 0x201D), // RIGHT DOUBLE QUOTATION MARK (")
    (0x95, 0x2022), // BULLET (•)
    (0x96, 0x2013), // EN DASH (–)
    (0x97, 0x2014), // EM DASH
    (0x98, 0x02DC), // SMALL TILDE (˜)
    (0x99, 0x2122), // TRADE MARK SIGN (™)
    (0x9A, 0x0161), // LATIN SMALL LETTER S WITH CARON (š)
    (0x9B, 0x203A), // SINGLE RIGHT-POINTING ANGLE QUOTATION MARK (›)
    (0x9C, 0x0153), // LATIN SMALL LIGATURE OE (œ)
    (0x9E, 0x017E), // LATIN SMALL LETTER Z WITH CARON (ž)
    (0x9F, 0x0178), // LATIN CAPITAL LETTER Y WITH DIAERESIS (Ÿ)
];

/// [Infra: noncharacter](https://infra.spec.whatwg.org/#noncharacter)
const fn is_noncharacter(code: u32) -> bool {
    matches!(code, 0xFDD0..=0xFDEF) || (code & 0xFFFE == 0xFFFE && code <= MAX_CODE_POINT)
}

/// [Infra: control](https://infra.spec.whatwg.org/#control), excluding ASCII
/// whitespace other than CR.
const fn is_reportable_control(code: u32) -> bool {
    let is_control = matches!(code, 0x00..=0x1F | 0x7F..=0x9F);
    let is_ascii_whitespace = matches!(code, 0x09 | 0x0A | 0x0C | 0x20);
    code == 0x0D || (is_control && !is_ascii_whitespace)
}

/// Resolve a character reference code to a character, with the parse error
/// it raises if any.
///
/// [§ 13.2.5.80 Numeric character reference end state](https://html.spec.whatwg.org/multipage/parsing.html#numeric-character-reference-end-state)
pub(crate) fn resolve_numeric_reference(code: u32) -> (char, Option<ParseError>) {
    // "If the number is 0x00, then this is a null-character-reference parse
    // error. Set the character reference code to 0xFFFD."
    if code == 0 {
        return ('\u{FFFD}', Some(ParseError::NullCharacterReference));
    }
    // "If the number is greater than 0x10FFFF, then this is a
    // character-reference-outside-unicode-range parse error."
    if code > MAX_CODE_POINT {
        return (
            '\u{FFFD}',
            Some(ParseError::CharacterReferenceOutsideUnicodeRange),
        );
    }
    // "If the number is a surrogate, then this is a
    // surrogate-character-reference parse error."
    if matches!(code, 0xD800..=0xDFFF) {
        return ('\u{FFFD}', Some(ParseError::SurrogateCharacterReference));
    }

    let error = if is_noncharacter(code) {
        Some(ParseError::NoncharacterCharacterReference)
    } else if is_reportable_control(code) {
        Some(ParseError::ControlCharacterReference)
    } else {
        None
    };
    let code = C1_REPLACEMENTS
        .iter()
        .find(|&&(from, _)| from == code)
        .map_or(code, |&(_, to)| to);
    (char::from_u32(code).unwrap_or('\u{FFFD}'), error)
}

impl<C: CharSource> HTMLTokenizer<C> {
    /// "consumed as part of an attribute": the return state is one of the
    /// attribute value states.
    pub(super) const fn is_consumed_as_part_of_attribute(&self) -> bool {
        matches!(
            self.return_state,
            Some(
                TokenizerState::AttributeValueDoubleQuoted
                    | TokenizerState::AttributeValueSingleQuoted
                    | TokenizerState::AttributeValueUnquoted
            )
        )
    }

    /// "Flush code points consumed as a character reference"
    ///
    /// "If the character reference was consumed as part of an attribute, then
    /// append each character to the current attribute's value. Otherwise, emit
    /// each character as a character token."
    pub(super) fn flush_code_points_consumed_as_character_reference(&mut self) {
        let buffer = std::mem::take(&mut self.temporary_buffer);
        self.character_reference_output(&buffer);
    }

    fn character_reference_output(&mut self, s: &str) {
        if self.is_consumed_as_part_of_attribute() {
            for c in s.chars() {
                self.append_to_attribute_value(c);
            }
        } else {
            self.emit_characters(s);
        }
    }

    /// [§ 13.2.5.72 Character reference state](https://html.spec.whatwg.org/multipage/parsing.html#character-reference-state)
    pub(super) fn handle_character_reference_state(&mut self) {
        // "Set the temporary buffer to the empty string. Append a U+0026
        // AMPERSAND (&) character to the temporary buffer."
        self.temporary_buffer.clear();
        self.temporary_buffer.push('&');

        match self.current_input_character {
            // "ASCII alphanumeric: Reconsume in the named character reference state."
            Some(c) if c.is_ascii_alphanumeric() => {
                self.unconsume();
                self.switch_state(TokenizerState::NamedCharacterReference);
            }
            // "U+0023 NUMBER SIGN (#): Append the current input character to the
            // temporary buffer. Switch to the numeric character reference state."
            Some('#') => {
                self.temporary_buffer.push('#');
                self.switch_state(TokenizerState::NumericCharacterReference);
            }
            // "Anything else: Flush code points consumed as a character
            // reference. Reconsume in the return state."
            _ => {
                self.flush_code_points_consumed_as_character_reference();
                self.reconsume_in_return_state();
            }
        }
    }

    /// [§ 13.2.5.73 Named character reference state](https://html.spec.whatwg.org/multipage/parsing.html#named-character-reference-state)
    ///
    /// "Consume the maximum number of characters possible, where the consumed
    /// characters are one of the identifiers in the first column of the named
    /// character references table."
    ///
    /// The matcher reads while some table name still continues with the next
    /// character, so it never reads further than the longest name. Anything
    /// read past the longest complete name goes back to the input.
    pub(super) fn handle_named_character_reference_state(&mut self) {
        let mut matcher = NAMED_CHARACTER_REFERENCES.matcher();
        while let Some(c) = self.input.peek() {
            if !matcher.feed(c) {
                break;
            }
            let _ = self.input.next();
        }
        for c in matcher.overshoot().chars().rev() {
            self.input.pushback(c);
        }

        // "Otherwise: Flush code points consumed as a character reference.
        // Switch to the ambiguous ampersand state."
        let Some((name, replacement)) = matcher.longest_match() else {
            self.flush_code_points_consumed_as_character_reference();
            self.switch_state(TokenizerState::AmbiguousAmpersand);
            return;
        };

        self.temporary_buffer.push_str(name);
        let ends_with_semicolon = name.ends_with(';');

        // "If the character reference was consumed as part of an attribute,
        // and the last character matched is not a U+003B SEMICOLON character
        // (;), and the next input character is either a U+003D EQUALS SIGN
        // character (=) or an ASCII alphanumeric, then, for historical reasons,
        // flush code points consumed as a character reference and switch to
        // the return state."
        if self.is_consumed_as_part_of_attribute()
            && !ends_with_semicolon
            && self
                .input
                .peek()
                .is_some_and(|c| c == '=' || c.is_ascii_alphanumeric())
        {
            self.flush_code_points_consumed_as_character_reference();
            self.switch_to_return_state();
            return;
        }

        // "If the last character matched is not a U+003B SEMICOLON character
        // (;), then this is a missing-semicolon-after-character-reference
        // parse error."
        if !ends_with_semicolon {
            self.parse_error(ParseError::MissingSemicolonAfterCharacterReference);
        }

        // "Set the temporary buffer to the empty string. Append one or two
        // characters corresponding to the character reference name to the
        // temporary buffer. Flush code points consumed as a character
        // reference. Switch to the return state."
        self.temporary_buffer.clear();
        self.temporary_buffer.push_str(replacement);
        self.flush_code_points_consumed_as_character_reference();
        self.switch_to_return_state();
    }

    /// [§ 13.2.5.74 Ambiguous ampersand state](https://html.spec.whatwg.org/multipage/parsing.html#ambiguous-ampersand-state)
    pub(super) fn handle_ambiguous_ampersand_state(&mut self) {
        match self.current_input_character {
            Some(c) if c.is_ascii_alphanumeric() => {
                let mut buf = [0; 4];
                self.character_reference_output(c.encode_utf8(&mut buf));
            }
            // "U+003B SEMICOLON (;): This is an unknown-named-character-reference
            // parse error. Reconsume in the return state."
            Some(';') => {
                self.parse_error(ParseError::UnknownNamedCharacterReference);
                self.reconsume_in_return_state();
            }
            _ => self.reconsume_in_return_state(),
        }
    }

    /// [§ 13.2.5.75 Numeric character reference state](https://html.spec.whatwg.org/multipage/parsing.html#numeric-character-reference-state)
    pub(super) fn handle_numeric_character_reference_state(&mut self) {
        // "Set the character reference code to zero (0)."
        self.character_reference_code = 0;
        match self.current_input_character {
            Some(c @ ('x' | 'X')) => {
                self.temporary_buffer.push(c);
                self.switch_state(TokenizerState::HexadecimalCharacterReferenceStart);
            }
            _ => self.reconsume_in(TokenizerState::DecimalCharacterReferenceStart),
        }
    }

    /// [§ 13.2.5.76 Hexadecimal character reference start state](https://html.spec.whatwg.org/multipage/parsing.html#hexadecimal-character-reference-start-state)
    pub(super) fn handle_hexadecimal_character_reference_start_state(&mut self) {
        match self.current_input_character {
            Some(c) if c.is_ascii_hexdigit() => {
                self.reconsume_in(TokenizerState::HexadecimalCharacterReference);
            }
            _ => self.absence_of_digits(),
        }
    }

    /// [§ 13.2.5.77 Decimal character reference start state](https://html.spec.whatwg.org/multipage/parsing.html#decimal-character-reference-start-state)
    pub(super) fn handle_decimal_character_reference_start_state(&mut self) {
        match self.current_input_character {
            Some(c) if c.is_ascii_digit() => {
                self.reconsume_in(TokenizerState::DecimalCharacterReference);
            }
            _ => self.absence_of_digits(),
        }
    }

    /// "This is an absence-of-digits-in-numeric-character-reference parse
    /// error. Flush code points consumed as a character reference. Reconsume
    /// in the return state."
    fn absence_of_digits(&mut self) {
        self.parse_error(ParseError::AbsenceOfDigitsInNumericCharacterReference);
        self.flush_code_points_consumed_as_character_reference();
        self.reconsume_in_return_state();
    }

    /// [§ 13.2.5.78 Hexadecimal character reference state](https://html.spec.whatwg.org/multipage/parsing.html#hexadecimal-character-reference-state)
    pub(super) fn handle_hexadecimal_character_reference_state(&mut self) {
        self.accumulate_digit(16);
    }

    /// [§ 13.2.5.79 Decimal character reference state](https://html.spec.whatwg.org/multipage/parsing.html#decimal-character-reference-state)
    pub(super) fn handle_decimal_character_reference_state(&mut self) {
        self.accumulate_digit(10);
    }

    /// "Multiply the character reference code by `radix`. Add a numeric
    /// version of the current input character to the character reference
    /// code."
    ///
    /// "U+003B SEMICOLON: Switch to the numeric character reference end state."
    ///
    /// "Anything else: This is a missing-semicolon-after-character-reference
    /// parse error. Reconsume in the numeric character reference end state."
    fn accumulate_digit(&mut self, radix: u32) {
        match self.current_input_character {
            Some(c) if c.is_digit(radix) => {
                let digit = c.to_digit(radix).unwrap_or(0);
                // Once past the Unicode range the value only needs to stay
                // past it; clamping keeps long digit runs from overflowing.
                self.character_reference_code = (self.character_reference_code * radix + digit)
                    .min(MAX_CODE_POINT + 1);
            }
            Some(';') => self.switch_state(TokenizerState::NumericCharacterReferenceEnd),
            _ => {
                self.parse_error(ParseError::MissingSemicolonAfterCharacterReference);
                // The end state reads nothing, so the current character stays
                // in the input for the return state.
                self.unconsume();
                self.switch_state(TokenizerState::NumericCharacterReferenceEnd);
            }
        }
    }

    /// [§ 13.2.5.80 Numeric character reference end state](https://html.spec.whatwg.org/multipage/parsing.html#numeric-character-reference-end-state)
    pub(super) fn handle_numeric_character_reference_end_state(&mut self) {
        let (c, error) = resolve_numeric_reference(self.character_reference_code);
        if let Some(error) = error {
            self.parse_error(error);
        }
        // "Set the temporary buffer to the empty string. Append a code point
        // equal to the character reference code to the temporary buffer. Flush
        // code points consumed as a character reference. Switch to the return
        // state."
        self.temporary_buffer.clear();
        self.temporary_buffer.push(c);
        self.flush_code_points_consumed_as_character_reference();
        self.switch_to_return_state();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn null_and_out_of_range_become_replacement_character() {
        assert_eq!(
            resolve_numeric_reference(0),
            ('\u{FFFD}', Some(ParseError::NullCharacterReference))
        );
        assert_eq!(
            resolve_numeric_reference(0x11_0000),
            (
                '\u{FFFD}',
                Some(ParseError::CharacterReferenceOutsideUnicodeRange)
            )
        );
        assert_eq!(
            resolve_numeric_reference(0xD800),
            ('\u{FFFD}', Some(ParseError::SurrogateCharacterReference))
        );
    }

    #[test]
    fn c1_controls_map_through_windows_1252() {
        assert_eq!(
            resolve_numeric_reference(0x80),
            ('\u{20AC}', Some(ParseError::ControlCharacterReference))
        );
        // 0x81 has no table entry and stays a control.
        assert_eq!(
            resolve_numeric_reference(0x81),
            ('\u{81}', Some(ParseError::ControlCharacterReference))
        );
    }

    #[test]
    fn whitespace_controls_pass_but_cr_is_reported() {
        assert_eq!(resolve_numeric_reference(0x0A), ('\n', None));
        assert_eq!(
            resolve_numeric_reference(0x0D),
            ('\r', Some(ParseError::ControlCharacterReference))
        );
    }

    #[test]
    fn noncharacters_pass_through_with_error() {
        assert_eq!(
            resolve_numeric_reference(0xFFFF),
            ('\u{FFFF}', Some(ParseError::NoncharacterCharacterReference))
        );
        assert_eq!(resolve_numeric_reference(0x41), ('A', None));
    }
}
