//! The character source feeding the tokenizer.
//!
//! [§ 13.2.3 The input byte stream](https://html.spec.whatwg.org/multipage/parsing.html#the-input-byte-stream)
//!
//! Decoding bytes into code points (BOM sniffing, `<meta charset>`) happens
//! before this point. The tokenizer only sees Unicode scalar values.

/// A pull-based stream of decoded characters.
///
/// The tokenizer consumes one character at a time and occasionally needs to
/// back up, e.g. after trying to match `DOCTYPE` or a named character
/// reference that turned out shorter than what was read. Pushback is a stack:
/// characters come back out of [`CharSource::next`] in the reverse order they
/// were pushed.
pub trait CharSource {
    /// Look at the next character without consuming it.
    fn peek(&mut self) -> Option<char>;

    /// Consume and return the next character. `None` means end of input.
    fn next(&mut self) -> Option<char>;

    /// Return a character to the front of the stream.
    fn pushback(&mut self, c: char);
}

/// A [`CharSource`] over an in-memory string.
///
/// [§ 13.2.3.5 Preprocessing the input stream](https://html.spec.whatwg.org/multipage/parsing.html#preprocessing-the-input-stream)
///
/// "Before the tokenization stage, the input stream must be preprocessed by
/// normalizing newlines. Thus, newlines in HTML DOMs are represented by U+000A
/// LF characters, and there are never any U+000D CR characters in the input to
/// the tokenization stage."
#[derive(Debug, Clone)]
pub struct StringSource {
    chars: Vec<char>,
    pos: usize,
    pushed_back: Vec<char>,
}

impl StringSource {
    /// Create a source over `input`, normalizing CRLF and lone CR to LF.
    #[must_use]
    pub fn new(input: &str) -> Self {
        let mut chars = Vec::with_capacity(input.len());
        let mut iter = input.chars().peekable();
        while let Some(c) = iter.next() {
            if c == '\r' {
                // "replace every U+000D CR U+000A LF code point pair with a
                // single U+000A LF code point, then replace every remaining
                // U+000D CR code point with a U+000A LF code point."
                let _ = iter.next_if_eq(&'\n');
                chars.push('\n');
            } else {
                chars.push(c);
            }
        }
        Self {
            chars,
            pos: 0,
            pushed_back: Vec::new(),
        }
    }

    /// Number of characters consumed so far, net of pushback.
    #[must_use]
    pub fn position(&self) -> usize {
        self.pos.saturating_sub(self.pushed_back.len())
    }
}

impl CharSource for StringSource {
    fn peek(&mut self) -> Option<char> {
        self.pushed_back
            .last()
            .copied()
            .or_else(|| self.chars.get(self.pos).copied())
    }

    fn next(&mut self) -> Option<char> {
        if let Some(c) = self.pushed_back.pop() {
            return Some(c);
        }
        let c = self.chars.get(self.pos).copied()?;
        self.pos += 1;
        Some(c)
    }

    fn pushback(&mut self, c: char) {
        self.pushed_back.push(c);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn drain(source: &mut impl CharSource) -> String {
        std::iter::from_fn(|| source.next()).collect()
    }

    #[test]
    fn newlines_are_normalized() {
        let mut source = StringSource::new("a\r\nb\rc\n\r\n");
        assert_eq!(drain(&mut source), "a\nb\nc\n\n");
    }

    #[test]
    fn pushback_is_a_stack() {
        let mut source = StringSource::new("xyz");
        assert_eq!(source.next(), Some('x'));
        assert_eq!(source.next(), Some('y'));
        source.pushback('y');
        source.pushback('x');
        assert_eq!(source.peek(), Some('x'));
        assert_eq!(source.position(), 0);
        assert_eq!(drain(&mut source), "xyz");
        assert_eq!(source.next(), None);
    }
}
