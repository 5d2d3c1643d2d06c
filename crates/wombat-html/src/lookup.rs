//! Incremental longest-match lookup over a sorted static key table.
//!
//! Several tokenizer states have to recognise one of a fixed set of words
//! while reading one character at a time, and back out when the input stops
//! matching:
//!
//! - after `<!`: `--`, `DOCTYPE` or `[CDATA[`
//! - after a DOCTYPE name: `PUBLIC` or `SYSTEM`
//! - after `&`: any of the named character references
//!
//! [`KeyLookup`] holds such a table; [`KeyMatcher`] walks it. Because the
//! table is sorted, every prefix matches a contiguous range of keys, so each
//! step narrows a `lo..hi` window with two binary searches instead of
//! building a trie.

/// How input characters are compared against table keys.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CaseMatching {
    /// Byte-for-byte comparison.
    Exact,
    /// ASCII letters in the input are upper-cased before comparison. Keys in
    /// such a table must already be upper case.
    AsciiInsensitive,
}

impl CaseMatching {
    const fn fold(self, c: char) -> char {
        match self {
            Self::Exact => c,
            Self::AsciiInsensitive => c.to_ascii_uppercase(),
        }
    }
}

/// A static table of ASCII keys, sorted by byte value, with associated values.
#[derive(Debug)]
pub struct KeyLookup<V: 'static> {
    entries: &'static [(&'static str, V)],
    case: CaseMatching,
}

impl<V: 'static> KeyLookup<V> {
    /// Wrap a sorted table.
    #[must_use]
    pub const fn new(entries: &'static [(&'static str, V)], case: CaseMatching) -> Self {
        Self { entries, case }
    }

    /// Number of keys.
    #[must_use]
    pub const fn len(&self) -> usize {
        self.entries.len()
    }

    /// Whether the table has no keys.
    #[must_use]
    pub const fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Length in bytes of the longest key.
    #[must_use]
    pub fn longest_key_len(&self) -> usize {
        self.entries.iter().map(|(k, _)| k.len()).max().unwrap_or(0)
    }

    /// Start an incremental match.
    #[must_use]
    pub const fn matcher(&self) -> KeyMatcher<'_, V> {
        KeyMatcher {
            lookup: self,
            lo: 0,
            hi: self.entries.len(),
            consumed: String::new(),
            longest: None,
        }
    }

    /// Exact lookup of a whole key.
    #[must_use]
    pub fn get(&self, key: &str) -> Option<&V> {
        let mut matcher = self.matcher();
        if key.chars().all(|c| matcher.feed(c)) {
            matcher.exact_match()
        } else {
            None
        }
    }

    /// Whether any key starts with `prefix`.
    #[must_use]
    pub fn has_prefix(&self, prefix: &str) -> bool {
        let mut matcher = self.matcher();
        prefix.chars().all(|c| matcher.feed(c))
    }
}

/// The state of one incremental match against a [`KeyLookup`].
#[derive(Debug)]
pub struct KeyMatcher<'a, V: 'static> {
    lookup: &'a KeyLookup<V>,
    /// Window of entries whose keys start with `consumed`.
    lo: usize,
    hi: usize,
    /// Characters accepted so far, as they appeared in the input.
    consumed: String,
    /// `(byte length of consumed, entry index)` of the longest complete key seen.
    longest: Option<(usize, usize)>,
}

impl<'a, V: 'static> KeyMatcher<'a, V> {
    /// Offer the next input character.
    ///
    /// Returns `true` and accepts the character if at least one key continues
    /// with it. Returns `false` and leaves the matcher unchanged otherwise, so
    /// the caller can stop reading without having to give the character back.
    pub fn feed(&mut self, c: char) -> bool {
        let folded = self.lookup.case.fold(c);
        if !folded.is_ascii() || self.lo >= self.hi {
            return false;
        }
        // Keys are ASCII, so every accepted char is one byte and the byte
        // length of `consumed` is the depth into each key.
        let depth = self.consumed.len();
        let byte = u8::try_from(folded).unwrap_or(u8::MAX);
        let window = &self.lookup.entries[self.lo..self.hi];

        // Keys that end at `depth` sort first within the window; treat the
        // missing byte as smaller than any real one.
        let start = window.partition_point(|(key, _)| {
            key.as_bytes().get(depth).is_none_or(|&b| b < byte)
        });
        let end = window.partition_point(|(key, _)| {
            key.as_bytes().get(depth).is_none_or(|&b| b <= byte)
        });
        if start == end {
            return false;
        }

        self.hi = self.lo + end;
        self.lo += start;
        self.consumed.push(c);
        if self.lookup.entries[self.lo].0.len() == self.consumed.len() {
            self.longest = Some((self.consumed.len(), self.lo));
        }
        true
    }

    /// Whether another character could still extend the match.
    #[must_use]
    pub fn can_continue(&self) -> bool {
        self.entries_in_window()
            .iter()
            .any(|(key, _)| key.len() > self.consumed.len())
    }

    fn entries_in_window(&self) -> &'static [(&'static str, V)] {
        &self.lookup.entries[self.lo..self.hi]
    }

    /// Everything accepted so far, in the input's original case.
    #[must_use]
    pub fn consumed(&self) -> &str {
        &self.consumed
    }

    /// The value for the accepted text, if it is exactly a key.
    #[must_use]
    pub fn exact_match(&self) -> Option<&'a V> {
        match self.longest {
            Some((len, index)) if len == self.consumed.len() => {
                Some(&self.lookup.entries[index].1)
            }
            _ => None,
        }
    }

    /// The longest key that is a prefix of the accepted text, with its value.
    #[must_use]
    pub fn longest_match(&self) -> Option<(&'static str, &'a V)> {
        self.longest.map(|(_, index)| {
            let (key, value) = &self.lookup.entries[index];
            (*key, value)
        })
    }

    /// Accepted characters beyond the longest complete key (all of them if
    /// no key matched). These are the characters a caller must push back.
    #[must_use]
    pub fn overshoot(&self) -> &str {
        let matched = self.longest.map_or(0, |(len, _)| len);
        &self.consumed[matched..]
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    static WORDS: KeyLookup<u8> = KeyLookup::new(
        &[("no", 1), ("not", 2), ("notin;", 3), ("nu", 4)],
        CaseMatching::Exact,
    );

    static KEYWORDS: KeyLookup<u8> = KeyLookup::new(
        &[("PUBLIC", 1), ("SYSTEM", 2)],
        CaseMatching::AsciiInsensitive,
    );

    #[test]
    fn longest_prefix_wins_and_overshoot_is_reported() {
        let mut m = WORDS.matcher();
        for c in "notit".chars() {
            if !m.feed(c) {
                break;
            }
        }
        assert_eq!(m.consumed(), "noti");
        assert_eq!(m.longest_match(), Some(("not", &2)));
        assert_eq!(m.overshoot(), "i");
        assert_eq!(m.exact_match(), None);
    }

    #[test]
    fn rejected_character_leaves_state_alone() {
        let mut m = WORDS.matcher();
        assert!(m.feed('n'));
        assert!(!m.feed('x'));
        assert_eq!(m.consumed(), "n");
        assert!(m.can_continue());
    }

    #[test]
    fn case_insensitive_table_keeps_input_case() {
        let mut m = KEYWORDS.matcher();
        assert!("sYsTeM".chars().all(|c| m.feed(c)));
        assert_eq!(m.exact_match(), Some(&2));
        assert_eq!(m.consumed(), "sYsTeM");
        assert!(!m.can_continue());
    }

    #[test]
    fn whole_key_helpers() {
        assert_eq!(WORDS.get("notin;"), Some(&3));
        assert_eq!(WORDS.get("noti"), None);
        assert!(WORDS.has_prefix("noti"));
        assert!(!WORDS.has_prefix("nox"));
        assert_eq!(WORDS.longest_key_len(), 6);
    }
}
