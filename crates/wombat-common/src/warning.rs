//! Parser warnings with colored terminal output.
//!
//! Provides deduplication so that a document with thousands of identical
//! parse errors does not flood the terminal. Used by the tokenizer and the
//! tree constructor to report recoverable problems.

use std::collections::HashSet;
use std::sync::{Mutex, PoisonError};

use owo_colors::OwoColorize;

/// Global set of warnings we've already printed (to deduplicate)
static WARNED: Mutex<Option<HashSet<String>>> = Mutex::new(None);

/// Record a warning under `component`, returning `true` the first time this
/// exact message is seen.
fn first_sighting(component: &str, message: &str) -> bool {
    let key = format!("[{component}] {message}");
    WARNED
        .lock()
        .unwrap_or_else(PoisonError::into_inner)
        .get_or_insert_with(HashSet::new)
        .insert(key)
}

/// Warn about a recoverable problem (prints once per unique message).
///
/// # Example
/// ```
/// wombat_common::warning::warn_once("HTML Tokenizer", "eof-in-tag at offset 12");
/// ```
pub fn warn_once(component: &str, message: &str) {
    if first_sighting(component, message) {
        eprintln!("{}", format!("[wombat {component}] ⚠ {message}").yellow());
    }
}

/// Number of distinct warnings recorded since the last [`clear_warnings`].
#[must_use]
pub fn warning_count() -> usize {
    WARNED
        .lock()
        .unwrap_or_else(PoisonError::into_inner)
        .as_ref()
        .map_or(0, HashSet::len)
}

/// Clear all recorded warnings (call before parsing a new document).
pub fn clear_warnings() {
    let mut guard = WARNED.lock().unwrap_or_else(PoisonError::into_inner);
    if let Some(set) = guard.as_mut() {
        set.clear();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn repeated_messages_are_recorded_once() {
        assert!(first_sighting("test-dedupe", "same message"));
        assert!(!first_sighting("test-dedupe", "same message"));
        assert!(first_sighting("test-dedupe", "other message"));
    }
}
