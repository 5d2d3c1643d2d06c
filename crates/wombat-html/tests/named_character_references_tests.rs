//! Integration tests for named character reference lookup.

use wombat_html::tokenizer::named_character_references::{
    NAMED_CHARACTER_REFERENCES, any_entity_has_prefix, lookup_entity,
};

#[test]
fn test_lookup_common_entities() {
    assert_eq!(lookup_entity("amp;"), Some("&"));
    assert_eq!(lookup_entity("lt;"), Some("<"));
    assert_eq!(lookup_entity("gt;"), Some(">"));
    assert_eq!(lookup_entity("quot;"), Some("\""));
    assert_eq!(lookup_entity("nbsp;"), Some("\u{00A0}"));
}

#[test]
fn test_lookup_legacy_entities() {
    // Legacy entities without semicolon
    assert_eq!(lookup_entity("amp"), Some("&"));
    assert_eq!(lookup_entity("lt"), Some("<"));
    assert_eq!(lookup_entity("gt"), Some(">"));
}

#[test]
fn test_lookup_unknown_entity() {
    assert_eq!(lookup_entity("notarealentity;"), None);
    assert_eq!(lookup_entity(""), None);
}

#[test]
fn test_prefix_matching() {
    assert!(any_entity_has_prefix("a")); // amp, apos, alpha, etc.
    assert!(any_entity_has_prefix("am")); // amp
    assert!(any_entity_has_prefix("amp")); // amp, amp;
    assert!(any_entity_has_prefix("amp;")); // amp;
    assert!(!any_entity_has_prefix("ampx")); // nothing
    assert!(!any_entity_has_prefix("xyz")); // nothing
}

#[test]
fn test_table_is_complete() {
    assert_eq!(NAMED_CHARACTER_REFERENCES.len(), 2231);
    assert_eq!(
        NAMED_CHARACTER_REFERENCES.longest_key_len(),
        "CounterClockwiseContourIntegral;".len()
    );
}

#[test]
fn test_multi_code_point_entity() {
    // &NotEqualTilde; expands to two code points
    assert_eq!(lookup_entity("NotEqualTilde;"), Some("\u{2242}\u{0338}"));
}

#[test]
fn test_matcher_reports_longest_complete_key() {
    let mut matcher = NAMED_CHARACTER_REFERENCES.matcher();
    for c in "notin".chars() {
        assert!(matcher.feed(c));
    }
    // "notin" is a prefix of "notin;" and friends, but the only complete key
    // seen so far is the legacy "not".
    assert_eq!(matcher.longest_match(), Some(("not", &"\u{AC}")));
    assert_eq!(matcher.overshoot(), "in");
}
