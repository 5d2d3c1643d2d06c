//! Named character reference lookup.
//!
//! [§ 13.5 Named character references](https://html.spec.whatwg.org/multipage/named-characters.html#named-character-references)
//!
//! The full table of 2,231 names, searched incrementally by the named
//! character reference state through [`KeyLookup`].

use super::entities::ENTITIES;
use crate::lookup::{CaseMatching, KeyLookup};

/// The named character reference table. Keys omit the leading `&`.
pub static NAMED_CHARACTER_REFERENCES: KeyLookup<&'static str> =
    KeyLookup::new(ENTITIES, CaseMatching::Exact);

/// Look up a named character reference.
///
/// Returns the replacement string if `name` is exactly an entry in the table.
/// `name` does not include the leading `&`; legacy names match with or
/// without their trailing `;`.
///
/// ```
/// use wombat_html::tokenizer::named_character_references::lookup_entity;
///
/// assert_eq!(lookup_entity("amp;"), Some("&"));
/// assert_eq!(lookup_entity("amp"), Some("&"));
/// assert_eq!(lookup_entity("xyz;"), None);
/// ```
#[must_use]
pub fn lookup_entity(name: &str) -> Option<&'static str> {
    NAMED_CHARACTER_REFERENCES.get(name).copied()
}

/// Check if any entity name starts with the given prefix.
///
/// ```
/// use wombat_html::tokenizer::named_character_references::any_entity_has_prefix;
///
/// assert!(any_entity_has_prefix("am"));
/// assert!(!any_entity_has_prefix("xyz"));
/// ```
#[must_use]
pub fn any_entity_has_prefix(prefix: &str) -> bool {
    NAMED_CHARACTER_REFERENCES.has_prefix(prefix)
}
