//! Mention codec: `@[Display Name](entityType:entityId)`
//!
//! This is the single grammar for mentions. The inline scanner, the
//! placeholder pre-pass and the editor's commit step all go through it.

use fitmark_core::{EntityReference, EntityType};
use regex::{Captures, Regex};
use std::ops::Range;
use std::sync::LazyLock;

/// Unanchored pattern, for finding every mention in a text
pub(crate) static MENTION: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"@\[([^\]]+)\]\(([^:]+):([^)]+)\)").unwrap());

/// Same pattern anchored at the start of the haystack
static MENTION_PREFIX: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^@\[([^\]]+)\]\(([^:]+):([^)]+)\)").unwrap());

/// Same pattern anchored at both ends, for whole-token decoding
static MENTION_TOKEN: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^@\[([^\]]+)\]\(([^:]+):([^)]+)\)$").unwrap());

/// A mention located in a larger text.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MentionMatch {
    pub reference: EntityReference,
    /// Byte range of the encoded token
    pub range: Range<usize>,
}

/// Encode a reference into its persisted token.
///
/// # Example
/// ```
/// use fitmark_core::EntityReference;
/// use fitmark_parser::encode_mention;
///
/// let token = encode_mention(&EntityReference::exercise("Bicep Curl", "ex_123"));
/// assert_eq!(token, "@[Bicep Curl](exercise:ex_123)");
/// ```
pub fn encode(reference: &EntityReference) -> String {
    format!(
        "@[{}]({}:{})",
        reference.display_name, reference.entity_type, reference.entity_id
    )
}

/// Decode a complete token. Returns `None` unless the whole input is one mention.
///
/// # Example
/// ```
/// use fitmark_core::EntityType;
/// use fitmark_parser::decode_mention;
///
/// let reference = decode_mention("@[Quads](anatomy:quadriceps)").unwrap();
/// assert_eq!(reference.entity_type, EntityType::Anatomy);
/// assert!(decode_mention("@[Oops(exercise:x1)").is_none());
/// ```
pub fn decode(token: &str) -> Option<EntityReference> {
    MENTION_TOKEN.captures(token).map(|caps| from_captures(&caps))
}

/// Whether `encode` followed by `decode` reproduces this reference.
///
/// Display names may not contain `]`, types may not contain `:` and ids may
/// not contain `)`; none of the three may be empty.
pub fn is_encodable(reference: &EntityReference) -> bool {
    let entity_type = reference.entity_type.as_str();
    !reference.display_name.is_empty()
        && !reference.display_name.contains(']')
        && !entity_type.is_empty()
        && !entity_type.contains(':')
        && !reference.entity_id.is_empty()
        && !reference.entity_id.contains(')')
}

/// Match a mention at the very start of `text`, returning it with the
/// number of bytes it spans.
pub(crate) fn match_prefix(text: &str) -> Option<(EntityReference, usize)> {
    if !text.starts_with("@[") {
        return None;
    }
    let caps = MENTION_PREFIX.captures(text)?;
    let len = caps.get(0)?.end();
    Some((from_captures(&caps), len))
}

/// Find every mention in `text`, left to right, non-overlapping.
///
/// # Example
/// ```
/// use fitmark_parser::find_mentions;
///
/// let found = find_mentions("@[A](guide:g1) and @[B](section:s2)");
/// assert_eq!(found.len(), 2);
/// assert_eq!(found[1].range, 19..35);
/// ```
pub fn find_mentions(text: &str) -> Vec<MentionMatch> {
    if !text.contains("@[") {
        return Vec::new();
    }

    MENTION
        .captures_iter(text)
        .filter_map(|caps| {
            let full = caps.get(0)?;
            Some(MentionMatch {
                reference: from_captures(&caps),
                range: full.range(),
            })
        })
        .collect()
}

pub(crate) fn from_captures(caps: &Captures<'_>) -> EntityReference {
    let group = |i| caps.get(i).map(|m| m.as_str()).unwrap_or_default();
    EntityReference {
        display_name: group(1).to_string(),
        entity_type: EntityType::from(group(2)),
        entity_id: group(3).to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_encode() {
        let reference = EntityReference::anatomy("Biceps Brachii", "biceps_brachii");
        assert_eq!(encode(&reference), "@[Biceps Brachii](anatomy:biceps_brachii)");
    }

    #[test]
    fn test_decode_known_types() {
        for (raw, expected) in [
            ("exercise", EntityType::Exercise),
            ("anatomy", EntityType::Anatomy),
            ("guide", EntityType::Guide),
            ("section", EntityType::Section),
        ] {
            let token = format!("@[Name]({}:id_1)", raw);
            let reference = decode(&token).unwrap();
            assert_eq!(reference.entity_type, expected);
            assert_eq!(reference.entity_id, "id_1");
            assert_eq!(reference.display_name, "Name");
        }
    }

    #[test]
    fn test_decode_unknown_type_still_parses() {
        let reference = decode("@[Leg Day](workout:w_9)").unwrap();
        assert_eq!(
            reference.entity_type,
            EntityType::Unknown("workout".to_string())
        );
        assert_eq!(encode(&reference), "@[Leg Day](workout:w_9)");
    }

    #[test]
    fn test_decode_rejects_malformed() {
        assert!(decode("@[Oops(exercise:x1)").is_none());
        assert!(decode("@[](exercise:x1)").is_none());
        assert!(decode("@[Name](exercise:)").is_none());
        assert!(decode("@[Name](exercise)").is_none());
        assert!(decode("[Name](exercise:x1)").is_none());
        assert!(decode("@[Name](exercise:x1) trailing").is_none());
    }

    #[test]
    fn test_id_may_contain_colon() {
        let reference = decode("@[Name](guide:g:1)").unwrap();
        assert_eq!(reference.entity_type, EntityType::Guide);
        assert_eq!(reference.entity_id, "g:1");
    }

    #[test]
    fn test_display_name_keeps_markers() {
        let reference = decode("@[*Quad*riceps](anatomy:quads)").unwrap();
        assert_eq!(reference.display_name, "*Quad*riceps");
    }

    #[test]
    fn test_match_prefix_reports_length() {
        let (reference, len) = match_prefix("@[A](guide:g1) rest").unwrap();
        assert_eq!(reference.entity_id, "g1");
        assert_eq!(len, "@[A](guide:g1)".len());
        assert!(match_prefix("x @[A](guide:g1)").is_none());
    }

    #[test]
    fn test_is_encodable() {
        assert!(is_encodable(&EntityReference::exercise("Curl", "ex_1")));
        assert!(!is_encodable(&EntityReference::exercise("Curl]", "ex_1")));
        assert!(!is_encodable(&EntityReference::exercise("Curl", "ex)1")));
        assert!(!is_encodable(&EntityReference::exercise("", "ex_1")));
        assert!(!is_encodable(&EntityReference::new("Curl", "a:b", "ex_1")));
    }

    #[test]
    fn test_find_mentions_skips_broken_tokens() {
        assert!(find_mentions("@[Oops(exercise:x1) stays literal").is_empty());

        let found = find_mentions("mail a@b.com about @[Ok](exercise:x2)");
        assert_eq!(found.len(), 1);
        assert_eq!(found[0].reference.entity_id, "x2");
        assert_eq!(found[0].range, 19..37);
    }
}
