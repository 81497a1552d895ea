//! Property-based tests for the parser
//!
//! These tests check that the mention codec round-trips, that the scanner
//! and classifier never lose input, and that the placeholder pass keeps
//! mentions in order whatever the surrounding renderer does.

use fitmark_core::{EntityReference, EntityType, Inline};
use fitmark_parser::{
    MentionPlaceholders, classify_blocks, decode_mention, encode_mention, is_encodable,
    scan_inlines, to_markup,
};
use proptest::prelude::*;

/// Text biased towards marker characters so constructs actually form
fn markup_strategy() -> impl Strategy<Value = String> {
    prop::collection::vec(
        prop_oneof![
            3 => "[a-z ]{1,6}",
            2 => prop::sample::select(vec![
                "@", "!", "[", "]", "(", ")", "*", "**", "_", "__", "`", ":", "\n", "é", "日本",
            ])
            .prop_map(str::to_string),
            1 => Just("@[Squat](exercise:ex_1)".to_string()),
            1 => Just("[link](https://example.com)".to_string()),
        ],
        0..24,
    )
    .prop_map(|parts| parts.concat())
}

fn entity_type_strategy() -> impl Strategy<Value = EntityType> {
    prop_oneof![
        prop::sample::select(EntityType::KNOWN.to_vec()),
        "[a-z]{1,10}".prop_map(EntityType::from),
    ]
}

fn reference_strategy() -> impl Strategy<Value = EntityReference> {
    (
        "[A-Za-z0-9 *_()@!\\[-]{1,24}",
        entity_type_strategy(),
        "[A-Za-z0-9_:.\\-]{1,16}",
    )
        .prop_map(|(name, entity_type, id)| EntityReference::new(name, entity_type, id))
}

proptest! {
    #[test]
    fn test_mention_round_trip(reference in reference_strategy()) {
        prop_assert!(is_encodable(&reference));
        let token = encode_mention(&reference);
        prop_assert_eq!(decode_mention(&token), Some(reference));
    }

    #[test]
    fn test_scanner_is_lossless(input in markup_strategy()) {
        let inlines = scan_inlines(&input);
        prop_assert_eq!(to_markup(&inlines), input);
    }

    #[test]
    fn test_scanner_terminates_on_arbitrary_text(input in "\\PC{0,64}") {
        let inlines = scan_inlines(&input);
        prop_assert_eq!(to_markup(&inlines), input);
    }

    #[test]
    fn test_scanner_never_emits_adjacent_text(input in markup_strategy()) {
        let inlines = scan_inlines(&input);
        for pair in inlines.windows(2) {
            prop_assert!(!matches!(
                pair,
                [Inline::Text { .. }, Inline::Text { .. }]
            ), "adjacent Text inlines: {:?}", pair);
        }
    }

    #[test]
    fn test_blocks_tile_input(input in markup_strategy()) {
        let spans = classify_blocks(&input);
        let rebuilt: String = spans.iter().map(|s| &input[s.range.clone()]).collect();
        prop_assert_eq!(rebuilt, input);
    }

    #[test]
    fn test_placeholders_survive_reshaping(
        first in reference_strategy(),
        second in reference_strategy(),
        padding in "[ \t\n]{0,4}",
    ) {
        let text = format!(
            "A {} b {} c",
            encode_mention(&first),
            encode_mention(&second)
        );
        let (table, substituted) = MentionPlaceholders::extract(&text);
        prop_assert_eq!(table.len(), 2);

        // A renderer that splits text at every space and wraps each piece.
        let reshaped: Vec<Inline> = substituted
            .split(' ')
            .map(|word| Inline::bold(vec![Inline::text(format!("{}{}", padding, word))]))
            .collect();

        let restored = table.restore(reshaped);
        let mut found = Vec::new();
        for inline in &restored {
            inline.walk(&mut |node| {
                if let Inline::Mention { reference } = node {
                    found.push(reference.clone());
                }
            });
        }
        prop_assert_eq!(found, vec![first, second]);
    }
}
