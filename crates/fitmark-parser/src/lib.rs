//! # Fitmark Parser
//!
//! Parser for the fitmark micro-markup: inline markdown, line-level block
//! constructs, entity mentions and video directives.
//!
//! This crate provides:
//! - The mention codec (`@[Display Name](entityType:entityId)`)
//! - A line-oriented block classifier (headings, lists, rules, spacers, videos)
//! - A priority-ordered inline scanner (mention, image, link, bold, italic, code)
//! - A `pulldown-cmark` back end that carries mentions through as placeholders
//!
//! ## Architecture
//!
//! ### Phase 1: block classification
//! Each line is tagged by the first matching rule. Spans keep their byte
//! range, so the classified spans tile the input exactly.
//!
//! ### Phase 2: inline pass
//! The text of each block goes through an [`InlineBackend`]:
//! - [`ScannerBackend`] tries the matchers at each position in fixed order
//!   and emits anything unmatched as literal text
//! - [`MarkdownBackend`] swaps mentions for sentinels, renders through
//!   pulldown-cmark and swaps the sentinels back
//!
//! Both phases are total: malformed input degrades to text, never to an error.
//!
//! ## Quick Start
//!
//! ```
//! use fitmark_core::{Block, EntityReference, Inline};
//! use fitmark_parser::parse_document;
//!
//! let doc = parse_document("Great **work** on @[Bicep Curl](exercise:ex_123) today!");
//! assert_eq!(
//!     doc.blocks[0],
//!     Block::Paragraph {
//!         inlines: vec![
//!             Inline::text("Great "),
//!             Inline::bold(vec![Inline::text("work")]),
//!             Inline::text(" on "),
//!             Inline::mention(EntityReference::exercise("Bicep Curl", "ex_123")),
//!             Inline::text(" today!"),
//!         ],
//!     }
//! );
//! ```
//!
//! ### Individual passes
//!
//! ```
//! use fitmark_parser::{classify_blocks, find_mentions, scan_inlines, to_markup};
//!
//! let text = "Hold **@[Plank](exercise:ex_9)** for 60s";
//! assert_eq!(classify_blocks(text).len(), 1);
//! assert_eq!(find_mentions(text).len(), 1);
//! assert_eq!(to_markup(&scan_inlines(text)), text);
//! ```

mod blocks;
mod engine;
mod inline;
mod mention;
mod placeholder;

pub use blocks::{BlockKind, BlockSpan, classify_blocks, classify_line};
pub use engine::{
    InlineBackend, MarkdownBackend, ParseEngine, ScannerBackend, parse_document,
    parse_document_with,
};
pub use inline::{scan_inlines, to_markup};
pub use mention::{
    MentionMatch, decode as decode_mention, encode as encode_mention, find_mentions,
    is_encodable,
};
pub use placeholder::{MentionPlaceholders, markdown_inlines, render_with_placeholders};

// Re-export core types for consumers
pub use fitmark_core::{Block, Document, EntityReference, EntityType, Inline, VideoMode};

/// Convenient prelude for common imports.
pub mod prelude {
    pub use fitmark_core::{
        Backend, Block, Document, EmphasisMarker, EntityReference, EntityType, Inline,
        VideoMode,
    };

    pub use crate::{
        BlockKind, BlockSpan, InlineBackend, MarkdownBackend, MentionPlaceholders, ParseEngine,
        ScannerBackend, classify_blocks, decode_mention, encode_mention, find_mentions,
        parse_document, parse_document_with, scan_inlines, to_markup,
    };
}
