//! # Fitmark
//!
//! Markdown dialect for fitness content: exercise and anatomy mentions,
//! video embeds, and a mention autocomplete for editors.
//!
//! This crate re-exports the workspace crates:
//!
//! - [`core`]: document model, detail payloads, errors, configuration
//! - [`parser`]: mention codec, block classifier, inline scanner, parse engine
//! - [`editor`]: `@` autocomplete reducer and caret location
//! - [`render`]: render dispatch, HTML and plain-text sinks, detail surface
//!
//! ## Example
//!
//! ```
//! use fitmark::prelude::*;
//!
//! let doc = parse_document("Great **work** on @[Bicep Curl](exercise:ex_123) today!");
//! assert_eq!(doc.mentions()[0].entity_id, "ex_123");
//!
//! let html = document_to_html(&doc, &RenderConfig::default());
//! assert!(html.contains("<strong>work</strong>"));
//! ```

pub mod output;

pub use fitmark_core as core;
pub use fitmark_editor as editor;
pub use fitmark_parser as parser;
pub use fitmark_render as render;

pub use output::{OutputFormat, format_blocks, format_document, format_editor_state};

/// Re-export commonly used types
pub mod prelude {
    pub use crate::output::OutputFormat;
    pub use fitmark_core::prelude::*;
    pub use fitmark_editor::prelude::*;
    pub use fitmark_parser::{
        BlockKind, BlockSpan, ParseEngine, classify_blocks, decode_mention, encode_mention,
        find_mentions, parse_document, parse_document_with,
    };
    pub use fitmark_render::{
        DetailState, DetailSurface, HtmlSink, InMemoryResolver, MentionResolver, PlainTextSink,
        RenderSink, document_to_html, document_to_plain_text, render_document, render_html,
    };
}
