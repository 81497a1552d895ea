//! # Fitmark Render
//!
//! Render dispatch for parsed fitmark documents.
//!
//! - [`RenderSink`] receives structural calls; [`render_document`] walks a
//!   document and drives it
//! - [`HtmlSink`] builds escaped HTML, delegating video embeds and mention
//!   tokens to host widget renderers
//! - [`PlainTextSink`] builds plain text
//! - [`DetailSurface`] resolves mention detail asynchronously with at most
//!   one request in flight
//!
//! ## Quick Start
//!
//! ```
//! use fitmark_core::RenderConfig;
//! use fitmark_render::render_html;
//!
//! let html = render_html("# Arms\n@[Bicep Curl](exercise:ex_123)", &RenderConfig::default());
//! assert!(html.starts_with("<h1>Arms</h1>\n<p><button"));
//! assert!(html.contains("data-entity-id=\"ex_123\">Bicep Curl</button>"));
//! ```

pub mod dispatch;
pub mod html;
pub mod plain;
pub mod resolution;

pub use dispatch::{RenderSink, render_block, render_document, render_inlines};
pub use html::{
    DataAttributeMentions, DataAttributeVideos, HtmlSink, MentionRenderer, VideoEmbedRenderer,
    is_safe_url,
};
pub use plain::PlainTextSink;
pub use resolution::{DetailState, DetailSurface, InMemoryResolver, MentionResolver};

use fitmark_core::{Document, RenderConfig};
use fitmark_parser::ParseEngine;

/// Parse `text` with the configured back end and render it as HTML.
pub fn render_html(text: &str, config: &RenderConfig) -> String {
    let doc = ParseEngine::new(config.backend).parse(text);
    document_to_html(&doc, config)
}

/// Render an already parsed document as HTML.
pub fn document_to_html(doc: &Document, config: &RenderConfig) -> String {
    let mut sink = HtmlSink::from_config(config);
    render_document(doc, &mut sink);
    sink.finish()
}

/// Render an already parsed document as plain text.
pub fn document_to_plain_text(doc: &Document) -> String {
    let mut sink = PlainTextSink::new();
    render_document(doc, &mut sink);
    sink.finish()
}
