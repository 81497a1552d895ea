//! Unified parse engine.
//!
//! Classifier first, then one inline pass per block through a pluggable
//! back end. Both back ends share the mention grammar in `mention`, so the
//! direct and the markdown-library paths cannot drift apart.

use fitmark_core::{Backend, Block, Document, Inline};

use crate::blocks::{BlockKind, BlockSpan, classify_blocks};
use crate::inline::scan_inlines;
use crate::placeholder::render_with_placeholders;

/// Turns the text of one block into inline nodes.
pub trait InlineBackend {
    /// Parse `text`. Must be total: malformed input degrades to text.
    fn parse_inlines(&self, text: &str) -> Vec<Inline>;

    /// Short name for logs
    fn name(&self) -> &'static str;
}

/// The built-in priority scanner.
#[derive(Debug, Clone, Copy, Default)]
pub struct ScannerBackend;

impl InlineBackend for ScannerBackend {
    fn parse_inlines(&self, text: &str) -> Vec<Inline> {
        scan_inlines(text)
    }

    fn name(&self) -> &'static str {
        "direct"
    }
}

/// pulldown-cmark with the mention placeholder pre-pass.
#[derive(Debug, Clone, Copy, Default)]
pub struct MarkdownBackend;

impl InlineBackend for MarkdownBackend {
    fn parse_inlines(&self, text: &str) -> Vec<Inline> {
        render_with_placeholders(text)
    }

    fn name(&self) -> &'static str {
        "markdown"
    }
}

impl<F> InlineBackend for F
where
    F: Fn(&str) -> Vec<Inline>,
{
    fn parse_inlines(&self, text: &str) -> Vec<Inline> {
        self(text)
    }

    fn name(&self) -> &'static str {
        "custom"
    }
}

/// Classifier plus inline back end.
pub struct ParseEngine {
    backend: Box<dyn InlineBackend + Send + Sync>,
}

impl std::fmt::Debug for ParseEngine {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ParseEngine")
            .field("backend", &self.backend.name())
            .finish()
    }
}

impl Default for ParseEngine {
    fn default() -> Self {
        Self::new(Backend::Direct)
    }
}

impl ParseEngine {
    /// Create an engine for a configured back end
    pub fn new(backend: Backend) -> Self {
        match backend {
            Backend::Direct => Self::with_backend(ScannerBackend),
            Backend::Markdown => Self::with_backend(MarkdownBackend),
        }
    }

    /// Create an engine around any inline back end
    pub fn with_backend(backend: impl InlineBackend + Send + Sync + 'static) -> Self {
        Self {
            backend: Box::new(backend),
        }
    }

    /// Name of the active back end
    pub fn backend_name(&self) -> &'static str {
        self.backend.name()
    }

    /// Parse a full document. Never fails.
    pub fn parse(&self, text: &str) -> Document {
        let blocks: Vec<Block> = classify_blocks(text)
            .into_iter()
            .map(|span| self.build_block(span))
            .collect();

        log::debug!(
            "Parsed {} blocks with {} back end",
            blocks.len(),
            self.backend.name()
        );
        Document::new(blocks)
    }

    /// Inline pass for a single span.
    pub fn build_block(&self, span: BlockSpan<'_>) -> Block {
        match span.kind {
            BlockKind::VideoEmbed { ids, mode } => Block::VideoEmbed { ids, mode },
            BlockKind::HorizontalRule => Block::HorizontalRule,
            BlockKind::BlankSpacer => Block::BlankSpacer,
            BlockKind::Heading { level } => Block::Heading {
                level,
                inlines: self.backend.parse_inlines(span.content),
            },
            BlockKind::ListItem { ordered, number } => Block::ListItem {
                ordered,
                number,
                inlines: self.backend.parse_inlines(span.content),
            },
            BlockKind::Paragraph => Block::Paragraph {
                inlines: self.backend.parse_inlines(span.content),
            },
        }
    }
}

/// Parse with the direct scanner.
///
/// # Example
/// ```
/// use fitmark_core::Block;
/// use fitmark_parser::parse_document;
///
/// let doc = parse_document("# Leg day\n\n- @[Squat](exercise:ex_1)");
/// assert_eq!(doc.len(), 3);
/// assert!(matches!(doc.blocks[0], Block::Heading { level: 1, .. }));
/// assert_eq!(doc.mentions().len(), 1);
/// ```
pub fn parse_document(text: &str) -> Document {
    ParseEngine::new(Backend::Direct).parse(text)
}

/// Parse with the chosen back end.
pub fn parse_document_with(text: &str, backend: Backend) -> Document {
    ParseEngine::new(backend).parse(text)
}

#[cfg(test)]
mod tests {
    use super::*;
    use fitmark_core::{EntityReference, VideoMode};

    const SAMPLE: &str = "## Upper body\n\
        !videos[ex_1, ex_2]\n\
        1. Start with @[Bicep Curl](exercise:ex_123)\n\
        - Focus on the @[Biceps](anatomy:biceps_brachii)\n\
        \n\
        ---\n\
        Rest **90s** between sets.";

    #[test]
    fn test_engine_builds_every_block_kind() {
        let doc = parse_document(SAMPLE);
        assert_eq!(doc.len(), 7);

        assert!(matches!(doc.blocks[0], Block::Heading { level: 2, .. }));
        assert_eq!(
            doc.blocks[1],
            Block::VideoEmbed {
                ids: vec!["ex_1".to_string(), "ex_2".to_string()],
                mode: VideoMode::Grid,
            }
        );
        assert!(matches!(
            doc.blocks[2],
            Block::ListItem {
                ordered: true,
                number: Some(1),
                ..
            }
        ));
        assert!(matches!(
            doc.blocks[3],
            Block::ListItem { ordered: false, .. }
        ));
        assert_eq!(doc.blocks[4], Block::BlankSpacer);
        assert_eq!(doc.blocks[5], Block::HorizontalRule);
        assert!(matches!(doc.blocks[6], Block::Paragraph { .. }));
    }

    #[test]
    fn test_backends_agree_on_mentions() {
        let direct = parse_document_with(SAMPLE, Backend::Direct);
        let markdown = parse_document_with(SAMPLE, Backend::Markdown);

        let expected = vec![
            EntityReference::exercise("Bicep Curl", "ex_123"),
            EntityReference::anatomy("Biceps", "biceps_brachii"),
        ];
        let direct_mentions: Vec<EntityReference> =
            direct.mentions().into_iter().cloned().collect();
        let markdown_mentions: Vec<EntityReference> =
            markdown.mentions().into_iter().cloned().collect();

        assert_eq!(direct_mentions, expected);
        assert_eq!(markdown_mentions, expected);
    }

    #[test]
    fn test_backends_agree_on_plain_text() {
        let text = "Great **work** on @[Bicep Curl](exercise:ex_123) today!";
        assert_eq!(
            parse_document_with(text, Backend::Direct).to_plain_text(),
            parse_document_with(text, Backend::Markdown).to_plain_text()
        );
    }

    #[test]
    fn test_custom_backend() {
        let engine = ParseEngine::with_backend(|text: &str| vec![Inline::code(text)]);
        assert_eq!(engine.backend_name(), "custom");

        let doc = engine.parse("hello *there*");
        assert_eq!(
            doc.blocks[0],
            Block::Paragraph {
                inlines: vec![Inline::code("hello *there*")]
            }
        );
    }

    #[test]
    fn test_reparse_is_identical() {
        for backend in [Backend::Direct, Backend::Markdown] {
            assert_eq!(
                parse_document_with(SAMPLE, backend),
                parse_document_with(SAMPLE, backend)
            );
        }
    }

    #[test]
    fn test_empty_input() {
        assert!(parse_document("").is_empty());
    }
}
