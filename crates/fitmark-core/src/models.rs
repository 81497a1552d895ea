//! Core data models for fitmark content.
//!
//! These types are designed to be:
//! - **Serializable**: All types derive Serialize/Deserialize
//! - **Debuggable**: Derive Debug for easy inspection
//! - **Comparable**: Derive PartialEq so parse results can be asserted directly
//! - **Type-Safe**: Enums replace magic strings
//!
//! Trees are rebuilt on every parse. Nothing here carries identity across
//! render passes; order inside a [`Document`] is the only stable property.

use serde::{Deserialize, Serialize};
use std::fmt;

// ============================================================================
// Entity references (mentions)
// ============================================================================

/// Kind of domain record a mention points at.
///
/// The four known kinds form a closed set. Anything else is kept verbatim in
/// [`EntityType::Unknown`] so the token still parses, renders with a fallback
/// style and re-encodes byte-for-byte.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum EntityType {
    Exercise,
    Anatomy,
    Guide,
    Section,
    Unknown(String),
}

impl EntityType {
    /// The known entity types, in catalog order.
    pub const KNOWN: [EntityType; 4] = [
        EntityType::Exercise,
        EntityType::Anatomy,
        EntityType::Guide,
        EntityType::Section,
    ];

    /// Wire name used inside `@[Name](type:id)`
    pub fn as_str(&self) -> &str {
        match self {
            Self::Exercise => "exercise",
            Self::Anatomy => "anatomy",
            Self::Guide => "guide",
            Self::Section => "section",
            Self::Unknown(raw) => raw,
        }
    }

    /// Whether this is one of the four known kinds
    pub fn is_known(&self) -> bool {
        !matches!(self, Self::Unknown(_))
    }
}

impl From<&str> for EntityType {
    fn from(raw: &str) -> Self {
        match raw {
            "exercise" => Self::Exercise,
            "anatomy" => Self::Anatomy,
            "guide" => Self::Guide,
            "section" => Self::Section,
            other => Self::Unknown(other.to_string()),
        }
    }
}

impl From<String> for EntityType {
    fn from(raw: String) -> Self {
        match raw.as_str() {
            "exercise" | "anatomy" | "guide" | "section" => Self::from(raw.as_str()),
            _ => Self::Unknown(raw),
        }
    }
}

impl From<EntityType> for String {
    fn from(entity_type: EntityType) -> Self {
        match entity_type {
            EntityType::Unknown(raw) => raw,
            known => known.as_str().to_string(),
        }
    }
}

impl fmt::Display for EntityType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A reference to a domain record, as stored inside document text.
///
/// `display_name` is a snapshot taken when the mention was authored. It may
/// drift from the record's current name; renderers show it as-is and only
/// go back to the record for drawer detail.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct EntityReference {
    pub display_name: String,
    pub entity_type: EntityType,
    pub entity_id: String,
}

impl EntityReference {
    /// Create a new entity reference
    pub fn new(
        display_name: impl Into<String>,
        entity_type: impl Into<EntityType>,
        entity_id: impl Into<String>,
    ) -> Self {
        Self {
            display_name: display_name.into(),
            entity_type: entity_type.into(),
            entity_id: entity_id.into(),
        }
    }

    /// Shorthand for an exercise reference
    pub fn exercise(display_name: impl Into<String>, entity_id: impl Into<String>) -> Self {
        Self::new(display_name, EntityType::Exercise, entity_id)
    }

    /// Shorthand for an anatomy reference
    pub fn anatomy(display_name: impl Into<String>, entity_id: impl Into<String>) -> Self {
        Self::new(display_name, EntityType::Anatomy, entity_id)
    }

    /// The `(entity_type, entity_id)` pair used to resolve detail
    pub fn key(&self) -> (&EntityType, &str) {
        (&self.entity_type, &self.entity_id)
    }
}

// ============================================================================
// Inline nodes
// ============================================================================

/// Delimiter character used for bold or italic text.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum EmphasisMarker {
    /// `*` / `**`
    Asterisk,
    /// `_` / `__`
    Underscore,
}

impl EmphasisMarker {
    pub fn as_char(self) -> char {
        match self {
            Self::Asterisk => '*',
            Self::Underscore => '_',
        }
    }

    pub fn from_char(c: char) -> Option<Self> {
        match c {
            '*' => Some(Self::Asterisk),
            '_' => Some(Self::Underscore),
            _ => None,
        }
    }
}

/// A span-level node inside a block.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "lowercase")]
pub enum Inline {
    /// Literal text
    Text { value: String },
    /// Entity mention `@[Name](type:id)`; the name is never re-parsed
    Mention { reference: EntityReference },
    /// Image `![alt](src)`
    Image { alt: String, src: String },
    /// Link `[text](href)`; `children` holds the scanned label
    Link {
        text: String,
        href: String,
        children: Vec<Inline>,
    },
    /// Bold text (`**text**` or `__text__`)
    Bold {
        marker: EmphasisMarker,
        children: Vec<Inline>,
    },
    /// Italic text (`*text*` or `_text_`)
    Italic {
        marker: EmphasisMarker,
        children: Vec<Inline>,
    },
    /// Inline code (`` `code` ``)
    Code { value: String },
}

impl Inline {
    pub fn text(value: impl Into<String>) -> Self {
        Self::Text {
            value: value.into(),
        }
    }

    pub fn mention(reference: EntityReference) -> Self {
        Self::Mention { reference }
    }

    pub fn code(value: impl Into<String>) -> Self {
        Self::Code {
            value: value.into(),
        }
    }

    pub fn image(alt: impl Into<String>, src: impl Into<String>) -> Self {
        Self::Image {
            alt: alt.into(),
            src: src.into(),
        }
    }

    /// Bold with `**` markers
    pub fn bold(children: Vec<Inline>) -> Self {
        Self::Bold {
            marker: EmphasisMarker::Asterisk,
            children,
        }
    }

    /// Italic with `*` marker
    pub fn italic(children: Vec<Inline>) -> Self {
        Self::Italic {
            marker: EmphasisMarker::Asterisk,
            children,
        }
    }

    /// Child nodes of styled containers (empty for leaves)
    pub fn children(&self) -> &[Inline] {
        match self {
            Self::Link { children, .. }
            | Self::Bold { children, .. }
            | Self::Italic { children, .. } => children,
            _ => &[],
        }
    }

    /// Extract the visible text of this node.
    ///
    /// Links contribute their label, images their alt text and mentions
    /// their display name.
    ///
    /// # Example
    /// ```
    /// use fitmark_core::{EntityReference, Inline};
    ///
    /// let bold = Inline::bold(vec![
    ///     Inline::text("Train "),
    ///     Inline::mention(EntityReference::exercise("Squat", "ex_1")),
    /// ]);
    /// assert_eq!(bold.to_plain_text(), "Train Squat");
    /// ```
    #[must_use]
    pub fn to_plain_text(&self) -> String {
        match self {
            Self::Text { value } | Self::Code { value } => value.clone(),
            Self::Mention { reference } => reference.display_name.clone(),
            Self::Image { alt, .. } => alt.clone(),
            Self::Link { children, .. }
            | Self::Bold { children, .. }
            | Self::Italic { children, .. } => plain_text(children),
        }
    }

    /// Visit this node and every descendant in document order.
    pub fn walk<'a>(&'a self, visit: &mut impl FnMut(&'a Inline)) {
        visit(self);
        for child in self.children() {
            child.walk(visit);
        }
    }
}

/// Concatenate the visible text of a run of inline nodes.
pub fn plain_text(inlines: &[Inline]) -> String {
    inlines.iter().map(Inline::to_plain_text).collect()
}

// ============================================================================
// Blocks
// ============================================================================

/// Layout of a video embed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum VideoMode {
    /// `!video[id]`
    Single,
    /// `!videos[a, b, c]`
    Grid,
}

/// A top-level structural unit of a document.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "camelCase")]
pub enum Block {
    /// `# ` to `#### `
    Heading { level: u8, inlines: Vec<Inline> },
    /// `---` or `***`
    HorizontalRule,
    /// `!video[id]` or `!videos[id, ...]`
    VideoEmbed { ids: Vec<String>, mode: VideoMode },
    /// `- item`, `* item` or `1. item`
    ListItem {
        ordered: bool,
        #[serde(default, skip_serializing_if = "Option::is_none")]
        number: Option<u64>,
        inlines: Vec<Inline>,
    },
    /// Blank line, rendered as vertical space
    BlankSpacer,
    /// Anything else
    Paragraph { inlines: Vec<Inline> },
}

impl Block {
    /// Inline content of text-bearing blocks (empty otherwise)
    pub fn inlines(&self) -> &[Inline] {
        match self {
            Self::Heading { inlines, .. }
            | Self::ListItem { inlines, .. }
            | Self::Paragraph { inlines } => inlines,
            Self::HorizontalRule | Self::VideoEmbed { .. } | Self::BlankSpacer => &[],
        }
    }

    /// Extract the visible text of this block.
    #[must_use]
    pub fn to_plain_text(&self) -> String {
        plain_text(self.inlines())
    }
}

/// An ordered sequence of blocks; order is render order.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Document {
    pub blocks: Vec<Block>,
}

impl Document {
    pub fn new(blocks: Vec<Block>) -> Self {
        Self { blocks }
    }

    pub fn len(&self) -> usize {
        self.blocks.len()
    }

    pub fn is_empty(&self) -> bool {
        self.blocks.is_empty()
    }

    pub fn iter(&self) -> std::slice::Iter<'_, Block> {
        self.blocks.iter()
    }

    /// Every mention in the document, in document order.
    pub fn mentions(&self) -> Vec<&EntityReference> {
        let mut found = Vec::new();
        for block in &self.blocks {
            for inline in block.inlines() {
                inline.walk(&mut |node| {
                    if let Inline::Mention { reference } = node {
                        found.push(reference);
                    }
                });
            }
        }
        found
    }

    /// Every video id embedded in the document, in document order.
    pub fn video_ids(&self) -> Vec<&str> {
        self.blocks
            .iter()
            .filter_map(|block| match block {
                Block::VideoEmbed { ids, .. } => Some(ids),
                _ => None,
            })
            .flatten()
            .map(String::as_str)
            .collect()
    }

    /// Plain text of the whole document, one line per block.
    #[must_use]
    pub fn to_plain_text(&self) -> String {
        self.blocks
            .iter()
            .map(Block::to_plain_text)
            .collect::<Vec<_>>()
            .join("\n")
    }
}

impl<'a> IntoIterator for &'a Document {
    type Item = &'a Block;
    type IntoIter = std::slice::Iter<'a, Block>;

    fn into_iter(self) -> Self::IntoIter {
        self.blocks.iter()
    }
}

// ============================================================================
// Line index
// ============================================================================

/// Pre-computed line starts for O(log n) line/column lookup.
///
/// Build once per buffer, then use for all position lookups.
///
/// # Example
/// ```
/// use fitmark_core::LineIndex;
///
/// let index = LineIndex::new("Line 1\nLine 2\nLine 3");
/// assert_eq!(index.line_col(7), (2, 1));
/// ```
#[derive(Debug, Clone)]
pub struct LineIndex {
    /// Byte offsets where each line starts (line 1 = index 0)
    line_starts: Vec<usize>,
}

impl LineIndex {
    /// Build line index in O(n)
    pub fn new(content: &str) -> Self {
        let mut line_starts = vec![0];
        for (i, ch) in content.char_indices() {
            if ch == '\n' {
                line_starts.push(i + 1);
            }
        }
        Self { line_starts }
    }

    /// Get (line, column) for a byte offset via binary search.
    ///
    /// Line numbers start at 1, column numbers start at 1. Columns are in bytes.
    pub fn line_col(&self, offset: usize) -> (usize, usize) {
        let line_idx = self.line_starts.partition_point(|&start| start <= offset);
        let line = line_idx.max(1);
        let line_start = self
            .line_starts
            .get(line_idx.saturating_sub(1))
            .copied()
            .unwrap_or(0);
        (line, offset - line_start + 1)
    }

    /// Get the byte offset where a line starts.
    pub fn line_start(&self, line: usize) -> Option<usize> {
        if line == 0 {
            return None;
        }
        self.line_starts.get(line - 1).copied()
    }

    /// Get total number of lines.
    pub fn line_count(&self) -> usize {
        self.line_starts.len()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_entity_type_round_trip() {
        for known in EntityType::KNOWN {
            assert_eq!(EntityType::from(known.as_str()), known);
            assert!(known.is_known());
        }

        let unknown = EntityType::from("workout");
        assert_eq!(unknown, EntityType::Unknown("workout".to_string()));
        assert_eq!(unknown.as_str(), "workout");
        assert!(!unknown.is_known());
    }

    #[test]
    fn test_entity_type_is_case_sensitive() {
        assert_eq!(
            EntityType::from("Exercise"),
            EntityType::Unknown("Exercise".to_string())
        );
    }

    #[test]
    fn test_entity_reference_serde() {
        let reference = EntityReference::anatomy("Biceps Brachii", "biceps_brachii");
        let json = serde_json::to_value(&reference).unwrap();
        assert_eq!(
            json,
            serde_json::json!({
                "displayName": "Biceps Brachii",
                "entityType": "anatomy",
                "entityId": "biceps_brachii",
            })
        );

        let back: EntityReference = serde_json::from_value(json).unwrap();
        assert_eq!(back, reference);
    }

    #[test]
    fn test_inline_plain_text() {
        let link = Inline::Link {
            text: "the *guide*".to_string(),
            href: "/guides/1".to_string(),
            children: vec![
                Inline::text("the "),
                Inline::italic(vec![Inline::text("guide")]),
            ],
        };
        assert_eq!(link.to_plain_text(), "the guide");
        assert_eq!(Inline::image("Form", "/img.png").to_plain_text(), "Form");
    }

    #[test]
    fn test_document_mentions_in_order() {
        let doc = Document::new(vec![
            Block::Paragraph {
                inlines: vec![
                    Inline::mention(EntityReference::exercise("Squat", "ex_1")),
                    Inline::bold(vec![Inline::mention(EntityReference::anatomy(
                        "Quads", "quads",
                    ))]),
                ],
            },
            Block::HorizontalRule,
            Block::ListItem {
                ordered: false,
                number: None,
                inlines: vec![Inline::mention(EntityReference::new(
                    "Intro",
                    EntityType::Section,
                    "s1",
                ))],
            },
        ]);

        let names: Vec<_> = doc
            .mentions()
            .iter()
            .map(|r| r.display_name.as_str())
            .collect();
        assert_eq!(names, vec!["Squat", "Quads", "Intro"]);
    }

    #[test]
    fn test_document_video_ids() {
        let doc = Document::new(vec![
            Block::VideoEmbed {
                ids: vec!["a".to_string()],
                mode: VideoMode::Single,
            },
            Block::BlankSpacer,
            Block::VideoEmbed {
                ids: vec!["b".to_string(), "c".to_string()],
                mode: VideoMode::Grid,
            },
        ]);
        assert_eq!(doc.video_ids(), vec!["a", "b", "c"]);
    }

    #[test]
    fn test_block_serde_tagging() {
        let block = Block::Heading {
            level: 2,
            inlines: vec![Inline::text("Warmup")],
        };
        let json = serde_json::to_value(&block).unwrap();
        assert_eq!(json["type"], "heading");
        assert_eq!(json["level"], 2);
        assert_eq!(json["inlines"][0]["type"], "text");
    }

    #[test]
    fn test_line_index_multiline() {
        let index = LineIndex::new("Line 1\nLine 2\nLine 3");
        assert_eq!(index.line_count(), 3);
        assert_eq!(index.line_col(0), (1, 1));
        assert_eq!(index.line_col(7), (2, 1));
        assert_eq!(index.line_col(13), (2, 7));
        assert_eq!(index.line_start(3), Some(14));
        assert_eq!(index.line_start(0), None);
    }

    #[test]
    fn test_line_index_trailing_newline() {
        let index = LineIndex::new("Line 1\n");
        assert_eq!(index.line_count(), 2);
        assert_eq!(index.line_col(7), (2, 1));
    }
}
