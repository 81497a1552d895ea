//! Output formatting for the `fitmark` command line.
//!
//! Rendered documents come out as HTML, JSON (the parsed tree) or plain
//! text. Block listings and autocomplete sessions have their own compact
//! text layouts.

use fitmark_core::{Document, RenderConfig, Result};
use fitmark_editor::EditorState;
use fitmark_parser::{BlockKind, BlockSpan};
use fitmark_render::{document_to_html, document_to_plain_text};
use std::fmt;
use std::str::FromStr;

/// Output format for `fitmark render`
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum OutputFormat {
    /// HTML fragment (default)
    #[default]
    Html,
    /// Parsed document tree as pretty-printed JSON
    Json,
    /// Plain text
    Text,
}

impl FromStr for OutputFormat {
    type Err = String;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "html" => Ok(OutputFormat::Html),
            "json" => Ok(OutputFormat::Json),
            "text" => Ok(OutputFormat::Text),
            _ => Err(format!(
                "Unknown output format '{}'. Valid options: html, json, text",
                s
            )),
        }
    }
}

impl fmt::Display for OutputFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            OutputFormat::Html => write!(f, "html"),
            OutputFormat::Json => write!(f, "json"),
            OutputFormat::Text => write!(f, "text"),
        }
    }
}

/// Render a parsed document in the requested format.
pub fn format_document(
    doc: &Document,
    format: OutputFormat,
    config: &RenderConfig,
) -> Result<String> {
    match format {
        OutputFormat::Html => Ok(document_to_html(doc, config)),
        OutputFormat::Text => Ok(document_to_plain_text(doc)),
        OutputFormat::Json => serde_json::to_string_pretty(doc).map_err(|e| {
            fitmark_core::Error::other(format!("Failed to serialize document: {}", e))
        }),
    }
}

/// Short label for a classified line
pub fn block_label(kind: &BlockKind) -> String {
    match kind {
        BlockKind::VideoEmbed { ids, mode } => {
            format!("video:{:?}({})", mode, ids.len()).to_lowercase()
        }
        BlockKind::Heading { level } => format!("h{}", level),
        BlockKind::HorizontalRule => "rule".to_string(),
        BlockKind::ListItem {
            ordered: true,
            number,
        } => match number {
            Some(n) => format!("ol:{}", n),
            None => "ol".to_string(),
        },
        BlockKind::ListItem { ordered: false, .. } => "ul".to_string(),
        BlockKind::BlankSpacer => "blank".to_string(),
        BlockKind::Paragraph => "para".to_string(),
    }
}

/// One line per classified span: line number, label, raw text.
pub fn format_blocks(spans: &[BlockSpan<'_>]) -> String {
    let mut output = String::new();
    for span in spans {
        output.push_str(&format!(
            "{:>4}  {:<12} {}\n",
            span.line,
            block_label(&span.kind),
            span.raw
        ));
    }
    output
}

/// Human-readable view of an editor state and its autocomplete session.
pub fn format_editor_state(state: &EditorState) -> String {
    let mut output = String::new();

    match &state.autocomplete {
        None => output.push_str("autocomplete: inactive\n"),
        Some(session) => {
            output.push_str(&format!(
                "autocomplete: active at {} query {:?}\n",
                session.trigger_start, session.query
            ));
            if session.candidates.is_empty() {
                output.push_str("  (no candidates)\n");
            }
            for (i, candidate) in session.candidates.iter().enumerate() {
                let marker = if i == session.selected_index { '>' } else { ' ' };
                output.push_str(&format!(
                    "{} {}. {} ({}:{})\n",
                    marker,
                    i + 1,
                    candidate.display_name,
                    candidate.entity_type,
                    candidate.entity_id
                ));
            }
        }
    }

    output.push_str(&format!("buffer: {:?}\n", state.buffer));
    output.push_str(&format!("cursor: {}\n", state.cursor));
    output
}

#[cfg(test)]
mod tests {
    use super::*;
    use fitmark_core::EntityReference;
    use fitmark_editor::AutocompleteState;
    use fitmark_parser::{classify_blocks, parse_document};

    #[test]
    fn test_output_format_from_str() {
        assert_eq!("HTML".parse::<OutputFormat>().unwrap(), OutputFormat::Html);
        assert_eq!("json".parse::<OutputFormat>().unwrap(), OutputFormat::Json);
        assert!("csv".parse::<OutputFormat>().is_err());
        assert_eq!(OutputFormat::Text.to_string(), "text");
    }

    #[test]
    fn test_format_document_json() {
        let doc = parse_document("!video[v1]");
        let json = format_document(&doc, OutputFormat::Json, &RenderConfig::default()).unwrap();
        let value: serde_json::Value = serde_json::from_str(&json).unwrap();
        assert_eq!(value["blocks"][0]["type"], "videoEmbed");
        assert_eq!(value["blocks"][0]["ids"][0], "v1");
    }

    #[test]
    fn test_format_blocks() {
        let text = "# Plan\n!videos[a, b]\n2. Row\n\n#NoSpace";
        let listing = format_blocks(&classify_blocks(text));
        let lines: Vec<&str> = listing.lines().collect();
        assert_eq!(lines.len(), 5);
        assert_eq!(lines[0], "   1  h1           # Plan");
        assert!(lines[1].contains("video:grid(2)"));
        assert!(lines[2].contains("ol:2"));
        assert!(lines[3].contains("blank"));
        assert!(lines[4].contains("para"));
    }

    #[test]
    fn test_format_editor_state() {
        let state = EditorState {
            buffer: "Try @bic".to_string(),
            cursor: 8,
            autocomplete: Some(AutocompleteState {
                trigger_start: 4,
                query: "bic".to_string(),
                candidates: vec![
                    EntityReference::exercise("Bicep Curl", "ex_123"),
                    EntityReference::anatomy("Biceps Brachii", "biceps_brachii"),
                ],
                selected_index: 1,
            }),
        };
        let text = format_editor_state(&state);
        assert!(text.contains("active at 4 query \"bic\""));
        assert!(text.contains("  1. Bicep Curl (exercise:ex_123)"));
        assert!(text.contains("> 2. Biceps Brachii (anatomy:biceps_brachii)"));
    }
}
