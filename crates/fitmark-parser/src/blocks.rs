//! Block classifier.
//!
//! A single line-oriented pass that tags every line of a document. Each line
//! is tested against the rules below in order and the first match wins:
//!
//! 1. `!videos[a, b, c]` video grid (whole line)
//! 2. `!video[id]` single video (whole line)
//! 3. `# ` to `#### ` heading (the space is required)
//! 4. `---` / `***` horizontal rule (three or more, nothing else)
//! 5. `- ` / `* ` bullet item
//! 6. `1. ` numbered item
//! 7. blank line
//! 8. paragraph
//!
//! Nothing fails: a line that does not fit a rule falls through to the next
//! one and ends up as paragraph text.

use fitmark_core::VideoMode;
use lazy_static::lazy_static;
use regex::Regex;
use std::ops::Range;

lazy_static! {
    /// Matches !videos[id1, id2, ...]
    static ref VIDEO_GRID: Regex = Regex::new(r"^!videos\[([^\]]+)\]$").unwrap();

    /// Matches !video[id]
    static ref VIDEO_SINGLE: Regex = Regex::new(r"^!video\[([^\]]+)\]$").unwrap();

    /// Matches # through ####, followed by a literal space
    static ref HEADING: Regex = Regex::new(r"^(#{1,4}) ").unwrap();

    /// Matches --- or *** (three or more of one character)
    static ref RULE: Regex = Regex::new(r"^(?:-{3,}|\*{3,})$").unwrap();

    /// Matches 12. followed by whitespace
    static ref NUMBERED: Regex = Regex::new(r"^([0-9]+)\.\s").unwrap();
}

/// Classification of one line.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum BlockKind {
    VideoEmbed { ids: Vec<String>, mode: VideoMode },
    Heading { level: u8 },
    HorizontalRule,
    ListItem { ordered: bool, number: Option<u64> },
    BlankSpacer,
    Paragraph,
}

/// One classified line of a document.
///
/// Spans tile the input: concatenating `&source[span.range]` over all spans
/// reproduces the source exactly.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BlockSpan<'a> {
    pub kind: BlockKind,
    /// The line without its terminator
    pub raw: &'a str,
    /// Inline text of the block (empty for rules, spacers and videos)
    pub content: &'a str,
    /// Byte range of the line including its terminator
    pub range: Range<usize>,
    /// 1-based line number
    pub line: usize,
}

/// Classify every line of `text`.
///
/// # Example
/// ```
/// use fitmark_core::VideoMode;
/// use fitmark_parser::{classify_blocks, BlockKind};
///
/// let spans = classify_blocks("# Plan\n!videos[ex_1, ex_2,ex_3]\n#NoSpace");
/// assert_eq!(spans[0].kind, BlockKind::Heading { level: 1 });
/// assert_eq!(
///     spans[1].kind,
///     BlockKind::VideoEmbed {
///         ids: vec!["ex_1".into(), "ex_2".into(), "ex_3".into()],
///         mode: VideoMode::Grid,
///     }
/// );
/// assert_eq!(spans[2].kind, BlockKind::Paragraph);
/// ```
pub fn classify_blocks(text: &str) -> Vec<BlockSpan<'_>> {
    let mut spans = Vec::new();
    let mut offset = 0;

    for (idx, segment) in text.split_inclusive('\n').enumerate() {
        let line = segment.strip_suffix('\n').unwrap_or(segment);
        let line = line.strip_suffix('\r').unwrap_or(line);
        let (kind, content) = classify_line(line);

        spans.push(BlockSpan {
            kind,
            raw: line,
            content,
            range: offset..offset + segment.len(),
            line: idx + 1,
        });
        offset += segment.len();
    }

    log::debug!("Classified {} lines", spans.len());
    spans
}

/// Classify a single line (without terminator), returning its kind and the
/// slice holding its inline text.
pub fn classify_line(line: &str) -> (BlockKind, &str) {
    if let Some(ids) = video_ids(&VIDEO_GRID, line) {
        return (
            BlockKind::VideoEmbed {
                ids,
                mode: VideoMode::Grid,
            },
            "",
        );
    }

    if let Some(ids) = video_ids(&VIDEO_SINGLE, line) {
        return (
            BlockKind::VideoEmbed {
                ids,
                mode: VideoMode::Single,
            },
            "",
        );
    }

    if let Some(caps) = HEADING.captures(line)
        && let Some(marker) = caps.get(1)
    {
        let level = marker.as_str().len() as u8;
        return (BlockKind::Heading { level }, &line[marker.end() + 1..]);
    }

    if RULE.is_match(line.trim()) {
        return (BlockKind::HorizontalRule, "");
    }

    if let Some(content) = line.strip_prefix("- ").or_else(|| line.strip_prefix("* ")) {
        return (
            BlockKind::ListItem {
                ordered: false,
                number: None,
            },
            content,
        );
    }

    if let Some(caps) = NUMBERED.captures(line)
        && let Some(marker) = caps.get(0)
    {
        let number = caps.get(1).and_then(|m| m.as_str().parse::<u64>().ok());
        // Item text starts after the first ". " in the line
        let content = match line.find(". ") {
            Some(idx) => &line[idx + 2..],
            None => &line[marker.end()..],
        };
        return (
            BlockKind::ListItem {
                ordered: true,
                number,
            },
            content,
        );
    }

    if line.trim().is_empty() {
        return (BlockKind::BlankSpacer, "");
    }

    (BlockKind::Paragraph, line)
}

/// Ids from a video directive, or `None` when the line is not one or names no ids.
fn video_ids(pattern: &Regex, line: &str) -> Option<Vec<String>> {
    if !line.starts_with("!video") {
        return None;
    }

    let caps = pattern.captures(line)?;
    let ids: Vec<String> = caps
        .get(1)?
        .as_str()
        .split(',')
        .map(str::trim)
        .filter(|id| !id.is_empty())
        .map(str::to_string)
        .collect();

    if ids.is_empty() {
        log::trace!("Video directive without ids kept as text: {}", line);
        return None;
    }
    Some(ids)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn kind(line: &str) -> BlockKind {
        classify_line(line).0
    }

    #[test]
    fn test_video_grid() {
        let (kind, content) = classify_line("!videos[ex_1, ex_2,ex_3]");
        assert_eq!(
            kind,
            BlockKind::VideoEmbed {
                ids: vec!["ex_1".to_string(), "ex_2".to_string(), "ex_3".to_string()],
                mode: VideoMode::Grid,
            }
        );
        assert_eq!(content, "");
    }

    #[test]
    fn test_video_grid_drops_empty_ids() {
        assert_eq!(
            kind("!videos[ a ,, b , ]"),
            BlockKind::VideoEmbed {
                ids: vec!["a".to_string(), "b".to_string()],
                mode: VideoMode::Grid,
            }
        );
        assert_eq!(kind("!videos[ , ]"), BlockKind::Paragraph);
    }

    #[test]
    fn test_video_single() {
        assert_eq!(
            kind("!video[ v_42 ]"),
            BlockKind::VideoEmbed {
                ids: vec!["v_42".to_string()],
                mode: VideoMode::Single,
            }
        );
    }

    #[test]
    fn test_video_directive_must_fill_line() {
        assert_eq!(kind("see !video[v1]"), BlockKind::Paragraph);
        assert_eq!(kind("!video[v1] and more"), BlockKind::Paragraph);
        assert_eq!(kind("!video[v1"), BlockKind::Paragraph);
    }

    #[test]
    fn test_headings() {
        for level in 1..=4u8 {
            let line = format!("{} Title", "#".repeat(level as usize));
            let (kind, content) = classify_line(&line);
            assert_eq!(kind, BlockKind::Heading { level });
            assert_eq!(content, "Title");
        }
    }

    #[test]
    fn test_heading_requires_space() {
        assert_eq!(kind("#NoSpace"), BlockKind::Paragraph);
        assert_eq!(kind("##\tTab"), BlockKind::Paragraph);
    }

    #[test]
    fn test_five_hashes_is_paragraph() {
        assert_eq!(kind("##### Too deep"), BlockKind::Paragraph);
    }

    #[test]
    fn test_horizontal_rules() {
        assert_eq!(kind("---"), BlockKind::HorizontalRule);
        assert_eq!(kind("  *****  "), BlockKind::HorizontalRule);
        assert_eq!(kind("--"), BlockKind::Paragraph);
        assert_eq!(kind("-*-"), BlockKind::Paragraph);
    }

    #[test]
    fn test_bullets() {
        let (kind, content) = classify_line("- Warm up");
        assert_eq!(
            kind,
            BlockKind::ListItem {
                ordered: false,
                number: None
            }
        );
        assert_eq!(content, "Warm up");

        let (_, content) = classify_line("* Stretch");
        assert_eq!(content, "Stretch");
        assert_eq!(self::kind("-no space"), BlockKind::Paragraph);
    }

    #[test]
    fn test_spaced_dashes_are_a_bullet() {
        assert_eq!(kind("- - -"), kind("- x"));
        assert_eq!(kind("---"), BlockKind::HorizontalRule);
    }

    #[test]
    fn test_numbered() {
        let (kind, content) = classify_line("10. Compare 1. vs 2.");
        assert_eq!(
            kind,
            BlockKind::ListItem {
                ordered: true,
                number: Some(10)
            }
        );
        assert_eq!(content, "Compare 1. vs 2.");
    }

    #[test]
    fn test_numbered_splits_on_first_dot_space() {
        // Tab after the marker: the first ". " is inside the item text.
        let (_, content) = classify_line("1.\tSee step 2. then rest");
        assert_eq!(content, "then rest");

        let (_, content) = classify_line("3.\tNo dot space");
        assert_eq!(content, "No dot space");
    }

    #[test]
    fn test_blank_lines() {
        assert_eq!(kind(""), BlockKind::BlankSpacer);
        assert_eq!(kind("   \t"), BlockKind::BlankSpacer);
    }

    #[test]
    fn test_spans_tile_input() {
        let text = "# Plan\r\n\n- one\n!video[v1]\ntail";
        let spans = classify_blocks(text);
        assert_eq!(spans.len(), 5);

        let rebuilt: String = spans.iter().map(|s| &text[s.range.clone()]).collect();
        assert_eq!(rebuilt, text);

        assert_eq!(spans[0].raw, "# Plan");
        assert_eq!(spans[0].content, "Plan");
        assert_eq!(spans[1].kind, BlockKind::BlankSpacer);
        assert_eq!(spans[4].line, 5);
        assert_eq!(spans[4].content, "tail");
    }

    #[test]
    fn test_trailing_newline_adds_no_block() {
        assert_eq!(classify_blocks("a\n").len(), 1);
        assert!(classify_blocks("").is_empty());
        assert_eq!(classify_blocks("\n").len(), 1);
    }
}
