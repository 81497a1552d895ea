//! Mention placeholders for the markdown-library back end.
//!
//! pulldown-cmark has no notion of mentions, and `@[Name](type:id)` would be
//! read as an `@` followed by a link. Before handing text to it, every
//! mention is swapped for an opaque sentinel; afterwards each sentinel found
//! in the produced tree is swapped back for a `Mention` node.
//!
//! Sentinels are `U+E000 <index> U+E001`. Both are private-use code points,
//! which markdown never treats as syntax, so they come through verbatim.
//! The index counter starts at zero for every pass, so identical input
//! always yields identical sentinels and identical output.

use fitmark_core::{EmphasisMarker, EntityReference, Inline, plain_text};
use pulldown_cmark::{Event, Options, Parser, Tag, TagEnd};
use regex::{Captures, Regex};
use std::sync::LazyLock;

use crate::mention::{MENTION, from_captures};

const SENTINEL_OPEN: char = '\u{E000}';
const SENTINEL_CLOSE: char = '\u{E001}';

/// Sentinel: U+E000 digits U+E001
static SENTINEL: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\x{E000}([0-9]+)\x{E001}").unwrap());

#[derive(Debug, Clone, PartialEq, Eq)]
struct Entry {
    reference: EntityReference,
    /// Token exactly as written in the source
    source: String,
}

/// Index -> mention table for one parse pass.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct MentionPlaceholders {
    entries: Vec<Entry>,
}

impl MentionPlaceholders {
    /// Replace every mention in `text` with a sentinel, numbering from zero.
    ///
    /// # Example
    /// ```
    /// use fitmark_parser::MentionPlaceholders;
    ///
    /// let (table, text) = MentionPlaceholders::extract("Hi @[A](guide:g1)!");
    /// assert_eq!(table.len(), 1);
    /// assert_eq!(text, format!("Hi {}!", MentionPlaceholders::sentinel(0)));
    /// ```
    pub fn extract(text: &str) -> (Self, String) {
        let mut entries = Vec::new();

        if !text.contains("@[") {
            return (Self { entries }, text.to_string());
        }

        let replaced = MENTION.replace_all(text, |caps: &Captures<'_>| {
            entries.push(Entry {
                reference: from_captures(caps),
                source: caps[0].to_string(),
            });
            Self::sentinel(entries.len() - 1)
        });
        let replaced = replaced.into_owned();

        log::debug!("Replaced {} mentions with placeholders", entries.len());
        (Self { entries }, replaced)
    }

    /// The sentinel string for `index`
    pub fn sentinel(index: usize) -> String {
        format!("{}{}{}", SENTINEL_OPEN, index, SENTINEL_CLOSE)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Reference stored under `index`
    pub fn get(&self, index: usize) -> Option<&EntityReference> {
        self.entries.get(index).map(|entry| &entry.reference)
    }

    /// Swap sentinels in an inline tree back for mentions.
    ///
    /// Sentinels in text become `Mention` nodes. Sentinels inside code
    /// spans, link targets, link labels and image attributes are put back
    /// as the literal token, since those positions are not rendered as
    /// widgets. Unknown sentinels are left untouched.
    pub fn restore(&self, inlines: Vec<Inline>) -> Vec<Inline> {
        let mut out = Vec::with_capacity(inlines.len());

        for inline in inlines {
            match inline {
                Inline::Text { value } => self.split_text(&value, &mut out),
                Inline::Code { value } => out.push(Inline::Code {
                    value: self.restore_literal(&value),
                }),
                Inline::Image { alt, src } => out.push(Inline::Image {
                    alt: self.restore_literal(&alt),
                    src: self.restore_literal(&src),
                }),
                Inline::Link {
                    text,
                    href,
                    children,
                } => out.push(Inline::Link {
                    text: self.restore_literal(&text),
                    href: self.restore_literal(&href),
                    children: self.restore(children),
                }),
                Inline::Bold { marker, children } => out.push(Inline::Bold {
                    marker,
                    children: self.restore(children),
                }),
                Inline::Italic { marker, children } => out.push(Inline::Italic {
                    marker,
                    children: self.restore(children),
                }),
                mention @ Inline::Mention { .. } => out.push(mention),
            }
        }

        out
    }

    /// Replace sentinels in a plain string with the original tokens.
    pub fn restore_literal(&self, value: &str) -> String {
        if !value.contains(SENTINEL_OPEN) {
            return value.to_string();
        }

        SENTINEL
            .replace_all(value, |caps: &Captures<'_>| {
                self.entry_for(caps)
                    .map(|entry| entry.source.clone())
                    .unwrap_or_else(|| caps[0].to_string())
            })
            .into_owned()
    }

    fn entry_for(&self, caps: &Captures<'_>) -> Option<&Entry> {
        let index = caps.get(1)?.as_str().parse::<usize>().ok()?;
        self.entries.get(index)
    }

    fn split_text(&self, value: &str, out: &mut Vec<Inline>) {
        let mut last = 0;

        for caps in SENTINEL.captures_iter(value) {
            let (Some(full), Some(entry)) = (caps.get(0), self.entry_for(&caps)) else {
                continue;
            };
            push_text(out, &value[last..full.start()]);
            out.push(Inline::Mention {
                reference: entry.reference.clone(),
            });
            last = full.end();
        }

        push_text(out, &value[last..]);
    }
}

/// Append text, merging into a preceding `Text` node.
fn push_text(out: &mut Vec<Inline>, value: &str) {
    if value.is_empty() {
        return;
    }
    if let Some(Inline::Text { value: previous }) = out.last_mut() {
        previous.push_str(value);
    } else {
        out.push(Inline::text(value));
    }
}

// ============================================================================
// pulldown-cmark event processing
// ============================================================================

/// An open container while folding events into a tree.
enum Frame {
    Root,
    Bold(EmphasisMarker),
    Italic(EmphasisMarker),
    Link(String),
    Image(String),
    CodeBlock,
}

/// Render block text through pulldown-cmark and fold the events into
/// inline nodes. Block-level containers (paragraphs, list wrappers, quotes)
/// are transparent; only their inline content is kept.
pub fn markdown_inlines(text: &str) -> Vec<Inline> {
    let mut stack: Vec<(Frame, Vec<Inline>)> = vec![(Frame::Root, Vec::new())];

    for (event, range) in Parser::new_ext(text, Options::empty()).into_offset_iter() {
        match event {
            Event::Start(Tag::Strong) => {
                stack.push((Frame::Bold(marker_at(text, range.start)), Vec::new()));
            }
            Event::Start(Tag::Emphasis) => {
                stack.push((Frame::Italic(marker_at(text, range.start)), Vec::new()));
            }
            Event::Start(Tag::Link { dest_url, .. }) => {
                stack.push((Frame::Link(dest_url.to_string()), Vec::new()));
            }
            Event::Start(Tag::Image { dest_url, .. }) => {
                stack.push((Frame::Image(dest_url.to_string()), Vec::new()));
            }
            Event::Start(Tag::CodeBlock(_)) => {
                stack.push((Frame::CodeBlock, Vec::new()));
            }
            Event::End(
                TagEnd::Strong
                | TagEnd::Emphasis
                | TagEnd::Link
                | TagEnd::Image
                | TagEnd::CodeBlock,
            ) => close_frame(&mut stack),
            Event::Text(value) | Event::Html(value) | Event::InlineHtml(value) => {
                if let Some((_, children)) = stack.last_mut() {
                    push_text(children, &value);
                }
            }
            Event::Code(value) => {
                if let Some((_, children)) = stack.last_mut() {
                    children.push(Inline::code(value.to_string()));
                }
            }
            Event::SoftBreak | Event::HardBreak => {
                if let Some((_, children)) = stack.last_mut() {
                    push_text(children, "\n");
                }
            }
            _ => {}
        }
    }

    // Unbalanced events should not happen; fold anything left into the root.
    while stack.len() > 1 {
        close_frame(&mut stack);
    }
    stack.pop().map(|(_, children)| children).unwrap_or_default()
}

fn close_frame(stack: &mut Vec<(Frame, Vec<Inline>)>) {
    if stack.len() < 2 {
        return;
    }
    let Some((frame, children)) = stack.pop() else {
        return;
    };

    let node = match frame {
        Frame::Root => return,
        Frame::Bold(marker) => Inline::Bold { marker, children },
        Frame::Italic(marker) => Inline::Italic { marker, children },
        Frame::Link(href) => Inline::Link {
            text: plain_text(&children),
            href,
            children,
        },
        Frame::Image(src) => Inline::Image {
            alt: plain_text(&children),
            src,
        },
        Frame::CodeBlock => Inline::code(plain_text(&children).trim_end_matches('\n')),
    };

    if let Some((_, parent)) = stack.last_mut() {
        parent.push(node);
    }
}

fn marker_at(text: &str, offset: usize) -> EmphasisMarker {
    text.get(offset..)
        .and_then(|rest| rest.chars().next())
        .and_then(EmphasisMarker::from_char)
        .unwrap_or(EmphasisMarker::Asterisk)
}

/// Full markdown-library pass: placeholders, pulldown-cmark, restore.
///
/// # Example
/// ```
/// use fitmark_core::{EntityReference, Inline};
/// use fitmark_parser::render_with_placeholders;
///
/// let inlines = render_with_placeholders("**Hold** @[Plank](exercise:ex_9)");
/// assert_eq!(
///     inlines,
///     vec![
///         Inline::bold(vec![Inline::text("Hold")]),
///         Inline::text(" "),
///         Inline::mention(EntityReference::exercise("Plank", "ex_9")),
///     ]
/// );
/// ```
pub fn render_with_placeholders(text: &str) -> Vec<Inline> {
    let (table, substituted) = MentionPlaceholders::extract(text);
    let inlines = markdown_inlines(&substituted);
    if table.is_empty() {
        return inlines;
    }
    table.restore(inlines)
}
