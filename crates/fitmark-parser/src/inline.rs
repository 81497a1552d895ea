//! Inline token scanner.
//!
//! Turns the text of one block into a sequence of [`Inline`] nodes. At each
//! position the matchers are tried in a fixed priority order, each anchored
//! at that position:
//!
//! 1. mention `@[Name](type:id)`
//! 2. image `![alt](src)`
//! 3. link `[text](href)`
//! 4. bold `**x**` / `__x__`
//! 5. italic `*x*` / `_x_`
//! 6. code `` `x` ``
//!
//! Bold runs before italic so a single-character marker never eats half of a
//! doubled one. Text between constructs becomes `Text`; a leading character
//! that matches nothing is kept as literal text and the scan moves on by one
//! character, so every input terminates and nothing is dropped.

use fitmark_core::{EmphasisMarker, Inline};
use regex::Regex;
use std::sync::LazyLock;

use crate::mention;

/// Image: ![alt](src)
static IMAGE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^!\[([^\]]*)\]\(([^)]+)\)").unwrap());

/// Link: [text](href)
static LINK: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^\[([^\]]+)\]\(([^)]+)\)").unwrap());

/// Inline code: `code`
static CODE: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"^`([^`]+)`").unwrap());

/// Characters that can start a construct
const LEADING: [char; 6] = ['@', '!', '[', '*', '_', '`'];

/// A matcher returns the node and the number of bytes it consumed.
type Matcher = fn(&str) -> Option<(Inline, usize)>;

/// Matchers in priority order
const MATCHERS: [Matcher; 6] = [
    match_mention,
    match_image,
    match_link,
    match_bold,
    match_italic,
    match_code,
];

#[inline]
fn is_leading(c: char) -> bool {
    LEADING.contains(&c)
}

#[inline]
fn is_line_break(b: u8) -> bool {
    b == b'\n'
}

/// Scan block text into inline nodes.
///
/// Adjacent literal text is merged into a single `Text` node.
///
/// # Example
/// ```
/// use fitmark_core::{EntityReference, Inline};
/// use fitmark_parser::scan_inlines;
///
/// let inlines = scan_inlines("Great **work** on @[Bicep Curl](exercise:ex_123) today!");
/// assert_eq!(
///     inlines,
///     vec![
///         Inline::text("Great "),
///         Inline::bold(vec![Inline::text("work")]),
///         Inline::text(" on "),
///         Inline::mention(EntityReference::exercise("Bicep Curl", "ex_123")),
///         Inline::text(" today!"),
///     ]
/// );
/// ```
pub fn scan_inlines(text: &str) -> Vec<Inline> {
    let mut nodes = Vec::new();
    let mut literal = String::new();
    let mut pos = 0;

    while pos < text.len() {
        let rest = &text[pos..];

        if let Some((node, consumed)) = MATCHERS.iter().find_map(|matcher| matcher(rest)) {
            flush_text(&mut literal, &mut nodes);
            nodes.push(node);
            pos += consumed;
            continue;
        }

        let Some(current) = rest.chars().next() else {
            break;
        };

        if is_leading(current) {
            // Tried and failed: keep it literally and step past it
            literal.push(current);
            pos += current.len_utf8();
            continue;
        }

        let skip = rest.find(is_leading).unwrap_or(rest.len());
        literal.push_str(&rest[..skip]);
        pos += skip;
    }

    flush_text(&mut literal, &mut nodes);
    nodes
}

fn flush_text(literal: &mut String, nodes: &mut Vec<Inline>) {
    if !literal.is_empty() {
        nodes.push(Inline::Text {
            value: std::mem::take(literal),
        });
    }
}

fn match_mention(rest: &str) -> Option<(Inline, usize)> {
    let (reference, len) = mention::match_prefix(rest)?;
    Some((Inline::Mention { reference }, len))
}

fn match_image(rest: &str) -> Option<(Inline, usize)> {
    if !rest.starts_with("![") {
        return None;
    }
    let caps = IMAGE.captures(rest)?;
    Some((
        Inline::Image {
            alt: caps[1].to_string(),
            src: caps[2].to_string(),
        },
        caps.get(0)?.end(),
    ))
}

fn match_link(rest: &str) -> Option<(Inline, usize)> {
    if !rest.starts_with('[') {
        return None;
    }
    let caps = LINK.captures(rest)?;
    let text = &caps[1];
    Some((
        Inline::Link {
            text: text.to_string(),
            href: caps[2].to_string(),
            children: scan_inlines(text),
        },
        caps.get(0)?.end(),
    ))
}

/// `(\*\*|__)(.+?)\1`: shortest non-empty body on one line, closed by the
/// same doubled marker.
fn match_bold(rest: &str) -> Option<(Inline, usize)> {
    let marker = EmphasisMarker::from_char(rest.chars().next()?)?;
    let delimiter = match marker {
        EmphasisMarker::Asterisk => "**",
        EmphasisMarker::Underscore => "__",
    };
    let body = rest.strip_prefix(delimiter)?;

    let first = body.chars().next()?;
    let search_from = first.len_utf8();
    let close = search_from + body[search_from..].find(delimiter)?;
    let content = &body[..close];
    if content.bytes().any(is_line_break) {
        return None;
    }

    Some((
        Inline::Bold {
            marker,
            children: scan_inlines(content),
        },
        delimiter.len() * 2 + close,
    ))
}

/// `(\*|_)(?!\1)(.+?)\1(?!\1)`: a single marker not followed by itself,
/// the shortest non-empty body on one line, then a single marker not
/// followed by itself.
fn match_italic(rest: &str) -> Option<(Inline, usize)> {
    let opening = rest.chars().next()?;
    let marker = EmphasisMarker::from_char(opening)?;
    let body = &rest[opening.len_utf8()..];

    let first = body.chars().next()?;
    if first == opening {
        return None;
    }

    let bytes = body.as_bytes();
    let delimiter = opening as u8;
    let mut at = first.len_utf8();
    if is_line_break(bytes[0]) {
        return None;
    }

    while at < bytes.len() {
        let b = bytes[at];
        if is_line_break(b) {
            return None;
        }
        if b == delimiter && bytes.get(at + 1) != Some(&delimiter) {
            return Some((
                Inline::Italic {
                    marker,
                    children: scan_inlines(&body[..at]),
                },
                at + 2,
            ));
        }
        at += 1;
    }

    None
}

fn match_code(rest: &str) -> Option<(Inline, usize)> {
    if !rest.starts_with('`') {
        return None;
    }
    let caps = CODE.captures(rest)?;
    Some((Inline::code(&caps[1]), caps.get(0)?.end()))
}

/// Re-emit the markup a run of inline nodes was scanned from.
///
/// For scanner output this reproduces the input exactly.
pub fn to_markup(inlines: &[Inline]) -> String {
    let mut out = String::new();
    for inline in inlines {
        write_markup(inline, &mut out);
    }
    out
}

fn write_markup(inline: &Inline, out: &mut String) {
    match inline {
        Inline::Text { value } => out.push_str(value),
        Inline::Mention { reference } => out.push_str(&mention::encode(reference)),
        Inline::Image { alt, src } => {
            out.push_str("![");
            out.push_str(alt);
            out.push_str("](");
            out.push_str(src);
            out.push(')');
        }
        Inline::Link { text, href, .. } => {
            out.push('[');
            out.push_str(text);
            out.push_str("](");
            out.push_str(href);
            out.push(')');
        }
        Inline::Bold { marker, children } => {
            let c = marker.as_char();
            out.push(c);
            out.push(c);
            for child in children {
                write_markup(child, out);
            }
            out.push(c);
            out.push(c);
        }
        Inline::Italic { marker, children } => {
            out.push(marker.as_char());
            for child in children {
                write_markup(child, out);
            }
            out.push(marker.as_char());
        }
        Inline::Code { value } => {
            out.push('`');
            out.push_str(value);
            out.push('`');
        }
    }
}
