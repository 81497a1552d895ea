//! HTML output.
//!
//! Structure is rendered directly. Video embeds and mentions are widgets
//! owned by the host page, so they go through [`VideoEmbedRenderer`] and
//! [`MentionRenderer`]. The defaults emit placeholder elements carrying
//! `data-` attributes that a host script hydrates into players and
//! clickable mention tokens.

use fitmark_core::{EntityReference, RenderConfig, VideoMode};
use html_escape::{encode_double_quoted_attribute, encode_text};

use crate::dispatch::RenderSink;

/// Schemes allowed in `href` and `src`; scheme-less targets are relative.
const SAFE_SCHEMES: [&str; 3] = ["http", "https", "mailto"];

/// Whether `url` is relative or uses an allowed scheme.
///
/// Whitespace and control characters are ignored the way browsers ignore
/// them, so `java\tscript:` is still caught.
pub fn is_safe_url(url: &str) -> bool {
    let cleaned: String = url
        .chars()
        .filter(|c| !c.is_ascii_whitespace() && !c.is_control())
        .collect();

    match cleaned.find([':', '/', '?', '#']) {
        Some(end) if cleaned[end..].starts_with(':') => {
            let scheme = cleaned[..end].to_ascii_lowercase();
            SAFE_SCHEMES.contains(&scheme.as_str())
        }
        _ => true,
    }
}

/// Renders a video embed into HTML
pub trait VideoEmbedRenderer {
    fn render_videos(&self, ids: &[String], mode: VideoMode, out: &mut String);
}

/// Renders a mention token into HTML
pub trait MentionRenderer {
    fn render_mention(&self, reference: &EntityReference, out: &mut String);
}

/// `<div class="video-grid" data-mode="grid">` with one child per id.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DataAttributeVideos {
    pub class: String,
}

impl Default for DataAttributeVideos {
    fn default() -> Self {
        Self {
            class: RenderConfig::default().video_grid_class,
        }
    }
}

impl VideoEmbedRenderer for DataAttributeVideos {
    fn render_videos(&self, ids: &[String], mode: VideoMode, out: &mut String) {
        let mode = match mode {
            VideoMode::Single => "single",
            VideoMode::Grid => "grid",
        };
        out.push_str(&format!(
            "<div class=\"{}\" data-mode=\"{}\">",
            encode_double_quoted_attribute(&self.class),
            mode
        ));
        for id in ids {
            out.push_str(&format!(
                "<div class=\"video\" data-video-id=\"{}\"></div>",
                encode_double_quoted_attribute(id)
            ));
        }
        out.push_str("</div>\n");
    }
}

/// `<button class="mention mention-exercise" data-entity-type=.. data-entity-id=..>`
///
/// Entity types outside the known set get the `<prefix>-unknown` class.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DataAttributeMentions {
    pub class_prefix: String,
}

impl Default for DataAttributeMentions {
    fn default() -> Self {
        Self {
            class_prefix: RenderConfig::default().mention_class_prefix,
        }
    }
}

impl MentionRenderer for DataAttributeMentions {
    fn render_mention(&self, reference: &EntityReference, out: &mut String) {
        let kind = if reference.entity_type.is_known() {
            reference.entity_type.as_str()
        } else {
            "unknown"
        };
        let prefix = encode_double_quoted_attribute(&self.class_prefix);

        out.push_str(&format!(
            "<button type=\"button\" class=\"{prefix} {prefix}-{kind}\" data-entity-type=\"{}\" data-entity-id=\"{}\">{}</button>",
            encode_double_quoted_attribute(reference.entity_type.as_str()),
            encode_double_quoted_attribute(&reference.entity_id),
            encode_text(&reference.display_name),
        ));
    }
}

/// Sink that builds an HTML string.
#[derive(Debug, Clone, Default)]
pub struct HtmlSink<V = DataAttributeVideos, M = DataAttributeMentions> {
    out: String,
    videos: V,
    mentions: M,
}

impl HtmlSink {
    /// Sink with the default widget renderers
    pub fn new() -> Self {
        Self::default()
    }

    /// Sink using the class names from `config`
    pub fn from_config(config: &RenderConfig) -> Self {
        Self::with_renderers(
            DataAttributeVideos {
                class: config.video_grid_class.clone(),
            },
            DataAttributeMentions {
                class_prefix: config.mention_class_prefix.clone(),
            },
        )
    }
}

impl<V: VideoEmbedRenderer, M: MentionRenderer> HtmlSink<V, M> {
    /// Sink with host-provided widget renderers
    pub fn with_renderers(videos: V, mentions: M) -> Self {
        Self {
            out: String::new(),
            videos,
            mentions,
        }
    }

    pub fn as_str(&self) -> &str {
        &self.out
    }

    /// Take the rendered HTML
    pub fn finish(self) -> String {
        self.out
    }
}

impl<V: VideoEmbedRenderer, M: MentionRenderer> RenderSink for HtmlSink<V, M> {
    fn start_list(&mut self, ordered: bool, first_number: Option<u64>) {
        match (ordered, first_number) {
            (true, Some(start)) if start != 1 => {
                self.out.push_str(&format!("<ol start=\"{}\">\n", start));
            }
            (true, _) => self.out.push_str("<ol>\n"),
            (false, _) => self.out.push_str("<ul>\n"),
        }
    }

    fn end_list(&mut self, ordered: bool) {
        self.out
            .push_str(if ordered { "</ol>\n" } else { "</ul>\n" });
    }

    fn start_heading(&mut self, level: u8) {
        self.out.push_str(&format!("<h{}>", level));
    }

    fn end_heading(&mut self, level: u8) {
        self.out.push_str(&format!("</h{}>\n", level));
    }

    fn start_paragraph(&mut self) {
        self.out.push_str("<p>");
    }

    fn end_paragraph(&mut self) {
        self.out.push_str("</p>\n");
    }

    fn start_list_item(&mut self, _ordered: bool, _number: Option<u64>) {
        self.out.push_str("<li>");
    }

    fn end_list_item(&mut self) {
        self.out.push_str("</li>\n");
    }

    fn horizontal_rule(&mut self) {
        self.out.push_str("<hr>\n");
    }

    fn spacer(&mut self) {
        self.out.push_str("<div class=\"spacer\"></div>\n");
    }

    fn video_embed(&mut self, ids: &[String], mode: VideoMode) {
        self.videos.render_videos(ids, mode, &mut self.out);
    }

    fn text(&mut self, value: &str) {
        self.out.push_str(&encode_text(value));
    }

    fn mention(&mut self, reference: &EntityReference) {
        self.mentions.render_mention(reference, &mut self.out);
    }

    fn image(&mut self, alt: &str, src: &str) {
        if !is_safe_url(src) {
            log::debug!("Dropping image source with unsafe scheme: {}", src);
            self.out.push_str(&format!(
                "<img alt=\"{}\">",
                encode_double_quoted_attribute(alt)
            ));
            return;
        }
        self.out.push_str(&format!(
            "<img src=\"{}\" alt=\"{}\">",
            encode_double_quoted_attribute(src),
            encode_double_quoted_attribute(alt)
        ));
    }

    fn start_link(&mut self, href: &str) {
        if !is_safe_url(href) {
            log::debug!("Dropping link target with unsafe scheme: {}", href);
            self.out.push_str("<a>");
            return;
        }
        self.out.push_str(&format!(
            "<a href=\"{}\">",
            encode_double_quoted_attribute(href)
        ));
    }

    fn end_link(&mut self) {
        self.out.push_str("</a>");
    }

    fn start_bold(&mut self) {
        self.out.push_str("<strong>");
    }

    fn end_bold(&mut self) {
        self.out.push_str("</strong>");
    }

    fn start_italic(&mut self) {
        self.out.push_str("<em>");
    }

    fn end_italic(&mut self) {
        self.out.push_str("</em>");
    }

    fn code(&mut self, value: &str) {
        self.out.push_str("<code>");
        self.out.push_str(&encode_text(value));
        self.out.push_str("</code>");
    }
}
