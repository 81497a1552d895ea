//! Plain-text output: one line per block, styling dropped, mentions as
//! their display name.

use fitmark_core::{EntityReference, VideoMode};

use crate::dispatch::RenderSink;

/// Sink that builds plain text.
#[derive(Debug, Clone, Default)]
pub struct PlainTextSink {
    out: String,
}

impl PlainTextSink {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn as_str(&self) -> &str {
        &self.out
    }

    pub fn finish(self) -> String {
        self.out
    }
}

impl RenderSink for PlainTextSink {
    fn start_list(&mut self, _ordered: bool, _first_number: Option<u64>) {}

    fn end_list(&mut self, _ordered: bool) {}

    fn start_heading(&mut self, _level: u8) {}

    fn end_heading(&mut self, _level: u8) {
        self.out.push('\n');
    }

    fn start_paragraph(&mut self) {}

    fn end_paragraph(&mut self) {
        self.out.push('\n');
    }

    fn start_list_item(&mut self, ordered: bool, number: Option<u64>) {
        match (ordered, number) {
            (true, Some(n)) => self.out.push_str(&format!("{}. ", n)),
            (true, None) => self.out.push_str("1. "),
            (false, _) => self.out.push_str("- "),
        }
    }

    fn end_list_item(&mut self) {
        self.out.push('\n');
    }

    fn horizontal_rule(&mut self) {
        self.out.push_str("---\n");
    }

    fn spacer(&mut self) {
        self.out.push('\n');
    }

    fn video_embed(&mut self, ids: &[String], mode: VideoMode) {
        let label = match mode {
            VideoMode::Single => "video",
            VideoMode::Grid => "videos",
        };
        self.out
            .push_str(&format!("[{}: {}]\n", label, ids.join(", ")));
    }

    fn text(&mut self, value: &str) {
        self.out.push_str(value);
    }

    fn mention(&mut self, reference: &EntityReference) {
        self.out.push_str(&reference.display_name);
    }

    fn image(&mut self, alt: &str, _src: &str) {
        self.out.push_str(alt);
    }

    fn start_link(&mut self, _href: &str) {}

    fn end_link(&mut self) {}

    fn start_bold(&mut self) {}

    fn end_bold(&mut self) {}

    fn start_italic(&mut self) {}

    fn end_italic(&mut self) {}

    fn code(&mut self, value: &str) {
        self.out.push_str(value);
    }
}
