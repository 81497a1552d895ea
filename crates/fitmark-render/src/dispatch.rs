//! Render dispatch: walks a parsed document and drives a [`RenderSink`].
//!
//! Dispatch never fetches anything. Video embeds and mentions are handed to
//! the sink with everything needed to render them immediately (ids, display
//! name); resolving a mention's detail is the host's business.

use fitmark_core::{Block, Document, EntityReference, Inline, VideoMode};

/// Receiver of structural render calls.
pub trait RenderSink {
    /// A run of consecutive list items of one kind starts
    fn start_list(&mut self, ordered: bool, first_number: Option<u64>);
    fn end_list(&mut self, ordered: bool);

    fn start_heading(&mut self, level: u8);
    fn end_heading(&mut self, level: u8);
    fn start_paragraph(&mut self);
    fn end_paragraph(&mut self);
    fn start_list_item(&mut self, ordered: bool, number: Option<u64>);
    fn end_list_item(&mut self);
    fn horizontal_rule(&mut self);
    fn spacer(&mut self);
    fn video_embed(&mut self, ids: &[String], mode: VideoMode);

    fn text(&mut self, value: &str);
    fn mention(&mut self, reference: &EntityReference);
    fn image(&mut self, alt: &str, src: &str);
    fn start_link(&mut self, href: &str);
    fn end_link(&mut self);
    fn start_bold(&mut self);
    fn end_bold(&mut self);
    fn start_italic(&mut self);
    fn end_italic(&mut self);
    fn code(&mut self, value: &str);
}

/// Render every block of `doc` into `sink`, in order.
///
/// Consecutive list items of the same kind are wrapped in a single
/// `start_list` / `end_list` pair.
pub fn render_document<S: RenderSink + ?Sized>(doc: &Document, sink: &mut S) {
    let mut open_list: Option<bool> = None;

    for block in doc {
        let item_kind = match block {
            Block::ListItem { ordered, .. } => Some(*ordered),
            _ => None,
        };

        if let Some(ordered) = open_list
            && item_kind != Some(ordered)
        {
            sink.end_list(ordered);
            open_list = None;
        }
        if open_list.is_none()
            && let Block::ListItem {
                ordered, number, ..
            } = block
        {
            sink.start_list(*ordered, *number);
            open_list = Some(*ordered);
        }

        render_block(block, sink);
    }

    if let Some(ordered) = open_list {
        sink.end_list(ordered);
    }
}

/// Render a single block.
pub fn render_block<S: RenderSink + ?Sized>(block: &Block, sink: &mut S) {
    match block {
        Block::Heading { level, inlines } => {
            sink.start_heading(*level);
            render_inlines(inlines, sink);
            sink.end_heading(*level);
        }
        Block::Paragraph { inlines } => {
            sink.start_paragraph();
            render_inlines(inlines, sink);
            sink.end_paragraph();
        }
        Block::ListItem {
            ordered,
            number,
            inlines,
        } => {
            sink.start_list_item(*ordered, *number);
            render_inlines(inlines, sink);
            sink.end_list_item();
        }
        Block::HorizontalRule => sink.horizontal_rule(),
        Block::BlankSpacer => sink.spacer(),
        Block::VideoEmbed { ids, mode } => sink.video_embed(ids, *mode),
    }
}

/// Render a run of inline nodes.
pub fn render_inlines<S: RenderSink + ?Sized>(inlines: &[Inline], sink: &mut S) {
    for inline in inlines {
        match inline {
            Inline::Text { value } => sink.text(value),
            Inline::Mention { reference } => sink.mention(reference),
            Inline::Image { alt, src } => sink.image(alt, src),
            Inline::Link { href, children, .. } => {
                sink.start_link(href);
                render_inlines(children, sink);
                sink.end_link();
            }
            Inline::Bold { children, .. } => {
                sink.start_bold();
                render_inlines(children, sink);
                sink.end_bold();
            }
            Inline::Italic { children, .. } => {
                sink.start_italic();
                render_inlines(children, sink);
                sink.end_italic();
            }
            Inline::Code { value } => sink.code(value),
        }
    }
}
