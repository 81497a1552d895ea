//! Both inline back ends must render everyday content identically.

use fitmark_core::{Backend, RenderConfig};
use fitmark_render::render_html;

fn html_with(text: &str, backend: Backend) -> String {
    let config = RenderConfig {
        backend,
        ..RenderConfig::default()
    };
    render_html(text, &config)
}

#[test]
fn test_backends_render_same_html() {
    let samples = [
        "Great **work** on @[Bicep Curl](exercise:ex_123) today!",
        "## Warm-up with @[Jumping Jacks](exercise:ex_7)",
        "- Keep the @[Core](anatomy:core) _tight_",
        "1. Read the [guide](https://example.com/guides/1) first",
        "Form check: ![Squat depth](/img/squat.png) and `3x10`",
        "!videos[ex_1, ex_2]",
        "---",
        "",
        "@[Leg Day](workout:w_9) has an unknown type",
    ];

    for sample in samples {
        assert_eq!(
            html_with(sample, Backend::Direct),
            html_with(sample, Backend::Markdown),
            "back ends disagree on {:?}",
            sample
        );
    }
}

#[test]
fn test_unterminated_mention_renders_literally() {
    let html = html_with("@[Oops(exercise:x1)", Backend::Direct);
    assert_eq!(html, "<p>@[Oops(exercise:x1)</p>\n");
}

#[test]
fn test_mention_display_text_is_literal() {
    let html = html_with("@[*Quad*riceps](anatomy:quads)", Backend::Direct);
    assert!(html.contains(">*Quad*riceps</button>"));
    assert!(!html.contains("<em>"));

    let html = html_with("@[*Quad*riceps](anatomy:quads)", Backend::Markdown);
    assert!(html.contains(">*Quad*riceps</button>"));
}
