//! HTML renderer — maps a [`Document`] to an on-screen markup fragment.
//!
//! | Block          | Element                         |
//! |----------------|---------------------------------|
//! | `Heading`      | `<h3>`                          |
//! | `Step`         | `<h4>`                          |
//! | `List`         | `<ul>` with one `<li>` per item |
//! | `Paragraph`    | `<p>` (text verbatim)           |
//! | `Spacer`       | `<br>`                          |
//!
//! The fragment always starts with the fixed `<h2>Clinical Prep Report</h2>`
//! title.  Inline `**` inside paragraphs is left as-is; only block-level
//! heading markers are interpreted.  Text is HTML-escaped so report content
//! can never inject markup into the host page.

use std::fmt::Write as _;

use super::classify::BOLD_MARKER;
use super::document::{build, Block, Document};

/// Fixed title shown above every rendered report.
pub const REPORT_TITLE: &str = "Clinical Prep Report";

/// Output of one display render: markup plus the text handed to playback.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RenderedReport {
    /// Markup fragment rooted under the fixed title element.
    pub html: String,
    /// Raw report text with every `**` removed.
    pub speech_text: String,
}

impl RenderedReport {
    /// Parse `raw_text` and render both outputs.
    pub fn from_text(raw_text: &str) -> Self {
        Self {
            html: render_html(&build(raw_text)),
            speech_text: speech_text(raw_text),
        }
    }
}

/// Render `doc` as an HTML fragment.
pub fn render_html(doc: &Document) -> String {
    let mut out = format!("<h2>{REPORT_TITLE}</h2>\n");

    for block in &doc.blocks {
        let _ = match block {
            Block::Heading(text) => writeln!(out, "<h3>{}</h3>", escape(text)),
            Block::Step(text) => writeln!(out, "<h4>{}</h4>", escape(text)),
            Block::List(items) => {
                out.push_str("<ul>\n");
                for item in items {
                    let _ = writeln!(out, "<li>{}</li>", escape(item));
                }
                writeln!(out, "</ul>")
            }
            Block::Paragraph(text) => writeln!(out, "<p>{}</p>", escape(text)),
            Block::Spacer => writeln!(out, "<br>"),
        };
    }

    out
}

/// Plain text for audio playback: a global removal of the bold marker.
///
/// ```
/// assert_eq!(
///     clinical_prep::report::speech_text("**Summary**\nNormal line"),
///     "Summary\nNormal line"
/// );
/// ```
pub fn speech_text(raw_text: &str) -> String {
    raw_text.replace(BOLD_MARKER, "")
}

fn escape(s: &str) -> String {
    s.replace('&', "&amp;")
        .replace('<', "&lt;")
        .replace('>', "&gt;")
        .replace('"', "&quot;")
        .replace('\'', "&#x27;")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_document_renders_only_title() {
        assert_eq!(
            render_html(&build("")),
            "<h2>Clinical Prep Report</h2>\n"
        );
    }

    #[test]
    fn renders_blocks_in_order() {
        let html = render_html(&build(
            "**Summary**\n- item one\n- item two\n\n1. Next steps\nFollow up in a week.",
        ));
        let expected = "<h2>Clinical Prep Report</h2>\n\
                        <h3>Summary</h3>\n\
                        <ul>\n<li>item one</li>\n<li>item two</li>\n</ul>\n\
                        <br>\n\
                        <h4>1. Next steps</h4>\n\
                        <p>Follow up in a week.</p>\n";
        assert_eq!(html, expected);
    }

    #[test]
    fn one_list_container_per_list_block() {
        let html = render_html(&build("- a\n- b\n- c"));
        assert_eq!(html.matches("<ul>").count(), 1);
        assert_eq!(html.matches("<li>").count(), 3);
        let a = html.find("<li>a</li>").unwrap();
        let c = html.find("<li>c</li>").unwrap();
        assert!(a < c);
    }

    #[test]
    fn paragraph_keeps_inline_bold_markers() {
        let html = render_html(&build("**Patient Name:** Jo"));
        assert!(html.contains("<p>**Patient Name:** Jo</p>"));
    }

    #[test]
    fn content_is_escaped() {
        let html = render_html(&build("BP <120 & \"stable\""));
        assert!(html.contains("<p>BP &lt;120 &amp; &quot;stable&quot;</p>"));
    }

    #[test]
    fn speech_text_strips_all_markers() {
        assert_eq!(speech_text("**Summary**\nNormal line"), "Summary\nNormal line");
        assert_eq!(
            speech_text("**Patient Name:** Jo **x"),
            "Patient Name: Jo x"
        );
        assert_eq!(speech_text(""), "");
    }

    #[test]
    fn rendered_report_bundles_both_outputs() {
        let rendered = RenderedReport::from_text("**Summary**\nok");
        assert!(rendered.html.contains("<h3>Summary</h3>"));
        assert_eq!(rendered.speech_text, "Summary\nok");
    }
}
