//! Pagination renderer — places wrapped lines on fixed-height pages.
//!
//! Works on the *raw* report text, independently of the block builder:
//! bold detection happens per wrapped line, which is a different unit from
//! the logical lines the HTML path uses.
//!
//! # Overflow policy
//!
//! Append, then check.  A line is placed at the current `y`, the cursor
//! advances by `line_height`, and only then is `y > page_height` tested.
//! The line that triggered the overflow therefore stays on the old page and
//! the *next* line starts the new one, at `y = margin`.

use super::classify::strip_bold_line;
use super::wrap::TextWrapper;

// ---------------------------------------------------------------------------
// Geometry
// ---------------------------------------------------------------------------

/// Page geometry in export units (millimetres for the PDF exporter).
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PageGeometry {
    /// Wrap width handed to the [`TextWrapper`].
    pub page_width: f32,
    /// Page-break threshold for the vertical cursor.
    pub page_height: f32,
    /// Cursor advance per line.
    pub line_height: f32,
    /// Starting cursor (and left inset) on every page.
    pub margin: f32,
}

impl Default for PageGeometry {
    /// 10 margin, 180 wrap width, 7 line advance, 280 break threshold.
    fn default() -> Self {
        Self {
            page_width: 180.0,
            page_height: 280.0,
            line_height: 7.0,
            margin: 10.0,
        }
    }
}

impl PageGeometry {
    /// `true` when every line [`paginate`] places lands at or above
    /// `page_height` and the cursor always advances.
    pub fn is_valid(&self) -> bool {
        [self.page_width, self.page_height, self.line_height, self.margin]
            .iter()
            .all(|v| v.is_finite())
            && self.page_width > 0.0
            && self.line_height > 0.0
            && self.margin >= 0.0
            && self.margin <= self.page_height
    }
}

// ---------------------------------------------------------------------------
// StyledLine / Page
// ---------------------------------------------------------------------------

/// One wrapped line with its vertical offset on the page.
#[derive(Debug, Clone, PartialEq)]
pub struct StyledLine {
    pub text: String,
    pub bold: bool,
    pub y: f32,
}

/// Lines placed at increasing vertical offsets.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Page {
    pub lines: Vec<StyledLine>,
}

impl Page {
    pub fn is_empty(&self) -> bool {
        self.lines.is_empty()
    }
}

// ---------------------------------------------------------------------------
// paginate
// ---------------------------------------------------------------------------

/// Wrap `raw_text` with `wrapper` and lay the result out on pages.
///
/// The last page is always included, even if partially filled.  Whether
/// empty input yields one page or none is decided by the wrapper: a wrapper
/// that returns no lines yields one empty page.
pub fn paginate(raw_text: &str, geometry: &PageGeometry, wrapper: &dyn TextWrapper) -> Vec<Page> {
    let wrapped = wrapper.wrap(raw_text, geometry.page_width);

    let mut pages = Vec::new();
    let mut page = Page::default();
    let mut y = geometry.margin;

    for line in wrapped {
        let (text, bold) = match strip_bold_line(line.trim()) {
            Some(inner) => (inner.to_string(), true),
            None => (line, false),
        };

        page.lines.push(StyledLine { text, bold, y });
        y += geometry.line_height;

        if y > geometry.page_height {
            pages.push(std::mem::take(&mut page));
            y = geometry.margin;
        }
    }

    // A break right on the final line leaves an empty trailing page; only
    // keep it when nothing was emitted at all.
    if !page.is_empty() || pages.is_empty() {
        pages.push(page);
    }
    pages
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::report::wrap::MonospaceWrapper;

    /// Splits on `\n` only.
    struct LineSplit;

    impl TextWrapper for LineSplit {
        fn wrap(&self, text: &str, _width: f32) -> Vec<String> {
            text.split('\n').map(str::to_string).collect()
        }
    }

    /// Returns no lines for any input.
    struct Nothing;

    impl TextWrapper for Nothing {
        fn wrap(&self, _text: &str, _width: f32) -> Vec<String> {
            Vec::new()
        }
    }

    fn numbered(n: usize) -> String {
        (1..=n).map(|i| format!("line {i}")).collect::<Vec<_>>().join("\n")
    }

    #[test]
    fn bold_lines_are_detected_and_stripped() {
        let pages = paginate(
            "**Summary:**\nplain **mid** text\n**",
            &PageGeometry::default(),
            &LineSplit,
        );
        let lines = &pages[0].lines;
        assert_eq!(lines[0].text, "Summary:");
        assert!(lines[0].bold);
        assert_eq!(lines[1].text, "plain **mid** text");
        assert!(!lines[1].bold);
        assert_eq!(lines[2].text, "**");
        assert!(!lines[2].bold);
    }

    #[test]
    fn lines_advance_by_line_height() {
        let pages = paginate("a\nb\nc", &PageGeometry::default(), &LineSplit);
        let ys: Vec<f32> = pages[0].lines.iter().map(|l| l.y).collect();
        assert_eq!(ys, vec![10.0, 17.0, 24.0]);
    }

    #[test]
    fn default_geometry_holds_39_lines_per_page() {
        // y after k lines = 10 + 7k; overflow once 10 + 7k > 280 → k = 39.
        let pages = paginate(&numbered(40), &PageGeometry::default(), &LineSplit);
        assert_eq!(pages.len(), 2);
        assert_eq!(pages[0].lines.len(), 39);
        assert_eq!(pages[1].lines.len(), 1);
        assert_eq!(pages[1].lines[0].text, "line 40");
        assert_eq!(pages[1].lines[0].y, 10.0);
    }

    #[test]
    fn overflowing_line_stays_on_old_page() {
        // page_height 20: lines at 0, 7, 14; after the third y = 21 > 20.
        let geometry = PageGeometry {
            page_width: 100.0,
            page_height: 20.0,
            line_height: 7.0,
            margin: 0.0,
        };
        let pages = paginate("a\nb\nc\nd", &geometry, &LineSplit);
        assert_eq!(pages.len(), 2);
        assert_eq!(pages[0].lines.len(), 3);
        assert_eq!(pages[0].lines[2].y, 14.0);
        assert_eq!(pages[1].lines[0].text, "d");
    }

    #[test]
    fn no_line_is_placed_beyond_page_height() {
        let geometry = PageGeometry::default();
        let pages = paginate(&numbered(200), &geometry, &LineSplit);
        for page in &pages {
            for line in &page.lines {
                assert!(line.y <= geometry.page_height, "y = {}", line.y);
            }
            let ys: Vec<f32> = page.lines.iter().map(|l| l.y).collect();
            assert!(ys.windows(2).all(|w| w[0] < w[1]));
        }
        let total: usize = pages.iter().map(|p| p.lines.len()).sum();
        assert_eq!(total, 200);
    }

    #[test]
    fn geometry_validation() {
        assert!(PageGeometry::default().is_valid());

        let bad = [
            PageGeometry { margin: 290.0, ..PageGeometry::default() },
            PageGeometry { line_height: 0.0, ..PageGeometry::default() },
            PageGeometry { line_height: -7.0, ..PageGeometry::default() },
            PageGeometry { margin: -1.0, ..PageGeometry::default() },
            PageGeometry { page_width: 0.0, ..PageGeometry::default() },
            PageGeometry { page_height: f32::NAN, ..PageGeometry::default() },
        ];
        for geometry in bad {
            assert!(!geometry.is_valid(), "{geometry:?}");
        }
    }

    #[test]
    fn exact_page_fill_has_no_trailing_empty_page() {
        let pages = paginate(&numbered(39), &PageGeometry::default(), &LineSplit);
        assert_eq!(pages.len(), 1);
    }

    #[test]
    fn empty_text_with_monospace_wrapper_is_one_page_one_empty_line() {
        let pages = paginate("", &PageGeometry::default(), &MonospaceWrapper::default());
        assert_eq!(pages.len(), 1);
        assert_eq!(pages[0].lines.len(), 1);
        assert_eq!(pages[0].lines[0].text, "");
    }

    #[test]
    fn wrapper_returning_nothing_yields_one_empty_page() {
        let pages = paginate("", &PageGeometry::default(), &Nothing);
        assert_eq!(pages, vec![Page::default()]);
    }

    #[test]
    fn wrapping_happens_before_bold_detection() {
        // The bold pair is split across two wrapped lines → neither is bold.
        let wrapper = MonospaceWrapper::new(1.0);
        let geometry = PageGeometry {
            page_width: 10.0,
            ..PageGeometry::default()
        };
        let pages = paginate("**long heading text**", &geometry, &wrapper);
        assert!(pages[0].lines.len() > 1);
        assert!(pages[0].lines.iter().all(|l| !l.bold));
    }
}
