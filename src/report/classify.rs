//! Line classifier — assigns one [`LineKind`] to a single line of report text.
//!
//! Rules are checked in priority order and the first match wins:
//!
//! | Priority | Trimmed line                                  | Kind        |
//! |----------|-----------------------------------------------|-------------|
//! | 1        | empty                                         | `Blank`     |
//! | 2        | `**…**`, length ≥ 4                           | `Heading`   |
//! | 3        | digits, `.`, whitespace (`12. Foo`)           | `Step`      |
//! | 4        | starts with `-`                               | `ListItem`  |
//! | 5        | anything else                                 | `Paragraph` |
//!
//! Classification is total: every string has a kind and nothing here fails.

/// The two-character bold delimiter.
pub const BOLD_MARKER: &str = "**";

/// Semantic kind of one report line.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LineKind {
    /// Empty after trimming.
    Blank,
    /// Whole line wrapped in a bold-marker pair.
    Heading,
    /// Numbered step such as `1. Next steps`.
    Step,
    /// Bullet item (`- foo`).
    ListItem,
    /// Fallthrough for everything else.
    Paragraph,
}

/// Classify `line` according to the priority table in the module docs.
///
/// ```
/// use clinical_prep::report::{classify, LineKind};
///
/// assert_eq!(classify("**Summary**"), LineKind::Heading);
/// assert_eq!(classify("  - item"), LineKind::ListItem);
/// assert_eq!(classify("**"), LineKind::Paragraph);
/// ```
pub fn classify(line: &str) -> LineKind {
    let trimmed = line.trim();

    if trimmed.is_empty() {
        LineKind::Blank
    } else if strip_bold_line(trimmed).is_some() {
        LineKind::Heading
    } else if is_step(trimmed) {
        LineKind::Step
    } else if trimmed.starts_with('-') {
        LineKind::ListItem
    } else {
        LineKind::Paragraph
    }
}

/// Returns the inner text when `trimmed` is wholly wrapped in bold markers.
///
/// Shared by the heading rule and the pagination bold rule. A line of
/// exactly `**` is *not* a bold line (the length guard keeps the opening and
/// closing markers from overlapping); `****` is, with empty inner text.
pub fn strip_bold_line(trimmed: &str) -> Option<&str> {
    if trimmed.len() < BOLD_MARKER.len() * 2 {
        return None;
    }
    trimmed
        .strip_prefix(BOLD_MARKER)
        .and_then(|rest| rest.strip_suffix(BOLD_MARKER))
}

/// `<digits>.<whitespace>` at the start of the line.
fn is_step(trimmed: &str) -> bool {
    let digits = trimmed.bytes().take_while(u8::is_ascii_digit).count();
    if digits == 0 {
        return false;
    }
    let mut rest = trimmed[digits..].chars();
    rest.next() == Some('.') && rest.next().is_some_and(char::is_whitespace)
}
