//! Word wrapping for the export path.
//!
//! Wrapping belongs to the document-export side; pagination only consumes
//! the resulting lines.  [`TextWrapper`] is the seam, [`MonospaceWrapper`]
//! the implementation used by the PDF exporter.

use unicode_width::{UnicodeWidthChar, UnicodeWidthStr};

/// Splits raw text into lines that fit a given width.
pub trait TextWrapper: Send + Sync {
    /// Wrap `text` to `width` (export units).  Source `\n` always breaks.
    fn wrap(&self, text: &str, width: f32) -> Vec<String>;
}

/// Treats every display column as `char_width` units wide.
#[derive(Debug, Clone, Copy)]
pub struct MonospaceWrapper {
    pub char_width: f32,
}

impl MonospaceWrapper {
    pub fn new(char_width: f32) -> Self {
        Self { char_width }
    }

    /// Display columns available in `width` units; at least one.
    fn columns(&self, width: f32) -> usize {
        if self.char_width <= 0.0 {
            return usize::MAX;
        }
        ((width / self.char_width).floor() as usize).max(1)
    }
}

impl Default for MonospaceWrapper {
    fn default() -> Self {
        Self::new(2.0)
    }
}

impl TextWrapper for MonospaceWrapper {
    fn wrap(&self, text: &str, width: f32) -> Vec<String> {
        let columns = self.columns(width);
        let mut lines = Vec::new();
        for source in text.split('\n') {
            wrap_line(source, columns, &mut lines);
        }
        lines
    }
}

/// Greedy whitespace wrap of one source line.  Leading indentation is kept
/// on the first output line; words wider than `columns` are hard-split.
fn wrap_line(source: &str, columns: usize, out: &mut Vec<String>) {
    let source = source.trim_end();
    if source.width() <= columns {
        out.push(source.to_string());
        return;
    }

    let indent_len = source.len() - source.trim_start().len();
    let mut current = source[..indent_len].to_string();
    let mut current_width = current.width();

    for word in source.split_whitespace() {
        let word_width = word.width();
        let sep = usize::from(current_width > 0 && !current.trim().is_empty());

        if current_width + sep + word_width <= columns {
            if sep == 1 {
                current.push(' ');
            }
            current.push_str(word);
            current_width += sep + word_width;
            continue;
        }

        if !current.trim().is_empty() {
            out.push(std::mem::take(&mut current));
        } else {
            current.clear();
        }
        current_width = 0;

        if word_width <= columns {
            current.push_str(word);
            current_width = word_width;
        } else {
            for ch in word.chars() {
                let w = ch.width().unwrap_or(0);
                if current_width + w > columns && !current.is_empty() {
                    out.push(std::mem::take(&mut current));
                    current_width = 0;
                }
                current.push(ch);
                current_width += w;
            }
        }
    }

    if !current.trim().is_empty() {
        out.push(current);
    }
}
