//! Block builder — accumulates classified lines into a [`Document`].
//!
//! The builder is a two-state machine (list open / list closed).  Every
//! non-list line closes the open list; a `ListItem` either opens a new
//! [`Block::List`] or appends to the one already open.
//!
//! ```text
//!            ListItem                         ListItem
//!  Closed ───────────────▶ Open (push List) ─────────▶ Open (append item)
//!    ▲                        │
//!    └──── Blank / Heading / Step / Paragraph ─┘
//! ```

use super::classify::{classify, strip_bold_line, LineKind};

// ---------------------------------------------------------------------------
// Block / Document
// ---------------------------------------------------------------------------

/// One semantic unit of a parsed report.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Block {
    /// `**Heading**` line with the markers stripped.
    Heading(String),
    /// Numbered step, trimmed, leading number kept.
    Step(String),
    /// One or more consecutive list items, in input order.
    List(Vec<String>),
    /// Any other non-blank line, stored untrimmed.
    Paragraph(String),
    /// Blank input line.
    Spacer,
}

/// Ordered sequence of blocks; order matches input line order.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Document {
    pub blocks: Vec<Block>,
}

impl Document {
    /// Number of input lines that carried content: headings, steps,
    /// paragraphs and every list item.  Equals the non-blank line count of
    /// the source text.
    pub fn content_line_count(&self) -> usize {
        self.blocks
            .iter()
            .map(|block| match block {
                Block::Heading(_) | Block::Step(_) | Block::Paragraph(_) => 1,
                Block::List(items) => items.len(),
                Block::Spacer => 0,
            })
            .sum()
    }
}

// ---------------------------------------------------------------------------
// Builder
// ---------------------------------------------------------------------------

/// Parse `raw_text` into a [`Document`].
///
/// Pure and deterministic: the same input always yields an equal document.
/// An empty string yields a document with zero blocks.
///
/// ```
/// use clinical_prep::report::{build, Block};
///
/// let doc = build("**Summary**\n- a\n- b");
/// assert_eq!(doc.blocks, vec![
///     Block::Heading("Summary".into()),
///     Block::List(vec!["a".into(), "b".into()]),
/// ]);
/// ```
pub fn build(raw_text: &str) -> Document {
    let mut blocks = Vec::new();
    let mut list_open = false;

    if raw_text.is_empty() {
        return Document { blocks };
    }

    for line in raw_text.split('\n') {
        let kind = classify(line);
        if kind != LineKind::ListItem {
            list_open = false;
        }

        match kind {
            LineKind::Blank => blocks.push(Block::Spacer),
            LineKind::Heading => {
                let trimmed = line.trim();
                let text = strip_bold_line(trimmed).unwrap_or(trimmed);
                blocks.push(Block::Heading(text.to_string()));
            }
            LineKind::Step => blocks.push(Block::Step(line.trim().to_string())),
            LineKind::ListItem => {
                let item = list_item_text(line).to_string();
                match blocks.last_mut() {
                    Some(Block::List(items)) if list_open => items.push(item),
                    _ => {
                        blocks.push(Block::List(vec![item]));
                        list_open = true;
                    }
                }
            }
            LineKind::Paragraph => blocks.push(Block::Paragraph(line.to_string())),
        }
    }

    Document { blocks }
}

/// Text after the first `-`, trimmed.
fn list_item_text(line: &str) -> &str {
    line.split_once('-').map_or(line, |(_, rest)| rest).trim()
}
