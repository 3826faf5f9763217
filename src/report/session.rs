//! Holds the most recently received report text.

/// Last-write-wins holder for the current report.
///
/// Cleared at the start of every user turn; set once per completed report
/// generation.  Both renderers and the export trigger read from here.
#[derive(Debug, Clone, Default)]
pub struct ReportSession {
    current: Option<String>,
}

impl ReportSession {
    pub fn new() -> Self {
        Self::default()
    }

    /// Replace any previous report with `text`.
    pub fn set_report(&mut self, text: impl Into<String>) {
        self.current = Some(text.into());
    }

    pub fn clear(&mut self) {
        self.current = None;
    }

    /// `None` until a report arrives (or after [`clear`](Self::clear)).
    pub fn current_text(&self) -> Option<&str> {
        self.current.as_deref()
    }

    pub fn has_report(&self) -> bool {
        self.current.is_some()
    }
}
