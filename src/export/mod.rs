//! Document export.
//!
//! A [`DocumentExporter`] supplies the page geometry and word wrapper that
//! [`paginate`](crate::report::paginate) needs, then writes the resulting
//! pages to disk.  [`PdfExporter`] is the production implementation, built
//! on `printpdf`.

pub mod pdf;

use std::path::Path;

use thiserror::Error;

use crate::report::{Page, PageGeometry, TextWrapper};

pub use pdf::PdfExporter;

/// Errors from exporting a report.
#[derive(Debug, Error)]
pub enum ExportError {
    /// Export was requested before any report was received.
    #[error("no report to export")]
    NoReport,

    /// Writing the output file failed.
    #[error("failed to write export: {0}")]
    Io(#[from] std::io::Error),

    /// The PDF backend rejected the document.
    #[error("PDF generation failed: {0}")]
    Pdf(String),
}

/// Document-export collaborator.
pub trait DocumentExporter: Send + Sync {
    /// Geometry the pages should be laid out with.
    fn geometry(&self) -> PageGeometry;

    /// Wrapper used to fit raw text to `geometry().page_width`.
    fn wrapper(&self) -> &dyn TextWrapper;

    /// Write `pages` to `path`.
    fn export(&self, pages: &[Page], path: &Path) -> Result<(), ExportError>;
}
