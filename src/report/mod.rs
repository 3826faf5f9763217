//! Report rendering pipeline.
//!
//! # Architecture
//!
//! ```text
//!                 raw report text (ReportSession)
//!                    │                      │
//!        on receipt  ▼                      ▼  on export
//!   classify ──▶ build ──▶ Document    TextWrapper::wrap
//!                              │            │
//!                              ▼            ▼
//!                        render_html     paginate ──▶ Vec<Page>
//!                              │
//!   speech_text ◀── raw text   ▼
//!                        HTML fragment
//! ```
//!
//! The two paths re-derive structure from the same raw text on purpose: the
//! HTML side groups logical lines into blocks, the pagination side looks at
//! wrapped lines.  Everything here is synchronous, pure, and total.

pub mod classify;
pub mod document;
pub mod html;
pub mod paginate;
pub mod session;
pub mod wrap;

// ---------------------------------------------------------------------------
// Public re-exports
// ---------------------------------------------------------------------------

pub use classify::{classify, strip_bold_line, LineKind, BOLD_MARKER};
pub use document::{build, Block, Document};
pub use html::{render_html, speech_text, RenderedReport, REPORT_TITLE};
pub use paginate::{paginate, Page, PageGeometry, StyledLine};
pub use session::ReportSession;
pub use wrap::{MonospaceWrapper, TextWrapper};
