//! PDF export via `printpdf`.
//!
//! Each [`Page`] becomes one A4 (by default) PDF page with a single layer.
//! Regular lines use the built-in Helvetica face, bold lines Helvetica-Bold.
//! Line offsets are measured in millimetres from the top edge; `printpdf`
//! places text from the bottom-left corner, so `y` is flipped here and
//! nowhere else.

use std::fs::File;
use std::io::BufWriter;
use std::path::Path;

use printpdf::{BuiltinFont, IndirectFontRef, Mm, PdfDocument, PdfDocumentReference, PdfLayerReference};

use super::{DocumentExporter, ExportError};
use crate::config::ExportConfig;
use crate::report::{MonospaceWrapper, Page, PageGeometry, TextWrapper, REPORT_TITLE};

const LAYER_NAME: &str = "Report";

impl From<printpdf::Error> for ExportError {
    fn from(e: printpdf::Error) -> Self {
        ExportError::Pdf(e.to_string())
    }
}

/// Writes pages as a PDF document.
#[derive(Debug, Clone)]
pub struct PdfExporter {
    geometry: PageGeometry,
    wrapper: MonospaceWrapper,
    page_width_mm: f32,
    page_height_mm: f32,
    font_size: f32,
}

impl PdfExporter {
    pub fn from_config(config: &ExportConfig) -> Self {
        Self {
            geometry: config.geometry(),
            wrapper: MonospaceWrapper::new(config.char_width),
            page_width_mm: config.page_width,
            page_height_mm: config.page_height,
            font_size: config.font_size,
        }
    }

    /// Lay `pages` out in a new document.  An empty slice still produces
    /// one blank page.
    fn build(&self, pages: &[Page]) -> Result<PdfDocumentReference, ExportError> {
        let (doc, first_page, first_layer) = PdfDocument::new(
            REPORT_TITLE,
            Mm(self.page_width_mm),
            Mm(self.page_height_mm),
            LAYER_NAME,
        );
        let regular = doc.add_builtin_font(BuiltinFont::Helvetica)?;
        let bold = doc.add_builtin_font(BuiltinFont::HelveticaBold)?;

        for (i, page) in pages.iter().enumerate() {
            let layer = if i == 0 {
                doc.get_page(first_page).get_layer(first_layer)
            } else {
                let (page_idx, layer_idx) =
                    doc.add_page(Mm(self.page_width_mm), Mm(self.page_height_mm), LAYER_NAME);
                doc.get_page(page_idx).get_layer(layer_idx)
            };
            self.draw_page(&layer, page, &regular, &bold);
        }

        Ok(doc)
    }

    fn draw_page(
        &self,
        layer: &PdfLayerReference,
        page: &Page,
        regular: &IndirectFontRef,
        bold: &IndirectFontRef,
    ) {
        let x = Mm(self.geometry.margin);
        for line in &page.lines {
            if line.text.trim().is_empty() {
                continue;
            }
            let font = if line.bold { bold } else { regular };
            let y = Mm(self.page_height_mm - line.y);
            layer.use_text(fold_for_builtin_font(&line.text), self.font_size, x, y, font);
        }
    }

    /// Serialise `pages` to PDF bytes.
    pub fn render(&self, pages: &[Page]) -> Result<Vec<u8>, ExportError> {
        Ok(self.build(pages)?.save_to_bytes()?)
    }
}

impl DocumentExporter for PdfExporter {
    fn geometry(&self) -> PageGeometry {
        self.geometry
    }

    fn wrapper(&self) -> &dyn TextWrapper {
        &self.wrapper
    }

    fn export(&self, pages: &[Page], path: &Path) -> Result<(), ExportError> {
        if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
            std::fs::create_dir_all(parent)?;
        }
        let doc = self.build(pages)?;
        doc.save(&mut BufWriter::new(File::create(path)?))?;
        log::info!("Exported {} page(s) to {}", pages.len(), path.display());
        Ok(())
    }
}

/// The built-in Type1 faces only cover WinAnsi.  Arrows and comparison
/// signs that models like to emit get ASCII spellings; tabs become spaces.
fn fold_for_builtin_font(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    for ch in text.chars() {
        match ch {
            '→' | '⟶' => out.push_str("->"),
            '←' | '⟵' => out.push_str("<-"),
            '↔' => out.push_str("<->"),
            '≥' => out.push_str(">="),
            '≤' => out.push_str("<="),
            '≠' => out.push_str("!="),
            '\t' => out.push(' '),
            c => out.push(c),
        }
    }
    out
}
