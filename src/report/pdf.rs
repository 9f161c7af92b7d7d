//! PDF rendering of classification results via `printpdf`.
//!
//! Pure presentation: a title block, then per test a bold heading, a
//! value+unit line, a status line, and word-wrapped advice. Advice text is
//! already sanitized to Latin-1 by the classifier.

use printpdf::{BuiltinFont, Mm, PdfDocument};
use std::io::BufWriter;

use thiserror::Error;

use super::classify::{title_case, ClassificationResult};

const PAGE_WIDTH_MM: f32 = 210.0;
const PAGE_HEIGHT_MM: f32 = 297.0;
const WRAP_COLUMNS: usize = 80;

/// Cursor position at the top of a fresh page.
const TOP_Y_MM: f32 = 280.0;
/// A new test block starts on a fresh page below this line, so its
/// heading, value, and status lines never straddle the page edge.
const BLOCK_FLOOR_MM: f32 = 40.0;
/// Continuation advice lines break to a fresh page below this line.
const LINE_FLOOR_MM: f32 = 20.0;

#[derive(Debug, Error)]
pub enum PdfError {
    #[error("PDF font error: {0}")]
    Font(String),
    #[error("PDF write error: {0}")]
    Write(String),
}

/// Render the report summary. Returns PDF bytes.
pub fn render_pdf(results: &[ClassificationResult]) -> Result<Vec<u8>, PdfError> {
    let title = format!("{} - Lab Report Summary", crate::config::APP_NAME);
    let (doc, page1, layer1) =
        PdfDocument::new(title.as_str(), Mm(PAGE_WIDTH_MM), Mm(PAGE_HEIGHT_MM), "Layer 1");
    let font = doc
        .add_builtin_font(BuiltinFont::Helvetica)
        .map_err(|e| PdfError::Font(e.to_string()))?;
    let bold = doc
        .add_builtin_font(BuiltinFont::HelveticaBold)
        .map_err(|e| PdfError::Font(e.to_string()))?;

    let mut layer = doc.get_page(page1).get_layer(layer1);
    let mut y = Mm(TOP_Y_MM);

    layer.use_text(title.as_str(), 16.0, Mm(20.0), y, &bold);
    y -= Mm(12.0);

    for result in results {
        if y < Mm(BLOCK_FLOOR_MM) {
            let (page, layer_index) =
                doc.add_page(Mm(PAGE_WIDTH_MM), Mm(PAGE_HEIGHT_MM), "Layer 1");
            layer = doc.get_page(page).get_layer(layer_index);
            y = Mm(TOP_Y_MM);
        }

        layer.use_text(title_case(&result.label), 12.0, Mm(20.0), y, &bold);
        y -= Mm(6.0);

        layer.use_text(
            format!("Value: {} {}", result.value, result.unit),
            10.0,
            Mm(25.0),
            y,
            &font,
        );
        y -= Mm(5.0);

        layer.use_text(format!("Status: {}", result.status), 10.0, Mm(25.0), y, &font);
        y -= Mm(5.0);

        for line in wrap_text(&format!("Advice: {}", result.advice), WRAP_COLUMNS) {
            if y < Mm(LINE_FLOOR_MM) {
                let (page, layer_index) =
                    doc.add_page(Mm(PAGE_WIDTH_MM), Mm(PAGE_HEIGHT_MM), "Layer 1");
                layer = doc.get_page(page).get_layer(layer_index);
                y = Mm(TOP_Y_MM);
            }
            layer.use_text(line.as_str(), 10.0, Mm(25.0), y, &font);
            y -= Mm(4.5);
        }
        y -= Mm(4.0);
    }

    let mut bytes = Vec::new();
    doc.save(&mut BufWriter::new(&mut bytes))
        .map_err(|e| PdfError::Write(e.to_string()))?;
    Ok(bytes)
}

fn wrap_text(text: &str, max_chars: usize) -> Vec<String> {
    let mut lines = Vec::new();
    let mut current = String::new();

    for word in text.split_whitespace() {
        if current.len() + word.len() + 1 > max_chars && !current.is_empty() {
            lines.push(current.clone());
            current.clear();
        }
        if !current.is_empty() {
            current.push(' ');
        }
        current.push_str(word);
    }
    if !current.is_empty() {
        lines.push(current);
    }
    if lines.is_empty() {
        lines.push(String::new());
    }
    lines
}
