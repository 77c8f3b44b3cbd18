//! Pull raw text out of the gazette document.

use anyhow::{Context, Result};
use std::path::Path;

/// Read the full text of a gazette. PDFs are decoded page by page; any other
/// file is read as UTF-8 text.
pub fn read_document_text(path: &Path) -> Result<String> {
    let is_pdf = path
        .extension()
        .and_then(|e| e.to_str())
        .is_some_and(|e| e.eq_ignore_ascii_case("pdf"));

    let text = if is_pdf {
        read_pdf_text(path)?
    } else {
        std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read document {}", path.display()))?
    };

    log::info!("Document text length: {} ({})", text.len(), path.display());
    Ok(text)
}

/// Extract text from every page in page order, one page per block.
///
/// Pages lopdf cannot decode are skipped with a warning; a PDF with no
/// readable page at all is an error.
fn read_pdf_text(path: &Path) -> Result<String> {
    let doc = lopdf::Document::load(path).context("Failed to load PDF")?;
    let pages = doc.get_pages();
    if pages.is_empty() {
        anyhow::bail!("PDF {} has no pages", path.display());
    }

    let mut blocks: Vec<String> = Vec::with_capacity(pages.len());
    for page_num in pages.keys() {
        match doc.extract_text(&[*page_num]) {
            Ok(text) => blocks.push(text),
            Err(e) => log::warn!("Page {}: failed to extract text: {}", page_num, e),
        }
    }

    if blocks.is_empty() {
        anyhow::bail!("No text could be extracted from {}", path.display());
    }
    Ok(blocks.join("\n"))
}
