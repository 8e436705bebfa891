//! PDF text extraction via `pdf-extract`.

use tracing::debug;

use super::ExtractError;

/// Extracts every page's text in page order and concatenates them.
///
/// Pages are joined with no separator: prompts built from PDFs must stay
/// byte-identical to the ones the first version of this tool produced.
pub fn extract_pdf_text(bytes: &[u8]) -> Result<String, ExtractError> {
    let pages = pdf_extract::extract_text_from_mem_by_pages(bytes)
        .map_err(|e| ExtractError::decode("pdf", e))?;
    debug!("Extracted {} PDF page(s)", pages.len());
    Ok(join_pages(pages))
}

fn join_pages(pages: Vec<String>) -> String {
    pages.concat()
}
