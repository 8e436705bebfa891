//! DOCX text extraction: `word/document.xml` inside the ZIP container,
//! streamed with `quick-xml`.
//!
//! Only paragraphs that are direct children of `w:body` count. Paragraphs
//! inside tables or text boxes are skipped, which matches the paragraph view
//! python-docx and most Office tooling expose as "the document's paragraphs".

use std::io::{Cursor, Read};

use quick_xml::events::Event;
use quick_xml::Reader;

use super::ExtractError;

const DOCUMENT_PART: &str = "word/document.xml";

/// Returns the body paragraphs' text joined with `\n`, empty paragraphs included.
pub fn extract_docx_text(bytes: &[u8]) -> Result<String, ExtractError> {
    let xml = read_document_part(bytes)?;
    let paragraphs = body_paragraphs(&xml)?;
    Ok(paragraphs.join("\n"))
}

fn read_document_part(bytes: &[u8]) -> Result<String, ExtractError> {
    let mut archive =
        zip::ZipArchive::new(Cursor::new(bytes)).map_err(|e| ExtractError::decode("docx", e))?;
    let mut part = archive
        .by_name(DOCUMENT_PART)
        .map_err(|e| ExtractError::decode("docx", format!("{DOCUMENT_PART}: {e}")))?;
    let mut xml = String::new();
    part.read_to_string(&mut xml)
        .map_err(|e| ExtractError::decode("docx", e))?;
    Ok(xml)
}

/// Walks the document XML and collects the text of each top-level paragraph.
fn body_paragraphs(xml: &str) -> Result<Vec<String>, ExtractError> {
    let mut reader = Reader::from_str(xml);

    let mut paragraphs = Vec::new();
    // Element depth of the currently open tags.
    let mut depth = 0usize;
    let mut body_depth: Option<usize> = None;
    // Depth of the open top-level paragraph and the text gathered so far.
    let mut current: Option<(usize, String)> = None;
    let mut in_run = false;
    let mut in_text = false;
    // Nesting level of w:txbxContent inside the current paragraph.
    let mut textbox_depth = 0usize;

    loop {
        let event = reader
            .read_event()
            .map_err(|e| ExtractError::decode("docx", e))?;
        match event {
            Event::Start(e) => {
                depth += 1;
                match e.name().as_ref() {
                    b"w:body" if body_depth.is_none() => body_depth = Some(depth),
                    b"w:p" if current.is_none() && body_depth == Some(depth - 1) => {
                        current = Some((depth, String::new()));
                    }
                    b"w:txbxContent" if current.is_some() => textbox_depth += 1,
                    b"w:r" if current.is_some() && textbox_depth == 0 => in_run = true,
                    b"w:t" if current.is_some() && textbox_depth == 0 => in_text = true,
                    _ => {}
                }
            }
            Event::Empty(e) => {
                if let Some((_, text)) = current.as_mut() {
                    // Tab stops in w:pPr are also w:tab; only run content counts.
                    if in_run && textbox_depth == 0 {
                        match e.name().as_ref() {
                            b"w:tab" => text.push('\t'),
                            b"w:br" | b"w:cr" => text.push('\n'),
                            _ => {}
                        }
                    }
                } else if e.name().as_ref() == b"w:p" && body_depth == Some(depth) {
                    // <w:p/> is an empty paragraph.
                    paragraphs.push(String::new());
                }
            }
            Event::Text(t) => {
                if in_text {
                    if let Some((_, text)) = current.as_mut() {
                        let unescaped = t.unescape().map_err(|e| ExtractError::decode("docx", e))?;
                        text.push_str(&unescaped);
                    }
                }
            }
            Event::CData(t) => {
                if in_text {
                    if let Some((_, text)) = current.as_mut() {
                        text.push_str(&String::from_utf8_lossy(&t));
                    }
                }
            }
            Event::End(e) => {
                match e.name().as_ref() {
                    b"w:t" => in_text = false,
                    b"w:r" if textbox_depth == 0 => in_run = false,
                    b"w:txbxContent" if textbox_depth > 0 => textbox_depth -= 1,
                    b"w:p" if matches!(current, Some((d, _)) if d == depth) => {
                        if let Some((_, text)) = current.take() {
                            paragraphs.push(text);
                        }
                    }
                    b"w:body" if body_depth == Some(depth) => body_depth = None,
                    _ => {}
                }
                depth = depth.saturating_sub(1);
            }
            Event::Eof => break,
            _ => {}
        }
    }

    Ok(paragraphs)
}
