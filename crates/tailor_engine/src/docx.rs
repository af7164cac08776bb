use std::fmt::Display;
use std::io::{Cursor, Read};

use quick_xml::escape::resolve_predefined_entity;
use quick_xml::events::Event;
use quick_xml::Reader;

use crate::extract::ExtractError;

const DOCUMENT_PART: &str = "word/document.xml";

/// Raw paragraph text of a Word document: no formatting, no embedded objects.
pub(crate) fn docx_to_text(data: &[u8]) -> Result<String, ExtractError> {
    let mut archive = zip::ZipArchive::new(Cursor::new(data)).map_err(docx_err)?;
    let mut part = archive.by_name(DOCUMENT_PART).map_err(docx_err)?;
    let mut xml = String::new();
    part.read_to_string(&mut xml).map_err(docx_err)?;

    paragraphs_text(&xml)
}

fn docx_err(err: impl Display) -> ExtractError {
    ExtractError::Docx(err.to_string())
}

/// Walks `w:p` paragraphs collecting `w:t` text. Run-level tabs and breaks become
/// `\t` and `\n`; empty paragraphs are dropped; paragraphs are separated by
/// a blank line.
///
/// Paragraphs nest inside text boxes (`w:txbxContent`). Text the outer
/// paragraph collected before the box is emitted first, so document order
/// is kept and nothing is overwritten.
fn paragraphs_text(xml: &str) -> Result<String, ExtractError> {
    let mut reader = Reader::from_str(xml);
    let mut paragraphs = Vec::new();
    let mut open: Vec<String> = Vec::new();
    let mut run_depth = 0usize;
    let mut in_text_run = false;

    loop {
        match reader.read_event().map_err(docx_err)? {
            Event::Start(e) => match e.name().as_ref() {
                b"w:p" => {
                    if let Some(outer) = open.last_mut() {
                        push_paragraph(&mut paragraphs, std::mem::take(outer));
                    }
                    open.push(String::new());
                }
                b"w:r" => run_depth += 1,
                b"w:t" => in_text_run = true,
                _ => {}
            },
            // Tab stops in paragraph properties are also `w:tab`; only the
            // ones inside a run are characters.
            Event::Empty(e) if run_depth > 0 => {
                if let Some(current) = open.last_mut() {
                    match e.name().as_ref() {
                        b"w:tab" => current.push('\t'),
                        b"w:br" | b"w:cr" => current.push('\n'),
                        _ => {}
                    }
                }
            }
            Event::End(e) => match e.name().as_ref() {
                b"w:r" => run_depth = run_depth.saturating_sub(1),
                b"w:t" => in_text_run = false,
                b"w:p" => {
                    if let Some(paragraph) = open.pop() {
                        push_paragraph(&mut paragraphs, paragraph);
                    }
                }
                _ => {}
            },
            Event::Text(e) if in_text_run => {
                if let Some(current) = open.last_mut() {
                    current.push_str(&e.xml_content().map_err(docx_err)?);
                }
            }
            Event::GeneralRef(e) if in_text_run => {
                let Some(current) = open.last_mut() else {
                    continue;
                };
                if let Some(ch) = e.resolve_char_ref().map_err(docx_err)? {
                    current.push(ch);
                } else {
                    let name = e.decode().map_err(docx_err)?;
                    match resolve_predefined_entity(&name) {
                        Some(value) => current.push_str(value),
                        None => return Err(ExtractError::Docx(format!("unknown entity &{name};"))),
                    }
                }
            }
            Event::Eof => break,
            _ => {}
        }
    }

    Ok(paragraphs.join("\n\n"))
}

fn push_paragraph(paragraphs: &mut Vec<String>, paragraph: String) {
    if !paragraph.trim().is_empty() {
        paragraphs.push(paragraph);
    }
}
