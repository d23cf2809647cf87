use crate::models::Document;
use anyhow::{Context, Result};
use quick_xml::NsReader;
use quick_xml::events::Event;
use quick_xml::name::{Namespace, ResolveResult};
use std::io::{Cursor, Read, Seek};
use tracing::{debug, warn};

const WORDML_NS: &[u8] = b"http://schemas.openxmlformats.org/wordprocessingml/2006/main";

/// Pulls all recoverable text out of an uploaded document.
///
/// Unsupported extensions yield an empty string rather than an error; callers
/// treat empty text as "nothing to work with". Files that claim a supported
/// format but fail to parse are errors.
pub fn extract_text(document: &Document) -> Result<String> {
    let name = document.filename.as_str();
    let text = if name.ends_with(".pdf") {
        extract_pdf(&document.bytes)?
    } else if name.ends_with(".docx") {
        extract_docx(&document.bytes)?
    } else {
        debug!("Unsupported document type: {}", name);
        String::new()
    };

    debug!("Extracted {} characters from {}", text.chars().count(), name);
    Ok(text)
}

fn extract_pdf(bytes: &[u8]) -> Result<String> {
    let doc = lopdf::Document::load_mem(bytes).context("Failed to parse PDF document")?;

    let mut text = String::new();
    // get_pages is keyed by page number, so iteration follows page order
    for page_num in doc.get_pages().keys() {
        match doc.extract_text(&[*page_num]) {
            Ok(page_text) => text.push_str(&page_text),
            Err(e) => warn!("No text extracted from page {}: {}", page_num, e),
        }
    }

    Ok(text)
}

fn extract_docx(bytes: &[u8]) -> Result<String> {
    let mut archive =
        zip::ZipArchive::new(Cursor::new(bytes)).context("Failed to open DOCX archive")?;

    // Central directory order, as stored in the archive
    let mut names = Vec::with_capacity(archive.len());
    for idx in 0..archive.len() {
        names.push(archive.by_index(idx)?.name().to_string());
    }
    let headers = names.iter().filter(|name| is_numbered_part(name, "word/header"));
    let footers = names.iter().filter(|name| is_numbered_part(name, "word/footer"));

    let mut text = String::new();
    for name in headers {
        text.push_str(&docx_part_text(&read_part(&mut archive, name)?)?);
    }
    text.push_str(&docx_part_text(&read_part(&mut archive, "word/document.xml")?)?);
    for name in footers {
        text.push_str(&docx_part_text(&read_part(&mut archive, name)?)?);
    }

    Ok(text.trim().to_string())
}

/// Matches `word/header.xml`, `word/header1.xml`, `word/footer12.xml` and so on.
fn is_numbered_part(name: &str, prefix: &str) -> bool {
    name.strip_prefix(prefix)
        .and_then(|rest| rest.strip_suffix(".xml"))
        .is_some_and(|digits| digits.bytes().all(|b| b.is_ascii_digit()))
}

fn read_part<R: Read + Seek>(archive: &mut zip::ZipArchive<R>, name: &str) -> Result<String> {
    let mut xml = String::new();
    archive
        .by_name(name)
        .with_context(|| format!("DOCX archive has no {}", name))?
        .read_to_string(&mut xml)
        .with_context(|| format!("Failed to read {}", name))?;
    Ok(xml)
}

/// Flattens one WordprocessingML part into plain text. Every paragraph starts
/// with a blank line; tabs and manual line breaks are kept. Elements are
/// matched by namespace, so any prefix bound to it works.
fn docx_part_text(xml: &str) -> Result<String> {
    let mut reader = NsReader::from_str(xml);
    let mut text = String::new();
    let mut in_text = false;

    loop {
        let (ns, event) = reader
            .read_resolved_event()
            .context("Malformed WordprocessingML")?;
        let wordml = matches!(ns, ResolveResult::Bound(Namespace(uri)) if uri == WORDML_NS);

        match event {
            Event::Start(e) if wordml => match e.local_name().as_ref() {
                b"t" => in_text = true,
                b"p" => text.push_str("\n\n"),
                _ => {}
            },
            Event::Empty(e) if wordml => match e.local_name().as_ref() {
                b"tab" => text.push('\t'),
                b"br" | b"cr" => text.push('\n'),
                b"p" => text.push_str("\n\n"),
                _ => {}
            },
            Event::End(e) if wordml => {
                if e.local_name().as_ref() == b"t" {
                    in_text = false;
                }
            }
            Event::Text(e) if in_text => {
                let run = e.unescape().context("Invalid text in WordprocessingML")?;
                text.push_str(&run);
            }
            Event::Eof => break,
            _ => {}
        }
    }

    Ok(text)
}
