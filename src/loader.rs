use std::fs;
use std::path::Path;

use anyhow::{anyhow, Context, Result};
use tracing::{debug, warn};

const PAGE_BREAK: char = '\x0c';

/// Text of one physical page. `number` is 0-based.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Page {
    pub number: usize,
    pub text: String,
}

/// Read a document into pages. PDFs go through `pdf-extract`, one entry per
/// physical page; anything else is read as UTF-8 text split at form feeds.
pub fn load_pages(path: &Path) -> Result<Vec<Page>> {
    let is_pdf = path
        .extension()
        .and_then(|e| e.to_str())
        .is_some_and(|e| e.eq_ignore_ascii_case("pdf"));

    let pages = if is_pdf {
        load_pdf_pages(path)?
    } else {
        let text = fs::read_to_string(path).with_context(|| format!("Cannot read {:?}", path))?;
        split_pages(&text)
    };

    if pages.iter().all(|p| p.text.trim().is_empty()) {
        warn!("No text in {:?}; it may be a scanned document", path);
    }

    debug!("Loaded {} pages from {:?}", pages.len(), path);
    Ok(pages)
}

fn load_pdf_pages(path: &Path) -> Result<Vec<Page>> {
    let bytes = fs::read(path).with_context(|| format!("Cannot read {:?}", path))?;
    let texts = pdf_extract::extract_text_from_mem_by_pages(&bytes)
        .map_err(|e| anyhow!("Failed to extract text from {:?}: {}", path, e))?;

    Ok(texts
        .into_iter()
        .enumerate()
        .map(|(number, text)| Page { number, text })
        .collect())
}

/// Split extracted text into pages at form feeds, dropping the empty tail
/// left by a final form feed. Page text is kept verbatim.
pub fn split_pages(text: &str) -> Vec<Page> {
    let mut parts: Vec<&str> = text.split(PAGE_BREAK).collect();
    if parts.len() > 1 && parts.last().is_some_and(|p| p.is_empty()) {
        parts.pop();
    }

    parts
        .into_iter()
        .enumerate()
        .map(|(number, text)| Page {
            number,
            text: text.to_string(),
        })
        .collect()
}
