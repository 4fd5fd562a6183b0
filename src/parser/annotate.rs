use tracing::debug;

use super::spans::{find_spans, strip_blank_edges, Rule};
use crate::error::ExtractError;

/// Insert a `[Page n]` marker (n = `page_number + 1`) before every record
/// start on the page. Question starts win; guideline starts are only used
/// when the page has no question at all.
pub fn annotate(text: &str, page_number: usize) -> Result<String, ExtractError> {
    let mut spans = find_spans(text, Rule::Question);
    if spans.is_empty() {
        spans = find_spans(text, Rule::Guideline);
    }
    debug!(page = page_number, starts = spans.len(), "annotating page");

    let starts: Vec<&str> = spans
        .into_iter()
        .map(|r| strip_blank_edges(&text[r]))
        .collect();
    insert_markers(text, &starts, page_number)
}

/// Insert one marker before the first occurrence of each record start.
///
/// Every lookup runs against the text as modified by the previous
/// insertions, so offsets never go stale.
pub fn insert_markers(
    text: &str,
    starts: &[&str],
    page_number: usize,
) -> Result<String, ExtractError> {
    let marker = page_marker(page_number + 1);
    let mut out = text.to_string();

    for &start in starts {
        let at = out.find(start).ok_or_else(|| ExtractError::SpanNotFound {
            page: page_number,
            span: start.to_string(),
        })?;
        out.insert_str(at, &marker);
    }

    Ok(out)
}

pub fn page_marker(page: usize) -> String {
    format!("[Page {}]", page)
}
