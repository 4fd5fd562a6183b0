use std::sync::LazyLock;

use regex::Regex;
use serde::{Deserialize, Serialize};
use tracing::debug;

use super::spans::strip_blank_edges;
use crate::error::ExtractError;

static MARKER_RE: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"\[Page (\d+)\]").unwrap());

/// One question/answer or guideline unit, ready for indexing.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Record {
    pub content: String,
    pub question: String,
    pub answer: String,
    /// 1-based page the record starts on.
    pub page_number: usize,
    pub source: String,
}

/// Remove every `[Page n]` marker.
pub fn strip_markers(text: &str) -> String {
    MARKER_RE.replace_all(text, "").into_owned()
}

/// Build records from raw spans in order.
///
/// A span without its own marker inherits the page of the last span that
/// had one; the inherited page never leaks across calls.
pub fn build_records<'a, I>(spans: I, source: &str) -> Result<Vec<Record>, ExtractError>
where
    I: IntoIterator<Item = &'a str>,
{
    let (_, records) = spans.into_iter().enumerate().try_fold(
        (None, Vec::new()),
        |(last_seen_page, mut records), (i, span)| {
            let index = i + 1;
            let page = span_page(index, span, last_seen_page)?;
            let record = build_record(index, span, page, source)?;
            debug!(index, page, question = %record.question, "built record");
            records.push(record);
            Ok::<_, ExtractError>((Some(page), records))
        },
    )?;
    Ok(records)
}

fn span_page(index: usize, span: &str, last_seen_page: Option<usize>) -> Result<usize, ExtractError> {
    if !span.contains("[Page") {
        return last_seen_page.ok_or(ExtractError::MissingPageMarker { index });
    }
    MARKER_RE
        .captures(span)
        .and_then(|caps| caps[1].parse().ok())
        .ok_or_else(|| ExtractError::MalformedPageMarker {
            index,
            span: span.to_string(),
        })
}

fn build_record(index: usize, span: &str, page: usize, source: &str) -> Result<Record, ExtractError> {
    let stripped = strip_markers(span);
    let content = strip_blank_edges(stripped.trim_matches('\n'));

    let split = content.find('\n').ok_or_else(|| ExtractError::MissingAnswer {
        index,
        content: content.to_string(),
    })?;
    let (question, answer) = content.split_at(split);

    Ok(Record {
        content: content.to_string(),
        question: question.trim().to_string(),
        answer: answer.trim_matches('\n').to_string(),
        page_number: page,
        source: source.to_string(),
    })
}
