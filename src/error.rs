use thiserror::Error;

/// Data-format violations found while turning pages into records.
/// All of them are fatal for the document being processed.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum ExtractError {
    #[error("section divider {divider:?} not found")]
    MissingDivider { divider: &'static str },

    #[error("section divider {divider:?} found {count} times, expected exactly once")]
    DuplicateDivider { divider: &'static str, count: usize },

    #[error("record start {span:?} not found in text of page {page}")]
    SpanNotFound { page: usize, span: String },

    #[error("record {index} has no page marker and no earlier record to inherit one from")]
    MissingPageMarker { index: usize },

    #[error("record {index} has a malformed page marker: {span:?}")]
    MalformedPageMarker { index: usize, span: String },

    #[error("record {index} has no line break between question and answer: {content:?}")]
    MissingAnswer { index: usize, content: String },
}
