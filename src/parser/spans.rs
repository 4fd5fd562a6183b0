use std::ops::Range;

/// Record-start rules. The plain rules run on raw page text, the marked
/// rules on text that already carries `[Page n]` markers.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Rule {
    /// `Q: ` / `Q. ` up to the next opener or end of line.
    Question,
    /// `\n \n` + letter up to the next opener or end of line.
    Guideline,
    /// `[Page n]Q: ` / `[Page n]Q. ` up to the next opener or end of region.
    MarkedQuestion,
    /// `\n \n[Page n]` + letter up to the next opener or end of region.
    MarkedGuideline,
}

impl Rule {
    /// Length of the opener starting at `at`, if there is one.
    fn opener_len(self, b: &[u8], at: usize) -> Option<usize> {
        match self {
            Rule::Question => question_at(b, at),
            Rule::Guideline => {
                let n = blank_line_at(b, at)?;
                letter_at(b, at + n).map(|l| n + l)
            }
            Rule::MarkedQuestion => {
                let m = marker_at(b, at)?;
                question_at(b, at + m).map(|q| m + q)
            }
            Rule::MarkedGuideline => {
                let n = blank_line_at(b, at)?;
                let m = marker_at(b, at + n)?;
                letter_at(b, at + n + m).map(|l| n + m + l)
            }
        }
    }

    fn stops_at_line_end(self) -> bool {
        matches!(self, Rule::Question | Rule::Guideline)
    }
}

/// Find every record-start span of `rule` in `text`, in document order.
///
/// A span runs from its opener up to (not including) the next opener, or
/// the end of the text. Line-bounded rules also stop at the next `\n`.
/// Scanning resumes where the previous span ended, so spans never overlap.
pub fn find_spans(text: &str, rule: Rule) -> Vec<Range<usize>> {
    let b = text.as_bytes();
    let mut spans = Vec::new();
    let mut i = 0;

    while i < b.len() {
        let Some(open) = rule.opener_len(b, i) else {
            i += 1;
            continue;
        };

        let mut end = i + open;
        while end < b.len() {
            if rule.stops_at_line_end() && b[end] == b'\n' {
                break;
            }
            if rule.opener_len(b, end).is_some() {
                break;
            }
            end += 1;
        }

        spans.push(i..end);
        i = end;
    }

    spans
}

/// Length of a `[Page <digits>]` marker starting at `at`.
pub fn marker_at(b: &[u8], at: usize) -> Option<usize> {
    const PREFIX: &[u8] = b"[Page ";
    if !b.get(at..)?.starts_with(PREFIX) {
        return None;
    }
    let digits_start = at + PREFIX.len();
    let digits = b[digits_start..]
        .iter()
        .take_while(|c| c.is_ascii_digit())
        .count();
    if digits == 0 || b.get(digits_start + digits) != Some(&b']') {
        return None;
    }
    Some(PREFIX.len() + digits + 1)
}

fn question_at(b: &[u8], at: usize) -> Option<usize> {
    match b.get(at..at + 3)? {
        [b'Q', b':' | b'.', b' '] => Some(3),
        _ => None,
    }
}

fn blank_line_at(b: &[u8], at: usize) -> Option<usize> {
    (b.get(at..at + 3)? == b"\n \n").then_some(3)
}

fn letter_at(b: &[u8], at: usize) -> Option<usize> {
    b.get(at)?.is_ascii_alphabetic().then_some(1)
}

/// Trim runs of `'\n'` and `' '` from both ends.
pub fn strip_blank_edges(s: &str) -> &str {
    s.trim_matches(|c| c == '\n' || c == ' ')
}
