pub mod annotate;
pub mod records;
pub mod sections;
pub mod spans;

use tracing::{debug, info};

use crate::error::ExtractError;
use crate::loader::Page;
use records::Record;
use spans::{find_spans, Rule};

/// Full pipeline: pages → annotated stream → regions → records.
pub fn extract_records(pages: &[Page], source: &str) -> Result<Vec<Record>, ExtractError> {
    let merged = pages
        .iter()
        .map(|p| annotate::annotate(&p.text, p.number))
        .collect::<Result<String, _>>()?;
    segment_and_build(&merged, source)
}

/// Split a marker-annotated stream into regions and build their records,
/// FAQ records first, guideline records after.
pub fn segment_and_build(merged: &str, source: &str) -> Result<Vec<Record>, ExtractError> {
    let regions = sections::split_regions(merged)?;
    debug!(
        guidelines_bytes = regions.guidelines.len(),
        faq_bytes = regions.faq.len(),
        "split regions"
    );

    let mut records = extract_region(regions.faq, Rule::MarkedQuestion, source)?;
    let faq_count = records.len();
    records.extend(extract_region(regions.guidelines, Rule::MarkedGuideline, source)?);

    info!(
        source,
        faq = faq_count,
        guidelines = records.len() - faq_count,
        "extracted records"
    );
    Ok(records)
}

/// Records of one region. A region without record starts yields none.
pub fn extract_region(region: &str, rule: Rule, source: &str) -> Result<Vec<Record>, ExtractError> {
    let spans = find_spans(region, rule);
    records::build_records(spans.into_iter().map(|r| &region[r]), source)
}

#[cfg(test)]
mod tests {
    use super::*;

    const SOURCE: &str = "policy.pdf";

    fn page(number: usize, text: &str) -> Page {
        Page {
            number,
            text: text.to_string(),
        }
    }

    fn qa(records: &[Record]) -> Vec<(&str, &str, usize)> {
        records
            .iter()
            .map(|r| (r.question.as_str(), r.answer.as_str(), r.page_number))
            .collect()
    }

    #[test]
    fn single_page_questions() {
        let annotated = annotate::annotate("Q: What is X?\nX is Y.\nQ: How?\nLike this.", 0).unwrap();
        let records = extract_region(&annotated, Rule::MarkedQuestion, SOURCE).unwrap();
        assert_eq!(
            qa(&records),
            vec![("Q: What is X?", "X is Y.", 1), ("Q: How?", "Like this.", 1)]
        );
    }

    #[test]
    fn divider_at_start_of_second_page() {
        let pages = [
            page(0, "Staff Guide\n \nArrive by nine.\nDoors open at 8:30.\n \nLock up.\nLast one out."),
            page(1, "Frequently Asked Questions:  \nQ: Parking?\nLot B.\nQ. Lunch?\nNoon to one.\n"),
        ];
        let records = extract_records(&pages, SOURCE).unwrap();
        assert_eq!(
            qa(&records),
            vec![
                ("Q: Parking?", "Lot B.", 2),
                ("Q. Lunch?", "Noon to one.", 2),
                ("Arrive by nine.", "Doors open at 8:30.", 1),
                ("Lock up.", "Last one out.", 1),
            ]
        );
        assert!(records.iter().all(|r| r.source == SOURCE));
    }

    #[test]
    fn record_spanning_a_page_break_keeps_its_start_page() {
        let pages = [
            page(0, "Frequently Asked Questions:  \nQ: Long one?\nPart one"),
            page(1, " continues here.\nQ: Next?\nShort.\n"),
        ];
        let records = extract_records(&pages, SOURCE).unwrap();
        assert_eq!(
            qa(&records),
            vec![
                ("Q: Long one?", "Part one continues here.", 1),
                ("Q: Next?", "Short.", 2),
            ]
        );
    }

    #[test]
    fn record_counts_match_span_counts() {
        let pages = [
            page(0, "Intro\n \nOne\na\n \nTwo\nb\n \nThree\nc"),
            page(1, "Frequently Asked Questions:  Q: 1?\n1\nQ: 2?\n2"),
        ];
        let merged: String = pages
            .iter()
            .map(|p| annotate::annotate(&p.text, p.number).unwrap())
            .collect();
        let regions = sections::split_regions(&merged).unwrap();
        let faq_spans = find_spans(regions.faq, Rule::MarkedQuestion).len();
        let guideline_spans = find_spans(regions.guidelines, Rule::MarkedGuideline).len();

        let records = segment_and_build(&merged, SOURCE).unwrap();
        assert_eq!((faq_spans, guideline_spans), (2, 3));
        assert_eq!(records.len(), faq_spans + guideline_spans);
    }

    #[test]
    fn missing_divider_yields_no_records() {
        let pages = [page(0, "Q: a?\nb")];
        assert_eq!(
            extract_records(&pages, SOURCE).unwrap_err(),
            ExtractError::MissingDivider {
                divider: sections::FAQ_DIVIDER
            }
        );
    }

    #[test]
    fn empty_regions_yield_no_records() {
        let records = segment_and_build("cover\nFrequently Asked Questions:  none yet", SOURCE).unwrap();
        assert!(records.is_empty());
    }

    #[test]
    fn content_has_no_marker_residue() {
        let pages = [
            page(0, "Guide\n \nRule\nbody\n"),
            page(1, "Frequently Asked Questions:  \nQ: a?\nb\n"),
            page(2, "Q: c?\nd\n"),
        ];
        for r in extract_records(&pages, SOURCE).unwrap() {
            assert_eq!(records::strip_markers(&r.content), r.content);
        }
    }

    #[test]
    fn fixture_document() {
        let text = std::fs::read_to_string("tests/fixtures/handbook.txt").unwrap();
        let pages = crate::loader::split_pages(&text);
        let records = extract_records(&pages, "handbook.txt").unwrap();
        assert_eq!(
            qa(&records),
            vec![
                ("Q: Can I work remotely?", "Yes, two days a week.", 3),
                ("Q. Who approves expenses?", "Your manager, within five working days.", 3),
                ("Q: Is there a dress code?", "Business casual, jeans on Fridays.", 4),
                ("Remote work", "Staff may work remotely two days a week.\nManagers approve schedules.", 1),
                ("Expenses", "Expenses must be filed monthly.\nReceipts are required.", 2),
                ("Equipment", "Laptops are issued on day one.", 2),
            ]
        );
    }
}
