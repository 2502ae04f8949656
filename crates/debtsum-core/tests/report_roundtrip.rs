//! Integration tests for the full validate → aggregate → render pipeline.

use std::fs;

use debtsum_core::{summarize, validate_lines, write_csv_report, write_pdf_report, SummaryRecord};
use pretty_assertions::assert_eq;

const SAMPLE: &str = "Alex,Beatrice,120.54\n\
                      Beatrice,Alex,5.74\n\
                      Carl,Alex,60.88\n\
                      Carl,Beatrice,25.3\n\
                      Beatrice,Carl,168.08\n";

fn sample_records() -> Vec<SummaryRecord> {
    validate_lines(SAMPLE).unwrap();
    summarize(SAMPLE)
}

#[test]
fn csv_report_matches_expected_rows() {
    let dir = tempfile::tempdir().unwrap();
    let path = write_csv_report(&sample_records(), dir.path()).unwrap();

    let content = fs::read_to_string(&path).unwrap();
    let expected = "personA,personB,total\n\
                    Alex,Beatrice,120.54\n\
                    Beatrice,Alex,5.74\n\
                    Carl,Alex,60.88\n\
                    Carl,Beatrice,25.3\n\
                    Beatrice,Carl,168.08\n";
    assert_eq!(content, expected);
}

#[test]
fn csv_report_round_trips_through_the_aggregator() {
    let dir = tempfile::tempdir().unwrap();
    let records = sample_records();
    let path = write_csv_report(&records, dir.path()).unwrap();

    // Re-read the report rows and feed them back through the aggregator as
    // `debtor,creditor,amount` lines; the triples must survive unchanged.
    let mut reader = csv::Reader::from_path(&path).unwrap();
    let mut lines = String::new();
    for row in reader.records() {
        let row = row.unwrap();
        lines.push_str(&format!("{},{},{}\n", &row[0], &row[1], &row[2]));
    }

    let reparsed = summarize(&lines);
    assert_eq!(reparsed, records);
}

#[test]
fn pdf_report_contains_title_and_every_record_line() {
    let dir = tempfile::tempdir().unwrap();
    let records = sample_records();
    let path = write_pdf_report(&records, dir.path()).unwrap();

    let bytes = fs::read(&path).unwrap();
    let doc = lopdf::Document::load_mem(&bytes).unwrap();
    assert!(!doc.get_pages().is_empty());

    let text = pdf_extract::extract_text_from_mem(&bytes).unwrap();
    assert!(text.contains("Summarized Debts"));
    assert!(text.contains("Alex owes Beatrice: $120.54"));
    assert!(text.contains("Beatrice owes Alex: $5.74"));
    assert!(text.contains("Carl owes Alex: $60.88"));
    assert!(text.contains("Carl owes Beatrice: $25.30"));
    assert!(text.contains("Beatrice owes Carl: $168.08"));
}

#[test]
fn many_records_produce_a_multi_page_pdf() {
    let dir = tempfile::tempdir().unwrap();
    let records: Vec<SummaryRecord> = (0..60)
        .map(|i| SummaryRecord {
            person_a: "Alex".to_string(),
            person_b: "Beatrice".to_string(),
            total: i as f64,
        })
        .collect();

    let path = write_pdf_report(&records, dir.path()).unwrap();
    let doc = lopdf::Document::load_mem(&fs::read(&path).unwrap()).unwrap();
    assert!(doc.get_pages().len() > 1);
}

#[test]
fn renderers_write_distinct_files() {
    let dir = tempfile::tempdir().unwrap();
    let records = sample_records();
    let csv_path = write_csv_report(&records, dir.path()).unwrap();
    let pdf_path = write_pdf_report(&records, dir.path()).unwrap();

    assert_ne!(csv_path, pdf_path);
    assert!(csv_path.exists());
    assert!(pdf_path.exists());
}
