//! PDF rendering of the debt summary.
//!
//! Builds the document from scratch with lopdf: a centered, underlined
//! "Summarized Debts" title followed by one `A owes B: $x.xx` line per
//! record, spilling onto further pages when the cursor reaches the bottom
//! margin.

use std::fs;
use std::path::{Path, PathBuf};

use lopdf::content::{Content, Operation};
use lopdf::{Dictionary, Document, Object, Stream, StringFormat};

use crate::aggregate::SummaryRecord;
use crate::error::DebtSumError;

use super::artifact_path;

// US Letter, in PDF points.
const PAGE_WIDTH: i64 = 612;
const PAGE_HEIGHT: i64 = 792;
const MARGIN: i64 = 72;
const FONT_SIZE: i64 = 12;

/// Vertical gap before each record line, blank space included.
const LINE_GAP: i64 = 28;

/// Rough Helvetica advance width as a fraction of the font size; close
/// enough to center a short title without carrying full font metrics.
const APPROX_CHAR_WIDTH: f64 = 0.5;

/// Write the summary as a PDF file and return its path.
pub fn write_pdf_report(
    records: &[SummaryRecord],
    output_dir: &Path,
) -> Result<PathBuf, DebtSumError> {
    let path = artifact_path(output_dir, "pdf")?;
    let bytes = render_document(records)?;
    fs::write(&path, bytes)?;
    Ok(path)
}

/// Assemble the full document: font and resources, one content stream per
/// page, page tree, catalog.
fn render_document(records: &[SummaryRecord]) -> Result<Vec<u8>, DebtSumError> {
    let mut doc = Document::with_version("1.7");
    let pages_id = doc.new_object_id();

    let font_id = doc.add_object(Dictionary::from_iter(vec![
        ("Type", Object::Name(b"Font".to_vec())),
        ("Subtype", Object::Name(b"Type1".to_vec())),
        ("BaseFont", Object::Name(b"Helvetica".to_vec())),
    ]));
    let resources = Dictionary::from_iter(vec![(
        "Font",
        Object::Dictionary(Dictionary::from_iter(vec![(
            "F1",
            Object::Reference(font_id),
        )])),
    )]);

    let mut page_ids = Vec::new();
    for operations in build_pages(records) {
        let content = Content { operations };
        let content_id = doc.add_object(Stream::new(Dictionary::new(), content.encode()?));

        let page = Dictionary::from_iter(vec![
            ("Type", Object::Name(b"Page".to_vec())),
            ("Parent", Object::Reference(pages_id)),
            (
                "MediaBox",
                Object::Array(vec![
                    Object::Integer(0),
                    Object::Integer(0),
                    Object::Integer(PAGE_WIDTH),
                    Object::Integer(PAGE_HEIGHT),
                ]),
            ),
            ("Contents", Object::Reference(content_id)),
        ]);
        page_ids.push(doc.add_object(page));
    }

    let pages = Dictionary::from_iter(vec![
        ("Type", Object::Name(b"Pages".to_vec())),
        ("Count", Object::Integer(page_ids.len() as i64)),
        (
            "Kids",
            Object::Array(page_ids.iter().map(|id| Object::Reference(*id)).collect()),
        ),
        // Inherited by every kid page.
        ("Resources", Object::Dictionary(resources)),
    ]);
    doc.objects.insert(pages_id, Object::Dictionary(pages));

    let catalog_id = doc.add_object(Dictionary::from_iter(vec![
        ("Type", Object::Name(b"Catalog".to_vec())),
        ("Pages", Object::Reference(pages_id)),
    ]));
    doc.trailer.set("Root", Object::Reference(catalog_id));

    let mut buffer = Vec::new();
    doc.save_to(&mut buffer)?;
    Ok(buffer)
}

/// Lay records out into per-page operation lists. The first page carries the
/// title; a new page starts whenever the next line would cross the bottom
/// margin.
fn build_pages(records: &[SummaryRecord]) -> Vec<Vec<Operation>> {
    let mut pages = Vec::new();
    let mut ops = title_operations();
    let mut cursor = PAGE_HEIGHT - MARGIN;

    for record in records {
        cursor -= LINE_GAP;
        if cursor < MARGIN {
            pages.push(std::mem::take(&mut ops));
            cursor = PAGE_HEIGHT - MARGIN - LINE_GAP;
        }

        let line = format!(
            "{} owes {}: ${:.2}",
            record.person_a, record.person_b, record.total
        );
        ops.extend(text_operations(&line, MARGIN, cursor));
    }

    pages.push(ops);
    pages
}

/// Centered title with an underline stroked just below the baseline.
fn title_operations() -> Vec<Operation> {
    let title = "Summarized Debts";
    let width = (title.len() as f64 * APPROX_CHAR_WIDTH * FONT_SIZE as f64) as i64;
    let x = (PAGE_WIDTH - width) / 2;
    let y = PAGE_HEIGHT - MARGIN;

    let mut ops = text_operations(title, x, y);
    ops.push(Operation::new(
        "m",
        vec![Object::Integer(x), Object::Integer(y - 2)],
    ));
    ops.push(Operation::new(
        "l",
        vec![Object::Integer(x + width), Object::Integer(y - 2)],
    ));
    ops.push(Operation::new("S", vec![]));
    ops
}

/// One line of left-anchored text at `(x, y)`.
fn text_operations(text: &str, x: i64, y: i64) -> Vec<Operation> {
    vec![
        Operation::new("BT", vec![]),
        Operation::new(
            "Tf",
            vec![Object::Name(b"F1".to_vec()), Object::Integer(FONT_SIZE)],
        ),
        Operation::new("Td", vec![Object::Integer(x), Object::Integer(y)]),
        Operation::new(
            "Tj",
            vec![Object::String(
                text.as_bytes().to_vec(),
                StringFormat::Literal,
            )],
        ),
        Operation::new("ET", vec![]),
    ]
}
