//! Debt summarization core
//!
//! This crate turns a raw `debtor,creditor,amount` debt file into an ordered
//! per-pair summary and renders that summary as CSV and PDF report files.
//!
//! Pipeline:
//! - `validate`: lexical check of every line, collecting all offenders
//! - `aggregate`: fold validated lines into directional per-pair totals
//! - `report`: write the totals as uniquely named CSV and PDF artifacts
//!
//! The crate is synchronous and HTTP-free; the `debtsum-api` server wires it
//! to an upload endpoint.

pub mod aggregate;
pub mod error;
pub mod report;
pub mod validate;

pub use aggregate::{summarize, summarize_file, DebtRecord, SummaryRecord};
pub use error::DebtSumError;
pub use report::{write_csv_report, write_pdf_report};
pub use validate::validate_lines;
