//! Report renderers for aggregated debt summaries.
//!
//! Both renderers are pure functions of the record slice apart from their one
//! file write; they share no state and may run concurrently. Each writes a
//! uniquely named `summarized_data_<token>` file under the caller-supplied
//! output directory, which is created if absent.

pub mod csv;
pub mod pdf;

use std::fs;
use std::path::{Path, PathBuf};
use std::sync::atomic::{AtomicU64, Ordering};

use crate::error::DebtSumError;

pub use self::csv::write_csv_report;
pub use self::pdf::write_pdf_report;

/// Process-wide sequence number appended to artifact names. Rapid sequential
/// requests can land on the same millisecond timestamp; the counter keeps
/// names collision-free anyway.
static NEXT_ARTIFACT: AtomicU64 = AtomicU64::new(0);

/// Build `summarized_data_<millis>_<seq>.<extension>` under `output_dir`,
/// creating the directory if needed.
fn artifact_path(output_dir: &Path, extension: &str) -> Result<PathBuf, DebtSumError> {
    fs::create_dir_all(output_dir)?;

    let millis = chrono::Utc::now().timestamp_millis();
    let seq = NEXT_ARTIFACT.fetch_add(1, Ordering::Relaxed);
    Ok(output_dir.join(format!("summarized_data_{}_{}.{}", millis, seq, extension)))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn artifact_paths_never_collide() {
        let dir = tempfile::tempdir().unwrap();
        let mut seen = std::collections::HashSet::new();
        for _ in 0..100 {
            let path = artifact_path(dir.path(), "csv").unwrap();
            assert!(seen.insert(path), "duplicate artifact path");
        }
    }

    #[test]
    fn creates_missing_output_directory() {
        let dir = tempfile::tempdir().unwrap();
        let nested = dir.path().join("processed_files");
        let path = artifact_path(&nested, "pdf").unwrap();
        assert!(nested.is_dir());
        assert!(path.starts_with(&nested));
    }
}
