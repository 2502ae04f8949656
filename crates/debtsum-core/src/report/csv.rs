//! CSV rendering of the debt summary.

use std::path::{Path, PathBuf};

use crate::aggregate::SummaryRecord;
use crate::error::DebtSumError;

use super::artifact_path;

/// Write the summary as a `personA,personB,total` CSV file in record order.
///
/// Returns the generated file's path. Totals are written in shortest decimal
/// form (`120.54`, `25.3`, `5`), the representation fast-csv-style writers
/// emit for already-rounded values.
pub fn write_csv_report(
    records: &[SummaryRecord],
    output_dir: &Path,
) -> Result<PathBuf, DebtSumError> {
    let path = artifact_path(output_dir, "csv")?;

    let mut writer = csv::Writer::from_path(&path)?;
    writer.write_record(["personA", "personB", "total"])?;
    for record in records {
        let total = format_total(record.total);
        writer.write_record([
            record.person_a.as_str(),
            record.person_b.as_str(),
            total.as_str(),
        ])?;
    }
    writer.flush()?;

    Ok(path)
}

/// Shortest round-trip form of an already-rounded total.
fn format_total(total: f64) -> String {
    total.to_string()
}
