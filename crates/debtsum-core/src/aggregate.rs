//! Debt aggregation: fold validated lines into per-pair totals.

use std::collections::HashMap;
use std::fs;
use std::path::Path;

use crate::error::DebtSumError;

/// One parsed input line. Transient: exists only while aggregating.
#[derive(Debug, Clone, PartialEq)]
pub struct DebtRecord {
    pub debtor: String,
    pub creditor: String,
    pub amount: f64,
}

/// Total owed from `person_a` to `person_b` across all matching input lines.
#[derive(Debug, Clone, PartialEq)]
pub struct SummaryRecord {
    pub person_a: String,
    pub person_b: String,
    pub total: f64,
}

/// Aggregate validated line text into per-pair totals.
///
/// Records are keyed by the `(debtor, creditor)` tuple: directional and
/// case-sensitive, so `(A,B)` and `(B,A)` never merge into one net record.
/// Output order is the first-occurrence order of each pair in the input.
///
/// Totals accumulate as raw `f64` sums and are rounded exactly once, at
/// output conversion, via `round_to_cents`. The rule is `f64::round` on the
/// cent value: half away from zero when the midpoint is representable,
/// otherwise whatever side the binary representation lands on (`2.005` is
/// stored slightly below the midpoint and rounds down).
pub fn summarize(content: &str) -> Vec<SummaryRecord> {
    let mut totals: HashMap<(String, String), f64> = HashMap::new();
    let mut order: Vec<(String, String)> = Vec::new();

    // `lines()` strips the trailing `\r`; the field text itself is never
    // trimmed, so names keep any surrounding whitespace and key separately.
    for line in content.lines() {
        if line.trim().is_empty() {
            continue;
        }

        let record = parse_line(line);
        let key = (record.debtor, record.creditor);
        match totals.get_mut(&key) {
            Some(total) => *total += record.amount,
            None => {
                totals.insert(key.clone(), record.amount);
                order.push(key);
            }
        }
    }

    order
        .into_iter()
        .map(|key| {
            let total = totals.remove(&key).unwrap_or(0.0);
            SummaryRecord {
                person_a: key.0,
                person_b: key.1,
                total: round_to_cents(total),
            }
        })
        .collect()
}

/// Read a debt file and aggregate it.
///
/// A read failure maps to [`DebtSumError::Read`] so callers surface it as a
/// reading-phase server failure, never as a validation failure.
pub fn summarize_file(path: &Path) -> Result<Vec<SummaryRecord>, DebtSumError> {
    let content = fs::read_to_string(path).map_err(DebtSumError::Read)?;
    Ok(summarize(&content))
}

/// Split one line into a [`DebtRecord`].
///
/// The validator has already guaranteed a well-formed amount in normal
/// operation; an unparseable amount falls back to zero rather than failing.
fn parse_line(line: &str) -> DebtRecord {
    let mut fields = line.splitn(3, ',');
    DebtRecord {
        debtor: fields.next().unwrap_or_default().to_string(),
        creditor: fields.next().unwrap_or_default().to_string(),
        amount: fields.next().and_then(|s| s.parse().ok()).unwrap_or(0.0),
    }
}

/// Round to two decimal places: `round(total * 100) / 100`.
fn round_to_cents(total: f64) -> f64 {
    (total * 100.0).round() / 100.0
}
