use thiserror::Error;

#[derive(Error, Debug)]
pub enum DebtSumError {
    /// One or more lines failed the lexical check. Carries every offending
    /// raw line in file order; the whole file is rejected.
    #[error("invalid CSV format ({} bad lines)", .lines.len())]
    InvalidFormat { lines: Vec<String> },

    /// The input file could not be read. Kept separate from [`Self::Io`] so
    /// callers can surface the reading-phase message distinctly from
    /// render-phase write failures.
    #[error("error reading the file: {0}")]
    Read(#[source] std::io::Error),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("CSV write error: {0}")]
    Csv(#[from] csv::Error),

    #[error("PDF encode error: {0}")]
    Pdf(#[from] lopdf::Error),
}
