use thiserror::Error;

/// Errors raised while tokenizing CSV text.
#[derive(Debug, Error)]
pub enum CsvError {
    /// The underlying reader rejected the input
    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),

    /// Writing normalized CSV failed
    #[error("CSV write error: {0}")]
    Write(String),
}

impl CsvError {
    pub fn write(msg: impl Into<String>) -> Self {
        Self::Write(msg.into())
    }
}
