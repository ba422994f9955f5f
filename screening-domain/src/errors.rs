use thiserror::Error;

/// Reasons a batch is rejected before any rule runs.
#[derive(Debug, Error)]
pub enum LoadError {
    #[error("missing required column '{0}'")]
    MissingColumn(String),
    #[error("row {row}: unparsable timestamp '{value}'")]
    UnparsableTimestamp { row: usize, value: String },
    #[error("row {row}: timestamp '{value}' uses a different UTC offset than earlier rows")]
    MixedOffsets { row: usize, value: String },
    #[error("row {row}: invalid amount '{value}'")]
    InvalidAmount { row: usize, value: String },
    #[error("malformed input: {0}")]
    Malformed(String),
    #[error(transparent)]
    Io(#[from] std::io::Error),
}
