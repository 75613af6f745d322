use thiserror::Error;

// ---------------------------------------------------------------------------
// Error taxonomy for the data layer
// ---------------------------------------------------------------------------

/// Errors produced while ingesting or exporting tabular data.
#[derive(Error, Debug)]
pub enum DataError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),

    /// File contained no header row at all.
    #[error("file is empty")]
    EmptyFile,

    /// Header row present but without a single named column.
    #[error("no columns found")]
    NoColumns,

    #[error("unsupported file extension: .{0}")]
    UnsupportedExtension(String),
}
