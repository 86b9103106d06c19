use std::path::PathBuf;

use thiserror::Error;

/// Errors raised while loading a film table.
#[derive(Error, Debug)]
pub enum DataError {
    /// The data file does not exist. The dashboard must not render anything else.
    #[error("Data file '{}' not found. Make sure it is in the working directory.", path.display())]
    MissingDataFile { path: PathBuf },

    #[error("Unsupported file extension: .{0}")]
    UnsupportedFormat(String),

    /// A required column is not present in the header / schema.
    #[error("Required column '{column}' is missing")]
    MissingColumn { column: &'static str },

    #[error("Row {row}: required value '{column}' is empty")]
    MissingValue { row: usize, column: &'static str },

    #[error("Row {row}: '{value}' is not a valid {column}")]
    InvalidValue {
        row: usize,
        column: &'static str,
        value: String,
    },

    #[error("Dataset contains no films")]
    EmptyDataset,

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("Arrow error: {0}")]
    Arrow(#[from] arrow::error::ArrowError),

    #[error("Parquet error: {0}")]
    Parquet(#[from] parquet::errors::ParquetError),
}

pub type Result<T> = std::result::Result<T, DataError>;
