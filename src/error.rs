//! Error types for the data pipeline.
//!
//! Application plumbing uses `anyhow`; the pipeline itself reports
//! these typed errors so callers can tell a missing input apart from
//! a malformed one.

use std::path::PathBuf;
use thiserror::Error;

/// Errors raised while loading, cleaning or exporting campaign data.
#[derive(Error, Debug)]
pub enum PipelineError {
    /// Neither an input file nor the default file is available.
    #[error("no input file given and default file not found: {}", default_file.display())]
    MissingInputFile { default_file: PathBuf },

    /// A required column is absent from the parsed table.
    #[error("required column '{column}' is missing")]
    MissingColumn { column: String },

    /// A numeric cell could not be read as a non-negative number.
    #[error("invalid value '{value}' in column '{column}' at row {row}")]
    InvalidValue {
        row: usize,
        column: String,
        value: String,
    },

    /// A record has more fields than the header row.
    #[error("row {row} has {found} fields but the header has {expected}")]
    RaggedRow {
        row: usize,
        expected: usize,
        found: usize,
    },

    /// The CSV file could not be parsed.
    #[error("failed to parse CSV {}: {source}", path.display())]
    Csv {
        path: PathBuf,
        #[source]
        source: csv::Error,
    },

    #[error(transparent)]
    Io(#[from] std::io::Error),
}

pub type PipelineResult<T> = std::result::Result<T, PipelineError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_messages() {
        let err = PipelineError::MissingColumn {
            column: "revenue".to_string(),
        };
        assert_eq!(err.to_string(), "required column 'revenue' is missing");

        let err = PipelineError::InvalidValue {
            row: 3,
            column: "orders".to_string(),
            value: "-1".to_string(),
        };
        assert!(err.to_string().contains("'-1'"));
        assert!(err.to_string().contains("row 3"));

        let err = PipelineError::MissingInputFile {
            default_file: PathBuf::from("data.csv"),
        };
        assert!(err.to_string().contains("data.csv"));
    }
}
