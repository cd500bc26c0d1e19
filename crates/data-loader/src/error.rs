//! Error types for the data-loader crate.
//!
//! Every per-file load failure is a value of [`DataLoadError`]. The loader
//! collects them into a [`crate::LoadReport`] instead of returning early, so
//! one bad file never hides the status of the others.

use thiserror::Error;

/// Errors that can occur while resolving, reading, or validating datasets
///
/// The `#[derive(Error)]` macro from thiserror implements `std::error::Error`
/// and `Display` from the `#[error(...)]` attributes.
#[derive(Error, Debug)]
pub enum DataLoadError {
    /// None of the candidate file names exists under the data directory
    #[error("No file found for '{key}' (tried: {})", candidates.join(", "))]
    FileNotFound { key: String, candidates: Vec<String> },

    /// The file exists but holds no bytes (or only whitespace)
    #[error("File is empty: {path}")]
    EmptyFile { path: String },

    /// The file exists but could not be parsed as CSV
    #[error("Parse error in {file}: {reason}")]
    ParseError { file: String, reason: String },

    /// A column the consumer relies on is not in the header
    #[error("Missing column '{column}' in {file}")]
    ColumnMissing { file: String, column: String },

    /// The dataset registry itself is malformed
    #[error("Invalid registry: {0}")]
    InvalidRegistry(String),

    /// I/O error outside of dataset parsing (e.g. reading a registry file)
    #[error("I/O error: {0}")]
    IoError(#[from] std::io::Error),
}

impl DataLoadError {
    /// Short machine-friendly name of the failure kind
    pub fn kind(&self) -> &'static str {
        match self {
            DataLoadError::FileNotFound { .. } => "file_not_found",
            DataLoadError::EmptyFile { .. } => "empty_file",
            DataLoadError::ParseError { .. } => "parse_error",
            DataLoadError::ColumnMissing { .. } => "column_missing",
            DataLoadError::InvalidRegistry(_) => "invalid_registry",
            DataLoadError::IoError(_) => "io_error",
        }
    }
}

/// Convenience type alias for Results in this crate
pub type Result<T> = std::result::Result<T, DataLoadError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_file_not_found_lists_candidates() {
        let err = DataLoadError::FileNotFound {
            key: "top_10_mas_vistas".to_string(),
            candidates: vec!["top_10_mas_vistas.csv".to_string(), "top_10_mas_vistas".to_string()],
        };

        let message = err.to_string();
        assert!(message.contains("top_10_mas_vistas.csv, top_10_mas_vistas"));
        assert_eq!(err.kind(), "file_not_found");
    }
}
