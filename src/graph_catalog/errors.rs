//! # Graph Export Error Types
//!
//! Error handling for schema loading, record indexing and CSV emission.
//!
//! ## Error Categories
//!
//! - **Input Errors**: a required key is absent from a record or schema fragment
//! - **Emission Errors**: empty row streams and rows whose keys drift from the header
//! - **Configuration Errors**: schema file I/O and parsing issues
//!
//! Every error is fatal to the current export. Nothing is retried and no partial
//! output is kept.
//!
//! ## Usage Patterns
//!
//! ```ignore
//! // Name both the missing key and where it was expected
//! GraphExportError::missing_field_with_context(
//!     "surname",
//!     "record 17 while indexing NAME"
//! )
//! ```

use thiserror::Error;

#[derive(Debug, Error)]
pub enum GraphExportError {
    #[error("Missing required field `{field}` ({context})")]
    MissingField { field: String, context: String },
    #[error("No rows to emit for {context}: cannot infer a CSV header")]
    EmptyInput { context: String },
    #[error("Row {row} does not match the CSV header: expected [{expected}], found [{found}]")]
    SchemaMismatch {
        row: usize,
        expected: String,
        found: String,
    },
    #[error("`{reference}` is neither a readable schema file nor a predefined schema")]
    UnknownSchema { reference: String },
    #[error("Failed to read configuration file: {error}")]
    ConfigReadError { error: String },
    #[error("Failed to parse configuration: {error}")]
    ConfigParseError { error: String },
    #[error("Invalid configuration: {message}")]
    InvalidConfig { message: String },
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),
}

pub type Result<T> = std::result::Result<T, GraphExportError>;

/// Helper methods for creating errors with context information
impl GraphExportError {
    /// Create a MissingField error naming where the field was expected
    ///
    /// # Example
    /// ```ignore
    /// GraphExportError::missing_field_with_context("colname", "columns[1] of NodeSpec ADDRESS")
    /// ```
    pub fn missing_field_with_context(field: impl Into<String>, context: impl Into<String>) -> Self {
        GraphExportError::MissingField {
            field: field.into(),
            context: context.into(),
        }
    }

    /// Create an InvalidConfig error for a schema fragment of the wrong shape
    pub fn invalid_config_with_context(
        message: impl Into<String>,
        context: impl Into<String>,
    ) -> Self {
        GraphExportError::InvalidConfig {
            message: format!("{}\n  Context: {}", message.into(), context.into()),
        }
    }

    /// Create a SchemaMismatch error from the header and the offending row's keys
    pub fn schema_mismatch<'a>(
        row: usize,
        expected: impl IntoIterator<Item = &'a String>,
        found: impl IntoIterator<Item = &'a String>,
    ) -> Self {
        let join = |keys: Vec<&String>| {
            keys.into_iter()
                .map(String::as_str)
                .collect::<Vec<_>>()
                .join(", ")
        };
        GraphExportError::SchemaMismatch {
            row,
            expected: join(expected.into_iter().collect()),
            found: join(found.into_iter().collect()),
        }
    }
}
