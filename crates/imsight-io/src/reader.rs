//! Data reader trait and common types
//!
//! The `DataReader` trait provides a uniform interface for turning a
//! source file into an in-memory `Table`.

use crate::schema::DataSchema;
use crate::table::Table;
use std::collections::HashMap;
use thiserror::Error;

/// Errors that can occur during I/O operations
#[derive(Debug, Error)]
pub enum IoError {
    #[error("File not found: {0}")]
    FileNotFound(String),

    #[error("Failed to open file: {0}")]
    OpenFailed(String),

    #[error("Invalid format: {0}")]
    InvalidFormat(String),

    #[error("Parse error at record {record}: {message}")]
    Parse { record: u64, message: String },

    #[error("Column '{column}' has {actual} rows, expected {expected}")]
    ShapeMismatch {
        column: String,
        expected: usize,
        actual: usize,
    },

    #[error("Duplicate column name: {0}")]
    DuplicateColumn(String),

    #[error("Invalid delimiter {0:?}: must be a single ASCII character")]
    InvalidDelimiter(String),
}

/// Result type for I/O operations
pub type IoResult<T> = Result<T, IoError>;

/// Trait for reading a whole table from a source
pub trait DataReader {
    /// Read the schema (column names, types, record count)
    fn read_schema(&self) -> IoResult<DataSchema> {
        Ok(self.read_table()?.schema().clone())
    }

    /// Read every record into memory
    fn read_table(&self) -> IoResult<Table>;

    /// Get metadata as key-value pairs
    fn metadata(&self) -> &HashMap<String, String>;

    /// Get the file path (if applicable)
    fn path(&self) -> Option<&str> {
        None
    }

    /// Get the format name
    fn format_name(&self) -> &'static str;
}

/// Parse a user-supplied delimiter such as `;`, `,` or `\t`
pub fn parse_delimiter(raw: &str) -> IoResult<u8> {
    let unescaped = match raw {
        "\\t" | "tab" => "\t",
        other => other,
    };
    match unescaped.as_bytes() {
        [b] if b.is_ascii() => Ok(*b),
        _ => Err(IoError::InvalidDelimiter(raw.to_string())),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_delimiter() {
        assert_eq!(parse_delimiter(";").unwrap(), b';');
        assert_eq!(parse_delimiter(",").unwrap(), b',');
        assert_eq!(parse_delimiter("\\t").unwrap(), b'\t');
        assert_eq!(parse_delimiter("tab").unwrap(), b'\t');
    }

    #[test]
    fn test_parse_delimiter_rejects_bad_input() {
        assert!(matches!(
            parse_delimiter(""),
            Err(IoError::InvalidDelimiter(_))
        ));
        assert!(matches!(
            parse_delimiter(";;"),
            Err(IoError::InvalidDelimiter(_))
        ));
        assert!(matches!(
            parse_delimiter("§"),
            Err(IoError::InvalidDelimiter(_))
        ));
    }
}
