//! Error types for ACH file construction and generation.

use thiserror::Error;

/// Result type alias for ACH operations
pub type Result<T> = std::result::Result<T, AchError>;

/// Errors that can occur while building or rendering an ACH file.
///
/// Every validation error is raised at construction time; no partially
/// valid entry, batch or file is ever handed back to the caller.
#[derive(Error, Debug)]
pub enum AchError {
    /// A field marked required has no value
    #[error("{record}: required field `{field}` has no value")]
    MissingRequiredField {
        record: &'static str,
        field: &'static str,
    },

    /// A rendered value is wider than its field
    #[error("{record}: field `{field}` is {actual} characters wide, limit is {width}")]
    InvalidLength {
        record: &'static str,
        field: &'static str,
        width: usize,
        actual: usize,
    },

    /// A value does not match its field's character class
    #[error("{record}: field `{field}` must be {expected}")]
    InvalidDataType {
        record: &'static str,
        field: &'static str,
        expected: &'static str,
    },

    /// Routing number check digit mismatch (or not nine digits)
    #[error("Invalid routing number: {0:?}")]
    InvalidRoutingNumber(String),

    /// Service class code outside the recognized set
    #[error("Invalid service class code: {0:?}")]
    InvalidServiceClassCode(String),

    /// Transaction code outside the recognized set
    #[error("Invalid transaction code: {0:?}")]
    InvalidTransactionCode(String),

    /// A record layout whose positions or widths do not describe a 94-column line
    #[error("Invalid layout for {record}: {message}")]
    InvalidLayout {
        record: &'static str,
        message: String,
    },

    /// An entry whose layout does not belong in the batch it was added to
    #[error("A {entry} entry cannot be added to a {batch} batch")]
    IncompatibleEntry {
        batch: &'static str,
        entry: &'static str,
    },

    /// An IAT entry added to a batch without one of its mandatory addenda
    #[error("IAT entry is missing mandatory addenda type {type_code}")]
    MissingIatAddenda { type_code: &'static str },

    /// Amount text that is not a decimal number
    #[error("Invalid amount: {0:?}")]
    InvalidAmount(String),

    /// Date text that is not `YYYY-MM-DD`
    #[error("Invalid date: {0:?}")]
    InvalidDate(String),

    /// Standard entry class code the CSV importer cannot build entries for
    #[error("SEC code {0} is not supported by CSV import")]
    UnsupportedSecCode(String),

    /// Required configuration value not present in the environment
    #[error("Missing setting {0}")]
    MissingSetting(&'static str),

    /// Configuration value present but unparseable
    #[error("Invalid value {value:?} for setting {name}")]
    InvalidSetting { name: &'static str, value: String },

    /// Failed to open, read or write a file
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// CSV parsing error
    #[error("CSV parsing error: {0}")]
    Csv(#[from] csv::Error),

    /// Missing input file argument
    #[error("Missing input file argument. Usage: ach-file <payments.csv>")]
    MissingArgument,
}
