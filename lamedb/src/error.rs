//! Error types for lamedb parsing.

use thiserror::Error;

/// Fatal errors raised while loading a lamedb stream.
///
/// Any of these aborts the load; no partially built catalog is returned.
#[derive(Error, Debug)]
pub enum ParseError {
    /// The underlying reader failed.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// The stream produced no header line.
    #[error("lamedb input is empty")]
    EmptyInput,

    /// The header line does not carry an `eDVB services /N/` marker.
    #[error("Wrong header: {0:?}")]
    HeaderMismatch(String),

    /// The header declares a format version with no registered parser.
    #[error("lamedb version {0} is not supported")]
    UnsupportedVersion(u32),

    /// The stream ended before a section sentinel was found.
    #[error("Section '{0}' not found")]
    MissingSection(&'static str),

    /// The stream ended inside a section, before its `end` line.
    #[error("Unexpected end of input in section '{section}'")]
    UnexpectedEndOfInput { section: &'static str },

    /// First line of a transponder record is not `namespace:tsid:onid`.
    #[error("Malformed transponder key at line {line}: {value:?}")]
    MalformedTransponderKey { line: usize, value: String },

    /// Transponder descriptor selector is not a known delivery type.
    #[error("Unknown transponder record type '{selector}' at line {line}")]
    UnknownTransponderRecordType { line: usize, selector: char },

    /// Satellite descriptor has more than 11 fields.
    #[error("Too many transponder fields at line {line}: {count} (max: {max})")]
    TooManyTransponderFields { line: usize, count: usize, max: usize },

    /// Satellite descriptor has fewer than the 7 mandatory fields.
    #[error("Too few transponder fields at line {line}: {count} (min: {min})")]
    TooFewTransponderFields { line: usize, count: usize, min: usize },

    /// A descriptor field is not a number of the expected width.
    #[error("Invalid transponder field '{field}' at line {line}: {value:?}")]
    InvalidTransponderField {
        line: usize,
        field: &'static str,
        value: String,
    },

    /// Third line of a transponder record is not `/`.
    #[error("Transponder definition at line {line} does not end with '/': {found:?}")]
    TransponderTerminatorMissing { line: usize, found: String },

    /// First line of a service record is not a valid id list.
    #[error("Malformed service record at line {line}: {reason}")]
    MalformedServiceRecord { line: usize, reason: String },
}

/// Errors raised while parsing bouquet service references.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ReferenceError {
    /// The line is a bouquet directive other than `#SERVICE`.
    #[error("Not a service line: {0:?}")]
    MissingPrefix(String),

    /// The reference has fewer than 7 colon-separated fields.
    #[error("Service reference has too few fields: {count} (min: 7)")]
    TooFewFields { count: usize },

    /// The flags field is not a decimal integer.
    #[error("Invalid service reference flags: {0:?}")]
    InvalidFlags(String),
}

pub type Result<T> = std::result::Result<T, ParseError>;
