//! Error types for the eplfile library

use std::io;
use thiserror::Error;

/// Main error type for eplfile operations
#[derive(Debug, Error)]
pub enum EplError {
    /// IO error occurred while reading or building a buffer
    #[error("IO error: {0}")]
    Io(#[from] io::Error),

    /// Cursor ran past the end of the input buffer
    #[error("input truncated: {needed} byte(s) needed at offset {offset}, {remaining} remaining")]
    TruncatedInput {
        offset: u64,
        needed: usize,
        remaining: usize,
    },

    /// A length prefix describes more bytes than remain in the buffer
    #[error("malformed length prefix at offset {offset}: {length} byte(s) declared, {remaining} remaining")]
    MalformedLength {
        offset: u64,
        length: i64,
        remaining: usize,
    },

    /// The identifier counter would overflow its sequence space
    #[error("identifier allocation exhausted: sequence space of {0} ids is spent")]
    AllocationExhausted(u32),

    /// The 16-byte pre-icon block disagrees with bit 0 of the section flag
    #[error("section flag bit 0 is {flag_bit} but pre-icon block present = {present}")]
    FlagMismatch { flag_bit: i32, present: bool },

    /// A record's declared length does not match its actual byte length
    #[error("record {index} declared {declared} byte(s) but occupies {consumed}")]
    RecordLength {
        index: usize,
        declared: usize,
        consumed: usize,
    },

    /// Invalid data encountered while parsing a field
    #[error("invalid format: {0}")]
    InvalidFormat(String),

    /// Generic error with custom message
    #[error("{0}")]
    Custom(String),
}

/// Result type alias for eplfile operations
pub type Result<T> = std::result::Result<T, EplError>;

impl From<String> for EplError {
    fn from(s: String) -> Self {
        EplError::Custom(s)
    }
}

impl From<&str> for EplError {
    fn from(s: &str) -> Self {
        EplError::Custom(s.to_string())
    }
}
