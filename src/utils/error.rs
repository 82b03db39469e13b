//! Error types for the entire application.
//!
//! We use `thiserror` for library-style errors with custom types,
//! and `anyhow` for application-level error propagation in main.rs and commands.

use thiserror::Error;

/// Errors that can occur while checksumming a ucode blob
#[derive(Error, Debug)]
pub enum ChecksumError {
    #[error("Failed to read ucode file: {0}")]
    Io(#[from] std::io::Error),

    #[error("ucode is {len} bytes, shorter than the {header}-byte header")]
    TruncatedHeader { len: usize, header: usize },

    #[error("ucode payload is {len} bytes, not a multiple of {word} bytes")]
    UnalignedPayload { len: usize, word: usize },
}

/// Errors that can occur during trace parsing
#[derive(Error, Debug)]
pub enum ParseError {
    #[error("No timestamp found on line {line_number}: {line}")]
    MissingTimestamp { line_number: usize, line: String },

    #[error("Invalid timestamp: {0}")]
    InvalidTimestamp(String),
}

/// Errors that can occur during file output
#[derive(Error, Debug)]
pub enum OutputError {
    #[error("Failed to write file: {0}")]
    WriteFailed(#[from] std::io::Error),

    #[error("Failed to serialize JSON: {0}")]
    SerializationFailed(#[from] serde_json::Error),

    #[error("Invalid output path: {0}")]
    InvalidPath(String),
}
