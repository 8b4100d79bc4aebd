use core::str::Utf8Error;

/// Reasons a captured request cannot be turned into a script.
#[derive(Debug, thiserror::Error)]
pub enum ParseError {
    #[error("Malformed request line (expected `METHOD PATH VERSION`): {0:?}")]
    MalformedRequestLine(String),
    #[error("Malformed header on line {line} (no colon): {content:?}")]
    MalformedHeader { line: usize, content: String },
    #[error("Invalid port in Host header: {0:?}")]
    InvalidPort(String),
    #[error("Header block is not valid UTF-8: {0}")]
    HeaderEncoding(#[from] Utf8Error),
}

pub type Result<T> = core::result::Result<T, ParseError>;
