//! Raw HTTP request parsing.
//!
//! This module turns a captured HTTP/1.x request into a [`ParsedRequest`],
//! including handling of obsolete line folding and of the transport-level
//! headers that the generated client manages by itself.

mod parser;

pub use parser::split_request;

use crate::error::Result;

/// A single header with one value per folded line, in input order.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Header {
    pub name: String,
    pub values: Vec<String>,
}

impl Header {
    /// All folded lines merged into one value, separated by a single space.
    #[must_use]
    pub fn joined(&self) -> String {
        self.values.join(" ")
    }
}

/// The structured form of one captured request.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ParsedRequest {
    method: String,
    path: String,
    version: String,
    headers: Vec<Header>,
    host: String,
    port: u16,
    use_tls: bool,
    body: Vec<u8>,
}

impl ParsedRequest {
    /// Parse a complete request buffer (request line, headers, optional body).
    pub fn parse(raw: &[u8]) -> Result<Self> {
        parser::parse_request(raw)
    }

    #[must_use]
    pub fn method(&self) -> &str {
        &self.method
    }

    #[must_use]
    pub fn path(&self) -> &str {
        &self.path
    }

    /// Whether the request target is in absolute form (`http://host/path`),
    /// as in requests captured on their way to a forward proxy.
    #[must_use]
    pub fn has_absolute_target(&self) -> bool {
        ["http://", "https://"].iter().any(|scheme| {
            self.path
                .as_bytes()
                .get(..scheme.len())
                .is_some_and(|prefix| prefix.eq_ignore_ascii_case(scheme.as_bytes()))
        })
    }

    /// The protocol token of the request line, e.g. `HTTP/1.1`.
    #[must_use]
    pub fn version(&self) -> &str {
        &self.version
    }

    /// Retained headers, transport-level ones already removed.
    #[must_use]
    pub fn headers(&self) -> &[Header] {
        &self.headers
    }

    /// Host taken from the `Host` header, empty when the request had none.
    #[must_use]
    pub fn host(&self) -> &str {
        &self.host
    }

    #[must_use]
    pub fn port(&self) -> u16 {
        self.port
    }

    #[must_use]
    pub fn use_tls(&self) -> bool {
        self.use_tls
    }

    #[must_use]
    pub fn scheme(&self) -> &'static str {
        if self.use_tls { "https" } else { "http" }
    }

    #[must_use]
    pub fn body(&self) -> &[u8] {
        &self.body
    }
}
