#![forbid(unsafe_code)]
#![deny(clippy::all)]
#![deny(unreachable_pub)]
#![deny(clippy::correctness)]
#![deny(clippy::suspicious)]
#![deny(clippy::style)]
#![deny(clippy::complexity)]
#![deny(clippy::perf)]
#![deny(clippy::pedantic)]
#![deny(clippy::std_instead_of_core)]
#![allow(clippy::missing_errors_doc)]

pub mod error;
pub mod render;
pub mod request;

pub use error::{ParseError, Result};
pub use render::{RenderMode, render};
pub use request::{Header, ParsedRequest};

/// Parse a captured request and render it as a Python script in one step.
pub fn translate(raw: &[u8], mode: RenderMode) -> Result<String> {
    let request = ParsedRequest::parse(raw)?;
    Ok(render(&request, mode))
}
