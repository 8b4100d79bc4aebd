//! Python script generation.
//!
//! Two templates render the same [`ParsedRequest`]: one on top of the
//! low-level `http.client` connection API and one on top of a `requests`
//! session. They differ only in library idiom; method, path, headers and body
//! carry the same values in both.

mod connection;
pub mod literal;
mod session;

pub use connection::render_connection;
pub use session::render_session;

use crate::request::ParsedRequest;
use literal::py_str_literal;

/// Which client library the generated script is written against.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum RenderMode {
    /// `http.client` connection, one `putheader` call per header.
    #[default]
    Connection,
    /// `requests` session, headers passed as one dict.
    Session,
}

/// Render `request` as a complete Python script.
#[must_use]
pub fn render(request: &ParsedRequest, mode: RenderMode) -> String {
    match mode {
        RenderMode::Connection => render_connection(request),
        RenderMode::Session => render_session(request),
    }
}

/// Continuation indent for the body literal, aligned under `body = (`.
const BODY_INDENT: &str = "            ";

/// Shebang, target settings and the shared `data` placeholder.
fn target_block(request: &ParsedRequest) -> String {
    let host = if request.host().is_empty() {
        format!(
            "{}  # no Host header in the captured request",
            py_str_literal("TODO")
        )
    } else {
        py_str_literal(request.host())
    };
    format!(
        "# TODO: ensure the host, port and TLS settings are correct.\n\
         host = {host}\n\
         port = {port}\n\
         protocol = {protocol}\n\
         use_tls = {use_tls}\n",
        port = request.port(),
        protocol = py_str_literal(request.scheme()),
        use_tls = if request.use_tls() { "True" } else { "False" },
    )
}

/// Commented follow-on analyses; never executed by the generated script.
const ANALYSIS_SCAFFOLD: &str = "
# Padding oracle attack:
# ciphertext = blobtools.decode('{ encoding }', data)
# poa = POA(fetch, { block size }, ciphertext, threads=1, log_file=sys.stderr)
# print(poa.probe_padding())  # sanity check
# print(poa.decrypt())

# Byte-by-byte probing:
# prober = buffertools.ByteProber(fetch)
# for offset in range(len(data)):
#     print(prober.probe_bytes(data, offset))
";

const OPTIONAL_IMPORTS: &str = "\
# from bletchley import blobtools, buffertools
# from bletchley.CBC import POA
";
