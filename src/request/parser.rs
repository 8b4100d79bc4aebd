//! Request parsing functions.
//!
//! Splits the captured buffer into header text and body bytes, then walks the
//! header lines, supporting obsolete line folding (RFC 7230 Section 3.2.4).

use super::{Header, ParsedRequest};
use crate::error::{ParseError, Result};
use memchr::memmem;
use tracing::{debug, warn};

const DEFAULT_PORT: u16 = 80;
const TLS_PORT: u16 = 443;

/// Headers describing the transport or content negotiation. The generated
/// client computes these itself, so they are never emitted.
const DROPPED_HEADERS: &[&str] = &[
    "accept",
    "accept-language",
    "accept-encoding",
    "accept-charset",
    "connection",
    "keep-alive",
    "host",
    "content-length",
    "proxy-connection",
];

/// Split a raw request into its header block and its body.
///
/// The first `\r\n\r\n` wins; a bare `\n\n` is only used when the request has
/// no CRLF delimiter at all. Without any delimiter everything is headers.
#[must_use]
pub fn split_request(raw: &[u8]) -> (&[u8], &[u8]) {
    memmem::find(raw, b"\r\n\r\n")
        .map(|pos| (&raw[..pos], &raw[pos + 4..]))
        .or_else(|| memmem::find(raw, b"\n\n").map(|pos| (&raw[..pos], &raw[pos + 2..])))
        .unwrap_or((raw, &[]))
}

pub(super) fn parse_request(raw: &[u8]) -> Result<ParsedRequest> {
    let (head, body) = split_request(raw);
    let head = core::str::from_utf8(head)?;
    debug!(
        header_bytes = head.len(),
        body_bytes = body.len(),
        "Split request"
    );

    let mut lines = head.split('\n').map(|l| l.strip_suffix('\r').unwrap_or(l));

    let request_line = lines.next().unwrap_or_default();
    let mut parts = request_line.splitn(3, ' ');
    let (Some(method), Some(path), Some(version)) = (parts.next(), parts.next(), parts.next())
    else {
        return Err(ParseError::MalformedRequestLine(request_line.to_owned()));
    };

    let mut request = ParsedRequest {
        method: method.to_owned(),
        path: path.to_owned(),
        version: version.to_owned(),
        headers: Vec::new(),
        host: String::new(),
        port: DEFAULT_PORT,
        use_tls: false,
        body: body.to_vec(),
    };

    // Whether the most recent header line was kept, so that its continuation
    // lines follow it into (or out of) the emitted set.
    let mut last_kept = false;
    let mut seen_host = false;

    for (index, line) in lines.enumerate() {
        if line.is_empty() {
            break;
        }

        if line.starts_with([' ', '\t']) {
            match request.headers.last_mut() {
                Some(header) if last_kept => {
                    let fragment = line.strip_prefix('\t').unwrap_or(line);
                    header.values.push(fragment.to_owned());
                }
                _ => debug!(line = %line, "Ignoring continuation of an unkept header"),
            }
            continue;
        }

        let Some((name, value)) = line.split_once(':') else {
            return Err(ParseError::MalformedHeader {
                // Line 1 is the request line.
                line: index + 2,
                content: line.to_owned(),
            });
        };
        let value = value.trim_start_matches(' ');

        if name.eq_ignore_ascii_case("host") {
            if seen_host {
                warn!(host = %value, "Multiple Host headers, using the last one");
            }
            seen_host = true;
            let (host, port) = parse_host(value)?;
            request.host = host.to_owned();
            request.port = port.unwrap_or(DEFAULT_PORT);
            request.use_tls = request.port == TLS_PORT;
        }

        last_kept = !is_dropped(name);
        if last_kept {
            request.headers.push(Header {
                name: name.to_owned(),
                values: vec![value.to_owned()],
            });
        } else {
            debug!(header = %name, "Dropping transport-level header");
        }
    }

    debug!(
        method = %request.method,
        path = %request.path,
        host = %request.host,
        port = request.port,
        headers = request.headers.len(),
        "Parsed request"
    );
    Ok(request)
}

fn is_dropped(name: &str) -> bool {
    DROPPED_HEADERS.iter().any(|d| d.eq_ignore_ascii_case(name))
}

/// Split a `Host` value into host and optional port. Bracketed IPv6
/// literals keep their brackets. Whitespace around either part is ignored.
fn parse_host(value: &str) -> Result<(&str, Option<u16>)> {
    let value = value.trim();
    let split = if value.starts_with('[') {
        value
            .find("]:")
            .map(|pos| (&value[..=pos], &value[pos + 2..]))
    } else {
        value.split_once(':')
    };

    match split {
        Some((host, port)) => port
            .trim()
            .parse::<u16>()
            .map(|port| (host.trim_end(), Some(port)))
            .map_err(|_| ParseError::InvalidPort(value.to_owned())),
        None => Ok((value, None)),
    }
}
