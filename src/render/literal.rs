//! Python source literals.
//!
//! Every literal evaluates back to exactly the parsed value. `bytes` output is
//! identical to Python's `repr()`; `str` output escapes control characters and
//! whitespace other than a plain space, and keeps the remaining characters as is.

/// Bytes per literal when a body is wrapped over several source lines.
pub const BODY_CHUNK: usize = 40;

fn pick_quote(has_single: bool, has_double: bool) -> char {
    if has_single && !has_double { '"' } else { '\'' }
}

/// `repr()` of a Python `bytes` object, e.g. `b'a\r\n\x00'`.
#[must_use]
pub fn py_bytes_literal(data: &[u8]) -> String {
    let quote = pick_quote(data.contains(&b'\''), data.contains(&b'"'));
    let mut out = String::with_capacity(data.len() + 3);
    out.push('b');
    out.push(quote);
    for &byte in data {
        match byte {
            b'\\' => out.push_str("\\\\"),
            b'\t' => out.push_str("\\t"),
            b'\n' => out.push_str("\\n"),
            b'\r' => out.push_str("\\r"),
            _ if char::from(byte) == quote => {
                out.push('\\');
                out.push(quote);
            }
            0x20..=0x7e => out.push(char::from(byte)),
            _ => out.push_str(&format!("\\x{byte:02x}")),
        }
    }
    out.push(quote);
    out
}

/// A Python `str` literal for `text`, quoted the way `repr()` quotes.
#[must_use]
pub fn py_str_literal(text: &str) -> String {
    let quote = pick_quote(text.contains('\''), text.contains('"'));
    let mut out = String::with_capacity(text.len() + 2);
    out.push(quote);
    for c in text.chars() {
        match c {
            '\\' => out.push_str("\\\\"),
            '\t' => out.push_str("\\t"),
            '\n' => out.push_str("\\n"),
            '\r' => out.push_str("\\r"),
            _ if c == quote => {
                out.push('\\');
                out.push(quote);
            }
            _ if c.is_control() || (c.is_whitespace() && c != ' ') => {
                let code = u32::from(c);
                let escaped = match code {
                    0..=0xff => format!("\\x{code:02x}"),
                    0x100..=0xffff => format!("\\u{code:04x}"),
                    _ => format!("\\U{code:08x}"),
                };
                out.push_str(&escaped);
            }
            _ => out.push(c),
        }
    }
    out.push(quote);
    out
}

/// A body as adjacent `bytes` literals of [`BODY_CHUNK`] bytes each, one per
/// line, every line after the first prefixed with `indent`. Python joins
/// adjacent literals, so the whole expression evaluates to `body`.
#[must_use]
pub fn py_bytes_chunked(body: &[u8], indent: &str) -> String {
    if body.is_empty() {
        return "b''".to_owned();
    }
    body.chunks(BODY_CHUNK)
        .map(py_bytes_literal)
        .collect::<Vec<_>>()
        .join(&format!("\n{indent}"))
}
