use super::literal::{py_bytes_chunked, py_str_literal};
use super::{ANALYSIS_SCAFFOLD, BODY_INDENT, OPTIONAL_IMPORTS, target_block};
use crate::request::ParsedRequest;

/// Script built on a `requests` session. Each header's folded lines are
/// merged into one space-separated value.
#[must_use]
pub fn render_session(request: &ParsedRequest) -> String {
    let mut script = String::from(
        "#!/usr/bin/env python3\n\
         \n\
         import sys\n\
         import requests\n\
         import urllib3\n",
    );
    script.push_str(OPTIONAL_IMPORTS);
    script.push_str("\nurllib3.disable_warnings(urllib3.exceptions.InsecureRequestWarning)\n\n");
    script.push_str(&target_block(request));

    script.push_str("\n\ndef sendRequest(session, data=None):\n");
    script.push_str(&format!(
        "    method = {method}\n    path = {path}\n    headers = {headers}\n",
        method = py_str_literal(request.method()),
        path = py_str_literal(request.path()),
        headers = headers_dict(request),
    ));
    if request.has_absolute_target() {
        script.push_str("    url = path\n");
    } else {
        script.push_str("    url = '%s://%s:%d%s' % (protocol, host, port, path)\n");
    }
    script.push_str(&format!(
        "    body = ({})\n\n",
        py_bytes_chunked(request.body(), BODY_INDENT)
    ));
    script.push_str(
        "    return session.request(method, url, headers=headers, data=body,\n\
         \x20                          allow_redirects=False, verify=False)\n\
         \n\
         \n\
         def fetch(data):\n\
         \x20   ret_val = None\n\
         \n\
         \x20   # TODO: customize code here to retrieve what you need from the response\n\
         \x20   response = sendRequest(session, data)\n\
         \x20   print(response.headers)\n\
         \x20   print(repr(response.content))\n\
         \n\
         \x20   return ret_val\n\
         \n\
         \n\
         session = requests.Session()\n\
         data = ''\n\
         fetch(data)\n",
    );
    script.push_str(ANALYSIS_SCAFFOLD);
    script
}

/// Headers as a dict literal in input order, one entry per line.
fn headers_dict(request: &ParsedRequest) -> String {
    if request.headers().is_empty() {
        return "{}".to_owned();
    }
    let mut dict = String::from("{\n");
    for header in request.headers() {
        dict.push_str(&format!(
            "        {}: {},\n",
            py_str_literal(&header.name),
            py_str_literal(&header.joined())
        ));
    }
    dict.push_str("    }");
    dict
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    fn render(raw: &[u8]) -> String {
        render_session(&ParsedRequest::parse(raw).unwrap())
    }

    #[test]
    fn test_headers_dict_preserves_order() {
        let script = render(b"GET /p HTTP/1.1\r\nHost: h\r\nX-B: 2\r\nCookie: a=b\r\n\r\n");
        assert!(script.contains(
            "    headers = {\n        'X-B': '2',\n        'Cookie': 'a=b',\n    }\n"
        ));
    }

    #[test]
    fn test_empty_headers_dict() {
        let script = render(b"GET / HTTP/1.1\r\nHost: h\r\nAccept: */*\r\n\r\n");
        assert!(script.contains("    headers = {}\n"));
    }

    #[test]
    fn test_continuations_joined_by_space() {
        let script = render(b"GET / HTTP/1.1\r\nX-Long: value1\r\n\tvalue2\r\n\r\n");
        assert!(script.contains("        'X-Long': 'value1 value2',\n"));
    }

    #[test]
    fn test_request_values() {
        let script = render(b"PUT /r HTTP/1.1\r\nHost: api.example:443\r\n\r\n{\"a\": 1}");
        assert!(script.contains("    method = 'PUT'\n"));
        assert!(script.contains("    path = '/r'\n"));
        assert!(script.contains("    body = (b'{\"a\": 1}')\n"));
        assert!(script.contains("protocol = 'https'\n"));
        assert!(script.contains("session = requests.Session()\n"));
    }

    #[test]
    fn test_origin_form_builds_url_from_target() {
        let script = render(b"GET /x HTTP/1.1\r\nHost: h:8080\r\n\r\n");
        assert!(script.contains("    url = '%s://%s:%d%s' % (protocol, host, port, path)\n"));
    }

    #[rstest]
    #[case("http://h/x")]
    #[case("https://h:8443/x?q=1")]
    #[case("HTTP://H/x")]
    fn test_absolute_form_is_used_as_url(#[case] target: &str) {
        let raw = format!("GET {target} HTTP/1.1\r\nHost: h\r\n\r\n");
        let script = render(raw.as_bytes());
        assert!(script.contains(&format!("    path = '{target}'\n")));
        assert!(script.contains("    url = path\n"));
        assert!(!script.contains("% (protocol, host, port, path)"));
    }

    #[test]
    fn test_empty_body() {
        let script = render(b"GET / HTTP/1.1\n\n");
        assert!(script.contains("    body = (b'')\n"));
    }

    #[test]
    fn test_dropped_headers_absent() {
        let script = render(b"GET / HTTP/1.1\r\nConnection: close\r\nKeep-Alive: 5\r\n\r\n");
        assert!(!script.contains("'Connection'"));
        assert!(!script.contains("'Keep-Alive'"));
    }
}
