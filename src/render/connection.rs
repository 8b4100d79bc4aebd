use super::literal::{py_bytes_chunked, py_str_literal};
use super::{ANALYSIS_SCAFFOLD, BODY_INDENT, OPTIONAL_IMPORTS, target_block};
use crate::request::{Header, ParsedRequest};

/// Script built on `http.client`. Folded header lines become extra
/// `putheader` arguments, which `http.client` re-folds on the wire.
#[must_use]
pub fn render_connection(request: &ParsedRequest) -> String {
    let mut script = String::from(
        "#!/usr/bin/env python3\n\
         \n\
         import sys\n\
         import ssl\n\
         import http.client as httpc\n",
    );
    script.push_str(OPTIONAL_IMPORTS);
    script.push('\n');
    script.push_str(&target_block(request));

    script.push_str(
        "\n\
         \n\
         def newConnection():\n\
         \x20   if use_tls:\n\
         \x20       context = ssl.create_default_context()\n\
         \x20       context.check_hostname = False\n\
         \x20       context.verify_mode = ssl.CERT_NONE\n\
         \x20       return httpc.HTTPSConnection(host, port, context=context)\n\
         \x20   return httpc.HTTPConnection(host, port)\n\
         \n\
         \n\
         def sendRequest(connection, data=None):\n",
    );
    script.push_str(&format!(
        "    method = {method}\n    path = {path}\n    body = ({body})\n\n",
        method = py_str_literal(request.method()),
        path = py_str_literal(request.path()),
        body = py_bytes_chunked(request.body(), BODY_INDENT),
    ));
    script.push_str("    connection.putrequest(method, path)\n");
    for header in request.headers() {
        script.push_str(&putheader(header));
    }
    script.push_str(
        "    if len(body) > 0:\n\
         \x20       connection.putheader('Content-Length', str(len(body)))\n\
         \x20   connection.endheaders()\n\
         \x20   connection.send(body)\n\
         \n\
         \x20   return connection.getresponse()\n\
         \n\
         \n\
         def fetch(data):\n\
         \x20   ret_val = None\n\
         \n\
         \x20   # TODO: customize code here to retrieve what you need from the response\n\
         \x20   connection = newConnection()\n\
         \x20   response = sendRequest(connection, data)\n\
         \x20   print(response.getheaders())\n\
         \x20   print(repr(response.read()))\n\
         \x20   connection.close()\n\
         \n\
         \x20   return ret_val\n\
         \n\
         \n\
         data = ''\n\
         fetch(data)\n",
    );
    script.push_str(ANALYSIS_SCAFFOLD);
    script
}

fn putheader(header: &Header) -> String {
    let values = header
        .values
        .iter()
        .map(|v| py_str_literal(v))
        .collect::<Vec<_>>()
        .join(", ");
    format!(
        "    connection.putheader({}, {values})\n",
        py_str_literal(&header.name)
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    fn render(raw: &[u8]) -> String {
        render_connection(&ParsedRequest::parse(raw).unwrap())
    }

    #[test]
    fn test_one_putheader_per_header_in_order() {
        let script = render(b"GET /p HTTP/1.1\r\nHost: h\r\nX-B: 2\r\nX-A: 1\r\n\r\n");
        let calls: Vec<_> = script
            .lines()
            .filter(|l| l.trim_start().starts_with("connection.putheader('X-"))
            .collect();
        assert_eq!(
            calls,
            [
                "    connection.putheader('X-B', '2')",
                "    connection.putheader('X-A', '1')",
            ]
        );
    }

    #[test]
    fn test_continuations_are_extra_arguments() {
        let script = render(b"GET / HTTP/1.1\r\nX-Long: value1\r\n\tvalue2\r\n\r\n");
        assert!(script.contains("    connection.putheader('X-Long', 'value1', 'value2')\n"));
    }

    #[test]
    fn test_request_values() {
        let script = render(b"POST /submit?a=1 HTTP/1.1\r\nHost: h:8080\r\n\r\nk=v");
        assert!(script.contains("    method = 'POST'\n"));
        assert!(script.contains("    path = '/submit?a=1'\n"));
        assert!(script.contains("    body = (b'k=v')\n"));
        assert!(script.contains("port = 8080\n"));
        assert!(script.contains("connection.putheader('Content-Length', str(len(body)))"));
    }

    #[test]
    fn test_empty_body() {
        let script = render(b"GET / HTTP/1.1\r\nHost: h");
        assert!(script.contains("    body = (b'')\n"));
    }

    #[test]
    fn test_dropped_headers_absent() {
        let script = render(
            b"GET / HTTP/1.1\r\nHost: h\r\nConnection: close\r\nAccept-Encoding: gzip\r\n\r\n",
        );
        assert!(!script.contains("'Connection'"));
        assert!(!script.contains("'Accept-Encoding'"));
        assert!(!script.contains("'Host'"));
    }
}
