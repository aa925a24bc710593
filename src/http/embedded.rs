//! Parsing of the HTTP response header block encapsulated in an ICAP response
//! (the `res-hdr` section).
//!
//! The block is read line by line up to the first empty line, which separates
//! the header from a body. The first line that looks like
//! `<version> <3-digit status> <reason>` gives the status and message; without
//! one the status defaults to `403 Forbidden`. Every other line of the form
//! `name: value` is collected into a [`HeaderStore`]. Anything else is skipped,
//! so parsing never fails.

use crate::http::headers::HeaderStore;

const DEFAULT_STATUS: u16 = 403;
const DEFAULT_MESSAGE: &str = "Forbidden";

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EmbeddedHeaderInfo {
    status: u16,
    message: String,
    headers: HeaderStore,
}

impl Default for EmbeddedHeaderInfo {
    fn default() -> Self {
        Self {
            status: DEFAULT_STATUS,
            message: DEFAULT_MESSAGE.to_string(),
            headers: HeaderStore::new(),
        }
    }
}

impl EmbeddedHeaderInfo {
    pub fn parse(buffer: &[u8]) -> Self {
        let text = String::from_utf8_lossy(buffer);
        let mut info = Self::default();

        let lines = text
            .split('\n')
            .map(|line| line.strip_suffix('\r').unwrap_or(line))
            .take_while(|line| !line.is_empty());

        let mut status_line_found = false;
        for line in lines {
            if !status_line_found {
                if let Some((status, message)) = parse_status_line(line) {
                    info.status = status;
                    info.message = message.to_string();
                    status_line_found = true;
                    continue;
                }
            }
            info.push_header_line(line);
        }

        info
    }

    pub fn status(&self) -> u16 {
        self.status
    }

    pub fn message(&self) -> &str {
        &self.message
    }

    pub fn headers(&self) -> &HeaderStore {
        &self.headers
    }

    fn push_header_line(&mut self, line: &str) {
        let Some((name, value)) = line.split_once(':') else {
            return;
        };
        if name.is_empty() || name.contains(char::is_whitespace) {
            return;
        }
        self.headers
            .add_header(name, value.trim_matches(|c: char| c == ' ' || c == '\t'));
    }
}

/// `<non-whitespace token> <3 digits> <message>`
fn parse_status_line(line: &str) -> Option<(u16, &str)> {
    let (token, rest) = line.split_once(char::is_whitespace)?;
    if token.is_empty() {
        return None;
    }

    let code = rest.get(..3)?;
    if !code.bytes().all(|b| b.is_ascii_digit()) {
        return None;
    }

    let mut tail = rest.get(3..)?.chars();
    if !tail.next()?.is_whitespace() {
        return None;
    }

    let status = code.parse::<u16>().ok()?;
    Some((status, tail.as_str()))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn status_line_and_headers() {
        let info = EmbeddedHeaderInfo::parse(b"HTTP/1.1 404 Not Found\r\nServer: x\r\n\r\n");

        assert_eq!(info.status(), 404);
        assert_eq!(info.message(), "Not Found");
        assert_eq!(info.headers().values("Server").unwrap(), ["x"]);
        assert_eq!(info.headers().all_values().get("Server").unwrap(), ["x"]);
        let names: Vec<&str> = info.headers().header_names().iter().map(String::as_str).collect();
        assert_eq!(names, ["Server"]);
    }

    #[test]
    fn defaults_without_status_line() {
        let info = EmbeddedHeaderInfo::parse(b"garbage\r\n\r\n");
        assert_eq!(info.status(), 403);
        assert_eq!(info.message(), "Forbidden");
        assert!(info.headers().is_empty());

        let info = EmbeddedHeaderInfo::parse(b"");
        assert_eq!(info, EmbeddedHeaderInfo::default());
    }

    #[test]
    fn headers_without_status_line() {
        let info = EmbeddedHeaderInfo::parse(b"Content-Type: text/plain\r\nX-Filter: on\r\n");

        assert_eq!(info.status(), 403);
        assert_eq!(info.headers().first_value("content-type"), Ok("text/plain"));
        assert_eq!(info.headers().first_value("x-filter"), Ok("on"));
    }

    #[test]
    fn status_line_after_other_lines() {
        let info = EmbeddedHeaderInfo::parse(
            b"X-Pre: 1\r\nHTTP/1.1 404 Not Found\r\nServer: x\r\nHTTP/1.1 500 Later\r\n\r\n",
        );

        assert_eq!(info.status(), 404);
        assert_eq!(info.message(), "Not Found");
        assert_eq!(info.headers().first_value("x-pre"), Ok("1"));
        assert_eq!(info.headers().first_value("server"), Ok("x"));
        assert_eq!(info.headers().len(), 2);
    }

    #[test]
    fn status_line_variants() {
        assert_eq!(parse_status_line("HTTP/1.0 200 OK"), Some((200, "OK")));
        assert_eq!(parse_status_line("HTTP/1.1 204 "), Some((204, "")));
        assert_eq!(
            parse_status_line("HTTP/1.1 500 Internal Server Error"),
            Some((500, "Internal Server Error"))
        );
        assert_eq!(parse_status_line("HTTP/1.1 200"), None);
        assert_eq!(parse_status_line("HTTP/1.1 2000 OK"), None);
        assert_eq!(parse_status_line("HTTP/1.1 20x OK"), None);
        assert_eq!(parse_status_line(" 200 OK"), None);
        assert_eq!(parse_status_line("HTTP/1.1"), None);
    }

    #[test]
    fn duplicate_headers_keep_order() {
        let info = EmbeddedHeaderInfo::parse(
            b"HTTP/1.1 200 OK\r\nSet-Cookie: a=1\r\nset-cookie: b=2\r\nVia:1.1 proxy\r\n\r\n",
        );

        assert_eq!(info.headers().values("SET-COOKIE").unwrap(), ["a=1", "b=2"]);
        assert_eq!(info.headers().first_value("via"), Ok("1.1 proxy"));
    }

    #[test]
    fn stops_at_blank_line() {
        let info = EmbeddedHeaderInfo::parse(
            b"HTTP/1.1 200 OK\r\nContent-Length: 12\r\n\r\nFake: header\r\n",
        );

        assert!(info.headers().contains("content-length"));
        assert!(!info.headers().contains("fake"));
    }

    #[test]
    fn lf_only_and_odd_lines() {
        let info = EmbeddedHeaderInfo::parse(
            b"HTTP/1.1 302 Found\nLocation: http://example.com/\n folded: no\nnot a header\n: empty\n",
        );

        assert_eq!(info.status(), 302);
        assert_eq!(
            info.headers().first_value("location"),
            Ok("http://example.com/")
        );
        assert_eq!(info.headers().len(), 1);
    }
}
