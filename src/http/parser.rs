use crate::http::request::Request;
use std::collections::HashMap;

/// Ways a request head can be malformed. All of them map to a 400
/// response; the connection itself survives per keep-alive policy.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ParseError {
    /// Request line has fewer than two space-separated tokens.
    BadRequestLine,
    /// The head is not UTF-8, or percent-decoding the path failed.
    BadEncoding,
}

/// Outcome of a parse attempt over the buffered input.
///
/// `Complete` and `Malformed` report how many bytes of the buffer were
/// consumed so the caller can drain them before the next attempt.
#[derive(Debug)]
pub enum ParseStatus {
    /// A full request head was parsed.
    Complete(Request, usize),
    /// The head was framed but is malformed; discard the consumed bytes.
    Malformed(ParseError, usize),
    /// More bytes are needed before a request can be framed.
    Incomplete,
}

/// Parses one request head from the front of `buf`.
///
/// Blank lines before the request line are skipped (keep-alive padding
/// between pipelined requests). The head normally ends at the first
/// `\r\n\r\n`; when `at_eof` is set, a head may also end at the end of
/// the buffer, matching line-oriented readers that treat end-of-stream
/// as the end of the header block.
pub fn parse_request(buf: &[u8], at_eof: bool) -> ParseStatus {
    // Skip blank padding before the request line.
    let mut start = 0;
    while let Some(nl) = buf[start..].iter().position(|&b| b == b'\n') {
        if buf[start..start + nl].iter().all(u8::is_ascii_whitespace) {
            start += nl + 1;
        } else {
            break;
        }
    }

    let rest = &buf[start..];
    let (head, consumed) = match find_head_end(rest) {
        Some(end) => (&rest[..end], start + end + 4),
        None if at_eof && !rest.is_empty() => (rest, buf.len()),
        None => return ParseStatus::Incomplete,
    };

    let text = match std::str::from_utf8(head) {
        Ok(t) => t,
        Err(_) => return ParseStatus::Malformed(ParseError::BadEncoding, consumed),
    };

    let mut lines = text.split("\r\n");

    // Request line: method and path are required, the version token is
    // tolerated but ignored (the response protocol is server-configured).
    let request_line = lines.next().unwrap_or("");
    if request_line.trim().is_empty() {
        // Nothing but padding before end-of-stream.
        return ParseStatus::Incomplete;
    }
    let tokens: Vec<&str> = request_line.split(' ').collect();
    if tokens.len() < 2 {
        return ParseStatus::Malformed(ParseError::BadRequestLine, consumed);
    }
    let method = tokens[0].to_string();
    let path = match urlencoding::decode(tokens[1]) {
        Ok(decoded) => decoded.into_owned(),
        Err(_) => return ParseStatus::Malformed(ParseError::BadEncoding, consumed),
    };

    // Headers until an empty line; lines without a colon are skipped.
    let mut headers = HashMap::new();
    for line in lines {
        if line.is_empty() {
            break;
        }
        let Some((name, value)) = line.split_once(':') else {
            continue;
        };
        headers.insert(
            name.trim().to_ascii_lowercase(),
            value.trim().to_string(),
        );
    }

    ParseStatus::Complete(
        Request {
            method,
            path,
            headers,
        },
        consumed,
    )
}

fn find_head_end(buf: &[u8]) -> Option<usize> {
    buf.windows(4).position(|w| w == b"\r\n\r\n")
}
