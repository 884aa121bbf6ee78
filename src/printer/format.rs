use std::fmt::Write;

use crate::models::endpoint::{Endpoint, LOCAL_PREFIX};
use crate::models::message::{Operation, Protocol, ResultCode};

/// Marker appended to a description that did not fit its display width
pub const ELLIPSIS: &str = "...";

/// Describe an endpoint for display.
///
/// Local endpoints are cut to fit `width` (which includes the family prefix
/// and one byte of terminator) and flagged with an ellipsis.
pub fn describe_endpoint(endpoint: &Endpoint, width: usize) -> String {
    let mut res = endpoint.to_string();
    if let Endpoint::Local(_) = endpoint {
        let limit = width.saturating_sub(LOCAL_PREFIX.len() + 1);
        if res.len() >= limit {
            let mut cut = limit;
            while !res.is_char_boundary(cut) {
                cut -= 1;
            }
            res.truncate(cut);
            res.push_str(ELLIPSIS);
        }
    }
    res
}

/// Render `"<from> -> <to> (<protocol>)"`, leaving out whatever is unknown
pub fn describe_connection(
    from: &Endpoint,
    to: &Endpoint,
    protocol: Protocol,
    width: usize,
) -> String {
    let mut out = match (from.is_empty(), to.is_empty()) {
        (true, true) => return String::new(),
        (false, false) => format!(
            "{} -> {}",
            describe_endpoint(from, width),
            describe_endpoint(to, width)
        ),
        (false, true) => describe_endpoint(from, width),
        (true, false) => describe_endpoint(to, width),
    };

    if let Some(name) = protocol.name() {
        let _ = write!(out, " ({})", name);
    }
    out
}

/// Render operation, result and key separated by single spaces
pub fn describe_header(operation: Operation, result: ResultCode, key: &[u8]) -> String {
    let mut out = String::new();

    if let Some(name) = operation.name() {
        out.push_str(name);
    }
    if let Some(name) = result.name() {
        if !out.is_empty() {
            out.push(' ');
        }
        out.push_str(name);
    }
    if !key.is_empty() {
        if !out.is_empty() {
            out.push(' ');
        }
        out.push_str(&backslashify(key));
    }

    out
}

/// Escape bytes that are unsafe to put on a terminal
pub fn backslashify(input: &[u8]) -> String {
    let mut out = String::with_capacity(input.len());
    for &b in input {
        if (b' '..=b'~').contains(&b) && b != b'\\' {
            out.push(b as char);
            continue;
        }
        out.push('\\');
        match b {
            b'\r' => out.push('r'),
            b'\n' => out.push('n'),
            b'\t' => out.push('t'),
            0x07 => out.push('a'),
            0x08 => out.push('b'),
            0x00 => out.push('0'),
            b'\\' => out.push('\\'),
            _ => {
                let _ = write!(out, "x{:02x}", b);
            }
        }
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::config::DEFAULT_LOCAL_ADDRESS_WIDTH;

    const WIDTH: usize = DEFAULT_LOCAL_ADDRESS_WIDTH;

    fn inet(s: &str) -> Endpoint {
        s.parse().unwrap()
    }

    #[test]
    fn test_header_omits_unknown_parts() {
        assert_eq!(describe_header(Operation::Unknown, ResultCode::Unknown, b""), "");
        assert_eq!(describe_header(Operation::Get, ResultCode::Unknown, b""), "get");
        assert_eq!(describe_header(Operation::Get, ResultCode::Found, b"k"), "get found k");
        assert_eq!(describe_header(Operation::Unknown, ResultCode::Stored, b""), "stored");
        assert_eq!(describe_header(Operation::Unknown, ResultCode::Unknown, b"k"), "k");
        assert_eq!(describe_header(Operation::Unknown, ResultCode::NotFound, b"k"), "notfound k");
    }

    #[test]
    fn test_header_escapes_control_bytes_in_key() {
        let header = describe_header(Operation::Set, ResultCode::Unknown, b"a\nb");
        assert_eq!(header, "set a\\nb");
        assert!(!header.contains('\n'));
    }

    #[test]
    fn test_backslashify() {
        assert_eq!(backslashify(b"plain key"), "plain key");
        assert_eq!(backslashify(b"\r\t\x07\x08\x00"), "\\r\\t\\a\\b\\0");
        assert_eq!(backslashify(b"back\\slash"), "back\\\\slash");
        assert_eq!(backslashify(&[0x1b, 0x7f, 0xff]), "\\x1b\\x7f\\xff");
    }

    #[test]
    fn test_connection_formatting() {
        let from = inet("10.0.0.1:5000");
        let to = inet("10.0.0.2:11211");

        assert_eq!(
            describe_connection(&Endpoint::Empty, &Endpoint::Empty, Protocol::Unknown, WIDTH),
            ""
        );
        assert_eq!(
            describe_connection(&Endpoint::Empty, &Endpoint::Empty, Protocol::Ascii, WIDTH),
            ""
        );
        assert_eq!(
            describe_connection(&from, &Endpoint::Empty, Protocol::Unknown, WIDTH),
            "10.0.0.1:5000"
        );
        assert_eq!(
            describe_connection(&Endpoint::Empty, &to, Protocol::Caret, WIDTH),
            "10.0.0.2:11211 (caret)"
        );
        assert_eq!(
            describe_connection(&from, &to, Protocol::Ascii, WIDTH),
            "10.0.0.1:5000 -> 10.0.0.2:11211 (ascii)"
        );
        assert_eq!(
            describe_connection(&from, &to, Protocol::Unknown, WIDTH),
            "10.0.0.1:5000 -> 10.0.0.2:11211"
        );
    }

    #[test]
    fn test_blank_local_path_is_left_out() {
        let to = inet("10.0.0.2:11211");
        let parsed: Endpoint = "unix:".parse().unwrap();
        let built = Endpoint::Local(String::new());

        assert_eq!(
            describe_connection(&parsed, &to, Protocol::Unknown, WIDTH),
            "10.0.0.2:11211"
        );
        assert_eq!(
            describe_connection(&built, &to, Protocol::Ascii, WIDTH),
            "10.0.0.2:11211 (ascii)"
        );
    }

    #[test]
    fn test_local_endpoint_truncation_marker() {
        let width = 16;
        let limit = width - LOCAL_PREFIX.len() - 1;

        let short = Endpoint::Local("a".repeat(limit - 1));
        assert_eq!(describe_endpoint(&short, width), "a".repeat(limit - 1));

        let exact = Endpoint::Local("b".repeat(limit));
        assert_eq!(describe_endpoint(&exact, width), format!("{}...", "b".repeat(limit)));

        let long = Endpoint::Local("c".repeat(limit + 20));
        assert_eq!(describe_endpoint(&long, width), format!("{}...", "c".repeat(limit)));
    }

    #[test]
    fn test_truncation_respects_char_boundaries() {
        let width = 8;
        // limit is 5 bytes; the two-byte 'é' straddles it
        let endpoint = Endpoint::Local("abcdé".to_string());
        assert_eq!(describe_endpoint(&endpoint, width), "abcd...");
    }

    #[test]
    fn test_inet_endpoints_are_never_truncated() {
        let endpoint = inet("[2001:db8::1234:5678]:11211");
        assert_eq!(describe_endpoint(&endpoint, 8), "[2001:db8::1234:5678]:11211");
    }
}
