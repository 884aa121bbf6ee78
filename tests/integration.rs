//! End-to-end tests: decoded events from a file through the printer.

use std::io::{BufReader, Seek, SeekFrom, Write};

use cachepiper::capture::manager::CaptureManager;
use cachepiper::models::config::{Filter, PrinterOptions};
use cachepiper::printer::format::{describe_connection, describe_header};
use cachepiper::printer::matcher::find_all;
use cachepiper::printer::value::PlainValueFormatter;
use cachepiper::printer::MessagePrinter;
use termcolor::NoColor;

const SESSION: &str = r#"{"id": 1, "from": "10.0.0.1:40000", "to": "10.0.0.2:11211", "protocol": "ascii", "operation": "get", "key": "user:1"}
{"id": 2, "from": "10.0.0.2:11211", "to": "10.0.0.1:40000", "protocol": "ascii", "operation": "get", "result": "found", "key": "user:1", "value": "alice", "flags": 0}
{"id": 3, "from": "10.0.0.1:40000", "to": "10.0.0.9:11211", "protocol": "ascii", "operation": "set", "result": "stored", "key": "session\n7", "value": "x"}
{"id": 4, "from": "unix:/var/run/cache.sock", "protocol": "caret", "operation": "delete", "result": "deleted", "key": "user:2"}
"#;

fn session_file() -> std::fs::File {
    let mut file = tempfile::tempfile().unwrap();
    file.write_all(SESSION.as_bytes()).unwrap();
    file.seek(SeekFrom::Start(0)).unwrap();
    file
}

fn run(options: PrinterOptions, filter: Filter) -> (String, u64, u64) {
    let mut printer = MessagePrinter::new(
        options,
        filter,
        Box::new(PlainValueFormatter),
        NoColor::new(Vec::new()),
    )
    .unwrap();
    let mut manager = CaptureManager::new(BufReader::new(session_file()));
    let stats = manager.run(&mut printer).unwrap();

    let text = String::from_utf8(printer.into_inner().into_inner()).unwrap();
    (text, stats.total_messages, stats.printed_messages)
}

#[test]
fn test_full_session_is_rendered() {
    let (text, total, printed) = run(PrinterOptions::default(), Filter::default());

    assert_eq!(total, 4);
    assert_eq!(printed, 4);
    assert!(text.contains("10.0.0.2:11211 -> 10.0.0.1:40000 (ascii)\nget found user:1\n"));
    assert!(text.contains("\"value\": \"alice\""));
    assert!(text.contains("set stored session\\n7"));
    assert!(text.contains("/var/run/cache.sock (caret)\ndelete deleted user:2\n"));
}

#[test]
fn test_host_and_port_filtering() {
    let filter = Filter {
        host: Some("10.0.0.9".parse().unwrap()),
        port: 11211,
        ..Filter::default()
    };
    let (text, total, printed) = run(PrinterOptions::default(), filter);

    assert_eq!(total, 1);
    assert_eq!(printed, 1);
    assert!(text.contains("\"id\": 3"));
}

#[test]
fn test_pattern_selects_and_bound_stops() {
    let options = PrinterOptions {
        max_messages: 1,
        ..PrinterOptions::default()
    };
    let filter = Filter::default().with_pattern(r"user:\d").unwrap();
    let (text, _, printed) = run(options, filter);

    assert_eq!(printed, 1);
    assert!(text.contains("\"id\": 1"));
    assert!(!text.contains("\"id\": 2"));
}

#[test]
fn test_highlight_spans_line_up_with_rendered_header() {
    let from = "10.0.0.1:40000".parse().unwrap();
    let to = "10.0.0.2:11211".parse().unwrap();
    let connection = describe_connection(
        &from,
        &to,
        cachepiper::models::message::Protocol::Ascii,
        108,
    );
    let header = describe_header(
        cachepiper::models::message::Operation::Get,
        cachepiper::models::message::ResultCode::Found,
        b"user:1",
    );
    let text = format!("{}\n{}\n", connection, header);

    let pattern = regex::Regex::new("1").unwrap();
    let spans = find_all(&text, &pattern);
    assert!(!spans.is_empty());
    for span in spans {
        assert_eq!(&text[span.offset..span.end()], "1");
    }
}
