//! Total line parser for the `[YYYY-MM-DD HH:MM:SS] LEVEL: message` format.

use chrono::NaiveDateTime;
use once_cell::sync::Lazy;
use regex::Regex;

use super::record::{LogRecord, ParsedLine, UNKNOWN_SEVERITY};
use super::TIMESTAMP_FORMAT;

static LOG_LINE: Lazy<Option<Regex>> = Lazy::new(|| {
    Regex::new(r"^\[(?P<ts>\d{4}-\d{2}-\d{2} \d{2}:\d{2}:\d{2})\]\s*(?P<level>\w+)[: ]+\s*(?P<msg>.*)$")
        .ok()
});

/// Split a line into its structural parts without interpreting the timestamp
pub fn classify_line(line: &str) -> ParsedLine<'_> {
    let captures = LOG_LINE.as_ref().and_then(|re| re.captures(line));

    match captures {
        Some(caps) => match (caps.name("ts"), caps.name("level"), caps.name("msg")) {
            (Some(ts), Some(level), Some(msg)) => ParsedLine::Structured {
                timestamp: ts.as_str(),
                severity: level.as_str(),
                message: msg.as_str(),
            },
            _ => ParsedLine::Unstructured { message: line },
        },
        None => ParsedLine::Unstructured { message: line },
    }
}

/// Interpret a timestamp captured from a log line; `None` when it is not a real instant
pub fn parse_timestamp(text: &str) -> Option<NaiveDateTime> {
    NaiveDateTime::parse_from_str(text, TIMESTAMP_FORMAT).ok()
}

/// Parse one raw line. Never fails: unmatched lines become `UNKNOWN` records.
pub fn parse_line(line: &str) -> LogRecord {
    match classify_line(line) {
        ParsedLine::Structured {
            timestamp,
            severity,
            message,
        } => LogRecord {
            raw: line.to_string(),
            timestamp: parse_timestamp(timestamp),
            severity: severity.to_uppercase(),
            message: message.to_string(),
        },
        ParsedLine::Unstructured { message } => LogRecord {
            raw: line.to_string(),
            timestamp: None,
            severity: UNKNOWN_SEVERITY.to_string(),
            message: message.to_string(),
        },
    }
}

/// Parse every line, one record per line, in order
pub fn parse_lines<S: AsRef<str>>(lines: &[S]) -> Vec<LogRecord> {
    lines.iter().map(|line| parse_line(line.as_ref())).collect()
}
