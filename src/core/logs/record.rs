use chrono::NaiveDateTime;
use serde::Serialize;

/// Severity assigned to lines that do not follow the log format
pub const UNKNOWN_SEVERITY: &str = "UNKNOWN";

/// Structural classification of one raw line, before timestamp interpretation
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ParsedLine<'a> {
    Structured {
        timestamp: &'a str,
        severity: &'a str,
        message: &'a str,
    },
    Unstructured {
        message: &'a str,
    },
}

/// One log line with whatever structure could be extracted from it
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct LogRecord {
    pub raw: String,
    /// Local wall-clock time; absent when the line has none or it is invalid
    pub timestamp: Option<NaiveDateTime>,
    /// Uppercased level, or `UNKNOWN`
    pub severity: String,
    pub message: String,
}

impl LogRecord {
    pub fn is_unknown(&self) -> bool {
        self.severity == UNKNOWN_SEVERITY
    }
}
