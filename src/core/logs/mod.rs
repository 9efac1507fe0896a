//! Operational log reading: line parsing, multi-source aggregation and
//! time-windowed summaries.
//!
//! Everything here is recomputed from the current file contents on every call.

mod parser;
mod record;
mod source;
mod summary;

pub use parser::{classify_line, parse_line, parse_lines, parse_timestamp};
pub use record::{LogRecord, ParsedLine, UNKNOWN_SEVERITY};
pub use source::{bounded, read_lines, tail, LogSources};
pub use summary::{
    summarize, WindowSummarizer, WindowSummary, DEFAULT_HIGH_SEVERITY_LIMIT,
    HIGH_SEVERITY_LEVELS, SUMMARY_WINDOW_HOURS,
};

/// Timestamp layout shared by the log writer and the parser
pub const TIMESTAMP_FORMAT: &str = "%Y-%m-%d %H:%M:%S";
