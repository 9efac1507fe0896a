//! Trailing-window aggregation over parsed log records.

use std::collections::BTreeMap;

use chrono::{Duration, NaiveDateTime};
use serde::Serialize;

use super::record::LogRecord;

/// Severities extracted as high-severity records
pub const HIGH_SEVERITY_LEVELS: [&str; 2] = ["CRITICAL", "ALERT"];

/// Maximum number of high-severity records kept for display
pub const DEFAULT_HIGH_SEVERITY_LIMIT: usize = 50;

pub const SUMMARY_WINDOW_HOURS: i64 = 24;

/// Counts and high-severity records for one window
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct WindowSummary {
    /// Start of the window (inclusive)
    pub since: NaiveDateTime,
    pub per_severity_counts: BTreeMap<String, usize>,
    /// In-window CRITICAL/ALERT records, in encounter order
    pub high_severity_records: Vec<LogRecord>,
    pub total_in_window: usize,
}

impl WindowSummary {
    /// Severities ordered by count descending, then name ascending
    pub fn ranked_counts(&self) -> Vec<(&str, usize)> {
        let mut ranked: Vec<_> = self
            .per_severity_counts
            .iter()
            .map(|(severity, count)| (severity.as_str(), *count))
            .collect();
        ranked.sort_by(|a, b| b.1.cmp(&a.1).then_with(|| a.0.cmp(b.0)));
        ranked
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct WindowSummarizer {
    pub window: Duration,
    /// Cap on `high_severity_records`; `None` keeps all of them
    pub high_severity_limit: Option<usize>,
}

impl Default for WindowSummarizer {
    fn default() -> Self {
        Self {
            window: Duration::hours(SUMMARY_WINDOW_HOURS),
            high_severity_limit: Some(DEFAULT_HIGH_SEVERITY_LIMIT),
        }
    }
}

impl WindowSummarizer {
    pub fn summarize(&self, records: &[LogRecord], now: NaiveDateTime) -> WindowSummary {
        let mut summary = summarize(records, self.window, now);
        if let Some(limit) = self.high_severity_limit {
            summary.high_severity_records.truncate(limit);
        }
        summary
    }
}

/// Summarize records whose timestamp lies in `[now - window, ..]`.
///
/// Records without a timestamp never count.
pub fn summarize(records: &[LogRecord], window: Duration, now: NaiveDateTime) -> WindowSummary {
    let since = now - window;
    let mut per_severity_counts = BTreeMap::new();
    let mut high_severity_records = Vec::new();
    let mut total_in_window = 0;

    for record in records {
        match record.timestamp {
            Some(ts) if ts >= since => {}
            _ => continue,
        }

        total_in_window += 1;
        *per_severity_counts
            .entry(record.severity.clone())
            .or_insert(0) += 1;

        if HIGH_SEVERITY_LEVELS.contains(&record.severity.as_str()) {
            high_severity_records.push(record.clone());
        }
    }

    WindowSummary {
        since,
        per_severity_counts,
        high_severity_records,
        total_in_window,
    }
}
