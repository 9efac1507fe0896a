// End-to-end tests for combining sources, tailing and summarizing

use chrono::{Duration, NaiveDate, NaiveDateTime};
use hostwatch::core::logs::{parse_lines, summarize, LogSources, WindowSummarizer};
use std::fs;
use tempfile::TempDir;

fn now() -> NaiveDateTime {
    NaiveDate::from_ymd_opt(2024, 1, 1)
        .unwrap()
        .and_hms_opt(12, 0, 0)
        .unwrap()
}

fn two_agent_sources(temp_dir: &TempDir) -> LogSources {
    let bash = temp_dir.path().join("bash").join("system-monitor.log");
    let python = temp_dir.path().join("python").join("system-monitor.log");
    fs::create_dir_all(bash.parent().unwrap()).unwrap();
    fs::create_dir_all(python.parent().unwrap()).unwrap();
    fs::write(&bash, "[2024-01-01 00:00:00] INFO: ok\n").unwrap();
    fs::write(&python, "[2024-01-01 00:00:01] CRITICAL: oom\n").unwrap();
    LogSources::new([bash, python])
}

#[test]
fn test_combined_tail_keeps_source_order() {
    let temp_dir = TempDir::new().unwrap();
    let sources = two_agent_sources(&temp_dir);

    assert_eq!(
        sources.tail(2),
        vec![
            "[2024-01-01 00:00:00] INFO: ok",
            "[2024-01-01 00:00:01] CRITICAL: oom"
        ]
    );
    assert_eq!(sources.tail(100), sources.read_all());
    assert!(sources.tail(0).is_empty());
}

#[test]
fn test_summary_over_both_sources() {
    let temp_dir = TempDir::new().unwrap();
    let sources = two_agent_sources(&temp_dir);

    let records = parse_lines(&sources.read_all());
    let summary = WindowSummarizer::default().summarize(&records, now());

    assert_eq!(summary.total_in_window, 2);
    assert_eq!(summary.per_severity_counts.get("INFO"), Some(&1));
    assert_eq!(summary.per_severity_counts.get("CRITICAL"), Some(&1));
    assert_eq!(summary.per_severity_counts.len(), 2);
    assert_eq!(summary.high_severity_records.len(), 1);
    assert_eq!(
        summary.high_severity_records[0].raw,
        "[2024-01-01 00:00:01] CRITICAL: oom"
    );
}

#[test]
fn test_unparsable_lines_visible_in_tail_but_not_counted() {
    let temp_dir = TempDir::new().unwrap();
    let path = temp_dir.path().join("mixed.log");
    fs::write(
        &path,
        "Traceback (most recent call last):\n[2024-01-01 11:00:00] WARNING: retrying\n  File \"x.py\"\n",
    )
    .unwrap();

    let sources = LogSources::new([&path]);
    let lines = sources.read_all();
    assert_eq!(lines.len(), 3);
    assert_eq!(sources.bounded(10), lines);

    let records = parse_lines(&lines);
    assert_eq!(records.len(), 3);
    assert_eq!(records[0].severity, "UNKNOWN");
    assert_eq!(records[0].message, "Traceback (most recent call last):");

    let summary = summarize(&records, Duration::hours(24), now());
    assert_eq!(summary.total_in_window, 1);
    assert_eq!(summary.per_severity_counts.get("WARNING"), Some(&1));
}

#[test]
fn test_window_excludes_old_entries_across_sources() {
    let temp_dir = TempDir::new().unwrap();
    let old = temp_dir.path().join("old.log");
    let new = temp_dir.path().join("new.log");
    fs::write(&old, "[2023-12-31 11:59:59] ALERT: stale\n").unwrap();
    fs::write(&new, "[2023-12-31 12:00:00] ALERT: just in\n").unwrap();

    let records = parse_lines(&LogSources::new([old, new]).read_all());
    let summary = summarize(&records, Duration::hours(24), now());

    assert_eq!(summary.total_in_window, 1);
    assert_eq!(summary.high_severity_records[0].message, "just in");
}
