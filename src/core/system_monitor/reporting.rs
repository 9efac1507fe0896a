//! Reporting sink capability.
//!
//! The sampling loop reports every line through a [`ReportSink`]. The file sink
//! appends lines in the `[YYYY-MM-DD HH:MM:SS] LEVEL   : message` format that
//! the log parser reads back.

use std::fs::{self, File, OpenOptions};
use std::io::Write;
use std::path::{Path, PathBuf};
use std::sync::{Arc, Mutex};

use chrono::{Local, NaiveDateTime};
use serde::{Deserialize, Serialize};

use crate::core::logs::TIMESTAMP_FORMAT;
use crate::error::Result;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ReportLevel {
    Info,
    Warning,
    Critical,
}

impl ReportLevel {
    pub fn as_str(&self) -> &'static str {
        match self {
            ReportLevel::Info => "INFO",
            ReportLevel::Warning => "WARNING",
            ReportLevel::Critical => "CRITICAL",
        }
    }
}

/// Destination for per-cycle report lines
pub trait ReportSink: Send {
    fn report(&mut self, level: ReportLevel, text: &str);

    fn report_info(&mut self, text: &str) {
        self.report(ReportLevel::Info, text);
    }

    fn report_warning(&mut self, text: &str) {
        self.report(ReportLevel::Warning, text);
    }

    fn report_critical(&mut self, text: &str) {
        self.report(ReportLevel::Critical, text);
    }

    /// Called before the first line of a cycle
    fn begin_cycle(&mut self) {}

    /// Called between the metric lines and the alert lines of a cycle
    fn begin_alerts(&mut self) {}

    /// Called after the last line of a cycle
    fn end_cycle(&mut self, _next_in_secs: u64) {}

    /// Called once when the loop terminates
    fn stopped(&mut self) {}
}

/// Format one operational log line
pub fn format_log_line(timestamp: NaiveDateTime, level: ReportLevel, text: &str) -> String {
    format!(
        "[{}] {:<8}: {}",
        timestamp.format(TIMESTAMP_FORMAT),
        level.as_str(),
        text
    )
}

/// Append-only operational log file
pub struct FileSink {
    path: PathBuf,
    file: Option<File>,
}

impl FileSink {
    /// Open (or create) the log file in append mode, creating parent directories.
    pub fn open(path: &Path) -> Result<Self> {
        if let Some(parent) = path.parent() {
            if !parent.as_os_str().is_empty() {
                fs::create_dir_all(parent)?;
            }
        }

        let file = OpenOptions::new().create(true).append(true).open(path)?;

        Ok(Self {
            path: path.to_path_buf(),
            file: Some(file),
        })
    }

    /// Like [`FileSink::open`], but degrades to a sink that drops lines when
    /// the file cannot be opened.
    pub fn open_or_disabled(path: &Path) -> Self {
        Self::open(path).unwrap_or_else(|e| {
            log::warn!("Cannot open log file {}: {}", path.display(), e);
            Self {
                path: path.to_path_buf(),
                file: None,
            }
        })
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    pub fn is_enabled(&self) -> bool {
        self.file.is_some()
    }
}

impl ReportSink for FileSink {
    fn report(&mut self, level: ReportLevel, text: &str) {
        let Some(file) = self.file.as_mut() else {
            return;
        };

        let line = format_log_line(Local::now().naive_local(), level, text);
        if let Err(e) = writeln!(file, "{}", line) {
            log::warn!("Failed to append to {}: {}", self.path.display(), e);
        }
    }
}

/// Fans every call out to several sinks in order
#[derive(Default)]
pub struct MultiSink {
    sinks: Vec<Box<dyn ReportSink>>,
}

impl MultiSink {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with(mut self, sink: impl ReportSink + 'static) -> Self {
        self.sinks.push(Box::new(sink));
        self
    }
}

impl ReportSink for MultiSink {
    fn report(&mut self, level: ReportLevel, text: &str) {
        for sink in &mut self.sinks {
            sink.report(level, text);
        }
    }

    fn begin_cycle(&mut self) {
        for sink in &mut self.sinks {
            sink.begin_cycle();
        }
    }

    fn begin_alerts(&mut self) {
        for sink in &mut self.sinks {
            sink.begin_alerts();
        }
    }

    fn end_cycle(&mut self, next_in_secs: u64) {
        for sink in &mut self.sinks {
            sink.end_cycle(next_in_secs);
        }
    }

    fn stopped(&mut self) {
        for sink in &mut self.sinks {
            sink.stopped();
        }
    }
}

/// Event recorded by [`MemorySink`]
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SinkEvent {
    BeginCycle,
    Line(ReportLevel, String),
    BeginAlerts,
    EndCycle(u64),
    Stopped,
}

/// In-memory sink; clones share the same event buffer
#[derive(Debug, Clone, Default)]
pub struct MemorySink {
    events: Arc<Mutex<Vec<SinkEvent>>>,
}

impl MemorySink {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn events(&self) -> Vec<SinkEvent> {
        self.events
            .lock()
            .map(|events| events.clone())
            .unwrap_or_default()
    }

    /// Reported lines only, without cycle markers
    pub fn lines(&self) -> Vec<(ReportLevel, String)> {
        self.events()
            .into_iter()
            .filter_map(|event| match event {
                SinkEvent::Line(level, text) => Some((level, text)),
                _ => None,
            })
            .collect()
    }

    fn push(&self, event: SinkEvent) {
        if let Ok(mut events) = self.events.lock() {
            events.push(event);
        }
    }
}

impl ReportSink for MemorySink {
    fn report(&mut self, level: ReportLevel, text: &str) {
        self.push(SinkEvent::Line(level, text.to_string()));
    }

    fn begin_cycle(&mut self) {
        self.push(SinkEvent::BeginCycle);
    }

    fn begin_alerts(&mut self) {
        self.push(SinkEvent::BeginAlerts);
    }

    fn end_cycle(&mut self, next_in_secs: u64) {
        self.push(SinkEvent::EndCycle(next_in_secs));
    }

    fn stopped(&mut self) {
        self.push(SinkEvent::Stopped);
    }
}
