//! Sampling loop: sample, evaluate, report, sleep.
//!
//! The loop runs as a single sequential task. The inter-cycle sleep is the only
//! suspension point and the only place a stop signal is observed.

use std::time::Duration;

use tokio::sync::broadcast;

use super::alerts::{evaluate_alerts, AlertEvent, Thresholds};
use super::collector::{MetricsCollector, Sample};
use super::reporting::{ReportLevel, ReportSink};
use crate::core::logs::TIMESTAMP_FORMAT;
use crate::error::{HostwatchError, Result};
use crate::ui::{format_bytes, format_uptime};

/// Lifecycle of the sampling loop
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LoopState {
    Idle,
    Sampling,
    Evaluating,
    Reporting,
    Sleeping,
    Stopped,
}

/// Outcome of a single cycle
#[derive(Debug, Clone)]
pub struct CycleOutcome {
    pub sample: Sample,
    pub alerts: Vec<AlertEvent>,
}

pub struct SamplingLoop {
    collector: MetricsCollector,
    sink: Box<dyn ReportSink>,
    thresholds: Thresholds,
    interval: Duration,
    state: LoopState,
    cycles: u64,
}

impl SamplingLoop {
    /// Build an idle loop. Fails when `interval_secs` is below one second.
    pub fn new(
        collector: MetricsCollector,
        sink: Box<dyn ReportSink>,
        thresholds: Thresholds,
        interval_secs: u64,
    ) -> Result<Self> {
        if interval_secs < 1 {
            return Err(HostwatchError::config(
                "Interval must be at least 1 second.",
            ));
        }

        Ok(Self {
            collector,
            sink,
            thresholds,
            interval: Duration::from_secs(interval_secs),
            state: LoopState::Idle,
            cycles: 0,
        })
    }

    pub fn state(&self) -> LoopState {
        self.state
    }

    pub fn interval(&self) -> Duration {
        self.interval
    }

    pub fn cycles(&self) -> u64 {
        self.cycles
    }

    /// Run one full cycle without sleeping
    pub fn tick(&mut self) -> CycleOutcome {
        self.state = LoopState::Sampling;
        let sample = self.collector.collect();

        self.state = LoopState::Evaluating;
        let alerts = evaluate_alerts(&sample.snapshot, &self.thresholds);

        self.state = LoopState::Reporting;
        self.sink.begin_cycle();
        for (level, text) in describe_metrics(&sample) {
            self.sink.report(level, &text);
        }
        self.sink.begin_alerts();
        for (level, text) in describe_alerts(&alerts) {
            self.sink.report(level, &text);
        }
        self.sink.end_cycle(self.interval.as_secs());

        self.cycles += 1;
        CycleOutcome { sample, alerts }
    }

    /// Run cycles until `shutdown` fires (or its sender is dropped).
    ///
    /// A slow cycle delays the next one; missed ticks are never caught up.
    /// Returns the number of completed cycles.
    pub async fn run(mut self, mut shutdown: broadcast::Receiver<()>) -> u64 {
        log::info!(
            "Sampling loop started (interval {}s)",
            self.interval.as_secs()
        );

        loop {
            if !matches!(
                shutdown.try_recv(),
                Err(broadcast::error::TryRecvError::Empty)
            ) {
                break;
            }

            self.tick();

            self.state = LoopState::Sleeping;
            tokio::select! {
                _ = tokio::time::sleep(self.interval) => {}
                _ = shutdown.recv() => break,
            }
        }

        self.state = LoopState::Stopped;
        self.sink.stopped();
        log::info!("Sampling loop stopped after {} cycles", self.cycles);

        self.cycles
    }
}

/// Ordered metric lines for one sample, with a warning in place of each unavailable metric
pub fn describe_metrics(sample: &Sample) -> Vec<(ReportLevel, String)> {
    let snapshot = &sample.snapshot;
    let mut lines: Vec<(ReportLevel, String)> = Vec::new();

    let section = |value: Option<String>, metric: &str, lines: &mut Vec<(ReportLevel, String)>| match value {
        Some(text) => lines.push((ReportLevel::Info, text)),
        None => lines.extend(
            sample
                .unavailable
                .iter()
                .filter(|u| u.metric == metric)
                .map(|u| (ReportLevel::Warning, u.message())),
        ),
    };

    lines.push((
        ReportLevel::Info,
        format!("Date and Time: {}", snapshot.timestamp.format(TIMESTAMP_FORMAT)),
    ));
    section(
        snapshot
            .os
            .as_ref()
            .map(|os| format!("OS: {} {} (ID: {})", os.name, os.version, os.id)),
        "OS",
        &mut lines,
    );
    section(
        snapshot.kernel_version.as_ref().map(|k| format!("Kernel: {}", k)),
        "Kernel",
        &mut lines,
    );
    section(
        snapshot.hostname.as_ref().map(|h| format!("Hostname: {}", h)),
        "Hostname",
        &mut lines,
    );
    section(
        snapshot.load_average.map(|load| {
            format!(
                "Load Average: {:.2}, {:.2}, {:.2}",
                load.one, load.five, load.fifteen
            )
        }),
        "Load Average",
        &mut lines,
    );
    section(
        snapshot
            .uptime
            .map(|uptime| format!("Uptime: {}", format_uptime(uptime))),
        "Uptime",
        &mut lines,
    );
    section(
        snapshot.cpu_percent.map(|cpu| format!("CPU Usage: {}%", cpu)),
        "CPU Usage",
        &mut lines,
    );
    section(
        snapshot.memory.map(|memory| {
            format!(
                "Memory Usage: Total={}, Used={}, Available={}, Percentage={:.1}%",
                format_bytes(memory.total_bytes),
                format_bytes(memory.used_bytes),
                format_bytes(memory.available_bytes),
                memory.percent
            )
        }),
        "Memory Usage",
        &mut lines,
    );

    for disk in &snapshot.disks {
        lines.push((
            ReportLevel::Info,
            format!(
                "Disk Usage: {} = {} / {} ({}%)",
                disk.device,
                format_bytes(disk.used_bytes),
                format_bytes(disk.total_bytes),
                disk.percent
            ),
        ));
    }
    section(None, "Disk Usage", &mut lines);

    lines
}

/// Alert lines for one cycle; a single info line when nothing fired
pub fn describe_alerts(alerts: &[AlertEvent]) -> Vec<(ReportLevel, String)> {
    if alerts.is_empty() {
        return vec![(ReportLevel::Info, "No critical alerts".to_string())];
    }

    alerts
        .iter()
        .map(|alert| (ReportLevel::Critical, alert.message.clone()))
        .collect()
}
