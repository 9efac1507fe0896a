//! Alert system for monitoring critical conditions.
//!
//! Evaluates a metrics snapshot against fixed thresholds and generates alerts.

use super::metrics::MetricsSnapshot;
use serde::{Deserialize, Serialize};

/// Alert thresholds, fixed for the lifetime of the process
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Thresholds {
    pub ram_available_min_percent: f32, // Alert when available RAM drops below (%)
    pub disk_used_max_percent: f32,     // Alert when a disk fills above (%)
}

impl Default for Thresholds {
    fn default() -> Self {
        Self {
            ram_available_min_percent: 15.0,
            disk_used_max_percent: 90.0,
        }
    }
}

/// An individual alert
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AlertEvent {
    pub severity: AlertSeverity,
    pub metric: AlertMetric,
    /// What the alert is about, e.g. the device name
    pub subject: String,
    pub message: String,
    pub observed_value: f32,
    pub threshold: f32,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum AlertSeverity {
    Critical,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum AlertMetric {
    RamLow,
    DiskHigh,
}

/// Evaluate a snapshot and generate alerts.
///
/// Metrics absent from the snapshot are skipped.
pub fn evaluate_alerts(snapshot: &MetricsSnapshot, thresholds: &Thresholds) -> Vec<AlertEvent> {
    let mut alerts = Vec::new();

    // RAM alert
    if let Some(memory) = snapshot.memory {
        let available = 100.0 - memory.percent;
        if available < thresholds.ram_available_min_percent {
            alerts.push(AlertEvent {
                severity: AlertSeverity::Critical,
                metric: AlertMetric::RamLow,
                subject: "RAM".to_string(),
                message: format!(
                    "RAM available: {:.1}% (threshold: {}%)",
                    available, thresholds.ram_available_min_percent
                ),
                observed_value: available,
                threshold: thresholds.ram_available_min_percent,
            });
        }
    }

    // Disk alerts, one per offending device
    for disk in &snapshot.disks {
        if disk.percent > thresholds.disk_used_max_percent {
            alerts.push(AlertEvent {
                severity: AlertSeverity::Critical,
                metric: AlertMetric::DiskHigh,
                subject: disk.device.clone(),
                message: format!(
                    "Disk usage over {}% - {}: {}%",
                    thresholds.disk_used_max_percent, disk.device, disk.percent
                ),
                observed_value: disk.percent,
                threshold: thresholds.disk_used_max_percent,
            });
        }
    }

    alerts
}
