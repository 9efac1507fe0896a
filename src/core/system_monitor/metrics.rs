use chrono::{DateTime, Local};
use serde::{Deserialize, Serialize};
use std::time::Duration;

/// Point-in-time bundle of host metrics.
///
/// Every optional field is independently absent when the provider could not
/// read it; an absent field is never an error for the snapshot as a whole.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MetricsSnapshot {
    pub timestamp: DateTime<Local>,
    pub cpu_percent: Option<f32>,
    pub memory: Option<MemoryUsage>,
    pub disks: Vec<DiskUsage>,
    pub load_average: Option<LoadAverage>,
    pub uptime: Option<Duration>,
    pub os: Option<OsIdentity>,
    pub hostname: Option<String>,
    pub kernel_version: Option<String>,
}

impl MetricsSnapshot {
    /// Snapshot with every metric absent
    pub fn empty(timestamp: DateTime<Local>) -> Self {
        Self {
            timestamp,
            cpu_percent: None,
            memory: None,
            disks: Vec::new(),
            load_average: None,
            uptime: None,
            os: None,
            hostname: None,
            kernel_version: None,
        }
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct MemoryUsage {
    pub total_bytes: u64,
    pub used_bytes: u64,
    pub available_bytes: u64,
    pub percent: f32,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct DiskUsage {
    pub device: String,
    pub mountpoint: String,
    pub total_bytes: u64,
    pub used_bytes: u64,
    pub percent: f32,
}

/// Mounted partition as listed by the provider, before usage is queried
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct DiskPartition {
    pub device: String,
    pub mountpoint: String,
    pub fs_type: String,
}

/// Space figures for a single mountpoint
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct DiskSpace {
    pub total_bytes: u64,
    pub used_bytes: u64,
    pub percent: f32,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct LoadAverage {
    pub one: f64,
    pub five: f64,
    pub fifteen: f64,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct OsIdentity {
    pub name: String,
    pub version: String,
    pub id: String,
}
