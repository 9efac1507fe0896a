use std::collections::HashSet;

use chrono::Local;

use crate::error::HostwatchError;

use super::metrics::*;
use super::provider::MetricsProvider;

/// A metric that could not be read during one sample
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Unavailable {
    /// Display label, e.g. "Load Average"
    pub metric: &'static str,
    pub reason: String,
}

impl Unavailable {
    fn new(metric: &'static str, err: &HostwatchError) -> Self {
        Self {
            metric,
            reason: err.reason(),
        }
    }

    /// Report line in the "Unable to determine" form
    pub fn message(&self) -> String {
        format!("{}: Unable to determine - {}", self.metric, self.reason)
    }
}

/// Result of one best-effort sample
#[derive(Debug, Clone)]
pub struct Sample {
    pub snapshot: MetricsSnapshot,
    pub unavailable: Vec<Unavailable>,
}

/// Builds snapshots from a [`MetricsProvider`], containing each failure to its own metric
pub struct MetricsCollector {
    provider: Box<dyn MetricsProvider>,
}

impl MetricsCollector {
    pub fn new(provider: Box<dyn MetricsProvider>) -> Self {
        Self { provider }
    }

    /// Collect every metric; never fails as a whole
    pub fn collect(&mut self) -> Sample {
        let mut snapshot = MetricsSnapshot::empty(Local::now());
        let mut unavailable = Vec::new();

        snapshot.os = keep(
            self.provider.sample_os_info(),
            "OS",
            &mut unavailable,
        );
        snapshot.kernel_version = keep(
            self.provider.sample_kernel_version(),
            "Kernel",
            &mut unavailable,
        );
        snapshot.hostname = keep(
            self.provider.sample_hostname(),
            "Hostname",
            &mut unavailable,
        );
        snapshot.load_average = keep(
            self.provider.sample_load_average(),
            "Load Average",
            &mut unavailable,
        );
        snapshot.uptime = keep(
            self.provider.sample_uptime(),
            "Uptime",
            &mut unavailable,
        );
        snapshot.cpu_percent = keep(
            self.provider.sample_cpu_percent(),
            "CPU Usage",
            &mut unavailable,
        );
        snapshot.memory = keep(
            self.provider.sample_memory(),
            "Memory Usage",
            &mut unavailable,
        );
        snapshot.disks = self.collect_disks(&mut unavailable);

        Sample {
            snapshot,
            unavailable,
        }
    }

    fn collect_disks(&mut self, unavailable: &mut Vec<Unavailable>) -> Vec<DiskUsage> {
        let partitions = match self.provider.sample_disk_partitions() {
            Ok(partitions) => partitions,
            Err(e) => {
                unavailable.push(Unavailable::new("Disk Usage", &e));
                return Vec::new();
            }
        };

        let mut seen = HashSet::new();
        let mut disks = Vec::new();

        for partition in partitions {
            // Pseudo filesystems have no type; only real ones are reported
            if partition.fs_type.is_empty() || !seen.insert(partition.mountpoint.clone()) {
                continue;
            }

            match self.provider.sample_disk_usage(&partition.mountpoint) {
                Ok(space) => disks.push(DiskUsage {
                    device: partition.device,
                    mountpoint: partition.mountpoint,
                    total_bytes: space.total_bytes,
                    used_bytes: space.used_bytes,
                    percent: space.percent,
                }),
                Err(HostwatchError::PermissionDenied(_)) => {
                    log::debug!("Skipping unreadable mount {}", partition.mountpoint);
                }
                Err(e) => unavailable.push(Unavailable {
                    metric: "Disk Usage",
                    reason: format!("{}: {}", partition.device, e.reason()),
                }),
            }
        }

        disks
    }
}

fn keep<T>(
    reading: crate::error::Result<T>,
    metric: &'static str,
    unavailable: &mut Vec<Unavailable>,
) -> Option<T> {
    match reading {
        Ok(value) => Some(value),
        Err(e) => {
            unavailable.push(Unavailable::new(metric, &e));
            None
        }
    }
}
