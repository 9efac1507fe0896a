//! Metrics provider capability and its sysinfo-backed implementation.
//!
//! The sampling loop only talks to [`MetricsProvider`]; every accessor can fail
//! on its own without affecting the others.

use std::io::ErrorKind;
use std::path::Path;
use std::time::Duration;

use sysinfo::{CpuRefreshKind, Disks, MemoryRefreshKind, RefreshKind, System};

use super::metrics::{DiskPartition, DiskSpace, LoadAverage, MemoryUsage, OsIdentity};
use crate::error::{HostwatchError, Result};

/// Trait for point-in-time host readings
///
/// Implementations report each metric independently. An `Err` means that
/// single metric is unavailable for this sample.
pub trait MetricsProvider: Send {
    /// Global CPU utilisation since the previous call
    fn sample_cpu_percent(&mut self) -> Result<f32>;

    fn sample_memory(&mut self) -> Result<MemoryUsage>;

    /// Mounted partitions, including ones without a filesystem type
    fn sample_disk_partitions(&mut self) -> Result<Vec<DiskPartition>>;

    /// Usage for one mountpoint; `PermissionDenied` when the mount is not readable
    fn sample_disk_usage(&mut self, mountpoint: &str) -> Result<DiskSpace>;

    fn sample_load_average(&mut self) -> Result<LoadAverage>;

    fn sample_uptime(&mut self) -> Result<Duration>;

    fn sample_os_info(&mut self) -> Result<OsIdentity>;

    fn sample_hostname(&mut self) -> Result<String>;

    fn sample_kernel_version(&mut self) -> Result<String>;
}

/// Provider backed by the `sysinfo` crate
pub struct SysinfoProvider {
    system: System,
    disks: Disks,
}

impl SysinfoProvider {
    /// Create a provider and prime the CPU counters.
    ///
    /// Blocks for `sysinfo::MINIMUM_CPU_UPDATE_INTERVAL` so the first CPU
    /// sample already covers a real measurement interval.
    pub fn new() -> Self {
        let refresh_kind = RefreshKind::nothing()
            .with_cpu(CpuRefreshKind::nothing().with_cpu_usage())
            .with_memory(MemoryRefreshKind::nothing().with_ram());

        let mut system = System::new_with_specifics(refresh_kind);
        std::thread::sleep(sysinfo::MINIMUM_CPU_UPDATE_INTERVAL);
        system.refresh_cpu_usage();

        Self {
            system,
            disks: Disks::new_with_refreshed_list(),
        }
    }
}

impl Default for SysinfoProvider {
    fn default() -> Self {
        Self::new()
    }
}

impl MetricsProvider for SysinfoProvider {
    fn sample_cpu_percent(&mut self) -> Result<f32> {
        self.system.refresh_cpu_usage();
        if self.system.cpus().is_empty() {
            return Err(HostwatchError::metric_unavailable("no CPUs reported"));
        }
        Ok(round_one_decimal(self.system.global_cpu_usage()))
    }

    fn sample_memory(&mut self) -> Result<MemoryUsage> {
        self.system.refresh_memory();

        let total = self.system.total_memory();
        if total == 0 {
            return Err(HostwatchError::metric_unavailable(
                "total memory reported as zero",
            ));
        }
        let available = self.system.available_memory();

        Ok(MemoryUsage {
            total_bytes: total,
            used_bytes: self.system.used_memory(),
            available_bytes: available,
            percent: round_one_decimal(
                (total.saturating_sub(available) as f32 / total as f32) * 100.0,
            ),
        })
    }

    fn sample_disk_partitions(&mut self) -> Result<Vec<DiskPartition>> {
        self.disks.refresh(true);

        Ok(self
            .disks
            .iter()
            .map(|disk| DiskPartition {
                device: disk.name().to_string_lossy().to_string(),
                mountpoint: disk.mount_point().to_string_lossy().to_string(),
                fs_type: disk.file_system().to_string_lossy().to_string(),
            })
            .collect())
    }

    fn sample_disk_usage(&mut self, mountpoint: &str) -> Result<DiskSpace> {
        if let Err(e) = std::fs::metadata(mountpoint) {
            return Err(match e.kind() {
                ErrorKind::PermissionDenied => HostwatchError::permission_denied(mountpoint),
                _ => HostwatchError::Io(e),
            });
        }

        let disk = self
            .disks
            .iter()
            .find(|disk| disk.mount_point() == Path::new(mountpoint))
            .ok_or_else(|| {
                HostwatchError::metric_unavailable(format!("{} is not mounted", mountpoint))
            })?;

        let total = disk.total_space();
        let used = total.saturating_sub(disk.available_space());

        Ok(DiskSpace {
            total_bytes: total,
            used_bytes: used,
            percent: if total > 0 {
                round_one_decimal((used as f32 / total as f32) * 100.0)
            } else {
                0.0
            },
        })
    }

    fn sample_load_average(&mut self) -> Result<LoadAverage> {
        if cfg!(windows) {
            return Err(HostwatchError::metric_unavailable(
                "load average is not supported on this platform",
            ));
        }

        let load = System::load_average();
        Ok(LoadAverage {
            one: load.one,
            five: load.five,
            fifteen: load.fifteen,
        })
    }

    fn sample_uptime(&mut self) -> Result<Duration> {
        match System::uptime() {
            0 => Err(HostwatchError::metric_unavailable("uptime not reported")),
            secs => Ok(Duration::from_secs(secs)),
        }
    }

    fn sample_os_info(&mut self) -> Result<OsIdentity> {
        let name = System::name()
            .ok_or_else(|| HostwatchError::metric_unavailable("OS name not reported"))?;

        Ok(OsIdentity {
            name,
            version: System::os_version().unwrap_or_else(|| "Unknown".to_string()),
            id: System::distribution_id(),
        })
    }

    fn sample_hostname(&mut self) -> Result<String> {
        System::host_name().ok_or_else(|| HostwatchError::metric_unavailable("hostname not reported"))
    }

    fn sample_kernel_version(&mut self) -> Result<String> {
        System::kernel_version()
            .ok_or_else(|| HostwatchError::metric_unavailable("kernel version not reported"))
    }
}

fn round_one_decimal(value: f32) -> f32 {
    (value * 10.0).round() / 10.0
}
