// Sampling loop driven by a scripted provider, written to a real log file

use hostwatch::core::logs::{parse_lines, read_lines};
use hostwatch::core::system_monitor::{
    AlertMetric, DiskPartition, DiskSpace, FileSink, LoadAverage, MemorySink, MemoryUsage,
    MetricsCollector, MetricsProvider, MultiSink, OsIdentity, ReportLevel, SamplingLoop,
    Thresholds,
};
use hostwatch::{HostwatchError, Result};
use std::time::Duration;
use tempfile::TempDir;

/// Provider reporting a nearly full root disk and low memory
struct PressuredHost;

impl MetricsProvider for PressuredHost {
    fn sample_cpu_percent(&mut self) -> Result<f32> {
        Ok(97.0)
    }

    fn sample_memory(&mut self) -> Result<MemoryUsage> {
        Ok(MemoryUsage {
            total_bytes: 8 * 1024 * 1024 * 1024,
            used_bytes: 7 * 1024 * 1024 * 1024,
            available_bytes: 1024 * 1024 * 1024,
            percent: 87.5,
        })
    }

    fn sample_disk_partitions(&mut self) -> Result<Vec<DiskPartition>> {
        Ok(vec![
            DiskPartition {
                device: "/dev/nvme0n1p2".to_string(),
                mountpoint: "/".to_string(),
                fs_type: "ext4".to_string(),
            },
            DiskPartition {
                device: "/dev/nvme0n1p1".to_string(),
                mountpoint: "/boot/efi".to_string(),
                fs_type: "vfat".to_string(),
            },
        ])
    }

    fn sample_disk_usage(&mut self, mountpoint: &str) -> Result<DiskSpace> {
        match mountpoint {
            "/" => Ok(DiskSpace {
                total_bytes: 100 * 1024 * 1024 * 1024,
                used_bytes: 93 * 1024 * 1024 * 1024,
                percent: 93.0,
            }),
            _ => Err(HostwatchError::permission_denied(mountpoint)),
        }
    }

    fn sample_load_average(&mut self) -> Result<LoadAverage> {
        Ok(LoadAverage {
            one: 3.5,
            five: 2.25,
            fifteen: 1.0,
        })
    }

    fn sample_uptime(&mut self) -> Result<Duration> {
        Err(HostwatchError::metric_unavailable("boot time unknown"))
    }

    fn sample_os_info(&mut self) -> Result<OsIdentity> {
        Ok(OsIdentity {
            name: "Ubuntu".to_string(),
            version: "24.04".to_string(),
            id: "ubuntu".to_string(),
        })
    }

    fn sample_hostname(&mut self) -> Result<String> {
        Ok("edge-7".to_string())
    }

    fn sample_kernel_version(&mut self) -> Result<String> {
        Ok("6.8.0".to_string())
    }
}

#[test]
fn test_cycle_is_written_in_parseable_format() {
    let temp_dir = TempDir::new().unwrap();
    let log_path = temp_dir.path().join("agent").join("system-monitor.log");
    let memory = MemorySink::new();

    let sink = MultiSink::new()
        .with(memory.clone())
        .with(FileSink::open(&log_path).unwrap());
    let mut sampling = SamplingLoop::new(
        MetricsCollector::new(Box::new(PressuredHost)),
        Box::new(sink),
        Thresholds::default(),
        5,
    )
    .unwrap();

    let outcome = sampling.tick();
    let metrics: Vec<_> = outcome.alerts.iter().map(|a| a.metric).collect();
    assert_eq!(metrics, vec![AlertMetric::RamLow, AlertMetric::DiskHigh]);
    assert_eq!(outcome.sample.snapshot.disks.len(), 1);

    let lines = memory.lines();
    assert!(lines.contains(&(ReportLevel::Info, "Load Average: 3.50, 2.25, 1.00".to_string())));
    assert!(lines.contains(&(ReportLevel::Info, "OS: Ubuntu 24.04 (ID: ubuntu)".to_string())));
    assert!(lines.contains(&(
        ReportLevel::Info,
        "Memory Usage: Total=8.0GB, Used=7.0GB, Available=1.0GB, Percentage=87.5%".to_string()
    )));
    assert!(lines.contains(&(
        ReportLevel::Warning,
        "Uptime: Unable to determine - boot time unknown".to_string()
    )));

    let records = parse_lines(&read_lines(&log_path));
    assert_eq!(records.len(), lines.len());
    assert!(records.iter().all(|r| r.timestamp.is_some()));

    let critical: Vec<_> = records
        .iter()
        .filter(|r| r.severity == "CRITICAL")
        .map(|r| r.message.as_str())
        .collect();
    assert_eq!(
        critical,
        vec![
            "RAM available: 12.5% (threshold: 15%)",
            "Disk usage over 90% - /dev/nvme0n1p2: 93%"
        ]
    );
    assert!(records
        .iter()
        .any(|r| r.severity == "WARNING" && r.message.starts_with("Uptime: Unable")));
}

#[test]
fn test_loop_refuses_zero_interval() {
    let result = SamplingLoop::new(
        MetricsCollector::new(Box::new(PressuredHost)),
        Box::new(MemorySink::new()),
        Thresholds::default(),
        0,
    );
    assert!(result.is_err());
}
