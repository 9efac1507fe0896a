//! Startup configuration for the monitor and the log hub.
//!
//! Values come from the process environment (after `.env` is loaded) and are
//! immutable once built. Invalid values are fatal configuration errors.

use std::path::PathBuf;
use std::str::FromStr;

use crate::core::logs::{LogSources, WindowSummarizer};
use crate::core::system_monitor::Thresholds;
use crate::error::{HostwatchError, Result};

pub const DEFAULT_INTERVAL_SECS: u64 = 5;
pub const DEFAULT_LOG_PATH: &str = "/var/log/system-monitor.log";
pub const DEFAULT_BASH_LOG_PATH: &str = "/var/log/bash/system-monitor.log";
pub const DEFAULT_PYTHON_LOG_PATH: &str = "/var/log/python/system-monitor.log";
pub const DEFAULT_CORE_TAIL: usize = 200;
pub const DEFAULT_EXTENDED_LIMIT: usize = 20_000;
pub const DEFAULT_HOST: &str = "0.0.0.0";
pub const DEFAULT_PORT: u16 = 8080;

/// Configuration of the sampling loop
#[derive(Debug, Clone, PartialEq)]
pub struct MonitorConfig {
    pub interval_secs: u64,
    pub thresholds: Thresholds,
    /// Operational log the monitor appends to
    pub log_path: PathBuf,
}

impl MonitorConfig {
    /// Load from the process environment
    pub fn from_env(interval: Option<&str>) -> Result<Self> {
        Self::from_lookup(interval, |key| std::env::var(key).ok())
    }

    /// Load using `lookup` for environment values
    ///
    /// | Env Var          | Default                       |
    /// |------------------|-------------------------------|
    /// | `LOG_PATH`       | `log_path`, then `/var/log/system-monitor.log` |
    /// | `RAM_THRESHOLD`  | `15`                          |
    /// | `DISK_THRESHOLD` | `90`                          |
    pub fn from_lookup<F>(interval: Option<&str>, lookup: F) -> Result<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let interval_secs = match interval {
            Some(raw) => parse_interval(raw)?,
            None => DEFAULT_INTERVAL_SECS,
        };

        let defaults = Thresholds::default();
        let thresholds = Thresholds {
            ram_available_min_percent: parse_or(
                &lookup,
                "RAM_THRESHOLD",
                defaults.ram_available_min_percent,
            )?,
            disk_used_max_percent: parse_or(
                &lookup,
                "DISK_THRESHOLD",
                defaults.disk_used_max_percent,
            )?,
        };
        validate_percent("RAM_THRESHOLD", thresholds.ram_available_min_percent)?;
        validate_percent("DISK_THRESHOLD", thresholds.disk_used_max_percent)?;

        let log_path = non_empty(&lookup, "LOG_PATH")
            .or_else(|| non_empty(&lookup, "log_path"))
            .unwrap_or_else(|| DEFAULT_LOG_PATH.to_string());

        Ok(Self {
            interval_secs,
            thresholds,
            log_path: PathBuf::from(log_path),
        })
    }
}

/// Configuration of the read-only log hub
#[derive(Debug, Clone, PartialEq)]
pub struct HubConfig {
    pub sources: LogSources,
    /// Lines shown by the core view
    pub core_tail: usize,
    /// Cap on lines shown by the extended view
    pub extended_limit: usize,
    pub host: String,
    pub port: u16,
    pub summarizer: WindowSummarizer,
}

impl HubConfig {
    /// Load from the process environment
    pub fn from_env() -> Result<Self> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Load using `lookup` for environment values
    ///
    /// | Env Var          | Default                                   |
    /// |------------------|-------------------------------------------|
    /// | `LOG_SOURCES`    | unset; comma-separated list replacing the two below |
    /// | `LOG_PATH_BASH`  | `LOG_PATH`, then `/var/log/bash/system-monitor.log` |
    /// | `LOG_PATH_PY`    | `LOG_PATH`, then `/var/log/python/system-monitor.log` |
    /// | `CORE_TAIL`      | `200`                                     |
    /// | `EXTENDED_LIMIT` | `20000`                                   |
    /// | `HOST`           | `0.0.0.0`                                 |
    /// | `PORT`           | `8080`                                    |
    pub fn from_lookup<F>(lookup: F) -> Result<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let sources = match non_empty(&lookup, "LOG_SOURCES") {
            Some(list) => LogSources::new(
                list.split(',')
                    .map(str::trim)
                    .filter(|s| !s.is_empty())
                    .map(PathBuf::from),
            ),
            None => {
                let shared = non_empty(&lookup, "LOG_PATH");
                let bash = non_empty(&lookup, "LOG_PATH_BASH")
                    .or_else(|| shared.clone())
                    .unwrap_or_else(|| DEFAULT_BASH_LOG_PATH.to_string());
                let python = non_empty(&lookup, "LOG_PATH_PY")
                    .or(shared)
                    .unwrap_or_else(|| DEFAULT_PYTHON_LOG_PATH.to_string());
                LogSources::new([bash, python])
            }
        };

        Ok(Self {
            sources,
            core_tail: parse_or(&lookup, "CORE_TAIL", DEFAULT_CORE_TAIL)?,
            extended_limit: parse_or(&lookup, "EXTENDED_LIMIT", DEFAULT_EXTENDED_LIMIT)?,
            host: non_empty(&lookup, "HOST").unwrap_or_else(|| DEFAULT_HOST.to_string()),
            port: parse_or(&lookup, "PORT", DEFAULT_PORT)?,
            summarizer: WindowSummarizer::default(),
        })
    }

    pub fn with_host(mut self, host: Option<String>) -> Self {
        if let Some(host) = host {
            self.host = host;
        }
        self
    }

    pub fn with_port(mut self, port: Option<u16>) -> Self {
        if let Some(port) = port {
            self.port = port;
        }
        self
    }

    pub fn bind_address(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }
}

/// Parse a sampling interval given in whole seconds
pub fn parse_interval(raw: &str) -> Result<u64> {
    let interval: i64 = raw.trim().parse().map_err(|_| {
        HostwatchError::config("Invalid interval. Please provide a number (seconds).")
    })?;

    if interval < 1 {
        return Err(HostwatchError::config(
            "Interval must be at least 1 second.",
        ));
    }

    Ok(interval as u64)
}

fn non_empty<F>(lookup: &F, key: &str) -> Option<String>
where
    F: Fn(&str) -> Option<String>,
{
    lookup(key)
        .map(|value| value.trim().to_string())
        .filter(|value| !value.is_empty())
}

fn parse_or<F, T>(lookup: &F, key: &str, default: T) -> Result<T>
where
    F: Fn(&str) -> Option<String>,
    T: FromStr,
{
    match non_empty(lookup, key) {
        Some(raw) => raw
            .parse()
            .map_err(|_| HostwatchError::config(format!("{} has an invalid value: {}", key, raw))),
        None => Ok(default),
    }
}

fn validate_percent(key: &str, value: f32) -> Result<()> {
    if (0.0..=100.0).contains(&value) {
        Ok(())
    } else {
        Err(HostwatchError::config(format!(
            "{} must be between 0 and 100, got {}",
            key, value
        )))
    }
}
