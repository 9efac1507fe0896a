// Core business logic module

pub mod config;
pub mod logs;
pub mod system_monitor;

// Re-export commonly used items
pub use config::{HubConfig, MonitorConfig};
