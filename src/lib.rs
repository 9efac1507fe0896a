// Hostwatch Library - Public API

// Re-export error types
pub mod error;
pub use error::{HostwatchError, Result};

// Module declarations
pub mod commands;
pub mod core;
pub mod hub;
pub mod ui;

// Re-export commonly used types
pub use core::config::{HubConfig, MonitorConfig};

// Initialize logging
pub fn init_logging() {
    env_logger::Builder::from_default_env()
        .filter_level(log::LevelFilter::Info)
        .parse_default_env()
        .init();
}
