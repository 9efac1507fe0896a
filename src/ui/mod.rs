// UI and formatting module

pub mod console;
pub mod formatters;

// Re-export commonly used items for cleaner imports
pub use console::ConsoleSink;
pub use formatters::{escape_html, format_bytes, format_uptime};
