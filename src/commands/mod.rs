// Command handlers module
pub mod hub;
pub mod monitor;
pub mod version;

// Re-exports for cleaner imports
pub use version::execute as version;
