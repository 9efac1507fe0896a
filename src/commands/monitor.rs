//! System monitor command handler.
//!
//! Samples the host on a fixed interval, printing each cycle and appending it
//! to the operational log until Ctrl+C.

use anyhow::{Context, Result};
use clap::ArgMatches;
use colored::Colorize;
use tokio::sync::broadcast;

use crate::core::config::MonitorConfig;
use crate::core::system_monitor::{
    FileSink, MetricsCollector, MultiSink, SamplingLoop, SysinfoProvider,
};
use crate::ui::ConsoleSink;

/// Execute the monitor command
pub fn execute(matches: &ArgMatches) -> Result<()> {
    let interval = matches.get_one::<String>("interval").map(String::as_str);
    let no_clear = matches.get_flag("no-clear");

    // Configuration errors are fatal before anything is sampled
    let config = MonitorConfig::from_env(interval).context("Invalid monitor configuration")?;

    println!(
        "Starting system monitor (refreshing every {} seconds)...",
        config.interval_secs
    );
    log::info!("Writing operational log to {}", config.log_path.display());

    let sink = MultiSink::new()
        .with(ConsoleSink::new(!no_clear))
        .with(FileSink::open_or_disabled(&config.log_path));

    let sampling = SamplingLoop::new(
        MetricsCollector::new(Box::new(SysinfoProvider::new())),
        Box::new(sink),
        config.thresholds,
        config.interval_secs,
    )?;

    let (shutdown_tx, shutdown_rx) = broadcast::channel::<()>(1);
    ctrlc::set_handler(move || {
        let _ = shutdown_tx.send(());
    })
    .map_err(|e| anyhow::anyhow!("Failed to set Ctrl+C handler: {}", e))?;

    let runtime = tokio::runtime::Builder::new_current_thread()
        .enable_time()
        .thread_name("sampling-loop")
        .build()
        .context("Failed to start runtime")?;

    let cycles = runtime.block_on(sampling.run(shutdown_rx));
    log::debug!("Monitor exited after {} cycles", cycles);

    if cycles == 0 {
        println!("{}", "No samples were taken.".dimmed());
    }

    Ok(())
}
