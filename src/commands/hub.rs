//! Log hub command handler.
//!
//! Serves the read-only log views over HTTP until Ctrl+C.

use anyhow::{Context, Result};
use clap::ArgMatches;
use colored::Colorize;
use tokio::sync::broadcast;

use crate::core::config::HubConfig;
use crate::hub::run_server;

/// Execute the hub command
pub fn execute(matches: &ArgMatches) -> Result<()> {
    let config = HubConfig::from_env()
        .context("Invalid hub configuration")?
        .with_host(matches.get_one::<String>("host").cloned())
        .with_port(matches.get_one::<u16>("port").copied());

    println!(
        "{} {}",
        "Monitoring hub on".cyan().bold(),
        format!("http://{}", config.bind_address()).yellow()
    );
    println!("{} {}", "Reading:".dimmed(), config.sources.describe());

    let (shutdown_tx, mut shutdown_rx) = broadcast::channel::<()>(1);
    ctrlc::set_handler(move || {
        let _ = shutdown_tx.send(());
    })
    .map_err(|e| anyhow::anyhow!("Failed to set Ctrl+C handler: {}", e))?;

    let runtime = tokio::runtime::Builder::new_multi_thread()
        .worker_threads(2)
        .enable_all()
        .thread_name("hub-worker")
        .build()
        .context("Failed to start runtime")?;

    runtime.block_on(run_server(config, async move {
        let _ = shutdown_rx.recv().await;
    }))?;

    println!("{}", "Hub stopped.".yellow());
    Ok(())
}
