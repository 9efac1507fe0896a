//! Read-only HTTP view over the operational logs.
//!
//! Every request re-reads and re-parses the configured sources; nothing is cached.

mod pages;

use std::future::Future;
use std::sync::Arc;

use axum::{extract::State, response::Html, response::Json, routing::get, Router};
use chrono::Local;
use serde::Serialize;

use crate::core::config::HubConfig;
use crate::core::logs::{parse_lines, LogSources, WindowSummary, TIMESTAMP_FORMAT};
use crate::error::{HostwatchError, Result};

pub use pages::{render_page, Table};

const EMPTY_LOGS: &str = "No logs available yet.";

/// Shared server state.
struct HubState {
    config: HubConfig,
}

#[derive(Debug, Serialize)]
struct SeverityCount {
    level: String,
    count: usize,
}

#[derive(Debug, Serialize)]
struct SummaryResponse {
    since: String,
    total: usize,
    counts: Vec<SeverityCount>,
    high_severity: Vec<String>,
}

/// Read the sources off the async runtime
async fn read_sources<F>(sources: &LogSources, read: F) -> Vec<String>
where
    F: FnOnce(&LogSources) -> Vec<String> + Send + 'static,
{
    let sources = sources.clone();
    tokio::task::spawn_blocking(move || read(&sources))
        .await
        .unwrap_or_else(|e| {
            log::warn!("Log read task failed: {}", e);
            Vec::new()
        })
}

async fn summarize_sources(config: &HubConfig) -> WindowSummary {
    let lines = read_sources(&config.sources, |sources| sources.read_all()).await;
    let records = parse_lines(&lines);
    config
        .summarizer
        .summarize(&records, Local::now().naive_local())
}

fn lines_or_placeholder(lines: &[String]) -> String {
    if lines.is_empty() {
        EMPTY_LOGS.to_string()
    } else {
        lines.join("\n")
    }
}

async fn handle_index(State(state): State<Arc<HubState>>) -> Html<String> {
    let meta = format!(
        "Monitoring Hub - logs from: {}",
        state.config.sources.describe()
    );
    let content = "Available endpoints:\n - /logs/core\n - /logs/extended\n - /daily_summary\n - /api/daily_summary\n";
    Html(render_page("Home", &meta, None, Some(content)))
}

async fn handle_core(State(state): State<Arc<HubState>>) -> Html<String> {
    let n = state.config.core_tail;
    let lines = read_sources(&state.config.sources, move |sources| sources.tail(n)).await;

    let meta = format!(
        "Source: {} (last {} lines)",
        state.config.sources.describe(),
        n
    );
    Html(render_page(
        "Core Logs",
        &meta,
        None,
        Some(&lines_or_placeholder(&lines)),
    ))
}

async fn handle_extended(State(state): State<Arc<HubState>>) -> Html<String> {
    let max = state.config.extended_limit;
    let lines = read_sources(&state.config.sources, move |sources| sources.bounded(max)).await;

    let meta = format!(
        "Source: {} (up to {} lines)",
        state.config.sources.describe(),
        max
    );
    Html(render_page(
        "Extended Logs",
        &meta,
        None,
        Some(&lines_or_placeholder(&lines)),
    ))
}

async fn handle_daily_summary(State(state): State<Arc<HubState>>) -> Html<String> {
    let summary = summarize_sources(&state.config).await;

    let meta = format!(
        "Summary for last {} hours (since {}). Total entries: {}",
        state.config.summarizer.window.num_hours(),
        summary.since.format(TIMESTAMP_FORMAT),
        summary.total_in_window
    );
    let table = Table {
        headers: vec!["Level".to_string(), "Count".to_string()],
        rows: summary
            .ranked_counts()
            .into_iter()
            .map(|(level, count)| vec![level.to_string(), count.to_string()])
            .collect(),
    };

    let content = if summary.high_severity_records.is_empty() {
        format!(
            "No CRITICAL/ALERT entries in the last {} hours.",
            state.config.summarizer.window.num_hours()
        )
    } else {
        summary
            .high_severity_records
            .iter()
            .filter_map(|record| {
                record
                    .timestamp
                    .map(|ts| format!("[{}] {}", ts.format(TIMESTAMP_FORMAT), record.raw))
            })
            .collect::<Vec<_>>()
            .join("\n")
    };

    Html(render_page("Daily Summary", &meta, Some(&table), Some(&content)))
}

async fn handle_summary_json(State(state): State<Arc<HubState>>) -> Json<SummaryResponse> {
    let summary = summarize_sources(&state.config).await;

    Json(SummaryResponse {
        since: summary.since.format(TIMESTAMP_FORMAT).to_string(),
        total: summary.total_in_window,
        counts: summary
            .ranked_counts()
            .into_iter()
            .map(|(level, count)| SeverityCount {
                level: level.to_string(),
                count,
            })
            .collect(),
        high_severity: summary
            .high_severity_records
            .iter()
            .map(|record| record.raw.clone())
            .collect(),
    })
}

/// Build the axum router.
pub fn build_router(config: HubConfig) -> Router {
    let state = Arc::new(HubState { config });

    Router::new()
        .route("/", get(handle_index))
        .route("/logs/core", get(handle_core))
        .route("/logs/extended", get(handle_extended))
        .route("/daily_summary", get(handle_daily_summary))
        .route("/api/daily_summary", get(handle_summary_json))
        .with_state(state)
}

/// Run the hub until `shutdown` resolves.
pub async fn run_server<F>(config: HubConfig, shutdown: F) -> Result<()>
where
    F: Future<Output = ()> + Send + 'static,
{
    let addr = config.bind_address();
    let listener = tokio::net::TcpListener::bind(&addr)
        .await
        .map_err(|e| HostwatchError::server(format!("Failed to bind {}: {}", addr, e)))?;

    log::info!("Monitoring hub listening on http://{}", addr);

    axum::serve(listener, build_router(config))
        .with_graceful_shutdown(shutdown)
        .await
        .map_err(|e| HostwatchError::server(e.to_string()))
}
