// HTTP routes of the log hub, exercised through the router without a socket

use axum::body::{to_bytes, Body};
use axum::http::{Request, StatusCode};
use chrono::{Duration, Local};
use hostwatch::core::logs::TIMESTAMP_FORMAT;
use hostwatch::hub::build_router;
use hostwatch::HubConfig;
use std::fs;
use std::path::Path;
use tempfile::TempDir;
use tower::ServiceExt;

fn config_for(paths: &[&Path], core_tail: usize) -> HubConfig {
    let list = paths
        .iter()
        .map(|p| p.display().to_string())
        .collect::<Vec<_>>()
        .join(",");
    let core_tail = core_tail.to_string();
    HubConfig::from_lookup(move |key: &str| match key {
        "LOG_SOURCES" => Some(list.clone()),
        "CORE_TAIL" => Some(core_tail.clone()),
        _ => None,
    })
    .unwrap()
}

async fn get(config: HubConfig, uri: &str) -> (StatusCode, String) {
    let response = build_router(config)
        .oneshot(Request::builder().uri(uri).body(Body::empty()).unwrap())
        .await
        .unwrap();
    let status = response.status();
    let body = to_bytes(response.into_body(), usize::MAX).await.unwrap();
    (status, String::from_utf8(body.to_vec()).unwrap())
}

fn hours_ago(hours: i64) -> String {
    (Local::now().naive_local() - Duration::hours(hours))
        .format(TIMESTAMP_FORMAT)
        .to_string()
}

#[tokio::test]
async fn test_core_view_shows_last_lines_escaped() {
    let temp_dir = TempDir::new().unwrap();
    let log = temp_dir.path().join("agent.log");
    fs::write(
        &log,
        "[2024-01-01 00:00:00] INFO: first\n[2024-01-01 00:00:01] INFO: <b>second</b>\n[2024-01-01 00:00:02] WARNING: third\n",
    )
    .unwrap();

    let (status, body) = get(config_for(&[&log], 2), "/logs/core").await;
    assert_eq!(status, StatusCode::OK);
    assert!(!body.contains("first"));
    assert!(body.contains("&lt;b&gt;second&lt;/b&gt;"));
    assert!(!body.contains("<b>second"));
    assert!(body.contains("third"));
    assert!(body.contains("last 2 lines"));
}

#[tokio::test]
async fn test_missing_sources_show_placeholder() {
    let temp_dir = TempDir::new().unwrap();
    let missing = temp_dir.path().join("never-written.log");

    let (status, body) = get(config_for(&[&missing], 200), "/logs/extended").await;
    assert_eq!(status, StatusCode::OK);
    assert!(body.contains("No logs available yet."));
}

#[tokio::test]
async fn test_daily_summary_json_counts_recent_entries() {
    let temp_dir = TempDir::new().unwrap();
    let bash = temp_dir.path().join("bash.log");
    let python = temp_dir.path().join("python.log");
    fs::write(
        &bash,
        format!(
            "[{}] INFO: ok\n[{}] INFO: yesterday\nnot a log line\n",
            hours_ago(1),
            hours_ago(30)
        ),
    )
    .unwrap();
    fs::write(
        &python,
        format!(
            "[{}] CRITICAL: oom\n[{}] alert: disk\n",
            hours_ago(2),
            hours_ago(3)
        ),
    )
    .unwrap();

    let (status, body) = get(config_for(&[&bash, &python], 200), "/api/daily_summary").await;
    assert_eq!(status, StatusCode::OK);

    let json: serde_json::Value = serde_json::from_str(&body).unwrap();
    assert_eq!(json["total"], 3);

    let counts = json["counts"].as_array().unwrap();
    assert_eq!(counts.len(), 3);
    let count_of = |level: &str| {
        counts
            .iter()
            .find(|c| c["level"] == level)
            .map(|c| c["count"].as_u64().unwrap())
    };
    assert_eq!(count_of("INFO"), Some(1));
    assert_eq!(count_of("CRITICAL"), Some(1));
    assert_eq!(count_of("ALERT"), Some(1));

    let high = json["high_severity"].as_array().unwrap();
    assert_eq!(high.len(), 2);
    assert!(high[0].as_str().unwrap().ends_with("CRITICAL: oom"));
    assert!(high[1].as_str().unwrap().ends_with("alert: disk"));
}

#[tokio::test]
async fn test_daily_summary_page_without_high_severity() {
    let temp_dir = TempDir::new().unwrap();
    let log = temp_dir.path().join("agent.log");
    fs::write(&log, format!("[{}] INFO: quiet day\n", hours_ago(1))).unwrap();

    let (status, body) = get(config_for(&[&log], 200), "/daily_summary").await;
    assert_eq!(status, StatusCode::OK);
    assert!(body.contains("Total entries: 1"));
    assert!(body.contains("No CRITICAL/ALERT entries in the last 24 hours."));
}

#[tokio::test]
async fn test_index_lists_endpoints() {
    let temp_dir = TempDir::new().unwrap();
    let log = temp_dir.path().join("agent.log");

    let (status, body) = get(config_for(&[&log], 200), "/").await;
    assert_eq!(status, StatusCode::OK);
    assert!(body.contains("/logs/core"));
    assert!(body.contains("/api/daily_summary"));
}

#[tokio::test]
async fn test_unknown_route_is_not_found() {
    let temp_dir = TempDir::new().unwrap();
    let log = temp_dir.path().join("agent.log");

    let (status, _) = get(config_for(&[&log], 200), "/logs/unknown").await;
    assert_eq!(status, StatusCode::NOT_FOUND);
}
