//! Integration tests using mock HTTP server
//!
//! Tests the full flow: CLI arguments → paged HTTP requests → JSON/JSONL file

use clap::Parser;
use serde_json::{json, Value};
use std::fs;
use std::time::Duration;
use tempfile::tempdir;
use wallet_trades::cli::{Cli, Runner};
use wallet_trades::{Error, FetchConfig, Paginator, QueryFilter, Side, TradeRecord};
use wiremock::matchers::{method, path, query_param};
use wiremock::{Mock, MockServer, ResponseTemplate};

const WALLET: &str = "0x56687bf447db6ffa42ffe2204a05edaa20f55839";

fn trades(start: usize, count: usize) -> Value {
    Value::Array(
        (start..start + count)
            .map(|i| {
                json!({
                    "proxyWallet": WALLET,
                    "transactionHash": format!("0x{i:064x}"),
                    "side": if i % 2 == 0 { "BUY" } else { "SELL" },
                    "price": 0.5,
                    "size": 2,
                    "timestamp": 1_700_000_000 + i,
                    "conditionId": format!("0xc{}", i % 3),
                    "title": "Some market"
                })
            })
            .collect(),
    )
}

async fn mount_page(server: &MockServer, offset: u32, body: Value) {
    Mock::given(method("GET"))
        .and(path("/trades"))
        .and(query_param("offset", offset.to_string()))
        .respond_with(ResponseTemplate::new(200).set_body_json(body))
        .mount(server)
        .await;
}

fn config(server: &MockServer) -> FetchConfig {
    FetchConfig::builder()
        .base_url(format!("{}/trades", server.uri()))
        .page_size(10)
        .max_offset(30)
        .request_delay(Duration::from_millis(1))
        .build()
}

fn filter() -> QueryFilter {
    QueryFilter::new(WALLET.parse().unwrap())
}

// ============================================================================
// Paginator over HTTP
// ============================================================================

#[tokio::test]
async fn test_paginates_until_short_page() {
    let server = MockServer::start().await;
    mount_page(&server, 0, trades(0, 10)).await;
    mount_page(&server, 10, trades(10, 4)).await;

    let paginator = Paginator::http(config(&server)).unwrap();
    let outcome = paginator.run(&filter()).await.unwrap();

    assert_eq!(outcome.len(), 14);
    assert!(!outcome.hit_ceiling);
    assert_eq!(outcome.pages_fetched, 2);
    assert_eq!(server.received_requests().await.unwrap().len(), 2);
}

#[tokio::test]
async fn test_stops_at_offset_ceiling() {
    let server = MockServer::start().await;
    for offset in [0, 10, 20, 30] {
        mount_page(&server, offset, trades(offset as usize, 10)).await;
    }
    mount_page(&server, 40, trades(40, 10)).await;

    let paginator = Paginator::http(config(&server)).unwrap();
    let outcome = paginator.run(&filter()).await.unwrap();

    assert_eq!(outcome.len(), 40);
    assert!(outcome.hit_ceiling);
    assert_eq!(server.received_requests().await.unwrap().len(), 4);
}

#[tokio::test]
async fn test_overlapping_pages_are_deduplicated() {
    let server = MockServer::start().await;
    mount_page(&server, 0, trades(0, 10)).await;
    // new trades shifted the window: the second page repeats three trades
    mount_page(&server, 10, trades(7, 8)).await;

    let paginator = Paginator::http(config(&server)).unwrap();
    let outcome = paginator.run(&filter()).await.unwrap();

    assert_eq!(outcome.len(), 15);
    assert_eq!(outcome.duplicates, 3);

    let hashes: Vec<&str> = outcome
        .records
        .iter()
        .filter_map(TradeRecord::dedup_key)
        .collect();
    let mut unique = hashes.clone();
    unique.sort_unstable();
    unique.dedup();
    assert_eq!(unique.len(), hashes.len());
}

#[tokio::test]
async fn test_client_error_is_fatal() {
    let server = MockServer::start().await;
    mount_page(&server, 0, trades(0, 10)).await;
    Mock::given(method("GET"))
        .and(path("/trades"))
        .and(query_param("offset", "10"))
        .respond_with(ResponseTemplate::new(404))
        .mount(&server)
        .await;

    let paginator = Paginator::http(config(&server)).unwrap();
    let err = paginator.run(&filter()).await.unwrap_err();

    assert!(matches!(err, Error::HttpStatus { status: 404, .. }));
    assert_eq!(server.received_requests().await.unwrap().len(), 2);
}

#[tokio::test]
async fn test_persistent_server_error_exhausts_retries() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/trades"))
        .respond_with(ResponseTemplate::new(503))
        .mount(&server)
        .await;

    let config = FetchConfig::builder()
        .base_url(format!("{}/trades", server.uri()))
        .request_delay(Duration::from_millis(1))
        .max_retries(2)
        .build();
    let paginator = Paginator::http(config).unwrap();
    let err = paginator.run(&filter()).await.unwrap_err();

    assert!(matches!(
        err,
        Error::RetriesExhausted {
            offset: 0,
            attempts: 3,
            status: 503
        }
    ));
    assert_eq!(server.received_requests().await.unwrap().len(), 3);
}

#[tokio::test]
async fn test_rate_limit_then_success() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/trades"))
        .respond_with(ResponseTemplate::new(429))
        .up_to_n_times(2)
        .mount(&server)
        .await;
    mount_page(&server, 0, trades(0, 3)).await;

    let paginator = Paginator::http(config(&server)).unwrap();
    let outcome = paginator.run(&filter().side(Side::Buy)).await.unwrap();

    assert_eq!(outcome.len(), 3);
    assert_eq!(server.received_requests().await.unwrap().len(), 3);
}

#[tokio::test]
async fn test_invalid_config_rejected_before_requests() {
    let config = FetchConfig::builder().page_size(5000).build();
    let err = Paginator::http(config).unwrap_err();
    assert!(matches!(err, Error::InvalidConfigValue { .. }));
}

// ============================================================================
// CLI runner end to end
// ============================================================================

fn write_config(dir: &std::path::Path, server: &MockServer) -> std::path::PathBuf {
    let config_path = dir.join("fetch.yaml");
    fs::write(
        &config_path,
        format!(
            "base_url: {}/trades\npage_size: 10\nmax_offset: 30\nrequest_delay_ms: 1\n",
            server.uri()
        ),
    )
    .unwrap();
    config_path
}

#[tokio::test]
async fn test_runner_writes_jsonl() {
    let server = MockServer::start().await;
    mount_page(&server, 0, trades(0, 10)).await;
    mount_page(&server, 10, trades(10, 2)).await;

    let dir = tempdir().unwrap();
    let config_path = write_config(dir.path(), &server);
    let out = dir.path().join("out").join("trades.jsonl");

    let cli = Cli::parse_from([
        "wallet-trades",
        WALLET,
        "-c",
        config_path.to_str().unwrap(),
        "-o",
        out.to_str().unwrap(),
    ]);
    let summary = Runner::new(cli).execute().await.unwrap();

    assert_eq!(summary.trades, 12);
    assert!(!summary.hit_ceiling);
    assert_eq!(summary.output.as_deref(), Some(out.as_path()));

    let content = fs::read_to_string(&out).unwrap();
    let lines: Vec<Value> = content
        .lines()
        .map(|l| serde_json::from_str(l).unwrap())
        .collect();
    assert_eq!(lines.len(), 12);
    assert_eq!(lines[0], trades(0, 1)[0]);
}

#[tokio::test]
async fn test_runner_writes_json_with_filters() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/trades"))
        .and(query_param("market", "0xc1"))
        .and(query_param("side", "SELL"))
        .respond_with(ResponseTemplate::new(200).set_body_json(trades(0, 2)))
        .mount(&server)
        .await;

    let dir = tempdir().unwrap();
    let config_path = write_config(dir.path(), &server);
    let out = dir.path().join("trades.json");

    let cli = Cli::parse_from([
        "wallet-trades",
        WALLET,
        "--market",
        "0xc1",
        "--side",
        "sell",
        "--format",
        "json",
        "-c",
        config_path.to_str().unwrap(),
        "-o",
        out.to_str().unwrap(),
    ]);
    let summary = Runner::new(cli).execute().await.unwrap();

    assert_eq!(summary.filters, vec!["market=0xc1", "side=SELL"]);

    let written: Value = serde_json::from_str(&fs::read_to_string(&out).unwrap()).unwrap();
    assert_eq!(written, trades(0, 2));
}

#[tokio::test]
async fn test_runner_empty_history() {
    let server = MockServer::start().await;
    mount_page(&server, 0, json!([])).await;

    let dir = tempdir().unwrap();
    let config_path = write_config(dir.path(), &server);
    let out = dir.path().join("none.jsonl");

    let cli = Cli::parse_from([
        "wallet-trades",
        WALLET,
        "-c",
        config_path.to_str().unwrap(),
        "-o",
        out.to_str().unwrap(),
    ]);
    let summary = Runner::new(cli).execute().await.unwrap();

    assert_eq!(summary.trades, 0);
    assert_eq!(fs::read_to_string(&out).unwrap(), "");
}

#[tokio::test]
async fn test_runner_reports_bad_config() {
    let dir = tempdir().unwrap();
    let config_path = dir.path().join("bad.yaml");
    fs::write(&config_path, "max_offset: 9000\n").unwrap();

    let cli = Cli::parse_from([
        "wallet-trades",
        WALLET,
        "-c",
        config_path.to_str().unwrap(),
        "-o",
        dir.path().join("x.jsonl").to_str().unwrap(),
    ]);
    let err = Runner::new(cli).execute().await.unwrap_err();

    assert!(err.to_string().contains("max_offset"));
    assert!(!dir.path().join("x.jsonl").exists());
}
