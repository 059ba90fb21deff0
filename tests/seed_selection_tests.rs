//! Seed-node selection integration tests
//!
//! Every node here is a local mock, so the tests exercise the real HTTP
//! client, the timeouts and the concurrent fan-out without leaving 127.0.0.1.

mod common;

use common::{dead_url, Behaviour, MockNode};
use neowallet::{SeedNodeProbe, SeedNodeSelector, WalletError};
use std::time::{Duration, Instant};

fn selector(timeout_ms: u64) -> SeedNodeSelector {
    SeedNodeSelector::with_timeout(Duration::from_millis(timeout_ms)).unwrap()
}

#[tokio::test]
async fn test_fetch_seed_node_reports_height_and_latency() {
    let node = MockNode::height(2_650_111, 50).await;
    let response = selector(5_000).fetch_seed_node(&node.url).await.unwrap();

    assert_eq!(response.jsonrpc(), "2.0");
    assert_eq!(response.id(), 1);
    assert_eq!(response.result(), 2_650_111);
    assert!(response.response_time() >= Duration::from_millis(50));
    assert_eq!(node.hits(), 1);
}

#[tokio::test]
async fn test_prefers_height_then_latency() {
    let url1 = MockNode::height(100, 0).await;
    let url2 = MockNode::height(105, 400).await;
    let url3 = MockNode::height(105, 0).await;
    let input = format!("{}, {} ,{}", url1.url, url2.url, url3.url);

    let best = selector(5_000).select_best_seed_node(&input).await.unwrap();
    assert_eq!(best.url(), url3.url);
    assert_eq!(best.block_count(), 105);
    assert!(best.response_time() < Duration::from_millis(400));
}

#[tokio::test]
async fn test_all_nodes_unreachable() {
    let input = format!("{},{},{}", dead_url().await, dead_url().await, dead_url().await);
    let result = selector(2_000).select_best_seed_node(&input).await;
    assert_eq!(result, Err(WalletError::NoReachableSeedNode { attempted: 3 }));
}

#[tokio::test]
async fn test_empty_input_issues_no_requests() {
    let node = MockNode::height(1, 0).await;
    let result = selector(1_000).select_best_seed_node(" ,, ").await;
    assert_eq!(result, Err(WalletError::EmptyNodeList));
    assert_eq!(node.hits(), 0);
}

#[tokio::test]
async fn test_partial_failure_is_absorbed() {
    let broken = MockNode::spawn(Behaviour::Status(500)).await;
    let garbage = MockNode::spawn(Behaviour::Body("<html>not json</html>".to_string())).await;
    let rpc_error = MockNode::spawn(Behaviour::Body(
        r#"{"jsonrpc":"2.0","id":1,"error":{"code":-1,"message":"busy"}}"#.to_string(),
    ))
    .await;
    let healthy = MockNode::height(7, 0).await;
    let input = format!(
        "{},{},{},{},{}",
        dead_url().await,
        broken.url,
        garbage.url,
        rpc_error.url,
        healthy.url
    );

    let best = selector(2_000).select_best_seed_node(&input).await.unwrap();
    assert_eq!(best.url(), healthy.url);
    assert_eq!(best.block_count(), 7);
}

#[tokio::test]
async fn test_probe_failure_kinds() {
    let probe = SeedNodeProbe::new(Duration::from_millis(2_000)).unwrap();

    let broken = MockNode::spawn(Behaviour::Status(503)).await;
    assert!(matches!(probe.fetch(&broken.url).await, Err(WalletError::Rpc(_))));

    let garbage = MockNode::spawn(Behaviour::Body("{}".to_string())).await;
    assert!(matches!(probe.fetch(&garbage.url).await, Err(WalletError::Rpc(_))));

    let no_result = MockNode::spawn(Behaviour::Body(r#"{"jsonrpc":"2.0","id":1}"#.to_string())).await;
    assert!(matches!(probe.fetch(&no_result.url).await, Err(WalletError::Rpc(_))));

    assert!(matches!(
        probe.fetch(&dead_url().await).await,
        Err(WalletError::Network(_))
    ));
}

#[tokio::test]
async fn test_probe_timeout_records_elapsed_time() {
    let hanging = MockNode::spawn(Behaviour::Hang).await;
    let probe = SeedNodeProbe::new(Duration::from_millis(200)).unwrap();

    let outcome = probe.probe(&hanging.url).await;
    assert!(!outcome.is_success());
    assert!(outcome.elapsed() >= Duration::from_millis(200));
    assert!(outcome.elapsed() < Duration::from_secs(3));
    match outcome {
        neowallet::ProbeOutcome::Failed { reason, .. } => {
            assert!(matches!(reason, WalletError::Timeout { .. }))
        }
        other => panic!("expected a timeout, got {other:?}"),
    }
}

#[tokio::test]
async fn test_hanging_node_does_not_stall_selection() {
    let hanging = MockNode::spawn(Behaviour::Hang).await;
    let healthy = MockNode::height(42, 0).await;
    let input = format!("{},{}", hanging.url, healthy.url);

    let started = Instant::now();
    let best = selector(300).select_best_seed_node(&input).await.unwrap();
    assert_eq!(best.url(), healthy.url);
    assert!(started.elapsed() < Duration::from_secs(3));
}

#[tokio::test]
async fn test_probes_run_concurrently() {
    let mut nodes = Vec::new();
    for height in 0..4 {
        nodes.push(MockNode::height(height, 500).await);
    }
    let input = nodes
        .iter()
        .map(|n| n.url.as_str())
        .collect::<Vec<_>>()
        .join(",");

    let started = Instant::now();
    let best = selector(5_000).select_best_seed_node(&input).await.unwrap();
    // Four sequential probes would need at least two seconds
    assert!(started.elapsed() < Duration::from_millis(1_500));
    assert_eq!(best.block_count(), 3);
    assert!(nodes.iter().all(|n| n.hits() == 1));
}

#[tokio::test]
async fn test_duplicate_urls_probed_once() {
    let node = MockNode::height(9, 0).await;
    let input = format!("{0},{0}, {0}", node.url);
    let best = selector(2_000).select_best_seed_node(&input).await.unwrap();
    assert_eq!(best.url(), node.url);
    assert_eq!(node.hits(), 1);
}

#[tokio::test]
async fn test_abandoned_selection_returns_promptly() {
    let a = MockNode::spawn(Behaviour::Hang).await;
    let b = MockNode::spawn(Behaviour::Hang).await;
    let input = format!("{},{}", a.url, b.url);
    let slow = selector(60_000);

    let started = Instant::now();
    let outcome =
        tokio::time::timeout(Duration::from_millis(200), slow.select_best_seed_node(&input)).await;
    assert!(outcome.is_err());
    assert!(started.elapsed() < Duration::from_secs(2));
}

#[tokio::test]
async fn test_selection_result_serializes() {
    let node = MockNode::height(12, 0).await;
    let best = selector(2_000).select_best_seed_node(&node.url).await.unwrap();
    let json = serde_json::to_value(&best).unwrap();
    assert_eq!(json["url"], node.url.as_str());
    assert_eq!(json["block_count"], 12);
    assert!(json["response_time_ns"].is_u64());
}
