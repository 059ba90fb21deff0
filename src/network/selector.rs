use crate::config::Config;
use crate::error::{Result, WalletError};
use crate::network::node_list::NodeList;
use crate::network::probe::{serialize_nanos, BlockCountResponse, ProbeOutcome, SeedNodeProbe};
use log::{info, warn};
use serde::Serialize;
use std::time::Duration;
use tokio::task::JoinSet;

/// The winning seed node
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SeedNodeResponse {
    url: String,
    block_count: u64,
    #[serde(rename = "response_time_ns", serialize_with = "serialize_nanos")]
    response_time: Duration,
}

impl SeedNodeResponse {
    pub fn new(url: String, block_count: u64, response_time: Duration) -> Self {
        SeedNodeResponse {
            url,
            block_count,
            response_time,
        }
    }

    pub fn url(&self) -> &str {
        &self.url
    }

    pub fn block_count(&self) -> u64 {
        self.block_count
    }

    pub fn response_time(&self) -> Duration {
        self.response_time
    }
}

/// Probes every candidate concurrently and keeps the healthiest one
#[derive(Debug, Clone)]
pub struct SeedNodeSelector {
    probe: SeedNodeProbe,
}

impl SeedNodeSelector {
    pub fn new(probe: SeedNodeProbe) -> Self {
        SeedNodeSelector { probe }
    }

    pub fn with_timeout(timeout: Duration) -> Result<Self> {
        Ok(Self::new(SeedNodeProbe::new(timeout)?))
    }

    pub fn from_config(config: &Config) -> Result<Self> {
        Ok(Self::new(SeedNodeProbe::from_config(config)?))
    }

    /// Single-node probe for callers that already trust one URL
    pub async fn fetch_seed_node(&self, url: &str) -> Result<BlockCountResponse> {
        self.probe.fetch(url).await
    }

    /// Parses the comma-separated list and selects from it; an empty list fails
    /// before any request is sent
    pub async fn select_best_seed_node(
        &self,
        comma_separated_urls: &str,
    ) -> Result<SeedNodeResponse> {
        let nodes = NodeList::parse(comma_separated_urls)?;
        self.select_best_from(&nodes).await
    }

    pub async fn select_best_from(&self, nodes: &NodeList) -> Result<SeedNodeResponse> {
        let outcomes = self.probe_all(nodes).await;
        let best = pick_best(&outcomes).map_err(|e| match e {
            WalletError::NoReachableSeedNode { .. } => WalletError::NoReachableSeedNode {
                attempted: nodes.len(),
            },
            other => other,
        })?;
        info!(
            "Selected seed node {} at height {} ({:?}) out of {} candidates",
            best.url(),
            best.block_count(),
            best.response_time(),
            nodes.len()
        );
        Ok(best)
    }

    /// One task per URL, all joined before returning. Outcomes come back in
    /// `nodes` order regardless of which probe finished first.
    ///
    /// Dropping the returned future drops the `JoinSet`, which aborts every
    /// probe still in flight.
    pub async fn probe_all(&self, nodes: &NodeList) -> Vec<ProbeOutcome> {
        let mut tasks = JoinSet::new();
        for (index, url) in nodes.urls().iter().enumerate() {
            let probe = self.probe.clone();
            let url = url.clone();
            tasks.spawn(async move { (index, probe.probe(&url).await) });
        }

        let mut slots: Vec<Option<ProbeOutcome>> = (0..nodes.len()).map(|_| None).collect();
        while let Some(joined) = tasks.join_next().await {
            match joined {
                Ok((index, outcome)) => {
                    if let ProbeOutcome::Failed { url, reason, .. } = &outcome {
                        warn!("Seed node {url} skipped: {reason}");
                    }
                    slots[index] = Some(outcome);
                }
                Err(e) => warn!("Seed node probe task ended abnormally: {e}"),
            }
        }
        settle_slots(nodes, slots)
    }
}

/// Every listed URL yields exactly one outcome; a slot whose task never
/// reported counts as a failed probe
fn settle_slots(nodes: &NodeList, slots: Vec<Option<ProbeOutcome>>) -> Vec<ProbeOutcome> {
    nodes
        .urls()
        .iter()
        .zip(slots)
        .map(|(url, slot)| {
            slot.unwrap_or_else(|| ProbeOutcome::Failed {
                url: url.clone(),
                reason: WalletError::Network("probe task did not complete".to_string()),
                elapsed: Duration::ZERO,
            })
        })
        .collect()
}

/// Highest block count wins; equal heights go to the faster node; a full tie
/// keeps the earlier outcome
pub fn pick_best(outcomes: &[ProbeOutcome]) -> Result<SeedNodeResponse> {
    let mut best: Option<&BlockCountResponse> = None;
    let mut best_url = "";
    for outcome in outcomes {
        let ProbeOutcome::Succeeded(request) = outcome else {
            continue;
        };
        let candidate = &request.response;
        let better = match best {
            None => true,
            Some(current) => {
                candidate.result() > current.result()
                    || (candidate.result() == current.result()
                        && candidate.response_time() < current.response_time())
            }
        };
        if better {
            best = Some(candidate);
            best_url = &request.url;
        }
    }
    best.map(|response| {
        SeedNodeResponse::new(
            best_url.to_string(),
            response.result(),
            response.response_time(),
        )
    })
    .ok_or(WalletError::NoReachableSeedNode {
        attempted: outcomes.len(),
    })
}
