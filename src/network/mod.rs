//! Seed-node discovery
//!
//! This module picks the healthiest JSON-RPC seed node out of a candidate
//! list. Each candidate is asked for its block count concurrently; the node
//! furthest ahead wins, with latency breaking ties.

pub mod node_list;
pub mod probe;
pub mod selector;

pub use node_list::NodeList;
pub use probe::{
    fetch_seed_node, BlockCountResponse, FetchSeedRequest, ProbeOutcome, SeedNodeProbe,
    GET_BLOCK_COUNT,
};
pub use selector::{pick_best, SeedNodeResponse, SeedNodeSelector};

use crate::config::DEFAULT_PROBE_TIMEOUT;
use crate::error::Result;

/// Selects from a comma-separated URL list with the default probe timeout
pub async fn select_best_seed_node(comma_separated_urls: &str) -> Result<SeedNodeResponse> {
    let nodes = NodeList::parse(comma_separated_urls)?;
    SeedNodeSelector::with_timeout(DEFAULT_PROBE_TIMEOUT)?
        .select_best_from(&nodes)
        .await
}
