use crate::config::{Config, DEFAULT_PROBE_TIMEOUT};
use crate::error::{Result, WalletError};
use log::debug;
use reqwest::Client;
use serde::{Deserialize, Serialize, Serializer};
use serde_json::{json, Value};
use std::time::{Duration, Instant};

pub const GET_BLOCK_COUNT: &str = "getblockcount";
const JSONRPC_VERSION: &str = "2.0";
const REQUEST_ID: i64 = 1;

pub(crate) fn serialize_nanos<S>(
    value: &Duration,
    serializer: S,
) -> std::result::Result<S::Ok, S::Error>
where
    S: Serializer,
{
    serializer.serialize_u64(u64::try_from(value.as_nanos()).unwrap_or(u64::MAX))
}

/// A node's answer to `getblockcount`, plus the locally measured round trip
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct BlockCountResponse {
    jsonrpc: String,
    id: i64,
    result: u64,
    #[serde(rename = "response_time_ns", serialize_with = "serialize_nanos")]
    response_time: Duration,
}

impl BlockCountResponse {
    pub fn new(jsonrpc: String, id: i64, result: u64, response_time: Duration) -> Self {
        BlockCountResponse {
            jsonrpc,
            id,
            result,
            response_time,
        }
    }

    pub fn jsonrpc(&self) -> &str {
        &self.jsonrpc
    }

    pub fn id(&self) -> i64 {
        self.id
    }

    /// Block height reported by the node
    pub fn result(&self) -> u64 {
        self.result
    }

    pub fn response_time(&self) -> Duration {
        self.response_time
    }
}

/// A URL paired with what it answered
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FetchSeedRequest {
    pub url: String,
    pub response: BlockCountResponse,
}

/// Terminal state of one probe
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ProbeOutcome {
    Succeeded(FetchSeedRequest),
    Failed {
        url: String,
        reason: WalletError,
        elapsed: Duration,
    },
}

impl ProbeOutcome {
    pub fn url(&self) -> &str {
        match self {
            ProbeOutcome::Succeeded(request) => &request.url,
            ProbeOutcome::Failed { url, .. } => url,
        }
    }

    pub fn elapsed(&self) -> Duration {
        match self {
            ProbeOutcome::Succeeded(request) => request.response.response_time(),
            ProbeOutcome::Failed { elapsed, .. } => *elapsed,
        }
    }

    pub fn is_success(&self) -> bool {
        matches!(self, ProbeOutcome::Succeeded(_))
    }
}

#[derive(Debug, Deserialize)]
struct RpcEnvelope {
    jsonrpc: String,
    id: i64,
    #[serde(default)]
    result: Option<u64>,
    #[serde(default)]
    error: Option<Value>,
}

/// Issues a single `getblockcount` JSON-RPC call against one node
#[derive(Debug, Clone)]
pub struct SeedNodeProbe {
    client: Client,
    timeout: Duration,
}

impl SeedNodeProbe {
    pub fn new(timeout: Duration) -> Result<Self> {
        if timeout.is_zero() {
            return Err(WalletError::Config(
                "probe timeout must be greater than zero".to_string(),
            ));
        }
        let client = Client::builder().connect_timeout(timeout).build()?;
        Ok(SeedNodeProbe { client, timeout })
    }

    pub fn from_config(config: &Config) -> Result<Self> {
        Self::new(config.probe_timeout())
    }

    pub fn timeout(&self) -> Duration {
        self.timeout
    }

    pub async fn fetch(&self, url: &str) -> Result<BlockCountResponse> {
        match self.probe(url).await {
            ProbeOutcome::Succeeded(request) => Ok(request.response),
            ProbeOutcome::Failed { reason, .. } => Err(reason),
        }
    }

    /// Never errors: failures come back as [`ProbeOutcome::Failed`] with the time spent
    pub async fn probe(&self, url: &str) -> ProbeOutcome {
        debug!("Probing seed node {url}");
        let started = Instant::now();
        let attempt = tokio::time::timeout(self.timeout, self.call_block_count(url)).await;
        let elapsed = started.elapsed();

        let reason = match attempt {
            Ok(Ok((jsonrpc, id, height))) => {
                debug!("Seed node {url} at height {height} after {elapsed:?}");
                return ProbeOutcome::Succeeded(FetchSeedRequest {
                    url: url.to_string(),
                    response: BlockCountResponse::new(jsonrpc, id, height, elapsed),
                });
            }
            Ok(Err(reason)) => reason,
            Err(_) => WalletError::Timeout {
                url: url.to_string(),
                after: self.timeout,
            },
        };
        debug!("Seed node {url} failed after {elapsed:?}: {reason}");
        ProbeOutcome::Failed {
            url: url.to_string(),
            reason,
            elapsed,
        }
    }

    async fn call_block_count(&self, url: &str) -> Result<(String, i64, u64)> {
        let body = json!({
            "jsonrpc": JSONRPC_VERSION,
            "method": GET_BLOCK_COUNT,
            "params": [],
            "id": REQUEST_ID
        });
        let response = self.client.post(url).json(&body).send().await?;
        let status = response.status();
        if !status.is_success() {
            return Err(WalletError::Rpc(format!("{url} answered HTTP {status}")));
        }
        let bytes = response.bytes().await?;
        let envelope: RpcEnvelope = serde_json::from_slice(&bytes)?;
        if let Some(error) = envelope.error.filter(|e| !e.is_null()) {
            return Err(WalletError::Rpc(format!("{url} returned error {error}")));
        }
        let height = envelope
            .result
            .ok_or_else(|| WalletError::Rpc(format!("{url} returned no result")))?;
        Ok((envelope.jsonrpc, envelope.id, height))
    }
}

/// Probes one node with the default timeout
pub async fn fetch_seed_node(url: &str) -> Result<BlockCountResponse> {
    SeedNodeProbe::new(DEFAULT_PROBE_TIMEOUT)?.fetch(url).await
}
