use crate::error::{Result, WalletError};
use crate::network::NodeList;
use serde::{Deserialize, Serialize};
use std::env;
use std::fmt;
use std::fs;
use std::path::Path;
use std::str::FromStr;
use std::time::Duration;

pub const DEFAULT_PROBE_TIMEOUT: Duration = Duration::from_secs(5);

const NETWORK_KEY: &str = "NEOWALLET_NETWORK";
const PROBE_TIMEOUT_KEY: &str = "NEOWALLET_PROBE_TIMEOUT_MS";
const SEED_NODES_KEY: &str = "NEOWALLET_SEED_NODES";

static MAIN_SEEDS: [&str; 5] = [
    "http://seed1.neo.org:10332",
    "http://seed2.neo.org:10332",
    "http://seed3.neo.org:10332",
    "http://seed4.neo.org:10332",
    "http://seed5.neo.org:10332",
];

static TEST_SEEDS: [&str; 5] = [
    "http://test1.cityofzion.io:8880",
    "http://test2.cityofzion.io:8880",
    "http://test3.cityofzion.io:8880",
    "http://test4.cityofzion.io:8880",
    "http://test5.cityofzion.io:8880",
];

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Network {
    #[default]
    Main,
    Test,
}

impl Network {
    pub fn default_seeds(&self) -> Vec<String> {
        let seeds: &[&str] = match self {
            Network::Main => &MAIN_SEEDS,
            Network::Test => &TEST_SEEDS,
        };
        seeds.iter().map(|s| s.to_string()).collect()
    }
}

impl FromStr for Network {
    type Err = WalletError;

    fn from_str(s: &str) -> Result<Self> {
        match s.trim().to_lowercase().as_str() {
            "main" | "mainnet" => Ok(Network::Main),
            "test" | "testnet" => Ok(Network::Test),
            _ => Err(WalletError::Config(format!(
                "Invalid network: {s}. Valid options: main, test"
            ))),
        }
    }
}

impl fmt::Display for Network {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Network::Main => write!(f, "main"),
            Network::Test => write!(f, "test"),
        }
    }
}

/// On-disk shape; every field optional so a file can override just one setting
#[derive(Debug, Default, Deserialize)]
#[serde(deny_unknown_fields)]
struct ConfigFile {
    network: Option<Network>,
    probe_timeout_ms: Option<u64>,
    seed_nodes: Option<Vec<String>>,
}

/// Settings for seed-node selection. A plain value: nothing global, nothing cached.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Config {
    network: Network,
    probe_timeout: Duration,
    seed_nodes: Vec<String>,
}

impl Default for Config {
    fn default() -> Self {
        Self::for_network(Network::Main)
    }
}

impl Config {
    pub fn for_network(network: Network) -> Config {
        Config {
            network,
            probe_timeout: DEFAULT_PROBE_TIMEOUT,
            seed_nodes: network.default_seeds(),
        }
    }

    /// Defaults, then the optional TOML file, then `NEOWALLET_*` environment variables
    pub fn load(path: Option<&Path>) -> Result<Config> {
        let mut config = match path {
            Some(path) => Self::from_file(path)?,
            None => Config::default(),
        };
        config.apply_overrides(|key| env::var(key).ok())?;
        Ok(config)
    }

    pub fn from_file(path: &Path) -> Result<Config> {
        let contents = fs::read_to_string(path)?;
        Self::from_toml_str(&contents)
    }

    pub fn from_toml_str(contents: &str) -> Result<Config> {
        let file: ConfigFile = toml::from_str(contents)?;
        let mut config = Config::for_network(file.network.unwrap_or_default());
        if let Some(ms) = file.probe_timeout_ms {
            config.set_probe_timeout(Duration::from_millis(ms))?;
        }
        if let Some(seeds) = file.seed_nodes {
            config.seed_nodes = seed_list(NodeList::from_urls(&seeds), "seed_nodes")?;
        }
        Ok(config)
    }

    /// Applies overrides from a key lookup (the process environment in [`load`](Self::load))
    pub fn apply_overrides<F>(&mut self, lookup: F) -> Result<()>
    where
        F: Fn(&str) -> Option<String>,
    {
        if let Some(network) = lookup(NETWORK_KEY) {
            let network: Network = network.parse()?;
            if network != self.network {
                self.network = network;
                self.seed_nodes = network.default_seeds();
            }
        }
        if let Some(ms) = lookup(PROBE_TIMEOUT_KEY) {
            let ms: u64 = ms.trim().parse().map_err(|_| {
                WalletError::Config(format!("{PROBE_TIMEOUT_KEY} must be milliseconds, got {ms}"))
            })?;
            self.set_probe_timeout(Duration::from_millis(ms))?;
        }
        if let Some(seeds) = lookup(SEED_NODES_KEY) {
            self.seed_nodes = seed_list(NodeList::parse(&seeds), SEED_NODES_KEY)?;
        }
        Ok(())
    }

    pub fn set_probe_timeout(&mut self, timeout: Duration) -> Result<()> {
        if timeout.is_zero() {
            return Err(WalletError::Config(
                "probe timeout must be greater than zero".to_string(),
            ));
        }
        self.probe_timeout = timeout;
        Ok(())
    }

    pub fn network(&self) -> Network {
        self.network
    }

    pub fn probe_timeout(&self) -> Duration {
        self.probe_timeout
    }

    pub fn seed_nodes(&self) -> &[String] {
        &self.seed_nodes
    }
}

fn seed_list(parsed: Result<NodeList>, source: &str) -> Result<Vec<String>> {
    parsed
        .map(|nodes| nodes.urls().to_vec())
        .map_err(|_| WalletError::Config(format!("{source} lists no seed node URLs")))
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;
    use std::io::Write;

    fn lookup_from(pairs: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let map: HashMap<String, String> = pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        move |key| map.get(key).cloned()
    }

    #[test]
    fn test_defaults() {
        let config = Config::default();
        assert_eq!(config.network(), Network::Main);
        assert_eq!(config.probe_timeout(), Duration::from_secs(5));
        assert_eq!(config.seed_nodes().len(), 5);
        assert!(config.seed_nodes()[0].starts_with("http://seed1.neo.org"));
    }

    #[test]
    fn test_toml_file_overrides() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(
            file,
            "network = \"test\"\nprobe_timeout_ms = 1500\nseed_nodes = [\"http://a:1\", \"http://b:2\"]"
        )
        .unwrap();
        let config = Config::from_file(file.path()).unwrap();
        assert_eq!(config.network(), Network::Test);
        assert_eq!(config.probe_timeout(), Duration::from_millis(1500));
        assert_eq!(config.seed_nodes(), &["http://a:1", "http://b:2"]);
    }

    #[test]
    fn test_partial_toml_keeps_network_seeds() {
        let config = Config::from_toml_str("network = \"test\"").unwrap();
        assert_eq!(config.seed_nodes(), Network::Test.default_seeds().as_slice());
        assert_eq!(config.probe_timeout(), DEFAULT_PROBE_TIMEOUT);
    }

    #[test]
    fn test_unknown_toml_key_rejected() {
        assert!(matches!(
            Config::from_toml_str("timeout = 3"),
            Err(WalletError::Config(_))
        ));
    }

    #[test]
    fn test_zero_timeout_rejected() {
        assert!(Config::from_toml_str("probe_timeout_ms = 0").is_err());
        let mut config = Config::default();
        assert!(config.set_probe_timeout(Duration::ZERO).is_err());
    }

    #[test]
    fn test_env_overrides() {
        let mut config = Config::default();
        config
            .apply_overrides(lookup_from(&[
                (NETWORK_KEY, "testnet"),
                (PROBE_TIMEOUT_KEY, "250"),
                (SEED_NODES_KEY, " http://x:1 , ,http://y:2"),
            ]))
            .unwrap();
        assert_eq!(config.network(), Network::Test);
        assert_eq!(config.probe_timeout(), Duration::from_millis(250));
        assert_eq!(config.seed_nodes(), &["http://x:1", "http://y:2"]);
    }

    #[test]
    fn test_bad_env_values() {
        let mut config = Config::default();
        assert!(config
            .apply_overrides(lookup_from(&[(PROBE_TIMEOUT_KEY, "soon")]))
            .is_err());
        assert!(config
            .apply_overrides(lookup_from(&[(NETWORK_KEY, "moon")]))
            .is_err());
    }

    #[test]
    fn test_missing_file() {
        let result = Config::from_file(Path::new("/definitely/not/here.toml"));
        assert!(matches!(result, Err(WalletError::Io(_))));
    }

    #[test]
    fn test_seed_lists_are_deduplicated() {
        let mut config = Config::default();
        config
            .apply_overrides(lookup_from(&[(
                SEED_NODES_KEY,
                "http://x:1, http://x:1 ,http://y:2,http://x:1",
            )]))
            .unwrap();
        assert_eq!(config.seed_nodes(), &["http://x:1", "http://y:2"]);

        let config = Config::from_toml_str(
            r#"seed_nodes = ["http://a:1", " http://a:1", "http://b:2"]"#,
        )
        .unwrap();
        assert_eq!(config.seed_nodes(), &["http://a:1", "http://b:2"]);
    }

    #[test]
    fn test_empty_seed_list_rejected() {
        let mut config = Config::default();
        assert!(matches!(
            config.apply_overrides(lookup_from(&[(SEED_NODES_KEY, " , ")])),
            Err(WalletError::Config(_))
        ));
        assert!(matches!(
            Config::from_toml_str("seed_nodes = []"),
            Err(WalletError::Config(_))
        ));
    }
}
