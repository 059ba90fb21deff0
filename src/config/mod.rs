//! Configuration management
//!
//! Which network to default to, how long a single seed-node probe may take,
//! and which seed nodes to try when the caller gives none.

pub mod settings;

pub use settings::{Config, Network, DEFAULT_PROBE_TIMEOUT};
