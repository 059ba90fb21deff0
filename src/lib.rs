//! # neowallet - NEO Wallet Core
//!
//! Key management, encodings and seed-node selection for a NEO light wallet.
//! The host application owns storage and UI; everything here takes raw bytes
//! or strings in and hands values back, keeping no state between calls.
//!
//! ## What Lives Here
//! - **Keys**: P-256 key generation, public-key derivation, ECDSA signing, ECDH
//! - **Encodings**: NEO addresses (script hash + base58check) and WIF
//! - **Encryption**: AES-GCM sealing of arbitrary text into a base64 envelope
//! - **Seed nodes**: concurrent `getblockcount` probing and best-node selection
//!
//! ## Layout
//! - `utils/`: hashing, base58check and the raw curve operations
//! - `wallet/`: address/WIF codec and the immutable `Wallet` aggregate
//! - `encryption/`: the AES-GCM envelope cipher
//! - `network/`: node-list parsing, the per-node probe and the selector
//! - `config/`: network choice, probe timeout and default seed list
//! - `error/`: the single error type every operation returns
//! - `cli/`: argument parsing for the `neowallet` binary
//!
//! Key operations are synchronous and safe to call from any thread. Seed-node
//! selection is async and runs on tokio.

pub mod cli;
pub mod config;
pub mod encryption;
pub mod error;
pub mod network;
pub mod utils;
pub mod wallet;

// Re-export commonly used types for convenience
pub use cli::{Command, Opt};
pub use config::{Config, Network};
pub use encryption::{decrypt, encrypt};
pub use error::{Result, WalletError};
pub use network::{
    fetch_seed_node, select_best_seed_node, BlockCountResponse, FetchSeedRequest, NodeList,
    ProbeOutcome, SeedNodeProbe, SeedNodeResponse, SeedNodeSelector,
};
pub use utils::{compute_shared_secret, derive_public_key, generate_key_pair, verify_signature};
pub use wallet::{
    decode_wif, derive_address, encode_wif, sign, validate_address, KeyPair, Wallet,
};
