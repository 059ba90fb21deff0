//! Error handling for the wallet core
//!
//! Every fallible operation in the crate returns [`Result`], so callers match on
//! one taxonomy whether the failure came from key handling, the cipher or a
//! seed-node probe.

use std::fmt;
use std::time::Duration;

/// Result type alias for wallet operations
pub type Result<T> = std::result::Result<T, WalletError>;

/// Error types for wallet, cipher and seed-node operations
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum WalletError {
    /// Private key is not a valid scalar, or public key is not a valid point
    InvalidKey(String),
    /// WIF string failed base58, checksum, length, version or flag checks
    InvalidWif(String),
    /// The platform entropy source could not be read
    RandomnessFailure(String),
    /// The signer rejected the request
    SigningFailure(String),
    /// Cipher key is not 16, 24 or 32 bytes
    InvalidKeyLength(usize),
    /// The AEAD refused to seal the plaintext
    EncryptionFailure(String),
    /// Envelope is not valid base64
    DecodeFailure(String),
    /// Wrong key, truncated or tampered envelope
    DecryptionFailure(String),
    /// No URL left after parsing the node list
    EmptyNodeList,
    /// Every probed seed node failed
    NoReachableSeedNode { attempted: usize },
    /// Transport level failure talking to a node
    Network(String),
    /// A probe did not finish within its deadline
    Timeout { url: String, after: Duration },
    /// Node answered but not with a usable JSON-RPC response
    Rpc(String),
    /// Malformed NEO address
    InvalidAddress(String),
    /// Configuration errors
    Config(String),
    /// File I/O errors
    Io(String),
}

impl fmt::Display for WalletError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            WalletError::InvalidKey(msg) => write!(f, "Invalid key: {msg}"),
            WalletError::InvalidWif(msg) => write!(f, "Invalid WIF: {msg}"),
            WalletError::RandomnessFailure(msg) => write!(f, "Randomness failure: {msg}"),
            WalletError::SigningFailure(msg) => write!(f, "Signing failure: {msg}"),
            WalletError::InvalidKeyLength(len) => {
                write!(f, "Invalid cipher key length: {len} bytes (expected 16, 24 or 32)")
            }
            WalletError::EncryptionFailure(msg) => write!(f, "Encryption failure: {msg}"),
            WalletError::DecodeFailure(msg) => write!(f, "Decode failure: {msg}"),
            WalletError::DecryptionFailure(msg) => write!(f, "Decryption failure: {msg}"),
            WalletError::EmptyNodeList => write!(f, "Node list is empty"),
            WalletError::NoReachableSeedNode { attempted } => {
                write!(f, "No reachable seed node ({attempted} probed)")
            }
            WalletError::Network(msg) => write!(f, "Network error: {msg}"),
            WalletError::Timeout { url, after } => {
                write!(f, "Probe of {url} timed out after {}ms", after.as_millis())
            }
            WalletError::Rpc(msg) => write!(f, "RPC error: {msg}"),
            WalletError::InvalidAddress(addr) => write!(f, "Invalid address: {addr}"),
            WalletError::Config(msg) => write!(f, "Configuration error: {msg}"),
            WalletError::Io(msg) => write!(f, "I/O error: {msg}"),
        }
    }
}

impl std::error::Error for WalletError {}

impl From<std::io::Error> for WalletError {
    fn from(err: std::io::Error) -> Self {
        WalletError::Io(err.to_string())
    }
}

impl From<reqwest::Error> for WalletError {
    fn from(err: reqwest::Error) -> Self {
        WalletError::Network(err.to_string())
    }
}

impl From<serde_json::Error> for WalletError {
    fn from(err: serde_json::Error) -> Self {
        WalletError::Rpc(format!("malformed JSON-RPC body: {err}"))
    }
}

impl From<toml::de::Error> for WalletError {
    fn from(err: toml::de::Error) -> Self {
        WalletError::Config(err.to_string())
    }
}
