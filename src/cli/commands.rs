use clap::{Parser, Subcommand};
use std::path::PathBuf;

#[derive(Debug, Parser)]
#[command(name = "neowallet", about = "NEO wallet keys, encryption and seed-node selection")]
pub struct Opt {
    #[arg(long = "config", global = true, help = "Path to a TOML configuration file")]
    pub config: Option<PathBuf>,
    #[arg(
        long = "timeout-ms",
        global = true,
        help = "Per-probe timeout in milliseconds (overrides the configuration)"
    )]
    pub timeout_ms: Option<u64>,
    #[command(subcommand)]
    pub command: Command,
}

#[derive(Subcommand, Debug)]
pub enum Command {
    #[command(name = "newwallet", about = "Generate a new wallet")]
    NewWallet,
    #[command(name = "fromwif", about = "Load a wallet from a WIF string")]
    FromWif {
        #[arg(help = "Wallet Import Format private key")]
        wif: String,
    },
    #[command(
        name = "fromprivatekey",
        about = "Load a wallet from a hex-encoded private key"
    )]
    FromPrivateKey {
        #[arg(help = "64 hex characters")]
        private_key: String,
    },
    #[command(name = "sign", about = "Sign a message with ECDSA P-256/SHA-256")]
    Sign {
        #[arg(help = "Private key as hex or WIF")]
        key: String,
        #[arg(help = "Message to sign")]
        message: String,
    },
    #[command(name = "verify", about = "Verify a hex signature over a message")]
    Verify {
        #[arg(help = "Hex-encoded public key")]
        public_key: String,
        #[arg(help = "Hex-encoded signature")]
        signature: String,
        #[arg(help = "Signed message")]
        message: String,
    },
    #[command(
        name = "sharedsecret",
        about = "Compute an ECDH shared secret with a peer public key"
    )]
    SharedSecret {
        #[arg(help = "Own private key as WIF")]
        wif: String,
        #[arg(help = "Hex-encoded peer public key")]
        peer_public_key: String,
    },
    #[command(name = "validateaddress", about = "Check whether an address is well formed")]
    ValidateAddress {
        #[arg(help = "The NEO address")]
        address: String,
    },
    #[command(name = "encrypt", about = "Encrypt text into a base64 envelope")]
    Encrypt {
        #[arg(help = "Hex-encoded 16, 24 or 32 byte key")]
        key: String,
        #[arg(help = "Text to encrypt")]
        text: String,
    },
    #[command(name = "decrypt", about = "Decrypt a base64 envelope")]
    Decrypt {
        #[arg(help = "Hex-encoded 16, 24 or 32 byte key")]
        key: String,
        #[arg(help = "Base64 envelope")]
        envelope: String,
    },
    #[command(name = "fetchseed", about = "Ask one node for its block count")]
    FetchSeed {
        #[arg(help = "JSON-RPC endpoint URL")]
        url: String,
    },
    #[command(
        name = "selectseed",
        about = "Pick the best seed node from a comma-separated list"
    )]
    SelectSeed {
        #[arg(help = "Comma-separated URLs (defaults to the configured seed nodes)")]
        urls: Option<String>,
    },
}
