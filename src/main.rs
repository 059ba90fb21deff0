// This is my entry point for the neowallet CLI
// Everything interesting lives in the library; here I only parse, dispatch and print
use clap::Parser;
use log::{error, LevelFilter};
use neowallet::encryption::secure_clear;
use neowallet::{
    decrypt, encrypt, sign, validate_address, verify_signature, Command, Config, NodeList, Opt,
    SeedNodeSelector, Wallet,
};
use std::process;
use std::time::Duration;

// The seed-node commands are async, so I run the whole CLI on tokio
#[tokio::main]
async fn main() {
    // I log at Info by default so probe results show up, but RUST_LOG still wins when set
    env_logger::builder()
        .filter_level(LevelFilter::Info)
        .parse_default_env()
        .init();

    // I parse the command line arguments using clap
    let opt = Opt::parse();

    // If anything fails I log the error and exit with code 1
    if let Err(e) = run(opt).await {
        error!("Error: {e}");
        process::exit(1);
    }
}

// I build the config in layers: defaults, then the TOML file, then NEOWALLET_* variables,
// and finally --timeout-ms, which beats everything else
fn load_config(opt: &Opt) -> Result<Config, Box<dyn std::error::Error>> {
    let mut config = Config::load(opt.config.as_deref())?;
    if let Some(ms) = opt.timeout_ms {
        config.set_probe_timeout(Duration::from_millis(ms))?;
    }
    Ok(config)
}

// I never print the raw private key, only the WIF the user needs to re-import it
fn print_wallet(wallet: &Wallet) {
    println!("Address:          {}", wallet.address());
    println!("Public key:       {}", hex::encode(wallet.public_key()));
    println!("Script hash:      {}", hex::encode(wallet.hashed_signature()));
    println!("WIF:              {}", wallet.wif());
}

// Cipher keys arrive as hex on the command line; the cipher itself checks the length
fn decode_cipher_key(key: &str) -> Result<Vec<u8>, Box<dyn std::error::Error>> {
    hex::decode(key.trim()).map_err(|e| format!("Cipher key must be hex: {e}").into())
}

// This is where I handle every CLI command
async fn run(opt: Opt) -> Result<(), Box<dyn std::error::Error>> {
    let config = load_config(&opt)?;
    match opt.command {
        // A brand new wallet from fresh system entropy
        Command::NewWallet => {
            let wallet = Wallet::new()?;
            print_wallet(&wallet);
        }
        // Re-importing a wallet from its WIF; a mistyped WIF fails the checksum here
        Command::FromWif { wif } => {
            let wallet = Wallet::from_wif(&wif)?;
            print_wallet(&wallet);
        }
        Command::FromPrivateKey { private_key } => {
            let wallet = Wallet::from_private_key_hex(&private_key)?;
            print_wallet(&wallet);
        }
        // The key can be hex or WIF, whichever the user has at hand
        Command::Sign { key, message } => {
            let signature = sign(message.as_bytes(), &key)?;
            println!("{}", hex::encode(signature));
        }
        Command::Verify {
            public_key,
            signature,
            message,
        } => {
            let public_key = hex::decode(public_key.trim())?;
            let signature = hex::decode(signature.trim())?;
            // An invalid signature is a failure exit so scripts can branch on it
            if verify_signature(message.as_bytes(), &signature, &public_key) {
                println!("Signature is valid");
            } else {
                return Err("Signature is NOT valid".into());
            }
        }
        // ECDH with a peer; I wipe my copy of the secret once it is printed
        Command::SharedSecret {
            wif,
            peer_public_key,
        } => {
            let wallet = Wallet::from_wif(&wif)?;
            let peer = hex::decode(peer_public_key.trim())?;
            let mut secret = wallet.compute_shared_secret(&peer)?;
            println!("{}", hex::encode(&secret));
            secure_clear(&mut secret);
        }
        Command::ValidateAddress { address } => {
            if validate_address(&address) {
                println!("{address} is a valid address");
            } else {
                return Err(format!("Invalid address: {address}").into());
            }
        }
        // For both cipher commands I clear the key bytes before reporting the result
        Command::Encrypt { key, text } => {
            let mut key = decode_cipher_key(&key)?;
            let result = encrypt(&key, &text);
            secure_clear(&mut key);
            println!("{}", result?);
        }
        Command::Decrypt { key, envelope } => {
            let mut key = decode_cipher_key(&key)?;
            let result = decrypt(&key, &envelope);
            secure_clear(&mut key);
            println!("{}", result?);
        }
        // One probe against one node, printed as JSON
        Command::FetchSeed { url } => {
            let selector = SeedNodeSelector::from_config(&config)?;
            let response = selector.fetch_seed_node(&url).await?;
            println!("{}", serde_json::to_string_pretty(&response)?);
        }
        // Without --urls I fall back to the seed list for the configured network
        Command::SelectSeed { urls } => {
            let selector = SeedNodeSelector::from_config(&config)?;
            let best = match urls {
                Some(urls) => selector.select_best_seed_node(&urls).await?,
                None => {
                    let nodes = NodeList::from_urls(config.seed_nodes())?;
                    selector.select_best_from(&nodes).await?
                }
            };
            println!("{}", serde_json::to_string_pretty(&best)?);
        }
    }
    Ok(())
}
