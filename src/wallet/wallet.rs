use crate::error::{Result, WalletError};
use crate::utils::{self, PRIVATE_KEY_LEN};
use crate::wallet::address::{decode_wif, derive_address, encode_wif, script_hash};
use std::fmt;
use zeroize::Zeroizing;

/// A P-256 private scalar and its compressed public point
#[derive(Clone)]
pub struct KeyPair {
    private_key: Zeroizing<Vec<u8>>,
    public_key: Vec<u8>,
}

impl KeyPair {
    /// Pairs the two keys after checking that `public_key` really is `private_key * G`
    pub fn new(private_key: Vec<u8>, public_key: Vec<u8>) -> Result<KeyPair> {
        let private_key = Zeroizing::new(private_key);
        let derived = utils::derive_public_key(&private_key)?;
        if derived != public_key {
            return Err(WalletError::InvalidKey(
                "public key does not match private key".to_string(),
            ));
        }
        Ok(KeyPair {
            private_key,
            public_key,
        })
    }

    pub fn from_private_key(private_key: &[u8]) -> Result<KeyPair> {
        let public_key = utils::derive_public_key(private_key)?;
        Ok(KeyPair {
            private_key: Zeroizing::new(private_key.to_vec()),
            public_key,
        })
    }

    pub fn generate() -> Result<KeyPair> {
        utils::generate_key_pair()
    }

    pub fn public_key(&self) -> &[u8] {
        self.public_key.as_slice()
    }

    pub fn private_key(&self) -> &[u8] {
        self.private_key.as_slice()
    }
}

impl fmt::Debug for KeyPair {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("KeyPair")
            .field("public_key", &hex::encode(&self.public_key))
            .field("private_key", &"<redacted>")
            .finish()
    }
}

/// Key pair plus everything derived from it. Immutable once built.
#[derive(Clone)]
pub struct Wallet {
    key_pair: KeyPair,
    address: String,
    wif: Zeroizing<String>,
    hashed_signature: Vec<u8>,
}

impl Wallet {
    /// Fresh random wallet
    pub fn new() -> Result<Wallet> {
        Self::from_key_pair(KeyPair::generate()?)
    }

    /// Imports a WIF string; the stored WIF is re-encoded from the decoded key
    pub fn from_wif(wif: &str) -> Result<Wallet> {
        let private_key = Zeroizing::new(decode_wif(wif)?);
        Self::from_private_key(&private_key)
    }

    /// Accepts 64 hex characters, optionally prefixed with `0x`
    pub fn from_private_key_hex(private_key: &str) -> Result<Wallet> {
        let trimmed = private_key.trim();
        let digits = trimmed
            .strip_prefix("0x")
            .or_else(|| trimmed.strip_prefix("0X"))
            .unwrap_or(trimmed);
        if digits.len() != PRIVATE_KEY_LEN * 2 {
            return Err(WalletError::InvalidKey(format!(
                "expected {} hex characters, got {}",
                PRIVATE_KEY_LEN * 2,
                digits.len()
            )));
        }
        let bytes = Zeroizing::new(
            hex::decode(digits)
                .map_err(|e| WalletError::InvalidKey(format!("invalid hex private key: {e}")))?,
        );
        Self::from_private_key(&bytes)
    }

    pub fn from_private_key(private_key: &[u8]) -> Result<Wallet> {
        Self::from_key_pair(KeyPair::from_private_key(private_key)?)
    }

    fn from_key_pair(key_pair: KeyPair) -> Result<Wallet> {
        let address = derive_address(key_pair.public_key())?;
        let wif = Zeroizing::new(encode_wif(key_pair.private_key())?);
        let hashed_signature = script_hash(key_pair.public_key())?;
        Ok(Wallet {
            key_pair,
            address,
            wif,
            hashed_signature,
        })
    }

    pub fn public_key(&self) -> &[u8] {
        self.key_pair.public_key()
    }

    pub fn private_key(&self) -> &[u8] {
        self.key_pair.private_key()
    }

    pub fn key_pair(&self) -> &KeyPair {
        &self.key_pair
    }

    pub fn address(&self) -> &str {
        &self.address
    }

    pub fn wif(&self) -> &str {
        self.wif.as_str()
    }

    /// Script hash of the wallet's verification script
    pub fn hashed_signature(&self) -> &[u8] {
        &self.hashed_signature
    }

    /// ECDH with a peer's SEC1 public key
    pub fn compute_shared_secret(&self, peer_public_key: &[u8]) -> Result<Vec<u8>> {
        utils::compute_shared_secret(self.private_key(), peer_public_key)
    }

    pub fn sign(&self, data: &[u8]) -> Result<Vec<u8>> {
        utils::sign(data, self.private_key())
    }

    pub fn verify(&self, data: &[u8], signature: &[u8]) -> bool {
        utils::verify_signature(data, signature, self.public_key())
    }
}

impl fmt::Debug for Wallet {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Wallet")
            .field("address", &self.address)
            .field("public_key", &hex::encode(self.public_key()))
            .field("hashed_signature", &hex::encode(&self.hashed_signature))
            .field("private_key", &"<redacted>")
            .field("wif", &"<redacted>")
            .finish()
    }
}

/// Signs with a key given either as 64 hex characters or as WIF
pub fn sign(data: &[u8], key: &str) -> Result<Vec<u8>> {
    let wallet = match Wallet::from_private_key_hex(key) {
        Ok(wallet) => wallet,
        Err(hex_err) => Wallet::from_wif(key).map_err(|_| hex_err)?,
    };
    wallet.sign(data)
}
