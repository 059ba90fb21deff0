use crate::error::{Result, WalletError};
use aes_gcm::aead::consts::U12;
use aes_gcm::aead::{Aead, KeyInit};
use aes_gcm::aes::Aes192;
use aes_gcm::{Aes128Gcm, Aes256Gcm, AesGcm, Nonce};
use data_encoding::BASE64;
use zeroize::Zeroizing;

type Aes192Gcm = AesGcm<Aes192, U12>;

pub const NONCE_LEN: usize = 12;
pub const TAG_LEN: usize = 16;
pub const ACCEPTED_KEY_LENGTHS: [usize; 3] = [16, 24, 32];

/// AES-GCM keyed by 16, 24 or 32 bytes
pub enum AesGcmCipher {
    Aes128(Box<Aes128Gcm>),
    Aes192(Box<Aes192Gcm>),
    Aes256(Box<Aes256Gcm>),
}

impl AesGcmCipher {
    pub fn new(key: &[u8]) -> Result<Self> {
        Self::validate_key(key)?;
        let cipher = match key.len() {
            16 => Aes128Gcm::new_from_slice(key).map(|c| AesGcmCipher::Aes128(Box::new(c))),
            24 => Aes192Gcm::new_from_slice(key).map(|c| AesGcmCipher::Aes192(Box::new(c))),
            _ => Aes256Gcm::new_from_slice(key).map(|c| AesGcmCipher::Aes256(Box::new(c))),
        };
        cipher.map_err(|_| WalletError::InvalidKeyLength(key.len()))
    }

    pub fn validate_key(key: &[u8]) -> Result<()> {
        if !ACCEPTED_KEY_LENGTHS.contains(&key.len()) {
            return Err(WalletError::InvalidKeyLength(key.len()));
        }
        Ok(())
    }

    /// Seals `plaintext` under a fresh random nonce; returns nonce || ciphertext || tag
    pub fn seal(&self, plaintext: &[u8]) -> Result<Vec<u8>> {
        let nonce_bytes = generate_nonce();
        let nonce = Nonce::from_slice(&nonce_bytes);
        let sealed = match self {
            AesGcmCipher::Aes128(c) => c.encrypt(nonce, plaintext),
            AesGcmCipher::Aes192(c) => c.encrypt(nonce, plaintext),
            AesGcmCipher::Aes256(c) => c.encrypt(nonce, plaintext),
        }
        .map_err(|e| {
            WalletError::EncryptionFailure(format!("AES-GCM encryption failed: {e}"))
        })?;

        let mut envelope = Vec::with_capacity(NONCE_LEN + sealed.len());
        envelope.extend_from_slice(&nonce_bytes);
        envelope.extend_from_slice(&sealed);
        Ok(envelope)
    }

    /// Inverse of [`seal`](Self::seal); fails unless the tag authenticates
    pub fn open(&self, envelope: &[u8]) -> Result<Vec<u8>> {
        if envelope.len() < NONCE_LEN + TAG_LEN {
            return Err(WalletError::DecryptionFailure(format!(
                "envelope of {} bytes is shorter than nonce and tag",
                envelope.len()
            )));
        }
        let (nonce_bytes, sealed) = envelope.split_at(NONCE_LEN);
        let nonce = Nonce::from_slice(nonce_bytes);
        match self {
            AesGcmCipher::Aes128(c) => c.decrypt(nonce, sealed),
            AesGcmCipher::Aes192(c) => c.decrypt(nonce, sealed),
            AesGcmCipher::Aes256(c) => c.decrypt(nonce, sealed),
        }
        .map_err(|_| {
            WalletError::DecryptionFailure(
                "authentication failed: wrong key or corrupted data".to_string(),
            )
        })
    }

    pub fn algorithm_name(&self) -> &'static str {
        match self {
            AesGcmCipher::Aes128(_) => "AES-128-GCM",
            AesGcmCipher::Aes192(_) => "AES-192-GCM",
            AesGcmCipher::Aes256(_) => "AES-256-GCM",
        }
    }
}

fn generate_nonce() -> [u8; NONCE_LEN] {
    use rand::RngCore;
    let mut nonce = [0u8; NONCE_LEN];
    rand::thread_rng().fill_bytes(&mut nonce);
    nonce
}

/// Encrypts `text` under `key` into a base64 envelope
pub fn encrypt(key: &[u8], text: &str) -> Result<String> {
    let cipher = AesGcmCipher::new(key)?;
    let envelope = cipher.seal(text.as_bytes())?;
    Ok(BASE64.encode(&envelope))
}

/// Decrypts a base64 envelope produced by [`encrypt`]
pub fn decrypt(key: &[u8], crypto_text: &str) -> Result<String> {
    let cipher = AesGcmCipher::new(key)?;
    let envelope = BASE64
        .decode(crypto_text.trim().as_bytes())
        .map_err(|e| WalletError::DecodeFailure(format!("invalid base64: {e}")))?;
    let plaintext = Zeroizing::new(cipher.open(&envelope)?);
    String::from_utf8(plaintext.to_vec())
        .map_err(|_| WalletError::DecryptionFailure("plaintext is not valid UTF-8".to_string()))
}
