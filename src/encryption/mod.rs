//! Symmetric encryption of secrets
//!
//! Text is sealed with AES-GCM and shipped as a self-contained base64
//! envelope (nonce, ciphertext and tag). The key is supplied by the caller and
//! never stored here.

pub mod cipher;

pub use cipher::{decrypt, encrypt, AesGcmCipher, ACCEPTED_KEY_LENGTHS, NONCE_LEN, TAG_LEN};

/// Securely clear sensitive data from memory
pub fn secure_clear(data: &mut [u8]) {
    use zeroize::Zeroize;
    data.zeroize();
}
