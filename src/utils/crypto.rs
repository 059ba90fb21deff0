use p256::elliptic_curve::sec1::ToEncodedPoint;
use p256::{FieldBytes, PublicKey, SecretKey};
use ring::digest::{Context, SHA256};
use ring::rand::{SecureRandom, SystemRandom};
use ring::signature::{
    EcdsaKeyPair, UnparsedPublicKey, ECDSA_P256_SHA256_FIXED, ECDSA_P256_SHA256_FIXED_SIGNING,
};
use ripemd::{Digest as RipemdDigest, Ripemd160};
use zeroize::Zeroizing;

use crate::error::{Result, WalletError};
use crate::wallet::KeyPair;

pub const PRIVATE_KEY_LEN: usize = 32;
pub const COMPRESSED_PUBLIC_KEY_LEN: usize = 33;
const UNCOMPRESSED_PUBLIC_KEY_LEN: usize = 65;
pub const CHECK_SUM_LEN: usize = 4;

// A uniformly random 32-byte string is outside [1, n-1] with probability ~2^-32.
const MAX_KEYGEN_ATTEMPTS: usize = 16;

pub fn sha256_digest(data: &[u8]) -> Vec<u8> {
    let mut context = Context::new(&SHA256);
    context.update(data);
    let digest = context.finish();
    digest.as_ref().to_vec()
}

/// SHA-256 applied twice, used for base58check checksums
pub fn hash256(data: &[u8]) -> Vec<u8> {
    sha256_digest(&sha256_digest(data))
}

pub fn ripemd160_digest(data: &[u8]) -> Vec<u8> {
    let mut hasher = Ripemd160::new();
    hasher.update(data);
    hasher.finalize().to_vec()
}

/// RIPEMD160(SHA256(data))
pub fn hash160(data: &[u8]) -> Vec<u8> {
    ripemd160_digest(&sha256_digest(data))
}

pub fn base58_encode(data: &[u8]) -> String {
    bs58::encode(data).into_string()
}

pub fn base58_decode(data: &str) -> Result<Vec<u8>> {
    bs58::decode(data)
        .into_vec()
        .map_err(|e| WalletError::InvalidAddress(format!("Invalid base58 encoding: {e}")))
}

/// Appends the first four bytes of hash256(payload) and base58-encodes the result
pub fn base58check_encode(payload: &[u8]) -> String {
    let mut data = payload.to_vec();
    data.extend_from_slice(&hash256(payload)[..CHECK_SUM_LEN]);
    base58_encode(&data)
}

/// Decodes base58 and strips the checksum after verifying it
pub fn base58check_decode(data: &str) -> Result<Vec<u8>> {
    let decoded = base58_decode(data)?;
    if decoded.len() < CHECK_SUM_LEN + 1 {
        return Err(WalletError::InvalidAddress(format!(
            "payload of {} bytes is too short for a checksum",
            decoded.len()
        )));
    }
    let (payload, checksum) = decoded.split_at(decoded.len() - CHECK_SUM_LEN);
    if hash256(payload)[..CHECK_SUM_LEN] != *checksum {
        return Err(WalletError::InvalidAddress("checksum mismatch".to_string()));
    }
    Ok(payload.to_vec())
}

fn parse_secret_key(private_key: &[u8]) -> Result<SecretKey> {
    if private_key.len() != PRIVATE_KEY_LEN {
        return Err(WalletError::InvalidKey(format!(
            "private key must be {PRIVATE_KEY_LEN} bytes, got {}",
            private_key.len()
        )));
    }
    SecretKey::from_bytes(FieldBytes::from_slice(private_key)).map_err(|_| {
        WalletError::InvalidKey("private key is zero or not below the curve order".to_string())
    })
}

/// Standard SEC1 only: `02`/`03` compressed or `04` uncompressed
pub(crate) fn parse_public_key(public_key: &[u8]) -> Result<PublicKey> {
    let encoding_ok = match public_key.first() {
        Some(0x02) | Some(0x03) => public_key.len() == COMPRESSED_PUBLIC_KEY_LEN,
        Some(0x04) => public_key.len() == UNCOMPRESSED_PUBLIC_KEY_LEN,
        _ => false,
    };
    if !encoding_ok {
        return Err(WalletError::InvalidKey(format!(
            "public key is not a compressed or uncompressed SEC1 point ({} bytes)",
            public_key.len()
        )));
    }
    PublicKey::from_sec1_bytes(public_key)
        .map_err(|_| WalletError::InvalidKey("public key is not a point on P-256".to_string()))
}

/// Draws a fresh private scalar from the system CSPRNG and derives its public point
pub fn generate_key_pair() -> Result<KeyPair> {
    let rng = SystemRandom::new();
    let mut candidate = Zeroizing::new([0u8; PRIVATE_KEY_LEN]);
    for _ in 0..MAX_KEYGEN_ATTEMPTS {
        rng.fill(&mut candidate[..]).map_err(|_| {
            WalletError::RandomnessFailure("system entropy source unavailable".to_string())
        })?;
        if let Ok(secret) = parse_secret_key(&candidate[..]) {
            let public_key = secret.public_key().to_encoded_point(true).as_bytes().to_vec();
            return KeyPair::new(candidate.to_vec(), public_key);
        }
    }
    Err(WalletError::RandomnessFailure(
        "entropy source kept producing invalid scalars".to_string(),
    ))
}

/// Compressed SEC1 encoding of `private_key * G`
pub fn derive_public_key(private_key: &[u8]) -> Result<Vec<u8>> {
    let secret = parse_secret_key(private_key)?;
    Ok(secret.public_key().to_encoded_point(true).as_bytes().to_vec())
}

/// ECDSA P-256 over SHA-256(data); 64-byte r || s with a random nonce
pub fn sign(data: &[u8], private_key: &[u8]) -> Result<Vec<u8>> {
    let secret = parse_secret_key(private_key)?;
    let uncompressed = secret.public_key().to_encoded_point(false);
    let rng = SystemRandom::new();
    let key_pair = EcdsaKeyPair::from_private_key_and_public_key(
        &ECDSA_P256_SHA256_FIXED_SIGNING,
        private_key,
        uncompressed.as_bytes(),
        &rng,
    )
    .map_err(|e| WalletError::InvalidKey(format!("signer rejected key: {e}")))?;
    let signature = key_pair
        .sign(&rng, data)
        .map_err(|e| WalletError::SigningFailure(format!("Failed to sign message: {e}")))?
        .as_ref()
        .to_vec();
    Ok(signature)
}

/// Accepts compressed or uncompressed public keys
pub fn verify_signature(data: &[u8], signature: &[u8], public_key: &[u8]) -> bool {
    let Ok(public_key) = parse_public_key(public_key) else {
        return false;
    };
    let uncompressed = public_key.to_encoded_point(false);
    let peer_public_key = UnparsedPublicKey::new(&ECDSA_P256_SHA256_FIXED, uncompressed.as_bytes());
    peer_public_key.verify(data, signature).is_ok()
}

/// ECDH on P-256: the x-coordinate of `own_private_key * peer_public_key`
pub fn compute_shared_secret(own_private_key: &[u8], peer_public_key: &[u8]) -> Result<Vec<u8>> {
    let secret = parse_secret_key(own_private_key)?;
    let peer = parse_public_key(peer_public_key)?;
    let shared = p256::ecdh::diffie_hellman(secret.to_nonzero_scalar(), peer.as_affine());
    Ok(shared.raw_secret_bytes().to_vec())
}
