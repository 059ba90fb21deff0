//! Cryptographic primitives and encoding helpers
//!
//! Hashing, base58check, and the P-256 key operations every other module
//! builds on. All functions are pure over the byte slices they are given.

pub mod crypto;

pub use crypto::{
    base58_decode, base58_encode, base58check_decode, base58check_encode, compute_shared_secret,
    derive_public_key, generate_key_pair, hash160, hash256, ripemd160_digest, sha256_digest, sign,
    verify_signature, CHECK_SUM_LEN, COMPRESSED_PUBLIC_KEY_LEN, PRIVATE_KEY_LEN,
};
