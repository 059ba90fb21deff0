//! Wallet key material and NEO encodings
//!
//! `address` turns keys into addresses and WIF strings and back; `wallet`
//! assembles the immutable [`Wallet`] aggregate from them.

pub mod address;
#[allow(clippy::module_inception)]
pub mod wallet;

pub use address::{
    address_to_script_hash, decode_wif, derive_address, encode_wif, script_hash,
    script_hash_to_address, validate_address, verification_script, ADDRESS_VERSION,
    SCRIPT_HASH_LEN, WIF_COMPRESSED_FLAG, WIF_VERSION,
};
pub use wallet::{sign, KeyPair, Wallet};
