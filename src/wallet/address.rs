use zeroize::Zeroizing;

use crate::error::{Result, WalletError};
use crate::utils::crypto::parse_public_key;
use crate::utils::{
    base58check_decode, base58check_encode, hash160, COMPRESSED_PUBLIC_KEY_LEN, PRIVATE_KEY_LEN,
};

pub const ADDRESS_VERSION: u8 = 0x17;
pub const WIF_VERSION: u8 = 0x80;
pub const WIF_COMPRESSED_FLAG: u8 = 0x01;
pub const SCRIPT_HASH_LEN: usize = 20;

const PUSHBYTES33: u8 = 0x21;
const CHECKSIG: u8 = 0xac;
const WIF_PAYLOAD_LEN: usize = 1 + PRIVATE_KEY_LEN + 1;

fn ensure_compressed(public_key: &[u8]) -> Result<()> {
    let prefix_ok = matches!(public_key.first(), Some(0x02) | Some(0x03));
    if public_key.len() != COMPRESSED_PUBLIC_KEY_LEN || !prefix_ok {
        return Err(WalletError::InvalidKey(format!(
            "expected a {COMPRESSED_PUBLIC_KEY_LEN}-byte compressed public key, got {} bytes",
            public_key.len()
        )));
    }
    parse_public_key(public_key).map(|_| ())
}

/// Single-signature verification script: PUSHBYTES33 <public key> CHECKSIG
pub fn verification_script(public_key: &[u8]) -> Result<Vec<u8>> {
    ensure_compressed(public_key)?;
    let mut script = Vec::with_capacity(COMPRESSED_PUBLIC_KEY_LEN + 2);
    script.push(PUSHBYTES33);
    script.extend_from_slice(public_key);
    script.push(CHECKSIG);
    Ok(script)
}

/// RIPEMD160(SHA256(verification script)), the payload an address encodes
pub fn script_hash(public_key: &[u8]) -> Result<Vec<u8>> {
    Ok(hash160(&verification_script(public_key)?))
}

pub fn derive_address(public_key: &[u8]) -> Result<String> {
    Ok(script_hash_to_address(&script_hash(public_key)?))
}

pub fn script_hash_to_address(script_hash: &[u8]) -> String {
    let mut payload = Vec::with_capacity(1 + script_hash.len());
    payload.push(ADDRESS_VERSION);
    payload.extend_from_slice(script_hash);
    base58check_encode(&payload)
}

pub fn validate_address(address: &str) -> bool {
    match base58check_decode(address) {
        Ok(payload) => payload.len() == 1 + SCRIPT_HASH_LEN && payload[0] == ADDRESS_VERSION,
        Err(_) => false,
    }
}

/// Script hash carried by a valid address
pub fn address_to_script_hash(address: &str) -> Result<Vec<u8>> {
    if !validate_address(address) {
        return Err(WalletError::InvalidAddress(address.to_string()));
    }
    let payload = base58check_decode(address)?;
    Ok(payload[1..].to_vec())
}

pub fn encode_wif(private_key: &[u8]) -> Result<String> {
    if private_key.len() != PRIVATE_KEY_LEN {
        return Err(WalletError::InvalidKey(format!(
            "private key must be {PRIVATE_KEY_LEN} bytes, got {}",
            private_key.len()
        )));
    }
    let mut payload = Zeroizing::new(Vec::with_capacity(WIF_PAYLOAD_LEN));
    payload.push(WIF_VERSION);
    payload.extend_from_slice(private_key);
    payload.push(WIF_COMPRESSED_FLAG);
    Ok(base58check_encode(&payload))
}

pub fn decode_wif(wif: &str) -> Result<Vec<u8>> {
    let payload = Zeroizing::new(
        base58check_decode(wif.trim()).map_err(|e| WalletError::InvalidWif(e.to_string()))?,
    );
    if payload.len() != WIF_PAYLOAD_LEN {
        return Err(WalletError::InvalidWif(format!(
            "decoded payload is {} bytes, expected {WIF_PAYLOAD_LEN}",
            payload.len()
        )));
    }
    if payload[0] != WIF_VERSION {
        return Err(WalletError::InvalidWif(format!(
            "version byte 0x{:02x}, expected 0x{WIF_VERSION:02x}",
            payload[0]
        )));
    }
    if payload[WIF_PAYLOAD_LEN - 1] != WIF_COMPRESSED_FLAG {
        return Err(WalletError::InvalidWif(
            "missing compressed public key flag".to_string(),
        ));
    }
    Ok(payload[1..=PRIVATE_KEY_LEN].to_vec())
}
