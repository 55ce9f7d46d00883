use std::fmt;

use serde::Serialize;

use crate::config::{
    NetworkConfig, DEFAULT_ADDRESS_VERSION, DEFAULT_INITIAL_NONCE, MAINNET_CODE,
};
use crate::error::{WalletError, Result};
use crate::hash::{hash_chain, sha256};
use crate::signature::{clamp, public_key_from_private};
use crate::utils::{base58_decode, base58_decode_fixed, base58_encode, int32_be};

pub const PUBLIC_KEY_LENGTH: usize = 32;
pub const PRIVATE_KEY_LENGTH: usize = 32;
/// version + network + key hash + checksum
pub const ADDRESS_LENGTH: usize = 26;
const KEY_HASH_LENGTH: usize = 20;
const CHECKSUM_LENGTH: usize = 4;
const PREFIX_LENGTH: usize = 2;

/// Base58-encoded Curve25519 key pair
#[derive(Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct KeyPair {
    pub public_key: String,
    #[serde(skip_serializing)]
    pub private_key: String,
}

impl KeyPair {
    pub fn new(public_key: impl Into<String>, private_key: impl Into<String>) -> Self {
        Self {
            public_key: public_key.into(),
            private_key: private_key.into(),
        }
    }

    pub fn public_key_bytes(&self) -> Result<[u8; PUBLIC_KEY_LENGTH]> {
        base58_decode_fixed(&self.public_key, "public key")
    }

    pub fn private_key_bytes(&self) -> Result<[u8; PRIVATE_KEY_LENGTH]> {
        base58_decode_fixed(&self.private_key, "private key")
    }

    /// Checks that both keys are present, well formed and belong together.
    pub fn validate(&self) -> Result<([u8; PUBLIC_KEY_LENGTH], [u8; PRIVATE_KEY_LENGTH])> {
        if self.public_key.is_empty() || self.private_key.is_empty() {
            return Err(WalletError::validation(
                "sender must carry both a public and a private key",
            ));
        }
        let public = self
            .public_key_bytes()
            .map_err(|e| WalletError::validation(format!("invalid sender key: {}", e)))?;
        let private = self
            .private_key_bytes()
            .map_err(|e| WalletError::validation(format!("invalid sender key: {}", e)))?;
        if public_key_from_private(&private) != public {
            return Err(WalletError::validation(
                "sender public key does not match the private key",
            ));
        }
        Ok((public, private))
    }
}

impl fmt::Debug for KeyPair {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("KeyPair")
            .field("public_key", &self.public_key)
            .field("private_key", &"<redacted>")
            .finish()
    }
}

/// Key pair plus the address derived from it
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Identity {
    #[serde(flatten)]
    pub key_pair: KeyPair,
    pub address: String,
}

/// `sha256(hash_chain(nonce_be32 ‖ seed))`
pub fn build_seed_hash(seed: &[u8], nonce: u32) -> [u8; 32] {
    let mut input = Vec::with_capacity(4 + seed.len());
    input.extend_from_slice(&int32_be(nonce));
    input.extend_from_slice(seed);
    sha256(&hash_chain(&input))
}

/// Raw `(public, private)` keys; the private key is the clamped seed hash.
fn derive_keys(seed: &[u8], nonce: u32) -> ([u8; PUBLIC_KEY_LENGTH], [u8; PRIVATE_KEY_LENGTH]) {
    let private = clamp(build_seed_hash(seed, nonce));
    (public_key_from_private(&private), private)
}

/// Deterministic base58 key pair for a seed
pub fn build_key_pair(seed: &[u8], nonce: u32) -> KeyPair {
    let (public, private) = derive_keys(seed, nonce);
    KeyPair::new(base58_encode(&public), base58_encode(&private))
}

/// `version ‖ network ‖ key_hash ‖ checksum` with
/// `key_hash = hash_chain(public_key)[..20]` and
/// `checksum = hash_chain(version ‖ network ‖ key_hash)[..4]`.
pub fn build_raw_address(public_key: &[u8; 32], version: u8, network: u8) -> [u8; ADDRESS_LENGTH] {
    let mut raw = [0u8; ADDRESS_LENGTH];
    raw[0] = version;
    raw[1] = network;
    raw[PREFIX_LENGTH..PREFIX_LENGTH + KEY_HASH_LENGTH]
        .copy_from_slice(&hash_chain(public_key)[..KEY_HASH_LENGTH]);
    let body = PREFIX_LENGTH + KEY_HASH_LENGTH;
    // The checksum covers the partial address, not the key.
    let checksum = hash_chain(&raw[..body]);
    raw[body..].copy_from_slice(&checksum[..CHECKSUM_LENGTH]);
    raw
}

/// Derives keys and addresses for one network
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct KeyGenerator {
    nonce: u32,
    address_version: u8,
    network_code: u8,
}

impl KeyGenerator {
    /// Fails if the configuration does not validate.
    pub fn new(config: &NetworkConfig) -> Result<Self> {
        config.validate()?;
        Ok(KeyGenerator {
            nonce: config.initial_nonce,
            address_version: config.address_version,
            network_code: config.network_byte()?,
        })
    }

    pub fn network_code(&self) -> u8 {
        self.network_code
    }

    pub fn address_version(&self) -> u8 {
        self.address_version
    }

    pub fn key_pair(&self, seed: &[u8]) -> KeyPair {
        build_key_pair(seed, self.nonce)
    }

    pub fn identity(&self, seed: &[u8]) -> Identity {
        let (public, private) = derive_keys(seed, self.nonce);
        Identity {
            key_pair: KeyPair::new(base58_encode(&public), base58_encode(&private)),
            address: base58_encode(&self.raw_address(&public)),
        }
    }

    pub fn raw_address(&self, public_key: &[u8; 32]) -> [u8; ADDRESS_LENGTH] {
        build_raw_address(public_key, self.address_version, self.network_code)
    }

    /// Base58 address of a base58 public key
    pub fn address(&self, public_key: &str) -> Result<String> {
        let public: [u8; PUBLIC_KEY_LENGTH] = base58_decode_fixed(public_key, "public key")?;
        Ok(base58_encode(&self.raw_address(&public)))
    }

    /// Decodes and fully checks an address for this network.
    pub fn decode_address(&self, address: &str) -> Result<[u8; ADDRESS_LENGTH]> {
        let bytes = base58_decode(address)
            .map_err(|_| WalletError::validation(format!("'{}' is not base58", address)))?;
        let raw: [u8; ADDRESS_LENGTH] = bytes.try_into().map_err(|v: Vec<u8>| {
            WalletError::validation(format!(
                "address must be {} bytes, got {}",
                ADDRESS_LENGTH,
                v.len()
            ))
        })?;
        if raw[0] != self.address_version {
            return Err(WalletError::validation(format!(
                "unsupported address version {}",
                raw[0]
            )));
        }
        if raw[1] != self.network_code {
            return Err(WalletError::validation(format!(
                "address belongs to network '{}', expected '{}'",
                raw[1] as char, self.network_code as char
            )));
        }
        let body = PREFIX_LENGTH + KEY_HASH_LENGTH;
        if hash_chain(&raw[..body])[..CHECKSUM_LENGTH] != raw[body..] {
            return Err(WalletError::validation("address checksum mismatch"));
        }
        Ok(raw)
    }

    pub fn is_valid_address(&self, address: &str) -> bool {
        self.decode_address(address).is_ok()
    }
}

/// Mainnet parameters
impl Default for KeyGenerator {
    fn default() -> Self {
        KeyGenerator {
            nonce: DEFAULT_INITIAL_NONCE,
            address_version: DEFAULT_ADDRESS_VERSION,
            network_code: MAINNET_CODE,
        }
    }
}
