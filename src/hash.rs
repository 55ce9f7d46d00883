//! Hash primitives used by identity derivation and transaction ids.
//!
//! The ledger chains two unrelated 256-bit hashes: Blake2b-256 first, then
//! Keccak-256 (the original Keccak padding, not NIST SHA3-256). Both stages are
//! required; either one alone yields incompatible keys and addresses.

use blake2::digest::consts::U32;
use blake2::Blake2b;
use sha2::{Digest, Sha256};
use sha3::Keccak256;

type Blake2b256 = Blake2b<U32>;

pub fn blake2b256(data: &[u8]) -> [u8; 32] {
    Blake2b256::digest(data).into()
}

pub fn keccak256(data: &[u8]) -> [u8; 32] {
    Keccak256::digest(data).into()
}

pub fn sha256(data: &[u8]) -> [u8; 32] {
    Sha256::digest(data).into()
}

/// `keccak256(blake2b256(data))`
pub fn hash_chain(data: &[u8]) -> [u8; 32] {
    keccak256(&blake2b256(data))
}
