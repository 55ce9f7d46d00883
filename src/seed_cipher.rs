//! Password encryption of wallet seeds for local storage.
//!
//! Wrong passwords and damaged ciphertexts are indistinguishable to the
//! caller: both make `decrypt_wallet_seed` return `None`.

use aes::cipher::block_padding::Pkcs7;
use aes::cipher::{BlockDecryptMut, BlockEncryptMut, KeyIvInit};
use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::error::{WalletError, Result};
use crate::hash::sha256;
use crate::signature::SecureRandomSource;
use crate::utils::{base58_decode, base58_encode, derive_key_material};

type Aes256CbcEnc = cbc::Encryptor<aes::Aes256>;
type Aes256CbcDec = cbc::Decryptor<aes::Aes256>;

/// Iterations of `hex(sha256(·))` applied to the password
pub const KEY_STRETCH_ROUNDS: usize = 1000;
const SALT_LENGTH: usize = 8;
const KEY_LENGTH: usize = 32;
const IV_LENGTH: usize = 16;
const KDF_INFO: &[u8] = b"wallet-seed-cipher";

/// What the storage layer keeps for one seed
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct EncryptedSeed {
    pub cipher: String,
    pub checksum: String,
}

/// `hex(sha256(seed))`, stored next to the cipher
pub fn seed_checksum(seed: &[u8]) -> String {
    hex::encode(sha256(seed))
}

fn stretch_password(password: &str) -> Vec<u8> {
    let mut state = password.as_bytes().to_vec();
    for _ in 0..KEY_STRETCH_ROUNDS {
        state = hex::encode(sha256(&state)).into_bytes();
    }
    state
}

fn key_and_iv(password: &str, salt: &[u8]) -> Result<(Vec<u8>, Vec<u8>)> {
    let mut material = derive_key_material(
        &stretch_password(password),
        salt,
        KDF_INFO,
        KEY_LENGTH + IV_LENGTH,
    )?;
    let iv = material.split_off(KEY_LENGTH);
    Ok((material, iv))
}

pub fn encrypt_wallet_seed(
    seed: &[u8],
    password: &str,
    random: &dyn SecureRandomSource,
) -> Result<EncryptedSeed> {
    if password.is_empty() {
        return Err(WalletError::Argument("password must not be empty".to_string()));
    }

    let mut salt = [0u8; SALT_LENGTH];
    random.fill_bytes(&mut salt)?;
    let (key, iv) = key_and_iv(password, &salt)?;

    let encryptor = Aes256CbcEnc::new_from_slices(&key, &iv)
        .map_err(|e| WalletError::Crypto(format!("cipher init failed: {}", e)))?;
    let ciphertext = encryptor.encrypt_padded_vec_mut::<Pkcs7>(seed);

    let mut payload = Vec::with_capacity(SALT_LENGTH + ciphertext.len());
    payload.extend_from_slice(&salt);
    payload.extend_from_slice(&ciphertext);

    Ok(EncryptedSeed {
        cipher: base58_encode(&payload),
        checksum: seed_checksum(seed),
    })
}

/// Returns the seed, or `None` on a wrong password, corrupt cipher or checksum mismatch.
pub fn decrypt_wallet_seed(cipher: &str, password: &str, checksum: &str) -> Option<Vec<u8>> {
    match try_decrypt(cipher, password) {
        Some(seed) if seed_checksum(&seed).eq_ignore_ascii_case(checksum) => Some(seed),
        Some(_) => {
            debug!("Seed decryption failed: checksum mismatch");
            None
        }
        None => {
            debug!("Seed decryption failed: malformed cipher or padding");
            None
        }
    }
}

fn try_decrypt(cipher: &str, password: &str) -> Option<Vec<u8>> {
    let payload = base58_decode(cipher).ok()?;
    if payload.len() <= SALT_LENGTH {
        return None;
    }
    let (salt, ciphertext) = payload.split_at(SALT_LENGTH);
    let (key, iv) = key_and_iv(password, salt).ok()?;
    Aes256CbcDec::new_from_slices(&key, &iv)
        .ok()?
        .decrypt_padded_vec_mut::<Pkcs7>(ciphertext)
        .ok()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::signature::{FixedRandomSource, OsRandomSource};

    const SEED: &[u8] = b"forest lunar shine twelve words of a stored wallet seed";

    #[test]
    fn test_round_trip() {
        let encrypted = encrypt_wallet_seed(SEED, "pw1", &OsRandomSource).unwrap();
        assert_eq!(encrypted.checksum, seed_checksum(SEED));
        let seed = decrypt_wallet_seed(&encrypted.cipher, "pw1", &encrypted.checksum).unwrap();
        assert_eq!(seed, SEED);
    }

    #[test]
    fn test_wrong_password_returns_none() {
        let encrypted = encrypt_wallet_seed(SEED, "pw1", &OsRandomSource).unwrap();
        assert!(decrypt_wallet_seed(&encrypted.cipher, "pw2", &encrypted.checksum).is_none());
    }

    #[test]
    fn test_corrupt_input_returns_none() {
        let encrypted = encrypt_wallet_seed(SEED, "pw1", &OsRandomSource).unwrap();
        assert!(decrypt_wallet_seed("not base58 0OIl", "pw1", &encrypted.checksum).is_none());
        assert!(decrypt_wallet_seed("3mJr7", "pw1", &encrypted.checksum).is_none());
        assert!(decrypt_wallet_seed(&encrypted.cipher, "pw1", &seed_checksum(b"other")).is_none());
    }

    #[test]
    fn test_salt_comes_from_random_source() {
        let source = FixedRandomSource::new(vec![1, 2, 3]);
        let a = encrypt_wallet_seed(SEED, "pw", &source).unwrap();
        let b = encrypt_wallet_seed(SEED, "pw", &source).unwrap();
        assert_eq!(a, b);
        let c = encrypt_wallet_seed(SEED, "pw", &OsRandomSource).unwrap();
        assert_ne!(a.cipher, c.cipher);
    }

    #[test]
    fn test_empty_password_rejected() {
        assert!(matches!(
            encrypt_wallet_seed(SEED, "", &OsRandomSource),
            Err(WalletError::Argument(_))
        ));
    }

    #[test]
    fn test_stretch_is_hex_text() {
        let stretched = stretch_password("pw");
        assert_eq!(stretched.len(), 64);
        assert!(stretched.iter().all(|b| b.is_ascii_hexdigit()));
    }
}
