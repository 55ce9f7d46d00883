//! Curve25519 signatures.
//!
//! Keys are X25519 (Montgomery) keys; signing converts the private scalar to
//! its Edwards form and produces an Ed25519-style signature. The Edwards
//! public key's sign bit is stored in the top bit of the signature, which is
//! always clear in a canonical `S`, so a verifier holding only the Montgomery
//! public key can restore the Edwards point.

use curve25519_dalek::edwards::EdwardsPoint;
use curve25519_dalek::montgomery::MontgomeryPoint;
use curve25519_dalek::scalar::Scalar;
use ed25519_dalek::{Signature, Verifier, VerifyingKey};
use rand::rngs::OsRng;
use rand::RngCore;
use sha2::{Digest, Sha512};
use tracing::warn;

use crate::error::{WalletError, Result};

pub const SIGNATURE_LENGTH: usize = 64;
/// Auxiliary randomness mixed into the nonce of a non-deterministic signature
pub const SIGNING_ENTROPY_LENGTH: usize = 64;

/// Source of cryptographically secure random bytes.
///
/// A failing source is not fatal for signing: `sign` falls back to the
/// deterministic nonce.
pub trait SecureRandomSource: Send + Sync {
    fn fill_bytes(&self, dest: &mut [u8]) -> Result<()>;
}

/// Operating-system CSPRNG
#[derive(Debug, Default, Clone, Copy)]
pub struct OsRandomSource;

impl SecureRandomSource for OsRandomSource {
    fn fill_bytes(&self, dest: &mut [u8]) -> Result<()> {
        OsRng
            .try_fill_bytes(dest)
            .map_err(|e| WalletError::SigningUnavailable(e.to_string()))
    }
}

/// Repeats a fixed byte pattern. For golden-file tests only.
#[derive(Debug, Clone)]
pub struct FixedRandomSource {
    pattern: Vec<u8>,
}

impl FixedRandomSource {
    pub fn new(pattern: impl Into<Vec<u8>>) -> Self {
        Self {
            pattern: pattern.into(),
        }
    }
}

impl SecureRandomSource for FixedRandomSource {
    fn fill_bytes(&self, dest: &mut [u8]) -> Result<()> {
        if self.pattern.is_empty() {
            return Err(WalletError::SigningUnavailable("empty random pattern".to_string()));
        }
        for (i, byte) in dest.iter_mut().enumerate() {
            *byte = self.pattern[i % self.pattern.len()];
        }
        Ok(())
    }
}

/// A source that is never available
#[derive(Debug, Default, Clone, Copy)]
pub struct UnavailableRandomSource;

impl SecureRandomSource for UnavailableRandomSource {
    fn fill_bytes(&self, _dest: &mut [u8]) -> Result<()> {
        Err(WalletError::SigningUnavailable(
            "no secure random source configured".to_string(),
        ))
    }
}

/// Standard X25519 scalar clamping
pub(crate) fn clamp(mut bytes: [u8; 32]) -> [u8; 32] {
    bytes[0] &= 248;
    bytes[31] &= 127;
    bytes[31] |= 64;
    bytes
}

struct ExpandedKey {
    clamped: [u8; 32],
    scalar: Scalar,
    ed_public: [u8; 32],
}

fn expand(private_key: &[u8; 32]) -> ExpandedKey {
    let clamped = clamp(*private_key);
    let scalar = Scalar::from_bytes_mod_order(clamped);
    let ed_public = EdwardsPoint::mul_base(&scalar).compress().to_bytes();
    ExpandedKey {
        clamped,
        scalar,
        ed_public,
    }
}

/// X25519 public key of a private key
pub fn public_key_from_private(private_key: &[u8; 32]) -> [u8; 32] {
    let scalar = Scalar::from_bytes_mod_order(clamp(*private_key));
    EdwardsPoint::mul_base(&scalar).to_montgomery().to_bytes()
}

fn wide_scalar(hasher: Sha512) -> Scalar {
    let mut wide = [0u8; 64];
    wide.copy_from_slice(&hasher.finalize());
    Scalar::from_bytes_mod_order_wide(&wide)
}

fn finish(key: &ExpandedKey, r: Scalar, message: &[u8]) -> [u8; SIGNATURE_LENGTH] {
    let big_r = EdwardsPoint::mul_base(&r).compress();
    let h = wide_scalar(
        Sha512::new()
            .chain_update(big_r.as_bytes())
            .chain_update(key.ed_public)
            .chain_update(message),
    );
    let s = r + h * key.scalar;

    let mut signature = [0u8; SIGNATURE_LENGTH];
    signature[..32].copy_from_slice(big_r.as_bytes());
    signature[32..].copy_from_slice(s.as_bytes());
    signature[63] |= key.ed_public[31] & 0x80;
    signature
}

/// Nonce = SHA-512(key ‖ message). Same inputs, same signature.
pub fn sign_deterministic(private_key: &[u8; 32], message: &[u8]) -> [u8; SIGNATURE_LENGTH] {
    let key = expand(private_key);
    let r = wide_scalar(Sha512::new().chain_update(key.clamped).chain_update(message));
    finish(&key, r, message)
}

/// Nonce = SHA-512(0xfe ‖ 0xff×31 ‖ key ‖ message ‖ entropy).
pub fn sign_with_entropy(
    private_key: &[u8; 32],
    message: &[u8],
    entropy: &[u8; SIGNING_ENTROPY_LENGTH],
) -> [u8; SIGNATURE_LENGTH] {
    let key = expand(private_key);
    let mut separator = [0xffu8; 32];
    separator[0] = 0xfe;
    let r = wide_scalar(
        Sha512::new()
            .chain_update(separator)
            .chain_update(key.clamped)
            .chain_update(message)
            .chain_update(entropy),
    );
    finish(&key, r, message)
}

/// Signs with fresh entropy, or deterministically if the source is unavailable.
pub fn sign(
    private_key: &[u8; 32],
    message: &[u8],
    random: &dyn SecureRandomSource,
) -> [u8; SIGNATURE_LENGTH] {
    let mut entropy = [0u8; SIGNING_ENTROPY_LENGTH];
    match random.fill_bytes(&mut entropy) {
        Ok(()) => sign_with_entropy(private_key, message, &entropy),
        Err(e) => {
            warn!(error = %e, "Falling back to deterministic signing");
            sign_deterministic(private_key, message)
        }
    }
}

/// Verifies a signature against an X25519 public key.
pub fn verify(public_key: &[u8; 32], message: &[u8], signature: &[u8; SIGNATURE_LENGTH]) -> bool {
    let sign_bit = (signature[63] & 0x80) >> 7;
    let Some(ed_point) = MontgomeryPoint(*public_key).to_edwards(sign_bit) else {
        return false;
    };
    let Ok(verifying_key) = VerifyingKey::from_bytes(&ed_point.compress().to_bytes()) else {
        return false;
    };

    let mut ed_signature = *signature;
    ed_signature[63] &= 0x7f;
    verifying_key
        .verify(message, &Signature::from_bytes(&ed_signature))
        .is_ok()
}

#[cfg(test)]
mod tests {
    use super::*;

    const PRIVATE: [u8; 32] = [7u8; 32];

    #[test]
    fn test_public_key_is_x25519() {
        // RFC 7748 §6.1 Alice
        let private: [u8; 32] =
            hex::decode("77076d0a7318a57d3c16c17251b26645df4c2f87ebc0992ab177fba51db92c2a")
                .unwrap()
                .try_into()
                .unwrap();
        assert_eq!(
            hex::encode(public_key_from_private(&private)),
            "8520f0098930a754748b7ddcb43ef75a0dbf3a0d26381af4eba4a98eaa9b4e6a"
        );
    }

    #[test]
    fn test_sign_and_verify() {
        let public = public_key_from_private(&PRIVATE);
        let message = b"transfer bytes";

        let deterministic = sign_deterministic(&PRIVATE, message);
        assert!(verify(&public, message, &deterministic));
        assert_eq!(deterministic, sign_deterministic(&PRIVATE, message));

        let randomized = sign(&PRIVATE, message, &OsRandomSource);
        assert!(verify(&public, message, &randomized));
        assert_ne!(randomized, deterministic);
    }

    #[test]
    fn test_verify_rejects_tampering() {
        let public = public_key_from_private(&PRIVATE);
        let signature = sign_deterministic(&PRIVATE, b"message");
        assert!(!verify(&public, b"massage", &signature));

        let mut flipped = signature;
        flipped[10] ^= 1;
        assert!(!verify(&public, b"message", &flipped));

        let other = public_key_from_private(&[9u8; 32]);
        assert!(!verify(&other, b"message", &signature));
    }

    #[test]
    fn test_fixed_entropy_is_reproducible() {
        let source = FixedRandomSource::new(vec![0xab, 0xcd]);
        let a = sign(&PRIVATE, b"m", &source);
        let b = sign(&PRIVATE, b"m", &source);
        assert_eq!(a, b);
        let entropy: [u8; 64] = [0xabu8, 0xcd].repeat(32).try_into().unwrap();
        assert_eq!(a, sign_with_entropy(&PRIVATE, b"m", &entropy));
    }

    #[test]
    fn test_unavailable_source_degrades_to_deterministic() {
        let signature = sign(&PRIVATE, b"m", &UnavailableRandomSource);
        assert_eq!(signature, sign_deterministic(&PRIVATE, b"m"));
        assert!(FixedRandomSource::new(Vec::new()).fill_bytes(&mut [0u8; 4]).is_err());
    }

    #[test]
    fn test_clamp() {
        let clamped = clamp([0xff; 32]);
        assert_eq!(clamped[0], 0xf8);
        assert_eq!(clamped[31], 0x7f);
        assert_eq!(clamp([0u8; 32])[31], 0x40);
    }
}
