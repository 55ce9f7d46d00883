use sha2::Sha256;
use hkdf::Hkdf;
use crate::error::{WalletError, Result};

/// Largest integer a double-precision float represents exactly (2^53 - 1).
/// Every 8-byte field on the wire is bounded by it.
pub const MAX_SAFE_INTEGER: i64 = 9_007_199_254_740_991;

/// Encodes raw bytes as base58 (Bitcoin alphabet)
pub fn base58_encode(bytes: &[u8]) -> String {
    bs58::encode(bytes).into_string()
}

/// Decodes a base58 string of any length
pub fn base58_decode(text: &str) -> Result<Vec<u8>> {
    Ok(bs58::decode(text).into_vec()?)
}

/// Decodes a base58 string that must yield exactly `N` bytes
pub fn base58_decode_fixed<const N: usize>(text: &str, what: &str) -> Result<[u8; N]> {
    let bytes = base58_decode(text)
        .map_err(|e| WalletError::Encoding(format!("{} is not valid base58: {}", what, e)))?;
    bytes.try_into().map_err(|v: Vec<u8>| {
        WalletError::Encoding(format!("{} must be {} bytes, got {}", what, N, v.len()))
    })
}

/// 4-byte big-endian encoding of an unsigned 32-bit integer
pub fn int32_be(value: u32) -> [u8; 4] {
    value.to_be_bytes()
}

/// Ensures a long field stays inside the exactly-representable range
pub fn ensure_safe_long(value: i64, field: &str) -> Result<i64> {
    if value.unsigned_abs() > MAX_SAFE_INTEGER as u64 {
        return Err(WalletError::validation(format!(
            "{} exceeds the maximum safe integer ({})",
            field, MAX_SAFE_INTEGER
        )));
    }
    Ok(value)
}

/// Derives `len` bytes of key material from `ikm` using HKDF-SHA256
pub fn derive_key_material(ikm: &[u8], salt: &[u8], info: &[u8], len: usize) -> Result<Vec<u8>> {
    if ikm.is_empty() {
        return Err(WalletError::validation("key material input must be non-empty"));
    }

    let hk = Hkdf::<Sha256>::new(Some(salt), ikm);
    let mut okm = vec![0u8; len];
    hk.expand(info, &mut okm)
        .map_err(|e| WalletError::Crypto(format!("HKDF expansion failed: {}", e)))?;

    Ok(okm)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_base58_round_trip() {
        let bytes = [0u8, 0, 1, 2, 3, 255];
        let text = base58_encode(&bytes);
        assert!(text.starts_with("11"));
        assert_eq!(base58_decode(&text).unwrap(), bytes.to_vec());
    }

    #[test]
    fn test_base58_decode_fixed_length() {
        let text = base58_encode(&[7u8; 32]);
        let decoded: [u8; 32] = base58_decode_fixed(&text, "key").unwrap();
        assert_eq!(decoded, [7u8; 32]);
        assert!(matches!(
            base58_decode_fixed::<26>(&text, "address"),
            Err(WalletError::Encoding(_))
        ));
        assert!(base58_decode_fixed::<32>("0OIl", "key").is_err());
    }

    #[test]
    fn test_int32_be() {
        assert_eq!(int32_be(0), [0, 0, 0, 0]);
        assert_eq!(int32_be(0x01020304), [1, 2, 3, 4]);
    }

    #[test]
    fn test_ensure_safe_long() {
        assert_eq!(ensure_safe_long(MAX_SAFE_INTEGER, "amount").unwrap(), MAX_SAFE_INTEGER);
        assert!(ensure_safe_long(MAX_SAFE_INTEGER + 1, "amount").is_err());
        assert!(ensure_safe_long(i64::MIN, "amount").is_err());
    }

    #[test]
    fn test_derive_key_material() {
        let a = derive_key_material(b"password", b"salt", b"info", 48).unwrap();
        let b = derive_key_material(b"password", b"salt", b"info", 48).unwrap();
        let c = derive_key_material(b"password", b"other", b"info", 48).unwrap();
        assert_eq!(a.len(), 48);
        assert_eq!(a, b);
        assert_ne!(a, c);
        assert!(derive_key_material(b"", b"salt", b"info", 32).is_err());
    }
}
