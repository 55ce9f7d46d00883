use bip39::{Language, Mnemonic};

use crate::error::{WalletError, Result};
use crate::signature::SecureRandomSource;

/// Default length of a newly generated seed phrase
pub const DEFAULT_SEED_WORDS: usize = 15;

const ALLOWED_WORD_COUNTS: [usize; 5] = [12, 15, 18, 21, 24];

/// Generates an English BIP39 phrase of `word_count` words.
///
/// The phrase text itself is the wallet seed; it is never stretched with PBKDF2.
pub fn generate_seed_phrase(word_count: usize, random: &dyn SecureRandomSource) -> Result<String> {
    if !ALLOWED_WORD_COUNTS.contains(&word_count) {
        return Err(WalletError::Argument(format!(
            "seed phrase must have 12, 15, 18, 21 or 24 words, got {}",
            word_count
        )));
    }

    // 11 bits per word, of which 1/33 is checksum
    let mut entropy = vec![0u8; word_count * 4 / 3];
    random.fill_bytes(&mut entropy)?;

    let mnemonic = Mnemonic::from_entropy_in(Language::English, &entropy)?;
    Ok(mnemonic.to_string())
}

/// True for a well-formed English BIP39 phrase with a valid checksum
pub fn is_standard_seed_phrase(phrase: &str) -> bool {
    Mnemonic::parse_in_normalized(Language::English, phrase).is_ok()
}
