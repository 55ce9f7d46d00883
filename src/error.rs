use thiserror::Error;

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum WalletError {
    #[error("Parse error: {0}")]
    Parse(String),

    #[error("Validation error: {0}")]
    Validation(String),

    #[error("Argument error: {0}")]
    Argument(String),

    #[error("Currency mismatch: {left} vs {right}")]
    CurrencyMismatch { left: String, right: String },

    #[error("Secure random source unavailable: {0}")]
    SigningUnavailable(String),

    #[error("Cryptographic error: {0}")]
    Crypto(String),

    #[error("Encoding error: {0}")]
    Encoding(String),

    #[error("Configuration error: {0}")]
    Config(String),
}

pub type Result<T> = std::result::Result<T, WalletError>;

impl WalletError {
    pub(crate) fn validation(msg: impl Into<String>) -> Self {
        WalletError::Validation(msg.into())
    }
}

impl From<bs58::decode::Error> for WalletError {
    fn from(err: bs58::decode::Error) -> Self {
        WalletError::Encoding(err.to_string())
    }
}

impl From<bip39::Error> for WalletError {
    fn from(err: bip39::Error) -> Self {
        WalletError::Validation(err.to_string())
    }
}

impl From<serde_json::Error> for WalletError {
    fn from(err: serde_json::Error) -> Self {
        WalletError::Config(err.to_string())
    }
}

impl From<std::io::Error> for WalletError {
    fn from(err: std::io::Error) -> Self {
        WalletError::Config(err.to_string())
    }
}
