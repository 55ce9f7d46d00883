pub mod config;
pub mod core;
pub mod error;
pub mod hash;
pub mod key_generator;
pub mod mnemonic;
pub mod seed_cipher;
pub mod signature;
pub mod signer;
pub mod utils;

pub use config::{Network, NetworkConfig};
pub use error::{Result, WalletError};
pub use hash::{blake2b256, hash_chain, keccak256, sha256};
pub use key_generator::{
    build_key_pair, build_raw_address, build_seed_hash, Identity, KeyGenerator, KeyPair,
    ADDRESS_LENGTH,
};
pub use mnemonic::{generate_seed_phrase, is_standard_seed_phrase, DEFAULT_SEED_WORDS};
pub use seed_cipher::{decrypt_wallet_seed, encrypt_wallet_seed, seed_checksum, EncryptedSeed};
pub use signature::{
    public_key_from_private, sign, sign_deterministic, sign_with_entropy, verify,
    FixedRandomSource, OsRandomSource, SecureRandomSource, UnavailableRandomSource,
};
pub use signer::{
    build_signature, transaction_id, SignedCancelOrder, SignedOrder, SignedTransaction,
    TransactionSigner,
};
pub use utils::{base58_decode, base58_encode, MAX_SAFE_INTEGER};

// Core API exports
pub use crate::core::asset::{Currency, CurrencyDescriptor, CurrencyRegistry, MAX_PRECISION};
pub use crate::core::decimal::{Amount, RoundingMode};
pub use crate::core::encoder::{ByteWriter, Recipient};
pub use crate::core::money::Money;
pub use crate::core::order::{CancelOrder, Order, OrderRequest, OrderType};
pub use crate::core::order_price::{AssetPair, OrderPrice, MATCHER_PRICE_CONSTANT};
pub use crate::core::transaction::{
    BurnRequest, CancelLeaseRequest, CreateAliasRequest, IssueRequest, LeaseRequest,
    MassTransferItem, MassTransferRequest, PaymentRequest, ReissueRequest, Transaction,
    TransactionKind, TransactionRequest, TransferRequest,
};
pub use crate::core::{Clock, FixedClock, SystemClock, WalletCore};
