// Wallet core: value types, encoding and the composition root.
//
// WalletCore owns everything that depends on the active network: the
// configuration, the currency registry and the key generator. Switching
// networks replaces all three at once.
//
// Time and randomness are injected, so the same inputs with a FixedClock and
// a FixedRandomSource always yield the same signed payloads.

pub mod asset;
pub mod decimal;
pub mod encoder;
pub mod money;
pub mod order;
pub mod order_price;
pub mod transaction;

use std::fmt;
use std::sync::Arc;

use chrono::Utc;
use tracing::info;

use crate::config::NetworkConfig;
use crate::core::asset::{Currency, CurrencyRegistry};
use crate::core::money::Money;
use crate::core::order::{CancelOrder, OrderRequest};
use crate::core::order_price::AssetPair;
use crate::core::transaction::{
    BuildContext, BurnRequest, CancelLeaseRequest, CreateAliasRequest, IssueRequest,
    LeaseRequest, MassTransferRequest, PaymentRequest, ReissueRequest, TransactionRequest,
    TransferRequest,
};
use crate::error::{WalletError, Result};
use crate::key_generator::{Identity, KeyGenerator, KeyPair};
use crate::mnemonic::generate_seed_phrase;
use crate::seed_cipher::{decrypt_wallet_seed, encrypt_wallet_seed, EncryptedSeed};
use crate::signature::{OsRandomSource, SecureRandomSource};
use crate::signer::{SignedCancelOrder, SignedOrder, SignedTransaction, TransactionSigner};

/// Source of "now" for default timestamps, in milliseconds since the epoch
pub trait Clock: Send + Sync {
    fn now_millis(&self) -> i64;
}

#[derive(Debug, Default, Clone, Copy)]
pub struct SystemClock;

impl Clock for SystemClock {
    fn now_millis(&self) -> i64 {
        Utc::now().timestamp_millis()
    }
}

/// Always returns the same instant
#[derive(Debug, Clone, Copy)]
pub struct FixedClock(pub i64);

impl Clock for FixedClock {
    fn now_millis(&self) -> i64 {
        self.0
    }
}

pub struct WalletCore {
    config: NetworkConfig,
    registry: CurrencyRegistry,
    keys: KeyGenerator,
    clock: Arc<dyn Clock>,
    random: Arc<dyn SecureRandomSource>,
}

impl WalletCore {
    /// System clock and OS randomness
    pub fn new(config: NetworkConfig) -> Result<Self> {
        Self::with_components(config, Arc::new(SystemClock), Arc::new(OsRandomSource))
    }

    pub fn with_components(
        config: NetworkConfig,
        clock: Arc<dyn Clock>,
        random: Arc<dyn SecureRandomSource>,
    ) -> Result<Self> {
        config.validate()?;
        Ok(Self {
            registry: CurrencyRegistry::new(&config)?,
            keys: KeyGenerator::new(&config)?,
            config,
            clock,
            random,
        })
    }

    pub fn config(&self) -> &NetworkConfig {
        &self.config
    }

    pub fn registry(&self) -> &CurrencyRegistry {
        &self.registry
    }

    pub fn keys(&self) -> &KeyGenerator {
        &self.keys
    }

    pub fn native(&self) -> Arc<Currency> {
        self.registry.native()
    }

    /// Registered currency by id; the empty id is the native asset.
    pub fn currency(&self, id: &str) -> Result<Arc<Currency>> {
        self.registry
            .get(id)
            .ok_or_else(|| WalletError::validation(format!("unknown asset '{}'", id)))
    }

    pub fn money(&self, tokens: &str, asset_id: &str) -> Result<Money> {
        Money::from_tokens(tokens, self.currency(asset_id)?)
    }

    pub fn asset_pair(&self, amount_asset_id: &str, price_asset_id: &str) -> Result<AssetPair> {
        Ok(AssetPair::new(
            self.currency(amount_asset_id)?,
            self.currency(price_asset_id)?,
        ))
    }

    /// Replaces the configuration, key generator and registry together.
    pub fn switch_network(&mut self, config: NetworkConfig) -> Result<()> {
        config.validate()?;
        let registry = CurrencyRegistry::new(&config)?;
        self.keys = KeyGenerator::new(&config)?;
        self.registry = registry;
        info!(network = %config.network_code, "Switched network");
        self.config = config;
        Ok(())
    }

    pub fn identity(&self, seed: &[u8]) -> Identity {
        self.keys.identity(seed)
    }

    pub fn generate_seed_phrase(&self, word_count: usize) -> Result<String> {
        generate_seed_phrase(word_count, self.random.as_ref())
    }

    pub fn encrypt_seed(&self, seed: &[u8], password: &str) -> Result<EncryptedSeed> {
        encrypt_wallet_seed(seed, password, self.random.as_ref())
    }

    /// `None` on a wrong password or damaged cipher
    pub fn decrypt_seed(&self, encrypted: &EncryptedSeed, password: &str) -> Option<Vec<u8>> {
        decrypt_wallet_seed(&encrypted.cipher, password, &encrypted.checksum)
    }

    /// Validates any transaction request and signs it as `sender`.
    pub fn sign_request<R: TransactionRequest>(
        &self,
        sender: &KeyPair,
        request: R,
    ) -> Result<SignedTransaction> {
        let signer = TransactionSigner::new(sender, self.random.as_ref())?;
        let ctx = BuildContext {
            keys: &self.keys,
            alias_version: self.config.alias_version,
            sender_public_key: signer.public_key(),
            now: self.clock.now_millis(),
        };
        let tx = request.build(&ctx)?;
        Ok(signer.sign_transaction(&tx))
    }

    pub fn payment(&self, sender: &KeyPair, request: PaymentRequest) -> Result<SignedTransaction> {
        self.sign_request(sender, request)
    }

    pub fn issue(&self, sender: &KeyPair, request: IssueRequest) -> Result<SignedTransaction> {
        self.sign_request(sender, request)
    }

    pub fn transfer(&self, sender: &KeyPair, request: TransferRequest) -> Result<SignedTransaction> {
        self.sign_request(sender, request)
    }

    pub fn reissue(&self, sender: &KeyPair, request: ReissueRequest) -> Result<SignedTransaction> {
        self.sign_request(sender, request)
    }

    pub fn burn(&self, sender: &KeyPair, request: BurnRequest) -> Result<SignedTransaction> {
        self.sign_request(sender, request)
    }

    pub fn lease(&self, sender: &KeyPair, request: LeaseRequest) -> Result<SignedTransaction> {
        self.sign_request(sender, request)
    }

    pub fn cancel_lease(
        &self,
        sender: &KeyPair,
        request: CancelLeaseRequest,
    ) -> Result<SignedTransaction> {
        self.sign_request(sender, request)
    }

    pub fn create_alias(
        &self,
        sender: &KeyPair,
        request: CreateAliasRequest,
    ) -> Result<SignedTransaction> {
        self.sign_request(sender, request)
    }

    pub fn mass_transfer(
        &self,
        sender: &KeyPair,
        request: MassTransferRequest,
    ) -> Result<SignedTransaction> {
        self.sign_request(sender, request)
    }

    pub fn order(&self, sender: &KeyPair, request: OrderRequest) -> Result<SignedOrder> {
        let signer = TransactionSigner::new(sender, self.random.as_ref())?;
        let order = request.build(signer.public_key(), self.clock.now_millis())?;
        Ok(signer.sign_order(&order))
    }

    pub fn cancel_order(&self, sender: &KeyPair, order_id: &str) -> Result<SignedCancelOrder> {
        let signer = TransactionSigner::new(sender, self.random.as_ref())?;
        let cancel = CancelOrder::new(signer.public_key(), order_id)?;
        Ok(signer.sign_cancel_order(&cancel))
    }
}

impl fmt::Debug for WalletCore {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("WalletCore")
            .field("config", &self.config)
            .field("registry", &self.registry)
            .field("keys", &self.keys)
            .finish_non_exhaustive()
    }
}
