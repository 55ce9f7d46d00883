//! Ledger transactions.
//!
//! A caller describes an action with a request struct whose fields are all
//! optional. `TransactionRequest::build` checks every field and yields a
//! `Transaction` whose canonical bytes can no longer fail to encode.
//!
//! **Canonical bytes:** one fixed field order per kind. Reordering any field
//! yields bytes the ledger will not accept even though a signature over them
//! is mathematically valid.

use std::fmt;
use std::sync::Arc;

use serde_json::{json, Value};

use crate::core::asset::{Currency, CurrencyDescriptor, MAX_PRECISION};
use crate::core::decimal::Amount;
use crate::core::encoder::{asset_id_bytes, ByteWriter, Recipient, ALIAS_PREFIX, ASSET_ID_LENGTH};
use crate::core::money::Money;
use crate::error::{WalletError, Result};
use crate::key_generator::{KeyGenerator, ADDRESS_LENGTH};
use crate::utils::{base58_decode_fixed, base58_encode, ensure_safe_long};

pub const MIN_ASSET_NAME_LENGTH: usize = 4;
pub const MAX_ASSET_NAME_LENGTH: usize = 16;
pub const MAX_ASSET_DESCRIPTION_LENGTH: usize = 1000;
pub const MAX_ATTACHMENT_LENGTH: usize = 140;
pub const MAX_MASS_TRANSFERS: usize = 100;
pub const MASS_TRANSFER_VERSION: u8 = 1;

/// Transaction kinds and their ledger type bytes
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum TransactionKind {
    Payment,
    Issue,
    Transfer,
    Reissue,
    Burn,
    Lease,
    CancelLease,
    CreateAlias,
    MassTransfer,
}

impl TransactionKind {
    pub fn type_byte(self) -> u8 {
        match self {
            TransactionKind::Payment => 2,
            TransactionKind::Issue => 3,
            TransactionKind::Transfer => 4,
            TransactionKind::Reissue => 5,
            TransactionKind::Burn => 6,
            TransactionKind::Lease => 8,
            TransactionKind::CancelLease => 9,
            TransactionKind::CreateAlias => 10,
            TransactionKind::MassTransfer => 11,
        }
    }

    pub fn name(self) -> &'static str {
        match self {
            TransactionKind::Payment => "payment",
            TransactionKind::Issue => "issue",
            TransactionKind::Transfer => "transfer",
            TransactionKind::Reissue => "reissue",
            TransactionKind::Burn => "burn",
            TransactionKind::Lease => "lease",
            TransactionKind::CancelLease => "cancel-lease",
            TransactionKind::CreateAlias => "create-alias",
            TransactionKind::MassTransfer => "mass-transfer",
        }
    }
}

impl fmt::Display for TransactionKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Everything a request needs besides its own fields
#[derive(Debug, Clone)]
pub struct BuildContext<'a> {
    pub keys: &'a KeyGenerator,
    pub alias_version: u8,
    pub sender_public_key: [u8; 32],
    /// Milliseconds since the epoch, used for absent timestamps
    pub now: i64,
}

impl BuildContext<'_> {
    pub fn timestamp(&self, value: Option<i64>) -> Result<i64> {
        let timestamp = value.unwrap_or(self.now);
        if timestamp <= 0 {
            return Err(WalletError::validation("timestamp must be positive"));
        }
        ensure_safe_long(timestamp, "timestamp")
    }

    pub fn recipient(&self, text: Option<String>) -> Result<Recipient> {
        Recipient::parse(&require(text, "recipient")?, self.keys, self.alias_version)
    }

    pub fn address(&self, text: Option<String>) -> Result<[u8; ADDRESS_LENGTH]> {
        self.keys.decode_address(&require(text, "recipient")?)
    }
}

/// Validates a request into a signable transaction.
pub trait TransactionRequest {
    fn build(self, ctx: &BuildContext<'_>) -> Result<Transaction>;
}

pub(crate) fn require<T>(value: Option<T>, field: &str) -> Result<T> {
    value.ok_or_else(|| WalletError::validation(format!("{} is required", field)))
}

pub(crate) fn positive(money: Option<Money>, field: &str) -> Result<Money> {
    let money = require(money, field)?;
    if !money.is_positive() {
        return Err(WalletError::validation(format!("{} must be positive", field)));
    }
    ensure_safe_long(money.to_coins(), field)?;
    Ok(money)
}

pub(crate) fn native(money: Option<Money>, field: &str) -> Result<Money> {
    let money = positive(money, field)?;
    if !money.is_native() {
        return Err(WalletError::validation(format!(
            "{} must be in the native asset, got {}",
            field,
            money.currency()
        )));
    }
    Ok(money)
}

fn attachment(value: Option<Vec<u8>>) -> Result<Vec<u8>> {
    let value = value.unwrap_or_default();
    if value.len() > MAX_ATTACHMENT_LENGTH {
        return Err(WalletError::validation(format!(
            "attachment must be at most {} bytes, got {}",
            MAX_ATTACHMENT_LENGTH,
            value.len()
        )));
    }
    Ok(value)
}

fn issued_asset(money: &Money, action: &str) -> Result<[u8; ASSET_ID_LENGTH]> {
    asset_id_bytes(money.currency())?
        .ok_or_else(|| WalletError::validation(format!("cannot {} the native asset", action)))
}

fn optional_id_json(id: Option<&[u8; ASSET_ID_LENGTH]>) -> Value {
    id.map_or(Value::Null, |id| Value::String(base58_encode(id)))
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Payment {
    pub sender_public_key: [u8; 32],
    pub recipient: [u8; ADDRESS_LENGTH],
    pub amount: Money,
    pub fee: Money,
    pub timestamp: i64,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AssetIssue {
    pub sender_public_key: [u8; 32],
    pub name: String,
    pub description: String,
    pub quantity: Money,
    pub decimals: u8,
    pub reissuable: bool,
    pub fee: Money,
    pub timestamp: i64,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AssetTransfer {
    pub sender_public_key: [u8; 32],
    pub asset_id: Option<[u8; ASSET_ID_LENGTH]>,
    pub fee_asset_id: Option<[u8; ASSET_ID_LENGTH]>,
    pub recipient: Recipient,
    pub amount: Money,
    pub fee: Money,
    pub attachment: Vec<u8>,
    pub timestamp: i64,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AssetReissue {
    pub sender_public_key: [u8; 32],
    pub asset_id: [u8; ASSET_ID_LENGTH],
    pub quantity: Money,
    pub reissuable: bool,
    pub fee: Money,
    pub timestamp: i64,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AssetBurn {
    pub sender_public_key: [u8; 32],
    pub asset_id: [u8; ASSET_ID_LENGTH],
    pub amount: Money,
    pub fee: Money,
    pub timestamp: i64,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StartLeasing {
    pub sender_public_key: [u8; 32],
    pub recipient: Recipient,
    pub amount: Money,
    pub fee: Money,
    pub timestamp: i64,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CancelLeasing {
    pub sender_public_key: [u8; 32],
    pub lease_id: [u8; 32],
    pub fee: Money,
    pub timestamp: i64,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CreateAlias {
    pub sender_public_key: [u8; 32],
    pub alias: Recipient,
    pub fee: Money,
    pub timestamp: i64,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MassPayment {
    pub sender_public_key: [u8; 32],
    pub asset_id: Option<[u8; ASSET_ID_LENGTH]>,
    pub transfers: Vec<(Recipient, Money)>,
    pub fee: Money,
    pub attachment: Vec<u8>,
    pub timestamp: i64,
}

/// A validated transaction of any kind
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Transaction {
    Payment(Payment),
    Issue(AssetIssue),
    Transfer(AssetTransfer),
    Reissue(AssetReissue),
    Burn(AssetBurn),
    Lease(StartLeasing),
    CancelLease(CancelLeasing),
    CreateAlias(CreateAlias),
    MassTransfer(MassPayment),
}

impl Transaction {
    pub fn kind(&self) -> TransactionKind {
        match self {
            Transaction::Payment(_) => TransactionKind::Payment,
            Transaction::Issue(_) => TransactionKind::Issue,
            Transaction::Transfer(_) => TransactionKind::Transfer,
            Transaction::Reissue(_) => TransactionKind::Reissue,
            Transaction::Burn(_) => TransactionKind::Burn,
            Transaction::Lease(_) => TransactionKind::Lease,
            Transaction::CancelLease(_) => TransactionKind::CancelLease,
            Transaction::CreateAlias(_) => TransactionKind::CreateAlias,
            Transaction::MassTransfer(_) => TransactionKind::MassTransfer,
        }
    }

    pub fn sender_public_key(&self) -> &[u8; 32] {
        match self {
            Transaction::Payment(tx) => &tx.sender_public_key,
            Transaction::Issue(tx) => &tx.sender_public_key,
            Transaction::Transfer(tx) => &tx.sender_public_key,
            Transaction::Reissue(tx) => &tx.sender_public_key,
            Transaction::Burn(tx) => &tx.sender_public_key,
            Transaction::Lease(tx) => &tx.sender_public_key,
            Transaction::CancelLease(tx) => &tx.sender_public_key,
            Transaction::CreateAlias(tx) => &tx.sender_public_key,
            Transaction::MassTransfer(tx) => &tx.sender_public_key,
        }
    }

    pub fn timestamp(&self) -> i64 {
        match self {
            Transaction::Payment(tx) => tx.timestamp,
            Transaction::Issue(tx) => tx.timestamp,
            Transaction::Transfer(tx) => tx.timestamp,
            Transaction::Reissue(tx) => tx.timestamp,
            Transaction::Burn(tx) => tx.timestamp,
            Transaction::Lease(tx) => tx.timestamp,
            Transaction::CancelLease(tx) => tx.timestamp,
            Transaction::CreateAlias(tx) => tx.timestamp,
            Transaction::MassTransfer(tx) => tx.timestamp,
        }
    }

    pub fn fee(&self) -> &Money {
        match self {
            Transaction::Payment(tx) => &tx.fee,
            Transaction::Issue(tx) => &tx.fee,
            Transaction::Transfer(tx) => &tx.fee,
            Transaction::Reissue(tx) => &tx.fee,
            Transaction::Burn(tx) => &tx.fee,
            Transaction::Lease(tx) => &tx.fee,
            Transaction::CancelLease(tx) => &tx.fee,
            Transaction::CreateAlias(tx) => &tx.fee,
            Transaction::MassTransfer(tx) => &tx.fee,
        }
    }

    /// Unsigned bytes in the ledger's field order for this kind
    pub fn canonical_bytes(&self) -> Vec<u8> {
        let mut w = ByteWriter::new();
        w.type_byte(self.kind().type_byte());
        match self {
            Transaction::Payment(tx) => {
                w.long(tx.timestamp)
                    .public_key(&tx.sender_public_key)
                    .address(&tx.recipient)
                    .long(tx.amount.to_coins())
                    .long(tx.fee.to_coins());
            }
            Transaction::Issue(tx) => {
                w.public_key(&tx.sender_public_key)
                    .size_prefixed(tx.name.as_bytes())
                    .size_prefixed(tx.description.as_bytes())
                    .long(tx.quantity.to_coins())
                    .byte(tx.decimals)
                    .boolean(tx.reissuable)
                    .long(tx.fee.to_coins())
                    .long(tx.timestamp);
            }
            Transaction::Transfer(tx) => {
                w.public_key(&tx.sender_public_key)
                    .optional_asset_id(tx.asset_id.as_ref())
                    .optional_asset_id(tx.fee_asset_id.as_ref())
                    .long(tx.timestamp)
                    .long(tx.amount.to_coins())
                    .long(tx.fee.to_coins())
                    .recipient(&tx.recipient)
                    .size_prefixed(&tx.attachment);
            }
            Transaction::Reissue(tx) => {
                w.public_key(&tx.sender_public_key)
                    .asset_id(&tx.asset_id)
                    .long(tx.quantity.to_coins())
                    .boolean(tx.reissuable)
                    .long(tx.fee.to_coins())
                    .long(tx.timestamp);
            }
            Transaction::Burn(tx) => {
                w.public_key(&tx.sender_public_key)
                    .asset_id(&tx.asset_id)
                    .long(tx.amount.to_coins())
                    .long(tx.fee.to_coins())
                    .long(tx.timestamp);
            }
            Transaction::Lease(tx) => {
                w.public_key(&tx.sender_public_key)
                    .recipient(&tx.recipient)
                    .long(tx.amount.to_coins())
                    .long(tx.fee.to_coins())
                    .long(tx.timestamp);
            }
            Transaction::CancelLease(tx) => {
                w.public_key(&tx.sender_public_key)
                    .long(tx.fee.to_coins())
                    .long(tx.timestamp)
                    .raw(&tx.lease_id);
            }
            Transaction::CreateAlias(tx) => {
                w.public_key(&tx.sender_public_key)
                    .size_prefixed(&tx.alias.alias_bytes())
                    .long(tx.fee.to_coins())
                    .long(tx.timestamp);
            }
            Transaction::MassTransfer(tx) => {
                w.byte(MASS_TRANSFER_VERSION)
                    .public_key(&tx.sender_public_key)
                    .optional_asset_id(tx.asset_id.as_ref())
                    .short(tx.transfers.len() as u16);
                for (recipient, amount) in &tx.transfers {
                    w.recipient(recipient).long(amount.to_coins());
                }
                w.long(tx.timestamp)
                    .long(tx.fee.to_coins())
                    .size_prefixed(&tx.attachment);
            }
        }
        w.into_vec()
    }

    /// Ledger REST payload. Money is in coins, byte arrays in base58.
    pub fn to_json(&self, id: &str, signature: &str) -> Value {
        let mut body = match self {
            Transaction::Payment(tx) => json!({
                "recipient": base58_encode(&tx.recipient),
                "amount": tx.amount.to_coins(),
            }),
            Transaction::Issue(tx) => json!({
                "name": tx.name,
                "description": tx.description,
                "quantity": tx.quantity.to_coins(),
                "decimals": tx.decimals,
                "reissuable": tx.reissuable,
            }),
            Transaction::Transfer(tx) => json!({
                "assetId": optional_id_json(tx.asset_id.as_ref()),
                "feeAssetId": optional_id_json(tx.fee_asset_id.as_ref()),
                "recipient": tx.recipient.to_string(),
                "amount": tx.amount.to_coins(),
                "attachment": base58_encode(&tx.attachment),
            }),
            Transaction::Reissue(tx) => json!({
                "assetId": base58_encode(&tx.asset_id),
                "quantity": tx.quantity.to_coins(),
                "reissuable": tx.reissuable,
            }),
            Transaction::Burn(tx) => json!({
                "assetId": base58_encode(&tx.asset_id),
                "quantity": tx.amount.to_coins(),
            }),
            Transaction::Lease(tx) => json!({
                "recipient": tx.recipient.to_string(),
                "amount": tx.amount.to_coins(),
            }),
            Transaction::CancelLease(tx) => json!({
                "leaseId": base58_encode(&tx.lease_id),
            }),
            Transaction::CreateAlias(tx) => {
                let alias = match &tx.alias {
                    Recipient::Alias { name, .. } => name.clone(),
                    other => other.to_string(),
                };
                json!({ "alias": alias })
            }
            Transaction::MassTransfer(tx) => {
                let transfers: Vec<Value> = tx
                    .transfers
                    .iter()
                    .map(|(recipient, amount)| {
                        json!({ "recipient": recipient.to_string(), "amount": amount.to_coins() })
                    })
                    .collect();
                json!({
                    "version": MASS_TRANSFER_VERSION,
                    "assetId": optional_id_json(tx.asset_id.as_ref()),
                    "transfers": transfers,
                    "attachment": base58_encode(&tx.attachment),
                    "proofs": [signature],
                })
            }
        };

        if let Some(fields) = body.as_object_mut() {
            let common: [(&str, Value); 6] = [
                ("type", json!(self.kind().type_byte())),
                ("id", json!(id)),
                ("senderPublicKey", json!(base58_encode(self.sender_public_key()))),
                ("signature", json!(signature)),
                ("timestamp", json!(self.timestamp())),
                ("fee", json!(self.fee().to_coins())),
            ];
            for (key, value) in common {
                fields.insert(key.to_string(), value);
            }
        }
        body
    }
}

/// Legacy native-asset payment
#[derive(Debug, Clone, Default)]
pub struct PaymentRequest {
    pub recipient: Option<String>,
    pub amount: Option<Money>,
    pub fee: Option<Money>,
    pub timestamp: Option<i64>,
}

impl TransactionRequest for PaymentRequest {
    fn build(self, ctx: &BuildContext<'_>) -> Result<Transaction> {
        Ok(Transaction::Payment(Payment {
            sender_public_key: ctx.sender_public_key,
            recipient: ctx.address(self.recipient)?,
            amount: native(self.amount, "amount")?,
            fee: native(self.fee, "fee")?,
            timestamp: ctx.timestamp(self.timestamp)?,
        }))
    }
}

#[derive(Debug, Clone, Default)]
pub struct IssueRequest {
    pub name: Option<String>,
    /// Defaults to empty
    pub description: Option<String>,
    /// Total tokens, floored to `decimals`
    pub quantity: Option<Amount>,
    pub decimals: Option<u32>,
    pub reissuable: bool,
    pub fee: Option<Money>,
    pub timestamp: Option<i64>,
}

impl TransactionRequest for IssueRequest {
    fn build(self, ctx: &BuildContext<'_>) -> Result<Transaction> {
        let name = require(self.name, "name")?;
        if !(MIN_ASSET_NAME_LENGTH..=MAX_ASSET_NAME_LENGTH).contains(&name.len()) {
            return Err(WalletError::validation(format!(
                "asset name must be {} to {} bytes, got {}",
                MIN_ASSET_NAME_LENGTH,
                MAX_ASSET_NAME_LENGTH,
                name.len()
            )));
        }
        let description = self.description.unwrap_or_default();
        if description.len() > MAX_ASSET_DESCRIPTION_LENGTH {
            return Err(WalletError::validation(format!(
                "asset description must be at most {} bytes",
                MAX_ASSET_DESCRIPTION_LENGTH
            )));
        }
        let decimals = require(self.decimals, "decimals")?;
        if decimals > MAX_PRECISION {
            return Err(WalletError::validation(format!(
                "decimals must be at most {}, got {}",
                MAX_PRECISION, decimals
            )));
        }
        // Not issued yet, so the asset has no id and is never cached.
        let asset = Currency::from_descriptor(
            CurrencyDescriptor::new("", decimals).with_name(name.clone()),
        )?;
        let quantity = Money::new(require(self.quantity, "quantity")?, Arc::new(asset))?;

        Ok(Transaction::Issue(AssetIssue {
            sender_public_key: ctx.sender_public_key,
            name,
            description,
            quantity: positive(Some(quantity), "quantity")?,
            decimals: decimals as u8,
            reissuable: self.reissuable,
            fee: native(self.fee, "fee")?,
            timestamp: ctx.timestamp(self.timestamp)?,
        }))
    }
}

#[derive(Debug, Clone, Default)]
pub struct TransferRequest {
    /// Base58 address or `alias:` form
    pub recipient: Option<String>,
    pub amount: Option<Money>,
    /// May be in any asset
    pub fee: Option<Money>,
    pub attachment: Option<Vec<u8>>,
    pub timestamp: Option<i64>,
}

impl TransactionRequest for TransferRequest {
    fn build(self, ctx: &BuildContext<'_>) -> Result<Transaction> {
        let amount = positive(self.amount, "amount")?;
        let fee = positive(self.fee, "fee")?;
        Ok(Transaction::Transfer(AssetTransfer {
            sender_public_key: ctx.sender_public_key,
            asset_id: asset_id_bytes(amount.currency())?,
            fee_asset_id: asset_id_bytes(fee.currency())?,
            recipient: ctx.recipient(self.recipient)?,
            amount,
            fee,
            attachment: attachment(self.attachment)?,
            timestamp: ctx.timestamp(self.timestamp)?,
        }))
    }
}

#[derive(Debug, Clone, Default)]
pub struct ReissueRequest {
    /// Additional tokens of an issued asset
    pub quantity: Option<Money>,
    pub reissuable: bool,
    pub fee: Option<Money>,
    pub timestamp: Option<i64>,
}

impl TransactionRequest for ReissueRequest {
    fn build(self, ctx: &BuildContext<'_>) -> Result<Transaction> {
        let quantity = positive(self.quantity, "quantity")?;
        Ok(Transaction::Reissue(AssetReissue {
            sender_public_key: ctx.sender_public_key,
            asset_id: issued_asset(&quantity, "reissue")?,
            quantity,
            reissuable: self.reissuable,
            fee: native(self.fee, "fee")?,
            timestamp: ctx.timestamp(self.timestamp)?,
        }))
    }
}

#[derive(Debug, Clone, Default)]
pub struct BurnRequest {
    pub amount: Option<Money>,
    pub fee: Option<Money>,
    pub timestamp: Option<i64>,
}

impl TransactionRequest for BurnRequest {
    fn build(self, ctx: &BuildContext<'_>) -> Result<Transaction> {
        let amount = positive(self.amount, "amount")?;
        Ok(Transaction::Burn(AssetBurn {
            sender_public_key: ctx.sender_public_key,
            asset_id: issued_asset(&amount, "burn")?,
            amount,
            fee: native(self.fee, "fee")?,
            timestamp: ctx.timestamp(self.timestamp)?,
        }))
    }
}

#[derive(Debug, Clone, Default)]
pub struct LeaseRequest {
    pub recipient: Option<String>,
    pub amount: Option<Money>,
    pub fee: Option<Money>,
    pub timestamp: Option<i64>,
}

impl TransactionRequest for LeaseRequest {
    fn build(self, ctx: &BuildContext<'_>) -> Result<Transaction> {
        Ok(Transaction::Lease(StartLeasing {
            sender_public_key: ctx.sender_public_key,
            recipient: ctx.recipient(self.recipient)?,
            amount: native(self.amount, "amount")?,
            fee: native(self.fee, "fee")?,
            timestamp: ctx.timestamp(self.timestamp)?,
        }))
    }
}

#[derive(Debug, Clone, Default)]
pub struct CancelLeaseRequest {
    /// Base58 id of the lease transaction
    pub lease_id: Option<String>,
    pub fee: Option<Money>,
    pub timestamp: Option<i64>,
}

impl TransactionRequest for CancelLeaseRequest {
    fn build(self, ctx: &BuildContext<'_>) -> Result<Transaction> {
        let lease_id = base58_decode_fixed(&require(self.lease_id, "lease id")?, "lease id")
            .map_err(|e| WalletError::validation(e.to_string()))?;
        Ok(Transaction::CancelLease(CancelLeasing {
            sender_public_key: ctx.sender_public_key,
            lease_id,
            fee: native(self.fee, "fee")?,
            timestamp: ctx.timestamp(self.timestamp)?,
        }))
    }
}

#[derive(Debug, Clone, Default)]
pub struct CreateAliasRequest {
    /// Bare alias name, e.g. `merchant`
    pub alias: Option<String>,
    pub fee: Option<Money>,
    pub timestamp: Option<i64>,
}

impl TransactionRequest for CreateAliasRequest {
    fn build(self, ctx: &BuildContext<'_>) -> Result<Transaction> {
        let name = require(self.alias, "alias")?;
        let alias = Recipient::parse(
            &format!("{}{}", ALIAS_PREFIX, name),
            ctx.keys,
            ctx.alias_version,
        )?;
        Ok(Transaction::CreateAlias(CreateAlias {
            sender_public_key: ctx.sender_public_key,
            alias,
            fee: native(self.fee, "fee")?,
            timestamp: ctx.timestamp(self.timestamp)?,
        }))
    }
}

#[derive(Debug, Clone)]
pub struct MassTransferItem {
    pub recipient: String,
    pub amount: Money,
}

#[derive(Debug, Clone, Default)]
pub struct MassTransferRequest {
    /// All amounts must be in the same asset
    pub transfers: Vec<MassTransferItem>,
    pub fee: Option<Money>,
    pub attachment: Option<Vec<u8>>,
    pub timestamp: Option<i64>,
}

impl TransactionRequest for MassTransferRequest {
    fn build(self, ctx: &BuildContext<'_>) -> Result<Transaction> {
        if self.transfers.is_empty() || self.transfers.len() > MAX_MASS_TRANSFERS {
            return Err(WalletError::validation(format!(
                "mass transfer needs 1 to {} transfers, got {}",
                MAX_MASS_TRANSFERS,
                self.transfers.len()
            )));
        }
        let asset = Arc::clone(self.transfers[0].amount.currency());
        let mut transfers = Vec::with_capacity(self.transfers.len());
        for item in self.transfers {
            if !item.amount.currency().same_asset(&asset) {
                return Err(WalletError::CurrencyMismatch {
                    left: asset.to_string(),
                    right: item.amount.currency().to_string(),
                });
            }
            let recipient = ctx.recipient(Some(item.recipient))?;
            transfers.push((recipient, positive(Some(item.amount), "transfer amount")?));
        }

        Ok(Transaction::MassTransfer(MassPayment {
            sender_public_key: ctx.sender_public_key,
            asset_id: asset_id_bytes(&asset)?,
            transfers,
            fee: native(self.fee, "fee")?,
            attachment: attachment(self.attachment)?,
            timestamp: ctx.timestamp(self.timestamp)?,
        }))
    }
}
