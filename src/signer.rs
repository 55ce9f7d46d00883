use serde_json::Value;
use tracing::debug;

use crate::core::order::{CancelOrder, Order};
use crate::core::transaction::{Transaction, TransactionKind};
use crate::error::Result;
use crate::hash::blake2b256;
use crate::key_generator::KeyPair;
use crate::signature::{sign, SecureRandomSource};
use crate::utils::base58_encode;

/// Signs `bytes` and returns the base58 signature.
///
/// Uses fresh entropy from `random`, or deterministic signing if it is unavailable.
pub fn build_signature(bytes: &[u8], private_key: &[u8; 32], random: &dyn SecureRandomSource) -> String {
    base58_encode(&sign(private_key, bytes, random))
}

/// `base58(blake2b256(unsigned_bytes))`; stable under re-signing.
pub fn transaction_id(bytes: &[u8]) -> String {
    base58_encode(&blake2b256(bytes))
}

#[derive(Debug, Clone)]
pub struct SignedTransaction {
    pub kind: TransactionKind,
    pub id: String,
    pub signature: String,
    /// Unsigned canonical bytes
    pub bytes: Vec<u8>,
    pub json: Value,
}

#[derive(Debug, Clone)]
pub struct SignedOrder {
    pub id: String,
    pub signature: String,
    pub bytes: Vec<u8>,
    pub json: Value,
}

#[derive(Debug, Clone)]
pub struct SignedCancelOrder {
    pub signature: String,
    pub bytes: Vec<u8>,
    pub json: Value,
}

/// Sender keys checked once, then used for any number of payloads.
pub struct TransactionSigner<'a> {
    public_key: [u8; 32],
    private_key: [u8; 32],
    random: &'a dyn SecureRandomSource,
}

impl<'a> TransactionSigner<'a> {
    /// Fails unless the sender carries both keys and they match.
    pub fn new(sender: &KeyPair, random: &'a dyn SecureRandomSource) -> Result<Self> {
        let (public_key, private_key) = sender.validate()?;
        Ok(Self {
            public_key,
            private_key,
            random,
        })
    }

    pub fn public_key(&self) -> [u8; 32] {
        self.public_key
    }

    pub fn sign_transaction(&self, tx: &Transaction) -> SignedTransaction {
        let bytes = tx.canonical_bytes();
        let id = transaction_id(&bytes);
        let signature = build_signature(&bytes, &self.private_key, self.random);
        debug!(kind = %tx.kind(), id = %id, "Transaction signed");
        SignedTransaction {
            kind: tx.kind(),
            json: tx.to_json(&id, &signature),
            id,
            signature,
            bytes,
        }
    }

    pub fn sign_order(&self, order: &Order) -> SignedOrder {
        let bytes = order.canonical_bytes();
        let id = transaction_id(&bytes);
        let signature = build_signature(&bytes, &self.private_key, self.random);
        debug!(order_type = %order.order_type, id = %id, "Order signed");
        SignedOrder {
            json: order.to_json(&id, &signature),
            id,
            signature,
            bytes,
        }
    }

    pub fn sign_cancel_order(&self, cancel: &CancelOrder) -> SignedCancelOrder {
        let bytes = cancel.canonical_bytes();
        let signature = build_signature(&bytes, &self.private_key, self.random);
        debug!(order_id = %base58_encode(&cancel.order_id), "Order cancellation signed");
        SignedCancelOrder {
            json: cancel.to_json(&signature),
            signature,
            bytes,
        }
    }
}
