//! Field encoders for canonical transaction and order bytes.
//!
//! Every writer method is infallible. Lengths and ranges are checked when a
//! request is validated, before a `ByteWriter` is ever created.

use std::fmt;

use bytes::{BufMut, BytesMut};

use crate::core::asset::Currency;
use crate::error::{WalletError, Result};
use crate::key_generator::{KeyGenerator, ADDRESS_LENGTH};
use crate::utils::{base58_decode_fixed, base58_encode};

pub const ASSET_ID_LENGTH: usize = 32;
pub const ALIAS_PREFIX: &str = "alias:";
pub const MIN_ALIAS_LENGTH: usize = 4;
pub const MAX_ALIAS_LENGTH: usize = 30;
const ALIAS_ALPHABET: &str = "-.0123456789@_abcdefghijklmnopqrstuvwxyz";

#[derive(Debug, Default)]
pub struct ByteWriter {
    buf: BytesMut,
}

impl ByteWriter {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn type_byte(&mut self, value: u8) -> &mut Self {
        self.byte(value)
    }

    pub fn byte(&mut self, value: u8) -> &mut Self {
        self.buf.put_u8(value);
        self
    }

    pub fn boolean(&mut self, value: bool) -> &mut Self {
        self.byte(u8::from(value))
    }

    pub fn short(&mut self, value: u16) -> &mut Self {
        self.buf.put_u16(value);
        self
    }

    /// 8-byte big-endian signed integer
    pub fn long(&mut self, value: i64) -> &mut Self {
        self.buf.put_i64(value);
        self
    }

    pub fn public_key(&mut self, key: &[u8; 32]) -> &mut Self {
        self.buf.put_slice(key);
        self
    }

    pub fn address(&mut self, raw: &[u8; ADDRESS_LENGTH]) -> &mut Self {
        self.buf.put_slice(raw);
        self
    }

    pub fn raw(&mut self, bytes: &[u8]) -> &mut Self {
        self.buf.put_slice(bytes);
        self
    }

    /// 2-byte length followed by the payload
    pub fn size_prefixed(&mut self, bytes: &[u8]) -> &mut Self {
        debug_assert!(bytes.len() <= u16::MAX as usize);
        self.short(bytes.len() as u16);
        self.raw(bytes)
    }

    /// 0x00 for the native asset, otherwise 0x01 followed by the id
    pub fn optional_asset_id(&mut self, id: Option<&[u8; ASSET_ID_LENGTH]>) -> &mut Self {
        match id {
            Some(id) => self.byte(1).raw(id),
            None => self.byte(0),
        }
    }

    /// Mandatory id with no flag byte
    pub fn asset_id(&mut self, id: &[u8; ASSET_ID_LENGTH]) -> &mut Self {
        self.raw(id)
    }

    pub fn recipient(&mut self, recipient: &Recipient) -> &mut Self {
        match recipient {
            Recipient::Address(raw) => self.address(raw),
            Recipient::Alias { .. } => {
                let bytes = recipient.alias_bytes();
                self.raw(&bytes)
            }
        }
    }

    pub fn into_vec(self) -> Vec<u8> {
        self.buf.to_vec()
    }
}

/// Ledger id bytes of an asset; `None` for the native asset.
pub fn asset_id_bytes(currency: &Currency) -> Result<Option<[u8; ASSET_ID_LENGTH]>> {
    if currency.is_native() {
        return Ok(None);
    }
    base58_decode_fixed(currency.id(), "asset id")
        .map(Some)
        .map_err(|e| WalletError::validation(e.to_string()))
}

/// Either a raw address or an alias on one network
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Recipient {
    Address([u8; ADDRESS_LENGTH]),
    Alias {
        version: u8,
        network: u8,
        name: String,
    },
}

impl Recipient {
    /// Parses `alias:<net>:<name>`, `alias:<name>` or a base58 address.
    pub fn parse(text: &str, keys: &KeyGenerator, alias_version: u8) -> Result<Self> {
        let Some(rest) = text.strip_prefix(ALIAS_PREFIX) else {
            return keys.decode_address(text).map(Recipient::Address);
        };

        let network = keys.network_code();
        let name = match rest.split_once(':') {
            Some((code, name)) => {
                if code.len() != 1 || code.as_bytes()[0] != network {
                    return Err(WalletError::validation(format!(
                        "alias '{}' is not for network '{}'",
                        text, network as char
                    )));
                }
                name
            }
            None => rest,
        };
        validate_alias_name(name)?;
        Ok(Recipient::Alias {
            version: alias_version,
            network,
            name: name.to_string(),
        })
    }

    /// `version ‖ network ‖ size-prefixed name`
    pub fn alias_bytes(&self) -> Vec<u8> {
        match self {
            Recipient::Address(raw) => raw.to_vec(),
            Recipient::Alias {
                version,
                network,
                name,
            } => {
                let mut writer = ByteWriter::new();
                writer.byte(*version).byte(*network).size_prefixed(name.as_bytes());
                writer.into_vec()
            }
        }
    }
}

impl fmt::Display for Recipient {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Recipient::Address(raw) => write!(f, "{}", base58_encode(raw)),
            Recipient::Alias { network, name, .. } => {
                write!(f, "{}{}:{}", ALIAS_PREFIX, *network as char, name)
            }
        }
    }
}

pub fn validate_alias_name(name: &str) -> Result<()> {
    let length = name.chars().count();
    if !(MIN_ALIAS_LENGTH..=MAX_ALIAS_LENGTH).contains(&length) {
        return Err(WalletError::validation(format!(
            "alias must be {} to {} characters, got {}",
            MIN_ALIAS_LENGTH, MAX_ALIAS_LENGTH, length
        )));
    }
    if let Some(bad) = name.chars().find(|c| !ALIAS_ALPHABET.contains(*c)) {
        return Err(WalletError::validation(format!(
            "alias contains forbidden character '{}'",
            bad
        )));
    }
    Ok(())
}
