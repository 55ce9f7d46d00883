//! Asset descriptors and the per-network currency registry. The native asset has the empty id; every other asset is identified by its ledger id, which is network-specific.

use std::collections::HashMap;
use std::fmt;
use std::sync::{Arc, PoisonError, RwLock};

use serde::{Deserialize, Serialize};
use tracing::{debug, info};

use crate::config::NetworkConfig;
use crate::core::decimal::RoundingMode;
use crate::error::{WalletError, Result};

/// Highest number of fractional digits the ledger allows for an asset.
pub const MAX_PRECISION: u32 = 8;

/// Caller-supplied description of an asset. Every field is optional; `create`
/// validates and fills defaults.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CurrencyDescriptor {
    /// Ledger id; `None` or empty means the native asset / a not-yet-issued asset
    #[serde(default)]
    pub id: Option<String>,
    /// Defaults to the id
    #[serde(default)]
    pub display_name: Option<String>,
    /// Defaults to the display name
    #[serde(default)]
    pub short_name: Option<String>,
    /// Defaults to the short name
    #[serde(default)]
    pub symbol: Option<String>,
    /// Required
    #[serde(default)]
    pub precision: Option<u32>,
    /// Defaults to `false`
    #[serde(default)]
    pub verified: Option<bool>,
    /// Defaults to half-up
    #[serde(default)]
    pub rounding_mode: Option<RoundingMode>,
}

impl CurrencyDescriptor {
    pub fn new(id: impl Into<String>, precision: u32) -> Self {
        Self {
            id: Some(id.into()),
            precision: Some(precision),
            ..Self::default()
        }
    }

    pub fn with_name(mut self, name: impl Into<String>) -> Self {
        self.display_name = Some(name.into());
        self
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Currency {
    id: String,
    display_name: String,
    short_name: String,
    symbol: String,
    precision: u32,
    verified: bool,
    rounding_mode: RoundingMode,
}

impl Currency {
    /// Builds an uncached currency from a descriptor.
    pub fn from_descriptor(descriptor: CurrencyDescriptor) -> Result<Self> {
        let precision = descriptor
            .precision
            .ok_or_else(|| WalletError::validation("currency precision is required"))?;
        if precision > MAX_PRECISION {
            return Err(WalletError::validation(format!(
                "currency precision must be at most {}, got {}",
                MAX_PRECISION, precision
            )));
        }

        let id = descriptor.id.unwrap_or_default();
        let display_name = descriptor.display_name.unwrap_or_else(|| id.clone());
        let short_name = descriptor.short_name.unwrap_or_else(|| display_name.clone());
        let symbol = descriptor.symbol.unwrap_or_else(|| short_name.clone());

        Ok(Currency {
            id,
            display_name,
            short_name,
            symbol,
            precision,
            verified: descriptor.verified.unwrap_or(false),
            rounding_mode: descriptor.rounding_mode.unwrap_or_default(),
        })
    }

    pub fn id(&self) -> &str {
        &self.id
    }

    pub fn display_name(&self) -> &str {
        &self.display_name
    }

    pub fn short_name(&self) -> &str {
        &self.short_name
    }

    pub fn symbol(&self) -> &str {
        &self.symbol
    }

    pub fn precision(&self) -> u32 {
        self.precision
    }

    pub fn verified(&self) -> bool {
        self.verified
    }

    pub fn rounding_mode(&self) -> RoundingMode {
        self.rounding_mode
    }

    pub fn is_native(&self) -> bool {
        self.id.is_empty()
    }

    /// Identity is the ledger id, never pointer equality.
    pub fn same_asset(&self, other: &Currency) -> bool {
        self.id == other.id
    }
}

impl fmt::Display for Currency {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.is_native() {
            write!(f, "{}", self.short_name)
        } else {
            write!(f, "{} ({})", self.short_name, self.id)
        }
    }
}

/// Process-wide currency cache for one network.
///
/// Append-only except for `invalidate`, which returns the registry to the
/// native asset plus the network's pinned assets.
#[derive(Debug)]
pub struct CurrencyRegistry {
    native: Arc<Currency>,
    pinned: Vec<Arc<Currency>>,
    cache: RwLock<HashMap<String, Arc<Currency>>>,
}

impl CurrencyRegistry {
    pub fn new(config: &NetworkConfig) -> Result<Self> {
        let mut native_descriptor = config.native_asset.clone();
        native_descriptor.id = Some(String::new());
        let native = Arc::new(Currency::from_descriptor(native_descriptor)?);

        let pinned = config
            .pinned_assets
            .iter()
            .cloned()
            .map(|d| Currency::from_descriptor(d).map(Arc::new))
            .collect::<Result<Vec<_>>>()?;

        let registry = Self {
            native,
            pinned,
            cache: RwLock::new(HashMap::new()),
        };
        registry.invalidate();
        Ok(registry)
    }

    pub fn native(&self) -> Arc<Currency> {
        Arc::clone(&self.native)
    }

    /// Returns the cached currency for the descriptor id, or builds one.
    ///
    /// Non-empty ids are cached; an empty or absent id yields a fresh,
    /// uncached instance every time.
    pub fn create(&self, descriptor: CurrencyDescriptor) -> Result<Arc<Currency>> {
        let id = descriptor.id.clone().unwrap_or_default();
        if id.is_empty() {
            return Currency::from_descriptor(descriptor).map(Arc::new);
        }

        if let Some(existing) = self.get(&id) {
            return Ok(existing);
        }

        let mut cache = self.cache.write().unwrap_or_else(PoisonError::into_inner);
        // Another writer may have raced us between the read and write locks.
        if let Some(existing) = cache.get(&id) {
            return Ok(Arc::clone(existing));
        }
        let currency = Arc::new(Currency::from_descriptor(descriptor)?);
        debug!(asset_id = %id, precision = currency.precision(), "Currency cached");
        cache.insert(id, Arc::clone(&currency));
        Ok(currency)
    }

    /// Looks up a currency; the empty id resolves to the native asset.
    pub fn get(&self, id: &str) -> Option<Arc<Currency>> {
        if id.is_empty() {
            return Some(self.native());
        }
        self.cache
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .get(id)
            .cloned()
    }

    /// Inserts a fully built currency unless its id is already cached, and returns the cached instance.
    pub fn put(&self, currency: Currency) -> Arc<Currency> {
        if currency.is_native() {
            return self.native();
        }
        let mut cache = self.cache.write().unwrap_or_else(PoisonError::into_inner);
        Arc::clone(
            cache
                .entry(currency.id.clone())
                .or_insert_with(|| Arc::new(currency)),
        )
    }

    /// Drops every cached asset except the pinned well-known ones.
    pub fn invalidate(&self) {
        let mut cache = self.cache.write().unwrap_or_else(PoisonError::into_inner);
        cache.clear();
        for currency in &self.pinned {
            cache.insert(currency.id.clone(), Arc::clone(currency));
        }
        info!(pinned = self.pinned.len(), "Currency registry reset to pinned assets");
    }

    /// Number of cached non-native assets
    pub fn len(&self) -> usize {
        self.cache.read().unwrap_or_else(PoisonError::into_inner).len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn registry() -> CurrencyRegistry {
        CurrencyRegistry::new(&NetworkConfig::mainnet()).unwrap()
    }

    #[test]
    fn test_descriptor_defaults() {
        let currency = Currency::from_descriptor(CurrencyDescriptor::new("X", 2)).unwrap();
        assert_eq!(currency.display_name(), "X");
        assert_eq!(currency.short_name(), "X");
        assert_eq!(currency.symbol(), "X");
        assert!(!currency.verified());
        assert_eq!(currency.rounding_mode(), RoundingMode::HalfUp);
    }

    #[test]
    fn test_precision_required() {
        let descriptor = CurrencyDescriptor {
            id: Some("X".to_string()),
            ..CurrencyDescriptor::default()
        };
        assert!(matches!(Currency::from_descriptor(descriptor), Err(WalletError::Validation(_))));
        assert!(Currency::from_descriptor(CurrencyDescriptor::new("X", 9)).is_err());
    }

    #[test]
    fn test_cached_ids_return_same_instance() {
        let registry = registry();
        let a = registry.create(CurrencyDescriptor::new("X", 2)).unwrap();
        let b = registry.create(CurrencyDescriptor::new("X", 5)).unwrap();
        assert!(Arc::ptr_eq(&a, &b));
        assert_eq!(b.precision(), 2);
    }

    #[test]
    fn test_empty_id_is_never_cached() {
        let registry = registry();
        let before = registry.len();
        let a = registry.create(CurrencyDescriptor::new("", 8).with_name("Native")).unwrap();
        let b = registry.create(CurrencyDescriptor::new("", 8).with_name("Native")).unwrap();
        assert!(!Arc::ptr_eq(&a, &b));
        assert_eq!(registry.len(), before);
        assert!(a.is_native());
    }

    #[test]
    fn test_invalidate_keeps_pinned_assets() {
        let registry = registry();
        registry.create(CurrencyDescriptor::new("temporary", 3)).unwrap();
        assert_eq!(registry.len(), 5);
        registry.invalidate();
        assert_eq!(registry.len(), 4);
        assert!(registry.get("temporary").is_none());
        let btc = registry.get("8LQW8f7P5d5PZM7GtZEBgaqRPGSzS3DfPuiXrURJ4AJS").unwrap();
        assert_eq!(btc.short_name(), "BTC");
        assert_eq!(registry.get("").unwrap().short_name(), "WAVES");
    }

    #[test]
    fn test_put_keeps_first_instance() {
        let registry = registry();
        let first = registry.put(Currency::from_descriptor(CurrencyDescriptor::new("Y", 1)).unwrap());
        let second = registry.put(Currency::from_descriptor(CurrencyDescriptor::new("Y", 4)).unwrap());
        assert!(Arc::ptr_eq(&first, &second));
        assert_eq!(second.precision(), 1);
    }

    #[test]
    fn test_registries_are_isolated() {
        let main = registry();
        let test = CurrencyRegistry::new(&NetworkConfig::testnet()).unwrap();
        main.create(CurrencyDescriptor::new("Z", 2)).unwrap();
        assert!(test.get("Z").is_none());
        assert!(test.is_empty());
    }
}
