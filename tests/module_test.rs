// Cross-module tests through the public API
use std::sync::Arc;
use wallet_core::*;

fn core() -> WalletCore {
    WalletCore::with_components(
        NetworkConfig::mainnet(),
        Arc::new(FixedClock(1_650_000_000_000)),
        Arc::new(FixedRandomSource::new(vec![0x5a])),
    )
    .unwrap()
}

#[test]
fn test_all_modules_loaded() {
    let core = core();
    let phrase = core.generate_seed_phrase(DEFAULT_SEED_WORDS).unwrap();
    assert!(is_standard_seed_phrase(&phrase));
    let identity = core.identity(phrase.as_bytes());
    assert!(core.keys().is_valid_address(&identity.address));
    assert_eq!(core.native().short_name(), "WAVES");

    println!("OK: All modules loaded successfully");
}

#[test]
fn test_error_handling() {
    assert!(matches!("abc".parse::<Amount>(), Err(WalletError::Parse(_))));
    assert!(matches!(
        Money::from_tokens("1", core().native()).unwrap().multiply(f64::NAN),
        Err(WalletError::Argument(_))
    ));
    assert!(matches!(
        Currency::from_descriptor(CurrencyDescriptor::default()),
        Err(WalletError::Validation(_))
    ));
    assert!(matches!(
        "moonnet".parse::<Network>(),
        Err(WalletError::Config(_))
    ));

    println!("OK: Error handling test passed");
}

#[test]
fn test_decimal_rendering_avoids_exponents() {
    let tiny: Amount = "0.00000001".parse().unwrap();
    assert_eq!(tiny.to_fixed(8, RoundingMode::HalfUp), "0.00000001");
    let parsed: Amount = "1e-8".parse().unwrap();
    assert_eq!(parsed, tiny);
    let value: Amount = "-2.5".parse().unwrap();
    assert_eq!(value.truncate(0), "-3".parse().unwrap());
    assert_eq!(value.round(0, RoundingMode::HalfUp), "-3".parse().unwrap());
    assert_eq!(value.round(0, RoundingMode::HalfEven), "-2".parse().unwrap());

    println!("OK: Decimal rendering test passed");
}

#[test]
fn test_lease_alias_and_mass_transfer() {
    let core = core();
    let sender = core.identity(b"lessor").key_pair;
    let node = core.identity(b"node").address;

    let lease = core
        .lease(
            &sender,
            LeaseRequest {
                recipient: Some(node.clone()),
                amount: Some(core.money("1000", "").unwrap()),
                fee: Some(core.money("0.001", "").unwrap()),
                timestamp: None,
            },
        )
        .unwrap();
    assert_eq!(lease.json["recipient"], node);

    let cancel = core
        .cancel_lease(
            &sender,
            CancelLeaseRequest {
                lease_id: Some(lease.id.clone()),
                fee: Some(core.money("0.001", "").unwrap()),
                timestamp: None,
            },
        )
        .unwrap();
    assert_eq!(cancel.json["leaseId"], lease.id);

    let alias = core
        .create_alias(
            &sender,
            CreateAliasRequest {
                alias: Some("lessor".to_string()),
                fee: Some(core.money("0.001", "").unwrap()),
                timestamp: None,
            },
        )
        .unwrap();
    assert_eq!(alias.kind, TransactionKind::CreateAlias);

    let usd = core.currency("Ft8X1v1LTa1ABafufpaCWyVj8KkaxUWE6xBhW6sNFJck").unwrap();
    let mass = core
        .mass_transfer(
            &sender,
            MassTransferRequest {
                transfers: vec![
                    MassTransferItem {
                        recipient: node.clone(),
                        amount: Money::from_tokens("1.5", Arc::clone(&usd)).unwrap(),
                    },
                    MassTransferItem {
                        recipient: "alias:W:lessor".to_string(),
                        amount: Money::from_tokens("2.25", usd).unwrap(),
                    },
                ],
                fee: Some(core.money("0.002", "").unwrap()),
                attachment: None,
                timestamp: None,
            },
        )
        .unwrap();
    assert_eq!(mass.json["transfers"][0]["amount"], 150);
    assert_eq!(mass.json["transfers"][1]["recipient"], "alias:W:lessor");
    assert_eq!(mass.json["version"], 1);

    println!("OK: Lease, alias and mass transfer test passed");
}

#[test]
fn test_payment() {
    let core = core();
    let sender = core.identity(b"payer").key_pair;
    let signed = core
        .payment(
            &sender,
            PaymentRequest {
                recipient: Some(core.identity(b"payee").address),
                amount: Some(core.money("0.5", "").unwrap()),
                fee: Some(core.money("0.001", "").unwrap()),
                timestamp: None,
            },
        )
        .unwrap();
    assert_eq!(signed.bytes[0], 2);
    assert_eq!(signed.json["amount"], 50_000_000);
    assert_eq!(signed.json["timestamp"], 1_650_000_000_000i64);

    println!("OK: Payment test passed");
}

#[test]
fn test_fixed_random_source_makes_signatures_reproducible() {
    let core = core();
    let sender = core.identity(b"payer").key_pair;
    let sign = || {
        core.transfer(
            &sender,
            TransferRequest {
                recipient: Some(core.identity(b"payee").address),
                amount: Some(core.money("1", "").unwrap()),
                fee: Some(core.money("0.001", "").unwrap()),
                ..TransferRequest::default()
            },
        )
        .unwrap()
    };
    let first = sign();
    let second = sign();
    assert_eq!(first.signature, second.signature);

    let private = sender.private_key_bytes().unwrap();
    assert_ne!(first.signature, build_signature(&first.bytes, &private, &UnavailableRandomSource));

    println!("OK: Fixed random source test passed");
}

#[test]
fn test_config_file_round_trip() {
    let path = std::env::temp_dir().join(format!("wallet-core-config-{}.json", std::process::id()));
    let json = serde_json::to_string(&NetworkConfig::testnet()).unwrap();
    std::fs::write(&path, json).unwrap();

    let loaded = NetworkConfig::from_file(&path).unwrap();
    assert_eq!(loaded, NetworkConfig::testnet());
    std::fs::remove_file(&path).unwrap();

    assert!(matches!(
        NetworkConfig::from_file("/nonexistent/wallet.json"),
        Err(WalletError::Config(_))
    ));

    println!("OK: Config file test passed");
}
