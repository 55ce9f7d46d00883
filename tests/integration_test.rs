use std::sync::Arc;
use wallet_core::*;

const GOLDEN_TIMESTAMP: i64 = 1_700_000_000_000;
const BTC_ID: &str = "8LQW8f7P5d5PZM7GtZEBgaqRPGSzS3DfPuiXrURJ4AJS";

fn golden_core() -> WalletCore {
    WalletCore::with_components(
        NetworkConfig::mainnet(),
        Arc::new(FixedClock(GOLDEN_TIMESTAMP)),
        Arc::new(UnavailableRandomSource),
    )
    .unwrap()
}

#[test]
fn test_zero_seed_identity_is_fixed() {
    let keys = KeyGenerator::default();
    let first = keys.identity(&[0u8; 32]);
    let second = keys.identity(&[0u8; 32]);

    assert_eq!(first, second);
    assert_eq!(first.key_pair.private_key, "G8QuAYHAnahhskDkJGHqYbSr4196uZyKdMeLXmq7hU1J");
    assert_eq!(first.key_pair.public_key, "Cm87JLDvXP1RBQLvJDVhbcYRJ9SvGgo6oxFHmPzyZuvx");
    assert_eq!(first.address, "3PJRdUNTtMfkdVr61JWtvZAaSVXmiuJwdrT");

    println!("OK: Zero seed identity test passed");
    println!("  Address: {}", first.address);
}

#[test]
fn test_every_flipped_address_byte_is_rejected() {
    let keys = KeyGenerator::default();
    let public: [u8; 32] = keys.key_pair(b"checksum").public_key_bytes().unwrap();
    let raw = build_raw_address(&public, 1, b'W');
    assert_eq!(raw, keys.raw_address(&public));
    assert!(keys.is_valid_address(&base58_encode(&raw)));

    for i in 0..ADDRESS_LENGTH {
        let mut flipped = raw;
        flipped[i] ^= 0x01;
        assert!(
            !keys.is_valid_address(&base58_encode(&flipped)),
            "flip at byte {} was accepted",
            i
        );
    }

    println!("OK: Address checksum sensitivity test passed");
}

#[test]
fn test_golden_asset_transfer() {
    let core = golden_core();
    let sender = core.identity(b"wallet core golden sender");
    let recipient = core.identity(b"wallet core golden recipient");
    assert_eq!(sender.key_pair.public_key, "ERnDRkcdRpqd2XTirj7E98pUU1PUSaFrEXCKF2yXDpZw");
    assert_eq!(recipient.address, "3PHcT3yxhJ8pWUro2D7TSDGbKtpcwkrKVYf");

    let request = TransferRequest {
        recipient: Some(recipient.address.clone()),
        amount: Some(core.money("1.23456789", BTC_ID).unwrap()),
        fee: Some(core.money("0.001", "").unwrap()),
        attachment: Some(b"golden".to_vec()),
        timestamp: None,
    };
    let signed = core.transfer(&sender.key_pair, request).unwrap();

    assert_eq!(
        hex::encode(&signed.bytes),
        "04c780fe4e357fec178319fabd07455f4c035b5c8095beff1e066b4a2069990712016cfa6affc5edaa8c0b\
         7fb52a93d2a20c2f8282db747a048c53fbfd131f73a0ff000000018bcfe5680000000000075bcd15000000\
         00000186a00157ac051757eae7d6712d0d4597501154bd3d0b02722e4af5dc0006676f6c64656e"
    );
    assert_eq!(signed.bytes.len(), 125);
    assert_eq!(signed.id, "Bc2g2o8kM8QBRZiBTNrzpp5kUHXN9f4SPkKsFEYbZwEx");
    assert_eq!(
        signed.signature,
        "2ap1y8ji1YbrFK45HjHdVZFuYsyMuiWixEzJkPwYqACaKkei8pHsKCi8X6jutae8An6QrBjG27oPpbbNfWwpHRWj"
    );

    assert_eq!(signed.kind, TransactionKind::Transfer);
    assert_eq!(signed.json["type"], 4);
    assert_eq!(signed.json["amount"], 123_456_789);
    assert_eq!(signed.json["fee"], 100_000);
    assert_eq!(signed.json["assetId"], BTC_ID);
    assert!(signed.json["feeAssetId"].is_null());
    assert_eq!(signed.json["timestamp"], GOLDEN_TIMESTAMP);
    assert_eq!(signed.json["attachment"], base58_encode(b"golden"));

    let public = sender.key_pair.public_key_bytes().unwrap();
    let raw: [u8; 64] = base58_decode(&signed.signature).unwrap().try_into().unwrap();
    assert!(verify(&public, &signed.bytes, &raw));

    println!("OK: Golden asset transfer test passed");
    println!("  Id: {}", signed.id);
}

#[test]
fn test_random_signatures_keep_id() {
    let core = WalletCore::new(NetworkConfig::mainnet()).unwrap();
    let sender = core.identity(b"wallet core golden sender");
    let request = || TransferRequest {
        recipient: Some(core.identity(b"wallet core golden recipient").address),
        amount: Some(core.money("1.23456789", BTC_ID).unwrap()),
        fee: Some(core.money("0.001", "").unwrap()),
        attachment: Some(b"golden".to_vec()),
        timestamp: Some(GOLDEN_TIMESTAMP),
    };
    let first = core.transfer(&sender.key_pair, request()).unwrap();
    let second = core.transfer(&sender.key_pair, request()).unwrap();

    assert_eq!(first.id, "Bc2g2o8kM8QBRZiBTNrzpp5kUHXN9f4SPkKsFEYbZwEx");
    assert_eq!(first.id, second.id);
    assert_ne!(first.signature, second.signature);

    println!("OK: Randomized signature test passed");
}

#[test]
fn test_registry_cached_and_uncached_instances() {
    let registry = CurrencyRegistry::new(&NetworkConfig::mainnet()).unwrap();
    let native_a = registry
        .create(CurrencyDescriptor::new("", 8).with_name("Native"))
        .unwrap();
    let native_b = registry
        .create(CurrencyDescriptor::new("", 8).with_name("Native"))
        .unwrap();
    assert!(!Arc::ptr_eq(&native_a, &native_b));

    let x_a = registry.create(CurrencyDescriptor::new("X", 2)).unwrap();
    let x_b = registry.create(CurrencyDescriptor::new("X", 2)).unwrap();
    assert!(Arc::ptr_eq(&x_a, &x_b));

    println!("OK: Registry caching test passed");
}

#[test]
fn test_wrong_password_yields_none() {
    let seed = b"wallet seed for storage";
    let encrypted = encrypt_wallet_seed(seed, "pw1", &OsRandomSource).unwrap();

    assert!(decrypt_wallet_seed(&encrypted.cipher, "pw2", &encrypted.checksum).is_none());
    assert_eq!(
        decrypt_wallet_seed(&encrypted.cipher, "pw1", &encrypted.checksum).unwrap(),
        seed.to_vec()
    );
    assert_eq!(encrypted.checksum, seed_checksum(seed));

    println!("OK: Seed cipher test passed");
}

#[test]
fn test_order_and_cancel() {
    let core = golden_core();
    let sender = core.identity(b"trader");
    let matcher = core.identity(b"matcher");
    let pair = core.asset_pair("", "Ft8X1v1LTa1ABafufpaCWyVj8KkaxUWE6xBhW6sNFJck").unwrap();

    let request = OrderRequest {
        matcher_public_key: Some(matcher.key_pair.public_key.clone()),
        order_type: Some(OrderType::Buy),
        price: Some(OrderPrice::from_tokens("1.57".parse().unwrap(), pair).unwrap()),
        amount: Some(core.money("3", "").unwrap()),
        matcher_fee: Some(core.money("0.003", "").unwrap()),
        timestamp: None,
        expiration: None,
    };
    let order = core.order(&sender.key_pair, request).unwrap();
    assert_eq!(order.json["price"], 157);
    assert_eq!(order.json["orderType"], "buy");
    assert_eq!(order.json["amount"], 300_000_000);
    assert_eq!(order.json["timestamp"], GOLDEN_TIMESTAMP);
    assert_eq!(order.json["expiration"], GOLDEN_TIMESTAMP + 20 * 24 * 60 * 60 * 1000);
    assert_eq!(
        order.json["assetPair"]["priceAsset"],
        "Ft8X1v1LTa1ABafufpaCWyVj8KkaxUWE6xBhW6sNFJck"
    );
    assert_eq!(order.id, transaction_id(&order.bytes));

    let cancel = core.cancel_order(&sender.key_pair, &order.id).unwrap();
    assert_eq!(cancel.json["orderId"], order.id);
    assert_eq!(cancel.json["sender"], sender.key_pair.public_key);

    println!("OK: Order and cancel test passed");
}

#[test]
fn test_issue_reissue_burn_flow() {
    let core = golden_core();
    let sender = core.identity(b"issuer").key_pair;

    let issued = core
        .issue(
            &sender,
            IssueRequest {
                name: Some("Token".to_string()),
                description: Some("test token".to_string()),
                quantity: Some("1000".parse().unwrap()),
                decimals: Some(2),
                reissuable: true,
                fee: Some(core.money("1", "").unwrap()),
                timestamp: None,
            },
        )
        .unwrap();
    assert_eq!(issued.json["quantity"], 100_000);
    assert_eq!(issued.json["decimals"], 2);

    // The issue id becomes the asset id
    let token = core
        .registry()
        .create(CurrencyDescriptor::new(issued.id.clone(), 2).with_name("Token"))
        .unwrap();
    let reissued = core
        .reissue(
            &sender,
            ReissueRequest {
                quantity: Some(Money::from_tokens("5", Arc::clone(&token)).unwrap()),
                reissuable: false,
                fee: Some(core.money("1", "").unwrap()),
                timestamp: None,
            },
        )
        .unwrap();
    assert_eq!(reissued.json["assetId"], issued.id);
    assert_eq!(reissued.json["quantity"], 500);

    let burned = core
        .burn(
            &sender,
            BurnRequest {
                amount: Some(Money::from_tokens("0.5", token).unwrap()),
                fee: Some(core.money("0.001", "").unwrap()),
                timestamp: None,
            },
        )
        .unwrap();
    assert_eq!(burned.json["quantity"], 50);
    assert_eq!(burned.kind.type_byte(), 6);

    println!("OK: Issue, reissue and burn flow test passed");
}
