use std::sync::Arc;

use proptest::prelude::*;
use rust_decimal::Decimal;
use wallet_core::*;

fn currency(id: &str, precision: u32) -> Arc<Currency> {
    Arc::new(Currency::from_descriptor(CurrencyDescriptor::new(id, precision).with_name(id)).unwrap())
}

fn amount(mantissa: i64, scale: u32) -> Amount {
    Amount::from_decimal(Decimal::new(mantissa, scale))
}

proptest! {
    #[test]
    fn prop_coins_round_trip(mantissa in -10_000_000_000i64..10_000_000_000, scale in 0u32..12, precision in 0u32..=8) {
        let c = currency("P", precision);
        let value = amount(mantissa, scale);
        let money = Money::new(value, Arc::clone(&c)).unwrap();
        let back = Money::from_coins(money.to_coins(), c);
        prop_assert_eq!(back.to_tokens(), value.truncate(precision));
    }

    #[test]
    fn prop_plus_minus_is_identity(a in -1_000_000_000_000i64..1_000_000_000_000, b in -1_000_000_000_000i64..1_000_000_000_000, precision in 0u32..=8) {
        let c = currency("P", precision);
        let x = Money::from_coins(a, Arc::clone(&c));
        let y = Money::from_coins(b, c);
        prop_assert_eq!(x.plus(&y).unwrap().minus(&y).unwrap(), x);
    }

    #[test]
    fn prop_mixed_currencies_rejected(a in 0i64..1_000_000, b in 0i64..1_000_000) {
        let x = Money::from_coins(a, currency("A", 2));
        let y = Money::from_coins(b, currency("B", 2));
        prop_assert!(matches!(x.plus(&y), Err(WalletError::CurrencyMismatch { .. })), "plus across currencies");
        prop_assert!(matches!(x.minus(&y), Err(WalletError::CurrencyMismatch { .. })), "minus across currencies");
    }

    #[test]
    fn prop_order_price_round_trip(
        amount_precision in prop::sample::select(vec![0u32, 2, 8]),
        price_precision in prop::sample::select(vec![0u32, 2, 8]),
        mantissa in 1i64..10_000_000_000,
    ) {
        let pair = AssetPair::new(currency("A", amount_precision), currency("P", price_precision));
        let price = amount(mantissa, price_precision);
        let order_price = OrderPrice::from_tokens(price, pair.clone()).unwrap();
        let back = OrderPrice::from_backend_price(order_price.to_backend_price(), pair).unwrap();
        prop_assert_eq!(back.to_tokens(), price);
    }

    #[test]
    fn prop_key_pair_deterministic(seed in prop::collection::vec(any::<u8>(), 0..64)) {
        let keys = KeyGenerator::default();
        let first = keys.identity(&seed);
        prop_assert_eq!(&first, &keys.identity(&seed));
        prop_assert!(first.key_pair.validate().is_ok());
        prop_assert!(keys.is_valid_address(&first.address));
    }

    #[test]
    fn prop_signatures_verify(seed in prop::collection::vec(any::<u8>(), 1..32), message in prop::collection::vec(any::<u8>(), 0..256)) {
        let pair = KeyGenerator::default().key_pair(&seed);
        let public = pair.public_key_bytes().unwrap();
        let private = pair.private_key_bytes().unwrap();
        prop_assert!(verify(&public, &message, &sign_deterministic(&private, &message)));
        prop_assert!(verify(&public, &message, &sign(&private, &message, &OsRandomSource)));
    }
}
