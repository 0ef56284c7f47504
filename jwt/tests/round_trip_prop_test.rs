//! Round-trip properties over arbitrary claims objects

use proptest::prelude::*;
use serde_json::Value;
use tokn_jwt::{create, decode, Algorithm, Claims};

fn value_strategy() -> impl Strategy<Value = Value> {
    prop_oneof![
        Just(Value::Null),
        any::<bool>().prop_map(Value::from),
        any::<i64>().prop_map(Value::from),
        "[a-zA-Z0-9 ._-]{0,16}".prop_map(Value::from),
    ]
}

fn claims_strategy() -> impl Strategy<Value = Claims> {
    proptest::collection::vec(("[a-z_]{1,10}", value_strategy()), 0..8).prop_map(|entries| {
        let mut claims = Claims::new();
        for (key, value) in entries {
            claims.insert(key, value);
        }
        claims
    })
}

proptest! {
    #[test]
    fn prop_hs256_round_trip(
        claims in claims_strategy(),
        key in proptest::collection::vec(any::<u8>(), 1..64),
    ) {
        let token = create(&claims, Algorithm::HS256, Some(key.as_slice()), false).unwrap();
        let decoded = decode(&token, Algorithm::HS256, Some(key.as_slice()), false, false).unwrap();
        prop_assert_eq!(decoded, claims);
    }

    #[test]
    fn prop_unsigned_round_trip(claims in claims_strategy()) {
        let token = create(&claims, Algorithm::None, None, true).unwrap();
        prop_assert!(token.ends_with('.'));
        let decoded = decode(&token, Algorithm::None, None, true, false).unwrap();
        prop_assert_eq!(decoded, claims);
    }

    #[test]
    fn prop_token_survives_embedding(claims in claims_strategy(), key in proptest::collection::vec(any::<u8>(), 1..32)) {
        let token = create(&claims, Algorithm::HS256, Some(key.as_slice()), false).unwrap();
        let text = format!("before {token} after");
        let decoded = decode(&text, Algorithm::HS256, Some(key.as_slice()), false, true).unwrap();
        prop_assert_eq!(decoded, claims);
    }
}
