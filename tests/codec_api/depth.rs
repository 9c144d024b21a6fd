//! Nesting limit configured through the builder

use proptest::prelude::*;
use tagwire::{Codec, Value};

fn leaf() -> impl Strategy<Value = Value> {
    prop_oneof![
        Just(Value::Null),
        any::<i64>().prop_map(Value::Int),
        "[a-z]{0,6}".prop_map(Value::from),
    ]
}

fn nested() -> impl Strategy<Value = Value> {
    leaf().prop_recursive(8, 64, 4, |inner| {
        prop_oneof![
            prop::collection::vec(inner.clone(), 0..4).prop_map(Value::List),
            prop::collection::hash_map("[a-z]{1,3}", inner, 0..4).prop_map(Value::Map),
        ]
    })
}

/// Levels in `value`: scalars are one, each list or map adds one
fn depth(value: &Value) -> usize {
    match value {
        Value::List(items) => 1 + items.iter().map(depth).max().unwrap_or(0),
        Value::Map(map) => 1 + map.values().map(depth).max().unwrap_or(0),
        _ => 1,
    }
}

proptest! {
    #[test]
    fn prop_encode_accepts_exactly_values_within_limit(value in nested(), limit in 1usize..10) {
        let codec = Codec::builder().max_depth(limit).build();
        match codec.encode(&value) {
            Ok(_) => prop_assert!(depth(&value) <= limit),
            Err(err) => {
                prop_assert!(err.is_depth_exceeded());
                prop_assert!(depth(&value) > limit);
            }
        }
    }

    #[test]
    fn prop_decode_applies_same_limit(value in nested(), limit in 1usize..10) {
        let attr = Codec::new().encode(&value).unwrap();
        let codec = Codec::builder().max_depth(limit).build();
        prop_assert_eq!(codec.decode(&attr).is_ok(), depth(&value) <= limit);
    }
}

#[test]
fn test_unlimited_codec_accepts_deep_values() {
    let mut value = Value::Int(1);
    for _ in 0..100 {
        value = Value::List(vec![value]);
    }
    assert!(Codec::new().encode(&value).is_ok());
    assert!(Codec::builder().max_depth(100).build().encode(&value).is_err());
    assert!(Codec::builder().max_depth(101).build().encode(&value).is_ok());
}
