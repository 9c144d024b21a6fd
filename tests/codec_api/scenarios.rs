//! Canonical encode/decode examples

use std::collections::HashSet;
use tagwire::prelude::*;
use tagwire::EncodeError;

fn n(s: &str) -> AttributeValue {
    AttributeValue::N(s.to_string())
}

#[test]
fn test_encode_integer() {
    assert_eq!(Codec::new().encode(&Value::Int(34)).unwrap(), n("34"));
}

#[test]
fn test_encode_fraction() {
    assert_eq!(Codec::new().encode(&Value::Float(0.4)).unwrap(), n("0.4"));
}

#[test]
fn test_encode_heterogeneous_list() {
    let value = Value::List(vec!["foo".into(), Value::Int(1)]);
    assert_eq!(
        Codec::new().encode(&value).unwrap(),
        AttributeValue::L(vec![AttributeValue::S("foo".into()), n("1")])
    );
}

#[test]
fn test_decode_number_set() {
    let attr = AttributeValue::Ns(vec!["1".into(), "2".into(), "3".into()]);
    assert_eq!(Codec::new().decode(&attr).unwrap(), Value::set([1i64, 2, 3]));
}

#[test]
fn test_encode_null() {
    assert_eq!(Codec::new().encode(&Value::Null).unwrap(), AttributeValue::Null);
}

#[test]
fn test_encode_mixed_set_fails() {
    let err = Codec::new()
        .encode(&Value::set([Value::Int(1), Value::from("A")]))
        .unwrap_err();
    assert!(err.is_unrepresentable());
    assert!(matches!(err, Error::Encode(EncodeError::MixedSet { .. })));
}

#[test]
fn test_encode_empty_set_fails() {
    let err = Codec::new().encode(&Value::Set(HashSet::new())).unwrap_err();
    assert!(matches!(err, Error::Encode(EncodeError::EmptySet)));
}

#[test]
fn test_empty_set_inside_document_fails_whole_document() {
    let doc = Value::map([("ok", Value::Int(1)), ("bad", Value::Set(HashSet::new()))]);
    assert!(Codec::new().encode_item(&doc).is_err());
}

#[test]
fn test_integral_float_collapses_to_int() {
    let codec = Codec::new();
    let attr = codec.encode(&Value::Float(23.0)).unwrap();
    assert_eq!(attr, n("23"));
    assert_eq!(codec.decode(&attr).unwrap(), Value::Int(23));
}

#[test]
fn test_reserved_key_document_round_trips() {
    let codec = Codec::new();
    let doc = Value::map([
        ("N", Value::from("not a number")),
        ("BOOL", Value::Int(0)),
        ("M", Value::map([("S", Value::Null)])),
    ]);
    let item = codec.encode_item(&doc).unwrap();
    assert_eq!(codec.decode_item(&item).unwrap(), doc);
}

#[test]
fn test_free_functions_match_codec() {
    let value = Value::map([("k", Value::set(["x"]))]);
    assert_eq!(
        tagwire::encode(&value).unwrap(),
        Codec::new().encode(&value).unwrap()
    );
}
