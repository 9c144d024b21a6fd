//! JSON text as it arrives from and leaves for the service

use std::collections::HashSet;
use tagwire::prelude::*;
use tagwire::{item_from_json_str, item_to_json_string};

const RESPONSE: &str = r#"{
    "pk": {"S": "user#42"},
    "age": {"N": "36"},
    "score": {"N": 99.5},
    "active": {"BOOL": "true"},
    "deleted": {"NULL": true},
    "roles": {"SS": ["admin", "dev"]},
    "avatar": {"B": "iVBORw=="},
    "history": {"L": [{"N": "1"}, {"M": {"at": {"S": "2024-01-01"}}}]}
}"#;

#[test]
fn test_decode_service_response() {
    super::init_tracing();
    let item = item_from_json_str(RESPONSE).unwrap();
    let doc = Codec::new().decode_item(&item).unwrap();
    let map = doc.as_map().unwrap();

    assert_eq!(map["pk"], Value::from("user#42"));
    assert_eq!(map["age"], Value::Int(36));
    assert_eq!(map["score"], Value::Float(99.5));
    assert_eq!(map["active"], Value::Bool(true));
    assert_eq!(map["deleted"], Value::Null);
    assert_eq!(map["roles"], Value::set(["admin", "dev"]));
    assert_eq!(map["avatar"], Value::Bytes(vec![0x89, 0x50, 0x4e, 0x47]));
    assert_eq!(
        map["history"],
        Value::List(vec![
            Value::Int(1),
            Value::map([("at", Value::from("2024-01-01"))]),
        ])
    );
}

#[test]
fn test_lenient_tokens_are_not_produced() {
    let item = item_from_json_str(RESPONSE).unwrap();
    let codec = Codec::new();
    let doc = codec.decode_item(&item).unwrap();
    let reencoded = item_to_json_string(&codec.encode_item(&doc).unwrap());

    let json: serde_json::Value = serde_json::from_str(&reencoded).unwrap();
    assert_eq!(json["active"], serde_json::json!({"BOOL": true}));
    assert_eq!(json["score"], serde_json::json!({"N": "99.5"}));
}

#[test]
fn test_request_document_json() {
    let doc = Value::map([
        ("pk", Value::from("user#1")),
        ("tags", Value::Set(HashSet::from([Value::from("b"), Value::from("a")]))),
    ]);
    let item = Codec::new().encode_item(&doc).unwrap();
    assert_eq!(
        item_to_json_string(&item),
        r#"{"pk":{"S":"user#1"},"tags":{"SS":["a","b"]}}"#
    );
}

#[test]
fn test_malformed_response_is_rejected() {
    let bad = [
        r#"{"pk": {"S": "x", "N": "1"}}"#,
        r#"{"pk": {"X": "x"}}"#,
        r#"{"pk": "x"}"#,
        r#"{"pk": {"NULL": false}}"#,
    ];
    for json in bad {
        let err: Error = item_from_json_str(json).unwrap_err().into();
        assert!(err.is_malformed(), "{}", json);
    }
}

#[test]
fn test_bad_payload_surfaces_on_decode() {
    let item = item_from_json_str(r#"{"n": {"N": "12abc"}}"#).unwrap();
    let err = Codec::new().decode_item(&item).unwrap_err();
    assert!(err.is_malformed());
}
