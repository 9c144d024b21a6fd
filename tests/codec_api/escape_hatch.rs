//! Pre-tagged values passed through the encoder

use std::collections::BTreeMap;
use tagwire::prelude::*;

#[test]
fn test_tagged_value_returned_verbatim() {
    let raw = AttributeValue::Ns(vec!["10".into(), "5".into()]);
    assert_eq!(Codec::new().encode(&Value::Tagged(raw.clone())).unwrap(), raw);
}

#[test]
fn test_tagged_value_in_document_with_inferred_siblings() {
    // Force a numeric-looking string to stay a string
    let doc = Value::map([
        ("zip", Value::Tagged(AttributeValue::S("02134".into()))),
        ("count", Value::Int(2134)),
        ("label", Value::from("02134")),
    ]);
    let item = Codec::new().encode_item(&doc).unwrap();

    assert_eq!(item["zip"], AttributeValue::S("02134".into()));
    assert_eq!(item["count"], AttributeValue::N("2134".into()));
    assert_eq!(item["label"], AttributeValue::S("02134".into()));
}

#[test]
fn test_tagged_map_as_document_root() {
    let mut root = BTreeMap::new();
    root.insert("pk".to_string(), AttributeValue::S("user#1".into()));
    let item = Codec::new()
        .encode_item(&Value::Tagged(AttributeValue::M(root.clone())))
        .unwrap();
    assert_eq!(item, root);
}

#[test]
fn test_tagged_value_decodes_structurally() {
    let codec = Codec::new();
    let attr = codec
        .encode(&Value::Tagged(AttributeValue::Bool(true)))
        .unwrap();
    assert_eq!(codec.decode(&attr).unwrap(), Value::Bool(true));
}
