//! Attribute value codec
//!
//! - [`encode`] / [`encode_item`]: native values to attribute values
//! - [`decode`] / [`decode_item`]: attribute values to native values
//! - JSON text helpers for handing wire values to and from a transport

mod decode;
mod encode;
mod number;

pub use decode::{
    decode, decode_item, decode_model, decode_record, decode_value, DecodeError, DecodeOptions,
};
pub use encode::{encode, encode_item, encode_model, EncodeError};
pub use number::{format_float, format_int, parse_number};

use serde_json::Value as Json;
use tagwire_core::{AttributeValue, Item, WireFormatError};

/// Render an attribute value as JSON text
pub fn to_json_string(attr: &AttributeValue) -> String {
    attr.to_json().to_string()
}

/// Parse JSON text into an attribute value, applying the lenient-input rules
pub fn from_json_str(json: &str) -> Result<AttributeValue, DecodeError> {
    let parsed: Json =
        serde_json::from_str(json).map_err(|e| DecodeError::InvalidJson(e.to_string()))?;
    Ok(AttributeValue::from_json(parsed)?)
}

/// Render a root document as JSON text
pub fn item_to_json_string(item: &Item) -> String {
    let object: serde_json::Map<String, Json> = item
        .iter()
        .map(|(k, v)| (k.clone(), v.to_json()))
        .collect();
    Json::Object(object).to_string()
}

/// Parse JSON text into a root document
pub fn item_from_json_str(json: &str) -> Result<Item, DecodeError> {
    let parsed: Json =
        serde_json::from_str(json).map_err(|e| DecodeError::InvalidJson(e.to_string()))?;
    match parsed {
        Json::Object(entries) => entries
            .into_iter()
            .map(|(k, v)| {
                AttributeValue::from_json(v)
                    .map(|attr| (k, attr))
                    .map_err(DecodeError::from)
            })
            .collect(),
        Json::Array(_) => Err(WireFormatError::NotAnObject("array").into()),
        _ => Err(WireFormatError::NotAnObject("scalar").into()),
    }
}
