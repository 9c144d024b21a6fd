//! Wire codec for tagwire
//!
//! This crate translates between native [`Value`](tagwire_core::Value)s and
//! the tagged [`AttributeValue`](tagwire_core::AttributeValue) representation
//! used by the key-value service API.
//!
//! ## Encoding Rules
//!
//! | Value | Wire |
//! |-------|------|
//! | Tagged(attr) | `attr`, verbatim |
//! | Record | `{"M": {...}}`, excluded fields removed |
//! | Null | `{"NULL": true}` |
//! | Bool | `{"BOOL": b}` |
//! | Int / Float | `{"N": "<decimal>"}` |
//! | Map | `{"M": {...}}` |
//! | String | `{"S": "..."}` |
//! | Bytes | `{"B": "<base64>"}` |
//! | List | `{"L": [...]}` |
//! | Set | `NS`, `SS` or `BS` by member type |
//!
//! ## Examples
//!
//! ```
//! use tagwire_wire::{decode, encode, DecodeOptions};
//! use tagwire_core::{AttributeValue, Value};
//!
//! let attr = encode(&Value::Int(34)).unwrap();
//! assert_eq!(attr, AttributeValue::N("34".to_string()));
//!
//! let decoded = decode(&attr, &DecodeOptions::new()).unwrap();
//! assert_eq!(decoded, Value::Int(34));
//! ```

#![warn(missing_docs)]
#![warn(clippy::all)]

pub mod codec;

// Re-export main types
pub use codec::{
    decode, decode_item, decode_model, decode_record, decode_value, encode, encode_item,
    encode_model, format_float, format_int, from_json_str, item_from_json_str,
    item_to_json_string, parse_number, to_json_string, DecodeError, DecodeOptions, EncodeError,
};
