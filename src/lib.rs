//! # tagwire
//!
//! Bidirectional codec between native values and the tagged attribute
//! representation used by key-value service APIs (`{"S": ...}`, `{"N": ...}`,
//! `{"M": {...}}` and friends).
//!
//! ## Quick Start
//!
//! ```
//! use tagwire::prelude::*;
//!
//! let codec = Codec::new();
//!
//! // Native value -> wire
//! let doc = Value::map([("id", Value::Int(7)), ("tags", Value::set(["a", "b"]))]);
//! let item = codec.encode_item(&doc).unwrap();
//! assert_eq!(item["id"], AttributeValue::N("7".to_string()));
//!
//! // Wire -> native value
//! assert_eq!(codec.decode_item(&item).unwrap(), doc);
//! ```
//!
//! ## Records
//!
//! Describe a record type once with [`RecordSchema`] and decode straight into
//! it: declared fields are filled from the document or their defaults,
//! undeclared keys are dropped, and an optional post-decode hook finishes the
//! job. Implement [`Model`] to bridge records and your own structs.
//!
//! ## Crates
//!
//! - `tagwire-core` - [`Value`], [`AttributeValue`], record schemas
//! - `tagwire-wire` - the encoder and decoder

#![warn(missing_docs)]

mod codec;
mod error;

pub mod prelude;

// Re-export main entry points
pub use codec::{Codec, CodecBuilder};
pub use error::{Error, Result};

// Re-export data models
pub use tagwire_core::{
    AttributeValue, Item, Model, PostDecodeHook, Record, RecordError, RecordSchema, Tag, Value,
    WireFormatError,
};

// Re-export the codec functions for callers that don't need a Codec
pub use tagwire_wire::{
    decode, decode_item, decode_model, decode_value, encode, encode_item, encode_model,
    from_json_str, item_from_json_str, item_to_json_string, to_json_string, DecodeError,
    DecodeOptions, EncodeError,
};
