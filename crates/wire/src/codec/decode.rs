//! Decoding tagged attribute values into native values
//!
//! Dispatch is by tag:
//! - `S`, `BOOL`, `NULL` map directly
//! - `N` / `NS` go through numeric parsing (see [`parse_number`])
//! - `B` / `BS` are base64-decoded
//! - `L` / `M` recurse
//!
//! With a target schema in [`DecodeOptions`], the root `M` is decoded into a
//! generic map and then coerced onto the schema as a [`Record`].

use super::number::parse_number;
use base64::Engine;
use std::collections::{BTreeMap, HashMap, HashSet};
use std::sync::Arc;
use tagwire_core::{
    AttributeValue, Item, Model, Record, RecordError, RecordSchema, Tag, Value, WireFormatError,
};
use thiserror::Error;
use tracing::trace;

/// Decode error types
#[derive(Debug, Error, PartialEq)]
pub enum DecodeError {
    /// Invalid JSON syntax
    #[error("Invalid JSON: {0}")]
    InvalidJson(String),

    /// JSON is well-formed but not an attribute value
    #[error(transparent)]
    Format(#[from] WireFormatError),

    /// Invalid base64 under `B` or `BS`
    #[error("Invalid base64 in {tag}: {reason}")]
    InvalidBase64 {
        /// Tag carrying the payload
        tag: Tag,
        /// Decoder message
        reason: String,
    },

    /// Invalid number format under `N` or `NS`
    #[error("Invalid number: {0}")]
    InvalidNumber(String),

    /// Record coercion needs an `M` at the root
    #[error("expected M at the record root, got {0}")]
    ExpectedMap(Tag),

    /// Record construction or post-decode hook failed
    #[error(transparent)]
    Record(#[from] RecordError),
}

impl DecodeError {
    /// Whether the input itself was malformed, as opposed to a record hook failing
    pub fn is_malformed(&self) -> bool {
        !matches!(self, DecodeError::Record(_))
    }
}

/// Decode options
#[derive(Debug, Clone, Default)]
pub struct DecodeOptions {
    schema: Option<Arc<RecordSchema>>,
}

impl DecodeOptions {
    /// Generic decoding, no target schema
    pub fn new() -> Self {
        Self::default()
    }

    /// Coerce the decoded root onto `schema`
    pub fn with_schema(mut self, schema: Arc<RecordSchema>) -> Self {
        self.schema = Some(schema);
        self
    }

    /// The target schema, if any
    pub fn schema(&self) -> Option<&Arc<RecordSchema>> {
        self.schema.as_ref()
    }
}

/// Decode an attribute value
///
/// Without a schema the result is the structural decode. With one, `attr`
/// must be an `M` and the result is a [`Value::Record`].
pub fn decode(attr: &AttributeValue, options: &DecodeOptions) -> Result<Value, DecodeError> {
    match options.schema() {
        None => decode_value(attr),
        Some(schema) => match attr {
            AttributeValue::M(map) => decode_record(map, schema).map(Value::Record),
            other => Err(DecodeError::ExpectedMap(other.tag())),
        },
    }
}

/// Decode a root document as if it were wrapped in `M`
pub fn decode_item(item: &Item, options: &DecodeOptions) -> Result<Value, DecodeError> {
    match options.schema() {
        None => decode_map(item).map(Value::Map),
        Some(schema) => decode_record(item, schema).map(Value::Record),
    }
}

/// Decode a root document into a typed model
pub fn decode_model<T: Model>(item: &Item) -> Result<T, DecodeError> {
    let record = decode_record(item, &T::schema())?;
    Ok(T::from_record(record)?)
}

/// Decode a map and coerce it onto `schema`, running the post-decode hook
pub fn decode_record(
    map: &BTreeMap<String, AttributeValue>,
    schema: &Arc<RecordSchema>,
) -> Result<Record, DecodeError> {
    let decoded = decode_map(map)?;
    trace!(
        "coercing {} keys onto {} (post-decode hook: {})",
        decoded.len(),
        schema.name(),
        schema.has_post_decode()
    );
    let record = Record::coerce(decoded, Arc::clone(schema));
    Ok(schema.run_post_decode(record)?)
}

/// Structural decode, no schema
pub fn decode_value(attr: &AttributeValue) -> Result<Value, DecodeError> {
    match attr {
        AttributeValue::Bool(b) => Ok(Value::Bool(*b)),
        AttributeValue::Null => Ok(Value::Null),
        AttributeValue::B(b64) => decode_base64(Tag::Binary, b64).map(Value::Bytes),
        AttributeValue::S(s) => Ok(Value::String(s.clone())),
        AttributeValue::Ss(members) => Ok(Value::Set(
            members.iter().cloned().map(Value::String).collect(),
        )),
        AttributeValue::Bs(members) => members
            .iter()
            .map(|b64| decode_base64(Tag::BinarySet, b64).map(Value::Bytes))
            .collect::<Result<HashSet<_>, _>>()
            .map(Value::Set),
        AttributeValue::M(map) => decode_map(map).map(Value::Map),
        AttributeValue::Ns(members) => members
            .iter()
            .map(|text| parse_number(text))
            .collect::<Result<HashSet<_>, _>>()
            .map(Value::Set),
        AttributeValue::L(items) => items
            .iter()
            .map(decode_value)
            .collect::<Result<_, _>>()
            .map(Value::List),
        AttributeValue::N(text) => parse_number(text),
    }
}

fn decode_map(map: &BTreeMap<String, AttributeValue>) -> Result<HashMap<String, Value>, DecodeError> {
    map.iter()
        .map(|(k, v)| decode_value(v).map(|value| (k.clone(), value)))
        .collect()
}

fn decode_base64(tag: Tag, b64: &str) -> Result<Vec<u8>, DecodeError> {
    base64::engine::general_purpose::STANDARD
        .decode(b64)
        .map_err(|e| DecodeError::InvalidBase64 {
            tag,
            reason: e.to_string(),
        })
}
