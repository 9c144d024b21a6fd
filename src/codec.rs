//! Main codec entry point for tagwire.
//!
//! This module provides the `Codec` struct, which bundles the encoder and
//! decoder with the caller's configuration: a default target schema for
//! decoding and an optional nesting limit.

use crate::error::{Error, Result};
use std::sync::Arc;
use tagwire_core::{AttributeValue, Item, Model, RecordSchema, Value};
use tagwire_wire::DecodeOptions;
use tracing::trace;

/// The tagwire codec.
///
/// Codecs hold no mutable state; share one freely across threads.
///
/// # Example
///
/// ```
/// use tagwire::prelude::*;
///
/// let codec = Codec::new();
/// let attr = codec.encode(&Value::from("hello")).unwrap();
/// assert_eq!(attr, AttributeValue::S("hello".to_string()));
/// assert_eq!(codec.decode(&attr).unwrap(), Value::from("hello"));
/// ```
#[derive(Debug, Clone, Default)]
pub struct Codec {
    options: DecodeOptions,
    max_depth: Option<usize>,
}

impl Codec {
    /// Create a codec with default settings: no schema, no depth limit.
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a builder for codec configuration.
    pub fn builder() -> CodecBuilder {
        CodecBuilder::new()
    }

    /// The decode options applied by [`decode`](Self::decode) and
    /// [`decode_item`](Self::decode_item).
    pub fn options(&self) -> &DecodeOptions {
        &self.options
    }

    /// The configured nesting limit, if any.
    pub fn max_depth(&self) -> Option<usize> {
        self.max_depth
    }

    /// Encode a value.
    pub fn encode(&self, value: &Value) -> Result<AttributeValue> {
        trace!("encoding {}", value.type_name());
        self.check_value(value)?;
        Ok(tagwire_wire::encode(value)?)
    }

    /// Encode a map or record as a root document.
    pub fn encode_item(&self, value: &Value) -> Result<Item> {
        trace!("encoding root {}", value.type_name());
        self.check_value(value)?;
        Ok(tagwire_wire::encode_item(value)?)
    }

    /// Encode a typed model as a root document.
    pub fn encode_model<T: Model>(&self, model: &T) -> Result<Item> {
        self.encode_item(&Value::Record(model.to_record()))
    }

    /// Encode a value straight to JSON text.
    pub fn encode_json(&self, value: &Value) -> Result<String> {
        Ok(tagwire_wire::to_json_string(&self.encode(value)?))
    }

    /// Decode with the codec's configured options.
    pub fn decode(&self, attr: &AttributeValue) -> Result<Value> {
        self.decode_with(attr, &self.options)
    }

    /// Decode with explicit options, ignoring the configured schema.
    pub fn decode_with(&self, attr: &AttributeValue, options: &DecodeOptions) -> Result<Value> {
        trace!("decoding {}", attr.tag());
        self.check_attr(attr)?;
        Ok(tagwire_wire::decode(attr, options)?)
    }

    /// Decode a root document with the codec's configured options.
    pub fn decode_item(&self, item: &Item) -> Result<Value> {
        trace!("decoding root with {} attributes", item.len());
        self.check_item(item)?;
        Ok(tagwire_wire::decode_item(item, &self.options)?)
    }

    /// Decode a root document into a typed model.
    pub fn decode_model<T: Model>(&self, item: &Item) -> Result<T> {
        self.check_item(item)?;
        Ok(tagwire_wire::decode_model(item)?)
    }

    /// Parse JSON text and decode it with the configured options.
    pub fn decode_json(&self, json: &str) -> Result<Value> {
        let attr = tagwire_wire::from_json_str(json)?;
        self.decode(&attr)
    }

    fn check_value(&self, value: &Value) -> Result<()> {
        match self.max_depth {
            Some(limit) if !value_within(value, limit) => Err(Error::DepthExceeded { limit }),
            _ => Ok(()),
        }
    }

    fn check_attr(&self, attr: &AttributeValue) -> Result<()> {
        match self.max_depth {
            Some(limit) if !attr_within(attr, limit) => Err(Error::DepthExceeded { limit }),
            _ => Ok(()),
        }
    }

    fn check_item(&self, item: &Item) -> Result<()> {
        match self.max_depth {
            // The root counts as one level, as if wrapped in M
            Some(limit) if limit == 0 || !item.values().all(|a| attr_within(a, limit - 1)) => {
                Err(Error::DepthExceeded { limit })
            }
            _ => Ok(()),
        }
    }
}

/// Whether `value` nests no deeper than `budget` levels; scalars and sets count as one.
fn value_within(value: &Value, budget: usize) -> bool {
    if budget == 0 {
        return false;
    }
    match value {
        Value::List(items) => items.iter().all(|v| value_within(v, budget - 1)),
        Value::Map(map) => map.values().all(|v| value_within(v, budget - 1)),
        Value::Record(record) => record.fields().values().all(|v| value_within(v, budget - 1)),
        Value::Tagged(attr) => attr_within(attr, budget),
        _ => true,
    }
}

fn attr_within(attr: &AttributeValue, budget: usize) -> bool {
    if budget == 0 {
        return false;
    }
    match attr {
        AttributeValue::L(items) => items.iter().all(|a| attr_within(a, budget - 1)),
        AttributeValue::M(map) => map.values().all(|a| attr_within(a, budget - 1)),
        _ => true,
    }
}

/// Builder for codec configuration.
///
/// # Example
///
/// ```
/// use tagwire::prelude::*;
///
/// let schema = RecordSchema::new("User").field("name", "").build();
/// let codec = Codec::builder()
///     .schema(schema)
///     .max_depth(32)
///     .build();
/// assert_eq!(codec.max_depth(), Some(32));
/// ```
#[derive(Debug, Clone, Default)]
pub struct CodecBuilder {
    schema: Option<Arc<RecordSchema>>,
    max_depth: Option<usize>,
}

impl CodecBuilder {
    /// Create a new builder with default settings.
    pub fn new() -> Self {
        Self::default()
    }

    /// Coerce decoded roots onto `schema`.
    pub fn schema(mut self, schema: Arc<RecordSchema>) -> Self {
        self.schema = Some(schema);
        self
    }

    /// Reject documents nested deeper than `levels`.
    ///
    /// The limit applies to both directions. Scalars count as one level and
    /// each enclosing list or map adds one.
    pub fn max_depth(mut self, levels: usize) -> Self {
        self.max_depth = Some(levels);
        self
    }

    /// Build the codec.
    pub fn build(self) -> Codec {
        let options = match self.schema {
            Some(schema) => DecodeOptions::new().with_schema(schema),
            None => DecodeOptions::new(),
        };
        Codec {
            options,
            max_depth: self.max_depth,
        }
    }
}
