//! Record schemas and schema-bound records
//!
//! A [`RecordSchema`] is the static description of a named-field record type:
//! the declared fields with their default values, the fields the encoder must
//! leave out, and an optional hook that runs after decoding.
//!
//! Decoding into a schema is a two-step process. The wire value is first
//! decoded structurally into a generic map, then [`Record::coerce`] projects
//! that map onto the schema:
//!
//! - declared fields take the decoded value when present, else their default
//! - decoded keys the schema does not declare are dropped
//!
//! Finally the schema's post-decode hook (identity when absent) gets the
//! populated record. Hooks exist so a record can re-interpret its own nested
//! maps, for example turning a nested generic map into another record type.

use crate::value::Value;
use std::collections::{BTreeSet, HashMap};
use std::sync::Arc;
use thiserror::Error;
use tracing::debug;

/// Hook run on a freshly coerced record
pub type PostDecodeHook = fn(Record) -> Result<Record, RecordError>;

/// Errors raised by record construction and field access
#[derive(Debug, Clone, Error, PartialEq)]
pub enum RecordError {
    /// Field is not declared by the record's schema
    #[error("record {record} has no field {field}")]
    UnknownField {
        /// Schema name
        record: String,
        /// Offending field
        field: String,
    },

    /// Field is declared but was already taken out of the record
    #[error("record {record} is missing field {field}")]
    MissingField {
        /// Schema name
        record: String,
        /// Missing field
        field: String,
    },

    /// Field holds a value of the wrong type
    #[error("field {field}: expected {expected}, got {actual}")]
    WrongType {
        /// Field name
        field: String,
        /// Expected type name
        expected: &'static str,
        /// Actual type name
        actual: &'static str,
    },

    /// A post-decode hook rejected the record
    #[error("post-decode hook failed: {0}")]
    Hook(String),
}

/// Static description of a record type
#[derive(Debug, Clone)]
pub struct RecordSchema {
    name: String,
    fields: Vec<(String, Value)>,
    excluded: BTreeSet<String>,
    post_decode: Option<PostDecodeHook>,
}

impl RecordSchema {
    /// Start a schema with no fields
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            fields: Vec::new(),
            excluded: BTreeSet::new(),
            post_decode: None,
        }
    }

    /// Declare a field and its default value
    ///
    /// Declaring the same field twice replaces its default.
    pub fn field(mut self, name: impl Into<String>, default: impl Into<Value>) -> Self {
        let name = name.into();
        let default = default.into();
        match self.fields.iter_mut().find(|(n, _)| *n == name) {
            Some(slot) => slot.1 = default,
            None => self.fields.push((name, default)),
        }
        self
    }

    /// Leave a field out when encoding records of this schema
    pub fn exclude(mut self, name: impl Into<String>) -> Self {
        self.excluded.insert(name.into());
        self
    }

    /// Attach a post-decode hook
    pub fn post_decode(mut self, hook: PostDecodeHook) -> Self {
        self.post_decode = Some(hook);
        self
    }

    /// Finish building and share the schema
    pub fn build(self) -> Arc<Self> {
        Arc::new(self)
    }

    /// Schema name
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Declared fields with their defaults, in declaration order
    pub fn fields(&self) -> impl Iterator<Item = (&str, &Value)> {
        self.fields.iter().map(|(n, d)| (n.as_str(), d))
    }

    /// Whether the schema declares `name`
    pub fn declares(&self, name: &str) -> bool {
        self.default_of(name).is_some()
    }

    /// Default value of a declared field
    pub fn default_of(&self, name: &str) -> Option<&Value> {
        self.fields.iter().find(|(n, _)| n == name).map(|(_, d)| d)
    }

    /// A fresh record holding every declared field at its default
    pub fn default_record(self: &Arc<Self>) -> Record {
        Record::new(Arc::clone(self))
    }

    /// Whether the encoder must omit `name`
    pub fn is_excluded(&self, name: &str) -> bool {
        self.excluded.contains(name)
    }

    /// Whether a post-decode hook is attached
    pub fn has_post_decode(&self) -> bool {
        self.post_decode.is_some()
    }

    /// Run the post-decode hook, or return the record unchanged
    pub fn run_post_decode(&self, record: Record) -> Result<Record, RecordError> {
        match self.post_decode {
            Some(hook) => hook(record),
            None => Ok(record),
        }
    }
}

/// A record instance bound to its schema
#[derive(Debug, Clone)]
pub struct Record {
    schema: Arc<RecordSchema>,
    fields: HashMap<String, Value>,
}

impl Record {
    /// A record holding every declared field at its default
    pub fn new(schema: Arc<RecordSchema>) -> Self {
        let fields = schema
            .fields()
            .map(|(n, d)| (n.to_string(), d.clone()))
            .collect();
        Self { schema, fields }
    }

    /// Project a decoded map onto `schema`
    ///
    /// Declared fields take the decoded value when present and their default
    /// otherwise. Undeclared keys are dropped.
    pub fn coerce(mut decoded: HashMap<String, Value>, schema: Arc<RecordSchema>) -> Self {
        let mut fields = HashMap::with_capacity(schema.fields.len());
        for (name, default) in schema.fields() {
            let value = match decoded.remove(name) {
                Some(value) => value,
                None => {
                    debug!("record {}: field {} absent, using default", schema.name(), name);
                    default.clone()
                }
            };
            fields.insert(name.to_string(), value);
        }
        if !decoded.is_empty() {
            let mut dropped: Vec<_> = decoded.keys().map(String::as_str).collect();
            dropped.sort_unstable();
            debug!("record {}: dropping undeclared fields {:?}", schema.name(), dropped);
        }
        Self { schema, fields }
    }

    /// The schema this record is bound to
    pub fn schema(&self) -> &Arc<RecordSchema> {
        &self.schema
    }

    /// All fields
    pub fn fields(&self) -> &HashMap<String, Value> {
        &self.fields
    }

    /// Fields the encoder should emit, skipping the schema's exclusions
    pub fn encodable_fields(&self) -> impl Iterator<Item = (&String, &Value)> {
        self.fields
            .iter()
            .filter(|(name, _)| !self.schema.is_excluded(name))
    }

    /// Consume into the field map
    pub fn into_fields(self) -> HashMap<String, Value> {
        self.fields
    }

    /// Get a field
    pub fn get(&self, name: &str) -> Option<&Value> {
        self.fields.get(name)
    }

    /// Set a declared field, returning its previous value
    pub fn set(&mut self, name: &str, value: impl Into<Value>) -> Result<Option<Value>, RecordError> {
        if !self.schema.declares(name) {
            return Err(self.unknown(name));
        }
        Ok(self.fields.insert(name.to_string(), value.into()))
    }

    /// Builder-style [`set`](Self::set)
    pub fn with(mut self, name: &str, value: impl Into<Value>) -> Result<Self, RecordError> {
        self.set(name, value)?;
        Ok(self)
    }

    /// Move a declared field out of the record
    pub fn take(&mut self, name: &str) -> Result<Value, RecordError> {
        if !self.schema.declares(name) {
            return Err(self.unknown(name));
        }
        self.fields.remove(name).ok_or_else(|| RecordError::MissingField {
            record: self.schema.name().to_string(),
            field: name.to_string(),
        })
    }

    /// Take a `String` field
    pub fn take_string(&mut self, name: &str) -> Result<String, RecordError> {
        match self.take(name)? {
            Value::String(s) => Ok(s),
            other => Err(wrong_type(name, "String", &other)),
        }
    }

    /// Take an `Int` field
    pub fn take_int(&mut self, name: &str) -> Result<i64, RecordError> {
        match self.take(name)? {
            Value::Int(i) => Ok(i),
            other => Err(wrong_type(name, "Int", &other)),
        }
    }

    /// Take a numeric field as f64, widening integers
    ///
    /// Integral floats come back from the wire as `Int`, so float fields
    /// need to accept both.
    pub fn take_float(&mut self, name: &str) -> Result<f64, RecordError> {
        match self.take(name)? {
            Value::Float(f) => Ok(f),
            Value::Int(i) => Ok(i as f64),
            other => Err(wrong_type(name, "Float", &other)),
        }
    }

    /// Take a `Bool` field
    pub fn take_bool(&mut self, name: &str) -> Result<bool, RecordError> {
        match self.take(name)? {
            Value::Bool(b) => Ok(b),
            other => Err(wrong_type(name, "Bool", &other)),
        }
    }

    /// Take a `Map` field
    pub fn take_map(&mut self, name: &str) -> Result<HashMap<String, Value>, RecordError> {
        match self.take(name)? {
            Value::Map(m) => Ok(m),
            other => Err(wrong_type(name, "Map", &other)),
        }
    }

    fn unknown(&self, name: &str) -> RecordError {
        RecordError::UnknownField {
            record: self.schema.name().to_string(),
            field: name.to_string(),
        }
    }
}

fn wrong_type(field: &str, expected: &'static str, actual: &Value) -> RecordError {
    RecordError::WrongType {
        field: field.to_string(),
        expected,
        actual: actual.type_name(),
    }
}

impl PartialEq for Record {
    fn eq(&self, other: &Self) -> bool {
        self.schema.name() == other.schema.name() && self.fields == other.fields
    }
}

/// A Rust type with a record representation
///
/// Implementors describe their schema once and convert to and from
/// [`Record`]; the codec handles everything else.
pub trait Model: Sized {
    /// The schema records of this type are bound to
    fn schema() -> Arc<RecordSchema>;

    /// Convert into a record
    fn to_record(&self) -> Record;

    /// Build from a coerced, post-decoded record
    fn from_record(record: Record) -> Result<Self, RecordError>;
}
