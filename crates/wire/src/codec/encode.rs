//! Encoding native values into tagged attribute values
//!
//! Type inference follows a fixed precedence:
//!
//! 1. `Tagged` (escape hatch) is returned verbatim
//! 2. `Record` becomes its field map, minus excluded fields, then `M`
//! 3. `Null` -> `NULL`
//! 4. `Bool` -> `BOOL`
//! 5. `Int` / `Float` -> `N`
//! 6. `Map` -> `M`
//! 7. `String` -> `S`
//! 8. `Bytes` -> `B` (base64)
//! 9. `List` -> `L`
//! 10. `Set` -> `NS`, `SS` or `BS` by member type

use super::number::{format_float, format_int};
use base64::Engine;
use std::collections::{BTreeMap, BTreeSet, HashMap, HashSet};
use tagwire_core::{AttributeValue, Item, Model, Record, Value};
use thiserror::Error;
use tracing::debug;

/// Encode error types
///
/// Every variant means the value has no representation on the wire.
#[derive(Debug, Error, PartialEq)]
pub enum EncodeError {
    /// No set type can be inferred from an empty set
    #[error("cannot infer a set type from an empty set")]
    EmptySet,

    /// Set members do not share one type
    #[error("set members must share one type, found {first} and {second}")]
    MixedSet {
        /// One member type found in the set
        first: &'static str,
        /// Another member type found in the set
        second: &'static str,
    },

    /// Set holds something other than strings, numbers or bytes
    #[error("sets may only hold strings, numbers or bytes, found {0}")]
    UnsupportedSetMember(&'static str),

    /// NaN or infinity
    #[error("number has no decimal form: {0}")]
    NonFiniteNumber(f64),

    /// Root document was not a map or record
    #[error("expected a map or record at the document root, got {0}")]
    NotADocument(&'static str),
}

impl EncodeError {
    /// Every encode error is an unrepresentable value
    pub fn is_unrepresentable(&self) -> bool {
        true
    }
}

/// Encode a Value to an attribute value
pub fn encode(value: &Value) -> Result<AttributeValue, EncodeError> {
    match value {
        Value::Tagged(attr) => Ok(attr.clone()),
        Value::Record(record) => encode_record(record).map(AttributeValue::M),
        Value::Null => Ok(AttributeValue::Null),
        Value::Bool(b) => Ok(AttributeValue::Bool(*b)),
        Value::Int(i) => Ok(AttributeValue::N(format_int(*i))),
        Value::Float(f) => encode_float(*f).map(AttributeValue::N),
        Value::Map(map) => encode_map(map).map(AttributeValue::M),
        Value::String(s) => Ok(AttributeValue::S(s.clone())),
        Value::Bytes(b) => Ok(AttributeValue::B(encode_base64(b))),
        Value::List(items) => items
            .iter()
            .map(encode)
            .collect::<Result<_, _>>()
            .map(AttributeValue::L),
        Value::Set(members) => encode_set(members),
    }
}

/// Encode a root document without the enclosing `M` tag
///
/// Accepts a `Map`, a `Record`, or an escape-hatch `M` value.
pub fn encode_item(value: &Value) -> Result<Item, EncodeError> {
    match value {
        Value::Map(map) => encode_map(map),
        Value::Record(record) => encode_record(record),
        Value::Tagged(AttributeValue::M(map)) => Ok(map.clone()),
        other => Err(EncodeError::NotADocument(other.type_name())),
    }
}

/// Encode a typed model as a root document
pub fn encode_model<T: Model>(model: &T) -> Result<Item, EncodeError> {
    encode_record(&model.to_record())
}

fn encode_float(f: f64) -> Result<String, EncodeError> {
    format_float(f).ok_or(EncodeError::NonFiniteNumber(f))
}

fn encode_base64(bytes: &[u8]) -> String {
    base64::engine::general_purpose::STANDARD.encode(bytes)
}

fn encode_map(map: &HashMap<String, Value>) -> Result<BTreeMap<String, AttributeValue>, EncodeError> {
    map.iter()
        .map(|(k, v)| encode(v).map(|attr| (k.clone(), attr)))
        .collect()
}

fn encode_record(record: &Record) -> Result<BTreeMap<String, AttributeValue>, EncodeError> {
    record
        .encodable_fields()
        .map(|(k, v)| encode(v).map(|attr| (k.clone(), attr)))
        .collect()
}

/// Member type of an encodable set, ordered for deterministic error reports
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
enum SetKind {
    Number,
    String,
    Binary,
}

impl SetKind {
    fn of(value: &Value) -> Option<Self> {
        match value {
            v if v.is_number() => Some(SetKind::Number),
            Value::String(_) => Some(SetKind::String),
            Value::Bytes(_) => Some(SetKind::Binary),
            _ => None,
        }
    }

    fn name(&self) -> &'static str {
        match self {
            SetKind::Number => "number",
            SetKind::String => "string",
            SetKind::Binary => "binary",
        }
    }
}

/// Encode a set; members are emitted sorted and deduplicated by wire text
fn encode_set(members: &HashSet<Value>) -> Result<AttributeValue, EncodeError> {
    let mut kinds = BTreeSet::new();
    let mut unsupported = BTreeSet::new();
    for member in members {
        match SetKind::of(member) {
            Some(kind) => {
                kinds.insert(kind);
            }
            None => {
                unsupported.insert(member.type_name());
            }
        }
    }
    if let Some(name) = unsupported.into_iter().next() {
        return Err(EncodeError::UnsupportedSetMember(name));
    }

    let mut kinds = kinds.into_iter();
    let kind = match (kinds.next(), kinds.next()) {
        (None, _) => return Err(EncodeError::EmptySet),
        (Some(first), Some(second)) => {
            return Err(EncodeError::MixedSet {
                first: first.name(),
                second: second.name(),
            })
        }
        (Some(kind), None) => kind,
    };

    let mut texts = match kind {
        SetKind::Number => {
            let non_finite = members
                .iter()
                .filter_map(Value::as_float)
                .filter(|f| !f.is_finite())
                .min_by(|a, b| a.total_cmp(b));
            if let Some(f) = non_finite {
                return Err(EncodeError::NonFiniteNumber(f));
            }
            members
                .iter()
                .map(|m| match m {
                    Value::Int(i) => Ok(format_int(*i)),
                    Value::Float(f) => encode_float(*f),
                    other => Err(EncodeError::UnsupportedSetMember(other.type_name())),
                })
                .collect::<Result<Vec<_>, _>>()?
        }
        SetKind::String => members
            .iter()
            .filter_map(Value::as_str)
            .map(str::to_string)
            .collect(),
        SetKind::Binary => members
            .iter()
            .filter_map(Value::as_bytes)
            .map(encode_base64)
            .collect(),
    };
    texts.sort_unstable();
    texts.dedup();
    if texts.len() < members.len() {
        debug!(
            "set of {} members collapsed to {} distinct {} values",
            members.len(),
            texts.len(),
            kind.name()
        );
    }

    Ok(match kind {
        SetKind::Number => AttributeValue::Ns(texts),
        SetKind::String => AttributeValue::Ss(texts),
        SetKind::Binary => AttributeValue::Bs(texts),
    })
}
