//! Tagged attribute values as they travel over the wire
//!
//! An [`AttributeValue`] is a single-key JSON object whose key is one of ten
//! fixed tags and whose payload shape is determined by that tag:
//!
//! | Tag | Payload | Example |
//! |-----|---------|---------|
//! | `S` | string | `{"S": "hello"}` |
//! | `N` | decimal string | `{"N": "34"}` |
//! | `B` | base64 string | `{"B": "AQID"}` |
//! | `BOOL` | boolean | `{"BOOL": true}` |
//! | `NULL` | `true` | `{"NULL": true}` |
//! | `SS` | non-empty string array | `{"SS": ["a", "b"]}` |
//! | `NS` | non-empty decimal string array | `{"NS": ["1", "2"]}` |
//! | `BS` | non-empty base64 string array | `{"BS": ["AQ=="]}` |
//! | `L` | array of attribute values | `{"L": [{"S": "a"}]}` |
//! | `M` | object of attribute values | `{"M": {"a": {"N": "1"}}}` |
//!
//! ## Lenient Input
//!
//! Upstream producers do not always honour the canonical payload shapes, so
//! parsing accepts a few extra forms that are never produced on output:
//!
//! - `BOOL` accepts the strings `"true"` and `"false"`
//! - `NULL` accepts the string `"true"`
//! - `N` and `NS` accept JSON numbers as well as decimal strings

use serde::de::{self, Deserialize, Deserializer};
use serde::ser::{Serialize, SerializeMap, Serializer};
use serde_json::Value as Json;
use std::collections::BTreeMap;
use std::fmt;
use thiserror::Error;
use tracing::warn;

/// A root document: attribute name to wire value, without an enclosing `M` tag.
pub type Item = BTreeMap<String, AttributeValue>;

/// The ten wire tags
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum Tag {
    /// `S`
    String,
    /// `N`
    Number,
    /// `B`
    Binary,
    /// `BOOL`
    Boolean,
    /// `NULL`
    Null,
    /// `SS`
    StringSet,
    /// `NS`
    NumberSet,
    /// `BS`
    BinarySet,
    /// `L`
    List,
    /// `M`
    Map,
}

impl Tag {
    /// All tags, in wire-documentation order
    pub const ALL: [Tag; 10] = [
        Tag::String,
        Tag::Number,
        Tag::Binary,
        Tag::Boolean,
        Tag::Null,
        Tag::StringSet,
        Tag::NumberSet,
        Tag::BinarySet,
        Tag::List,
        Tag::Map,
    ];

    /// The tag key as it appears on the wire
    pub fn as_str(&self) -> &'static str {
        match self {
            Tag::String => "S",
            Tag::Number => "N",
            Tag::Binary => "B",
            Tag::Boolean => "BOOL",
            Tag::Null => "NULL",
            Tag::StringSet => "SS",
            Tag::NumberSet => "NS",
            Tag::BinarySet => "BS",
            Tag::List => "L",
            Tag::Map => "M",
        }
    }

    /// Parse a wire tag key
    pub fn from_wire(key: &str) -> Option<Self> {
        Tag::ALL.into_iter().find(|tag| tag.as_str() == key)
    }
}

impl fmt::Display for Tag {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// One encoded attribute
///
/// Payloads are kept in their wire form: numbers are decimal text and binary
/// data is base64 text. Interpreting them is the decoder's job.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum AttributeValue {
    /// `S`: text
    S(String),
    /// `N`: decimal text
    N(String),
    /// `B`: base64 text
    B(String),
    /// `BOOL`
    Bool(bool),
    /// `NULL`: always serialized as `true`
    Null,
    /// `SS`
    Ss(Vec<String>),
    /// `NS`: decimal text members
    Ns(Vec<String>),
    /// `BS`: base64 text members
    Bs(Vec<String>),
    /// `L`
    L(Vec<AttributeValue>),
    /// `M`
    M(BTreeMap<String, AttributeValue>),
}

/// Errors raised when JSON does not have the shape of an attribute value
#[derive(Debug, Clone, Error, PartialEq)]
pub enum WireFormatError {
    /// The attribute value was not a JSON object
    #[error("attribute value must be an object, got {0}")]
    NotAnObject(&'static str),

    /// The object did not carry exactly one key
    #[error("attribute value must have exactly one tag, got {0}")]
    NotSingleTag(usize),

    /// The key was not one of the ten recognized tags
    #[error("unknown attribute tag: {0}")]
    UnknownTag(String),

    /// The tag was recognized but its payload has the wrong shape
    #[error("invalid payload for {tag}: {reason}")]
    InvalidPayload {
        /// Tag whose payload was rejected
        tag: Tag,
        /// What was wrong with it
        reason: String,
    },
}

impl AttributeValue {
    /// The tag this value carries
    pub fn tag(&self) -> Tag {
        match self {
            AttributeValue::S(_) => Tag::String,
            AttributeValue::N(_) => Tag::Number,
            AttributeValue::B(_) => Tag::Binary,
            AttributeValue::Bool(_) => Tag::Boolean,
            AttributeValue::Null => Tag::Null,
            AttributeValue::Ss(_) => Tag::StringSet,
            AttributeValue::Ns(_) => Tag::NumberSet,
            AttributeValue::Bs(_) => Tag::BinarySet,
            AttributeValue::L(_) => Tag::List,
            AttributeValue::M(_) => Tag::Map,
        }
    }

    /// Try to get the `M` payload
    pub fn as_map(&self) -> Option<&BTreeMap<String, AttributeValue>> {
        match self {
            AttributeValue::M(m) => Some(m),
            _ => None,
        }
    }

    /// Try to get the `L` payload
    pub fn as_list(&self) -> Option<&[AttributeValue]> {
        match self {
            AttributeValue::L(l) => Some(l),
            _ => None,
        }
    }

    /// Render as a JSON value
    pub fn to_json(&self) -> Json {
        let payload = match self {
            AttributeValue::S(s) | AttributeValue::N(s) | AttributeValue::B(s) => {
                Json::String(s.clone())
            }
            AttributeValue::Bool(b) => Json::Bool(*b),
            AttributeValue::Null => Json::Bool(true),
            AttributeValue::Ss(members) | AttributeValue::Ns(members) | AttributeValue::Bs(members) => {
                Json::Array(members.iter().cloned().map(Json::String).collect())
            }
            AttributeValue::L(items) => Json::Array(items.iter().map(Self::to_json).collect()),
            AttributeValue::M(map) => Json::Object(
                map.iter()
                    .map(|(k, v)| (k.clone(), v.to_json()))
                    .collect(),
            ),
        };
        let mut object = serde_json::Map::with_capacity(1);
        object.insert(self.tag().as_str().to_string(), payload);
        Json::Object(object)
    }

    /// Parse a JSON value, applying the lenient-input rules
    pub fn from_json(json: Json) -> Result<Self, WireFormatError> {
        let object = match json {
            Json::Object(object) => object,
            other => return Err(WireFormatError::NotAnObject(json_kind(&other))),
        };
        if object.len() != 1 {
            return Err(WireFormatError::NotSingleTag(object.len()));
        }
        let Some((key, payload)) = object.into_iter().next() else {
            return Err(WireFormatError::NotSingleTag(0));
        };
        let tag = Tag::from_wire(&key).ok_or(WireFormatError::UnknownTag(key))?;

        match tag {
            Tag::String => expect_string(tag, payload).map(AttributeValue::S),
            Tag::Binary => expect_string(tag, payload).map(AttributeValue::B),
            Tag::Number => number_text(tag, payload).map(AttributeValue::N),
            Tag::Boolean => match payload {
                Json::Bool(b) => Ok(AttributeValue::Bool(b)),
                Json::String(s) if s == "true" || s == "false" => {
                    warn!("accepting textual {} payload {:?}", tag, s);
                    Ok(AttributeValue::Bool(s == "true"))
                }
                other => Err(invalid(tag, format!("expected boolean, got {}", json_kind(&other)))),
            },
            Tag::Null => match payload {
                Json::Bool(true) => Ok(AttributeValue::Null),
                Json::String(s) if s == "true" => {
                    warn!("accepting textual {} payload {:?}", tag, s);
                    Ok(AttributeValue::Null)
                }
                other => Err(invalid(tag, format!("expected true, got {}", other))),
            },
            Tag::StringSet => expect_array(tag, payload)?
                .into_iter()
                .map(|member| expect_string(tag, member))
                .collect::<Result<_, _>>()
                .map(AttributeValue::Ss),
            Tag::BinarySet => expect_array(tag, payload)?
                .into_iter()
                .map(|member| expect_string(tag, member))
                .collect::<Result<_, _>>()
                .map(AttributeValue::Bs),
            Tag::NumberSet => expect_array(tag, payload)?
                .into_iter()
                .map(|member| number_text(tag, member))
                .collect::<Result<_, _>>()
                .map(AttributeValue::Ns),
            Tag::List => expect_array(tag, payload)?
                .into_iter()
                .map(AttributeValue::from_json)
                .collect::<Result<_, _>>()
                .map(AttributeValue::L),
            Tag::Map => match payload {
                Json::Object(entries) => entries
                    .into_iter()
                    .map(|(k, v)| AttributeValue::from_json(v).map(|v| (k, v)))
                    .collect::<Result<_, _>>()
                    .map(AttributeValue::M),
                other => Err(invalid(tag, format!("expected object, got {}", json_kind(&other)))),
            },
        }
    }
}

fn invalid(tag: Tag, reason: String) -> WireFormatError {
    WireFormatError::InvalidPayload { tag, reason }
}

fn json_kind(json: &Json) -> &'static str {
    match json {
        Json::Null => "null",
        Json::Bool(_) => "boolean",
        Json::Number(_) => "number",
        Json::String(_) => "string",
        Json::Array(_) => "array",
        Json::Object(_) => "object",
    }
}

fn expect_string(tag: Tag, json: Json) -> Result<String, WireFormatError> {
    match json {
        Json::String(s) => Ok(s),
        other => Err(invalid(tag, format!("expected string, got {}", json_kind(&other)))),
    }
}

fn expect_array(tag: Tag, json: Json) -> Result<Vec<Json>, WireFormatError> {
    match json {
        Json::Array(items) => Ok(items),
        other => Err(invalid(tag, format!("expected array, got {}", json_kind(&other)))),
    }
}

/// Numbers may arrive as decimal text or as native JSON numbers
fn number_text(tag: Tag, json: Json) -> Result<String, WireFormatError> {
    match json {
        Json::String(s) => Ok(s),
        Json::Number(n) => Ok(n.to_string()),
        other => Err(invalid(
            tag,
            format!("expected decimal string or number, got {}", json_kind(&other)),
        )),
    }
}

impl Serialize for AttributeValue {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(Some(1))?;
        let key = self.tag().as_str();
        match self {
            AttributeValue::S(s) | AttributeValue::N(s) | AttributeValue::B(s) => {
                map.serialize_entry(key, s)?
            }
            AttributeValue::Bool(b) => map.serialize_entry(key, b)?,
            AttributeValue::Null => map.serialize_entry(key, &true)?,
            AttributeValue::Ss(members) | AttributeValue::Ns(members) | AttributeValue::Bs(members) => {
                map.serialize_entry(key, members)?
            }
            AttributeValue::L(items) => map.serialize_entry(key, items)?,
            AttributeValue::M(entries) => map.serialize_entry(key, entries)?,
        }
        map.end()
    }
}

impl<'de> Deserialize<'de> for AttributeValue {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let json = Json::deserialize(deserializer)?;
        AttributeValue::from_json(json).map_err(de::Error::custom)
    }
}
