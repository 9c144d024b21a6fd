//! Core data models for tagwire
//!
//! This crate holds the three data contracts the codec translates between:
//!
//! - [`Value`]: native values callers build and receive
//! - [`AttributeValue`]: the ten-tag wire representation
//! - [`RecordSchema`] / [`Record`] / [`Model`]: schema-bound records
//!
//! It has no encoding logic of its own; see `tagwire-wire` for that.

#![warn(missing_docs)]
#![warn(clippy::all)]

pub mod attribute;
pub mod record;
pub mod value;

pub use attribute::{AttributeValue, Item, Tag, WireFormatError};
pub use record::{Model, PostDecodeHook, Record, RecordError, RecordSchema};
pub use value::Value;
