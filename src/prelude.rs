//! Convenient imports for tagwire.
//!
//! This module re-exports the most commonly used types so you can get started
//! with a single import:
//!
//! ```
//! use tagwire::prelude::*;
//!
//! let attr = Codec::new().encode(&Value::Int(34)).unwrap();
//! assert_eq!(attr, AttributeValue::N("34".to_string()));
//! ```

// Main entry point
pub use crate::codec::{Codec, CodecBuilder};

// Error handling
pub use crate::error::{Error, Result};

// Data models
pub use crate::{AttributeValue, Item, Tag, Value};

// Records
pub use crate::{Model, Record, RecordError, RecordSchema};

// Options
pub use crate::DecodeOptions;
