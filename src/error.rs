//! Unified error types for tagwire.
//!
//! This module provides a single error type that wraps the per-crate codec
//! errors and presents a consistent interface to users.

use tagwire_core::{RecordError, WireFormatError};
use tagwire_wire::{DecodeError, EncodeError};
use thiserror::Error;

/// All tagwire errors.
///
/// Failures split into two families:
///
/// - **Unrepresentable value**: the native value has no wire form
///   (empty set, mixed set, non-finite number, non-document root)
/// - **Malformed wire value**: the input is not a well-formed attribute value
///   or its payload cannot be interpreted
///
/// Record hook failures and the optional depth limit sit outside both.
#[derive(Debug, Error)]
pub enum Error {
    /// Value cannot be encoded
    #[error("encode error: {0}")]
    Encode(#[from] EncodeError),

    /// Wire value cannot be decoded
    #[error("decode error: {0}")]
    Decode(#[from] DecodeError),

    /// Record construction or access failed
    #[error("record error: {0}")]
    Record(#[from] RecordError),

    /// Document nesting is deeper than the configured limit
    #[error("document nesting exceeds {limit} levels")]
    DepthExceeded {
        /// Configured limit
        limit: usize,
    },
}

/// Result type for tagwire operations.
pub type Result<T> = std::result::Result<T, Error>;

impl Error {
    /// Check if the native value has no wire representation.
    pub fn is_unrepresentable(&self) -> bool {
        matches!(self, Error::Encode(e) if e.is_unrepresentable())
    }

    /// Check if the wire input was malformed.
    pub fn is_malformed(&self) -> bool {
        matches!(self, Error::Decode(e) if e.is_malformed())
    }

    /// Check if the configured depth limit was hit.
    pub fn is_depth_exceeded(&self) -> bool {
        matches!(self, Error::DepthExceeded { .. })
    }
}

impl From<WireFormatError> for Error {
    fn from(e: WireFormatError) -> Self {
        Error::Decode(DecodeError::Format(e))
    }
}
