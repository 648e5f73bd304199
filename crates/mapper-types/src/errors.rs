//! # Error Types
//!
//! The status taxonomy shared by every layer, plus path and value errors.

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::wellknown::NOT_FOUND_ERRORS;

/// Coarse classification of a failed remote call.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ErrorKind {
    /// Connection or timeout failure at the bus layer.
    TransportFailure,
    /// The addressed service, object, interface or property does not exist.
    NotFound,
    /// Malformed or unexpected reply, or a remote error we do not classify.
    ProtocolFailure,
    /// The caller cancelled the operation.
    Cancelled,
}

impl ErrorKind {
    /// Stable lowercase label, used for metrics and log fields.
    #[must_use]
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::TransportFailure => "transport_failure",
            Self::NotFound => "not_found",
            Self::ProtocolFailure => "protocol_failure",
            Self::Cancelled => "cancelled",
        }
    }
}

/// Failure status of a remote call.
#[derive(Debug, Clone, PartialEq, Eq, Error, Serialize, Deserialize)]
pub enum BusError {
    /// The connection failed to deliver the call or its reply.
    #[error("Transport failure: {reason}")]
    Transport { reason: String },

    /// No reply arrived within the configured call timeout.
    #[error("Call to {member} timed out after {after_ms} ms")]
    Timeout { member: String, after_ms: u64 },

    /// The remote side reported that the target does not exist.
    #[error("Not found ({name}): {message}")]
    NotFound { name: String, message: String },

    /// The reply did not have the expected shape, or the remote side
    /// reported an error other than not-found.
    #[error("Protocol failure: {reason}")]
    Protocol { reason: String },

    /// The operation was cancelled before it completed.
    #[error("Operation cancelled")]
    Cancelled,
}

impl BusError {
    /// Build the error for a named remote error reply.
    ///
    /// Well-known "does not exist" error names map to [`BusError::NotFound`];
    /// every other name is a protocol failure.
    pub fn remote(name: impl Into<String>, message: impl Into<String>) -> Self {
        let name = name.into();
        let message = message.into();
        if NOT_FOUND_ERRORS.contains(&name.as_str()) {
            Self::NotFound { name, message }
        } else {
            Self::Protocol {
                reason: format!("{}: {}", name, message),
            }
        }
    }

    pub fn transport(reason: impl Into<String>) -> Self {
        Self::Transport {
            reason: reason.into(),
        }
    }

    #[must_use]
    pub fn kind(&self) -> ErrorKind {
        match self {
            Self::Transport { .. } | Self::Timeout { .. } => ErrorKind::TransportFailure,
            Self::NotFound { .. } => ErrorKind::NotFound,
            Self::Protocol { .. } => ErrorKind::ProtocolFailure,
            Self::Cancelled => ErrorKind::Cancelled,
        }
    }
}

impl From<ValueError> for BusError {
    fn from(err: ValueError) -> Self {
        Self::Protocol {
            reason: err.to_string(),
        }
    }
}

/// A wire value could not be decoded into the requested type.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ValueError {
    #[error("Type mismatch: expected {expected}, found {found}")]
    TypeMismatch {
        expected: &'static str,
        found: &'static str,
    },

    #[error("Struct arity mismatch: expected {expected} fields, found {found}")]
    ArityMismatch { expected: usize, found: usize },

    #[error("Invalid object path in reply: {0}")]
    InvalidPath(#[from] PathError),
}

/// Path validation and lookup errors.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum PathError {
    #[error("Object path is empty")]
    Empty,

    #[error("Object path must start with '/': {path}")]
    NotAbsolute { path: String },

    #[error("Object path must not end with '/': {path}")]
    TrailingSlash { path: String },

    #[error("Object path contains an empty segment: {path}")]
    EmptySegment { path: String },

    #[error("Invalid path segment: {segment:?}")]
    InvalidSegment { segment: String },

    #[error("Segment {index} not found (path has {count} segments)")]
    SegmentNotFound { index: i64, count: usize },
}
