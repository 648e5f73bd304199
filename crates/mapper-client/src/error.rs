//! Error types for the mapper client
//!
//! Remote operations report [`mapper_types::BusError`]; this module only
//! holds the errors raised before any call is made.

use mapper_types::PathError;
use thiserror::Error;

/// Configuration rejected by [`crate::MapperConfig::validate`].
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ConfigError {
    #[error("Invalid mapper object path {path:?}: {source}")]
    InvalidObjectPath {
        path: String,
        #[source]
        source: PathError,
    },

    #[error("{field} cannot be empty")]
    EmptyName { field: &'static str },

    #[error("Unknown resolve strategy: {0} (expected sequential or concurrent)")]
    UnknownStrategy(String),
}
