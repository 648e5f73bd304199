//! Mapper client configuration and validation
//!
//! # Example
//!
//! ```ignore
//! use mapper_client::domain::{MapperConfig, ResolveStrategy};
//!
//! let config = MapperConfig::default()
//!     .with_call_timeout_ms(2_000)
//!     .with_strategy(ResolveStrategy::Concurrent);
//! config.validate()?;
//! ```

use mapper_types::wellknown::{MAPPER_INTERFACE, MAPPER_PATH, MAPPER_SERVICE};
use mapper_types::{InterfaceName, ObjectPath, ServiceName};
use serde::{Deserialize, Serialize};
use std::env;
use std::fmt;
use std::str::FromStr;
use std::time::Duration;

use crate::error::ConfigError;

/// How the association pipeline schedules its two queries.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ResolveStrategy {
    /// The subtree query is issued only after the endpoint reply arrived.
    #[default]
    Sequential,
    /// Both queries are issued together; the endpoint stage is still judged
    /// first when the replies are merged.
    Concurrent,
}

impl ResolveStrategy {
    #[must_use]
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Sequential => "sequential",
            Self::Concurrent => "concurrent",
        }
    }
}

impl fmt::Display for ResolveStrategy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for ResolveStrategy {
    type Err = ConfigError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "sequential" => Ok(Self::Sequential),
            "concurrent" => Ok(Self::Concurrent),
            other => Err(ConfigError::UnknownStrategy(other.to_string())),
        }
    }
}

/// Where the object mapper lives and how queries against it are issued.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct MapperConfig {
    /// Bus name of the mapper service
    pub service_name: String,
    /// Object path of the mapper's query methods
    pub object_path: String,
    /// Interface of the mapper's query methods
    pub interface_name: String,
    /// Per-call reply timeout in milliseconds (0 = wait indefinitely)
    pub call_timeout_ms: u64,
    /// Scheduling of the association pipeline
    pub strategy: ResolveStrategy,
}

impl Default for MapperConfig {
    fn default() -> Self {
        Self {
            service_name: MAPPER_SERVICE.to_string(),
            object_path: MAPPER_PATH.to_string(),
            interface_name: MAPPER_INTERFACE.to_string(),
            call_timeout_ms: 0,
            strategy: ResolveStrategy::Sequential,
        }
    }
}

impl MapperConfig {
    /// Load configuration from environment variables.
    ///
    /// Unset or unparseable variables keep their default; call
    /// [`MapperConfig::validate`] before use.
    #[must_use]
    pub fn from_env() -> Self {
        let defaults = Self::default();
        Self {
            service_name: env::var("MAPPER_SERVICE_NAME").unwrap_or(defaults.service_name),
            object_path: env::var("MAPPER_OBJECT_PATH").unwrap_or(defaults.object_path),
            interface_name: env::var("MAPPER_INTERFACE_NAME").unwrap_or(defaults.interface_name),
            call_timeout_ms: env::var("MAPPER_CALL_TIMEOUT_MS")
                .ok()
                .and_then(|v| v.parse().ok())
                .unwrap_or(defaults.call_timeout_ms),
            strategy: env::var("MAPPER_RESOLVE_STRATEGY")
                .ok()
                .and_then(|v| v.parse().ok())
                .unwrap_or(defaults.strategy),
        }
    }

    /// Reject empty names and a malformed object path.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.service_name.trim().is_empty() {
            return Err(ConfigError::EmptyName {
                field: "service_name",
            });
        }

        if self.interface_name.trim().is_empty() {
            return Err(ConfigError::EmptyName {
                field: "interface_name",
            });
        }

        ObjectPath::new(self.object_path.as_str()).map_err(|source| {
            ConfigError::InvalidObjectPath {
                path: self.object_path.clone(),
                source,
            }
        })?;

        Ok(())
    }

    /// Builder-style method to set the mapper service name
    #[must_use]
    pub fn with_service_name(mut self, name: impl Into<String>) -> Self {
        self.service_name = name.into();
        self
    }

    /// Builder-style method to set the per-call timeout
    #[must_use]
    pub fn with_call_timeout_ms(mut self, millis: u64) -> Self {
        self.call_timeout_ms = millis;
        self
    }

    /// Builder-style method to set the pipeline strategy
    #[must_use]
    pub fn with_strategy(mut self, strategy: ResolveStrategy) -> Self {
        self.strategy = strategy;
        self
    }

    /// The call timeout, or `None` when calls wait indefinitely.
    #[must_use]
    pub fn call_timeout(&self) -> Option<Duration> {
        (self.call_timeout_ms > 0).then(|| Duration::from_millis(self.call_timeout_ms))
    }

    /// Resolve the configured names into the mapper's bus identity.
    pub fn target(&self) -> Result<MapperTarget, ConfigError> {
        self.validate()?;
        let path = ObjectPath::new(self.object_path.as_str()).map_err(|source| {
            ConfigError::InvalidObjectPath {
                path: self.object_path.clone(),
                source,
            }
        })?;
        Ok(MapperTarget {
            service: ServiceName::from(self.service_name.as_str()),
            path,
            interface: InterfaceName::from(self.interface_name.as_str()),
        })
    }
}

/// Validated bus identity of the object mapper.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct MapperTarget {
    pub service: ServiceName,
    pub path: ObjectPath,
    pub interface: InterfaceName,
}

impl Default for MapperTarget {
    fn default() -> Self {
        Self {
            service: ServiceName::from(MAPPER_SERVICE),
            path: ObjectPath::new(MAPPER_PATH).unwrap_or_else(|_| ObjectPath::root()),
            interface: InterfaceName::from(MAPPER_INTERFACE),
        }
    }
}
