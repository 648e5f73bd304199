//! Mapper Client wiring
//!
//! Builds the gateway and the resolver over one shared bus connection.

use mapper_bus::BusConnection;
use std::sync::Arc;
use tracing::info;

use crate::adapters::ObjectMapperGateway;
use crate::domain::MapperConfig;
use crate::error::ConfigError;
use crate::service::AssociationResolver;

/// Entry point for mapper queries.
///
/// The gateway answers single queries; the resolver runs the association
/// pipeline on top of the same gateway.
#[derive(Clone)]
pub struct MapperClient {
    gateway: Arc<ObjectMapperGateway>,
    resolver: AssociationResolver<ObjectMapperGateway>,
}

impl MapperClient {
    /// Validate `config` and wire the client over `connection`.
    pub fn new(
        connection: Arc<dyn BusConnection>,
        config: &MapperConfig,
    ) -> Result<Self, ConfigError> {
        let gateway = Arc::new(ObjectMapperGateway::from_config(connection, config)?);
        let resolver =
            AssociationResolver::new(Arc::clone(&gateway)).with_strategy(config.strategy);

        info!(
            service = %gateway.target().service,
            path = %gateway.target().path,
            strategy = %config.strategy,
            call_timeout_ms = config.call_timeout_ms,
            "Mapper client ready"
        );

        Ok(Self { gateway, resolver })
    }

    /// Wire the client from `MAPPER_*` environment variables.
    pub fn from_env(connection: Arc<dyn BusConnection>) -> Result<Self, ConfigError> {
        Self::new(connection, &MapperConfig::from_env())
    }

    #[must_use]
    pub fn gateway(&self) -> &ObjectMapperGateway {
        &self.gateway
    }

    #[must_use]
    pub fn resolver(&self) -> &AssociationResolver<ObjectMapperGateway> {
        &self.resolver
    }
}

impl std::fmt::Debug for MapperClient {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("MapperClient")
            .field("gateway", &self.gateway)
            .field("strategy", &self.resolver.strategy())
            .finish()
    }
}
