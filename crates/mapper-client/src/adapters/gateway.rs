//! Object Mapper Gateway
//!
//! Implements [`ObjectMapperApi`] by issuing the mapper's methods through an
//! [`AsyncRpcClient`]. Replies are decoded into the typed data model and
//! failures are forwarded without translation.

use async_trait::async_trait;
use mapper_bus::{AsyncRpcClient, BusConnection};
use mapper_types::wellknown::{
    ASSOCIATION_INTERFACE, ENDPOINTS_PROPERTY, GET_OBJECT, GET_SUBTREE, GET_SUBTREE_PATHS,
};
use mapper_types::{
    BusError, BusValue, EndpointSet, InterfaceFilter, InterfaceName, ObjectPath, QueryDepth,
    ServiceMap, SubtreeEntry,
};
use std::sync::Arc;
use tracing::debug;

use crate::domain::{MapperConfig, MapperTarget};
use crate::error::ConfigError;
use crate::ports::ObjectMapperApi;

/// Gateway to the object-mapper service.
///
/// Holds only the client and the mapper's identity, so it can be shared
/// across any number of concurrent queries.
#[derive(Clone, Debug)]
pub struct ObjectMapperGateway {
    client: AsyncRpcClient,
    target: MapperTarget,
}

impl ObjectMapperGateway {
    /// Create a gateway addressing `target` through `client`.
    pub fn new(client: AsyncRpcClient, target: MapperTarget) -> Self {
        Self { client, target }
    }

    /// Create a gateway over `connection` from validated configuration.
    pub fn from_config(
        connection: Arc<dyn BusConnection>,
        config: &MapperConfig,
    ) -> Result<Self, ConfigError> {
        let target = config.target()?;
        let mut client = AsyncRpcClient::new(connection);
        if let Some(limit) = config.call_timeout() {
            client = client.with_call_timeout(limit);
        }
        Ok(Self::new(client, target))
    }

    #[must_use]
    pub fn target(&self) -> &MapperTarget {
        &self.target
    }

    /// True when at least one service hosts `path`; false on any failure.
    pub async fn path_exists(&self, path: &ObjectPath) -> bool {
        match self.object_exists(path).await {
            Ok(exists) => exists,
            Err(e) => {
                debug!(path = %path, error = %e, "Existence check failed");
                false
            }
        }
    }

    async fn call_mapper<T: mapper_types::FromBusValue>(
        &self,
        method: &str,
        args: Vec<BusValue>,
    ) -> Result<T, BusError> {
        self.client
            .invoke(
                &self.target.service,
                &self.target.path,
                &self.target.interface,
                method,
                args,
            )
            .await
    }
}

/// Query arguments for the subtree methods: `(s path, i depth, as interfaces)`.
fn subtree_args(root: &ObjectPath, depth: QueryDepth, filter: &InterfaceFilter) -> Vec<BusValue> {
    vec![
        BusValue::from(root.as_str()),
        BusValue::from(depth),
        BusValue::from(filter),
    ]
}

#[async_trait]
impl ObjectMapperApi for ObjectMapperGateway {
    async fn get_object(
        &self,
        path: &ObjectPath,
        filter: &InterfaceFilter,
    ) -> Result<ServiceMap, BusError> {
        let services: ServiceMap = self
            .call_mapper(
                GET_OBJECT,
                vec![BusValue::from(path.as_str()), BusValue::from(filter)],
            )
            .await?;
        debug!(path = %path, services = services.len(), "GetObject resolved");
        Ok(services)
    }

    async fn get_subtree(
        &self,
        root: &ObjectPath,
        depth: QueryDepth,
        filter: &InterfaceFilter,
    ) -> Result<Vec<SubtreeEntry>, BusError> {
        let listing: Vec<(ObjectPath, ServiceMap)> = self
            .call_mapper(GET_SUBTREE, subtree_args(root, depth, filter))
            .await?;
        debug!(
            root = %root,
            depth = depth.to_wire(),
            entries = listing.len(),
            "GetSubTree resolved"
        );
        Ok(listing
            .into_iter()
            .map(|(path, services)| SubtreeEntry::new(path, services))
            .collect())
    }

    async fn get_subtree_paths(
        &self,
        root: &ObjectPath,
        depth: QueryDepth,
        filter: &InterfaceFilter,
    ) -> Result<Vec<ObjectPath>, BusError> {
        let paths: Vec<ObjectPath> = self
            .call_mapper(GET_SUBTREE_PATHS, subtree_args(root, depth, filter))
            .await?;
        debug!(
            root = %root,
            depth = depth.to_wire(),
            paths = paths.len(),
            "GetSubTreePaths resolved"
        );
        Ok(paths)
    }

    async fn get_association_endpoints(
        &self,
        association: &ObjectPath,
    ) -> Result<EndpointSet, BusError> {
        let endpoints: EndpointSet = self
            .client
            .read_property(
                &self.target.service,
                association,
                &InterfaceName::from(ASSOCIATION_INTERFACE),
                ENDPOINTS_PROPERTY,
            )
            .await?;
        debug!(
            association = %association,
            endpoints = endpoints.len(),
            "Association endpoints resolved"
        );
        Ok(endpoints)
    }
}
