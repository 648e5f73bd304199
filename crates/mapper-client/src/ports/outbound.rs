//! Outbound Ports (Driven Ports)
//!
//! The mapper queries the association resolver depends on. The production
//! implementation is [`crate::adapters::ObjectMapperGateway`]; tests may
//! substitute their own.

use async_trait::async_trait;
use mapper_types::{
    BusError, EndpointSet, InterfaceFilter, ObjectPath, QueryDepth, ServiceMap, SubtreeEntry,
};

/// Typed view of the object-mapper service (Driven Port)
///
/// Every method issues exactly one remote call. A failure is the status of
/// that call, forwarded unchanged. Nothing is cached between calls.
#[async_trait]
pub trait ObjectMapperApi: Send + Sync {
    /// Services hosting `path`, restricted to those implementing any of
    /// `filter` (`GetObject`).
    async fn get_object(
        &self,
        path: &ObjectPath,
        filter: &InterfaceFilter,
    ) -> Result<ServiceMap, BusError>;

    /// True when at least one service hosts `path`.
    async fn object_exists(&self, path: &ObjectPath) -> Result<bool, BusError> {
        let services = self.get_object(path, &InterfaceFilter::any()).await?;
        Ok(!services.is_empty())
    }

    /// Objects below `root` with their services (`GetSubTree`).
    async fn get_subtree(
        &self,
        root: &ObjectPath,
        depth: QueryDepth,
        filter: &InterfaceFilter,
    ) -> Result<Vec<SubtreeEntry>, BusError>;

    /// Paths of the objects below `root` (`GetSubTreePaths`).
    async fn get_subtree_paths(
        &self,
        root: &ObjectPath,
        depth: QueryDepth,
        filter: &InterfaceFilter,
    ) -> Result<Vec<ObjectPath>, BusError>;

    /// Paths named by the `endpoints` property of `association`.
    async fn get_association_endpoints(
        &self,
        association: &ObjectPath,
    ) -> Result<EndpointSet, BusError>;
}
