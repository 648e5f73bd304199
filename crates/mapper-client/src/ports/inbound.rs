//! Inbound Ports (Driving Ports)
//!
//! The API offered to callers that need association-filtered listings.

use async_trait::async_trait;
use mapper_types::{BusError, InterfaceFilter, ObjectPath, QueryDepth, SubtreeEntry};
use tokio_util::sync::CancellationToken;

/// Association resolution API (Driving Port)
///
/// Every operation answers: which objects below `root` are also endpoints
/// of `association`? Results are ordered ascending by path and contain no
/// duplicates.
#[async_trait]
pub trait AssociationApi: Send + Sync {
    /// Paths below `root` (within `depth`, passing `filter`) that are
    /// endpoints of `association`.
    ///
    /// An association with no endpoints, or a root with no matching
    /// objects, gives `Ok(vec![])`. A failing query gives that query's
    /// error unchanged.
    async fn get_associated_subtree_paths(
        &self,
        association: &ObjectPath,
        root: &ObjectPath,
        depth: QueryDepth,
        filter: &InterfaceFilter,
    ) -> Result<Vec<ObjectPath>, BusError>;

    /// Like [`AssociationApi::get_associated_subtree_paths`], returning
    /// each match with its hosting services.
    async fn get_associated_subtree(
        &self,
        association: &ObjectPath,
        root: &ObjectPath,
        depth: QueryDepth,
        filter: &InterfaceFilter,
    ) -> Result<Vec<SubtreeEntry>, BusError>;

    /// [`AssociationApi::get_associated_subtree_paths`], abandoned with
    /// [`BusError::Cancelled`] once `token` fires.
    async fn get_associated_subtree_paths_cancellable(
        &self,
        association: &ObjectPath,
        root: &ObjectPath,
        depth: QueryDepth,
        filter: &InterfaceFilter,
        token: &CancellationToken,
    ) -> Result<Vec<ObjectPath>, BusError>;

    /// [`AssociationApi::get_associated_subtree`], abandoned with
    /// [`BusError::Cancelled`] once `token` fires.
    async fn get_associated_subtree_cancellable(
        &self,
        association: &ObjectPath,
        root: &ObjectPath,
        depth: QueryDepth,
        filter: &InterfaceFilter,
        token: &CancellationToken,
    ) -> Result<Vec<SubtreeEntry>, BusError>;
}
