//! Association Resolver
//!
//! Runs the association pipeline: read the association's endpoints, list
//! the subtree below the search root, keep what appears in both.
//!
//! Each run is one future with its own stage tracker; the resolver itself
//! holds only the mapper port and the strategy.

use async_trait::async_trait;
use mapper_telemetry::record_resolver_run;
use mapper_types::{BusError, EndpointSet, InterfaceFilter, ObjectPath, QueryDepth, SubtreeEntry};
use std::future::Future;
use std::sync::Arc;
use tokio_util::sync::CancellationToken;
use tracing::debug;
use uuid::Uuid;

use crate::domain::{
    intersect_entries, intersect_paths, ResolveOutcome, ResolveStage, ResolveStrategy,
};
use crate::ports::{AssociationApi, ObjectMapperApi};

/// Resolves association-filtered subtree listings.
pub struct AssociationResolver<M: ObjectMapperApi> {
    /// Mapper queries (driven port)
    mapper: Arc<M>,
    /// Scheduling of the two queries
    strategy: ResolveStrategy,
}

impl<M: ObjectMapperApi> AssociationResolver<M> {
    /// Create a resolver using the sequential strategy.
    pub fn new(mapper: Arc<M>) -> Self {
        Self {
            mapper,
            strategy: ResolveStrategy::Sequential,
        }
    }

    #[must_use]
    pub fn with_strategy(mut self, strategy: ResolveStrategy) -> Self {
        self.strategy = strategy;
        self
    }

    #[must_use]
    pub fn strategy(&self) -> ResolveStrategy {
        self.strategy
    }

    #[must_use]
    pub fn mapper(&self) -> &Arc<M> {
        &self.mapper
    }

    async fn resolve<T, S, Fut>(
        &self,
        association: &ObjectPath,
        root: &ObjectPath,
        subtree: S,
        merge: fn(Vec<T>, &EndpointSet) -> Vec<T>,
    ) -> Result<Vec<T>, BusError>
    where
        S: FnOnce() -> Fut,
        Fut: Future<Output = Result<Vec<T>, BusError>>,
    {
        let mut run = StageTracker::new(association, root);

        run.advance(ResolveStage::AwaitingEndpoints);
        match self.strategy {
            ResolveStrategy::Sequential => {
                let endpoints = match self.mapper.get_association_endpoints(association).await {
                    Ok(endpoints) => endpoints,
                    Err(e) => return run.fail(e),
                };
                if endpoints.is_empty() {
                    return run.finish_empty(ResolveOutcome::EmptyEndpoints);
                }

                run.advance(ResolveStage::AwaitingSubtree);
                let listing = subtree().await;
                run.merge_listing(&endpoints, listing, merge)
            }
            ResolveStrategy::Concurrent => {
                let (endpoints, listing) =
                    tokio::join!(self.mapper.get_association_endpoints(association), subtree());
                run.complete(endpoints, listing, merge)
            }
        }
    }

    async fn cancellable<T, F>(token: &CancellationToken, pipeline: F) -> Result<T, BusError>
    where
        F: Future<Output = Result<T, BusError>>,
    {
        tokio::select! {
            biased;
            _ = token.cancelled() => {
                debug!("Association pipeline cancelled");
                record_resolver_run(ResolveOutcome::failed(&BusError::Cancelled).as_str());
                Err(BusError::Cancelled)
            }
            result = pipeline => result,
        }
    }
}

impl<M: ObjectMapperApi> Clone for AssociationResolver<M> {
    fn clone(&self) -> Self {
        Self {
            mapper: Arc::clone(&self.mapper),
            strategy: self.strategy,
        }
    }
}

#[async_trait]
impl<M: ObjectMapperApi> AssociationApi for AssociationResolver<M> {
    async fn get_associated_subtree_paths(
        &self,
        association: &ObjectPath,
        root: &ObjectPath,
        depth: QueryDepth,
        filter: &InterfaceFilter,
    ) -> Result<Vec<ObjectPath>, BusError> {
        self.resolve(
            association,
            root,
            || self.mapper.get_subtree_paths(root, depth, filter),
            intersect_paths,
        )
        .await
    }

    async fn get_associated_subtree(
        &self,
        association: &ObjectPath,
        root: &ObjectPath,
        depth: QueryDepth,
        filter: &InterfaceFilter,
    ) -> Result<Vec<SubtreeEntry>, BusError> {
        self.resolve(
            association,
            root,
            || self.mapper.get_subtree(root, depth, filter),
            intersect_entries,
        )
        .await
    }

    async fn get_associated_subtree_paths_cancellable(
        &self,
        association: &ObjectPath,
        root: &ObjectPath,
        depth: QueryDepth,
        filter: &InterfaceFilter,
        token: &CancellationToken,
    ) -> Result<Vec<ObjectPath>, BusError> {
        Self::cancellable(
            token,
            self.get_associated_subtree_paths(association, root, depth, filter),
        )
        .await
    }

    async fn get_associated_subtree_cancellable(
        &self,
        association: &ObjectPath,
        root: &ObjectPath,
        depth: QueryDepth,
        filter: &InterfaceFilter,
        token: &CancellationToken,
    ) -> Result<Vec<SubtreeEntry>, BusError> {
        Self::cancellable(
            token,
            self.get_associated_subtree(association, root, depth, filter),
        )
        .await
    }
}

/// Stage bookkeeping for one pipeline run.
///
/// Every transition is logged under the run's correlation id, and the
/// terminal outcome is counted once.
struct StageTracker<'a> {
    run_id: Uuid,
    association: &'a ObjectPath,
    root: &'a ObjectPath,
    stage: ResolveStage,
}

impl<'a> StageTracker<'a> {
    fn new(association: &'a ObjectPath, root: &'a ObjectPath) -> Self {
        Self {
            run_id: Uuid::new_v4(),
            association,
            root,
            stage: ResolveStage::Idle,
        }
    }

    fn advance(&mut self, next: ResolveStage) {
        debug!(
            run_id = %self.run_id,
            association = %self.association,
            root = %self.root,
            from = self.stage.as_str(),
            to = next.as_str(),
            "Association pipeline stage"
        );
        self.stage = next;
    }

    fn fail<T>(mut self, err: BusError) -> Result<Vec<T>, BusError> {
        let failed_in = self.stage;
        self.advance(ResolveStage::Failed);
        debug!(
            run_id = %self.run_id,
            stage = failed_in.as_str(),
            kind = err.kind().as_str(),
            error = %err,
            "Association pipeline failed"
        );
        record_resolver_run(ResolveOutcome::failed(&err).as_str());
        Err(err)
    }

    fn finish_empty<T>(mut self, outcome: ResolveOutcome) -> Result<Vec<T>, BusError> {
        self.advance(ResolveStage::Done);
        record_resolver_run(outcome.as_str());
        Ok(Vec::new())
    }

    /// Judge both replies of a concurrent run, endpoints first.
    fn complete<T>(
        mut self,
        endpoints: Result<EndpointSet, BusError>,
        listing: Result<Vec<T>, BusError>,
        merge: fn(Vec<T>, &EndpointSet) -> Vec<T>,
    ) -> Result<Vec<T>, BusError> {
        let endpoints = match endpoints {
            Ok(endpoints) => endpoints,
            Err(e) => return self.fail(e),
        };
        if endpoints.is_empty() {
            return self.finish_empty(ResolveOutcome::EmptyEndpoints);
        }
        self.advance(ResolveStage::AwaitingSubtree);
        self.merge_listing(&endpoints, listing, merge)
    }

    fn merge_listing<T>(
        mut self,
        endpoints: &EndpointSet,
        listing: Result<Vec<T>, BusError>,
        merge: fn(Vec<T>, &EndpointSet) -> Vec<T>,
    ) -> Result<Vec<T>, BusError> {
        let listing = match listing {
            Ok(listing) => listing,
            Err(e) => return self.fail(e),
        };
        if listing.is_empty() {
            return self.finish_empty(ResolveOutcome::EmptySubtree);
        }

        self.advance(ResolveStage::Merging);
        let listed = listing.len();
        let matched = merge(listing, endpoints);
        self.advance(ResolveStage::Done);
        debug!(
            run_id = %self.run_id,
            endpoints = endpoints.len(),
            listed = listed,
            matched = matched.len(),
            "Association pipeline merged"
        );
        record_resolver_run(ResolveOutcome::Merged.as_str());
        Ok(matched)
    }
}
