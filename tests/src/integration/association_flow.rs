//! # Association Resolution Flows
//!
//! Runs the association pipeline end to end: `MapperClient` over the
//! in-memory bus, answered by the in-memory object mapper.
//!
//! ## Flows Tested:
//!
//! 1. **Cooling**: chassis `cooled_by` resolved against the inventory
//! 2. **Scoping**: endpoints outside the search root are dropped
//! 3. **Failures**: transport and not-found errors surface unchanged
//! 4. **Load**: many concurrent runs over one connection

#[cfg(test)]
mod tests {
    use futures::future::join_all;
    use std::time::Duration;
    use tokio_util::sync::CancellationToken;

    use mapper_bus::InMemoryBus;
    use mapper_client::{AssociationApi, MapperConfig, ResolveStrategy};
    use mapper_types::wellknown::{GET_SUBTREE_PATHS, MAPPER_SERVICE, PROPERTIES_GET};
    use mapper_types::{BusError, ErrorKind, InterfaceFilter, ObjectPath, QueryDepth, ServiceName};

    use crate::fixtures::{
        chassis, fan, path, Harness, CHASSIS, COOLED_BY, INVENTORY, ITEM_FAN, POWERED_BY,
    };

    async fn cooled_by(harness: &Harness) -> Result<Vec<ObjectPath>, BusError> {
        harness
            .client
            .resolver()
            .get_associated_subtree_paths(
                &path(COOLED_BY),
                &path(INVENTORY),
                QueryDepth::UNLIMITED,
                &InterfaceFilter::new([ITEM_FAN]),
            )
            .await
    }

    // =========================================================================
    // COOLING
    // =========================================================================

    #[tokio::test]
    async fn test_cooled_by_resolves_existing_fans_in_path_order() {
        let harness = Harness::chassis(12, 2);
        let fans = cooled_by(&harness).await.unwrap();

        // lexicographic, so fan10 sorts before fan2
        assert_eq!(
            fans,
            vec![fan(0), fan(10), fan(2), fan(4), fan(6), fan(8)]
        );
    }

    #[tokio::test]
    async fn test_strategies_agree() {
        let sequential = Harness::chassis(9, 3);
        let concurrent = Harness::new(
            InMemoryBus::new(),
            chassis(9, 3),
            &MapperConfig::default().with_strategy(ResolveStrategy::Concurrent),
        );
        assert_eq!(
            cooled_by(&sequential).await.unwrap(),
            cooled_by(&concurrent).await.unwrap()
        );
    }

    #[tokio::test]
    async fn test_associated_subtree_carries_every_service() {
        let harness = Harness::chassis(4, 1);
        let entries = harness
            .client
            .resolver()
            .get_associated_subtree(
                &path(COOLED_BY),
                &path(CHASSIS),
                QueryDepth::levels(1),
                &InterfaceFilter::any(),
            )
            .await
            .unwrap();

        let paths: Vec<&ObjectPath> = entries.iter().map(|e| &e.path).collect();
        assert_eq!(paths, vec![&fan(0), &fan(2)]);
        assert!(entries.iter().all(|e| e.services.len() == 2));
    }

    // =========================================================================
    // SCOPING
    // =========================================================================

    #[tokio::test]
    async fn test_endpoints_outside_root_give_empty_result() {
        // power supplies live beside the chassis, not below it
        let harness = Harness::chassis(2, 2);
        let result = harness
            .client
            .resolver()
            .get_associated_subtree_paths(
                &path(POWERED_BY),
                &path(CHASSIS),
                QueryDepth::UNLIMITED,
                &InterfaceFilter::any(),
            )
            .await
            .unwrap();
        assert!(result.is_empty());
    }

    #[tokio::test]
    async fn test_association_without_endpoints_skips_subtree() {
        let harness = Harness::chassis(4, 0);
        let result = harness
            .client
            .resolver()
            .get_associated_subtree_paths(
                &path(POWERED_BY),
                &path(INVENTORY),
                QueryDepth::UNLIMITED,
                &InterfaceFilter::any(),
            )
            .await
            .unwrap();
        assert!(result.is_empty());
        assert_eq!(harness.bus.calls_to(PROPERTIES_GET), 1);
        assert_eq!(harness.bus.calls_to(GET_SUBTREE_PATHS), 0);
    }

    #[tokio::test]
    async fn test_result_tracks_mapper_state() {
        let harness = Harness::chassis(4, 0);
        assert_eq!(cooled_by(&harness).await.unwrap(), vec![fan(0), fan(2)]);

        harness.mapper.remove_object(&fan(2));
        assert_eq!(cooled_by(&harness).await.unwrap(), vec![fan(0)]);
    }

    // =========================================================================
    // FAILURES
    // =========================================================================

    #[tokio::test]
    async fn test_removed_association_is_not_found() {
        let harness = Harness::chassis(4, 0);
        harness.mapper.remove_association(&path(COOLED_BY));
        let err = cooled_by(&harness).await.unwrap_err();
        assert_eq!(err.kind(), ErrorKind::NotFound);
    }

    #[tokio::test]
    async fn test_mapper_gone_from_bus() {
        let harness = Harness::chassis(4, 0);
        harness.bus.unregister(&ServiceName::from(MAPPER_SERVICE));
        let err = cooled_by(&harness).await.unwrap_err();
        assert_eq!(err.kind(), ErrorKind::NotFound);
        assert!(err.to_string().contains("ServiceUnknown"));
    }

    #[tokio::test]
    async fn test_disconnect_surfaces_transport_failure() {
        let harness = Harness::chassis(4, 0);
        harness.bus.set_disconnected(Some("bus daemon restarted"));
        assert_eq!(
            cooled_by(&harness).await,
            Err(BusError::transport("bus daemon restarted"))
        );
    }

    #[tokio::test(start_paused = true)]
    async fn test_slow_mapper_hits_call_timeout() {
        let harness = Harness::new(
            InMemoryBus::new().with_latency(Duration::from_secs(60)),
            chassis(2, 0),
            &MapperConfig::default().with_call_timeout_ms(500),
        );
        let err = cooled_by(&harness).await.unwrap_err();
        assert_eq!(err.kind(), ErrorKind::TransportFailure);
    }

    #[tokio::test(start_paused = true)]
    async fn test_cancel_slow_run() {
        let harness = Harness::new(
            InMemoryBus::new().with_latency(Duration::from_secs(60)),
            chassis(2, 0),
            &MapperConfig::default(),
        );
        let token = CancellationToken::new();
        let canceller = token.clone();
        tokio::spawn(async move {
            tokio::time::sleep(Duration::from_secs(1)).await;
            canceller.cancel();
        });

        let err = harness
            .client
            .resolver()
            .get_associated_subtree_paths_cancellable(
                &path(COOLED_BY),
                &path(INVENTORY),
                QueryDepth::UNLIMITED,
                &InterfaceFilter::any(),
                &token,
            )
            .await
            .unwrap_err();
        assert_eq!(err, BusError::Cancelled);
    }

    // =========================================================================
    // LOAD
    // =========================================================================

    #[tokio::test]
    async fn test_concurrent_runs_over_one_connection() {
        let harness = Harness::new(
            InMemoryBus::new(),
            chassis(32, 4),
            &MapperConfig::default().with_strategy(ResolveStrategy::Concurrent),
        );
        let expected = cooled_by(&harness).await.unwrap();
        assert_eq!(expected.len(), 16);

        let runs = (0..24).map(|_| cooled_by(&harness));
        for result in join_all(runs).await {
            assert_eq!(result.unwrap(), expected);
        }
        assert_eq!(harness.bus.calls_to(GET_SUBTREE_PATHS), 25);
    }

    #[tokio::test]
    async fn test_runs_are_counted_in_metrics() {
        mapper_telemetry::register_metrics().unwrap();
        let harness = Harness::chassis(2, 0);
        cooled_by(&harness).await.unwrap();

        let text = mapper_telemetry::encode_metrics().unwrap();
        assert!(text.contains("mapper_resolver_runs_total"));
        assert!(text.contains("mapper_bus_calls_total"));
    }
}
