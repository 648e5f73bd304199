//! # Gateway Flows
//!
//! Single mapper queries through `ObjectMapperGateway`, plus the path
//! helpers callers combine with them.

#[cfg(test)]
mod tests {
    use std::sync::Arc;

    use mapper_bus::InMemoryBus;
    use mapper_client::{InMemoryObjectMapper, MapperClient, MapperConfig, ObjectMapperApi};
    use mapper_telemetry::{init_telemetry, TelemetryConfig, TelemetryError};
    use mapper_types::wellknown::{GET_OBJECT, MAPPER_PATH, MAPPER_SERVICE};
    use mapper_types::{
        escape_for_bus, nth_path_segment, ErrorKind, InterfaceFilter, QueryDepth, ServiceName,
    };

    use crate::fixtures::{
        chassis, fan, path, psu, Harness, CHASSIS, FAN_SENSOR, INVENTORY_MANAGER, ITEM_PSU, SYSTEM,
    };

    #[tokio::test]
    async fn test_object_exists_and_path_exists_agree() {
        let harness = Harness::chassis(2, 1);
        let gateway = harness.client.gateway();

        assert!(gateway.object_exists(&path(CHASSIS)).await.unwrap());
        assert!(gateway.path_exists(&path(CHASSIS)).await);

        let missing = fan(7);
        assert_eq!(
            gateway.object_exists(&missing).await.unwrap_err().kind(),
            ErrorKind::NotFound
        );
        assert!(!gateway.path_exists(&missing).await);
        assert_eq!(harness.bus.calls_to(GET_OBJECT), 4);
    }

    #[tokio::test]
    async fn test_get_object_with_filter() {
        let harness = Harness::chassis(1, 0);
        let services = harness
            .client
            .gateway()
            .get_object(&fan(0), &InterfaceFilter::new(["xyz.openbmc_project.Sensor.Value"]))
            .await
            .unwrap();
        assert_eq!(services.len(), 1);
        assert!(services.contains_key(&ServiceName::from(FAN_SENSOR)));
    }

    #[tokio::test]
    async fn test_subtree_depth_one_below_system() {
        let harness = Harness::chassis(3, 2);
        let paths = harness
            .client
            .gateway()
            .get_subtree_paths(&path(SYSTEM), QueryDepth::levels(1), &InterfaceFilter::any())
            .await
            .unwrap();
        assert_eq!(paths, vec![path(CHASSIS), psu(0), psu(1)]);
    }

    #[tokio::test]
    async fn test_subtree_filtered_to_power_supplies() {
        let harness = Harness::chassis(3, 2);
        let entries = harness
            .client
            .gateway()
            .get_subtree(&path(SYSTEM), QueryDepth::UNLIMITED, &InterfaceFilter::new([ITEM_PSU]))
            .await
            .unwrap();
        assert_eq!(entries.len(), 2);
        for entry in &entries {
            assert!(entry
                .services
                .contains_key(&ServiceName::from(INVENTORY_MANAGER)));
        }
    }

    #[tokio::test]
    async fn test_alternate_mapper_identity() {
        let bus = Arc::new(InMemoryBus::new());
        let mapper: InMemoryObjectMapper = chassis(1, 0);
        mapper.attach_as(&bus, ServiceName::from("org.example.TestMapper"));

        let default_client = MapperClient::new(bus.clone(), &MapperConfig::default()).unwrap();
        assert!(!default_client.gateway().path_exists(&fan(0)).await);

        let config = MapperConfig::default().with_service_name("org.example.TestMapper");
        let client = MapperClient::new(bus.clone(), &config).unwrap();
        assert!(client.gateway().path_exists(&fan(0)).await);

        let last = bus.call_log().pop().unwrap();
        assert_eq!(last.destination.as_str(), "org.example.TestMapper");
        assert_eq!(last.path.as_str(), MAPPER_PATH);
        assert_ne!(last.destination.as_str(), MAPPER_SERVICE);
    }

    #[test]
    fn test_names_from_resolved_paths() {
        let resolved = fan(3);
        let leaf = nth_path_segment(resolved.as_str(), 5).unwrap();
        assert_eq!(leaf, "fan3");
        assert_eq!(resolved.leaf(), Some("fan3"));
        assert!(nth_path_segment(resolved.as_str(), 6).is_err());

        assert_eq!(escape_for_bus("Fan Tray #3"), "Fan_Tray__3");
        let child = path(CHASSIS).join(&escape_for_bus("Fan Tray #3")).unwrap();
        assert_eq!(child.leaf(), Some("Fan_Tray__3"));
    }

    #[test]
    fn test_telemetry_installs_once() {
        let config = TelemetryConfig {
            console_output: false,
            ..TelemetryConfig::default()
        };
        assert!(init_telemetry(&config).is_ok());
        assert!(matches!(
            init_telemetry(&config),
            Err(TelemetryError::LoggingInit(_))
        ));
    }
}
