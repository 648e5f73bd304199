//! In-Memory Object Mapper
//!
//! A fake object-mapper service for tests and local development. It serves
//! `GetObject`, `GetSubTree`, `GetSubTreePaths` and the association
//! `endpoints` property from an in-process object tree, honouring depth and
//! interface filters the way the real mapper does.
//!
//! Clones share state, so a test can keep a handle and mutate the tree
//! after the service was attached to a bus.

use async_trait::async_trait;
use mapper_bus::{InMemoryBus, MethodCall, MethodHandler};
use mapper_types::wellknown::{
    ASSOCIATION_INTERFACE, ENDPOINTS_PROPERTY, GET_OBJECT, GET_SUBTREE, GET_SUBTREE_PATHS,
    INVALID_ARGS_ERROR, MAPPER_INTERFACE, MAPPER_PATH, MAPPER_SERVICE, PROPERTIES_GET,
    PROPERTIES_INTERFACE, RESOURCE_NOT_FOUND_ERROR,
};
use mapper_types::{
    BusError, BusValue, FromBusValue, InterfaceFilter, InterfaceName, ObjectPath, QueryDepth,
    ServiceMap, ServiceName,
};
use std::collections::{BTreeMap, HashMap};
use std::sync::{Arc, RwLock, RwLockReadGuard, RwLockWriteGuard};
use tracing::debug;

const UNKNOWN_METHOD_ERROR: &str = "org.freedesktop.DBus.Error.UnknownMethod";
const UNKNOWN_OBJECT_ERROR: &str = "org.freedesktop.DBus.Error.UnknownObject";
const UNKNOWN_INTERFACE_ERROR: &str = "org.freedesktop.DBus.Error.UnknownInterface";
const UNKNOWN_PROPERTY_ERROR: &str = "org.freedesktop.DBus.Error.UnknownProperty";
const FAILED_ERROR: &str = "org.freedesktop.DBus.Error.Failed";

#[derive(Default)]
struct MapperState {
    /// Hosted objects and their services.
    objects: BTreeMap<ObjectPath, ServiceMap>,
    /// Association objects and their endpoints, in insertion order.
    associations: BTreeMap<ObjectPath, Vec<ObjectPath>>,
    /// Injected failures keyed by member name.
    faults: HashMap<String, BusError>,
}

/// In-process stand-in for the object-mapper service.
#[derive(Clone, Default)]
pub struct InMemoryObjectMapper {
    state: Arc<RwLock<MapperState>>,
}

impl InMemoryObjectMapper {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Register this mapper on `bus` under the well-known mapper name.
    pub fn attach(&self, bus: &InMemoryBus) {
        self.attach_as(bus, ServiceName::from(MAPPER_SERVICE));
    }

    /// Register this mapper on `bus` under `service`.
    pub fn attach_as(&self, bus: &InMemoryBus, service: ServiceName) {
        bus.register(service, Arc::new(self.clone()));
    }

    /// Record that `service` hosts `path` with `interfaces`.
    ///
    /// Interfaces already listed for the service are not repeated.
    pub fn add_object(&self, path: ObjectPath, service: &str, interfaces: &[&str]) {
        if let Ok(mut state) = self.state.write() {
            let listed = state
                .objects
                .entry(path)
                .or_default()
                .entry(ServiceName::from(service))
                .or_default();
            for interface in interfaces {
                let interface = InterfaceName::from(*interface);
                if !listed.contains(&interface) {
                    listed.push(interface);
                }
            }
        }
    }

    pub fn remove_object(&self, path: &ObjectPath) -> bool {
        self.write_state()
            .map(|mut state| state.objects.remove(path).is_some())
            .unwrap_or(false)
    }

    /// Create or replace the association at `path`.
    pub fn set_association(&self, path: ObjectPath, endpoints: Vec<ObjectPath>) {
        if let Ok(mut state) = self.state.write() {
            state.associations.insert(path, endpoints);
        }
    }

    pub fn remove_association(&self, path: &ObjectPath) -> bool {
        self.write_state()
            .map(|mut state| state.associations.remove(path).is_some())
            .unwrap_or(false)
    }

    /// Make every call to `member` fail with `error` until cleared.
    pub fn fail_method(&self, member: &str, error: BusError) {
        if let Ok(mut state) = self.state.write() {
            state.faults.insert(member.to_string(), error);
        }
    }

    pub fn clear_faults(&self) {
        if let Ok(mut state) = self.state.write() {
            state.faults.clear();
        }
    }

    #[must_use]
    pub fn object_count(&self) -> usize {
        self.read_state().map(|s| s.objects.len()).unwrap_or(0)
    }

    fn read_state(&self) -> Result<RwLockReadGuard<'_, MapperState>, BusError> {
        self.state
            .read()
            .map_err(|_| BusError::remote(FAILED_ERROR, "mapper state poisoned"))
    }

    fn write_state(&self) -> Result<RwLockWriteGuard<'_, MapperState>, BusError> {
        self.state
            .write()
            .map_err(|_| BusError::remote(FAILED_ERROR, "mapper state poisoned"))
    }

    fn get_object(&self, call: &MethodCall) -> Result<BusValue, BusError> {
        let path = path_arg(call, 0)?;
        let filter = filter_arg(call, 1)?;
        let state = self.read_state()?;

        let services = state
            .objects
            .get(&path)
            .map(|services| filter_services(services, &filter))
            .filter(|services| !services.is_empty())
            .ok_or_else(|| {
                BusError::remote(RESOURCE_NOT_FOUND_ERROR, format!("{} not found", path))
            })?;

        Ok(BusValue::from(services))
    }

    /// Objects strictly below `root` within `depth` that pass `filter`,
    /// each with the services that pass it.
    fn subtree(&self, call: &MethodCall) -> Result<Vec<(ObjectPath, ServiceMap)>, BusError> {
        let root = path_arg(call, 0)?;
        let depth = QueryDepth::from_wire(arg::<i32>(call, 1)?);
        let filter = filter_arg(call, 2)?;
        let state = self.read_state()?;

        let root_known = root.is_root()
            || state
                .objects
                .keys()
                .any(|path| *path == root || path.is_descendant_of(&root));
        if !root_known {
            return Err(BusError::remote(
                RESOURCE_NOT_FOUND_ERROR,
                format!("{} not found", root),
            ));
        }

        Ok(state
            .objects
            .iter()
            .filter(|(path, _)| {
                path.levels_below(&root)
                    .is_some_and(|levels| depth.admits(levels))
            })
            .map(|(path, services)| (path.clone(), filter_services(services, &filter)))
            .filter(|(_, services)| !services.is_empty())
            .collect())
    }

    fn get_subtree(&self, call: &MethodCall) -> Result<BusValue, BusError> {
        let entries = self.subtree(call)?;
        Ok(BusValue::dict(entries.into_iter().map(|(path, services)| {
            (String::from(path), BusValue::from(services))
        })))
    }

    fn get_subtree_paths(&self, call: &MethodCall) -> Result<BusValue, BusError> {
        let entries = self.subtree(call)?;
        Ok(BusValue::from(
            entries
                .into_iter()
                .map(|(path, _)| String::from(path))
                .collect::<Vec<_>>(),
        ))
    }

    fn get_property(&self, call: &MethodCall) -> Result<BusValue, BusError> {
        let interface = arg::<String>(call, 0)?;
        let property = arg::<String>(call, 1)?;
        let state = self.read_state()?;

        let endpoints = state.associations.get(&call.path).ok_or_else(|| {
            BusError::remote(UNKNOWN_OBJECT_ERROR, format!("Unknown object {}", call.path))
        })?;
        if interface != ASSOCIATION_INTERFACE {
            return Err(BusError::remote(
                UNKNOWN_INTERFACE_ERROR,
                format!("Unknown interface {}", interface),
            ));
        }
        if property != ENDPOINTS_PROPERTY {
            return Err(BusError::remote(
                UNKNOWN_PROPERTY_ERROR,
                format!("Unknown property {}", property),
            ));
        }

        Ok(BusValue::from(
            endpoints
                .iter()
                .map(|path| path.as_str().to_string())
                .collect::<Vec<_>>(),
        )
        .variant())
    }

    fn injected_fault(&self, member: &str) -> Result<(), BusError> {
        match self.read_state()?.faults.get(member) {
            Some(err) => Err(err.clone()),
            None => Ok(()),
        }
    }
}

impl std::fmt::Debug for InMemoryObjectMapper {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("InMemoryObjectMapper")
            .field("objects", &self.object_count())
            .finish_non_exhaustive()
    }
}

#[async_trait]
impl MethodHandler for InMemoryObjectMapper {
    async fn handle(&self, call: &MethodCall) -> Result<BusValue, BusError> {
        debug!(member = %call.member, path = %call.path, "In-memory mapper handling call");
        self.injected_fault(&call.member)?;

        let interface = call.interface.as_str();
        let on_mapper = call.path.as_str() == MAPPER_PATH && interface == MAPPER_INTERFACE;

        match call.member.as_str() {
            PROPERTIES_GET if interface == PROPERTIES_INTERFACE => self.get_property(call),
            GET_OBJECT if on_mapper => self.get_object(call),
            GET_SUBTREE if on_mapper => self.get_subtree(call),
            GET_SUBTREE_PATHS if on_mapper => self.get_subtree_paths(call),
            other => Err(BusError::remote(
                UNKNOWN_METHOD_ERROR,
                format!("No method {} on {} at {}", other, interface, call.path),
            )),
        }
    }
}

/// Services implementing any interface of `filter`, with full interface
/// lists; everything when the filter is empty.
fn filter_services(services: &ServiceMap, filter: &InterfaceFilter) -> ServiceMap {
    services
        .iter()
        .filter(|(_, interfaces)| filter.matches(interfaces.iter()))
        .map(|(service, interfaces)| (service.clone(), interfaces.clone()))
        .collect()
}

fn arg<T: FromBusValue>(call: &MethodCall, index: usize) -> Result<T, BusError> {
    let value = call.arg_at(index).cloned().ok_or_else(|| {
        BusError::remote(INVALID_ARGS_ERROR, format!("Missing argument {}", index))
    })?;
    T::from_bus_value(value)
        .map_err(|e| BusError::remote(INVALID_ARGS_ERROR, format!("Argument {}: {}", index, e)))
}

fn path_arg(call: &MethodCall, index: usize) -> Result<ObjectPath, BusError> {
    arg::<ObjectPath>(call, index)
}

fn filter_arg(call: &MethodCall, index: usize) -> Result<InterfaceFilter, BusError> {
    arg::<InterfaceFilter>(call, index)
}
