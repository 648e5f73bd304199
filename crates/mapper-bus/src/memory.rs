//! # In-Memory Bus
//!
//! A [`BusConnection`] that routes calls to in-process services.
//!
//! Suitable for tests and for embedding services in the same process; a
//! production deployment injects a connection to the real system bus.

use async_trait::async_trait;
use mapper_types::wellknown::SERVICE_UNKNOWN_ERROR;
use mapper_types::{BusError, BusValue, InterfaceName, ObjectPath, ServiceName};
use std::collections::HashMap;
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::{Arc, Mutex, RwLock};
use std::time::Duration;
use tracing::{debug, warn};
use uuid::Uuid;

use crate::connection::{BusConnection, MethodHandler};
use crate::message::MethodCall;

/// One call as seen by the bus, kept for inspection.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CallRecord {
    pub serial: Uuid,
    pub destination: ServiceName,
    pub path: ObjectPath,
    pub interface: InterfaceName,
    pub member: String,
}

impl From<&MethodCall> for CallRecord {
    fn from(call: &MethodCall) -> Self {
        Self {
            serial: call.serial,
            destination: call.destination.clone(),
            path: call.path.clone(),
            interface: call.interface.clone(),
            member: call.member.clone(),
        }
    }
}

/// In-memory implementation of the bus.
///
/// Calls are routed by destination service name to a registered
/// [`MethodHandler`]. Every call is appended to a call log, and an optional
/// latency is applied before the handler runs.
pub struct InMemoryBus {
    /// Registered services.
    services: RwLock<HashMap<ServiceName, Arc<dyn MethodHandler>>>,

    /// Calls received, in arrival order.
    call_log: Mutex<Vec<CallRecord>>,

    /// Total calls dispatched.
    calls_dispatched: AtomicU64,

    /// Delay applied before each call is handled.
    latency: Option<Duration>,

    /// When set, every call fails with this transport error.
    disconnected: RwLock<Option<String>>,
}

impl InMemoryBus {
    #[must_use]
    pub fn new() -> Self {
        Self {
            services: RwLock::new(HashMap::new()),
            call_log: Mutex::new(Vec::new()),
            calls_dispatched: AtomicU64::new(0),
            latency: None,
            disconnected: RwLock::new(None),
        }
    }

    /// Delay every call by `latency` before handling it.
    #[must_use]
    pub fn with_latency(mut self, latency: Duration) -> Self {
        self.latency = Some(latency);
        self
    }

    /// Register `handler` as the owner of `service`, replacing any previous
    /// owner.
    pub fn register(&self, service: ServiceName, handler: Arc<dyn MethodHandler>) {
        debug!(service = %service, "Service registered on in-memory bus");
        if let Ok(mut services) = self.services.write() {
            services.insert(service, handler);
        }
    }

    /// Remove the owner of `service`.
    pub fn unregister(&self, service: &ServiceName) -> bool {
        self.services
            .write()
            .map(|mut services| services.remove(service).is_some())
            .unwrap_or(false)
    }

    /// Make every subsequent call fail with a transport error, or restore
    /// the connection with `None`.
    pub fn set_disconnected(&self, reason: Option<&str>) {
        if let Ok(mut state) = self.disconnected.write() {
            *state = reason.map(str::to_string);
        }
    }

    /// Snapshot of the calls received so far.
    #[must_use]
    pub fn call_log(&self) -> Vec<CallRecord> {
        self.call_log
            .lock()
            .map(|log| log.clone())
            .unwrap_or_default()
    }

    /// Number of received calls with the given member name.
    #[must_use]
    pub fn calls_to(&self, member: &str) -> usize {
        self.call_log
            .lock()
            .map(|log| log.iter().filter(|c| c.member == member).count())
            .unwrap_or(0)
    }

    #[must_use]
    pub fn calls_dispatched(&self) -> u64 {
        self.calls_dispatched.load(Ordering::Relaxed)
    }

    pub fn clear_call_log(&self) {
        if let Ok(mut log) = self.call_log.lock() {
            log.clear();
        }
    }

    fn handler_for(&self, service: &ServiceName) -> Option<Arc<dyn MethodHandler>> {
        self.services
            .read()
            .ok()
            .and_then(|services| services.get(service).cloned())
    }
}

impl Default for InMemoryBus {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl BusConnection for InMemoryBus {
    async fn call(&self, call: MethodCall) -> Result<BusValue, BusError> {
        self.calls_dispatched.fetch_add(1, Ordering::Relaxed);
        if let Ok(mut log) = self.call_log.lock() {
            log.push(CallRecord::from(&call));
        }

        let disconnected = self
            .disconnected
            .read()
            .ok()
            .and_then(|state| state.clone());
        if let Some(reason) = disconnected {
            warn!(member = %call.member, reason = %reason, "Call on disconnected bus");
            return Err(BusError::transport(reason));
        }

        if let Some(latency) = self.latency {
            tokio::time::sleep(latency).await;
        }

        let Some(handler) = self.handler_for(&call.destination) else {
            debug!(destination = %call.destination, "No owner for destination");
            return Err(BusError::remote(
                SERVICE_UNKNOWN_ERROR,
                format!("The name {} was not provided by any service", call.destination),
            ));
        };

        handler.handle(&call).await
    }
}
