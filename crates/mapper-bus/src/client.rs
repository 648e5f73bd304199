//! # Async RPC Client
//!
//! Typed method calls and property reads over a [`BusConnection`].

use mapper_telemetry::record_bus_call;
use mapper_types::wellknown::{PROPERTIES_GET, PROPERTIES_INTERFACE};
use mapper_types::{BusError, BusValue, FromBusValue, InterfaceName, ObjectPath, ServiceName};
use std::sync::Arc;
use std::time::{Duration, Instant};
use tokio::time::timeout;
use tracing::{debug, warn};

use crate::connection::BusConnection;
use crate::message::MethodCall;

/// Issues remote method calls and decodes their replies.
///
/// Cheap to clone; clones share the connection. The client holds no
/// per-call state, so any number of calls may be in flight at once.
#[derive(Clone)]
pub struct AsyncRpcClient {
    /// Injected transport.
    connection: Arc<dyn BusConnection>,
    /// Optional upper bound on the wait for each reply.
    call_timeout: Option<Duration>,
}

impl AsyncRpcClient {
    /// Create a client over an already-open connection.
    pub fn new(connection: Arc<dyn BusConnection>) -> Self {
        Self {
            connection,
            call_timeout: None,
        }
    }

    /// Bound every call by `limit`; an expired call fails with
    /// [`BusError::Timeout`].
    #[must_use]
    pub fn with_call_timeout(mut self, limit: Duration) -> Self {
        self.call_timeout = Some(limit);
        self
    }

    #[must_use]
    pub fn call_timeout(&self) -> Option<Duration> {
        self.call_timeout
    }

    /// Invoke `interface.method` on `path` at `service` and decode the reply.
    ///
    /// # Errors
    ///
    /// The transport's failure status unchanged, [`BusError::Timeout`] when
    /// the call timeout expires, or [`BusError::Protocol`] when the reply
    /// does not decode as `T`.
    pub async fn invoke<T: FromBusValue>(
        &self,
        service: &ServiceName,
        path: &ObjectPath,
        interface: &InterfaceName,
        method: &str,
        args: Vec<BusValue>,
    ) -> Result<T, BusError> {
        let call = MethodCall::new(service.clone(), path.clone(), interface.clone(), method)
            .with_args(args);
        let reply = self.dispatch(call).await?;
        T::from_bus_value(reply).map_err(|e| {
            warn!(method = method, path = %path, error = %e, "Reply did not decode");
            BusError::from(e)
        })
    }

    /// Read `interface.property` of the object at `path` hosted by `service`.
    ///
    /// Dispatched as `org.freedesktop.DBus.Properties.Get`; the variant
    /// wrapper of the reply is removed before decoding.
    pub async fn read_property<T: FromBusValue>(
        &self,
        service: &ServiceName,
        path: &ObjectPath,
        interface: &InterfaceName,
        property: &str,
    ) -> Result<T, BusError> {
        let reply: BusValue = self
            .invoke(
                service,
                path,
                &InterfaceName::from(PROPERTIES_INTERFACE),
                PROPERTIES_GET,
                vec![interface.into(), property.into()],
            )
            .await?;
        T::from_bus_value(reply.into_unwrapped()).map_err(|e| {
            warn!(
                property = property,
                interface = %interface,
                path = %path,
                error = %e,
                "Property value did not decode"
            );
            BusError::from(e)
        })
    }

    async fn dispatch(&self, call: MethodCall) -> Result<BusValue, BusError> {
        let member = call.member.clone();
        let serial = call.serial;
        let started = Instant::now();

        debug!(
            serial = %serial,
            destination = %call.destination,
            path = %call.path,
            interface = %call.interface,
            member = %member,
            "Issuing method call"
        );

        let result = match self.call_timeout {
            Some(limit) => match timeout(limit, self.connection.call(call)).await {
                Ok(result) => result,
                Err(_) => Err(BusError::Timeout {
                    member: member.clone(),
                    after_ms: u64::try_from(limit.as_millis()).unwrap_or(u64::MAX),
                }),
            },
            None => self.connection.call(call).await,
        };

        let elapsed = started.elapsed().as_secs_f64();
        match &result {
            Ok(_) => {
                record_bus_call(&member, "ok", elapsed);
                debug!(serial = %serial, member = %member, "Method call succeeded");
            }
            Err(e) => {
                record_bus_call(&member, e.kind().as_str(), elapsed);
                debug!(
                    serial = %serial,
                    member = %member,
                    kind = e.kind().as_str(),
                    error = %e,
                    "Method call failed"
                );
            }
        }

        result
    }
}

impl std::fmt::Debug for AsyncRpcClient {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("AsyncRpcClient")
            .field("call_timeout", &self.call_timeout)
            .finish_non_exhaustive()
    }
}
