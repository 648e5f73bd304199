//! # Bus Connection
//!
//! The transport seam. Connection establishment, message framing and
//! reply routing belong to the implementation behind this trait; the client
//! only needs "send one call, get one reply".

use async_trait::async_trait;
use mapper_types::{BusError, BusValue};

use crate::message::MethodCall;

/// An open connection to the system bus.
///
/// The connection is owned by the embedding application and shared as
/// `Arc<dyn BusConnection>`. Implementations must multiplex concurrent
/// calls and resolve each future with the reply to its own call.
#[async_trait]
pub trait BusConnection: Send + Sync {
    /// Send `call` and wait for its reply.
    ///
    /// Resolves exactly once: with the reply body on success, or with the
    /// failure status. Implementations do not retry.
    async fn call(&self, call: MethodCall) -> Result<BusValue, BusError>;
}

/// Server side of a method call, used by in-process services.
#[async_trait]
pub trait MethodHandler: Send + Sync {
    /// Handle one call addressed to this service.
    async fn handle(&self, call: &MethodCall) -> Result<BusValue, BusError>;
}
