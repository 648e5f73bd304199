//! # Method Calls
//!
//! The request half of a remote invocation.

use mapper_types::{BusValue, InterfaceName, ObjectPath, ServiceName};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// One remote method invocation.
///
/// The `serial` correlates the call with its reply when a transport
/// multiplexes many calls over one connection.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MethodCall {
    /// Correlation identifier, unique per call.
    pub serial: Uuid,
    /// Service the call is addressed to.
    pub destination: ServiceName,
    /// Object the method is invoked on.
    pub path: ObjectPath,
    /// Interface the method belongs to.
    pub interface: InterfaceName,
    /// Method name.
    pub member: String,
    /// Arguments in signature order.
    pub args: Vec<BusValue>,
}

impl MethodCall {
    pub fn new(
        destination: ServiceName,
        path: ObjectPath,
        interface: InterfaceName,
        member: impl Into<String>,
    ) -> Self {
        Self {
            serial: Uuid::new_v4(),
            destination,
            path,
            interface,
            member: member.into(),
            args: Vec::new(),
        }
    }

    /// Append one argument.
    #[must_use]
    pub fn arg(mut self, value: impl Into<BusValue>) -> Self {
        self.args.push(value.into());
        self
    }

    /// Append several arguments.
    #[must_use]
    pub fn with_args(mut self, args: impl IntoIterator<Item = BusValue>) -> Self {
        self.args.extend(args);
        self
    }

    /// Argument at `index`, if present.
    #[must_use]
    pub fn arg_at(&self, index: usize) -> Option<&BusValue> {
        self.args.get(index)
    }
}
