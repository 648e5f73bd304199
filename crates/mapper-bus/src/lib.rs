//! # Mapper Bus - Asynchronous Method Calls over the System Bus
//!
//! Issues one remote method invocation at a time per future and delivers
//! exactly one reply for it.
//!
//! ## Layering
//!
//! ```text
//! ┌────────────────────┐
//! │   AsyncRpcClient   │  typed invoke() / read_property()
//! └─────────┬──────────┘
//!           │ MethodCall
//!           ▼
//! ┌────────────────────┐
//! │   BusConnection    │  injected transport (real bus or InMemoryBus)
//! └────────────────────┘
//! ```
//!
//! ## Guarantees
//!
//! - **Exactly Once:** every call resolves once, with a value or an error
//! - **No Retries:** retry policy belongs to the caller
//! - **No Shared Call State:** concurrent calls share only the connection

// Allow in tests
#![cfg_attr(test, allow(clippy::unwrap_used))]
#![cfg_attr(test, allow(clippy::expect_used))]

pub mod client;
pub mod connection;
pub mod memory;
pub mod message;

// Re-export main types
pub use client::AsyncRpcClient;
pub use connection::{BusConnection, MethodHandler};
pub use memory::{CallRecord, InMemoryBus};
pub use message::MethodCall;
