//! # Integration Flows
//!
//! Cross-crate flows over the in-memory bus.

pub mod association_flow;
pub mod gateway_flow;
