//! Ports Layer
//!
//! Defines the interfaces (traits) for:
//! - Driving Ports (inbound) - API for callers
//! - Driven Ports (outbound) - Queries against the object mapper

pub mod inbound;
pub mod outbound;

pub use inbound::AssociationApi;
pub use outbound::ObjectMapperApi;
