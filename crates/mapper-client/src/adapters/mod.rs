//! Adapters Layer
//!
//! - `ObjectMapperGateway`: the mapper queries over the bus client
//! - `InMemoryObjectMapper`: in-process mapper service for tests

pub mod gateway;
pub mod in_memory;

pub use gateway::ObjectMapperGateway;
pub use in_memory::InMemoryObjectMapper;
