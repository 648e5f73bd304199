//! # Mapper Client
//!
//! Typed queries against the system bus object mapper, and the association
//! pipeline built on them.
//!
//! ## Architecture
//!
//! This crate follows Hexagonal Architecture (Ports & Adapters):
//!
//! - **Domain Layer** (`domain/`): Pure logic, no I/O
//!   - `MapperConfig`: Mapper identity, call timeout and strategy
//!   - `intersect_paths` / `intersect_entries`: The merge step
//!   - `ResolveStage`: Pipeline state machine
//!
//! - **Ports Layer** (`ports/`): Trait definitions
//!   - `AssociationApi`: Driving port (inbound API)
//!   - `ObjectMapperApi`: Driven port (mapper queries)
//!
//! - **Service Layer** (`service/`): Orchestration
//!   - `AssociationResolver`: Implements `AssociationApi`
//!
//! - **Adapters Layer** (`adapters/`): External connections
//!   - `ObjectMapperGateway`: Implements `ObjectMapperApi` over the bus
//!   - `InMemoryObjectMapper`: In-process mapper service for tests
//!
//! ## Pipeline
//!
//! ```text
//! endpoints(association) ──┐
//!                          ├──► keep paths in both ──► sort, dedup
//! subtree_paths(root)  ────┘
//! ```
//!
//! - An empty endpoint set ends the run with no results; in sequential
//!   mode the subtree is then never queried.
//! - A failing query ends the run with that query's error, unchanged.
//!
//! ## Usage Example
//!
//! ```ignore
//! use mapper_client::{AssociationApi, MapperClient, MapperConfig};
//! use mapper_types::{InterfaceFilter, ObjectPath, QueryDepth};
//!
//! let client = MapperClient::new(connection, &MapperConfig::from_env())?;
//! let fans = client
//!     .resolver()
//!     .get_associated_subtree_paths(
//!         &ObjectPath::new("/xyz/openbmc_project/inventory/system/chassis/cooled_by")?,
//!         &ObjectPath::new("/xyz/openbmc_project/inventory")?,
//!         QueryDepth::UNLIMITED,
//!         &InterfaceFilter::new(["xyz.openbmc_project.Inventory.Item.Fan"]),
//!     )
//!     .await?;
//! ```

// Allow in tests
#![cfg_attr(test, allow(clippy::unwrap_used))]
#![cfg_attr(test, allow(clippy::expect_used))]

pub mod adapters;
pub mod client;
pub mod domain;
pub mod error;
pub mod ports;
pub mod service;

// Re-exports for convenience
pub use adapters::{InMemoryObjectMapper, ObjectMapperGateway};
pub use client::MapperClient;
pub use domain::{MapperConfig, MapperTarget, ResolveStage, ResolveStrategy};
pub use error::ConfigError;
pub use ports::{AssociationApi, ObjectMapperApi};
pub use service::AssociationResolver;
