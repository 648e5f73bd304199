//! # Mapper Types Crate
//!
//! This crate contains the data model of the object-mapper client: object
//! paths and bus names, subtree and association entities, the wire value
//! model used on the bus, and the error taxonomy every layer reports with.
//!
//! ## Design Principles
//!
//! - **No I/O**: Everything here is pure data and pure functions.
//! - **Validated Paths**: An [`ObjectPath`] can only be built through
//!   validation, so downstream layers never re-check path shape.
//! - **One Status Type**: Every remote operation resolves to
//!   `Result<T, BusError>`; [`BusError::kind`] is the coarse status.

// Allow in tests
#![cfg_attr(test, allow(clippy::unwrap_used))]
#![cfg_attr(test, allow(clippy::expect_used))]

pub mod entities;
pub mod errors;
pub mod names;
pub mod path;
pub mod value;
pub mod wellknown;

pub use entities::*;
pub use errors::*;
pub use names::*;
pub use path::{escape_for_bus, nth_path_segment, ObjectPath};
pub use value::{BusValue, FromBusValue};
