//! Domain Layer
//!
//! Pure pipeline logic and configuration. No I/O.

pub mod config;
pub mod merge;
pub mod stage;

pub use config::{MapperConfig, MapperTarget, ResolveStrategy};
pub use merge::{intersect_entries, intersect_paths};
pub use stage::{ResolveOutcome, ResolveStage};
