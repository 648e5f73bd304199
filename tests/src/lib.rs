//! # Object Mapper Client Test Suite
//!
//! Unified test crate containing:
//!
//! ## Structure
//!
//! ```text
//! tests/src/
//! ├── fixtures.rs       # Inventory trees shared by tests and benchmarks
//! ├── benchmarks/       # Criterion benchmarks per component
//! │   └── resolver.rs
//! │
//! └── integration/      # Cross-crate flows over the in-memory bus
//!     ├── association_flow.rs
//!     └── gateway_flow.rs
//! ```
//!
//! ## Running Tests
//!
//! ```bash
//! # All tests
//! cargo test -p mapper-tests
//!
//! # By category
//! cargo test -p mapper-tests integration::
//!
//! # Benchmarks
//! cargo bench -p mapper-tests
//! ```

#![allow(dead_code)]

pub mod benchmarks;
pub mod fixtures;
pub mod integration;
