//! # Object Mapper Client Benchmarks
//!
//! Performance benchmarks per component.

pub mod resolver;
