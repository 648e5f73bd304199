//! Service Layer
//!
//! Application services that orchestrate domain logic over the ports.

pub mod resolver;

pub use resolver::AssociationResolver;
