//! Field specification registry.
//!
//! Mappings are declared through [`RegistryBuilder`] at start-up and frozen
//! into an immutable [`Registry`] that every conversion reads. The
//! [`global`] module publishes one registry for the whole process.

mod builder;
pub mod global;
mod mapping;

pub use builder::RegistryBuilder;
pub use mapping::{MessageMapping, Registry};
