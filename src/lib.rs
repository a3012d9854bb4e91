//! Protomap: declarative mapping of domain objects onto typed messages.
//!
//! This crate converts in-memory domain objects, with lazily loaded and
//! possibly nested associations, into strongly-typed output messages. Field
//! mappings are declared once per message type and shared by every
//! conversion.
//!
//! # Architecture
//!
//! Protomap follows hexagonal architecture principles:
//!
//! - **Domain**: Pure mapping and message types with no I/O
//! - **Ports**: Trait interfaces for the objects being converted
//! - **Adapters**: Concrete sources such as in-memory records
//!
//! # Modules
//!
//! - [`schema`]: Output message schemas and dynamic message instances
//! - [`serializer`]: Field registry, evaluation, coercion and validation

pub mod schema;
pub mod serializer;
