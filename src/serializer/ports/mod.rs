//! Port definitions for the serializer.
//!
//! The only collaborator the engine talks to is the source object supplied
//! by the persistence layer.

pub mod source;

pub use source::{Association, SourceError, SourceObject, SourceRef, SourceResult};
