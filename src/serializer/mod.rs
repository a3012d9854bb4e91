//! Declarative conversion of domain objects into output messages.
//!
//! Callers register, per output message type, which fields exist, which are
//! mandatory, which are delegated through an association and which are
//! computed. A [`services::Serializer`] then resolves every field against a
//! source object, coerces raw values into the declared field kinds,
//! recursively converts nested and repeated fields, and reports every
//! missing required field in one [`error::ValidationError`].
//!
//! # Architecture
//!
//! - **Domain**: field specifications, values, paths, masks and violations
//! - **Ports**: the [`ports::SourceObject`] trait that domain objects implement
//! - **Adapters**: in-memory records and the calendar-date source
//! - **Registry**: the immutable table of field specifications per type
//! - **Services**: delegation, evaluation, coercion, validation and the façade
//!
//! # Example
//!
//! ```
//! use std::sync::Arc;
//!
//! use protomap::schema::domain::{FieldKind, MessageSchema, ScalarType};
//! use protomap::serializer::{
//!     adapters::InMemoryRecord,
//!     domain::FieldOptions,
//!     registry::Registry,
//!     services::Serializer,
//! };
//!
//! let schema = MessageSchema::builder("fixture.Work")
//!     .field("company", FieldKind::Scalar(ScalarType::String))
//!     .build()
//!     .expect("valid schema");
//!
//! let mut builder = Registry::builder();
//! builder.register_schema(schema).expect("schema registers");
//! builder
//!     .define("fixture.Work", "company", FieldOptions::required())
//!     .expect("field defines");
//! let registry = Arc::new(builder.build().expect("registry builds"));
//!
//! let serializer = Serializer::new(registry, "fixture.Work").expect("type is registered");
//! let work = InMemoryRecord::new().with_attribute("company", "Wantedly").into_ref();
//! let message = serializer.to_message(&work).expect("conversion succeeds");
//!
//! assert_eq!(message.string("company"), Some("Wantedly"));
//! ```

pub mod adapters;
pub mod config;
pub mod domain;
pub mod error;
pub mod ports;
pub mod registry;
pub mod services;

#[cfg(test)]
mod tests;
