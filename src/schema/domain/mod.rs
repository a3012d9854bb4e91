//! Domain model for output message types.
//!
//! Schemas are plain data: a validated type name and an ordered list of
//! typed field descriptors. Messages built from a schema start with every
//! field at its kind's default value.

mod error;
mod kind;
mod message;
mod name;
mod scalar;
mod schema;
mod timestamp;

pub use error::SchemaError;
pub use kind::{FieldKind, ScalarType};
pub use message::{DynamicMessage, OutputValue};
pub use name::MessageTypeName;
pub use scalar::ScalarValue;
pub use schema::{FieldDescriptor, MessageSchema, MessageSchemaBuilder};
pub use timestamp::Timestamp;
