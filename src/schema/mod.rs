//! Output message schemas and dynamically populated messages.
//!
//! This module stands in for the message-schema runtime that the serializer
//! writes into. It describes message types as ordered field tables and
//! provides [`domain::DynamicMessage`], a message instance whose fields are
//! set through typed [`domain::OutputValue`]s.
//!
//! # Example
//!
//! ```
//! use protomap::schema::domain::{FieldKind, MessageSchema, ScalarType};
//!
//! let schema = MessageSchema::builder("fixture.Work")
//!     .field("company", FieldKind::Scalar(ScalarType::String))
//!     .build()
//!     .expect("valid schema");
//!
//! assert_eq!(schema.fields().len(), 1);
//! assert!(schema.field("company").is_some());
//! ```

pub mod domain;

#[cfg(test)]
mod tests;
