//! Error types for mapping definition and conversion.
//!
//! Definition problems surface while building the registry. Conversion
//! problems split into the aggregated [`ValidationError`] (expected absence
//! of required data) and fatal errors that abort the call immediately.

use super::{
    domain::{FieldPath, ViolationSet},
    ports::SourceError,
};
use crate::schema::domain::{FieldKind, MessageTypeName, SchemaError};
use thiserror::Error;

/// Result type for conversions.
pub type ConversionResult<T> = Result<T, ConversionError>;

/// Missing required fields, all of them.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
#[error("validation failed: {violations}")]
pub struct ValidationError {
    violations: ViolationSet,
}

impl ValidationError {
    /// Wraps a non-empty violation set.
    #[must_use]
    pub const fn new(violations: ViolationSet) -> Self {
        Self { violations }
    }

    /// Returns every violation.
    #[must_use]
    pub const fn violations(&self) -> &ViolationSet {
        &self.violations
    }

    /// Consumes the error, returning the violations.
    #[must_use]
    pub fn into_violations(self) -> ViolationSet {
        self.violations
    }
}

/// Unexpected failure inside a field computation.
#[derive(Debug, Clone, Error)]
pub enum ComputationError {
    /// Reading the source object failed.
    #[error(transparent)]
    Source(#[from] SourceError),

    /// An association expected to be present was absent.
    #[error("association '{0}' is absent")]
    AbsentAssociation(String),

    /// A singular association read returned a collection.
    #[error("association '{0}' is a collection, expected a single object")]
    NotSingular(String),

    /// A value had an unexpected shape.
    #[error("expected {expected} for '{name}', found {found}")]
    UnexpectedValue {
        /// Attribute or association name.
        name: String,
        /// Expected shape.
        expected: &'static str,
        /// Actual value type.
        found: &'static str,
    },

    /// Failure reported by a custom computation.
    #[error("{0}")]
    Custom(String),
}

impl ComputationError {
    /// Creates a custom computation error.
    #[must_use]
    pub fn custom(message: impl Into<String>) -> Self {
        Self::Custom(message.into())
    }

    /// Creates an unexpected-value error.
    #[must_use]
    pub fn unexpected(name: impl Into<String>, expected: &'static str, found: &'static str) -> Self {
        Self::UnexpectedValue {
            name: name.into(),
            expected,
            found,
        }
    }
}

/// A raw value that cannot be written into a field of the declared kind.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum CoercionError {
    /// The raw value type does not fit the field kind.
    #[error("cannot coerce {found} into {expected}")]
    TypeMismatch {
        /// Field kind being written.
        expected: FieldKind,
        /// Raw value type.
        found: &'static str,
    },

    /// The value does not fit the target integer range.
    #[error("value {value} is out of range for {target}")]
    OutOfRange {
        /// Rendered raw value.
        value: String,
        /// Target scalar type.
        target: &'static str,
    },
}

/// Errors raised by [`Serializer`](super::services::Serializer) conversions.
#[derive(Debug, Clone, Error)]
pub enum ConversionError {
    /// One or more required fields are missing.
    #[error(transparent)]
    Validation(#[from] ValidationError),

    /// A field computation failed.
    #[error("failed to compute '{path}': {source}")]
    Computation {
        /// Path of the failing field.
        path: FieldPath,
        /// Underlying failure.
        source: ComputationError,
    },

    /// A computed value could not be coerced.
    #[error("failed to coerce '{path}': {source}")]
    Coercion {
        /// Path of the failing field.
        path: FieldPath,
        /// Underlying failure.
        source: CoercionError,
    },

    /// Nested messages recursed beyond the configured depth.
    #[error("nesting at '{path}' exceeds the maximum depth of {limit}")]
    DepthExceeded {
        /// Path where the limit was hit.
        path: FieldPath,
        /// Configured limit.
        limit: usize,
    },

    /// A field mask names a field the message type does not map.
    #[error("field mask selects unknown field '{path}'")]
    UnknownMaskField {
        /// Path of the unknown selection.
        path: FieldPath,
    },

    /// A nested field names a message type the registry does not know.
    #[error("no mapping registered for message type {0}")]
    UnknownMessageType(MessageTypeName),

    /// A coerced value was rejected by the message.
    #[error(transparent)]
    Schema(#[from] SchemaError),
}

impl ConversionError {
    /// Wraps a computation failure at `path`.
    #[must_use]
    pub const fn computation(path: FieldPath, source: ComputationError) -> Self {
        Self::Computation { path, source }
    }

    /// Wraps a coercion failure at `path`.
    #[must_use]
    pub const fn coercion(path: FieldPath, source: CoercionError) -> Self {
        Self::Coercion { path, source }
    }

    /// Returns the validation error, if this is one.
    #[must_use]
    pub const fn as_validation(&self) -> Option<&ValidationError> {
        match self {
            Self::Validation(error) => Some(error),
            _ => None,
        }
    }

    /// Returns `true` for validation failures, `false` for fatal errors.
    #[must_use]
    pub const fn is_validation(&self) -> bool {
        matches!(self, Self::Validation(_))
    }
}

/// Errors raised while defining mappings.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum DefinitionError {
    /// The schema could not be built or is malformed.
    #[error(transparent)]
    Schema(#[from] SchemaError),

    /// No schema is registered for the message type.
    #[error("no schema registered for message type {0}")]
    UnknownMessageType(MessageTypeName),

    /// A schema for the message type was already registered.
    #[error("message type {0} is already registered")]
    DuplicateMessageType(MessageTypeName),

    /// The field is not declared on the message type's schema.
    #[error("{message_type} has no field named '{field}'")]
    UnknownField {
        /// Message type being defined.
        message_type: MessageTypeName,
        /// Field name.
        field: String,
    },

    /// A field is both delegated and custom-computed.
    #[error("field '{field}' on {message_type} cannot both delegate and compute")]
    ConflictingSource {
        /// Message type being defined.
        message_type: MessageTypeName,
        /// Field name.
        field: String,
    },

    /// A delegation or dependency names an empty association.
    #[error("field '{field}' on {message_type} names an empty association or attribute")]
    EmptyAssociation {
        /// Message type being defined.
        message_type: MessageTypeName,
        /// Field name.
        field: String,
    },

    /// A defined field refers to a nested message type with no schema.
    #[error("field '{field}' on {message_type} refers to unregistered message type {nested}")]
    UnregisteredNestedType {
        /// Message type being defined.
        message_type: MessageTypeName,
        /// Field name.
        field: String,
        /// Missing nested type.
        nested: MessageTypeName,
    },

    /// A process-wide registry has already been installed.
    #[error("a global registry is already installed")]
    GlobalRegistryInstalled,

    /// No process-wide registry has been installed yet.
    #[error("no global registry is installed")]
    GlobalRegistryMissing,
}
