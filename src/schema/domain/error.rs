//! Error types for schema construction and message field access.

use super::MessageTypeName;
use thiserror::Error;

/// Errors returned while building schemas or writing message fields.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum SchemaError {
    /// The message type name is empty after trimming.
    #[error("message type name must not be empty")]
    EmptyTypeName,

    /// The message type name is not a dotted identifier.
    #[error(
        "message type name '{0}' is invalid (expected dot-separated identifiers such as 'pkg.User')"
    )]
    InvalidTypeName(String),

    /// The field name is not a valid identifier.
    #[error("field name '{0}' is invalid (expected an identifier such as 'avatar_url')")]
    InvalidFieldName(String),

    /// A field with the same name was already declared on the schema.
    #[error("field '{field}' is declared twice on {message_type}")]
    DuplicateField {
        /// Message type declaring the field.
        message_type: MessageTypeName,
        /// Repeated field name.
        field: String,
    },

    /// The field does not exist on the message type.
    #[error("{message_type} has no field named '{field}'")]
    UnknownField {
        /// Message type being accessed.
        message_type: MessageTypeName,
        /// Requested field name.
        field: String,
    },
}

/// Returns `true` when `name` is an identifier: a letter or underscore
/// followed by letters, digits or underscores.
pub(crate) fn is_identifier(name: &str) -> bool {
    let mut characters = name.chars();
    characters
        .next()
        .is_some_and(|first| first.is_ascii_alphabetic() || first == '_')
        && characters.all(|character| character.is_ascii_alphanumeric() || character == '_')
}
