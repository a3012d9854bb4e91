//! Field kinds understood by the coercion layer.

use super::{MessageTypeName, ScalarValue};
use serde::{Deserialize, Serialize};
use std::fmt;

/// Primitive field types of the output format.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ScalarType {
    /// `bool`
    Bool,
    /// `int32`
    Int32,
    /// `int64`
    Int64,
    /// `uint32`
    UInt32,
    /// `uint64`
    UInt64,
    /// `float`
    Float,
    /// `double`
    Double,
    /// `string`
    String,
    /// `bytes`
    Bytes,
}

impl ScalarType {
    /// Returns the zero value written for unset, non-required scalars.
    #[must_use]
    pub const fn zero(self) -> ScalarValue {
        match self {
            Self::Bool => ScalarValue::Bool(false),
            Self::Int32 => ScalarValue::Int32(0),
            Self::Int64 => ScalarValue::Int64(0),
            Self::UInt32 => ScalarValue::UInt32(0),
            Self::UInt64 => ScalarValue::UInt64(0),
            Self::Float => ScalarValue::Float(0.0),
            Self::Double => ScalarValue::Double(0.0),
            Self::String => ScalarValue::String(String::new()),
            Self::Bytes => ScalarValue::Bytes(Vec::new()),
        }
    }

    /// Returns the canonical lowercase type name.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Bool => "bool",
            Self::Int32 => "int32",
            Self::Int64 => "int64",
            Self::UInt32 => "uint32",
            Self::UInt64 => "uint64",
            Self::Float => "float",
            Self::Double => "double",
            Self::String => "string",
            Self::Bytes => "bytes",
        }
    }
}

impl fmt::Display for ScalarType {
    fn fmt(&self, formatter: &mut fmt::Formatter<'_>) -> fmt::Result {
        formatter.write_str(self.as_str())
    }
}

/// Shape of one output field.
///
/// The kind decides how a raw value is wrapped and which value counts as
/// "unset" during required-field validation.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case", tag = "kind", content = "type")]
pub enum FieldKind {
    /// Plain scalar; absence is written as the zero value.
    Scalar(ScalarType),
    /// Nullable wrapper message around a scalar (`google.protobuf.StringValue`
    /// and friends).
    Wrapper(ScalarType),
    /// `google.protobuf.Timestamp`.
    Timestamp,
    /// Calendar date message with `year`, `month` and `day` fields, filled
    /// through the named type's own mapping.
    Date(MessageTypeName),
    /// Singular nested message.
    Message(MessageTypeName),
    /// Repeated nested message.
    Repeated(MessageTypeName),
}

impl FieldKind {
    /// Returns the nested message type for message-shaped kinds.
    #[must_use]
    pub const fn nested_type(&self) -> Option<&MessageTypeName> {
        match self {
            Self::Date(name) | Self::Message(name) | Self::Repeated(name) => Some(name),
            Self::Scalar(_) | Self::Wrapper(_) | Self::Timestamp => None,
        }
    }

    /// Returns `true` for kinds whose source is an association rather than
    /// an attribute.
    #[must_use]
    pub const fn reads_association(&self) -> bool {
        matches!(self, Self::Message(_) | Self::Repeated(_))
    }
}

impl fmt::Display for FieldKind {
    fn fmt(&self, formatter: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Scalar(scalar) => write!(formatter, "{scalar}"),
            Self::Wrapper(scalar) => write!(formatter, "wrapper<{scalar}>"),
            Self::Timestamp => formatter.write_str("timestamp"),
            Self::Date(name) => write!(formatter, "date<{name}>"),
            Self::Message(name) => write!(formatter, "message<{name}>"),
            Self::Repeated(name) => write!(formatter, "repeated<{name}>"),
        }
    }
}
