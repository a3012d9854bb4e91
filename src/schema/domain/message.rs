//! Dynamically populated output messages.

use super::{FieldKind, MessageSchema, MessageTypeName, ScalarValue, SchemaError, Timestamp};

/// Coerced value of one message field.
#[derive(Debug, Clone, PartialEq)]
pub enum OutputValue {
    /// A required plain scalar whose value could not be computed.
    ///
    /// Distinct from a legitimate zero so that validation can tell the two
    /// apart.
    Unset,
    /// Plain scalar.
    Scalar(ScalarValue),
    /// Nullable wrapper; `None` is the explicitly absent wrapper.
    Wrapper(Option<ScalarValue>),
    /// Timestamp message; `None` when absent.
    Timestamp(Option<Timestamp>),
    /// Nested message (including date messages); `None` when absent.
    Message(Option<Box<DynamicMessage>>),
    /// Repeated nested message.
    Repeated(Vec<DynamicMessage>),
}

impl OutputValue {
    /// Returns the default value written for a field of `kind` before
    /// evaluation.
    #[must_use]
    pub fn default_for(kind: &FieldKind) -> Self {
        match kind {
            FieldKind::Scalar(scalar) => Self::Scalar(scalar.zero()),
            FieldKind::Wrapper(_) => Self::Wrapper(None),
            FieldKind::Timestamp => Self::Timestamp(None),
            FieldKind::Date(_) | FieldKind::Message(_) => Self::Message(None),
            FieldKind::Repeated(_) => Self::Repeated(Vec::new()),
        }
    }

    /// Returns `true` for the "unset" sentinel of every kind.
    ///
    /// Repeated values are never unset; an empty sequence is a value.
    #[must_use]
    pub const fn is_unset(&self) -> bool {
        matches!(
            self,
            Self::Unset | Self::Wrapper(None) | Self::Timestamp(None) | Self::Message(None)
        )
    }

    fn to_json(&self) -> serde_json::Value {
        match self {
            Self::Unset | Self::Wrapper(None) | Self::Timestamp(None) | Self::Message(None) => {
                serde_json::Value::Null
            }
            Self::Scalar(value) | Self::Wrapper(Some(value)) => value.to_json(),
            Self::Timestamp(Some(timestamp)) => timestamp
                .to_rfc3339()
                .map_or(serde_json::Value::Null, serde_json::Value::String),
            Self::Message(Some(message)) => message.to_json(),
            Self::Repeated(messages) => {
                serde_json::Value::Array(messages.iter().map(DynamicMessage::to_json).collect())
            }
        }
    }
}

/// Instance of a message type with fields kept in schema order.
#[derive(Debug, Clone, PartialEq)]
pub struct DynamicMessage {
    message_type: MessageTypeName,
    fields: Vec<(String, OutputValue)>,
}

impl DynamicMessage {
    /// Creates an empty message with every field at its default value.
    #[must_use]
    pub fn new(schema: &MessageSchema) -> Self {
        Self {
            message_type: schema.name().clone(),
            fields: schema
                .fields()
                .iter()
                .map(|field| (field.name().to_owned(), OutputValue::default_for(field.kind())))
                .collect(),
        }
    }

    /// Returns the message type.
    #[must_use]
    pub const fn message_type(&self) -> &MessageTypeName {
        &self.message_type
    }

    /// Writes a field.
    ///
    /// # Errors
    ///
    /// Returns [`SchemaError::UnknownField`] when the schema has no such
    /// field.
    pub fn set(&mut self, name: &str, value: OutputValue) -> Result<(), SchemaError> {
        let slot = self
            .fields
            .iter_mut()
            .find(|(field, _)| field == name)
            .ok_or_else(|| SchemaError::UnknownField {
                message_type: self.message_type.clone(),
                field: name.to_owned(),
            })?;
        slot.1 = value;
        Ok(())
    }

    /// Reads a field.
    #[must_use]
    pub fn get(&self, name: &str) -> Option<&OutputValue> {
        self.fields
            .iter()
            .find(|(field, _)| field == name)
            .map(|(_, value)| value)
    }

    /// Iterates over `(name, value)` pairs in schema order.
    pub fn fields(&self) -> impl Iterator<Item = (&str, &OutputValue)> {
        self.fields
            .iter()
            .map(|(name, value)| (name.as_str(), value))
    }

    /// Reads a plain scalar field.
    #[must_use]
    pub fn scalar(&self, name: &str) -> Option<&ScalarValue> {
        match self.get(name)? {
            OutputValue::Scalar(value) => Some(value),
            _ => None,
        }
    }

    /// Reads a string scalar field.
    #[must_use]
    pub fn string(&self, name: &str) -> Option<&str> {
        self.scalar(name).and_then(ScalarValue::as_str)
    }

    /// Reads an integer scalar field widened to `i64`.
    #[must_use]
    pub fn int(&self, name: &str) -> Option<i64> {
        self.scalar(name).and_then(ScalarValue::as_i64)
    }

    /// Reads the payload of a present wrapper field.
    #[must_use]
    pub fn wrapper(&self, name: &str) -> Option<&ScalarValue> {
        match self.get(name)? {
            OutputValue::Wrapper(value) => value.as_ref(),
            _ => None,
        }
    }

    /// Reads a present timestamp field.
    #[must_use]
    pub fn timestamp(&self, name: &str) -> Option<Timestamp> {
        match self.get(name)? {
            OutputValue::Timestamp(value) => *value,
            _ => None,
        }
    }

    /// Reads a present nested message field.
    #[must_use]
    pub fn message(&self, name: &str) -> Option<&Self> {
        match self.get(name)? {
            OutputValue::Message(value) => value.as_deref(),
            _ => None,
        }
    }

    /// Reads a repeated message field; missing or non-repeated fields read
    /// as empty.
    #[must_use]
    pub fn repeated(&self, name: &str) -> &[Self] {
        match self.get(name) {
            Some(OutputValue::Repeated(values)) => values,
            _ => &[],
        }
    }

    /// Renders the message using the proto3 JSON mapping.
    ///
    /// Field names are kept as declared; absent wrappers, timestamps and
    /// messages render as `null`.
    #[must_use]
    pub fn to_json(&self) -> serde_json::Value {
        let object = self
            .fields
            .iter()
            .map(|(name, value)| (name.clone(), value.to_json()))
            .collect::<serde_json::Map<_, _>>();
        serde_json::Value::Object(object)
    }
}
