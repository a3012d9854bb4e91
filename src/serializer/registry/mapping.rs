//! Immutable registry of message mappings.

use super::RegistryBuilder;
use crate::schema::domain::{MessageSchema, MessageTypeName};
use crate::serializer::domain::FieldSpec;
use std::collections::HashMap;

/// Schema of one message type together with its defined fields.
#[derive(Debug, Clone)]
pub struct MessageMapping {
    schema: MessageSchema,
    fields: Vec<FieldSpec>,
}

impl MessageMapping {
    pub(crate) const fn new(schema: MessageSchema, fields: Vec<FieldSpec>) -> Self {
        Self { schema, fields }
    }

    /// Returns the output schema.
    #[must_use]
    pub const fn schema(&self) -> &MessageSchema {
        &self.schema
    }

    /// Returns the defined fields in declaration order.
    #[must_use]
    pub fn fields(&self) -> &[FieldSpec] {
        &self.fields
    }

    /// Looks up a defined field.
    #[must_use]
    pub fn field(&self, name: &str) -> Option<&FieldSpec> {
        self.fields.iter().find(|spec| spec.name() == name)
    }
}

/// Frozen set of mappings, safe to share across threads.
#[derive(Debug, Clone, Default)]
pub struct Registry {
    mappings: HashMap<MessageTypeName, MessageMapping>,
}

impl Registry {
    /// Starts declaring mappings.
    #[must_use]
    pub fn builder() -> RegistryBuilder {
        RegistryBuilder::new()
    }

    pub(crate) const fn from_mappings(mappings: HashMap<MessageTypeName, MessageMapping>) -> Self {
        Self { mappings }
    }

    /// Returns the mapping of a message type.
    #[must_use]
    pub fn mapping(&self, message_type: &str) -> Option<&MessageMapping> {
        self.mappings.get(message_type)
    }

    /// Returns the defined fields of a message type in declaration order.
    #[must_use]
    pub fn lookup(&self, message_type: &str) -> Option<&[FieldSpec]> {
        self.mapping(message_type).map(MessageMapping::fields)
    }

    /// Returns `true` when the message type is registered.
    #[must_use]
    pub fn contains(&self, message_type: &str) -> bool {
        self.mappings.contains_key(message_type)
    }

    /// Iterates over registered message types in no particular order.
    pub fn message_types(&self) -> impl Iterator<Item = &MessageTypeName> {
        self.mappings.keys()
    }

    /// Returns the number of registered message types.
    #[must_use]
    pub fn len(&self) -> usize {
        self.mappings.len()
    }

    /// Returns `true` when nothing is registered.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.mappings.is_empty()
    }
}
