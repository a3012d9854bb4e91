//! Message schemas: ordered, typed field tables.

use super::{FieldKind, MessageTypeName, SchemaError, error::is_identifier};
use std::collections::HashSet;

/// One declared field of a message type.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FieldDescriptor {
    name: String,
    kind: FieldKind,
}

impl FieldDescriptor {
    /// Returns the field name.
    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Returns the field kind.
    #[must_use]
    pub const fn kind(&self) -> &FieldKind {
        &self.kind
    }
}

/// Schema of one output message type.
///
/// Field order is declaration order and is preserved in built messages.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MessageSchema {
    name: MessageTypeName,
    fields: Vec<FieldDescriptor>,
}

impl MessageSchema {
    /// Starts building a schema for the named message type.
    #[must_use]
    pub fn builder(name: impl Into<String>) -> MessageSchemaBuilder {
        MessageSchemaBuilder {
            name: name.into(),
            fields: Vec::new(),
        }
    }

    /// Returns the message type name.
    #[must_use]
    pub const fn name(&self) -> &MessageTypeName {
        &self.name
    }

    /// Returns all fields in declaration order.
    #[must_use]
    pub fn fields(&self) -> &[FieldDescriptor] {
        &self.fields
    }

    /// Looks up a field by name.
    #[must_use]
    pub fn field(&self, name: &str) -> Option<&FieldDescriptor> {
        self.fields.iter().find(|field| field.name == name)
    }

    /// Returns the nested message types referenced by this schema.
    pub fn nested_types(&self) -> impl Iterator<Item = &MessageTypeName> {
        self.fields
            .iter()
            .filter_map(|field| field.kind.nested_type())
    }
}

/// Builder for [`MessageSchema`].
///
/// Validation is deferred to [`MessageSchemaBuilder::build`].
#[derive(Debug, Clone)]
pub struct MessageSchemaBuilder {
    name: String,
    fields: Vec<(String, FieldKind)>,
}

impl MessageSchemaBuilder {
    /// Appends a field.
    #[must_use]
    pub fn field(mut self, name: impl Into<String>, kind: FieldKind) -> Self {
        self.fields.push((name.into(), kind));
        self
    }

    /// Validates and builds the schema.
    ///
    /// # Errors
    ///
    /// Returns [`SchemaError`] when the type name or a field name is invalid,
    /// or when a field name is declared twice.
    pub fn build(self) -> Result<MessageSchema, SchemaError> {
        let name = MessageTypeName::new(self.name)?;
        let mut seen = HashSet::new();
        let mut fields = Vec::with_capacity(self.fields.len());

        for (field_name, kind) in self.fields {
            if !is_identifier(&field_name) {
                return Err(SchemaError::InvalidFieldName(field_name));
            }
            if !seen.insert(field_name.clone()) {
                return Err(SchemaError::DuplicateField {
                    message_type: name,
                    field: field_name,
                });
            }
            fields.push(FieldDescriptor {
                name: field_name,
                kind,
            });
        }

        Ok(MessageSchema { name, fields })
    }
}
