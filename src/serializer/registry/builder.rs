//! Declarative registration of field mappings.

use super::{MessageMapping, Registry};
use crate::schema::domain::{MessageSchema, MessageTypeName};
use crate::serializer::{
    domain::{ComputeFn, Dependency, FieldOptions, FieldSource, FieldSpec},
    error::DefinitionError,
    services::delegation::effective_compute,
};
use std::collections::HashMap;
use tracing::debug;

#[derive(Clone)]
struct PendingField {
    name: String,
    required: bool,
    delegate_to: Option<String>,
    dependencies: Vec<Dependency>,
    compute: Option<ComputeFn>,
}

impl PendingField {
    fn source(&self) -> FieldSource {
        match (&self.compute, &self.delegate_to) {
            (Some(compute), _) => FieldSource::Computed(compute.clone()),
            (None, Some(association)) => FieldSource::Delegated {
                association: association.clone(),
            },
            (None, None) => FieldSource::Attribute,
        }
    }
}

struct PendingMapping {
    schema: MessageSchema,
    fields: Vec<PendingField>,
}

/// Collects schemas and field definitions before freezing them into a
/// [`Registry`].
///
/// Definitions are checked against the registered schema as they are made;
/// references between message types are checked by
/// [`RegistryBuilder::build`], so types may be registered in any order.
///
/// # Examples
///
/// ```
/// use protomap::schema::domain::{FieldKind, MessageSchema, ScalarType};
/// use protomap::serializer::{domain::FieldOptions, registry::Registry};
///
/// let mut builder = Registry::builder();
/// builder
///     .register_schema(
///         MessageSchema::builder("fixture.Preference")
///             .field("email", FieldKind::Scalar(ScalarType::String))
///             .build()
///             .expect("valid schema"),
///     )
///     .expect("new schema")
///     .define("fixture.Preference", "email", FieldOptions::required())
///     .expect("known field");
///
/// let registry = builder.build().expect("consistent registry");
/// assert_eq!(
///     registry
///         .lookup("fixture.Preference")
///         .map_or(0, |fields| fields.len()),
///     1
/// );
/// ```
#[derive(Default)]
pub struct RegistryBuilder {
    mappings: Vec<PendingMapping>,
    index: HashMap<MessageTypeName, usize>,
}

impl RegistryBuilder {
    /// Creates an empty builder.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Registers the schema of a message type.
    ///
    /// # Errors
    ///
    /// Returns [`DefinitionError::DuplicateMessageType`] when the type is
    /// already registered.
    pub fn register_schema(&mut self, schema: MessageSchema) -> Result<&mut Self, DefinitionError> {
        let name = schema.name().clone();
        if self.index.contains_key(&name) {
            return Err(DefinitionError::DuplicateMessageType(name));
        }
        self.index.insert(name, self.mappings.len());
        self.mappings.push(PendingMapping {
            schema,
            fields: Vec::new(),
        });
        Ok(self)
    }

    /// Defines how one field is computed.
    ///
    /// Defining a field again replaces the earlier definition but keeps its
    /// declaration position.
    ///
    /// # Errors
    ///
    /// Returns [`DefinitionError`] when the type or field is unknown, when
    /// the options both delegate and compute, or when an association name is
    /// empty.
    pub fn define(
        &mut self,
        message_type: &str,
        field: &str,
        options: FieldOptions,
    ) -> Result<&mut Self, DefinitionError> {
        let mapping = self.pending_field_owner(message_type, field)?;
        let name = mapping.schema.name().clone();
        let (required, delegate_to, dependencies, compute) = options.into_parts();

        if delegate_to.is_some() && compute.is_some() {
            return Err(DefinitionError::ConflictingSource {
                message_type: name,
                field: field.to_owned(),
            });
        }

        let names_empty_association = delegate_to.as_deref().is_some_and(is_blank)
            || dependencies
                .iter()
                .any(|dependency| {
                    is_blank(dependency.association()) || is_blank(dependency.attribute())
                });
        if names_empty_association {
            return Err(DefinitionError::EmptyAssociation {
                message_type: name,
                field: field.to_owned(),
            });
        }

        let pending = PendingField {
            name: field.to_owned(),
            required,
            delegate_to,
            dependencies,
            compute,
        };
        match mapping.fields.iter_mut().find(|existing| existing.name == field) {
            Some(existing) => *existing = pending,
            None => mapping.fields.push(pending),
        }
        Ok(self)
    }

    /// Delegates several fields to the same-named members of an association.
    ///
    /// Fields that are not yet defined are added as optional; defined fields
    /// keep their `required` flag and dependencies.
    ///
    /// # Errors
    ///
    /// Returns [`DefinitionError`] when the type or a field is unknown, when a
    /// field already has a custom computation, or when the association name
    /// is empty.
    pub fn delegate<I, S>(
        &mut self,
        message_type: &str,
        fields: I,
        association: &str,
    ) -> Result<&mut Self, DefinitionError>
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        for requested in fields {
            let field = requested.as_ref();
            let mapping = self.pending_field_owner(message_type, field)?;
            let name = mapping.schema.name().clone();

            if is_blank(association) {
                return Err(DefinitionError::EmptyAssociation {
                    message_type: name,
                    field: field.to_owned(),
                });
            }

            match mapping.fields.iter_mut().find(|existing| existing.name == field) {
                Some(existing) if existing.compute.is_some() => {
                    return Err(DefinitionError::ConflictingSource {
                        message_type: name,
                        field: field.to_owned(),
                    });
                }
                Some(existing) => existing.delegate_to = Some(association.to_owned()),
                None => mapping.fields.push(PendingField {
                    name: field.to_owned(),
                    required: false,
                    delegate_to: Some(association.to_owned()),
                    dependencies: Vec::new(),
                    compute: None,
                }),
            }
        }
        Ok(self)
    }

    /// Freezes the definitions into a [`Registry`].
    ///
    /// # Errors
    ///
    /// Returns [`DefinitionError::UnregisteredNestedType`] when a defined
    /// field refers to a message type whose schema was never registered.
    pub fn build(self) -> Result<Registry, DefinitionError> {
        let mut mappings = HashMap::with_capacity(self.mappings.len());

        for pending in self.mappings {
            let mut fields = Vec::with_capacity(pending.fields.len());
            for field in pending.fields {
                let descriptor = pending.schema.field(&field.name).ok_or_else(|| {
                    DefinitionError::UnknownField {
                        message_type: pending.schema.name().clone(),
                        field: field.name.clone(),
                    }
                })?;
                let kind = descriptor.kind().clone();

                if let Some(nested) = kind.nested_type()
                    && !self.index.contains_key(nested)
                {
                    return Err(DefinitionError::UnregisteredNestedType {
                        message_type: pending.schema.name().clone(),
                        field: field.name,
                        nested: nested.clone(),
                    });
                }

                let source = field.source();
                let compute = effective_compute(&field.name, &kind, &source);
                fields.push(FieldSpec::new(
                    field.name,
                    kind,
                    field.required,
                    source,
                    field.dependencies,
                    compute,
                ));
            }
            mappings.insert(
                pending.schema.name().clone(),
                MessageMapping::new(pending.schema, fields),
            );
        }

        debug!(message_types = mappings.len(), "built serializer registry");
        Ok(Registry::from_mappings(mappings))
    }

    fn pending_field_owner(
        &mut self,
        message_type: &str,
        field: &str,
    ) -> Result<&mut PendingMapping, DefinitionError> {
        let name = MessageTypeName::new(message_type)?;
        let position = *self
            .index
            .get(&name)
            .ok_or_else(|| DefinitionError::UnknownMessageType(name.clone()))?;
        let mapping = self
            .mappings
            .get_mut(position)
            .ok_or(DefinitionError::UnknownMessageType(name))?;

        if mapping.schema.field(field).is_none() {
            return Err(DefinitionError::UnknownField {
                message_type: mapping.schema.name().clone(),
                field: field.to_owned(),
            });
        }
        Ok(mapping)
    }
}

fn is_blank(name: &str) -> bool {
    name.trim().is_empty()
}
