//! Serializer façade: one source object in, one validated message out.

use crate::schema::domain::{DynamicMessage, MessageTypeName};
use crate::serializer::{
    config::ConversionConfig,
    domain::{FieldMask, FieldPath, PreloadPlan, ViolationSet},
    error::{ConversionError, ConversionResult, DefinitionError},
    ports::SourceRef,
    registry::{Registry, global},
    services::{
        SharedClock, ViewScope,
        coercion::{self, NestedSerializer},
        evaluator::{self, Evaluated},
        preload, validation,
    },
};
use mockable::DefaultClock;
use std::fmt;
use std::sync::Arc;
use tracing::debug;

/// Converts source objects into messages of one registered type.
///
/// A serializer is cheap to clone and safe to share between threads; each
/// conversion owns its own memoized views.
///
/// # Examples
///
/// ```
/// use std::sync::Arc;
///
/// use protomap::schema::domain::{FieldKind, MessageSchema, ScalarType};
/// use protomap::serializer::{
///     adapters::InMemoryRecord,
///     domain::FieldOptions,
///     ports::SourceRef,
///     registry::Registry,
///     services::Serializer,
/// };
///
/// let mut builder = Registry::builder();
/// builder
///     .register_schema(
///         MessageSchema::builder("fixture.Work")
///             .field("company", FieldKind::Scalar(ScalarType::String))
///             .build()
///             .expect("valid schema"),
///     )
///     .expect("new schema")
///     .define("fixture.Work", "company", FieldOptions::required())
///     .expect("known field");
/// let registry = Arc::new(builder.build().expect("consistent registry"));
///
/// let serializer = Serializer::new(registry, "fixture.Work").expect("registered type");
/// let work: SourceRef = Arc::new(InMemoryRecord::new().with_attribute("company", "Wantedly"));
/// let message = serializer.to_message(&work).expect("valid work");
/// assert_eq!(message.string("company"), Some("Wantedly"));
///
/// let blank: SourceRef = Arc::new(InMemoryRecord::new().with_null("company"));
/// let error = serializer.to_message(&blank).expect_err("company is required");
/// assert_eq!(error.to_string(), "validation failed: company: required but missing");
/// ```
#[derive(Clone)]
pub struct Serializer {
    registry: Arc<Registry>,
    message_type: MessageTypeName,
    config: ConversionConfig,
    clock: SharedClock,
}

impl Serializer {
    /// Creates a serializer for a registered message type.
    ///
    /// # Errors
    ///
    /// Returns [`DefinitionError::UnknownMessageType`] when the registry has
    /// no mapping for the type.
    pub fn new(registry: Arc<Registry>, message_type: &str) -> Result<Self, DefinitionError> {
        let name = MessageTypeName::new(message_type)?;
        if !registry.contains(name.as_str()) {
            return Err(DefinitionError::UnknownMessageType(name));
        }
        Ok(Self {
            registry,
            message_type: name,
            config: ConversionConfig::default(),
            clock: Arc::new(DefaultClock),
        })
    }

    /// Creates a serializer backed by the process-wide registry.
    ///
    /// # Errors
    ///
    /// Returns [`DefinitionError::GlobalRegistryMissing`] before a registry is
    /// installed, and the errors of [`Serializer::new`].
    pub fn from_global(message_type: &str) -> Result<Self, DefinitionError> {
        let registry = global::global().ok_or(DefinitionError::GlobalRegistryMissing)?;
        Self::new(registry, message_type)
    }

    /// Replaces the conversion configuration.
    #[must_use]
    pub const fn with_config(mut self, config: ConversionConfig) -> Self {
        self.config = config;
        self
    }

    /// Replaces the clock exposed to field computations.
    #[must_use]
    pub fn with_clock(mut self, clock: SharedClock) -> Self {
        self.clock = clock;
        self
    }

    /// Returns the message type produced by this serializer.
    #[must_use]
    pub const fn message_type(&self) -> &MessageTypeName {
        &self.message_type
    }

    /// Returns the active configuration.
    #[must_use]
    pub const fn config(&self) -> &ConversionConfig {
        &self.config
    }

    /// Converts a source object, evaluating every defined field.
    ///
    /// # Errors
    ///
    /// Returns [`ConversionError::Validation`] with every missing required
    /// field, or a fatal [`ConversionError`] when a computation or coercion
    /// fails.
    pub fn to_message(&self, source: &SourceRef) -> ConversionResult<DynamicMessage> {
        self.to_message_masked(source, &FieldMask::all())
    }

    /// Converts a source object, evaluating only the fields selected by
    /// `mask`. Unselected fields keep their default values and are not
    /// validated.
    ///
    /// # Errors
    ///
    /// Returns [`ConversionError::UnknownMaskField`] when the mask selects a
    /// field that is not defined, plus the errors of
    /// [`Serializer::to_message`].
    pub fn to_message_masked(
        &self,
        source: &SourceRef,
        mask: &FieldMask,
    ) -> ConversionResult<DynamicMessage> {
        self.check_mask(&self.message_type, mask, &FieldPath::root())?;
        debug!(message_type = %self.message_type, "serializing source object");

        let mut pass = self.pass();
        let message = pass.convert(
            &self.message_type,
            source,
            mask,
            &FieldPath::root(),
            0,
        )?;
        self.finish(message, pass.violations)
    }

    /// Converts a batch of source objects.
    ///
    /// Violations are reported under index paths such as `[2].name`; a
    /// single error covers the whole batch.
    ///
    /// # Errors
    ///
    /// Same as [`Serializer::to_message`].
    pub fn to_messages(&self, sources: &[SourceRef]) -> ConversionResult<Vec<DynamicMessage>> {
        debug!(
            message_type = %self.message_type,
            count = sources.len(),
            "serializing source batch"
        );

        let mut pass = self.pass();
        let all = FieldMask::all();
        let messages = sources
            .iter()
            .enumerate()
            .map(|(position, source)| {
                pass.convert(
                    &self.message_type,
                    source,
                    &all,
                    &FieldPath::root().index(position),
                    0,
                )
            })
            .collect::<ConversionResult<Vec<_>>>()?;
        self.finish(messages, pass.violations)
    }

    /// Returns the associations a conversion with `mask` will read.
    #[must_use]
    pub fn preload_plan(&self, mask: &FieldMask) -> PreloadPlan {
        preload::plan(
            &self.registry,
            self.message_type.as_str(),
            mask,
            self.config.max_depth(),
        )
    }

    fn pass(&self) -> Pass<'_> {
        Pass {
            registry: &self.registry,
            config: self.config,
            scope: ViewScope::new(Arc::clone(&self.clock)),
            violations: ViolationSet::new(),
        }
    }

    fn finish<T>(&self, value: T, violations: ViolationSet) -> ConversionResult<T> {
        if !violations.is_empty() {
            debug!(
                message_type = %self.message_type,
                violations = violations.len(),
                "serialization failed validation"
            );
        }
        validation::finish(value, violations).map_err(ConversionError::from)
    }

    fn check_mask(
        &self,
        message_type: &MessageTypeName,
        mask: &FieldMask,
        path: &FieldPath,
    ) -> ConversionResult<()> {
        let mapping = self
            .registry
            .mapping(message_type.as_str())
            .ok_or_else(|| ConversionError::UnknownMessageType(message_type.clone()))?;

        for (name, child) in mask.selected() {
            let field_path = path.field(name);
            let spec = mapping
                .field(name)
                .ok_or_else(|| ConversionError::UnknownMaskField {
                    path: field_path.clone(),
                })?;
            if child.is_all() {
                continue;
            }
            match spec.kind().nested_type() {
                Some(nested) => self.check_mask(nested, child, &field_path)?,
                None => {
                    let first = child.selected().next().map_or("", |(child_name, _)| child_name);
                    return Err(ConversionError::UnknownMaskField {
                        path: field_path.field(first),
                    });
                }
            }
        }
        Ok(())
    }
}

impl fmt::Debug for Serializer {
    fn fmt(&self, formatter: &mut fmt::Formatter<'_>) -> fmt::Result {
        formatter
            .debug_struct("Serializer")
            .field("message_type", &self.message_type)
            .field("config", &self.config)
            .finish_non_exhaustive()
    }
}

/// State of one top-level conversion.
struct Pass<'r> {
    registry: &'r Registry,
    config: ConversionConfig,
    scope: ViewScope,
    violations: ViolationSet,
}

impl Pass<'_> {
    fn convert(
        &mut self,
        message_type: &MessageTypeName,
        source: &SourceRef,
        mask: &FieldMask,
        path: &FieldPath,
        depth: usize,
    ) -> ConversionResult<DynamicMessage> {
        if depth > self.config.max_depth() {
            return Err(ConversionError::DepthExceeded {
                path: path.clone(),
                limit: self.config.max_depth(),
            });
        }

        let registry = self.registry;
        let mapping = registry
            .mapping(message_type.as_str())
            .ok_or_else(|| ConversionError::UnknownMessageType(message_type.clone()))?;

        let view = self.scope.view(source);
        let evaluated = evaluator::resolve(&view, mapping.fields(), mask).map_err(|failure| {
            ConversionError::computation(path.field(failure.spec.name()), failure.error)
        })?;

        let mut message = DynamicMessage::new(mapping.schema());
        for Evaluated { spec, raw } in evaluated {
            let field_path = path.field(spec.name());
            let mut nested = Nested {
                pass: &mut *self,
                depth: depth + 1,
            };
            let value = coercion::coerce(
                raw,
                spec,
                &field_path,
                mask.child(spec.name()),
                &mut nested,
            )?;
            // Violations are recorded in field order, nested ones included.
            validation::check_required([(spec, &value)], path, &mut self.violations);
            message.set(spec.name(), value)?;
        }
        Ok(message)
    }
}

/// Recursion handle passed to the coercion layer.
struct Nested<'p, 'r> {
    pass: &'p mut Pass<'r>,
    depth: usize,
}

impl NestedSerializer for Nested<'_, '_> {
    fn serialize_nested(
        &mut self,
        message_type: &MessageTypeName,
        source: SourceRef,
        mask: &FieldMask,
        path: &FieldPath,
    ) -> ConversionResult<DynamicMessage> {
        self.pass.convert(message_type, &source, mask, path, self.depth)
    }
}
