//! Field specifications: how each output field is computed.

use crate::schema::domain::FieldKind;
use crate::serializer::{domain::Value, error::ComputationError, services::ObjectView};
use std::fmt;
use std::sync::Arc;

/// Result of a field computation.
pub type ComputeResult = Result<Option<Value>, ComputationError>;

/// Shared field computation.
///
/// Receives the memoized view of the object being serialized and returns the
/// raw value, `Ok(None)` for an expected absence, or an error for an
/// unexpected failure that aborts the conversion.
pub type ComputeFn = Arc<dyn Fn(&ObjectView) -> ComputeResult + Send + Sync>;

/// Association read (and the attribute of it) that a computation relies on.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Dependency {
    association: String,
    attribute: String,
}

impl Dependency {
    /// Creates a dependency on `association.attribute`.
    #[must_use]
    pub fn new(association: impl Into<String>, attribute: impl Into<String>) -> Self {
        Self {
            association: association.into(),
            attribute: attribute.into(),
        }
    }

    /// Returns the association name.
    #[must_use]
    pub fn association(&self) -> &str {
        &self.association
    }

    /// Returns the attribute read off the associated object.
    #[must_use]
    pub fn attribute(&self) -> &str {
        &self.attribute
    }
}

/// Where a field's value comes from.
#[derive(Clone)]
pub enum FieldSource {
    /// Same-named member of the bound object.
    Attribute,
    /// Same-named member of the named association's target.
    Delegated {
        /// Association to read through.
        association: String,
    },
    /// Custom computation.
    Computed(ComputeFn),
}

impl FieldSource {
    /// Returns the delegation target, if any.
    #[must_use]
    pub fn delegated_association(&self) -> Option<&str> {
        match self {
            Self::Delegated { association } => Some(association),
            Self::Attribute | Self::Computed(_) => None,
        }
    }
}

impl fmt::Debug for FieldSource {
    fn fmt(&self, formatter: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Attribute => formatter.write_str("Attribute"),
            Self::Delegated { association } => formatter
                .debug_struct("Delegated")
                .field("association", association)
                .finish(),
            Self::Computed(_) => formatter.write_str("Computed(..)"),
        }
    }
}

/// Options accepted when defining a field.
///
/// # Examples
///
/// ```
/// use protomap::serializer::domain::{FieldOptions, Value};
///
/// let options = FieldOptions::required()
///     .depends_on("profile", "avatar_url")
///     .compute(|view| {
///         Ok(view
///             .association("profile")?
///             .map(|profile| profile.attribute("avatar_url"))
///             .transpose()?
///             .map(|url| url.unwrap_or_else(|| Value::from("https://example.com/default.png"))))
///     });
///
/// assert!(options.is_required());
/// assert_eq!(options.dependencies().len(), 1);
/// ```
#[derive(Clone, Default)]
pub struct FieldOptions {
    required: bool,
    delegate_to: Option<String>,
    dependencies: Vec<Dependency>,
    compute: Option<ComputeFn>,
}

impl FieldOptions {
    /// Creates options for an optional field read from the same-named
    /// attribute.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates options for a required field.
    #[must_use]
    pub fn required() -> Self {
        Self {
            required: true,
            ..Self::default()
        }
    }

    /// Sets whether the field is required.
    #[must_use]
    pub const fn with_required(mut self, required: bool) -> Self {
        self.required = required;
        self
    }

    /// Reads the field through the named association.
    #[must_use]
    pub fn delegate_to(mut self, association: impl Into<String>) -> Self {
        self.delegate_to = Some(association.into());
        self
    }

    /// Declares that the computation reads `association.attribute`.
    #[must_use]
    pub fn depends_on(mut self, association: impl Into<String>, attribute: impl Into<String>) -> Self {
        self.dependencies.push(Dependency::new(association, attribute));
        self
    }

    /// Uses a custom computation.
    #[must_use]
    pub fn compute<F>(mut self, compute: F) -> Self
    where
        F: Fn(&ObjectView) -> ComputeResult + Send + Sync + 'static,
    {
        self.compute = Some(Arc::new(compute));
        self
    }

    /// Returns whether the field is required.
    #[must_use]
    pub const fn is_required(&self) -> bool {
        self.required
    }

    /// Returns the delegation target.
    #[must_use]
    pub fn delegation(&self) -> Option<&str> {
        self.delegate_to.as_deref()
    }

    /// Returns the declared dependencies.
    #[must_use]
    pub fn dependencies(&self) -> &[Dependency] {
        &self.dependencies
    }

    pub(crate) fn into_parts(self) -> (bool, Option<String>, Vec<Dependency>, Option<ComputeFn>) {
        (self.required, self.delegate_to, self.dependencies, self.compute)
    }
}

impl fmt::Debug for FieldOptions {
    fn fmt(&self, formatter: &mut fmt::Formatter<'_>) -> fmt::Result {
        formatter
            .debug_struct("FieldOptions")
            .field("required", &self.required)
            .field("delegate_to", &self.delegate_to)
            .field("dependencies", &self.dependencies)
            .field("compute", &self.compute.as_ref().map(|_| ".."))
            .finish()
    }
}

/// Registered, immutable description of one output field.
#[derive(Clone)]
pub struct FieldSpec {
    name: String,
    kind: FieldKind,
    required: bool,
    source: FieldSource,
    dependencies: Vec<Dependency>,
    compute: ComputeFn,
}

impl FieldSpec {
    pub(crate) fn new(
        name: String,
        kind: FieldKind,
        required: bool,
        source: FieldSource,
        dependencies: Vec<Dependency>,
        compute: ComputeFn,
    ) -> Self {
        Self {
            name,
            kind,
            required,
            source,
            dependencies,
            compute,
        }
    }

    /// Returns the field name.
    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Returns the output kind of the field.
    #[must_use]
    pub const fn kind(&self) -> &FieldKind {
        &self.kind
    }

    /// Returns whether the field must resolve to a set value.
    #[must_use]
    pub const fn is_required(&self) -> bool {
        self.required
    }

    /// Returns where the value comes from.
    #[must_use]
    pub const fn source(&self) -> &FieldSource {
        &self.source
    }

    /// Returns the declared dependencies.
    #[must_use]
    pub fn dependencies(&self) -> &[Dependency] {
        &self.dependencies
    }

    /// Runs the effective computation against a view.
    ///
    /// # Errors
    ///
    /// Propagates the computation's [`ComputationError`].
    pub fn evaluate(&self, view: &ObjectView) -> ComputeResult {
        (self.compute)(view)
    }
}

impl fmt::Debug for FieldSpec {
    fn fmt(&self, formatter: &mut fmt::Formatter<'_>) -> fmt::Result {
        formatter
            .debug_struct("FieldSpec")
            .field("name", &self.name)
            .field("kind", &self.kind)
            .field("required", &self.required)
            .field("source", &self.source)
            .field("dependencies", &self.dependencies)
            .finish_non_exhaustive()
    }
}
