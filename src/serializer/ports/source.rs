//! Source object port.
//!
//! Domain records are exposed to the engine through named attribute and
//! association reads. Implementations decide how associations are loaded
//! (eagerly or lazily) but repeated reads must be idempotent and free of
//! side effects visible to the engine.

use crate::serializer::domain::Value;
use std::fmt;
use std::sync::Arc;
use thiserror::Error;

/// Shared handle to a source object.
pub type SourceRef = Arc<dyn SourceObject>;

/// Result type for source reads.
pub type SourceResult<T> = Result<T, SourceError>;

/// Read-only view of a domain record.
pub trait SourceObject: fmt::Debug + Send + Sync {
    /// Reads a named attribute.
    ///
    /// Returns `Ok(None)` for a known attribute that holds no value.
    ///
    /// # Errors
    ///
    /// Returns [`SourceError::UnknownAttribute`] when the record has no such
    /// attribute, or [`SourceError::Load`] when reading fails.
    fn attribute(&self, name: &str) -> SourceResult<Option<Value>>;

    /// Reads a named association.
    ///
    /// # Errors
    ///
    /// Returns [`SourceError::UnknownAssociation`] when the record has no such
    /// association, or [`SourceError::Load`] when loading fails.
    fn association(&self, name: &str) -> SourceResult<Association>;
}

/// Result of reading an association.
#[derive(Debug, Clone)]
pub enum Association {
    /// No related object.
    Absent,
    /// A single related object.
    One(SourceRef),
    /// An ordered collection of related objects.
    Many(Vec<SourceRef>),
}

impl Association {
    /// Wraps an optional related object.
    #[must_use]
    pub fn from_option(related: Option<SourceRef>) -> Self {
        related.map_or(Self::Absent, Self::One)
    }

    /// Returns `true` when no related object exists.
    ///
    /// An empty collection is not absent.
    #[must_use]
    pub const fn is_absent(&self) -> bool {
        matches!(self, Self::Absent)
    }

    /// Converts the association into a raw value.
    #[must_use]
    pub fn into_value(self) -> Option<Value> {
        match self {
            Self::Absent => None,
            Self::One(related) => Some(Value::Object(related)),
            Self::Many(related) => Some(Value::List(related)),
        }
    }
}

/// Errors raised by source object reads.
#[derive(Debug, Clone, Error)]
pub enum SourceError {
    /// The record has no attribute with this name.
    #[error("unknown attribute '{0}'")]
    UnknownAttribute(String),

    /// The record has no association with this name.
    #[error("unknown association '{0}'")]
    UnknownAssociation(String),

    /// Reading or loading failed in the persistence layer.
    #[error("failed to load '{name}': {source}")]
    Load {
        /// Attribute or association being read.
        name: String,
        /// Underlying persistence error.
        source: Arc<dyn std::error::Error + Send + Sync>,
    },
}

impl SourceError {
    /// Wraps a persistence-layer failure.
    #[must_use]
    pub fn load(name: impl Into<String>, err: impl std::error::Error + Send + Sync + 'static) -> Self {
        Self::Load {
            name: name.into(),
            source: Arc::new(err),
        }
    }
}
