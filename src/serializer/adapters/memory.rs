//! Map-backed source records.

use crate::serializer::{
    domain::Value,
    ports::{Association, SourceError, SourceObject, SourceRef, SourceResult},
};
use std::collections::HashMap;
use std::fmt;
use std::sync::{Arc, Mutex};

type Loader = Arc<dyn Fn() -> SourceResult<Association> + Send + Sync>;

#[derive(Clone)]
enum StoredAssociation {
    Loaded(Association),
    Lazy(Loader),
}

/// Source record held in memory.
///
/// Attributes and associations are declared up front; reading an
/// undeclared name is an error, mirroring a record without that column or
/// relation. Every read is counted so callers can observe how often the
/// engine touches the record.
///
/// # Examples
///
/// ```
/// use std::sync::Arc;
///
/// use protomap::serializer::{adapters::InMemoryRecord, ports::SourceObject};
///
/// let profile = InMemoryRecord::new().with_attribute("name", "Masayuki Izumi");
/// let user = InMemoryRecord::new()
///     .with_one("profile", Arc::new(profile))
///     .with_absent("preference");
///
/// assert!(user.association("preference").expect("declared").is_absent());
/// assert_eq!(user.read_count("preference"), 1);
/// assert!(user.attribute("email").is_err());
/// ```
#[derive(Clone, Default)]
pub struct InMemoryRecord {
    label: Option<String>,
    attributes: HashMap<String, Option<Value>>,
    associations: HashMap<String, StoredAssociation>,
    reads: Arc<Mutex<HashMap<String, usize>>>,
}

impl InMemoryRecord {
    /// Creates a record with nothing declared.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets a label shown in debug output.
    #[must_use]
    pub fn labelled(mut self, label: impl Into<String>) -> Self {
        self.label = Some(label.into());
        self
    }

    /// Declares an attribute holding a value.
    #[must_use]
    pub fn with_attribute(mut self, name: impl Into<String>, value: impl Into<Value>) -> Self {
        self.attributes.insert(name.into(), Some(value.into()));
        self
    }

    /// Declares an attribute holding no value.
    #[must_use]
    pub fn with_null(mut self, name: impl Into<String>) -> Self {
        self.attributes.insert(name.into(), None);
        self
    }

    /// Declares an attribute that may or may not hold a value.
    #[must_use]
    pub fn with_optional(mut self, name: impl Into<String>, value: Option<Value>) -> Self {
        self.attributes.insert(name.into(), value);
        self
    }

    /// Declares a singular association to `related`.
    #[must_use]
    pub fn with_one(self, name: impl Into<String>, related: SourceRef) -> Self {
        self.with_association(name, Association::One(related))
    }

    /// Declares an association with no related object.
    #[must_use]
    pub fn with_absent(self, name: impl Into<String>) -> Self {
        self.with_association(name, Association::Absent)
    }

    /// Declares a collection association.
    #[must_use]
    pub fn with_many(self, name: impl Into<String>, related: Vec<SourceRef>) -> Self {
        self.with_association(name, Association::Many(related))
    }

    /// Declares an association resolved by `loader` on every read.
    #[must_use]
    pub fn with_lazy<F>(mut self, name: impl Into<String>, loader: F) -> Self
    where
        F: Fn() -> SourceResult<Association> + Send + Sync + 'static,
    {
        self.associations
            .insert(name.into(), StoredAssociation::Lazy(Arc::new(loader)));
        self
    }

    /// Returns how many times `name` was read as an attribute or association.
    #[must_use]
    pub fn read_count(&self, name: &str) -> usize {
        self.reads
            .lock()
            .map(|reads| reads.get(name).copied().unwrap_or_default())
            .unwrap_or_default()
    }

    /// Returns the total number of reads.
    #[must_use]
    pub fn total_reads(&self) -> usize {
        self.reads
            .lock()
            .map(|reads| reads.values().sum())
            .unwrap_or_default()
    }

    /// Wraps the record in a shared handle.
    #[must_use]
    pub fn into_ref(self) -> SourceRef {
        Arc::new(self)
    }

    fn with_association(mut self, name: impl Into<String>, association: Association) -> Self {
        self.associations
            .insert(name.into(), StoredAssociation::Loaded(association));
        self
    }

    fn record_read(&self, name: &str) {
        if let Ok(mut reads) = self.reads.lock() {
            *reads.entry(name.to_owned()).or_default() += 1;
        }
    }
}

impl SourceObject for InMemoryRecord {
    fn attribute(&self, name: &str) -> SourceResult<Option<Value>> {
        self.record_read(name);
        self.attributes
            .get(name)
            .cloned()
            .ok_or_else(|| SourceError::UnknownAttribute(name.to_owned()))
    }

    fn association(&self, name: &str) -> SourceResult<Association> {
        self.record_read(name);
        match self.associations.get(name) {
            Some(StoredAssociation::Loaded(association)) => Ok(association.clone()),
            Some(StoredAssociation::Lazy(loader)) => loader(),
            None => Err(SourceError::UnknownAssociation(name.to_owned())),
        }
    }
}

impl fmt::Debug for InMemoryRecord {
    fn fmt(&self, formatter: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut attributes = self.attributes.keys().collect::<Vec<_>>();
        attributes.sort();
        let mut associations = self.associations.keys().collect::<Vec<_>>();
        associations.sort();
        formatter
            .debug_struct("InMemoryRecord")
            .field("label", &self.label)
            .field("attributes", &attributes)
            .field("associations", &associations)
            .finish_non_exhaustive()
    }
}
