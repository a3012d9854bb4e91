//! Memoized per-conversion view of a source object.

use crate::serializer::{
    domain::Value,
    error::ComputationError,
    ports::{Association, SourceError, SourceRef},
};
use chrono::{DateTime, NaiveDate, Utc};
use mockable::Clock;
use std::cell::RefCell;
use std::collections::HashMap;
use std::fmt;
use std::rc::{Rc, Weak};
use std::sync::Arc;

/// Clock shared between a serializer and the views it creates.
pub type SharedClock = Arc<dyn Clock + Send + Sync>;

/// Result type for view reads.
pub type ViewResult<T> = Result<T, ComputationError>;

/// Views opened during one conversion, keyed by source object identity.
///
/// Opening the same object twice within a scope yields the same view, so a
/// nested conversion reuses the reads its parent already made.
#[derive(Clone)]
pub struct ViewScope {
    inner: Rc<Scope>,
}

struct Scope {
    clock: SharedClock,
    views: RefCell<HashMap<*const (), Weak<ObjectView>>>,
}

impl ViewScope {
    /// Creates an empty scope.
    #[must_use]
    pub fn new(clock: SharedClock) -> Self {
        Self {
            inner: Rc::new(Scope {
                clock,
                views: RefCell::new(HashMap::new()),
            }),
        }
    }

    /// Returns the live view of `object`, opening one if none exists.
    #[must_use]
    pub fn view(&self, object: &SourceRef) -> Rc<ObjectView> {
        let key = Arc::as_ptr(object).cast::<()>();
        let existing = self.inner.views.borrow().get(&key).and_then(Weak::upgrade);
        if let Some(view) = existing {
            return view;
        }
        let view = Rc::new(ObjectView::scoped(Arc::clone(object), self.clone()));
        self.inner
            .views
            .borrow_mut()
            .insert(key, Rc::downgrade(&view));
        view
    }
}

impl fmt::Debug for ViewScope {
    fn fmt(&self, formatter: &mut fmt::Formatter<'_>) -> fmt::Result {
        formatter
            .debug_struct("ViewScope")
            .field("views", &self.inner.views.borrow().len())
            .finish_non_exhaustive()
    }
}

#[derive(Clone)]
enum CachedAssociation {
    Absent,
    One(Rc<ObjectView>),
    Many(Vec<SourceRef>),
}

/// Read-through cache around one source object for one conversion.
///
/// Every attribute and association is read from the source at most once.
/// Singular associations are exposed as child views that share this
/// lifetime, so `profile.avatar_url` read by two sibling fields costs one
/// association load and one attribute read. Views opened through the same
/// [`ViewScope`] share child views by object identity.
pub struct ObjectView {
    object: SourceRef,
    scope: ViewScope,
    attributes: RefCell<HashMap<String, Option<Value>>>,
    associations: RefCell<HashMap<String, CachedAssociation>>,
}

impl ObjectView {
    /// Binds a view to a source object in a scope of its own.
    #[must_use]
    pub fn new(object: SourceRef, clock: SharedClock) -> Self {
        Self::scoped(object, ViewScope::new(clock))
    }

    fn scoped(object: SourceRef, scope: ViewScope) -> Self {
        Self {
            object,
            scope,
            attributes: RefCell::new(HashMap::new()),
            associations: RefCell::new(HashMap::new()),
        }
    }

    /// Returns the bound source object.
    #[must_use]
    pub const fn object(&self) -> &SourceRef {
        &self.object
    }

    /// Returns the current UTC instant from the injected clock.
    #[must_use]
    pub fn now(&self) -> DateTime<Utc> {
        self.scope.inner.clock.utc()
    }

    /// Returns today's UTC date from the injected clock.
    #[must_use]
    pub fn today(&self) -> NaiveDate {
        self.now().date_naive()
    }

    /// Reads an attribute of the bound object.
    ///
    /// # Errors
    ///
    /// Returns [`ComputationError::Source`] when the attribute is unknown or
    /// cannot be read.
    pub fn attribute(&self, name: &str) -> ViewResult<Option<Value>> {
        if let Some(cached) = self.attributes.borrow().get(name) {
            return Ok(cached.clone());
        }
        let value = self.object.attribute(name)?;
        self.attributes
            .borrow_mut()
            .insert(name.to_owned(), value.clone());
        Ok(value)
    }

    /// Reads a singular association as a child view.
    ///
    /// Returns `Ok(None)` when the association is absent.
    ///
    /// # Errors
    ///
    /// Returns [`ComputationError::NotSingular`] for collections and
    /// [`ComputationError::Source`] for read failures.
    pub fn association(&self, name: &str) -> ViewResult<Option<Rc<Self>>> {
        match self.load_association(name)? {
            CachedAssociation::Absent => Ok(None),
            CachedAssociation::One(view) => Ok(Some(view)),
            CachedAssociation::Many(_) => Err(ComputationError::NotSingular(name.to_owned())),
        }
    }

    /// Reads a singular association that must be present.
    ///
    /// # Errors
    ///
    /// Returns [`ComputationError::AbsentAssociation`] when it is absent, in
    /// addition to the errors of [`ObjectView::association`].
    pub fn require(&self, name: &str) -> ViewResult<Rc<Self>> {
        self.association(name)?
            .ok_or_else(|| ComputationError::AbsentAssociation(name.to_owned()))
    }

    /// Reads a collection association.
    ///
    /// Returns `Ok(None)` when the association is absent. A singular
    /// association reads as a one-element collection.
    ///
    /// # Errors
    ///
    /// Returns [`ComputationError::Source`] for read failures.
    pub fn collection(&self, name: &str) -> ViewResult<Option<Vec<SourceRef>>> {
        Ok(match self.load_association(name)? {
            CachedAssociation::Absent => None,
            CachedAssociation::One(view) => Some(vec![Arc::clone(view.object())]),
            CachedAssociation::Many(items) => Some(items),
        })
    }

    /// Reads an association of any cardinality as a raw value.
    ///
    /// # Errors
    ///
    /// Returns [`ComputationError::Source`] for read failures.
    pub fn association_value(&self, name: &str) -> ViewResult<Option<Value>> {
        Ok(match self.load_association(name)? {
            CachedAssociation::Absent => None,
            CachedAssociation::One(view) => Some(Value::Object(Arc::clone(view.object()))),
            CachedAssociation::Many(items) => Some(Value::List(items)),
        })
    }

    /// Reads `association.attribute`, yielding `None` when the association
    /// is absent.
    ///
    /// # Errors
    ///
    /// Propagates read failures of either step.
    pub fn path(&self, association: &str, attribute: &str) -> ViewResult<Option<Value>> {
        self.association(association)?
            .map_or(Ok(None), |related| related.attribute(attribute))
    }

    /// Reads `name` the way an undeclared field would: as an association for
    /// message-shaped fields and as an attribute otherwise.
    ///
    /// # Errors
    ///
    /// Propagates read failures.
    pub fn member(&self, name: &str, association: bool) -> ViewResult<Option<Value>> {
        if association {
            self.association_value(name)
        } else {
            self.attribute(name)
        }
    }

    /// Returns `true` if the association was already loaded through this view.
    #[must_use]
    pub fn is_loaded(&self, name: &str) -> bool {
        self.associations.borrow().contains_key(name)
    }

    fn load_association(&self, name: &str) -> Result<CachedAssociation, SourceError> {
        if let Some(cached) = self.associations.borrow().get(name) {
            return Ok(cached.clone());
        }
        let loaded = match self.object.association(name)? {
            Association::Absent => CachedAssociation::Absent,
            Association::One(related) => CachedAssociation::One(self.scope.view(&related)),
            Association::Many(items) => CachedAssociation::Many(items),
        };
        self.associations
            .borrow_mut()
            .insert(name.to_owned(), loaded.clone());
        Ok(loaded)
    }
}

impl fmt::Debug for ObjectView {
    fn fmt(&self, formatter: &mut fmt::Formatter<'_>) -> fmt::Result {
        formatter
            .debug_struct("ObjectView")
            .field("object", &self.object)
            .field("cached_attributes", &self.attributes.borrow().len())
            .field("cached_associations", &self.associations.borrow().len())
            .finish_non_exhaustive()
    }
}
