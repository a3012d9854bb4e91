//! Field masks selecting which fields a conversion evaluates.

use std::collections::BTreeMap;
use thiserror::Error;

/// Error returned for malformed mask paths.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
#[error("invalid field mask path '{0}'")]
pub struct FieldMaskError(pub String);

/// Tree of selected fields.
///
/// An empty mask selects every field. A field selected by a bare path
/// selects all of its nested fields, even when longer paths name some of
/// them.
///
/// # Examples
///
/// ```
/// use protomap::serializer::domain::FieldMask;
///
/// let mask = FieldMask::from_paths(["name", "works.company"]).expect("valid paths");
/// assert!(mask.includes("name"));
/// assert!(!mask.includes("age"));
/// assert!(mask.child("works").includes("company"));
/// assert!(mask.child("name").is_all());
/// ```
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FieldMask {
    fields: BTreeMap<String, Option<FieldMask>>,
}

/// Shared mask selecting everything.
static ALL: FieldMask = FieldMask {
    fields: BTreeMap::new(),
};

impl FieldMask {
    /// Returns the mask selecting every field.
    #[must_use]
    pub const fn all() -> Self {
        Self {
            fields: BTreeMap::new(),
        }
    }

    /// Builds a mask from dotted paths such as `works.company`.
    ///
    /// # Errors
    ///
    /// Returns [`FieldMaskError`] when a path has an empty segment.
    pub fn from_paths<I, S>(paths: I) -> Result<Self, FieldMaskError>
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let mut mask = Self::all();
        for path in paths {
            let raw = path.as_ref();
            let segments = raw.trim().split('.').collect::<Vec<_>>();
            if segments.iter().any(|segment| segment.trim().is_empty()) {
                return Err(FieldMaskError(raw.to_owned()));
            }
            mask.insert(&segments);
        }
        Ok(mask)
    }

    /// Returns `true` when every field is selected.
    #[must_use]
    pub fn is_all(&self) -> bool {
        self.fields.is_empty()
    }

    /// Returns `true` when `field` is selected.
    #[must_use]
    pub fn includes(&self, field: &str) -> bool {
        self.is_all() || self.fields.contains_key(field)
    }

    /// Returns the sub-mask for a selected field.
    ///
    /// Unselected fields and leaf selections both yield the all-fields mask;
    /// callers check [`FieldMask::includes`] first.
    #[must_use]
    pub fn child(&self, field: &str) -> &Self {
        self.fields
            .get(field)
            .and_then(Option::as_ref)
            .unwrap_or(&ALL)
    }

    /// Iterates over explicitly selected field names.
    pub fn selected(&self) -> impl Iterator<Item = (&str, &Self)> {
        self.fields
            .iter()
            .map(|(name, mask)| (name.as_str(), mask.as_ref().unwrap_or(&ALL)))
    }

    fn insert(&mut self, segments: &[&str]) {
        let Some((first, rest)) = segments.split_first() else {
            return;
        };
        let name = (*first).trim().to_owned();
        if rest.is_empty() {
            self.fields.insert(name, None);
            return;
        }
        if let Some(child) = self
            .fields
            .entry(name)
            .or_insert_with(|| Some(Self::all()))
        {
            child.insert(rest);
        }
    }
}
