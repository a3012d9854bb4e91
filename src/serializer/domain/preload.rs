//! Association preload plans.

use std::collections::{BTreeMap, BTreeSet};

/// Tree of associations (and attribute hints) a conversion will read.
///
/// Persistence adapters can walk the plan to eager-load associations before
/// calling the serializer.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PreloadPlan {
    associations: BTreeMap<String, PreloadPlan>,
    attributes: BTreeSet<String>,
}

impl PreloadPlan {
    /// Creates an empty plan.
    #[must_use]
    pub const fn new() -> Self {
        Self {
            associations: BTreeMap::new(),
            attributes: BTreeSet::new(),
        }
    }

    /// Returns `true` when nothing needs loading.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.associations.is_empty() && self.attributes.is_empty()
    }

    /// Returns the plan for an association, if it is part of this plan.
    #[must_use]
    pub fn association(&self, name: &str) -> Option<&Self> {
        self.associations.get(name)
    }

    /// Iterates over associations in name order.
    pub fn associations(&self) -> impl Iterator<Item = (&str, &Self)> {
        self.associations
            .iter()
            .map(|(name, plan)| (name.as_str(), plan))
    }

    /// Returns `true` when the attribute is hinted at this level.
    #[must_use]
    pub fn has_attribute(&self, name: &str) -> bool {
        self.attributes.contains(name)
    }

    /// Iterates over hinted attributes in name order.
    pub fn attributes(&self) -> impl Iterator<Item = &str> {
        self.attributes.iter().map(String::as_str)
    }

    /// Returns the mutable plan for an association, adding it if needed.
    pub fn association_mut(&mut self, name: &str) -> &mut Self {
        self.associations.entry(name.to_owned()).or_default()
    }

    /// Adds an attribute hint.
    pub fn add_attribute(&mut self, name: &str) {
        self.attributes.insert(name.to_owned());
    }

    /// Merges another plan into this one.
    pub fn merge(&mut self, other: Self) {
        self.attributes.extend(other.attributes);
        for (name, plan) in other.associations {
            self.associations.entry(name).or_default().merge(plan);
        }
    }

    /// Renders the association tree as dotted paths, e.g. `profile.works`.
    #[must_use]
    pub fn association_paths(&self) -> Vec<String> {
        let mut paths = Vec::new();
        for (name, plan) in &self.associations {
            paths.push(name.clone());
            paths.extend(
                plan.association_paths()
                    .into_iter()
                    .map(|nested| format!("{name}.{nested}")),
            );
        }
        paths
    }
}
