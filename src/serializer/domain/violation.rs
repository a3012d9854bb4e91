//! Required-field violations collected during one conversion.

use super::FieldPath;
use std::fmt;

/// Why a field failed validation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ViolationReason {
    /// The field is required but resolved to its unset value.
    RequiredButMissing,
}

impl fmt::Display for ViolationReason {
    fn fmt(&self, formatter: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::RequiredButMissing => formatter.write_str("required but missing"),
        }
    }
}

/// One `(path, reason)` finding.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Violation {
    path: FieldPath,
    reason: ViolationReason,
}

impl Violation {
    /// Creates a violation.
    #[must_use]
    pub const fn new(path: FieldPath, reason: ViolationReason) -> Self {
        Self { path, reason }
    }

    /// Creates a missing-required-field violation.
    #[must_use]
    pub const fn required_but_missing(path: FieldPath) -> Self {
        Self::new(path, ViolationReason::RequiredButMissing)
    }

    /// Returns the field path.
    #[must_use]
    pub const fn path(&self) -> &FieldPath {
        &self.path
    }

    /// Returns the reason.
    #[must_use]
    pub const fn reason(&self) -> ViolationReason {
        self.reason
    }
}

impl fmt::Display for Violation {
    fn fmt(&self, formatter: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(formatter, "{}: {}", self.path, self.reason)
    }
}

/// Ordered violations of one conversion, nested messages included.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ViolationSet {
    violations: Vec<Violation>,
}

impl ViolationSet {
    /// Creates an empty set.
    #[must_use]
    pub const fn new() -> Self {
        Self {
            violations: Vec::new(),
        }
    }

    /// Records a violation.
    pub fn push(&mut self, violation: Violation) {
        self.violations.push(violation);
    }

    /// Returns the number of violations.
    #[must_use]
    pub fn len(&self) -> usize {
        self.violations.len()
    }

    /// Returns `true` when no violation was recorded.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.violations.is_empty()
    }

    /// Iterates over violations in the order they were recorded.
    pub fn iter(&self) -> impl Iterator<Item = &Violation> {
        self.violations.iter()
    }

    /// Returns `true` when a violation with this rendered path exists.
    #[must_use]
    pub fn contains_path(&self, path: &str) -> bool {
        self.violations
            .iter()
            .any(|violation| violation.path.to_string() == path)
    }

    /// Returns the rendered paths in order.
    #[must_use]
    pub fn paths(&self) -> Vec<String> {
        self.violations
            .iter()
            .map(|violation| violation.path.to_string())
            .collect()
    }
}

impl fmt::Display for ViolationSet {
    fn fmt(&self, formatter: &mut fmt::Formatter<'_>) -> fmt::Result {
        let rendered = self
            .violations
            .iter()
            .map(ToString::to_string)
            .collect::<Vec<_>>()
            .join("; ");
        formatter.write_str(&rendered)
    }
}

impl IntoIterator for ViolationSet {
    type Item = Violation;
    type IntoIter = std::vec::IntoIter<Violation>;

    fn into_iter(self) -> Self::IntoIter {
        self.violations.into_iter()
    }
}

impl Extend<Violation> for ViolationSet {
    fn extend<T: IntoIterator<Item = Violation>>(&mut self, iter: T) {
        self.violations.extend(iter);
    }
}
