//! Required-field validation.

use crate::schema::domain::OutputValue;
use crate::serializer::{
    domain::{FieldPath, FieldSpec, Violation, ViolationSet},
    error::ValidationError,
};

/// Records a violation for every required field whose value is unset.
///
/// All fields are checked; nothing short-circuits.
pub fn check_required<'a, I>(fields: I, path: &FieldPath, violations: &mut ViolationSet)
where
    I: IntoIterator<Item = (&'a FieldSpec, &'a OutputValue)>,
{
    violations.extend(
        fields
            .into_iter()
            .filter(|(spec, value)| spec.is_required() && value.is_unset())
            .map(|(spec, _)| Violation::required_but_missing(path.field(spec.name()))),
    );
}

/// Turns the collected violations into the conversion outcome.
///
/// # Errors
///
/// Returns [`ValidationError`] carrying every violation when the set is not
/// empty.
pub fn finish<T>(value: T, violations: ViolationSet) -> Result<T, ValidationError> {
    if violations.is_empty() {
        Ok(value)
    } else {
        Err(ValidationError::new(violations))
    }
}
