//! Field evaluation in declaration order.

use crate::serializer::{
    domain::{FieldMask, FieldSpec, Value},
    error::ComputationError,
    services::ObjectView,
};
use tracing::trace;

/// Raw value computed for one field.
#[derive(Debug)]
pub struct Evaluated<'r> {
    /// Field specification.
    pub spec: &'r FieldSpec,
    /// Raw value; `None` for absence.
    pub raw: Option<Value>,
}

/// Failure of one field's computation.
#[derive(Debug)]
pub struct EvaluationFailure<'r> {
    /// Field whose computation failed.
    pub spec: &'r FieldSpec,
    /// Underlying error.
    pub error: ComputationError,
}

/// Computes every field selected by `mask`, each exactly once.
///
/// Declared dependencies are loaded through the view before the
/// computation runs. They are hints: an absent dependency is only traced
/// and the computation still decides what to return.
///
/// # Errors
///
/// Returns the first failing field; evaluation stops there.
pub fn resolve<'r>(
    view: &ObjectView,
    fields: &'r [FieldSpec],
    mask: &FieldMask,
) -> Result<Vec<Evaluated<'r>>, EvaluationFailure<'r>> {
    let mut resolved = Vec::with_capacity(fields.len());

    for spec in fields.iter().filter(|spec| mask.includes(spec.name())) {
        warm_dependencies(view, spec).map_err(|error| EvaluationFailure { spec, error })?;
        let raw = spec
            .evaluate(view)
            .map_err(|error| EvaluationFailure { spec, error })?;
        trace!(field = spec.name(), present = raw.is_some(), "evaluated field");
        resolved.push(Evaluated { spec, raw });
    }

    Ok(resolved)
}

fn warm_dependencies(view: &ObjectView, spec: &FieldSpec) -> Result<(), ComputationError> {
    for dependency in spec.dependencies() {
        if view.association_value(dependency.association())?.is_none() {
            trace!(
                field = spec.name(),
                association = dependency.association(),
                attribute = dependency.attribute(),
                "dependency is absent"
            );
        }
    }
    Ok(())
}
