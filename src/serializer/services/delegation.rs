//! Resolution of field sources into effective computations.
//!
//! Plain attribute fields and delegated fields are rewritten into ordinary
//! computations when the registry is built, so the evaluator only ever runs
//! [`ComputeFn`]s.

use crate::schema::domain::FieldKind;
use crate::serializer::{
    domain::{ComputeFn, FieldSource},
    services::ObjectView,
};
use std::sync::Arc;

/// Returns the computation that produces a field's raw value.
///
/// - `Attribute` reads the same-named member of the bound object.
/// - `Delegated` reads the association first. An absent association makes the
///   field absent; a present one has the same-named member read off it.
/// - `Computed` is returned unchanged.
///
/// Members are read as associations for message and repeated kinds, and as
/// attributes otherwise.
#[must_use]
pub fn effective_compute(name: &str, kind: &FieldKind, source: &FieldSource) -> ComputeFn {
    let member = name.to_owned();
    let association_member = kind.reads_association();

    match source {
        FieldSource::Attribute => {
            Arc::new(move |view: &ObjectView| view.member(&member, association_member))
        }
        FieldSource::Delegated { association } => {
            let target = association.clone();
            Arc::new(move |view: &ObjectView| {
                view.association(&target)?
                    .map_or(Ok(None), |related| related.member(&member, association_member))
            })
        }
        FieldSource::Computed(compute) => Arc::clone(compute),
    }
}
