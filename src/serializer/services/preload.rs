//! Preload planning from field definitions.

use crate::serializer::{
    domain::{FieldMask, FieldSource, PreloadPlan},
    registry::Registry,
};

/// Derives the associations a conversion of `message_type` will read.
///
/// Delegations, declared dependencies and message-shaped fields contribute
/// associations; plain reads contribute attribute hints. Nested message
/// types are planned recursively up to `max_depth` levels.
#[must_use]
pub fn plan(
    registry: &Registry,
    message_type: &str,
    mask: &FieldMask,
    max_depth: usize,
) -> PreloadPlan {
    let mut planned = PreloadPlan::new();
    let Some(mapping) = registry.mapping(message_type) else {
        return planned;
    };

    for spec in mapping
        .fields()
        .iter()
        .filter(|spec| mask.includes(spec.name()))
    {
        for dependency in spec.dependencies() {
            planned
                .association_mut(dependency.association())
                .add_attribute(dependency.attribute());
        }

        let mut member = PreloadPlan::new();
        match (spec.source(), spec.kind().nested_type()) {
            (FieldSource::Computed(_), _) => continue,
            (_, Some(nested)) if spec.kind().reads_association() => {
                let nested_plan = if max_depth == 0 {
                    PreloadPlan::new()
                } else {
                    plan(
                        registry,
                        nested.as_str(),
                        mask.child(spec.name()),
                        max_depth.saturating_sub(1),
                    )
                };
                member.association_mut(spec.name()).merge(nested_plan);
            }
            _ => member.add_attribute(spec.name()),
        }

        match spec.source().delegated_association() {
            Some(association) => planned.association_mut(association).merge(member),
            None => planned.merge(member),
        }
    }

    planned
}
