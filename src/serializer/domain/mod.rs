//! Domain model for the serializer.
//!
//! Raw values, field specifications, paths, violations, masks and preload
//! plans. Nothing here talks to a source object directly.

mod field_spec;
mod mask;
mod path;
mod preload;
mod value;
mod violation;

pub use field_spec::{ComputeFn, ComputeResult, Dependency, FieldOptions, FieldSource, FieldSpec};
pub use mask::{FieldMask, FieldMaskError};
pub use path::{FieldPath, PathSegment};
pub use preload::PreloadPlan;
pub use value::Value;
pub use violation::{Violation, ViolationReason, ViolationSet};
