//! Unit tests for the serializer module.
//!
//! Tests are organised by component: registry definition, delegation, the
//! memoized view, evaluation, coercion, validation and the façade.

mod mask_tests;
mod serializer_tests;
