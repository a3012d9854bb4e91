//! Conversion services.
//!
//! [`Serializer`] is the entry point. The other modules are the stages it
//! runs for each message: [`evaluator`] computes raw values through a
//! memoized [`ObjectView`], [`coercion`] shapes them into output values and
//! recurses into nested messages, and [`validation`] collects missing
//! required fields.

pub mod coercion;
pub mod delegation;
pub mod evaluator;
pub mod preload;
pub mod serializer;
pub mod validation;
pub mod view;

pub use serializer::Serializer;
pub use view::{ObjectView, SharedClock, ViewScope};
