//! Step definitions for user serialization scenarios.

mod given;
mod then;
mod when;
pub mod world;
