//! Source object adapters.
//!
//! - [`memory`]: map-backed records with optional lazy associations
//! - [`date`]: exposes a calendar date as `year`, `month` and `day`

pub mod date;
pub mod memory;

pub use date::DateComponents;
pub use memory::InMemoryRecord;
