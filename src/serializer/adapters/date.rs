//! Calendar dates as source objects.

use crate::serializer::{
    domain::Value,
    ports::{Association, SourceError, SourceObject, SourceResult},
};
use chrono::{Datelike, NaiveDate};

/// Source object reading `year`, `month` and `day` off a date.
///
/// Date fields are serialized through the date message type's own mapping
/// with this adapter as the source, so any message shape with those
/// attributes works.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DateComponents(NaiveDate);

impl DateComponents {
    /// Wraps a date.
    #[must_use]
    pub const fn new(date: NaiveDate) -> Self {
        Self(date)
    }

    /// Returns the wrapped date.
    #[must_use]
    pub const fn date(&self) -> NaiveDate {
        self.0
    }
}

impl SourceObject for DateComponents {
    fn attribute(&self, name: &str) -> SourceResult<Option<Value>> {
        match name {
            "year" => Ok(Some(Value::Int(i64::from(self.0.year())))),
            "month" => Ok(Some(Value::Int(i64::from(self.0.month())))),
            "day" => Ok(Some(Value::Int(i64::from(self.0.day())))),
            other => Err(SourceError::UnknownAttribute(other.to_owned())),
        }
    }

    fn association(&self, name: &str) -> SourceResult<Association> {
        Err(SourceError::UnknownAssociation(name.to_owned()))
    }
}
