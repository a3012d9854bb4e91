//! Shared world state for user serialization BDD scenarios.

use chrono::NaiveDate;
use protomap::schema::domain::DynamicMessage;
use protomap::serializer::{error::ConversionError, services::SharedClock};
use rstest::fixture;

/// Scenario world for user serialization behaviour tests.
#[derive(Default)]
pub struct SerializationWorld {
    /// Clock handed to the serializer.
    pub clock: Option<SharedClock>,
    /// Birthday stored on the user's profile.
    pub birthday: Option<NaiveDate>,
    /// Companies the user works at.
    pub companies: Vec<String>,
    /// Whether the derived age is required.
    pub age_required: bool,
    /// Result of the last serialization.
    pub result: Option<Result<DynamicMessage, ConversionError>>,
}

impl SerializationWorld {
    /// Returns the serialized message, failing if serialization did not
    /// run or did not succeed.
    pub fn message(&self) -> Result<&DynamicMessage, eyre::Report> {
        match &self.result {
            Some(Ok(message)) => Ok(message),
            Some(Err(err)) => Err(eyre::eyre!("serialization failed: {err}")),
            None => Err(eyre::eyre!("the user was not serialized")),
        }
    }
}

/// Fixture that creates a new scenario world.
#[fixture]
pub fn world() -> SerializationWorld {
    SerializationWorld::default()
}

/// Parses an ISO 8601 calendar date.
pub fn parse_date(value: &str) -> Result<NaiveDate, eyre::Report> {
    NaiveDate::parse_from_str(value, "%Y-%m-%d")
        .map_err(|err| eyre::eyre!("invalid date '{value}': {err}"))
}
