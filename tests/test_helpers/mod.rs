//! Shared mappings, clocks and records for integration tests.
//!
//! The mapping describes a user whose name, avatar, birthday and works are
//! delegated to a profile association, with an age computed from the
//! profile birthday and a fixed clock.

use std::sync::Arc;

use chrono::{DateTime, Local, NaiveDate, TimeZone, Utc};
use mockable::Clock;
use protomap::schema::domain::{FieldKind, MessageSchema, MessageTypeName, ScalarType};
use protomap::serializer::{
    adapters::InMemoryRecord,
    domain::{FieldOptions, Value},
    error::{ComputationError, DefinitionError},
    ports::SourceRef,
    registry::{Registry, RegistryBuilder},
    services::{ObjectView, Serializer, SharedClock},
};

/// Clock frozen at a fixed instant.
#[derive(Debug, Clone, Copy)]
pub struct FixedClock(pub DateTime<Utc>);

impl Clock for FixedClock {
    fn local(&self) -> DateTime<Local> {
        self.0.with_timezone(&Local)
    }

    fn utc(&self) -> DateTime<Utc> {
        self.0
    }
}

/// Returns a clock frozen at noon UTC on the given day.
pub fn clock_on(year: i32, month: u32, day: u32) -> Result<SharedClock, eyre::Report> {
    let now = Utc
        .with_ymd_and_hms(year, month, day, 12, 0, 0)
        .single()
        .ok_or_else(|| eyre::eyre!("invalid clock date {year}-{month}-{day}"))?;
    Ok(Arc::new(FixedClock(now)))
}

/// Builds a calendar date.
pub fn date(year: i32, month: u32, day: u32) -> Result<NaiveDate, eyre::Report> {
    NaiveDate::from_ymd_opt(year, month, day)
        .ok_or_else(|| eyre::eyre!("invalid date {year}-{month}-{day}"))
}

fn nested(name: &str) -> Result<MessageTypeName, DefinitionError> {
    MessageTypeName::new(name).map_err(DefinitionError::from)
}

fn register_schemas(builder: &mut RegistryBuilder) -> Result<(), DefinitionError> {
    let string = FieldKind::Scalar(ScalarType::String);
    let int32 = FieldKind::Scalar(ScalarType::Int32);

    builder
        .register_schema(
            MessageSchema::builder("wantedly.users.User")
                .field("id", FieldKind::Scalar(ScalarType::Int64))
                .field("name", string.clone())
                .field("avatar_url", FieldKind::Wrapper(ScalarType::String))
                .field("birthday", FieldKind::Date(nested("type.Date")?))
                .field("age", int32.clone())
                .field("works", FieldKind::Repeated(nested("wantedly.users.Work")?))
                .field(
                    "preference",
                    FieldKind::Message(nested("wantedly.users.Preference")?),
                )
                .build()?,
        )?
        .register_schema(
            MessageSchema::builder("wantedly.users.Work")
                .field("company", string.clone())
                .build()?,
        )?
        .register_schema(
            MessageSchema::builder("wantedly.users.Preference")
                .field("email", string)
                .build()?,
        )?
        .register_schema(
            MessageSchema::builder("type.Date")
                .field("year", int32.clone())
                .field("month", int32.clone())
                .field("day", int32)
                .build()?,
        )?;
    Ok(())
}

fn age(view: &ObjectView) -> Result<Option<Value>, ComputationError> {
    let Some(birthday) = view.path("profile", "birthday")? else {
        return Ok(None);
    };
    let born = birthday
        .as_date()
        .ok_or_else(|| ComputationError::unexpected("birthday", "date", birthday.type_name()))?;
    Ok(view
        .today()
        .years_since(born)
        .map(|years| Value::from(i64::from(years))))
}

/// Builds the user registry.
///
/// `age_required` toggles whether a missing age is a violation.
pub fn user_registry(age_required: bool) -> Result<Arc<Registry>, DefinitionError> {
    let mut builder = Registry::builder();
    register_schemas(&mut builder)?;

    builder
        .define("wantedly.users.User", "id", FieldOptions::required())?
        .delegate(
            "wantedly.users.User",
            ["name", "avatar_url", "birthday", "works"],
            "profile",
        )?
        .define(
            "wantedly.users.User",
            "age",
            FieldOptions::new()
                .with_required(age_required)
                .depends_on("profile", "birthday")
                .compute(age),
        )?
        .define("wantedly.users.User", "preference", FieldOptions::new())?
        .define("wantedly.users.Work", "company", FieldOptions::required())?
        .define("wantedly.users.Preference", "email", FieldOptions::required())?;
    for part in ["year", "month", "day"] {
        builder.define("type.Date", part, FieldOptions::required())?;
    }

    Ok(Arc::new(builder.build()?))
}

/// Creates a serializer for users with the given clock.
pub fn user_serializer(
    age_required: bool,
    clock: SharedClock,
) -> Result<Serializer, eyre::Report> {
    let registry = user_registry(age_required)?;
    Ok(Serializer::new(registry, "wantedly.users.User")?.with_clock(clock))
}

/// Creates a work record.
pub fn work(company: &str) -> SourceRef {
    InMemoryRecord::new()
        .with_attribute("company", company)
        .into_ref()
}

/// Creates a user record whose profile carries the birthday and works.
pub fn user_record(birthday: Option<NaiveDate>, works: Vec<SourceRef>) -> InMemoryRecord {
    let profile = InMemoryRecord::new()
        .labelled("profile")
        .with_attribute("name", "Masayuki Izumi")
        .with_attribute("avatar_url", "https://example.com/izumin5210.png")
        .with_optional("birthday", birthday.map(Value::from))
        .with_many("works", works);
    let preference = InMemoryRecord::new().with_attribute("email", "izumin@example.com");

    InMemoryRecord::new()
        .labelled("user")
        .with_attribute("id", 1_i64)
        .with_one("profile", profile.into_ref())
        .with_one("preference", preference.into_ref())
}
