//! Tests for the serializer façade.

use super::fixtures::{
    DEFAULT_AVATAR_URL, clock, date, define_user, example_user, profile, registry, schema,
    type_name, user, user_schemas, user_serializer, work,
};
use crate::schema::domain::{
    FieldKind, MessageSchema, OutputValue, ScalarType, ScalarValue, Timestamp,
};
use crate::serializer::{
    adapters::InMemoryRecord,
    config::ConversionConfig,
    domain::{FieldMask, FieldOptions, FieldPath},
    error::{CoercionError, ComputationError, ConversionError, DefinitionError},
    ports::{Association, SourceError, SourceRef},
    registry::Registry,
    services::{Serializer, SharedClock},
};
use chrono::{TimeZone, Utc};
use rstest::rstest;
use serde_json::json;
use std::sync::Arc;

fn violation_paths(error: &ConversionError) -> Vec<String> {
    error
        .as_validation()
        .map(|validation| validation.violations().paths())
        .unwrap_or_default()
}

fn account(profile_record: Option<InMemoryRecord>) -> SourceRef {
    let record = InMemoryRecord::new().labelled("account");
    match profile_record {
        Some(related) => record.with_one("profile", related.into_ref()),
        None => record.with_absent("profile"),
    }
    .into_ref()
}

#[rstest]
fn example_user_converts_completely(user_serializer: Serializer, example_user: SourceRef) {
    let message = user_serializer
        .to_message(&example_user)
        .expect("complete user converts");
    let registered_at = Utc
        .with_ymd_and_hms(2016, 4, 1, 9, 30, 0)
        .single()
        .expect("valid instant");

    assert_eq!(message.int("id"), Some(42));
    assert_eq!(
        message.timestamp("registered_at"),
        Some(Timestamp::from_datetime(registered_at))
    );
    assert_eq!(message.string("name"), Some("Masayuki Izumi"));
    assert_eq!(
        message.wrapper("avatar_url"),
        Some(&ScalarValue::from("https://example.com/izumin5210.png"))
    );
    assert_eq!(message.int("age"), Some(3));

    let birthday = message.message("birthday").expect("birthday is set");
    assert_eq!(birthday.int("year"), Some(2016));
    assert_eq!(birthday.int("month"), Some(1));
    assert_eq!(birthday.int("day"), Some(2));

    let works = message.repeated("works");
    assert_eq!(works.len(), 1);
    assert_eq!(
        works.first().and_then(|first| first.string("company")),
        Some("Wantedly, Inc.")
    );
    assert_eq!(
        message
            .message("preference")
            .and_then(|preference| preference.string("email")),
        Some("izumin@example.com")
    );
}

#[rstest]
fn example_user_renders_proto3_json(user_serializer: Serializer, example_user: SourceRef) {
    let message = user_serializer
        .to_message(&example_user)
        .expect("complete user converts");

    assert_eq!(
        message.to_json(),
        json!({
            "id": "42",
            "registered_at": "2016-04-01T09:30:00Z",
            "name": "Masayuki Izumi",
            "avatar_url": "https://example.com/izumin5210.png",
            "birthday": { "year": 2016, "month": 1, "day": 2 },
            "age": 3,
            "works": [{ "company": "Wantedly, Inc." }],
            "preference": { "email": "izumin@example.com" },
            "original_avatar_url": "https://example.com/izumin5210.png",
        })
    );
}

#[rstest]
fn missing_birthday_fails_required_age(user_serializer: Serializer) {
    let source = user(profile(None, vec![work("Wantedly, Inc.")])).into_ref();

    let error = user_serializer
        .to_message(&source)
        .expect_err("age cannot be computed");

    assert_eq!(violation_paths(&error), ["age"]);
    assert_eq!(
        error.to_string(),
        "validation failed: age: required but missing"
    );
}

#[rstest]
fn absent_profile_reports_every_violation(user_serializer: Serializer) {
    let source = InMemoryRecord::new()
        .with_attribute("id", 7_i64)
        .with_null("created_at")
        .with_absent("profile")
        .with_absent("preference")
        .into_ref();

    let error = user_serializer
        .to_message(&source)
        .expect_err("delegated fields are missing");

    assert_eq!(violation_paths(&error), ["registered_at", "name", "age"]);
}

#[rstest]
fn computed_fallback_fills_a_missing_delegated_value(user_serializer: Serializer) {
    let source = user(
        profile(Some(date(2016, 1, 2)), vec![work("Wantedly, Inc.")]).with_null("avatar_url"),
    )
    .into_ref();

    let message = user_serializer
        .to_message(&source)
        .expect("fallback keeps the user valid");

    assert_eq!(
        message.wrapper("avatar_url"),
        Some(&ScalarValue::from(DEFAULT_AVATAR_URL))
    );
    assert_eq!(message.wrapper("original_avatar_url"), None);
}

#[rstest]
fn computed_fallback_stays_absent_without_the_association(user_serializer: Serializer) {
    let source = InMemoryRecord::new().with_absent("profile").into_ref();
    let only_avatar = FieldMask::from_paths(["avatar_url"]).expect("valid mask");

    let message = user_serializer
        .to_message_masked(&source, &only_avatar)
        .expect("unselected required fields are skipped");

    assert_eq!(message.get("avatar_url"), Some(&OutputValue::Wrapper(None)));
}

#[rstest]
fn nested_conversions_reuse_the_parent_reads(clock: SharedClock) {
    let string = || FieldKind::Scalar(ScalarType::String);
    let works = || FieldKind::Repeated(type_name("fixture.Work"));
    let mut builder = Registry::builder();
    user_schemas(&mut builder);
    define_user(&mut builder);
    builder
        .register_schema(schema(
            "fixture.Member",
            &[
                ("name", string()),
                ("works", works()),
                ("profile", FieldKind::Message(type_name("fixture.Card"))),
            ],
        ))
        .expect("new schema")
        .register_schema(schema("fixture.Card", &[("name", string()), ("works", works())]))
        .expect("new schema")
        .delegate("fixture.Member", ["name", "works"], "profile")
        .expect("known fields")
        .define("fixture.Member", "profile", FieldOptions::new())
        .expect("known field")
        .define("fixture.Card", "name", FieldOptions::required())
        .expect("known field")
        .define("fixture.Card", "works", FieldOptions::new())
        .expect("known field");
    let registry = Arc::new(builder.build().expect("consistent registry"));
    let serializer = Serializer::new(registry, "fixture.Member")
        .expect("registered type")
        .with_clock(clock);
    let profile_record = profile(Some(date(2016, 1, 2)), vec![work("Wantedly, Inc.")]);
    let member = InMemoryRecord::new().with_one("profile", Arc::new(profile_record.clone()));

    let message = serializer
        .to_message(&member.clone().into_ref())
        .expect("member converts");

    assert_eq!(message.string("name"), Some("Masayuki Izumi"));
    assert_eq!(message.repeated("works").len(), 1);
    let card = message.message("profile").expect("profile is set");
    assert_eq!(card.string("name"), Some("Masayuki Izumi"));
    assert_eq!(card.repeated("works").len(), 1);
    assert_eq!(member.read_count("profile"), 1);
    assert_eq!(profile_record.read_count("name"), 1);
    assert_eq!(profile_record.read_count("works"), 1);
}

#[rstest]
fn nested_violations_are_prefixed(registry: Arc<Registry>) {
    let serializer = Serializer::new(registry, "fixture.Account").expect("registered type");
    let blank_avatar = InMemoryRecord::new()
        .with_attribute("name", "Izumi")
        .with_null("avatar_url");

    let error = serializer
        .to_message(&account(Some(blank_avatar)))
        .expect_err("nested avatar is required");
    assert_eq!(
        error.to_string(),
        "validation failed: profile.avatar_url: required but missing"
    );

    let absent = serializer
        .to_message(&account(None))
        .expect_err("profile is required");
    assert_eq!(violation_paths(&absent), ["profile"]);
}

#[rstest]
fn repeated_violations_use_index_paths(user_serializer: Serializer) {
    let blank_work = InMemoryRecord::new().with_null("company").into_ref();
    let source = user(profile(
        Some(date(2016, 1, 2)),
        vec![work("Wantedly, Inc."), blank_work, work("Anthropic")],
    ))
    .into_ref();

    let error = user_serializer
        .to_message(&source)
        .expect_err("second work has no company");

    assert_eq!(violation_paths(&error), ["works[1].company"]);
}

#[rstest]
fn repeated_fields_preserve_order(user_serializer: Serializer) {
    let companies = ["Wantedly, Inc.", "Anthropic", "Example"];
    let source = user(profile(
        Some(date(2016, 1, 2)),
        companies.into_iter().map(work).collect(),
    ))
    .into_ref();

    let message = user_serializer.to_message(&source).expect("user converts");
    let converted = message
        .repeated("works")
        .iter()
        .filter_map(|item| item.string("company"))
        .collect::<Vec<_>>();

    assert_eq!(converted, companies);
}

#[rstest]
fn conversion_is_idempotent(user_serializer: Serializer, example_user: SourceRef) {
    let first = user_serializer.to_message(&example_user).expect("converts");
    let second = user_serializer.to_message(&example_user).expect("converts");

    assert_eq!(first, second);
}

#[rstest]
fn batches_aggregate_violations_with_index_paths(user_serializer: Serializer) {
    let complete = user(profile(Some(date(2016, 1, 2)), Vec::new())).into_ref();
    let missing_age = user(profile(None, Vec::new())).into_ref();

    let messages = user_serializer
        .to_messages(&[Arc::clone(&complete), Arc::clone(&complete)])
        .expect("complete batch converts");
    assert_eq!(messages.len(), 2);

    let error = user_serializer
        .to_messages(&[complete, Arc::clone(&missing_age), missing_age])
        .expect_err("two users lack an age");
    assert_eq!(violation_paths(&error), ["[1].age", "[2].age"]);
}

#[rstest]
fn unreadable_attribute_is_fatal(user_serializer: Serializer) {
    let source = InMemoryRecord::new()
        .with_attribute("id", 7_i64)
        .with_absent("profile")
        .with_absent("preference")
        .into_ref();

    let error = user_serializer
        .to_message(&source)
        .expect_err("created_at is not an attribute");

    assert!(!error.is_validation());
    assert!(matches!(
        &error,
        ConversionError::Computation {
            path,
            source: ComputationError::Source(SourceError::UnknownAttribute(name)),
        } if path.to_string() == "registered_at" && name == "created_at"
    ));
}

#[rstest]
fn failed_association_load_is_fatal(user_serializer: Serializer) {
    let source = InMemoryRecord::new()
        .with_attribute("id", 7_i64)
        .with_attribute("created_at", Utc::now())
        .with_lazy("profile", || {
            Err(SourceError::load(
                "profile",
                std::io::Error::other("connection reset"),
            ))
        })
        .with_absent("preference")
        .into_ref();

    let error = user_serializer
        .to_message(&source)
        .expect_err("profile cannot be loaded");

    assert!(matches!(
        &error,
        ConversionError::Computation { path, .. } if path.to_string() == "name"
    ));
}

#[rstest]
fn out_of_range_values_are_fatal(user_serializer: Serializer) {
    let source = user(profile(Some(date(2016, 1, 2)), Vec::new()))
        .with_attribute("id", u64::MAX)
        .into_ref();

    let error = user_serializer
        .to_message(&source)
        .expect_err("id overflows int64");

    assert!(matches!(
        &error,
        ConversionError::Coercion {
            path,
            source: CoercionError::OutOfRange { target: "int64", .. },
        } if *path == FieldPath::root().field("id")
    ));
}

fn endless_node() -> SourceRef {
    InMemoryRecord::new()
        .with_attribute("name", "node")
        .with_lazy("next", || Ok(Association::One(endless_node())))
        .into_ref()
}

#[rstest]
fn cyclic_graphs_stop_at_the_depth_limit(clock: SharedClock) {
    let mut builder = Registry::builder();
    builder
        .register_schema(
            MessageSchema::builder("fixture.Node")
                .field("name", FieldKind::Scalar(ScalarType::String))
                .field("next", FieldKind::Message(type_name("fixture.Node")))
                .build()
                .expect("valid schema"),
        )
        .expect("new schema")
        .define("fixture.Node", "name", FieldOptions::new())
        .expect("known field")
        .define("fixture.Node", "next", FieldOptions::new())
        .expect("known field");
    let serializer = Serializer::new(Arc::new(builder.build().expect("registry")), "fixture.Node")
        .expect("registered type")
        .with_config(ConversionConfig::strict())
        .with_clock(clock);

    let error = serializer
        .to_message(&endless_node())
        .expect_err("graph never ends");

    let ConversionError::DepthExceeded { path, limit } = &error else {
        panic!("expected a depth error, got {error}");
    };
    assert_eq!(*limit, 8);
    assert_eq!(path.segments().len(), 9);
}

#[rstest]
fn serializer_requires_a_registered_type(registry: Arc<Registry>) {
    let result = Serializer::new(registry, "fixture.Company").map(|_| ());

    assert!(matches!(
        result,
        Err(DefinitionError::UnknownMessageType(name)) if name.as_str() == "fixture.Company"
    ));
}
