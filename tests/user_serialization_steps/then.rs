//! Then steps for user serialization BDD scenarios.

use super::world::{SerializationWorld, parse_date};
use chrono::Datelike;
use rstest_bdd_macros::then;

#[then("the message has age {age:i64}")]
fn the_message_has_age(world: &SerializationWorld, age: i64) -> Result<(), eyre::Report> {
    let actual = world.message()?.int("age");
    if actual != Some(age) {
        return Err(eyre::eyre!("expected age {age}, found {actual:?}"));
    }
    Ok(())
}

#[then(r#"the birthday is "{date}""#)]
fn the_birthday_is(world: &SerializationWorld, date: String) -> Result<(), eyre::Report> {
    let expected = parse_date(&date)?;
    let birthday = world
        .message()?
        .message("birthday")
        .ok_or_else(|| eyre::eyre!("birthday is not set"))?;
    let actual = (
        birthday.int("year"),
        birthday.int("month"),
        birthday.int("day"),
    );
    let wanted = (
        Some(i64::from(expected.year())),
        Some(i64::from(expected.month())),
        Some(i64::from(expected.day())),
    );
    if actual != wanted {
        return Err(eyre::eyre!("expected birthday {wanted:?}, found {actual:?}"));
    }
    Ok(())
}

#[then("the message lists {count:usize} works")]
fn the_message_lists_works(world: &SerializationWorld, count: usize) -> Result<(), eyre::Report> {
    let works = world.message()?.repeated("works");
    if works.len() != count {
        return Err(eyre::eyre!("expected {count} works, found {}", works.len()));
    }
    Ok(())
}

#[then(r#"serialization fails with a violation at "{path}""#)]
fn serialization_fails_with_violation(
    world: &SerializationWorld,
    path: String,
) -> Result<(), eyre::Report> {
    let result = world
        .result
        .as_ref()
        .ok_or_else(|| eyre::eyre!("the user was not serialized"))?;
    let violations = match result {
        Err(err) => err
            .as_validation()
            .map(|validation| validation.violations().paths())
            .ok_or_else(|| eyre::eyre!("expected a validation error, got {err}"))?,
        Ok(message) => {
            return Err(eyre::eyre!("expected a failure, got {message:?}"));
        }
    };
    if !violations.contains(&path) {
        return Err(eyre::eyre!("expected a violation at {path}, found {violations:?}"));
    }
    Ok(())
}
