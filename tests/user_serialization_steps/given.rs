//! Given steps for user serialization BDD scenarios.

use super::world::{SerializationWorld, parse_date};
use crate::test_helpers::clock_on;
use chrono::Datelike;
use rstest_bdd_macros::given;

#[given(r#"the clock reads "{date}""#)]
fn the_clock_reads(world: &mut SerializationWorld, date: String) -> Result<(), eyre::Report> {
    let today = parse_date(&date)?;
    world.clock = Some(clock_on(today.year(), today.month(), today.day())?);
    Ok(())
}

#[given(r#"a user born on "{date}" working at "{company}""#)]
fn a_user_born_on(
    world: &mut SerializationWorld,
    date: String,
    company: String,
) -> Result<(), eyre::Report> {
    world.birthday = Some(parse_date(&date)?);
    world.companies.push(company);
    Ok(())
}

#[given(r#"a user without a birthday working at "{company}""#)]
fn a_user_without_birthday(world: &mut SerializationWorld, company: String) {
    world.birthday = None;
    world.companies.push(company);
}

#[given("age is required")]
fn age_is_required(world: &mut SerializationWorld) {
    world.age_required = true;
}

#[given("age is optional")]
fn age_is_optional(world: &mut SerializationWorld) {
    world.age_required = false;
}
