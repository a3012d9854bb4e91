//! When steps for user serialization BDD scenarios.

use super::world::SerializationWorld;
use crate::test_helpers::{user_record, user_serializer, work};
use rstest_bdd_macros::when;

#[when("the user is serialized")]
fn the_user_is_serialized(world: &mut SerializationWorld) -> Result<(), eyre::Report> {
    let clock = world
        .clock
        .clone()
        .ok_or_else(|| eyre::eyre!("no clock in scenario world"))?;
    let serializer = user_serializer(world.age_required, clock)?;
    let works = world
        .companies
        .iter()
        .map(|company| work(company))
        .collect();
    let source = user_record(world.birthday, works).into_ref();

    world.result = Some(serializer.to_message(&source));
    Ok(())
}
