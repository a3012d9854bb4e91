//! Tests for field masks.

use super::fixtures::{example_user, user_serializer};
use crate::serializer::{
    domain::{FieldMask, FieldMaskError, FieldPath},
    error::ConversionError,
    ports::SourceRef,
    services::Serializer,
};
use rstest::rstest;

fn mask(paths: &[&str]) -> FieldMask {
    FieldMask::from_paths(paths.iter().copied()).expect("valid mask")
}

#[rstest]
fn nested_paths_build_a_tree() {
    let selected = mask(&["name", "works.company", "works"]);

    assert!(!selected.is_all());
    assert!(selected.includes("works"));
    assert!(!selected.includes("age"));
    assert!(selected.child("works").includes("company"));
    assert!(selected.child("name").is_all());
}

#[rstest]
#[case(&["works", "works.company"])]
#[case(&["works.company", "works"])]
fn bare_parent_path_selects_the_whole_subtree(#[case] paths: &[&str]) {
    let selected = mask(paths);

    assert!(selected.includes("works"));
    assert!(selected.child("works").is_all());
    assert_eq!(selected, mask(&["works"]));
}

#[rstest]
#[case("")]
#[case("works.")]
#[case(".company")]
fn empty_segments_are_rejected(#[case] path: &str) {
    assert_eq!(
        FieldMask::from_paths([path]),
        Err(FieldMaskError(path.to_owned()))
    );
}

#[rstest]
fn unselected_fields_keep_defaults_and_skip_validation(
    user_serializer: Serializer,
    example_user: SourceRef,
) {
    let message = user_serializer
        .to_message_masked(&example_user, &mask(&["id", "works.company"]))
        .expect("masked conversion succeeds");

    assert_eq!(message.int("id"), Some(42));
    assert_eq!(message.string("name"), Some(""));
    assert_eq!(message.int("age"), Some(0));
    assert_eq!(message.repeated("works").len(), 1);
}

#[rstest]
fn unknown_mask_fields_are_rejected(user_serializer: Serializer, example_user: SourceRef) {
    let error = user_serializer
        .to_message_masked(&example_user, &mask(&["works.title"]))
        .expect_err("unknown nested field");

    assert!(matches!(
        error,
        ConversionError::UnknownMaskField { ref path }
            if *path == FieldPath::root().field("works").field("title")
    ));
}

#[rstest]
fn scalar_fields_cannot_be_descended(user_serializer: Serializer, example_user: SourceRef) {
    let error = user_serializer
        .to_message_masked(&example_user, &mask(&["name.first"]))
        .expect_err("scalars have no sub-fields");

    assert_eq!(
        error.to_string(),
        "field mask selects unknown field 'name.first'"
    );
}
