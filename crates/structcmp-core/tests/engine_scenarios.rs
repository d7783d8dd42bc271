//! End-to-end comparison scenarios across the public API: building value
//! graphs (directly and through serde lowering), comparing under each
//! leniency mode, and drilling into the resulting difference trees.
#![allow(clippy::expect_used)]

use serde::Serialize;
use structcmp_core::{
    Mode, Modes, Value, compare, compare_strict, format_difference, inner_difference, to_value,
};

fn person(id: i64, name: &str) -> Value {
    Value::composite(
        "Person",
        vec![
            ("id".to_owned(), Value::Int(id)),
            ("name".to_owned(), Value::from(name)),
        ],
    )
}

#[test]
fn equal_composites_have_no_difference() {
    assert!(compare_strict(&person(1, "John"), &person(1, "John")).is_none());
}

#[test]
fn field_mismatch_reports_the_field_path() {
    let difference = compare_strict(&person(1, "John"), &person(1, "Jane")).expect("difference");
    let name = inner_difference(&difference, "name").expect("name child");
    assert_eq!(name.path(), ["name"]);
    assert_eq!(name.left(), &Value::from("John"));
    assert_eq!(name.right(), &Value::from("Jane"));
    assert!(inner_difference(&difference, "id").is_none());
}

#[test]
fn lenient_order_ignores_element_order_in_composites() {
    let left = Value::sequence(vec![person(1, "John"), person(2, "Jane")]);
    let right = Value::sequence(vec![person(2, "Jane"), person(1, "John")]);

    assert!(compare_strict(&left, &right).is_some());
    assert!(compare(&left, &right, Modes::strict().with(Mode::LenientOrder)).is_none());
}

#[test]
fn size_mismatch_is_reported_without_element_detail() {
    let left = Value::sequence(vec![Value::Int(1), Value::Int(2), Value::Int(3)]);
    let right = Value::sequence(vec![Value::Int(1), Value::Int(2)]);
    for modes in [Modes::strict(), Modes::strict().with(Mode::LenientOrder)] {
        let difference = compare(&left, &right, modes).expect("difference");
        assert_eq!(
            difference.message(),
            "Different collection sizes. Left size: 3, right size: 2."
        );
        assert!(difference.is_leaf());
    }
}

#[test]
fn lenient_dates_compare_presence_only() {
    let left = Value::date(0);
    let right = Value::date(999_999);
    let modes = Modes::strict().with(Mode::LenientDates);

    assert!(compare_strict(&left, &right).is_some());
    assert!(compare(&left, &right, modes).is_none());

    let difference = compare(&left, &Value::Null, modes).expect("difference");
    assert_eq!(
        difference.message(),
        "Lenient dates, but only one side has a value."
    );
}

#[test]
fn ignore_defaults_is_directional() {
    let partial = Value::composite(
        "Person",
        vec![
            ("id".to_owned(), Value::Int(1)),
            ("name".to_owned(), Value::Null),
        ],
    );
    let full = person(1, "John");
    let modes = Modes::strict().with(Mode::IgnoreDefaults);

    assert!(compare(&partial, &full, modes).is_none());
    assert!(compare(&full, &partial, modes).is_some());
}

#[test]
fn best_match_lookups_are_deterministic_after_a_failed_match() {
    let left = Value::sequence(vec![person(1, "John"), person(2, "Jane")]);
    let right = Value::sequence(vec![person(2, "Jane"), person(1, "Joan")]);
    let modes = Modes::strict().with(Mode::LenientOrder);

    let difference = compare(&left, &right, modes).expect("difference");
    // John's best match is Joan; Jane matched exactly.
    let johns = inner_difference(&difference, "0").expect("slot 0");
    let name = inner_difference(johns, "name").expect("name child");
    assert_eq!(name.right(), &Value::from("Joan"));
    assert!(inner_difference(&difference, "1").is_none());

    // The assignment is part of the difference, so repeated drilling
    // returns the same answer.
    let again = inner_difference(&difference, "0").expect("slot 0");
    assert_eq!(again.path(), johns.path());
}

#[test]
fn cyclic_graphs_are_compared_safely() {
    let left = person(1, "John");
    left.set_field("partner", left.clone());
    let right = person(1, "John");
    right.set_field("partner", right.clone());
    assert!(compare_strict(&left, &right).is_none());

    let renamed = person(1, "Jane");
    renamed.set_field("partner", renamed.clone());
    let difference = compare_strict(&left, &renamed).expect("difference");
    assert!(inner_difference(&difference, "name").is_some());
}

#[test]
fn lowered_structs_compare_like_hand_built_values() {
    #[derive(Serialize)]
    struct Person {
        id: i64,
        name: String,
    }

    let left = to_value(&Person {
        id: 1,
        name: "John".to_owned(),
    })
    .expect("lowering");
    let right = to_value(&Person {
        id: 1,
        name: "Jane".to_owned(),
    })
    .expect("lowering");

    let difference = compare_strict(&left, &right).expect("difference");
    let report = format_difference(&difference);
    assert!(report.contains("name: expected \"John\", actual \"Jane\""));
}

#[test]
fn maps_compare_by_key_in_any_entry_order() {
    let left = Value::map(vec![
        (Value::from("a"), Value::Int(1)),
        (Value::from("b"), Value::Int(2)),
    ]);
    let right = Value::map(vec![
        (Value::from("b"), Value::Int(2)),
        (Value::from("a"), Value::Int(1)),
    ]);
    assert!(compare_strict(&left, &right).is_none());

    let changed = Value::map(vec![
        (Value::from("a"), Value::Int(1)),
        (Value::from("b"), Value::Int(9)),
    ]);
    let difference = compare_strict(&left, &changed).expect("difference");
    let under_b = inner_difference(&difference, "b").expect("b child");
    assert_eq!(under_b.right(), &Value::Int(9));
}

#[test]
fn lowered_json_documents_compare_structurally() {
    let left = to_value(&serde_json::json!({
        "id": 1,
        "tags": ["a", "b"],
    }))
    .expect("lowering");
    let right = to_value(&serde_json::json!({
        "tags": ["a", "b"],
        "id": 1,
    }))
    .expect("lowering");
    assert!(compare_strict(&left, &right).is_none());

    let changed = to_value(&serde_json::json!({
        "id": 1,
        "tags": ["a", "c"],
    }))
    .expect("lowering");
    let difference = compare_strict(&left, &changed).expect("difference");
    let tags = inner_difference(&difference, "tags").expect("tags child");
    let element = inner_difference(tags, "1").expect("index 1");
    assert_eq!(element.right(), &Value::from("c"));
}

#[test]
fn numbers_compare_across_representations() {
    assert!(compare_strict(&Value::Int(3), &Value::Float(3.0)).is_none());
    assert!(compare_strict(&Value::UInt(3), &Value::Int(3)).is_none());
    let difference = compare_strict(&Value::Int(3), &Value::Float(3.5)).expect("difference");
    assert_eq!(difference.message(), "Different number values.");
}
