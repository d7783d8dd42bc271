//! Panicking assertion facade over the comparison engine.
//!
//! These helpers compare an expected value against an actual one and
//! panic with a rendered difference report on mismatch, for use inside
//! tests. Leniency follows the engine's modes: the lenient variants
//! accept reordered collections and treat defaulted fields on the
//! expected side as "don't care".
// Panicking is this crate's output channel.
#![allow(clippy::panic)]
#![deny(clippy::print_stdout, clippy::print_stderr)]

use serde::Serialize;
use structcmp_core::{Modes, Value, compare, format_difference, to_value};

/// Asserts that two value graphs are structurally equal under the given
/// modes. Panics with a per-leaf difference report otherwise.
///
/// The first argument is the expectation; with `IgnoreDefaults` enabled
/// this direction matters.
pub fn assert_value_eq(expected: &Value, actual: &Value, modes: Modes) {
    if let Some(difference) = compare(expected, actual, modes) {
        panic!(
            "structural comparison failed:\n{}",
            format_difference(&difference)
        );
    }
}

/// Asserts strict deep equality of two serializable values.
pub fn assert_deep_eq<E: Serialize, A: Serialize>(expected: &E, actual: &A) {
    assert_deep_eq_with(Modes::strict(), expected, actual);
}

/// Asserts deep equality of two serializable values under the given
/// modes.
pub fn assert_deep_eq_with<E: Serialize, A: Serialize>(modes: Modes, expected: &E, actual: &A) {
    let expected = lower(expected, "expected");
    let actual = lower(actual, "actual");
    assert_value_eq(&expected, &actual, modes);
}

/// Asserts deep equality with lenient order and ignored defaults, the
/// usual setting for partial expectations against real data.
pub fn assert_lenient_eq<E: Serialize, A: Serialize>(expected: &E, actual: &A) {
    assert_deep_eq_with(Modes::lenient(), expected, actual);
}

fn lower<T: Serialize>(value: &T, side: &str) -> Value {
    match to_value(value) {
        Ok(value) => value,
        Err(error) => panic!("cannot lower {side} value for comparison: {error}"),
    }
}
