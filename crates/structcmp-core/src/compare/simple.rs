use crate::difference::Difference;
use crate::value::Value;

use super::{ComparatorChain, Strategy, Traversal};

/// Scalar and null comparison.
///
/// Handles any pair where at least one side is a scalar (including null),
/// which also covers scalar-against-container mismatches. Number pairs are
/// claimed by the number strategy earlier in the chain, so same-kind pairs
/// reaching this point compare by plain value equality.
pub(super) struct SimpleCasesStrategy;

impl Strategy for SimpleCasesStrategy {
    fn can_handle(&self, left: &Value, right: &Value) -> bool {
        !left.is_container() || !right.is_container()
    }

    fn get_difference(
        &self,
        left: &Value,
        right: &Value,
        _chain: &ComparatorChain,
        traversal: &mut Traversal,
    ) -> Option<Difference> {
        if left.is_null() {
            return Some(Difference::leaf(
                "Left value null.",
                left,
                right,
                traversal.path(),
            ));
        }
        if right.is_null() {
            return Some(Difference::leaf(
                "Right value null.",
                left,
                right,
                traversal.path(),
            ));
        }
        if left.kind() != right.kind() {
            return Some(Difference::leaf(
                format!(
                    "Different value kinds. Left: {}, right: {}.",
                    left.kind().name(),
                    right.kind().name()
                ),
                left,
                right,
                traversal.path(),
            ));
        }
        if left == right {
            None
        } else {
            Some(Difference::leaf(
                "Different values.",
                left,
                right,
                traversal.path(),
            ))
        }
    }
}

#[cfg(test)]
mod tests {
    #![allow(clippy::expect_used)]

    use super::*;
    use crate::modes::Modes;

    fn diff(left: &Value, right: &Value) -> Option<Difference> {
        let chain = ComparatorChain::for_modes(Modes::strict());
        let mut traversal = Traversal::new();
        SimpleCasesStrategy.get_difference(left, right, &chain, &mut traversal)
    }

    #[test]
    fn handles_any_pair_with_a_scalar_side() {
        let strategy = SimpleCasesStrategy;
        assert!(strategy.can_handle(&Value::from("a"), &Value::from("b")));
        assert!(strategy.can_handle(&Value::from("a"), &Value::sequence(vec![])));
        assert!(strategy.can_handle(&Value::Null, &Value::map(vec![])));
        assert!(!strategy.can_handle(&Value::sequence(vec![]), &Value::map(vec![])));
    }

    #[test]
    fn null_sides_are_reported_distinctly() {
        let left_null = diff(&Value::Null, &Value::Int(1)).expect("difference");
        assert_eq!(left_null.message(), "Left value null.");
        let right_null = diff(&Value::Int(1), &Value::Null).expect("difference");
        assert_eq!(right_null.message(), "Right value null.");
    }

    #[test]
    fn equal_scalars_match() {
        assert!(diff(&Value::from("John"), &Value::from("John")).is_none());
        assert!(diff(&Value::Bool(true), &Value::Bool(true)).is_none());
        assert!(diff(&Value::date(7), &Value::date(7)).is_none());
    }

    #[test]
    fn strict_dates_compare_by_value() {
        let difference = diff(&Value::date(0), &Value::date(1)).expect("difference");
        assert_eq!(difference.message(), "Different values.");
    }

    #[test]
    fn kind_mismatch_names_both_kinds() {
        let difference = diff(&Value::from("5"), &Value::Int(5)).expect("difference");
        assert_eq!(
            difference.message(),
            "Different value kinds. Left: string, right: number."
        );
    }
}
