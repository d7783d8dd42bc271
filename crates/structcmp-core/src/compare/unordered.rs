use crate::best_match::find_best_matches;
use crate::difference::{BestMatchSlot, Difference, DifferenceKind, UnorderedDetail};
use crate::value::Value;

use super::{ComparatorChain, Strategy, Traversal};

/// Order-insensitive sequence comparison, enabled by `Mode::LenientOrder`.
///
/// Replaces the ordered strategy in the chain. A size mismatch fails fast
/// before any element pair is compared; otherwise the best-match finder
/// decides whether some one-to-one assignment of elements matches
/// exactly. On failure the resulting difference carries the computed
/// assignment so counterpart lookups stay meaningful.
pub(super) struct UnorderedCollectionStrategy;

impl Strategy for UnorderedCollectionStrategy {
    fn can_handle(&self, left: &Value, right: &Value) -> bool {
        left.as_sequence().is_some() && right.as_sequence().is_some()
    }

    fn get_difference(
        &self,
        left: &Value,
        right: &Value,
        chain: &ComparatorChain,
        traversal: &mut Traversal,
    ) -> Option<Difference> {
        let (left_elements, right_elements) = {
            let (Some(left_ref), Some(right_ref)) = (left.as_sequence(), right.as_sequence())
            else {
                return None;
            };
            (left_ref.clone(), right_ref.clone())
        };

        if left_elements.len() != right_elements.len() {
            return Some(Difference::leaf(
                format!(
                    "Different collection sizes. Left size: {}, right size: {}.",
                    left_elements.len(),
                    right_elements.len()
                ),
                left,
                right,
                traversal.path(),
            ));
        }
        if left_elements.is_empty() {
            return None;
        }

        let outcome = find_best_matches(&left_elements, &right_elements, chain, traversal);
        if outcome.is_perfect() {
            return None;
        }

        let mut detail = UnorderedDetail::new();
        for (left_index, (right_index, difference)) in outcome
            .assignment
            .into_iter()
            .zip(outcome.differences)
            .enumerate()
        {
            detail.insert(
                left_index,
                BestMatchSlot {
                    right_index,
                    difference,
                },
            );
        }

        Some(Difference::with_kind(
            "Different elements in unordered collections.",
            left,
            right,
            traversal.path(),
            DifferenceKind::UnorderedCollection(detail),
        ))
    }
}

#[cfg(test)]
mod tests {
    #![allow(clippy::expect_used)]

    use super::*;
    use crate::compare::compare;
    use crate::modes::{Mode, Modes};

    fn lenient_order() -> Modes {
        Modes::strict().with(Mode::LenientOrder)
    }

    fn sequence_of(values: &[i64]) -> Value {
        Value::sequence(values.iter().map(|&n| Value::Int(n)).collect())
    }

    #[test]
    fn shuffled_sequences_match() {
        let left = sequence_of(&[1, 2, 3]);
        let right = sequence_of(&[3, 2, 1]);
        assert!(compare(&left, &right, lenient_order()).is_none());
    }

    #[test]
    fn size_mismatch_fails_fast() {
        let difference = compare(&sequence_of(&[1, 2]), &sequence_of(&[1, 2, 3]), lenient_order())
            .expect("difference");
        assert_eq!(
            difference.message(),
            "Different collection sizes. Left size: 2, right size: 3."
        );
        assert!(difference.is_leaf());
    }

    #[test]
    fn failed_match_carries_the_assignment() {
        let left = sequence_of(&[1, 2]);
        let right = sequence_of(&[2, 9]);
        let difference = compare(&left, &right, lenient_order()).expect("difference");
        let DifferenceKind::UnorderedCollection(detail) = difference.kind() else {
            unreachable!("unordered difference expected");
        };
        // left[1]=2 matched right[0]=2 exactly; left[0]=1 got the leftover.
        let matched = detail.best_match(1).expect("slot for index 1");
        assert_eq!(matched.right_index, 0);
        assert!(matched.difference.is_none());
        let unmatched = detail.best_match(0).expect("slot for index 0");
        assert_eq!(unmatched.right_index, 1);
        assert!(unmatched.difference.is_some());
    }

    #[test]
    fn duplicate_elements_need_matching_multiplicity() {
        let left = sequence_of(&[1, 1, 2]);
        let right = sequence_of(&[1, 2, 2]);
        assert!(compare(&left, &right, lenient_order()).is_some());
    }

    #[test]
    fn composites_match_out_of_order() {
        let person = |id: i64| {
            Value::composite("Person", vec![("id".to_owned(), Value::Int(id))])
        };
        let left = Value::sequence(vec![person(1), person(2)]);
        let right = Value::sequence(vec![person(2), person(1)]);
        assert!(compare(&left, &right, lenient_order()).is_none());
    }
}
