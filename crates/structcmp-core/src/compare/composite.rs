use crate::difference::{Difference, DifferenceKind};
use crate::value::Value;

use super::{ComparatorChain, Strategy, Traversal};

/// Field-by-field composite comparison, the chain's fallback.
///
/// Composites of different type names are a terminal difference. Same
/// type names recurse into each field through the full chain, in the
/// left side's declaration order, stopping at the first mismatch; a field
/// missing on one side compares against null.
pub(super) struct CompositeStrategy;

impl Strategy for CompositeStrategy {
    fn can_handle(&self, left: &Value, right: &Value) -> bool {
        left.as_composite().is_some() && right.as_composite().is_some()
    }

    fn get_difference(
        &self,
        left: &Value,
        right: &Value,
        chain: &ComparatorChain,
        traversal: &mut Traversal,
    ) -> Option<Difference> {
        let (Some(left_composite), Some(right_composite)) =
            (left.as_composite(), right.as_composite())
        else {
            return None;
        };

        if left_composite.type_name != right_composite.type_name {
            return Some(Difference::leaf(
                format!(
                    "Different composite types. Left: {}, right: {}.",
                    left_composite.type_name, right_composite.type_name
                ),
                left,
                right,
                traversal.path(),
            ));
        }

        let wrap = |name: &str, child: Difference, traversal: &Traversal| {
            let mut parent = Difference::with_kind(
                "Different field values.",
                left,
                right,
                traversal.path(),
                DifferenceKind::Composite,
            );
            parent.add_child(name, child);
            parent
        };

        for (name, left_value) in &left_composite.fields {
            let right_value = right_composite.field(name).cloned().unwrap_or(Value::Null);
            traversal.push(name.clone());
            let child = chain.compare(left_value, &right_value, traversal);
            traversal.pop();
            if let Some(child) = child {
                return Some(wrap(name, child, traversal));
            }
        }

        // Fields only the right side has compare against null.
        for (name, right_value) in &right_composite.fields {
            if left_composite.field(name).is_some() {
                continue;
            }
            traversal.push(name.clone());
            let child = chain.compare(&Value::Null, right_value, traversal);
            traversal.pop();
            if let Some(child) = child {
                return Some(wrap(name, child, traversal));
            }
        }

        None
    }
}

#[cfg(test)]
mod tests {
    #![allow(clippy::expect_used)]

    use super::*;
    use crate::compare::{compare, compare_strict};
    use crate::modes::Modes;

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
    fn equal_composites_match() {
        assert!(compare_strict(&person(1, "John"), &person(1, "John")).is_none());
    }

    #[test]
    fn first_differing_field_is_reported() {
        let difference = compare_strict(&person(1, "John"), &person(1, "Jane")).expect("difference");
        assert_eq!(difference.children().len(), 1);
        let child = difference.children().get("name").expect("name child");
        assert_eq!(child.path(), ["name"]);
        assert_eq!(child.left(), &Value::from("John"));
        assert_eq!(child.right(), &Value::from("Jane"));
    }

    #[test]
    fn different_type_names_are_terminal() {
        let left = Value::composite("Person", vec![]);
        let right = Value::composite("Company", vec![]);
        let difference = compare_strict(&left, &right).expect("difference");
        assert_eq!(
            difference.message(),
            "Different composite types. Left: Person, right: Company."
        );
        assert!(difference.is_leaf());
    }

    #[test]
    fn missing_fields_compare_against_null() {
        let left = person(1, "John");
        let right = Value::composite("Person", vec![("id".to_owned(), Value::Int(1))]);
        let difference = compare_strict(&left, &right).expect("difference");
        let child = difference.children().get("name").expect("name child");
        assert_eq!(child.message(), "Right value null.");

        // And the mirror: a right-only field against a default left.
        let difference = compare_strict(&right, &left).expect("difference");
        let child = difference.children().get("name").expect("name child");
        assert_eq!(child.message(), "Left value null.");
    }

    #[test]
    fn ignore_defaults_skips_expected_null_fields() {
        let partial = Value::composite(
            "Person",
            vec![
                ("id".to_owned(), Value::Int(1)),
                ("name".to_owned(), Value::Null),
            ],
        );
        let full = person(1, "John");
        assert!(compare(&partial, &full, Modes::lenient()).is_none());
        // Directional: concrete expectation against a defaulted actual
        // still fails.
        assert!(compare(&full, &partial, Modes::lenient()).is_some());
    }

    #[test]
    fn nested_composites_extend_the_path() {
        let address = |street: &str| {
            Value::composite("Address", vec![("street".to_owned(), Value::from(street))])
        };
        let left = Value::composite("Person", vec![("address".to_owned(), address("Main"))]);
        let right = Value::composite("Person", vec![("address".to_owned(), address("High"))]);
        let difference = compare_strict(&left, &right).expect("difference");
        let outer = difference.children().get("address").expect("address child");
        let inner = outer.children().get("street").expect("street child");
        assert_eq!(inner.path(), ["address", "street"]);
        assert_eq!(inner.path_string(), "address.street");
    }
}
