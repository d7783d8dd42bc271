use crate::difference::Difference;
use crate::value::Value;

use super::{ComparatorChain, Strategy, Traversal};

/// Value comparison of numbers across representation widths.
///
/// `Int`, `UInt`, and `Float` values of equal magnitude are equal: the
/// signed/unsigned split is an encoding artifact of the value model, and
/// integer/float pairs compare after widening to `f64`. Float pairs
/// compare by bit pattern so the relation stays reflexive for `NaN`.
pub(super) struct NumberStrategy;

fn numbers_equal(left: &Value, right: &Value) -> bool {
    match (left, right) {
        (Value::Float(a), Value::Float(b)) => a.to_bits() == b.to_bits(),
        (Value::Float(a), Value::Int(b)) => *a == *b as f64,
        (Value::Float(a), Value::UInt(b)) => *a == *b as f64,
        (Value::Int(a), Value::Float(b)) => *a as f64 == *b,
        (Value::UInt(a), Value::Float(b)) => *a as f64 == *b,
        // Int/UInt combinations: exact cross-width equality from the
        // value model.
        _ => left == right,
    }
}

impl Strategy for NumberStrategy {
    fn can_handle(&self, left: &Value, right: &Value) -> bool {
        left.is_number() && right.is_number()
    }

    fn get_difference(
        &self,
        left: &Value,
        right: &Value,
        _chain: &ComparatorChain,
        traversal: &mut Traversal,
    ) -> Option<Difference> {
        if numbers_equal(left, right) {
            None
        } else {
            Some(Difference::leaf(
                "Different number values.",
                left,
                right,
                traversal.path(),
            ))
        }
    }
}
