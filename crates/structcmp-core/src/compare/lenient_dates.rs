use crate::difference::Difference;
use crate::value::Value;

use super::{ComparatorChain, Strategy, Traversal};

/// Presence-only date comparison, enabled by `Mode::LenientDates`.
///
/// Handles any pair where both sides are date-typed or null. The actual
/// instant is never compared: two present dates are equal, two nulls are
/// equal, and only a present/absent split is a difference. System-clock
/// dependent fixtures should not need exact timestamps.
pub(super) struct LenientDatesStrategy;

impl Strategy for LenientDatesStrategy {
    fn can_handle(&self, left: &Value, right: &Value) -> bool {
        let date_or_null = |value: &Value| value.is_null() || value.as_date().is_some();
        date_or_null(left) && date_or_null(right)
    }

    fn get_difference(
        &self,
        left: &Value,
        right: &Value,
        _chain: &ComparatorChain,
        traversal: &mut Traversal,
    ) -> Option<Difference> {
        if left.is_null() != right.is_null() {
            return Some(Difference::leaf(
                "Lenient dates, but only one side has a value.",
                left,
                right,
                traversal.path(),
            ));
        }
        None
    }
}
