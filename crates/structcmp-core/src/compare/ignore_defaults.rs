use crate::difference::Difference;
use crate::value::Value;

use super::{ComparatorChain, Strategy, Traversal};

/// Default-value skipping, enabled by `Mode::IgnoreDefaults`.
///
/// A default value (null, `false`, numeric zero, NUL) on the left
/// (expected) side matches anything on the right. Directional: a concrete
/// expected value against a default actual value falls through to the
/// other strategies and is reported as a difference.
pub(super) struct IgnoreDefaultsStrategy;

impl Strategy for IgnoreDefaultsStrategy {
    fn can_handle(&self, left: &Value, _right: &Value) -> bool {
        left.is_default()
    }

    fn get_difference(
        &self,
        _left: &Value,
        _right: &Value,
        _chain: &ComparatorChain,
        _traversal: &mut Traversal,
    ) -> Option<Difference> {
        None
    }
}
