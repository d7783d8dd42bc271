use crate::difference::{Difference, DifferenceKind};
use crate::value::Value;

use super::{ComparatorChain, Strategy, Traversal};

/// Key-by-key map comparison.
///
/// Keys present only on the left and only on the right are reported as
/// distinct differences; keys present on both recurse into value
/// comparison with the key's display form as the path segment. Stops at
/// the first mismatch.
pub(super) struct MapStrategy;

/// Path segment for a map key: bare text for string keys, display form
/// otherwise.
fn key_segment(key: &Value) -> String {
    if let Value::String(s) = key {
        s.clone()
    } else {
        key.to_string()
    }
}

impl Strategy for MapStrategy {
    fn can_handle(&self, left: &Value, right: &Value) -> bool {
        left.as_map().is_some() && right.as_map().is_some()
    }

    fn get_difference(
        &self,
        left: &Value,
        right: &Value,
        chain: &ComparatorChain,
        traversal: &mut Traversal,
    ) -> Option<Difference> {
        let (Some(left_entries), Some(right_entries)) = (left.as_map(), right.as_map()) else {
            return None;
        };

        let wrap = |segment: String, child: Difference, traversal: &Traversal| {
            let mut parent = Difference::with_kind(
                "Different map entries.",
                left,
                right,
                traversal.path(),
                DifferenceKind::Map,
            );
            parent.add_child(segment, child);
            parent
        };

        for (key, left_value) in left_entries.iter() {
            let segment = key_segment(key);
            let counterpart = right_entries
                .iter()
                .find(|(right_key, _)| right_key == key)
                .map(|(_, value)| value);
            traversal.push(segment.clone());
            let child = match counterpart {
                Some(right_value) => chain.compare(left_value, right_value, traversal),
                None => Some(Difference::leaf(
                    "Key not found in right map.",
                    left_value,
                    &Value::Null,
                    traversal.path(),
                )),
            };
            traversal.pop();
            if let Some(child) = child {
                return Some(wrap(segment, child, traversal));
            }
        }

        for (key, right_value) in right_entries.iter() {
            if left_entries.iter().any(|(left_key, _)| left_key == key) {
                continue;
            }
            let segment = key_segment(key);
            traversal.push(segment.clone());
            let child = Difference::leaf(
                "Key not found in left map.",
                &Value::Null,
                right_value,
                traversal.path(),
            );
            traversal.pop();
            return Some(wrap(segment, child, traversal));
        }

        None
    }
}
