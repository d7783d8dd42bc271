use crate::difference::{Difference, DifferenceKind};
use crate::value::Value;

use super::{ComparatorChain, Strategy, Traversal};

/// Index-aligned sequence comparison (the strict-order default).
///
/// A length mismatch is itself the difference, with both sizes in the
/// message. Otherwise elements compare pairwise at the same index through
/// the full chain, stopping at the first mismatch; the index's string form
/// becomes the path segment.
pub(super) struct OrderedCollectionStrategy;

impl Strategy for OrderedCollectionStrategy {
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
        let (Some(left_elements), Some(right_elements)) = (left.as_sequence(), right.as_sequence())
        else {
            return None;
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

        for (index, (left_element, right_element)) in
            left_elements.iter().zip(right_elements.iter()).enumerate()
        {
            traversal.push(index.to_string());
            let child = chain.compare(left_element, right_element, traversal);
            traversal.pop();
            if let Some(child) = child {
                let mut parent = Difference::with_kind(
                    "Different collection elements.",
                    left,
                    right,
                    traversal.path(),
                    DifferenceKind::OrderedCollection,
                );
                parent.add_child(index.to_string(), child);
                return Some(parent);
            }
        }
        None
    }
}
