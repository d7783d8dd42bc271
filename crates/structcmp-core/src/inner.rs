//! Drilling into a difference tree one segment at a time.

use crate::difference::{Difference, DifferenceKind};

/// Returns the child difference under `segment`, interpreted by the
/// node's kind: a field name for composites, a key's display form for
/// maps, a decimal index for collections. For an unordered collection the
/// index selects the left element's best-match slot, and `None` means
/// that element matched its counterpart exactly.
///
/// Any segment the node cannot interpret yields `None`; a terminal node
/// has no inner differences at all.
pub fn inner_difference<'a>(
    difference: &'a Difference,
    segment: &str,
) -> Option<&'a Difference> {
    match difference.kind() {
        DifferenceKind::Simple => None,
        DifferenceKind::Composite | DifferenceKind::Map => difference.children().get(segment),
        DifferenceKind::OrderedCollection => {
            let index: usize = segment.parse().ok()?;
            difference.children().get(&index.to_string())
        }
        DifferenceKind::UnorderedCollection(detail) => {
            let index: usize = segment.parse().ok()?;
            detail.best_match(index)?.difference.as_ref()
        }
    }
}
