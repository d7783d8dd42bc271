/// Best-match assignment between two unordered collections.
///
/// Computes the full pairwise difference matrix through the comparator
/// chain, then a maximum bipartite matching over the zero-difference
/// pairs. If a perfect zero-difference bijection exists it is always
/// found (augmenting-path search, not first-match greediness). When no
/// perfect bijection exists, the remaining left elements claim their
/// lowest-scoring unclaimed counterpart deterministically, so later
/// "which counterpart" queries get a stable answer.
///
/// Cost is O(n^2) comparator invocations for the matrix plus the matching
/// search; collections under structural test assertion are expected to be
/// small.
use crate::compare::{ComparatorChain, Traversal};
use crate::difference::{Difference, DifferenceKind};
use crate::value::Value;

/// The assignment computed for one unordered-collection node.
pub(crate) struct BestMatchOutcome {
    /// Right index assigned to each left index.
    pub assignment: Vec<usize>,
    /// Difference between each left element and its assigned counterpart;
    /// `None` for an exact match.
    pub differences: Vec<Option<Difference>>,
    perfect: bool,
}

impl BestMatchOutcome {
    /// `true` when every pair in the assignment matched exactly.
    pub fn is_perfect(&self) -> bool {
        self.perfect
    }
}

/// Severity score of a difference, used to rank non-exact candidates.
/// Lower is a better match.
pub(crate) fn matching_score(difference: &Difference) -> u32 {
    match difference.kind() {
        DifferenceKind::Simple => {
            if difference.left().kind() == difference.right().kind() {
                1
            } else {
                5
            }
        }
        DifferenceKind::Composite | DifferenceKind::OrderedCollection | DifferenceKind::Map => {
            difference.children().len().max(1) as u32
        }
        DifferenceKind::UnorderedCollection(detail) => detail
            .iter()
            .map(|(_, slot)| slot.difference.as_ref().map_or(0, matching_score))
            .sum(),
    }
}

/// Computes the best-match assignment for two equal-length element slices.
/// The caller handles the size-mismatch fast path.
pub(crate) fn find_best_matches(
    left: &[Value],
    right: &[Value],
    chain: &ComparatorChain,
    traversal: &mut Traversal,
) -> BestMatchOutcome {
    debug_assert_eq!(left.len(), right.len());
    let len = left.len();

    // Full difference matrix; the left index is on the path while its row
    // is computed, so element differences carry a meaningful path.
    let mut matrix: Vec<Vec<Option<Difference>>> = Vec::with_capacity(len);
    for (index, left_element) in left.iter().enumerate() {
        traversal.push(index.to_string());
        let row = right
            .iter()
            .map(|right_element| chain.compare(left_element, right_element, traversal))
            .collect();
        traversal.pop();
        matrix.push(row);
    }

    // Maximum bipartite matching over zero-difference pairs.
    let mut right_of_left: Vec<Option<usize>> = vec![None; len];
    let mut left_of_right: Vec<Option<usize>> = vec![None; len];
    for left_index in 0..len {
        let mut visited = vec![false; len];
        augment(
            left_index,
            &matrix,
            &mut right_of_left,
            &mut left_of_right,
            &mut visited,
        );
    }

    let matched = right_of_left.iter().filter(|slot| slot.is_some()).count();
    let perfect = matched == len;

    if !perfect {
        // Deterministic fill: each unmatched left element claims the
        // unclaimed right element with the lowest score, ties to the
        // lowest index.
        let mut claimed = vec![false; len];
        for slot in right_of_left.iter().flatten() {
            claimed[*slot] = true;
        }
        for left_index in 0..len {
            if right_of_left[left_index].is_some() {
                continue;
            }
            let mut best: Option<(u32, usize)> = None;
            for (right_index, claimed_slot) in claimed.iter().enumerate() {
                if *claimed_slot {
                    continue;
                }
                let score = matrix[left_index][right_index]
                    .as_ref()
                    .map_or(0, matching_score);
                let candidate = (score, right_index);
                if best.is_none_or(|current| candidate < current) {
                    best = Some(candidate);
                }
            }
            if let Some((_, right_index)) = best {
                right_of_left[left_index] = Some(right_index);
                claimed[right_index] = true;
            }
        }
    }

    let mut assignment = Vec::with_capacity(len);
    let mut differences = Vec::with_capacity(len);
    for (left_index, slot) in right_of_left.iter().enumerate() {
        // Sizes are equal, so the fill pass leaves no slot empty; the
        // fallback keeps the index total regardless.
        let right_index = slot.unwrap_or(left_index);
        assignment.push(right_index);
        differences.push(matrix[left_index][right_index].take());
    }

    BestMatchOutcome {
        assignment,
        differences,
        perfect,
    }
}

/// Augmenting-path step of the matching: tries to give `left_index` a
/// zero-difference partner, re-homing earlier assignments if needed.
fn augment(
    left_index: usize,
    matrix: &[Vec<Option<Difference>>],
    right_of_left: &mut Vec<Option<usize>>,
    left_of_right: &mut Vec<Option<usize>>,
    visited: &mut Vec<bool>,
) -> bool {
    for right_index in 0..matrix.len() {
        if visited[right_index] || matrix[left_index][right_index].is_some() {
            continue;
        }
        visited[right_index] = true;
        let displaced = left_of_right[right_index];
        let free = match displaced {
            None => true,
            Some(owner) => augment(owner, matrix, right_of_left, left_of_right, visited),
        };
        if free {
            right_of_left[left_index] = Some(right_index);
            left_of_right[right_index] = Some(left_index);
            return true;
        }
    }
    false
}
