/// The difference tree produced by a comparison.
///
/// A [`Difference`] node exists if and only if a mismatch (or partial
/// mismatch) was found; "no difference" is represented by `None` at the
/// call site, never by an empty node. Nodes are immutable once built:
/// strategies attach children while constructing the tree, consumers only
/// read it.
use std::collections::BTreeMap;
use std::fmt;

use crate::value::Value;

/// The concrete kind of a difference node, driving dispatch in the inner
/// difference finder.
#[derive(Debug)]
pub enum DifferenceKind {
    /// Terminal mismatch between two values.
    Simple,
    /// Field-level mismatch inside a composite; children are keyed by
    /// field name.
    Composite,
    /// Element mismatch in an ordered sequence; children are keyed by the
    /// index's string form.
    OrderedCollection,
    /// No zero-difference bijection between two unordered collections;
    /// carries the best-match assignment.
    UnorderedCollection(UnorderedDetail),
    /// Key or value mismatch in a map; children are keyed by the key's
    /// display form.
    Map,
}

/// Best-match assignment attached to an unordered-collection difference.
///
/// One slot per left element index, computed once when the difference is
/// built and stable across repeated lookups.
#[derive(Debug, Default)]
pub struct UnorderedDetail {
    slots: BTreeMap<usize, BestMatchSlot>,
}

/// The chosen counterpart of one left element in an unordered comparison.
#[derive(Debug)]
pub struct BestMatchSlot {
    /// Index of the matched element in the right collection.
    pub right_index: usize,
    /// Difference between the pair, `None` when the pair matched exactly.
    pub difference: Option<Difference>,
}

impl UnorderedDetail {
    pub(crate) fn new() -> Self {
        Self::default()
    }

    pub(crate) fn insert(&mut self, left_index: usize, slot: BestMatchSlot) {
        self.slots.insert(left_index, slot);
    }

    /// Returns the best-match slot for a left element index.
    pub fn best_match(&self, left_index: usize) -> Option<&BestMatchSlot> {
        self.slots.get(&left_index)
    }

    /// Iterates over all slots in left-index order.
    pub fn iter(&self) -> impl Iterator<Item = (usize, &BestMatchSlot)> {
        self.slots.iter().map(|(index, slot)| (*index, slot))
    }
}

/// A node in the difference tree: the two compared values, a message, the
/// path from the comparison root, and child differences for composite
/// nodes.
#[derive(Debug)]
pub struct Difference {
    message: String,
    left: Value,
    right: Value,
    path: Vec<String>,
    children: BTreeMap<String, Difference>,
    kind: DifferenceKind,
}

impl Difference {
    /// Creates a terminal difference. The path stack is captured as a
    /// snapshot, since it is mutated during recursion.
    pub(crate) fn leaf(
        message: impl Into<String>,
        left: &Value,
        right: &Value,
        path: &[String],
    ) -> Self {
        Self::with_kind(message, left, right, path, DifferenceKind::Simple)
    }

    /// Creates a difference node of the given kind without children.
    pub(crate) fn with_kind(
        message: impl Into<String>,
        left: &Value,
        right: &Value,
        path: &[String],
        kind: DifferenceKind,
    ) -> Self {
        Self {
            message: message.into(),
            left: left.clone(),
            right: right.clone(),
            path: path.to_vec(),
            children: BTreeMap::new(),
            kind,
        }
    }

    /// Attaches a child difference under the given identifier (field name,
    /// index string, or key display form). Keys are unique per node.
    pub(crate) fn add_child(&mut self, name: impl Into<String>, child: Difference) {
        self.children.insert(name.into(), child);
    }

    /// Human-readable description of the mismatch at this node.
    pub fn message(&self) -> &str {
        &self.message
    }

    /// The left (expected) value at this node.
    pub fn left(&self) -> &Value {
        &self.left
    }

    /// The right (actual) value at this node.
    pub fn right(&self) -> &Value {
        &self.right
    }

    /// Path segments from the comparison root to this node; empty at the
    /// top level.
    pub fn path(&self) -> &[String] {
        &self.path
    }

    /// Dotted form of the path, e.g. `address.street` or `items.1.id`;
    /// the empty string at the top level.
    pub fn path_string(&self) -> String {
        self.path.join(".")
    }

    /// Child differences keyed by child identifier.
    pub fn children(&self) -> &BTreeMap<String, Difference> {
        &self.children
    }

    /// The concrete kind of this node.
    pub fn kind(&self) -> &DifferenceKind {
        &self.kind
    }

    /// Returns `true` when this node carries no children (a terminal
    /// mismatch).
    pub fn is_leaf(&self) -> bool {
        self.children.is_empty()
    }
}

impl fmt::Display for Difference {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let path = self.path_string();
        if path.is_empty() {
            write!(f, "{}: expected {}, actual {}", self.message, self.left, self.right)
        } else {
            write!(
                f,
                "{} at {path}: expected {}, actual {}",
                self.message, self.left, self.right
            )
        }
    }
}
