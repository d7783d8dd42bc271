/// The comparator strategy chain.
///
/// A comparison is a single recursive-descent pass: every pair of values is
/// funnelled through [`ComparatorChain::compare`], which applies the first
/// strategy whose `can_handle` accepts the pair. Strategies recurse into
/// nested values through the chain again, so the full chain is consulted at
/// every level.
///
/// # Chain policy
///
/// - Same instance (shared container cell, or both null) is equal without
///   consulting any strategy.
/// - A container pair already being compared on the current recursion path
///   (a cycle) is treated as equal and not descended into again.
/// - More specific strategies (dates, defaults, numbers, scalars) precede
///   the collection, map, and composite strategies; the factory fixes this
///   order per mode set.
/// - If no strategy accepts a pair, the chain degrades to identity
///   equality. The engine never errors for data-shape reasons.
/// - Only the first difference at each composite level is reported.
use std::collections::HashSet;

use crate::difference::Difference;
use crate::modes::{Mode, Modes};
use crate::value::Value;

mod composite;
mod ignore_defaults;
mod lenient_dates;
mod maps;
mod numbers;
mod ordered;
mod simple;
mod unordered;

use composite::CompositeStrategy;
use ignore_defaults::IgnoreDefaultsStrategy;
use lenient_dates::LenientDatesStrategy;
use maps::MapStrategy;
use numbers::NumberStrategy;
use ordered::OrderedCollectionStrategy;
use simple::SimpleCasesStrategy;
use unordered::UnorderedCollectionStrategy;

/// One pluggable comparison strategy in the chain.
pub(crate) trait Strategy {
    /// Pure predicate on the two values' runtime shapes.
    fn can_handle(&self, left: &Value, right: &Value) -> bool;

    /// Compares the pair, recursing through `chain` for nested values.
    /// Returns `None` for "equal".
    fn get_difference(
        &self,
        left: &Value,
        right: &Value,
        chain: &ComparatorChain,
        traversal: &mut Traversal,
    ) -> Option<Difference>;
}

/// Identity pairs of container cells currently being compared on the
/// recursion path. Scalars are never registered. One guard per top-level
/// comparison call, passed down by reference through every level.
#[derive(Default)]
pub(crate) struct TraversalGuard {
    pairs: HashSet<(usize, usize)>,
}

impl TraversalGuard {
    fn contains(&self, pair: (usize, usize)) -> bool {
        self.pairs.contains(&pair)
    }

    fn register(&mut self, pair: (usize, usize)) {
        self.pairs.insert(pair);
    }

    /// Removed when the pair's comparison returns, so a speculative
    /// best-match probe cannot mask a later genuine comparison of the same
    /// pair.
    fn unregister(&mut self, pair: (usize, usize)) {
        self.pairs.remove(&pair);
    }
}

/// Mutable per-call traversal state: the live path stack and the cycle
/// guard.
pub(crate) struct Traversal {
    path: Vec<String>,
    guard: TraversalGuard,
}

impl Traversal {
    pub(crate) fn new() -> Self {
        Self {
            path: Vec::new(),
            guard: TraversalGuard::default(),
        }
    }

    /// The current path segments, root first; empty at the top level.
    pub(crate) fn path(&self) -> &[String] {
        &self.path
    }

    pub(crate) fn push(&mut self, segment: impl Into<String>) {
        self.path.push(segment.into());
    }

    pub(crate) fn pop(&mut self) {
        self.path.pop();
    }
}

/// An ordered list of strategies assembled for one mode set.
///
/// A chain is immutable and reusable across comparison calls; each call
/// gets its own traversal state.
pub struct ComparatorChain {
    strategies: Vec<Box<dyn Strategy>>,
}

impl ComparatorChain {
    /// Assembles the chain for the given mode set, in precedence order:
    /// lenient dates, ignore defaults, numbers, simple cases, collections
    /// (ordered or unordered per `LenientOrder`), maps, composites.
    pub fn for_modes(modes: Modes) -> Self {
        let mut strategies: Vec<Box<dyn Strategy>> = Vec::new();
        if modes.contains(Mode::LenientDates) {
            strategies.push(Box::new(LenientDatesStrategy));
        }
        if modes.contains(Mode::IgnoreDefaults) {
            strategies.push(Box::new(IgnoreDefaultsStrategy));
        }
        strategies.push(Box::new(NumberStrategy));
        strategies.push(Box::new(SimpleCasesStrategy));
        if modes.contains(Mode::LenientOrder) {
            strategies.push(Box::new(UnorderedCollectionStrategy));
        } else {
            strategies.push(Box::new(OrderedCollectionStrategy));
        }
        strategies.push(Box::new(MapStrategy));
        strategies.push(Box::new(CompositeStrategy));
        Self { strategies }
    }

    /// Top-level comparison entry point. Returns `None` when the two
    /// graphs are structurally equal under this chain's modes.
    pub fn get_difference(&self, left: &Value, right: &Value) -> Option<Difference> {
        let mut traversal = Traversal::new();
        self.compare(left, right, &mut traversal)
    }

    /// One recursion step: identity fast-path, cycle guard, then the first
    /// accepting strategy.
    pub(crate) fn compare(
        &self,
        left: &Value,
        right: &Value,
        traversal: &mut Traversal,
    ) -> Option<Difference> {
        if left.same_instance(right) {
            return None;
        }

        let pair = match (left.container_addr(), right.container_addr()) {
            (Some(left_addr), Some(right_addr)) => Some((left_addr, right_addr)),
            (Some(_), None) | (None, Some(_)) | (None, None) => None,
        };
        if let Some(pair) = pair {
            if traversal.guard.contains(pair) {
                return None;
            }
        }

        for strategy in &self.strategies {
            if strategy.can_handle(left, right) {
                if let Some(pair) = pair {
                    traversal.guard.register(pair);
                }
                let difference = strategy.get_difference(left, right, self, traversal);
                if let Some(pair) = pair {
                    traversal.guard.unregister(pair);
                }
                return difference;
            }
        }

        // Last resort: identity equality. Reached only for container pairs
        // of unmatched kinds (e.g. a sequence against a composite).
        if left == right {
            None
        } else {
            Some(Difference::leaf(
                format!(
                    "Different value kinds. Left: {}, right: {}.",
                    left.kind().name(),
                    right.kind().name()
                ),
                left,
                right,
                traversal.path(),
            ))
        }
    }
}

/// Compares two value graphs under the given leniency modes. Returns
/// `None` when they are structurally equal.
pub fn compare(left: &Value, right: &Value, modes: Modes) -> Option<Difference> {
    ComparatorChain::for_modes(modes).get_difference(left, right)
}

/// Compares two value graphs with strict deep equality (no modes).
pub fn compare_strict(left: &Value, right: &Value) -> Option<Difference> {
    compare(left, right, Modes::strict())
}
