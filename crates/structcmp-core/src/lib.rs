#![deny(clippy::print_stdout, clippy::print_stderr)]

pub mod compare;
pub mod difference;
pub mod format;
pub mod inner;
pub mod modes;
pub mod ser;
pub mod value;

mod best_match;

pub use compare::{ComparatorChain, compare, compare_strict};
pub use difference::{BestMatchSlot, Difference, DifferenceKind, UnorderedDetail};
pub use format::format_difference;
pub use inner::inner_difference;
pub use modes::{Mode, Modes};
pub use ser::{ToValueError, to_value};
pub use value::{Composite, Timestamp, Value, ValueKind};

/// Returns the current version of the structcmp-core library.
pub fn version() -> &'static str {
    env!("CARGO_PKG_VERSION")
}
