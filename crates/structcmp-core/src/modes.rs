/// Leniency modes relaxing strict deep equality.
use std::fmt;

/// An opt-in relaxation of strict deep equality.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Mode {
    /// Collections match when some one-to-one assignment of their elements
    /// matches, regardless of order.
    LenientOrder,
    /// A default value (null, `false`, zero, NUL) on the expected side
    /// matches any actual value. Directional: a concrete expected value
    /// against a default actual value is still a difference.
    IgnoreDefaults,
    /// Dates match when both are present or both are null; the actual
    /// instant is ignored.
    LenientDates,
}

impl fmt::Display for Mode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::LenientOrder => write!(f, "lenient order"),
            Self::IgnoreDefaults => write!(f, "ignore defaults"),
            Self::LenientDates => write!(f, "lenient dates"),
        }
    }
}

/// The immutable set of modes for one comparison call. Resolved into a
/// comparator chain at the start of the call; modes never change
/// mid-traversal.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Modes {
    lenient_order: bool,
    ignore_defaults: bool,
    lenient_dates: bool,
}

impl Modes {
    /// The empty mode set: strict deep equality.
    pub fn strict() -> Self {
        Self::default()
    }

    /// The conventional lenient pairing for partial-expectation asserts:
    /// `LenientOrder` + `IgnoreDefaults`.
    pub fn lenient() -> Self {
        Self::strict().with(Mode::LenientOrder).with(Mode::IgnoreDefaults)
    }

    /// Returns a copy with the given mode enabled.
    pub fn with(mut self, mode: Mode) -> Self {
        match mode {
            Mode::LenientOrder => self.lenient_order = true,
            Mode::IgnoreDefaults => self.ignore_defaults = true,
            Mode::LenientDates => self.lenient_dates = true,
        }
        self
    }

    /// Returns `true` when the given mode is enabled.
    pub fn contains(self, mode: Mode) -> bool {
        match mode {
            Mode::LenientOrder => self.lenient_order,
            Mode::IgnoreDefaults => self.ignore_defaults,
            Mode::LenientDates => self.lenient_dates,
        }
    }
}

impl FromIterator<Mode> for Modes {
    fn from_iter<I: IntoIterator<Item = Mode>>(iter: I) -> Self {
        iter.into_iter().fold(Self::strict(), Modes::with)
    }
}
