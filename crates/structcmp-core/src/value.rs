/// Dynamic value graphs compared by the engine.
///
/// [`Value`] is a closed set of tagged variants covering scalars, dates,
/// sequences, maps, and named composites. Container variants are
/// reference-counted shared cells, so a graph may contain cycles
/// (`a.child = a`) and cloning a `Value` is cheap; the engine and the
/// difference tree only ever hold clones.
///
/// `PartialEq` on `Value` is identity equality for containers (pointer
/// equality of the shared cell) and value equality for scalars. Deep
/// structural equality is exclusively the comparison engine's job; this
/// keeps `==` total and safe on cyclic graphs.
use std::cell::{Ref, RefCell};
use std::fmt;
use std::rc::Rc;

/// An instant as milliseconds since the Unix epoch.
///
/// The engine never interprets the value beyond equality and presence
/// checks, so no calendar arithmetic is provided.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Timestamp(i64);

impl Timestamp {
    /// Creates a timestamp from milliseconds since the Unix epoch.
    pub fn from_epoch_millis(millis: i64) -> Self {
        Self(millis)
    }

    /// Milliseconds since the Unix epoch.
    pub fn epoch_millis(self) -> i64 {
        self.0
    }
}

impl From<i64> for Timestamp {
    fn from(millis: i64) -> Self {
        Self(millis)
    }
}

/// A named composite value: a type name plus its fields in declaration order.
#[derive(Debug)]
pub struct Composite {
    /// Name of the composite's type (struct name, variant name, ...).
    pub type_name: String,
    /// Fields in declaration order. Names are unique per composite.
    pub fields: Vec<(String, Value)>,
}

impl Composite {
    /// Looks up a field by name.
    pub fn field(&self, name: &str) -> Option<&Value> {
        self.fields
            .iter()
            .find(|(field_name, _)| field_name == name)
            .map(|(_, value)| value)
    }
}

/// Coarse classification of a [`Value`], used in messages and match scoring.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ValueKind {
    /// The null/absent value.
    Null,
    /// Boolean.
    Bool,
    /// Any numeric variant (`Int`, `UInt`, `Float`).
    Number,
    /// Single character.
    Char,
    /// UTF-8 string.
    String,
    /// Timestamp value.
    Date,
    /// Ordered sequence.
    Sequence,
    /// Key-value mapping.
    Map,
    /// Named composite.
    Composite,
}

impl ValueKind {
    /// Human-readable kind name for difference messages.
    pub fn name(self) -> &'static str {
        match self {
            Self::Null => "null",
            Self::Bool => "boolean",
            Self::Number => "number",
            Self::Char => "character",
            Self::String => "string",
            Self::Date => "date",
            Self::Sequence => "sequence",
            Self::Map => "map",
            Self::Composite => "composite",
        }
    }
}

/// A dynamic value node.
#[derive(Clone)]
pub enum Value {
    /// The null/absent value.
    Null,
    /// Boolean value.
    Bool(bool),
    /// Signed integer (fits in i64).
    Int(i64),
    /// Unsigned integer above `i64::MAX`.
    UInt(u64),
    /// IEEE 754 double-precision float.
    Float(f64),
    /// Single character.
    Char(char),
    /// UTF-8 string.
    String(String),
    /// Instant in time.
    Date(Timestamp),
    /// Ordered sequence of values (also covers arrays).
    Sequence(Rc<RefCell<Vec<Value>>>),
    /// Key-value entries. Keys are matched by scalar value equality
    /// (container keys match by identity only).
    Map(Rc<RefCell<Vec<(Value, Value)>>>),
    /// Named composite with fields.
    Composite(Rc<RefCell<Composite>>),
}

impl Value {
    /// Creates a sequence value from the given elements.
    pub fn sequence(elements: Vec<Value>) -> Self {
        Self::Sequence(Rc::new(RefCell::new(elements)))
    }

    /// Creates a map value from the given entries.
    pub fn map(entries: Vec<(Value, Value)>) -> Self {
        Self::Map(Rc::new(RefCell::new(entries)))
    }

    /// Creates a composite value with the given type name and fields.
    pub fn composite(type_name: impl Into<String>, fields: Vec<(String, Value)>) -> Self {
        Self::Composite(Rc::new(RefCell::new(Composite {
            type_name: type_name.into(),
            fields,
        })))
    }

    /// Creates a date value from milliseconds since the Unix epoch.
    pub fn date(epoch_millis: i64) -> Self {
        Self::Date(Timestamp::from_epoch_millis(epoch_millis))
    }

    /// Returns the kind of this value.
    pub fn kind(&self) -> ValueKind {
        match self {
            Self::Null => ValueKind::Null,
            Self::Bool(_) => ValueKind::Bool,
            Self::Int(_) | Self::UInt(_) | Self::Float(_) => ValueKind::Number,
            Self::Char(_) => ValueKind::Char,
            Self::String(_) => ValueKind::String,
            Self::Date(_) => ValueKind::Date,
            Self::Sequence(_) => ValueKind::Sequence,
            Self::Map(_) => ValueKind::Map,
            Self::Composite(_) => ValueKind::Composite,
        }
    }

    /// Returns `true` if this is `Value::Null`.
    pub fn is_null(&self) -> bool {
        matches!(self, Self::Null)
    }

    /// Returns `true` for container variants (sequence, map, composite).
    pub fn is_container(&self) -> bool {
        matches!(self, Self::Sequence(_) | Self::Map(_) | Self::Composite(_))
    }

    /// Returns `true` for any numeric variant.
    pub fn is_number(&self) -> bool {
        matches!(self, Self::Int(_) | Self::UInt(_) | Self::Float(_))
    }

    /// Returns `true` if this value is a default/placeholder: null, `false`,
    /// numeric zero, or the NUL character.
    pub fn is_default(&self) -> bool {
        match self {
            Self::Null => true,
            Self::Bool(b) => !b,
            Self::Int(n) => *n == 0,
            Self::UInt(n) => *n == 0,
            Self::Float(f) => *f == 0.0,
            Self::Char(c) => *c == '\0',
            Self::String(_) | Self::Date(_) | Self::Sequence(_) | Self::Map(_)
            | Self::Composite(_) => false,
        }
    }

    /// Returns the string value if this is a `Value::String`.
    pub fn as_str(&self) -> Option<&str> {
        match self {
            Self::String(s) => Some(s.as_str()),
            Self::Null
            | Self::Bool(_)
            | Self::Int(_)
            | Self::UInt(_)
            | Self::Float(_)
            | Self::Char(_)
            | Self::Date(_)
            | Self::Sequence(_)
            | Self::Map(_)
            | Self::Composite(_) => None,
        }
    }

    /// Returns the i64 value if this is an integer variant that fits.
    pub fn as_i64(&self) -> Option<i64> {
        match self {
            Self::Int(n) => Some(*n),
            Self::UInt(n) => i64::try_from(*n).ok(),
            Self::Null
            | Self::Bool(_)
            | Self::Float(_)
            | Self::Char(_)
            | Self::String(_)
            | Self::Date(_)
            | Self::Sequence(_)
            | Self::Map(_)
            | Self::Composite(_) => None,
        }
    }

    /// Returns the f64 value if this is any numeric variant.
    pub fn as_f64(&self) -> Option<f64> {
        match self {
            Self::Float(f) => Some(*f),
            Self::Int(n) => Some(*n as f64),
            Self::UInt(n) => Some(*n as f64),
            Self::Null
            | Self::Bool(_)
            | Self::Char(_)
            | Self::String(_)
            | Self::Date(_)
            | Self::Sequence(_)
            | Self::Map(_)
            | Self::Composite(_) => None,
        }
    }

    /// Returns the bool value if this is a `Value::Bool`.
    pub fn as_bool(&self) -> Option<bool> {
        match self {
            Self::Bool(b) => Some(*b),
            Self::Null
            | Self::Int(_)
            | Self::UInt(_)
            | Self::Float(_)
            | Self::Char(_)
            | Self::String(_)
            | Self::Date(_)
            | Self::Sequence(_)
            | Self::Map(_)
            | Self::Composite(_) => None,
        }
    }

    /// Returns the timestamp if this is a `Value::Date`.
    pub fn as_date(&self) -> Option<Timestamp> {
        match self {
            Self::Date(t) => Some(*t),
            Self::Null
            | Self::Bool(_)
            | Self::Int(_)
            | Self::UInt(_)
            | Self::Float(_)
            | Self::Char(_)
            | Self::String(_)
            | Self::Sequence(_)
            | Self::Map(_)
            | Self::Composite(_) => None,
        }
    }

    /// Borrows the elements if this is a `Value::Sequence`.
    pub fn as_sequence(&self) -> Option<Ref<'_, Vec<Value>>> {
        match self {
            Self::Sequence(cell) => Some(cell.borrow()),
            Self::Null
            | Self::Bool(_)
            | Self::Int(_)
            | Self::UInt(_)
            | Self::Float(_)
            | Self::Char(_)
            | Self::String(_)
            | Self::Date(_)
            | Self::Map(_)
            | Self::Composite(_) => None,
        }
    }

    /// Borrows the entries if this is a `Value::Map`.
    pub fn as_map(&self) -> Option<Ref<'_, Vec<(Value, Value)>>> {
        match self {
            Self::Map(cell) => Some(cell.borrow()),
            Self::Null
            | Self::Bool(_)
            | Self::Int(_)
            | Self::UInt(_)
            | Self::Float(_)
            | Self::Char(_)
            | Self::String(_)
            | Self::Date(_)
            | Self::Sequence(_)
            | Self::Composite(_) => None,
        }
    }

    /// Borrows the composite if this is a `Value::Composite`.
    pub fn as_composite(&self) -> Option<Ref<'_, Composite>> {
        match self {
            Self::Composite(cell) => Some(cell.borrow()),
            Self::Null
            | Self::Bool(_)
            | Self::Int(_)
            | Self::UInt(_)
            | Self::Float(_)
            | Self::Char(_)
            | Self::String(_)
            | Self::Date(_)
            | Self::Sequence(_)
            | Self::Map(_) => None,
        }
    }

    /// Sets (or appends) a field on a composite value. Returns `false` if
    /// this value is not a composite. Usable after construction to close a
    /// cycle: `a.set_field("child", a.clone())`.
    pub fn set_field(&self, name: &str, value: Value) -> bool {
        match self {
            Self::Composite(cell) => {
                let mut composite = cell.borrow_mut();
                if let Some(slot) = composite
                    .fields
                    .iter_mut()
                    .find(|(field_name, _)| field_name == name)
                {
                    slot.1 = value;
                } else {
                    composite.fields.push((name.to_owned(), value));
                }
                true
            }
            Self::Null
            | Self::Bool(_)
            | Self::Int(_)
            | Self::UInt(_)
            | Self::Float(_)
            | Self::Char(_)
            | Self::String(_)
            | Self::Date(_)
            | Self::Sequence(_)
            | Self::Map(_) => false,
        }
    }

    /// Appends an element to a sequence value. Returns `false` for other
    /// variants.
    pub fn push_element(&self, value: Value) -> bool {
        match self {
            Self::Sequence(cell) => {
                cell.borrow_mut().push(value);
                true
            }
            Self::Null
            | Self::Bool(_)
            | Self::Int(_)
            | Self::UInt(_)
            | Self::Float(_)
            | Self::Char(_)
            | Self::String(_)
            | Self::Date(_)
            | Self::Map(_)
            | Self::Composite(_) => false,
        }
    }

    /// Inserts an entry into a map value, replacing an entry with an equal
    /// key. Returns `false` for other variants.
    pub fn insert_entry(&self, key: Value, value: Value) -> bool {
        match self {
            Self::Map(cell) => {
                let mut entries = cell.borrow_mut();
                if let Some(slot) = entries.iter_mut().find(|(k, _)| *k == key) {
                    slot.1 = value;
                } else {
                    entries.push((key, value));
                }
                true
            }
            Self::Null
            | Self::Bool(_)
            | Self::Int(_)
            | Self::UInt(_)
            | Self::Float(_)
            | Self::Char(_)
            | Self::String(_)
            | Self::Date(_)
            | Self::Sequence(_)
            | Self::Composite(_) => false,
        }
    }

    /// Returns `true` when both values are the same instance: the same
    /// shared container cell, or both null.
    pub fn same_instance(&self, other: &Value) -> bool {
        match (self, other) {
            (Self::Null, Self::Null) => true,
            (Self::Sequence(a), Self::Sequence(b)) => Rc::ptr_eq(a, b),
            (Self::Map(a), Self::Map(b)) => Rc::ptr_eq(a, b),
            (Self::Composite(a), Self::Composite(b)) => Rc::ptr_eq(a, b),
            _ => false,
        }
    }

    /// Address of the shared cell for container variants, `None` for
    /// scalars. Used as the identity key in the traversal guard.
    pub(crate) fn container_addr(&self) -> Option<usize> {
        match self {
            Self::Sequence(cell) => Some(Rc::as_ptr(cell) as usize),
            Self::Map(cell) => Some(Rc::as_ptr(cell) as usize),
            Self::Composite(cell) => Some(Rc::as_ptr(cell) as usize),
            Self::Null
            | Self::Bool(_)
            | Self::Int(_)
            | Self::UInt(_)
            | Self::Float(_)
            | Self::Char(_)
            | Self::String(_)
            | Self::Date(_) => None,
        }
    }
}

impl PartialEq for Value {
    /// Identity equality for containers, value equality for scalars.
    ///
    /// Integers compare across signedness when the magnitude matches;
    /// floats compare by bit pattern so `NaN == NaN` holds and the relation
    /// stays reflexive. Deep structural comparison is the engine's job.
    fn eq(&self, other: &Self) -> bool {
        match (self, other) {
            (Self::Null, Self::Null) => true,
            (Self::Bool(a), Self::Bool(b)) => a == b,
            (Self::Int(a), Self::Int(b)) => a == b,
            (Self::UInt(a), Self::UInt(b)) => a == b,
            (Self::Int(a), Self::UInt(b)) => u64::try_from(*a).is_ok_and(|a| a == *b),
            (Self::UInt(a), Self::Int(b)) => u64::try_from(*b).is_ok_and(|b| *a == b),
            (Self::Float(a), Self::Float(b)) => a.to_bits() == b.to_bits(),
            (Self::Char(a), Self::Char(b)) => a == b,
            (Self::String(a), Self::String(b)) => a == b,
            (Self::Date(a), Self::Date(b)) => a == b,
            (Self::Sequence(a), Self::Sequence(b)) => Rc::ptr_eq(a, b),
            (Self::Map(a), Self::Map(b)) => Rc::ptr_eq(a, b),
            (Self::Composite(a), Self::Composite(b)) => Rc::ptr_eq(a, b),
            _ => false,
        }
    }
}

impl fmt::Display for Value {
    /// Renders scalars inline and elides container contents, so formatting
    /// never recurses into a possibly-cyclic graph.
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Null => write!(f, "null"),
            Self::Bool(b) => write!(f, "{b}"),
            Self::Int(n) => write!(f, "{n}"),
            Self::UInt(n) => write!(f, "{n}"),
            Self::Float(v) => write!(f, "{v}"),
            Self::Char(c) => write!(f, "'{c}'"),
            Self::String(s) => write!(f, "\"{s}\""),
            Self::Date(t) => write!(f, "date({})", t.epoch_millis()),
            Self::Sequence(_) => write!(f, "[...]"),
            Self::Map(_) => write!(f, "{{...}}"),
            Self::Composite(cell) => write!(f, "{} {{...}}", cell.borrow().type_name),
        }
    }
}

impl fmt::Debug for Value {
    /// Single-level debug rendering; container contents are elided for
    /// cycle safety, like `Display`.
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Null => write!(f, "Null"),
            Self::Bool(b) => write!(f, "Bool({b})"),
            Self::Int(n) => write!(f, "Int({n})"),
            Self::UInt(n) => write!(f, "UInt({n})"),
            Self::Float(v) => write!(f, "Float({v})"),
            Self::Char(c) => write!(f, "Char({c:?})"),
            Self::String(s) => write!(f, "String({s:?})"),
            Self::Date(t) => write!(f, "Date({})", t.epoch_millis()),
            Self::Sequence(cell) => write!(f, "Sequence(len={})", cell.borrow().len()),
            Self::Map(cell) => write!(f, "Map(len={})", cell.borrow().len()),
            Self::Composite(cell) => write!(f, "Composite({} {{...}})", cell.borrow().type_name),
        }
    }
}

impl From<bool> for Value {
    fn from(v: bool) -> Self {
        Self::Bool(v)
    }
}

impl From<i32> for Value {
    fn from(v: i32) -> Self {
        Self::Int(i64::from(v))
    }
}

impl From<i64> for Value {
    fn from(v: i64) -> Self {
        Self::Int(v)
    }
}

impl From<u64> for Value {
    fn from(v: u64) -> Self {
        match i64::try_from(v) {
            Ok(n) => Self::Int(n),
            Err(_) => Self::UInt(v),
        }
    }
}

impl From<f64> for Value {
    fn from(v: f64) -> Self {
        Self::Float(v)
    }
}

impl From<char> for Value {
    fn from(v: char) -> Self {
        Self::Char(v)
    }
}

impl From<&str> for Value {
    fn from(v: &str) -> Self {
        Self::String(v.to_owned())
    }
}

impl From<String> for Value {
    fn from(v: String) -> Self {
        Self::String(v)
    }
}

impl From<Timestamp> for Value {
    fn from(v: Timestamp) -> Self {
        Self::Date(v)
    }
}
