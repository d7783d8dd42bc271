//! Lowering arbitrary `Serialize` types into [`Value`] graphs.
//!
//! The comparison engine only understands [`Value`]; this module is the
//! bridge from ordinary Rust data. Structs and struct variants become
//! composites named after the type or variant, sequences and tuples become
//! sequences, maps become maps with lowered keys, and `None`/unit become
//! null. Tuple and newtype variants use positional field names ("0", "1")
//! so their elements stay addressable in a difference tree.

use std::fmt;

use serde::Serialize;
use serde::ser::{self, Serializer};

use crate::value::Value;

/// Lowers any serializable value into a [`Value`] graph.
pub fn to_value<T: Serialize>(value: &T) -> Result<Value, ToValueError> {
    value.serialize(ValueSerializer)
}

/// Error raised by a `Serialize` implementation during lowering.
///
/// The lowering itself is total; this only surfaces failures reported by
/// the type's own `serialize` code (e.g. a poisoned lock behind a custom
/// impl).
#[derive(Debug)]
pub struct ToValueError {
    message: String,
}

impl fmt::Display for ToValueError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "cannot lower value: {}", self.message)
    }
}

impl std::error::Error for ToValueError {}

impl ser::Error for ToValueError {
    fn custom<T: fmt::Display>(message: T) -> Self {
        Self {
            message: message.to_string(),
        }
    }
}

struct ValueSerializer;

impl Serializer for ValueSerializer {
    type Ok = Value;
    type Error = ToValueError;

    type SerializeSeq = SequenceBuilder;
    type SerializeTuple = SequenceBuilder;
    type SerializeTupleStruct = SequenceBuilder;
    type SerializeTupleVariant = VariantBuilder;
    type SerializeMap = MapBuilder;
    type SerializeStruct = CompositeBuilder;
    type SerializeStructVariant = CompositeBuilder;

    fn serialize_bool(self, v: bool) -> Result<Value, ToValueError> {
        Ok(Value::Bool(v))
    }

    fn serialize_i8(self, v: i8) -> Result<Value, ToValueError> {
        Ok(Value::Int(i64::from(v)))
    }

    fn serialize_i16(self, v: i16) -> Result<Value, ToValueError> {
        Ok(Value::Int(i64::from(v)))
    }

    fn serialize_i32(self, v: i32) -> Result<Value, ToValueError> {
        Ok(Value::Int(i64::from(v)))
    }

    fn serialize_i64(self, v: i64) -> Result<Value, ToValueError> {
        Ok(Value::Int(v))
    }

    fn serialize_u8(self, v: u8) -> Result<Value, ToValueError> {
        Ok(Value::Int(i64::from(v)))
    }

    fn serialize_u16(self, v: u16) -> Result<Value, ToValueError> {
        Ok(Value::Int(i64::from(v)))
    }

    fn serialize_u32(self, v: u32) -> Result<Value, ToValueError> {
        Ok(Value::Int(i64::from(v)))
    }

    fn serialize_u64(self, v: u64) -> Result<Value, ToValueError> {
        // Stay in the signed range where possible so ordinary integers
        // compare by value regardless of the source type.
        Ok(match i64::try_from(v) {
            Ok(signed) => Value::Int(signed),
            Err(_) => Value::UInt(v),
        })
    }

    fn serialize_f32(self, v: f32) -> Result<Value, ToValueError> {
        Ok(Value::Float(f64::from(v)))
    }

    fn serialize_f64(self, v: f64) -> Result<Value, ToValueError> {
        Ok(Value::Float(v))
    }

    fn serialize_char(self, v: char) -> Result<Value, ToValueError> {
        Ok(Value::Char(v))
    }

    fn serialize_str(self, v: &str) -> Result<Value, ToValueError> {
        Ok(Value::String(v.to_owned()))
    }

    fn serialize_bytes(self, v: &[u8]) -> Result<Value, ToValueError> {
        Ok(Value::sequence(
            v.iter().map(|b| Value::Int(i64::from(*b))).collect(),
        ))
    }

    fn serialize_none(self) -> Result<Value, ToValueError> {
        Ok(Value::Null)
    }

    fn serialize_some<T: Serialize + ?Sized>(self, value: &T) -> Result<Value, ToValueError> {
        value.serialize(self)
    }

    fn serialize_unit(self) -> Result<Value, ToValueError> {
        Ok(Value::Null)
    }

    fn serialize_unit_struct(self, name: &'static str) -> Result<Value, ToValueError> {
        Ok(Value::composite(name, Vec::new()))
    }

    fn serialize_unit_variant(
        self,
        _name: &'static str,
        _variant_index: u32,
        variant: &'static str,
    ) -> Result<Value, ToValueError> {
        Ok(Value::String(variant.to_owned()))
    }

    fn serialize_newtype_struct<T: Serialize + ?Sized>(
        self,
        _name: &'static str,
        value: &T,
    ) -> Result<Value, ToValueError> {
        value.serialize(self)
    }

    fn serialize_newtype_variant<T: Serialize + ?Sized>(
        self,
        _name: &'static str,
        _variant_index: u32,
        variant: &'static str,
        value: &T,
    ) -> Result<Value, ToValueError> {
        Ok(Value::composite(
            variant,
            vec![("0".to_owned(), value.serialize(ValueSerializer)?)],
        ))
    }

    fn serialize_seq(self, len: Option<usize>) -> Result<SequenceBuilder, ToValueError> {
        Ok(SequenceBuilder {
            elements: Vec::with_capacity(len.unwrap_or(0)),
        })
    }

    fn serialize_tuple(self, len: usize) -> Result<SequenceBuilder, ToValueError> {
        self.serialize_seq(Some(len))
    }

    fn serialize_tuple_struct(
        self,
        _name: &'static str,
        len: usize,
    ) -> Result<SequenceBuilder, ToValueError> {
        self.serialize_seq(Some(len))
    }

    fn serialize_tuple_variant(
        self,
        _name: &'static str,
        _variant_index: u32,
        variant: &'static str,
        len: usize,
    ) -> Result<VariantBuilder, ToValueError> {
        Ok(VariantBuilder {
            variant,
            fields: Vec::with_capacity(len),
        })
    }

    fn serialize_map(self, len: Option<usize>) -> Result<MapBuilder, ToValueError> {
        Ok(MapBuilder {
            entries: Vec::with_capacity(len.unwrap_or(0)),
            pending_key: None,
        })
    }

    fn serialize_struct(
        self,
        name: &'static str,
        len: usize,
    ) -> Result<CompositeBuilder, ToValueError> {
        Ok(CompositeBuilder {
            type_name: name,
            fields: Vec::with_capacity(len),
        })
    }

    fn serialize_struct_variant(
        self,
        _name: &'static str,
        _variant_index: u32,
        variant: &'static str,
        len: usize,
    ) -> Result<CompositeBuilder, ToValueError> {
        Ok(CompositeBuilder {
            type_name: variant,
            fields: Vec::with_capacity(len),
        })
    }
}

struct SequenceBuilder {
    elements: Vec<Value>,
}

impl ser::SerializeSeq for SequenceBuilder {
    type Ok = Value;
    type Error = ToValueError;

    fn serialize_element<T: Serialize + ?Sized>(&mut self, value: &T) -> Result<(), ToValueError> {
        self.elements.push(value.serialize(ValueSerializer)?);
        Ok(())
    }

    fn end(self) -> Result<Value, ToValueError> {
        Ok(Value::sequence(self.elements))
    }
}

impl ser::SerializeTuple for SequenceBuilder {
    type Ok = Value;
    type Error = ToValueError;

    fn serialize_element<T: Serialize + ?Sized>(&mut self, value: &T) -> Result<(), ToValueError> {
        ser::SerializeSeq::serialize_element(self, value)
    }

    fn end(self) -> Result<Value, ToValueError> {
        ser::SerializeSeq::end(self)
    }
}

impl ser::SerializeTupleStruct for SequenceBuilder {
    type Ok = Value;
    type Error = ToValueError;

    fn serialize_field<T: Serialize + ?Sized>(&mut self, value: &T) -> Result<(), ToValueError> {
        ser::SerializeSeq::serialize_element(self, value)
    }

    fn end(self) -> Result<Value, ToValueError> {
        ser::SerializeSeq::end(self)
    }
}

struct VariantBuilder {
    variant: &'static str,
    fields: Vec<(String, Value)>,
}

impl ser::SerializeTupleVariant for VariantBuilder {
    type Ok = Value;
    type Error = ToValueError;

    fn serialize_field<T: Serialize + ?Sized>(&mut self, value: &T) -> Result<(), ToValueError> {
        let index = self.fields.len().to_string();
        self.fields.push((index, value.serialize(ValueSerializer)?));
        Ok(())
    }

    fn end(self) -> Result<Value, ToValueError> {
        Ok(Value::composite(self.variant, self.fields))
    }
}

struct MapBuilder {
    entries: Vec<(Value, Value)>,
    pending_key: Option<Value>,
}

impl ser::SerializeMap for MapBuilder {
    type Ok = Value;
    type Error = ToValueError;

    fn serialize_key<T: Serialize + ?Sized>(&mut self, key: &T) -> Result<(), ToValueError> {
        self.pending_key = Some(key.serialize(ValueSerializer)?);
        Ok(())
    }

    fn serialize_value<T: Serialize + ?Sized>(&mut self, value: &T) -> Result<(), ToValueError> {
        let key = self.pending_key.take().unwrap_or(Value::Null);
        self.entries.push((key, value.serialize(ValueSerializer)?));
        Ok(())
    }

    fn end(self) -> Result<Value, ToValueError> {
        Ok(Value::map(self.entries))
    }
}

struct CompositeBuilder {
    type_name: &'static str,
    fields: Vec<(String, Value)>,
}

impl ser::SerializeStruct for CompositeBuilder {
    type Ok = Value;
    type Error = ToValueError;

    fn serialize_field<T: Serialize + ?Sized>(
        &mut self,
        key: &'static str,
        value: &T,
    ) -> Result<(), ToValueError> {
        self.fields
            .push((key.to_owned(), value.serialize(ValueSerializer)?));
        Ok(())
    }

    fn end(self) -> Result<Value, ToValueError> {
        Ok(Value::composite(self.type_name, self.fields))
    }
}

impl ser::SerializeStructVariant for CompositeBuilder {
    type Ok = Value;
    type Error = ToValueError;

    fn serialize_field<T: Serialize + ?Sized>(
        &mut self,
        key: &'static str,
        value: &T,
    ) -> Result<(), ToValueError> {
        ser::SerializeStruct::serialize_field(self, key, value)
    }

    fn end(self) -> Result<Value, ToValueError> {
        ser::SerializeStruct::end(self)
    }
}

#[cfg(test)]
mod tests {
    #![allow(clippy::expect_used)]

    use std::collections::BTreeMap;

    use serde::Serialize;

    use super::*;
    use crate::compare::compare_strict;

    #[derive(Serialize)]
    struct Person {
        id: i64,
        name: String,
        nickname: Option<String>,
    }

    #[test]
    fn struct_lowers_to_composite() {
        let person = Person {
            id: 1,
            name: "John".to_owned(),
            nickname: None,
        };
        let value = to_value(&person).expect("lowering");
        let composite = value.as_composite().expect("composite");
        assert_eq!(composite.type_name, "Person");
        assert_eq!(composite.field("id"), Some(&Value::Int(1)));
        assert_eq!(composite.field("name"), Some(&Value::from("John")));
        assert_eq!(composite.field("nickname"), Some(&Value::Null));
    }

    #[test]
    fn unsigned_integers_stay_signed_in_range() {
        assert_eq!(to_value(&7u64).expect("lowering"), Value::Int(7));
        assert_eq!(to_value(&u64::MAX).expect("lowering"), Value::UInt(u64::MAX));
    }

    #[test]
    fn sequences_and_maps_lower_structurally() {
        let value = to_value(&vec![1, 2, 3]).expect("lowering");
        let sequence = value.as_sequence().expect("sequence");
        assert_eq!(sequence.len(), 3);

        let mut map = BTreeMap::new();
        map.insert("a".to_owned(), 1);
        let value = to_value(&map).expect("lowering");
        let entries = value.as_map().expect("map");
        assert_eq!(entries[0], (Value::from("a"), Value::Int(1)));
    }

    #[derive(Serialize)]
    enum Shape {
        Point,
        Circle { radius: f64 },
        Pair(i32, i32),
    }

    #[test]
    fn enum_variants_lower_by_shape() {
        assert_eq!(to_value(&Shape::Point).expect("lowering"), Value::from("Point"));

        let circle = to_value(&Shape::Circle { radius: 2.0 }).expect("lowering");
        let composite = circle.as_composite().expect("composite");
        assert_eq!(composite.type_name, "Circle");
        assert_eq!(composite.field("radius"), Some(&Value::Float(2.0)));

        let pair = to_value(&Shape::Pair(1, 2)).expect("lowering");
        let composite = pair.as_composite().expect("composite");
        assert_eq!(composite.type_name, "Pair");
        assert_eq!(composite.field("0"), Some(&Value::Int(1)));
        assert_eq!(composite.field("1"), Some(&Value::Int(2)));
    }

    #[test]
    fn lowered_twins_compare_equal() {
        let a = Person {
            id: 1,
            name: "John".to_owned(),
            nickname: Some("J".to_owned()),
        };
        let b = Person {
            id: 1,
            name: "John".to_owned(),
            nickname: Some("J".to_owned()),
        };
        let left = to_value(&a).expect("lowering");
        let right = to_value(&b).expect("lowering");
        assert!(compare_strict(&left, &right).is_none());
    }
}
