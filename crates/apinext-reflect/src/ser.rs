//! Conversion from any `Serialize` type into a [`Value`] tree.
//!
//! Mapping:
//!
//! | serde data model        | `Value`                                     |
//! |-------------------------|---------------------------------------------|
//! | bool, integers, floats  | `Prim`, keeping the exact width             |
//! | char, str, bytes        | `Prim`                                      |
//! | unit                    | `Prim(Unit)`                                |
//! | option                  | `Optional`                                  |
//! | seq                     | `Seq(Some(..))`                             |
//! | map                     | `Map(Some(..))`, keys must be primitive     |
//! | struct, tuple struct    | `Record` named after the struct             |
//! | tuple                   | `Record` named `"tuple"`                    |
//! | enum variant            | `Record` named `"Enum::Variant"`            |
//!
//! Positional fields are named `"0"`, `"1"`, ...
//!
//! The serde data model carries no element types for empty containers or
//! unset options. `Vec::<u8>::new()` and `Vec::<String>::new()` both become an
//! empty `Seq`, and `None::<u8>` and `None::<String>` both become an empty
//! `Optional`, so each pair compares equal. Once an element is present its
//! own type is checked.

use std::collections::BTreeMap;

use serde::ser::{self, Serialize};
use tracing::warn;

use crate::compare::deep_equal_ignore_order;
use crate::error::{ValueError, ValueResult};
use crate::value::{Key, Primitive, Record, Value};

/// Record name used for anonymous tuples.
pub const TUPLE_RECORD: &str = "tuple";

/// Convert `value` into a [`Value`].
pub fn to_value<T: ?Sized + Serialize>(value: &T) -> ValueResult<Value> {
    value.serialize(ValueSerializer)
}

/// Convert both operands and compare them ignoring sequence order.
///
/// A conversion failure is logged and reported as `false`.
pub fn equal_ignore_order<A, B>(a: &A, b: &B) -> bool
where
    A: ?Sized + Serialize,
    B: ?Sized + Serialize,
{
    match (to_value(a), to_value(b)) {
        (Ok(a), Ok(b)) => deep_equal_ignore_order(&a, &b),
        (Err(e), _) | (_, Err(e)) => {
            warn!(error = %e, "Failed to convert operand for comparison");
            false
        }
    }
}

fn variant_name(name: &str, variant: &str) -> String {
    format!("{name}::{variant}")
}

/// Serializer producing [`Value`]s.
#[derive(Debug, Clone, Copy, Default)]
pub struct ValueSerializer;

impl ser::Serializer for ValueSerializer {
    type Ok = Value;
    type Error = ValueError;

    type SerializeSeq = SeqBuilder;
    type SerializeTuple = RecordBuilder;
    type SerializeTupleStruct = RecordBuilder;
    type SerializeTupleVariant = RecordBuilder;
    type SerializeMap = MapBuilder;
    type SerializeStruct = RecordBuilder;
    type SerializeStructVariant = RecordBuilder;

    fn serialize_bool(self, v: bool) -> ValueResult<Value> {
        Ok(Value::Prim(Primitive::Bool(v)))
    }

    fn serialize_i8(self, v: i8) -> ValueResult<Value> {
        Ok(Value::Prim(Primitive::I8(v)))
    }

    fn serialize_i16(self, v: i16) -> ValueResult<Value> {
        Ok(Value::Prim(Primitive::I16(v)))
    }

    fn serialize_i32(self, v: i32) -> ValueResult<Value> {
        Ok(Value::Prim(Primitive::I32(v)))
    }

    fn serialize_i64(self, v: i64) -> ValueResult<Value> {
        Ok(Value::Prim(Primitive::I64(v)))
    }

    fn serialize_i128(self, v: i128) -> ValueResult<Value> {
        Ok(Value::Prim(Primitive::I128(v)))
    }

    fn serialize_u8(self, v: u8) -> ValueResult<Value> {
        Ok(Value::Prim(Primitive::U8(v)))
    }

    fn serialize_u16(self, v: u16) -> ValueResult<Value> {
        Ok(Value::Prim(Primitive::U16(v)))
    }

    fn serialize_u32(self, v: u32) -> ValueResult<Value> {
        Ok(Value::Prim(Primitive::U32(v)))
    }

    fn serialize_u64(self, v: u64) -> ValueResult<Value> {
        Ok(Value::Prim(Primitive::U64(v)))
    }

    fn serialize_u128(self, v: u128) -> ValueResult<Value> {
        Ok(Value::Prim(Primitive::U128(v)))
    }

    fn serialize_f32(self, v: f32) -> ValueResult<Value> {
        Ok(Value::Prim(Primitive::F32(v)))
    }

    fn serialize_f64(self, v: f64) -> ValueResult<Value> {
        Ok(Value::Prim(Primitive::F64(v)))
    }

    fn serialize_char(self, v: char) -> ValueResult<Value> {
        Ok(Value::Prim(Primitive::Char(v)))
    }

    fn serialize_str(self, v: &str) -> ValueResult<Value> {
        Ok(Value::Prim(Primitive::Str(v.to_owned())))
    }

    fn serialize_bytes(self, v: &[u8]) -> ValueResult<Value> {
        Ok(Value::Prim(Primitive::Bytes(v.to_vec())))
    }

    fn serialize_none(self) -> ValueResult<Value> {
        Ok(Value::Optional(None))
    }

    fn serialize_some<T: ?Sized + Serialize>(self, value: &T) -> ValueResult<Value> {
        Ok(Value::Optional(Some(Box::new(value.serialize(self)?))))
    }

    fn serialize_unit(self) -> ValueResult<Value> {
        Ok(Value::Prim(Primitive::Unit))
    }

    fn serialize_unit_struct(self, name: &'static str) -> ValueResult<Value> {
        Ok(Value::Record(Record::new(name)))
    }

    fn serialize_unit_variant(
        self,
        name: &'static str,
        _variant_index: u32,
        variant: &'static str,
    ) -> ValueResult<Value> {
        Ok(Value::Record(Record::new(variant_name(name, variant))))
    }

    fn serialize_newtype_struct<T: ?Sized + Serialize>(
        self,
        name: &'static str,
        value: &T,
    ) -> ValueResult<Value> {
        let inner = value.serialize(self)?;
        Ok(Value::Record(Record::new(name).with_field("0", inner)))
    }

    fn serialize_newtype_variant<T: ?Sized + Serialize>(
        self,
        name: &'static str,
        _variant_index: u32,
        variant: &'static str,
        value: &T,
    ) -> ValueResult<Value> {
        let inner = value.serialize(self)?;
        Ok(Value::Record(
            Record::new(variant_name(name, variant)).with_field("0", inner),
        ))
    }

    fn serialize_seq(self, len: Option<usize>) -> ValueResult<SeqBuilder> {
        Ok(SeqBuilder {
            items: Vec::with_capacity(len.unwrap_or(0)),
        })
    }

    fn serialize_tuple(self, len: usize) -> ValueResult<RecordBuilder> {
        Ok(RecordBuilder::new(TUPLE_RECORD.to_owned(), len))
    }

    fn serialize_tuple_struct(self, name: &'static str, len: usize) -> ValueResult<RecordBuilder> {
        Ok(RecordBuilder::new(name.to_owned(), len))
    }

    fn serialize_tuple_variant(
        self,
        name: &'static str,
        _variant_index: u32,
        variant: &'static str,
        len: usize,
    ) -> ValueResult<RecordBuilder> {
        Ok(RecordBuilder::new(variant_name(name, variant), len))
    }

    fn serialize_map(self, _len: Option<usize>) -> ValueResult<MapBuilder> {
        Ok(MapBuilder {
            entries: BTreeMap::new(),
            pending_key: None,
        })
    }

    fn serialize_struct(self, name: &'static str, len: usize) -> ValueResult<RecordBuilder> {
        Ok(RecordBuilder::new(name.to_owned(), len))
    }

    fn serialize_struct_variant(
        self,
        name: &'static str,
        _variant_index: u32,
        variant: &'static str,
        len: usize,
    ) -> ValueResult<RecordBuilder> {
        Ok(RecordBuilder::new(variant_name(name, variant), len))
    }
}

// =============================================================================
// Compound builders
// =============================================================================

#[derive(Debug)]
pub struct SeqBuilder {
    items: Vec<Value>,
}

impl ser::SerializeSeq for SeqBuilder {
    type Ok = Value;
    type Error = ValueError;

    fn serialize_element<T: ?Sized + Serialize>(&mut self, value: &T) -> ValueResult<()> {
        self.items.push(value.serialize(ValueSerializer)?);
        Ok(())
    }

    fn end(self) -> ValueResult<Value> {
        Ok(Value::Seq(Some(self.items)))
    }
}

/// Builds records for structs, tuples and enum variants.
#[derive(Debug)]
pub struct RecordBuilder {
    record: Record,
}

impl RecordBuilder {
    fn new(name: String, len: usize) -> Self {
        let mut record = Record::new(name);
        record.fields.reserve(len);
        Self { record }
    }

    fn push_named<T: ?Sized + Serialize>(&mut self, name: &str, value: &T) -> ValueResult<()> {
        let value = value.serialize(ValueSerializer)?;
        self.record.push(name, value);
        Ok(())
    }

    fn push_positional<T: ?Sized + Serialize>(&mut self, value: &T) -> ValueResult<()> {
        let index = self.record.fields.len().to_string();
        self.push_named(&index, value)
    }

    fn finish(self) -> Value {
        Value::Record(self.record)
    }
}

impl ser::SerializeTuple for RecordBuilder {
    type Ok = Value;
    type Error = ValueError;

    fn serialize_element<T: ?Sized + Serialize>(&mut self, value: &T) -> ValueResult<()> {
        self.push_positional(value)
    }

    fn end(self) -> ValueResult<Value> {
        Ok(self.finish())
    }
}

impl ser::SerializeTupleStruct for RecordBuilder {
    type Ok = Value;
    type Error = ValueError;

    fn serialize_field<T: ?Sized + Serialize>(&mut self, value: &T) -> ValueResult<()> {
        self.push_positional(value)
    }

    fn end(self) -> ValueResult<Value> {
        Ok(self.finish())
    }
}

impl ser::SerializeTupleVariant for RecordBuilder {
    type Ok = Value;
    type Error = ValueError;

    fn serialize_field<T: ?Sized + Serialize>(&mut self, value: &T) -> ValueResult<()> {
        self.push_positional(value)
    }

    fn end(self) -> ValueResult<Value> {
        Ok(self.finish())
    }
}

impl ser::SerializeStruct for RecordBuilder {
    type Ok = Value;
    type Error = ValueError;

    fn serialize_field<T: ?Sized + Serialize>(
        &mut self,
        key: &'static str,
        value: &T,
    ) -> ValueResult<()> {
        self.push_named(key, value)
    }

    fn end(self) -> ValueResult<Value> {
        Ok(self.finish())
    }
}

impl ser::SerializeStructVariant for RecordBuilder {
    type Ok = Value;
    type Error = ValueError;

    fn serialize_field<T: ?Sized + Serialize>(
        &mut self,
        key: &'static str,
        value: &T,
    ) -> ValueResult<()> {
        self.push_named(key, value)
    }

    fn end(self) -> ValueResult<Value> {
        Ok(self.finish())
    }
}

#[derive(Debug)]
pub struct MapBuilder {
    entries: BTreeMap<Key, Value>,
    pending_key: Option<Key>,
}

impl ser::SerializeMap for MapBuilder {
    type Ok = Value;
    type Error = ValueError;

    fn serialize_key<T: ?Sized + Serialize>(&mut self, key: &T) -> ValueResult<()> {
        self.pending_key = Some(Key::try_from(key.serialize(ValueSerializer)?)?);
        Ok(())
    }

    fn serialize_value<T: ?Sized + Serialize>(&mut self, value: &T) -> ValueResult<()> {
        let key = self.pending_key.take().ok_or(ValueError::MissingMapKey)?;
        self.entries.insert(key, value.serialize(ValueSerializer)?);
        Ok(())
    }

    fn end(self) -> ValueResult<Value> {
        Ok(Value::Map(Some(self.entries)))
    }
}

#[cfg(test)]
mod tests {
    use std::collections::HashMap;

    use serde::Serialize;

    use super::*;
    use crate::value::Kind;

    #[derive(Serialize)]
    struct Model {
        name: String,
        supported_ops: Vec<String>,
    }

    #[derive(Serialize)]
    struct Meters(f64);

    #[derive(Serialize)]
    enum Event {
        Started,
        Progress(u32),
        Failed { reason: String },
    }

    fn model(name: &str, ops: &[&str]) -> Model {
        Model {
            name: name.to_owned(),
            supported_ops: ops.iter().map(ToString::to_string).collect(),
        }
    }

    #[test]
    fn test_struct_becomes_record() {
        let value = to_value(&model("default", &["tag"])).unwrap();
        let Value::Record(record) = value else {
            panic!("expected record, got {value:?}");
        };
        assert_eq!(record.name, "Model");
        assert!(matches!(record.get("name"), Some(Value::Prim(Primitive::Str(s))) if s == "default"));
        assert!(matches!(record.get("supported_ops"), Some(Value::Seq(Some(ops))) if ops.len() == 1));
    }

    #[test]
    fn test_enum_variants_are_distinct_shapes() {
        let started = to_value(&Event::Started).unwrap();
        let progress = to_value(&Event::Progress(3)).unwrap();
        let failed = to_value(&Event::Failed {
            reason: "boom".to_owned(),
        })
        .unwrap();

        assert!(matches!(&started, Value::Record(r) if r.name == "Event::Started"));
        assert!(matches!(&progress, Value::Record(r) if r.name == "Event::Progress"));
        assert!(matches!(&failed, Value::Record(r) if r.get("reason").is_some()));
        assert!(!deep_equal_ignore_order(&started, &progress));
    }

    #[test]
    fn test_newtype_struct_wraps_inner() {
        let value = to_value(&Meters(2.5)).unwrap();
        assert!(matches!(&value, Value::Record(r) if r.name == "Meters" && r.fields.len() == 1));
    }

    #[test]
    fn test_map_with_string_keys() {
        let mut ops = HashMap::new();
        ops.insert("default", vec!["tag", "embed"]);
        let value = to_value(&ops).unwrap();
        assert!(matches!(&value, Value::Map(Some(m)) if m.contains_key(&Key::from("default"))));
    }

    #[test]
    fn test_map_with_float_keys_is_rejected() {
        struct FloatKeyed(Vec<(f64, &'static str)>);
        impl Serialize for FloatKeyed {
            fn serialize<S: ser::Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
                use ser::SerializeMap;
                let mut map = serializer.serialize_map(Some(self.0.len()))?;
                for (k, v) in &self.0 {
                    map.serialize_entry(k, v)?;
                }
                map.end()
            }
        }

        let err = to_value(&FloatKeyed(vec![(1.5, "x")])).unwrap_err();
        assert!(matches!(err, ValueError::UnsupportedKey(Kind::Primitive)));
    }

    #[test]
    fn test_equal_ignore_order_on_structs() {
        let a = vec![model("a", &["x", "y"]), model("b", &["z"])];
        let b = vec![model("b", &["z"]), model("a", &["y", "x"])];
        assert!(equal_ignore_order(&a, &b));
        assert!(!equal_ignore_order(&a, &b[..1]));
    }

    #[test]
    fn test_option_vec_is_optional_sequence() {
        let none: Option<Vec<u8>> = None;
        let empty: Option<Vec<u8>> = Some(Vec::new());
        assert!(!equal_ignore_order(&none, &empty));
        assert!(equal_ignore_order(&none, &None::<Vec<u8>>));
    }

    #[test]
    fn test_integer_types_never_equal() {
        assert!(!equal_ignore_order(&1_i32, &1_u32));
        assert!(!equal_ignore_order(&1_i8, &1_i64));
        assert!(!equal_ignore_order(&1_u8, &1_u64));
        assert!(!equal_ignore_order(&1.0_f32, &1.0_f64));
        assert!(equal_ignore_order(&7_u128, &7_u128));
        assert!(!equal_ignore_order(&vec![1_u8], &vec![1_u16]));
    }

    #[test]
    fn test_empty_containers_carry_no_element_type() {
        assert!(equal_ignore_order(&Vec::<u8>::new(), &Vec::<String>::new()));
        assert!(equal_ignore_order(&None::<u8>, &None::<String>));
        assert!(!equal_ignore_order(&Some(1_u8), &Some("1")));
    }
}
