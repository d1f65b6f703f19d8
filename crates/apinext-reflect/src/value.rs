//! Tagged value model compared by the engine.
//!
//! Every operand handed to the comparator is a [`Value`]. The variant is the
//! value's classification; [`Value::shape`] is its runtime type. Composites
//! that need an identity (for aliasing or cycles) live in a
//! [`Heap`](crate::Heap) and are reached through [`Value::Ref`].

use std::any::{Any, TypeId};
use std::collections::BTreeMap;
use std::fmt;
use std::sync::Arc;

use crate::error::ValueError;
use crate::heap::NodeId;

// =============================================================================
// Primitives and keys
// =============================================================================

/// Leaf values compared with native equality.
///
/// Numeric variants keep their width: `1_u8` and `1_u64` are different types
/// and never compare equal.
#[derive(Debug, Clone, PartialEq)]
pub enum Primitive {
    Unit,
    Bool(bool),
    I8(i8),
    I16(i16),
    I32(i32),
    I64(i64),
    I128(i128),
    U8(u8),
    U16(u16),
    U32(u32),
    U64(u64),
    U128(u128),
    F32(f32),
    F64(f64),
    Char(char),
    Str(String),
    Bytes(Vec<u8>),
}

/// Discriminant of a [`Primitive`], part of a value's [`Shape`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum PrimitiveKind {
    Unit,
    Bool,
    I8,
    I16,
    I32,
    I64,
    I128,
    U8,
    U16,
    U32,
    U64,
    U128,
    F32,
    F64,
    Char,
    Str,
    Bytes,
}

impl Primitive {
    /// The primitive's kind.
    #[must_use]
    pub const fn kind(&self) -> PrimitiveKind {
        match self {
            Self::Unit => PrimitiveKind::Unit,
            Self::Bool(_) => PrimitiveKind::Bool,
            Self::I8(_) => PrimitiveKind::I8,
            Self::I16(_) => PrimitiveKind::I16,
            Self::I32(_) => PrimitiveKind::I32,
            Self::I64(_) => PrimitiveKind::I64,
            Self::I128(_) => PrimitiveKind::I128,
            Self::U8(_) => PrimitiveKind::U8,
            Self::U16(_) => PrimitiveKind::U16,
            Self::U32(_) => PrimitiveKind::U32,
            Self::U64(_) => PrimitiveKind::U64,
            Self::U128(_) => PrimitiveKind::U128,
            Self::F32(_) => PrimitiveKind::F32,
            Self::F64(_) => PrimitiveKind::F64,
            Self::Char(_) => PrimitiveKind::Char,
            Self::Str(_) => PrimitiveKind::Str,
            Self::Bytes(_) => PrimitiveKind::Bytes,
        }
    }
}

/// Map key. Keys are never compared recursively, only with `==`.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum Key {
    Unit,
    Bool(bool),
    I8(i8),
    I16(i16),
    I32(i32),
    I64(i64),
    I128(i128),
    U8(u8),
    U16(u16),
    U32(u32),
    U64(u64),
    U128(u128),
    Char(char),
    Str(String),
}

impl From<&str> for Key {
    fn from(s: &str) -> Self {
        Self::Str(s.to_owned())
    }
}

impl From<String> for Key {
    fn from(s: String) -> Self {
        Self::Str(s)
    }
}

impl From<i64> for Key {
    fn from(v: i64) -> Self {
        Self::I64(v)
    }
}

impl From<u64> for Key {
    fn from(v: u64) -> Self {
        Self::U64(v)
    }
}

impl TryFrom<Value> for Key {
    type Error = ValueError;

    fn try_from(value: Value) -> Result<Self, Self::Error> {
        match value {
            Value::Prim(Primitive::Unit) => Ok(Self::Unit),
            Value::Prim(Primitive::Bool(v)) => Ok(Self::Bool(v)),
            Value::Prim(Primitive::I8(v)) => Ok(Self::I8(v)),
            Value::Prim(Primitive::I16(v)) => Ok(Self::I16(v)),
            Value::Prim(Primitive::I32(v)) => Ok(Self::I32(v)),
            Value::Prim(Primitive::I64(v)) => Ok(Self::I64(v)),
            Value::Prim(Primitive::I128(v)) => Ok(Self::I128(v)),
            Value::Prim(Primitive::U8(v)) => Ok(Self::U8(v)),
            Value::Prim(Primitive::U16(v)) => Ok(Self::U16(v)),
            Value::Prim(Primitive::U32(v)) => Ok(Self::U32(v)),
            Value::Prim(Primitive::U64(v)) => Ok(Self::U64(v)),
            Value::Prim(Primitive::U128(v)) => Ok(Self::U128(v)),
            Value::Prim(Primitive::Char(v)) => Ok(Self::Char(v)),
            Value::Prim(Primitive::Str(v)) => Ok(Self::Str(v)),
            other => Err(ValueError::UnsupportedKey(other.kind())),
        }
    }
}

// =============================================================================
// Records
// =============================================================================

/// One named field of a [`Record`].
#[derive(Debug, Clone)]
pub struct Field {
    pub name: String,
    pub value: Value,
}

/// A product value: a shape name plus fields in declared order.
///
/// Two records have the same shape when both the name and the field names
/// (in order) agree.
#[derive(Debug, Clone)]
pub struct Record {
    pub name: String,
    pub fields: Vec<Field>,
}

impl Record {
    /// Create a record with no fields.
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            fields: Vec::new(),
        }
    }

    /// Append a field, builder style.
    #[must_use]
    pub fn with_field(mut self, name: impl Into<String>, value: impl Into<Value>) -> Self {
        self.push(name, value);
        self
    }

    /// Append a field.
    pub fn push(&mut self, name: impl Into<String>, value: impl Into<Value>) {
        self.fields.push(Field {
            name: name.into(),
            value: value.into(),
        });
    }

    /// Look up a field by name.
    #[must_use]
    pub fn get(&self, name: &str) -> Option<&Value> {
        self.fields
            .iter()
            .find(|field| field.name == name)
            .map(|field| &field.value)
    }

    fn same_layout(&self, other: &Self) -> bool {
        self.name == other.name
            && self.fields.len() == other.fields.len()
            && self
                .fields
                .iter()
                .zip(&other.fields)
                .all(|(a, b)| a.name == b.name)
    }
}

// =============================================================================
// Callables and opaque leaves
// =============================================================================

type CallableFn = dyn Fn(&[Value]) -> Value + Send + Sync;

/// A function handle. Two set callables are never equal.
#[derive(Clone)]
pub struct Callable(Arc<CallableFn>);

impl Callable {
    pub fn new(f: impl Fn(&[Value]) -> Value + Send + Sync + 'static) -> Self {
        Self(Arc::new(f))
    }

    /// Invoke the wrapped function.
    pub fn call(&self, args: &[Value]) -> Value {
        (self.0)(args)
    }
}

impl fmt::Debug for Callable {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("Callable(..)")
    }
}

/// A value the engine cannot look inside. Equal only to itself.
#[derive(Clone)]
pub struct Opaque(Arc<dyn Any + Send + Sync>);

impl Opaque {
    pub fn new<T: Any + Send + Sync>(value: T) -> Self {
        Self(Arc::new(value))
    }

    /// Borrow the inner value if it is a `T`.
    #[must_use]
    pub fn downcast_ref<T: Any>(&self) -> Option<&T> {
        self.0.downcast_ref::<T>()
    }

    /// Whether both handles denote the same instance.
    #[must_use]
    pub fn same_instance(&self, other: &Self) -> bool {
        Arc::ptr_eq(&self.0, &other.0)
    }

    /// `TypeId` of the wrapped value.
    #[must_use]
    pub fn inner_type_id(&self) -> TypeId {
        Any::type_id(&*self.0)
    }
}

impl fmt::Debug for Opaque {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Opaque({:?})", self.inner_type_id())
    }
}

// =============================================================================
// Value
// =============================================================================

/// A comparison operand.
#[derive(Debug, Clone, Default)]
pub enum Value {
    /// No value at all.
    #[default]
    Absent,
    Prim(Primitive),
    /// Growable sequence. `None` is nil, which differs from empty.
    Seq(Option<Vec<Value>>),
    /// Fixed-length sequence.
    Array(Vec<Value>),
    /// Associative container. `None` is nil.
    Map(Option<BTreeMap<Key, Value>>),
    Record(Record),
    Optional(Option<Box<Value>>),
    /// Reference into a heap. `None` is a null reference.
    Ref(Option<NodeId>),
    /// Function handle. `None` is unset.
    Callable(Option<Callable>),
    Opaque(Opaque),
}

/// How the comparator treats a value.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Kind {
    Absent,
    Primitive,
    Sequence,
    Array,
    Map,
    Record,
    Optional,
    Reference,
    Callable,
    Opaque,
}

impl Kind {
    /// Kinds the comparator descends into field by field or element by
    /// element. Only these are recorded in the visited set.
    #[must_use]
    pub const fn is_composite(self) -> bool {
        matches!(self, Self::Record | Self::Sequence | Self::Array | Self::Map)
    }
}

impl fmt::Display for Kind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Self::Absent => "absent",
            Self::Primitive => "primitive",
            Self::Sequence => "sequence",
            Self::Array => "array",
            Self::Map => "map",
            Self::Record => "record",
            Self::Optional => "optional",
            Self::Reference => "reference",
            Self::Callable => "callable",
            Self::Opaque => "opaque",
        };
        f.write_str(name)
    }
}

/// Runtime type of a value. Only values with equal shapes are compared.
#[derive(Debug, Clone, Copy)]
pub enum Shape<'a> {
    Absent,
    Primitive(PrimitiveKind),
    Sequence,
    Array,
    Map,
    Record(&'a Record),
    Optional,
    Reference,
    Callable,
    Opaque(TypeId),
}

impl PartialEq for Shape<'_> {
    fn eq(&self, other: &Self) -> bool {
        match (self, other) {
            (Self::Absent, Self::Absent)
            | (Self::Sequence, Self::Sequence)
            | (Self::Array, Self::Array)
            | (Self::Map, Self::Map)
            | (Self::Optional, Self::Optional)
            | (Self::Reference, Self::Reference)
            | (Self::Callable, Self::Callable) => true,
            (Self::Primitive(a), Self::Primitive(b)) => a == b,
            (Self::Record(a), Self::Record(b)) => a.same_layout(b),
            (Self::Opaque(a), Self::Opaque(b)) => a == b,
            _ => false,
        }
    }
}

impl Value {
    /// The value's classification.
    #[must_use]
    pub const fn kind(&self) -> Kind {
        match self {
            Self::Absent => Kind::Absent,
            Self::Prim(_) => Kind::Primitive,
            Self::Seq(_) => Kind::Sequence,
            Self::Array(_) => Kind::Array,
            Self::Map(_) => Kind::Map,
            Self::Record(_) => Kind::Record,
            Self::Optional(_) => Kind::Optional,
            Self::Ref(_) => Kind::Reference,
            Self::Callable(_) => Kind::Callable,
            Self::Opaque(_) => Kind::Opaque,
        }
    }

    /// The value's runtime type.
    #[must_use]
    pub fn shape(&self) -> Shape<'_> {
        match self {
            Self::Absent => Shape::Absent,
            Self::Prim(p) => Shape::Primitive(p.kind()),
            Self::Seq(_) => Shape::Sequence,
            Self::Array(_) => Shape::Array,
            Self::Map(_) => Shape::Map,
            Self::Record(r) => Shape::Record(r),
            Self::Optional(_) => Shape::Optional,
            Self::Ref(_) => Shape::Reference,
            Self::Callable(_) => Shape::Callable,
            Self::Opaque(o) => Shape::Opaque(o.inner_type_id()),
        }
    }

    #[must_use]
    pub const fn is_absent(&self) -> bool {
        matches!(self, Self::Absent)
    }

    /// A present sequence holding `items`.
    pub fn seq<I>(items: I) -> Self
    where
        I: IntoIterator,
        I::Item: Into<Self>,
    {
        Self::Seq(Some(items.into_iter().map(Into::into).collect()))
    }

    /// A nil sequence.
    #[must_use]
    pub const fn nil_seq() -> Self {
        Self::Seq(None)
    }

    /// A fixed-length array holding `items`.
    pub fn array<I>(items: I) -> Self
    where
        I: IntoIterator,
        I::Item: Into<Self>,
    {
        Self::Array(items.into_iter().map(Into::into).collect())
    }

    /// A present map holding `entries`.
    pub fn map<I, K, V>(entries: I) -> Self
    where
        I: IntoIterator<Item = (K, V)>,
        K: Into<Key>,
        V: Into<Self>,
    {
        Self::Map(Some(
            entries
                .into_iter()
                .map(|(k, v)| (k.into(), v.into()))
                .collect(),
        ))
    }

    /// A nil map.
    #[must_use]
    pub const fn nil_map() -> Self {
        Self::Map(None)
    }

    /// A set optional.
    pub fn some(value: impl Into<Self>) -> Self {
        Self::Optional(Some(Box::new(value.into())))
    }

    /// An unset optional.
    #[must_use]
    pub const fn none() -> Self {
        Self::Optional(None)
    }

    /// A reference to a heap node.
    #[must_use]
    pub const fn reference(id: NodeId) -> Self {
        Self::Ref(Some(id))
    }

    /// A null reference.
    #[must_use]
    pub const fn null_ref() -> Self {
        Self::Ref(None)
    }

    /// A set callable.
    pub fn callable(f: impl Fn(&[Self]) -> Self + Send + Sync + 'static) -> Self {
        Self::Callable(Some(Callable::new(f)))
    }

    /// An opaque leaf.
    pub fn opaque<T: Any + Send + Sync>(value: T) -> Self {
        Self::Opaque(Opaque::new(value))
    }
}

impl From<Primitive> for Value {
    fn from(p: Primitive) -> Self {
        Self::Prim(p)
    }
}

impl From<Record> for Value {
    fn from(r: Record) -> Self {
        Self::Record(r)
    }
}

impl From<()> for Value {
    fn from((): ()) -> Self {
        Self::Prim(Primitive::Unit)
    }
}

impl From<bool> for Value {
    fn from(v: bool) -> Self {
        Self::Prim(Primitive::Bool(v))
    }
}

impl From<i32> for Value {
    fn from(v: i32) -> Self {
        Self::Prim(Primitive::I32(v))
    }
}

impl From<i64> for Value {
    fn from(v: i64) -> Self {
        Self::Prim(Primitive::I64(v))
    }
}

impl From<u32> for Value {
    fn from(v: u32) -> Self {
        Self::Prim(Primitive::U32(v))
    }
}

impl From<u64> for Value {
    fn from(v: u64) -> Self {
        Self::Prim(Primitive::U64(v))
    }
}

impl From<f64> for Value {
    fn from(v: f64) -> Self {
        Self::Prim(Primitive::F64(v))
    }
}

impl From<char> for Value {
    fn from(v: char) -> Self {
        Self::Prim(Primitive::Char(v))
    }
}

impl From<&str> for Value {
    fn from(v: &str) -> Self {
        Self::Prim(Primitive::Str(v.to_owned()))
    }
}

impl From<String> for Value {
    fn from(v: String) -> Self {
        Self::Prim(Primitive::Str(v))
    }
}

impl<T: Into<Self>> From<Vec<T>> for Value {
    fn from(items: Vec<T>) -> Self {
        Self::seq(items)
    }
}
