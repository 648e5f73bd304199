//! # Wire Values
//!
//! The value model carried in method-call arguments and replies. It follows
//! the bus type system: basic types, arrays, structs, dict entries and
//! variants. A dictionary (`a{..}`) is an array of dict entries.
//!
//! Encoding goes through `From<T> for BusValue`; decoding goes through
//! [`FromBusValue`], and a shape mismatch is a [`ValueError`].

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

use crate::entities::{EndpointSet, QueryDepth};
use crate::errors::ValueError;
use crate::names::{InterfaceFilter, InterfaceName, ServiceName};
use crate::path::ObjectPath;

/// A value on the wire.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum BusValue {
    Bool(bool),
    Byte(u8),
    Int16(i16),
    Uint16(u16),
    Int32(i32),
    Uint32(u32),
    Int64(i64),
    Uint64(u64),
    Double(f64),
    Str(String),
    ObjectPath(ObjectPath),
    Array(Vec<BusValue>),
    Struct(Vec<BusValue>),
    DictEntry(Box<BusValue>, Box<BusValue>),
    Variant(Box<BusValue>),
}

impl BusValue {
    /// Short name of the value's type, used in mismatch errors.
    #[must_use]
    pub fn type_name(&self) -> &'static str {
        match self {
            Self::Bool(_) => "bool",
            Self::Byte(_) => "byte",
            Self::Int16(_) => "int16",
            Self::Uint16(_) => "uint16",
            Self::Int32(_) => "int32",
            Self::Uint32(_) => "uint32",
            Self::Int64(_) => "int64",
            Self::Uint64(_) => "uint64",
            Self::Double(_) => "double",
            Self::Str(_) => "string",
            Self::ObjectPath(_) => "object_path",
            Self::Array(_) => "array",
            Self::Struct(_) => "struct",
            Self::DictEntry(..) => "dict_entry",
            Self::Variant(_) => "variant",
        }
    }

    /// Build a dictionary from key/value pairs.
    pub fn dict<K, V, I>(entries: I) -> Self
    where
        K: Into<BusValue>,
        V: Into<BusValue>,
        I: IntoIterator<Item = (K, V)>,
    {
        Self::Array(
            entries
                .into_iter()
                .map(|(k, v)| Self::DictEntry(Box::new(k.into()), Box::new(v.into())))
                .collect(),
        )
    }

    /// Wrap in a variant, as property reads reply.
    #[must_use]
    pub fn variant(self) -> Self {
        Self::Variant(Box::new(self))
    }

    /// Strip any number of variant wrappers.
    #[must_use]
    pub fn into_unwrapped(self) -> Self {
        match self {
            Self::Variant(inner) => inner.into_unwrapped(),
            other => other,
        }
    }
}

/// Decode a [`BusValue`] into a typed value.
pub trait FromBusValue: Sized {
    fn from_bus_value(value: BusValue) -> Result<Self, ValueError>;
}

fn mismatch(expected: &'static str, found: &BusValue) -> ValueError {
    ValueError::TypeMismatch {
        expected,
        found: found.type_name(),
    }
}

impl FromBusValue for BusValue {
    fn from_bus_value(value: BusValue) -> Result<Self, ValueError> {
        Ok(value)
    }
}

macro_rules! basic_value {
    ($ty:ty, $variant:ident, $name:literal) => {
        impl From<$ty> for BusValue {
            fn from(value: $ty) -> Self {
                Self::$variant(value)
            }
        }

        impl FromBusValue for $ty {
            fn from_bus_value(value: BusValue) -> Result<Self, ValueError> {
                match value.into_unwrapped() {
                    BusValue::$variant(v) => Ok(v),
                    other => Err(mismatch($name, &other)),
                }
            }
        }
    };
}

basic_value!(bool, Bool, "bool");
basic_value!(u8, Byte, "byte");
basic_value!(i16, Int16, "int16");
basic_value!(u16, Uint16, "uint16");
basic_value!(i32, Int32, "int32");
basic_value!(u32, Uint32, "uint32");
basic_value!(i64, Int64, "int64");
basic_value!(u64, Uint64, "uint64");
basic_value!(f64, Double, "double");

impl From<String> for BusValue {
    fn from(value: String) -> Self {
        Self::Str(value)
    }
}

impl From<&str> for BusValue {
    fn from(value: &str) -> Self {
        Self::Str(value.to_string())
    }
}

impl FromBusValue for String {
    fn from_bus_value(value: BusValue) -> Result<Self, ValueError> {
        match value.into_unwrapped() {
            BusValue::Str(s) => Ok(s),
            BusValue::ObjectPath(p) => Ok(p.into()),
            other => Err(mismatch("string", &other)),
        }
    }
}

impl From<ObjectPath> for BusValue {
    fn from(value: ObjectPath) -> Self {
        Self::ObjectPath(value)
    }
}

impl From<&ObjectPath> for BusValue {
    fn from(value: &ObjectPath) -> Self {
        Self::ObjectPath(value.clone())
    }
}

/// Paths are accepted both as object paths and as plain strings, since the
/// mapper replies with `s`/`as` where callers think in paths.
impl FromBusValue for ObjectPath {
    fn from_bus_value(value: BusValue) -> Result<Self, ValueError> {
        match value.into_unwrapped() {
            BusValue::ObjectPath(p) => Ok(p),
            BusValue::Str(s) => Ok(ObjectPath::new(s)?),
            other => Err(mismatch("object_path", &other)),
        }
    }
}

impl From<ServiceName> for BusValue {
    fn from(value: ServiceName) -> Self {
        Self::Str(value.as_str().to_string())
    }
}

impl FromBusValue for ServiceName {
    fn from_bus_value(value: BusValue) -> Result<Self, ValueError> {
        String::from_bus_value(value).map(ServiceName::from)
    }
}

impl From<InterfaceName> for BusValue {
    fn from(value: InterfaceName) -> Self {
        Self::Str(value.as_str().to_string())
    }
}

impl From<&InterfaceName> for BusValue {
    fn from(value: &InterfaceName) -> Self {
        Self::Str(value.as_str().to_string())
    }
}

impl FromBusValue for InterfaceName {
    fn from_bus_value(value: BusValue) -> Result<Self, ValueError> {
        String::from_bus_value(value).map(InterfaceName::from)
    }
}

impl From<&InterfaceFilter> for BusValue {
    fn from(filter: &InterfaceFilter) -> Self {
        Self::Array(filter.iter().map(BusValue::from).collect())
    }
}

impl FromBusValue for InterfaceFilter {
    fn from_bus_value(value: BusValue) -> Result<Self, ValueError> {
        Vec::<InterfaceName>::from_bus_value(value).map(InterfaceFilter::new)
    }
}

impl From<QueryDepth> for BusValue {
    fn from(depth: QueryDepth) -> Self {
        Self::Int32(depth.to_wire())
    }
}

impl FromBusValue for QueryDepth {
    fn from_bus_value(value: BusValue) -> Result<Self, ValueError> {
        i32::from_bus_value(value).map(QueryDepth::from_wire)
    }
}

impl FromBusValue for EndpointSet {
    fn from_bus_value(value: BusValue) -> Result<Self, ValueError> {
        Vec::<ObjectPath>::from_bus_value(value).map(|paths| paths.into_iter().collect())
    }
}

impl<T: Into<BusValue>> From<Vec<T>> for BusValue {
    fn from(values: Vec<T>) -> Self {
        Self::Array(values.into_iter().map(Into::into).collect())
    }
}

impl<T: FromBusValue> FromBusValue for Vec<T> {
    fn from_bus_value(value: BusValue) -> Result<Self, ValueError> {
        match value.into_unwrapped() {
            BusValue::Array(items) => items.into_iter().map(T::from_bus_value).collect(),
            other => Err(mismatch("array", &other)),
        }
    }
}

/// Pairs decode from a two-field struct or from a dict entry.
impl<A: FromBusValue, B: FromBusValue> FromBusValue for (A, B) {
    fn from_bus_value(value: BusValue) -> Result<Self, ValueError> {
        match value.into_unwrapped() {
            BusValue::DictEntry(k, v) => Ok((A::from_bus_value(*k)?, B::from_bus_value(*v)?)),
            BusValue::Struct(fields) if fields.len() == 2 => {
                let mut fields = fields.into_iter();
                match (fields.next(), fields.next()) {
                    (Some(a), Some(b)) => Ok((A::from_bus_value(a)?, B::from_bus_value(b)?)),
                    _ => Err(ValueError::ArityMismatch {
                        expected: 2,
                        found: 0,
                    }),
                }
            }
            BusValue::Struct(fields) => Err(ValueError::ArityMismatch {
                expected: 2,
                found: fields.len(),
            }),
            other => Err(mismatch("dict_entry", &other)),
        }
    }
}

impl<K, V> From<BTreeMap<K, V>> for BusValue
where
    K: Into<BusValue>,
    V: Into<BusValue>,
{
    fn from(map: BTreeMap<K, V>) -> Self {
        Self::dict(map)
    }
}

impl<K, V> FromBusValue for BTreeMap<K, V>
where
    K: FromBusValue + Ord,
    V: FromBusValue,
{
    fn from_bus_value(value: BusValue) -> Result<Self, ValueError> {
        Vec::<(K, V)>::from_bus_value(value).map(|pairs| pairs.into_iter().collect())
    }
}
