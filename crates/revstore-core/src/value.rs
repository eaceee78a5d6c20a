use std::collections::BTreeSet;

use serde::{Deserialize, Serialize};

use crate::address::Address;
use crate::id::Id;

/// Typed, immutable payload held by a field
///
/// Values compare structurally; replacing a field's value with an equal one
/// is not a change. Doubles compare by bit pattern, so `NaN` equals itself
/// and `0.0` differs from `-0.0`.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(tag = "type", content = "value", rename_all = "snake_case")]
pub enum Value {
    Boolean(bool),
    Integer(i32),
    Long(i64),
    Double(f64),
    String(String),
    Id(Id),
    Address(Address),
    Binary(Vec<u8>),

    BooleanList(Vec<bool>),
    IntegerList(Vec<i32>),
    LongList(Vec<i64>),
    DoubleList(Vec<f64>),
    StringList(Vec<String>),
    IdList(Vec<Id>),
    AddressList(Vec<Address>),

    StringSet(BTreeSet<String>),
    IdSet(BTreeSet<Id>),
    AddressSet(BTreeSet<Address>),
}

impl Value {
    /// Stable name of the value's type
    pub fn type_name(&self) -> &'static str {
        match self {
            Value::Boolean(_) => "boolean",
            Value::Integer(_) => "integer",
            Value::Long(_) => "long",
            Value::Double(_) => "double",
            Value::String(_) => "string",
            Value::Id(_) => "id",
            Value::Address(_) => "address",
            Value::Binary(_) => "binary",
            Value::BooleanList(_) => "boolean_list",
            Value::IntegerList(_) => "integer_list",
            Value::LongList(_) => "long_list",
            Value::DoubleList(_) => "double_list",
            Value::StringList(_) => "string_list",
            Value::IdList(_) => "id_list",
            Value::AddressList(_) => "address_list",
            Value::StringSet(_) => "string_set",
            Value::IdSet(_) => "id_set",
            Value::AddressSet(_) => "address_set",
        }
    }

    /// True for list and set variants
    pub fn is_collection(&self) -> bool {
        !matches!(
            self,
            Value::Boolean(_)
                | Value::Integer(_)
                | Value::Long(_)
                | Value::Double(_)
                | Value::String(_)
                | Value::Id(_)
                | Value::Address(_)
                | Value::Binary(_)
        )
    }
}

fn same_double(a: f64, b: f64) -> bool {
    a.to_bits() == b.to_bits()
}

impl PartialEq for Value {
    fn eq(&self, other: &Self) -> bool {
        match (self, other) {
            (Value::Boolean(a), Value::Boolean(b)) => a == b,
            (Value::Integer(a), Value::Integer(b)) => a == b,
            (Value::Long(a), Value::Long(b)) => a == b,
            (Value::Double(a), Value::Double(b)) => same_double(*a, *b),
            (Value::String(a), Value::String(b)) => a == b,
            (Value::Id(a), Value::Id(b)) => a == b,
            (Value::Address(a), Value::Address(b)) => a == b,
            (Value::Binary(a), Value::Binary(b)) => a == b,
            (Value::BooleanList(a), Value::BooleanList(b)) => a == b,
            (Value::IntegerList(a), Value::IntegerList(b)) => a == b,
            (Value::LongList(a), Value::LongList(b)) => a == b,
            (Value::DoubleList(a), Value::DoubleList(b)) => {
                a.len() == b.len() && a.iter().zip(b).all(|(x, y)| same_double(*x, *y))
            }
            (Value::StringList(a), Value::StringList(b)) => a == b,
            (Value::IdList(a), Value::IdList(b)) => a == b,
            (Value::AddressList(a), Value::AddressList(b)) => a == b,
            (Value::StringSet(a), Value::StringSet(b)) => a == b,
            (Value::IdSet(a), Value::IdSet(b)) => a == b,
            (Value::AddressSet(a), Value::AddressSet(b)) => a == b,
            _ => false,
        }
    }
}

impl Eq for Value {}

impl From<&str> for Value {
    fn from(value: &str) -> Self {
        Value::String(value.to_string())
    }
}

impl From<String> for Value {
    fn from(value: String) -> Self {
        Value::String(value)
    }
}

impl From<bool> for Value {
    fn from(value: bool) -> Self {
        Value::Boolean(value)
    }
}

impl From<i32> for Value {
    fn from(value: i32) -> Self {
        Value::Integer(value)
    }
}

impl From<i64> for Value {
    fn from(value: i64) -> Self {
        Value::Long(value)
    }
}

impl From<f64> for Value {
    fn from(value: f64) -> Self {
        Value::Double(value)
    }
}

impl From<Id> for Value {
    fn from(value: Id) -> Self {
        Value::Id(value)
    }
}

impl From<Address> for Value {
    fn from(value: Address) -> Self {
        Value::Address(value)
    }
}
