// used for numeric values of arbitrary precision
use bigdecimal::BigDecimal;

// used when parsing a float to a BigDecimal
use std::str::FromStr;
// used to print out readable forms of a value
use std::fmt;
// attribute data is kept sorted so that printed forms are stable
use std::collections::BTreeMap;
// hashmaps and hashsets where order does not matter use seahash
use core::hash::BuildHasherDefault;
use seahash::SeaHasher;

use crate::error::{FramelogicError, Result};

pub type OtherHasher = BuildHasherDefault<SeaHasher>;

/// A scalar held by an attribute of a concept instance.
///
/// Numbers are decimals, so `90` and `90.0` are the same value and hash alike,
/// which lets numbers take part in enumerations next to text and booleans.
#[derive(PartialEq, Eq, PartialOrd, Ord, Hash, Clone, Debug)]
pub enum Value {
    Number(BigDecimal),
    Text(String),
    Boolean(bool),
}

impl Value {
    pub fn as_number(&self) -> Option<&BigDecimal> {
        match self {
            Value::Number(n) => Some(n),
            _ => None,
        }
    }
    pub fn as_text(&self) -> Option<&str> {
        match self {
            Value::Text(s) => Some(s),
            _ => None,
        }
    }
    pub fn as_boolean(&self) -> Option<bool> {
        match self {
            Value::Boolean(b) => Some(*b),
            _ => None,
        }
    }
    pub fn data_type(&self) -> &'static str {
        match self {
            Value::Number(_) => "Number",
            Value::Text(_) => "Text",
            Value::Boolean(_) => "Boolean",
        }
    }
}

impl fmt::Display for Value {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            Value::Number(n) => write!(f, "{}", n),
            Value::Text(s) => write!(f, "\"{}\"", s),
            Value::Boolean(b) => write!(f, "{}", b),
        }
    }
}

impl From<i32> for Value {
    fn from(n: i32) -> Self { Value::Number(BigDecimal::from(n)) }
}
impl From<i64> for Value {
    fn from(n: i64) -> Self { Value::Number(BigDecimal::from(n)) }
}
impl From<u32> for Value {
    fn from(n: u32) -> Self { Value::Number(BigDecimal::from(n)) }
}
impl From<u64> for Value {
    fn from(n: u64) -> Self { Value::Number(BigDecimal::from(n)) }
}
impl From<BigDecimal> for Value {
    fn from(n: BigDecimal) -> Self { Value::Number(n) }
}
impl From<&str> for Value {
    fn from(s: &str) -> Self { Value::Text(s.to_owned()) }
}
impl From<String> for Value {
    fn from(s: String) -> Self { Value::Text(s) }
}
impl From<bool> for Value {
    fn from(b: bool) -> Self { Value::Boolean(b) }
}
impl TryFrom<f64> for Value {
    type Error = FramelogicError;
    fn try_from(n: f64) -> Result<Self> {
        decimal(n).map(Value::Number)
    }
}

/// Converts a float to a decimal, rejecting NaN and the infinities.
pub fn decimal(n: f64) -> Result<BigDecimal> {
    if !n.is_finite() {
        return Err(FramelogicError::InvalidNumber(n.to_string()));
    }
    BigDecimal::from_str(&n.to_string()).map_err(|e| FramelogicError::InvalidNumber(e.to_string()))
}

/// The data carried by a concept instance: attribute name to value.
pub type Attributes = BTreeMap<String, Value>;

/// Builds an [`Attributes`] mapping, converting every value with `Value::from`.
///
/// ```
/// use framelogic::attributes;
/// let data = attributes! { "protocol" => "ZigBee", "battery" => 90 };
/// assert_eq!(data.len(), 2);
/// ```
#[macro_export]
macro_rules! attributes {
    () => {
        $crate::datatype::Attributes::new()
    };
    ($($key:expr => $value:expr),+ $(,)?) => {{
        let mut attributes = $crate::datatype::Attributes::new();
        $(
            attributes.insert(::std::string::String::from($key), $crate::datatype::Value::from($value));
        )+
        attributes
    }};
}

pub(crate) fn render_attributes(attributes: &Attributes) -> String {
    let mut s = String::new();
    for (key, value) in attributes {
        s += &format!("{}: {}, ", key, value);
    }
    s.truncate(s.len().saturating_sub(2));
    format!("{{{}}}", s)
}
