//! Option values
//!
//! A [`Value`] is what a record slot holds: a scalar, a map of scalars (for
//! reference elements and filters), a single nested record, or an ordered
//! list of records.

use crate::error::{Error, Result};
use crate::options::OptionMap;
use crate::record::Record;
use chrono::NaiveDate;
use indexmap::IndexMap;
use rust_decimal::Decimal;
use serde_json::Value as JsonValue;

/// Value stored under an option name
#[derive(Debug, Clone, PartialEq)]
pub enum Value {
    /// Text
    Text(String),
    /// Integer
    Int(i64),
    /// Floating point number
    Float(f64),
    /// Exact decimal number
    Decimal(Decimal),
    /// Boolean
    Bool(bool),
    /// Calendar date
    Date(NaiveDate),
    /// Named scalars, used by reference elements and filters
    Map(IndexMap<String, Value>),
    /// Single nested record
    Record(Box<Record>),
    /// Ordered list of records
    List(Vec<Value>),
}

impl Value {
    /// Short name of the variant, used in error messages
    pub fn kind_name(&self) -> &'static str {
        match self {
            Value::Text(_) => "text",
            Value::Int(_) => "int",
            Value::Float(_) => "float",
            Value::Decimal(_) => "decimal",
            Value::Bool(_) => "bool",
            Value::Date(_) => "date",
            Value::Map(_) => "map",
            Value::Record(_) => "record",
            Value::List(_) => "list",
        }
    }

    /// Whether this is a scalar (renders as a single text node)
    pub fn is_scalar(&self) -> bool {
        !matches!(self, Value::Map(_) | Value::Record(_) | Value::List(_))
    }

    /// Text form of a scalar value, `None` for maps, records and lists
    pub fn to_text(&self) -> Option<String> {
        match self {
            Value::Text(s) => Some(s.clone()),
            Value::Int(i) => Some(i.to_string()),
            Value::Float(f) => Some(f.to_string()),
            Value::Decimal(d) => Some(d.normalize().to_string()),
            Value::Bool(b) => Some(if *b { "true" } else { "false" }.to_string()),
            Value::Date(d) => Some(d.format("%Y-%m-%d").to_string()),
            Value::Map(_) | Value::Record(_) | Value::List(_) => None,
        }
    }

    /// Borrow the nested record, if this is one
    pub fn as_record(&self) -> Option<&Record> {
        match self {
            Value::Record(record) => Some(record),
            _ => None,
        }
    }

    /// Mutably borrow the nested record, if this is one
    pub fn as_record_mut(&mut self) -> Option<&mut Record> {
        match self {
            Value::Record(record) => Some(record),
            _ => None,
        }
    }

    /// Borrow the list items, if this is a list
    pub fn as_list(&self) -> Option<&[Value]> {
        match self {
            Value::List(items) => Some(items),
            _ => None,
        }
    }
}

impl From<&str> for Value {
    fn from(value: &str) -> Self {
        Value::Text(value.to_string())
    }
}

impl From<String> for Value {
    fn from(value: String) -> Self {
        Value::Text(value)
    }
}

impl From<i64> for Value {
    fn from(value: i64) -> Self {
        Value::Int(value)
    }
}

impl From<i32> for Value {
    fn from(value: i32) -> Self {
        Value::Int(value.into())
    }
}

impl From<u32> for Value {
    fn from(value: u32) -> Self {
        Value::Int(value.into())
    }
}

impl From<f64> for Value {
    fn from(value: f64) -> Self {
        Value::Float(value)
    }
}

impl From<Decimal> for Value {
    fn from(value: Decimal) -> Self {
        Value::Decimal(value)
    }
}

impl From<bool> for Value {
    fn from(value: bool) -> Self {
        Value::Bool(value)
    }
}

impl From<NaiveDate> for Value {
    fn from(value: NaiveDate) -> Self {
        Value::Date(value)
    }
}

impl From<Record> for Value {
    fn from(value: Record) -> Self {
        Value::Record(Box::new(value))
    }
}

impl From<IndexMap<String, Value>> for Value {
    fn from(value: IndexMap<String, Value>) -> Self {
        Value::Map(value)
    }
}

impl From<Vec<Value>> for Value {
    fn from(value: Vec<Value>) -> Self {
        Value::List(value)
    }
}

impl TryFrom<JsonValue> for Value {
    type Error = Error;

    fn try_from(json: JsonValue) -> Result<Self> {
        match json {
            JsonValue::Null => Err(Error::invalid_type("<json>", "value", "null")),
            JsonValue::Bool(b) => Ok(Value::Bool(b)),
            JsonValue::Number(n) => match n.as_i64() {
                Some(i) => Ok(Value::Int(i)),
                None => n
                    .as_f64()
                    .map(Value::Float)
                    .ok_or_else(|| Error::invalid_type("<json>", "number", n.to_string())),
            },
            JsonValue::String(s) => Ok(Value::Text(s)),
            JsonValue::Array(items) => items
                .into_iter()
                .map(Value::try_from)
                .collect::<Result<Vec<_>>>()
                .map(Value::List),
            JsonValue::Object(map) => Ok(Value::Map(options_from_json(JsonValue::Object(map))?)),
        }
    }
}

/// Convert a JSON object into an option mapping
///
/// `null` members are dropped, so they behave like absent options.
pub fn options_from_json(json: JsonValue) -> Result<OptionMap> {
    let JsonValue::Object(map) = json else {
        return Err(Error::invalid_type("<json>", "object", json_kind(&json)));
    };

    let mut options = OptionMap::new();
    for (key, value) in map {
        if value.is_null() {
            continue;
        }
        options.insert(key, Value::try_from(value)?);
    }
    Ok(options)
}

fn json_kind(json: &JsonValue) -> &'static str {
    match json {
        JsonValue::Null => "null",
        JsonValue::Bool(_) => "bool",
        JsonValue::Number(_) => "number",
        JsonValue::String(_) => "string",
        JsonValue::Array(_) => "array",
        JsonValue::Object(_) => "object",
    }
}

/// Build an [`OptionMap`] from `key => value` pairs
///
/// ```
/// use pohoda_xml::options;
///
/// let data = options! { "code" => "A-100", "sellingPrice" => 120.5 };
/// assert_eq!(data.len(), 2);
/// ```
#[macro_export]
macro_rules! options {
    () => { $crate::options::OptionMap::new() };
    ($($key:expr => $value:expr),+ $(,)?) => {{
        let mut map = $crate::options::OptionMap::new();
        $( map.insert(::std::string::String::from($key), $crate::value::Value::from($value)); )+
        map
    }};
}
