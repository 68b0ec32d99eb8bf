//! Option resolution
//!
//! Every record type declares a static [`Schema`]: its element tag, the
//! namespace prefix of its children and an ordered list of [`SlotDef`]s.
//! The slot list doubles as the allow-list for input options and as the
//! fixed order in which the record renders.
//!
//! [`OptionsResolver`] checks an input mapping against the allow-list and
//! the required names, then coerces each value to the kind its slot
//! declares.

use crate::error::{Error, Result};
use crate::value::Value;
use chrono::NaiveDate;
use indexmap::IndexMap;
use rust_decimal::Decimal;
use std::collections::HashSet;

/// Raw option mapping as given by callers
pub type OptionMap = IndexMap<String, Value>;

/// Kind of value a slot accepts
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SlotKind {
    /// Text, optionally truncated to a maximum number of characters
    String(Option<usize>),
    /// Integer
    Int,
    /// Number (float or decimal)
    Float,
    /// Boolean
    Bool,
    /// Date in `YYYY-MM-DD` form
    Date,
    /// Text restricted to a fixed set of values
    Choice(&'static [&'static str]),
    /// Reference to another Pohoda object (`typ:ids` or a map of `typ:*` keys)
    Ref,
    /// Single nested record
    Record,
    /// Ordered list of records
    List,
}

impl SlotKind {
    /// Name used in error messages
    pub fn name(&self) -> &'static str {
        match self {
            SlotKind::String(_) => "string",
            SlotKind::Int => "int",
            SlotKind::Float => "float",
            SlotKind::Bool => "bool",
            SlotKind::Date => "date",
            SlotKind::Choice(_) => "choice",
            SlotKind::Ref => "reference",
            SlotKind::Record => "record",
            SlotKind::List => "list",
        }
    }
}

/// Where a scalar slot ends up in the rendered element
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Placement {
    /// Child element `<prefix:name>`
    Element,
    /// Attribute on the record's own element
    Attribute,
    /// Text content of the record's own element
    Content,
}

/// A named, typed position in a record's declared order
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SlotDef {
    /// Option and element name
    pub name: &'static str,
    /// Accepted value kind
    pub kind: SlotKind,
    /// Rendering placement
    pub placement: Placement,
    /// Whether the option must be present
    pub required: bool,
}

impl SlotDef {
    /// Optional slot rendered as a child element
    pub const fn new(name: &'static str, kind: SlotKind) -> Self {
        Self {
            name,
            kind,
            placement: Placement::Element,
            required: false,
        }
    }

    /// Text slot with a maximum length
    pub const fn string(name: &'static str, max_len: usize) -> Self {
        Self::new(name, SlotKind::String(Some(max_len)))
    }

    /// Text slot without a length limit
    pub const fn text(name: &'static str) -> Self {
        Self::new(name, SlotKind::String(None))
    }

    /// Mark the slot as required
    pub const fn required(mut self) -> Self {
        self.required = true;
        self
    }

    /// Render the slot as an attribute of the record element
    pub const fn attribute(mut self) -> Self {
        self.placement = Placement::Attribute;
        self
    }

    /// Render the slot as the text content of the record element
    pub const fn content(mut self) -> Self {
        self.placement = Placement::Content;
        self
    }
}

/// Static description of a record type
#[derive(Debug, PartialEq, Eq)]
pub struct Schema {
    /// Qualified tag of the record element, e.g. `stk:stockHeader`
    pub tag: &'static str,
    /// Prefix given to child elements
    pub prefix: &'static str,
    /// Declared slots in render order
    pub slots: &'static [SlotDef],
}

impl Schema {
    /// Find a slot by name
    pub fn slot(&self, name: &str) -> Option<&SlotDef> {
        self.slots.iter().find(|slot| slot.name == name)
    }

    /// Names of all declared slots, in render order
    pub fn slot_names(&self) -> Vec<&'static str> {
        self.slots.iter().map(|slot| slot.name).collect()
    }

    /// Names of the required slots, in render order
    pub fn required_names(&self) -> Vec<&'static str> {
        self.slots
            .iter()
            .filter(|slot| slot.required)
            .map(|slot| slot.name)
            .collect()
    }
}

/// Validated mapping of slot name to value
#[derive(Debug, Clone, Default, PartialEq)]
pub struct OptionBag {
    values: OptionMap,
}

impl OptionBag {
    /// Wrap a mapping without checking it
    pub fn from_map(values: OptionMap) -> Self {
        Self { values }
    }

    /// Value of an option
    pub fn get(&self, name: &str) -> Option<&Value> {
        self.values.get(name)
    }

    /// Mutable value of an option
    pub fn get_mut(&mut self, name: &str) -> Option<&mut Value> {
        self.values.get_mut(name)
    }

    /// Set an option, returning the previous value
    pub fn insert(&mut self, name: impl Into<String>, value: impl Into<Value>) -> Option<Value> {
        self.values.insert(name.into(), value.into())
    }

    /// Remove an option
    pub fn remove(&mut self, name: &str) -> Option<Value> {
        self.values.shift_remove(name)
    }

    /// Whether an option is set
    pub fn contains(&self, name: &str) -> bool {
        self.values.contains_key(name)
    }

    /// Iterate over the options in insertion order
    pub fn iter(&self) -> impl Iterator<Item = (&str, &Value)> {
        self.values.iter().map(|(k, v)| (k.as_str(), v))
    }

    /// Number of options set
    pub fn len(&self) -> usize {
        self.values.len()
    }

    /// Whether no option is set
    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }

    /// Unwrap into the underlying mapping
    pub fn into_inner(self) -> OptionMap {
        self.values
    }
}

/// Check `input` against an allow-list and a list of required names
///
/// Unknown keys are reported in input order, missing ones in the order of
/// `required`. The input is returned unchanged.
pub fn validate(allowed: &[&str], required: &[&str], input: OptionMap) -> Result<OptionBag> {
    let defined: HashSet<&str> = allowed.iter().copied().collect();

    if let Some(unknown) = input.keys().find(|key| !defined.contains(key.as_str())) {
        return Err(Error::UnknownOption {
            option: unknown.clone(),
            allowed: allowed.iter().map(|name| name.to_string()).collect(),
        });
    }

    if let Some(missing) = required.iter().find(|name| !input.contains_key(**name)) {
        return Err(Error::missing(*missing));
    }

    Ok(OptionBag::from_map(input))
}

/// Allow-list based option validator
#[derive(Debug, Clone, Default)]
pub struct OptionsResolver {
    defined: Vec<&'static str>,
    required: Vec<&'static str>,
    kinds: IndexMap<&'static str, SlotKind>,
}

impl OptionsResolver {
    /// Create a resolver that accepts nothing
    pub fn new() -> Self {
        Self::default()
    }

    /// Resolver for a record schema: all slots defined, flagged slots
    /// required, values normalized to the slot kinds
    pub fn from_schema(schema: &Schema) -> Self {
        let mut resolver = Self::new()
            .set_defined(&schema.slot_names())
            .set_required(&schema.required_names());
        for slot in schema.slots {
            resolver.kinds.insert(slot.name, slot.kind);
        }
        resolver
    }

    /// Declare accepted option names
    pub fn set_defined(mut self, names: &[&'static str]) -> Self {
        for name in names {
            if !self.defined.contains(name) {
                self.defined.push(name);
            }
        }
        self
    }

    /// Declare required option names; they are also defined
    pub fn set_required(mut self, names: &[&'static str]) -> Self {
        self = self.set_defined(names);
        for name in names {
            if !self.required.contains(name) {
                self.required.push(name);
            }
        }
        self
    }

    /// Declare the kind a value must be normalized to
    pub fn set_kind(mut self, name: &'static str, kind: SlotKind) -> Self {
        self = self.set_defined(&[name]);
        self.kinds.insert(name, kind);
        self
    }

    /// Whether the option name is accepted
    pub fn is_defined(&self, name: &str) -> bool {
        self.defined.iter().any(|defined| *defined == name)
    }

    /// Whether the option name is required
    pub fn is_required(&self, name: &str) -> bool {
        self.required.iter().any(|required| *required == name)
    }

    /// Validate the keys of `input` and normalize its values
    pub fn resolve(&self, input: OptionMap) -> Result<OptionBag> {
        let bag = validate(&self.defined, &self.required, input)?;

        let mut values = bag.into_inner();
        for (name, value) in values.iter_mut() {
            if let Some(kind) = self.kinds.get(name.as_str()) {
                let raw = std::mem::replace(value, Value::Bool(false));
                *value = normalize(name, *kind, raw)?;
            }
        }

        tracing::trace!(options = values.len(), "options resolved");
        Ok(OptionBag::from_map(values))
    }
}

/// Coerce a value to the kind declared for its slot
pub fn normalize(option: &str, kind: SlotKind, value: Value) -> Result<Value> {
    let mismatch = |value: &Value| Error::invalid_type(option, kind.name(), value.kind_name());

    match kind {
        SlotKind::String(max_len) => {
            let text = match &value {
                Value::Record(_) | Value::List(_) | Value::Map(_) => return Err(mismatch(&value)),
                scalar => scalar.to_text().ok_or_else(|| mismatch(scalar))?,
            };
            Ok(Value::Text(match max_len {
                Some(max) if text.chars().count() > max => text.chars().take(max).collect(),
                _ => text,
            }))
        }
        SlotKind::Int => match value {
            Value::Int(_) => Ok(value),
            Value::Text(ref text) => text
                .trim()
                .parse::<i64>()
                .map(Value::Int)
                .map_err(|_| mismatch(&value)),
            other => Err(mismatch(&other)),
        },
        SlotKind::Float => match value {
            Value::Float(f) if !f.is_finite() => {
                Err(Error::invalid_value(option, format!("{} is not a finite number", f)))
            }
            Value::Float(_) | Value::Decimal(_) => Ok(value),
            Value::Int(i) => Ok(Value::Float(i as f64)),
            Value::Text(ref text) => text
                .trim()
                .parse::<Decimal>()
                .map(Value::Decimal)
                .map_err(|_| mismatch(&value)),
            other => Err(mismatch(&other)),
        },
        SlotKind::Bool => match value {
            Value::Bool(_) => Ok(value),
            Value::Int(0) => Ok(Value::Bool(false)),
            Value::Int(1) => Ok(Value::Bool(true)),
            Value::Text(ref text) if text == "true" => Ok(Value::Bool(true)),
            Value::Text(ref text) if text == "false" => Ok(Value::Bool(false)),
            other => Err(mismatch(&other)),
        },
        SlotKind::Date => match value {
            Value::Date(_) => Ok(value),
            Value::Text(ref text) => NaiveDate::parse_from_str(text.trim(), "%Y-%m-%d")
                .map(Value::Date)
                .map_err(|e| Error::invalid_value(option, format!("'{}': {}", text, e))),
            other => Err(mismatch(&other)),
        },
        SlotKind::Choice(allowed) => match value {
            Value::Text(ref text) if allowed.contains(&text.as_str()) => Ok(value),
            Value::Text(text) => Err(Error::invalid_value(
                option,
                format!("'{}' is not one of: {}", text, allowed.join(", ")),
            )),
            other => Err(mismatch(&other)),
        },
        SlotKind::Ref => match value {
            Value::Text(_) | Value::Int(_) => Ok(value),
            Value::Map(ref map) if map.values().all(Value::is_scalar) => Ok(value),
            Value::Map(_) => Err(Error::invalid_value(
                option,
                "reference maps hold scalar values only",
            )),
            other => Err(mismatch(&other)),
        },
        SlotKind::Record => match value {
            Value::Record(_) => Ok(value),
            other => Err(mismatch(&other)),
        },
        SlotKind::List => match value {
            Value::List(ref items) => match items.iter().find(|item| item.as_record().is_none()) {
                Some(item) => Err(mismatch(item)),
                None => Ok(value),
            },
            other => Err(mismatch(&other)),
        },
    }
}
