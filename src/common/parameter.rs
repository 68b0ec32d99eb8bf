//! User-defined parameters (`typ:parameter`)
//!
//! Pohoda stores user fields under names starting with `VPr`; the prefix is
//! added when the caller leaves it out.

use crate::error::{Error, Result};
use crate::names::validate_ncname;
use crate::options::{OptionMap, Schema, SlotDef, SlotKind};
use crate::record::{impl_agenda, Record};
use crate::value::Value;

/// Accepted parameter types
pub const PARAMETER_TYPES: &[&str] = &[
    "text", "memo", "currency", "boolean", "number", "datetime", "integer", "list",
];

static PARAMETER: Schema = Schema {
    tag: "typ:parameter",
    prefix: "typ",
    slots: &[
        SlotDef::text("name").required(),
        SlotDef::text("textValue"),
        SlotDef::text("memoValue"),
        SlotDef::new("currencyValue", SlotKind::Float),
        SlotDef::new("booleanValue", SlotKind::Bool),
        SlotDef::new("numberValue", SlotKind::Float),
        SlotDef::new("datetimeValue", SlotKind::Date),
        SlotDef::new("integerValue", SlotKind::Int),
        SlotDef::new("listValueRef", SlotKind::Ref),
        SlotDef::new("list", SlotKind::Ref),
    ],
};

/// A user-defined parameter value
#[derive(Debug, Clone, PartialEq)]
pub struct Parameter {
    record: Record,
}

impl Parameter {
    /// Create a parameter of the given type
    ///
    /// `list` names the user list a `list` parameter draws from and is
    /// rejected for other types.
    pub fn new(
        name: &str,
        kind: &str,
        value: impl Into<Value>,
        list: Option<Value>,
        ico: impl Into<String>,
    ) -> Result<Self> {
        if !PARAMETER_TYPES.contains(&kind) {
            return Err(Error::invalid_value(
                "type",
                format!("'{}' is not one of: {}", kind, PARAMETER_TYPES.join(", ")),
            ));
        }

        let name = if name.starts_with("VPr") {
            name.to_string()
        } else {
            format!("VPr{}", name)
        };
        validate_ncname(&name)?;

        let mut data = OptionMap::new();
        data.insert("name".to_string(), Value::Text(name));
        if kind == "list" {
            data.insert("listValueRef".to_string(), value.into());
            if let Some(list) = list {
                data.insert("list".to_string(), list);
            }
        } else {
            if list.is_some() {
                return Err(Error::invalid_value(
                    "list",
                    "only list parameters reference a user list",
                ));
            }
            data.insert(format!("{}Value", kind), value.into());
        }

        Ok(Self {
            record: Record::new(&PARAMETER, data, ico, true)?,
        })
    }
}

impl_agenda!(Parameter);

#[cfg(test)]
mod tests {
    use super::*;
    use crate::record::Agenda;

    #[test]
    fn test_parameter_name_prefix() {
        let element = Parameter::new("Colour", "text", "red", None, "")
            .unwrap()
            .get_xml()
            .unwrap();
        assert_eq!(element.qualified_name(), "typ:parameter");
        assert_eq!(element.children[0].text.as_deref(), Some("VPrColour"));
        assert_eq!(element.children[1].qualified_name(), "typ:textValue");
        assert_eq!(element.children[1].text.as_deref(), Some("red"));

        let kept = Parameter::new("VPrSize", "integer", 3, None, "")
            .unwrap()
            .get_xml()
            .unwrap();
        assert_eq!(kept.children[0].text.as_deref(), Some("VPrSize"));
        assert_eq!(kept.children[1].qualified_name(), "typ:integerValue");
    }

    #[test]
    fn test_list_parameter() {
        let element = Parameter::new("Material", "list", "Oak", Some(Value::from("Woods")), "")
            .unwrap()
            .get_xml()
            .unwrap();
        let names: Vec<String> = element.children.iter().map(|c| c.qualified_name()).collect();
        assert_eq!(names, vec!["typ:name", "typ:listValueRef", "typ:list"]);
        assert_eq!(element.children[1].children[0].qualified_name(), "typ:ids");
        assert_eq!(element.children[1].children[0].text.as_deref(), Some("Oak"));
    }

    #[test]
    fn test_parameter_value_types() {
        assert!(Parameter::new("Flag", "boolean", "maybe", None, "").is_err());
        assert!(Parameter::new("When", "datetime", "2024-02-01", None, "").is_ok());
        assert!(matches!(
            Parameter::new("X", "colour", "red", None, ""),
            Err(Error::InvalidValue { .. })
        ));
        assert!(matches!(
            Parameter::new("X", "text", "red", Some(Value::from("L")), ""),
            Err(Error::InvalidValue { .. })
        ));
        assert!(matches!(
            Parameter::new("bad name", "text", "red", None, ""),
            Err(Error::Name(_))
        ));
    }
}
