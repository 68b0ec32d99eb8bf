//! Internal (Pohoda-defined) parameters of a stock card

use crate::error::{Error, Result};
use crate::options;
use crate::options::{OptionMap, OptionsResolver, Schema, SlotDef, SlotKind};
use crate::record::{impl_agenda, Record};

/// Accepted values of `intParameterType`
pub const INT_PARAMETER_TYPES: &[&str] = &[
    "textValue",
    "currencyValue",
    "booleanValue",
    "numberValue",
    "integerValue",
    "datetimeValue",
    "unit",
    "listValue",
];

static INT_PARAMETER: Schema = Schema {
    tag: "stk:intParameter",
    prefix: "stk",
    slots: &[
        SlotDef::new("intParameterID", SlotKind::Int).required(),
        SlotDef::new("intParameterType", SlotKind::Choice(INT_PARAMETER_TYPES)).required(),
        SlotDef::new("intParameterValues", SlotKind::Record),
    ],
};

static INT_PARAMETER_VALUES: Schema = Schema {
    tag: "stk:intParameterValues",
    prefix: "stk",
    slots: &[SlotDef::new("intParameterValue", SlotKind::Record)],
};

static INT_PARAMETER_VALUE: Schema = Schema {
    tag: "stk:intParameterValue",
    prefix: "stk",
    slots: &[SlotDef::text("parameterValue").required()],
};

/// Value of one internal parameter
#[derive(Debug, Clone, PartialEq)]
pub struct IntParameter {
    record: Record,
}

impl IntParameter {
    /// Create from `intParameterID`, `intParameterType` and `value`
    ///
    /// The value is nested as
    /// `intParameterValues/intParameterValue/parameterValue`.
    pub fn new(data: OptionMap, ico: impl Into<String>) -> Result<Self> {
        let ico = ico.into();
        let resolver = OptionsResolver::new()
            .set_required(&["intParameterID", "intParameterType", "value"])
            .set_kind("intParameterID", SlotKind::Int)
            .set_kind("intParameterType", SlotKind::Choice(INT_PARAMETER_TYPES))
            .set_kind("value", SlotKind::String(None));
        let mut bag = resolver.resolve(data)?;

        let value = bag.remove("value").ok_or_else(|| Error::missing("value"))?;
        let value = Record::new(
            &INT_PARAMETER_VALUE,
            options! { "parameterValue" => value },
            ico.clone(),
            false,
        )?;
        let values = Record::new(
            &INT_PARAMETER_VALUES,
            options! { "intParameterValue" => value },
            ico.clone(),
            false,
        )?;

        let mut data = bag.into_inner();
        data.insert("intParameterValues".to_string(), values.into());
        Ok(Self {
            record: Record::new(&INT_PARAMETER, data, ico, false)?,
        })
    }
}

impl_agenda!(IntParameter);

#[cfg(test)]
mod tests {
    use super::*;
    use crate::record::Agenda;

    #[test]
    fn test_int_parameter_nesting() {
        let parameter = IntParameter::new(
            options! { "intParameterID" => 5, "intParameterType" => "numberValue", "value" => 12.5 },
            "",
        )
        .unwrap();

        let element = parameter.get_xml().unwrap();
        assert_eq!(element.qualified_name(), "stk:intParameter");
        let names: Vec<String> = element.children.iter().map(|c| c.qualified_name()).collect();
        assert_eq!(
            names,
            vec!["stk:intParameterID", "stk:intParameterType", "stk:intParameterValues"]
        );

        let value = element
            .find_child("intParameterValues")
            .and_then(|e| e.find_child("intParameterValue"))
            .and_then(|e| e.find_child("parameterValue"))
            .unwrap();
        assert_eq!(value.text.as_deref(), Some("12.5"));
    }

    #[test]
    fn test_int_parameter_requires_all_options() {
        let err = IntParameter::new(options! { "intParameterID" => 5, "value" => "x" }, "")
            .unwrap_err();
        assert!(matches!(err, Error::MissingRequiredOption { ref option } if option == "intParameterType"));
    }

    #[test]
    fn test_int_parameter_type_is_checked() {
        let err = IntParameter::new(
            options! { "intParameterID" => 5, "intParameterType" => "colour", "value" => "x" },
            "",
        )
        .unwrap_err();
        assert!(matches!(err, Error::InvalidValue { .. }));
    }
}
