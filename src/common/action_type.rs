//! Action type marker
//!
//! An import document creates a new object by default. The action type
//! element switches it to update or delete an existing object picked by a
//! filter, or to "add, or update when it already exists".

use crate::error::{Error, Result};
use crate::names::validate_ncname;
use crate::namespaces;
use crate::options::{OptionMap, Schema, SlotDef, SlotKind};
use crate::record::{impl_agenda, Record};
use crate::value::Value;

/// Accepted action types
pub const ACTION_TYPES: &[&str] = &["add", "add/update", "update", "delete"];

static ACTION_TYPE: Schema = Schema {
    tag: "actionType",
    prefix: "",
    slots: &[
        SlotDef::new("add", SlotKind::Record),
        SlotDef::new("update", SlotKind::Record),
        SlotDef::new("delete", SlotKind::Record),
    ],
};

static ACTION: Schema = Schema {
    tag: "add",
    prefix: "",
    slots: &[
        SlotDef::new("update", SlotKind::Bool).attribute(),
        SlotDef::new("filter", SlotKind::Record),
    ],
};

static FILTER: Schema = Schema {
    tag: "ftr:filter",
    prefix: "ftr",
    slots: &[
        SlotDef::new("id", SlotKind::Int),
        SlotDef::string("code", 64),
        SlotDef::string("EAN", 20),
        SlotDef::new("PLU", SlotKind::Int),
        SlotDef::string("name", 90),
        SlotDef::new("storage", SlotKind::Ref),
        SlotDef::new("internet", SlotKind::Bool),
        SlotDef::new("lastChanges", SlotKind::Date),
    ],
};

/// Action type element of an agenda
#[derive(Debug, Clone, PartialEq)]
pub struct ActionType {
    record: Record,
}

impl ActionType {
    /// Create an action type rendered under `prefix` (`stk:actionType`)
    ///
    /// `update` and `delete` need a filter selecting the target object.
    /// `agenda` renames the filter element (`ftr:{agenda}`) where the import
    /// format expects a specific one.
    pub fn new(
        action: &str,
        filter: Option<OptionMap>,
        agenda: Option<&str>,
        prefix: &'static str,
        ico: impl Into<String>,
    ) -> Result<Self> {
        let ico = ico.into();
        let (element, update) = match action {
            "add/update" => ("add", true),
            "add" | "update" | "delete" => (action, false),
            other => {
                return Err(Error::invalid_value(
                    "type",
                    format!("'{}' is not one of: {}", other, ACTION_TYPES.join(", ")),
                ))
            }
        };

        if element != "add" && filter.is_none() {
            return Err(Error::missing("filter"));
        }

        let mut action_data = OptionMap::new();
        if update {
            action_data.insert("update".to_string(), Value::Bool(true));
        }
        if let Some(filter) = filter {
            let tag = match agenda {
                Some(agenda) => {
                    validate_ncname(agenda)?;
                    format!("{}:{}", namespaces::FILTER, agenda)
                }
                None => FILTER.tag.to_string(),
            };
            let filter = Record::new(&FILTER, filter, ico.clone(), true)?.with_tag(tag);
            action_data.insert("filter".to_string(), filter.into());
        }

        let action_record = Record::new(&ACTION, action_data, ico.clone(), false)?
            .with_tag(format!("{}:{}", prefix, element))
            .with_prefix(prefix);

        let mut data = OptionMap::new();
        data.insert(element.to_string(), action_record.into());
        let record = Record::new(&ACTION_TYPE, data, ico, false)?
            .with_tag(format!("{}:actionType", prefix))
            .with_prefix(prefix);

        Ok(Self { record })
    }
}

impl_agenda!(ActionType);
