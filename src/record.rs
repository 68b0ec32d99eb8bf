//! Record base
//!
//! A [`Record`] is the shared machinery behind every Pohoda object: a
//! validated [`OptionBag`], the organization identifier it belongs to and the
//! static [`Schema`] of its type. Rendering walks the declared slots in
//! their fixed order and turns each present value into XML; absent slots
//! are skipped, so a schema can list every field the import format knows
//! while a record only carries the ones the caller filled in.

use crate::documents::Element;
use crate::error::{Error, Result};
use crate::namespaces::TYPE;
use crate::options::{normalize, OptionBag, OptionMap, OptionsResolver, Placement, Schema, SlotKind};
use crate::value::Value;
use indexmap::IndexMap;
use std::borrow::Cow;

/// Anything that renders into a Pohoda XML element
pub trait Agenda {
    /// The underlying record
    fn record(&self) -> &Record;

    /// Render the element for this object
    fn get_xml(&self) -> Result<Element> {
        Ok(self.record().to_element())
    }
}

/// Implement [`Agenda`] and the conversion into [`Record`] for wrapper
/// types holding their record in a `record` field
macro_rules! impl_agenda {
    ($($ty:ty),+ $(,)?) => {$(
        impl $crate::record::Agenda for $ty {
            fn record(&self) -> &$crate::record::Record {
                &self.record
            }
        }

        impl From<$ty> for $crate::record::Record {
            fn from(value: $ty) -> Self {
                value.record
            }
        }
    )+};
}

pub(crate) use impl_agenda;

/// Validated option data of one Pohoda object
#[derive(Debug, Clone, PartialEq)]
pub struct Record {
    schema: &'static Schema,
    tag: Cow<'static, str>,
    prefix: Cow<'static, str>,
    data: OptionBag,
    ico: String,
    sequences: IndexMap<String, i64>,
}

impl Record {
    /// Build a record of the given type
    ///
    /// With `resolve` set the options are checked against the schema and
    /// normalized; otherwise `data` is trusted as already validated, which
    /// is how composites nest field objects they built themselves.
    pub fn new(
        schema: &'static Schema,
        data: OptionMap,
        ico: impl Into<String>,
        resolve: bool,
    ) -> Result<Self> {
        let data = if resolve {
            OptionsResolver::from_schema(schema).resolve(data)?
        } else {
            OptionBag::from_map(data)
        };

        tracing::debug!(tag = schema.tag, options = data.len(), resolve, "record created");

        Ok(Self {
            schema,
            tag: Cow::Borrowed(schema.tag),
            prefix: Cow::Borrowed(schema.prefix),
            data,
            ico: ico.into(),
            sequences: IndexMap::new(),
        })
    }

    /// Override the element tag given by the schema
    pub fn with_tag(mut self, tag: impl Into<Cow<'static, str>>) -> Self {
        self.tag = tag.into();
        self
    }

    /// Override the prefix given to child elements
    pub fn with_prefix(mut self, prefix: impl Into<Cow<'static, str>>) -> Self {
        self.prefix = prefix.into();
        self
    }

    /// Schema of this record type
    pub fn schema(&self) -> &'static Schema {
        self.schema
    }

    /// Qualified element tag
    pub fn tag(&self) -> &str {
        &self.tag
    }

    /// Prefix of child elements
    pub fn prefix(&self) -> &str {
        &self.prefix
    }

    /// Organization identifier
    pub fn ico(&self) -> &str {
        &self.ico
    }

    /// Validated options
    pub fn data(&self) -> &OptionBag {
        &self.data
    }

    /// Value of one option
    pub fn get(&self, name: &str) -> Option<&Value> {
        self.data.get(name)
    }

    /// Nested record stored in a slot
    pub fn child(&self, slot: &str) -> Option<&Record> {
        self.data.get(slot).and_then(Value::as_record)
    }

    /// Mutable nested record stored in a slot
    pub fn child_mut(&mut self, slot: &str) -> Option<&mut Record> {
        self.data.get_mut(slot).and_then(Value::as_record_mut)
    }

    /// Number of items appended to a list slot
    pub fn count(&self, slot: &str) -> usize {
        self.data
            .get(slot)
            .and_then(Value::as_list)
            .map_or(0, <[Value]>::len)
    }

    /// Number the per-slot counter hands out next, starting at 1
    ///
    /// The counter only moves through [`Record::advance_sequence`], so
    /// explicitly numbered items do not consume values.
    pub fn next_sequence(&self, slot: &str) -> i64 {
        self.sequences.get(slot).copied().unwrap_or(0) + 1
    }

    /// Consume the current value of a per-slot counter
    pub fn advance_sequence(&mut self, slot: &str) {
        *self.sequences.entry(slot.to_string()).or_insert(0) += 1;
    }

    /// Set a declared slot, normalizing the value to the slot kind
    pub fn set(&mut self, slot: &str, value: impl Into<Value>) -> Result<()> {
        let kind = self.slot_kind(slot)?;
        let value = normalize(slot, kind, value.into())?;
        self.data.insert(slot, value);
        Ok(())
    }

    /// Append a record to a list slot, creating the list on first use
    pub fn add_child(&mut self, slot: &str, item: Record) -> Result<()> {
        let kind = self.slot_kind(slot)?;
        if kind != SlotKind::List {
            return Err(Error::invalid_type(slot, kind.name(), "list item"));
        }

        match self.data.get_mut(slot) {
            Some(Value::List(items)) => items.push(Value::from(item)),
            Some(other) => return Err(Error::invalid_type(slot, "list", other.kind_name())),
            None => {
                self.data.insert(slot, Value::List(vec![Value::from(item)]));
            }
        }

        tracing::debug!(tag = %self.tag, slot, items = self.count(slot), "child appended");
        Ok(())
    }

    fn slot_kind(&self, slot: &str) -> Result<SlotKind> {
        self.schema
            .slot(slot)
            .map(|def| def.kind)
            .ok_or_else(|| Error::UnknownOption {
                option: slot.to_string(),
                allowed: self.schema.slot_names().iter().map(|s| s.to_string()).collect(),
            })
    }

    /// Render this record as its own element with every declared slot
    pub fn to_element(&self) -> Element {
        self.render(&self.schema.slot_names(), &self.prefix)
    }

    /// Render the listed slots, in the given order, under this record's tag
    pub fn render(&self, slot_names: &[&str], prefix: &str) -> Element {
        let mut element = Element::new(&self.tag);
        self.render_into(&mut element, slot_names, prefix);
        element
    }

    /// Render the listed slots, in the given order, into `parent`
    ///
    /// Scalars become child elements, attributes or text content depending
    /// on the slot placement. A nested record appends its own element, a
    /// list is wrapped in `<prefix:slot>` with one element per item.
    pub fn render_into(&self, parent: &mut Element, slot_names: &[&str], prefix: &str) {
        for name in slot_names {
            let Some(value) = self.data.get(name) else {
                continue;
            };
            let def = self.schema.slot(name);
            let qualified = qualify(prefix, name);

            if def.map_or(false, |def| def.kind == SlotKind::Ref) {
                parent.add_child(render_ref(&qualified, value));
                continue;
            }

            match value {
                Value::Record(record) => parent.add_child(record.to_element()),
                Value::List(items) => {
                    let mut wrapper = Element::new(&qualified);
                    for item in items {
                        match item {
                            Value::Record(record) => wrapper.add_child(record.to_element()),
                            other => tracing::warn!(
                                slot = *name,
                                kind = other.kind_name(),
                                "skipping list item that is not a record"
                            ),
                        }
                    }
                    parent.add_child(wrapper);
                }
                Value::Map(_) => parent.add_child(render_ref(&qualified, value)),
                scalar => {
                    let text = scalar.to_text().unwrap_or_default();
                    match def.map_or(Placement::Element, |def| def.placement) {
                        Placement::Element => parent.add_child(Element::with_text(&qualified, text)),
                        Placement::Attribute => parent.set_attribute(*name, text),
                        Placement::Content => parent.set_text(text),
                    }
                }
            }
        }
    }
}

impl Agenda for Record {
    fn record(&self) -> &Record {
        self
    }
}

fn qualify(prefix: &str, name: &str) -> String {
    if prefix.is_empty() || name.contains(':') {
        name.to_string()
    } else {
        format!("{}:{}", prefix, name)
    }
}

/// `<name><typ:ids>v</typ:ids></name>`, or one `typ:key` child per map entry
fn render_ref(name: &str, value: &Value) -> Element {
    let mut element = Element::new(name);
    match value {
        Value::Map(map) => {
            for (key, item) in map {
                let text = item.to_text().unwrap_or_default();
                element.add_child(Element::with_text(&qualify(TYPE, key), text));
            }
        }
        scalar => {
            let text = scalar.to_text().unwrap_or_default();
            element.add_child(Element::with_text(&qualify(TYPE, "ids"), text));
        }
    }
    element
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::options;
    use crate::options::SlotDef;

    static ITEM: Schema = Schema {
        tag: "stk:item",
        prefix: "stk",
        slots: &[
            SlotDef::new("default", SlotKind::Bool).attribute(),
            SlotDef::string("code", 8).required(),
            SlotDef::new("storage", SlotKind::Ref),
            SlotDef::new("price", SlotKind::Float),
        ],
    };

    static BOX: Schema = Schema {
        tag: "stk:box",
        prefix: "stk",
        slots: &[
            SlotDef::new("main", SlotKind::Record),
            SlotDef::new("items", SlotKind::List),
            SlotDef::new("label", SlotKind::Int).content(),
        ],
    };

    fn item(code: &str) -> Record {
        Record::new(&ITEM, options! { "code" => code }, "12345678", true).unwrap()
    }

    #[test]
    fn test_new_resolves_options() {
        let err = Record::new(&ITEM, options! { "nope" => 1 }, "", true).unwrap_err();
        assert!(matches!(err, Error::UnknownOption { .. }));

        let err = Record::new(&ITEM, options! { "price" => 1 }, "", true).unwrap_err();
        assert!(matches!(err, Error::MissingRequiredOption { ref option } if option == "code"));
    }

    #[test]
    fn test_new_without_resolve_trusts_data() {
        let record = Record::new(&ITEM, options! { "price" => "cheap" }, "", false).unwrap();
        assert_eq!(record.get("price"), Some(&Value::from("cheap")));
    }

    #[test]
    fn test_render_placements() {
        let record = Record::new(
            &ITEM,
            options! { "code" => "A1", "default" => true, "storage" => "MAIN", "price" => 2.5 },
            "12345678",
            true,
        )
        .unwrap();

        let element = record.to_element();
        assert_eq!(element.qualified_name(), "stk:item");
        assert_eq!(element.get_attribute("default"), Some("true"));
        assert_eq!(element.children.len(), 3);
        assert_eq!(element.children[0].qualified_name(), "stk:code");
        assert_eq!(element.children[0].text.as_deref(), Some("A1"));

        let storage = &element.children[1];
        assert_eq!(storage.qualified_name(), "stk:storage");
        assert_eq!(storage.children[0].qualified_name(), "typ:ids");
        assert_eq!(storage.children[0].text.as_deref(), Some("MAIN"));

        assert_eq!(element.children[2].text.as_deref(), Some("2.5"));
    }

    #[test]
    fn test_render_ref_map() {
        let mut reference = OptionMap::new();
        reference.insert("id".to_string(), Value::from(7));
        reference.insert("ids".to_string(), Value::from("SKLAD"));
        let record = Record::new(
            &ITEM,
            options! { "code" => "A", "storage" => Value::Map(reference) },
            "",
            true,
        )
        .unwrap();

        let storage = record.to_element().find_child("storage").cloned().unwrap();
        let names: Vec<String> = storage.children.iter().map(Element::qualified_name).collect();
        assert_eq!(names, vec!["typ:id", "typ:ids"]);
    }

    #[test]
    fn test_add_child_preserves_order() {
        let mut parent = Record::new(&BOX, options!(), "", true).unwrap();
        for code in ["A", "B", "C"] {
            parent.add_child("items", item(code)).unwrap();
        }
        assert_eq!(parent.count("items"), 3);

        let element = parent.to_element();
        let wrapper = element.find_child("items").unwrap();
        let codes: Vec<&str> = wrapper
            .children
            .iter()
            .map(|child| child.find_child("code").unwrap().text.as_deref().unwrap())
            .collect();
        assert_eq!(codes, vec!["A", "B", "C"]);
    }

    #[test]
    fn test_add_child_rejects_unknown_and_scalar_slots() {
        let mut parent = Record::new(&BOX, options!(), "", true).unwrap();
        assert!(matches!(
            parent.add_child("nope", item("A")),
            Err(Error::UnknownOption { .. })
        ));
        assert!(matches!(
            parent.add_child("label", item("A")),
            Err(Error::InvalidValueType { .. })
        ));
    }

    #[test]
    fn test_nested_record_and_content() {
        let parent = Record::new(
            &BOX,
            options! { "main" => item("M"), "label" => 5 },
            "",
            true,
        )
        .unwrap();

        let element = parent.to_element();
        assert_eq!(element.text.as_deref(), Some("5"));
        assert_eq!(element.children.len(), 1);
        assert_eq!(element.children[0].qualified_name(), "stk:item");
        assert!(parent.child("main").is_some());
    }

    #[test]
    fn test_absent_slots_are_skipped() {
        let parent = Record::new(&BOX, options!(), "", true).unwrap();
        let element = parent.to_element();
        assert!(element.children.is_empty());
        assert!(element.text.is_none());
    }

    #[test]
    fn test_render_subset_in_given_order() {
        let record = Record::new(
            &ITEM,
            options! { "code" => "A", "price" => 1.5 },
            "",
            true,
        )
        .unwrap();
        let element = record.render(&["price", "code"], "typ");
        let names: Vec<String> = element.children.iter().map(Element::qualified_name).collect();
        assert_eq!(names, vec!["typ:price", "typ:code"]);
    }

    #[test]
    fn test_render_is_repeatable() {
        let mut parent = Record::new(&BOX, options!(), "", true).unwrap();
        parent.add_child("items", item("A")).unwrap();
        assert_eq!(parent.to_element(), parent.to_element());
    }

    #[test]
    fn test_sequences_are_per_slot() {
        let mut parent = Record::new(&BOX, options!(), "", true).unwrap();
        assert_eq!(parent.next_sequence("items"), 1);
        parent.advance_sequence("items");
        parent.advance_sequence("items");
        assert_eq!(parent.next_sequence("items"), 3);
        assert_eq!(parent.next_sequence("other"), 1);
    }

    #[test]
    fn test_set_normalizes() {
        let mut record = item("A");
        record.set("price", "12.30").unwrap();
        assert_eq!(record.get("price").unwrap().to_text().unwrap(), "12.3");
        assert!(record.set("price", true).is_err());
        assert!(record.set("unknown", 1).is_err());
    }
}
