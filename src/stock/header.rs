//! Stock card header
//!
//! The header is the stock card itself. Pictures, categories, related
//! links and parameters hang off it as ordered lists.

use crate::common::Parameter;
use crate::error::Result;
use crate::options::{OptionMap, Schema, SlotDef, SlotKind};
use crate::record::{impl_agenda, Record};
use crate::value::Value;

use super::int_parameter::IntParameter;
use super::picture::{Category, Picture, RelatedLink};

const STOCK_TYPES: &[&str] = &["card", "text", "service", "package", "set", "product"];
const VAT_RATES: &[&str] = &["none", "third", "low", "high"];
const GUARANTEE_TYPES: &[&str] = &["none", "hour", "day", "month", "year", "life"];

static HEADER: Schema = Schema {
    tag: "stk:stockHeader",
    prefix: "stk",
    slots: &[
        SlotDef::new("stockType", SlotKind::Choice(STOCK_TYPES)),
        SlotDef::string("code", 64),
        SlotDef::string("EAN", 20),
        SlotDef::new("PLU", SlotKind::Int),
        SlotDef::new("isSales", SlotKind::Bool),
        SlotDef::new("isSerialNumber", SlotKind::Bool),
        SlotDef::new("isInternet", SlotKind::Bool),
        SlotDef::new("isBatch", SlotKind::Bool),
        SlotDef::new("purchasingRateVAT", SlotKind::Choice(VAT_RATES)),
        SlotDef::new("sellingRateVAT", SlotKind::Choice(VAT_RATES)),
        SlotDef::string("name", 90),
        SlotDef::string("nameComplement", 90),
        SlotDef::string("unit", 10),
        SlotDef::string("unit2", 10),
        SlotDef::string("unit3", 10),
        SlotDef::new("coefficient2", SlotKind::Float),
        SlotDef::new("coefficient3", SlotKind::Float),
        SlotDef::new("storage", SlotKind::Ref),
        SlotDef::new("typePrice", SlotKind::Ref),
        SlotDef::new("purchasingPrice", SlotKind::Float),
        SlotDef::new("sellingPrice", SlotKind::Float),
        SlotDef::new("limitMin", SlotKind::Float),
        SlotDef::new("limitMax", SlotKind::Float),
        SlotDef::new("mass", SlotKind::Float),
        SlotDef::new("volume", SlotKind::Float),
        SlotDef::new("supplier", SlotKind::Ref),
        SlotDef::string("orderName", 90),
        SlotDef::new("orderQuantity", SlotKind::Float),
        SlotDef::string("shortName", 24),
        SlotDef::new("typeRP", SlotKind::Ref),
        SlotDef::new("guaranteeType", SlotKind::Choice(GUARANTEE_TYPES)),
        SlotDef::new("guarantee", SlotKind::Int),
        SlotDef::string("producer", 90),
        SlotDef::string("description", 240),
        SlotDef::text("description2"),
        SlotDef::text("note"),
        SlotDef::new("pictures", SlotKind::List),
        SlotDef::new("categories", SlotKind::List),
        SlotDef::new("relatedLinks", SlotKind::List),
        SlotDef::new("intParameters", SlotKind::List),
        SlotDef::new("parameters", SlotKind::List),
    ],
};

/// Header of a stock card
#[derive(Debug, Clone, PartialEq)]
pub struct Header {
    record: Record,
}

impl Header {
    /// Create from raw options
    pub fn new(data: OptionMap, ico: impl Into<String>, resolve: bool) -> Result<Self> {
        Ok(Self {
            record: Record::new(&HEADER, data, ico, resolve)?,
        })
    }

    /// Attach a picture
    ///
    /// Without `order` the picture is numbered from a counter of
    /// automatically ordered pictures (1, 2, ...); explicit orders do not
    /// advance it.
    pub fn add_image(
        &mut self,
        filepath: &str,
        description: &str,
        order: Option<i64>,
        default: bool,
    ) -> Result<&mut Self> {
        add_image(&mut self.record, filepath, description, order, default)?;
        Ok(self)
    }

    /// Put the card into a category
    pub fn add_category(&mut self, category_id: i64) -> Result<&mut Self> {
        add_category(&mut self.record, category_id)?;
        Ok(self)
    }

    /// Attach a related web link
    pub fn add_related_link(&mut self, url: &str, description: &str) -> Result<&mut Self> {
        add_related_link(&mut self.record, url, description)?;
        Ok(self)
    }

    /// Attach an internal parameter value
    pub fn add_int_parameter(&mut self, data: OptionMap) -> Result<&mut Self> {
        add_int_parameter(&mut self.record, data)?;
        Ok(self)
    }

    /// Attach a user-defined parameter
    pub fn add_parameter(
        &mut self,
        name: &str,
        kind: &str,
        value: impl Into<Value>,
        list: Option<Value>,
    ) -> Result<&mut Self> {
        add_parameter(&mut self.record, name, kind, value.into(), list)?;
        Ok(self)
    }
}

impl_agenda!(Header);

pub(super) fn add_image(
    header: &mut Record,
    filepath: &str,
    description: &str,
    order: Option<i64>,
    default: bool,
) -> Result<()> {
    let auto = order.is_none();
    let order = order.unwrap_or_else(|| header.next_sequence("pictures"));
    let picture = Picture::new(filepath, description, order, default, header.ico())?;
    header.add_child("pictures", picture.into())?;
    if auto {
        header.advance_sequence("pictures");
    }
    Ok(())
}

pub(super) fn add_category(header: &mut Record, category_id: i64) -> Result<()> {
    let category = Category::new(category_id, header.ico())?;
    header.add_child("categories", category.into())
}

pub(super) fn add_related_link(header: &mut Record, url: &str, description: &str) -> Result<()> {
    let order = header.next_sequence("relatedLinks");
    let link = RelatedLink::new(url, description, order, header.ico())?;
    header.add_child("relatedLinks", link.into())?;
    header.advance_sequence("relatedLinks");
    Ok(())
}

pub(super) fn add_int_parameter(header: &mut Record, data: OptionMap) -> Result<()> {
    let parameter = IntParameter::new(data, header.ico())?;
    header.add_child("intParameters", parameter.into())
}

pub(super) fn add_parameter(
    header: &mut Record,
    name: &str,
    kind: &str,
    value: Value,
    list: Option<Value>,
) -> Result<()> {
    let parameter = Parameter::new(name, kind, value, list, header.ico())?;
    header.add_child("parameters", parameter.into())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::Error;
    use crate::options;
    use crate::record::Agenda;

    fn header() -> Header {
        Header::new(
            options! { "code" => "CHAIR", "name" => "Chair", "isSales" => true },
            "12345678",
            true,
        )
        .unwrap()
    }

    #[test]
    fn test_header_fields_in_declared_order() {
        let header = Header::new(
            options! { "name" => "Chair", "code" => "CHAIR", "storage" => "MAIN", "stockType" => "card" },
            "",
            true,
        )
        .unwrap();

        let element = header.get_xml().unwrap();
        assert_eq!(element.qualified_name(), "stk:stockHeader");
        let names: Vec<&str> = element.children.iter().map(|c| c.local_name()).collect();
        assert_eq!(names, vec!["stockType", "code", "name", "storage"]);
    }

    #[test]
    fn test_header_truncates_long_text() {
        let long = "x".repeat(100);
        let header = Header::new(options! { "name" => long.as_str() }, "", true).unwrap();
        let element = header.get_xml().unwrap();
        assert_eq!(element.find_child("name").unwrap().text.as_ref().unwrap().len(), 90);
    }

    #[test]
    fn test_header_rejects_bad_vat_rate() {
        let err = Header::new(options! { "sellingRateVAT" => "huge" }, "", true).unwrap_err();
        assert!(matches!(err, Error::InvalidValue { ref option, .. } if option == "sellingRateVAT"));
    }

    #[test]
    fn test_images_get_sequential_order() {
        let mut header = header();
        header
            .add_image("a.jpg", "", None, true)
            .unwrap()
            .add_image("b.jpg", "", None, false)
            .unwrap()
            .add_image("c.jpg", "", Some(10), false)
            .unwrap();

        let element = header.get_xml().unwrap();
        let pictures = element.find_child("pictures").unwrap();
        let orders: Vec<&str> = pictures
            .children
            .iter()
            .map(|p| p.find_child("order").unwrap().text.as_deref().unwrap())
            .collect();
        assert_eq!(orders, vec!["1", "2", "10"]);
        assert_eq!(pictures.children[0].get_attribute("default"), Some("true"));
    }

    #[test]
    fn test_explicit_order_does_not_consume_auto_numbers() {
        let mut header = header();
        header
            .add_image("a.jpg", "", None, true)
            .unwrap()
            .add_image("b.jpg", "", Some(10), false)
            .unwrap()
            .add_image("c.jpg", "", None, false)
            .unwrap()
            .add_image("d.jpg", "", None, false)
            .unwrap();

        let element = header.get_xml().unwrap();
        let orders: Vec<&str> = element
            .find_child("pictures")
            .unwrap()
            .children
            .iter()
            .map(|p| p.find_child("order").unwrap().text.as_deref().unwrap())
            .collect();
        assert_eq!(orders, vec!["1", "10", "2", "3"]);
    }

    #[test]
    fn test_lists_render_after_fields() {
        let mut header = header();
        header.add_category(3).unwrap();
        header.add_related_link("https://example.com", "web").unwrap();
        header
            .add_int_parameter(options! {
                "intParameterID" => 1,
                "intParameterType" => "textValue",
                "value" => "blue",
            })
            .unwrap();
        header.add_parameter("Colour", "text", "blue", None).unwrap();

        let element = header.get_xml().unwrap();
        let names: Vec<&str> = element.children.iter().map(|c| c.local_name()).collect();
        assert_eq!(
            names,
            vec![
                "code",
                "isSales",
                "name",
                "categories",
                "relatedLinks",
                "intParameters",
                "parameters"
            ]
        );
        let parameters = element.find_child("parameters").unwrap();
        assert_eq!(parameters.children[0].qualified_name(), "typ:parameter");
    }

    #[test]
    fn test_failed_add_leaves_header_unchanged() {
        let mut header = header();
        assert!(header.add_related_link("nope", "").is_err());
        assert_eq!(header.record().count("relatedLinks"), 0);
        assert!(header.get_xml().unwrap().find_child("relatedLinks").is_none());

        header.add_related_link("https://example.com", "").unwrap();
        let element = header.get_xml().unwrap();
        let link = &element.find_child("relatedLinks").unwrap().children[0];
        assert_eq!(link.find_child("order").unwrap().text.as_deref(), Some("1"));
    }
}
