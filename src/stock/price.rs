//! Price list entries of a stock card

use crate::error::Result;
use crate::options;
use crate::options::{OptionMap, Schema, SlotDef, SlotKind};
use crate::record::{impl_agenda, Record};

static PRICE: Schema = Schema {
    tag: "stk:stockPrice",
    prefix: "typ",
    slots: &[
        SlotDef::text("ids").required(),
        SlotDef::new("price", SlotKind::Float).required(),
    ],
};

/// Price of a stock card in one price list
#[derive(Debug, Clone, PartialEq)]
pub struct Price {
    record: Record,
}

impl Price {
    /// Price `value` in the price list identified by `code`
    pub fn new(code: &str, value: f64, ico: impl Into<String>) -> Result<Self> {
        Self::from_options(options! { "ids" => code, "price" => value }, ico)
    }

    /// Create from raw `ids` / `price` options
    pub fn from_options(data: OptionMap, ico: impl Into<String>) -> Result<Self> {
        Ok(Self {
            record: Record::new(&PRICE, data, ico, true)?,
        })
    }
}

impl_agenda!(Price);

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::Error;
    use crate::record::Agenda;

    #[test]
    fn test_price_element() {
        let element = Price::new("CODE1", 19.99, "").unwrap().get_xml().unwrap();
        assert_eq!(element.qualified_name(), "stk:stockPrice");
        assert_eq!(element.children[0].qualified_name(), "typ:ids");
        assert_eq!(element.children[0].text.as_deref(), Some("CODE1"));
        assert_eq!(element.children[1].qualified_name(), "typ:price");
        assert_eq!(element.children[1].text.as_deref(), Some("19.99"));
    }

    #[test]
    fn test_price_must_be_numeric() {
        let err = Price::from_options(options! { "ids" => "A", "price" => "free" }, "").unwrap_err();
        assert!(matches!(err, Error::InvalidValueType { ref option, .. } if option == "price"));
    }
}
