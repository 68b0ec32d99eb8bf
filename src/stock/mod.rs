//! Stock agenda
//!
//! A [`Stock`] document describes one stock card: its [`Header`], the
//! per-storage [`StockItem`] lines and the [`Price`] list entries, optionally
//! preceded by an action type.
//!
//! ```
//! use pohoda_xml::options;
//! use pohoda_xml::stock::Stock;
//!
//! let mut stock = Stock::new(options! { "code" => "CHAIR", "name" => "Chair" }, "12345678")?;
//! stock.add_price("Sleva1", 19.99)?.add_category(3)?;
//!
//! let xml = stock.get_xml()?;
//! assert_eq!(xml.qualified_name(), "stk:stock");
//! # Ok::<(), pohoda_xml::Error>(())
//! ```

mod header;
mod int_parameter;
mod picture;
mod price;
mod stock_item;

pub use header::Header;
pub use int_parameter::{IntParameter, INT_PARAMETER_TYPES};
pub use picture::{Category, Picture, RelatedLink};
pub use price::Price;
pub use stock_item::StockItem;

use crate::common::ActionType;
use crate::documents::{Document, Element};
use crate::error::{Error, Result};
use crate::namespaces::STOCK;
use crate::options::{OptionMap, Schema, SlotDef, SlotKind};
use crate::record::{Agenda, Record};
use crate::value::Value;

/// Schema version written on the root element
pub const VERSION: &str = "2.0";

/// Child order of the document root
const ROOT_ORDER: &[&str] = &["actionType", "header", "stockDetail", "stockPriceItem"];

static STOCK_SCHEMA: Schema = Schema {
    tag: "stk:stock",
    prefix: STOCK,
    slots: &[
        SlotDef::new("actionType", SlotKind::Record),
        SlotDef::new("header", SlotKind::Record).required(),
        SlotDef::new("stockDetail", SlotKind::List),
        SlotDef::new("stockPriceItem", SlotKind::List),
    ],
};

/// Stock card import document
#[derive(Debug, Clone, PartialEq)]
pub struct Stock {
    record: Record,
}

impl Stock {
    /// Create a stock document, `data` being the header options
    pub fn new(data: OptionMap, ico: impl Into<String>) -> Result<Self> {
        Self::with_resolve(data, ico, true)
    }

    /// Like [`Stock::new`], optionally skipping option resolution
    ///
    /// Empty `data` means no header, which resolution rejects.
    pub fn with_resolve(data: OptionMap, ico: impl Into<String>, resolve: bool) -> Result<Self> {
        let ico = ico.into();
        let mut options = OptionMap::new();
        if !data.is_empty() {
            let header = Header::new(data, ico.clone(), resolve)?;
            options.insert("header".to_string(), Record::from(header).into());
        }
        Self::from_options(options, ico, resolve)
    }

    /// Create from already built slot values (`actionType`, `header`,
    /// `stockDetail`, `stockPriceItem`)
    pub fn from_options(options: OptionMap, ico: impl Into<String>, resolve: bool) -> Result<Self> {
        Ok(Self {
            record: Record::new(&STOCK_SCHEMA, options, ico, resolve)?,
        })
    }

    /// Organization identifier
    pub fn ico(&self) -> &str {
        self.record.ico()
    }

    /// Header record, if present
    pub fn header(&self) -> Option<&Record> {
        self.record.child("header")
    }

    fn header_mut(&mut self) -> Result<&mut Record> {
        self.record
            .child_mut("header")
            .ok_or_else(|| Error::missing("header"))
    }

    /// Mark the document as add, add/update, update or delete
    ///
    /// A document carries at most one action type; a second call fails.
    /// See [`ActionType::new`] for the filter rules.
    pub fn add_action_type(
        &mut self,
        action: &str,
        filter: Option<OptionMap>,
        agenda: Option<&str>,
    ) -> Result<&mut Self> {
        if self.record.get("actionType").is_some() {
            return Err(Error::invalid_value(
                "actionType",
                "the document already has an action type",
            ));
        }
        let action_type = ActionType::new(action, filter, agenda, STOCK, self.ico())?;
        self.record.set("actionType", Record::from(action_type))?;
        Ok(self)
    }

    /// Append a `stockDetail` line
    pub fn add_stock_item(&mut self, data: OptionMap) -> Result<&mut Self> {
        let item = StockItem::new(data, self.ico())?;
        self.record.add_child("stockDetail", item.into())?;
        Ok(self)
    }

    /// Append a price list entry
    pub fn add_price(&mut self, code: &str, value: f64) -> Result<&mut Self> {
        let price = Price::new(code, value, self.ico())?;
        self.record.add_child("stockPriceItem", price.into())?;
        Ok(self)
    }

    /// Attach a picture to the header
    pub fn add_image(
        &mut self,
        filepath: &str,
        description: &str,
        order: Option<i64>,
        default: bool,
    ) -> Result<&mut Self> {
        header::add_image(self.header_mut()?, filepath, description, order, default)?;
        Ok(self)
    }

    /// Put the card into a category
    pub fn add_category(&mut self, category_id: i64) -> Result<&mut Self> {
        header::add_category(self.header_mut()?, category_id)?;
        Ok(self)
    }

    /// Attach a related web link to the header
    pub fn add_related_link(&mut self, url: &str, description: &str) -> Result<&mut Self> {
        header::add_related_link(self.header_mut()?, url, description)?;
        Ok(self)
    }

    /// Attach an internal parameter value to the header
    pub fn add_int_parameter(&mut self, data: OptionMap) -> Result<&mut Self> {
        header::add_int_parameter(self.header_mut()?, data)?;
        Ok(self)
    }

    /// Attach a user-defined parameter to the header
    pub fn add_parameter(
        &mut self,
        name: &str,
        kind: &str,
        value: impl Into<Value>,
        list: Option<Value>,
    ) -> Result<&mut Self> {
        header::add_parameter(self.header_mut()?, name, kind, value.into(), list)?;
        Ok(self)
    }

    /// Render the `stk:stock` element
    pub fn get_xml(&self) -> Result<Element> {
        let mut xml = self.record.render(ROOT_ORDER, STOCK);
        xml.declare_namespace(STOCK)?;
        xml.set_attribute("version", VERSION);
        Ok(xml)
    }

    /// Render into a standalone document
    pub fn to_document(&self) -> Result<Document> {
        Ok(Document::new(self.get_xml()?))
    }
}

impl Agenda for Stock {
    fn record(&self) -> &Record {
        &self.record
    }

    fn get_xml(&self) -> Result<Element> {
        Stock::get_xml(self)
    }
}
