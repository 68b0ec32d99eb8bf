//! Stock detail lines (per-storage quantities)

use crate::error::Result;
use crate::options::{OptionMap, Schema, SlotDef, SlotKind};
use crate::record::{impl_agenda, Record};

static STOCK_ITEM: Schema = Schema {
    tag: "stk:stockItem",
    prefix: "stk",
    slots: &[
        SlotDef::new("id", SlotKind::Int),
        SlotDef::new("storage", SlotKind::Ref),
        SlotDef::string("code", 64),
        SlotDef::string("name", 90),
        SlotDef::new("count", SlotKind::Float),
        SlotDef::new("quantity", SlotKind::Float),
    ],
};

/// One line of the `stockDetail` list
#[derive(Debug, Clone, PartialEq)]
pub struct StockItem {
    record: Record,
}

impl StockItem {
    /// Create from raw options
    pub fn new(data: OptionMap, ico: impl Into<String>) -> Result<Self> {
        Ok(Self {
            record: Record::new(&STOCK_ITEM, data, ico, true)?,
        })
    }
}

impl_agenda!(StockItem);
