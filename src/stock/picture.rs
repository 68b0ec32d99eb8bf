//! Stock pictures, categories and related links

use crate::error::{Error, Result};
use crate::options;
use crate::options::{Schema, SlotDef, SlotKind};
use crate::record::{impl_agenda, Record};
use url::Url;

static PICTURE: Schema = Schema {
    tag: "stk:picture",
    prefix: "stk",
    slots: &[
        SlotDef::new("default", SlotKind::Bool).attribute(),
        SlotDef::string("filepath", 255).required(),
        SlotDef::text("description"),
        SlotDef::new("order", SlotKind::Int),
    ],
};

static CATEGORY: Schema = Schema {
    tag: "stk:idCategory",
    prefix: "stk",
    slots: &[SlotDef::new("idCategory", SlotKind::Int).content().required()],
};

static RELATED_LINK: Schema = Schema {
    tag: "stk:relatedLink",
    prefix: "stk",
    slots: &[
        SlotDef::string("addressURL", 255).required(),
        SlotDef::text("description"),
        SlotDef::new("order", SlotKind::Int),
    ],
};

/// Picture attached to a stock card
#[derive(Debug, Clone, PartialEq)]
pub struct Picture {
    record: Record,
}

impl Picture {
    /// Create a picture entry
    pub fn new(
        filepath: &str,
        description: &str,
        order: i64,
        default: bool,
        ico: impl Into<String>,
    ) -> Result<Self> {
        let data = options! {
            "filepath" => filepath,
            "description" => description,
            "order" => order,
            "default" => default,
        };
        Ok(Self {
            record: Record::new(&PICTURE, data, ico, true)?,
        })
    }
}

/// Category membership of a stock card
#[derive(Debug, Clone, PartialEq)]
pub struct Category {
    record: Record,
}

impl Category {
    /// Reference a category by its Pohoda id
    pub fn new(category_id: i64, ico: impl Into<String>) -> Result<Self> {
        Ok(Self {
            record: Record::new(&CATEGORY, options! { "idCategory" => category_id }, ico, true)?,
        })
    }
}

/// Link to a related web page
#[derive(Debug, Clone, PartialEq)]
pub struct RelatedLink {
    record: Record,
}

impl RelatedLink {
    /// Create a link; `url` must be absolute
    pub fn new(url: &str, description: &str, order: i64, ico: impl Into<String>) -> Result<Self> {
        Url::parse(url).map_err(|e| Error::invalid_value("addressURL", format!("'{}': {}", url, e)))?;

        let data = options! {
            "addressURL" => url,
            "description" => description,
            "order" => order,
        };
        Ok(Self {
            record: Record::new(&RELATED_LINK, data, ico, true)?,
        })
    }
}

impl_agenda!(Picture, Category, RelatedLink);
