//! XML namespace handling
//!
//! This module maps the short prefixes used in Pohoda import documents
//! (`dat`, `stk`, `typ`, ...) to their Stormware schema URIs and keeps track
//! of the prefix declarations attached to an element.

use crate::error::{Error, Result};
use indexmap::IndexMap;

/// XML Namespace URI
pub type NamespaceUri = String;

/// Namespace prefix
pub type Prefix = String;

/// Data pack envelope prefix
pub const DATA: &str = "dat";

/// Shared types prefix (`typ:ids`, `typ:parameter`, ...)
pub const TYPE: &str = "typ";

/// Filter prefix used by action types
pub const FILTER: &str = "ftr";

/// Stock agenda prefix
pub const STOCK: &str = "stk";

/// Known prefixes of the version_2 import schemas and their URIs
static NAMESPACES: &[(&str, &str)] = &[
    ("dat", "http://www.stormware.cz/schema/version_2/data.xsd"),
    ("rsp", "http://www.stormware.cz/schema/version_2/response.xsd"),
    ("rdc", "http://www.stormware.cz/schema/version_2/documentresponse.xsd"),
    ("typ", "http://www.stormware.cz/schema/version_2/type.xsd"),
    ("lst", "http://www.stormware.cz/schema/version_2/list.xsd"),
    ("lStk", "http://www.stormware.cz/schema/version_2/list_stock.xsd"),
    ("lAdb", "http://www.stormware.cz/schema/version_2/list_addBook.xsd"),
    ("acu", "http://www.stormware.cz/schema/version_2/accountingunit.xsd"),
    ("inv", "http://www.stormware.cz/schema/version_2/invoice.xsd"),
    ("vch", "http://www.stormware.cz/schema/version_2/voucher.xsd"),
    ("int", "http://www.stormware.cz/schema/version_2/intDoc.xsd"),
    ("stk", "http://www.stormware.cz/schema/version_2/stock.xsd"),
    ("ord", "http://www.stormware.cz/schema/version_2/order.xsd"),
    ("ofr", "http://www.stormware.cz/schema/version_2/offer.xsd"),
    ("enq", "http://www.stormware.cz/schema/version_2/enquiry.xsd"),
    ("vyd", "http://www.stormware.cz/schema/version_2/vydejka.xsd"),
    ("pri", "http://www.stormware.cz/schema/version_2/prijemka.xsd"),
    ("bal", "http://www.stormware.cz/schema/version_2/balance.xsd"),
    ("pre", "http://www.stormware.cz/schema/version_2/prevodka.xsd"),
    ("vyr", "http://www.stormware.cz/schema/version_2/vyroba.xsd"),
    ("pro", "http://www.stormware.cz/schema/version_2/prodejka.xsd"),
    ("con", "http://www.stormware.cz/schema/version_2/contract.xsd"),
    ("adb", "http://www.stormware.cz/schema/version_2/addressbook.xsd"),
    ("prm", "http://www.stormware.cz/schema/version_2/parameter.xsd"),
    ("ctg", "http://www.stormware.cz/schema/version_2/category.xsd"),
    ("ipm", "http://www.stormware.cz/schema/version_2/intParam.xsd"),
    ("str", "http://www.stormware.cz/schema/version_2/storage.xsd"),
    ("idp", "http://www.stormware.cz/schema/version_2/individualPrice.xsd"),
    ("sup", "http://www.stormware.cz/schema/version_2/supplier.xsd"),
    ("prn", "http://www.stormware.cz/schema/version_2/print.xsd"),
    ("bnk", "http://www.stormware.cz/schema/version_2/bank.xsd"),
    ("sto", "http://www.stormware.cz/schema/version_2/store.xsd"),
    ("grs", "http://www.stormware.cz/schema/version_2/groupStocks.xsd"),
    ("acp", "http://www.stormware.cz/schema/version_2/actionPrice.xsd"),
    ("ftr", "http://www.stormware.cz/schema/version_2/filter.xsd"),
];

/// Look up the schema URI bound to a Pohoda prefix
pub fn namespace_uri(prefix: &str) -> Result<&'static str> {
    NAMESPACES
        .iter()
        .find(|(known, _)| *known == prefix)
        .map(|(_, uri)| *uri)
        .ok_or_else(|| Error::Namespace(format!("Unknown prefix: {}", prefix)))
}

/// Check whether a prefix belongs to the known Pohoda schemas
pub fn is_known_prefix(prefix: &str) -> bool {
    NAMESPACES.iter().any(|(known, _)| *known == prefix)
}

/// Namespace declarations carried by an element
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct NamespaceContext {
    /// Mapping from prefix to namespace URI, in declaration order
    prefixes: IndexMap<Prefix, NamespaceUri>,
}

impl NamespaceContext {
    /// Create a new empty namespace context
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a namespace prefix mapping
    pub fn add_prefix(&mut self, prefix: impl Into<String>, namespace: impl Into<String>) {
        self.prefixes.insert(prefix.into(), namespace.into());
    }

    /// Declare a known Pohoda prefix, resolving its URI from the table
    pub fn declare(&mut self, prefix: &str) -> Result<()> {
        let uri = namespace_uri(prefix)?;
        self.add_prefix(prefix, uri);
        Ok(())
    }

    /// Get the namespace for a prefix
    pub fn get_namespace(&self, prefix: &str) -> Option<&str> {
        self.prefixes.get(prefix).map(|s| s.as_str())
    }

    /// Whether the prefix is declared here
    pub fn contains(&self, prefix: &str) -> bool {
        self.prefixes.contains_key(prefix)
    }

    /// Iterate over `(prefix, uri)` pairs in declaration order
    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.prefixes.iter().map(|(p, u)| (p.as_str(), u.as_str()))
    }

    /// Whether no prefix is declared
    pub fn is_empty(&self) -> bool {
        self.prefixes.is_empty()
    }
}
