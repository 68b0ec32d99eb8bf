//! # pohoda-xml
//!
//! Build import XML for the Pohoda accounting system from validated option
//! records.
//!
//! Every Pohoda object is a [`Record`]: a set of options checked against the
//! static [`Schema`](options::Schema) of its type and rendered into XML in
//! the order that schema declares. Composite agendas such as
//! [`Stock`](stock::Stock) nest field objects (pictures, categories, prices)
//! into ordered lists and forward the `add_*` calls to their header.
//!
//! ## Features
//!
//! - Option validation with unknown/missing option errors
//! - Normalization of values to the declared slot kinds
//! - Fixed child ordering, independent of the order options are given in
//! - Namespace declarations resolved from the Pohoda prefix table
//! - `dat:dataPack` envelope for import files
//! - JSON input (`serde_json`)
//!
//! ## Example
//!
//! ```rust
//! use pohoda_xml::{options, DataPack, XmlConfig};
//! use pohoda_xml::stock::Stock;
//!
//! let mut stock = Stock::new(options! { "code" => "CHAIR", "name" => "Chair" }, "12345678")?;
//! stock
//!     .add_stock_item(options! { "storage" => "MAIN", "count" => 4 })?
//!     .add_price("Sleva1", 19.99)?;
//!
//! let mut pack = DataPack::new("import01", "12345678", "eshop");
//! pack.add_item("1", &stock)?;
//! let xml = pack.to_document()?.to_xml_string(&XmlConfig::pretty())?;
//! assert!(xml.contains("<typ:price>19.99</typ:price>"));
//! # Ok::<(), pohoda_xml::Error>(())
//! ```

#![warn(missing_docs)]
#![warn(clippy::all)]

// Foundation
pub mod error;
pub mod config;

// Names and namespaces
pub mod names;
pub mod namespaces;

// Option handling
pub mod value;
pub mod options;

// Rendering
pub mod record;
pub mod documents;

// Agendas
pub mod common;
pub mod stock;
pub mod data_pack;

// Re-exports for convenience
pub use config::XmlConfig;
pub use data_pack::DataPack;
pub use documents::{Document, Element};
pub use error::{Error, Result};
pub use options::{OptionBag, OptionMap, OptionsResolver};
pub use record::{Agenda, Record};
pub use value::{options_from_json, Value};

/// Version of the pohoda-xml library
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
