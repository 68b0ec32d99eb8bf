//! Data pack envelope
//!
//! Pohoda imports a `dat:dataPack` document holding one `dat:dataPackItem`
//! per agenda. Items are rendered when added and kept in insertion order.

use crate::documents::{Document, Element};
use crate::error::Result;
use crate::namespaces::DATA;
use crate::record::Agenda;

/// Envelope format version
pub const DATA_PACK_VERSION: &str = "2.0";

/// Import envelope for rendered agendas
#[derive(Debug, Clone, PartialEq)]
pub struct DataPack {
    id: String,
    ico: String,
    application: String,
    note: Option<String>,
    items: Vec<Element>,
}

impl DataPack {
    /// Create an empty data pack
    pub fn new(
        id: impl Into<String>,
        ico: impl Into<String>,
        application: impl Into<String>,
    ) -> Self {
        Self {
            id: id.into(),
            ico: ico.into(),
            application: application.into(),
            note: None,
            items: Vec::new(),
        }
    }

    /// Attach a free text note
    pub fn with_note(mut self, note: impl Into<String>) -> Self {
        self.note = Some(note.into());
        self
    }

    /// Organization identifier
    pub fn ico(&self) -> &str {
        &self.ico
    }

    /// Number of items added so far
    pub fn len(&self) -> usize {
        self.items.len()
    }

    /// Whether no item has been added
    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    /// Render `agenda` into a new item identified by `id`
    pub fn add_item(&mut self, id: &str, agenda: &impl Agenda) -> Result<&mut Self> {
        let content = agenda.get_xml()?;
        if agenda.record().ico() != self.ico {
            tracing::warn!(
                item = id,
                pack = %self.ico,
                agenda = agenda.record().ico(),
                "agenda belongs to a different organization"
            );
        }

        let mut item = Element::new(&format!("{}:dataPackItem", DATA));
        item.set_attribute("id", id);
        item.set_attribute("version", DATA_PACK_VERSION);
        item.add_child(content);
        self.items.push(item);

        tracing::debug!(item = id, items = self.items.len(), "data pack item added");
        Ok(self)
    }

    /// Build the `dat:dataPack` document
    pub fn to_document(&self) -> Result<Document> {
        let mut root = Element::new(&format!("{}:dataPack", DATA));
        root.declare_namespace(DATA)?;
        root.set_attribute("id", self.id.as_str());
        root.set_attribute("ico", self.ico.as_str());
        root.set_attribute("application", self.application.as_str());
        root.set_attribute("version", DATA_PACK_VERSION);
        if let Some(note) = &self.note {
            root.set_attribute("note", note.as_str());
        }
        root.children.extend(self.items.iter().cloned());
        Ok(Document::new(root))
    }
}
