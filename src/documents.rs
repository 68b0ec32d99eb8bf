//! XML element tree and serialization
//!
//! Records render into [`Element`] trees. A [`Document`] wraps a root
//! element and writes it out with quick-xml, declaring on the root every
//! namespace prefix the tree uses.

use crate::config::XmlConfig;
use crate::error::{Error, Result};
use crate::names::{split_qname, validate_qname};
use crate::namespaces::{namespace_uri, NamespaceContext};
use indexmap::{IndexMap, IndexSet};
use quick_xml::events::{BytesDecl, BytesEnd, BytesStart, BytesText, Event};
use quick_xml::Writer;
use std::io::{Cursor, Write};

/// XML Element in the document tree
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Element {
    /// Namespace prefix, if the name is qualified
    pub prefix: Option<String>,
    /// Local name
    pub local_name: String,
    /// Element attributes, in insertion order
    pub attributes: IndexMap<String, String>,
    /// Text content (if any)
    pub text: Option<String>,
    /// Child elements
    pub children: Vec<Element>,
    /// Namespace declarations made on this element
    pub namespaces: NamespaceContext,
}

impl Element {
    /// Create a new element from a possibly prefixed name (`stk:stock`)
    pub fn new(name: &str) -> Self {
        let (prefix, local) = split_qname(name);
        Self {
            prefix: prefix.map(str::to_string),
            local_name: local.to_string(),
            attributes: IndexMap::new(),
            text: None,
            children: Vec::new(),
            namespaces: NamespaceContext::new(),
        }
    }

    /// Create an element holding text
    pub fn with_text(name: &str, text: impl Into<String>) -> Self {
        let mut element = Self::new(name);
        element.text = Some(text.into());
        element
    }

    /// Get the local name of the element
    pub fn local_name(&self) -> &str {
        &self.local_name
    }

    /// Get the namespace prefix of the element
    pub fn prefix(&self) -> Option<&str> {
        self.prefix.as_deref()
    }

    /// Name as written in the document, `prefix:local`
    pub fn qualified_name(&self) -> String {
        match &self.prefix {
            Some(prefix) => format!("{}:{}", prefix, self.local_name),
            None => self.local_name.clone(),
        }
    }

    /// Get an attribute value by name
    pub fn get_attribute(&self, name: &str) -> Option<&str> {
        self.attributes.get(name).map(|s| s.as_str())
    }

    /// Set an attribute
    pub fn set_attribute(&mut self, name: impl Into<String>, value: impl Into<String>) {
        self.attributes.insert(name.into(), value.into());
    }

    /// Declare a known Pohoda prefix on this element
    pub fn declare_namespace(&mut self, prefix: &str) -> Result<()> {
        self.namespaces.declare(prefix)
    }

    /// Add a child element
    pub fn add_child(&mut self, child: Element) {
        self.children.push(child);
    }

    /// Set text content
    pub fn set_text(&mut self, text: impl Into<String>) {
        self.text = Some(text.into());
    }

    /// Find child elements by local name
    pub fn find_children(&self, local_name: &str) -> Vec<&Element> {
        self.children
            .iter()
            .filter(|e| e.local_name() == local_name)
            .collect()
    }

    /// First child element with the given local name
    pub fn find_child(&self, local_name: &str) -> Option<&Element> {
        self.children.iter().find(|e| e.local_name() == local_name)
    }

    /// Prefixes used by this element, its attributes and its descendants
    pub fn used_prefixes(&self) -> IndexSet<String> {
        let mut prefixes = IndexSet::new();
        self.collect_prefixes(&mut prefixes);
        prefixes
    }

    fn collect_prefixes(&self, prefixes: &mut IndexSet<String>) {
        if let Some(prefix) = &self.prefix {
            prefixes.insert(prefix.clone());
        }
        for name in self.attributes.keys() {
            if let (Some(prefix), _) = split_qname(name) {
                prefixes.insert(prefix.to_string());
            }
        }
        for child in &self.children {
            child.collect_prefixes(prefixes);
        }
    }
}

/// XML document ready to be written
#[derive(Debug, Clone)]
pub struct Document {
    root: Element,
}

impl Document {
    /// Wrap a root element
    pub fn new(root: Element) -> Self {
        Self { root }
    }

    /// Root element of the document
    pub fn root(&self) -> &Element {
        &self.root
    }

    /// Unwrap the root element
    pub fn into_root(self) -> Element {
        self.root
    }

    /// Serialize the document to a string
    pub fn to_xml_string(&self, config: &XmlConfig) -> Result<String> {
        let mut buffer = Cursor::new(Vec::new());
        self.write_to(&mut buffer, config)?;
        String::from_utf8(buffer.into_inner())
            .map_err(|e| Error::Xml(format!("Serialized document is not UTF-8: {}", e)))
    }

    /// Serialize the document into any writer
    pub fn write_to<W: Write>(&self, output: W, config: &XmlConfig) -> Result<()> {
        let mut writer = if config.indent() > 0 {
            Writer::new_with_indent(output, b' ', config.indent())
        } else {
            Writer::new(output)
        };

        if config.declaration() {
            writer.write_event(Event::Decl(BytesDecl::new("1.0", Some("UTF-8"), None)))?;
        }

        let missing = self.undeclared_namespaces()?;
        tracing::debug!(
            root = %self.root.qualified_name(),
            declared = missing.iter().count(),
            "writing document"
        );
        write_element(&mut writer, &self.root, &missing)
    }

    /// Declarations the root needs for prefixes used but not yet declared
    fn undeclared_namespaces(&self) -> Result<NamespaceContext> {
        let mut missing = NamespaceContext::new();
        for prefix in self.root.used_prefixes() {
            if prefix == "xmlns" || self.root.namespaces.contains(&prefix) {
                continue;
            }
            missing.add_prefix(prefix.as_str(), namespace_uri(&prefix)?);
        }
        Ok(missing)
    }
}

fn write_element<W: Write>(
    writer: &mut Writer<W>,
    element: &Element,
    extra_namespaces: &NamespaceContext,
) -> Result<()> {
    let name = element.qualified_name();
    validate_qname(&name)?;

    let mut start = BytesStart::new(name.as_str());
    for (prefix, uri) in element.namespaces.iter().chain(extra_namespaces.iter()) {
        start.push_attribute((format!("xmlns:{}", prefix).as_str(), uri));
    }
    for (key, value) in &element.attributes {
        validate_qname(key)?;
        validate_chars(key, value)?;
        start.push_attribute((key.as_str(), value.as_str()));
    }

    if element.text.is_none() && element.children.is_empty() {
        writer.write_event(Event::Empty(start))?;
        return Ok(());
    }

    writer.write_event(Event::Start(start))?;
    if let Some(text) = &element.text {
        validate_chars(&name, text)?;
        writer.write_event(Event::Text(BytesText::new(text)))?;
    }
    let none = NamespaceContext::new();
    for child in &element.children {
        write_element(writer, child, &none)?;
    }
    writer.write_event(Event::End(BytesEnd::new(name.as_str())))?;
    Ok(())
}

/// Reject characters XML 1.0 does not allow, escaped or not
fn validate_chars(context: &str, value: &str) -> Result<()> {
    match value.chars().find(|c| is_restricted_char(*c)) {
        Some(c) => Err(Error::Xml(format!(
            "Value of '{}' contains U+{:04X}, which is not allowed in XML 1.0",
            context, c as u32
        ))),
        None => Ok(()),
    }
}

fn is_restricted_char(c: char) -> bool {
    matches!(
        c,
        '\u{0}'..='\u{8}' | '\u{B}' | '\u{C}' | '\u{E}'..='\u{1F}' | '\u{FFFE}' | '\u{FFFF}'
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample() -> Element {
        let mut root = Element::new("stk:stock");
        root.set_attribute("version", "2.0");
        let mut header = Element::new("stk:stockHeader");
        header.add_child(Element::with_text("stk:name", "Chair & Table"));
        header.add_child(Element::with_text("typ:ids", "MAIN"));
        root.add_child(header);
        root
    }

    #[test]
    fn test_element_names() {
        let element = Element::new("stk:stockHeader");
        assert_eq!(element.prefix(), Some("stk"));
        assert_eq!(element.local_name(), "stockHeader");
        assert_eq!(element.qualified_name(), "stk:stockHeader");

        let plain = Element::new("plain");
        assert_eq!(plain.prefix(), None);
        assert_eq!(plain.qualified_name(), "plain");
    }

    #[test]
    fn test_find_children() {
        let root = sample();
        let header = root.find_child("stockHeader").unwrap();
        assert_eq!(header.find_children("name").len(), 1);
        assert!(root.find_child("missing").is_none());
    }

    #[test]
    fn test_used_prefixes() {
        let prefixes: Vec<String> = sample().used_prefixes().into_iter().collect();
        assert_eq!(prefixes, vec!["stk".to_string(), "typ".to_string()]);
    }

    #[test]
    fn test_serialize_declares_namespaces_and_escapes() {
        let xml = Document::new(sample())
            .to_xml_string(&XmlConfig::new().with_declaration(false))
            .unwrap();

        assert_eq!(
            xml,
            "<stk:stock xmlns:stk=\"http://www.stormware.cz/schema/version_2/stock.xsd\" \
             xmlns:typ=\"http://www.stormware.cz/schema/version_2/type.xsd\" version=\"2.0\">\
             <stk:stockHeader><stk:name>Chair &amp; Table</stk:name><typ:ids>MAIN</typ:ids>\
             </stk:stockHeader></stk:stock>"
        );
    }

    #[test]
    fn test_serialize_keeps_existing_declaration() {
        let mut root = Element::new("stk:stock");
        root.declare_namespace("stk").unwrap();
        let xml = Document::new(root)
            .to_xml_string(&XmlConfig::new())
            .unwrap();

        assert!(xml.starts_with("<?xml version=\"1.0\" encoding=\"UTF-8\"?>"));
        assert_eq!(xml.matches("xmlns:stk").count(), 1);
        assert!(xml.ends_with("<stk:stock xmlns:stk=\"http://www.stormware.cz/schema/version_2/stock.xsd\"/>"));
    }

    #[test]
    fn test_serialize_unknown_prefix_fails() {
        let err = Document::new(Element::new("zz:thing"))
            .to_xml_string(&XmlConfig::new())
            .unwrap_err();
        assert!(matches!(err, Error::Namespace(_)));
    }

    #[test]
    fn test_serialize_invalid_name_fails() {
        let mut root = Element::new("stk:stock");
        root.add_child(Element::new("stk:1bad"));
        let err = Document::new(root)
            .to_xml_string(&XmlConfig::new())
            .unwrap_err();
        assert!(matches!(err, Error::Name(_)));
    }

    #[test]
    fn test_serialize_rejects_control_characters() {
        let mut root = Element::new("stk:stock");
        root.add_child(Element::with_text("stk:name", "Chair\u{1}\u{b}"));
        let err = Document::new(root)
            .to_xml_string(&XmlConfig::new())
            .unwrap_err();
        assert!(matches!(err, Error::Xml(ref msg) if msg.contains("U+0001")));

        let mut root = Element::new("stk:stock");
        root.set_attribute("note", "a\u{0}b");
        assert!(matches!(
            Document::new(root).to_xml_string(&XmlConfig::new()),
            Err(Error::Xml(_))
        ));
    }

    #[test]
    fn test_serialize_keeps_whitespace_controls() {
        let xml = Document::new(Element::with_text("stk:note", "line\tone\r\nline two"))
            .to_xml_string(&XmlConfig::new().with_declaration(false))
            .unwrap();
        assert!(xml.contains("line\tone"));
    }

    #[test]
    fn test_pretty_output_is_indented() {
        let xml = Document::new(sample())
            .to_xml_string(&XmlConfig::pretty().with_declaration(false))
            .unwrap();
        assert!(xml.contains("\n  <stk:stockHeader>"));
        assert!(xml.contains("\n    <stk:name>Chair &amp; Table</stk:name>"));
    }
}
