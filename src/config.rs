//! Serialization settings

/// Configuration for writing a [`Document`](crate::documents::Document)
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct XmlConfig {
    /// Spaces per nesting level, 0 writes everything on one line
    indent: usize,
    /// Whether to emit the `<?xml ...?>` declaration
    declaration: bool,
}

impl Default for XmlConfig {
    fn default() -> Self {
        Self {
            indent: 0,
            declaration: true,
        }
    }
}

impl XmlConfig {
    /// Create a new configuration with default values
    pub fn new() -> Self {
        Self::default()
    }

    /// Indented output, two spaces per level
    pub fn pretty() -> Self {
        Self::default().with_indent(2)
    }

    /// Get indentation width
    pub fn indent(&self) -> usize {
        self.indent
    }

    /// Whether the XML declaration is written
    pub fn declaration(&self) -> bool {
        self.declaration
    }

    /// Set indentation width
    pub fn with_indent(mut self, indent: usize) -> Self {
        self.indent = indent;
        self
    }

    /// Set whether to write the XML declaration
    pub fn with_declaration(mut self, declaration: bool) -> Self {
        self.declaration = declaration;
        self
    }
}
