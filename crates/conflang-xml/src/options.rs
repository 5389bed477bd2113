//! Serialization options.

/// Root element name used when none is configured.
pub const DEFAULT_ROOT: &str = "config";

/// Options for XML output.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct XmlOptions {
    /// Name of the root element (default: `config`).
    pub root: String,

    /// Spaces per nesting level (default: 2).
    pub indent: usize,

    /// Emit `<?xml version="1.0"?>` first (default: true).
    pub declaration: bool,
}

impl Default for XmlOptions {
    fn default() -> Self {
        Self {
            root: DEFAULT_ROOT.to_string(),
            indent: 2,
            declaration: true,
        }
    }
}

impl XmlOptions {
    /// Create new default options.
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the root element name.
    pub fn root(mut self, root: impl Into<String>) -> Self {
        self.root = root.into();
        self
    }

    /// Set the number of spaces per nesting level.
    pub fn indent(mut self, indent: usize) -> Self {
        self.indent = indent;
        self
    }

    /// Enable or disable the XML declaration.
    pub fn declaration(mut self, declaration: bool) -> Self {
        self.declaration = declaration;
        self
    }
}
