//! Named constants declared with `name: value;`.

use std::collections::HashMap;

use conflang_tree::Value;

/// Constant bindings visible to value expressions.
///
/// A table lives for one parse. Redeclaring a name replaces its value.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ConstantTable {
    bindings: HashMap<String, Value>,
}

impl ConstantTable {
    /// Create an empty table.
    pub fn new() -> Self {
        Self::default()
    }

    /// Look up a constant.
    pub fn get(&self, name: &str) -> Option<&Value> {
        self.bindings.get(name)
    }

    /// Bind `name`, returning the value it replaced.
    pub fn insert(&mut self, name: impl Into<String>, value: Value) -> Option<Value> {
        self.bindings.insert(name.into(), value)
    }

    /// Check if a constant is declared.
    pub fn contains(&self, name: &str) -> bool {
        self.bindings.contains_key(name)
    }

    /// Number of declared constants.
    pub fn len(&self) -> usize {
        self.bindings.len()
    }

    /// Check if no constants are declared.
    pub fn is_empty(&self) -> bool {
        self.bindings.is_empty()
    }
}

/// Constant names are lowercase ASCII letters and underscores.
pub(crate) fn is_constant_name(name: &str) -> bool {
    !name.is_empty() && name.bytes().all(|b| b.is_ascii_lowercase() || b == b'_')
}
