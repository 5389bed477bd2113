//! Recursive parsing of value expressions.

use std::cell::Cell;

use conflang_tokenizer::{QUOTES, Span, Splitter};
use conflang_tree::{Mapping, Value};
use tracing::trace;

use crate::constants::ConstantTable;
use crate::diagnostic::{DiagnosticKind, Diagnostics};

/// Keys are lowercase ASCII letters only.
pub(crate) fn is_key_name(key: &str) -> bool {
    !key.is_empty() && key.bytes().all(|b| b.is_ascii_lowercase())
}

/// `^[1-9][0-9]*$`
fn is_integer_literal(text: &str) -> bool {
    let bytes = text.as_bytes();
    bytes.first().is_some_and(|b| (b'1'..=b'9').contains(b))
        && bytes.iter().all(u8::is_ascii_digit)
}

/// Parses the value expressions of one statement.
///
/// The constant table is borrowed read-only, so nested mappings see every
/// constant declared before the statement and cannot add to it. The depth
/// limit is reported at most once per statement.
pub(crate) struct ValueParser<'a> {
    constants: &'a ConstantTable,
    span: Span,
    max_depth: usize,
    too_deep: Cell<bool>,
}

impl<'a> ValueParser<'a> {
    /// `span` is the statement every diagnostic will point at.
    pub(crate) fn new(constants: &'a ConstantTable, span: Span, max_depth: usize) -> Self {
        Self {
            constants,
            span,
            max_depth,
            too_deep: Cell::new(false),
        }
    }

    /// Parse a trimmed value expression.
    pub(crate) fn value(&self, text: &str, depth: usize, sink: &mut Diagnostics) -> Value {
        if depth > self.max_depth {
            if !self.too_deep.replace(true) {
                sink.push(
                    DiagnosticKind::NestingTooDeep {
                        limit: self.max_depth,
                    },
                    self.span,
                );
            }
            return Value::Null;
        }

        if text.is_empty() {
            return Value::Null;
        }

        if let Some(name) = text.strip_prefix('[').and_then(|t| t.strip_suffix(']')) {
            return self.reference(name.trim(), sink);
        }

        if is_integer_literal(text) {
            match text.parse::<i64>() {
                Ok(n) => return Value::Integer(n),
                Err(_) => trace!("integer literal {:?} out of range", text),
            }
        }

        if text.len() >= 2
            && let Some(quote) = text.chars().next()
            && QUOTES.contains(&quote)
            && text.ends_with(quote)
        {
            return Value::text(&text[1..text.len() - 1]);
        }

        if let Some(items) = text.strip_prefix("(list").and_then(|t| t.strip_suffix(')')) {
            return Value::Array(self.array(items, depth + 1, sink));
        }

        if text.starts_with('{') {
            let mut scope = Diagnostics::new();
            let mapping = self.mapping(text, depth + 1, &mut scope);
            sink.merge(scope);
            return Value::Mapping(mapping);
        }

        if is_key_name(text) {
            trace!("bare word {:?}", text);
        } else {
            trace!("passing through {:?}", text);
        }
        Value::text(text)
    }

    /// Parse a `{ key = value, ... }` body. Either brace may be missing.
    pub(crate) fn mapping(&self, text: &str, depth: usize, sink: &mut Diagnostics) -> Mapping {
        let body = text.trim();
        let body = body.strip_prefix('{').unwrap_or(body);
        let body = body.strip_suffix('}').unwrap_or(body).trim();

        let mut mapping = Mapping::new();
        for pair in Splitter::PAIRS.split(body) {
            let Some((key, value)) = pair.split_once('=') else {
                trace!("skipping pair without `=`: {:?}", pair);
                continue;
            };

            let key = key.trim();
            if !is_key_name(key) {
                sink.push(DiagnosticKind::InvalidKeyName(key.to_string()), self.span);
                continue;
            }

            let value = self.value(value.trim(), depth, sink);
            mapping.insert(key, value);
        }
        mapping
    }

    /// Parse the items between `(list` and `)`.
    fn array(&self, items: &str, depth: usize, sink: &mut Diagnostics) -> Vec<Value> {
        Splitter::ITEMS
            .split(items)
            .into_iter()
            .map(|item| self.value(item, depth, sink))
            .collect()
    }

    /// Resolve `[name]`, substituting `${name}` when it is not declared.
    fn reference(&self, name: &str, sink: &mut Diagnostics) -> Value {
        match self.constants.get(name) {
            Some(value) => value.clone(),
            None => {
                sink.push(DiagnosticKind::UndefinedConstant(name.to_string()), self.span);
                Value::Text(format!("${{{name}}}"))
            }
        }
    }
}
