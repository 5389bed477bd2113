//! Statement-level parser for conflang documents.

use conflang_tokenizer::{Line, Lines, Span, Stripped, strip_comments};
use conflang_tree::Mapping;
use tracing::{debug, trace};

use crate::constants::{ConstantTable, is_constant_name};
use crate::diagnostic::{Diagnostic, DiagnosticKind, Diagnostics};

mod value;
use value::{ValueParser, is_key_name};

/// Default limit on how deeply `{ ... }` and `(list ...)` values may nest.
pub const DEFAULT_MAX_DEPTH: usize = 64;

/// Options controlling parsing.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ParseOptions {
    /// Deepest nesting level accepted before a value is replaced by null
    /// and a diagnostic is recorded (default: [`DEFAULT_MAX_DEPTH`]).
    pub max_depth: usize,
}

impl Default for ParseOptions {
    fn default() -> Self {
        Self {
            max_depth: DEFAULT_MAX_DEPTH,
        }
    }
}

impl ParseOptions {
    /// Create new default options.
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the maximum nesting depth.
    pub fn max_depth(mut self, depth: usize) -> Self {
        self.max_depth = depth;
        self
    }
}

/// The outcome of parsing one document.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ParseResult {
    /// Top-level entries, in declaration order.
    pub mapping: Mapping,
    /// Everything that went wrong, in the order it was found.
    pub diagnostics: Vec<Diagnostic>,
}

impl ParseResult {
    /// Check if any diagnostics were recorded.
    pub fn has_errors(&self) -> bool {
        !self.diagnostics.is_empty()
    }

    /// Check if the document parsed cleanly.
    pub fn is_ok(&self) -> bool {
        self.diagnostics.is_empty()
    }

    /// Diagnostic messages, one per diagnostic.
    pub fn messages(&self) -> Vec<String> {
        self.diagnostics.iter().map(ToString::to_string).collect()
    }

    /// The mapping if the document parsed cleanly, otherwise the diagnostics.
    pub fn into_result(self) -> Result<Mapping, Vec<Diagnostic>> {
        if self.diagnostics.is_empty() {
            Ok(self.mapping)
        } else {
            Err(self.diagnostics)
        }
    }
}

/// Parses conflang source text.
#[derive(Debug, Clone, Default)]
pub struct Parser {
    options: ParseOptions,
}

impl Parser {
    /// Create a parser with default options.
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a parser with the given options.
    pub fn with_options(options: ParseOptions) -> Self {
        Self { options }
    }

    /// The options this parser uses.
    pub fn options(&self) -> &ParseOptions {
        &self.options
    }

    /// Parse a whole document.
    ///
    /// Each call starts from an empty constant table and diagnostic list.
    pub fn parse(&self, source: &str) -> ParseResult {
        let stripped = strip_comments(source);
        trace!(
            "stripped {} comment(s), {} bytes remain",
            stripped.comment_count(),
            stripped.text().len()
        );

        let mut document = Document::new(&stripped, self.options);
        document.run();
        document.finish()
    }
}

/// State for a single parse.
struct Document<'a> {
    stripped: &'a Stripped,
    options: ParseOptions,
    constants: ConstantTable,
    mapping: Mapping,
    diagnostics: Diagnostics,
}

impl<'a> Document<'a> {
    fn new(stripped: &'a Stripped, options: ParseOptions) -> Self {
        Self {
            stripped,
            options,
            constants: ConstantTable::new(),
            mapping: Mapping::new(),
            diagnostics: Diagnostics::new(),
        }
    }

    fn run(&mut self) {
        let stripped = self.stripped;
        let mut lines = stripped.lines();
        while let Some(line) = lines.next() {
            let text = line.text;
            if text.is_empty() {
                continue;
            }

            if text.contains(':') && text.ends_with(';') {
                debug!("constant declaration: {:?}", text);
                let span = stripped.original_span(line.span);
                self.constant(text, span);
            } else if text.starts_with('{') {
                let (block, span) = accumulate_block(line, &mut lines);
                debug!("mapping block: {:?}", block);
                let span = stripped.original_span(span);
                self.block(&block, span);
            } else if text.contains('=') && !text.starts_with('}') {
                debug!("assignment: {:?}", text);
                let span = stripped.original_span(line.span);
                self.assignment(text, span);
            } else {
                trace!("ignoring line {:?}", text);
            }
        }
    }

    /// `name: value;`
    fn constant(&mut self, text: &str, span: Span) {
        let body = text.trim_end_matches(';');
        let Some((name, value)) = body.split_once(':') else {
            return;
        };

        let name = name.trim();
        if !is_constant_name(name) {
            self.diagnostics
                .push(DiagnosticKind::InvalidConstantName(name.to_string()), span);
            return;
        }

        let value = ValueParser::new(&self.constants, span, self.options.max_depth).value(
            value.trim(),
            0,
            &mut self.diagnostics,
        );
        trace!("constant {} = {:?}", name, value);
        self.constants.insert(name, value);
    }

    /// `{ key = value, ... }`, possibly accumulated from several lines.
    fn block(&mut self, text: &str, span: Span) {
        let parsed = ValueParser::new(&self.constants, span, self.options.max_depth).mapping(
            text,
            0,
            &mut self.diagnostics,
        );
        self.mapping.merge(parsed);
    }

    /// `key = value` at top level.
    fn assignment(&mut self, text: &str, span: Span) {
        let Some((key, value)) = text.split_once('=') else {
            return;
        };

        let key = key.trim();
        if !is_key_name(key) {
            self.diagnostics
                .push(DiagnosticKind::InvalidKeyName(key.to_string()), span);
            return;
        }

        let value = ValueParser::new(&self.constants, span, self.options.max_depth).value(
            value.trim(),
            0,
            &mut self.diagnostics,
        );
        self.mapping.insert(key, value);
    }

    fn finish(self) -> ParseResult {
        debug!(
            "parsed {} top-level entries, {} constants, {} diagnostics",
            self.mapping.len(),
            self.constants.len(),
            self.diagnostics.len()
        );
        ParseResult {
            mapping: self.mapping,
            diagnostics: self.diagnostics.into_vec(),
        }
    }
}

/// Join `first` with following lines until its braces balance.
///
/// Braces are counted per line without regard to quoting. If the input ends
/// first, whatever was collected is returned.
fn accumulate_block(first: Line<'_>, lines: &mut Lines<'_>) -> (String, Span) {
    let mut text = first.text.to_string();
    let mut span = first.span;
    let mut balance = brace_balance(first.text);

    while balance > 0 {
        let Some(next) = lines.next() else {
            trace!("block ended with {} unclosed brace(s)", balance);
            break;
        };
        text.push(' ');
        text.push_str(next.text);
        if !next.text.is_empty() {
            span = span.extend(next.span);
        }
        balance += brace_balance(next.text);
    }

    (text, span)
}

fn brace_balance(text: &str) -> i64 {
    text.chars().fold(0, |balance, c| match c {
        '{' => balance + 1,
        '}' => balance - 1,
        _ => balance,
    })
}

#[cfg(test)]
mod tests;
