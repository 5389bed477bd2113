//! Non-fatal parse diagnostics and their rendering.

use std::fmt;

use ariadne::{Color, Label, Report, ReportKind, Source};
use conflang_tokenizer::Span;
use tracing::debug;

/// What went wrong.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DiagnosticKind {
    /// A constant declaration used a name outside `[a-z_]+`.
    InvalidConstantName(String),
    /// A mapping pair or assignment used a key outside `[a-z]+`.
    InvalidKeyName(String),
    /// `[name]` referenced a constant that was not declared before it.
    UndefinedConstant(String),
    /// Values nested deeper than the parser allows.
    NestingTooDeep {
        /// The configured maximum depth.
        limit: usize,
    },
}

/// A problem found while parsing, with the statement it was found in.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Diagnostic {
    /// The kind of problem.
    pub kind: DiagnosticKind,
    /// Span of the enclosing statement in the original source.
    pub span: Span,
}

impl Diagnostic {
    /// Create a new diagnostic.
    pub fn new(kind: DiagnosticKind, span: Span) -> Self {
        Self { kind, span }
    }

    /// Render this diagnostic with ariadne.
    ///
    /// Returns a string containing the formatted report with source context.
    pub fn render(&self, filename: &str, source: &str) -> String {
        let mut output = Vec::new();
        match self.write_report(filename, source, &mut output) {
            Ok(()) => String::from_utf8(output).unwrap_or_else(|_| self.to_string()),
            Err(_) => self.to_string(),
        }
    }

    /// Write the report to a writer.
    pub fn write_report<W: std::io::Write>(
        &self,
        filename: &str,
        source: &str,
        writer: W,
    ) -> std::io::Result<()> {
        self.build_report(filename)
            .finish()
            .write((filename, Source::from(source)), writer)
    }

    fn build_report<'a>(
        &self,
        filename: &'a str,
    ) -> ariadne::ReportBuilder<'static, (&'a str, std::ops::Range<usize>)> {
        let range: std::ops::Range<usize> = self.span.into();

        match &self.kind {
            DiagnosticKind::InvalidConstantName(name) => {
                Report::build(ReportKind::Error, (filename, range.clone()))
                    .with_message(format!("invalid constant name `{name}`"))
                    .with_label(
                        Label::new((filename, range))
                            .with_message("in this declaration")
                            .with_color(Color::Red),
                    )
                    .with_help("constant names may only contain lowercase letters and `_`")
            }

            DiagnosticKind::InvalidKeyName(key) => {
                Report::build(ReportKind::Error, (filename, range.clone()))
                    .with_message(format!("invalid key name `{key}`"))
                    .with_label(
                        Label::new((filename, range))
                            .with_message("in this statement")
                            .with_color(Color::Red),
                    )
                    .with_help("keys may only contain lowercase letters")
            }

            DiagnosticKind::UndefinedConstant(name) => {
                Report::build(ReportKind::Error, (filename, range.clone()))
                    .with_message(format!("undefined constant `{name}`"))
                    .with_label(
                        Label::new((filename, range))
                            .with_message("referenced here")
                            .with_color(Color::Red),
                    )
                    .with_help(format!("declare it earlier with `{name}: value;`"))
            }

            DiagnosticKind::NestingTooDeep { limit } => {
                Report::build(ReportKind::Error, (filename, range.clone()))
                    .with_message(format!("nesting exceeds {limit} levels"))
                    .with_label(
                        Label::new((filename, range))
                            .with_message("too deeply nested")
                            .with_color(Color::Red),
                    )
                    .with_help("flatten nested `{ ... }` and `(list ...)` values")
            }
        }
    }
}

impl fmt::Display for Diagnostic {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match &self.kind {
            DiagnosticKind::InvalidConstantName(name) => {
                write!(f, "Invalid constant name: {name}")
            }
            DiagnosticKind::InvalidKeyName(key) => write!(f, "Invalid key name: {key}"),
            DiagnosticKind::UndefinedConstant(name) => write!(f, "Undefined constant: {name}"),
            DiagnosticKind::NestingTooDeep { limit } => {
                write!(f, "Nesting exceeds {limit} levels")
            }
        }
    }
}

impl std::error::Error for Diagnostic {}

/// Collects diagnostics for one parse, or for one nested scope of it.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Diagnostics {
    items: Vec<Diagnostic>,
}

impl Diagnostics {
    /// Create an empty collector.
    pub fn new() -> Self {
        Self::default()
    }

    /// Record a diagnostic.
    pub fn push(&mut self, kind: DiagnosticKind, span: Span) {
        let diagnostic = Diagnostic::new(kind, span);
        debug!("diagnostic at {:?}: {}", span, diagnostic);
        self.items.push(diagnostic);
    }

    /// Append everything collected by a child scope.
    pub fn merge(&mut self, child: Diagnostics) {
        self.items.extend(child.items);
    }

    /// Check if nothing was recorded.
    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    /// Number of recorded diagnostics.
    pub fn len(&self) -> usize {
        self.items.len()
    }

    /// Iterate over recorded diagnostics in the order they were found.
    pub fn iter(&self) -> std::slice::Iter<'_, Diagnostic> {
        self.items.iter()
    }

    /// Take the recorded diagnostics.
    pub fn into_vec(self) -> Vec<Diagnostic> {
        self.items
    }
}
