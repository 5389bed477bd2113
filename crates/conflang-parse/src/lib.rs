//! Parser for the conflang configuration language.
//!
//! ```text
//! <# constants may be referenced by any later value #>
//! max_connections: 100;
//! name = "demo"
//! {
//!     server = { port = 8080, limit = [max_connections] },
//!     modules = (list auth cache)
//! }
//! ```
//!
//! Parsing never fails. Problems are collected as [`Diagnostic`]s on the
//! [`ParseResult`] and the offending construct is skipped or substituted.

pub use conflang_tokenizer::Span;
pub use conflang_tree::{Mapping, Value};

mod constants;
pub use constants::ConstantTable;

mod diagnostic;
pub use diagnostic::{Diagnostic, DiagnosticKind, Diagnostics};

mod parser;
pub use parser::{DEFAULT_MAX_DEPTH, ParseOptions, ParseResult, Parser};

/// Parse a conflang document with default options.
pub fn parse(source: &str) -> ParseResult {
    Parser::new().parse(source)
}
