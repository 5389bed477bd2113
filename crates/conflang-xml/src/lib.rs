//! XML output for conflang documents.
//!
//! A cleanly parsed document becomes an indented XML tree under a single
//! root element. A document with diagnostics becomes a fixed-shape error
//! document listing every diagnostic message instead.

use conflang_parse::{Diagnostic, ParseOptions, ParseResult, Parser};
use conflang_tree::Mapping;
use tracing::debug;

mod error;
pub use error::XmlError;

mod options;
pub use options::{DEFAULT_ROOT, XmlOptions};

mod writer;
pub use writer::{ITEM_ELEMENT, XmlWriter, is_element_name};

/// Text of the `<message>` element in an error document.
pub const ERROR_MESSAGE: &str = "Parsing errors found:";

/// Serialize `mapping` as a document rooted at `options.root`.
pub fn to_xml(mapping: &Mapping, options: &XmlOptions) -> Result<String, XmlError> {
    if !is_element_name(&options.root) {
        return Err(XmlError::InvalidName(options.root.clone()));
    }

    let mut writer = XmlWriter::new(options.indent);
    if options.declaration {
        writer.declaration()?;
    }
    writer.mapping(&options.root, mapping)?;
    let xml = writer.finish()?;

    Ok(xml
        .lines()
        .filter(|line| !line.trim().is_empty())
        .collect::<Vec<_>>()
        .join("\n"))
}

/// Build the error document for `diagnostics`.
///
/// ```text
/// <error>
///   <message>Parsing errors found:</message>
///   <details>Invalid key name: Port</details>
/// </error>
/// ```
///
/// Messages are joined with newlines inside `<details>`. No XML declaration
/// is written.
pub fn error_document(diagnostics: &[Diagnostic]) -> Result<String, XmlError> {
    let details = diagnostics
        .iter()
        .map(ToString::to_string)
        .collect::<Vec<_>>()
        .join("\n");

    let mut writer = XmlWriter::new(2);
    writer.start("error")?;
    writer.text_element("message", ERROR_MESSAGE)?;
    writer.text_element("details", &details)?;
    writer.end("error")?;
    writer.finish()
}

/// Serialize a parse result: the error document if it has diagnostics,
/// otherwise its mapping.
pub fn render(result: &ParseResult, options: &XmlOptions) -> Result<String, XmlError> {
    if result.has_errors() {
        debug!(
            "rendering error document for {} diagnostic(s)",
            result.diagnostics.len()
        );
        error_document(&result.diagnostics)
    } else {
        to_xml(&result.mapping, options)
    }
}

/// Parse `source` and serialize the result.
pub fn convert(
    source: &str,
    parse_options: &ParseOptions,
    xml_options: &XmlOptions,
) -> Result<String, XmlError> {
    let result = Parser::with_options(*parse_options).parse(source);
    render(&result, xml_options)
}

/// Parse `source` and serialize the result with default options.
pub fn parse_and_convert(source: &str) -> Result<String, XmlError> {
    convert(source, &ParseOptions::default(), &XmlOptions::default())
}
