//! conflang CLI tool
//!
//! Reads a conflang document and writes it out as XML.
//!
//! Examples:
//!   conflang app.conf                 - convert, print to stdout
//!   conflang app.conf -o app.xml      - convert into a file
//!   conflang - < app.conf             - read stdin
//!   conflang app.conf --validate      - report diagnostics, write nothing

use std::io::{self, Read, Write};

use clap::Parser as _;
use conflang_parse::{DEFAULT_MAX_DEPTH, ParseOptions, ParseResult, Parser};
use conflang_xml::{DEFAULT_ROOT, XmlError, XmlOptions, is_element_name};
use tracing::debug;
use tracing_subscriber::EnvFilter;

// ============================================================================
// Exit codes
// ============================================================================

const EXIT_SUCCESS: i32 = 0;
const EXIT_FAILURE: i32 = 1;

/// Environment variable holding the log filter.
const LOG_ENV: &str = "CONFLANG_LOG";

// ============================================================================
// CLI arguments
// ============================================================================

#[derive(clap::Parser, Debug)]
#[command(name = "conflang", version)]
#[command(about = "Convert conflang configuration documents to XML")]
struct Args {
    /// Input file ('-' or absent for stdin)
    input: Option<String>,

    /// Output file ('-' or absent for stdout)
    #[arg(short, long, value_name = "FILE")]
    output: Option<String>,

    /// Only check the document; print diagnostics and exit non-zero on errors
    #[arg(long)]
    validate: bool,

    /// Name of the root element
    #[arg(long, value_name = "NAME", default_value = DEFAULT_ROOT, value_parser = parse_root)]
    root: String,

    /// Maximum nesting depth of values
    #[arg(long, value_name = "N", default_value_t = DEFAULT_MAX_DEPTH)]
    max_depth: usize,
}

fn parse_root(name: &str) -> Result<String, String> {
    if is_element_name(name) {
        Ok(name.to_string())
    } else {
        Err(format!("{name:?} is not a valid XML element name"))
    }
}

fn main() {
    init_tracing();
    let args = Args::parse();

    match run(&args) {
        Ok(()) => std::process::exit(EXIT_SUCCESS),
        Err(e) => {
            eprintln!("error: {e}");
            std::process::exit(e.exit_code());
        }
    }
}

fn init_tracing() {
    let filter = EnvFilter::try_from_env(LOG_ENV).unwrap_or_else(|_| EnvFilter::new("warn"));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(io::stderr)
        .init();
}

fn run(args: &Args) -> Result<(), CliError> {
    let source = read_input(args.input.as_deref())?;
    if source.trim().is_empty() {
        return Err(CliError::EmptyInput);
    }

    let options = ParseOptions::new().max_depth(args.max_depth);
    let result = Parser::with_options(options).parse(&source);
    debug!(
        "{} top-level entries, {} diagnostics",
        result.mapping.len(),
        result.diagnostics.len()
    );

    if args.validate {
        let filename = match args.input.as_deref() {
            Some("-") | None => "<stdin>",
            Some(path) => path,
        };
        return validate(&result, filename, &source);
    }

    let xml = conflang_xml::render(&result, &XmlOptions::new().root(&args.root))?;
    write_output(args.output.as_deref().unwrap_or("-"), &format!("{xml}\n"))?;
    Ok(())
}

fn validate(result: &ParseResult, filename: &str, source: &str) -> Result<(), CliError> {
    if result.is_ok() {
        eprintln!("syntax OK");
        return Ok(());
    }

    for diagnostic in &result.diagnostics {
        diagnostic.write_report(filename, source, io::stderr())?;
    }
    Err(CliError::Syntax(result.diagnostics.len()))
}

// ============================================================================
// Errors
// ============================================================================

#[derive(Debug)]
enum CliError {
    Io(io::Error),
    EmptyInput,
    Syntax(usize),
    Xml(XmlError),
}

impl CliError {
    fn exit_code(&self) -> i32 {
        match self {
            CliError::Io(_) | CliError::EmptyInput | CliError::Syntax(_) | CliError::Xml(_) => {
                EXIT_FAILURE
            }
        }
    }
}

impl std::fmt::Display for CliError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            CliError::Io(e) => write!(f, "{e}"),
            CliError::EmptyInput => write!(f, "input is empty"),
            CliError::Syntax(1) => write!(f, "found 1 error"),
            CliError::Syntax(n) => write!(f, "found {n} errors"),
            CliError::Xml(e) => write!(f, "{e}"),
        }
    }
}

impl From<io::Error> for CliError {
    fn from(e: io::Error) -> Self {
        CliError::Io(e)
    }
}

impl From<XmlError> for CliError {
    fn from(e: XmlError) -> Self {
        CliError::Xml(e)
    }
}

// ============================================================================
// I/O helpers
// ============================================================================

fn read_input(file: Option<&str>) -> Result<String, io::Error> {
    match file {
        Some("-") | None => {
            let mut buf = String::new();
            io::stdin().read_to_string(&mut buf)?;
            Ok(buf)
        }
        Some(path) => std::fs::read_to_string(path),
    }
}

fn write_output(path: &str, content: &str) -> Result<(), io::Error> {
    if path == "-" {
        let mut stdout = io::stdout().lock();
        stdout.write_all(content.as_bytes())?;
        stdout.flush()
    } else {
        std::fs::write(path, content)
    }
}
