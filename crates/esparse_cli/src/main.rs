//! esparse: parse ECMAScript files and report syntax errors.
//!
//! Usage:
//!   esparse [options] <file...>
//!
//! Exits with 2 when any file has syntax errors. Set `ESPARSE_LOG` (or
//! `RUST_LOG`) to `debug` to trace recovery and lazy skips.

use std::path::{Path, PathBuf};
use std::process;
use std::time::Instant;

use bumpalo::Bump;
use clap::Parser as ClapParser;
use esparse_diagnostics::{Diagnostic, DiagnosticCategory};
use esparse_options::{EcmaVersion, ParserOptions};
use esparse_parser::{parse_module, parse_script, ParseOutput, ParseResult};
use miette::{IntoDiagnostic, LabeledSpan, MietteDiagnostic, NamedSource, Report, Severity, WrapErr};
use tracing::debug;
use tracing_subscriber::EnvFilter;

#[derive(ClapParser, Debug)]
#[command(name = "esparse", about = "esparse - an ECMAScript parser", version)]
struct Cli {
    /// Source files to parse.
    #[arg(value_name = "FILE", required = true)]
    files: Vec<PathBuf>,

    /// Parse the files as modules instead of scripts.
    #[arg(short = 'm', long)]
    module: bool,

    /// Highest ECMAScript edition to accept (es5, es2015 .. es2022, latest).
    #[arg(long = "ecma-version", value_name = "VERSION")]
    ecma_version: Option<EcmaVersion>,

    /// Parse scripts as strict mode code.
    #[arg(long)]
    strict: bool,

    /// Accept non-standard syntax: concise function bodies and `for each`.
    #[arg(long = "syntax-extensions")]
    syntax_extensions: bool,

    /// Treat `#` as the start of a line comment.
    #[arg(long)]
    scripting: bool,

    /// Load parser options from a JSON file. Flags override it.
    #[arg(short = 'c', long, value_name = "FILE")]
    config: Option<PathBuf>,

    /// Print the parsed program back to stdout.
    #[arg(short = 'p', long)]
    print: bool,
}

fn main() -> miette::Result<()> {
    init_tracing();
    let cli = Cli::parse();
    let options = build_options(&cli)?;

    let mut clean = true;
    for path in &cli.files {
        clean &= parse_file(path, &cli, &options)?;
    }
    if !clean {
        process::exit(2);
    }
    Ok(())
}

/// Install a stderr subscriber when `ESPARSE_LOG` or `RUST_LOG` is set.
fn init_tracing() {
    let filter = match std::env::var("ESPARSE_LOG") {
        Ok(value) => EnvFilter::builder().parse_lossy(value),
        Err(_) if std::env::var("RUST_LOG").is_ok() => EnvFilter::from_default_env(),
        Err(_) => return,
    };
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
}

fn build_options(cli: &Cli) -> miette::Result<ParserOptions> {
    let mut options = match &cli.config {
        Some(path) => ParserOptions::from_json_file(path)
            .into_diagnostic()
            .wrap_err("invalid --config file")?,
        None => ParserOptions::default(),
    };
    if let Some(version) = cli.ecma_version {
        options.ecma_version = version;
    }
    options.strict |= cli.strict;
    options.syntax_extensions |= cli.syntax_extensions;
    options.scripting |= cli.scripting;
    Ok(options)
}

/// Parse one file, report its diagnostics and return whether it was clean.
fn parse_file(path: &Path, cli: &Cli, options: &ParserOptions) -> miette::Result<bool> {
    let source = std::fs::read_to_string(path)
        .into_diagnostic()
        .wrap_err_with(|| format!("cannot read {}", path.display()))?;
    let file_name = path.display().to_string();
    let arena = Bump::new();

    let start = Instant::now();
    let result: ParseResult<ParseOutput<'_>> = if cli.module {
        parse_module(&arena, &file_name, &source, options.clone())
    } else {
        parse_script(&arena, &file_name, &source, options.clone())
    };
    let output = match result {
        Ok(output) => output,
        Err(error) => match error.diagnostic() {
            Some(diagnostic) => {
                eprintln!("{:?}", to_report(diagnostic, &file_name, &source));
                return Ok(false);
            }
            None => return Err(error).into_diagnostic().wrap_err_with(|| format!("cannot parse {file_name}")),
        },
    };
    debug!(
        file = %file_name,
        elapsed_us = start.elapsed().as_micros() as u64,
        diagnostics = output.diagnostics.len(),
        "parsed"
    );

    for diagnostic in output.diagnostics.diagnostics() {
        eprintln!("{:?}", to_report(diagnostic, &file_name, &source));
    }
    let errors = output.diagnostics.error_count();
    if errors > 0 {
        eprintln!("Found {} error{} in {}.", errors, if errors == 1 { "" } else { "s" }, file_name);
        return Ok(false);
    }
    if cli.print {
        print!("{}", esparse_printer::print_program(output.program));
    }
    Ok(true)
}

/// Render a diagnostic with its source snippet.
fn to_report(diagnostic: &Diagnostic, file_name: &str, source: &str) -> Report {
    let severity = match diagnostic.category {
        DiagnosticCategory::Error => Severity::Error,
        DiagnosticCategory::Warning => Severity::Warning,
        DiagnosticCategory::Message => Severity::Advice,
    };
    let mut labels = Vec::new();
    if let Some(span) = diagnostic.span {
        labels.push(LabeledSpan::at(span.to_range(), "here"));
    }
    for related in &diagnostic.related_information {
        if let Some(span) = related.span {
            labels.push(LabeledSpan::at(span.to_range(), related.message_text.clone()));
        }
    }
    let report = MietteDiagnostic::new(diagnostic.message_text.clone())
        .with_code(format!("ES{}", diagnostic.code))
        .with_severity(severity)
        .with_labels(labels);
    Report::new(report).with_source_code(NamedSource::new(file_name, source.to_string()))
}
