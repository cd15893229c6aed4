// SPDX-License-Identifier: (MIT OR Apache-2.0)
//! The `parse`, `document` and `resolve` commands.

use std::fs;
use std::path::Path;
use std::process::ExitCode;

use dcl_ast::SourceId;
use dcl_diagnostics::formatter::DiagnosticFormatter;
use dcl_diagnostics::json::{to_json_report, to_json_string};
use dcl_diagnostics::{render_resolutions, resolution_diagnostics, Diagnostic, ToDiagnostic};
use dcl_document::{build_document, DocumentPrinter};
use dcl_parser::{parse_source, SourceParse};
use dcl_resolve::{resolve_script, ResolverSettings};
use dcl_schema::{Schema, SchemaDeclaration};

use crate::error::{CliError, Result};
use crate::output;

/// How diagnostics are written.
#[derive(Debug, Clone, Copy, PartialEq, Eq, clap::ValueEnum)]
pub enum Format {
    Text,
    Json,
}

struct Input {
    path: String,
    source: String,
    parsed: SourceParse,
}

impl Input {
    fn load(path: &Path) -> Result<Self> {
        let source = read(path)?;
        let name = path.display().to_string();
        let parsed = parse_source(SourceId::new(name.clone()), &source);
        tracing::debug!(
            file = %name,
            statements = parsed.script.statements.len(),
            lex_errors = parsed.lex_errors.len(),
            parse_errors = parsed.parse_errors.len(),
            "parsed"
        );
        Ok(Self {
            path: name,
            source,
            parsed,
        })
    }

    fn front_end_diagnostics(&self) -> Vec<Diagnostic> {
        self.parsed
            .lex_errors
            .iter()
            .map(ToDiagnostic::to_diagnostic)
            .chain(self.parsed.parse_errors.iter().map(ToDiagnostic::to_diagnostic))
            .collect()
    }

    fn print_diagnostics(&self, diagnostics: &[Diagnostic]) {
        if diagnostics.is_empty() {
            return;
        }
        let formatter = DiagnosticFormatter::new(&self.source).with_file_name(&self.path);
        eprintln!("{}", formatter.format_all(diagnostics));
    }
}

fn read(path: &Path) -> Result<String> {
    fs::read_to_string(path).map_err(|source| CliError::Read {
        path: path.to_path_buf(),
        source,
    })
}

fn exit_code(diagnostics: &[Diagnostic]) -> ExitCode {
    if diagnostics.iter().any(Diagnostic::is_error) {
        ExitCode::FAILURE
    } else {
        ExitCode::SUCCESS
    }
}

/// Load a JSON schema declaration and validate it.
pub fn load_schema(path: &Path) -> Result<Schema> {
    let text = read(path)?;
    let declaration: SchemaDeclaration = serde_json::from_str(&text).map_err(|source| CliError::SchemaJson {
        path: path.to_path_buf(),
        source,
    })?;
    Ok(declaration.build()?)
}

pub fn parse(path: &Path, format: Format) -> Result<ExitCode> {
    let input = Input::load(path)?;
    let diagnostics = input.front_end_diagnostics();

    match format {
        Format::Json => {
            let report = to_json_report(&diagnostics, &input.source, &input.path, "parse");
            println!("{}", to_json_string(&report)?);
        }
        Format::Text => {
            input.print_diagnostics(&diagnostics);
            let errors = diagnostics.iter().filter(|d| d.is_error()).count();
            if errors == 0 {
                println!(
                    "{} ({} statement(s))",
                    output::banner_ok("Parse"),
                    input.parsed.script.statements.len()
                );
            } else {
                eprintln!("{}", output::banner_fail("Parse", errors));
            }
        }
    }
    Ok(exit_code(&diagnostics))
}

pub fn document(path: &Path, spans: bool) -> Result<ExitCode> {
    let input = Input::load(path)?;
    let diagnostics = input.front_end_diagnostics();
    input.print_diagnostics(&diagnostics);

    let printer = if spans {
        DocumentPrinter::new()
    } else {
        DocumentPrinter::new().without_spans()
    };
    print!("{}", printer.print(&build_document(&input.parsed.script)));
    Ok(exit_code(&diagnostics))
}

pub fn resolve(path: &Path, schema_path: &Path, settings: ResolverSettings, format: Format) -> Result<ExitCode> {
    let schema = load_schema(schema_path)?;
    let input = Input::load(path)?;
    let resolution = resolve_script(&schema, &input.parsed.script, settings);
    tracing::debug!(
        nodes = resolution.trace.len(),
        failures = resolution.trace.failure_count(),
        strict = settings.strict_receiver_checks,
        "resolved"
    );

    let mut diagnostics = input.front_end_diagnostics();
    diagnostics.extend(resolution_diagnostics(&resolution.resolved, &schema));
    let lines = render_resolutions(&resolution.resolved);

    match format {
        Format::Json => {
            let report =
                to_json_report(&diagnostics, &input.source, &input.path, "resolve").with_resolutions(lines);
            println!("{}", to_json_string(&report)?);
        }
        Format::Text => {
            println!("{}", output::section("Resolutions"));
            for line in &lines {
                println!("{}", line);
            }
            input.print_diagnostics(&diagnostics);
            let errors = diagnostics.iter().filter(|d| d.is_error()).count();
            if errors == 0 {
                println!("{}", output::banner_ok("Resolve"));
            } else {
                eprintln!("{}", output::banner_fail("Resolve", errors));
            }
        }
    }
    Ok(exit_code(&diagnostics))
}
