//! JSON diagnostic output for machine consumption.
//!
//! Each diagnostic carries exact locations (line/col), the source line and
//! any replacement suggestion. Selected with `--format json` on the CLI.

use serde::Serialize;

use dcl_ast::LineMap;

use crate::{codes::ErrorCodeRegistry, Diagnostic, LabelStyle, Severity};

/// A complete JSON diagnostic report for one script.
#[derive(Debug, Serialize)]
pub struct DiagnosticReport {
    /// Report format version.
    pub version: u32,
    pub file: String,
    /// No errors were reported. Notes and warnings do not count.
    pub success: bool,
    /// The stage that produced these diagnostics.
    pub phase: String,
    pub diagnostics: Vec<JsonDiagnostic>,
    pub error_count: usize,
    pub warning_count: usize,
    /// Rendered resolutions, one per document node, when resolution ran.
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub resolutions: Vec<String>,
}

#[derive(Debug, Serialize)]
pub struct JsonDiagnostic {
    pub severity: Severity,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub code: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub category: Option<String>,
    pub message: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub location: Option<SourceLocation>,
    pub labels: Vec<JsonLabel>,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub notes: Vec<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub help: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub suggestion: Option<JsonSuggestion>,
}

/// A source location with line/column (1-based).
#[derive(Debug, Serialize)]
pub struct SourceLocation {
    pub line: usize,
    pub column: usize,
    pub byte_offset: usize,
    pub source_line: String,
}

#[derive(Debug, Serialize)]
pub struct JsonLabel {
    /// "primary" or "secondary".
    pub role: LabelStyle,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,
    pub start: LineCol,
    pub end: LineCol,
}

/// Line/column pair (1-based).
#[derive(Debug, Serialize)]
pub struct LineCol {
    pub line: usize,
    pub column: usize,
    pub byte_offset: usize,
}

#[derive(Debug, Serialize)]
pub struct JsonSuggestion {
    pub start: usize,
    pub end: usize,
    pub replacement: String,
    /// The full line after applying the replacement.
    pub result_line: String,
}

/// Convert diagnostics to a structured JSON report.
pub fn to_json_report(diagnostics: &[Diagnostic], source: &str, file: &str, phase: &str) -> DiagnosticReport {
    let registry = ErrorCodeRegistry::default();
    let line_map = LineMap::new(source);
    let count = |severity: Severity| diagnostics.iter().filter(|d| d.severity == severity).count();
    let error_count = count(Severity::Error);

    DiagnosticReport {
        version: 1,
        file: file.to_string(),
        success: error_count == 0,
        phase: phase.to_string(),
        diagnostics: diagnostics
            .iter()
            .map(|d| to_json_diagnostic(d, source, &line_map, &registry))
            .collect(),
        error_count,
        warning_count: count(Severity::Warning),
        resolutions: Vec::new(),
    }
}

impl DiagnosticReport {
    pub fn with_resolutions(mut self, lines: Vec<String>) -> Self {
        self.resolutions = lines;
        self
    }
}

fn to_json_diagnostic(
    diag: &Diagnostic,
    source: &str,
    line_map: &LineMap,
    registry: &ErrorCodeRegistry,
) -> JsonDiagnostic {
    let line_col = |offset: usize| {
        let (line, column) = line_map.offset_to_line_col(offset);
        LineCol {
            line,
            column,
            byte_offset: offset,
        }
    };
    let line_text = |line: usize| line_map.line_text(source, line).unwrap_or("").to_string();

    let code = diag.code.as_ref().map(|c| c.0.clone());
    let category = code
        .as_ref()
        .and_then(|c| registry.get(c))
        .map(|info| info.category.to_string());

    let location = diag.primary_span().map(|span| {
        let at = line_col(span.start);
        SourceLocation {
            source_line: line_text(at.line),
            line: at.line,
            column: at.column,
            byte_offset: span.start,
        }
    });

    let labels = diag
        .labels
        .iter()
        .map(|l| JsonLabel {
            role: l.style,
            message: l.message.clone(),
            start: line_col(l.span.start),
            end: line_col(l.span.end),
        })
        .collect();

    let suggestion = diag.help.as_ref().and_then(|h| h.suggestion.as_ref()).map(|s| {
        let at = line_col(s.span.start);
        let original = line_text(at.line);
        let prefix_end = (at.column - 1).min(original.len());
        let suffix_start = (prefix_end + s.span.len()).min(original.len());
        JsonSuggestion {
            start: s.span.start,
            end: s.span.end,
            replacement: s.replacement.clone(),
            result_line: format!("{}{}{}", &original[..prefix_end], s.replacement, &original[suffix_start..]),
        }
    });

    JsonDiagnostic {
        severity: diag.severity,
        code,
        category,
        message: diag.message.clone(),
        location,
        labels,
        notes: diag.notes.clone(),
        help: diag.help.as_ref().map(|h| h.message.clone()),
        suggestion,
    }
}

/// Serialize a diagnostic report to pretty JSON.
pub fn to_json_string(report: &DiagnosticReport) -> serde_json::Result<String> {
    serde_json::to_string_pretty(report)
}

#[cfg(test)]
mod tests {
    use super::*;
    use dcl_ast::Span;

    #[test]
    fn report_counts_errors_and_locates_labels() {
        let source = "a = 1\nservce(\"x\")";
        let diagnostics = vec![
            Diagnostic::error("cannot resolve element `servce`")
                .with_code("E0400")
                .with_primary(Span::new(6, 12), "no matching signature")
                .with_help("did you mean `service`?")
                .with_suggestion(Span::new(6, 12), "service"),
            Diagnostic::note("cannot assign property `a`").with_code("E0403"),
        ];
        let report = to_json_report(&diagnostics, source, "test.dcl", "resolve");

        assert!(!report.success);
        assert_eq!(report.error_count, 1);
        let first = &report.diagnostics[0];
        assert_eq!(first.category.as_deref(), Some("Resolution"));
        let location = first.location.as_ref().unwrap();
        assert_eq!((location.line, location.column), (2, 1));
        assert_eq!(location.source_line, "servce(\"x\")");
        assert_eq!(first.suggestion.as_ref().unwrap().result_line, "service(\"x\")");
    }

    #[test]
    fn serializes_lowercase_roles_and_severities() {
        let diagnostics = vec![Diagnostic::error("bad").with_primary(Span::new(0, 1), "here")];
        let report = to_json_report(&diagnostics, "x", "test.dcl", "parse").with_resolutions(vec!["ErrorResolution".into()]);
        let json: serde_json::Value = serde_json::from_str(&to_json_string(&report).unwrap()).unwrap();
        assert_eq!(json["diagnostics"][0]["severity"], "error");
        assert_eq!(json["diagnostics"][0]["labels"][0]["role"], "primary");
        assert_eq!(json["resolutions"][0], "ErrorResolution");
    }
}
