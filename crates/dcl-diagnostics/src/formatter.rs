// SPDX-License-Identifier: (MIT OR Apache-2.0)
//! Terminal formatter for diagnostics.
//!
//! ```text
//! error[E0401]: cannot assign property `number`
//!   --> build.dcl:2:5
//!    |
//!  2 |     number = "ten"
//!    |     ^^^^^^   ----- assigned value
//!    |     |
//!    |     value has the wrong type
//!    |
//!    = note: `T.number` expects `Int`
//! ```

use std::collections::BTreeMap;

use colored::Colorize;

use dcl_ast::LineMap;

use crate::{Diagnostic, Help, LabelStyle, Severity};

/// Formats diagnostics for terminal output.
pub struct DiagnosticFormatter<'a> {
    source: &'a str,
    file_name: Option<&'a str>,
    line_map: LineMap,
}

/// A source line with its labels.
struct AnnotatedLine {
    line_num: usize,
    text: String,
    annotations: Vec<Annotation>,
}

struct Annotation {
    col_start: usize,
    col_end: usize,
    style: LabelStyle,
    message: Option<String>,
}

impl<'a> DiagnosticFormatter<'a> {
    pub fn new(source: &'a str) -> Self {
        Self {
            source,
            file_name: None,
            line_map: LineMap::new(source),
        }
    }

    pub fn with_file_name(mut self, name: &'a str) -> Self {
        self.file_name = Some(name);
        self
    }

    pub fn format(&self, diagnostic: &Diagnostic) -> String {
        let mut out = String::new();
        self.format_header(&mut out, diagnostic);

        let annotated = self.collect_annotated_lines(diagnostic);
        let (Some(first), Some(first_label)) = (annotated.first(), diagnostic.labels.first()) else {
            self.format_footer(&mut out, diagnostic);
            return out;
        };

        let file = self.file_name.unwrap_or("<source>");
        let (_, col) = self.line_map.offset_to_line_col(first_label.span.start);
        out.push_str(&format!("  {} {}:{}:{}\n", "-->".blue(), file, first.line_num, col));

        let max_line = annotated.last().map(|a| a.line_num).unwrap_or(1);
        let gutter_width = max_line.to_string().len().max(2);

        let mut prev_line_num: Option<usize> = None;
        for annotated_line in &annotated {
            match prev_line_num {
                Some(prev) if annotated_line.line_num > prev + 1 => {
                    out.push_str(&format!("{} {}\n", " ".repeat(gutter_width), "...".blue()));
                }
                None => {
                    out.push_str(&format!("{} {}\n", " ".repeat(gutter_width + 1), "|".blue()));
                }
                _ => {}
            }

            out.push_str(&format!(
                "{:>width$} {} {}\n",
                annotated_line.line_num.to_string().blue().bold(),
                "|".blue(),
                annotated_line.text,
                width = gutter_width + 1,
            ));
            self.format_annotations(&mut out, annotated_line, gutter_width);
            prev_line_num = Some(annotated_line.line_num);
        }

        self.format_footer(&mut out, diagnostic);
        out
    }

    /// Format every diagnostic, separated by blank lines.
    pub fn format_all(&self, diagnostics: &[Diagnostic]) -> String {
        diagnostics
            .iter()
            .map(|d| self.format(d))
            .collect::<Vec<_>>()
            .join("\n")
    }

    fn format_header(&self, out: &mut String, diagnostic: &Diagnostic) {
        let severity_str = match diagnostic.severity {
            Severity::Error => "error".red().bold(),
            Severity::Warning => "warning".yellow().bold(),
            Severity::Note => "note".blue().bold(),
        };

        if let Some(ref code) = diagnostic.code {
            out.push_str(&format!(
                "{}[{}]: {}\n",
                severity_str,
                code.0.as_str().red().bold(),
                diagnostic.message.bold()
            ));
        } else {
            out.push_str(&format!("{}: {}\n", severity_str, diagnostic.message.bold()));
        }
    }

    fn format_footer(&self, out: &mut String, diagnostic: &Diagnostic) {
        let gutter_width = 2;
        for note in &diagnostic.notes {
            out.push_str(&format!(
                "{} {} {}: {}\n",
                " ".repeat(gutter_width + 1),
                "=".cyan(),
                "note".cyan().bold(),
                note
            ));
        }
        if let Some(ref help) = diagnostic.help {
            self.format_help(out, help, gutter_width);
        }
    }

    fn format_help(&self, out: &mut String, help: &Help, gutter_width: usize) {
        out.push_str(&format!(
            "{} {} {}: {}\n",
            " ".repeat(gutter_width + 1),
            "=".cyan(),
            "help".cyan().bold(),
            help.message
        ));

        let Some(ref suggestion) = help.suggestion else {
            return;
        };
        let (line, col) = self.line_map.offset_to_line_col(suggestion.span.start);
        let Some(source_line) = self.line_map.line_text(self.source, line) else {
            return;
        };
        let prefix = &source_line[..(col - 1).min(source_line.len())];
        let suffix_start = (col - 1 + suggestion.span.len()).min(source_line.len());
        let suffix = &source_line[suffix_start..];

        out.push_str(&format!("{} {}\n", " ".repeat(gutter_width + 1), "|".blue()));
        out.push_str(&format!(
            "{:>width$} {} {}{}{}\n",
            line.to_string().blue().bold(),
            "|".blue(),
            prefix,
            suggestion.replacement.green(),
            suffix,
            width = gutter_width + 1,
        ));
        out.push_str(&format!(
            "{} {} {}{}\n",
            " ".repeat(gutter_width + 1),
            "|".blue(),
            " ".repeat(col - 1),
            "~".repeat(suggestion.replacement.len()).green(),
        ));
    }

    fn collect_annotated_lines(&self, diagnostic: &Diagnostic) -> Vec<AnnotatedLine> {
        let mut lines_map: BTreeMap<usize, AnnotatedLine> = BTreeMap::new();

        for label in &diagnostic.labels {
            let (line_num, col_start) = self.line_map.offset_to_line_col(label.span.start);
            let (end_line, col_end) = self.line_map.offset_to_line_col(label.span.end);
            let text = self.line_map.line_text(self.source, line_num).unwrap_or("");

            // Multi-line spans are only underlined on their first line.
            let effective_col_end = if end_line == line_num { col_end } else { text.len() + 1 };

            let entry = lines_map.entry(line_num).or_insert_with(|| AnnotatedLine {
                line_num,
                text: text.to_string(),
                annotations: Vec::new(),
            });
            entry.annotations.push(Annotation {
                col_start,
                col_end: effective_col_end.max(col_start + 1),
                style: label.style,
                message: label.message.clone(),
            });
        }

        lines_map.into_values().collect()
    }

    fn format_annotations(&self, out: &mut String, annotated_line: &AnnotatedLine, gutter_width: usize) {
        let mut sorted: Vec<&Annotation> = annotated_line.annotations.iter().collect();
        sorted.sort_by_key(|a| (a.style.priority(), a.col_start));

        let line_len = annotated_line.text.len() + 10;
        let mut underline = vec![' '; line_len];
        let mut messages: Vec<(usize, LabelStyle, &str)> = Vec::new();

        for ann in &sorted {
            let ch = match ann.style {
                LabelStyle::Primary => '^',
                LabelStyle::Secondary => '-',
            };
            for slot in underline
                .iter_mut()
                .take((ann.col_end - 1).min(line_len))
                .skip(ann.col_start - 1)
            {
                *slot = ch;
            }
            if let Some(ref msg) = ann.message {
                messages.push((ann.col_start, ann.style, msg));
            }
        }

        let underline_str: String = underline.iter().collect::<String>().trim_end().to_string();
        if underline_str.is_empty() {
            return;
        }
        let colored_underline = color_underline(&underline_str);
        let pad = " ".repeat(gutter_width + 1);

        if messages.len() <= 1 {
            match messages.first() {
                Some((_, style, msg)) => out.push_str(&format!(
                    "{} {} {} {}\n",
                    pad,
                    "|".blue(),
                    colored_underline,
                    styled(msg, *style)
                )),
                None => out.push_str(&format!("{} {} {}\n", pad, "|".blue(), colored_underline)),
            }
            return;
        }

        out.push_str(&format!("{} {} {}\n", pad, "|".blue(), colored_underline));
        for (col, style, msg) in messages.iter().rev() {
            let pipe = styled("|", *style);
            out.push_str(&format!(
                "{} {} {}{} {}\n",
                pad,
                "|".blue(),
                " ".repeat(col - 1),
                pipe,
                styled(msg, *style),
            ));
        }
    }
}

impl LabelStyle {
    fn priority(&self) -> u8 {
        match self {
            LabelStyle::Primary => 0,
            LabelStyle::Secondary => 1,
        }
    }
}

fn styled(text: &str, style: LabelStyle) -> String {
    match style {
        LabelStyle::Primary => text.red().bold().to_string(),
        LabelStyle::Secondary => text.blue().to_string(),
    }
}

/// Color the underline characters (^ in red, - in blue).
fn color_underline(s: &str) -> String {
    let mut result = String::new();
    let mut current = None;
    let mut run = String::new();

    for ch in s.chars() {
        let kind = matches!(ch, '^' | '-').then_some(ch);
        if kind != current && !run.is_empty() {
            result.push_str(&flush_run(&run, current));
            run.clear();
        }
        run.push(ch);
        current = kind;
    }
    if !run.is_empty() {
        result.push_str(&flush_run(&run, current));
    }
    result
}

fn flush_run(run: &str, kind: Option<char>) -> String {
    match kind {
        Some('^') => run.red().bold().to_string(),
        Some('-') => run.blue().to_string(),
        _ => run.to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use dcl_ast::Span;

    #[test]
    fn formats_header_location_and_underline() {
        colored::control::set_override(false);
        let source = "a = 1\nnumber = \"ten\"\n";
        let diag = Diagnostic::error("cannot assign property `number`")
            .with_code("E0401")
            .with_primary(Span::new(6, 12), "value has the wrong type")
            .with_note("`T.number` expects `Int`");
        let out = DiagnosticFormatter::new(source).with_file_name("build.dcl").format(&diag);

        assert!(out.starts_with("error[E0401]: cannot assign property `number`\n"));
        assert!(out.contains("--> build.dcl:2:1"));
        assert!(out.contains("number = \"ten\""));
        assert!(out.contains("^^^^^^ value has the wrong type"));
        assert!(out.contains("= note: `T.number` expects `Int`"));
    }

    #[test]
    fn suggestion_shows_the_replacement() {
        colored::control::set_override(false);
        let source = "servce(\"a\")";
        let diag = Diagnostic::error("cannot resolve element `servce`")
            .with_primary(Span::new(0, 6), "no matching signature")
            .with_help("did you mean `service`?")
            .with_suggestion(Span::new(0, 6), "service");
        let out = DiagnosticFormatter::new(source).format(&diag);
        assert!(out.contains("= help: did you mean `service`?"));
        assert!(out.contains("service(\"a\")"));
        assert!(out.contains("~~~~~~~"));
    }

    #[test]
    fn diagnostics_without_labels_print_only_the_footer() {
        colored::control::set_override(false);
        let diag = Diagnostic::error("invalid schema").with_help("declare the type");
        let out = DiagnosticFormatter::new("").format(&diag);
        assert_eq!(out, "error: invalid schema\n    = help: declare the type\n");
    }
}
