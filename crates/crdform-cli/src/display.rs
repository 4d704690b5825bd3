//! Display formatting for CLI output
//!
//! Diagnostics go to stderr, results to stdout.

use console::style;
use crdform_core::{Diagnostic, Diagnostics, Severity};
use std::io::{self, Write};

/// Render a single diagnostic
pub fn render_diagnostic(diagnostic: &Diagnostic) -> String {
    let (symbol, label) = match diagnostic.severity {
        Severity::Error => (style("✗").red().bold(), style("Error").red().bold()),
        Severity::Warning => (style("⚠").yellow().bold(), style("Warning").yellow().bold()),
    };

    let mut out = format!("{} {}: {}", symbol, label, style(&diagnostic.summary).bold());
    if let Some(path) = &diagnostic.attribute {
        out.push_str(&format!("\n  {} {}", style("at").dim(), style(path).cyan()));
    }
    for line in diagnostic.detail.lines() {
        if line.is_empty() {
            out.push('\n');
        } else {
            out.push_str(&format!("\n  {}", line));
        }
    }
    out
}

/// Print diagnostics to stderr, one block each
pub fn print_diagnostics(diagnostics: &Diagnostics) {
    let stderr = io::stderr();
    let mut handle = stderr.lock();
    for diagnostic in diagnostics.iter() {
        let _ = writeln!(handle, "{}\n", render_diagnostic(diagnostic));
    }
}

/// Render the table of registered types
pub fn render_type_table(data_sources: &[String], resources: &[String]) -> String {
    let mut rows: Vec<(&str, &str)> = Vec::new();
    rows.extend(data_sources.iter().map(|name| ("data source", name.as_str())));
    rows.extend(resources.iter().map(|name| ("resource", name.as_str())));

    let width = rows.iter().map(|(_, name)| name.len()).max().unwrap_or(4).max(4);
    let mut out = format!(
        "{:<12} {:<width$}",
        style("KIND").bold(),
        style("TYPE").bold(),
        width = width
    );
    for (kind, name) in rows {
        let kind = match kind {
            "resource" => style(kind).green(),
            _ => style(kind).cyan(),
        };
        out.push_str(&format!("\n{:<12} {}", kind, name));
    }
    out
}
