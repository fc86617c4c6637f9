use std::path::Path;

use anyhow::Context;
use serde::Serialize;
use softmap::{
    diagnostics::{Diagnostic, Diagnostics},
    model::ProgramModel,
    Document,
};

/// Read and parse a softmap document.
pub fn load_document(path: &Path) -> anyhow::Result<Document> {
    let source = std::fs::read_to_string(path)
        .with_context(|| format!("failed to read softmap document: {}", path.display()))?;
    Ok(Document::parse(&source))
}

/// Read a program model serialized as a JSON array of classes.
pub fn load_model(path: &Path) -> anyhow::Result<ProgramModel> {
    let text = std::fs::read_to_string(path)
        .with_context(|| format!("failed to read program model: {}", path.display()))?;
    let model: ProgramModel = serde_json::from_str(&text)
        .with_context(|| format!("failed to parse program model: {}", path.display()))?;
    log::debug!(
        "loaded {} class(es) with {} method(s) from {}",
        model.len(),
        model.method_count(),
        file_display_name(path)
    );
    Ok(model)
}

/// A diagnostic flattened for output.
#[derive(Debug, Serialize)]
pub struct DiagnosticEntry {
    pub severity: String,
    pub category: String,
    pub line: u32,
    pub column: u32,
    pub message: String,
}

impl From<&Diagnostic> for DiagnosticEntry {
    fn from(diagnostic: &Diagnostic) -> Self {
        Self {
            severity: diagnostic.severity.to_string(),
            category: diagnostic.category.to_string(),
            line: diagnostic.location.line,
            column: diagnostic.location.column,
            message: diagnostic.message.clone(),
        }
    }
}

/// Flatten all entries of `diagnostics`.
pub fn diagnostic_entries(diagnostics: &Diagnostics) -> Vec<DiagnosticEntry> {
    diagnostics.iter().map(DiagnosticEntry::from).collect()
}

fn format_diagnostic(file: &str, d: &DiagnosticEntry) -> String {
    format!(
        "{file}:{}:{}: [{}] [{}] {}",
        d.line, d.column, d.severity, d.category, d.message
    )
}

/// Print diagnostics prefixed with the file they refer to.
pub fn print_diagnostics(file: &str, entries: &[DiagnosticEntry]) {
    for d in entries {
        println!("{}", format_diagnostic(file, d));
    }
}

/// Like [`print_diagnostics`], but on stderr so stdout stays reserved for the renaming table.
pub fn eprint_diagnostics(file: &str, entries: &[DiagnosticEntry]) {
    for d in entries {
        eprintln!("{}", format_diagnostic(file, d));
    }
}

/// Extract a display-friendly filename from a path.
pub fn file_display_name(path: &Path) -> String {
    path.file_name().map_or_else(
        || path.display().to_string(),
        |f| f.to_string_lossy().to_string(),
    )
}
