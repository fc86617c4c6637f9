use std::path::Path;

use anyhow::bail;
use serde::Serialize;

use crate::{
    app::GlobalOptions,
    commands::common::{diagnostic_entries, file_display_name, load_document, print_diagnostics, DiagnosticEntry},
    output::print_output,
};

#[derive(Debug, Serialize)]
pub struct CheckResult {
    pub path: String,
    pub version: Option<u32>,
    pub expressions: usize,
    pub instructions: usize,
    pub valid: bool,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub diagnostics: Vec<DiagnosticEntry>,
}

pub fn run(path: &Path, opts: &GlobalOptions) -> anyhow::Result<()> {
    let document = load_document(path)?;

    let result = CheckResult {
        path: path.display().to_string(),
        version: document.version().map(|v| v.number()),
        expressions: document.expressions().len(),
        instructions: document
            .expressions()
            .iter()
            .map(|e| e.instructions.len())
            .sum(),
        valid: !document.diagnostics().has_errors(),
        diagnostics: diagnostic_entries(document.diagnostics()),
    };

    let name = file_display_name(path);
    print_output(&result, opts, |r| {
        let status = if r.valid { "PASS" } else { "FAIL" };
        println!(
            "{status}  {path}  ({expressions} expression(s), {instructions} instruction pattern(s))",
            path = r.path,
            expressions = r.expressions,
            instructions = r.instructions
        );
        print_diagnostics(&name, &r.diagnostics);
    })?;

    if !result.valid {
        bail!(
            "{} parse error(s) in {}",
            document.diagnostics().error_count(),
            path.display()
        );
    }
    Ok(())
}
