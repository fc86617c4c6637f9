use std::{fs::File, io::BufWriter, path::Path};

use anyhow::Context;
use serde::Serialize;
use softmap::{mapping::MappingRow, ApplyOptions};

use crate::{
    app::GlobalOptions,
    commands::common::{
        diagnostic_entries, eprint_diagnostics, file_display_name, load_document, load_model,
        print_diagnostics, DiagnosticEntry,
    },
    output::print_output,
};

pub struct ApplyArgs<'a> {
    pub output: Option<&'a Path>,
    pub declaring_only: bool,
    pub listing_limit: Option<usize>,
}

#[derive(Debug, Serialize)]
pub struct ApplyReport<'r> {
    pub path: String,
    pub model: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub output: Option<String>,
    pub rows: &'r [MappingRow],
    pub parse_diagnostics: Vec<DiagnosticEntry>,
    pub apply_diagnostics: Vec<DiagnosticEntry>,
}

pub fn run(path: &Path, model_path: &Path, args: &ApplyArgs<'_>, opts: &GlobalOptions) -> anyhow::Result<()> {
    let document = load_document(path)?;
    let model = load_model(model_path)?;

    let options = ApplyOptions::new()
        .with_expand_realm_members(!args.declaring_only)
        .with_visited_listing_limit(args.listing_limit);
    let result = document
        .apply_with(&model, &options)
        .with_context(|| format!("failed to apply {}", path.display()))?;

    if let Some(output) = args.output {
        let file = File::create(output)
            .with_context(|| format!("failed to create output file: {}", output.display()))?;
        result
            .table()
            .write_to(BufWriter::new(file))
            .with_context(|| format!("failed to write renaming table: {}", output.display()))?;
        log::info!("wrote {} row(s) to {}", result.table().len(), output.display());
    }

    let report = ApplyReport {
        path: path.display().to_string(),
        model: model_path.display().to_string(),
        output: args.output.map(|o| o.display().to_string()),
        rows: result.table().rows(),
        parse_diagnostics: diagnostic_entries(document.diagnostics()),
        apply_diagnostics: diagnostic_entries(result.diagnostics()),
    };

    let name = file_display_name(path);
    print_output(&report, opts, |r| {
        if r.output.is_none() {
            print!("{}", result.table());
            eprint_diagnostics(&name, &r.parse_diagnostics);
            eprint_diagnostics(&name, &r.apply_diagnostics);
        } else {
            print_diagnostics(&name, &r.parse_diagnostics);
            print_diagnostics(&name, &r.apply_diagnostics);
        }
    })
}
