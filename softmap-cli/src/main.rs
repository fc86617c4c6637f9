mod app;
mod commands;
mod output;

use anyhow::Context;
use clap::Parser;

use crate::app::{Cli, Command};

fn main() -> anyhow::Result<()> {
    ctrlc::set_handler(|| {
        eprintln!("\nCancelled.");
        std::process::exit(130);
    })
    .context("failed to set Ctrl+C handler")?;

    let cli = Cli::parse();

    // Show softmap info+ on stderr unless --json; --verbose enables debug; RUST_LOG overrides
    if !cli.global.json {
        let level = if cli.global.verbose {
            log::LevelFilter::Debug
        } else {
            log::LevelFilter::Info
        };
        env_logger::Builder::new()
            .filter_module("softmap", level)
            .parse_default_env()
            .target(env_logger::Target::Stderr)
            .format_timestamp(None)
            .format_module_path(false)
            .format_target(false)
            .init();
    }

    match &cli.command {
        Command::Check { path } => commands::check::run(path, &cli.global),
        Command::Apply {
            path,
            model,
            output,
            declaring_only,
            listing_limit,
        } => commands::apply::run(
            path,
            model,
            &commands::apply::ApplyArgs {
                output: output.as_deref(),
                declaring_only: *declaring_only,
                listing_limit: *listing_limit,
            },
            &cli.global,
        ),
        Command::Realms { model, class } => {
            commands::realms::run(model, class.as_deref(), &cli.global)
        }
    }
}
