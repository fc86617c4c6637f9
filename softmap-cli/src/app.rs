use std::path::PathBuf;

use clap::{Parser, Subcommand};

/// softmap - recover obfuscated JVM names from instruction patterns
#[derive(Debug, Parser)]
#[command(name = "softmap", version, about, long_about = None)]
pub struct Cli {
    #[command(flatten)]
    pub global: GlobalOptions,

    #[command(subcommand)]
    pub command: Command,
}

/// Options shared across all subcommands.
#[derive(Debug, Parser)]
pub struct GlobalOptions {
    /// Emit output as JSON instead of human-readable text.
    #[arg(long, global = true)]
    pub json: bool,

    /// Enable verbose (debug-level) logging output.
    #[arg(short, long, global = true)]
    pub verbose: bool,
}

#[derive(Debug, Subcommand)]
pub enum Command {
    /// Parse a softmap document and report its diagnostics.
    Check {
        /// Path to the softmap document.
        #[arg(value_name = "SOFTMAP")]
        path: PathBuf,
    },

    /// Apply a softmap document to a program model and write the renaming table.
    Apply {
        /// Path to the softmap document.
        #[arg(value_name = "SOFTMAP")]
        path: PathBuf,

        /// Program model as a JSON array of classes.
        #[arg(short, long, value_name = "MODEL.json")]
        model: PathBuf,

        /// Write the renaming table to this file instead of stdout.
        #[arg(short, long, value_name = "FILE")]
        output: Option<PathBuf>,

        /// Emit method rows for the declaring class of each realm only.
        #[arg(long)]
        declaring_only: bool,

        /// List at most this many visited methods when an expression matches nothing.
        #[arg(long, value_name = "N")]
        listing_limit: Option<usize>,
    },

    /// Show the method realms of a program model.
    Realms {
        /// Program model as a JSON array of classes.
        #[arg(value_name = "MODEL.json")]
        model: PathBuf,

        /// Show only realms containing methods of this class.
        #[arg(long, value_name = "NAME")]
        class: Option<String>,
    },
}
