//! Command-line interface definition.
//!
//! Defined with clap v4 derive macros. Global flags control verbosity and
//! color for every subcommand.

use std::path::PathBuf;

use clap::{Args, Parser, Subcommand, ValueEnum};
use serde::{Deserialize, Serialize};

use fardel_graph::GraphMode;

/// Fardel - a minimal JavaScript module bundler
#[derive(Parser, Debug)]
#[command(
    name = "fardel",
    version,
    about = "A minimal JavaScript module bundler",
    long_about = "Fardel flattens an ES-module graph into a single self-executing\n\
                  bundle driven by a tiny numeric-id runtime loader."
)]
pub struct Cli {
    /// Enable verbose logging (debug level)
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// Suppress all output except errors
    #[arg(short, long, global = true, conflicts_with = "verbose")]
    pub quiet: bool,

    /// Disable colored output
    #[arg(long, global = true)]
    pub no_color: bool,

    /// Subcommand to execute
    #[command(subcommand)]
    pub command: Command,
}

#[derive(Subcommand, Debug)]
pub enum Command {
    /// Bundle an entry module and write the artifact
    Build(BuildArgs),
    /// Build the graph and validate it without writing output
    Check(CheckArgs),
}

#[derive(Args, Debug)]
pub struct BuildArgs {
    /// Entry module path
    ///
    /// Falls back to the `entry` key in fardel.config.json when omitted.
    pub entry: Option<String>,

    /// Output directory for the bundle
    #[arg(long)]
    pub out_dir: Option<PathBuf>,

    /// Artifact file name inside the output directory
    #[arg(long)]
    pub file_name: Option<String>,

    /// How imports resolve and whether modules are shared
    #[arg(long, value_enum)]
    pub linking: Option<Linking>,

    /// Explicit config file path (default: ./fardel.config.json)
    #[arg(long)]
    pub config: Option<PathBuf>,
}

#[derive(Args, Debug)]
pub struct CheckArgs {
    /// Entry module path
    pub entry: Option<String>,

    /// How imports resolve and whether modules are shared
    #[arg(long, value_enum)]
    pub linking: Option<Linking>,

    /// Explicit config file path (default: ./fardel.config.json)
    #[arg(long)]
    pub config: Option<PathBuf>,
}

/// Linking policy, as exposed on the command line and in config files.
#[derive(ValueEnum, Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum Linking {
    /// Resolve specifiers from the working directory; every import edge
    /// gets its own copy of the module
    PerImport,
    /// Resolve specifiers from the importing module; one copy per file,
    /// cycles rejected
    Shared,
}

impl From<Linking> for GraphMode {
    fn from(linking: Linking) -> Self {
        match linking {
            Linking::PerImport => GraphMode::PerImport,
            Linking::Shared => GraphMode::Shared,
        }
    }
}
