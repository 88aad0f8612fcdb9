//! Fardel CLI - minimal JavaScript bundler.
//!
//! Entry point: argument parsing, logging initialization, and command
//! dispatch.

use clap::Parser;
use fardel_cli::{cli, commands, error, logger, ui};
use miette::Result;

fn main() -> Result<()> {
    let args = cli::Cli::parse();

    logger::init_logger(args.verbose, args.quiet, args.no_color);
    ui::init_colors(args.no_color);

    let result = match args.command {
        cli::Command::Build(build_args) => commands::build::execute(build_args),
        cli::Command::Check(check_args) => commands::check::execute(check_args),
    };

    result.map_err(error::cli_error_to_miette)
}
