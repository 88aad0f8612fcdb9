//! `fardel check` implementation.
//!
//! Runs discovery and table validation without writing output: every module
//! parses, every specifier resolves, every mapping target exists.

use fardel_graph::OsFileSystem;

use crate::cli::CheckArgs;
use crate::config::FardelConfig;
use crate::error::Result;
use crate::ui;

/// Execute the check command.
pub fn execute(args: CheckArgs) -> Result<()> {
    let mut config = FardelConfig::load(args.config.as_deref())?;
    config.apply_check_args(&args);
    let entry = config.require_entry()?.to_string();

    let modules = config.bundle_options(&entry).check(&OsFileSystem)?;

    ui::success(&format!("Graph OK: {modules} modules from {entry}"));
    Ok(())
}
