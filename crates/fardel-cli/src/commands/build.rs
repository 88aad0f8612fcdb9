//! `fardel build` implementation.

use fardel_graph::OsFileSystem;
use tracing::debug;

use crate::cli::BuildArgs;
use crate::config::FardelConfig;
use crate::error::Result;
use crate::ui;

/// Execute the build command.
///
/// 1. Layer configuration (CLI > env > config file > defaults).
/// 2. Build the graph, render the artifact, write it.
/// 3. Report the result.
pub fn execute(args: BuildArgs) -> Result<()> {
    let mut config = FardelConfig::load(args.config.as_deref())?;
    config.apply_build_args(&args);
    let entry = config.require_entry()?.to_string();
    debug!(?config, "configuration resolved");

    ui::info(&format!("Building: {entry}"));

    let output = config.bundle_options(&entry).bundle(&OsFileSystem)?;

    ui::success(&format!(
        "Bundled {} modules in {} → {} ({})",
        output.modules,
        ui::format_duration(output.elapsed),
        output.out_path.display(),
        ui::format_size(output.size()),
    ));
    Ok(())
}
