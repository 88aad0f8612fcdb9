//! Error handling for the CLI.
//!
//! A thiserror hierarchy with hint-bearing messages, converted to miette
//! reports at the top level for terminal rendering. Nothing is recovered:
//! the first error ends the command with a single failure report.

use thiserror::Error;

use fardel_bundler::BundleError;
use fardel_graph::GraphError;

/// Top-level CLI error type.
#[derive(Debug, Error)]
pub enum CliError {
    /// Configuration loading or validation failed.
    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),

    /// The bundler failed.
    #[error(transparent)]
    Bundle(#[from] BundleError),

    /// Invalid command-line usage.
    #[error("Invalid argument: {0}")]
    InvalidArgument(String),

    /// I/O errors from the command layer itself.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

/// Configuration-specific errors.
#[derive(Debug, Error)]
pub enum ConfigError {
    /// Config sources did not merge into a valid configuration.
    #[error("{reason}\n\nHint: check fardel.config.json syntax and field types")]
    Invalid { reason: String },

    /// No entry module anywhere in the layered sources.
    #[error("no entry module configured\n\nHint: pass one (`fardel build src/main.js`) or set \"entry\" in fardel.config.json")]
    MissingEntry,
}

/// Result type alias using `CliError` as the default error type.
pub type Result<T, E = CliError> = std::result::Result<T, E>;

/// Convert a CLI error into a miette report for terminal rendering.
///
/// Graph failures get targeted hints; everything else renders its own
/// message.
pub fn cli_error_to_miette(err: CliError) -> miette::Report {
    match err {
        CliError::Bundle(BundleError::Graph(graph_err)) => graph_error_to_miette(graph_err),
        other => miette::miette!("{other}"),
    }
}

fn graph_error_to_miette(err: GraphError) -> miette::Report {
    match err {
        GraphError::Resolution {
            specifier,
            importer,
        } => miette::miette!(
            "Failed to resolve module: {}\nImported from: {}\n\nHint: the specifier must name a file; with per-import linking it resolves from the working directory, with shared linking from the importing module",
            specifier,
            importer.display()
        ),
        GraphError::CircularDependency { cycle } => miette::miette!(
            "Circular dependency detected:\n{}\n\nHint: refactor to remove circular imports",
            cycle
        ),
        other => miette::miette!("{other}"),
    }
}

#[cfg(test)]
mod tests {
    use std::path::PathBuf;

    use super::*;

    #[test]
    fn config_error_carries_hint() {
        let err = ConfigError::MissingEntry;
        assert!(err.to_string().contains("Hint:"));
    }

    #[test]
    fn resolution_report_names_specifier_and_importer() {
        let err = CliError::Bundle(BundleError::Graph(GraphError::Resolution {
            specifier: "./gone.js".to_string(),
            importer: PathBuf::from("src/main.js"),
        }));
        let report = cli_error_to_miette(err);
        let text = format!("{report}");
        assert!(text.contains("./gone.js"));
        assert!(text.contains("src/main.js"));
    }

    #[test]
    fn cycle_report_contains_chain() {
        let err = CliError::Bundle(BundleError::Graph(GraphError::CircularDependency {
            cycle: "a.js -> b.js -> a.js".to_string(),
        }));
        let report = cli_error_to_miette(err);
        assert!(format!("{report}").contains("a.js -> b.js -> a.js"));
    }
}
