use std::path::PathBuf;

use thiserror::Error;

/// Errors that abort a graph build.
///
/// None of these are recovered locally: the first failure ends the whole
/// build with no partial output.
#[derive(Debug, Error)]
pub enum GraphError {
    /// Entry module does not exist.
    #[error("Entry point not found: {}", .0.display())]
    EntryNotFound(PathBuf),

    /// A file exists but could not be read.
    #[error("Failed to read {}: {source}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// A module failed to parse.
    #[error("Failed to parse {}:\n{message}", path.display())]
    Parse { path: PathBuf, message: String },

    /// A module parses but uses syntax the rewrite cannot express.
    #[error("Cannot rewrite {}: {message}", path.display())]
    Transform { path: PathBuf, message: String },

    /// A specifier does not resolve to a file.
    #[error("Failed to resolve '{specifier}' imported from {}", importer.display())]
    Resolution {
        specifier: String,
        importer: PathBuf,
    },

    /// An import cycle was found.
    ///
    /// The cycle is formatted as `a.js -> b.js -> a.js`.
    #[error("Circular dependency detected:\n{cycle}")]
    CircularDependency { cycle: String },
}
