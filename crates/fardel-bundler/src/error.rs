use std::path::PathBuf;

use thiserror::Error;

use fardel_graph::GraphError;

/// Errors that abort artifact assembly.
#[derive(Debug, Error)]
pub enum BundleError {
    /// Graph construction failed.
    #[error(transparent)]
    Graph(#[from] GraphError),

    /// The module table references an id that is not in the table.
    ///
    /// Caught at build time so it can never surface as an artifact-runtime
    /// failure.
    #[error("Module table is inconsistent: {detail}")]
    InvalidTable { detail: String },

    /// Template rendering failed.
    #[error("Failed to render artifact: {0}")]
    Render(#[from] minijinja::Error),

    /// The output file name tried to escape the output directory.
    #[error("Invalid artifact file name: {0}")]
    InvalidFileName(String),

    /// Writing the artifact failed.
    #[error("Failed to write {}: {source}", path.display())]
    Write {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}
