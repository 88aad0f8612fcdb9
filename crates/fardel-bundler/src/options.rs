//! Bundle configuration and orchestration.

use std::path::{Path, PathBuf};
use std::time::{Duration, Instant};

use tracing::info;

use fardel_graph::{FileSystem, GraphBuilder, GraphMode, GraphOptions};

use crate::render::render;
use crate::table::ModuleTable;
use crate::writer::write_artifact;
use crate::{BundleError, Result};

/// Configuration for one bundle operation.
///
/// Use the builder methods for ergonomic setup, or construct directly for
/// full control.
#[derive(Debug, Clone)]
pub struct BundleOptions {
    /// Entry module path, resolved against `root` if relative.
    pub entry: PathBuf,

    /// Directory the artifact is written into (default: `dist`).
    pub out_dir: PathBuf,

    /// Artifact file name inside `out_dir` (default: `bundle.js`).
    pub file_name: String,

    /// Base directory of the build (default: `.`).
    pub root: PathBuf,

    /// Linking mode (default: per-import).
    pub mode: GraphMode,
}

impl BundleOptions {
    pub fn new(entry: impl Into<PathBuf>) -> Self {
        Self {
            entry: entry.into(),
            out_dir: PathBuf::from("dist"),
            file_name: "bundle.js".to_string(),
            root: PathBuf::from("."),
            mode: GraphMode::default(),
        }
    }

    pub fn out_dir(mut self, out_dir: impl Into<PathBuf>) -> Self {
        self.out_dir = out_dir.into();
        self
    }

    pub fn file_name(mut self, file_name: impl Into<String>) -> Self {
        self.file_name = file_name.into();
        self
    }

    pub fn root(mut self, root: impl Into<PathBuf>) -> Self {
        self.root = root.into();
        self
    }

    pub fn mode(mut self, mode: GraphMode) -> Self {
        self.mode = mode;
        self
    }

    /// Run the full build: graph, table, artifact, write.
    pub fn bundle(&self, fs: &dyn FileSystem) -> Result<BundleOutput> {
        let start = Instant::now();

        let table = self.assemble(fs)?;
        let artifact = render(&table)?;
        let out_path = write_artifact(fs, &self.out_dir_in_root(), &self.file_name, &artifact)?;

        let elapsed = start.elapsed();
        info!(
            modules = table.modules.len(),
            path = %out_path.display(),
            ?elapsed,
            "bundle complete"
        );
        Ok(BundleOutput {
            artifact,
            modules: table.modules.len(),
            out_path,
            elapsed,
        })
    }

    /// Build and validate without writing anything.
    ///
    /// Returns the number of modules the bundle would contain.
    pub fn check(&self, fs: &dyn FileSystem) -> Result<usize> {
        let table = self.assemble(fs)?;
        Ok(table.modules.len())
    }

    fn assemble(&self, fs: &dyn FileSystem) -> Result<ModuleTable> {
        let graph_options = GraphOptions::new(self.entry.clone())
            .root(self.root.clone())
            .mode(self.mode);
        let graph = GraphBuilder::new(fs, graph_options).build()?;
        let table = ModuleTable::from_graph(&graph).ok_or_else(|| BundleError::InvalidTable {
            detail: "graph produced no modules".to_string(),
        })?;
        table.validate()?;
        Ok(table)
    }

    fn out_dir_in_root(&self) -> PathBuf {
        if self.out_dir.is_absolute() {
            self.out_dir.clone()
        } else {
            self.root.join(&self.out_dir)
        }
    }
}

/// Result of a successful bundle.
#[derive(Debug)]
pub struct BundleOutput {
    /// The rendered artifact text.
    pub artifact: String,
    /// Number of modules embedded.
    pub modules: usize,
    /// Where the artifact was written.
    pub out_path: PathBuf,
    /// Wall-clock build time.
    pub elapsed: Duration,
}

impl BundleOutput {
    /// Convenience for reporting: artifact size in bytes.
    pub fn size(&self) -> usize {
        self.artifact.len()
    }
}

impl AsRef<Path> for BundleOutput {
    fn as_ref(&self) -> &Path {
        &self.out_path
    }
}
