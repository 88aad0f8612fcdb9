//! Per-module extraction: file to [`Asset`].

use std::path::Path;

use indexmap::IndexMap;
use tracing::debug;

use fardel_ast::{scan, AstError, ParseOptions};

use crate::asset::{Asset, AssetId};
use crate::error::GraphError;
use crate::fs::FileSystem;
use crate::Result;

/// Monotonic id source, threaded explicitly through the build.
///
/// Ids start at 1 and increase by discovery order. One value is consumed per
/// successfully extracted asset.
#[derive(Debug)]
pub struct IdAllocator {
    next: u32,
}

impl IdAllocator {
    pub fn new() -> Self {
        Self { next: 1 }
    }

    pub fn allocate(&mut self) -> AssetId {
        let id = AssetId::new(self.next);
        self.next += 1;
        id
    }
}

impl Default for IdAllocator {
    fn default() -> Self {
        Self::new()
    }
}

/// Turns one module file into an [`Asset`].
pub struct AssetExtractor<'f> {
    fs: &'f dyn FileSystem,
}

impl<'f> AssetExtractor<'f> {
    pub fn new(fs: &'f dyn FileSystem) -> Self {
        Self { fs }
    }

    /// Read, scan, and rewrite the module at `path`.
    ///
    /// The returned asset has a freshly allocated id and an empty mapping;
    /// the builder fills the mapping in as the module's dependencies are
    /// discovered.
    ///
    /// # Errors
    ///
    /// Read, parse, and rewrite failures are distinct errors, each carrying
    /// the offending path. Extraction is all-or-nothing.
    pub fn extract(&self, path: &Path, ids: &mut IdAllocator) -> Result<Asset> {
        let source = self.fs.read_to_string(path).map_err(|source| GraphError::Io {
            path: path.to_path_buf(),
            source,
        })?;

        let options = ParseOptions::from_path(path);
        let module = scan(&source, &options).map_err(|err| match err {
            AstError::Parse { message } => GraphError::Parse {
                path: path.to_path_buf(),
                message,
            },
            AstError::Unsupported { construct } => GraphError::Transform {
                path: path.to_path_buf(),
                message: construct,
            },
        })?;

        let deps = module.specifiers().to_vec();
        let code = module.into_factory_body(&source);
        let id = ids.allocate();

        debug!(
            id = id.get(),
            path = %path.display(),
            deps = deps.len(),
            "extracted module"
        );

        Ok(Asset {
            id,
            path: path.to_path_buf(),
            code,
            deps,
            mapping: IndexMap::new(),
        })
    }
}
