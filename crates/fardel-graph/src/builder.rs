//! Graph construction.

use std::path::PathBuf;

use rustc_hash::FxHashMap;
use tracing::info;

use crate::asset::{Asset, AssetId, Graph};
use crate::error::GraphError;
use crate::extract::{AssetExtractor, IdAllocator};
use crate::fs::FileSystem;
use crate::resolve;
use crate::Result;

/// Resolution and module-identity policy for one build.
///
/// The two modes are distinct designs, not knobs to combine: each fixes both
/// where specifiers resolve from and what makes two imports "the same
/// module".
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum GraphMode {
    /// Resolve specifiers against the build's working directory and give
    /// every import edge its own copy of the target module.
    ///
    /// A module imported from two places is discovered twice, receives two
    /// ids, and its factory executes once per import edge at run time.
    #[default]
    PerImport,
    /// Resolve specifiers against the importing module's directory and share
    /// one asset per resolved path. Import cycles are rejected.
    Shared,
}

/// Options for [`GraphBuilder`].
#[derive(Debug, Clone)]
pub struct GraphOptions {
    /// Entry module, resolved against `root` if relative.
    pub entry: PathBuf,
    /// Base directory for the build.
    pub root: PathBuf,
    /// Linking mode.
    pub mode: GraphMode,
}

impl GraphOptions {
    pub fn new(entry: impl Into<PathBuf>) -> Self {
        Self {
            entry: entry.into(),
            root: PathBuf::from("."),
            mode: GraphMode::default(),
        }
    }

    pub fn root(mut self, root: impl Into<PathBuf>) -> Self {
        self.root = root.into();
        self
    }

    pub fn mode(mut self, mode: GraphMode) -> Self {
        self.mode = mode;
        self
    }
}

/// Builds the flattened module graph for one entry point.
///
/// The working sequence doubles as the result: assets are processed in
/// position order, and children discovered along the way are appended behind
/// the positions still waiting. The final order is therefore first-discovery
/// order, with the entry at position 0 holding id 1.
pub struct GraphBuilder<'f> {
    fs: &'f dyn FileSystem,
    options: GraphOptions,
}

impl<'f> GraphBuilder<'f> {
    pub fn new(fs: &'f dyn FileSystem, options: GraphOptions) -> Self {
        Self { fs, options }
    }

    /// Walk every statically reachable import and return the full graph.
    pub fn build(self) -> Result<Graph> {
        let entry_path = {
            use path_clean::PathClean;
            self.options.root.join(&self.options.entry).clean()
        };
        if !self.fs.exists(&entry_path) {
            return Err(GraphError::EntryNotFound(entry_path));
        }

        let extractor = AssetExtractor::new(self.fs);
        let mut ids = IdAllocator::new();

        let entry_asset = extractor.extract(&entry_path, &mut ids)?;
        let mut assets: Vec<Asset> = vec![entry_asset];
        // Ancestor chains (per-import mode): resolved paths from the entry
        // down to each asset's importer.
        let mut ancestors: Vec<Vec<PathBuf>> = vec![Vec::new()];
        // Discovery memo (shared mode): resolved path -> id.
        let mut seen: FxHashMap<PathBuf, AssetId> = FxHashMap::default();
        if self.options.mode == GraphMode::Shared {
            if let Some(entry) = assets.first() {
                seen.insert(entry.path.clone(), entry.id);
            }
        }

        let mut index = 0;
        while index < assets.len() {
            let importer = assets[index].path.clone();
            let deps = assets[index].deps.clone();
            let chain = ancestors[index].clone();

            for specifier in deps {
                let resolved = match self.options.mode {
                    GraphMode::PerImport => resolve::from_root(&self.options.root, &specifier),
                    GraphMode::Shared => resolve::from_importer(&importer, &specifier),
                };
                if !self.fs.exists(&resolved) {
                    return Err(GraphError::Resolution {
                        specifier,
                        importer,
                    });
                }

                match self.options.mode {
                    GraphMode::PerImport => {
                        if let Some(cycle) = cycle_through(&chain, &importer, &resolved) {
                            return Err(GraphError::CircularDependency { cycle });
                        }
                        let child = extractor.extract(&resolved, &mut ids)?;
                        let child_id = child.id;
                        let mut child_chain = chain.clone();
                        child_chain.push(importer.clone());
                        assets[index].mapping.insert(specifier, child_id);
                        assets.push(child);
                        ancestors.push(child_chain);
                    }
                    GraphMode::Shared => {
                        let child_id = match seen.get(&resolved) {
                            Some(&id) => id,
                            None => {
                                let child = extractor.extract(&resolved, &mut ids)?;
                                let id = child.id;
                                seen.insert(resolved.clone(), id);
                                assets.push(child);
                                ancestors.push(Vec::new());
                                id
                            }
                        };
                        assets[index].mapping.insert(specifier, child_id);
                    }
                }
            }

            index += 1;
        }

        if self.options.mode == GraphMode::Shared {
            if let Some(cycle) = find_cycle(&assets) {
                return Err(GraphError::CircularDependency { cycle });
            }
        }

        info!(modules = assets.len(), "module graph complete");
        Ok(Graph::from_assets(assets))
    }
}

/// In per-import mode a discovery whose resolved path is already on its own
/// ancestor chain would re-discover itself forever; name the cycle instead.
fn cycle_through(chain: &[PathBuf], importer: &PathBuf, resolved: &PathBuf) -> Option<String> {
    let mut lineage: Vec<&PathBuf> = chain.iter().collect();
    lineage.push(importer);
    let start = lineage.iter().position(|path| *path == resolved)?;
    let mut names: Vec<String> = lineage[start..]
        .iter()
        .map(|path| path.display().to_string())
        .collect();
    names.push(resolved.display().to_string());
    Some(names.join(" -> "))
}

/// Depth-first three-color walk over mapping edges (shared mode).
fn find_cycle(assets: &[Asset]) -> Option<String> {
    #[derive(Clone, Copy, PartialEq)]
    enum Mark {
        White,
        Gray,
        Black,
    }

    let index_of: FxHashMap<AssetId, usize> = assets
        .iter()
        .enumerate()
        .map(|(index, asset)| (asset.id, index))
        .collect();
    let mut marks = vec![Mark::White; assets.len()];
    let mut path: Vec<usize> = Vec::new();

    fn visit(
        current: usize,
        assets: &[Asset],
        index_of: &FxHashMap<AssetId, usize>,
        marks: &mut [Mark],
        path: &mut Vec<usize>,
    ) -> Option<String> {
        marks[current] = Mark::Gray;
        path.push(current);
        for child_id in assets[current].mapping.values() {
            let Some(&child) = index_of.get(child_id) else {
                continue;
            };
            match marks[child] {
                Mark::Gray => {
                    let start = path.iter().position(|&i| i == child).unwrap_or(0);
                    let mut names: Vec<String> = path[start..]
                        .iter()
                        .map(|&i| assets[i].path.display().to_string())
                        .collect();
                    names.push(assets[child].path.display().to_string());
                    return Some(names.join(" -> "));
                }
                Mark::White => {
                    if let Some(cycle) = visit(child, assets, index_of, marks, path) {
                        return Some(cycle);
                    }
                }
                Mark::Black => {}
            }
        }
        path.pop();
        marks[current] = Mark::Black;
        None
    }

    (0..assets.len()).find_map(|start| {
        if marks[start] == Mark::White {
            visit(start, assets, &index_of, &mut marks, &mut path)
        } else {
            None
        }
    })
}
