//! Asset and graph data model.

use std::fmt;
use std::path::PathBuf;

use indexmap::IndexMap;
use serde::{Deserialize, Serialize};

/// Numeric module identifier, unique within one build.
///
/// Ids are assigned in first-discovery order by [`crate::IdAllocator`],
/// starting at 1; the entry module always holds id 1. At run time they are
/// the only way modules refer to each other.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize,
)]
#[serde(transparent)]
pub struct AssetId(u32);

impl AssetId {
    /// Construct an id from its raw value.
    ///
    /// During a build, ids come from the allocator; this is for consumers
    /// reconstructing tables from serialized form.
    pub fn new(value: u32) -> Self {
        Self(value)
    }

    /// The raw integer value.
    pub fn get(self) -> u32 {
        self.0
    }
}

impl fmt::Display for AssetId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.0.fmt(f)
    }
}

/// One discovered module.
///
/// Created when its file is read and parsed; immutable afterwards except for
/// the incremental population of `mapping` while its dependencies are
/// visited.
#[derive(Debug, Clone)]
pub struct Asset {
    /// Identifier assigned at discovery.
    pub id: AssetId,
    /// Resolved filesystem path the module was read from.
    pub path: PathBuf,
    /// Module body, already rewritten to the factory convention. Opaque to
    /// the graph.
    pub code: String,
    /// Raw import specifiers exactly as written, in source order, duplicates
    /// preserved.
    pub deps: Vec<String>,
    /// Specifier -> id of the asset it resolves to. Complete once this
    /// asset's children have all been discovered.
    pub mapping: IndexMap<String, AssetId>,
}

/// The complete, ordered output of one graph build.
///
/// Assets appear in first-discovery order; the first asset is the entry.
#[derive(Debug, Default)]
pub struct Graph {
    assets: Vec<Asset>,
}

impl Graph {
    pub(crate) fn from_assets(assets: Vec<Asset>) -> Self {
        Self { assets }
    }

    /// Number of assets in the graph.
    pub fn len(&self) -> usize {
        self.assets.len()
    }

    pub fn is_empty(&self) -> bool {
        self.assets.is_empty()
    }

    /// The entry asset's id (always 1 for a non-empty graph).
    pub fn entry_id(&self) -> Option<AssetId> {
        self.assets.first().map(|asset| asset.id)
    }

    /// Assets in discovery order.
    pub fn iter(&self) -> impl Iterator<Item = &Asset> {
        self.assets.iter()
    }

    /// Look an asset up by id.
    pub fn get(&self, id: AssetId) -> Option<&Asset> {
        self.assets.iter().find(|asset| asset.id == id)
    }
}

impl<'a> IntoIterator for &'a Graph {
    type Item = &'a Asset;
    type IntoIter = std::slice::Iter<'a, Asset>;

    fn into_iter(self) -> Self::IntoIter {
        self.assets.iter()
    }
}
