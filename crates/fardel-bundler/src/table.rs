//! Serializable projection of the graph.

use indexmap::IndexMap;
use serde::{Deserialize, Serialize};

use fardel_graph::{AssetId, Graph};

use crate::error::BundleError;
use crate::Result;

/// One module's embeddable data: its factory body and its specifier-to-id
/// mapping.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ModuleRecord {
    pub code: String,
    pub mapping: IndexMap<String, AssetId>,
}

/// The artifact's data section: `id -> (code, mapping)` for every module,
/// plus the id execution starts from.
///
/// This is the entire boundary between graph construction and artifact
/// emission — rendering works from this table alone and performs no path
/// resolution or id assignment of its own. The table round-trips through
/// serde unchanged.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ModuleTable {
    /// Id the loader resolves first.
    pub entry: AssetId,
    /// Module records in discovery order.
    pub modules: IndexMap<AssetId, ModuleRecord>,
}

impl ModuleTable {
    /// Project a graph into its table form.
    pub fn from_graph(graph: &Graph) -> Option<Self> {
        let entry = graph.entry_id()?;
        let modules = graph
            .iter()
            .map(|asset| {
                (
                    asset.id,
                    ModuleRecord {
                        code: asset.code.clone(),
                        mapping: asset.mapping.clone(),
                    },
                )
            })
            .collect();
        Some(Self { entry, modules })
    }

    /// Check internal consistency: the entry id and every mapping target
    /// must name a table entry.
    ///
    /// A table that fails this check would produce an artifact that throws
    /// at run time; failing the build instead keeps the "no partial output"
    /// contract.
    pub fn validate(&self) -> Result<()> {
        if !self.modules.contains_key(&self.entry) {
            return Err(BundleError::InvalidTable {
                detail: format!("entry id {} has no module record", self.entry),
            });
        }
        for (id, record) in &self.modules {
            for (specifier, target) in &record.mapping {
                if !self.modules.contains_key(target) {
                    return Err(BundleError::InvalidTable {
                        detail: format!(
                            "module {id} maps '{specifier}' to unknown id {target}"
                        ),
                    });
                }
            }
        }
        Ok(())
    }
}
