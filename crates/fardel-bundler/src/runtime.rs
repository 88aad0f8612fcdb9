//! Native model of the artifact's runtime loader protocol.
//!
//! The emitted bundle embeds a small JavaScript loader: a flat registry of
//! `id -> (factory, mapping)` pairs and a `load(id)` function that hands
//! each factory a scoped import function closed over that module's own
//! mapping. [`ModuleRegistry`] is the same protocol expressed in Rust, with
//! the factory as a boxed callable and the exports container as a generic
//! value.
//!
//! Two properties of the protocol are deliberate and load-bearing:
//!
//! - **A fresh module record per resolution.** Every `resolve` call builds a
//!   new exports container before invoking the factory.
//! - **No memoization.** Resolving a module imported from N places executes
//!   its factory N times — top-level side effects repeat per import edge.
//!   Modules are not singletons.

use indexmap::IndexMap;
use rustc_hash::FxHashMap;
use thiserror::Error;

/// Failures while executing the loader protocol.
///
/// Both indicate a malformed registry; a table that passed
/// [`crate::ModuleTable::validate`] can produce neither.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum LoaderError {
    /// The requested id has no registry entry.
    #[error("Module {0} is missing from the bundle")]
    UnknownModule(u32),

    /// A factory imported a specifier absent from its module's mapping.
    #[error("Unresolved import '{specifier}' in module {module}")]
    UnresolvedImport { specifier: String, module: u32 },
}

/// The scoped import function a factory receives: raw specifier in,
/// resolved exports out.
pub type ScopedImport<'a, E> = dyn FnMut(&str) -> Result<E, LoaderError> + 'a;

/// A module body: populates `exports` by side effect, importing through the
/// scoped function it is given.
pub type Factory<E> =
    Box<dyn Fn(&mut ScopedImport<'_, E>, &mut E) -> Result<(), LoaderError>>;

struct RegistryEntry<E> {
    factory: Factory<E>,
    mapping: IndexMap<String, u32>,
}

/// Flat keyed registry of instantiable modules.
pub struct ModuleRegistry<E> {
    entries: FxHashMap<u32, RegistryEntry<E>>,
}

impl<E> Default for ModuleRegistry<E> {
    fn default() -> Self {
        Self::new()
    }
}

impl<E> ModuleRegistry<E> {
    pub fn new() -> Self {
        Self {
            entries: FxHashMap::default(),
        }
    }

    /// Register a module under `id` with its specifier-to-id mapping.
    pub fn insert(
        &mut self,
        id: u32,
        mapping: IndexMap<String, u32>,
        factory: Factory<E>,
    ) {
        self.entries.insert(id, RegistryEntry { factory, mapping });
    }
}

impl<E: Default> ModuleRegistry<E> {
    /// Instantiate and execute module `id`, returning its exports.
    ///
    /// The factory runs with a fresh exports container and a scoped import
    /// function closed over this module's mapping; nested imports recurse
    /// through `resolve` again, so execution order is the depth-first order
    /// of import edges.
    pub fn resolve(&self, id: u32) -> Result<E, LoaderError> {
        let entry = self
            .entries
            .get(&id)
            .ok_or(LoaderError::UnknownModule(id))?;

        let mut exports = E::default();
        let mut scoped = |specifier: &str| -> Result<E, LoaderError> {
            let target = entry.mapping.get(specifier).copied().ok_or_else(|| {
                LoaderError::UnresolvedImport {
                    specifier: specifier.to_string(),
                    module: id,
                }
            })?;
            self.resolve(target)
        };
        (entry.factory)(&mut scoped, &mut exports)?;
        Ok(exports)
    }
}
