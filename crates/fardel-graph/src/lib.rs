//! # fardel-graph
//!
//! The build core of the fardel bundler: module discovery, id assignment,
//! and flattening of the dependency graph.
//!
//! Starting from an entry module, [`GraphBuilder`] walks every statically
//! reachable import, turning each discovered file into an [`Asset`] — its
//! rewritten factory body, the raw specifiers it imports, and a mapping from
//! each specifier to the numeric id of the asset it resolves to. The result
//! is a [`Graph`]: the ordered list of all assets in first-discovery order,
//! with the entry always holding id 1.
//!
//! ## Linking modes
//!
//! Two resolution/identity policies are supported, selected up front and
//! never mixed within a build (see [`GraphMode`]):
//!
//! - **Per-import** (default): specifiers resolve against the build's
//!   working directory, and every import edge gets its own copy of the
//!   target module — a module imported from two places appears twice in the
//!   graph with two ids and executes twice at run time.
//! - **Shared**: specifiers resolve against the importing module's
//!   directory, discoveries are keyed on the cleaned resolved path, and
//!   import cycles are rejected with a named error.
//!
//! ## Example
//!
//! ```no_run
//! use fardel_graph::{GraphBuilder, GraphOptions, OsFileSystem};
//! use std::path::Path;
//!
//! # fn main() -> Result<(), fardel_graph::GraphError> {
//! let fs = OsFileSystem;
//! let options = GraphOptions::new("src/main.js");
//! let graph = GraphBuilder::new(&fs, options).build()?;
//! for asset in graph.iter() {
//!     println!("{} -> {}", asset.id, asset.path.display());
//! }
//! # Ok(())
//! # }
//! ```

mod asset;
mod builder;
mod error;
mod extract;
mod fs;
mod resolve;


pub use asset::{Asset, AssetId, Graph};
pub use builder::{GraphBuilder, GraphMode, GraphOptions};
pub use error::GraphError;
pub use extract::{AssetExtractor, IdAllocator};
pub use fs::{FileSystem, OsFileSystem};

#[cfg(any(test, feature = "test-utils"))]
pub use fs::MemoryFileSystem;

/// Result type alias for graph operations.
pub type Result<T, E = GraphError> = std::result::Result<T, E>;
