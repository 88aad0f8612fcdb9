//! Specifier-to-path resolution.
//!
//! Resolution is deliberately plain: join, clean, done. No extension
//! inference, no directory-index probing, no package lookup — a specifier
//! must name its file. What varies between linking modes is only the base
//! the join starts from.

use std::path::{Path, PathBuf};

use path_clean::PathClean;

/// Resolve `specifier` against the build's working directory.
///
/// This matches bundlers that treat every specifier as addressed from the
/// project root, regardless of where the importing module lives.
pub(crate) fn from_root(root: &Path, specifier: &str) -> PathBuf {
    root.join(specifier).clean()
}

/// Resolve `specifier` against the importing module's own directory — the
/// conventional relative-import behavior.
pub(crate) fn from_importer(importer: &Path, specifier: &str) -> PathBuf {
    match importer.parent() {
        Some(parent) => parent.join(specifier).clean(),
        None => PathBuf::from(specifier).clean(),
    }
}
