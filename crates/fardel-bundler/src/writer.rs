//! Artifact output.
//!
//! The artifact is written to a temporary sibling first and renamed into
//! place, so a failed write never leaves a truncated bundle where a good
//! one used to be.

use std::path::{Path, PathBuf};

use path_clean::PathClean;
use tracing::debug;

use fardel_graph::FileSystem;

use crate::error::BundleError;
use crate::Result;

/// Write `artifact` as `file_name` inside `out_dir`, creating the directory
/// if needed. Returns the final path.
///
/// `file_name` must be a bare file name: anything with path separators or
/// parent components is rejected rather than allowed to escape the output
/// directory.
pub fn write_artifact(
    fs: &dyn FileSystem,
    out_dir: &Path,
    file_name: &str,
    artifact: &str,
) -> Result<PathBuf> {
    validate_file_name(file_name)?;

    let out_dir = out_dir.to_path_buf().clean();
    fs.create_dir_all(&out_dir).map_err(|source| BundleError::Write {
        path: out_dir.clone(),
        source,
    })?;

    let target = out_dir.join(file_name);
    let staging = out_dir.join(format!("{file_name}.tmp"));

    fs.write(&staging, artifact.as_bytes())
        .map_err(|source| BundleError::Write {
            path: staging.clone(),
            source,
        })?;
    fs.rename(&staging, &target)
        .map_err(|source| BundleError::Write {
            path: target.clone(),
            source,
        })?;

    debug!(path = %target.display(), bytes = artifact.len(), "wrote artifact");
    Ok(target)
}

fn validate_file_name(file_name: &str) -> Result<()> {
    let path = Path::new(file_name);
    let mut components = path.components();
    let is_bare = matches!(
        (components.next(), components.next()),
        (Some(std::path::Component::Normal(_)), None)
    );
    if !is_bare {
        return Err(BundleError::InvalidFileName(file_name.to_string()));
    }
    Ok(())
}
