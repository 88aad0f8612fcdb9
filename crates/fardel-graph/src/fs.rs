//! Filesystem abstraction for the build.
//!
//! The bundler performs a handful of filesystem operations: read a module,
//! check that a resolved specifier names a file, create the output
//! directory, and write the artifact. Abstracting them behind a trait keeps
//! the core testable against an in-memory tree and keeps platform concerns
//! out of the graph code.
//!
//! Unlike a dev-server-grade bundler, this build is fully synchronous by
//! design — one file at a time, no suspension points — so the trait is
//! synchronous too.

use std::io;
use std::path::Path;
#[cfg(any(test, feature = "test-utils"))]
use std::path::PathBuf;

/// Synchronous filesystem operations used by the build.
pub trait FileSystem {
    /// Read a file as UTF-8 text.
    fn read_to_string(&self, path: &Path) -> io::Result<String>;

    /// Whether a path exists.
    fn exists(&self, path: &Path) -> bool;

    /// Create a directory and its parents.
    fn create_dir_all(&self, path: &Path) -> io::Result<()>;

    /// Write a file, replacing any existing contents.
    fn write(&self, path: &Path, contents: &[u8]) -> io::Result<()>;

    /// Rename a file.
    fn rename(&self, from: &Path, to: &Path) -> io::Result<()>;
}

/// The real filesystem.
#[derive(Debug, Clone, Copy, Default)]
pub struct OsFileSystem;

impl FileSystem for OsFileSystem {
    fn read_to_string(&self, path: &Path) -> io::Result<String> {
        std::fs::read_to_string(path)
    }

    fn exists(&self, path: &Path) -> bool {
        path.exists()
    }

    fn create_dir_all(&self, path: &Path) -> io::Result<()> {
        std::fs::create_dir_all(path)
    }

    fn write(&self, path: &Path, contents: &[u8]) -> io::Result<()> {
        std::fs::write(path, contents)
    }

    fn rename(&self, from: &Path, to: &Path) -> io::Result<()> {
        std::fs::rename(from, to)
    }
}

/// In-memory filesystem for tests.
///
/// Paths are stored as given; callers are expected to use the same cleaned
/// paths the builder produces.
#[cfg(any(test, feature = "test-utils"))]
#[derive(Debug, Default)]
pub struct MemoryFileSystem {
    files: std::cell::RefCell<rustc_hash::FxHashMap<PathBuf, String>>,
    dirs: std::cell::RefCell<rustc_hash::FxHashSet<PathBuf>>,
}

#[cfg(any(test, feature = "test-utils"))]
impl MemoryFileSystem {
    pub fn new() -> Self {
        Self::default()
    }

    /// Seed a file.
    pub fn add_file(&self, path: impl Into<PathBuf>, contents: impl Into<String>) {
        self.files.borrow_mut().insert(path.into(), contents.into());
    }

    /// Read back a file written during the build, if any.
    pub fn file(&self, path: &Path) -> Option<String> {
        self.files.borrow().get(path).cloned()
    }
}

#[cfg(any(test, feature = "test-utils"))]
impl FileSystem for MemoryFileSystem {
    fn read_to_string(&self, path: &Path) -> io::Result<String> {
        self.files.borrow().get(path).cloned().ok_or_else(|| {
            io::Error::new(io::ErrorKind::NotFound, format!("{} not found", path.display()))
        })
    }

    fn exists(&self, path: &Path) -> bool {
        self.files.borrow().contains_key(path) || self.dirs.borrow().contains(path)
    }

    fn create_dir_all(&self, path: &Path) -> io::Result<()> {
        let mut dirs = self.dirs.borrow_mut();
        let mut current = PathBuf::new();
        for component in path.components() {
            current.push(component);
            dirs.insert(current.clone());
        }
        Ok(())
    }

    fn write(&self, path: &Path, contents: &[u8]) -> io::Result<()> {
        let text = String::from_utf8(contents.to_vec())
            .map_err(|e| io::Error::new(io::ErrorKind::InvalidData, e))?;
        self.files.borrow_mut().insert(path.to_path_buf(), text);
        Ok(())
    }

    fn rename(&self, from: &Path, to: &Path) -> io::Result<()> {
        let mut files = self.files.borrow_mut();
        match files.remove(from) {
            Some(contents) => {
                files.insert(to.to_path_buf(), contents);
                Ok(())
            }
            None => Err(io::Error::new(
                io::ErrorKind::NotFound,
                format!("{} not found", from.display()),
            )),
        }
    }
}
