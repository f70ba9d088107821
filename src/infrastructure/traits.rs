//! Catalog file access behind a trait, so services can run on in-memory files.

use std::io;
use std::path::Path;

/// Read access to catalog files.
pub trait FileSystem: Send + Sync {
    /// Whole file as UTF-8 text.
    fn read_to_string(&self, path: &Path) -> io::Result<String>;

    /// True for an existing regular file (not a directory).
    fn is_file(&self, path: &Path) -> bool;
}

/// Backed by `std::fs`.
#[derive(Debug, Default, Clone, Copy)]
pub struct RealFileSystem;

impl FileSystem for RealFileSystem {
    fn read_to_string(&self, path: &Path) -> io::Result<String> {
        std::fs::read_to_string(path)
    }

    fn is_file(&self, path: &Path) -> bool {
        path.is_file()
    }
}
