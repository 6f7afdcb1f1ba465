//! Filesystem access behind a trait seam.
//!
//! Every component that touches storage goes through [`Filesystem`]. The
//! sweeper runs against [`OsFilesystem`] in production; [`MemoryFilesystem`]
//! keeps an in-memory tree and a log of every call, so cleaners can be
//! exercised for simulated platforms and their access order asserted.

use std::path::{Path, PathBuf};

use crate::error::Result;

mod memory;
mod os;

pub use memory::{FsCall, MemoryFilesystem};
pub use os::OsFilesystem;

/// What a path points at, without following a final symlink.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum EntryKind {
    File,
    Dir,
    Symlink,
}

/// One entry produced by [`Filesystem::walk`].
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct WalkEntry {
    pub path: PathBuf,
    pub is_dir: bool,
}

/// Lazy, depth-first sequence of walk entries.
pub type Walk<'a> = Box<dyn Iterator<Item = Result<WalkEntry>> + 'a>;

pub trait Filesystem {
    /// Kind of the entry at `path`. A missing path is a not-found error.
    fn entry_kind(&self, path: &Path) -> Result<EntryKind>;

    /// Whether `path` exists, following symlinks.
    fn exists(&self, path: &Path) -> bool;

    /// Whether `path` is a directory, following symlinks.
    fn is_dir(&self, path: &Path) -> bool;

    /// Immediate children of a directory, sorted by path.
    fn read_dir(&self, path: &Path) -> Result<Vec<PathBuf>>;

    /// Walk everything below `root` (excluding `root` itself) depth first,
    /// descending at most `max_depth` levels. Symlinks are not followed.
    fn walk<'a>(&'a self, root: &Path, max_depth: Option<usize>) -> Walk<'a>;

    /// Unlink a file or symlink.
    fn remove_file(&self, path: &Path) -> Result<()>;

    /// Remove a directory tree, continuing past entries that cannot be
    /// removed. Returns the number of entries left behind.
    fn remove_tree(&self, path: &Path) -> usize;
}
