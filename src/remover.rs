//! Best-effort deletion of a single path.

use std::path::Path;

use crate::fs::{EntryKind, Filesystem};
use crate::report::Outcome;

/// Deletes files and directory trees, turning every failure into an
/// [`Outcome`] instead of an error.
#[derive(Clone, Copy)]
pub struct EntryRemover<'a> {
    fs: &'a dyn Filesystem,
}

impl<'a> EntryRemover<'a> {
    pub fn new(fs: &'a dyn Filesystem) -> Self {
        Self { fs }
    }

    /// Remove whatever is at `path`.
    ///
    /// - missing path (or missing parent): [`Outcome::NotFound`], nothing
    ///   touched
    /// - directory: removed recursively, skipping entries that cannot be
    ///   deleted; always [`Outcome::RemovedDirectory`]
    /// - file or symlink: unlinked (symlinks are never followed);
    ///   [`Outcome::Failed`] when the unlink fails
    pub fn remove(&self, path: &Path) -> Outcome {
        let kind = match self.fs.entry_kind(path) {
            Ok(kind) => kind,
            Err(err) if err.is_not_found() => return Outcome::NotFound,
            Err(err) => return Outcome::Failed(err.system_message()),
        };

        match kind {
            EntryKind::Dir => Outcome::RemovedDirectory {
                leftovers: self.fs.remove_tree(path),
            },
            EntryKind::File | EntryKind::Symlink => match self.fs.remove_file(path) {
                Ok(()) => Outcome::RemovedFile,
                // Vanished between lookup and unlink
                Err(err) if err.is_not_found() => Outcome::NotFound,
                Err(err) => Outcome::Failed(err.system_message()),
            },
        }
    }
}
