use std::fs;
use std::io;
use std::path::{Path, PathBuf};

use walkdir::WalkDir;

use super::{EntryKind, Filesystem, Walk, WalkEntry};
use crate::error::{Result, SweepError};

/// The real filesystem.
#[derive(Clone, Copy, Debug, Default)]
pub struct OsFilesystem;

fn io_error(path: &Path) -> impl FnOnce(io::Error) -> SweepError + '_ {
    move |source| SweepError::Io {
        path: path.to_path_buf(),
        source,
    }
}

fn walk_error(err: walkdir::Error) -> SweepError {
    let path = err.path().map(Path::to_path_buf).unwrap_or_default();
    SweepError::Io {
        path,
        source: err.into(),
    }
}

impl Filesystem for OsFilesystem {
    fn entry_kind(&self, path: &Path) -> Result<EntryKind> {
        let file_type = fs::symlink_metadata(path)
            .map_err(io_error(path))?
            .file_type();

        Ok(if file_type.is_symlink() {
            EntryKind::Symlink
        } else if file_type.is_dir() {
            EntryKind::Dir
        } else {
            EntryKind::File
        })
    }

    fn exists(&self, path: &Path) -> bool {
        path.exists()
    }

    fn is_dir(&self, path: &Path) -> bool {
        path.is_dir()
    }

    fn read_dir(&self, path: &Path) -> Result<Vec<PathBuf>> {
        let mut children = fs::read_dir(path)
            .map_err(io_error(path))?
            .map(|entry| entry.map(|e| e.path()).map_err(io_error(path)))
            .collect::<Result<Vec<_>>>()?;
        children.sort();
        Ok(children)
    }

    fn walk<'a>(&'a self, root: &Path, max_depth: Option<usize>) -> Walk<'a> {
        let mut walker = WalkDir::new(root)
            .min_depth(1)
            .follow_links(false)
            .sort_by_file_name();
        if let Some(depth) = max_depth {
            walker = walker.max_depth(depth);
        }

        Box::new(walker.into_iter().map(|entry| -> Result<WalkEntry> {
            let entry = entry.map_err(walk_error)?;
            Ok(WalkEntry {
                is_dir: entry.file_type().is_dir(),
                path: entry.into_path(),
            })
        }))
    }

    fn remove_file(&self, path: &Path) -> Result<()> {
        fs::remove_file(path)
            .or_else(|err| {
                // Directory symlinks on Windows are unlinked with remove_dir
                if cfg!(windows) && path.is_symlink() {
                    fs::remove_dir(path)
                } else {
                    Err(err)
                }
            })
            .map_err(io_error(path))
    }

    fn remove_tree(&self, path: &Path) -> usize {
        let mut leftovers = 0;

        for entry in WalkDir::new(path).follow_links(false).contents_first(true) {
            let removed = match entry {
                Ok(entry) if entry.file_type().is_dir() => fs::remove_dir(entry.path()),
                Ok(entry) => fs::remove_file(entry.path()),
                Err(err) => Err(err.into()),
            };

            if removed.is_err() {
                leftovers += 1;
            }
        }

        leftovers
    }
}
