use std::cell::RefCell;
use std::collections::{BTreeMap, BTreeSet};
use std::io;
use std::path::{Path, PathBuf};

use super::{EntryKind, Filesystem, Walk, WalkEntry};
use crate::error::{Result, SweepError};

/// A filesystem operation recorded by [`MemoryFilesystem`].
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum FsCall {
    EntryKind(PathBuf),
    Exists(PathBuf),
    IsDir(PathBuf),
    ReadDir(PathBuf),
    Walk(PathBuf),
    RemoveFile(PathBuf),
    RemoveTree(PathBuf),
}

impl FsCall {
    pub fn path(&self) -> &Path {
        match self {
            FsCall::EntryKind(path)
            | FsCall::Exists(path)
            | FsCall::IsDir(path)
            | FsCall::ReadDir(path)
            | FsCall::Walk(path)
            | FsCall::RemoveFile(path)
            | FsCall::RemoveTree(path) => path,
        }
    }

    pub fn is_mutation(&self) -> bool {
        matches!(self, FsCall::RemoveFile(_) | FsCall::RemoveTree(_))
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
enum Node {
    File,
    Dir,
}

/// An in-memory directory tree that records every call made against it.
///
/// Paths can be locked, which makes removing them fail with a permission
/// error the way a file held open by a running browser does, or marked
/// unreadable, which makes listing them fail.
#[derive(Debug, Default)]
pub struct MemoryFilesystem {
    nodes: RefCell<BTreeMap<PathBuf, Node>>,
    locked: RefCell<BTreeSet<PathBuf>>,
    unreadable: RefCell<BTreeSet<PathBuf>>,
    calls: RefCell<Vec<FsCall>>,
}

impl MemoryFilesystem {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a file, creating its parent directories.
    pub fn add_file(&self, path: impl AsRef<Path>) -> &Self {
        let path = path.as_ref();
        if let Some(parent) = path.parent() {
            self.add_dir(parent);
        }
        self.nodes.borrow_mut().insert(path.to_path_buf(), Node::File);
        self
    }

    /// Add a directory and all of its ancestors.
    pub fn add_dir(&self, path: impl AsRef<Path>) -> &Self {
        let mut nodes = self.nodes.borrow_mut();
        for ancestor in path.as_ref().ancestors() {
            if ancestor.as_os_str().is_empty() {
                continue;
            }
            nodes.entry(ancestor.to_path_buf()).or_insert(Node::Dir);
        }
        self
    }

    /// Make removal of `path` fail with a permission error.
    pub fn lock(&self, path: impl AsRef<Path>) -> &Self {
        self.locked.borrow_mut().insert(path.as_ref().to_path_buf());
        self
    }

    /// Make listing the directory at `path` fail with a permission error.
    pub fn make_unreadable(&self, path: impl AsRef<Path>) -> &Self {
        self.unreadable
            .borrow_mut()
            .insert(path.as_ref().to_path_buf());
        self
    }

    pub fn contains(&self, path: impl AsRef<Path>) -> bool {
        self.nodes.borrow().contains_key(path.as_ref())
    }

    /// Every call made so far, in order.
    pub fn calls(&self) -> Vec<FsCall> {
        self.calls.borrow().clone()
    }

    pub fn clear_calls(&self) {
        self.calls.borrow_mut().clear();
    }

    fn record(&self, call: FsCall) {
        self.calls.borrow_mut().push(call);
    }

    fn node(&self, path: &Path) -> Option<Node> {
        self.nodes.borrow().get(path).copied()
    }

    fn children(&self, path: &Path) -> Result<Vec<PathBuf>> {
        match self.node(path) {
            None => return Err(io_error(path, io::ErrorKind::NotFound)),
            Some(Node::File) => return Err(io_error(path, io::ErrorKind::NotADirectory)),
            Some(Node::Dir) => {}
        }
        if self.unreadable.borrow().contains(path) {
            return Err(io_error(path, io::ErrorKind::PermissionDenied));
        }

        Ok(self
            .nodes
            .borrow()
            .keys()
            .filter(|candidate| candidate.parent() == Some(path))
            .cloned()
            .collect())
    }
}

fn io_error(path: &Path, kind: io::ErrorKind) -> SweepError {
    SweepError::Io {
        path: path.to_path_buf(),
        source: io::Error::from(kind),
    }
}

/// Pre-order walk that lists a directory only when it is reached, so entries
/// removed mid-walk are never visited.
struct MemoryWalk<'a> {
    fs: &'a MemoryFilesystem,
    stack: Vec<(PathBuf, usize)>,
    max_depth: Option<usize>,
    pending_error: Option<SweepError>,
}

impl MemoryWalk<'_> {
    fn push_children(&mut self, children: Vec<PathBuf>, depth: usize) {
        self.stack
            .extend(children.into_iter().rev().map(|child| (child, depth)));
    }
}

impl Iterator for MemoryWalk<'_> {
    type Item = Result<WalkEntry>;

    fn next(&mut self) -> Option<Self::Item> {
        if let Some(err) = self.pending_error.take() {
            return Some(Err(err));
        }

        loop {
            let (path, depth) = self.stack.pop()?;
            let Some(node) = self.fs.node(&path) else {
                continue;
            };

            let is_dir = node == Node::Dir;
            if is_dir && self.max_depth.is_none_or(|max| depth < max) {
                match self.fs.children(&path) {
                    Ok(children) => self.push_children(children, depth + 1),
                    Err(err) => self.pending_error = Some(err),
                }
            }

            return Some(Ok(WalkEntry { path, is_dir }));
        }
    }
}

impl Filesystem for MemoryFilesystem {
    fn entry_kind(&self, path: &Path) -> Result<EntryKind> {
        self.record(FsCall::EntryKind(path.to_path_buf()));
        match self.node(path) {
            Some(Node::File) => Ok(EntryKind::File),
            Some(Node::Dir) => Ok(EntryKind::Dir),
            None => Err(io_error(path, io::ErrorKind::NotFound)),
        }
    }

    fn exists(&self, path: &Path) -> bool {
        self.record(FsCall::Exists(path.to_path_buf()));
        self.node(path).is_some()
    }

    fn is_dir(&self, path: &Path) -> bool {
        self.record(FsCall::IsDir(path.to_path_buf()));
        self.node(path) == Some(Node::Dir)
    }

    fn read_dir(&self, path: &Path) -> Result<Vec<PathBuf>> {
        self.record(FsCall::ReadDir(path.to_path_buf()));
        self.children(path)
    }

    fn walk<'a>(&'a self, root: &Path, max_depth: Option<usize>) -> Walk<'a> {
        self.record(FsCall::Walk(root.to_path_buf()));

        let mut walk = MemoryWalk {
            fs: self,
            stack: Vec::new(),
            max_depth,
            pending_error: None,
        };
        if max_depth != Some(0) {
            match self.children(root) {
                Ok(children) => walk.push_children(children, 1),
                Err(err) => walk.pending_error = Some(err),
            }
        }

        Box::new(walk)
    }

    fn remove_file(&self, path: &Path) -> Result<()> {
        self.record(FsCall::RemoveFile(path.to_path_buf()));
        match self.node(path) {
            None => Err(io_error(path, io::ErrorKind::NotFound)),
            Some(Node::Dir) => Err(io_error(path, io::ErrorKind::IsADirectory)),
            Some(Node::File) if self.locked.borrow().contains(path) => {
                Err(io_error(path, io::ErrorKind::PermissionDenied))
            }
            Some(Node::File) => {
                self.nodes.borrow_mut().remove(path);
                Ok(())
            }
        }
    }

    fn remove_tree(&self, path: &Path) -> usize {
        self.record(FsCall::RemoveTree(path.to_path_buf()));

        // Reverse order visits children before their parents
        let doomed: Vec<PathBuf> = self
            .nodes
            .borrow()
            .keys()
            .filter(|candidate| candidate.starts_with(path))
            .rev()
            .cloned()
            .collect();

        let mut leftovers = 0;
        for entry in doomed {
            let blocked = self.locked.borrow().contains(&entry)
                || self
                    .nodes
                    .borrow()
                    .keys()
                    .any(|other| other.parent() == Some(entry.as_path()));
            if blocked {
                leftovers += 1;
            } else {
                self.nodes.borrow_mut().remove(&entry);
            }
        }

        leftovers
    }
}
