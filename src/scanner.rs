//! Lazy discovery of favicon artifacts below a directory.

use std::ffi::OsStr;
use std::path::PathBuf;

use crate::fs::{Filesystem, Walk};
use crate::logging::Logger;

/// Decides which file names are favicon artifacts.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum MatchRule {
    /// Any name starting with the prefix.
    Prefix(&'static str),
    /// Any name in the set.
    Exact(&'static [&'static str]),
}

impl MatchRule {
    pub fn matches(&self, name: &OsStr) -> bool {
        // Non UTF-8 names never match the ASCII patterns
        let Some(name) = name.to_str() else {
            return false;
        };

        match self {
            MatchRule::Prefix(prefix) => name.starts_with(prefix),
            MatchRule::Exact(names) => names.contains(&name),
        }
    }
}

/// How far below the root to look.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Depth {
    /// The whole tree.
    Recursive,
    /// Immediate children of the root only.
    Children,
}

impl Depth {
    fn max_depth(self) -> Option<usize> {
        match self {
            Depth::Recursive => None,
            Depth::Children => Some(1),
        }
    }
}

/// Finds files under a root whose names match a [`MatchRule`].
///
/// Each call to [`iter`](PatternScanner::iter) starts a fresh depth-first
/// walk, so a scanner can be iterated any number of times. A missing root
/// yields nothing; unreadable subdirectories are skipped.
pub struct PatternScanner<'a> {
    fs: &'a dyn Filesystem,
    root: PathBuf,
    rule: MatchRule,
    depth: Depth,
    log: Logger,
}

impl<'a> PatternScanner<'a> {
    pub fn new(
        fs: &'a dyn Filesystem,
        root: impl Into<PathBuf>,
        rule: MatchRule,
        depth: Depth,
    ) -> Self {
        Self {
            fs,
            root: root.into(),
            rule,
            depth,
            log: Logger::silent(),
        }
    }

    /// Report skipped entries through `log` at verbosity 2.
    pub fn with_logger(mut self, log: Logger) -> Self {
        self.log = log;
        self
    }

    pub fn iter(&self) -> Matches<'a> {
        let fs = self.fs;
        let walk = if fs.exists(&self.root) {
            Some(fs.walk(&self.root, self.depth.max_depth()))
        } else {
            None
        };

        Matches {
            walk,
            rule: self.rule,
            log: self.log,
        }
    }
}

impl<'a> IntoIterator for &PatternScanner<'a> {
    type Item = PathBuf;
    type IntoIter = Matches<'a>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}

/// Iterator over the matching file paths of one scan.
pub struct Matches<'a> {
    walk: Option<Walk<'a>>,
    rule: MatchRule,
    log: Logger,
}

impl Iterator for Matches<'_> {
    type Item = PathBuf;

    fn next(&mut self) -> Option<PathBuf> {
        let walk = self.walk.as_mut()?;

        for entry in walk {
            let entry = match entry {
                Ok(entry) => entry,
                Err(err) => {
                    self.log.verbose(2, format!("  skipping unreadable entry: {err}"));
                    continue;
                }
            };

            if entry.is_dir {
                continue;
            }

            if entry
                .path
                .file_name()
                .is_some_and(|name| self.rule.matches(name))
            {
                return Some(entry.path);
            }
        }

        None
    }
}
