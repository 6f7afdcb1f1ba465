//! Results of a sweep.
//!
//! A [`SweepReport`] holds one [`BrowserReport`] per browser in the order the
//! cleaners ran. It lives for a single run and is only used for status output
//! and assertions.

use std::fmt;
use std::path::{Path, PathBuf};

use crate::browser::Browser;
use crate::platform::Platform;

/// Result of one removal attempt.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Outcome {
    RemovedFile,
    /// The tree was removed as far as possible; `leftovers` entries could
    /// not be deleted.
    RemovedDirectory { leftovers: usize },
    NotFound,
    /// Deletion failed with the given system message.
    Failed(String),
}

impl Outcome {
    pub fn is_removed(&self) -> bool {
        matches!(self, Outcome::RemovedFile | Outcome::RemovedDirectory { .. })
    }

    pub fn is_failure(&self) -> bool {
        matches!(self, Outcome::Failed(_))
    }
}

/// A path paired with what happened to it.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Removal {
    pub path: PathBuf,
    pub outcome: Outcome,
}

impl Removal {
    pub fn new(path: impl Into<PathBuf>, outcome: Outcome) -> Self {
        Self {
            path: path.into(),
            outcome,
        }
    }

    /// The line printed for this removal, if any. Missing paths are silent.
    pub fn status_line(&self) -> Option<String> {
        let path = self.path.display();
        match &self.outcome {
            Outcome::RemovedFile => Some(format!("  removed file     : {path}")),
            Outcome::RemovedDirectory { .. } => Some(format!("  removed directory: {path}")),
            Outcome::NotFound => None,
            Outcome::Failed(message) => {
                Some(format!("  [WARN] could not remove {path} ({message})"))
            }
        }
    }
}

/// Why a browser was not cleaned.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum SkipReason {
    /// The browser has no known favicon location on this platform.
    UnsupportedPlatform(Platform),
    /// The resolved base directory does not exist.
    MissingBase(PathBuf),
}

impl fmt::Display for SkipReason {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SkipReason::UnsupportedPlatform(platform) => {
                write!(f, "not supported on {platform}")
            }
            SkipReason::MissingBase(path) => write!(f, "'{}' not found", path.display()),
        }
    }
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub enum CleanupStatus {
    Skipped(SkipReason),
    Cleaned {
        base: PathBuf,
        removals: Vec<Removal>,
    },
}

/// What one browser cleaner did.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct BrowserReport {
    pub browser: Browser,
    pub status: CleanupStatus,
}

impl BrowserReport {
    pub fn skipped(browser: Browser, reason: SkipReason) -> Self {
        Self {
            browser,
            status: CleanupStatus::Skipped(reason),
        }
    }

    pub fn cleaned(browser: Browser, base: impl Into<PathBuf>, removals: Vec<Removal>) -> Self {
        Self {
            browser,
            status: CleanupStatus::Cleaned {
                base: base.into(),
                removals,
            },
        }
    }

    pub fn skip_reason(&self) -> Option<&SkipReason> {
        match &self.status {
            CleanupStatus::Skipped(reason) => Some(reason),
            CleanupStatus::Cleaned { .. } => None,
        }
    }

    pub fn base(&self) -> Option<&Path> {
        match &self.status {
            CleanupStatus::Cleaned { base, .. } => Some(base),
            CleanupStatus::Skipped(_) => None,
        }
    }

    /// Removal attempts in the order they were made; empty when skipped.
    pub fn removals(&self) -> &[Removal] {
        match &self.status {
            CleanupStatus::Cleaned { removals, .. } => removals,
            CleanupStatus::Skipped(_) => &[],
        }
    }

    pub fn removed_paths(&self) -> impl Iterator<Item = &Path> {
        self.removals()
            .iter()
            .filter(|removal| removal.outcome.is_removed())
            .map(|removal| removal.path.as_path())
    }

    pub fn failures(&self) -> impl Iterator<Item = &Removal> {
        self.removals()
            .iter()
            .filter(|removal| removal.outcome.is_failure())
    }
}

/// Everything one sweep did, browser by browser.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct SweepReport {
    platform: Platform,
    browsers: Vec<BrowserReport>,
}

impl SweepReport {
    pub fn new(platform: Platform) -> Self {
        Self {
            platform,
            browsers: Vec::new(),
        }
    }

    pub fn push(&mut self, report: BrowserReport) {
        self.browsers.push(report);
    }

    pub fn platform(&self) -> Platform {
        self.platform
    }

    pub fn browsers(&self) -> &[BrowserReport] {
        &self.browsers
    }

    pub fn browser(&self, browser: Browser) -> Option<&BrowserReport> {
        self.browsers.iter().find(|report| report.browser == browser)
    }

    pub fn removed_count(&self) -> usize {
        self.browsers
            .iter()
            .map(|report| report.removed_paths().count())
            .sum()
    }

    pub fn failures(&self) -> impl Iterator<Item = &Removal> {
        self.browsers.iter().flat_map(|report| report.failures())
    }

    pub fn skipped(&self) -> impl Iterator<Item = &BrowserReport> {
        self.browsers
            .iter()
            .filter(|report| report.skip_reason().is_some())
    }
}
