//! Runs every browser cleaner in order.
//!
//! # Example
//!
//! ```
//! use favicon_sweep::fs::MemoryFilesystem;
//! use favicon_sweep::paths::MapEnvironment;
//! use favicon_sweep::platform::Platform;
//! use favicon_sweep::sweep::Sweep;
//!
//! let fs = MemoryFilesystem::new();
//! fs.add_file("/Users/me/Library/Application Support/Google/Chrome/Default/Favicons");
//! let env = MapEnvironment::new().home("/Users/me");
//!
//! let report = Sweep::builder()
//!     .platform(Platform::MacOs)
//!     .environment(&env)
//!     .filesystem(&fs)
//!     .build()
//!     .run();
//!
//! assert_eq!(report.removed_count(), 1);
//! assert_eq!(report.browsers().len(), 3);
//! ```

use crate::browser::{Browser, BrowserCleaner, CleanContext};
use crate::fs::{Filesystem, OsFilesystem};
use crate::logging::Logger;
use crate::paths::{Environment, PathResolver, SystemEnvironment};
use crate::platform::Platform;
use crate::report::SweepReport;

#[cfg(test)]
mod tests;

/// One favicon sweep over Chrome, Firefox and Safari.
pub struct Sweep<'a> {
    platform: Platform,
    env: &'a dyn Environment,
    fs: &'a dyn Filesystem,
    log: Logger,
}

#[derive(Default)]
pub struct SweepBuilder<'a> {
    platform: Option<Platform>,
    env: Option<&'a dyn Environment>,
    fs: Option<&'a dyn Filesystem>,
    log: Option<Logger>,
}

impl<'a> SweepBuilder<'a> {
    pub fn new() -> Self {
        Self::default()
    }

    /// Platform whose path table is used (defaults to the running one).
    pub fn platform(mut self, platform: Platform) -> Self {
        self.platform = Some(platform);
        self
    }

    /// Environment for path resolution (defaults to the process environment).
    pub fn environment(mut self, env: &'a dyn Environment) -> Self {
        self.env = Some(env);
        self
    }

    /// Filesystem to clean (defaults to the real one).
    pub fn filesystem(mut self, fs: &'a dyn Filesystem) -> Self {
        self.fs = Some(fs);
        self
    }

    /// Logger for status lines (defaults to warnings only).
    pub fn logger(mut self, log: Logger) -> Self {
        self.log = Some(log);
        self
    }

    pub fn build(self) -> Sweep<'a> {
        Sweep {
            platform: self.platform.unwrap_or_else(Platform::current),
            env: self.env.unwrap_or(&SystemEnvironment),
            fs: self.fs.unwrap_or(&OsFilesystem),
            log: self.log.unwrap_or_else(Logger::silent),
        }
    }
}

impl<'a> Sweep<'a> {
    pub fn builder() -> SweepBuilder<'a> {
        SweepBuilder::new()
    }

    /// Clean Chrome, then Firefox, then Safari.
    ///
    /// Each cleaner runs regardless of what the previous one did; failures
    /// are collected in the report, never returned.
    pub fn run(&self) -> SweepReport {
        let ctx = CleanContext {
            platform: self.platform,
            resolver: PathResolver::new(self.env),
            fs: self.fs,
            log: self.log,
        };

        let mut report = SweepReport::new(self.platform);
        for browser in Browser::ALL {
            self.log.info(format!("{browser}:"));
            report.push(BrowserCleaner::new(browser).clean(&ctx));
            self.log.info("");
        }

        report
    }
}
