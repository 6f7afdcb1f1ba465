//! Per-browser favicon cleanup.
//!
//! Each [`Browser`] has a base directory per platform and a strategy for
//! finding its favicon artifacts below it:
//!
//! | Browser | macOS | Windows | Strategy |
//! |---|---|---|---|
//! | Chrome | `~/Library/Application Support/Google/Chrome` | `%LOCALAPPDATA%\Google\Chrome\User Data` | every file named `Favicons*`, anywhere below the base |
//! | Firefox | `~/Library/Application Support/Firefox/Profiles` | `%APPDATA%\Mozilla\Firefox\Profiles` | `favicons.sqlite` and its `-wal`/`-shm` files directly inside each profile |
//! | Safari | `~/Library/Safari/Favicon Cache` | | the whole directory |
//!
//! A browser without a location for the current platform, or whose base
//! directory is missing, is skipped without touching the filesystem beyond
//! the existence check.

use std::fmt;
use std::path::Path;

use crate::fs::Filesystem;
use crate::logging::Logger;
use crate::paths::{PathResolver, PathTemplate};
use crate::platform::Platform;
use crate::remover::EntryRemover;
use crate::report::{BrowserReport, Outcome, Removal, SkipReason};
use crate::scanner::{Depth, MatchRule, PatternScanner};


/// Name prefix shared by Chrome's favicon database and its journal.
pub const CHROME_FAVICON_PREFIX: &str = "Favicons";

/// Firefox's favicon database with its write-ahead log and shared memory.
pub const FIREFOX_FAVICON_FILES: &[&str] = &[
    "favicons.sqlite",
    "favicons.sqlite-wal",
    "favicons.sqlite-shm",
];

const CHROME_MACOS: PathTemplate =
    PathTemplate::new(Platform::MacOs, "~/Library/Application Support/Google/Chrome");
const CHROME_WINDOWS: PathTemplate =
    PathTemplate::new(Platform::Windows, r"%LOCALAPPDATA%\Google\Chrome\User Data");
const FIREFOX_MACOS: PathTemplate =
    PathTemplate::new(Platform::MacOs, "~/Library/Application Support/Firefox/Profiles");
const FIREFOX_WINDOWS: PathTemplate =
    PathTemplate::new(Platform::Windows, r"%APPDATA%\Mozilla\Firefox\Profiles");
const SAFARI_MACOS: PathTemplate =
    PathTemplate::new(Platform::MacOs, "~/Library/Safari/Favicon Cache");

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Browser {
    Chrome,
    Firefox,
    Safari,
}

/// How a browser's artifacts are located below its base directory.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Strategy {
    /// Every file in the tree whose name starts with the prefix.
    PrefixTree(&'static str),
    /// The named files directly inside each immediate subdirectory.
    ProfileFiles(&'static [&'static str]),
    /// The base directory itself, removed as one unit.
    WholeDirectory,
}

impl Browser {
    /// Every browser, in cleanup order.
    pub const ALL: [Browser; 3] = [Browser::Chrome, Browser::Firefox, Browser::Safari];

    /// Where this browser keeps its profile data on `platform`.
    pub fn base_template(self, platform: Platform) -> Option<PathTemplate> {
        match (self, platform) {
            (Browser::Chrome, Platform::MacOs) => Some(CHROME_MACOS),
            (Browser::Chrome, Platform::Windows) => Some(CHROME_WINDOWS),
            (Browser::Firefox, Platform::MacOs) => Some(FIREFOX_MACOS),
            (Browser::Firefox, Platform::Windows) => Some(FIREFOX_WINDOWS),
            (Browser::Safari, Platform::MacOs) => Some(SAFARI_MACOS),
            (Browser::Safari, Platform::Windows) | (_, Platform::Other) => None,
        }
    }

    pub fn strategy(self) -> Strategy {
        match self {
            Browser::Chrome => Strategy::PrefixTree(CHROME_FAVICON_PREFIX),
            Browser::Firefox => Strategy::ProfileFiles(FIREFOX_FAVICON_FILES),
            Browser::Safari => Strategy::WholeDirectory,
        }
    }

    fn base_label(self) -> &'static str {
        match self {
            Browser::Chrome => "base directory",
            Browser::Firefox => "profiles directory",
            Browser::Safari => "favicon cache directory",
        }
    }
}

impl fmt::Display for Browser {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Browser::Chrome => write!(f, "Chrome"),
            Browser::Firefox => write!(f, "Firefox"),
            Browser::Safari => write!(f, "Safari"),
        }
    }
}

/// Everything a cleaner needs from the outside world.
#[derive(Clone, Copy)]
pub struct CleanContext<'a> {
    pub platform: Platform,
    pub resolver: PathResolver<'a>,
    pub fs: &'a dyn Filesystem,
    pub log: Logger,
}

/// Removes one browser's favicon artifacts.
#[derive(Clone, Copy, Debug)]
pub struct BrowserCleaner {
    browser: Browser,
}

impl BrowserCleaner {
    pub fn new(browser: Browser) -> Self {
        Self { browser }
    }

    /// Clean this browser's favicon artifacts, logging each removal as it
    /// happens. Never fails: problems end up in the returned report.
    pub fn clean(&self, ctx: &CleanContext<'_>) -> BrowserReport {
        let browser = self.browser;
        let log = ctx.log;

        let Some(template) = browser.base_template(ctx.platform) else {
            match browser {
                Browser::Safari => {
                    log.info("  Safari favicon cache only exists on macOS - skipping.")
                }
                _ => log.info(format!(
                    "  non-macOS/non-Windows system - skipping {browser}."
                )),
            }
            return BrowserReport::skipped(
                browser,
                SkipReason::UnsupportedPlatform(ctx.platform),
            );
        };

        let base = ctx.resolver.resolve(&template);
        if !ctx.fs.exists(&base) {
            log.info(format!(
                "  {browser} {} not found ({}) - skipping.",
                browser.base_label(),
                ctx.platform
            ));
            log.verbose(1, format!("  looked in: {}", base.display()));
            return BrowserReport::skipped(browser, SkipReason::MissingBase(base));
        }

        let removals = match browser.strategy() {
            Strategy::PrefixTree(prefix) => {
                log.info(format!(
                    "  scanning {browser} profiles under: {}",
                    base.display()
                ));
                let scanner = PatternScanner::new(
                    ctx.fs,
                    &base,
                    MatchRule::Prefix(prefix),
                    Depth::Recursive,
                )
                .with_logger(log);
                scanner.iter().map(|path| remove(ctx, &path)).collect()
            }
            Strategy::ProfileFiles(names) => {
                log.info(format!(
                    "  scanning {browser} profiles under: {}",
                    base.display()
                ));
                clean_profiles(ctx, &base, names)
            }
            Strategy::WholeDirectory => vec![remove(ctx, &base)],
        };

        BrowserReport::cleaned(browser, base, removals)
    }
}

/// Remove the named files from every profile directory under `base`.
fn clean_profiles(
    ctx: &CleanContext<'_>,
    base: &Path,
    names: &'static [&'static str],
) -> Vec<Removal> {
    let profiles = match ctx.fs.read_dir(base) {
        Ok(profiles) => profiles,
        Err(err) => {
            let removal = Removal::new(base, Outcome::Failed(err.system_message()));
            log_removal(ctx.log, &removal);
            return vec![removal];
        }
    };

    let mut removals = Vec::new();
    for profile in profiles {
        if !ctx.fs.is_dir(&profile) {
            continue;
        }

        ctx.log.verbose(2, format!("  profile: {}", profile.display()));
        let scanner =
            PatternScanner::new(ctx.fs, &profile, MatchRule::Exact(names), Depth::Children)
                .with_logger(ctx.log);
        removals.extend(scanner.iter().map(|path| remove(ctx, &path)));
    }

    removals
}

fn remove(ctx: &CleanContext<'_>, path: &Path) -> Removal {
    let removal = Removal::new(path, EntryRemover::new(ctx.fs).remove(path));
    log_removal(ctx.log, &removal);
    removal
}

fn log_removal(log: Logger, removal: &Removal) {
    match &removal.outcome {
        Outcome::Failed(_) => {
            if let Some(line) = removal.status_line() {
                log.warn(line);
            }
        }
        Outcome::NotFound => {
            log.verbose(2, format!("  already gone: {}", removal.path.display()));
        }
        Outcome::RemovedDirectory { leftovers } if *leftovers > 0 => {
            if let Some(line) = removal.status_line() {
                log.info(line);
            }
            log.verbose(
                1,
                format!("  {leftovers} entries could not be removed and were left in place"),
            );
        }
        Outcome::RemovedFile | Outcome::RemovedDirectory { .. } => {
            if let Some(line) = removal.status_line() {
                log.info(line);
            }
        }
    }
}
