//! # favicon-sweep
//!
//! Clears the favicon caches of Chrome, Firefox and Safari from local browser
//! profiles, leaving every other piece of profile data alone.
//!
//! ## Overview
//!
//! A sweep visits the browsers in a fixed order (Chrome, Firefox, Safari).
//! For each one it resolves the browser's base directory for the running
//! platform, skips the browser if that directory is missing, and otherwise
//! removes its favicon artifacts. Every removal is attempted independently:
//! a file locked by a running browser is reported and the sweep moves on.
//!
//! ## Architecture
//!
//! - [`platform`]: the closed set of platforms with a path table
//! - [`paths`]: `~` and environment-variable expansion of path templates
//! - [`fs`]: the filesystem seam, with an OS and an in-memory implementation
//! - [`remover`]: removes one file or directory tree, never failing loudly
//! - [`scanner`]: lazy, restartable search for matching file names
//! - [`browser`]: per-browser locations and cleanup strategies
//! - [`sweep`]: runs every browser cleaner in order
//! - [`report`]: outcome values collected by a sweep
//! - [`cli`] and [`commands`]: the command-line front end
//!
//! ## Library Usage
//!
//! ```no_run
//! use favicon_sweep::sweep::Sweep;
//!
//! // Sweep the real filesystem of the running platform
//! let report = Sweep::builder().build().run();
//! for failure in report.failures() {
//!     eprintln!("could not remove {}", failure.path.display());
//! }
//! ```
//!
//! ## Error Handling
//!
//! Filesystem failures are `thiserror` values ([`error::SweepError`]) inside
//! the crate and become [`report::Outcome`]s at the removal boundary. The
//! binary renders the remaining errors with `miette`.

pub mod browser;
pub mod cli;
pub mod commands;
pub mod error;
pub mod fs;
pub mod logging;
pub mod paths;
pub mod platform;
pub mod remover;
pub mod report;
pub mod scanner;
pub mod sweep;
