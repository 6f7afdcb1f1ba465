//! Error types for favicon-sweep.
//!
//! Failures in this crate are local to a single path. They are raised by the
//! [`Filesystem`](crate::fs::Filesystem) seam as [`SweepError`] values and
//! turned into [`Outcome`](crate::report::Outcome)s by the remover, so no error
//! ever escapes a browser cleaner.
//!
//! # Example
//!
//! ```no_run
//! use std::path::Path;
//!
//! use favicon_sweep::error::{Result, SweepError};
//!
//! fn read_profiles(path: &Path) -> Result<std::fs::ReadDir> {
//!     std::fs::read_dir(path).map_err(|source| SweepError::Io {
//!         path: path.to_path_buf(),
//!         source,
//!     })
//! }
//! ```

use std::io;
use std::path::PathBuf;

use miette::Diagnostic;
use thiserror::Error;

/// Error types that can occur while sweeping favicon caches
#[derive(Error, Debug, Diagnostic)]
pub enum SweepError {
    /// File system I/O error on a specific path.
    ///
    /// Common causes: permission denied, a file locked by a running browser,
    /// or the path vanishing between lookup and removal.
    #[error("I/O error accessing '{path}'")]
    #[diagnostic(code(favicon_sweep::io_error))]
    Io {
        /// The path that caused the I/O error
        path: PathBuf,
        /// The underlying I/O error
        #[source]
        source: io::Error,
    },

    /// Reading the closing "press ENTER" prompt failed.
    #[error("Failed to read from standard input")]
    #[diagnostic(
        code(favicon_sweep::prompt_error),
        help("Pass --no-pause when running without an interactive console.")
    )]
    Prompt(#[source] io::Error),
}

impl SweepError {
    /// Whether this error means the path simply does not exist.
    pub fn is_not_found(&self) -> bool {
        match self {
            SweepError::Io { source, .. } => source.kind() == io::ErrorKind::NotFound,
            SweepError::Prompt(_) => false,
        }
    }

    /// The underlying system message, without the path prefix.
    pub fn system_message(&self) -> String {
        match self {
            SweepError::Io { source, .. } | SweepError::Prompt(source) => source.to_string(),
        }
    }
}

/// Type alias for Results in this crate
pub type Result<T> = std::result::Result<T, SweepError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_not_found_detection() {
        let err = SweepError::Io {
            path: PathBuf::from("/missing"),
            source: io::Error::from(io::ErrorKind::NotFound),
        };
        assert!(err.is_not_found());

        let err = SweepError::Io {
            path: PathBuf::from("/locked"),
            source: io::Error::from(io::ErrorKind::PermissionDenied),
        };
        assert!(!err.is_not_found());
    }

    #[test]
    fn test_system_message_omits_path() {
        let err = SweepError::Io {
            path: PathBuf::from("/profiles/Favicons"),
            source: io::Error::other("file is locked"),
        };
        assert_eq!(err.system_message(), "file is locked");
        assert!(err.to_string().contains("/profiles/Favicons"));
    }
}
