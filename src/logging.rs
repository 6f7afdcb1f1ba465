//! Status output: progress on stdout, failed removals on stderr.

use std::fmt::Display;

#[derive(Clone, Copy, Debug, Default)]
pub struct Logger {
    verbose: u8,
    quiet: bool,
}

impl Logger {
    pub fn new(verbose: u8, quiet: bool) -> Self {
        Self { verbose, quiet }
    }

    /// A logger that only lets warnings through.
    pub fn silent() -> Self {
        Self::new(0, true)
    }

    pub fn info(&self, message: impl Display) {
        if !self.quiet {
            println!("{message}");
        }
    }

    pub fn verbose(&self, level: u8, message: impl Display) {
        if !self.quiet && self.verbose >= level {
            println!("{message}");
        }
    }

    /// Failed deletions are the errors of this tool, so quiet mode keeps them
    /// and they go to stderr.
    pub fn warn(&self, message: impl Display) {
        eprintln!("{message}");
    }

    pub fn quiet(&self) -> bool {
        self.quiet
    }

    pub fn level(&self) -> u8 {
        self.verbose
    }
}
