//! Command-line interface definitions for favicon-sweep.
//!
//! The tool takes no subcommands: running it sweeps every supported browser.
//! Flags only tune output and whether the process waits before exiting.
//!
//! # Example
//!
//! ```no_run
//! use favicon_sweep::cli::Cli;
//!
//! let cli = Cli::parse_args();
//! if cli.should_pause() {
//!     println!("will wait for ENTER before exiting");
//! }
//! ```

use clap::Parser;

use crate::logging::Logger;


/// Main command-line interface for favicon-sweep.
#[derive(Debug, Parser)]
#[command(
    name = "favicon-sweep",
    bin_name = "favicon-sweep",
    author,
    version,
    about = "Clears the favicon caches of Chrome, Firefox and Safari",
    long_about = "Clears the favicon caches of Chrome, Firefox and Safari.\n\n\
                  Only favicon databases are removed; history, bookmarks and \
                  other profile data are left alone. Browsers rebuild the \
                  caches as you browse."
)]
pub struct Cli {
    #[command(flatten)]
    global_opts: GlobalOpts,

    /// Wait for ENTER before exiting (the default on Windows)
    #[arg(long, env = "FAVICON_SWEEP_PAUSE")]
    pause: bool,

    /// Never wait for ENTER before exiting
    #[arg(long, conflicts_with = "pause")]
    no_pause: bool,
}

/// Output options.
#[derive(Debug, Parser)]
pub struct GlobalOpts {
    /// Enable verbose output (use multiple times for more verbosity)
    #[arg(short, long, action = clap::ArgAction::Count, env = "FAVICON_SWEEP_VERBOSE")]
    verbose: u8,

    /// Silence all output except for failed removals
    #[arg(short, long, conflicts_with = "verbose", env = "FAVICON_SWEEP_QUIET")]
    quiet: bool,
}

impl GlobalOpts {
    /// Create a new builder for constructing `GlobalOpts` programmatically.
    pub fn builder() -> GlobalOptsBuilder {
        GlobalOptsBuilder::default()
    }

    /// Get the verbose level
    pub fn verbose(&self) -> u8 {
        self.verbose
    }

    /// Check if quiet mode is enabled
    pub fn quiet(&self) -> bool {
        self.quiet
    }

    /// Logger matching these options. Quiet wins over any verbosity.
    pub fn logger(&self) -> Logger {
        let verbose = if self.quiet { 0 } else { self.verbose };
        Logger::new(verbose, self.quiet)
    }
}

/// Builder for constructing `GlobalOpts` without going through argument
/// parsing.
#[derive(Debug, Default)]
pub struct GlobalOptsBuilder {
    verbose: u8,
    quiet: bool,
}

impl GlobalOptsBuilder {
    /// Set the verbosity level (0 = normal, 1+ = verbose).
    pub fn verbose(mut self, level: u8) -> Self {
        self.verbose = level;
        self
    }

    /// Enable or disable quiet mode.
    pub fn quiet(mut self, quiet: bool) -> Self {
        self.quiet = quiet;
        self
    }

    pub fn build(self) -> GlobalOpts {
        GlobalOpts {
            verbose: self.verbose,
            quiet: self.quiet,
        }
    }
}

impl Cli {
    /// Parse the process arguments.
    pub fn parse_args() -> Self {
        Self::parse()
    }

    /// Get the global options
    pub fn global_opts(&self) -> &GlobalOpts {
        &self.global_opts
    }

    /// Create a builder for programmatic construction
    pub fn builder() -> CliBuilder {
        CliBuilder::default()
    }

    pub fn pause(&self) -> bool {
        self.pause
    }

    pub fn no_pause(&self) -> bool {
        self.no_pause
    }

    /// Whether to wait for ENTER before exiting.
    ///
    /// A double-clicked console program on Windows closes its window as soon
    /// as it exits, so there the prompt is on unless `--no-pause` is given.
    pub fn should_pause(&self) -> bool {
        self.pause || (cfg!(windows) && !self.no_pause)
    }

    pub fn logger(&self) -> Logger {
        self.global_opts.logger()
    }
}

/// Builder for [`Cli`]
#[derive(Debug, Default)]
pub struct CliBuilder {
    verbose: u8,
    quiet: bool,
    pause: bool,
    no_pause: bool,
}

impl CliBuilder {
    /// Set the verbose level
    pub fn verbose(mut self, level: u8) -> Self {
        self.verbose = level;
        self
    }

    /// Enable quiet mode
    pub fn quiet(mut self, enabled: bool) -> Self {
        self.quiet = enabled;
        self
    }

    /// Always wait for ENTER before exiting
    pub fn pause(mut self, enabled: bool) -> Self {
        self.pause = enabled;
        self
    }

    /// Never wait for ENTER before exiting
    pub fn no_pause(mut self, enabled: bool) -> Self {
        self.no_pause = enabled;
        self
    }

    pub fn build(self) -> Cli {
        Cli {
            global_opts: GlobalOpts::builder()
                .verbose(self.verbose)
                .quiet(self.quiet)
                .build(),
            pause: self.pause,
            no_pause: self.no_pause,
        }
    }
}
