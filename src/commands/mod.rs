//! The favicon-sweep run: banner, sweep, closing lines and the optional
//! ENTER prompt.
//!
//! # Example
//!
//! ```no_run
//! use favicon_sweep::cli::Cli;
//! use favicon_sweep::commands;
//!
//! let cli = Cli::builder().verbose(1).no_pause(true).build();
//! let report = commands::execute(&cli);
//! println!("{} artifacts removed", report.removed_count());
//! ```

use std::io::{self, BufRead, Write};

use crate::cli::Cli;
use crate::error::{Result, SweepError};
use crate::fs::{Filesystem, OsFilesystem};
use crate::logging::Logger;
use crate::paths::{Environment, SystemEnvironment};
use crate::platform::Platform;
use crate::report::SweepReport;
use crate::sweep::Sweep;


const RULE: &str = "==============================================";

/// Sweep the running system with the options in `cli`.
pub fn execute(cli: &Cli) -> SweepReport {
    execute_with(cli, Platform::current(), &SystemEnvironment, &OsFilesystem)
}

/// Sweep with an explicit platform, environment and filesystem.
pub fn execute_with(
    cli: &Cli,
    platform: Platform,
    env: &dyn Environment,
    fs: &dyn Filesystem,
) -> SweepReport {
    let log = cli.logger();

    log.info(RULE);
    log.info(format!(" Favicon cache cleaner  |  OS detected: {platform}"));
    log.info(RULE);
    log.info("");

    let report = Sweep::builder()
        .platform(platform)
        .environment(env)
        .filesystem(fs)
        .logger(log)
        .build()
        .run();

    log_summary(log, &report);
    log.info("Done. Browsers may recreate favicon caches as you browse.");
    log.info("You may want to restart your browsers if they were running.");

    report
}

fn log_summary(log: Logger, report: &SweepReport) {
    log.verbose(
        1,
        format!(
            "Summary: {} removed, {} could not be removed, {} of {} browsers skipped",
            report.removed_count(),
            report.failures().count(),
            report.skipped().count(),
            report.browsers().len(),
        ),
    );
}

/// Block until the user presses ENTER on standard input.
pub fn wait_for_enter() -> Result<()> {
    eprint!("\nPress ENTER to close this window... ");
    io::stderr().flush().map_err(SweepError::Prompt)?;
    wait_for_line(&mut io::stdin().lock())
}

/// Read and discard one line. End of input counts as ENTER.
fn wait_for_line(input: &mut impl BufRead) -> Result<()> {
    let mut line = String::new();
    input.read_line(&mut line).map_err(SweepError::Prompt)?;
    Ok(())
}
