//! # favicon-sweep
//!
//! Clears the favicon caches of Chrome, Firefox and Safari so browsers fetch
//! fresh site icons. Only favicon databases are removed:
//!
//! - **Chrome**: every `Favicons*` file under the Chrome profile root
//! - **Firefox**: `favicons.sqlite` and its `-wal`/`-shm` files in each profile
//! - **Safari** (macOS only): the whole `Favicon Cache` directory
//!
//! ## Usage
//!
//! ```bash
//! favicon-sweep          # sweep all browsers
//! favicon-sweep -v       # also print a summary and skipped paths
//! favicon-sweep --pause  # wait for ENTER before exiting
//! ```
//!
//! ## Environment Variables
//!
//! - `FAVICON_SWEEP_VERBOSE`: Enable verbose output
//! - `FAVICON_SWEEP_QUIET`: Silence everything except failed removals
//! - `FAVICON_SWEEP_PAUSE`: Wait for ENTER before exiting

use std::io::IsTerminal;

use favicon_sweep::cli::Cli;
use favicon_sweep::commands;

fn main() -> miette::Result<()> {
    // Install miette's fancy panic and error report handler
    miette::set_panic_hook();

    if std::io::stderr().is_terminal() {
        miette::set_hook(Box::new(|_| {
            Box::new(
                miette::GraphicalReportHandler::new()
                    .with_theme(miette::GraphicalTheme::unicode_nocolor())
                    .with_context_lines(3),
            )
        }))?;
    } else {
        // Plain output for redirected stderr (logs, CI)
        miette::set_hook(Box::new(|_| {
            Box::new(
                miette::GraphicalReportHandler::new()
                    .with_theme(miette::GraphicalTheme::none())
                    .with_context_lines(0),
            )
        }))?;
    }

    let cli = Cli::parse_args();
    let log = cli.logger();

    // Failed removals are reported in the output, never through the exit code
    commands::execute(&cli);

    if cli.should_pause()
        && let Err(err) = commands::wait_for_enter()
    {
        log.verbose(1, format!("{:?}", miette::Report::new(err)));
    }

    Ok(())
}
