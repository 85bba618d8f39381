//! Saiten - grading console for teaching assistants
//!
//! Scores student submissions against an allocation schema, keeps the
//! per-criterion ledger, and writes totals into the course gradebook.

mod cli;
mod commands;

use std::env;
use std::process::ExitCode;
use std::time::Instant;

use clap::Parser;

use cli::{Cli, OutputFormat};
use saiten_core::error::{ExitCode as SaitenExitCode, SaitenError};
use saiten_core::logging;

fn main() -> ExitCode {
    let start = Instant::now();

    let cli = match Cli::try_parse() {
        Ok(cli) => cli,
        Err(err) => return parse_failure(err),
    };

    if let Err(e) = logging::init_tracing(cli.verbose, cli.log_level.as_deref(), cli.log_json) {
        eprintln!("Warning: Failed to initialize logging: {}", e);
    }
    tracing::debug!(elapsed = ?start.elapsed(), "parse_args");

    match commands::dispatch::run(&cli, start) {
        Ok(()) => ExitCode::from(SaitenExitCode::Success as u8),
        Err(e) => {
            report(&cli, &e);
            ExitCode::from(e.exit_code() as u8)
        }
    }
}

/// Print a failed command's error in the requested format
fn report(cli: &Cli, e: &SaitenError) {
    if cli.format == OutputFormat::Json {
        eprintln!("{}", e.to_json());
    } else if !cli.quiet {
        eprintln!("error: {}", e);
        for cause in e.error_chain().unwrap_or_default().iter().rev() {
            eprintln!("  caused by: {}", cause.message);
        }
    }
}

/// Handle a clap failure. `--format` may not have been parsed yet, so argv
/// is checked directly; with `json` the error goes out as an envelope.
fn parse_failure(err: clap::Error) -> ExitCode {
    if !argv_requests_json() {
        err.exit();
    }
    match cli_error(&err) {
        Some(e) => {
            eprintln!("{}", e.to_json());
            ExitCode::from(e.exit_code() as u8)
        }
        None => err.exit(),
    }
}

/// Map a clap error to saiten's error set; `None` for help and version output
fn cli_error(err: &clap::Error) -> Option<SaitenError> {
    use clap::error::ErrorKind;

    match err.kind() {
        ErrorKind::DisplayHelp
        | ErrorKind::DisplayHelpOnMissingArgumentOrSubcommand
        | ErrorKind::DisplayVersion => None,
        ErrorKind::ValueValidation
        | ErrorKind::InvalidValue
        | ErrorKind::InvalidSubcommand
        | ErrorKind::UnknownArgument
        | ErrorKind::MissingRequiredArgument
        | ErrorKind::MissingSubcommand
        | ErrorKind::ArgumentConflict
        | ErrorKind::TooManyValues
        | ErrorKind::WrongNumberOfValues => Some(SaitenError::UsageError(err.to_string())),
        _ => Some(SaitenError::Other(err.to_string())),
    }
}

fn argv_requests_json() -> bool {
    let mut args = env::args().skip(1);
    while let Some(arg) = args.next() {
        if arg == "--format" {
            if args.next().is_some_and(|v| v == "json") {
                return true;
            }
        } else if arg == "--format=json" {
            return true;
        }
    }
    false
}
