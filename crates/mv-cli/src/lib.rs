//! `mv-cli` - Shared argument parsing, logging and exit handling for the
//! matvec command-line programs.

pub mod args;
pub mod logging;

use std::error::Error;
use std::process::ExitCode;

use clap::Parser;

pub use args::{GenerateArgs, Operands, ParallelArgs, PrintArgs, SerialArgs};
pub use logging::{init_logging, LOG_ENV};

/// Parse command-line arguments.
///
/// Help and version requests print and yield `ExitCode::SUCCESS`; any
/// usage error prints clap's message and yields status 1.
pub fn parse_args<T: Parser>() -> Result<T, ExitCode> {
    T::try_parse().map_err(|err| {
        let _ = err.print();
        if err.use_stderr() {
            ExitCode::FAILURE
        } else {
            ExitCode::SUCCESS
        }
    })
}

/// Print an error to stderr and return status 1.
pub fn fail(err: &dyn Error) -> ExitCode {
    eprintln!("Error: {}", err);
    ExitCode::FAILURE
}
