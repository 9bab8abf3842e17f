//! CLI module.
//!
//! Argument parsing plus the `--version` and `--help` commands. Call
//! [`run_cli_command`] early in main(), before initializing the TUI:
//!
//! ```ignore
//! use toolcat::cli::{parse_args, run_cli_command};
//!
//! let command = parse_args(std::env::args());
//! let options = run_cli_command(command)?;
//! ```

pub mod args;
pub mod version;

pub use args::{parse_args, CliCommand, RunOptions};
pub use version::{handle_help_command, handle_version_command, USAGE, VERSION};

use color_eyre::eyre::eyre;
use color_eyre::Result;

/// Run a CLI command if applicable.
///
/// Returns the run options when the TUI should start. `Version` and `Help`
/// never return.
pub fn run_cli_command(command: CliCommand) -> Result<RunOptions> {
    match command {
        CliCommand::Version => handle_version_command(),
        CliCommand::Help => handle_help_command(),
        CliCommand::Run(options) => Ok(options),
        CliCommand::Invalid(message) => Err(eyre!("{}\n\n{}", message, USAGE)),
    }
}
