//! Command-line argument parsing.

use crate::startup::StartupConfig;

/// Overrides collected from the command line for a normal run.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct RunOptions {
    pub debug: bool,
    pub base_url: Option<String>,
    pub dashboard_port: Option<u16>,
    pub no_dashboard: bool,
}

impl RunOptions {
    /// Layer these options over a config built from the environment.
    pub fn apply(&self, mut config: StartupConfig) -> StartupConfig {
        if self.debug {
            config.debug = true;
        }
        if let Some(url) = &self.base_url {
            config.base_url = url.clone();
        }
        if let Some(port) = self.dashboard_port {
            config.dashboard_port = port;
        }
        if self.no_dashboard {
            config.enable_dashboard = false;
        }
        config
    }
}

/// Parsed CLI command to execute.
#[derive(Debug, Clone, PartialEq)]
pub enum CliCommand {
    /// Show version information
    Version,
    /// Show usage
    Help,
    /// Run the TUI application (default)
    Run(RunOptions),
    /// Arguments could not be parsed
    Invalid(String),
}

/// Parse command-line arguments and return the appropriate command.
///
/// Unknown flags are ignored.
///
/// # Examples
///
/// ```
/// use toolcat::cli::args::{parse_args, CliCommand};
///
/// let args = vec!["toolcat".to_string(), "--version".to_string()];
/// assert_eq!(parse_args(args.into_iter()), CliCommand::Version);
/// ```
pub fn parse_args<I>(args: I) -> CliCommand
where
    I: Iterator<Item = String>,
{
    let mut options = RunOptions::default();
    // Skip the program name
    let mut args = args.skip(1);

    while let Some(arg) = args.next() {
        match arg.as_str() {
            "--version" | "-V" => return CliCommand::Version,
            "--help" | "-h" => return CliCommand::Help,
            "--debug" => options.debug = true,
            "--no-dashboard" => options.no_dashboard = true,
            "--base-url" => match args.next() {
                Some(url) => options.base_url = Some(url),
                None => return CliCommand::Invalid("--base-url needs a value".to_string()),
            },
            "--dashboard-port" => match args.next().map(|p| p.parse::<u16>()) {
                Some(Ok(port)) => options.dashboard_port = Some(port),
                Some(Err(_)) | None => {
                    return CliCommand::Invalid("--dashboard-port needs a port number".to_string())
                }
            },
            _ => {}
        }
    }
    CliCommand::Run(options)
}
