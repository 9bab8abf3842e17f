//! Version and help output.

/// The current version, read from Cargo.toml at compile time.
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Usage text for `--help`.
pub const USAGE: &str = "\
toolcat - internal tools catalog with network debugging

USAGE:
    toolcat [OPTIONS]

OPTIONS:
    --debug                  Tag catalog requests with a dbg correlation id
    --base-url <URL>         Catalog API origin (env TOOLCAT_BASE_URL)
    --dashboard-port <PORT>  Debug dashboard port (env TOOLCAT_DASHBOARD_PORT)
    --no-dashboard           Do not start the debug dashboard
    -V, --version            Print version
    -h, --help               Print this help
";

/// Handle the --version command.
pub fn handle_version_command() -> ! {
    println!("toolcat {}", VERSION);
    std::process::exit(0)
}

/// Handle the --help command.
pub fn handle_help_command() -> ! {
    print!("{}", USAGE);
    std::process::exit(0)
}
