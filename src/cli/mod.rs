//! Command-line entry.
//!
//! `main` parses flags first; informational commands print and exit before
//! the terminal is touched.
//!
//! ```ignore
//! use packdeck::cli::{parse_args, run_cli_command};
//!
//! let command = parse_args(std::env::args());
//! if let Some(code) = run_cli_command(&command) {
//!     std::process::exit(code);
//! }
//! ```

pub mod args;
pub mod version;

pub use args::{parse_args, CliCommand, TuiOptions};
pub use version::{usage, version_line, VERSION};

/// Handle commands that do not start the TUI. Returns the exit code, or
/// `None` when the TUI should run.
pub fn run_cli_command(command: &CliCommand) -> Option<i32> {
    match command {
        CliCommand::Version => {
            println!("{}", version_line());
            Some(0)
        }
        CliCommand::Help => {
            println!("{}", usage());
            Some(0)
        }
        CliCommand::Invalid(message) => {
            eprintln!("error: {}\n\n{}", message, usage());
            Some(2)
        }
        CliCommand::RunTui(_) => None,
    }
}
