//! Hand-rolled flag parsing; the surface is three flags.

use std::path::PathBuf;

/// Overrides applied on top of the config file and environment.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TuiOptions {
    pub config: Option<PathBuf>,
    pub backend: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CliCommand {
    Version,
    Help,
    /// A flag was missing its value.
    Invalid(String),
    RunTui(TuiOptions),
}

/// Parse `std::env::args()`-style input, program name first.
///
/// ```
/// use packdeck::cli::args::{parse_args, CliCommand};
///
/// let args = vec!["packdeck".to_string(), "-V".to_string()];
/// assert_eq!(parse_args(args.into_iter()), CliCommand::Version);
/// ```
pub fn parse_args<I>(args: I) -> CliCommand
where
    I: Iterator<Item = String>,
{
    let mut options = TuiOptions::default();
    let mut args = args.skip(1);
    while let Some(arg) = args.next() {
        match arg.as_str() {
            "--version" | "-V" => return CliCommand::Version,
            "--help" | "-h" => return CliCommand::Help,
            "--config" => match args.next() {
                Some(path) => options.config = Some(PathBuf::from(path)),
                None => return CliCommand::Invalid("--config needs a path".to_string()),
            },
            "--backend" => match args.next() {
                Some(url) => options.backend = Some(url),
                None => return CliCommand::Invalid("--backend needs a URL".to_string()),
            },
            other => {
                if let Some(path) = other.strip_prefix("--config=") {
                    options.config = Some(PathBuf::from(path));
                } else if let Some(url) = other.strip_prefix("--backend=") {
                    options.backend = Some(url.to_string());
                }
            }
        }
    }
    CliCommand::RunTui(options)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn parse(args: &[&str]) -> CliCommand {
        let mut all = vec!["packdeck".to_string()];
        all.extend(args.iter().map(|a| a.to_string()));
        parse_args(all.into_iter())
    }

    #[test]
    fn test_parse_version_flags() {
        assert_eq!(parse(&["--version"]), CliCommand::Version);
        assert_eq!(parse(&["--backend", "http://x", "-V"]), CliCommand::Version);
    }

    #[test]
    fn test_parse_no_args_runs_tui() {
        assert_eq!(parse(&[]), CliCommand::RunTui(TuiOptions::default()));
    }

    #[test]
    fn test_parse_config_and_backend() {
        let command = parse(&["--config", "/tmp/deck.json", "--backend=http://10.0.0.5:4717"]);
        assert_eq!(
            command,
            CliCommand::RunTui(TuiOptions {
                config: Some(PathBuf::from("/tmp/deck.json")),
                backend: Some("http://10.0.0.5:4717".to_string()),
            })
        );
    }

    #[test]
    fn test_parse_missing_value() {
        assert!(matches!(parse(&["--config"]), CliCommand::Invalid(_)));
        assert!(matches!(parse(&["--backend"]), CliCommand::Invalid(_)));
    }

    #[test]
    fn test_parse_unknown_flag_is_ignored() {
        assert_eq!(parse(&["--unknown"]), CliCommand::RunTui(TuiOptions::default()));
    }
}
