//! `--version` and `--help` output.

pub const VERSION: &str = env!("CARGO_PKG_VERSION");

pub fn version_line() -> String {
    format!("packdeck {}", VERSION)
}

pub fn usage() -> String {
    format!(
        "{}\n\nUsage: packdeck [--config <path>] [--backend <url>]\n\n\
         Options:\n  \
         --config <path>   read settings from this JSON file\n  \
         --backend <url>   command gateway base URL\n  \
         -V, --version     print the version\n  \
         -h, --help        print this help",
        version_line()
    )
}
