//! # CLI Structure and Argument Parsing
//!
//! Defines the command-line interface for `refdex` using `clap` derive
//! macros.
//!
//! ## Usage Patterns
//!
//! ```bash
//! # Build a catalog from a package manifest
//! refdex build --manifest packages.toml
//!
//! # Machine-readable output, narrowed to matching aliases
//! refdex build -m packages.toml --include '^filter' --format json
//!
//! # Against a mirror, with a tighter per-package timeout
//! refdex build -m packages.toml --repository https://mirror.example --timeout 10
//! ```

use clap::{Parser, Subcommand};
use clap_complete::Shell;
use std::path::PathBuf;

use crate::output::OutputFormat;

/// Main CLI structure for the `refdex` command.
#[derive(Parser, Debug)]
#[command(name = "refdex")]
#[command(version)]
#[command(
    about = "refdex - build searchable topic catalogs from package documentation",
    long_about = None
)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,

    /// Enable verbose logging output
    #[arg(short = 'v', long, global = true)]
    pub verbose: bool,

    /// Suppress informational messages (only show errors and warnings)
    #[arg(short = 'q', long, global = true)]
    pub quiet: bool,

    /// Show debug-level logs
    #[arg(long, global = true)]
    pub debug: bool,
}

/// Available subcommands for the `refdex` CLI.
#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Build the topic catalog for a set of packages
    Build {
        /// TOML manifest listing the packages to index
        #[arg(short, long, value_name = "FILE")]
        manifest: PathBuf,

        /// Keep only aliases matching this regular expression
        #[arg(long, value_name = "REGEX")]
        include: Option<String>,

        /// Package repository endpoint (also via REFDEX_REPOSITORY)
        #[arg(long, value_name = "URL", env = "REFDEX_REPOSITORY")]
        repository: Option<String>,

        /// Per-package fetch timeout in seconds
        #[arg(long, value_name = "SECS")]
        timeout: Option<u64>,

        /// Write the catalog to a file instead of stdout
        #[arg(short, long, value_name = "FILE")]
        output: Option<PathBuf>,

        /// Output format
        #[arg(long, value_enum, default_value_t = OutputFormat::Text)]
        format: OutputFormat,
    },

    /// Generate shell completions
    Completions {
        /// Shell to generate completions for
        #[arg(value_enum)]
        shell: Shell,
    },
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    #[test]
    fn test_cli_structure_is_valid() {
        Cli::command().debug_assert();
    }

    #[test]
    fn test_build_args_parse() {
        let cli = Cli::parse_from([
            "refdex", "build", "-m", "packages.toml", "--include", "^foo", "--format", "json",
        ]);
        match cli.command {
            Commands::Build {
                manifest,
                include,
                format,
                ..
            } => {
                assert_eq!(manifest, PathBuf::from("packages.toml"));
                assert_eq!(include.as_deref(), Some("^foo"));
                assert_eq!(format, OutputFormat::Json);
            },
            Commands::Completions { .. } => unreachable!("parsed wrong command"),
        }
    }
}
