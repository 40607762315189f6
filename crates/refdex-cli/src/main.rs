//! refdex CLI - build searchable topic catalogs from package documentation
//!
//! This is the main entry point for the refdex command-line interface.
//! Command implementations live in the `commands` module.

use anyhow::Result;
use clap::Parser;
use tracing::Level;
use tracing_subscriber::FmtSubscriber;

mod cli;
mod commands;
mod output;

use cli::{Cli, Commands};

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    initialize_logging(&cli)?;

    execute_command(cli).await
}

fn initialize_logging(cli: &Cli) -> Result<()> {
    let level = if cli.verbose || cli.debug {
        Level::DEBUG
    } else if cli.quiet {
        Level::WARN
    } else {
        Level::INFO
    };

    let subscriber = FmtSubscriber::builder()
        .with_max_level(level)
        .with_target(false)
        .with_thread_ids(false)
        .with_thread_names(false)
        .with_writer(std::io::stderr)
        .finish();

    tracing::subscriber::set_global_default(subscriber)?;
    Ok(())
}

async fn execute_command(cli: Cli) -> Result<()> {
    match cli.command {
        Commands::Build {
            manifest,
            include,
            repository,
            timeout,
            output,
            format,
        } => {
            commands::build(
                &manifest,
                include.as_deref(),
                repository.as_deref(),
                timeout,
                output.as_deref(),
                format,
                cli.quiet,
            )
            .await
        },

        Commands::Completions { shell } => {
            commands::generate(shell);
            Ok(())
        },
    }
}
