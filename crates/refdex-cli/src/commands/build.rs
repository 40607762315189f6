//! Build command implementation

use anyhow::{Context, Result};
use colored::Colorize;
use refdex_core::{BuildOptions, Config, build_catalog, load_manifest};
use std::fs;
use std::path::Path;
use std::time::Duration;

use crate::output::{OutputFormat, render};

/// Build the topic catalog for the packages listed in a manifest.
///
/// # Arguments
///
/// * `manifest` - Path to the TOML manifest listing packages
/// * `include` - Optional alias inclusion pattern (regular expression)
/// * `repository` - Repository endpoint override
/// * `timeout` - Per-package fetch timeout override, in seconds
/// * `output` - Destination file; stdout when absent
/// * `format` - Rendering format
/// * `quiet` - Suppress the summary line
pub async fn execute(
    manifest: &Path,
    include: Option<&str>,
    repository: Option<&str>,
    timeout: Option<u64>,
    output: Option<&Path>,
    format: OutputFormat,
    quiet: bool,
) -> Result<()> {
    let requests = load_manifest(manifest)
        .with_context(|| format!("failed to load manifest {}", manifest.display()))?;

    let config = Config::load()?;
    let mut options = BuildOptions::from_config(&config);
    if let Some(endpoint) = repository {
        options.endpoint = endpoint.to_string();
    }
    if let Some(secs) = timeout {
        options.timeout = Duration::from_secs(secs);
    }
    if let Some(pattern) = include {
        options = options.include_pattern(pattern)?;
    }

    let catalog = build_catalog(&requests, &options).await?;

    let rendered = render(&catalog, format)?;
    match output {
        Some(path) => {
            fs::write(path, rendered)
                .with_context(|| format!("failed to write {}", path.display()))?;
            if !quiet {
                println!(
                    "{} {} rows from {} package(s) -> {}",
                    "✓ Built".green(),
                    catalog.len(),
                    requests.len(),
                    path.display()
                );
            }
        },
        None => print!("{rendered}"),
    }

    Ok(())
}
