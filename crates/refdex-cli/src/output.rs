//! # Output Formatting
//!
//! Renders the built catalog for human or programmatic consumption.
//!
//! - **Text**: aligned columns for reading in a terminal
//! - **JSON**: single JSON array for scripting
//! - **JSONL**: newline-delimited rows for streaming processing

use anyhow::Result;
use clap::ValueEnum;
use refdex_core::CatalogRow;
use std::fmt::Write as _;

/// Output format for the rendered catalog.
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
#[value(rename_all = "lowercase")]
pub enum OutputFormat {
    /// Aligned text columns (default)
    Text,
    /// Single JSON array
    Json,
    /// Newline-delimited JSON
    Jsonl,
}

/// Renders the catalog in the requested format. The returned string ends
/// with a newline unless the catalog is empty.
pub fn render(catalog: &[CatalogRow], format: OutputFormat) -> Result<String> {
    match format {
        OutputFormat::Text => Ok(render_text(catalog)),
        OutputFormat::Json => {
            let mut out = serde_json::to_string_pretty(catalog)?;
            out.push('\n');
            Ok(out)
        },
        OutputFormat::Jsonl => {
            let mut out = String::new();
            for row in catalog {
                out.push_str(&serde_json::to_string(row)?);
                out.push('\n');
            }
            Ok(out)
        },
    }
}

fn render_text(catalog: &[CatalogRow]) -> String {
    if catalog.is_empty() {
        return String::new();
    }

    let alias_width = column_width("ALIAS", catalog.iter().map(|r| r.alias.as_str()));
    let package_width = column_width("PACKAGE", catalog.iter().map(|r| r.package.as_str()));
    let title_width = column_width("TITLE", catalog.iter().map(|r| r.title.as_str()));

    let mut out = String::new();
    let _ = writeln!(
        out,
        "{:alias_width$}  {:package_width$}  {:title_width$}  URL",
        "ALIAS", "PACKAGE", "TITLE"
    );
    for row in catalog {
        let _ = writeln!(
            out,
            "{:alias_width$}  {:package_width$}  {:title_width$}  {}",
            row.alias, row.package, row.title, row.url
        );
    }
    out
}

fn column_width<'a>(header: &str, values: impl Iterator<Item = &'a str>) -> usize {
    values
        .map(str::len)
        .chain(std::iter::once(header.len()))
        .max()
        .unwrap_or(0)
}
