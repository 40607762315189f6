//! Topic extraction from unpacked packages.
//!
//! Each package ships its exported topics as `docs/topics.json`: an array of
//! entries, every entry naming one documented topic with its display title,
//! the reference file it lives in, and one or more aliases. A single entry
//! expands to one [`RawTopicRecord`] per alias, so the downstream stages only
//! ever see a flat table.

use crate::{Error, RawTopicRecord, Result};
use serde::Deserialize;
use std::fs;
use std::path::{Path, PathBuf};
use tracing::{debug, warn};

/// File name of the per-package topic metadata, under `docs/`.
pub const METADATA_FILE: &str = "topics.json";

#[derive(Debug, Deserialize)]
struct TopicEntry {
    #[serde(default)]
    aliases: Vec<String>,
    #[serde(default)]
    title: String,
    #[serde(default)]
    file: String,
}

/// Reads a package's topic metadata and expands it into one record per alias.
///
/// A package without a metadata file has no topics; that is an empty table,
/// not an error. Malformed metadata also degrades to an empty table, with a
/// warning, so one broken package cannot block indexing the rest.
pub fn extract_topics(package_root: &Path, package: &str) -> Vec<RawTopicRecord> {
    let Some(path) = metadata_path(package_root, package) else {
        debug!("no topic metadata for '{package}'");
        return Vec::new();
    };

    match read_metadata(&path, package) {
        Ok(entries) => expand_entries(entries, package),
        Err(err) => {
            warn!("skipping topics for '{package}': {err}");
            Vec::new()
        },
    }
}

/// Archives conventionally wrap their contents in a top-level directory
/// named after the package; accept both that layout and a flat one.
fn metadata_path(package_root: &Path, package: &str) -> Option<PathBuf> {
    let nested = package_root.join(package).join("docs").join(METADATA_FILE);
    if nested.is_file() {
        return Some(nested);
    }
    let flat = package_root.join("docs").join(METADATA_FILE);
    flat.is_file().then_some(flat)
}

fn read_metadata(path: &Path, package: &str) -> Result<Vec<TopicEntry>> {
    let raw = fs::read_to_string(path)?;
    serde_json::from_str(&raw).map_err(|err| Error::MetadataParse {
        package: package.to_string(),
        reason: err.to_string(),
    })
}

fn expand_entries(entries: Vec<TopicEntry>, package: &str) -> Vec<RawTopicRecord> {
    entries
        .into_iter()
        .flat_map(|entry| {
            let title = entry.title;
            let file = entry.file;
            entry
                .aliases
                .into_iter()
                .map(move |alias| RawTopicRecord {
                    alias,
                    title: title.clone(),
                    package: package.to_string(),
                    file: file.clone(),
                })
                .collect::<Vec<_>>()
        })
        .collect()
}
