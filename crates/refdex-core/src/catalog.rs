//! The catalog build pipeline.
//!
//! Control flows strictly forward: fetch → unpack → extract → join → filter.
//! Retrieval and unpack failures are fatal and enumerate every offending
//! package; metadata problems degrade per package. Downloads run with
//! bounded concurrency; the filter stage's final sort makes the output
//! independent of arrival order.

use crate::config::{Config, DEFAULT_CONCURRENCY, DEFAULT_REPOSITORY, DEFAULT_TIMEOUT_SECS};
use crate::extractor::extract_topics;
use crate::fetcher::{FetchedArchive, Fetcher};
use crate::filter::filter_catalog;
use crate::joiner::join_topics;
use crate::workspace::Workspace;
use crate::{Catalog, Error, PackageRequest, RawTopicRecord, Result};
use futures::stream::{self, StreamExt};
use regex::Regex;
use std::collections::HashSet;
use std::time::Duration;
use tracing::{debug, info, warn};

/// Options for one catalog build.
#[derive(Debug, Clone)]
pub struct BuildOptions {
    /// Package repository endpoint serving `<id>.tar.gz` archives.
    pub endpoint: String,
    /// Per-package retrieval timeout.
    pub timeout: Duration,
    /// Maximum concurrent downloads.
    pub concurrency: usize,
    /// Optional alias inclusion pattern; `None` matches everything.
    pub include: Option<Regex>,
}

impl BuildOptions {
    /// Options against a specific repository endpoint, other fields at
    /// their defaults.
    pub fn new(endpoint: impl Into<String>) -> Self {
        Self {
            endpoint: endpoint.into(),
            timeout: Duration::from_secs(DEFAULT_TIMEOUT_SECS),
            concurrency: DEFAULT_CONCURRENCY,
            include: None,
        }
    }

    /// Options derived from loaded configuration.
    pub fn from_config(config: &Config) -> Self {
        Self {
            endpoint: config.repository.endpoint.clone(),
            timeout: Duration::from_secs(config.fetch.timeout_secs),
            concurrency: config.fetch.concurrency,
            include: None,
        }
    }

    /// Compiles and sets the alias inclusion pattern.
    pub fn include_pattern(mut self, pattern: &str) -> Result<Self> {
        let compiled = Regex::new(pattern)
            .map_err(|err| Error::Config(format!("invalid include pattern: {err}")))?;
        self.include = Some(compiled);
        Ok(self)
    }
}

impl Default for BuildOptions {
    fn default() -> Self {
        Self::new(DEFAULT_REPOSITORY)
    }
}

/// Builds the catalog for a set of package requests.
///
/// Acquires a fresh scratch workspace for the run and removes it on every
/// exit path, success or error.
pub async fn build_catalog(requests: &[PackageRequest], options: &BuildOptions) -> Result<Catalog> {
    let workspace = Workspace::new()?;
    build_catalog_in(requests, options, &workspace).await
}

/// Builds the catalog using a caller-supplied scratch workspace.
pub async fn build_catalog_in(
    requests: &[PackageRequest],
    options: &BuildOptions,
    workspace: &Workspace,
) -> Result<Catalog> {
    ensure_unique_ids(requests)?;

    let archives = fetch_all(requests, options).await?;
    let unpacked = unpack_all(archives, workspace)?;

    let mut records: Vec<RawTopicRecord> = Vec::new();
    for (id, dir) in &unpacked {
        let topics = extract_topics(dir, id);
        debug!("'{}': {} topic records", id, topics.len());
        records.extend(topics);
    }

    let joined = join_topics(records, requests);
    let catalog = filter_catalog(joined, options.include.as_ref());

    info!(
        "catalog built: {} rows from {} package(s)",
        catalog.len(),
        requests.len()
    );
    Ok(catalog)
}

/// Archive URL for a package identifier.
pub(crate) fn archive_url(endpoint: &str, id: &str) -> String {
    format!("{}/{id}.tar.gz", endpoint.trim_end_matches('/'))
}

fn ensure_unique_ids(requests: &[PackageRequest]) -> Result<()> {
    let mut seen = HashSet::new();
    for request in requests {
        if !seen.insert(request.id.as_str()) {
            return Err(Error::Config(format!(
                "duplicate package id '{}' in request set",
                request.id
            )));
        }
    }
    Ok(())
}

/// Downloads every requested archive. All-or-nothing: if any package fails,
/// the whole stage fails with the sorted list of offenders.
async fn fetch_all(
    requests: &[PackageRequest],
    options: &BuildOptions,
) -> Result<Vec<(String, FetchedArchive)>> {
    let fetcher = Fetcher::with_timeout(options.timeout)?;

    let outcomes: Vec<(String, Result<FetchedArchive>)> = stream::iter(requests.iter())
        .map(|request| {
            let fetcher = &fetcher;
            let url = archive_url(&options.endpoint, &request.id);
            async move {
                let outcome = fetcher.fetch_archive(&url).await;
                (request.id.clone(), outcome)
            }
        })
        .buffer_unordered(options.concurrency.max(1))
        .collect()
        .await;

    let mut archives = Vec::with_capacity(outcomes.len());
    let mut failed = Vec::new();
    for (id, outcome) in outcomes {
        match outcome {
            Ok(archive) => {
                debug!("retrieved '{}' ({} bytes, sha256 {})", id, archive.bytes.len(), archive.sha256);
                archives.push((id, archive));
            },
            Err(err) => {
                warn!("retrieval failed for '{}': {}", id, err);
                failed.push(id);
            },
        }
    }

    if !failed.is_empty() {
        failed.sort_unstable();
        return Err(Error::Retrieval { failed });
    }
    Ok(archives)
}

/// Unpacks every archive into the workspace. Same all-or-nothing contract
/// as the fetch stage.
fn unpack_all(
    archives: Vec<(String, FetchedArchive)>,
    workspace: &Workspace,
) -> Result<Vec<(String, std::path::PathBuf)>> {
    let mut unpacked = Vec::with_capacity(archives.len());
    let mut failed = Vec::new();
    for (id, archive) in archives {
        match workspace.unpack_archive(&id, &archive.bytes) {
            Ok(dir) => unpacked.push((id, dir)),
            Err(err) => {
                warn!("unpack failed for '{}': {}", id, err);
                failed.push(id);
            },
        }
    }

    if !failed.is_empty() {
        failed.sort_unstable();
        return Err(Error::Unpack { failed });
    }
    Ok(unpacked)
}
