//! Configuration for the catalog builder.
//!
//! Settings load from `config.toml` in the platform config directory, with
//! environment overrides:
//!
//! - `REFDEX_CONFIG_DIR`: directory containing `config.toml`
//! - `REFDEX_REPOSITORY`: package repository endpoint
//!
//! A missing config file is not an error; defaults apply. The package set
//! itself comes from a separate TOML manifest supplied per run:
//!
//! ```toml
//! [[package]]
//! id = "alpha"
//! docs_url = "https://alpha.example/"
//! ```

use crate::{Error, PackageRequest, Result};
use serde::{Deserialize, Serialize};
use std::collections::HashSet;
use std::fs;
use std::path::{Path, PathBuf};

/// Default package repository endpoint.
pub const DEFAULT_REPOSITORY: &str = "https://pkg.refdex.dev";

/// Default per-package fetch timeout, in seconds.
pub const DEFAULT_TIMEOUT_SECS: u64 = 30;

/// Default number of concurrent archive downloads.
pub const DEFAULT_CONCURRENCY: usize = 4;

/// Global configuration for the catalog builder.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Config {
    /// Package repository settings.
    #[serde(default)]
    pub repository: RepositoryConfig,
    /// Fetch behavior settings.
    #[serde(default)]
    pub fetch: FetchConfig,
}

/// Where package archives are downloaded from.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RepositoryConfig {
    /// Repository endpoint serving `<id>.tar.gz` archives.
    pub endpoint: String,
}

/// Download behavior for the fetch stage.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FetchConfig {
    /// Per-package retrieval timeout in seconds. A timeout counts as a
    /// retrieval failure and aborts the run like any other.
    pub timeout_secs: u64,
    /// Maximum concurrent downloads. Purely a performance knob; the final
    /// sort makes output independent of fetch order.
    pub concurrency: usize,
}

impl Default for RepositoryConfig {
    fn default() -> Self {
        Self {
            endpoint: DEFAULT_REPOSITORY.to_string(),
        }
    }
}

impl Default for FetchConfig {
    fn default() -> Self {
        Self {
            timeout_secs: DEFAULT_TIMEOUT_SECS,
            concurrency: DEFAULT_CONCURRENCY,
        }
    }
}

impl Default for Config {
    fn default() -> Self {
        Self {
            repository: RepositoryConfig::default(),
            fetch: FetchConfig::default(),
        }
    }
}

impl Config {
    /// Load configuration from the default location, or defaults if no
    /// config file exists. Environment overrides are applied last.
    pub fn load() -> Result<Self> {
        let mut config = match Self::config_path() {
            Some(path) if path.is_file() => Self::load_from(&path)?,
            _ => Self::default(),
        };
        config.apply_env_overrides();
        Ok(config)
    }

    /// Load configuration from an explicit TOML file.
    pub fn load_from(path: &Path) -> Result<Self> {
        let raw = fs::read_to_string(path)?;
        let config = toml::from_str(&raw)?;
        Ok(config)
    }

    fn apply_env_overrides(&mut self) {
        if let Ok(endpoint) = std::env::var("REFDEX_REPOSITORY") {
            let trimmed = endpoint.trim();
            if !trimmed.is_empty() {
                self.repository.endpoint = trimmed.to_string();
            }
        }
    }

    fn config_path() -> Option<PathBuf> {
        if let Ok(dir) = std::env::var("REFDEX_CONFIG_DIR") {
            let trimmed = dir.trim();
            if !trimmed.is_empty() {
                return Some(PathBuf::from(trimmed).join("config.toml"));
            }
        }

        directories::ProjectDirs::from("dev", "refdex", "refdex")
            .map(|dirs| dirs.config_dir().join("config.toml"))
    }
}

#[derive(Debug, Deserialize)]
struct ManifestFile {
    #[serde(default, rename = "package")]
    packages: Vec<ManifestPackage>,
}

#[derive(Debug, Deserialize)]
struct ManifestPackage {
    id: String,
    docs_url: String,
}

/// Loads the package manifest and validates it into a request set.
///
/// Identifiers must be non-empty and unique; documentation URLs must be
/// valid http(s) URLs.
pub fn load_manifest(path: &Path) -> Result<Vec<PackageRequest>> {
    let raw = fs::read_to_string(path)?;
    let manifest: ManifestFile = toml::from_str(&raw)?;

    let mut seen = HashSet::new();
    let mut requests = Vec::with_capacity(manifest.packages.len());
    for package in manifest.packages {
        if package.id.trim().is_empty() {
            return Err(Error::Config("manifest entry with empty id".to_string()));
        }
        if !seen.insert(package.id.clone()) {
            return Err(Error::Config(format!(
                "duplicate package id '{}' in manifest",
                package.id
            )));
        }
        validate_docs_url(&package.docs_url)?;
        requests.push(PackageRequest::new(package.id, package.docs_url));
    }
    Ok(requests)
}

fn validate_docs_url(raw: &str) -> Result<()> {
    let parsed = url::Url::parse(raw).map_err(|err| Error::InvalidUrl(format!("{raw}: {err}")))?;
    match parsed.scheme() {
        "http" | "https" => Ok(()),
        other => Err(Error::InvalidUrl(format!(
            "{raw}: unsupported scheme '{other}'"
        ))),
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let config = Config::default();
        assert_eq!(config.repository.endpoint, DEFAULT_REPOSITORY);
        assert_eq!(config.fetch.timeout_secs, DEFAULT_TIMEOUT_SECS);
        assert_eq!(config.fetch.concurrency, DEFAULT_CONCURRENCY);
    }

    #[test]
    fn test_load_from_file() {
        let tmp = tempfile::tempdir().unwrap();
        let path = tmp.path().join("config.toml");
        fs::write(
            &path,
            "[repository]\nendpoint = \"https://mirror.example\"\n\n[fetch]\ntimeout_secs = 5\nconcurrency = 2\n",
        )
        .unwrap();

        let config = Config::load_from(&path).unwrap();
        assert_eq!(config.repository.endpoint, "https://mirror.example");
        assert_eq!(config.fetch.timeout_secs, 5);
        assert_eq!(config.fetch.concurrency, 2);
    }

    #[test]
    fn test_partial_config_falls_back_to_defaults() {
        let tmp = tempfile::tempdir().unwrap();
        let path = tmp.path().join("config.toml");
        fs::write(&path, "[repository]\nendpoint = \"https://mirror.example\"\n").unwrap();

        let config = Config::load_from(&path).unwrap();
        assert_eq!(config.repository.endpoint, "https://mirror.example");
        assert_eq!(config.fetch.timeout_secs, DEFAULT_TIMEOUT_SECS);
    }

    #[test]
    fn test_manifest_round_trip() {
        let tmp = tempfile::tempdir().unwrap();
        let path = tmp.path().join("packages.toml");
        fs::write(
            &path,
            "[[package]]\nid = \"alpha\"\ndocs_url = \"https://alpha.example/\"\n\n\
             [[package]]\nid = \"beta\"\ndocs_url = \"https://beta.example\"\n",
        )
        .unwrap();

        let requests = load_manifest(&path).unwrap();
        assert_eq!(requests.len(), 2);
        assert_eq!(requests[0], PackageRequest::new("alpha", "https://alpha.example/"));
        assert_eq!(requests[1].id, "beta");
    }

    #[test]
    fn test_manifest_rejects_duplicate_ids() {
        let tmp = tempfile::tempdir().unwrap();
        let path = tmp.path().join("packages.toml");
        fs::write(
            &path,
            "[[package]]\nid = \"alpha\"\ndocs_url = \"https://alpha.example/\"\n\n\
             [[package]]\nid = \"alpha\"\ndocs_url = \"https://other.example/\"\n",
        )
        .unwrap();

        let err = load_manifest(&path).unwrap_err();
        assert!(matches!(err, Error::Config(_)));
        assert!(err.to_string().contains("alpha"));
    }

    #[test]
    fn test_manifest_rejects_bad_urls() {
        let tmp = tempfile::tempdir().unwrap();
        let path = tmp.path().join("packages.toml");
        fs::write(
            &path,
            "[[package]]\nid = \"alpha\"\ndocs_url = \"ftp://alpha.example/\"\n",
        )
        .unwrap();

        let err = load_manifest(&path).unwrap_err();
        assert!(matches!(err, Error::InvalidUrl(_)));
    }

    #[test]
    fn test_empty_manifest_is_empty_request_set() {
        let tmp = tempfile::tempdir().unwrap();
        let path = tmp.path().join("packages.toml");
        fs::write(&path, "").unwrap();

        let requests = load_manifest(&path).unwrap();
        assert!(requests.is_empty());
    }
}
