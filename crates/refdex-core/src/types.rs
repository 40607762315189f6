use serde::{Deserialize, Serialize};

/// A package to index: identifier plus the base URL of its documentation
/// site. The set of requests is static for the duration of a run.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PackageRequest {
    /// Package identifier, unique within a run.
    pub id: String,
    /// Base URL of the package's documentation site.
    pub docs_url: String,
}

impl PackageRequest {
    /// Creates a request from an identifier and documentation base URL.
    pub fn new(id: impl Into<String>, docs_url: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            docs_url: docs_url.into(),
        }
    }
}

/// One exported name from a package's topic metadata, before joining.
///
/// A metadata entry with several aliases expands into several records, one
/// per alias. Transient: these only exist between the extractor and the
/// joiner.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RawTopicRecord {
    /// Topic alias (one of possibly many for the same underlying entry).
    pub alias: String,
    /// Display title; may still contain embedded line breaks at this stage.
    pub title: String,
    /// Identifier of the owning package.
    pub package: String,
    /// Documentation file path relative to the package's reference section.
    pub file: String,
}

/// Final catalog row: all four fields are non-empty once the filter stage
/// has run.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CatalogRow {
    /// Topic alias.
    pub alias: String,
    /// Fully qualified documentation URL.
    pub url: String,
    /// Display title, normalized to a single line.
    pub title: String,
    /// Identifier of the owning package.
    pub package: String,
}

/// Ordered catalog: sorted ascending by (alias, package), deduplicated.
/// Rebuilt from upstream package sources on every run; never persisted.
pub type Catalog = Vec<CatalogRow>;
