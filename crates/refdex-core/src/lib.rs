//! # refdex-core
//!
//! Core functionality for refdex - a reference-topic catalog builder for
//! package documentation sites.
//!
//! Given a set of packages and their documentation base URLs, this crate
//! downloads each package's distributable archive, extracts the exported
//! topic metadata, and assembles one normalized catalog table: one row per
//! topic alias, with a fully qualified documentation URL, a single-line
//! title, and the owning package. The surrounding site renders that table
//! into its searchable reference pages; this crate stops at the table.
//!
//! ## Architecture
//!
//! The pipeline has four stages, each a pure transformation over in-memory
//! tabular data, flowing strictly forward:
//!
//! 1. **Fetch** ([`fetcher`], [`workspace`]): download archives into a
//!    scratch workspace and unpack them. All-or-nothing; failures enumerate
//!    the offending package identifiers.
//! 2. **Extract** ([`extractor`]): parse each package's topic metadata into
//!    a flat record table, one row per alias.
//! 3. **Join** ([`joiner`]): attach base URLs, compute reference URLs,
//!    normalize titles.
//! 4. **Filter** ([`filter`]): apply the inclusion pattern and boilerplate
//!    exclusions, sort, deduplicate.
//!
//! ## Quick Start
//!
//! The join and filter stages are pure and usable without any network:
//!
//! ```rust
//! use refdex_core::{PackageRequest, RawTopicRecord, filter_catalog, join_topics};
//!
//! let requests = vec![PackageRequest::new("alpha", "https://alpha.example/")];
//! let records = vec![RawTopicRecord {
//!     alias: "foo".to_string(),
//!     title: "Foo Function".to_string(),
//!     package: "alpha".to_string(),
//!     file: "foo.html".to_string(),
//! }];
//!
//! let catalog = filter_catalog(join_topics(records, &requests), None);
//! assert_eq!(catalog[0].url, "https://alpha.example/reference/foo.html");
//! ```
//!
//! The full pipeline is [`build_catalog`]:
//!
//! ```rust,no_run
//! use refdex_core::{BuildOptions, PackageRequest, Result, build_catalog};
//!
//! # async fn run() -> Result<()> {
//! let requests = vec![PackageRequest::new("alpha", "https://alpha.example/")];
//! let options = BuildOptions::new("https://pkg.example.org");
//! let catalog = build_catalog(&requests, &options).await?;
//! println!("{} topics", catalog.len());
//! # Ok(())
//! # }
//! ```

/// The catalog build pipeline and its options
pub mod catalog;
/// Configuration and manifest loading
pub mod config;
/// Error types and result aliases
pub mod error;
/// Topic metadata extraction from unpacked packages
pub mod extractor;
/// HTTP archive downloading
pub mod fetcher;
/// Catalog filtering, ordering and deduplication
pub mod filter;
/// Joining topic tables against the request set
pub mod joiner;
/// Core data types and structures
pub mod types;
/// Scratch workspace management
pub mod workspace;

// Re-export commonly used types
pub use catalog::{BuildOptions, build_catalog, build_catalog_in};
pub use config::{Config, DEFAULT_REPOSITORY, FetchConfig, RepositoryConfig, load_manifest};
pub use error::{Error, Result};
pub use extractor::extract_topics;
pub use fetcher::{FetchedArchive, Fetcher};
pub use filter::filter_catalog;
pub use joiner::join_topics;
pub use types::*;
pub use workspace::Workspace;
