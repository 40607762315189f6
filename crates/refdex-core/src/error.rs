//! Error types and handling for refdex-core operations.
//!
//! Errors are categorized along the pipeline stages: retrieval and unpack
//! failures are fatal and enumerate the offending package identifiers, while
//! metadata parse failures are recoverable per package (the extractor degrades
//! to an empty topic table instead of aborting the run).

use thiserror::Error;

/// The main error type for refdex-core operations.
///
/// All public functions in refdex-core return `Result<T, Error>` for
/// consistent error handling. Fatal pipeline errors (`Retrieval`, `Unpack`)
/// carry the sorted list of package identifiers that failed, so the caller
/// can report exactly which requests to fix.
#[derive(Error, Debug)]
pub enum Error {
    /// I/O operation failed.
    ///
    /// Covers filesystem operations in the scratch workspace: creating
    /// per-package directories, reading metadata files, writing output.
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// Network operation failed.
    ///
    /// The underlying `reqwest::Error` is preserved for detailed connection
    /// information. Timeouts and connection failures are recoverable in the
    /// retry sense, but the pipeline itself never retries: a failed download
    /// surfaces as a `Retrieval` error for the affected package.
    #[error("Network error: {0}")]
    Network(#[from] reqwest::Error),

    /// One or more requested packages could not be downloaded.
    ///
    /// Fatal: the run aborts and no partial catalog is produced. `failed`
    /// holds the offending identifiers, sorted.
    #[error("failed to retrieve package(s): {}", .failed.join(", "))]
    Retrieval {
        /// Identifiers of the packages that could not be retrieved.
        failed: Vec<String>,
    },

    /// One or more downloaded archives could not be extracted.
    ///
    /// Fatal, same contract as [`Error::Retrieval`].
    #[error("failed to unpack package(s): {}", .failed.join(", "))]
    Unpack {
        /// Identifiers of the packages whose archives failed to extract.
        failed: Vec<String>,
    },

    /// A package's topic metadata file is malformed.
    ///
    /// Recoverable per package: the extractor logs a warning and treats the
    /// package as having no topics rather than aborting the whole build.
    #[error("invalid topic metadata for '{package}': {reason}")]
    MetadataParse {
        /// Package whose metadata could not be parsed.
        package: String,
        /// Parser diagnostic.
        reason: String,
    },

    /// Requested resource was not found.
    ///
    /// Used for 404 responses from the package repository; the pipeline
    /// folds this into a `Retrieval` error naming the package.
    #[error("Not found: {0}")]
    NotFound(String),

    /// Configuration is invalid or inaccessible.
    #[error("Configuration error: {0}")]
    Config(String),

    /// URL is malformed or invalid.
    #[error("Invalid URL: {0}")]
    InvalidUrl(String),

    /// Operation timed out.
    #[error("Timeout: {0}")]
    Timeout(String),

    /// Serialization or deserialization failed.
    #[error("Serialization error: {0}")]
    Serialization(String),
}

impl From<serde_json::Error> for Error {
    fn from(err: serde_json::Error) -> Self {
        Self::Serialization(err.to_string())
    }
}

impl From<toml::de::Error> for Error {
    fn from(err: toml::de::Error) -> Self {
        Self::Serialization(err.to_string())
    }
}

impl Error {
    /// Check if the error might be recoverable through retry logic.
    ///
    /// Returns `true` for errors that are typically temporary: network
    /// timeouts, connection failures, and interrupted I/O. Fatal pipeline
    /// errors and malformed inputs are permanent.
    #[must_use]
    pub fn is_recoverable(&self) -> bool {
        match self {
            Self::Network(e) => e.is_timeout() || e.is_connect(),
            Self::Timeout(_) => true,
            Self::Io(e) => {
                matches!(
                    e.kind(),
                    std::io::ErrorKind::TimedOut | std::io::ErrorKind::Interrupted
                )
            },
            _ => false,
        }
    }

    /// Get the error category as a string identifier.
    ///
    /// Useful for grouping errors in logs or implementing category-specific
    /// handling.
    #[must_use]
    pub const fn category(&self) -> &'static str {
        match self {
            Self::Io(_) => "io",
            Self::Network(_) => "network",
            Self::Retrieval { .. } => "retrieval",
            Self::Unpack { .. } => "unpack",
            Self::MetadataParse { .. } => "metadata",
            Self::NotFound(_) => "not_found",
            Self::Config(_) => "config",
            Self::InvalidUrl(_) => "invalid_url",
            Self::Timeout(_) => "timeout",
            Self::Serialization(_) => "serialization",
        }
    }
}

/// Convenience type alias for `std::result::Result<T, Error>`.
pub type Result<T> = std::result::Result<T, Error>;
