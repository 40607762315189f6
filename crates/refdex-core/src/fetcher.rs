use crate::{Error, Result};
use base64::{Engine, engine::general_purpose::STANDARD};
use reqwest::{Client, StatusCode};
use sha2::{Digest, Sha256};
use std::time::Duration;
use tracing::debug;

/// HTTP client for downloading package archives from a repository endpoint.
pub struct Fetcher {
    client: Client,
}

impl Fetcher {
    /// Creates a new fetcher with the default request timeout.
    pub fn new() -> Result<Self> {
        Self::with_timeout(Duration::from_secs(30))
    }

    /// Creates a new fetcher with a custom per-request timeout.
    ///
    /// The timeout covers the whole download of one archive; a timeout is
    /// surfaced to the pipeline as a retrieval failure for that package.
    pub fn with_timeout(timeout: Duration) -> Result<Self> {
        let client = Client::builder()
            .timeout(timeout)
            .user_agent(concat!("refdex/", env!("CARGO_PKG_VERSION")))
            .gzip(true)
            .build()
            .map_err(Error::Network)?;
        Ok(Self { client })
    }

    /// Downloads a package archive, returning its raw bytes and digest.
    pub async fn fetch_archive(&self, url: &str) -> Result<FetchedArchive> {
        let response = self.client.get(url).send().await?;
        let status = response.status();

        if !status.is_success() {
            // Map 404 to a clearer NotFound error
            if status == StatusCode::NOT_FOUND {
                return Err(Error::NotFound(format!(
                    "no archive at '{url}'; check the package identifier and repository endpoint"
                )));
            }

            match response.error_for_status() {
                Ok(_) => unreachable!("status should be an error"),
                Err(err) => return Err(Error::Network(err)),
            }
        }

        let bytes = response.bytes().await?;
        let sha256 = calculate_sha256(&bytes);

        debug!("fetched {} bytes from {}", bytes.len(), url);

        Ok(FetchedArchive {
            bytes: bytes.to_vec(),
            sha256,
        })
    }
}

/// A downloaded package archive, not yet unpacked.
#[derive(Debug, Clone)]
pub struct FetchedArchive {
    /// Raw archive bytes as served by the repository.
    pub bytes: Vec<u8>,
    /// `SHA256` digest of the bytes, base64-encoded.
    pub sha256: String,
}

fn calculate_sha256(bytes: &[u8]) -> String {
    let mut hasher = Sha256::new();
    hasher.update(bytes);
    let result = hasher.finalize();
    STANDARD.encode(result)
}

// Note: Default is not implemented as Fetcher::new() can fail.
// Use Fetcher::new() directly and handle the Result.

#[cfg(test)]
#[allow(clippy::unwrap_used, clippy::panic)]
mod tests {
    use super::*;
    use std::time::Duration;
    use wiremock::{
        Mock, MockServer, ResponseTemplate,
        matchers::{method, path},
    };

    #[tokio::test]
    async fn test_fetcher_creation() {
        let result = Fetcher::new();
        assert!(result.is_ok(), "Fetcher creation should succeed");
    }

    #[tokio::test]
    #[ignore = "network: run in CI"]
    async fn test_fetch_archive_returns_bytes_and_digest() -> anyhow::Result<()> {
        let mock_server = MockServer::start().await;
        let body: &[u8] = b"archive-bytes";

        Mock::given(method("GET"))
            .and(path("/alpha.tar.gz"))
            .respond_with(ResponseTemplate::new(200).set_body_bytes(body))
            .mount(&mock_server)
            .await;

        let fetcher = Fetcher::new()?;
        let url = format!("{}/alpha.tar.gz", mock_server.uri());

        let archive = fetcher.fetch_archive(&url).await?;
        assert_eq!(archive.bytes, body);
        assert_eq!(archive.sha256, calculate_sha256(body));

        Ok(())
    }

    #[tokio::test]
    #[ignore = "network: run in CI"]
    async fn test_fetch_404_error() -> anyhow::Result<()> {
        let mock_server = MockServer::start().await;

        Mock::given(method("GET"))
            .and(path("/ghost.tar.gz"))
            .respond_with(ResponseTemplate::new(404))
            .mount(&mock_server)
            .await;

        let fetcher = Fetcher::new()?;
        let url = format!("{}/ghost.tar.gz", mock_server.uri());

        let result = fetcher.fetch_archive(&url).await;
        match result {
            Err(Error::NotFound(msg)) => {
                assert!(msg.contains("no archive"));
                assert!(msg.contains("ghost.tar.gz"));
            },
            Err(e) => panic!("Expected NotFound error, got: {e}"),
            Ok(_) => panic!("Expected error for 404 response"),
        }

        Ok(())
    }

    #[tokio::test]
    #[ignore = "network: run in CI"]
    async fn test_fetch_500_error() -> anyhow::Result<()> {
        let mock_server = MockServer::start().await;

        Mock::given(method("GET"))
            .and(path("/broken.tar.gz"))
            .respond_with(ResponseTemplate::new(500))
            .mount(&mock_server)
            .await;

        let fetcher = Fetcher::new()?;
        let url = format!("{}/broken.tar.gz", mock_server.uri());

        let result = fetcher.fetch_archive(&url).await;
        match result {
            Err(Error::Network(_)) => {},
            Err(e) => panic!("Expected Network error, got: {e}"),
            Ok(_) => panic!("Expected error for 500 response"),
        }

        Ok(())
    }

    #[tokio::test]
    #[ignore = "network: run in CI"]
    async fn test_fetch_timeout() -> anyhow::Result<()> {
        let mock_server = MockServer::start().await;

        Mock::given(method("GET"))
            .and(path("/slow.tar.gz"))
            .respond_with(
                ResponseTemplate::new(200)
                    .set_body_bytes(b"slow".to_vec())
                    .set_delay(Duration::from_millis(500)),
            )
            .mount(&mock_server)
            .await;

        let fetcher = Fetcher::with_timeout(Duration::from_millis(200))?;
        let url = format!("{}/slow.tar.gz", mock_server.uri());

        let result = fetcher.fetch_archive(&url).await;
        assert!(result.is_err(), "Slow request should timeout");

        Ok(())
    }

    #[test]
    fn test_sha256_calculation() {
        let digest = calculate_sha256(b"Hello, World!");
        assert_eq!(digest.len(), 44); // Base64 encoded SHA256 is 44 chars

        let empty = calculate_sha256(b"");
        assert_eq!(empty, "47DEQpj8HBSa+/TImW+5JCeuQeRkm5NMpJWZG3hSuFU=");
    }
}
