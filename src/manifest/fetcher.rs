use super::Article;
use futures::StreamExt;
use std::time::Duration;
use thiserror::Error;
use url::Url;

/// Maximum accepted manifest size. A static-site manifest of a few thousand
/// articles is well under 1 MB; anything beyond this is a misconfigured URL.
pub const MAX_MANIFEST_SIZE: usize = 5 * 1024 * 1024; // 5MB

/// Request timeout for the manifest fetch.
const FETCH_TIMEOUT: Duration = Duration::from_secs(20);

/// Errors that can occur while fetching or decoding the manifest.
///
/// There is exactly one network operation in the application, so this enum
/// covers its full lifecycle: URL validation, transport, HTTP status, size
/// enforcement, and JSON decoding.
#[derive(Debug, Error)]
pub enum ManifestError {
    /// Manifest URL failed to parse or uses a non-http(s) scheme
    #[error("Invalid manifest URL: {0}")]
    InvalidUrl(String),
    /// Network-level error (DNS, connection, TLS, etc.)
    #[error("Network error: {0}")]
    Network(#[from] reqwest::Error),
    /// HTTP response with non-2xx status code
    #[error("HTTP error: status {0}")]
    HttpStatus(u16),
    /// Request exceeded the 20-second timeout
    #[error("Request timed out after 20s")]
    Timeout,
    /// Response body exceeded [`MAX_MANIFEST_SIZE`]
    #[error("Manifest too large (exceeds {0} bytes)")]
    ResponseTooLarge(usize),
    /// Response body was not valid UTF-8
    #[error("Invalid UTF-8 in manifest")]
    InvalidUtf8,
    /// Response body was not a JSON array of article records
    #[error("Malformed manifest: {0}")]
    Decode(#[from] serde_json::Error),
}

/// Fetch and decode the article manifest.
///
/// Performs a single GET of `url` and decodes the body as a JSON array of
/// [`Article`] records. The caller decides what to do on failure; there are
/// no retries here: the manifest is fetched once per page load and a failure
/// is surfaced to the user with a manual reload key.
///
/// # Errors
///
/// See [`ManifestError`] for the failure classification.
pub async fn fetch_manifest(
    client: &reqwest::Client,
    url: &str,
) -> Result<Vec<Article>, ManifestError> {
    let parsed = Url::parse(url).map_err(|e| ManifestError::InvalidUrl(e.to_string()))?;
    if parsed.scheme() != "http" && parsed.scheme() != "https" {
        return Err(ManifestError::InvalidUrl(format!(
            "unsupported scheme '{}'",
            parsed.scheme()
        )));
    }

    tracing::debug!(url = %parsed, "Fetching manifest");

    let response = tokio::time::timeout(FETCH_TIMEOUT, client.get(parsed.clone()).send())
        .await
        .map_err(|_| ManifestError::Timeout)?
        .map_err(ManifestError::Network)?;

    let status = response.status();
    if !status.is_success() {
        return Err(ManifestError::HttpStatus(status.as_u16()));
    }

    // Reject early when the server declares an oversized body
    if let Some(len) = response.content_length() {
        if len as usize > MAX_MANIFEST_SIZE {
            return Err(ManifestError::ResponseTooLarge(MAX_MANIFEST_SIZE));
        }
    }

    let body = read_limited(response, MAX_MANIFEST_SIZE).await?;
    let articles: Vec<Article> = serde_json::from_str(&body)?;

    tracing::info!(url = %parsed, articles = articles.len(), "Manifest loaded");
    Ok(articles)
}

/// Stream a response body into a String, enforcing a byte cap.
///
/// Content-Length is advisory only (a server can lie or chunk), so the cap
/// is enforced on the actual bytes received.
async fn read_limited(response: reqwest::Response, max: usize) -> Result<String, ManifestError> {
    let mut bytes = Vec::new();
    let mut stream = response.bytes_stream();

    while let Some(chunk) = stream.next().await {
        let chunk = chunk.map_err(ManifestError::Network)?;
        if bytes.len() + chunk.len() > max {
            return Err(ManifestError::ResponseTooLarge(MAX_MANIFEST_SIZE));
        }
        bytes.extend_from_slice(&chunk);
    }

    String::from_utf8(bytes).map_err(|_| ManifestError::InvalidUtf8)
}
