//! Main CatalogClient

use std::sync::Arc;
use std::time::Duration;

use reqwest::Client;
use reqwest::Method;
use url::Url;

use crate::error::ApiError;
use crate::error::Error;
use crate::error::ValidationErrors;
use crate::model::Cursor;

/// Default number of records per collection page.
pub const DEFAULT_PAGE_SIZE: usize = 5;

/// The main client for the remote catalog API.
///
/// Cheap to clone (uses `Arc` internally) and safe to share across tasks.
/// Every call is a single attempt: writes carry no idempotency token, so the
/// client never replays them.
///
/// # Example
///
/// ```ignore
/// let client = CatalogClient::builder()
///     .base_url("http://127.0.0.1:8000")
///     .build()?;
///
/// let page = client.list_items(None).await?;
/// ```
#[derive(Clone, Debug)]
pub struct CatalogClient {
    inner: Arc<CatalogClientInner>,
}

#[derive(Debug)]
struct CatalogClientInner {
    base_url: String,
    page_size: usize,
    http_client: Client,
    timeout: Option<Duration>,
}

impl CatalogClient {
    /// Creates a new builder for constructing a client.
    pub fn builder() -> CatalogClientBuilder<Missing> {
        CatalogClientBuilder::new()
    }

    /// Returns the base URL of the catalog deployment.
    pub fn base_url(&self) -> &str {
        &self.inner.base_url
    }

    /// Returns the page size requested for first-page fetches.
    pub fn page_size(&self) -> usize {
        self.inner.page_size
    }

    /// Builds the URL of a collection path under the API prefix.
    pub(crate) fn collection_url(&self, path: &str) -> String {
        format!("{}/api{}", self.inner.base_url, path)
    }

    /// The first-page descriptor for a paginated collection.
    pub(crate) fn first_page(&self, path: &str) -> Cursor {
        Cursor::new(format!(
            "{}?page=1&page_size={}",
            self.collection_url(path),
            self.inner.page_size
        ))
    }

    /// Issues one HTTP request and normalizes the outcome.
    ///
    /// A non-success status becomes [`ApiError::Http`], with the body parsed
    /// into a field validation map when it has that shape and reduced to an
    /// opaque message otherwise. No retries.
    pub(crate) async fn request(
        &self,
        method: Method,
        url: &str,
        body: Option<String>,
    ) -> Result<reqwest::Response, Error> {
        let mut request = self
            .inner
            .http_client
            .request(method, url)
            .header("Content-Type", "application/json")
            .header("Accept", "application/json");

        if let Some(timeout) = self.inner.timeout {
            request = request.timeout(timeout);
        }

        if let Some(body) = body {
            request = request.body(body);
        }

        let response = request
            .send()
            .await
            .map_err(|error| Error::Api(self.wrap_transport(error)))?;

        let status = response.status();
        if status.is_success() {
            return Ok(response);
        }

        let status = status.as_u16();
        let body = response.text().await.unwrap_or_default();
        let errors = ValidationErrors::from_body(&body);
        let message = ValidationErrors::opaque_message(&body).unwrap_or(body);
        Err(Error::Api(ApiError::Http {
            status,
            message,
            errors,
        }))
    }

    fn wrap_transport(&self, error: reqwest::Error) -> ApiError {
        if error.is_timeout() {
            ApiError::Timeout(self.inner.timeout.unwrap_or(Duration::ZERO))
        } else {
            ApiError::Network(error)
        }
    }
}

// =============================================================================
// Typestate Builder
// =============================================================================

/// Marker type for missing required builder fields.
pub struct Missing;

/// Marker type for set builder fields.
pub struct Set<T>(T);

/// Builder for constructing a [`CatalogClient`].
///
/// Uses the typestate pattern so the required base URL is set at compile
/// time. No request timeout is applied unless one is configured — a caller
/// awaiting a dead endpoint can then hang indefinitely, so long-running
/// deployments should set [`timeout`](Self::timeout).
pub struct CatalogClientBuilder<UrlState> {
    base_url: UrlState,
    page_size: usize,
    timeout: Option<Duration>,
    connect_timeout: Option<Duration>,
    http_client: Option<Client>,
}

impl CatalogClientBuilder<Missing> {
    /// Creates a new builder with default settings.
    pub fn new() -> Self {
        Self {
            base_url: Missing,
            page_size: DEFAULT_PAGE_SIZE,
            timeout: None,
            connect_timeout: None,
            http_client: None,
        }
    }

    /// Sets the catalog deployment URL.
    pub fn base_url(self, url: impl Into<String>) -> CatalogClientBuilder<Set<String>> {
        CatalogClientBuilder {
            base_url: Set(url.into()),
            page_size: self.page_size,
            timeout: self.timeout,
            connect_timeout: self.connect_timeout,
            http_client: self.http_client,
        }
    }
}

impl Default for CatalogClientBuilder<Missing> {
    fn default() -> Self {
        Self::new()
    }
}

impl<UrlState> CatalogClientBuilder<UrlState> {
    /// Sets the page size requested for first-page fetches.
    ///
    /// Defaults to [`DEFAULT_PAGE_SIZE`]. Subsequent pages follow the
    /// server's cursors verbatim.
    pub fn page_size(mut self, page_size: usize) -> Self {
        self.page_size = page_size;
        self
    }

    /// Sets the per-request timeout.
    pub fn timeout(mut self, timeout: Duration) -> Self {
        self.timeout = Some(timeout);
        self
    }

    /// Sets the connection timeout.
    ///
    /// Applied when building the HTTP client.
    pub fn connect_timeout(mut self, timeout: Duration) -> Self {
        self.connect_timeout = Some(timeout);
        self
    }

    /// Sets a custom HTTP client.
    pub fn http_client(mut self, client: Client) -> Self {
        self.http_client = Some(client);
        self
    }
}

impl CatalogClientBuilder<Set<String>> {
    /// Builds the [`CatalogClient`], validating the base URL.
    pub fn build(self) -> Result<CatalogClient, Error> {
        let base_url = self.base_url.0;
        Url::parse(&base_url).map_err(|_| ApiError::InvalidUrl(base_url.clone()))?;

        let http_client = match self.http_client {
            Some(client) => client,
            None => {
                let mut builder = Client::builder();
                if let Some(timeout) = self.connect_timeout {
                    builder = builder.connect_timeout(timeout);
                }
                builder.build().map_err(ApiError::from)?
            }
        };

        Ok(CatalogClient {
            inner: Arc::new(CatalogClientInner {
                base_url: base_url.trim_end_matches('/').to_string(),
                page_size: self.page_size,
                http_client,
                timeout: self.timeout,
            }),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::api::collections;

    #[test]
    fn test_builder_defaults() {
        let client = CatalogClient::builder()
            .base_url("http://127.0.0.1:8000")
            .build()
            .unwrap();

        assert_eq!(client.page_size(), DEFAULT_PAGE_SIZE);
        assert_eq!(client.base_url(), "http://127.0.0.1:8000");
    }

    #[test]
    fn test_trailing_slash_trimmed() {
        let client = CatalogClient::builder()
            .base_url("http://127.0.0.1:8000/")
            .build()
            .unwrap();

        assert_eq!(
            client.collection_url(collections::ITEMS),
            "http://127.0.0.1:8000/api/products/"
        );
    }

    #[test]
    fn test_first_page_descriptor() {
        let client = CatalogClient::builder()
            .base_url("http://127.0.0.1:8000")
            .page_size(5)
            .build()
            .unwrap();

        assert_eq!(
            client.first_page(collections::ITEMS).as_str(),
            "http://127.0.0.1:8000/api/products/?page=1&page_size=5"
        );
    }

    #[test]
    fn test_invalid_base_url_rejected() {
        let error = CatalogClient::builder()
            .base_url("not a url")
            .build()
            .unwrap_err();

        assert!(matches!(
            error,
            Error::Api(ApiError::InvalidUrl(url)) if url == "not a url"
        ));
    }
}
