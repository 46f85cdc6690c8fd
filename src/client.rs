//! The HTTP client for the conversion service.
//!
//! [`Client`] owns a `reqwest::Client`, the service base URL, and an
//! optional API key. All endpoints live on it as async methods (see
//! [`crate::convert`] and [`crate::tasks`]); this module provides the shared
//! transport: URL assembly under the `/v1` prefix, bearer authentication,
//! and the non-2xx / decode-failure split of the error taxonomy.
//!
//! A `Client` is cheap to clone and safe to share; concurrent requests are
//! fully independent.

use crate::error::{Error, Result};
use crate::multipart::StreamingForm;
use crate::output::HealthStatus;
use reqwest::header::CONTENT_TYPE;
use reqwest::Url;
use serde::de::DeserializeOwned;
use serde::Serialize;
use tracing::debug;

/// Client for a docling-serve instance.
///
/// # Example
/// ```rust,no_run
/// use docling_client::Client;
///
/// # #[tokio::main]
/// # async fn main() -> Result<(), Box<dyn std::error::Error>> {
/// let client = Client::builder("https://docling.example.com")
///     .api_key("secret-token")
///     .build()?;
/// let health = client.health().await?;
/// println!("service is {}", health.status);
/// # Ok(())
/// # }
/// ```
#[derive(Clone)]
pub struct Client {
    http: reqwest::Client,
    base_url: Url,
    api_key: Option<String>,
}

impl std::fmt::Debug for Client {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Client")
            .field("base_url", &self.base_url.as_str())
            .field("api_key", &self.api_key.as_ref().map(|_| "<redacted>"))
            .finish()
    }
}

impl Client {
    /// Create a client with default transport settings and no API key.
    pub fn new(base_url: impl AsRef<str>) -> Result<Self> {
        Self::builder(base_url).build()
    }

    /// Start building a client against the given base URL.
    pub fn builder(base_url: impl AsRef<str>) -> ClientBuilder {
        ClientBuilder {
            base_url: base_url.as_ref().to_owned(),
            api_key: None,
            http: None,
        }
    }

    /// Probe the service liveness endpoint.
    pub async fn health(&self) -> Result<HealthStatus> {
        self.get_json(&["health"]).await
    }

    /// Build `base_url/v1/<segments>`, tolerating base URLs with or without
    /// a trailing slash.
    fn api_url(&self, segments: &[&str]) -> Url {
        let mut url = self.base_url.clone();
        if let Ok(mut path) = url.path_segments_mut() {
            path.pop_if_empty();
            path.push("v1");
            path.extend(segments);
        }
        url
    }

    pub(crate) async fn get_json<T: DeserializeOwned>(&self, segments: &[&str]) -> Result<T> {
        let url = self.api_url(segments);
        debug!("GET {url}");
        self.execute(self.http.get(url)).await
    }

    pub(crate) async fn post_json<B, T>(&self, segments: &[&str], body: &B) -> Result<T>
    where
        B: Serialize + ?Sized,
        T: DeserializeOwned,
    {
        let url = self.api_url(segments);
        debug!("POST {url}");
        self.execute(self.http.post(url).json(body)).await
    }

    pub(crate) async fn post_multipart<T: DeserializeOwned>(
        &self,
        segments: &[&str],
        form: StreamingForm,
    ) -> Result<T> {
        let url = self.api_url(segments);
        debug!("POST {url} (multipart)");
        let request = self
            .http
            .post(url)
            .header(CONTENT_TYPE, form.content_type)
            .body(form.body);
        self.execute(request).await
    }

    async fn execute<T: DeserializeOwned>(&self, request: reqwest::RequestBuilder) -> Result<T> {
        let request = match &self.api_key {
            Some(key) => request.bearer_auth(key),
            None => request,
        };
        let response = request.send().await?;
        let status = response.status();
        let body = response.bytes().await?;
        if !status.is_success() {
            return Err(Error::Http {
                status: status.as_u16(),
                body: String::from_utf8_lossy(&body).into_owned(),
            });
        }
        serde_json::from_slice(&body).map_err(|source| Error::Decode { source })
    }
}

/// Builder for [`Client`].
#[derive(Debug)]
pub struct ClientBuilder {
    base_url: String,
    api_key: Option<String>,
    http: Option<reqwest::Client>,
}

impl ClientBuilder {
    /// Bearer token attached to every request.
    pub fn api_key(mut self, key: impl Into<String>) -> Self {
        self.api_key = Some(key.into());
        self
    }

    /// Use a caller-configured `reqwest::Client` (custom timeouts, proxy,
    /// connection pool) instead of the default one.
    pub fn http_client(mut self, http: reqwest::Client) -> Self {
        self.http = Some(http);
        self
    }

    /// Validate the base URL and build the client.
    pub fn build(self) -> Result<Client> {
        let base_url = Url::parse(&self.base_url).map_err(|e| Error::InvalidBaseUrl {
            url: self.base_url.clone(),
            reason: e.to_string(),
        })?;
        if base_url.cannot_be_a_base() {
            return Err(Error::InvalidBaseUrl {
                url: self.base_url,
                reason: "URL cannot serve as an HTTP base".into(),
            });
        }
        Ok(Client {
            http: self.http.unwrap_or_default(),
            base_url,
            api_key: self.api_key,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn api_url_joins_under_v1() {
        let client = Client::new("https://docling.example.com").unwrap();
        assert_eq!(
            client.api_url(&["convert", "file"]).as_str(),
            "https://docling.example.com/v1/convert/file"
        );
    }

    #[test]
    fn api_url_tolerates_trailing_slash_and_path_prefix() {
        let client = Client::new("https://example.com/docling/").unwrap();
        assert_eq!(
            client.api_url(&["health"]).as_str(),
            "https://example.com/docling/v1/health"
        );
    }

    #[test]
    fn builder_rejects_garbage_base_url() {
        let err = Client::new("not a url").unwrap_err();
        assert!(matches!(err, Error::InvalidBaseUrl { .. }), "got: {err:?}");
    }

    #[test]
    fn builder_rejects_non_base_url() {
        let err = Client::new("mailto:ops@example.com").unwrap_err();
        assert!(matches!(err, Error::InvalidBaseUrl { .. }), "got: {err:?}");
    }
}
