// crates/network/src/client.rs
//! Blocking HTTP client wrapper

use crate::download::stream_to_file;
use crate::error::{NetworkError, NetworkResult};
use crate::progress::ProgressTracker;
use crate::transport::HttpTransport;
use reqwest::blocking::{Client as ReqwestClient, Response};
use std::path::Path;
use std::time::Duration;

/// HTTP client configuration
#[derive(Debug, Clone)]
pub struct ClientConfig {
    /// Request timeout
    pub timeout: Duration,
    /// User agent string
    pub user_agent: String,
    /// Maximum redirects to follow
    pub max_redirects: usize,
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self {
            timeout: Duration::from_secs(30),
            user_agent: "book-downloader/2.0".to_string(),
            max_redirects: 10,
        }
    }
}

impl ClientConfig {
    /// Sets the request timeout
    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    /// Sets the user agent
    pub fn with_user_agent(mut self, user_agent: impl Into<String>) -> Self {
        self.user_agent = user_agent.into();
        self
    }

    /// Sets the redirect limit
    pub fn with_max_redirects(mut self, max_redirects: usize) -> Self {
        self.max_redirects = max_redirects;
        self
    }
}

/// HTTP client shared by every catalog adapter
#[derive(Debug, Clone)]
pub struct Client {
    inner: ReqwestClient,
    config: ClientConfig,
}

impl Client {
    /// Creates a new client with default configuration
    pub fn new() -> NetworkResult<Self> {
        Self::with_config(ClientConfig::default())
    }

    /// Creates a new client with custom configuration
    pub fn with_config(config: ClientConfig) -> NetworkResult<Self> {
        let client = ReqwestClient::builder()
            .timeout(config.timeout)
            .user_agent(&config.user_agent)
            .redirect(reqwest::redirect::Policy::limited(config.max_redirects))
            .build()
            .map_err(NetworkError::Http)?;

        Ok(Self {
            inner: client,
            config,
        })
    }

    /// Returns the active configuration
    pub fn config(&self) -> &ClientConfig {
        &self.config
    }

    /// Performs a GET request, failing on any non-2xx status
    pub fn get(&self, url: &str) -> NetworkResult<Response> {
        let parsed =
            reqwest::Url::parse(url).map_err(|_| NetworkError::InvalidUrl(url.to_string()))?;

        log::debug!("GET {}", parsed);
        let response = self.inner.get(parsed).send().map_err(|e| {
            if e.is_timeout() {
                NetworkError::Timeout
            } else {
                NetworkError::Http(e)
            }
        })?;

        let status = response.status();
        if !status.is_success() {
            return Err(NetworkError::Status {
                url: url.to_string(),
                status: status.as_u16(),
            });
        }

        Ok(response)
    }
}

impl HttpTransport for Client {
    fn get_text(&self, url: &str) -> NetworkResult<String> {
        self.get(url)?.text().map_err(NetworkError::Http)
    }

    fn download_to(&self, url: &str, destination: &Path) -> NetworkResult<u64> {
        let response = self.get(url)?;
        let tracker = ProgressTracker::new(response.content_length());
        let written = stream_to_file(response, destination, Some(&tracker))?;
        log::info!("Downloaded {} bytes to {}", written, destination.display());
        Ok(written)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_client_config_default() {
        let config = ClientConfig::default();
        assert_eq!(config.timeout, Duration::from_secs(30));
        assert_eq!(config.max_redirects, 10);
        assert_eq!(config.user_agent, "book-downloader/2.0");
    }

    #[test]
    fn test_client_creation() {
        let client = Client::new();
        assert!(client.is_ok());
    }

    #[test]
    fn test_client_with_custom_config() {
        let config = ClientConfig::default()
            .with_timeout(Duration::from_secs(10))
            .with_user_agent("TestAgent")
            .with_max_redirects(5);

        let client = Client::with_config(config).expect("client");
        assert_eq!(client.config().user_agent, "TestAgent");
        assert_eq!(client.config().max_redirects, 5);
    }

    #[test]
    fn test_invalid_url_rejected_before_sending() {
        let client = Client::new().expect("client");
        let err = client.get("not a url").unwrap_err();
        assert!(matches!(err, NetworkError::InvalidUrl(_)));
    }

    #[test]
    #[ignore = "Requires network access"]
    fn test_get_text_live() {
        let client = Client::new().expect("client");
        let body = client.get_text("https://www.rust-lang.org/robots.txt");
        assert!(body.is_ok());
    }
}
