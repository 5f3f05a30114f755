//! HTTP client for the quote provider.

use bytes::Bytes;
use reqwest::{Client, StatusCode};
use std::time::Duration;
use thiserror::Error;

/// Configuration for the fetch client.
#[derive(Debug, Clone)]
pub struct ClientConfig {
    /// Maximum concurrent requests.
    pub concurrency: usize,
    /// Per-request timeout.
    pub timeout: Duration,
    /// Retry budget for transient failures.
    pub max_retries: u32,
    /// First backoff delay, in milliseconds.
    pub base_delay_ms: u64,
    /// Ceiling on the backoff delay, in milliseconds.
    pub max_delay_ms: u64,
    /// User agent sent with every request.
    pub user_agent: String,
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self {
            concurrency: 8, // Quote API rate limits bite well before bandwidth does
            timeout: Duration::from_secs(30),
            max_retries: 5,
            base_delay_ms: 500,
            max_delay_ms: 15_000,
            user_agent: format!("divscan/{}", env!("CARGO_PKG_VERSION")),
        }
    }
}

/// Errors that can occur while talking to the provider.
#[derive(Error, Debug)]
pub enum FetchError {
    /// Transport-level request failure.
    #[error("Request failed: {0}")]
    Http(#[from] reqwest::Error),

    /// Provider answered with an error status worth retrying.
    #[error("Server returned status {status}")]
    ServerError {
        /// Status the server answered with.
        status: u16,
    },
}

impl FetchError {
    /// Whether a retry has a chance of succeeding.
    fn is_transient(&self) -> bool {
        match self {
            // Builder errors are configuration bugs; status errors carry a
            // definitive answer from the server.
            Self::Http(err) => {
                !err.is_builder() && (err.is_timeout() || err.is_connect() || err.is_request())
            }
            // 5xx and 429 both clear up on their own.
            Self::ServerError { .. } => true,
        }
    }
}

/// Pooled HTTP client that retries transient failures.
#[derive(Debug, Clone)]
pub struct FetchClient {
    client: Client,
    config: ClientConfig,
}

impl FetchClient {
    /// Creates a new fetch client with the given configuration.
    ///
    /// # Errors
    ///
    /// Returns an error if the underlying HTTP client cannot be built.
    pub fn new(config: ClientConfig) -> Result<Self, reqwest::Error> {
        let client = Client::builder()
            .pool_max_idle_per_host(config.concurrency)
            .pool_idle_timeout(Duration::from_secs(90))
            .tcp_nodelay(true)
            .tcp_keepalive(Duration::from_secs(60))
            .timeout(config.timeout)
            .connect_timeout(Duration::from_secs(10))
            .user_agent(&config.user_agent)
            // Quote endpoints serve gzipped JSON
            .gzip(true)
            .build()?;
        Ok(Self { client, config })
    }

    /// Creates a client with the default configuration.
    ///
    /// # Errors
    ///
    /// Returns an error if the underlying HTTP client cannot be built.
    pub fn with_defaults() -> Result<Self, reqwest::Error> {
        Self::new(ClientConfig::default())
    }

    /// Configuration the client was built with.
    #[must_use]
    pub const fn config(&self) -> &ClientConfig {
        &self.config
    }

    /// Fetches a single URL, returning the response body.
    ///
    /// Returns `Ok(None)` on 404, which the quote endpoints use both for
    /// unknown symbols and for symbols with no data.
    ///
    /// # Errors
    ///
    /// Returns an error if the request fails after all retries.
    pub async fn fetch_bytes(&self, url: &str) -> Result<Option<Bytes>, FetchError> {
        let mut attempt = 0;
        loop {
            match self.try_fetch(url).await {
                Ok(body) => return Ok(body),
                Err(err) if err.is_transient() && attempt < self.config.max_retries => {
                    attempt += 1;
                    tokio::time::sleep(self.backoff_delay(attempt)).await;
                }
                Err(err) => return Err(err),
            }
        }
    }

    /// Single request attempt with status handling.
    async fn try_fetch(&self, url: &str) -> Result<Option<Bytes>, FetchError> {
        let response = self.client.get(url).send().await?;
        let status = response.status();

        if status == StatusCode::NOT_FOUND {
            return Ok(None);
        }
        if status.is_server_error() || status == StatusCode::TOO_MANY_REQUESTS {
            return Err(FetchError::ServerError {
                status: status.as_u16(),
            });
        }

        response.error_for_status_ref()?;
        Ok(Some(response.bytes().await?))
    }

    /// Delay before retry `attempt`, doubling per attempt up to the cap.
    ///
    /// A deterministic downward jitter keeps parallel workers from retrying
    /// in lockstep without pulling in a random number generator.
    fn backoff_delay(&self, attempt: u32) -> Duration {
        let doubled = self
            .config
            .base_delay_ms
            .saturating_mul(1u64 << attempt.min(10));
        let capped = doubled.min(self.config.max_delay_ms);
        let jitter = capped / 10 * u64::from(attempt % 3);
        Duration::from_millis(capped - jitter)
    }
}
