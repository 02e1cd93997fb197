//! JSON HTTP client with retry on transient failures

use backoff::ExponentialBackoffBuilder;
use serde::de::DeserializeOwned;
use std::time::Duration;

// =============================================================================
// Error Types
// =============================================================================

/// Networking errors
#[derive(Debug, thiserror::Error)]
pub enum NetworkError {
    /// The underlying client could not be constructed
    #[error("Failed to build HTTP client: {0}")]
    Build(String),

    /// Server answered with a non-success status
    #[error("HTTP {status} from {url}")]
    Status {
        /// HTTP status code
        status: u16,
        /// Requested URL
        url: String,
    },

    /// Connection, timeout or protocol failure
    #[error("Request failed: {0}")]
    Transport(#[from] reqwest::Error),

    /// Body was not the expected JSON
    #[error("Failed to decode response: {0}")]
    Decode(#[from] serde_json::Error),
}

impl NetworkError {
    /// Check if retrying could succeed
    pub fn is_transient(&self) -> bool {
        match self {
            NetworkError::Status { status, .. } => {
                matches!(status, 408 | 425 | 429 | 500 | 502 | 503 | 504)
            }
            NetworkError::Transport(err) => err.is_timeout() || err.is_connect(),
            NetworkError::Build(_) | NetworkError::Decode(_) => false,
        }
    }
}

/// Result type for networking operations
pub type Result<T> = std::result::Result<T, NetworkError>;

// =============================================================================
// Client Configuration
// =============================================================================

/// Configuration for [`HttpClient`]
#[derive(Debug, Clone)]
pub struct HttpClientConfig {
    /// Request timeout
    pub timeout: Duration,
    /// User agent string
    pub user_agent: String,
    /// Log every request and response at info level
    pub enable_logs: bool,
    /// Give up retrying after this long
    pub max_retry_elapsed: Duration,
}

impl Default for HttpClientConfig {
    fn default() -> Self {
        Self {
            timeout: Duration::from_secs(30),
            user_agent: format!("Workout/{}", env!("CARGO_PKG_VERSION")),
            enable_logs: false,
            max_retry_elapsed: Duration::from_secs(10),
        }
    }
}

// =============================================================================
// HTTP Client
// =============================================================================

/// Shared HTTP client
#[derive(Debug, Clone)]
pub struct HttpClient {
    client: reqwest::Client,
    config: HttpClientConfig,
}

impl HttpClient {
    /// Build a client
    pub fn new(config: HttpClientConfig) -> Result<Self> {
        let client = reqwest::Client::builder()
            .timeout(config.timeout)
            .user_agent(&config.user_agent)
            .build()
            .map_err(|e| NetworkError::Build(e.to_string()))?;

        Ok(Self { client, config })
    }

    /// Get the configuration
    pub fn config(&self) -> &HttpClientConfig {
        &self.config
    }

    /// GET a URL and decode the JSON body, retrying transient failures
    pub async fn get_json<T>(&self, url: &str) -> Result<T>
    where
        T: DeserializeOwned,
    {
        let policy = ExponentialBackoffBuilder::new()
            .with_initial_interval(Duration::from_millis(100))
            .with_max_elapsed_time(Some(self.config.max_retry_elapsed))
            .build();

        backoff::future::retry(policy, move || async move {
            self.get_once(url).await.map_err(|err| {
                if err.is_transient() {
                    tracing::debug!(%url, error = %err, "retrying request");
                    backoff::Error::transient(err)
                } else {
                    backoff::Error::permanent(err)
                }
            })
        })
        .await
    }

    async fn get_once<T>(&self, url: &str) -> Result<T>
    where
        T: DeserializeOwned,
    {
        if self.config.enable_logs {
            tracing::info!(method = "GET", %url, "request");
        }

        let response = self.client.get(url).send().await?;
        let status = response.status();

        if self.config.enable_logs {
            tracing::info!(method = "GET", %url, status = status.as_u16(), "response");
        }

        if !status.is_success() {
            return Err(NetworkError::Status {
                status: status.as_u16(),
                url: url.to_string(),
            });
        }

        let body = response.bytes().await?;
        Ok(serde_json::from_slice(&body)?)
    }
}
