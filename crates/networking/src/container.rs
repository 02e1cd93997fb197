//! Process-wide service container
//!
//! Built once at startup from a [`ContainerConfig`] and handed to whatever
//! needs the HTTP client or the remote repository. There is no global lookup.

use std::sync::Arc;
use std::time::Duration;

use crate::client::{HttpClient, HttpClientConfig, Result};
use crate::remote::{RemoteApi, RemoteRepository};

/// Configuration for [`AppContainer`]
#[derive(Debug, Clone)]
pub struct ContainerConfig {
    /// Base URL of the remote service
    pub base_url: String,
    /// Request timeout
    pub timeout: Duration,
    /// User agent string
    pub user_agent: String,
    /// Verbose request logging
    pub enable_network_logs: bool,
    /// Give up retrying after this long
    pub max_retry_elapsed: Duration,
}

impl Default for ContainerConfig {
    fn default() -> Self {
        let http = HttpClientConfig::default();
        Self {
            base_url: "http://localhost:8080".to_string(),
            timeout: http.timeout,
            user_agent: http.user_agent,
            enable_network_logs: false,
            max_retry_elapsed: http.max_retry_elapsed,
        }
    }
}

impl ContainerConfig {
    /// Create a config with a base URL
    pub fn new(base_url: impl Into<String>) -> Self {
        Self {
            base_url: base_url.into(),
            ..Default::default()
        }
    }

    /// Set verbose request logging
    pub fn with_network_logs(mut self, enabled: bool) -> Self {
        self.enable_network_logs = enabled;
        self
    }

    /// Set the timeout
    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    /// Set the user agent
    pub fn with_user_agent(mut self, user_agent: impl Into<String>) -> Self {
        self.user_agent = user_agent.into();
        self
    }

    /// Set the retry budget
    pub fn with_max_retry_elapsed(mut self, elapsed: Duration) -> Self {
        self.max_retry_elapsed = elapsed;
        self
    }

    fn http_config(&self) -> HttpClientConfig {
        HttpClientConfig {
            timeout: self.timeout,
            user_agent: self.user_agent.clone(),
            enable_logs: self.enable_network_logs,
            max_retry_elapsed: self.max_retry_elapsed,
        }
    }
}

/// Shared services
#[derive(Debug, Clone)]
pub struct AppContainer {
    config: ContainerConfig,
    http: Arc<HttpClient>,
    api: RemoteApi,
    repository: RemoteRepository,
}

impl AppContainer {
    /// Build every service
    pub fn init(config: ContainerConfig) -> Result<Self> {
        let http = Arc::new(HttpClient::new(config.http_config())?);
        let api = RemoteApi::new(Arc::clone(&http), config.base_url.clone());
        let repository = RemoteRepository::new(Arc::new(api.clone()));

        tracing::info!(
            base_url = %api.base_url(),
            network_logs = config.enable_network_logs,
            "service container initialized"
        );

        Ok(Self {
            config,
            http,
            api,
            repository,
        })
    }

    /// Get the configuration
    pub fn config(&self) -> &ContainerConfig {
        &self.config
    }

    /// Get the HTTP client
    pub fn http_client(&self) -> &Arc<HttpClient> {
        &self.http
    }

    /// Get the remote API
    pub fn api(&self) -> &RemoteApi {
        &self.api
    }

    /// Get the remote repository
    pub fn repository(&self) -> &RemoteRepository {
        &self.repository
    }
}
