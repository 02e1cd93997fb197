//! Remote API access and the repository in front of it

use async_trait::async_trait;
use serde::de::DeserializeOwned;
use std::collections::HashMap;
use std::sync::Arc;
use tokio::sync::RwLock;

use crate::client::{HttpClient, Result};

/// Source of remote JSON documents
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait RemoteSource: Send + Sync {
    /// Fetch the document at `path`, relative to the service root
    async fn fetch_value(&self, path: &str) -> Result<serde_json::Value>;
}

/// Remote API rooted at a base URL
#[derive(Debug, Clone)]
pub struct RemoteApi {
    client: Arc<HttpClient>,
    base_url: String,
}

impl RemoteApi {
    /// Create an API bound to `base_url`
    pub fn new(client: Arc<HttpClient>, base_url: impl Into<String>) -> Self {
        Self {
            client,
            base_url: base_url.into().trim_end_matches('/').to_string(),
        }
    }

    /// Get the base URL
    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    /// Absolute URL for a path
    pub fn endpoint(&self, path: &str) -> String {
        format!("{}/{}", self.base_url, path.trim_start_matches('/'))
    }

    /// Fetch and decode the document at `path`
    pub async fn fetch<T>(&self, path: &str) -> Result<T>
    where
        T: DeserializeOwned,
    {
        self.client.get_json(&self.endpoint(path)).await
    }
}

#[async_trait]
impl RemoteSource for RemoteApi {
    async fn fetch_value(&self, path: &str) -> Result<serde_json::Value> {
        self.fetch(path).await
    }
}

/// Caching repository over a [`RemoteSource`]
#[derive(Clone)]
pub struct RemoteRepository {
    source: Arc<dyn RemoteSource>,
    cache: Arc<RwLock<HashMap<String, serde_json::Value>>>,
}

impl std::fmt::Debug for RemoteRepository {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("RemoteRepository").finish_non_exhaustive()
    }
}

impl RemoteRepository {
    /// Create a repository reading from `source`
    pub fn new(source: Arc<dyn RemoteSource>) -> Self {
        Self {
            source,
            cache: Arc::new(RwLock::new(HashMap::new())),
        }
    }

    /// Get a document, from cache when available
    pub async fn get<T>(&self, path: &str) -> Result<T>
    where
        T: DeserializeOwned,
    {
        let cached = self.cache.read().await.get(path).cloned();
        let value = match cached {
            Some(value) => value,
            None => self.refresh_value(path).await?,
        };
        Ok(serde_json::from_value(value)?)
    }

    /// Fetch a document from the remote, replacing any cached copy
    pub async fn refresh<T>(&self, path: &str) -> Result<T>
    where
        T: DeserializeOwned,
    {
        let value = self.refresh_value(path).await?;
        Ok(serde_json::from_value(value)?)
    }

    /// Drop the cached copy of a document
    pub async fn invalidate(&self, path: &str) {
        self.cache.write().await.remove(path);
    }

    /// Drop every cached document
    pub async fn clear(&self) {
        self.cache.write().await.clear();
    }

    async fn refresh_value(&self, path: &str) -> Result<serde_json::Value> {
        let value = self.source.fetch_value(path).await?;
        self.cache
            .write()
            .await
            .insert(path.to_string(), value.clone());
        Ok(value)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::client::{HttpClientConfig, NetworkError};

    #[test]
    fn test_endpoint_joins_slashes() {
        let client = Arc::new(HttpClient::new(HttpClientConfig::default()).unwrap());
        let api = RemoteApi::new(client, "http://localhost:8080/");
        assert_eq!(api.base_url(), "http://localhost:8080");
        assert_eq!(api.endpoint("/programs"), "http://localhost:8080/programs");
        assert_eq!(api.endpoint("programs"), "http://localhost:8080/programs");
    }

    #[tokio::test]
    async fn test_repository_caches() {
        let mut source = MockRemoteSource::new();
        source
            .expect_fetch_value()
            .withf(|path| path == "programs")
            .times(1)
            .returning(|_| Ok(serde_json::json!(["5/3/1", "GZCLP"])));

        let repository = RemoteRepository::new(Arc::new(source));
        let first: Vec<String> = repository.get("programs").await.unwrap();
        let second: Vec<String> = repository.get("programs").await.unwrap();
        assert_eq!(first, second);
        assert_eq!(first.len(), 2);
    }

    #[tokio::test]
    async fn test_repository_refresh_and_invalidate() {
        let mut source = MockRemoteSource::new();
        source
            .expect_fetch_value()
            .times(3)
            .returning(|_| Ok(serde_json::json!({ "count": 1 })));

        let repository = RemoteRepository::new(Arc::new(source));
        let _: serde_json::Value = repository.get("stats").await.unwrap();
        let _: serde_json::Value = repository.refresh("stats").await.unwrap();
        repository.invalidate("stats").await;
        let _: serde_json::Value = repository.get("stats").await.unwrap();
    }

    #[tokio::test]
    async fn test_repository_clear_drops_every_document() {
        let mut source = MockRemoteSource::new();
        source
            .expect_fetch_value()
            .withf(|path| path == "programs")
            .times(2)
            .returning(|_| Ok(serde_json::json!(["PPL"])));
        source
            .expect_fetch_value()
            .withf(|path| path == "history")
            .times(2)
            .returning(|_| Ok(serde_json::json!([])));

        let repository = RemoteRepository::new(Arc::new(source));
        let _: Vec<String> = repository.get("programs").await.unwrap();
        let _: Vec<String> = repository.get("history").await.unwrap();
        repository.clear().await;
        let _: Vec<String> = repository.get("programs").await.unwrap();
        let _: Vec<String> = repository.get("history").await.unwrap();
    }

    #[tokio::test]
    async fn test_repository_propagates_errors() {
        let mut source = MockRemoteSource::new();
        source.expect_fetch_value().returning(|path| {
            Err(NetworkError::Status {
                status: 500,
                url: path.to_string(),
            })
        });

        let repository = RemoteRepository::new(Arc::new(source));
        let err = repository.get::<serde_json::Value>("history").await.unwrap_err();
        assert!(err.is_transient());
    }
}
