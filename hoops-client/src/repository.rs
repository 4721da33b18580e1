//! Repository layer
//!
//! Repositories are stateless HTTP clients over one remote resource
//! collection. They translate the five CRUD operations into single HTTP
//! round trips without any retry, caching or batching.
//!
//! The [`Repository`] trait is what controllers depend on, so tests can swap
//! in [`MemoryRepository`](crate::MemoryRepository).

use std::marker::PhantomData;

use async_trait::async_trait;
use hoops_core::Entity;
use reqwest::StatusCode;
use tokio_util::sync::CancellationToken;

use crate::ApiClient;
use crate::error::{ClientError, Result};

/// Uniform CRUD contract over a remote resource collection
///
/// Every operation takes the caller's cancellation token; a fired token
/// aborts the pending call with [`ClientError::Cancelled`].
#[async_trait]
pub trait Repository<T: Entity>: Send + Sync {
    /// Fetches the whole collection
    ///
    /// Returns an empty list when the service reports none.
    async fn get_all(&self, cancel: &CancellationToken) -> Result<Vec<T>>;

    /// Fetches a single entity
    ///
    /// Returns `None` (not an error) when the service reports not-found.
    async fn get(&self, id: i32, cancel: &CancellationToken) -> Result<Option<T>>;

    /// Stores a new entity; the service assigns its identifier
    async fn add(&self, entity: &T, cancel: &CancellationToken) -> Result<()>;

    /// Replaces every field of the entity stored under `entity.id()`
    async fn update(&self, entity: &T, cancel: &CancellationToken) -> Result<()>;

    /// Removes the entity stored under `id`
    async fn delete(&self, id: i32, cancel: &CancellationToken) -> Result<()>;
}

/// HTTP implementation of [`Repository`]
///
/// Built with [`ApiClient::repository`].
pub struct HttpRepository<T> {
    api: ApiClient,
    _entity: PhantomData<fn() -> T>,
}

impl<T: Entity> HttpRepository<T> {
    /// Creates a repository for `T::RESOURCE` on the given API
    pub fn new(api: ApiClient) -> Self {
        Self {
            api,
            _entity: PhantomData,
        }
    }

    fn not_found(id: i32) -> ClientError {
        ClientError::NotFound(format!("{}/{}", T::RESOURCE, id))
    }
}

impl<T> Clone for HttpRepository<T> {
    fn clone(&self) -> Self {
        Self {
            api: self.api.clone(),
            _entity: PhantomData,
        }
    }
}

impl<T: Entity> std::fmt::Debug for HttpRepository<T> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("HttpRepository")
            .field("base_url", &self.api.base_url())
            .field("resource", &T::RESOURCE)
            .finish()
    }
}

#[async_trait]
impl<T: Entity> Repository<T> for HttpRepository<T> {
    async fn get_all(&self, cancel: &CancellationToken) -> Result<Vec<T>> {
        let url = self.api.collection_url(T::RESOURCE);
        tracing::debug!("GET {}", url);

        let response = self.api.send(self.api.client.get(&url), cancel).await?;

        if matches!(
            response.status(),
            StatusCode::NOT_FOUND | StatusCode::NO_CONTENT
        ) {
            return Ok(Vec::new());
        }

        let response = self.api.ensure_success(response, cancel).await?;
        let entities = self.api.read_json::<Vec<T>>(response, cancel).await?;

        Ok(entities.unwrap_or_default())
    }

    async fn get(&self, id: i32, cancel: &CancellationToken) -> Result<Option<T>> {
        let url = self.api.item_url(T::RESOURCE, id);
        tracing::debug!("GET {}", url);

        let response = self.api.send(self.api.client.get(&url), cancel).await?;

        if response.status() == StatusCode::NOT_FOUND {
            return Ok(None);
        }

        let response = self.api.ensure_success(response, cancel).await?;
        self.api.read_json(response, cancel).await
    }

    async fn add(&self, entity: &T, cancel: &CancellationToken) -> Result<()> {
        let url = self.api.collection_url(T::RESOURCE);
        tracing::debug!("POST {}", url);

        let response = self
            .api
            .send(self.api.client.post(&url).json(entity), cancel)
            .await?;

        self.api.ensure_success(response, cancel).await?;
        Ok(())
    }

    async fn update(&self, entity: &T, cancel: &CancellationToken) -> Result<()> {
        let url = self.api.item_url(T::RESOURCE, entity.id());
        tracing::debug!("PUT {}", url);

        let response = self
            .api
            .send(self.api.client.put(&url).json(entity), cancel)
            .await?;

        if response.status() == StatusCode::NOT_FOUND {
            return Err(Self::not_found(entity.id()));
        }

        self.api.ensure_success(response, cancel).await?;
        Ok(())
    }

    async fn delete(&self, id: i32, cancel: &CancellationToken) -> Result<()> {
        let url = self.api.item_url(T::RESOURCE, id);
        tracing::debug!("DELETE {}", url);

        let response = self.api.send(self.api.client.delete(&url), cancel).await?;

        if response.status() == StatusCode::NOT_FOUND {
            return Err(Self::not_found(id));
        }

        self.api.ensure_success(response, cancel).await?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use hoops_core::domain::Coach;

    #[test]
    fn test_repository_debug_names_collection() {
        let api = ApiClient::new("http://localhost:5000/api");
        let coaches = api.repository::<Coach>();
        let rendered = format!("{coaches:?}");
        assert!(rendered.contains("\"Coaches\""), "{rendered}");
        assert!(rendered.contains("http://localhost:5000/api"), "{rendered}");
    }

    #[tokio::test]
    async fn test_unreachable_service_is_transport_error() {
        let addr = {
            let listener = std::net::TcpListener::bind("127.0.0.1:0").unwrap();
            listener.local_addr().unwrap()
        };
        let api = ApiClient::new(format!("http://{addr}"));
        let coaches = api.repository::<Coach>();

        let result = coaches.get_all(&CancellationToken::new()).await;
        assert!(matches!(result, Err(ClientError::Transport(_))));
    }
}
