//! Hoops HTTP Client
//!
//! A small, type-safe client for the remote basketball API.
//!
//! The remote service exposes one collection per entity (`Teams`, `Players`,
//! `Coaches`, `Positions`) under a common base address. Instead of one
//! hand-written client per collection, this crate provides a single generic
//! [`HttpRepository`] parameterized by the [`Entity`](hoops_core::Entity)
//! descriptor, plus the [`Repository`] trait the front-end is written against.
//!
//! # Example
//!
//! ```no_run
//! use hoops_client::{ApiClient, Repository};
//! use hoops_core::domain::Position;
//! use tokio_util::sync::CancellationToken;
//!
//! #[tokio::main]
//! async fn main() -> hoops_client::Result<()> {
//!     let client = ApiClient::new("http://localhost:5000/api");
//!     let positions = client.repository::<Position>();
//!
//!     let cancel = CancellationToken::new();
//!     positions
//!         .add(&Position { name: "Point Guard".to_string(), ..Default::default() }, &cancel)
//!         .await?;
//!
//!     for position in positions.get_all(&cancel).await? {
//!         println!("{} {}", position.id, position.name);
//!     }
//!     Ok(())
//! }
//! ```

pub mod error;
mod memory;
mod repository;

// Re-export commonly used types
pub use error::{ClientError, Result};
pub use memory::MemoryRepository;
pub use repository::{HttpRepository, Repository};

use hoops_core::Entity;
use reqwest::{Client, RequestBuilder, Response};
use serde::de::DeserializeOwned;
use tokio_util::sync::CancellationToken;

/// HTTP client for the remote basketball API
///
/// Holds the normalized base address and a pooled `reqwest::Client`. Cloning
/// is cheap and shares the connection pool.
#[derive(Debug, Clone)]
pub struct ApiClient {
    /// Base URL of the remote API (e.g., "http://localhost:5000/api")
    base_url: String,
    /// HTTP client instance
    client: Client,
}

impl ApiClient {
    /// Create a new API client
    ///
    /// # Arguments
    /// * `base_url` - The base URL of the remote API (e.g., "http://localhost:5000/api")
    ///
    /// # Example
    /// ```
    /// use hoops_client::ApiClient;
    ///
    /// let client = ApiClient::new("http://localhost:5000/api");
    /// ```
    pub fn new(base_url: impl Into<String>) -> Self {
        Self::with_client(base_url, Client::new())
    }

    /// Create a new API client with a custom HTTP client
    ///
    /// This allows you to configure timeouts, proxies, TLS settings, etc.
    ///
    /// # Example
    /// ```
    /// use hoops_client::ApiClient;
    /// use reqwest::Client;
    /// use std::time::Duration;
    ///
    /// let http_client = Client::builder()
    ///     .timeout(Duration::from_secs(30))
    ///     .build()
    ///     .unwrap();
    ///
    /// let client = ApiClient::with_client("http://localhost:5000/api", http_client);
    /// ```
    pub fn with_client(base_url: impl Into<String>, client: Client) -> Self {
        let base_url = base_url.into();
        Self {
            base_url: base_url.trim_end_matches('/').to_string(),
            client,
        }
    }

    /// Get the base URL of the remote API
    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    /// Build the repository for one entity collection
    pub fn repository<T: Entity>(&self) -> HttpRepository<T> {
        HttpRepository::new(self.clone())
    }

    /// `{base}/{resource}`
    fn collection_url(&self, resource: &str) -> String {
        format!("{}/{}", self.base_url, resource)
    }

    /// `{base}/{resource}/{id}`
    fn item_url(&self, resource: &str, id: i32) -> String {
        format!("{}/{}/{}", self.base_url, resource, id)
    }

    // =============================================================================
    // Response Handlers
    // =============================================================================

    /// Send a request, aborting it if `cancel` fires first
    async fn send(&self, request: RequestBuilder, cancel: &CancellationToken) -> Result<Response> {
        tokio::select! {
            biased;
            _ = cancel.cancelled() => Err(ClientError::Cancelled),
            response = request.send() => Ok(response?),
        }
    }

    /// Check the status code and return a rejection for anything unsuccessful
    ///
    /// The rejection body is read under the same token as the request.
    async fn ensure_success(
        &self,
        response: Response,
        cancel: &CancellationToken,
    ) -> Result<Response> {
        let status = response.status();

        if !status.is_success() {
            let error_text = tokio::select! {
                biased;
                _ = cancel.cancelled() => return Err(ClientError::Cancelled),
                text = response.text() => text.unwrap_or_else(|_| "Unknown error".to_string()),
            };
            return Err(ClientError::rejected(status.as_u16(), error_text));
        }

        Ok(response)
    }

    /// Read a JSON body, returning `None` when the body is empty
    ///
    /// Reading the bytes is a transport concern; parsing them is a decode
    /// concern, so the two failures surface as different error kinds.
    async fn read_json<T: DeserializeOwned>(
        &self,
        response: Response,
        cancel: &CancellationToken,
    ) -> Result<Option<T>> {
        let body = tokio::select! {
            biased;
            _ = cancel.cancelled() => return Err(ClientError::Cancelled),
            body = response.bytes() => body?,
        };

        if body.iter().all(u8::is_ascii_whitespace) {
            return Ok(None);
        }

        serde_json::from_slice(&body)
            .map(Some)
            .map_err(|e| ClientError::Decode(format!("Failed to parse JSON response: {}", e)))
    }
}
