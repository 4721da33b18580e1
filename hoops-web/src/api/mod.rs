//! API Module
//!
//! HTTP layer of the front-end.
//! Each entity gets the same generic controller; [`RouterBuilder`] wires one
//! per entity and adds the health endpoint.

pub mod cancel;
pub mod crud;
pub mod error;
pub mod health;

use std::sync::Arc;

use axum::{Router, routing::get};
use hoops_client::{ApiClient, Repository};
use hoops_core::Entity;
use hoops_core::domain::{Coach, Player, Position, Team};
use tokio_util::sync::CancellationToken;
use tower_http::trace::TraceLayer;

use crate::api::crud::CrudState;
use crate::report::ErrorReporter;

/// Assembles the application router one entity at a time
pub struct RouterBuilder {
    router: Router,
    reporter: Arc<dyn ErrorReporter>,
    shutdown: CancellationToken,
}

impl RouterBuilder {
    /// Start an empty router sharing one reporter and one shutdown token
    pub fn new(reporter: Arc<dyn ErrorReporter>, shutdown: CancellationToken) -> Self {
        Self {
            router: Router::new(),
            reporter,
            shutdown,
        }
    }

    /// Mount the CRUD controller for `T` backed by `repository`
    pub fn entity<T: Entity>(mut self, repository: Arc<dyn Repository<T>>) -> Self {
        tracing::debug!("Mounting /{}", T::RESOURCE);

        let state = CrudState {
            repository,
            reporter: Arc::clone(&self.reporter),
            shutdown: self.shutdown.clone(),
        };
        self.router = self.router.merge(crud::routes(state));
        self
    }

    /// Add the health endpoint and tracing middleware
    pub fn build(self) -> Router {
        let health = Router::new()
            .route("/health", get(health::health_check))
            .with_state(self.reporter);

        self.router
            .merge(health)
            .layer(TraceLayer::new_for_http())
    }
}

/// Create the main router: one HTTP-backed controller per entity
pub fn create_router(
    api: &ApiClient,
    reporter: Arc<dyn ErrorReporter>,
    shutdown: CancellationToken,
) -> Router {
    RouterBuilder::new(reporter, shutdown)
        .entity::<Team>(Arc::new(api.repository::<Team>()))
        .entity::<Player>(Arc::new(api.repository::<Player>()))
        .entity::<Coach>(Arc::new(api.repository::<Coach>()))
        .entity::<Position>(Arc::new(api.repository::<Position>()))
        .build()
}
