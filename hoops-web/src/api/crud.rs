//! CRUD Controller
//!
//! One generic controller, instantiated per entity by [`routes`]. Each action
//! makes at most two repository calls, maps the tagged outcome to a response,
//! and routes every failure through [`CrudState::fail`] so it is logged once
//! and reported once.

use std::sync::Arc;

use axum::{
    Json, Router,
    extract::{FromRef, Path, State},
    response::{IntoResponse, Redirect, Response},
    routing::get,
};
use hoops_client::{ClientError, Repository};
use hoops_core::Entity;
use tokio_util::sync::CancellationToken;

use crate::api::cancel::RequestCancellation;
use crate::api::error::{ApiError, Failure, FailureKind, FormView, Operation, Outcome};
use crate::report::ErrorReporter;

/// Shared state of one entity's controller
pub struct CrudState<T: Entity> {
    pub repository: Arc<dyn Repository<T>>,
    pub reporter: Arc<dyn ErrorReporter>,
    pub shutdown: CancellationToken,
}

impl<T: Entity> Clone for CrudState<T> {
    fn clone(&self) -> Self {
        Self {
            repository: Arc::clone(&self.repository),
            reporter: Arc::clone(&self.reporter),
            shutdown: self.shutdown.clone(),
        }
    }
}

impl<T: Entity> FromRef<CrudState<T>> for CancellationToken {
    fn from_ref(state: &CrudState<T>) -> Self {
        state.shutdown.clone()
    }
}

impl<T: Entity> CrudState<T> {
    /// Log and report a failed repository call; returns the caller-facing message
    pub fn fail(&self, operation: Operation, id: Option<i32>, err: &ClientError) -> String {
        let message = operation.message(T::RESOURCE, T::LABEL, id);
        let kind = FailureKind::from(err);

        tracing::error!(
            operation = %operation,
            entity = T::LABEL,
            id = ?id,
            kind = %kind,
            "{}: {}",
            message,
            err
        );

        self.reporter.report(&Failure {
            operation,
            entity: T::LABEL,
            id,
            kind,
        });

        message
    }
}

/// Build the routes for one entity under `/{T::RESOURCE}`
pub fn routes<T: Entity>(state: CrudState<T>) -> Router {
    let base = format!("/{}", T::RESOURCE);

    Router::new()
        .route(&base, get(index::<T>))
        .route(&format!("{base}/Index"), get(index::<T>))
        .route(&format!("{base}/Details"), get(missing_id))
        .route(&format!("{base}/Details/{{id}}"), get(details::<T>))
        .route(
            &format!("{base}/Create"),
            get(create_form::<T>).post(create::<T>),
        )
        .route(&format!("{base}/Edit"), get(missing_id))
        .route(
            &format!("{base}/Edit/{{id}}"),
            get(edit_form::<T>).post(edit::<T>),
        )
        .route(&format!("{base}/Delete"), get(missing_id))
        .route(
            &format!("{base}/Delete/{{id}}"),
            get(delete_confirm::<T>).post(delete::<T>),
        )
        .with_state(state)
}

/// Route identifiers are model-bound loosely: anything that is not an
/// integer counts as absent.
pub fn parse_id(raw: &str) -> Option<i32> {
    raw.trim().parse().ok()
}

fn redirect_to_index<T: Entity>() -> Response {
    Redirect::to(&format!("/{}", T::RESOURCE)).into_response()
}

// =============================================================================
// Read actions
// =============================================================================

/// GET /{Entity}
pub async fn index<T: Entity>(
    State(state): State<CrudState<T>>,
    cancel: RequestCancellation,
) -> Response {
    tracing::debug!("Listing {}", T::RESOURCE);

    match state.repository.get_all(&cancel).await {
        Ok(entities) => Json(entities).into_response(),
        Err(err) => ApiError::Failed(state.fail(Operation::List, None, &err)).into_response(),
    }
}

/// GET /{Entity}/Details, /{Entity}/Edit and /{Entity}/Delete without an id
pub async fn missing_id() -> ApiError {
    ApiError::NotFound
}

/// GET /{Entity}/Details/{id}
pub async fn details<T: Entity>(
    State(state): State<CrudState<T>>,
    cancel: RequestCancellation,
    Path(raw): Path<String>,
) -> Response {
    show(&state, &raw, &cancel).await
}

/// GET /{Entity}/Edit/{id}
pub async fn edit_form<T: Entity>(
    State(state): State<CrudState<T>>,
    cancel: RequestCancellation,
    Path(raw): Path<String>,
) -> Response {
    show(&state, &raw, &cancel).await
}

/// GET /{Entity}/Delete/{id}
pub async fn delete_confirm<T: Entity>(
    State(state): State<CrudState<T>>,
    cancel: RequestCancellation,
    Path(raw): Path<String>,
) -> Response {
    show(&state, &raw, &cancel).await
}

async fn show<T: Entity>(state: &CrudState<T>, raw: &str, cancel: &CancellationToken) -> Response {
    let Some(id) = parse_id(raw) else {
        return ApiError::NotFound.into_response();
    };

    tracing::debug!("Getting {} {}", T::LABEL, id);

    match Outcome::from_lookup(state.repository.get(id, cancel).await) {
        Outcome::Found(entity) => Json(entity).into_response(),
        Outcome::Missing => ApiError::NotFound.into_response(),
        Outcome::Failed(err) => {
            ApiError::Failed(state.fail(Operation::Get, Some(id), &err)).into_response()
        }
    }
}

// =============================================================================
// Write actions
// =============================================================================

/// GET /{Entity}/Create
pub async fn create_form<T: Entity>() -> Json<T> {
    Json(T::default())
}

/// POST /{Entity}/Create
pub async fn create<T: Entity>(
    State(state): State<CrudState<T>>,
    cancel: RequestCancellation,
    Json(mut entity): Json<T>,
) -> Response {
    // Identifiers are assigned by the remote service.
    entity.set_id(0);

    let errors = entity.validate();
    if !errors.is_empty() {
        return FormView::invalid(entity, errors).into_response();
    }

    match state.repository.add(&entity, &cancel).await {
        Ok(()) => {
            tracing::info!("Created {}", T::LABEL);
            redirect_to_index::<T>()
        }
        Err(err) => {
            let message = state.fail(Operation::Create, None, &err);
            FormView::failed(entity, message).into_response()
        }
    }
}

/// POST /{Entity}/Edit/{id}
pub async fn edit<T: Entity>(
    State(state): State<CrudState<T>>,
    cancel: RequestCancellation,
    Path(raw): Path<String>,
    Json(entity): Json<T>,
) -> Response {
    match parse_id(&raw) {
        Some(id) if id == entity.id() => {}
        _ => return ApiError::NotFound.into_response(),
    }

    let errors = entity.validate();
    if !errors.is_empty() {
        return FormView::invalid(entity, errors).into_response();
    }

    match Outcome::from_write(state.repository.update(&entity, &cancel).await) {
        Outcome::Found(()) => {
            tracing::info!("Updated {} {}", T::LABEL, entity.id());
            redirect_to_index::<T>()
        }
        Outcome::Missing => ApiError::NotFound.into_response(),
        Outcome::Failed(err) => {
            let message = state.fail(Operation::Update, Some(entity.id()), &err);
            FormView::failed(entity, message).into_response()
        }
    }
}

/// POST /{Entity}/Delete/{id}
pub async fn delete<T: Entity>(
    State(state): State<CrudState<T>>,
    cancel: RequestCancellation,
    Path(raw): Path<String>,
) -> Response {
    let Some(id) = parse_id(&raw) else {
        return ApiError::NotFound.into_response();
    };

    let entity = match Outcome::from_lookup(state.repository.get(id, &cancel).await) {
        Outcome::Found(entity) => entity,
        Outcome::Missing => return ApiError::NotFound.into_response(),
        Outcome::Failed(err) => {
            return ApiError::Failed(state.fail(Operation::Delete, Some(id), &err))
                .into_response();
        }
    };

    match Outcome::from_write(state.repository.delete(entity.id(), &cancel).await) {
        Outcome::Found(()) => {
            tracing::info!("Deleted {} {}", T::LABEL, id);
            redirect_to_index::<T>()
        }
        Outcome::Missing => ApiError::NotFound.into_response(),
        Outcome::Failed(err) => {
            ApiError::Failed(state.fail(Operation::Delete, Some(id), &err)).into_response()
        }
    }
}
