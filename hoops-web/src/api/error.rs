//! API Error Handling
//!
//! Tagged outcomes of repository calls, the failure record handed to the
//! error reporter, and the responses they turn into.

use axum::{
    Json,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use hoops_client::ClientError;
use hoops_core::FieldError;
use serde::Serialize;

/// API error type
#[derive(Debug)]
pub enum ApiError {
    /// Absent or unknown identifier
    NotFound,
    /// Generic failure; the message never carries internal detail
    Failed(String),
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let (status, message) = match self {
            ApiError::NotFound => (StatusCode::NOT_FOUND, "Not found".to_string()),
            ApiError::Failed(msg) => (StatusCode::BAD_REQUEST, msg),
        };

        (status, Json(serde_json::json!({ "error": message }))).into_response()
    }
}

/// Input re-presented for correction after a rejected create or edit
#[derive(Debug, Serialize)]
pub struct FormView<T> {
    pub model: T,
    pub errors: Vec<FieldError>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

impl<T> FormView<T> {
    /// Input failed validation; no repository call was made
    pub fn invalid(model: T, errors: Vec<FieldError>) -> (StatusCode, Json<Self>) {
        (
            StatusCode::UNPROCESSABLE_ENTITY,
            Json(Self {
                model,
                errors,
                error: None,
            }),
        )
    }

    /// The repository call failed; the input is handed back untouched
    pub fn failed(model: T, message: String) -> (StatusCode, Json<Self>) {
        (
            StatusCode::BAD_REQUEST,
            Json(Self {
                model,
                errors: Vec::new(),
                error: Some(message),
            }),
        )
    }
}

// =============================================================================
// Outcomes
// =============================================================================

/// Result of one repository call, tagged for response selection
#[derive(Debug)]
pub enum Outcome<T> {
    Found(T),
    Missing,
    Failed(ClientError),
}

impl<T> Outcome<T> {
    /// Fold a lookup (`get`) result
    pub fn from_lookup(result: Result<Option<T>, ClientError>) -> Self {
        match result {
            Ok(Some(entity)) => Outcome::Found(entity),
            Ok(None) => Outcome::Missing,
            Err(err) if err.is_not_found() => Outcome::Missing,
            Err(err) => Outcome::Failed(err),
        }
    }
}

impl Outcome<()> {
    /// Fold a write (`update`, `delete`) result
    pub fn from_write(result: Result<(), ClientError>) -> Self {
        match result {
            Ok(()) => Outcome::Found(()),
            Err(err) if err.is_not_found() => Outcome::Missing,
            Err(err) => Outcome::Failed(err),
        }
    }
}

/// Category of a repository failure
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum FailureKind {
    Transport,
    Decoding,
    Rejected,
    Cancelled,
}

impl FailureKind {
    pub const ALL: [FailureKind; 4] = [
        FailureKind::Transport,
        FailureKind::Decoding,
        FailureKind::Rejected,
        FailureKind::Cancelled,
    ];

    pub fn as_str(self) -> &'static str {
        match self {
            FailureKind::Transport => "transport",
            FailureKind::Decoding => "decoding",
            FailureKind::Rejected => "rejected",
            FailureKind::Cancelled => "cancelled",
        }
    }
}

impl From<&ClientError> for FailureKind {
    fn from(err: &ClientError) -> Self {
        match err {
            ClientError::Transport(_) => FailureKind::Transport,
            ClientError::Decode(_) => FailureKind::Decoding,
            ClientError::Rejected { .. } => FailureKind::Rejected,
            // Folded into `Outcome::Missing` before reporting; a direct caller
            // still sees the remote refusal it came from.
            ClientError::NotFound(_) => FailureKind::Rejected,
            ClientError::Cancelled => FailureKind::Cancelled,
        }
    }
}

impl std::fmt::Display for FailureKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Controller action that issued the failed repository call
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Operation {
    List,
    Get,
    Create,
    Update,
    Delete,
}

impl Operation {
    pub fn as_str(self) -> &'static str {
        match self {
            Operation::List => "list",
            Operation::Get => "get",
            Operation::Create => "create",
            Operation::Update => "update",
            Operation::Delete => "delete",
        }
    }

    /// Caller-facing failure message, e.g. "Get team failed for id 5"
    pub fn message(self, resource: &str, label: &str, id: Option<i32>) -> String {
        let base = match self {
            Operation::List => return format!("Get all {} failed", resource.to_lowercase()),
            Operation::Get => format!("Get {label} failed"),
            Operation::Create => format!("Create {label} failed"),
            Operation::Update => format!("Edit {label} failed"),
            Operation::Delete => format!("Delete {label} failed"),
        };
        match id {
            Some(id) => format!("{base} for id {id}"),
            None => base,
        }
    }
}

impl std::fmt::Display for Operation {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Everything the error reporter learns about one failed action
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Failure {
    pub operation: Operation,
    pub entity: &'static str,
    pub id: Option<i32>,
    pub kind: FailureKind,
}
