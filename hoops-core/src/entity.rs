//! Entity descriptor
//!
//! Every record served by the front-end implements [`Entity`]. The trait is
//! the declarative per-entity configuration: the remote collection name, a
//! label for messages, identifier access and input validation. Repositories
//! and controllers are written once, generically over it.

use serde::{Serialize, de::DeserializeOwned};

/// Longest accepted `name` field
pub const MAX_NAME_LEN: usize = 100;

/// A record stored in a remote resource collection
pub trait Entity:
    Serialize + DeserializeOwned + Clone + Default + std::fmt::Debug + Send + Sync + 'static
{
    /// Remote collection name, also used as the inbound route prefix (e.g. "Teams")
    const RESOURCE: &'static str;

    /// Lower-case singular noun used in log and failure messages (e.g. "team")
    const LABEL: &'static str;

    /// Identifier assigned by the remote service (`0` when never stored)
    fn id(&self) -> i32;

    /// Replace the identifier
    fn set_id(&mut self, id: i32);

    /// Minimal input validation; an empty list means the record is acceptable
    fn validate(&self) -> Vec<FieldError>;
}

/// A single rejected input field
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct FieldError {
    pub field: &'static str,
    pub message: String,
}

impl FieldError {
    pub fn new(field: &'static str, message: impl Into<String>) -> Self {
        Self {
            field,
            message: message.into(),
        }
    }
}

impl std::fmt::Display for FieldError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}: {}", self.field, self.message)
    }
}

// =============================================================================
// Validation helpers
// =============================================================================

/// Names must be non-blank and at most [`MAX_NAME_LEN`] characters
pub(crate) fn check_name(errors: &mut Vec<FieldError>, name: &str) {
    if name.trim().is_empty() {
        errors.push(FieldError::new("name", "Name cannot be empty"));
    } else if name.chars().count() > MAX_NAME_LEN {
        errors.push(FieldError::new(
            "name",
            format!("Name is too long (max {MAX_NAME_LEN} characters)"),
        ));
    }
}

pub(crate) fn check_non_negative(errors: &mut Vec<FieldError>, field: &'static str, value: i32) {
    if value < 0 {
        errors.push(FieldError::new(field, "Value cannot be negative"));
    }
}

/// Optional references, when present, must point at a stored record
pub(crate) fn check_reference(errors: &mut Vec<FieldError>, field: &'static str, value: Option<i32>) {
    if matches!(value, Some(id) if id <= 0) {
        errors.push(FieldError::new(field, "Reference must be a positive id"));
    }
}
