//! Position domain model

use serde::{Deserialize, Serialize};

use crate::entity::{Entity, FieldError, check_name};

/// A playing position (e.g. "Point Guard")
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Position {
    #[serde(default, skip_serializing_if = "super::is_unassigned")]
    pub id: i32,
    #[serde(default)]
    pub name: String,
}

impl Entity for Position {
    const RESOURCE: &'static str = "Positions";
    const LABEL: &'static str = "position";

    fn id(&self) -> i32 {
        self.id
    }

    fn set_id(&mut self, id: i32) {
        self.id = id;
    }

    fn validate(&self) -> Vec<FieldError> {
        let mut errors = Vec::new();
        check_name(&mut errors, &self.name);
        errors
    }
}
