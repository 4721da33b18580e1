//! Player domain model

use serde::{Deserialize, Serialize};

use crate::entity::{Entity, FieldError, check_name, check_non_negative, check_reference};

/// A rostered player
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Player {
    #[serde(default, skip_serializing_if = "super::is_unassigned")]
    pub id: i32,
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub jersey_number: i32,
    #[serde(default)]
    pub team_id: Option<i32>,
    #[serde(default)]
    pub position_id: Option<i32>,
}

impl Entity for Player {
    const RESOURCE: &'static str = "Players";
    const LABEL: &'static str = "player";

    fn id(&self) -> i32 {
        self.id
    }

    fn set_id(&mut self, id: i32) {
        self.id = id;
    }

    fn validate(&self) -> Vec<FieldError> {
        let mut errors = Vec::new();
        check_name(&mut errors, &self.name);
        check_non_negative(&mut errors, "jerseyNumber", self.jersey_number);
        check_reference(&mut errors, "teamId", self.team_id);
        check_reference(&mut errors, "positionId", self.position_id);
        errors
    }
}
