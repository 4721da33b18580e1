//! Coach domain model

use serde::{Deserialize, Serialize};

use crate::entity::{Entity, FieldError, check_name, check_non_negative, check_reference};

/// A coach and the team they are signed with
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Coach {
    #[serde(default, skip_serializing_if = "super::is_unassigned")]
    pub id: i32,
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub years_experience: i32,
    #[serde(default)]
    pub team_id: Option<i32>,
}

impl Entity for Coach {
    const RESOURCE: &'static str = "Coaches";
    const LABEL: &'static str = "coach";

    fn id(&self) -> i32 {
        self.id
    }

    fn set_id(&mut self, id: i32) {
        self.id = id;
    }

    fn validate(&self) -> Vec<FieldError> {
        let mut errors = Vec::new();
        check_name(&mut errors, &self.name);
        check_non_negative(&mut errors, "yearsExperience", self.years_experience);
        check_reference(&mut errors, "teamId", self.team_id);
        errors
    }
}
