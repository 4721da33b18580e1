//! Team domain model

use serde::{Deserialize, Serialize};

use crate::entity::{Entity, FieldError, check_name, check_non_negative};

/// A team and its current season record
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Team {
    #[serde(default, skip_serializing_if = "super::is_unassigned")]
    pub id: i32,
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub national_rank: i32,
    #[serde(default)]
    pub season_wins: i32,
    #[serde(default)]
    pub season_loss: i32,
}

impl Entity for Team {
    const RESOURCE: &'static str = "Teams";
    const LABEL: &'static str = "team";

    fn id(&self) -> i32 {
        self.id
    }

    fn set_id(&mut self, id: i32) {
        self.id = id;
    }

    fn validate(&self) -> Vec<FieldError> {
        let mut errors = Vec::new();
        check_name(&mut errors, &self.name);
        check_non_negative(&mut errors, "nationalRank", self.national_rank);
        check_non_negative(&mut errors, "seasonWins", self.season_wins);
        check_non_negative(&mut errors, "seasonLoss", self.season_loss);
        errors
    }
}
