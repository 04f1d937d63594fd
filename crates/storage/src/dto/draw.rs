use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use validator::Validate;

use crate::models::Participant;

fn default_count() -> u32 {
    1
}

#[derive(Debug, Clone, Serialize, Deserialize, Validate, ToSchema)]
pub struct DrawRequest {
    /// Number of winners to draw
    #[serde(default = "default_count")]
    #[validate(range(min = 1, message = "At least one winner must be drawn"))]
    pub count: u32,
}

impl Default for DrawRequest {
    fn default() -> Self {
        Self {
            count: default_count(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
pub struct WinnerResponse {
    pub name: String,
    pub email: String,
}

impl From<&Participant> for WinnerResponse {
    fn from(participant: &Participant) -> Self {
        Self {
            name: participant.name.clone(),
            email: participant.email.clone(),
        }
    }
}

/// A drawn winner whose row could not be marked as won.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
pub struct PartialUpdateWarning {
    pub email: String,
    pub message: String,
}

impl PartialUpdateWarning {
    pub fn row_not_found(participant: &Participant) -> Self {
        Self {
            email: participant.email.clone(),
            message: format!(
                "No row found for {}, win status was not recorded",
                participant.email
            ),
        }
    }
}

#[derive(Debug, Clone, Default, Serialize, Deserialize, ToSchema)]
pub struct DrawResponse {
    pub winners: Vec<WinnerResponse>,
    pub warnings: Vec<PartialUpdateWarning>,
}
