use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use validator::Validate;

use crate::models::Participant;

/// Request payload for registering to the raffle
#[derive(Debug, Clone, Serialize, Deserialize, Validate, ToSchema)]
pub struct RegisterRequest {
    #[validate(custom(function = "validate_not_blank"))]
    #[validate(length(max = 255, message = "Name must be at most 255 characters"))]
    pub name: String,

    #[validate(custom(function = "validate_not_blank"))]
    #[validate(length(max = 255, message = "Email must be at most 255 characters"))]
    pub email: String,
}

impl RegisterRequest {
    /// Surrounding whitespace is dropped before validation and storage.
    pub fn normalized(self) -> Self {
        Self {
            name: self.name.trim().to_string(),
            email: self.email.trim().to_string(),
        }
    }
}

fn validate_not_blank(value: &str) -> Result<(), validator::ValidationError> {
    if value.trim().is_empty() {
        let mut error = validator::ValidationError::new("required");
        error.message = Some("This field is required".into());
        Err(error)
    } else {
        Ok(())
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct ParticipantResponse {
    pub name: String,
    pub email: String,
    pub won: bool,
}

impl From<Participant> for ParticipantResponse {
    fn from(participant: Participant) -> Self {
        Self {
            won: participant.has_won(),
            name: participant.name,
            email: participant.email,
        }
    }
}

/// Admin view of the sheet
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct ParticipantListResponse {
    pub total: usize,
    pub eligible: usize,
    pub participants: Vec<ParticipantResponse>,
}

impl From<Vec<Participant>> for ParticipantListResponse {
    fn from(participants: Vec<Participant>) -> Self {
        let eligible = participants.iter().filter(|p| p.is_eligible()).count();

        Self {
            total: participants.len(),
            eligible,
            participants: participants
                .into_iter()
                .map(ParticipantResponse::from)
                .collect(),
        }
    }
}
