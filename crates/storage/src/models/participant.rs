use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "snake_case")]
pub enum WinStatus {
    Won,
    NotWon,
}

impl WinStatus {
    /// Cell value written to the won-status column for a winner.
    pub const WON_MARKER: &'static str = "yes";

    pub fn from_cell(cell: &str) -> Self {
        if cell.trim().eq_ignore_ascii_case(Self::WON_MARKER) {
            WinStatus::Won
        } else {
            WinStatus::NotWon
        }
    }

    pub fn as_cell(&self) -> &'static str {
        match self {
            WinStatus::Won => Self::WON_MARKER,
            WinStatus::NotWon => "",
        }
    }
}

/// One registrant, as stored in a data row of the sheet.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize, ToSchema)]
pub struct Participant {
    pub name: String,
    pub email: String,
    pub status: WinStatus,
}

impl Participant {
    pub fn new(name: impl Into<String>, email: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            email: email.into(),
            status: WinStatus::NotWon,
        }
    }

    pub fn has_won(&self) -> bool {
        self.status == WinStatus::Won
    }

    /// Participants who already won are never drawn again.
    pub fn is_eligible(&self) -> bool {
        !self.has_won()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_win_status_from_cell() {
        assert_eq!(WinStatus::from_cell("yes"), WinStatus::Won);
        assert_eq!(WinStatus::from_cell(" YES "), WinStatus::Won);
        assert_eq!(WinStatus::from_cell(""), WinStatus::NotWon);
        assert_eq!(WinStatus::from_cell("no"), WinStatus::NotWon);
        assert_eq!(WinStatus::from_cell("yes!"), WinStatus::NotWon);
    }

    #[test]
    fn test_eligibility() {
        let mut participant = Participant::new("Alice", "alice@example.com");
        assert!(participant.is_eligible());

        participant.status = WinStatus::Won;
        assert!(!participant.is_eligible());
    }
}
