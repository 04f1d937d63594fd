use storage::{
    Spreadsheet, error::Result, models::Participant, repository::participant::ParticipantRepository,
};

use crate::session::AdminSession;

/// List every participant on the sheet
pub async fn list_participants(
    sheet: &Spreadsheet,
    session: &AdminSession,
) -> Result<Vec<Participant>> {
    let repo = ParticipantRepository::new(sheet);
    let layout = repo.layout().await?;
    let participants = repo.list(&layout).await?;

    tracing::debug!(session = %session.id, count = participants.len(), "Listed participants");
    Ok(participants)
}
