use storage::{
    Spreadsheet,
    dto::participant::RegisterRequest,
    error::{Result, StorageError},
    models::Participant,
    repository::participant::ParticipantRepository,
};

/// Register a participant unless the email is already on the sheet.
///
/// The duplicate check and the append are two separate store calls, so two
/// simultaneous submissions of the same email can both get through.
pub async fn register(sheet: &Spreadsheet, request: &RegisterRequest) -> Result<Participant> {
    let repo = ParticipantRepository::new(sheet);
    let layout = repo.layout().await?;

    if repo.find_row(&layout, &request.email).await?.is_some() {
        tracing::info!("Rejected duplicate registration");
        return Err(StorageError::DuplicateEmail(request.email.clone()));
    }

    let participant = repo.create(&layout, &request.name, &request.email).await?;
    tracing::info!("Registered new participant");

    Ok(participant)
}
