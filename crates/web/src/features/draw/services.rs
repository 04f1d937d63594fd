use storage::{
    Spreadsheet,
    dto::draw::{DrawResponse, PartialUpdateWarning, WinnerResponse},
    error::Result,
    models::{ColumnLayout, Participant},
    repository::participant::ParticipantRepository,
    services::draw,
};

use crate::error::{WebError, WebResult};
use crate::session::AdminSession;
use crate::state::DrawSettings;

/// Draw `count` winners among participants who have not won yet and record
/// their win on the sheet.
///
/// Nothing guards the read-sample-write sequence: two draws running at the
/// same time can both pick the same participant.
pub async fn draw_winners(
    sheet: &Spreadsheet,
    session: &AdminSession,
    settings: DrawSettings,
    count: usize,
) -> WebResult<DrawResponse> {
    let repo = ParticipantRepository::new(sheet);
    let layout = repo.layout().await?;
    layout.require_won()?;

    let eligible = repo.list_eligible(&layout).await?;
    tracing::info!(
        session = %session.id,
        count,
        eligible = eligible.len(),
        "Starting draw"
    );

    if !settings.delay.is_zero() {
        tokio::time::sleep(settings.delay).await;
    }

    let winners = {
        let mut rng = rand::rng();
        draw::draw(&eligible, count, &mut rng)
    }
    .ok_or_else(|| {
        WebError::DrawFailed(format!(
            "Cannot draw {} winner(s) from {} eligible participant(s)",
            count,
            eligible.len()
        ))
    })?;

    let response = mark_winners(&repo, &layout, &winners).await?;
    tracing::info!(
        session = %session.id,
        marked = response.winners.len(),
        warnings = response.warnings.len(),
        "Draw completed"
    );

    Ok(response)
}

/// Set the won-status of every winner to "yes".
///
/// A winner whose row is gone is reported as a warning and the others are
/// still marked. A store failure stops the loop; rows marked before it stay
/// marked.
pub async fn mark_winners(
    repo: &ParticipantRepository<'_>,
    layout: &ColumnLayout,
    winners: &[Participant],
) -> Result<DrawResponse> {
    layout.require_won()?;

    let mut response = DrawResponse::default();
    for winner in winners {
        if repo.mark_won(layout, &winner.email).await? {
            response.winners.push(WinnerResponse::from(winner));
        } else {
            tracing::warn!("Drawn winner has no row anymore, win status not recorded");
            response
                .warnings
                .push(PartialUpdateWarning::row_not_found(winner));
        }
    }

    Ok(response)
}
