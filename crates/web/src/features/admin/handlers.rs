use axum::{
    Extension, Json,
    extract::State,
    response::{IntoResponse, Response},
};
use storage::{
    Spreadsheet,
    dto::{
        participant::ParticipantListResponse,
        session::{LoginRequest, LoginResponse},
    },
};

use crate::error::WebError;
use crate::middleware::auth::AccessGate;
use crate::session::AdminSession;

use super::services;

#[utoipa::path(
    post,
    path = "/api/admin/login",
    request_body = LoginRequest,
    responses(
        (status = 200, description = "Logged in, returns the session token", body = LoginResponse),
        (status = 401, description = "Wrong password")
    ),
    tag = "admin"
)]
pub async fn login(
    State(gate): State<AccessGate>,
    Json(req): Json<LoginRequest>,
) -> Result<Response, WebError> {
    let session = gate.login(&req.password).await.inspect_err(|_| {
        tracing::warn!("Admin login attempt with a wrong password");
    })?;
    tracing::info!(session = %session.id, since = %session.since, "Admin logged in");

    Ok(Json(LoginResponse { token: session.id }).into_response())
}

#[utoipa::path(
    get,
    path = "/api/admin/participants",
    security(
        ("bearer_auth" = [])
    ),
    responses(
        (
            status = 200,
            description = "Every registered participant",
            body = ParticipantListResponse
        ),
        (status = 401, description = "Unauthorized"),
        (status = 502, description = "Participant sheet unavailable")
    ),
    tag = "admin"
)]
pub async fn list_participants(
    State(sheet): State<Spreadsheet>,
    Extension(session): Extension<AdminSession>,
) -> Result<Response, WebError> {
    let participants = services::list_participants(&sheet, &session).await?;

    Ok(Json(ParticipantListResponse::from(participants)).into_response())
}
