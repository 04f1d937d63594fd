use axum::{
    Json,
    extract::State,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use storage::{
    Spreadsheet,
    dto::participant::{ParticipantResponse, RegisterRequest},
};
use validator::Validate;

use crate::error::WebError;

use super::services;

#[utoipa::path(
    post,
    path = "/api/participants",
    request_body = RegisterRequest,
    responses(
        (status = 201, description = "Participant registered", body = ParticipantResponse),
        (status = 400, description = "Name or email missing"),
        (status = 409, description = "Email already registered"),
        (status = 502, description = "Participant sheet unavailable")
    ),
    tag = "participants"
)]
pub async fn register_participant(
    State(sheet): State<Spreadsheet>,
    Json(req): Json<RegisterRequest>,
) -> Result<Response, WebError> {
    let req = req.normalized();
    req.validate()?;

    let participant = services::register(&sheet, &req).await?;

    Ok((StatusCode::CREATED, Json(ParticipantResponse::from(participant))).into_response())
}
