use axum::{
    Extension, Json,
    body::Bytes,
    extract::State,
    response::{IntoResponse, Response},
};
use storage::{
    Spreadsheet,
    dto::draw::{DrawRequest, DrawResponse},
};
use validator::Validate;

use crate::error::WebError;
use crate::session::AdminSession;
use crate::state::DrawSettings;

use super::services;

#[utoipa::path(
    post,
    path = "/api/admin/draw",
    request_body(
        content = DrawRequest,
        description = "Optional, an empty body draws one winner"
    ),
    security(
        ("bearer_auth" = [])
    ),
    responses(
        (status = 200, description = "Winners drawn and marked on the sheet", body = DrawResponse),
        (status = 400, description = "Invalid winner count or malformed body"),
        (status = 401, description = "Unauthorized"),
        (status = 422, description = "Not enough eligible participants"),
        (status = 500, description = "Sheet has no won-status column"),
        (status = 502, description = "Participant sheet unavailable")
    ),
    tag = "admin"
)]
pub async fn draw_winners(
    State(sheet): State<Spreadsheet>,
    State(settings): State<DrawSettings>,
    Extension(session): Extension<AdminSession>,
    body: Bytes,
) -> Result<Response, WebError> {
    let req = parse_request(&body)?;
    req.validate()?;

    let response = services::draw_winners(&sheet, &session, settings, req.count as usize).await?;

    Ok(Json(response).into_response())
}

/// An empty body is a plain "draw one winner" request.
fn parse_request(body: &[u8]) -> Result<DrawRequest, WebError> {
    if body.iter().all(u8::is_ascii_whitespace) {
        return Ok(DrawRequest::default());
    }

    let Json(req) = Json::<DrawRequest>::from_bytes(body)?;
    Ok(req)
}
