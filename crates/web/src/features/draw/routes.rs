use axum::{Router, routing::post};

use super::handlers::draw_winners;
use crate::state::AppState;

pub fn routes() -> Router<AppState> {
    Router::new().route("/draw", post(draw_winners))
}
