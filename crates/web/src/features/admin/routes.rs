use axum::{
    Router,
    routing::{get, post},
};

use super::handlers::{list_participants, login};
use crate::state::AppState;

pub fn routes() -> Router<AppState> {
    Router::new().route("/login", post(login))
}

/// Routes that need a logged-in admin session
pub fn protected_routes() -> Router<AppState> {
    Router::new().route("/participants", get(list_participants))
}
