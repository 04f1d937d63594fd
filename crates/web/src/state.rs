use std::time::Duration;

use axum::extract::FromRef;
use storage::Spreadsheet;

use crate::middleware::auth::AccessGate;

#[derive(Debug, Clone, Copy, Default)]
pub struct DrawSettings {
    /// Pause before the winners are picked.
    pub delay: Duration,
}

#[derive(Clone)]
pub struct AppState {
    pub sheet: Spreadsheet,
    pub gate: AccessGate,
    pub draw: DrawSettings,
}

impl FromRef<AppState> for Spreadsheet {
    fn from_ref(state: &AppState) -> Self {
        state.sheet.clone()
    }
}

impl FromRef<AppState> for AccessGate {
    fn from_ref(state: &AppState) -> Self {
        state.gate.clone()
    }
}

impl FromRef<AppState> for DrawSettings {
    fn from_ref(state: &AppState) -> Self {
        state.draw
    }
}
