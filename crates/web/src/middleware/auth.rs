use axum::{
    extract::{Request, State},
    http::header::AUTHORIZATION,
    middleware::Next,
    response::Response,
};
use uuid::Uuid;

use crate::error::WebError;
use crate::session::{AdminSecret, AdminSession, SessionStore};

/// Guards the admin workflow behind the shared admin password.
#[derive(Clone)]
pub struct AccessGate {
    secret: AdminSecret,
    sessions: SessionStore,
}

impl AccessGate {
    pub fn new(password: impl Into<String>) -> Self {
        Self {
            secret: AdminSecret::new(password),
            sessions: SessionStore::default(),
        }
    }

    pub async fn login(&self, password: &str) -> Result<AdminSession, WebError> {
        self.sessions.login(password, &self.secret).await
    }

    /// Resolve a bearer token to a logged-in session.
    pub async fn resolve(&self, token: &str) -> Option<AdminSession> {
        let id = Uuid::parse_str(token.trim()).ok()?;
        self.sessions.admin_session(id).await
    }
}

fn bearer_token(request: &Request) -> Option<&str> {
    request
        .headers()
        .get(AUTHORIZATION)?
        .to_str()
        .ok()?
        .strip_prefix("Bearer ")
}

pub async fn require_auth(
    State(gate): State<AccessGate>,
    mut request: Request,
    next: Next,
) -> Result<Response, WebError> {
    let Some(token) = bearer_token(&request).map(str::to_owned) else {
        return Err(WebError::Unauthorized);
    };

    let Some(session) = gate.resolve(&token).await else {
        tracing::warn!("Rejected admin request with an unknown session token");
        return Err(WebError::Unauthorized);
    };

    request.extensions_mut().insert(session);
    Ok(next.run(request).await)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_resolve_only_known_sessions() {
        let gate = AccessGate::new("hunter2");
        let session = gate.login("hunter2").await.unwrap();

        assert_eq!(gate.resolve(&session.id.to_string()).await, Some(session));
        assert_eq!(gate.resolve("not-a-uuid").await, None);
        assert_eq!(gate.resolve(&Uuid::new_v4().to_string()).await, None);
    }

    #[tokio::test]
    async fn test_wrong_password_creates_no_session() {
        let gate = AccessGate::new("hunter2");
        assert!(matches!(gate.login("hunter3").await, Err(WebError::Unauthorized)));
    }
}
