use std::collections::HashMap;
use std::fmt;
use std::sync::Arc;

use chrono::{DateTime, Utc};
use tokio::sync::RwLock;
use uuid::Uuid;

use crate::error::WebError;

/// Oldest sessions are dropped once this many admins are logged in.
pub const MAX_SESSIONS: usize = 64;

/// Admin access state of one interactive session.
///
/// The only transition is `LoggedOut -> LoggedIn`, taken on an exact password
/// match. There is no logout.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum SessionState {
    #[default]
    LoggedOut,
    LoggedIn { since: DateTime<Utc> },
}

impl SessionState {
    pub fn login(self, password: &str, secret: &AdminSecret) -> Result<Self, WebError> {
        match self {
            Self::LoggedIn { .. } => Ok(self),
            Self::LoggedOut if secret.matches(password) => Ok(Self::LoggedIn { since: Utc::now() }),
            Self::LoggedOut => Err(WebError::Unauthorized),
        }
    }
}

#[derive(Clone)]
pub struct AdminSecret(Arc<str>);

impl AdminSecret {
    pub fn new(password: impl Into<String>) -> Self {
        Self(Arc::from(password.into()))
    }

    pub fn matches(&self, candidate: &str) -> bool {
        &*self.0 == candidate
    }
}

impl fmt::Debug for AdminSecret {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("AdminSecret(<redacted>)")
    }
}

/// A logged-in admin session, handed to every admin operation.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct AdminSession {
    pub id: Uuid,
    pub since: DateTime<Utc>,
}

/// Session states by token, kept in memory for the life of the process.
/// Holds at most [`MAX_SESSIONS`] entries.
#[derive(Clone, Default)]
pub struct SessionStore {
    sessions: Arc<RwLock<HashMap<Uuid, SessionState>>>,
}

impl SessionStore {
    /// Run the login transition for a fresh session and keep it on success.
    pub async fn login(
        &self,
        password: &str,
        secret: &AdminSecret,
    ) -> Result<AdminSession, WebError> {
        let state = SessionState::default().login(password, secret)?;
        let SessionState::LoggedIn { since } = state else {
            return Err(WebError::Unauthorized);
        };

        let id = Uuid::new_v4();
        let mut sessions = self.sessions.write().await;
        if sessions.len() >= MAX_SESSIONS {
            let oldest = sessions
                .iter()
                .filter_map(|(id, state)| match state {
                    SessionState::LoggedIn { since } => Some((*since, *id)),
                    SessionState::LoggedOut => None,
                })
                .min()
                .map(|(_, id)| id);
            if let Some(oldest) = oldest {
                sessions.remove(&oldest);
                tracing::debug!(session = %oldest, "Dropped oldest admin session");
            }
        }
        sessions.insert(id, state);

        Ok(AdminSession { id, since })
    }

    #[cfg(test)]
    async fn len(&self) -> usize {
        self.sessions.read().await.len()
    }

    pub async fn admin_session(&self, id: Uuid) -> Option<AdminSession> {
        match self.sessions.read().await.get(&id) {
            Some(SessionState::LoggedIn { since }) => Some(AdminSession { id, since: *since }),
            _ => None,
        }
    }
}
