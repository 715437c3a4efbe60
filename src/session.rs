//! Session state: who is logged in, persisted in a [`KeyValueStore`].
//!
//! The token and username are always written and removed together; a store
//! holding only one of them reads as logged out and is normalized on open.

use tracing::{info, warn};

use crate::api::{ApiError, TaskService};
use crate::models::{Credentials, LoginReply};
use crate::storage::{KeyValueStore, StorageError};

pub const TOKEN_KEY: &str = "token";
pub const USERNAME_KEY: &str = "username";

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Session {
    pub token: String,
    pub username: String,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SessionState {
    Unauthenticated,
    Authenticated(Session),
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RegisterOutcome {
    /// Blank input, nothing was sent.
    Skipped,
    /// Server text to show, `message` falling back to `error`.
    Replied(Option<String>),
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LoginOutcome {
    Skipped,
    LoggedIn(Session),
    Denied(Option<String>),
}

pub struct SessionManager<S> {
    store: S,
}

impl<S: KeyValueStore> SessionManager<S> {
    pub fn new(store: S) -> Self {
        let mut manager = Self { store };
        let token = manager.store.get(TOKEN_KEY);
        let username = manager.store.get(USERNAME_KEY);
        if token.is_some() != username.is_some() {
            warn!("storage holds half a session; clearing it");
            manager.clear();
        }
        manager
    }

    #[cfg(test)]
    pub(crate) fn store(&self) -> &S {
        &self.store
    }

    pub fn current_session(&self) -> Option<Session> {
        let token = self.store.get(TOKEN_KEY)?;
        let username = self.store.get(USERNAME_KEY)?;
        Some(Session { token, username })
    }

    pub fn is_authenticated(&self) -> bool {
        self.current_session().is_some()
    }

    pub fn state(&self) -> SessionState {
        match self.current_session() {
            Some(session) => SessionState::Authenticated(session),
            None => SessionState::Unauthenticated,
        }
    }

    pub async fn register<A>(
        &self,
        api: &A,
        username: &str,
        password: &str,
    ) -> Result<RegisterOutcome, ApiError>
    where
        A: TaskService + ?Sized,
    {
        let Some(credentials) = Credentials::parse(username, password) else {
            return Ok(RegisterOutcome::Skipped);
        };
        let reply = api.register(&credentials).await?;
        Ok(RegisterOutcome::Replied(reply.text().map(str::to_string)))
    }

    pub async fn login<A>(
        &mut self,
        api: &A,
        username: &str,
        password: &str,
    ) -> Result<LoginOutcome, ApiError>
    where
        A: TaskService + ?Sized,
    {
        let Some(credentials) = Credentials::parse(username, password) else {
            return Ok(LoginOutcome::Skipped);
        };
        match api.login(&credentials).await? {
            LoginReply::Granted { token } => {
                let session = Session {
                    token,
                    username: credentials.username,
                };
                if let Err(err) = self.establish(&session) {
                    warn!(error = %err, "session not persisted");
                }
                info!(username = %session.username, "logged in");
                Ok(LoginOutcome::LoggedIn(session))
            }
            LoginReply::Denied { error } => Ok(LoginOutcome::Denied(error)),
        }
    }

    /// Idempotent. Storage failures are logged; the session reads as gone either way.
    pub fn logout(&mut self) {
        if self.is_authenticated() {
            info!("logged out");
        }
        self.clear();
    }

    fn establish(&mut self, session: &Session) -> Result<(), StorageError> {
        let token = self.store.set(TOKEN_KEY, &session.token);
        let username = self.store.set(USERNAME_KEY, &session.username);
        token.and(username)
    }

    fn clear(&mut self) {
        for key in [TOKEN_KEY, USERNAME_KEY] {
            if let Err(err) = self.store.remove(key) {
                warn!(key, error = %err, "failed to remove session entry");
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::storage::MemoryStore;
    use crate::testing::{Call, FakeService};

    fn logged_in_store() -> MemoryStore {
        let mut store = MemoryStore::new();
        store.set(TOKEN_KEY, "abc123").unwrap();
        store.set(USERNAME_KEY, "al").unwrap();
        store
    }

    #[test]
    fn initial_state_comes_from_storage() {
        let manager = SessionManager::new(MemoryStore::new());
        assert_eq!(manager.state(), SessionState::Unauthenticated);

        let manager = SessionManager::new(logged_in_store());
        assert_eq!(
            manager.state(),
            SessionState::Authenticated(Session {
                token: "abc123".into(),
                username: "al".into(),
            })
        );
    }

    #[test]
    fn half_session_is_cleared_on_open() {
        let mut store = MemoryStore::new();
        store.set(TOKEN_KEY, "abc123").unwrap();
        let manager = SessionManager::new(store);
        assert!(!manager.is_authenticated());
        assert_eq!(manager.store().get(TOKEN_KEY), None);
        assert_eq!(manager.store().get(USERNAME_KEY), None);
    }

    #[tokio::test]
    async fn blank_credentials_send_nothing() {
        let api = FakeService::new();
        let mut manager = SessionManager::new(MemoryStore::new());

        let outcome = manager.register(&api, "  ", "pw").await.unwrap();
        assert_eq!(outcome, RegisterOutcome::Skipped);
        let outcome = manager.login(&api, "al", "\t").await.unwrap();
        assert_eq!(outcome, LoginOutcome::Skipped);

        assert!(api.calls().is_empty());
    }

    #[tokio::test]
    async fn register_shows_server_text_without_logging_in() {
        let api = FakeService::new()
            .with_register_message("created")
            .with_register_error("Username already exists");
        let manager = SessionManager::new(MemoryStore::new());

        let outcome = manager.register(&api, " al ", "pw").await.unwrap();
        assert_eq!(outcome, RegisterOutcome::Replied(Some("created".into())));
        let outcome = manager.register(&api, "al", "pw").await.unwrap();
        assert_eq!(
            outcome,
            RegisterOutcome::Replied(Some("Username already exists".into()))
        );

        assert!(!manager.is_authenticated());
        assert_eq!(
            api.calls()[0],
            Call::Register(Credentials {
                username: "al".into(),
                password: "pw".into(),
            })
        );
    }

    #[tokio::test]
    async fn login_persists_token_and_username_together() {
        let api = FakeService::new().with_login_token("abc123");
        let mut manager = SessionManager::new(MemoryStore::new());

        let outcome = manager.login(&api, "al", "pw").await.unwrap();

        let expected = Session {
            token: "abc123".into(),
            username: "al".into(),
        };
        assert_eq!(outcome, LoginOutcome::LoggedIn(expected.clone()));
        assert_eq!(manager.store().get(TOKEN_KEY).as_deref(), Some("abc123"));
        assert_eq!(manager.store().get(USERNAME_KEY).as_deref(), Some("al"));
        assert_eq!(manager.current_session(), Some(expected));
    }

    #[tokio::test]
    async fn denied_login_keeps_session_empty() {
        let api = FakeService::new().with_login_denied("Invalid credentials");
        let mut manager = SessionManager::new(MemoryStore::new());

        let outcome = manager.login(&api, "al", "wrong").await.unwrap();

        assert_eq!(
            outcome,
            LoginOutcome::Denied(Some("Invalid credentials".into()))
        );
        assert!(!manager.is_authenticated());
    }

    #[tokio::test]
    async fn login_transport_error_propagates() {
        let api = FakeService::new().with_login_failure();
        let mut manager = SessionManager::new(MemoryStore::new());

        let err = manager.login(&api, "al", "pw").await.unwrap_err();
        assert!(matches!(err, ApiError::Unexpected));
        assert!(!manager.is_authenticated());
    }

    #[test]
    fn logout_is_idempotent() {
        let mut manager = SessionManager::new(logged_in_store());
        manager.logout();
        manager.logout();
        assert_eq!(manager.state(), SessionState::Unauthenticated);
        assert_eq!(manager.store().get(TOKEN_KEY), None);
        assert_eq!(manager.store().get(USERNAME_KEY), None);
    }
}
