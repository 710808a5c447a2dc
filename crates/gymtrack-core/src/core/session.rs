//! Session state holder.
//!
//! The single owner of "who is signed in". Everything else reads snapshots
//! via [`SessionHolder::state`] or subscribes to changes via
//! [`SessionHolder::subscribe`].

use std::sync::Arc;

use futures_util::future::BoxFuture;
use tokio::sync::watch;

use crate::api::{AuthError, User};

/// An authenticated identity plus the bearer token the server issued for it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Session {
    pub user: User,
    pub token: String,
}

/// Whether a user is signed in, and who.
///
/// A pending sign-in is not a state: the holder stays `Unauthenticated`
/// until the exchange resolves.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub enum SessionState {
    #[default]
    Unauthenticated,
    Authenticated(Session),
}

impl SessionState {
    pub fn user(&self) -> Option<&User> {
        match self {
            SessionState::Unauthenticated => None,
            SessionState::Authenticated(session) => Some(&session.user),
        }
    }

    pub fn is_authenticated(&self) -> bool {
        matches!(self, SessionState::Authenticated(_))
    }
}

/// Exchanges credentials for a session.
///
/// Implemented by the HTTP client; tests use in-memory stubs.
pub trait Authenticator: Send + Sync {
    fn authenticate<'a>(
        &'a self,
        email: &'a str,
        password: &'a str,
    ) -> BoxFuture<'a, Result<Session, AuthError>>;
}

/// Holds the session state and owns the sign-in / sign-out lifecycle.
///
/// Created once at startup and shared as `Arc<SessionHolder>`.
pub struct SessionHolder {
    authenticator: Arc<dyn Authenticator>,
    tx: watch::Sender<SessionState>,
}

impl std::fmt::Debug for SessionHolder {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SessionHolder")
            .field("authenticated", &self.tx.borrow().is_authenticated())
            .finish_non_exhaustive()
    }
}

impl SessionHolder {
    /// Creates an empty (unauthenticated) holder.
    pub fn new(authenticator: Arc<dyn Authenticator>) -> Self {
        let (tx, _rx) = watch::channel(SessionState::Unauthenticated);
        Self { authenticator, tx }
    }

    /// Signs in with the given credentials.
    ///
    /// On success the new state is published to every subscriber before
    /// this returns. On failure the state is left untouched.
    ///
    /// Concurrent calls are not de-duplicated: whichever resolves last
    /// determines the final state.
    ///
    /// # Errors
    /// Returns an `AuthError` describing why the attempt failed.
    pub async fn sign_in(&self, email: &str, password: &str) -> Result<User, AuthError> {
        let session = self
            .authenticator
            .authenticate(email, password)
            .await
            .inspect_err(|err| tracing::info!(kind = ?err.kind, "sign-in failed"))?;

        if !session.user.is_complete() {
            tracing::warn!("sign-in returned an incomplete identity");
            return Err(AuthError::server(AuthError::SERVER));
        }

        let user = session.user.clone();
        tracing::info!(user_id = %user.id, "signed in");
        self.tx.send_replace(SessionState::Authenticated(session));
        Ok(user)
    }

    /// Clears the session. Never fails; repeated calls are no-ops.
    pub fn sign_out(&self) {
        let was_authenticated = self.tx.send_if_modified(|state| {
            if state.is_authenticated() {
                *state = SessionState::Unauthenticated;
                true
            } else {
                false
            }
        });
        if was_authenticated {
            tracing::info!("signed out");
        }
    }

    /// Drops the session after the server rejected its token.
    pub fn expire(&self) {
        if self.tx.borrow().is_authenticated() {
            tracing::info!("session expired");
        }
        self.sign_out();
    }

    pub fn current_user(&self) -> Option<User> {
        self.tx.borrow().user().cloned()
    }

    /// Snapshot of the current state.
    pub fn state(&self) -> SessionState {
        self.tx.borrow().clone()
    }

    /// Bearer token for authenticated API calls.
    pub fn token(&self) -> Option<String> {
        match &*self.tx.borrow() {
            SessionState::Unauthenticated => None,
            SessionState::Authenticated(session) => Some(session.token.clone()),
        }
    }

    /// Replaces the identity wholesale, keeping the token.
    ///
    /// No-op when unauthenticated or when `user` is incomplete.
    pub fn replace_user(&self, user: User) {
        if !user.is_complete() {
            tracing::warn!("ignoring incomplete identity update");
            return;
        }
        self.tx.send_if_modified(|state| match state {
            SessionState::Unauthenticated => false,
            SessionState::Authenticated(session) => {
                session.user = user;
                true
            }
        });
    }

    /// Receiver that is notified on every state change.
    pub fn subscribe(&self) -> watch::Receiver<SessionState> {
        self.tx.subscribe()
    }
}
