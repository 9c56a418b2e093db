//! The session gate.
//!
//! Resolves the auth status exactly once at startup, then moves only on
//! explicit sign-in/sign-up/sign-out or on changes the backend pushes
//! through its subscription. A failed call never changes state.

use std::sync::Arc;

use tokio::sync::watch;

use super::{AuthBackend, AuthError};
use crate::models::{Session, SignUpOutcome};

/// Authentication status as the planner sees it.
#[derive(Debug, Clone)]
pub enum AuthState {
    /// Not yet resolved against the backend.
    Unknown,
    Authenticated(Session),
    Anonymous,
}

/// State machine in front of an [`AuthBackend`].
pub struct Gate {
    backend: Arc<dyn AuthBackend>,
    changes: watch::Receiver<Option<Session>>,
    state: AuthState,
}

impl Gate {
    pub fn new(backend: Arc<dyn AuthBackend>) -> Self {
        let changes = backend.subscribe();
        Self {
            backend,
            changes,
            state: AuthState::Unknown,
        }
    }

    pub fn state(&self) -> &AuthState {
        &self.state
    }

    /// The current session, when authenticated.
    pub fn session(&self) -> Option<&Session> {
        match &self.state {
            AuthState::Authenticated(session) => Some(session),
            _ => None,
        }
    }

    /// One-time `unknown -> authenticated | anonymous` transition.
    /// Later calls are no-ops.
    pub async fn resolve(&mut self) -> Result<(), AuthError> {
        if !matches!(self.state, AuthState::Unknown) {
            return Ok(());
        }
        self.state = match self.backend.current_session().await? {
            Some(session) => {
                tracing::info!(email = %session.user.email, "resumed existing session");
                AuthState::Authenticated(session)
            }
            None => AuthState::Anonymous,
        };
        Ok(())
    }

    pub async fn sign_in(&mut self, email: &str, password: &str) -> Result<(), AuthError> {
        let session = self.backend.sign_in(email, password).await?;
        tracing::info!(email = %session.user.email, "signed in");
        self.state = AuthState::Authenticated(session);
        Ok(())
    }

    /// Sign up; authenticates immediately unless the service deferred to
    /// email confirmation, in which case the gate stays anonymous.
    pub async fn sign_up(
        &mut self,
        email: &str,
        password: &str,
        name: &str,
    ) -> Result<SignUpOutcome, AuthError> {
        let outcome = self.backend.sign_up(email, password, name).await?;
        if let SignUpOutcome::Session(session) = &outcome {
            tracing::info!(email = %session.user.email, "signed up");
            self.state = AuthState::Authenticated(session.clone());
        }
        Ok(outcome)
    }

    pub async fn sign_out(&mut self) -> Result<(), AuthError> {
        self.backend.sign_out().await?;
        tracing::info!("signed out");
        self.state = AuthState::Anonymous;
        Ok(())
    }

    /// Absorb session changes the backend published on its own (expiry,
    /// remote sign-out). Does nothing while the gate is still unresolved.
    pub fn absorb_external(&mut self) {
        if matches!(self.state, AuthState::Unknown) {
            return;
        }
        if self.changes.has_changed().unwrap_or(false) {
            let latest = self.changes.borrow_and_update().clone();
            self.state = match latest {
                Some(session) => AuthState::Authenticated(session),
                None => AuthState::Anonymous,
            };
        }
    }
}
