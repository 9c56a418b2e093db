//! Demo-mode auth backend.
//!
//! Used when no auth service is configured: the planner stays usable with
//! a literal bypass identity instead of a real account. Accepts whatever
//! credentials it is given and never touches the network.

use std::sync::Mutex;

use async_trait::async_trait;
use tokio::sync::watch;

use super::{AuthBackend, AuthError};
use crate::models::{Session, SignUpOutcome, UserProfile};

/// Identity substituted for every demo sign-in.
pub const DEMO_EMAIL: &str = "demo@example.com";

const DEMO_USER_ID: &str = "demo";

/// In-memory stand-in for the hosted auth service.
pub struct DemoAuth {
    state: Mutex<Option<Session>>,
    changes: watch::Sender<Option<Session>>,
}

impl DemoAuth {
    pub fn new() -> Self {
        let (changes, _) = watch::channel(None);
        Self {
            state: Mutex::new(None),
            changes,
        }
    }

    fn publish(&self, session: Option<Session>) {
        *self.state.lock().expect("session lock poisoned") = session.clone();
        self.changes.send_replace(session);
    }

    fn bypass_session(name: Option<&str>) -> Session {
        Session {
            access_token: "demo-token".to_string(),
            user: UserProfile {
                id: DEMO_USER_ID.to_string(),
                email: DEMO_EMAIL.to_string(),
                name: name.map(str::to_string),
            },
        }
    }
}

impl Default for DemoAuth {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl AuthBackend for DemoAuth {
    async fn current_session(&self) -> Result<Option<Session>, AuthError> {
        Ok(self.state.lock().expect("session lock poisoned").clone())
    }

    async fn sign_up(
        &self,
        _email: &str,
        _password: &str,
        name: &str,
    ) -> Result<SignUpOutcome, AuthError> {
        let session = Self::bypass_session(Some(name));
        self.publish(Some(session.clone()));
        Ok(SignUpOutcome::Session(session))
    }

    async fn sign_in(&self, _email: &str, _password: &str) -> Result<Session, AuthError> {
        let session = Self::bypass_session(None);
        self.publish(Some(session.clone()));
        Ok(session)
    }

    async fn sign_out(&self) -> Result<(), AuthError> {
        self.publish(None);
        Ok(())
    }

    fn subscribe(&self) -> watch::Receiver<Option<Session>> {
        self.changes.subscribe()
    }
}
