//! The session gate and the external authentication boundary.
//!
//! The planner never handles credentials itself: a hosted auth service
//! owns the whole session lifecycle. [`AuthBackend`] is that service's
//! contract; [`SupabaseAuth`] speaks its HTTP API and [`DemoAuth`] is the
//! substitute used when no service is configured. [`Gate`] is the small
//! state machine the planner consults.

mod demo;
mod gate;
mod supabase;

pub use demo::{DemoAuth, DEMO_EMAIL};
pub use gate::{AuthState, Gate};
pub use supabase::SupabaseAuth;

use async_trait::async_trait;
use thiserror::Error;
use tokio::sync::watch;

use crate::models::{Session, SignUpOutcome};

/// Failures surfaced by the auth service.
///
/// Messages are shown to the user verbatim. No failure is fatal, none is
/// retried automatically, and a failed call leaves local state unchanged.
#[derive(Debug, Error)]
pub enum AuthError {
    #[error("auth request failed: {0}")]
    Http(#[from] reqwest::Error),

    /// The service rejected the credentials or the account state.
    #[error("{0}")]
    Rejected(String),

    #[error("auth service error: {0}")]
    Service(String),
}

/// Contract of the external authentication service.
///
/// One implementation is selected at startup and never swapped afterwards.
/// Implementations hold the current session in memory only; nothing
/// survives the process.
#[async_trait]
pub trait AuthBackend: Send + Sync {
    /// The session the service currently holds, if any.
    async fn current_session(&self) -> Result<Option<Session>, AuthError>;

    /// Register a new account. The service may require an email
    /// confirmation step before it issues a session.
    async fn sign_up(
        &self,
        email: &str,
        password: &str,
        name: &str,
    ) -> Result<SignUpOutcome, AuthError>;

    /// Exchange credentials for a session.
    async fn sign_in(&self, email: &str, password: &str) -> Result<Session, AuthError>;

    /// Invalidate the current session.
    async fn sign_out(&self) -> Result<(), AuthError>;

    /// Change feed: receives the current session whenever it changes,
    /// including changes the service initiates (expiry, remote sign-out).
    fn subscribe(&self) -> watch::Receiver<Option<Session>>;
}
