use serde::{Deserialize, Serialize};

/// An authenticated identity issued by the external auth service.
///
/// Sessions are opaque to the planner: the service creates them on sign-in,
/// invalidates them on sign-out or expiry, and owns every detail in between.
/// Nothing here is persisted; a session dies with the process.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Session {
    pub access_token: String,
    pub user: UserProfile,
}

/// The signed-in user as reported by the auth service.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct UserProfile {
    pub id: String,
    pub email: String,
    /// Display name collected at sign-up, if the account has one.
    pub name: Option<String>,
}

/// Outcome of a sign-up call.
///
/// Hosted auth services may defer the session until the user clicks an
/// email confirmation link, so a successful sign-up does not always
/// authenticate.
#[derive(Debug, Clone)]
pub enum SignUpOutcome {
    /// The account was created and a session issued immediately.
    Session(Session),
    /// The account was created but needs email confirmation first.
    ConfirmationRequired,
}
