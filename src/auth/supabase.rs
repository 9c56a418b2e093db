//! HTTP client for the hosted authentication service.
//!
//! Speaks the GoTrue API that Supabase projects expose: sign-up,
//! password-grant sign-in and logout. The project URL and public anon key
//! come from [`crate::config`]. Tokens live in process memory only and die
//! with it, so a fresh process always starts without a session.

use std::sync::Mutex;

use async_trait::async_trait;
use reqwest::{Client, StatusCode};
use serde::Deserialize;
use tokio::sync::watch;

use super::{AuthBackend, AuthError};
use crate::models::{Session, SignUpOutcome, UserProfile};

/// Client for a Supabase project's auth endpoints.
pub struct SupabaseAuth {
    base_url: String,
    anon_key: String,
    client: Client,
    state: Mutex<Option<Session>>,
    changes: watch::Sender<Option<Session>>,
}

impl SupabaseAuth {
    pub fn new(base_url: impl Into<String>, anon_key: impl Into<String>) -> Self {
        let base_url: String = base_url.into();
        let (changes, _) = watch::channel(None);
        Self {
            base_url: base_url.trim_end_matches('/').to_string(),
            anon_key: anon_key.into(),
            client: Client::new(),
            state: Mutex::new(None),
            changes,
        }
    }

    /// Build a request with the project's anon key attached.
    fn request(&self, method: reqwest::Method, path: &str) -> reqwest::RequestBuilder {
        let url = format!("{}/auth/v1{}", self.base_url, path);
        self.client
            .request(method, url)
            .header("apikey", &self.anon_key)
    }

    /// Record and broadcast the new session state.
    fn publish(&self, session: Option<Session>) {
        *self.state.lock().expect("session lock poisoned") = session.clone();
        self.changes.send_replace(session);
    }

    /// Decode a non-success response into the service's own message.
    async fn error_from(response: reqwest::Response) -> AuthError {
        let status = response.status();
        let body = response.text().await.unwrap_or_default();
        let message = serde_json::from_str::<ApiError>(&body)
            .ok()
            .and_then(ApiError::into_message)
            .unwrap_or_else(|| format!("{}: {}", status, body));

        match status {
            StatusCode::BAD_REQUEST
            | StatusCode::UNAUTHORIZED
            | StatusCode::FORBIDDEN
            | StatusCode::UNPROCESSABLE_ENTITY => AuthError::Rejected(message),
            _ => AuthError::Service(message),
        }
    }
}

#[async_trait]
impl AuthBackend for SupabaseAuth {
    async fn current_session(&self) -> Result<Option<Session>, AuthError> {
        Ok(self.state.lock().expect("session lock poisoned").clone())
    }

    async fn sign_up(
        &self,
        email: &str,
        password: &str,
        name: &str,
    ) -> Result<SignUpOutcome, AuthError> {
        tracing::debug!(email, "signing up");
        let response = self
            .request(reqwest::Method::POST, "/signup")
            .json(&serde_json::json!({
                "email": email,
                "password": password,
                "data": { "name": name },
            }))
            .send()
            .await?;

        if !response.status().is_success() {
            return Err(Self::error_from(response).await);
        }

        match response.json::<SignUpResponse>().await? {
            SignUpResponse::Tokens(tokens) => {
                let session = tokens.into_session(email);
                self.publish(Some(session.clone()));
                Ok(SignUpOutcome::Session(session))
            }
            SignUpResponse::Pending(_) => {
                tracing::debug!(email, "sign-up accepted, confirmation required");
                Ok(SignUpOutcome::ConfirmationRequired)
            }
        }
    }

    async fn sign_in(&self, email: &str, password: &str) -> Result<Session, AuthError> {
        tracing::debug!(email, "signing in");
        let response = self
            .request(reqwest::Method::POST, "/token?grant_type=password")
            .json(&serde_json::json!({
                "email": email,
                "password": password,
            }))
            .send()
            .await?;

        if !response.status().is_success() {
            return Err(Self::error_from(response).await);
        }

        let tokens: TokenResponse = response.json().await?;
        let session = tokens.into_session(email);
        self.publish(Some(session.clone()));
        Ok(session)
    }

    async fn sign_out(&self) -> Result<(), AuthError> {
        let token = self
            .state
            .lock()
            .expect("session lock poisoned")
            .as_ref()
            .map(|session| session.access_token.clone());

        if let Some(token) = token {
            let response = self
                .request(reqwest::Method::POST, "/logout")
                .bearer_auth(&token)
                .send()
                .await?;

            if !response.status().is_success() {
                return Err(Self::error_from(response).await);
            }
        }

        self.publish(None);
        Ok(())
    }

    fn subscribe(&self) -> watch::Receiver<Option<Session>> {
        self.changes.subscribe()
    }
}

// ============================================================
// Wire types
// ============================================================

/// Error payload. GoTrue has used several field names across versions, so
/// all of them are tried before falling back to the raw body.
#[derive(Debug, Deserialize)]
struct ApiError {
    error_description: Option<String>,
    msg: Option<String>,
    message: Option<String>,
}

impl ApiError {
    fn into_message(self) -> Option<String> {
        self.error_description.or(self.msg).or(self.message)
    }
}

#[derive(Debug, Deserialize)]
struct TokenResponse {
    access_token: String,
    user: ApiUser,
}

impl TokenResponse {
    fn into_session(self, fallback_email: &str) -> Session {
        Session {
            access_token: self.access_token,
            user: self.user.into_profile(fallback_email),
        }
    }
}

#[derive(Debug, Deserialize)]
struct ApiUser {
    id: String,
    email: Option<String>,
    #[serde(default)]
    user_metadata: serde_json::Value,
}

impl ApiUser {
    fn into_profile(self, fallback_email: &str) -> UserProfile {
        let name = self
            .user_metadata
            .get("name")
            .and_then(|value| value.as_str())
            .map(str::to_string);
        UserProfile {
            id: self.id,
            email: self.email.unwrap_or_else(|| fallback_email.to_string()),
            name,
        }
    }
}

/// Sign-up responses come in two shapes: a token grant when the project
/// auto-confirms accounts, or a bare user object when the account still
/// needs email confirmation.
#[derive(Debug, Deserialize)]
#[serde(untagged)]
enum SignUpResponse {
    Tokens(TokenResponse),
    Pending(ApiUser),
}
