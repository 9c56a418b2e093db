//! Startup configuration.
//!
//! Which auth backend this process uses is decided exactly once, from the
//! presence of the service URL and anon key; nothing re-checks it per
//! call. Values come from the environment with CLI flags layered on top.

use std::sync::Arc;

use crate::auth::{AuthBackend, DemoAuth, SupabaseAuth};

const URL_VAR: &str = "SUPABASE_URL";
const ANON_KEY_VAR: &str = "SUPABASE_ANON_KEY";

/// Raw configuration before backend resolution.
#[derive(Debug, Clone, Default)]
pub struct AppConfig {
    pub supabase_url: Option<String>,
    pub supabase_anon_key: Option<String>,
}

impl AppConfig {
    /// Load from environment variables. Blank values count as unset.
    pub fn from_env() -> Self {
        Self {
            supabase_url: std::env::var(URL_VAR).ok().filter(|v| !v.trim().is_empty()),
            supabase_anon_key: std::env::var(ANON_KEY_VAR)
                .ok()
                .filter(|v| !v.trim().is_empty()),
        }
    }

    /// Layer CLI flag overrides on top of the environment.
    pub fn with_overrides(mut self, url: Option<String>, anon_key: Option<String>) -> Self {
        if let Some(url) = url {
            self.supabase_url = Some(url);
        }
        if let Some(key) = anon_key {
            self.supabase_anon_key = Some(key);
        }
        self
    }

    /// Resolve which backend this process will use: the hosted service
    /// when both values are present, the demo stub otherwise.
    pub fn backend(&self) -> BackendKind {
        match (&self.supabase_url, &self.supabase_anon_key) {
            (Some(url), Some(key)) => BackendKind::Supabase {
                url: url.clone(),
                anon_key: key.clone(),
            },
            _ => BackendKind::Demo,
        }
    }
}

/// The auth backend selected for this process.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum BackendKind {
    Supabase { url: String, anon_key: String },
    Demo,
}

impl BackendKind {
    pub fn is_demo(&self) -> bool {
        matches!(self, BackendKind::Demo)
    }

    pub fn build(&self) -> Arc<dyn AuthBackend> {
        match self {
            BackendKind::Supabase { url, anon_key } => {
                tracing::debug!(%url, "using hosted auth service");
                Arc::new(SupabaseAuth::new(url.clone(), anon_key.clone()))
            }
            BackendKind::Demo => {
                tracing::info!("no auth service configured, running in demo mode");
                Arc::new(DemoAuth::new())
            }
        }
    }
}
