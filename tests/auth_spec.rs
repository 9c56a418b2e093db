use std::sync::Arc;

use async_trait::async_trait;
use tokio::sync::watch;

use skucal::auth::{AuthBackend, AuthError, AuthState, DemoAuth, Gate, DEMO_EMAIL};
use skucal::models::{Session, SignUpOutcome, UserProfile};

/// Backend scripted for the gate's failure and confirmation paths.
struct ScriptedBackend {
    fail_sign_in: bool,
    fail_sign_out: bool,
    signup_pending: bool,
    changes: watch::Sender<Option<Session>>,
}

impl ScriptedBackend {
    fn new() -> Self {
        let (changes, _) = watch::channel(None);
        Self {
            fail_sign_in: false,
            fail_sign_out: false,
            signup_pending: false,
            changes,
        }
    }

    fn session(email: &str) -> Session {
        Session {
            access_token: "scripted-token".to_string(),
            user: UserProfile {
                id: "user-1".to_string(),
                email: email.to_string(),
                name: None,
            },
        }
    }
}

#[async_trait]
impl AuthBackend for ScriptedBackend {
    async fn current_session(&self) -> Result<Option<Session>, AuthError> {
        Ok(self.changes.borrow().clone())
    }

    async fn sign_up(
        &self,
        email: &str,
        _password: &str,
        _name: &str,
    ) -> Result<SignUpOutcome, AuthError> {
        if self.signup_pending {
            return Ok(SignUpOutcome::ConfirmationRequired);
        }
        let session = Self::session(email);
        self.changes.send_replace(Some(session.clone()));
        Ok(SignUpOutcome::Session(session))
    }

    async fn sign_in(&self, email: &str, _password: &str) -> Result<Session, AuthError> {
        if self.fail_sign_in {
            return Err(AuthError::Rejected("Invalid login credentials".to_string()));
        }
        let session = Self::session(email);
        self.changes.send_replace(Some(session.clone()));
        Ok(session)
    }

    async fn sign_out(&self) -> Result<(), AuthError> {
        if self.fail_sign_out {
            return Err(AuthError::Service("connection reset".to_string()));
        }
        self.changes.send_replace(None);
        Ok(())
    }

    fn subscribe(&self) -> watch::Receiver<Option<Session>> {
        self.changes.subscribe()
    }
}

mod resolve {
    use super::*;

    #[tokio::test]
    async fn starts_unknown_and_resolves_to_anonymous_without_a_session() {
        let mut gate = Gate::new(Arc::new(DemoAuth::new()));
        assert!(matches!(gate.state(), AuthState::Unknown));

        gate.resolve().await.expect("resolve succeeds");
        assert!(matches!(gate.state(), AuthState::Anonymous));
    }

    #[tokio::test]
    async fn resolves_to_authenticated_when_the_backend_holds_a_session() {
        let backend = Arc::new(DemoAuth::new());
        backend
            .sign_in("whoever@example.com", "pw")
            .await
            .expect("demo sign-in succeeds");

        let mut gate = Gate::new(backend);
        gate.resolve().await.expect("resolve succeeds");

        let session = gate.session().expect("authenticated");
        assert_eq!(session.user.email, DEMO_EMAIL);
    }

    #[tokio::test]
    async fn resolve_is_a_one_time_transition() {
        let mut gate = Gate::new(Arc::new(ScriptedBackend::new()));
        gate.resolve().await.expect("resolve succeeds");
        gate.sign_in("a@b.c", "pw").await.expect("sign-in succeeds");

        // A later resolve must not re-run the session check.
        gate.resolve().await.expect("no-op resolve succeeds");
        assert!(gate.session().is_some());
    }
}

mod sign_in {
    use super::*;

    #[tokio::test]
    async fn success_authenticates_the_gate() {
        let mut gate = Gate::new(Arc::new(ScriptedBackend::new()));
        gate.resolve().await.expect("resolve succeeds");

        gate.sign_in("a@b.c", "pw").await.expect("sign-in succeeds");
        assert_eq!(gate.session().expect("authenticated").user.email, "a@b.c");
    }

    #[tokio::test]
    async fn failure_surfaces_the_message_and_leaves_the_gate_anonymous() {
        let backend = ScriptedBackend {
            fail_sign_in: true,
            ..ScriptedBackend::new()
        };
        let mut gate = Gate::new(Arc::new(backend));
        gate.resolve().await.expect("resolve succeeds");

        let err = gate.sign_in("a@b.c", "bad").await.expect_err("rejected");
        assert_eq!(err.to_string(), "Invalid login credentials");
        assert!(matches!(gate.state(), AuthState::Anonymous));
    }
}

mod sign_up {
    use super::*;

    #[tokio::test]
    async fn immediate_session_authenticates_the_gate() {
        let mut gate = Gate::new(Arc::new(ScriptedBackend::new()));
        gate.resolve().await.expect("resolve succeeds");

        let outcome = gate
            .sign_up("new@b.c", "password", "Ada")
            .await
            .expect("sign-up succeeds");
        assert!(matches!(outcome, SignUpOutcome::Session(_)));
        assert!(gate.session().is_some());
    }

    #[tokio::test]
    async fn confirmation_required_leaves_the_gate_anonymous() {
        let backend = ScriptedBackend {
            signup_pending: true,
            ..ScriptedBackend::new()
        };
        let mut gate = Gate::new(Arc::new(backend));
        gate.resolve().await.expect("resolve succeeds");

        let outcome = gate
            .sign_up("new@b.c", "password", "Ada")
            .await
            .expect("sign-up accepted");
        assert!(matches!(outcome, SignUpOutcome::ConfirmationRequired));
        assert!(matches!(gate.state(), AuthState::Anonymous));
    }
}

mod sign_out {
    use super::*;

    #[tokio::test]
    async fn success_returns_the_gate_to_anonymous() {
        let mut gate = Gate::new(Arc::new(ScriptedBackend::new()));
        gate.resolve().await.expect("resolve succeeds");
        gate.sign_in("a@b.c", "pw").await.expect("sign-in succeeds");

        gate.sign_out().await.expect("sign-out succeeds");
        assert!(matches!(gate.state(), AuthState::Anonymous));
    }

    #[tokio::test]
    async fn failure_keeps_the_session() {
        let backend = ScriptedBackend {
            fail_sign_out: true,
            ..ScriptedBackend::new()
        };
        let mut gate = Gate::new(Arc::new(backend));
        gate.resolve().await.expect("resolve succeeds");
        gate.sign_in("a@b.c", "pw").await.expect("sign-in succeeds");

        let err = gate.sign_out().await.expect_err("transport failure");
        assert_eq!(err.to_string(), "auth service error: connection reset");
        assert!(gate.session().is_some());
    }
}

mod external_changes {
    use super::*;

    #[tokio::test]
    async fn an_external_sign_out_flips_the_gate_to_anonymous() {
        let backend = Arc::new(DemoAuth::new());
        let mut gate = Gate::new(backend.clone());
        gate.resolve().await.expect("resolve succeeds");
        gate.sign_in("a@b.c", "pw").await.expect("sign-in succeeds");

        // The service invalidates the session on its own (expiry).
        backend.sign_out().await.expect("backend sign-out succeeds");

        gate.absorb_external();
        assert!(matches!(gate.state(), AuthState::Anonymous));
    }

    #[tokio::test]
    async fn external_changes_are_ignored_while_unresolved() {
        let backend = Arc::new(DemoAuth::new());
        let mut gate = Gate::new(backend.clone());

        backend
            .sign_in("a@b.c", "pw")
            .await
            .expect("backend sign-in succeeds");

        gate.absorb_external();
        assert!(matches!(gate.state(), AuthState::Unknown));
    }
}

mod demo_backend {
    use super::*;

    #[tokio::test]
    async fn substitutes_the_bypass_identity_for_any_credentials() {
        let backend = DemoAuth::new();
        let session = backend
            .sign_in("whoever@example.com", "anything")
            .await
            .expect("demo sign-in succeeds");

        assert_eq!(session.user.email, DEMO_EMAIL);
        assert_eq!(session.user.id, "demo");
    }

    #[tokio::test]
    async fn sign_up_keeps_the_submitted_display_name() {
        let backend = DemoAuth::new();
        let outcome = backend
            .sign_up("whoever@example.com", "anything", "Ada")
            .await
            .expect("demo sign-up succeeds");

        match outcome {
            SignUpOutcome::Session(session) => {
                assert_eq!(session.user.name.as_deref(), Some("Ada"));
            }
            SignUpOutcome::ConfirmationRequired => panic!("demo never defers"),
        }
    }

    #[tokio::test]
    async fn sign_out_clears_the_session() {
        let backend = DemoAuth::new();
        backend
            .sign_in("whoever@example.com", "anything")
            .await
            .expect("demo sign-in succeeds");
        backend.sign_out().await.expect("demo sign-out succeeds");

        let session = backend
            .current_session()
            .await
            .expect("session check succeeds");
        assert!(session.is_none());
    }
}
