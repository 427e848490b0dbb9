//! Session store.
//!
//! This module coordinates the session state machine and its storage side
//! effects.

use std::sync::Arc;

use tokio::sync::Mutex;
use tracing::{debug, info, info_span, warn, Instrument};

use ag_core::ports::{KeyValueStorePort, HAS_SEEN_ONBOARDING_KEY, USER_KEY, USER_TOKEN_KEY};
use ag_core::session::{
    AuthToken, Screen, SessionAction, SessionEvent, SessionState, SessionStateMachine,
};

/// Owns the single active session.
///
/// Created once at startup from persisted facts and mutated only through
/// [`SessionStore::dispatch`] (or the named wrappers around it). Storage
/// failures are logged and never abort a transition.
pub struct SessionStore {
    state: Mutex<SessionState>,
    storage: Arc<dyn KeyValueStorePort>,
}

impl SessionStore {
    /// Read the onboarding flag and token from storage and pick the first
    /// screen. Unreadable values count as absent.
    pub async fn bootstrap(storage: Arc<dyn KeyValueStorePort>) -> Self {
        let has_seen_onboarding =
            read_or_absent(storage.as_ref(), HAS_SEEN_ONBOARDING_KEY).await.as_deref()
                == Some("true");
        let token = read_or_absent(storage.as_ref(), USER_TOKEN_KEY)
            .await
            .filter(|token| !token.is_empty())
            .map(AuthToken::new);

        let state = SessionState::bootstrap(has_seen_onboarding, token);
        info!(
            screen = ?state.screen,
            has_seen_onboarding,
            authenticated = state.is_authenticated(),
            "session bootstrapped"
        );

        Self::with_state(state, storage)
    }

    /// Store with a known state, skipping the storage read.
    pub fn with_state(state: SessionState, storage: Arc<dyn KeyValueStorePort>) -> Self {
        Self {
            state: Mutex::new(state),
            storage,
        }
    }

    pub async fn state(&self) -> SessionState {
        self.state.lock().await.clone()
    }

    pub async fn current_screen(&self) -> Screen {
        self.state.lock().await.screen
    }

    pub async fn token(&self) -> Option<AuthToken> {
        self.state.lock().await.token.clone()
    }

    /// Apply `event`; undefined transitions leave the state unchanged.
    pub async fn dispatch(&self, event: SessionEvent) -> SessionState {
        let span = info_span!("usecase.session_store.dispatch", event = ?event);
        async {
            // Held across the storage writes so dispatches never interleave.
            let mut state = self.state.lock().await;
            let from = state.screen;
            let (next, actions) = SessionStateMachine::transition(state.clone(), event);

            if next == *state {
                debug!(screen = ?from, "session event ignored");
                return next;
            }

            info!(from = ?from, to = ?next.screen, "session state transition");
            for action in actions {
                self.execute_action(action).await;
            }
            *state = next.clone();
            next
        }
        .instrument(span)
        .await
    }

    pub async fn complete_onboarding(&self) -> SessionState {
        self.dispatch(SessionEvent::OnboardingCompleted).await
    }

    pub async fn login_succeeded(&self, token: AuthToken) -> SessionState {
        self.dispatch(SessionEvent::LoginSucceeded { token }).await
    }

    pub async fn navigate_to_register(&self) -> SessionState {
        self.dispatch(SessionEvent::NavigateToRegister).await
    }

    pub async fn register_succeeded(&self) -> SessionState {
        self.dispatch(SessionEvent::RegisterSucceeded).await
    }

    pub async fn navigate_back(&self) -> SessionState {
        self.dispatch(SessionEvent::NavigateBack).await
    }

    pub async fn logout(&self) -> SessionState {
        self.dispatch(SessionEvent::Logout).await
    }

    async fn execute_action(&self, action: SessionAction) {
        debug!(?action, "session executing action");
        match action {
            SessionAction::PersistOnboardingSeen => {
                if let Err(err) = self.storage.set(HAS_SEEN_ONBOARDING_KEY, "true").await {
                    warn!(error = %err, "failed to persist onboarding flag");
                }
            }
            SessionAction::ClearPersistedSession => {
                for key in [USER_TOKEN_KEY, USER_KEY] {
                    if let Err(err) = self.storage.remove(key).await {
                        warn!(key, error = %err, "failed to clear persisted session");
                    }
                }
            }
        }
    }
}

async fn read_or_absent(storage: &dyn KeyValueStorePort, key: &str) -> Option<String> {
    match storage.get(key).await {
        Ok(value) => value,
        Err(err) => {
            warn!(key, error = %err, "storage read failed, treating value as absent");
            None
        }
    }
}
