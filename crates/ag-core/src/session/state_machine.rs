//! Session state machine.
//!
//! Defines a pure state transition function for the authentication flow.

use serde::Serialize;

/// Opaque bearer token issued by the auth API.
#[derive(Clone, PartialEq, Eq)]
pub struct AuthToken(String);

impl AuthToken {
    pub fn new(token: impl Into<String>) -> Self {
        Self(token.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl std::fmt::Debug for AuthToken {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str("AuthToken(***)")
    }
}

/// Screen shown to the user.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Screen {
    /// First-run introduction, shown once per installation.
    Onboarding,
    Login,
    Register,
    /// Signed-in area; requires a token.
    Home,
}

/// Events that drive the session flow.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SessionEvent {
    /// User finished the onboarding screens.
    OnboardingCompleted,
    /// Login request succeeded.
    LoginSucceeded { token: AuthToken },
    /// User asked to create an account.
    NavigateToRegister,
    /// Registration request succeeded.
    RegisterSucceeded,
    /// User left the registration screen.
    NavigateBack,
    /// User signed out.
    Logout,
}

/// Side-effects produced by state transitions.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SessionAction {
    /// Remember that onboarding has been seen.
    PersistOnboardingSeen,
    /// Drop the stored token and user.
    ClearPersistedSession,
}

/// Process-wide session state.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SessionState {
    pub token: Option<AuthToken>,
    pub has_seen_onboarding: bool,
    pub screen: Screen,
}

impl SessionState {
    /// Initial state decided from persisted facts at startup.
    pub fn bootstrap(has_seen_onboarding: bool, token: Option<AuthToken>) -> Self {
        let screen = match (has_seen_onboarding, &token) {
            (false, _) => Screen::Onboarding,
            (true, Some(_)) => Screen::Home,
            (true, None) => Screen::Login,
        };
        Self {
            token,
            has_seen_onboarding,
            screen,
        }
    }

    pub fn is_authenticated(&self) -> bool {
        self.token.is_some()
    }
}

/// Pure session state machine.
///
/// Undefined (state, event) pairs leave the state untouched.
pub struct SessionStateMachine;

impl SessionStateMachine {
    pub fn transition(
        state: SessionState,
        event: SessionEvent,
    ) -> (SessionState, Vec<SessionAction>) {
        match (state.screen, event) {
            (Screen::Onboarding, SessionEvent::OnboardingCompleted) => (
                SessionState {
                    has_seen_onboarding: true,
                    screen: Screen::Register,
                    ..state
                },
                vec![SessionAction::PersistOnboardingSeen],
            ),
            (Screen::Login, SessionEvent::LoginSucceeded { token }) => (
                SessionState {
                    token: Some(token),
                    screen: Screen::Home,
                    ..state
                },
                Vec::new(),
            ),
            (Screen::Login, SessionEvent::NavigateToRegister) => (
                SessionState {
                    screen: Screen::Register,
                    ..state
                },
                Vec::new(),
            ),
            (Screen::Register, SessionEvent::RegisterSucceeded)
            | (Screen::Register, SessionEvent::NavigateBack) => (
                SessionState {
                    screen: Screen::Login,
                    ..state
                },
                Vec::new(),
            ),
            (Screen::Home, SessionEvent::Logout) => (
                SessionState {
                    token: None,
                    screen: Screen::Login,
                    ..state
                },
                vec![SessionAction::ClearPersistedSession],
            ),
            _ => (state, Vec::new()),
        }
    }
}
