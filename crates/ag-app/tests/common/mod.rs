#![allow(dead_code)]

use std::sync::Mutex;

use async_trait::async_trait;

use ag_core::auth::{LoginOutcome, RegisterOutcome, RegisterRequest, Role, UserProfile};
use ag_core::ports::{AuthApiError, AuthApiPort};

/// Auth API fake with canned answers that records what it was asked.
pub struct FakeAuthApi {
    pub taken_emails: Vec<String>,
    pub login_result: Result<LoginOutcome, AuthApiError>,
    pub register_result: Result<RegisterOutcome, AuthApiError>,
    pub registered: Mutex<Vec<RegisterRequest>>,
    pub logins: Mutex<Vec<(String, String)>>,
    pub email_checks: Mutex<Vec<String>>,
}

impl Default for FakeAuthApi {
    fn default() -> Self {
        Self {
            taken_emails: Vec::new(),
            login_result: Ok(LoginOutcome {
                success: true,
                token: Some("jwt-token".into()),
                user: Some(UserProfile {
                    name: "Ana Núñez".into(),
                    email: "ana@example.com".into(),
                    role: "Usuario".into(),
                    active: true,
                }),
                message: None,
            }),
            register_result: Ok(RegisterOutcome {
                success: true,
                message: None,
            }),
            registered: Mutex::new(Vec::new()),
            logins: Mutex::new(Vec::new()),
            email_checks: Mutex::new(Vec::new()),
        }
    }
}

#[async_trait]
impl AuthApiPort for FakeAuthApi {
    async fn register(&self, request: &RegisterRequest) -> Result<RegisterOutcome, AuthApiError> {
        self.registered.lock().unwrap().push(request.clone());
        self.register_result.clone()
    }

    async fn login(&self, email: &str, password: &str) -> Result<LoginOutcome, AuthApiError> {
        self.logins
            .lock()
            .unwrap()
            .push((email.to_string(), password.to_string()));
        self.login_result.clone()
    }

    async fn get_profile(&self) -> Result<UserProfile, AuthApiError> {
        Err(AuthApiError::Rejected {
            status: Some(401),
            message: "Token required".into(),
        })
    }

    async fn get_roles(&self) -> Result<Vec<Role>, AuthApiError> {
        Ok(Vec::new())
    }

    async fn check_email_exists(&self, email: &str) -> Result<bool, AuthApiError> {
        self.email_checks.lock().unwrap().push(email.to_string());
        Ok(self.taken_emails.iter().any(|taken| taken == email))
    }
}
