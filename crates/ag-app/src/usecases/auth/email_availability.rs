//! Server-side uniqueness check for the registration email field.

use std::sync::Arc;

use anyhow::Context;
use async_trait::async_trait;
use tracing::debug;

use ag_core::ports::AuthApiPort;
use ag_core::validation::{AsyncFieldValidator, AsyncVerdict};

pub const EMAIL_TAKEN_MESSAGE: &str = "Email already registered";

pub struct EmailAvailabilityValidator {
    api: Arc<dyn AuthApiPort>,
}

impl EmailAvailabilityValidator {
    pub fn new(api: Arc<dyn AuthApiPort>) -> Self {
        Self { api }
    }
}

#[async_trait]
impl AsyncFieldValidator for EmailAvailabilityValidator {
    async fn validate(&self, value: &str) -> anyhow::Result<AsyncVerdict> {
        let exists = self
            .api
            .check_email_exists(value)
            .await
            .context("email availability check failed")?;
        debug!(exists, "email availability checked");

        Ok(if exists {
            AsyncVerdict::invalid(EMAIL_TAKEN_MESSAGE)
        } else {
            AsyncVerdict::valid()
        })
    }
}

#[cfg(test)]
mod tests {
    use ag_core::ports::AuthApiError;

    use super::*;
    use crate::usecases::auth::test_support::MockAuthApi;

    #[tokio::test]
    async fn existing_email_is_invalid() {
        let mut api = MockAuthApi::new();
        api.expect_check_email_exists()
            .withf(|email| email.to_string() == "taken@example.com")
            .returning(|_| Ok(true));

        let verdict = EmailAvailabilityValidator::new(Arc::new(api))
            .validate("taken@example.com")
            .await
            .unwrap();

        assert!(!verdict.valid);
        assert_eq!(verdict.error.as_deref(), Some(EMAIL_TAKEN_MESSAGE));
    }

    #[tokio::test]
    async fn free_email_is_valid() {
        let mut api = MockAuthApi::new();
        api.expect_check_email_exists().returning(|_| Ok(false));

        let verdict = EmailAvailabilityValidator::new(Arc::new(api))
            .validate("new@example.com")
            .await
            .unwrap();

        assert_eq!(verdict, AsyncVerdict::valid());
    }

    #[tokio::test]
    async fn api_failure_is_an_error() {
        let mut api = MockAuthApi::new();
        api.expect_check_email_exists()
            .returning(|_| Err(AuthApiError::Transport("timeout".into())));

        let result = EmailAvailabilityValidator::new(Arc::new(api))
            .validate("x@example.com")
            .await;

        assert!(result.is_err());
    }
}
