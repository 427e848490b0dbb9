use std::sync::Arc;

use tracing::info;

use ag_core::auth::RegisterRequest;
use ag_core::ports::AuthApiPort;

use super::AuthError;

pub struct RegisterUser {
    api: Arc<dyn AuthApiPort>,
}

impl RegisterUser {
    pub fn new(api: Arc<dyn AuthApiPort>) -> Self {
        Self { api }
    }

    pub async fn execute(&self, request: &RegisterRequest) -> Result<(), AuthError> {
        let outcome = self.api.register(request).await?;
        if !outcome.success {
            return Err(AuthError::Rejected(
                outcome
                    .message
                    .unwrap_or_else(|| "Registration failed".to_string()),
            ));
        }

        info!(role_id = request.role_id, "account registered");
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use ag_core::auth::{RegisterOutcome, DEFAULT_ROLE_ID};
    use ag_core::ports::AuthApiError;

    use super::*;
    use crate::usecases::auth::test_support::MockAuthApi;

    fn request() -> RegisterRequest {
        RegisterRequest {
            name: "Ana Núñez".into(),
            email: "ana@example.com".into(),
            password: "Abcdef1!".into(),
            role_id: DEFAULT_ROLE_ID,
        }
    }

    #[tokio::test]
    async fn forwards_request_and_accepts_success() {
        let mut api = MockAuthApi::new();
        api.expect_register()
            .withf(|request| request.name == "Ana Núñez" && request.role_id == 2)
            .times(1)
            .returning(|_| {
                Ok(RegisterOutcome {
                    success: true,
                    message: None,
                })
            });

        RegisterUser::new(Arc::new(api))
            .execute(&request())
            .await
            .unwrap();
    }

    #[tokio::test]
    async fn server_message_is_kept_on_rejection() {
        let mut api = MockAuthApi::new();
        api.expect_register().returning(|_| {
            Ok(RegisterOutcome {
                success: false,
                message: Some("Email already registered".into()),
            })
        });

        let err = RegisterUser::new(Arc::new(api))
            .execute(&request())
            .await
            .unwrap_err();

        assert_eq!(err.user_message(), "Email already registered");
    }

    #[tokio::test]
    async fn http_rejection_passes_through() {
        let mut api = MockAuthApi::new();
        api.expect_register().returning(|_| {
            Err(AuthApiError::Rejected {
                status: Some(400),
                message: "Invalid data".into(),
            })
        });

        let err = RegisterUser::new(Arc::new(api))
            .execute(&request())
            .await
            .unwrap_err();

        assert!(matches!(
            err,
            AuthError::Api(AuthApiError::Rejected { status: Some(400), .. })
        ));
        assert_eq!(err.user_message(), "Invalid data");
    }
}
