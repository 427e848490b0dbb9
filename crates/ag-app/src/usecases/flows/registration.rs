use std::collections::BTreeMap;
use std::sync::Arc;
use std::time::Duration;

use tracing::{info, info_span, warn, Instrument};

use ag_core::auth::{RegisterRequest, DEFAULT_ROLE_ID};
use ag_core::password::{score, PasswordStrength};
use ag_core::ports::AuthApiPort;
use ag_core::validation::schemas::{
    registration_schema, ACCEPT_TERMS, EMAIL, FIRST_NAME, LAST_NAME, PASSWORD,
};
use ag_core::validation::AsyncValidatorRegistry;

use super::{FlowError, FlowOutcome};
use crate::usecases::auth::{EmailAvailabilityValidator, RegisterUser};
use crate::usecases::form::FormController;
use crate::usecases::session::SessionStore;

/// Sign-up screen: the email field is checked against the server on blur
/// and on submit. A successful registration sends the user to login.
pub struct RegistrationFlow {
    api: Arc<dyn AuthApiPort>,
    register: RegisterUser,
    session: Arc<SessionStore>,
    debounce: Duration,
}

impl RegistrationFlow {
    pub fn new(api: Arc<dyn AuthApiPort>, session: Arc<SessionStore>, debounce: Duration) -> Self {
        Self {
            register: RegisterUser::new(api.clone()),
            api,
            session,
            debounce,
        }
    }

    pub fn form(&self) -> Result<FormController, FlowError> {
        let validators = AsyncValidatorRegistry::new().register(
            EMAIL,
            Arc::new(EmailAvailabilityValidator::new(self.api.clone())),
        );
        let initial_values = BTreeMap::from([(ACCEPT_TERMS.to_string(), "false".to_string())]);

        Ok(FormController::new(
            Arc::new(registration_schema()?),
            validators,
            initial_values,
            self.debounce,
        ))
    }

    /// Strength meter for the password currently typed into `form`.
    pub async fn password_strength(&self, form: &FormController) -> PasswordStrength {
        score(&form.value(PASSWORD).await)
    }

    pub async fn submit(&self, form: &FormController) -> FlowOutcome {
        let span = info_span!("usecase.registration_flow.submit");
        async {
            if !form.submit().await {
                return FlowOutcome::Invalid;
            }

            let values = form.values().await;
            let field = |name: &str| values.get(name).cloned().unwrap_or_default();
            let request = RegisterRequest {
                name: format!("{} {}", field(FIRST_NAME), field(LAST_NAME)),
                email: field(EMAIL),
                password: field(PASSWORD),
                role_id: DEFAULT_ROLE_ID,
            };

            match self.register.execute(&request).await {
                Ok(()) => {
                    self.session.register_succeeded().await;
                    info!("registration flow completed");
                    FlowOutcome::Succeeded
                }
                Err(err) => {
                    warn!(error = %err, "registration failed");
                    FlowOutcome::Failed {
                        message: err.user_message(),
                    }
                }
            }
        }
        .instrument(span)
        .await
    }
}
