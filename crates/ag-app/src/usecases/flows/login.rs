use std::collections::BTreeMap;
use std::sync::Arc;
use std::time::Duration;

use tracing::{info, info_span, warn, Instrument};

use ag_core::ports::{AuthApiPort, KeyValueStorePort};
use ag_core::validation::schemas::{login_schema, EMAIL, PASSWORD};
use ag_core::validation::AsyncValidatorRegistry;

use super::{FlowError, FlowOutcome};
use crate::usecases::auth::LoginUser;
use crate::usecases::form::FormController;
use crate::usecases::session::SessionStore;

pub struct LoginFlow {
    login: LoginUser,
    session: Arc<SessionStore>,
    debounce: Duration,
}

impl LoginFlow {
    pub fn new(
        api: Arc<dyn AuthApiPort>,
        storage: Arc<dyn KeyValueStorePort>,
        session: Arc<SessionStore>,
        debounce: Duration,
    ) -> Self {
        Self {
            login: LoginUser::new(api, storage),
            session,
            debounce,
        }
    }

    /// Fresh login form with empty fields.
    pub fn form(&self) -> Result<FormController, FlowError> {
        Ok(FormController::new(
            Arc::new(login_schema()?),
            AsyncValidatorRegistry::new(),
            BTreeMap::new(),
            self.debounce,
        ))
    }

    pub async fn submit(&self, form: &FormController) -> FlowOutcome {
        let span = info_span!("usecase.login_flow.submit");
        async {
            if !form.submit().await {
                return FlowOutcome::Invalid;
            }

            let email = form.value(EMAIL).await;
            let password = form.value(PASSWORD).await;
            match self.login.execute(&email, &password).await {
                Ok(user) => {
                    self.session.login_succeeded(user.token).await;
                    info!("login flow completed");
                    FlowOutcome::Succeeded
                }
                Err(err) => {
                    warn!(error = %err, "login failed");
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
