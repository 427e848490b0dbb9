//! HTTP adapter for [`AuthApiPort`].

use std::sync::Arc;
use std::time::Duration;

use async_trait::async_trait;
use reqwest::{Client, RequestBuilder, Response};
use serde::de::DeserializeOwned;
use tracing::{debug, warn};

use ag_core::auth::{LoginOutcome, RegisterOutcome, RegisterRequest, Role, UserProfile};
use ag_core::config::AppConfig;
use ag_core::ports::{AuthApiError, AuthApiPort, KeyValueStorePort, USER_TOKEN_KEY};

use super::dto::{
    CheckEmailBody, CheckEmailResponse, ErrorBody, LoginBody, LoginResponse, ProfileResponse,
    RegisterBody, RegisterResponse, RolesResponse,
};

/// JSON client of the auth API.
///
/// The stored bearer token, when present, is attached to every request.
pub struct HttpAuthApi {
    client: Client,
    base_url: String,
    storage: Arc<dyn KeyValueStorePort>,
}

impl HttpAuthApi {
    pub fn new(
        base_url: impl Into<String>,
        timeout: Duration,
        storage: Arc<dyn KeyValueStorePort>,
    ) -> anyhow::Result<Self> {
        let client = Client::builder()
            .timeout(timeout)
            .build()
            .map_err(|e| anyhow::anyhow!("Failed to build HTTP client: {}", e))?;

        Ok(Self {
            client,
            base_url: base_url.into().trim_end_matches('/').to_string(),
            storage,
        })
    }

    pub fn from_config(
        config: &AppConfig,
        storage: Arc<dyn KeyValueStorePort>,
    ) -> anyhow::Result<Self> {
        Self::new(
            config.api_base_url.clone(),
            Duration::from_secs(config.request_timeout_secs),
            storage,
        )
    }

    fn url(&self, path: &str) -> String {
        format!("{}{}", self.base_url, path)
    }

    async fn authorize(&self, request: RequestBuilder) -> RequestBuilder {
        match self.storage.get(USER_TOKEN_KEY).await {
            Ok(Some(token)) if !token.is_empty() => request.bearer_auth(token),
            Ok(_) => request,
            Err(err) => {
                warn!(error = %err, "failed to read token, sending request without it");
                request
            }
        }
    }

    async fn send<T: DeserializeOwned>(
        &self,
        path: &str,
        request: RequestBuilder,
    ) -> Result<T, AuthApiError> {
        let response = self
            .authorize(request)
            .await
            .send()
            .await
            .map_err(|e| AuthApiError::Transport(e.to_string()))?;

        let status = response.status();
        debug!(path, status = status.as_u16(), "auth api responded");

        if !status.is_success() {
            return Err(rejection(response).await);
        }

        response
            .json::<T>()
            .await
            .map_err(|e| AuthApiError::Decode(e.to_string()))
    }
}

async fn rejection(response: Response) -> AuthApiError {
    let status = response.status();
    let message = response
        .json::<ErrorBody>()
        .await
        .ok()
        .and_then(ErrorBody::into_message)
        .unwrap_or_else(|| format!("Request failed with status {}", status.as_u16()));

    AuthApiError::Rejected {
        status: Some(status.as_u16()),
        message,
    }
}

#[async_trait]
impl AuthApiPort for HttpAuthApi {
    async fn register(&self, request: &RegisterRequest) -> Result<RegisterOutcome, AuthApiError> {
        let builder = self
            .client
            .post(self.url("/registro"))
            .json(&RegisterBody::from(request));
        let response: RegisterResponse = self.send("/registro", builder).await?;
        Ok(response.into())
    }

    async fn login(&self, email: &str, password: &str) -> Result<LoginOutcome, AuthApiError> {
        let builder = self
            .client
            .post(self.url("/login"))
            .json(&LoginBody { email, password });
        let response: LoginResponse = self.send("/login", builder).await?;
        Ok(response.into())
    }

    async fn get_profile(&self) -> Result<UserProfile, AuthApiError> {
        let builder = self.client.get(self.url("/perfil"));
        let response: ProfileResponse = self.send("/perfil", builder).await?;
        response.into_profile()
    }

    async fn get_roles(&self) -> Result<Vec<Role>, AuthApiError> {
        let builder = self.client.get(self.url("/roles"));
        let response: RolesResponse = self.send("/roles", builder).await?;
        Ok(response.into())
    }

    async fn check_email_exists(&self, email: &str) -> Result<bool, AuthApiError> {
        let builder = self
            .client
            .post(self.url("/check-email"))
            .json(&CheckEmailBody { email });
        let response: CheckEmailResponse = self.send("/check-email", builder).await?;
        Ok(response.exists)
    }
}
