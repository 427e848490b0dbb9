//! Wire format of the auth API.
//!
//! The server speaks Spanish field names; these types translate them to and
//! from the domain models in `ag_core::auth`.

use serde::{Deserialize, Serialize};

use ag_core::auth::{LoginOutcome, RegisterOutcome, RegisterRequest, Role, UserProfile};
use ag_core::ports::AuthApiError;

#[derive(Debug, Serialize)]
pub(super) struct RegisterBody<'a> {
    #[serde(rename = "nombre")]
    pub name: &'a str,
    pub email: &'a str,
    #[serde(rename = "contraseña")]
    pub password: &'a str,
    #[serde(rename = "id_rol")]
    pub role_id: u32,
}

impl<'a> From<&'a RegisterRequest> for RegisterBody<'a> {
    fn from(request: &'a RegisterRequest) -> Self {
        Self {
            name: &request.name,
            email: &request.email,
            password: &request.password,
            role_id: request.role_id,
        }
    }
}

#[derive(Debug, Serialize)]
pub(super) struct LoginBody<'a> {
    pub email: &'a str,
    #[serde(rename = "contraseña")]
    pub password: &'a str,
}

#[derive(Debug, Serialize)]
pub(super) struct CheckEmailBody<'a> {
    pub email: &'a str,
}

#[derive(Debug, Default, Deserialize)]
pub(super) struct UserDto {
    #[serde(default, rename = "nombre")]
    pub name: String,
    #[serde(default)]
    pub email: String,
    #[serde(default, rename = "rol")]
    pub role: String,
    #[serde(default, rename = "activo")]
    pub active: bool,
}

impl From<UserDto> for UserProfile {
    fn from(dto: UserDto) -> Self {
        Self {
            name: dto.name,
            email: dto.email,
            role: dto.role,
            active: dto.active,
        }
    }
}

#[derive(Debug, Deserialize)]
pub(super) struct RegisterResponse {
    #[serde(default)]
    pub success: Option<bool>,
    #[serde(default)]
    pub message: Option<String>,
}

impl From<RegisterResponse> for RegisterOutcome {
    fn from(response: RegisterResponse) -> Self {
        Self {
            // a 2xx without an explicit flag counts as success
            success: response.success.unwrap_or(true),
            message: response.message,
        }
    }
}

#[derive(Debug, Deserialize)]
pub(super) struct LoginResponse {
    #[serde(default)]
    pub success: Option<bool>,
    #[serde(default)]
    pub token: Option<String>,
    #[serde(default, rename = "usuario")]
    pub user: Option<UserDto>,
    #[serde(default)]
    pub message: Option<String>,
}

impl From<LoginResponse> for LoginOutcome {
    fn from(response: LoginResponse) -> Self {
        let has_token = response.token.as_deref().is_some_and(|t| !t.is_empty());
        Self {
            success: response.success.unwrap_or(has_token),
            token: response.token,
            user: response.user.map(UserProfile::from),
            message: response.message,
        }
    }
}

/// `/perfil` body. The user is only trusted when `success` is not `false`.
#[derive(Debug, Deserialize)]
pub(super) struct ProfileResponse {
    #[serde(default)]
    pub success: Option<bool>,
    #[serde(default, rename = "usuario")]
    pub user: Option<UserDto>,
    #[serde(default)]
    pub message: Option<String>,
}

impl ProfileResponse {
    pub fn into_profile(self) -> Result<UserProfile, AuthApiError> {
        match (self.success, self.user) {
            (Some(false), _) | (_, None) => Err(AuthApiError::Rejected {
                status: None,
                message: self
                    .message
                    .unwrap_or_else(|| "Profile unavailable".to_string()),
            }),
            (_, Some(user)) => Ok(user.into()),
        }
    }
}

#[derive(Debug, Deserialize)]
pub(super) struct RoleDto {
    #[serde(rename = "id_rol", alias = "id")]
    pub id: u32,
    #[serde(rename = "nombre", alias = "name")]
    pub name: String,
}

#[derive(Debug, Deserialize)]
#[serde(untagged)]
pub(super) enum RolesResponse {
    List(Vec<RoleDto>),
    Wrapped { roles: Vec<RoleDto> },
}

impl From<RolesResponse> for Vec<Role> {
    fn from(response: RolesResponse) -> Self {
        let (RolesResponse::List(roles) | RolesResponse::Wrapped { roles }) = response;
        roles
            .into_iter()
            .map(|dto| Role {
                id: dto.id,
                name: dto.name,
            })
            .collect()
    }
}

#[derive(Debug, Deserialize)]
pub(super) struct CheckEmailResponse {
    #[serde(default)]
    pub exists: bool,
}

/// Error body of a non-2xx response.
#[derive(Debug, Default, Deserialize)]
pub(super) struct ErrorBody {
    #[serde(default)]
    pub message: Option<String>,
    #[serde(default)]
    pub error: Option<String>,
}

impl ErrorBody {
    pub fn into_message(self) -> Option<String> {
        self.message.or(self.error)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn register_body_uses_server_field_names() {
        let request = RegisterRequest {
            name: "Ana Núñez".into(),
            email: "ana@example.com".into(),
            password: "Abcdef1!".into(),
            role_id: 2,
        };

        let json = serde_json::to_value(RegisterBody::from(&request)).unwrap();

        assert_eq!(
            json,
            serde_json::json!({
                "nombre": "Ana Núñez",
                "email": "ana@example.com",
                "contraseña": "Abcdef1!",
                "id_rol": 2
            })
        );
    }

    #[test]
    fn login_response_without_flag_succeeds_when_token_present() {
        let response: LoginResponse = serde_json::from_str(
            r#"{"token":"jwt","usuario":{"nombre":"Ana","email":"a@x.io","rol":"Admin","activo":true}}"#,
        )
        .unwrap();

        let outcome = LoginOutcome::from(response);

        assert!(outcome.success);
        assert_eq!(outcome.user.unwrap().role, "Admin");
    }

    #[test]
    fn login_response_without_token_fails() {
        let response: LoginResponse =
            serde_json::from_str(r#"{"message":"Credenciales inválidas"}"#).unwrap();
        let outcome = LoginOutcome::from(response);
        assert!(!outcome.success);
        assert_eq!(outcome.message.as_deref(), Some("Credenciales inválidas"));
    }

    #[test]
    fn profile_reads_wrapped_user() {
        let response: ProfileResponse = serde_json::from_str(
            r#"{"success":true,"usuario":{"nombre":"Ana","rol":"Usuario","activo":true}}"#,
        )
        .unwrap();

        let profile = response.into_profile().unwrap();
        assert_eq!(profile.name, "Ana");
        assert_eq!(profile.role, "Usuario");
    }

    #[test]
    fn unsuccessful_profile_body_is_rejected() {
        let response: ProfileResponse =
            serde_json::from_str(r#"{"success":false,"message":"Token inválido"}"#).unwrap();

        assert_eq!(
            response.into_profile().unwrap_err(),
            AuthApiError::Rejected {
                status: None,
                message: "Token inválido".into()
            }
        );
    }

    #[test]
    fn profile_body_without_user_is_rejected() {
        let response: ProfileResponse =
            serde_json::from_str(r#"{"nombre":"Ana","rol":"Admin"}"#).unwrap();

        assert!(matches!(
            response.into_profile(),
            Err(AuthApiError::Rejected { .. })
        ));
    }

    #[test]
    fn roles_accept_both_id_spellings() {
        let response: RolesResponse =
            serde_json::from_str(r#"[{"id_rol":1,"nombre":"Admin"},{"id":2,"name":"Usuario"}]"#)
                .unwrap();
        let roles = Vec::<Role>::from(response);
        assert_eq!(roles[1], Role { id: 2, name: "Usuario".into() });
    }
}
