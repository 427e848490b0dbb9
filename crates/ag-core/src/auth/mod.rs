//! Auth API domain models.

use serde::{Deserialize, Serialize};

/// Role id assigned to self-registered accounts.
pub const DEFAULT_ROLE_ID: u32 = 2;

/// Role name that unlocks the administrator panel.
pub const ADMIN_ROLE: &str = "Admin";
/// Role name of ordinary accounts.
pub const USER_ROLE: &str = "Usuario";

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct RegisterRequest {
    pub name: String,
    pub email: String,
    pub password: String,
    pub role_id: u32,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RegisterOutcome {
    pub success: bool,
    pub message: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LoginOutcome {
    pub success: bool,
    pub token: Option<String>,
    pub user: Option<UserProfile>,
    pub message: Option<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct UserProfile {
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub email: String,
    #[serde(default)]
    pub role: String,
    #[serde(default)]
    pub active: bool,
}

/// Role-specific section of the home screen.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum HomePanel {
    Admin,
    User,
    None,
}

impl UserProfile {
    pub fn home_panel(&self) -> HomePanel {
        match self.role.as_str() {
            ADMIN_ROLE => HomePanel::Admin,
            USER_ROLE => HomePanel::User,
            _ => HomePanel::None,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Role {
    pub id: u32,
    pub name: String,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn home_panel_follows_role_name() {
        let mut profile = UserProfile {
            role: ADMIN_ROLE.into(),
            ..Default::default()
        };
        assert_eq!(profile.home_panel(), HomePanel::Admin);

        profile.role = USER_ROLE.into();
        assert_eq!(profile.home_panel(), HomePanel::User);

        profile.role = "Guest".into();
        assert_eq!(profile.home_panel(), HomePanel::None);
    }

    #[test]
    fn profile_deserializes_with_missing_fields() {
        let profile: UserProfile = serde_json::from_str(r#"{"name":"Ana"}"#).unwrap();
        assert_eq!(profile.name, "Ana");
        assert!(!profile.active);
    }
}
