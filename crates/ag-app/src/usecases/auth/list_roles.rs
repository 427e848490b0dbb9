use std::sync::Arc;

use ag_core::auth::Role;
use ag_core::ports::AuthApiPort;

use super::AuthError;

pub struct ListRoles {
    api: Arc<dyn AuthApiPort>,
}

impl ListRoles {
    pub fn new(api: Arc<dyn AuthApiPort>) -> Self {
        Self { api }
    }

    pub async fn execute(&self) -> Result<Vec<Role>, AuthError> {
        Ok(self.api.get_roles().await?)
    }
}
