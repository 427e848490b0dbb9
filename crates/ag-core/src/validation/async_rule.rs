use std::collections::BTreeMap;
use std::sync::Arc;

use async_trait::async_trait;

/// Result reported by an asynchronous validator.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AsyncVerdict {
    pub valid: bool,
    pub error: Option<String>,
}

impl AsyncVerdict {
    pub fn valid() -> Self {
        Self {
            valid: true,
            error: None,
        }
    }

    pub fn invalid(error: impl Into<String>) -> Self {
        Self {
            valid: false,
            error: Some(error.into()),
        }
    }
}

/// Validation rule whose outcome depends on an external call, such as a
/// remote uniqueness check.
///
/// An `Err` means the check itself could not be performed; the engine maps it
/// to a generic field error instead of propagating it.
#[async_trait]
pub trait AsyncFieldValidator: Send + Sync {
    async fn validate(&self, value: &str) -> anyhow::Result<AsyncVerdict>;
}

/// Async validators keyed by field name.
#[derive(Clone, Default)]
pub struct AsyncValidatorRegistry {
    validators: BTreeMap<String, Arc<dyn AsyncFieldValidator>>,
}

impl AsyncValidatorRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Registers `validator` for `field`, replacing any previous one.
    pub fn register(
        mut self,
        field: impl Into<String>,
        validator: Arc<dyn AsyncFieldValidator>,
    ) -> Self {
        self.validators.insert(field.into(), validator);
        self
    }

    pub fn get(&self, field: &str) -> Option<&Arc<dyn AsyncFieldValidator>> {
        self.validators.get(field)
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &Arc<dyn AsyncFieldValidator>)> {
        self.validators
            .iter()
            .map(|(field, validator)| (field.as_str(), validator))
    }

    pub fn is_empty(&self) -> bool {
        self.validators.is_empty()
    }
}

impl std::fmt::Debug for AsyncValidatorRegistry {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("AsyncValidatorRegistry")
            .field("fields", &self.validators.keys().collect::<Vec<_>>())
            .finish()
    }
}
