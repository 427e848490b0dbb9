use std::collections::BTreeMap;

use tracing::{debug, warn};

use super::{AsyncFieldValidator, AsyncValidatorRegistry, FormSchema, FormValues};

/// Message used when an async validator fails to run or rejects without a reason.
pub const ASYNC_VALIDATION_FAILED: &str = "Could not validate this field";

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FieldValidation {
    pub is_valid: bool,
    pub error: Option<String>,
}

impl FieldValidation {
    pub fn valid() -> Self {
        Self {
            is_valid: true,
            error: None,
        }
    }

    pub fn invalid(error: impl Into<String>) -> Self {
        Self {
            is_valid: false,
            error: Some(error.into()),
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FormValidation {
    pub is_valid: bool,
    pub errors: BTreeMap<String, String>,
}

/// Validates a single field.
///
/// Sync rules run in declared order and stop at the first failure; the async
/// validator registered for the field runs only when all of them pass.
/// `values` is the form snapshot used by cross-field rules.
pub async fn validate_field(
    field: &str,
    value: &str,
    values: &FormValues,
    schema: &FormSchema,
    validators: &AsyncValidatorRegistry,
) -> FieldValidation {
    if let Some(message) = schema
        .field(field)
        .and_then(|rule| rule.first_failure(value, values))
    {
        return FieldValidation::invalid(message);
    }

    if let Some(validator) = validators.get(field) {
        if let Some(message) = run_async(field, validator.as_ref(), value).await {
            return FieldValidation::invalid(message);
        }
    }

    FieldValidation::valid()
}

/// Validates every field of the form.
///
/// Each field reports at most one error (its first failing sync rule). Async
/// validators then run for fields with a non-empty value that passed their
/// sync rules.
pub async fn validate_form(
    values: &FormValues,
    schema: &FormSchema,
    validators: &AsyncValidatorRegistry,
) -> FormValidation {
    let mut errors = BTreeMap::new();

    for rule in schema.fields() {
        let value = values.get(rule.name()).map(String::as_str).unwrap_or_default();
        if let Some(message) = rule.first_failure(value, values) {
            errors.insert(rule.name().to_string(), message.to_string());
        }
    }

    for (field, validator) in validators.iter() {
        if errors.contains_key(field) {
            continue;
        }
        let Some(value) = values.get(field).filter(|value| !value.is_empty()) else {
            continue;
        };
        if let Some(message) = run_async(field, validator.as_ref(), value).await {
            errors.insert(field.to_string(), message);
        }
    }

    debug!(error_count = errors.len(), "form validated");
    FormValidation {
        is_valid: errors.is_empty(),
        errors,
    }
}

async fn run_async(field: &str, validator: &dyn AsyncFieldValidator, value: &str) -> Option<String> {
    match validator.validate(value).await {
        Ok(verdict) if verdict.valid => None,
        Ok(verdict) => Some(
            verdict
                .error
                .unwrap_or_else(|| ASYNC_VALIDATION_FAILED.to_string()),
        ),
        Err(err) => {
            warn!(field, error = %err, "async validator failed");
            Some(ASYNC_VALIDATION_FAILED.to_string())
        }
    }
}
