//! Form state model.
//!
//! Pure data holders for a form's fields. Orchestration (debouncing, async
//! validation, submit) lives in the application layer.

use std::collections::BTreeMap;

use serde::Serialize;

use crate::validation::FormValues;

/// State of one field.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FieldState {
    pub value: String,
    pub error: Option<String>,
    pub touched: bool,
    pub is_validating: bool,
}

impl FieldState {
    pub fn new(value: impl Into<String>) -> Self {
        Self {
            value: value.into(),
            ..Default::default()
        }
    }

    /// Derived, never stored.
    pub fn is_valid(&self) -> bool {
        self.touched && self.error.is_none() && !self.is_validating
    }

    /// Presentation view; the error stays hidden until the field is touched.
    pub fn view(&self) -> FieldView {
        FieldView {
            value: self.value.clone(),
            error: if self.touched { self.error.clone() } else { None },
            touched: self.touched,
            is_validating: self.is_validating,
            is_valid: self.is_valid(),
        }
    }
}

/// What the presentation layer sees for one field.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct FieldView {
    pub value: String,
    pub error: Option<String>,
    pub touched: bool,
    pub is_validating: bool,
    pub is_valid: bool,
}

/// State of a whole form.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FormState {
    fields: BTreeMap<String, FieldState>,
    submitting: bool,
}

impl FormState {
    pub fn new(initial_values: &FormValues) -> Self {
        Self {
            fields: initial_values
                .iter()
                .map(|(name, value)| (name.clone(), FieldState::new(value.clone())))
                .collect(),
            submitting: false,
        }
    }

    pub fn field(&self, name: &str) -> Option<&FieldState> {
        self.fields.get(name)
    }

    /// Field state, created empty on first access.
    pub fn field_mut(&mut self, name: &str) -> &mut FieldState {
        self.fields.entry(name.to_string()).or_default()
    }

    pub fn values(&self) -> FormValues {
        self.fields
            .iter()
            .map(|(name, field)| (name.clone(), field.value.clone()))
            .collect()
    }

    pub fn touch_all(&mut self) {
        for field in self.fields.values_mut() {
            field.touched = true;
        }
    }

    /// Replaces every field's error with the entry of `errors` (or none).
    pub fn replace_errors(&mut self, errors: &BTreeMap<String, String>) {
        for (name, field) in self.fields.iter_mut() {
            field.error = errors.get(name).cloned();
        }
        for (name, message) in errors {
            self.field_mut(name).error = Some(message.clone());
        }
    }

    pub fn errors(&self) -> BTreeMap<String, String> {
        self.fields
            .iter()
            .filter_map(|(name, field)| field.error.clone().map(|error| (name.clone(), error)))
            .collect()
    }

    pub fn view(&self, name: &str) -> FieldView {
        self.field(name).map(FieldState::view).unwrap_or_default()
    }

    pub fn is_submitting(&self) -> bool {
        self.submitting
    }

    pub fn set_submitting(&mut self, submitting: bool) {
        self.submitting = submitting;
    }
}
