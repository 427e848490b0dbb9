//! Validation schema engine.
//!
//! Schemas are data: each field owns an ordered list of tagged rule
//! descriptors ([`RuleKind`]) interpreted by a small evaluator, plus an
//! optional asynchronous validator registered by field name.

use std::collections::BTreeMap;

mod async_rule;
mod engine;
mod rule;
mod schema;
pub mod schemas;

pub use async_rule::{AsyncFieldValidator, AsyncValidatorRegistry, AsyncVerdict};
pub use engine::{
    validate_field, validate_form, FieldValidation, FormValidation, ASYNC_VALIDATION_FAILED,
};
pub use rule::{FieldRule, RuleKind, SyncRule};
pub use schema::{FormSchema, SchemaError};

/// Current value of every field in a form, keyed by field name.
pub type FormValues = BTreeMap<String, String>;
