//! Built-in form schemas for the sign-up and sign-in screens.

use regex::Regex;

use super::{FieldRule, FormSchema, SchemaError};

pub const FIRST_NAME: &str = "firstName";
pub const LAST_NAME: &str = "lastName";
pub const EMAIL: &str = "email";
pub const PASSWORD: &str = "password";
pub const CONFIRM_PASSWORD: &str = "confirmPassword";
pub const ACCEPT_TERMS: &str = "acceptTerms";

/// Characters accepted by the "contains a symbol" password rule.
pub const PASSWORD_SYMBOLS: &str = "!@#$%^&*";

const NAME_PATTERN: &str = r"^[a-zA-ZáéíóúÁÉÍÓÚñÑ\s]+$";

fn person_name(field: &str, required_message: &str) -> Result<FieldRule, SchemaError> {
    Ok(FieldRule::new(field)
        .required(required_message)
        .min_length(2, "At least 2 characters")
        .max_length(50, "At most 50 characters")
        .pattern(Regex::new(NAME_PATTERN)?, "Letters only"))
}

fn strong_password(field: &str) -> Result<FieldRule, SchemaError> {
    Ok(FieldRule::new(field)
        .required("Password is required")
        .min_length(8, "At least 8 characters")
        .pattern(Regex::new("[A-Z]")?, "Needs an uppercase letter")
        .pattern(Regex::new("[a-z]")?, "Needs a lowercase letter")
        .pattern(Regex::new("[0-9]")?, "Needs a number")
        .pattern(
            Regex::new(&format!("[{}]", regex::escape(PASSWORD_SYMBOLS)))?,
            format!("Needs a symbol ({PASSWORD_SYMBOLS})"),
        ))
}

/// Schema of the registration form.
pub fn registration_schema() -> Result<FormSchema, SchemaError> {
    FormSchema::new(vec![
        person_name(FIRST_NAME, "First name is required")?,
        person_name(LAST_NAME, "Last name is required")?,
        FieldRule::new(EMAIL)
            .required("Email is required")
            .email("Invalid email"),
        strong_password(PASSWORD)?,
        FieldRule::new(CONFIRM_PASSWORD)
            .required("Confirm your password")
            .equals_field(PASSWORD, "Passwords do not match"),
        FieldRule::new(ACCEPT_TERMS).accepted("You must accept the terms"),
    ])
}

/// Schema of the sign-in form: both fields only need to be filled in.
pub fn login_schema() -> Result<FormSchema, SchemaError> {
    FormSchema::new(vec![
        FieldRule::new(EMAIL)
            .required("Please enter your email")
            .email("Invalid email"),
        FieldRule::new(PASSWORD).required("Please enter your password"),
    ])
}
