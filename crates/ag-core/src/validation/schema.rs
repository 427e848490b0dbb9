use std::collections::HashSet;

use super::FieldRule;

#[derive(Debug, thiserror::Error)]
pub enum SchemaError {
    #[error("field `{field}` is declared more than once")]
    DuplicateField { field: String },
    #[error("field `{field}` references unknown field `{references}`")]
    UnknownFieldReference { field: String, references: String },
    #[error("invalid pattern: {0}")]
    InvalidPattern(#[from] regex::Error),
}

/// Ordered set of field rules describing one form.
///
/// Construction checks that field names are unique and that every
/// cross-field rule points at a field of the same schema.
#[derive(Debug, Clone)]
pub struct FormSchema {
    fields: Vec<FieldRule>,
}

impl FormSchema {
    pub fn new(fields: Vec<FieldRule>) -> Result<Self, SchemaError> {
        let mut names = HashSet::new();
        for field in &fields {
            if !names.insert(field.name()) {
                return Err(SchemaError::DuplicateField {
                    field: field.name().to_string(),
                });
            }
        }

        for field in &fields {
            if let Some(unknown) = field.referenced_fields().find(|r| !names.contains(r)) {
                return Err(SchemaError::UnknownFieldReference {
                    field: field.name().to_string(),
                    references: unknown.to_string(),
                });
            }
        }

        Ok(Self { fields })
    }

    pub fn field(&self, name: &str) -> Option<&FieldRule> {
        self.fields.iter().find(|field| field.name() == name)
    }

    /// Fields in declared order.
    pub fn fields(&self) -> &[FieldRule] {
        &self.fields
    }

    pub fn field_names(&self) -> impl Iterator<Item = &str> {
        self.fields.iter().map(FieldRule::name)
    }
}
