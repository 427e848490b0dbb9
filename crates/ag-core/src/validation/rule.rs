use std::sync::OnceLock;

use regex::Regex;

use super::FormValues;

/// Synchronous rule descriptor.
///
/// Every variant is evaluated against the field's string value. Format rules
/// (`Pattern`, `Email`) pass on an empty value so that emptiness is reported
/// only by `Required`.
#[derive(Debug, Clone)]
pub enum RuleKind {
    /// Value must be non-empty.
    Required,
    /// At least `n` characters.
    MinLength(usize),
    /// At most `n` characters.
    MaxLength(usize),
    /// Value must contain a match of the pattern.
    Pattern(Regex),
    /// Value must look like an email address.
    Email,
    /// Checkbox-style field that must be `"true"`.
    Accepted,
    /// Value must equal the current value of another field.
    EqualsField(String),
}

/// A rule descriptor together with the message reported when it fails.
#[derive(Debug, Clone)]
pub struct SyncRule {
    pub kind: RuleKind,
    pub message: String,
}

impl SyncRule {
    pub fn new(kind: RuleKind, message: impl Into<String>) -> Self {
        Self {
            kind,
            message: message.into(),
        }
    }

    /// Returns true when `value` satisfies the rule. `values` is the whole
    /// form snapshot, used by cross-field rules.
    pub fn check(&self, value: &str, values: &FormValues) -> bool {
        match &self.kind {
            RuleKind::Required => !value.is_empty(),
            RuleKind::MinLength(min) => value.chars().count() >= *min,
            RuleKind::MaxLength(max) => value.chars().count() <= *max,
            RuleKind::Pattern(regex) => value.is_empty() || regex.is_match(value),
            RuleKind::Email => value.is_empty() || email_regex().is_match(value),
            RuleKind::Accepted => value == "true",
            RuleKind::EqualsField(other) => {
                values.get(other).map(String::as_str).unwrap_or_default() == value
            }
        }
    }
}

fn email_regex() -> &'static Regex {
    static EMAIL: OnceLock<Regex> = OnceLock::new();
    EMAIL.get_or_init(|| {
        Regex::new(r"^[^\s@]+@[^\s@]+\.[^\s@]+$").expect("email pattern is a valid regex")
    })
}

/// Ordered synchronous rules for one field.
#[derive(Debug, Clone)]
pub struct FieldRule {
    name: String,
    rules: Vec<SyncRule>,
}

impl FieldRule {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            rules: Vec::new(),
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn rules(&self) -> &[SyncRule] {
        &self.rules
    }

    pub fn rule(mut self, rule: SyncRule) -> Self {
        self.rules.push(rule);
        self
    }

    pub fn required(self, message: impl Into<String>) -> Self {
        self.rule(SyncRule::new(RuleKind::Required, message))
    }

    pub fn min_length(self, min: usize, message: impl Into<String>) -> Self {
        self.rule(SyncRule::new(RuleKind::MinLength(min), message))
    }

    pub fn max_length(self, max: usize, message: impl Into<String>) -> Self {
        self.rule(SyncRule::new(RuleKind::MaxLength(max), message))
    }

    pub fn pattern(self, regex: Regex, message: impl Into<String>) -> Self {
        self.rule(SyncRule::new(RuleKind::Pattern(regex), message))
    }

    pub fn email(self, message: impl Into<String>) -> Self {
        self.rule(SyncRule::new(RuleKind::Email, message))
    }

    pub fn accepted(self, message: impl Into<String>) -> Self {
        self.rule(SyncRule::new(RuleKind::Accepted, message))
    }

    pub fn equals_field(self, other: impl Into<String>, message: impl Into<String>) -> Self {
        self.rule(SyncRule::new(RuleKind::EqualsField(other.into()), message))
    }

    /// Message of the first failing rule in declared order, if any.
    pub fn first_failure(&self, value: &str, values: &FormValues) -> Option<&str> {
        self.rules
            .iter()
            .find(|rule| !rule.check(value, values))
            .map(|rule| rule.message.as_str())
    }

    /// Names of the fields this rule set compares against.
    pub fn referenced_fields(&self) -> impl Iterator<Item = &str> {
        self.rules.iter().filter_map(|rule| match &rule.kind {
            RuleKind::EqualsField(other) => Some(other.as_str()),
            _ => None,
        })
    }
}
