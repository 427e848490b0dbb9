//! Password strength scoring.
//!
//! Five independent predicates; the level is derived from how many hold.

use serde::Serialize;

use crate::validation::schemas::PASSWORD_SYMBOLS;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub enum PasswordRule {
    MinLength,
    HasUpperCase,
    HasLowerCase,
    HasNumber,
    HasSpecialChar,
}

impl PasswordRule {
    pub const ALL: [PasswordRule; 5] = [
        PasswordRule::MinLength,
        PasswordRule::HasUpperCase,
        PasswordRule::HasLowerCase,
        PasswordRule::HasNumber,
        PasswordRule::HasSpecialChar,
    ];

    pub fn id(self) -> &'static str {
        match self {
            PasswordRule::MinLength => "minLength",
            PasswordRule::HasUpperCase => "hasUpperCase",
            PasswordRule::HasLowerCase => "hasLowerCase",
            PasswordRule::HasNumber => "hasNumber",
            PasswordRule::HasSpecialChar => "hasSpecialChar",
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            PasswordRule::MinLength => "At least 8 characters",
            PasswordRule::HasUpperCase => "One uppercase letter",
            PasswordRule::HasLowerCase => "One lowercase letter",
            PasswordRule::HasNumber => "One number",
            PasswordRule::HasSpecialChar => "One symbol (!@#$%^&*)",
        }
    }

    pub fn test(self, password: &str) -> bool {
        match self {
            PasswordRule::MinLength => password.chars().count() >= 8,
            PasswordRule::HasUpperCase => password.chars().any(|c| c.is_ascii_uppercase()),
            PasswordRule::HasLowerCase => password.chars().any(|c| c.is_ascii_lowercase()),
            PasswordRule::HasNumber => password.chars().any(|c| c.is_ascii_digit()),
            PasswordRule::HasSpecialChar => password.chars().any(|c| PASSWORD_SYMBOLS.contains(c)),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize)]
#[serde(rename_all = "kebab-case")]
pub enum StrengthLevel {
    VeryWeak,
    Weak,
    Acceptable,
    Good,
    Excellent,
}

impl StrengthLevel {
    pub fn from_met_count(count: usize) -> Self {
        match count {
            0 => StrengthLevel::VeryWeak,
            1 => StrengthLevel::Weak,
            2 => StrengthLevel::Acceptable,
            3 => StrengthLevel::Good,
            _ => StrengthLevel::Excellent,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct RuleEvaluation {
    pub id: &'static str,
    pub label: &'static str,
    pub met: bool,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct PasswordStrength {
    pub rules: Vec<RuleEvaluation>,
    pub level: StrengthLevel,
}

impl PasswordStrength {
    pub fn met_count(&self) -> usize {
        self.rules.iter().filter(|rule| rule.met).count()
    }

    /// Fraction of rules met, in `0.0..=1.0`.
    pub fn progress(&self) -> f32 {
        self.met_count() as f32 / PasswordRule::ALL.len() as f32
    }
}

pub fn score(password: &str) -> PasswordStrength {
    let rules: Vec<RuleEvaluation> = PasswordRule::ALL
        .iter()
        .map(|rule| RuleEvaluation {
            id: rule.id(),
            label: rule.label(),
            met: rule.test(password),
        })
        .collect();
    let met = rules.iter().filter(|rule| rule.met).count();

    PasswordStrength {
        rules,
        level: StrengthLevel::from_met_count(met),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_password_is_very_weak() {
        let result = score("");
        assert_eq!(result.level, StrengthLevel::VeryWeak);
        assert_eq!(result.met_count(), 0);
        assert_eq!(result.rules.len(), 5);
    }

    #[test]
    fn levels_follow_met_count() {
        assert_eq!(score("a").level, StrengthLevel::Weak);
        assert_eq!(score("aA").level, StrengthLevel::Acceptable);
        assert_eq!(score("aA1").level, StrengthLevel::Good);
        assert_eq!(score("aA1!").level, StrengthLevel::Excellent);
        assert_eq!(score("Abcdef1!").level, StrengthLevel::Excellent);
        assert_eq!(score("Abcdef1!").met_count(), 5);
        assert_eq!(score("Abcdef1!").progress(), 1.0);
    }

    #[test]
    fn symbols_outside_the_set_do_not_count() {
        let result = score("abc-def_");
        let special = result.rules.iter().find(|r| r.id == "hasSpecialChar").unwrap();
        assert!(!special.met);
    }

    #[test]
    fn level_is_monotonic_in_met_count() {
        let levels: Vec<_> = (0..=5).map(StrengthLevel::from_met_count).collect();
        assert!(levels.windows(2).all(|pair| pair[0] <= pair[1]));
    }

    #[test]
    fn count_does_not_depend_on_evaluation_order() {
        for password in ["", "abc", "ABCdef12", "Abcdef1!", "!!!!!!!!", "ñandú"] {
            let forward = PasswordRule::ALL.iter().filter(|r| r.test(password)).count();
            let backward = PasswordRule::ALL.iter().rev().filter(|r| r.test(password)).count();
            assert_eq!(forward, backward);
            assert_eq!(score(password).met_count(), forward);
        }
    }
}
