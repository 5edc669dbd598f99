use std::fmt;
use std::sync::Arc;

use regex::Regex;
use validator::ValidateEmail;

/// Custom check over a field's text.
pub type Predicate = Arc<dyn Fn(&str) -> bool + Send + Sync + 'static>;

#[derive(Clone)]
pub enum Rule {
    Required,
    MinLen(usize),
    MaxLen(usize),
    Matches(Regex),
    OneOf(Vec<String>),
    Email,
    Custom(Predicate),
}

impl Rule {
    /// `true` when `value` satisfies the rule. Lengths count chars.
    pub fn check(&self, value: &str) -> bool {
        match self {
            Rule::Required => !value.trim().is_empty(),
            Rule::MinLen(n) => value.chars().count() >= *n,
            Rule::MaxLen(n) => value.chars().count() <= *n,
            Rule::Matches(re) => re.is_match(value),
            Rule::OneOf(allowed) => allowed.iter().any(|a| a == value),
            Rule::Email => value.to_string().validate_email(),
            Rule::Custom(f) => f(value),
        }
    }
}

impl fmt::Debug for Rule {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Rule::Required => write!(f, "Required"),
            Rule::MinLen(n) => write!(f, "MinLen({n})"),
            Rule::MaxLen(n) => write!(f, "MaxLen({n})"),
            Rule::Matches(re) => write!(f, "Matches({})", re.as_str()),
            Rule::OneOf(allowed) => write!(f, "OneOf({allowed:?})"),
            Rule::Email => write!(f, "Email"),
            Rule::Custom(_) => write!(f, "Custom(..)"),
        }
    }
}

/// A rule and the message reported when it fails.
#[derive(Debug, Clone)]
pub struct Constraint {
    pub rule: Rule,
    pub message: String,
}

impl Constraint {
    pub fn new(rule: Rule, message: impl Into<String>) -> Self {
        Self {
            rule,
            message: message.into(),
        }
    }

    /// The failure message, if `value` breaks this constraint.
    pub fn violation(&self, value: &str) -> Option<&str> {
        (!self.rule.check(value)).then_some(self.message.as_str())
    }
}
