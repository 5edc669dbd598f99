use std::sync::Arc;

use regex::Regex;

use crate::constraint::{Constraint, Rule};
use crate::errors::FieldErrors;
use crate::values::FormValues;

/// Ordered constraints for one field.
#[derive(Debug, Clone)]
pub struct FieldRules {
    name: String,
    constraints: Vec<Constraint>,
}

impl FieldRules {
    fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            constraints: Vec::new(),
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn rule(mut self, rule: Rule, message: impl Into<String>) -> Self {
        self.constraints.push(Constraint::new(rule, message));
        self
    }

    pub fn required(self, message: impl Into<String>) -> Self {
        self.rule(Rule::Required, message)
    }

    pub fn min_len(self, n: usize, message: impl Into<String>) -> Self {
        self.rule(Rule::MinLen(n), message)
    }

    pub fn max_len(self, n: usize, message: impl Into<String>) -> Self {
        self.rule(Rule::MaxLen(n), message)
    }

    pub fn matches(self, pattern: &Regex, message: impl Into<String>) -> Self {
        self.rule(Rule::Matches(pattern.clone()), message)
    }

    pub fn one_of(self, allowed: &[&str], message: impl Into<String>) -> Self {
        let allowed = allowed.iter().map(|s| s.to_string()).collect();
        self.rule(Rule::OneOf(allowed), message)
    }

    pub fn email(self, message: impl Into<String>) -> Self {
        self.rule(Rule::Email, message)
    }

    pub fn custom(
        self,
        message: impl Into<String>,
        check: impl Fn(&str) -> bool + Send + Sync + 'static,
    ) -> Self {
        self.rule(Rule::Custom(Arc::new(check)), message)
    }

    /// Text must parse as JSON.
    pub fn json(self, message: impl Into<String>) -> Self {
        self.custom(message, |v| serde_json::from_str::<serde_json::Value>(v).is_ok())
    }

    fn is_required(&self) -> bool {
        self.constraints.iter().any(|c| matches!(c.rule, Rule::Required))
    }

    /// First failing constraint's message. Empty optional fields pass;
    /// whitespace-only text is still checked.
    fn check(&self, value: &str) -> Option<&str> {
        if value.is_empty() && !self.is_required() {
            return None;
        }
        self.constraints.iter().find_map(|c| c.violation(value))
    }
}

/// Declarative form schema: field → ordered constraints.
///
/// ```rust
/// use desk_schema::{FormValues, Schema};
///
/// let schema = Schema::new()
///     .field("name", |f| f.required("Name is required").min_len(2, "Too short"));
///
/// let errors = schema.validate(&FormValues::new().with("name", "A"));
/// assert_eq!(errors.get("name"), Some("Too short"));
/// ```
#[derive(Debug, Clone, Default)]
pub struct Schema {
    fields: Vec<FieldRules>,
}

impl Schema {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn field<F>(mut self, name: &str, f: F) -> Self
    where
        F: FnOnce(FieldRules) -> FieldRules,
    {
        self.fields.push(f(FieldRules::new(name)));
        self
    }

    pub fn fields(&self) -> impl Iterator<Item = &str> {
        self.fields.iter().map(FieldRules::name)
    }

    /// Evaluate every field in declaration order, stopping at the first
    /// failing constraint per field. Passing fields are absent.
    pub fn validate(&self, values: &FormValues) -> FieldErrors {
        let mut out = FieldErrors::new();
        for rules in &self.fields {
            if let Some(msg) = rules.check(&values.text(&rules.name)) {
                out.push_field(&rules.name, msg);
            }
        }
        out
    }

    pub fn validate_field(&self, field: &str, values: &FormValues) -> Option<String> {
        self.fields
            .iter()
            .find(|r| r.name == field)
            .and_then(|r| r.check(&values.text(field)).map(str::to_string))
    }
}
