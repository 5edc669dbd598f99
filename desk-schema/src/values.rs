use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

/// Current value of every form field.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct FormValues(BTreeMap<String, Value>);

impl FormValues {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with(mut self, field: impl Into<String>, value: impl Into<Value>) -> Self {
        self.set(field, value);
        self
    }

    pub fn set(&mut self, field: impl Into<String>, value: impl Into<Value>) {
        self.0.insert(field.into(), value.into());
    }

    pub fn get(&self, field: &str) -> Option<&Value> {
        self.0.get(field)
    }

    /// Textual form of a field as constraints see it. Missing and null
    /// fields read as "".
    pub fn text(&self, field: &str) -> String {
        match self.0.get(field) {
            None | Some(Value::Null) => String::new(),
            Some(Value::String(s)) => s.clone(),
            Some(other) => other.to_string(),
        }
    }

    pub fn fields(&self) -> impl Iterator<Item = &str> {
        self.0.keys().map(String::as_str)
    }

    pub fn to_json(&self) -> Value {
        Value::Object(self.0.clone().into_iter().collect::<Map<String, Value>>())
    }
}

impl<K, V> FromIterator<(K, V)> for FormValues
where
    K: Into<String>,
    V: Into<Value>,
{
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        Self(iter.into_iter().map(|(k, v)| (k.into(), v.into())).collect())
    }
}

#[cfg(test)]
mod tests {
    use serde_json::json;

    use super::FormValues;

    #[test]
    fn text_flattens_primitives() {
        let values = FormValues::new()
            .with("name", "Acme")
            .with("seats", json!(12))
            .with("active", json!(true))
            .with("note", json!(null));

        assert_eq!(values.text("name"), "Acme");
        assert_eq!(values.text("seats"), "12");
        assert_eq!(values.text("active"), "true");
        assert_eq!(values.text("note"), "");
        assert_eq!(values.text("missing"), "");
    }
}
