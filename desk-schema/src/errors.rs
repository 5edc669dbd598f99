use std::collections::btree_map::Entry;
use std::collections::{BTreeMap, BTreeSet};

use serde_json::{Map, Value};

/// Field → message. One message per field.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FieldErrors {
    map: BTreeMap<String, String>,
}

impl FieldErrors {
    pub fn new() -> Self {
        Self::default()
    }

    /// Record `msg` unless the field already has a message.
    pub fn push_field(&mut self, field: &str, msg: impl Into<String>) {
        if let Entry::Vacant(slot) = self.map.entry(field.to_string()) {
            slot.insert(msg.into());
        }
    }

    pub fn get(&self, field: &str) -> Option<&str> {
        self.map.get(field).map(String::as_str)
    }

    pub fn contains(&self, field: &str) -> bool {
        self.map.contains_key(field)
    }

    pub fn remove(&mut self, field: &str) {
        self.map.remove(field);
    }

    pub fn is_empty(&self) -> bool {
        self.map.is_empty()
    }

    pub fn len(&self) -> usize {
        self.map.len()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.map.iter().map(|(k, v)| (k.as_str(), v.as_str()))
    }

    /// Only the entries whose field is in `fields`.
    pub fn only(&self, fields: &BTreeSet<String>) -> FieldErrors {
        FieldErrors {
            map: self
                .map
                .iter()
                .filter(|(k, _)| fields.contains(*k))
                .map(|(k, v)| (k.clone(), v.clone()))
                .collect(),
        }
    }

    /// Feathers-style `errors` object: `{"field": ["msg"]}`.
    pub fn to_json(&self) -> Value {
        Value::Object(
            self.map
                .iter()
                .map(|(k, v)| (k.clone(), Value::Array(vec![Value::String(v.clone())])))
                .collect::<Map<String, Value>>(),
        )
    }
}

impl From<BTreeMap<String, String>> for FieldErrors {
    fn from(map: BTreeMap<String, String>) -> Self {
        Self { map }
    }
}
