use desk_core::resource::{Resource, ResourceId};
use desk_schema::{parse_payload, FormValues, Schema};
use once_cell::sync::Lazy;
use regex::Regex;
use serde::{Deserialize, Serialize};
use serde_json::{json, Value};

use super::Editable;

static DOMAIN: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"^[a-zA-Z0-9][a-zA-Z0-9-]{1,61}[a-zA-Z0-9]\.[a-zA-Z]{2,}$")
        .expect("domain pattern compiles")
});

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum SubscriptionType {
    #[default]
    Free,
    Standard,
    Premium,
}

impl SubscriptionType {
    pub const ALL: [SubscriptionType; 3] = [
        SubscriptionType::Free,
        SubscriptionType::Standard,
        SubscriptionType::Premium,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            SubscriptionType::Free => "FREE",
            SubscriptionType::Standard => "STANDARD",
            SubscriptionType::Premium => "PREMIUM",
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            SubscriptionType::Free => "Free Plan",
            SubscriptionType::Standard => "Standard Plan",
            SubscriptionType::Premium => "Premium Plan",
        }
    }

    /// Unknown or missing values fall back to `FREE`.
    pub fn sanitize(raw: Option<&str>) -> Self {
        Self::ALL
            .into_iter()
            .find(|t| Some(t.as_str()) == raw)
            .unwrap_or_default()
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Organization {
    pub id: ResourceId,
    pub name: String,
    #[serde(default)]
    pub domain: String,
    #[serde(default)]
    pub subscription_type: Option<String>,
    #[serde(default)]
    pub settings: Option<Value>,
}

impl Organization {
    pub fn subscription(&self) -> SubscriptionType {
        SubscriptionType::sanitize(self.subscription_type.as_deref())
    }

    /// Settings as editable text. Text stored server-side is kept as is,
    /// structured values are pretty printed.
    pub fn settings_text(&self) -> Option<String> {
        match &self.settings {
            None | Some(Value::Null) => None,
            Some(Value::String(s)) => Some(s.clone()),
            Some(other) => serde_json::to_string_pretty(other).ok(),
        }
    }
}

/// Body of `POST /organizations` and `PUT /organizations/{id}`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct OrganizationPayload {
    pub name: String,
    pub domain: String,
    pub subscription_type: SubscriptionType,
    #[serde(default)]
    pub settings: String,
}

impl Resource for Organization {
    type Payload = OrganizationPayload;

    const PATH: &'static str = "organizations";
    const LABEL: &'static str = "Organization";

    fn id(&self) -> ResourceId {
        self.id
    }
}

fn default_settings() -> String {
    serde_json::to_string_pretty(&json!({"theme": "light", "language": "en"})).unwrap_or_default()
}

impl Editable for Organization {
    fn schema() -> Schema {
        Schema::new()
            .field("name", |f| {
                f.required("Organization name is required")
                    .min_len(2, "Name must be at least 2 characters")
                    .max_len(100, "Name must not exceed 100 characters")
            })
            .field("domain", |f| {
                f.required("Organization domain is required")
                    .matches(&DOMAIN, "Please enter a valid domain")
            })
            .field("subscription_type", |f| {
                f.required("Subscription type is required")
                    .one_of(&["FREE", "STANDARD", "PREMIUM"], "Invalid subscription type")
            })
            .field("settings", |f| f.json("Invalid JSON format"))
    }

    fn default_values() -> FormValues {
        FormValues::new()
            .with("name", "")
            .with("domain", "")
            .with("subscription_type", SubscriptionType::Free.as_str())
            .with("settings", default_settings())
    }

    fn values_from(record: &Self) -> FormValues {
        FormValues::new()
            .with("name", record.name.clone())
            .with("domain", record.domain.clone())
            .with("subscription_type", record.subscription().as_str())
            .with("settings", record.settings_text().unwrap_or_else(default_settings))
    }

    fn payload_from(values: &FormValues) -> anyhow::Result<OrganizationPayload> {
        parse_payload(values, "Organization form is invalid")
    }
}
