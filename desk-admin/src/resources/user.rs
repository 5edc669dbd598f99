use desk_core::resource::{Resource, ResourceId};
use desk_schema::{parse_payload, FormValues, Schema};
use once_cell::sync::Lazy;
use regex::Regex;
use serde::{Deserialize, Serialize};

use super::Editable;

static PHONE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^\+?[0-9 ()-]{7,20}$").expect("phone pattern compiles"));

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum UserStatus {
    #[default]
    Active,
    Inactive,
}

impl UserStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            UserStatus::Active => "ACTIVE",
            UserStatus::Inactive => "INACTIVE",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct User {
    pub id: ResourceId,
    pub full_name: String,
    pub email: String,
    #[serde(default)]
    pub phone: Option<String>,
    #[serde(default)]
    pub status: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UserPayload {
    pub full_name: String,
    pub email: String,
    #[serde(default)]
    pub phone: String,
    pub status: UserStatus,
}

impl Resource for User {
    type Payload = UserPayload;

    const PATH: &'static str = "users";
    const LABEL: &'static str = "User";

    fn id(&self) -> ResourceId {
        self.id
    }
}

impl Editable for User {
    fn schema() -> Schema {
        Schema::new()
            .field("fullName", |f| {
                f.required("Full name is required")
                    .min_len(2, "Full name must be at least 2 characters")
                    .max_len(100, "Full name must not exceed 100 characters")
            })
            .field("email", |f| {
                f.required("Email is required")
                    .email("Please enter a valid email")
            })
            .field("phone", |f| f.matches(&PHONE, "Please enter a valid phone number"))
            .field("status", |f| {
                f.required("Status is required")
                    .one_of(&["ACTIVE", "INACTIVE"], "Invalid status")
            })
    }

    fn default_values() -> FormValues {
        FormValues::new()
            .with("fullName", "")
            .with("email", "")
            .with("phone", "")
            .with("status", UserStatus::Active.as_str())
    }

    fn values_from(record: &Self) -> FormValues {
        FormValues::new()
            .with("fullName", record.full_name.clone())
            .with("email", record.email.clone())
            .with("phone", record.phone.clone().unwrap_or_default())
            .with("status", record.status.clone().unwrap_or_else(|| UserStatus::Active.as_str().to_string()))
    }

    fn payload_from(values: &FormValues) -> anyhow::Result<UserPayload> {
        parse_payload(values, "User form is invalid")
    }
}
