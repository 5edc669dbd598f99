use desk_core::resource::{Resource, ResourceId};
use desk_schema::{parse_payload, FormValues, Schema};
use serde::{Deserialize, Serialize};

use super::{Editable, Organization};

/// Read-only parent of a team as the backend denormalizes it.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Workspace {
    pub id: ResourceId,
    pub name: String,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default)]
    pub organization: Option<Organization>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Team {
    pub id: ResourceId,
    pub name: String,
    #[serde(default)]
    pub access_level: Option<String>,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default)]
    pub workspace: Option<Workspace>,
}

impl Team {
    pub fn organization(&self) -> Option<&Organization> {
        self.workspace.as_ref().and_then(|w| w.organization.as_ref())
    }
}

/// Writable team fields. The nested workspace is never sent back.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TeamPayload {
    pub name: String,
    pub access_level: String,
    #[serde(default)]
    pub description: String,
}

impl Resource for Team {
    type Payload = TeamPayload;

    const PATH: &'static str = "teams";
    const LABEL: &'static str = "Team";

    fn id(&self) -> ResourceId {
        self.id
    }
}

impl Editable for Team {
    fn schema() -> Schema {
        Schema::new()
            .field("name", |f| {
                f.required("Team name is required")
                    .min_len(2, "Name must be at least 2 characters")
                    .max_len(100, "Name must not exceed 100 characters")
            })
            .field("accessLevel", |f| {
                f.required("Access level is required")
                    .max_len(50, "Access level must not exceed 50 characters")
            })
            .field("description", |f| {
                f.max_len(500, "Description must not exceed 500 characters")
            })
    }

    fn default_values() -> FormValues {
        FormValues::new()
            .with("name", "")
            .with("accessLevel", "")
            .with("description", "")
    }

    fn values_from(record: &Self) -> FormValues {
        FormValues::new()
            .with("name", record.name.clone())
            .with("accessLevel", record.access_level.clone().unwrap_or_default())
            .with("description", record.description.clone().unwrap_or_default())
    }

    fn payload_from(values: &FormValues) -> anyhow::Result<TeamPayload> {
        parse_payload(values, "Team form is invalid")
    }
}
