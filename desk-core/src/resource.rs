//! Backend-managed entity types.

use std::fmt;
use std::str::FromStr;

use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};

/// Positive integer id assigned by the backend.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ResourceId(pub u64);

impl ResourceId {
    /// Parse a route segment. Only positive integers are ids.
    pub fn parse(raw: &str) -> Option<Self> {
        raw.trim().parse::<u64>().ok().filter(|n| *n > 0).map(ResourceId)
    }
}

impl fmt::Display for ResourceId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl FromStr for ResourceId {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s).ok_or_else(|| format!("not a resource id: {s:?}"))
    }
}

impl From<u64> for ResourceId {
    fn from(value: u64) -> Self {
        ResourceId(value)
    }
}

/// One backend resource type with a full CRUD lifecycle.
///
/// `PATH` is the collection endpoint relative to the API base URL
/// (`organizations` → `GET /organizations`, `GET /organizations/{id}`, ...).
pub trait Resource: DeserializeOwned + Clone + Send + Sync + 'static {
    /// Writable shape sent on create/edit.
    type Payload: Serialize + Send + Sync;

    const PATH: &'static str;

    /// Human label, e.g. "Organization".
    const LABEL: &'static str;

    fn id(&self) -> ResourceId;

    fn collection_path() -> String {
        Self::PATH.to_string()
    }

    fn item_path(id: ResourceId) -> String {
        format!("{}/{}", Self::PATH, id)
    }
}
