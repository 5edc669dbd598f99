//! Backend resources and the hooks that hold their client-side state.

mod api;
mod organization;
mod team;
mod user;

use std::collections::BTreeMap;

use desk_core::resource::Resource;
use desk_schema::{FormValues, Schema};

pub use api::ResourceApi;
pub use organization::{Organization, OrganizationPayload, SubscriptionType};
pub use team::{Team, TeamPayload, Workspace};
pub use user::{User, UserPayload, UserStatus};

/// Resources that have a create/edit form.
pub trait Editable: Resource {
    fn schema() -> Schema;

    /// Values for a blank "new" form.
    fn default_values() -> FormValues;

    /// Values for editing an existing record.
    fn values_from(record: &Self) -> FormValues;

    /// Build the request payload from validated values. Fields outside the
    /// payload shape are dropped.
    fn payload_from(values: &FormValues) -> anyhow::Result<Self::Payload>;
}

/// Pagination and filters for a collection fetch. `page` is zero-based;
/// the backend decides what a page contains.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ListQuery {
    pub page: Option<u32>,
    pub size: Option<u32>,
    pub filters: BTreeMap<String, String>,
}

impl ListQuery {
    pub fn page(mut self, page: u32) -> Self {
        self.page = Some(page);
        self
    }

    pub fn size(mut self, size: u32) -> Self {
        self.size = Some(size);
        self
    }

    pub fn filter(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.filters.insert(key.into(), value.into());
        self
    }

    pub fn to_params(&self) -> Vec<(String, String)> {
        let mut params = Vec::with_capacity(self.filters.len() + 2);
        if let Some(page) = self.page {
            params.push(("page".to_string(), page.to_string()));
        }
        if let Some(size) = self.size {
            params.push(("size".to_string(), size.to_string()));
        }
        params.extend(self.filters.iter().map(|(k, v)| (k.clone(), v.clone())));
        params
    }
}
