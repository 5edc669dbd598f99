//! desk-admin: headless help-desk admin console.
//!
//! Resource hooks ([`ResourceApi`]) own the client-side state for one
//! backend resource; page controllers compose them with the validation
//! pipeline. [`AdminApp`] wires both to one shared HTTP client.

mod app;
pub mod pages;
pub mod resources;

pub use app::AdminApp;
pub use resources::{
    Editable, ListQuery, Organization, ResourceApi, SubscriptionType, Team, User, UserStatus,
    Workspace,
};
