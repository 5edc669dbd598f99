//! Headless page controllers: List, View, New and Edit for any resource.
//!
//! Rendering, routing and dialogs belong to the embedder and are reached
//! through [`Navigator`] and [`Confirm`].

mod detail;
mod form;
mod list;

use async_trait::async_trait;
use desk_core::resource::Resource;

pub use detail::{DetailPage, DetailView};
pub use form::{FormMode, FormPage, SubmitOutcome};
pub use list::{DeleteOutcome, ListPage};

/// Moves the UI to another route.
pub trait Navigator: Send + Sync {
    fn navigate(&self, route: &str);
}

/// Text of a confirmation dialog.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ConfirmPrompt {
    pub title: String,
    pub description: String,
    pub confirm_text: String,
    pub cancel_text: String,
}

impl ConfirmPrompt {
    pub fn delete<R: Resource>() -> Self {
        Self {
            title: format!("Delete {}", R::LABEL),
            description: format!(
                "Are you sure you want to delete this {}?",
                R::LABEL.to_lowercase()
            ),
            confirm_text: "Confirm".to_string(),
            cancel_text: "Cancel".to_string(),
        }
    }
}

/// Asks the user to confirm a destructive action.
#[async_trait]
pub trait Confirm: Send + Sync {
    async fn confirm(&self, prompt: &ConfirmPrompt) -> bool;
}

/// Route of a resource's list page, e.g. `/organizations`.
pub fn list_route<R: Resource>() -> String {
    format!("/{}", R::PATH)
}
