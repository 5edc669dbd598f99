use std::sync::Arc;

use desk_core::errors::DeskError;
use desk_core::resource::{Resource, ResourceId};
use tracing::debug;

use super::{Confirm, ConfirmPrompt};
use crate::resources::{ListQuery, ResourceApi};

#[derive(Debug)]
pub enum DeleteOutcome {
    Cancelled,
    Deleted,
    Failed(DeskError),
}

/// Paginated list of one resource with confirmed delete.
pub struct ListPage<R: Resource> {
    api: ResourceApi<R>,
    confirm: Arc<dyn Confirm>,
    query: ListQuery,
}

impl<R: Resource> ListPage<R> {
    pub fn new(api: ResourceApi<R>, confirm: Arc<dyn Confirm>, page_size: u32) -> Self {
        Self {
            api,
            confirm,
            query: ListQuery::default().page(0).size(page_size),
        }
    }

    pub fn api(&self) -> &ResourceApi<R> {
        &self.api
    }

    pub fn query(&self) -> &ListQuery {
        &self.query
    }

    pub async fn mount(&self) -> Result<(), DeskError> {
        debug!(resource = R::PATH, "list mounted");
        self.api.fetch(Some(&self.query)).await
    }

    pub async fn goto_page(&mut self, page: u32) -> Result<(), DeskError> {
        self.query.page = Some(page);
        self.api.fetch(Some(&self.query)).await
    }

    pub async fn search(&mut self, key: &str, term: &str) -> Result<(), DeskError> {
        if term.trim().is_empty() {
            self.query.filters.remove(key);
        } else {
            self.query.filters.insert(key.to_string(), term.trim().to_string());
        }
        self.query.page = Some(0);
        self.api.fetch(Some(&self.query)).await
    }

    /// Rows to render.
    pub fn rows(&self) -> Vec<R> {
        self.api.collection()
    }

    /// Show the table shimmer instead of rows.
    pub fn is_loading(&self) -> bool {
        self.api.loading()
    }

    /// Ask for confirmation, then delete.
    pub async fn delete(&self, id: ResourceId) -> DeleteOutcome {
        if !self.confirm.confirm(&ConfirmPrompt::delete::<R>()).await {
            debug!(resource = R::PATH, %id, "delete cancelled");
            return DeleteOutcome::Cancelled;
        }
        match self.api.destroy(id).await {
            Ok(()) => DeleteOutcome::Deleted,
            Err(err) => DeleteOutcome::Failed(err),
        }
    }
}
