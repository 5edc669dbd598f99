use desk_core::errors::DeskError;
use desk_core::resource::{Resource, ResourceId};

use crate::resources::ResourceApi;

/// What a view page renders.
#[derive(Debug, Clone, PartialEq)]
pub enum DetailView<R> {
    Loading,
    /// The id was invalid or the record could not be loaded.
    Missing,
    Ready(R),
}

/// Read-only page for one record, keyed by a route id.
pub struct DetailPage<R: Resource> {
    api: ResourceApi<R>,
    id: Option<ResourceId>,
    failure: Option<DeskError>,
}

impl<R: Resource> DetailPage<R> {
    pub fn new(api: ResourceApi<R>, raw_id: &str) -> Self {
        Self {
            api,
            id: ResourceId::parse(raw_id),
            failure: None,
        }
    }

    pub fn api(&self) -> &ResourceApi<R> {
        &self.api
    }

    pub fn id(&self) -> Option<ResourceId> {
        self.id
    }

    pub async fn mount(&mut self) {
        let Some(id) = self.id else {
            return;
        };
        self.failure = self.api.show(id).await.err();
    }

    /// Leaving the page drops the loaded record.
    pub fn unmount(&self) {
        self.api.clear_current();
    }

    pub fn failure(&self) -> Option<&DeskError> {
        self.failure.as_ref()
    }

    pub fn view(&self) -> DetailView<R> {
        let Some(id) = self.id else {
            return DetailView::Missing;
        };
        if self.api.loading() {
            return DetailView::Loading;
        }
        match self.api.current() {
            Some(record) if record.id() == id => DetailView::Ready(record),
            _ if self.failure.is_some() => DetailView::Missing,
            _ => DetailView::Loading,
        }
    }
}
