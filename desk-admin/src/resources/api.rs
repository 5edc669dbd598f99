use std::sync::{Arc, PoisonError, RwLock, RwLockReadGuard, RwLockWriteGuard};

use desk_core::errors::DeskError;
use desk_core::notify::{Notice, Notifier};
use desk_core::resource::{Resource, ResourceId};
use desk_core::transport::{ApiTransport, RequestConfig};
use serde_json::Value;
use tracing::{debug, warn};

use super::ListQuery;

#[derive(Debug)]
struct ResourceState<R> {
    collection: Vec<R>,
    current: Option<R>,
    in_flight: usize,
}

impl<R> Default for ResourceState<R> {
    fn default() -> Self {
        Self {
            collection: Vec::new(),
            current: None,
            in_flight: 0,
        }
    }
}

/// Client-side state and CRUD operations for one resource type.
///
/// Owns `collection`, `current` and the loading flag. Operations take
/// `&self` so overlapping calls are possible; each one writes its result
/// when its response arrives, so the last response to complete wins.
///
/// Expected failures never escape as panics: they are reported to the
/// notifier and returned as a [`DeskError`] without its inner source.
pub struct ResourceApi<R: Resource> {
    transport: Arc<dyn ApiTransport>,
    notifier: Arc<dyn Notifier>,
    state: RwLock<ResourceState<R>>,
}

/// Keeps the loading flag raised for the lifetime of one request, including
/// when the future is dropped before completion.
struct InFlight<'a, R> {
    state: &'a RwLock<ResourceState<R>>,
}

impl<R> Drop for InFlight<'_, R> {
    fn drop(&mut self) {
        let mut state = self.state.write().unwrap_or_else(PoisonError::into_inner);
        state.in_flight = state.in_flight.saturating_sub(1);
    }
}

impl<R: Resource> ResourceApi<R> {
    pub fn new(transport: Arc<dyn ApiTransport>, notifier: Arc<dyn Notifier>) -> Self {
        Self {
            transport,
            notifier,
            state: RwLock::new(ResourceState::default()),
        }
    }

    pub fn collection(&self) -> Vec<R> {
        self.read().collection.clone()
    }

    pub fn current(&self) -> Option<R> {
        self.read().current.clone()
    }

    /// True while at least one request issued by this hook is outstanding.
    pub fn loading(&self) -> bool {
        self.read().in_flight > 0
    }

    /// Forget the single-entity state, e.g. when navigating away.
    pub fn clear_current(&self) {
        self.write().current = None;
    }

    /// GET the collection endpoint and replace `collection` on success.
    pub async fn fetch(&self, query: Option<&ListQuery>) -> Result<(), DeskError> {
        let _loading = self.begin();
        let params = query.map(ListQuery::to_params).unwrap_or_default();
        let path = R::collection_path();

        let rows = match self.transport.get(&path, &params).await {
            Ok(res) => res.into_data::<Vec<R>>(),
            Err(e) => Err(e),
        };

        match rows {
            Ok(rows) => {
                debug!(resource = R::PATH, count = rows.len(), "collection fetched");
                self.write().collection = rows;
                Ok(())
            }
            Err(e) => Err(self.fail("fetch", e)),
        }
    }

    /// GET one record and replace `current` on success.
    pub async fn show(&self, id: ResourceId) -> Result<(), DeskError> {
        let _loading = self.begin();

        let record = match self.transport.get(&R::item_path(id), &[]).await {
            Ok(res) => res.into_data::<R>(),
            Err(e) => Err(e),
        };

        match record {
            Ok(record) => {
                debug!(resource = R::PATH, %id, "record loaded");
                self.write().current = Some(record);
                Ok(())
            }
            Err(e) => Err(self.fail("show", e)),
        }
    }

    /// POST a new record. Local state is left alone; callers re-fetch or
    /// navigate. Returns the created record when the backend echoes it.
    pub async fn create(&self, payload: &R::Payload) -> Result<Option<R>, DeskError> {
        let _loading = self.begin();
        let body = self.encode(payload)?;

        match self
            .transport
            .post(&R::collection_path(), &body, &RequestConfig::default())
            .await
        {
            Ok(res) => {
                self.notifier
                    .notify(Notice::success(format!("{} created successfully", R::LABEL)));
                Ok(Self::echoed(res.data()))
            }
            Err(e) => Err(self.fail("create", e)),
        }
    }

    /// PUT a full payload for `id`. Same contract as [`ResourceApi::create`].
    pub async fn edit(&self, id: ResourceId, payload: &R::Payload) -> Result<Option<R>, DeskError> {
        let _loading = self.begin();
        let body = self.encode(payload)?;

        match self
            .transport
            .put(&R::item_path(id), &body, &RequestConfig::default())
            .await
        {
            Ok(res) => {
                self.notifier
                    .notify(Notice::success(format!("{} updated successfully", R::LABEL)));
                Ok(Self::echoed(res.data()))
            }
            Err(e) => Err(self.fail("edit", e)),
        }
    }

    /// DELETE `id`. On success the matching entry is removed from
    /// `collection` without a re-fetch; on failure nothing changes.
    pub async fn destroy(&self, id: ResourceId) -> Result<(), DeskError> {
        let _loading = self.begin();

        match self.transport.delete(&R::item_path(id)).await {
            Ok(_) => {
                self.write().collection.retain(|r| r.id() != id);
                self.notifier
                    .notify(Notice::success(format!("{} deleted successfully", R::LABEL)));
                Ok(())
            }
            Err(e) => Err(self.fail("destroy", e)),
        }
    }

    fn begin(&self) -> InFlight<'_, R> {
        self.write().in_flight += 1;
        InFlight { state: &self.state }
    }

    fn encode(&self, payload: &R::Payload) -> Result<Value, DeskError> {
        serde_json::to_value(payload).map_err(|e| {
            self.fail(
                "encode",
                DeskError::bad_request(format!("{} payload cannot be encoded: {e}", R::LABEL))
                    .into_anyhow(),
            )
        })
    }

    fn echoed(data: &Value) -> Option<R> {
        if data.is_null() {
            return None;
        }
        serde_json::from_value(data.clone())
            .map_err(|e| debug!(resource = R::PATH, error = %e, "response is not a record"))
            .ok()
    }

    pub(crate) fn fail(&self, op: &'static str, err: anyhow::Error) -> DeskError {
        let err = DeskError::normalize(err);
        warn!(
            resource = R::PATH,
            op,
            code = err.code(),
            class = err.class_name(),
            error = %err.message,
            "request failed"
        );
        self.notifier.notify(Notice::failure(&err));
        err.sanitize_for_client()
    }

    fn read(&self) -> RwLockReadGuard<'_, ResourceState<R>> {
        self.state.read().unwrap_or_else(PoisonError::into_inner)
    }

    fn write(&self) -> RwLockWriteGuard<'_, ResourceState<R>> {
        self.state.write().unwrap_or_else(PoisonError::into_inner)
    }
}
