use std::sync::Arc;

use desk_core::errors::DeskError;
use desk_core::resource::ResourceId;
use desk_schema::{FieldErrors, Form, SubmitRejection};
use serde_json::Value;
use tracing::debug;

use super::{list_route, Navigator};
use crate::resources::{Editable, ResourceApi};

/// Which backend call a form submits to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FormMode {
    Create,
    Edit(ResourceId),
}

#[derive(Debug)]
pub enum SubmitOutcome<R> {
    /// Saved; carries the record when the backend echoed it.
    Saved(Option<R>),
    /// Client-side validation failed, nothing was sent.
    Invalid(FieldErrors),
    /// A previous submit has not settled.
    Busy,
    /// The record being edited has not loaded.
    NotReady,
    Failed(DeskError),
}

/// Holds the form's submit gate closed while a request is out. Dropping it
/// unsettled reopens the gate.
struct SubmitGate<'a> {
    form: &'a mut Form,
    open: bool,
}

impl<'a> SubmitGate<'a> {
    fn new(form: &'a mut Form) -> Self {
        Self { form, open: true }
    }

    fn settle(mut self, result: Result<(), &DeskError>) {
        self.form.end_submit(result);
        self.open = false;
    }
}

impl Drop for SubmitGate<'_> {
    fn drop(&mut self) {
        if self.open {
            self.form.cancel_submit();
        }
    }
}

/// New/Edit page: a validated form bound to `create` or `edit`.
pub struct FormPage<R: Editable> {
    api: ResourceApi<R>,
    navigator: Arc<dyn Navigator>,
    mode: Option<FormMode>,
    form: Form,
    ready: bool,
    failure: Option<DeskError>,
}

impl<R: Editable> FormPage<R> {
    /// Blank form with default values, ready immediately.
    pub fn new_page(api: ResourceApi<R>, navigator: Arc<dyn Navigator>) -> Self {
        Self {
            api,
            navigator,
            mode: Some(FormMode::Create),
            form: Form::new(R::schema(), R::default_values()),
            ready: true,
            failure: None,
        }
    }

    /// Form for the record named by the raw route id. Not ready until
    /// [`FormPage::mount`] has loaded it; an invalid id never becomes ready.
    pub fn edit_page(api: ResourceApi<R>, navigator: Arc<dyn Navigator>, raw_id: &str) -> Self {
        Self {
            api,
            navigator,
            mode: ResourceId::parse(raw_id).map(FormMode::Edit),
            form: Form::new(R::schema(), R::default_values()),
            ready: false,
            failure: None,
        }
    }

    pub fn api(&self) -> &ResourceApi<R> {
        &self.api
    }

    pub fn mode(&self) -> Option<FormMode> {
        self.mode
    }

    pub fn form(&self) -> &Form {
        &self.form
    }

    pub fn is_ready(&self) -> bool {
        self.ready
    }

    /// Why the record being edited could not be loaded.
    pub fn failure(&self) -> Option<&DeskError> {
        self.failure.as_ref()
    }

    /// The not-found state: a bad route id or a failed load.
    pub fn is_missing(&self) -> bool {
        !self.ready && (self.mode.is_none() || self.failure.is_some())
    }

    /// Edit mode loads the record and fills the form with it.
    pub async fn mount(&mut self) -> Result<(), DeskError> {
        let Some(FormMode::Edit(id)) = self.mode else {
            return Ok(());
        };
        if let Err(err) = self.api.show(id).await {
            self.failure = Some(err.clone());
            return Err(err);
        }
        self.failure = None;
        if let Some(record) = self.api.current().filter(|r| r.id() == id) {
            self.form.reinitialize(R::values_from(&record));
            self.ready = true;
        }
        Ok(())
    }

    /// Leaving the page drops the loaded record.
    pub fn unmount(&self) {
        self.api.clear_current();
    }

    pub fn change(&mut self, field: &str, value: impl Into<Value>) {
        self.form.change(field, value);
    }

    pub fn blur(&mut self, field: &str) {
        self.form.blur(field);
    }

    pub fn error(&self, field: &str) -> Option<String> {
        self.form.error(field)
    }

    /// Validate, send, and on success navigate to the list.
    pub async fn submit(&mut self) -> SubmitOutcome<R> {
        let Some(mode) = self.mode.filter(|_| self.ready) else {
            return SubmitOutcome::NotReady;
        };

        let values = match self.form.begin_submit() {
            Ok(values) => values,
            Err(SubmitRejection::InFlight) => return SubmitOutcome::Busy,
            Err(SubmitRejection::Invalid(errors)) => {
                debug!(resource = R::PATH, errors = %errors.to_json(), "submit blocked by validation");
                return SubmitOutcome::Invalid(errors);
            }
        };
        let gate = SubmitGate::new(&mut self.form);

        let payload = match R::payload_from(&values) {
            Ok(payload) => payload,
            Err(e) => return SubmitOutcome::Failed(self.api.fail("encode", e)),
        };

        let result = match mode {
            FormMode::Create => self.api.create(&payload).await,
            FormMode::Edit(id) => self.api.edit(id, &payload).await,
        };

        match result {
            Ok(saved) => {
                gate.settle(Ok(()));
                self.api.clear_current();
                self.navigator.navigate(&list_route::<R>());
                SubmitOutcome::Saved(saved)
            }
            Err(err) => {
                gate.settle(Err(&err));
                SubmitOutcome::Failed(err)
            }
        }
    }
}
