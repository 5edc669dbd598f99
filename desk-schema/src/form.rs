use std::collections::BTreeSet;

use desk_core::errors::DeskError;
use serde_json::Value;

use crate::errors::FieldErrors;
use crate::schema::Schema;
use crate::values::FormValues;

/// Why `begin_submit` refused to hand out values.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SubmitRejection {
    /// A previous submission has not finished.
    InFlight,
    /// Client-side validation failed; nothing may be sent.
    Invalid(FieldErrors),
}

/// Editing state for one form: values, touched fields, derived errors and
/// the submit gate.
///
/// Errors are recomputed from the schema after every change, blur and
/// submit attempt. They become visible per field once that field is
/// touched; a submit attempt touches every field.
#[derive(Debug, Clone)]
pub struct Form {
    schema: Schema,
    values: FormValues,
    errors: FieldErrors,
    server_errors: FieldErrors,
    touched: BTreeSet<String>,
    submitting: bool,
    submit_count: u32,
}

impl Form {
    pub fn new(schema: Schema, initial: FormValues) -> Self {
        let errors = schema.validate(&initial);
        Self {
            schema,
            values: initial,
            errors,
            server_errors: FieldErrors::new(),
            touched: BTreeSet::new(),
            submitting: false,
            submit_count: 0,
        }
    }

    /// Replace the values wholesale, e.g. once the record being edited has
    /// loaded. Touched state and server errors are reset.
    pub fn reinitialize(&mut self, values: FormValues) {
        self.errors = self.schema.validate(&values);
        self.values = values;
        self.server_errors = FieldErrors::new();
        self.touched.clear();
        self.submit_count = 0;
    }

    pub fn schema(&self) -> &Schema {
        &self.schema
    }

    pub fn values(&self) -> &FormValues {
        &self.values
    }

    pub fn value(&self, field: &str) -> String {
        self.values.text(field)
    }

    pub fn change(&mut self, field: &str, value: impl Into<Value>) {
        self.values.set(field, value);
        self.touched.insert(field.to_string());
        self.server_errors.remove(field);
        self.revalidate();
    }

    pub fn blur(&mut self, field: &str) {
        self.touched.insert(field.to_string());
        self.revalidate();
    }

    pub fn is_touched(&self, field: &str) -> bool {
        self.touched.contains(field)
    }

    /// Every current client-side error, touched or not.
    pub fn errors(&self) -> &FieldErrors {
        &self.errors
    }

    /// Errors to flag in the UI: client errors on touched fields, plus
    /// field messages returned by the server for the last submit.
    pub fn visible_errors(&self) -> FieldErrors {
        let mut out = self.errors.only(&self.touched);
        for (field, msg) in self.server_errors.iter() {
            out.push_field(field, msg);
        }
        out
    }

    pub fn error(&self, field: &str) -> Option<String> {
        self.visible_errors().get(field).map(str::to_string)
    }

    pub fn is_valid(&self) -> bool {
        self.errors.is_empty()
    }

    pub fn is_submitting(&self) -> bool {
        self.submitting
    }

    pub fn submit_count(&self) -> u32 {
        self.submit_count
    }

    /// Gate a submission. On success the form is marked in flight and a
    /// snapshot of the values is returned; call [`Form::end_submit`] once
    /// the request settles.
    pub fn begin_submit(&mut self) -> Result<FormValues, SubmitRejection> {
        if self.submitting {
            return Err(SubmitRejection::InFlight);
        }

        self.submit_count += 1;
        let all: Vec<String> = self
            .schema
            .fields()
            .chain(self.values.fields())
            .map(str::to_string)
            .collect();
        self.touched.extend(all);
        self.server_errors = FieldErrors::new();
        self.revalidate();

        if !self.errors.is_empty() {
            return Err(SubmitRejection::Invalid(self.errors.clone()));
        }

        self.submitting = true;
        Ok(self.values.clone())
    }

    /// Close the in-flight submission. Field messages carried by a failed
    /// request are shown inline until the field is edited.
    pub fn end_submit(&mut self, result: Result<(), &DeskError>) {
        self.submitting = false;
        if let Err(err) = result {
            self.server_errors = FieldErrors::from(err.field_errors());
        }
    }

    /// Reopen the gate without recording an outcome, e.g. when the request
    /// was abandoned before it settled.
    pub fn cancel_submit(&mut self) {
        self.submitting = false;
    }

    fn revalidate(&mut self) {
        self.errors = self.schema.validate(&self.values);
    }
}
