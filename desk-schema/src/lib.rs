//! desk-schema: the console's form validation pipeline.
//!
//! - [`Schema`]: field → ordered constraints, first failure wins per field
//! - [`Form`]: values + touched set + submit gate around a schema
//! - [`parse_payload`]: turn validated values into a typed request payload

mod constraint;
mod errors;
mod form;
mod schema;
mod values;

pub use constraint::{Constraint, Predicate, Rule};
pub use errors::FieldErrors;
pub use form::{Form, SubmitRejection};
pub use schema::{FieldRules, Schema};
pub use values::FormValues;

use desk_core::errors::DeskError;
use serde::de::DeserializeOwned;
use serde_json::json;

/// Deserialize form values into `T`. Shape mismatches become an
/// `Unprocessable` error with a `_schema` entry.
pub fn parse_payload<T>(values: &FormValues, error_message: &str) -> anyhow::Result<T>
where
    T: DeserializeOwned,
{
    serde_json::from_value(values.to_json()).map_err(|e| {
        DeskError::unprocessable(error_message)
            .with_errors(json!({"_schema": [e.to_string()]}))
            .into_anyhow()
    })
}

#[cfg(test)]
mod tests {
    use desk_core::errors::{DeskError, ErrorKind};
    use serde::Deserialize;
    use serde_json::json;

    use super::{parse_payload, FormValues};

    #[derive(Debug, Deserialize)]
    struct Payload {
        name: String,
        seats: u32,
    }

    #[test]
    fn parse_payload_reports_shape_errors_under_schema_key() {
        let values = FormValues::new().with("name", "Acme").with("seats", "many");
        let err = parse_payload::<Payload>(&values, "Organization payload is invalid").unwrap_err();
        let desk = DeskError::from_anyhow(&err).expect("must be DeskError");

        assert_eq!(desk.kind, ErrorKind::Unprocessable);
        assert!(desk.errors.as_ref().unwrap()["_schema"][0].is_string());
    }

    #[test]
    fn parse_payload_decodes_matching_values() {
        let values = FormValues::new().with("name", "Acme").with("seats", json!(3));
        let p = parse_payload::<Payload>(&values, "invalid").unwrap();
        assert_eq!(p.name, "Acme");
        assert_eq!(p.seats, 3);
    }
}
