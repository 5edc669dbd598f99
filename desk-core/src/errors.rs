//! # Errors (Feathers-style)
//!
//! Every failure the console client can observe is classified into a
//! [`DeskError`]:
//! - transport failures without a response (`Network`)
//! - non-2xx responses, classified by status code
//! - client-side schema failures (`Unprocessable` with per-field `errors`)
//!
//! Inside the transport layer errors travel as `anyhow::Error`; resource
//! hooks normalize them back into a `DeskError` at their boundary.

use std::collections::BTreeMap;
use std::fmt;

use anyhow::Error as AnyError;
use serde_json::Value;

/// A convenience result type for the transport layer.
pub type DeskResult<T> = std::result::Result<T, AnyError>;

/// Feathers-ish error class names + status codes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ErrorKind {
    Network,            // no response
    BadRequest,         // 400
    NotAuthenticated,   // 401
    Forbidden,          // 403
    NotFound,           // 404
    MethodNotAllowed,   // 405
    Timeout,            // 408
    Conflict,           // 409
    Unprocessable,      // 422
    TooManyRequests,    // 429
    GeneralError,       // 500
    NotImplemented,     // 501
    BadGateway,         // 502
    Unavailable,        // 503
}

impl ErrorKind {
    /// HTTP status for the kind. `Network` has none and reports 0.
    pub fn status_code(&self) -> u16 {
        match self {
            ErrorKind::Network => 0,
            ErrorKind::BadRequest => 400,
            ErrorKind::NotAuthenticated => 401,
            ErrorKind::Forbidden => 403,
            ErrorKind::NotFound => 404,
            ErrorKind::MethodNotAllowed => 405,
            ErrorKind::Timeout => 408,
            ErrorKind::Conflict => 409,
            ErrorKind::Unprocessable => 422,
            ErrorKind::TooManyRequests => 429,
            ErrorKind::GeneralError => 500,
            ErrorKind::NotImplemented => 501,
            ErrorKind::BadGateway => 502,
            ErrorKind::Unavailable => 503,
        }
    }

    /// Classify a response status. Unknown 4xx collapse to `BadRequest`,
    /// anything else unknown to `GeneralError`.
    pub fn from_status(status: u16) -> Self {
        match status {
            400 => ErrorKind::BadRequest,
            401 => ErrorKind::NotAuthenticated,
            403 => ErrorKind::Forbidden,
            404 => ErrorKind::NotFound,
            405 => ErrorKind::MethodNotAllowed,
            408 => ErrorKind::Timeout,
            409 => ErrorKind::Conflict,
            422 => ErrorKind::Unprocessable,
            429 => ErrorKind::TooManyRequests,
            501 => ErrorKind::NotImplemented,
            502 => ErrorKind::BadGateway,
            503 => ErrorKind::Unavailable,
            400..=499 => ErrorKind::BadRequest,
            _ => ErrorKind::GeneralError,
        }
    }

    /// Feathers error `name` (e.g. "NotFound")
    pub fn name(&self) -> &'static str {
        match self {
            ErrorKind::Network => "Network",
            ErrorKind::BadRequest => "BadRequest",
            ErrorKind::NotAuthenticated => "NotAuthenticated",
            ErrorKind::Forbidden => "Forbidden",
            ErrorKind::NotFound => "NotFound",
            ErrorKind::MethodNotAllowed => "MethodNotAllowed",
            ErrorKind::Timeout => "Timeout",
            ErrorKind::Conflict => "Conflict",
            ErrorKind::Unprocessable => "Unprocessable",
            ErrorKind::TooManyRequests => "TooManyRequests",
            ErrorKind::GeneralError => "GeneralError",
            ErrorKind::NotImplemented => "NotImplemented",
            ErrorKind::BadGateway => "BadGateway",
            ErrorKind::Unavailable => "Unavailable",
        }
    }

    /// Feathers error `className` (commonly kebab-cased)
    pub fn class_name(&self) -> &'static str {
        match self {
            ErrorKind::Network => "network",
            ErrorKind::BadRequest => "bad-request",
            ErrorKind::NotAuthenticated => "not-authenticated",
            ErrorKind::Forbidden => "forbidden",
            ErrorKind::NotFound => "not-found",
            ErrorKind::MethodNotAllowed => "method-not-allowed",
            ErrorKind::Timeout => "timeout",
            ErrorKind::Conflict => "conflict",
            ErrorKind::Unprocessable => "unprocessable",
            ErrorKind::TooManyRequests => "too-many-requests",
            ErrorKind::GeneralError => "general-error",
            ErrorKind::NotImplemented => "not-implemented",
            ErrorKind::BadGateway => "bad-gateway",
            ErrorKind::Unavailable => "unavailable",
        }
    }

    pub fn is_server(&self) -> bool {
        self.status_code() >= 500
    }
}

/// A structured console error that can live inside `anyhow::Error`.
///
/// Mirrors Feathers-style fields:
/// - name
/// - message
/// - code (HTTP status)
/// - class_name
/// - data (optional)
/// - errors (optional)
#[derive(Debug)]
pub struct DeskError {
    pub kind: ErrorKind,
    pub message: String,
    pub data: Option<Value>,
    pub errors: Option<Value>,
    pub source: Option<AnyError>,
}

impl DeskError {
    pub fn new(kind: ErrorKind, message: impl Into<String>) -> Self {
        Self {
            kind,
            message: message.into(),
            data: None,
            errors: None,
            source: None,
        }
    }

    /// Build an error from a non-2xx response. The body is opaque: only
    /// `message`, `errors`/`fieldErrors` and `data` are picked up when present.
    pub fn from_response(status: u16, body: &Value) -> Self {
        let kind = ErrorKind::from_status(status);
        let message = body
            .get("message")
            .and_then(Value::as_str)
            .filter(|m| !m.is_empty())
            .map(str::to_string)
            .unwrap_or_else(|| format!("Request failed with status code {status}"));

        let mut err = Self::new(kind, message);
        if let Some(errors) = body
            .get("errors")
            .or_else(|| body.get("fieldErrors"))
            .filter(|v| !v.is_null())
        {
            err.errors = Some(errors.clone());
        }
        if let Some(data) = body.get("data").filter(|v| !v.is_null()) {
            err.data = Some(data.clone());
        }
        err
    }

    pub fn with_errors(mut self, errors: Value) -> Self {
        self.errors = Some(errors);
        self
    }

    pub fn with_source(mut self, source: AnyError) -> Self {
        self.source = Some(source);
        self
    }

    pub fn code(&self) -> u16 {
        self.kind.status_code()
    }

    pub fn name(&self) -> &'static str {
        self.kind.name()
    }

    pub fn class_name(&self) -> &'static str {
        self.kind.class_name()
    }

    pub fn is_not_found(&self) -> bool {
        self.kind == ErrorKind::NotFound
    }

    /// True for 4xx errors that carry per-field messages.
    pub fn is_validation(&self) -> bool {
        (400..500).contains(&self.code()) && !self.field_errors().is_empty()
    }

    /// Flatten `errors` into field → first message.
    ///
    /// Accepts `{"field": "msg"}`, `{"field": ["msg", ...]}` and
    /// `[{"field": "..", "message": ".."}]`.
    pub fn field_errors(&self) -> BTreeMap<String, String> {
        let mut out = BTreeMap::new();
        match &self.errors {
            Some(Value::Object(map)) => {
                for (field, v) in map {
                    let msg = match v {
                        Value::String(s) => Some(s.clone()),
                        Value::Array(items) => items
                            .iter()
                            .find_map(|i| i.as_str().map(str::to_string)),
                        _ => None,
                    };
                    if let Some(msg) = msg {
                        out.insert(field.clone(), msg);
                    }
                }
            }
            Some(Value::Array(items)) => {
                for item in items {
                    let field = item.get("field").and_then(Value::as_str);
                    let msg = item
                        .get("message")
                        .or_else(|| item.get("defaultMessage"))
                        .and_then(Value::as_str);
                    if let (Some(field), Some(msg)) = (field, msg) {
                        out.entry(field.to_string()).or_insert_with(|| msg.to_string());
                    }
                }
            }
            _ => {}
        }
        out
    }

    /// Convert into `anyhow::Error` so it flows through the transport layer.
    pub fn into_anyhow(self) -> AnyError {
        AnyError::new(self)
    }

    /// Downcast an `anyhow::Error` to a `DeskError` if possible.
    pub fn from_anyhow(err: &AnyError) -> Option<&DeskError> {
        err.downcast_ref::<DeskError>()
    }

    /// Turn any error into a DeskError:
    /// - if it’s already a DeskError, keep it (lossless)
    /// - otherwise wrap as GeneralError
    pub fn normalize(err: AnyError) -> DeskError {
        match err.downcast::<DeskError>() {
            Ok(desk) => desk,
            Err(other) => {
                DeskError::new(ErrorKind::GeneralError, other.to_string()).with_source(other)
            }
        }
    }

    /// Copy without the inner `source`, suitable for handing to UI code.
    pub fn sanitize_for_client(&self) -> DeskError {
        DeskError {
            kind: self.kind,
            message: self.message.clone(),
            data: self.data.clone(),
            errors: self.errors.clone(),
            source: None,
        }
    }

    // ---- Constructors (Feathers-style) ----

    pub fn network(msg: impl Into<String>) -> Self {
        Self::new(ErrorKind::Network, msg)
    }
    pub fn bad_request(msg: impl Into<String>) -> Self {
        Self::new(ErrorKind::BadRequest, msg)
    }
    pub fn not_found(msg: impl Into<String>) -> Self {
        Self::new(ErrorKind::NotFound, msg)
    }
    pub fn unprocessable(msg: impl Into<String>) -> Self {
        Self::new(ErrorKind::Unprocessable, msg)
    }
    pub fn general_error(msg: impl Into<String>) -> Self {
        Self::new(ErrorKind::GeneralError, msg)
    }

    /// Feathers-ish JSON payload.
    pub fn to_json(&self) -> Value {
        use serde_json::json;

        let mut base = json!({
            "name": self.name(),
            "message": self.message,
            "code": self.code(),
            "className": self.class_name(),
        });

        if let Some(d) = &self.data {
            base["data"] = d.clone();
        }
        if let Some(e) = &self.errors {
            base["errors"] = e.clone();
        }
        base
    }
}

impl Clone for DeskError {
    fn clone(&self) -> Self {
        self.sanitize_for_client()
    }
}

impl fmt::Display for DeskError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} ({}): {}", self.name(), self.code(), self.message)
    }
}

impl std::error::Error for DeskError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        self.source
            .as_ref()
            .map(|e| e.as_ref() as &(dyn std::error::Error + 'static))
    }
}

/// Convenience helper for “bail with DeskError”.
#[macro_export]
macro_rules! bail_desk {
    ($ctor:ident, $msg:expr) => {
        return Err($crate::errors::DeskError::$ctor($msg).into_anyhow());
    };
    ($ctor:ident, $fmt:expr, $($arg:tt)*) => {
        return Err($crate::errors::DeskError::$ctor(format!($fmt, $($arg)*)).into_anyhow());
    };
}

#[cfg(test)]
mod tests {
    use serde_json::json;

    use super::*;

    #[test]
    fn status_classification_covers_taxonomy() {
        assert_eq!(ErrorKind::from_status(404), ErrorKind::NotFound);
        assert_eq!(ErrorKind::from_status(418), ErrorKind::BadRequest);
        assert_eq!(ErrorKind::from_status(500), ErrorKind::GeneralError);
        assert_eq!(ErrorKind::from_status(599), ErrorKind::GeneralError);
        assert!(ErrorKind::from_status(503).is_server());
        assert!(!ErrorKind::Network.is_server());
    }

    #[test]
    fn from_response_picks_message_and_field_errors() {
        let body = json!({
            "message": "Validation failed",
            "errors": {"name": ["Name is taken", "other"], "domain": "bad domain"}
        });
        let err = DeskError::from_response(400, &body);

        assert_eq!(err.kind, ErrorKind::BadRequest);
        assert_eq!(err.message, "Validation failed");
        assert!(err.is_validation());

        let fields = err.field_errors();
        assert_eq!(fields["name"], "Name is taken");
        assert_eq!(fields["domain"], "bad domain");
    }

    #[test]
    fn from_response_accepts_list_shaped_field_errors() {
        let body = json!({
            "fieldErrors": [
                {"field": "email", "defaultMessage": "must be a well-formed email address"},
                {"field": "email", "message": "second"}
            ]
        });
        let err = DeskError::from_response(422, &body);
        assert_eq!(err.field_errors()["email"], "must be a well-formed email address");
        assert_eq!(err.message, "Request failed with status code 422");
    }

    #[test]
    fn not_found_without_field_errors_is_not_validation() {
        let err = DeskError::from_response(404, &json!({"message": "Organization not found"}));
        assert!(err.is_not_found());
        assert!(!err.is_validation());
    }

    #[test]
    fn normalize_keeps_desk_errors_and_wraps_others() {
        let kept = DeskError::normalize(DeskError::not_found("gone").into_anyhow());
        assert_eq!(kept.kind, ErrorKind::NotFound);

        let wrapped = DeskError::normalize(anyhow::anyhow!("boom"));
        assert_eq!(wrapped.kind, ErrorKind::GeneralError);
        assert!(wrapped.message.contains("boom"));
        assert!(wrapped.sanitize_for_client().source.is_none());
    }

    #[test]
    fn to_json_has_feathers_shape() {
        let body = DeskError::unprocessable("Invalid")
            .with_errors(json!({"name": "required"}))
            .to_json();
        assert_eq!(body["name"], "Unprocessable");
        assert_eq!(body["code"], 422);
        assert_eq!(body["className"], "unprocessable");
        assert_eq!(body["errors"]["name"], "required");
    }
}
