use std::borrow::Cow;

use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use serde::Serialize;
use serde_json::{Map, Value};

/// Uniform response body: `{ "success": bool, "message": string, ...extra }`.
///
/// Every endpoint, success or failure, answers with this shape.
#[derive(Debug, Clone)]
pub struct Envelope {
    status: StatusCode,
    success: bool,
    message: Cow<'static, str>,
    extra: Map<String, Value>,
}

impl Envelope {
    pub fn success(status: StatusCode, message: impl Into<Cow<'static, str>>) -> Self {
        Self {
            status,
            success: true,
            message: message.into(),
            extra: Map::new(),
        }
    }

    pub fn failure(status: StatusCode, message: impl Into<Cow<'static, str>>) -> Self {
        Self {
            status,
            success: false,
            message: message.into(),
            extra: Map::new(),
        }
    }

    /// Attach an extra top-level field. `success` and `message` cannot be overridden.
    ///
    /// Fails if `value` does not serialize to JSON; the envelope is never sent without it.
    pub fn with(
        mut self,
        key: &'static str,
        value: impl Serialize,
    ) -> Result<Self, serde_json::Error> {
        if key == "success" || key == "message" {
            return Ok(self);
        }
        let value = serde_json::to_value(value)?;
        self.extra.insert(key.to_owned(), value);
        Ok(self)
    }

    pub fn status(&self) -> StatusCode {
        self.status
    }

    pub fn message(&self) -> &str {
        &self.message
    }

    fn into_body(self) -> Value {
        let mut body = Map::with_capacity(self.extra.len() + 2);
        body.insert("success".to_owned(), Value::Bool(self.success));
        body.insert("message".to_owned(), Value::String(self.message.into_owned()));
        body.extend(self.extra);
        Value::Object(body)
    }
}

impl IntoResponse for Envelope {
    fn into_response(self) -> Response {
        let status = self.status;
        (status, axum::Json(self.into_body())).into_response()
    }
}
