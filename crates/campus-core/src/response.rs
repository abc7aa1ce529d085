use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};

/// Success response envelope: `{message, reasonStatusCode, metadata, status}`.
///
/// Used by the auth endpoints; resource endpoints return their documented
/// plain JSON shapes directly.
#[derive(Debug)]
pub struct SuccessResponse {
    message: String,
    reason_status_code: &'static str,
    metadata: serde_json::Value,
    status: StatusCode,
}

impl SuccessResponse {
    /// 200 envelope with the default "Success" message.
    pub fn ok(metadata: serde_json::Value) -> Self {
        Self {
            message: "Success".to_owned(),
            reason_status_code: "Success",
            metadata,
            status: StatusCode::OK,
        }
    }

    /// 201 envelope with the default "Created!" message.
    pub fn created(metadata: serde_json::Value) -> Self {
        Self {
            message: "Created!".to_owned(),
            reason_status_code: "Created!",
            metadata,
            status: StatusCode::CREATED,
        }
    }

    /// Replace the default message.
    pub fn with_message(mut self, message: impl Into<String>) -> Self {
        self.message = message.into();
        self
    }
}

impl IntoResponse for SuccessResponse {
    fn into_response(self) -> Response {
        let body = serde_json::json!({
            "message": self.message,
            "reasonStatusCode": self.reason_status_code,
            "metadata": self.metadata,
            "status": self.status.as_u16(),
        });
        (self.status, axum::Json(body)).into_response()
    }
}
