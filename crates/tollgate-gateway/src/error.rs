//! Error types for the gateway middleware.

use axum::Json;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use serde_json::json;
use thiserror::Error;
use tollgate_audit::AuditError;
use tollgate_body::BodyError;

/// Failures the middleware answers on behalf of the handler.
#[derive(Debug, Error)]
pub enum GatewayError {
    /// The request body could not be decoded.
    #[error(transparent)]
    Body(#[from] BodyError),

    /// A request or response body could not be buffered.
    #[error("failed to read body: {0}")]
    ReadBody(axum::Error),

    /// The audit record could not be written and auditing is fail-closed.
    #[error("failed to write audit record: {0}")]
    Audit(#[from] AuditError),
}

impl GatewayError {
    pub fn status(&self) -> StatusCode {
        match self {
            Self::Body(err) => err.status(),
            Self::ReadBody(_) => StatusCode::BAD_REQUEST,
            Self::Audit(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    pub fn code(&self) -> &'static str {
        match self {
            Self::Body(err) => err.code(),
            Self::ReadBody(_) => "InvalidBodyContent",
            Self::Audit(_) => "ServerError",
        }
    }
}

impl IntoResponse for GatewayError {
    fn into_response(self) -> Response {
        let status = self.status();
        let body = json!({
            "type": "error",
            "status": status.as_u16(),
            "code": self.code(),
            "message": self.to_string(),
        });
        (status, Json(body)).into_response()
    }
}
