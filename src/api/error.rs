use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use planner_core::PlanError;
use serde_json::json;
use thiserror::Error;

use crate::export::ExportError;

/// Error returned by API and export handlers, rendered as
/// `{"status": "error", "message": ...}`.
#[derive(Debug, Error)]
pub enum ApiError {
    #[error("{0}")]
    BadRequest(String),

    #[error("Internal server error: {0:#}")]
    Internal(anyhow::Error),

    #[error("Error generating Excel: {0}")]
    Export(#[from] ExportError),

    /// HTML page could not be rendered.
    #[error("Failed to render page: {0}")]
    Template(#[from] askama::Error),
}

impl ApiError {
    pub fn status(&self) -> StatusCode {
        match self {
            Self::BadRequest(_) => StatusCode::BAD_REQUEST,
            Self::Internal(_) | Self::Export(_) | Self::Template(_) => {
                StatusCode::INTERNAL_SERVER_ERROR
            }
        }
    }
}

impl From<anyhow::Error> for ApiError {
    fn from(err: anyhow::Error) -> Self {
        match PlanError::find(&err) {
            Some(invalid) => Self::BadRequest(invalid.to_string()),
            None => Self::Internal(err),
        }
    }
}

impl From<PlanError> for ApiError {
    fn from(err: PlanError) -> Self {
        Self::BadRequest(err.to_string())
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status = self.status();
        let message = self.to_string();
        if status.is_server_error() {
            tracing::error!("{message}");
        } else {
            tracing::debug!("rejected request: {message}");
        }

        let body = json!({
            "status": "error",
            "message": message,
        });
        (status, Json(body)).into_response()
    }
}
