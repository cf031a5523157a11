use axum::{
    Json,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use serde::Serialize;

use crate::error::{ErrorKind, PlaintsError};

const STORE_UNAVAILABLE_MESSAGE: &str =
    "The complaint store is unavailable. Please try again later.";

#[derive(Debug, Serialize)]
pub struct ErrorResponse {
    pub error: String,
}

/// A [`PlaintsError`] on its way out of a handler.
#[derive(Debug)]
pub struct ApiError(pub PlaintsError);

impl From<PlaintsError> for ApiError {
    fn from(err: PlaintsError) -> Self {
        Self(err)
    }
}

impl ApiError {
    pub fn status(&self) -> StatusCode {
        match &self.0 {
            PlaintsError::FileTooLarge { .. } => StatusCode::PAYLOAD_TOO_LARGE,
            PlaintsError::UnsupportedFileType(_) => StatusCode::UNSUPPORTED_MEDIA_TYPE,
            err => match err.kind() {
                ErrorKind::Validation => StatusCode::BAD_REQUEST,
                ErrorKind::NotFound => StatusCode::NOT_FOUND,
                ErrorKind::Unauthorized => StatusCode::UNAUTHORIZED,
                ErrorKind::StoreUnavailable => StatusCode::SERVICE_UNAVAILABLE,
                ErrorKind::Internal => StatusCode::INTERNAL_SERVER_ERROR,
            },
        }
    }

    /// Message shown to the client. Storage details stay in the logs.
    pub fn message(&self) -> String {
        match self.0.kind() {
            ErrorKind::StoreUnavailable => STORE_UNAVAILABLE_MESSAGE.to_string(),
            ErrorKind::Internal => "Internal server error".to_string(),
            _ => self.0.to_string(),
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status = self.status();
        if status.is_server_error() {
            tracing::error!(status = %status, error = %self.0, "Request failed");
        } else {
            tracing::debug!(status = %status, error = %self.0, "Request rejected");
        }
        (
            status,
            Json(ErrorResponse {
                error: self.message(),
            }),
        )
            .into_response()
    }
}
