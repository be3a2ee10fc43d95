//! HTTP error mapping to `{ "error": ... }` bodies

use crate::contract::RegistryError;
use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde::Serialize;

/// Error response returned by every endpoint
#[derive(Debug, Serialize)]
pub struct Problem {
    /// The HTTP status code
    #[serde(skip)]
    pub status: StatusCode,

    /// A human-readable explanation of this occurrence
    pub error: String,
}

impl Problem {
    pub fn new(status: StatusCode, error: impl Into<String>) -> Self {
        Self {
            status,
            error: error.into(),
        }
    }
}

impl IntoResponse for Problem {
    fn into_response(self) -> Response {
        (self.status, Json(self)).into_response()
    }
}

impl From<RegistryError> for Problem {
    fn from(error: RegistryError) -> Self {
        map_domain_error(error)
    }
}

/// Map domain errors to HTTP responses
pub fn map_domain_error(error: RegistryError) -> Problem {
    match error {
        RegistryError::Validation { message } => Problem::new(StatusCode::BAD_REQUEST, message),

        RegistryError::NotFound { .. } => {
            Problem::new(StatusCode::NOT_FOUND, "Submission not found")
        }

        RegistryError::UploadTooLarge { field, limit } => Problem::new(
            StatusCode::PAYLOAD_TOO_LARGE,
            format!("File '{field}' exceeds the {limit} byte upload limit"),
        ),

        RegistryError::Storage { message } => {
            Problem::new(StatusCode::INTERNAL_SERVER_ERROR, message)
        }
    }
}
