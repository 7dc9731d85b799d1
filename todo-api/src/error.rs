//! Error type for the todo API.
//!
//! `NotFound` is the only domain failure. Malformed request bodies never
//! reach the store; axum's `Json` extractor rejects them first.

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde_json::json;

#[derive(Debug, thiserror::Error, PartialEq, Eq)]
pub enum ApiError {
    /// No todo with the requested id exists.
    #[error("Todo not found")]
    NotFound,
}

impl ApiError {
    pub fn status(&self) -> StatusCode {
        match self {
            ApiError::NotFound => StatusCode::NOT_FOUND,
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        (self.status(), Json(json!({ "detail": self.to_string() }))).into_response()
    }
}
