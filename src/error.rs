use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use serde_json::json;

use crate::form::{FieldErrors, GENERAL_ERROR};

#[derive(Debug)]
pub enum AppError {
    NotFound(String),
    BadRequest(String),
    Validation(FieldErrors),
    Internal(String),
}

impl AppError {
    pub fn form_not_found() -> Self {
        AppError::NotFound("Form not found".to_string())
    }

    pub fn status(&self) -> StatusCode {
        match self {
            AppError::NotFound(_) => StatusCode::NOT_FOUND,
            AppError::BadRequest(_) => StatusCode::BAD_REQUEST,
            AppError::Validation(_) => StatusCode::UNPROCESSABLE_ENTITY,
            AppError::Internal(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

impl std::fmt::Display for AppError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            AppError::NotFound(msg) => write!(f, "Not Found: {msg}"),
            AppError::BadRequest(msg) => write!(f, "Bad Request: {msg}"),
            AppError::Validation(errors) => {
                write!(f, "Validation failed for {} field(s)", errors.len())
            }
            AppError::Internal(msg) => write!(f, "Internal Error: {msg}"),
        }
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let status = self.status();
        let body = match self {
            AppError::NotFound(msg) | AppError::BadRequest(msg) => json!({ "error": msg }),
            AppError::Validation(errors) => json!({ "error": GENERAL_ERROR, "fields": errors }),
            AppError::Internal(msg) => {
                tracing::error!("Internal error: {msg}");
                json!({ "error": "Internal server error" })
            }
        };

        (status, axum::Json(body)).into_response()
    }
}

impl From<String> for AppError {
    fn from(msg: String) -> Self {
        AppError::BadRequest(msg)
    }
}
