use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};

use crate::models::ApiResponse;

pub const INTERNAL_SERVER_ERROR: &str = "Internal server error";
pub const NOT_FOUND: &str = "Not found";
pub const METHOD_NOT_ALLOWED: &str = "Method not allowed";

// Contact
pub const INVALID_JSON_BODY: &str = "Invalid JSON body";
pub const MISSING_CONTACT_FIELDS: &str = "Missing required contact fields";
pub const INVALID_EMAIL_FORMAT: &str = "Invalid email format";
pub const MISSING_ENVIRONMENT: &str =
    "Missing environment variables. Configure RESEND_API_KEY and CONTACT_TO_EMAIL.";
pub const RESEND_REQUEST_FAILED: &str = "Resend request failed";

pub fn internal_server_error(err: impl Into<anyhow::Error>) -> Response {
    let err = err.into();
    tracing::error!("internal server error: {err}");
    error(StatusCode::INTERNAL_SERVER_ERROR, INTERNAL_SERVER_ERROR)
}

pub fn error(code: StatusCode, error: &'static str) -> Response {
    (code, Json(ApiResponse::error(error))).into_response()
}

pub fn error_with_details(code: StatusCode, error: &'static str, details: String) -> Response {
    (code, Json(ApiResponse::error(error).with_details(details))).into_response()
}
