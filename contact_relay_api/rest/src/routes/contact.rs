use std::sync::Arc;

use axum::{
    body::Bytes,
    extract::{rejection::BytesRejection, State},
    http::StatusCode,
    response::{IntoResponse, Response},
    routing, Json, Router,
};
use contact_relay_core_contact_contracts::{ContactFeatureService, ContactSubmitError};
use contact_relay_models::contact::{ContactFormSubmission, ContactValidationError};
use tracing::debug;

use crate::{
    errors::{
        error, error_with_details, INVALID_EMAIL_FORMAT, INVALID_JSON_BODY, METHOD_NOT_ALLOWED,
        MISSING_CONTACT_FIELDS, MISSING_ENVIRONMENT, RESEND_REQUEST_FAILED,
    },
    models::ApiResponse,
};

pub const CONTACT_ROUTE: &str = "/api/contact";

pub fn router(service: Arc<impl ContactFeatureService>) -> Router<()> {
    Router::new()
        .route(
            CONTACT_ROUTE,
            routing::post(submit).fallback(method_not_allowed),
        )
        .with_state(service)
}

async fn submit(
    service: State<Arc<impl ContactFeatureService>>,
    body: Result<Bytes, BytesRejection>,
) -> Response {
    // Includes bodies over the default size limit.
    let body = match body {
        Ok(body) => body,
        Err(err) => {
            debug!("failed to read request body: {err}");
            return error(StatusCode::BAD_REQUEST, INVALID_JSON_BODY);
        }
    };

    let submission = match ContactFormSubmission::parse(&body) {
        Ok(submission) => submission,
        Err(err) => {
            debug!("{err}");
            return error(StatusCode::BAD_REQUEST, INVALID_JSON_BODY);
        }
    };

    match service.submit(submission).await {
        Ok(()) => Json(ApiResponse::success()).into_response(),
        Err(ContactSubmitError::Invalid(ContactValidationError::MissingFields)) => {
            error(StatusCode::BAD_REQUEST, MISSING_CONTACT_FIELDS)
        }
        Err(ContactSubmitError::Invalid(ContactValidationError::InvalidEmail)) => {
            error(StatusCode::BAD_REQUEST, INVALID_EMAIL_FORMAT)
        }
        Err(ContactSubmitError::MissingConfig) => {
            error(StatusCode::INTERNAL_SERVER_ERROR, MISSING_ENVIRONMENT)
        }
        Err(ContactSubmitError::Send(err)) => error_with_details(
            StatusCode::BAD_GATEWAY,
            RESEND_REQUEST_FAILED,
            err.details(),
        ),
    }
}

async fn method_not_allowed() -> Response {
    error(StatusCode::METHOD_NOT_ALLOWED, METHOD_NOT_ALLOWED)
}
