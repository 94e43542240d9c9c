//! Envelope responses for success, rejection and panic paths.

use std::any::Any;

use axum::{
    extract::rejection::{JsonRejection, PathRejection},
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde::Serialize;

use crate::api::{ApiResponse, ResponseStatus};

impl<T: Serialize> IntoResponse for ApiResponse<T> {
    fn into_response(self) -> Response {
        let status = StatusCode::from_u16(self.status_code().code())
            .unwrap_or(StatusCode::INTERNAL_SERVER_ERROR);
        (status, Json(self)).into_response()
    }
}

/// 400 envelope for a path segment that is not an integer id.
pub fn path_rejection(rejection: PathRejection) -> Response {
    tracing::warn!("Rejected path: {}", rejection.body_text());
    ApiResponse::<()>::failure(ResponseStatus::BadRequest, rejection.body_text()).into_response()
}

/// 400 envelope for a missing or malformed JSON body.
pub fn json_rejection(rejection: JsonRejection) -> Response {
    tracing::warn!("Rejected body: {}", rejection.body_text());
    ApiResponse::<()>::failure(ResponseStatus::BadRequest, rejection.body_text()).into_response()
}

/// 500 envelope for a handler that panicked.
pub fn handle_panic(err: Box<dyn Any + Send + 'static>) -> Response {
    let detail = if let Some(s) = err.downcast_ref::<String>() {
        s.clone()
    } else if let Some(s) = err.downcast_ref::<&str>() {
        s.to_string()
    } else {
        "unknown panic".to_string()
    };
    tracing::error!("Handler panicked: {}", detail);

    ApiResponse::<()>::failure(ResponseStatus::InternalServerError, detail).into_response()
}
