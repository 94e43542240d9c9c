//! HTTP handlers for the REST API.
//!
//! Each handler builds a fresh repository from [`AppState`], delegates to
//! [`crate::services`] and renders the returned envelope. Extractor failures
//! are answered with 400 envelopes instead of axum's plain-text rejections.

use axum::{
    extract::{
        rejection::{JsonRejection, PathRejection},
        Path, State,
    },
    http::{header, StatusCode},
    response::{IntoResponse, Response},
    Json,
};

use super::dto::HealthResponse;
use super::error::{json_rejection, path_rejection};
use super::state::AppState;
use crate::api::{VillaCreateDto, VillaUpdateDto};
use crate::services;

/// Path under which villa routes are mounted.
pub const VILLA_ROUTE: &str = "/api/VillaAPI";

// =============================================================================
// Health Check
// =============================================================================

/// GET /health
pub async fn health_check(State(state): State<AppState>) -> Json<HealthResponse> {
    let database = services::health_check(&state.repository()).await;

    Json(HealthResponse {
        status: "ok".to_string(),
        version: env!("CARGO_PKG_VERSION").to_string(),
        database,
    })
}

// =============================================================================
// Villa CRUD
// =============================================================================

/// GET /api/VillaAPI
pub async fn list_villas(State(state): State<AppState>) -> Response {
    services::list_villas(&state.repository())
        .await
        .into_response()
}

/// GET /api/VillaAPI/{id}
pub async fn get_villa(
    State(state): State<AppState>,
    id: Result<Path<i64>, PathRejection>,
) -> Response {
    let Path(id) = match id {
        Ok(id) => id,
        Err(rejection) => return path_rejection(rejection),
    };
    services::get_villa(&mut state.repository(), id)
        .await
        .into_response()
}

/// POST /api/VillaAPI
///
/// A 201 response carries `Location: /api/VillaAPI/{id}`.
pub async fn create_villa(
    State(state): State<AppState>,
    body: Result<Json<VillaCreateDto>, JsonRejection>,
) -> Response {
    let Json(body) = match body {
        Ok(body) => body,
        Err(rejection) => return json_rejection(rejection),
    };

    let response = services::create_villa(&mut state.repository(), Some(body)).await;
    match response.result().map(|villa| villa.id) {
        Some(id) if response.is_success() => (
            StatusCode::CREATED,
            [(header::LOCATION, format!("{}/{}", VILLA_ROUTE, id))],
            Json(response),
        )
            .into_response(),
        _ => response.into_response(),
    }
}

/// PUT /api/VillaAPI/{id}
pub async fn update_villa(
    State(state): State<AppState>,
    id: Result<Path<i64>, PathRejection>,
    body: Result<Json<VillaUpdateDto>, JsonRejection>,
) -> Response {
    let Path(id) = match id {
        Ok(id) => id,
        Err(rejection) => return path_rejection(rejection),
    };
    let Json(body) = match body {
        Ok(body) => body,
        Err(rejection) => return json_rejection(rejection),
    };
    services::update_villa(&mut state.repository(), id, Some(body))
        .await
        .into_response()
}

/// DELETE /api/VillaAPI/{id}
pub async fn delete_villa(
    State(state): State<AppState>,
    id: Result<Path<i64>, PathRejection>,
) -> Response {
    let Path(id) = match id {
        Ok(id) => id,
        Err(rejection) => return path_rejection(rejection),
    };
    services::delete_villa(&mut state.repository(), id)
        .await
        .into_response()
}
