//! Villa operations.
//!
//! Identifiers arrive as raw `i64` path values and are validated here, before
//! any store round-trip.

use chrono::Utc;
use log::{error, warn};

use super::error::{VillaError, VillaResult};
use crate::api::{ApiResponse, ResponseStatus, VillaCreateDto, VillaDto, VillaUpdateDto};
use crate::db::{Repository, Tracking, VillaFilter};
use crate::models::{NewVilla, Villa, VillaId};

/// Turn an operation outcome into an envelope, logging failures.
fn respond<T>(
    operation: &str,
    status: ResponseStatus,
    outcome: VillaResult<Option<T>>,
) -> ApiResponse<T> {
    match outcome {
        Ok(result) => ApiResponse::success(status, result),
        Err(err) => {
            if err.is_unexpected() {
                error!("{} failed: {}", operation, err);
            } else {
                warn!("{} rejected: {}", operation, err);
            }
            ApiResponse::failure(err.status(), err.to_string())
        }
    }
}

fn validate_id(id: i64) -> VillaResult<VillaId> {
    let id = VillaId::new(id);
    if id.is_positive() {
        Ok(id)
    } else {
        Err(VillaError::invalid_input(format!("Invalid villa id: {}", id)))
    }
}

/// Database status string for the health endpoint.
pub async fn health_check(repo: &Repository<Villa>) -> String {
    match repo.health_check().await {
        Ok(true) => "connected".to_string(),
        Ok(false) => "disconnected".to_string(),
        Err(e) => format!("error: {}", e),
    }
}

/// All villas, 200.
pub async fn list_villas(repo: &Repository<Villa>) -> ApiResponse<Vec<VillaDto>> {
    let outcome = repo
        .get_all()
        .await
        .map(|villas| Some(villas.into_iter().map(VillaDto::from).collect()))
        .map_err(VillaError::from);
    respond("list_villas", ResponseStatus::Ok, outcome)
}

/// One villa by id: 200, 400 for a non-positive id, 404 when missing.
pub async fn get_villa(repo: &mut Repository<Villa>, id: i64) -> ApiResponse<VillaDto> {
    let outcome = try_get_villa(repo, id).await.map(Some);
    respond("get_villa", ResponseStatus::Ok, outcome)
}

async fn try_get_villa(repo: &mut Repository<Villa>, id: i64) -> VillaResult<VillaDto> {
    let id = validate_id(id)?;
    repo.get(&VillaFilter::ById(id), Tracking::Tracked)
        .await?
        .map(VillaDto::from)
        .ok_or(VillaError::NotFound(id))
}

/// Create a villa: 201 with the stored villa, 400 for a missing body or a
/// name already in use.
///
/// The name check and the insert are separate store calls, so two
/// concurrent creates with the same name can both succeed.
pub async fn create_villa(
    repo: &mut Repository<Villa>,
    body: Option<VillaCreateDto>,
) -> ApiResponse<VillaDto> {
    let outcome = try_create_villa(repo, body).await.map(Some);
    respond("create_villa", ResponseStatus::Created, outcome)
}

async fn try_create_villa(
    repo: &mut Repository<Villa>,
    body: Option<VillaCreateDto>,
) -> VillaResult<VillaDto> {
    let body = body.ok_or_else(|| VillaError::invalid_input("Request body is required"))?;

    let existing = repo
        .get(&VillaFilter::ByName(body.name.clone()), Tracking::Tracked)
        .await?;
    if existing.is_some() {
        return Err(VillaError::DuplicateResource);
    }

    let created = repo.create(NewVilla::from(body)).await?;
    Ok(VillaDto::from(&created))
}

/// Replace a villa: 200 with the new state, 400 for a bad id, missing body
/// or path/body id mismatch, 404 when missing.
///
/// `created_date` is carried over from the stored villa; `updated_date` is
/// stamped now.
pub async fn update_villa(
    repo: &mut Repository<Villa>,
    id: i64,
    body: Option<VillaUpdateDto>,
) -> ApiResponse<VillaDto> {
    let outcome = try_update_villa(repo, id, body).await.map(Some);
    respond("update_villa", ResponseStatus::Ok, outcome)
}

async fn try_update_villa(
    repo: &mut Repository<Villa>,
    id: i64,
    body: Option<VillaUpdateDto>,
) -> VillaResult<VillaDto> {
    let id = validate_id(id)?;
    let body = body.ok_or_else(|| VillaError::invalid_input("Request body is required"))?;
    if body.id != id {
        return Err(VillaError::invalid_input(format!(
            "Villa id {} does not match body id {}",
            id, body.id
        )));
    }

    let current = repo
        .get(&VillaFilter::ById(id), Tracking::Untracked)
        .await?
        .ok_or(VillaError::NotFound(id))?;

    let replacement = body.into_villa(current.created_date, Utc::now());
    repo.update(replacement.clone()).await?;
    Ok(VillaDto::from(replacement))
}

/// Delete a villa: 200 with no payload, 400 for a bad id, 404 when missing.
pub async fn delete_villa(repo: &mut Repository<Villa>, id: i64) -> ApiResponse<()> {
    let outcome = try_delete_villa(repo, id).await.map(|()| None);
    respond("delete_villa", ResponseStatus::Ok, outcome)
}

async fn try_delete_villa(repo: &mut Repository<Villa>, id: i64) -> VillaResult<()> {
    let id = validate_id(id)?;
    let villa = repo
        .get(&VillaFilter::ById(id), Tracking::Tracked)
        .await?
        .ok_or(VillaError::NotFound(id))?;
    repo.remove(&villa).await?;
    Ok(())
}
