//! Public API surface: wire DTOs and the response envelope.
//!
//! All DTOs serialize with camelCase field names.

pub mod conversions;
pub mod response;

pub use response::{ApiResponse, ResponseStatus};

use serde::{Deserialize, Serialize};

use crate::models::VillaId;

/// A villa as returned to clients.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct VillaDto {
    pub id: VillaId,
    pub name: String,
    #[serde(default)]
    pub details: String,
    pub rate: f64,
    #[serde(default)]
    pub occupancy: i32,
    #[serde(default)]
    pub sqft: i32,
    #[serde(default)]
    pub image_url: String,
    #[serde(default)]
    pub amenity: String,
}

/// Request body for creating a villa. The id is assigned by the store.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct VillaCreateDto {
    pub name: String,
    #[serde(default)]
    pub details: String,
    pub rate: f64,
    #[serde(default)]
    pub occupancy: i32,
    #[serde(default)]
    pub sqft: i32,
    #[serde(default)]
    pub image_url: String,
    #[serde(default)]
    pub amenity: String,
}

/// Request body for replacing a villa. `id` must match the path id.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct VillaUpdateDto {
    pub id: VillaId,
    pub name: String,
    #[serde(default)]
    pub details: String,
    pub rate: f64,
    #[serde(default)]
    pub occupancy: i32,
    #[serde(default)]
    pub sqft: i32,
    #[serde(default)]
    pub image_url: String,
    #[serde(default)]
    pub amenity: String,
}
