use chrono::{DateTime, Utc};
use diesel::prelude::*;

use super::schema::villas;
use crate::models::{NewVilla, Villa, VillaId};

#[derive(Debug, Clone, Queryable, Selectable)]
#[diesel(table_name = villas)]
#[diesel(check_for_backend(diesel::pg::Pg))]
pub struct VillaRow {
    pub id: i64,
    pub name: String,
    pub details: String,
    pub rate: f64,
    pub sqft: i32,
    pub occupancy: i32,
    pub image_url: String,
    pub amenity: String,
    pub created_date: DateTime<Utc>,
    pub updated_date: DateTime<Utc>,
}

#[derive(Debug, Clone, Insertable)]
#[diesel(table_name = villas)]
pub struct NewVillaRow {
    pub name: String,
    pub details: String,
    pub rate: f64,
    pub sqft: i32,
    pub occupancy: i32,
    pub image_url: String,
    pub amenity: String,
    pub created_date: DateTime<Utc>,
    pub updated_date: DateTime<Utc>,
}

/// Full-row changeset; `id` is the update target, never a column to set.
#[derive(Debug, Clone, AsChangeset)]
#[diesel(table_name = villas)]
pub struct VillaChangeset {
    pub name: String,
    pub details: String,
    pub rate: f64,
    pub sqft: i32,
    pub occupancy: i32,
    pub image_url: String,
    pub amenity: String,
    pub created_date: DateTime<Utc>,
    pub updated_date: DateTime<Utc>,
}

impl NewVillaRow {
    pub fn from_draft(draft: NewVilla, now: DateTime<Utc>) -> Self {
        Self {
            name: draft.name,
            details: draft.details,
            rate: draft.rate,
            sqft: draft.sqft,
            occupancy: draft.occupancy,
            image_url: draft.image_url,
            amenity: draft.amenity,
            created_date: now,
            updated_date: now,
        }
    }
}

impl From<&Villa> for VillaChangeset {
    fn from(villa: &Villa) -> Self {
        Self {
            name: villa.name.clone(),
            details: villa.details.clone(),
            rate: villa.rate,
            sqft: villa.sqft,
            occupancy: villa.occupancy,
            image_url: villa.image_url.clone(),
            amenity: villa.amenity.clone(),
            created_date: villa.created_date,
            updated_date: villa.updated_date,
        }
    }
}

impl From<VillaRow> for Villa {
    fn from(row: VillaRow) -> Self {
        Villa {
            id: VillaId(row.id),
            name: row.name,
            details: row.details,
            rate: row.rate,
            sqft: row.sqft,
            occupancy: row.occupancy,
            image_url: row.image_url,
            amenity: row.amenity,
            created_date: row.created_date,
            updated_date: row.updated_date,
        }
    }
}
