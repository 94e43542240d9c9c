//! The `Villa` entity and its insertion draft.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::db::filter::VillaFilter;
use crate::db::store::Entity;
use crate::define_id_type;

define_id_type!(i64, VillaId);

/// A persisted villa.
///
/// `id` and `created_date` never change once the store has assigned them.
/// `updated_date` is re-stamped by whoever builds the replacement entity;
/// stores do not touch it on update.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Villa {
    pub id: VillaId,
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

/// Villa fields supplied by a caller before the store assigns identity and
/// timestamps.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NewVilla {
    pub name: String,
    pub details: String,
    pub rate: f64,
    pub sqft: i32,
    pub occupancy: i32,
    pub image_url: String,
    pub amenity: String,
}

impl NewVilla {
    /// Materialize the draft with store-assigned identity. Both timestamps
    /// are set to `now`.
    pub fn into_villa(self, id: VillaId, now: DateTime<Utc>) -> Villa {
        Villa {
            id,
            name: self.name,
            details: self.details,
            rate: self.rate,
            sqft: self.sqft,
            occupancy: self.occupancy,
            image_url: self.image_url,
            amenity: self.amenity,
            created_date: now,
            updated_date: now,
        }
    }
}

impl Entity for Villa {
    type Id = VillaId;
    type Filter = VillaFilter;
    type Draft = NewVilla;

    const RESOURCE: &'static str = "Villa";

    fn id(&self) -> VillaId {
        self.id
    }
}
