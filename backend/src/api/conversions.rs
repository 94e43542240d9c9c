//! DTO ↔ entity mapping.
//!
//! Conversions are field-for-field and never invent values; server-assigned
//! fields (id on create, timestamps) are supplied explicitly by the caller.

use chrono::{DateTime, Utc};

use super::{VillaCreateDto, VillaDto, VillaUpdateDto};
use crate::models::{NewVilla, Villa};

impl From<&Villa> for VillaDto {
    fn from(villa: &Villa) -> Self {
        Self {
            id: villa.id,
            name: villa.name.clone(),
            details: villa.details.clone(),
            rate: villa.rate,
            occupancy: villa.occupancy,
            sqft: villa.sqft,
            image_url: villa.image_url.clone(),
            amenity: villa.amenity.clone(),
        }
    }
}

impl From<Villa> for VillaDto {
    fn from(villa: Villa) -> Self {
        Self {
            id: villa.id,
            name: villa.name,
            details: villa.details,
            rate: villa.rate,
            occupancy: villa.occupancy,
            sqft: villa.sqft,
            image_url: villa.image_url,
            amenity: villa.amenity,
        }
    }
}

impl From<VillaCreateDto> for NewVilla {
    fn from(dto: VillaCreateDto) -> Self {
        Self {
            name: dto.name,
            details: dto.details,
            rate: dto.rate,
            sqft: dto.sqft,
            occupancy: dto.occupancy,
            image_url: dto.image_url,
            amenity: dto.amenity,
        }
    }
}

impl VillaUpdateDto {
    /// Build the replacement entity, carrying over `created_date` from the
    /// stored villa and stamping `updated_date`.
    pub fn into_villa(self, created_date: DateTime<Utc>, updated_date: DateTime<Utc>) -> Villa {
        Villa {
            id: self.id,
            name: self.name,
            details: self.details,
            rate: self.rate,
            sqft: self.sqft,
            occupancy: self.occupancy,
            image_url: self.image_url,
            amenity: self.amenity,
            created_date,
            updated_date,
        }
    }
}
