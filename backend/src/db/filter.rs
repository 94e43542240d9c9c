//! Typed query filters for villas.

use crate::models::{Villa, VillaId};

use super::store::EntityFilter;

/// Lookup criteria accepted by villa stores.
#[derive(Debug, Clone, PartialEq)]
pub enum VillaFilter {
    ById(VillaId),
    /// Exact, case-sensitive name match.
    ByName(String),
}

impl VillaFilter {
    pub fn by_id(id: impl Into<VillaId>) -> Self {
        Self::ById(id.into())
    }

    pub fn by_name(name: impl Into<String>) -> Self {
        Self::ByName(name.into())
    }
}

impl EntityFilter<Villa> for VillaFilter {
    fn matches(&self, villa: &Villa) -> bool {
        match self {
            Self::ById(id) => villa.id == *id,
            Self::ByName(name) => villa.name == *name,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::NewVilla;
    use chrono::Utc;

    fn villa(id: i64, name: &str) -> Villa {
        NewVilla {
            name: name.to_string(),
            details: String::new(),
            rate: 100.0,
            sqft: 300,
            occupancy: 2,
            image_url: String::new(),
            amenity: String::new(),
        }
        .into_villa(VillaId::new(id), Utc::now())
    }

    #[test]
    fn test_by_id_matches_only_that_id() {
        let filter = VillaFilter::by_id(2);
        assert!(filter.matches(&villa(2, "Pool")));
        assert!(!filter.matches(&villa(3, "Pool")));
    }

    #[test]
    fn test_by_name_is_exact() {
        let filter = VillaFilter::by_name("Pool Villa");
        assert!(filter.matches(&villa(1, "Pool Villa")));
        assert!(!filter.matches(&villa(1, "pool villa")));
        assert!(!filter.matches(&villa(1, "Pool Villa ")));
    }
}
