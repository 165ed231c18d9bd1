//! Shelter choices and capacity metrics.
//!
//! Capacity metrics are derived on every read and never stored.

use serde::Serialize;

use crate::enums::string_enum;

/// Maximum length for a shelter's or clinic's name.
pub const MAX_ORG_NAME_LENGTH: u64 = 200;

/// Maximum length for a director's name.
pub const MAX_DIRECTOR_LENGTH: u64 = 100;

/// Reviews shown on a shelter detail page.
pub const SHELTER_DETAIL_REVIEWS: i64 = 5;

/// Recent donations shown on a shelter detail page.
pub const SHELTER_DETAIL_DONATIONS: i64 = 10;

/// Listings shown on a shelter page.
pub const SHELTER_DETAIL_ANIMALS: i64 = 6;

/// Top-rated shelters shown on the home page.
pub const HOME_TOP_SHELTERS: i64 = 3;

string_enum! {
    pub enum ShelterType ("shelter_type") {
        State => ("state", "State"),
        Private => ("private", "Private"),
        Volunteer => ("volunteer", "Volunteer"),
        International => ("international", "International"),
    }
}

/// Free places left. Negative when a shelter is over capacity, since the
/// occupancy bound is advisory.
pub fn available_space(capacity: i32, current_occupancy: i32) -> i32 {
    capacity - current_occupancy
}

/// Occupancy as a percentage of capacity, rounded to two decimals.
/// Zero when the capacity is zero.
pub fn occupancy_percentage(capacity: i32, current_occupancy: i32) -> f64 {
    if capacity == 0 {
        return 0.0;
    }
    let pct = f64::from(current_occupancy) / f64::from(capacity) * 100.0;
    (pct * 100.0).round() / 100.0
}

/// Derived capacity figures attached to every shelter response.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct CapacityMetrics {
    pub available_space: i32,
    pub occupancy_percentage: f64,
}

impl CapacityMetrics {
    pub fn compute(capacity: i32, current_occupancy: i32) -> Self {
        Self {
            available_space: available_space(capacity, current_occupancy),
            occupancy_percentage: occupancy_percentage(capacity, current_occupancy),
        }
    }
}
