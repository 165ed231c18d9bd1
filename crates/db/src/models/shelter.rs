//! Shelter entity model and DTOs.

use chrono::NaiveDate;
use pawlink_core::shelter::{CapacityMetrics, ShelterType, MAX_DIRECTOR_LENGTH, MAX_ORG_NAME_LENGTH};
use pawlink_core::types::{DbId, Timestamp};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use validator::Validate;

/// A row from the `shelters` table.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct Shelter {
    pub id: DbId,
    pub name: String,
    #[sqlx(try_from = "String")]
    pub shelter_type: ShelterType,
    pub description: String,
    pub address: String,
    pub phone_number: String,
    pub email: Option<String>,
    pub website: Option<String>,
    pub capacity: i32,
    pub current_occupancy: i32,
    pub director: String,
    pub founded_date: Option<NaiveDate>,
    pub image_path: Option<String>,
    pub rating: f64,
    pub is_active: bool,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

impl Shelter {
    pub fn metrics(&self) -> CapacityMetrics {
        CapacityMetrics::compute(self.capacity, self.current_occupancy)
    }
}

/// A shelter with its derived capacity figures.
#[derive(Debug, Clone, Serialize)]
pub struct ShelterWithMetrics {
    #[serde(flatten)]
    pub shelter: Shelter,
    #[serde(flatten)]
    pub metrics: CapacityMetrics,
}

impl From<Shelter> for ShelterWithMetrics {
    fn from(shelter: Shelter) -> Self {
        let metrics = shelter.metrics();
        Self { shelter, metrics }
    }
}

/// DTO for creating a new shelter.
#[derive(Debug, Clone, Deserialize, Validate)]
pub struct CreateShelter {
    #[validate(length(min = 1, max = MAX_ORG_NAME_LENGTH))]
    pub name: String,
    pub shelter_type: ShelterType,
    #[serde(default)]
    pub description: String,
    #[validate(length(min = 1, max = 300))]
    pub address: String,
    #[validate(length(min = 1, max = 20))]
    pub phone_number: String,
    #[validate(email(message = "Enter a valid email address"))]
    pub email: Option<String>,
    #[validate(url(message = "Enter a valid URL"))]
    pub website: Option<String>,
    #[validate(range(min = 0))]
    pub capacity: i32,
    #[validate(range(min = 0))]
    pub current_occupancy: Option<i32>,
    #[serde(default)]
    #[validate(length(max = MAX_DIRECTOR_LENGTH))]
    pub director: String,
    pub founded_date: Option<NaiveDate>,
    /// Defaults to `true`.
    pub is_active: Option<bool>,
}

/// Site-wide capacity totals over active shelters.
#[derive(Debug, Clone, Default, FromRow, Serialize)]
pub struct CapacityTotals {
    pub shelters: i64,
    pub capacity: i64,
    pub current_occupancy: i64,
    pub available_space: i64,
}

/// Optional filters for the shelter list. Only active shelters are listed.
#[derive(Debug, Clone, Default)]
pub struct ShelterFilter {
    pub shelter_type: Option<ShelterType>,
    /// `%term%` pattern matched against name, address and description.
    pub search_pattern: Option<String>,
}
