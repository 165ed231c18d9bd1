//! Veterinarian (clinic) entity model and DTOs.

use pawlink_core::shelter::{MAX_DIRECTOR_LENGTH, MAX_ORG_NAME_LENGTH};
use pawlink_core::types::{DbId, Timestamp};
use pawlink_core::veterinarian::{ClinicType, ServiceCode, ServiceSet};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use validator::Validate;

/// A row from the `veterinarians` table.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct Veterinarian {
    pub id: DbId,
    pub name: String,
    #[sqlx(try_from = "String")]
    pub clinic_type: ClinicType,
    pub description: String,
    pub address: String,
    pub phone_number: String,
    pub email: Option<String>,
    pub website: Option<String>,
    #[sqlx(try_from = "Vec<String>")]
    pub services: ServiceSet,
    pub working_hours: String,
    pub director: String,
    pub doctors_count: i32,
    pub image_path: Option<String>,
    pub is_emergency: bool,
    pub rating: f64,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

/// DTO for creating a new clinic.
#[derive(Debug, Clone, Deserialize, Validate)]
pub struct CreateVeterinarian {
    #[validate(length(min = 1, max = MAX_ORG_NAME_LENGTH))]
    pub name: String,
    pub clinic_type: ClinicType,
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
    #[serde(default)]
    pub services: ServiceSet,
    #[serde(default)]
    #[validate(length(max = 100))]
    pub working_hours: String,
    #[serde(default)]
    #[validate(length(max = MAX_DIRECTOR_LENGTH))]
    pub director: String,
    #[validate(range(min = 0))]
    pub doctors_count: Option<i32>,
    #[serde(default)]
    pub is_emergency: bool,
}

/// Optional filters for the clinic list.
#[derive(Debug, Clone, Default)]
pub struct VeterinarianFilter {
    pub clinic_type: Option<ClinicType>,
    pub service: Option<ServiceCode>,
    pub emergency_only: bool,
    /// `%term%` pattern matched against name, address, description and
    /// service codes.
    pub search_pattern: Option<String>,
}
