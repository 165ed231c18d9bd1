//! Animal listing and gallery image models.

use pawlink_core::animal::{AnimalType, Gender, ListingStatus};
use pawlink_core::listing::ListingFields;
use pawlink_core::types::{DbId, Money, Timestamp};
use serde::Serialize;
use sqlx::FromRow;

/// A row from the `animals` table.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct Animal {
    pub id: DbId,
    pub owner_id: DbId,
    pub name: String,
    #[sqlx(try_from = "String")]
    pub animal_type: AnimalType,
    pub breed: Option<String>,
    pub age: Option<i32>,
    #[sqlx(try_from = "String")]
    pub gender: Gender,
    pub description: Option<String>,
    pub location: String,
    pub is_for_sale: bool,
    pub price: Option<Money>,
    pub image_path: Option<String>,
    #[sqlx(try_from = "String")]
    pub status: ListingStatus,
    pub vaccinated: bool,
    pub sterilized: bool,
    pub phone_number: Option<String>,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

impl Animal {
    /// The fields the listing filter inspects.
    pub fn filter_fields(&self) -> ListingFields<'_> {
        ListingFields {
            status: self.status,
            animal_type: self.animal_type,
            is_for_sale: self.is_for_sale,
            name: &self.name,
            breed: self.breed.as_deref(),
            location: &self.location,
            description: self.description.as_deref(),
        }
    }
}

/// DTO for inserting a listing. `price` must already be resolved against
/// `is_for_sale`.
#[derive(Debug, Clone)]
pub struct CreateAnimal {
    pub owner_id: DbId,
    pub name: String,
    pub animal_type: AnimalType,
    pub breed: Option<String>,
    pub age: Option<i32>,
    pub gender: Gender,
    pub description: Option<String>,
    pub location: String,
    pub is_for_sale: bool,
    pub price: Option<Money>,
    pub vaccinated: bool,
    pub sterilized: bool,
    pub phone_number: Option<String>,
}

/// DTO for an edit. Every editable field is replaced.
#[derive(Debug, Clone)]
pub struct UpdateAnimal {
    pub name: String,
    pub animal_type: AnimalType,
    pub breed: Option<String>,
    pub age: Option<i32>,
    pub gender: Gender,
    pub description: Option<String>,
    pub location: String,
    pub is_for_sale: bool,
    pub price: Option<Money>,
    pub status: ListingStatus,
    pub vaccinated: bool,
    pub sterilized: bool,
    pub phone_number: Option<String>,
}

/// A row from the `animal_images` table.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct AnimalImage {
    pub id: DbId,
    pub animal_id: DbId,
    pub image_path: String,
    pub is_primary: bool,
    pub created_at: Timestamp,
}

/// DTO for attaching an uploaded image to a listing.
#[derive(Debug, Clone)]
pub struct CreateAnimalImage {
    pub animal_id: DbId,
    pub image_path: String,
    pub is_primary: bool,
}
