//! Repository for the `animal_images` table.

use pawlink_core::types::DbId;
use sqlx::PgPool;

use crate::models::animal::{AnimalImage, CreateAnimalImage};

const COLUMNS: &str = "id, animal_id, image_path, is_primary, created_at";

/// Provides gallery operations for listing images.
pub struct AnimalImageRepo;

impl AnimalImageRepo {
    /// Attach an image to a listing, returning the created row.
    pub async fn create(pool: &PgPool, input: &CreateAnimalImage) -> Result<AnimalImage, sqlx::Error> {
        let query = format!(
            "INSERT INTO animal_images (animal_id, image_path, is_primary)
             VALUES ($1, $2, $3)
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, AnimalImage>(&query)
            .bind(input.animal_id)
            .bind(&input.image_path)
            .bind(input.is_primary)
            .fetch_one(pool)
            .await
    }

    /// Gallery for a listing: primary images first, then newest.
    pub async fn list_for_animal(pool: &PgPool, animal_id: DbId) -> Result<Vec<AnimalImage>, sqlx::Error> {
        let query = format!(
            "SELECT {COLUMNS} FROM animal_images
             WHERE animal_id = $1
             ORDER BY is_primary DESC, created_at DESC, id DESC"
        );
        sqlx::query_as::<_, AnimalImage>(&query)
            .bind(animal_id)
            .fetch_all(pool)
            .await
    }
}
