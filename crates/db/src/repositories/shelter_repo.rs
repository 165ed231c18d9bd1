//! Repository for the `shelters` table.

use pawlink_core::types::DbId;
use sqlx::PgPool;

use crate::models::shelter::{CapacityTotals, CreateShelter, Shelter, ShelterFilter};

const COLUMNS: &str = "id, name, shelter_type, description, address, phone_number, email, \
                       website, capacity, current_occupancy, director, founded_date, \
                       image_path, rating, is_active, created_at, updated_at";

/// Provides CRUD and listing queries for shelters.
pub struct ShelterRepo;

impl ShelterRepo {
    /// Insert a new shelter, returning the created row. Rating starts at 0.
    pub async fn create(pool: &PgPool, input: &CreateShelter) -> Result<Shelter, sqlx::Error> {
        let query = format!(
            "INSERT INTO shelters
                (name, shelter_type, description, address, phone_number, email, website,
                 capacity, current_occupancy, director, founded_date, is_active)
             VALUES ($1, $2, $3, $4, $5, $6, $7, $8, COALESCE($9, 0), $10, $11, COALESCE($12, true))
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, Shelter>(&query)
            .bind(&input.name)
            .bind(input.shelter_type.as_str())
            .bind(&input.description)
            .bind(&input.address)
            .bind(&input.phone_number)
            .bind(&input.email)
            .bind(&input.website)
            .bind(input.capacity)
            .bind(input.current_occupancy)
            .bind(&input.director)
            .bind(input.founded_date)
            .bind(input.is_active)
            .fetch_one(pool)
            .await
    }

    /// Find a shelter by ID, active or not.
    pub async fn find_by_id(pool: &PgPool, id: DbId) -> Result<Option<Shelter>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM shelters WHERE id = $1");
        sqlx::query_as::<_, Shelter>(&query)
            .bind(id)
            .fetch_optional(pool)
            .await
    }

    /// Find an active shelter by ID. Inactive shelters behave as missing.
    pub async fn find_active_by_id(pool: &PgPool, id: DbId) -> Result<Option<Shelter>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM shelters WHERE id = $1 AND is_active = true");
        sqlx::query_as::<_, Shelter>(&query)
            .bind(id)
            .fetch_optional(pool)
            .await
    }

    /// Active shelters matching `filter`, best rated first, then by name.
    pub async fn list_active(pool: &PgPool, filter: &ShelterFilter) -> Result<Vec<Shelter>, sqlx::Error> {
        let mut conditions = vec!["is_active = true".to_string()];
        let mut bind_idx = 1u32;

        if filter.shelter_type.is_some() {
            conditions.push(format!("shelter_type = ${bind_idx}"));
            bind_idx += 1;
        }
        if filter.search_pattern.is_some() {
            conditions.push(format!(
                "(name ILIKE ${bind_idx} OR address ILIKE ${bind_idx} OR description ILIKE ${bind_idx})"
            ));
        }

        let query = format!(
            "SELECT {COLUMNS} FROM shelters WHERE {} ORDER BY rating DESC, name ASC, id ASC",
            conditions.join(" AND ")
        );

        let mut q = sqlx::query_as::<_, Shelter>(&query);
        if let Some(shelter_type) = filter.shelter_type {
            q = q.bind(shelter_type.as_str());
        }
        if let Some(ref pattern) = filter.search_pattern {
            q = q.bind(pattern);
        }
        q.fetch_all(pool).await
    }

    /// The `limit` best-rated active shelters.
    pub async fn top_rated(pool: &PgPool, limit: i64) -> Result<Vec<Shelter>, sqlx::Error> {
        let query = format!(
            "SELECT {COLUMNS} FROM shelters WHERE is_active = true
             ORDER BY rating DESC, name ASC, id ASC LIMIT $1"
        );
        sqlx::query_as::<_, Shelter>(&query)
            .bind(limit)
            .fetch_all(pool)
            .await
    }

    pub async fn count_active(pool: &PgPool) -> Result<i64, sqlx::Error> {
        let (count,): (i64,) = sqlx::query_as("SELECT COUNT(*) FROM shelters WHERE is_active = true")
            .fetch_one(pool)
            .await?;
        Ok(count)
    }

    /// Capacity, occupancy and free space summed over active shelters.
    pub async fn capacity_totals(pool: &PgPool) -> Result<CapacityTotals, sqlx::Error> {
        sqlx::query_as::<_, CapacityTotals>(
            "SELECT
                COUNT(*) AS shelters,
                COALESCE(SUM(capacity), 0)::BIGINT AS capacity,
                COALESCE(SUM(current_occupancy), 0)::BIGINT AS current_occupancy,
                COALESCE(SUM(capacity - current_occupancy), 0)::BIGINT AS available_space
             FROM shelters WHERE is_active = true",
        )
        .fetch_one(pool)
        .await
    }

    pub async fn set_image_path(pool: &PgPool, id: DbId, path: &str) -> Result<bool, sqlx::Error> {
        let result = sqlx::query("UPDATE shelters SET image_path = $2 WHERE id = $1")
            .bind(id)
            .bind(path)
            .execute(pool)
            .await?;
        Ok(result.rows_affected() > 0)
    }
}
