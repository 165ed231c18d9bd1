//! Repository for the `veterinarians` table.

use pawlink_core::types::DbId;
use sqlx::PgPool;

use crate::models::veterinarian::{CreateVeterinarian, Veterinarian, VeterinarianFilter};

const COLUMNS: &str = "id, name, clinic_type, description, address, phone_number, email, \
                       website, services, working_hours, director, doctors_count, \
                       image_path, is_emergency, rating, created_at, updated_at";

/// Provides CRUD and listing queries for veterinary clinics.
pub struct VeterinarianRepo;

impl VeterinarianRepo {
    /// Insert a new clinic, returning the created row. Rating starts at 0.
    pub async fn create(
        pool: &PgPool,
        input: &CreateVeterinarian,
    ) -> Result<Veterinarian, sqlx::Error> {
        let query = format!(
            "INSERT INTO veterinarians
                (name, clinic_type, description, address, phone_number, email, website,
                 services, working_hours, director, doctors_count, is_emergency)
             VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10, COALESCE($11, 1), $12)
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, Veterinarian>(&query)
            .bind(&input.name)
            .bind(input.clinic_type.as_str())
            .bind(&input.description)
            .bind(&input.address)
            .bind(&input.phone_number)
            .bind(&input.email)
            .bind(&input.website)
            .bind(input.services.codes())
            .bind(&input.working_hours)
            .bind(&input.director)
            .bind(input.doctors_count)
            .bind(input.is_emergency)
            .fetch_one(pool)
            .await
    }

    pub async fn find_by_id(pool: &PgPool, id: DbId) -> Result<Option<Veterinarian>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM veterinarians WHERE id = $1");
        sqlx::query_as::<_, Veterinarian>(&query)
            .bind(id)
            .fetch_optional(pool)
            .await
    }

    /// Clinics matching `filter`, best rated first.
    pub async fn list(
        pool: &PgPool,
        filter: &VeterinarianFilter,
    ) -> Result<Vec<Veterinarian>, sqlx::Error> {
        let mut conditions: Vec<String> = Vec::new();
        let mut bind_idx = 1u32;

        if filter.clinic_type.is_some() {
            conditions.push(format!("clinic_type = ${bind_idx}"));
            bind_idx += 1;
        }
        if filter.service.is_some() {
            conditions.push(format!("${bind_idx} = ANY(services)"));
            bind_idx += 1;
        }
        if filter.emergency_only {
            conditions.push("is_emergency = true".to_string());
        }
        if filter.search_pattern.is_some() {
            conditions.push(format!(
                "(name ILIKE ${bind_idx} OR address ILIKE ${bind_idx} \
                  OR description ILIKE ${bind_idx} \
                  OR array_to_string(services, ',') ILIKE ${bind_idx})"
            ));
        }

        let where_clause = if conditions.is_empty() {
            String::new()
        } else {
            format!("WHERE {}", conditions.join(" AND "))
        };
        let query = format!(
            "SELECT {COLUMNS} FROM veterinarians {where_clause} ORDER BY rating DESC, name ASC, id ASC"
        );

        let mut q = sqlx::query_as::<_, Veterinarian>(&query);
        if let Some(clinic_type) = filter.clinic_type {
            q = q.bind(clinic_type.as_str());
        }
        if let Some(service) = filter.service {
            q = q.bind(service.as_str());
        }
        if let Some(ref pattern) = filter.search_pattern {
            q = q.bind(pattern);
        }
        q.fetch_all(pool).await
    }

    /// The `limit` best-rated clinics.
    pub async fn top_rated(pool: &PgPool, limit: i64) -> Result<Vec<Veterinarian>, sqlx::Error> {
        let query = format!(
            "SELECT {COLUMNS} FROM veterinarians ORDER BY rating DESC, name ASC, id ASC LIMIT $1"
        );
        sqlx::query_as::<_, Veterinarian>(&query)
            .bind(limit)
            .fetch_all(pool)
            .await
    }

    /// Best-rated clinics other than `exclude_id`, for the detail page.
    pub async fn others(
        pool: &PgPool,
        exclude_id: DbId,
        limit: i64,
    ) -> Result<Vec<Veterinarian>, sqlx::Error> {
        let query = format!(
            "SELECT {COLUMNS} FROM veterinarians WHERE id <> $1
             ORDER BY rating DESC, name ASC, id ASC LIMIT $2"
        );
        sqlx::query_as::<_, Veterinarian>(&query)
            .bind(exclude_id)
            .bind(limit)
            .fetch_all(pool)
            .await
    }

    pub async fn count(pool: &PgPool) -> Result<i64, sqlx::Error> {
        let (count,): (i64,) = sqlx::query_as("SELECT COUNT(*) FROM veterinarians")
            .fetch_one(pool)
            .await?;
        Ok(count)
    }
}
