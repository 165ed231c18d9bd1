//! Repository for the `animals` table.

use pawlink_core::animal::ListingStatus;
use pawlink_core::listing::{escape_like, ListingFilter, TypeFilter, COMMON_TYPES};
use pawlink_core::types::DbId;
use sqlx::postgres::PgArguments;
use sqlx::query::QueryAs;
use sqlx::{PgPool, Postgres};

use crate::models::animal::{Animal, CreateAnimal, UpdateAnimal};
use crate::models::stats::ListingCounts;

/// Column list shared across queries to avoid repetition.
const COLUMNS: &str = "id, owner_id, name, animal_type, breed, age, gender, description, \
                       location, is_for_sale, price, image_path, status, vaccinated, \
                       sterilized, phone_number, created_at, updated_at";

/// Newest first, with `id` as a stable tiebreaker.
const ORDER: &str = "ORDER BY created_at DESC, id DESC";

/// Provides CRUD and filtered listing queries for animals.
pub struct AnimalRepo;

impl AnimalRepo {
    /// Insert a new listing, returning the created row. Status starts as
    /// `available`.
    pub async fn create(pool: &PgPool, input: &CreateAnimal) -> Result<Animal, sqlx::Error> {
        let query = format!(
            "INSERT INTO animals
                (owner_id, name, animal_type, breed, age, gender, description, location,
                 is_for_sale, price, vaccinated, sterilized, phone_number)
             VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10, $11, $12, $13)
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, Animal>(&query)
            .bind(input.owner_id)
            .bind(&input.name)
            .bind(input.animal_type.as_str())
            .bind(&input.breed)
            .bind(input.age)
            .bind(input.gender.as_str())
            .bind(&input.description)
            .bind(&input.location)
            .bind(input.is_for_sale)
            .bind(input.price)
            .bind(input.vaccinated)
            .bind(input.sterilized)
            .bind(&input.phone_number)
            .fetch_one(pool)
            .await
    }

    /// Find a listing by ID, whatever its status.
    pub async fn find_by_id(pool: &PgPool, id: DbId) -> Result<Option<Animal>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM animals WHERE id = $1");
        sqlx::query_as::<_, Animal>(&query)
            .bind(id)
            .fetch_optional(pool)
            .await
    }

    /// Replace every editable field of a listing.
    ///
    /// Returns `None` if no row with the given `id` exists.
    pub async fn update(
        pool: &PgPool,
        id: DbId,
        input: &UpdateAnimal,
    ) -> Result<Option<Animal>, sqlx::Error> {
        let query = format!(
            "UPDATE animals SET
                name = $2,
                animal_type = $3,
                breed = $4,
                age = $5,
                gender = $6,
                description = $7,
                location = $8,
                is_for_sale = $9,
                price = $10,
                status = $11,
                vaccinated = $12,
                sterilized = $13,
                phone_number = $14
             WHERE id = $1
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, Animal>(&query)
            .bind(id)
            .bind(&input.name)
            .bind(input.animal_type.as_str())
            .bind(&input.breed)
            .bind(input.age)
            .bind(input.gender.as_str())
            .bind(&input.description)
            .bind(&input.location)
            .bind(input.is_for_sale)
            .bind(input.price)
            .bind(input.status.as_str())
            .bind(input.vaccinated)
            .bind(input.sterilized)
            .bind(&input.phone_number)
            .fetch_optional(pool)
            .await
    }

    /// Set the listing's main image path.
    pub async fn set_image_path(pool: &PgPool, id: DbId, path: &str) -> Result<bool, sqlx::Error> {
        let result = sqlx::query("UPDATE animals SET image_path = $2 WHERE id = $1")
            .bind(id)
            .bind(path)
            .execute(pool)
            .await?;
        Ok(result.rows_affected() > 0)
    }

    /// Permanently delete a listing. Images and adoption requests cascade.
    /// Returns `true` if a row was removed.
    pub async fn delete(pool: &PgPool, id: DbId) -> Result<bool, sqlx::Error> {
        let result = sqlx::query("DELETE FROM animals WHERE id = $1")
            .bind(id)
            .execute(pool)
            .await?;
        Ok(result.rows_affected() > 0)
    }

    /// Available listings matching `filter`, newest first.
    pub async fn list_available(
        pool: &PgPool,
        filter: &ListingFilter,
        limit: i64,
        offset: i64,
    ) -> Result<Vec<Animal>, sqlx::Error> {
        let (where_clause, next_idx) = filter_clause(filter);
        let query = format!(
            "SELECT {COLUMNS} FROM animals {where_clause} {ORDER} \
             LIMIT ${next_idx} OFFSET ${offset_idx}",
            offset_idx = next_idx + 1,
        );
        bind_filter(sqlx::query_as::<_, Animal>(&query), filter)
            .bind(limit)
            .bind(offset)
            .fetch_all(pool)
            .await
    }

    /// Number of available listings matching `filter`.
    pub async fn count_available(pool: &PgPool, filter: &ListingFilter) -> Result<i64, sqlx::Error> {
        let (where_clause, _) = filter_clause(filter);
        let query = format!("SELECT COUNT(*) FROM animals {where_clause}");
        let (count,) = bind_filter(sqlx::query_as::<_, (i64,)>(&query), filter)
            .fetch_one(pool)
            .await?;
        Ok(count)
    }

    /// Per-axis counts over the available listings matching `filter`.
    pub async fn counts(pool: &PgPool, filter: &ListingFilter) -> Result<ListingCounts, sqlx::Error> {
        let (where_clause, _) = filter_clause(filter);
        let query = format!(
            "SELECT \
                COUNT(*) AS total, \
                COUNT(*) FILTER (WHERE animal_type = 'dog') AS dogs, \
                COUNT(*) FILTER (WHERE animal_type = 'cat') AS cats, \
                COUNT(*) FILTER (WHERE animal_type NOT IN ('dog', 'cat')) AS other, \
                COUNT(*) FILTER (WHERE NOT is_for_sale) AS free, \
                COUNT(*) FILTER (WHERE is_for_sale) AS paid \
             FROM animals {where_clause}"
        );
        bind_filter(sqlx::query_as::<_, ListingCounts>(&query), filter)
            .fetch_one(pool)
            .await
    }

    /// Up to `limit` other available listings of the same species.
    pub async fn similar(pool: &PgPool, animal: &Animal, limit: i64) -> Result<Vec<Animal>, sqlx::Error> {
        let query = format!(
            "SELECT {COLUMNS} FROM animals
             WHERE status = $1 AND animal_type = $2 AND id <> $3
             {ORDER} LIMIT $4"
        );
        sqlx::query_as::<_, Animal>(&query)
            .bind(ListingStatus::Available.as_str())
            .bind(animal.animal_type.as_str())
            .bind(animal.id)
            .bind(limit)
            .fetch_all(pool)
            .await
    }

    /// Available listings placed with a shelter: those whose location
    /// mentions the shelter's name, or whose owner account is a shelter
    /// account (username containing "shelter").
    pub async fn for_shelter(
        pool: &PgPool,
        shelter_name: &str,
        limit: i64,
    ) -> Result<Vec<Animal>, sqlx::Error> {
        let query = format!(
            "SELECT {COLUMNS} FROM animals
             WHERE status = $1
               AND (location ILIKE $2
                    OR owner_id IN (SELECT id FROM users WHERE username ILIKE '%shelter%'))
             {ORDER} LIMIT $3"
        );
        sqlx::query_as::<_, Animal>(&query)
            .bind(ListingStatus::Available.as_str())
            .bind(format!("%{}%", escape_like(shelter_name)))
            .bind(limit)
            .fetch_all(pool)
            .await
    }

    /// A user's own listings of any status, newest first.
    pub async fn list_by_owner(
        pool: &PgPool,
        owner_id: DbId,
        limit: i64,
        offset: i64,
    ) -> Result<Vec<Animal>, sqlx::Error> {
        let query =
            format!("SELECT {COLUMNS} FROM animals WHERE owner_id = $1 {ORDER} LIMIT $2 OFFSET $3");
        sqlx::query_as::<_, Animal>(&query)
            .bind(owner_id)
            .bind(limit)
            .bind(offset)
            .fetch_all(pool)
            .await
    }

    pub async fn count_by_owner(pool: &PgPool, owner_id: DbId) -> Result<i64, sqlx::Error> {
        let (count,): (i64,) = sqlx::query_as("SELECT COUNT(*) FROM animals WHERE owner_id = $1")
            .bind(owner_id)
            .fetch_one(pool)
            .await?;
        Ok(count)
    }
}

/// Build the `WHERE` clause for `filter`. Returns the clause and the next
/// free placeholder index.
fn filter_clause(filter: &ListingFilter) -> (String, u32) {
    let mut conditions = vec![format!("status = '{}'", ListingStatus::Available.as_str())];
    let mut bind_idx = 1u32;

    if filter.category.is_some() {
        conditions.push(format!("is_for_sale = ${bind_idx}"));
        bind_idx += 1;
    }
    match filter.animal_type {
        Some(TypeFilter::Exactly(_)) => {
            conditions.push(format!("animal_type = ${bind_idx}"));
            bind_idx += 1;
        }
        Some(TypeFilter::NotCommon) => {
            conditions.push(format!("animal_type <> ALL(${bind_idx})"));
            bind_idx += 1;
        }
        None => {}
    }
    if filter.search.is_some() {
        conditions.push(format!(
            "(name ILIKE ${bind_idx} OR breed ILIKE ${bind_idx} \
              OR location ILIKE ${bind_idx} OR description ILIKE ${bind_idx})"
        ));
        bind_idx += 1;
    }

    (format!("WHERE {}", conditions.join(" AND ")), bind_idx)
}

/// Bind `filter` values in the order [`filter_clause`] numbered them.
fn bind_filter<'q, O>(
    mut q: QueryAs<'q, Postgres, O, PgArguments>,
    filter: &ListingFilter,
) -> QueryAs<'q, Postgres, O, PgArguments> {
    if let Some(category) = filter.category {
        q = q.bind(category.is_for_sale());
    }
    match filter.animal_type {
        Some(TypeFilter::Exactly(animal_type)) => {
            q = q.bind(animal_type.as_str());
        }
        Some(TypeFilter::NotCommon) => {
            let common: Vec<String> = COMMON_TYPES.iter().map(|t| t.as_str().to_string()).collect();
            q = q.bind(common);
        }
        None => {}
    }
    if let Some(pattern) = filter.search_pattern() {
        q = q.bind(pattern);
    }
    q
}
