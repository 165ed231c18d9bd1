//! Repository for the `reviews` table and the ratings it drives.

use pawlink_core::review::ReviewTarget;
use pawlink_core::types::DbId;
use sqlx::{PgConnection, PgPool};

use crate::models::review::{CreateReview, Review, ReviewView};

const COLUMNS: &str =
    "id, user_id, shelter_id, veterinarian_id, rating, comment, created_at, updated_at";

const VIEW_COLUMNS: &str = "r.id, r.user_id, r.shelter_id, r.veterinarian_id, r.rating, \
                            r.comment, r.created_at, r.updated_at, u.username";

/// `(table, review foreign key column)` for a target.
fn target_table(target: &ReviewTarget) -> (&'static str, &'static str) {
    match target {
        ReviewTarget::Shelter(_) => ("shelters", "shelter_id"),
        ReviewTarget::Veterinarian(_) => ("veterinarians", "veterinarian_id"),
    }
}

/// Provides review creation and rating recomputation.
pub struct ReviewRepo;

impl ReviewRepo {
    /// Insert a review and recompute its target's rating in one transaction.
    ///
    /// Returns the review and the target's new rating. A duplicate
    /// (user, target) pair fails on the `uq_reviews_user_*` constraint and
    /// leaves the rating untouched.
    pub async fn create_and_recompute(
        pool: &PgPool,
        input: &CreateReview,
    ) -> Result<(Review, f64), sqlx::Error> {
        let mut tx = pool.begin().await?;

        let (shelter_id, veterinarian_id) = input.target.columns();
        let insert_query = format!(
            "INSERT INTO reviews (user_id, shelter_id, veterinarian_id, rating, comment)
             VALUES ($1, $2, $3, $4, $5)
             RETURNING {COLUMNS}"
        );
        let review = sqlx::query_as::<_, Review>(&insert_query)
            .bind(input.user_id)
            .bind(shelter_id)
            .bind(veterinarian_id)
            .bind(input.rating)
            .bind(input.comment.trim())
            .fetch_one(&mut *tx)
            .await?;

        let rating = Self::recompute_rating_inner(&mut tx, &input.target).await?;

        tx.commit().await?;
        Ok((review, rating))
    }

    /// Recompute and persist a target's rating from all of its reviews.
    pub async fn recompute_rating(pool: &PgPool, target: &ReviewTarget) -> Result<f64, sqlx::Error> {
        let mut conn = pool.acquire().await?;
        Self::recompute_rating_inner(&mut conn, target).await
    }

    /// Mean of all review ratings rounded to one decimal, 0 when none.
    async fn recompute_rating_inner(
        conn: &mut PgConnection,
        target: &ReviewTarget,
    ) -> Result<f64, sqlx::Error> {
        let (table, fk) = target_table(target);
        let query = format!(
            "UPDATE {table} SET rating = (
                SELECT COALESCE(ROUND(AVG(rating)::numeric, 1), 0)::float8
                FROM reviews WHERE {fk} = $1
             )
             WHERE id = $1
             RETURNING rating"
        );
        let (rating,): (f64,) = sqlx::query_as(&query)
            .bind(target.id())
            .fetch_one(&mut *conn)
            .await?;
        Ok(rating)
    }

    /// Whether `user_id` has already reviewed `target`.
    pub async fn exists_for(
        pool: &PgPool,
        user_id: DbId,
        target: &ReviewTarget,
    ) -> Result<bool, sqlx::Error> {
        let (_, fk) = target_table(target);
        let query = format!("SELECT EXISTS(SELECT 1 FROM reviews WHERE user_id = $1 AND {fk} = $2)");
        let (exists,): (bool,) = sqlx::query_as(&query)
            .bind(user_id)
            .bind(target.id())
            .fetch_one(pool)
            .await?;
        Ok(exists)
    }

    /// Newest reviews of `target` with author usernames. `None` means all.
    pub async fn list_for_target(
        pool: &PgPool,
        target: &ReviewTarget,
        limit: Option<i64>,
    ) -> Result<Vec<ReviewView>, sqlx::Error> {
        let (_, fk) = target_table(target);
        let query = format!(
            "SELECT {VIEW_COLUMNS} FROM reviews r
             JOIN users u ON u.id = r.user_id
             WHERE r.{fk} = $1
             ORDER BY r.created_at DESC, r.id DESC
             LIMIT $2"
        );
        sqlx::query_as::<_, ReviewView>(&query)
            .bind(target.id())
            .bind(limit)
            .fetch_all(pool)
            .await
    }
}
