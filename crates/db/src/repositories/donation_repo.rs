//! Repository for the `donations` table.

use pawlink_core::donation::DonationStatus;
use pawlink_core::types::DbId;
use sqlx::PgPool;

use crate::models::donation::{
    CreateDonation, Donation, DonationFilter, DonationTotals, DonationView,
};

const COLUMNS: &str = "id, donor_id, shelter_id, donation_type, amount, description, status, \
                       is_anonymous, message, receipt_path, created_at, updated_at";

/// Donation columns qualified with `d.`, plus the joined names.
const VIEW_COLUMNS: &str = "d.id, d.donor_id, d.shelter_id, d.donation_type, d.amount, \
                            d.description, d.status, d.is_anonymous, d.message, \
                            d.receipt_path, d.created_at, d.updated_at, \
                            s.name AS shelter_name, u.username AS donor_username";

const VIEW_FROM: &str = "donations d \
                         JOIN shelters s ON s.id = d.shelter_id \
                         LEFT JOIN users u ON u.id = d.donor_id";

/// Provides recording, listing and aggregation for donations.
pub struct DonationRepo;

impl DonationRepo {
    /// Record a donation, returning the created row. Status starts as
    /// `pending`.
    pub async fn create(pool: &PgPool, input: &CreateDonation) -> Result<Donation, sqlx::Error> {
        let query = format!(
            "INSERT INTO donations
                (donor_id, shelter_id, donation_type, amount, description, is_anonymous, message)
             VALUES ($1, $2, $3, $4, $5, $6, $7)
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, Donation>(&query)
            .bind(input.donor_id)
            .bind(input.shelter_id)
            .bind(input.donation_type.as_str())
            .bind(input.amount)
            .bind(&input.description)
            .bind(input.is_anonymous)
            .bind(&input.message)
            .fetch_one(pool)
            .await
    }

    pub async fn find_by_id(pool: &PgPool, id: DbId) -> Result<Option<Donation>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM donations WHERE id = $1");
        sqlx::query_as::<_, Donation>(&query)
            .bind(id)
            .fetch_optional(pool)
            .await
    }

    pub async fn find_view_by_id(pool: &PgPool, id: DbId) -> Result<Option<DonationView>, sqlx::Error> {
        let query = format!("SELECT {VIEW_COLUMNS} FROM {VIEW_FROM} WHERE d.id = $1");
        sqlx::query_as::<_, DonationView>(&query)
            .bind(id)
            .fetch_optional(pool)
            .await
    }

    /// Donations matching `filter`, newest first, at most `limit`.
    pub async fn list(
        pool: &PgPool,
        filter: &DonationFilter,
        limit: i64,
    ) -> Result<Vec<DonationView>, sqlx::Error> {
        let mut conditions: Vec<String> = Vec::new();
        let mut bind_idx = 1u32;

        if filter.donation_type.is_some() {
            conditions.push(format!("d.donation_type = ${bind_idx}"));
            bind_idx += 1;
        }
        if filter.status.is_some() {
            conditions.push(format!("d.status = ${bind_idx}"));
            bind_idx += 1;
        }
        if filter.shelter_id.is_some() {
            conditions.push(format!("d.shelter_id = ${bind_idx}"));
            bind_idx += 1;
        }

        let where_clause = if conditions.is_empty() {
            String::new()
        } else {
            format!("WHERE {}", conditions.join(" AND "))
        };
        let query = format!(
            "SELECT {VIEW_COLUMNS} FROM {VIEW_FROM} {where_clause} \
             ORDER BY d.created_at DESC, d.id DESC LIMIT ${bind_idx}"
        );

        let mut q = sqlx::query_as::<_, DonationView>(&query);
        if let Some(donation_type) = filter.donation_type {
            q = q.bind(donation_type.as_str());
        }
        if let Some(status) = filter.status {
            q = q.bind(status.as_str());
        }
        if let Some(shelter_id) = filter.shelter_id {
            q = q.bind(shelter_id);
        }
        q.bind(limit).fetch_all(pool).await
    }

    /// A donor's own donations, newest first.
    pub async fn list_by_donor(
        pool: &PgPool,
        donor_id: DbId,
        limit: i64,
    ) -> Result<Vec<DonationView>, sqlx::Error> {
        let query = format!(
            "SELECT {VIEW_COLUMNS} FROM {VIEW_FROM} WHERE d.donor_id = $1 \
             ORDER BY d.created_at DESC, d.id DESC LIMIT $2"
        );
        sqlx::query_as::<_, DonationView>(&query)
            .bind(donor_id)
            .bind(limit)
            .fetch_all(pool)
            .await
    }

    pub async fn count_by_donor(pool: &PgPool, donor_id: DbId) -> Result<i64, sqlx::Error> {
        let (count,): (i64,) = sqlx::query_as("SELECT COUNT(*) FROM donations WHERE donor_id = $1")
            .bind(donor_id)
            .fetch_one(pool)
            .await?;
        Ok(count)
    }

    /// Site-wide sum and count of confirmed and delivered donations.
    pub async fn totals(pool: &PgPool) -> Result<DonationTotals, sqlx::Error> {
        sqlx::query_as::<_, DonationTotals>(
            "SELECT COALESCE(SUM(amount), 0) AS total_amount, COUNT(*) AS total_count
             FROM donations WHERE status = ANY($1)",
        )
        .bind(DonationStatus::counted_codes())
        .fetch_one(pool)
        .await
    }

    /// Per-shelter sum and count of confirmed and delivered donations.
    pub async fn totals_for_shelter(
        pool: &PgPool,
        shelter_id: DbId,
    ) -> Result<DonationTotals, sqlx::Error> {
        sqlx::query_as::<_, DonationTotals>(
            "SELECT COALESCE(SUM(amount), 0) AS total_amount, COUNT(*) AS total_count
             FROM donations WHERE shelter_id = $1 AND status = ANY($2)",
        )
        .bind(shelter_id)
        .bind(DonationStatus::counted_codes())
        .fetch_one(pool)
        .await
    }

    /// Set a donation's status. Returns `None` if the donation does not exist.
    pub async fn update_status(
        pool: &PgPool,
        id: DbId,
        status: DonationStatus,
    ) -> Result<Option<Donation>, sqlx::Error> {
        let query = format!("UPDATE donations SET status = $2 WHERE id = $1 RETURNING {COLUMNS}");
        sqlx::query_as::<_, Donation>(&query)
            .bind(id)
            .bind(status.as_str())
            .fetch_optional(pool)
            .await
    }

    pub async fn set_receipt_path(pool: &PgPool, id: DbId, path: &str) -> Result<bool, sqlx::Error> {
        let result = sqlx::query("UPDATE donations SET receipt_path = $2 WHERE id = $1")
            .bind(id)
            .bind(path)
            .execute(pool)
            .await?;
        Ok(result.rows_affected() > 0)
    }
}
