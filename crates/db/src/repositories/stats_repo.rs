//! Cross-table aggregates.

use pawlink_core::animal::ListingStatus;
use pawlink_core::donation::DonationStatus;
use sqlx::PgPool;

use crate::models::stats::SiteStats;

/// Provides the site-wide figures shown on the about page.
pub struct StatsRepo;

impl StatsRepo {
    /// Available listings, active shelters, clinics, and confirmed or
    /// delivered donations with their summed amount.
    pub async fn site_stats(pool: &PgPool) -> Result<SiteStats, sqlx::Error> {
        sqlx::query_as::<_, SiteStats>(
            "SELECT
                (SELECT COUNT(*) FROM animals WHERE status = $1) AS available_animals,
                (SELECT COUNT(*) FROM shelters WHERE is_active = true) AS active_shelters,
                (SELECT COUNT(*) FROM veterinarians) AS veterinarians,
                (SELECT COUNT(*) FROM donations WHERE status = ANY($2)) AS confirmed_donations,
                (SELECT COALESCE(SUM(amount), 0) FROM donations WHERE status = ANY($2))
                    AS confirmed_donation_amount",
        )
        .bind(ListingStatus::Available.as_str())
        .bind(DonationStatus::counted_codes())
        .fetch_one(pool)
        .await
    }
}
