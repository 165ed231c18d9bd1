//! Aggregate counts for the home, about and listing pages.

use pawlink_core::types::Money;
use serde::Serialize;
use sqlx::FromRow;

/// Per-axis counts over a set of available listings.
#[derive(Debug, Clone, Default, FromRow, Serialize)]
pub struct ListingCounts {
    pub total: i64,
    pub dogs: i64,
    pub cats: i64,
    /// Neither dog nor cat.
    pub other: i64,
    pub free: i64,
    pub paid: i64,
}

/// Site-wide figures shown on the about page.
#[derive(Debug, Clone, Default, FromRow, Serialize)]
pub struct SiteStats {
    pub available_animals: i64,
    pub active_shelters: i64,
    pub veterinarians: i64,
    pub confirmed_donations: i64,
    pub confirmed_donation_amount: Money,
}
