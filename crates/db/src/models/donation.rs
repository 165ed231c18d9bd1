//! Donation entity model and DTOs.

use pawlink_core::access::{can_identify_donor, Actor};
use pawlink_core::donation::{donor_display_name, DonationStatus, DonationType};
use pawlink_core::types::{DbId, Money, Timestamp};
use serde::Serialize;
use sqlx::FromRow;

/// A row from the `donations` table.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct Donation {
    pub id: DbId,
    pub donor_id: Option<DbId>,
    pub shelter_id: DbId,
    #[sqlx(try_from = "String")]
    pub donation_type: DonationType,
    pub amount: Money,
    pub description: Option<String>,
    #[sqlx(try_from = "String")]
    pub status: DonationStatus,
    pub is_anonymous: bool,
    pub message: Option<String>,
    pub receipt_path: Option<String>,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

/// A donation joined with its shelter name and donor username.
#[derive(Debug, Clone, FromRow)]
pub struct DonationView {
    #[sqlx(flatten)]
    pub donation: Donation,
    pub shelter_name: String,
    /// `None` once the donor account is deleted.
    pub donor_username: Option<String>,
}

impl DonationView {
    pub fn donor_name(&self) -> &str {
        donor_display_name(self.donation.is_anonymous, self.donor_username.as_deref())
    }
}

/// Serialized form of [`DonationView`] with the display name resolved.
#[derive(Debug, Clone, Serialize)]
pub struct DonationResponse {
    #[serde(flatten)]
    pub donation: Donation,
    pub shelter_name: String,
    pub donor_name: String,
}

impl DonationResponse {
    /// Render `view` for `viewer`. `donor_id` is nulled when the donation is
    /// anonymous and the viewer is neither its donor nor staff.
    pub fn for_viewer(view: DonationView, viewer: Option<&Actor>) -> Self {
        let donor_name = view.donor_name().to_string();
        let mut donation = view.donation;
        if !can_identify_donor(viewer, donation.donor_id, donation.is_anonymous) {
            donation.donor_id = None;
        }
        Self {
            donation,
            shelter_name: view.shelter_name,
            donor_name,
        }
    }
}

/// DTO for recording a donation. Status always starts at `pending`.
#[derive(Debug, Clone)]
pub struct CreateDonation {
    pub donor_id: Option<DbId>,
    pub shelter_id: DbId,
    pub donation_type: DonationType,
    pub amount: Money,
    pub description: Option<String>,
    pub is_anonymous: bool,
    pub message: Option<String>,
}

/// Optional filters for the donation list.
#[derive(Debug, Clone, Default)]
pub struct DonationFilter {
    pub donation_type: Option<DonationType>,
    pub status: Option<DonationStatus>,
    pub shelter_id: Option<DbId>,
}

/// Sum and count of donations whose status counts toward totals.
#[derive(Debug, Clone, Default, FromRow, Serialize)]
pub struct DonationTotals {
    pub total_amount: Money,
    pub total_count: i64,
}
