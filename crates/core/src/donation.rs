//! Donation choices and the rules for totals and display.

use rust_decimal::Decimal;

use crate::enums::string_enum;
use crate::error::CoreError;
use crate::types::{fits_money_column, Money};

/// Maximum rows on the donation list page.
pub const DONATION_LIST_LIMIT: i64 = 50;

/// Display name for a donation made anonymously.
pub const ANONYMOUS_DONOR: &str = "Anonymous donor";

/// Display name when the donor account no longer exists.
pub const UNKNOWN_DONOR: &str = "Unknown";

string_enum! {
    pub enum DonationType ("donation_type") {
        Money => ("money", "Money"),
        Food => ("food", "Food"),
        Medicine => ("medicine", "Medicine"),
        Equipment => ("equipment", "Equipment"),
        Other => ("other", "Other"),
    }
}

string_enum! {
    pub enum DonationStatus ("status") {
        Pending => ("pending", "Pending"),
        Confirmed => ("confirmed", "Confirmed"),
        Delivered => ("delivered", "Delivered"),
        Cancelled => ("cancelled", "Cancelled"),
    }
}

/// Statuses whose amounts count toward site-wide and per-shelter totals.
pub const COUNTED_STATUSES: [DonationStatus; 2] =
    [DonationStatus::Confirmed, DonationStatus::Delivered];

impl DonationStatus {
    pub fn counts_toward_totals(&self) -> bool {
        COUNTED_STATUSES.contains(self)
    }

    /// Text codes of [`COUNTED_STATUSES`], for `= ANY($n)` binds.
    pub fn counted_codes() -> Vec<String> {
        COUNTED_STATUSES
            .iter()
            .map(|s| s.as_str().to_string())
            .collect()
    }
}

impl Default for DonationStatus {
    fn default() -> Self {
        DonationStatus::Pending
    }
}

/// Donation amounts must be strictly positive.
pub fn validate_amount(amount: Money) -> Result<(), CoreError> {
    if amount <= Decimal::ZERO {
        return Err(CoreError::validation(
            "amount",
            "Amount must be greater than zero",
        ));
    }
    if !fits_money_column(amount) {
        return Err(CoreError::validation(
            "amount",
            "Amount must be less than 100,000,000",
        ));
    }
    Ok(())
}

/// Name shown for a donation's donor.
///
/// Anonymity wins over everything; a missing donor means the account was
/// deleted after the gift was recorded.
pub fn donor_display_name(is_anonymous: bool, donor_username: Option<&str>) -> &str {
    if is_anonymous {
        return ANONYMOUS_DONOR;
    }
    donor_username.unwrap_or(UNKNOWN_DONOR)
}

/// Sum of counted amounts, and how many donations were counted.
pub fn counted_total<'a>(
    donations: impl IntoIterator<Item = (DonationStatus, &'a Money)>,
) -> (Money, i64) {
    donations
        .into_iter()
        .filter(|(status, _)| status.counts_toward_totals())
        .fold((Decimal::ZERO, 0), |(sum, n), (_, amount)| (sum + *amount, n + 1))
}
