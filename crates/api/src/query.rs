//! Query-string parameter types shared by handler modules.
//!
//! Every field is kept as raw text: unknown or malformed values mean "no
//! restriction" (or page 1) rather than a rejected request.

use pawlink_core::listing::ListingFilter;
use pawlink_core::pagination::parse_page_number;
use serde::{Deserialize, Serialize};

/// `?category=&animal_type=&search=&page=` for listing pages.
#[derive(Debug, Default, Deserialize)]
pub struct ListingParams {
    pub category: Option<String>,
    pub animal_type: Option<String>,
    pub search: Option<String>,
    pub page: Option<String>,
}

impl ListingParams {
    pub fn filter(&self) -> ListingFilter {
        ListingFilter::from_params(
            self.category.as_deref(),
            self.animal_type.as_deref(),
            self.search.as_deref(),
        )
    }

    pub fn page(&self) -> i64 {
        parse_page_number(self.page.as_deref())
    }

    /// The raw values, echoed back so a client can re-render its form.
    pub fn echo(&self) -> FilterEcho {
        FilterEcho {
            category: self.category.clone().unwrap_or_default(),
            animal_type: self.animal_type.clone().unwrap_or_default(),
            search: self.search.clone().unwrap_or_default(),
        }
    }
}

/// Filter values as the caller sent them.
#[derive(Debug, Clone, Serialize)]
pub struct FilterEcho {
    pub category: String,
    pub animal_type: String,
    pub search: String,
}

/// `?page=` only.
#[derive(Debug, Default, Deserialize)]
pub struct PageParams {
    pub page: Option<String>,
}

impl PageParams {
    pub fn page(&self) -> i64 {
        parse_page_number(self.page.as_deref())
    }
}

/// `?type=&search=` for the shelter list.
#[derive(Debug, Default, Deserialize, Serialize)]
pub struct ShelterListParams {
    #[serde(rename = "type")]
    pub shelter_type: Option<String>,
    pub search: Option<String>,
}

/// `?type=&service=&emergency=&search=` for the clinic list.
#[derive(Debug, Default, Deserialize, Serialize)]
pub struct VeterinarianListParams {
    #[serde(rename = "type")]
    pub clinic_type: Option<String>,
    pub service: Option<String>,
    /// Only `yes` restricts to emergency clinics.
    pub emergency: Option<String>,
    pub search: Option<String>,
}

/// `?type=&status=&shelter=` for the donation list.
#[derive(Debug, Default, Deserialize, Serialize)]
pub struct DonationListParams {
    #[serde(rename = "type")]
    pub donation_type: Option<String>,
    pub status: Option<String>,
    pub shelter: Option<String>,
}

/// Parse an optional enum-valued parameter, treating blank or unknown text
/// as absent.
pub fn parse_choice<T: std::str::FromStr>(raw: Option<&str>) -> Option<T> {
    raw.map(str::trim)
        .filter(|s| !s.is_empty())
        .and_then(|s| s.parse().ok())
}

/// Trimmed, non-empty search text as an escaped `%term%` pattern.
pub fn search_pattern(raw: Option<&str>) -> Option<String> {
    raw.map(str::trim)
        .filter(|s| !s.is_empty())
        .map(|s| format!("%{}%", pawlink_core::listing::escape_like(s)))
}
