//! Listing filter composition.
//!
//! A [`ListingFilter`] is built from the raw `category`, `animal_type`, and
//! `search` query-string values. Unknown or blank values impose no
//! restriction on their axis. Supplied axes are AND-ed; the search text
//! matches name OR breed OR location OR description, case-insensitively.
//!
//! The db crate translates a filter into SQL; [`ListingFilter::matches`] is
//! the reference predicate over a single listing.

use serde::Serialize;

use crate::animal::{AnimalType, ListingStatus};

/// Fixed page size for animal listing pages.
pub const LISTING_PAGE_SIZE: i64 = 12;

/// Number of listings in the home page's "latest" strip.
pub const LATEST_LISTINGS_LIMIT: i64 = 6;

/// Species that the synthetic `other` filter excludes.
pub const COMMON_TYPES: [AnimalType; 2] = [AnimalType::Dog, AnimalType::Cat];

/// Free vs. paid listings.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum ListingCategory {
    Free,
    Paid,
}

impl ListingCategory {
    /// `free` / `paid`; anything else means "no restriction".
    pub fn parse(raw: Option<&str>) -> Option<Self> {
        match raw.map(str::trim) {
            Some("free") => Some(ListingCategory::Free),
            Some("paid") => Some(ListingCategory::Paid),
            _ => None,
        }
    }

    /// The `is_for_sale` value this category selects.
    pub fn is_for_sale(&self) -> bool {
        matches!(self, ListingCategory::Paid)
    }
}

/// Species axis of the filter.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TypeFilter {
    Exactly(AnimalType),
    /// Neither a dog nor a cat.
    NotCommon,
}

impl TypeFilter {
    /// `other` is synthetic ("not dog, not cat"); any other known code is an
    /// exact match. Unknown codes impose no restriction.
    pub fn parse(raw: Option<&str>) -> Option<Self> {
        let raw = raw.map(str::trim).filter(|s| !s.is_empty())?;
        if raw == AnimalType::Other.as_str() {
            return Some(TypeFilter::NotCommon);
        }
        raw.parse::<AnimalType>().ok().map(TypeFilter::Exactly)
    }

    pub fn accepts(&self, animal_type: AnimalType) -> bool {
        match self {
            TypeFilter::Exactly(t) => *t == animal_type,
            TypeFilter::NotCommon => !COMMON_TYPES.contains(&animal_type),
        }
    }
}

/// The text fields of a listing that the filter inspects.
#[derive(Debug, Clone, Copy)]
pub struct ListingFields<'a> {
    pub status: ListingStatus,
    pub animal_type: AnimalType,
    pub is_for_sale: bool,
    pub name: &'a str,
    pub breed: Option<&'a str>,
    pub location: &'a str,
    pub description: Option<&'a str>,
}

/// Composed filter over available listings.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ListingFilter {
    pub category: Option<ListingCategory>,
    pub animal_type: Option<TypeFilter>,
    /// Trimmed, non-empty search text.
    pub search: Option<String>,
}

impl ListingFilter {
    pub fn from_params(
        category: Option<&str>,
        animal_type: Option<&str>,
        search: Option<&str>,
    ) -> Self {
        Self {
            category: ListingCategory::parse(category),
            animal_type: TypeFilter::parse(animal_type),
            search: search
                .map(str::trim)
                .filter(|s| !s.is_empty())
                .map(str::to_string),
        }
    }

    /// `%term%` pattern for `ILIKE`, with LIKE metacharacters escaped.
    pub fn search_pattern(&self) -> Option<String> {
        self.search
            .as_deref()
            .map(|s| format!("%{}%", escape_like(s)))
    }

    /// Reference predicate: does this listing belong in the result set?
    pub fn matches(&self, listing: &ListingFields<'_>) -> bool {
        if listing.status != ListingStatus::Available {
            return false;
        }
        if let Some(category) = self.category {
            if listing.is_for_sale != category.is_for_sale() {
                return false;
            }
        }
        if let Some(type_filter) = self.animal_type {
            if !type_filter.accepts(listing.animal_type) {
                return false;
            }
        }
        if let Some(term) = &self.search {
            let needle = term.to_lowercase();
            let hit = |field: Option<&str>| {
                field.is_some_and(|v| v.to_lowercase().contains(&needle))
            };
            if !(hit(Some(listing.name))
                || hit(listing.breed)
                || hit(Some(listing.location))
                || hit(listing.description))
            {
                return false;
            }
        }
        true
    }
}

/// Escape `\`, `%` and `_` so user text is matched literally by `LIKE`.
pub fn escape_like(raw: &str) -> String {
    let mut out = String::with_capacity(raw.len());
    for c in raw.chars() {
        if matches!(c, '\\' | '%' | '_') {
            out.push('\\');
        }
        out.push(c);
    }
    out
}
