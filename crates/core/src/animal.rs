//! Animal listing choices and listing-level validation rules.

use rust_decimal::Decimal;

use crate::enums::string_enum;
use crate::error::CoreError;
use crate::types::{fits_money_column, Money};

/// Maximum length for a listing's name.
pub const MAX_NAME_LENGTH: u64 = 100;

/// Maximum length for a listing's breed.
pub const MAX_BREED_LENGTH: u64 = 100;

/// Maximum length for a listing's location.
pub const MAX_LOCATION_LENGTH: u64 = 200;

/// Maximum length for any stored phone number.
pub const MAX_PHONE_LENGTH: u64 = 20;

/// Number of "similar animals" shown on a listing page.
pub const SIMILAR_LISTINGS_LIMIT: i64 = 4;

string_enum! {
    /// Species category of a listing.
    pub enum AnimalType ("animal_type") {
        Dog => ("dog", "Dog"),
        Cat => ("cat", "Cat"),
        Bird => ("bird", "Bird"),
        Rabbit => ("rabbit", "Rabbit"),
        Fish => ("fish", "Fish"),
        Rodent => ("rodent", "Rodent"),
        Reptile => ("reptile", "Reptile"),
        Other => ("other", "Other"),
    }
}

string_enum! {
    pub enum Gender ("gender") {
        Male => ("male", "Male"),
        Female => ("female", "Female"),
        Unknown => ("unknown", "Unknown"),
    }
}

string_enum! {
    /// Lifecycle of a listing. Only `available` listings are browsable and
    /// can receive adoption requests.
    pub enum ListingStatus ("status") {
        Available => ("available", "Available"),
        Pending => ("pending", "Under review"),
        Adopted => ("adopted", "Adopted"),
        Sold => ("sold", "Sold"),
        Reserved => ("reserved", "Reserved"),
    }
}

impl Default for Gender {
    fn default() -> Self {
        Gender::Unknown
    }
}

impl Default for ListingStatus {
    fn default() -> Self {
        ListingStatus::Available
    }
}

/// Resolve the price to persist for a listing.
///
/// A for-sale listing needs a positive price. A listing that is not for
/// sale never stores one, whatever the client sent.
pub fn resolve_price(is_for_sale: bool, price: Option<Money>) -> Result<Option<Money>, CoreError> {
    if !is_for_sale {
        return Ok(None);
    }
    match price {
        None => Err(CoreError::validation(
            "price",
            "A price is required when the animal is for sale",
        )),
        Some(p) if p <= Decimal::ZERO => Err(CoreError::validation(
            "price",
            "Price must be greater than zero",
        )),
        Some(p) if !fits_money_column(p) => Err(CoreError::validation(
            "price",
            "Price must be less than 100,000,000",
        )),
        Some(p) => Ok(Some(p)),
    }
}
