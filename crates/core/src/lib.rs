//! PawLink domain core.
//!
//! Pure domain rules shared by the db and api crates: choice enums, the
//! listing filter, pagination, the adoption state machine, rating and
//! donation aggregation, capacity metrics, and authorization checks. No
//! database or HTTP dependencies live here.

pub mod enums;

pub mod access;
pub mod account;
pub mod adoption;
pub mod animal;
pub mod donation;
pub mod error;
pub mod listing;
pub mod pagination;
pub mod review;
pub mod roles;
pub mod shelter;
pub mod types;
pub mod validation;
pub mod veterinarian;
