//! Request handlers.
//!
//! Each submodule provides the async handler functions for one resource.
//! Handlers delegate domain rules to `pawlink_core`, persistence to the
//! repositories in `pawlink_db`, and map errors via [`crate::error::AppError`].

pub mod adoption;
pub mod animals;
pub mod auth;
pub mod donations;
pub mod home;
pub mod pages;
pub mod profile;
pub mod reviews;
pub mod shelters;
pub mod veterinarians;
