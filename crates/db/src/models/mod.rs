//! Row structs and DTOs.
//!
//! Each submodule contains:
//! - A `FromRow` + `Serialize` entity struct matching the database row
//! - A create DTO for inserts
//! - Where the entity is editable, an update DTO
//!
//! Choice columns are `TEXT` and decode into the core enums through
//! `#[sqlx(try_from = "String")]`.

pub mod adoption;
pub mod animal;
pub mod contact;
pub mod donation;
pub mod review;
pub mod session;
pub mod shelter;
pub mod stats;
pub mod user;
pub mod veterinarian;
