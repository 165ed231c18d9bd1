//! Well-known role name constants.
//!
//! These must match the seed data in `20261019000001_create_users.sql`.

use crate::types::DbId;

pub const ROLE_ADMIN: &str = "admin";
pub const ROLE_STAFF: &str = "staff";
pub const ROLE_MEMBER: &str = "member";

/// Role id assigned to self-registered accounts.
pub const MEMBER_ROLE_ID: DbId = 3;

/// Staff privileges (shelter management, donation status, editing any
/// listing) are granted to both `staff` and `admin`.
pub fn is_staff_role(role: &str) -> bool {
    role == ROLE_ADMIN || role == ROLE_STAFF
}
