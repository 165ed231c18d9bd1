//! Authentication and authorization extractors.
//!
//! - [`auth::AuthUser`] -- the authenticated caller, from a JWT Bearer token.
//!   `Option<AuthUser>` accepts anonymous requests.
//! - [`rbac::RequireStaff`] -- requires the `staff` or `admin` role.

pub mod auth;
pub mod rbac;
