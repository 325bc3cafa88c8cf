//! Well-known role name constants.
//!
//! These must match the `user_role` enum in `20250101000001_create_users.sql`.

pub const ROLE_ADMIN: &str = "admin";
pub const ROLE_TENANT: &str = "tenant";
