//! Accounts: tenants and administrators.

use rentdesk_core::roles::{ROLE_ADMIN, ROLE_TENANT};
use rentdesk_core::types::{DbId, Timestamp};
use serde::{Deserialize, Serialize};
use sqlx::types::Json;
use sqlx::FromRow;

/// Role stored in the `user_role` enum column.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, sqlx::Type)]
#[sqlx(type_name = "user_role", rename_all = "lowercase")]
#[serde(rename_all = "lowercase")]
pub enum UserRole {
    Tenant,
    Admin,
}

impl UserRole {
    /// Role name as carried in access tokens.
    pub fn as_str(self) -> &'static str {
        match self {
            UserRole::Tenant => ROLE_TENANT,
            UserRole::Admin => ROLE_ADMIN,
        }
    }
}

/// Postal address embedded in the `users.address` JSONB column.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Address {
    pub street: String,
    pub city: String,
    pub state: String,
    pub district: String,
    pub pincode: String,
}

/// A `users` row. Deliberately not `Serialize`: it holds the password
/// hash. Responses go through [`UserResponse`].
#[derive(Debug, Clone, FromRow)]
pub struct User {
    pub id: DbId,
    pub name: String,
    pub email: String,
    pub phone: String,
    pub password_hash: String,
    pub role: UserRole,
    pub address: Json<Address>,
    pub is_active: bool,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

/// An account as clients see it.
#[derive(Debug, Clone, Serialize)]
pub struct UserResponse {
    pub id: DbId,
    pub name: String,
    pub email: String,
    pub phone: String,
    pub role: UserRole,
    pub address: Address,
    pub is_active: bool,
    pub created_at: Timestamp,
}

impl From<User> for UserResponse {
    fn from(user: User) -> Self {
        Self {
            id: user.id,
            name: user.name,
            email: user.email,
            phone: user.phone,
            role: user.role,
            address: user.address.0,
            is_active: user.is_active,
            created_at: user.created_at,
        }
    }
}

/// Fields for a new account; the password is already hashed.
#[derive(Debug, Clone)]
pub struct CreateUser {
    pub name: String,
    pub email: String,
    pub phone: String,
    pub password_hash: String,
    pub role: UserRole,
    pub address: Address,
}
