//! Role checks layered on [`AuthUser`].
//!
//! Two roles exist: admins manage the catalog and every rental, tenants see
//! and pay for their own rentals.

use axum::extract::FromRequestParts;
use axum::http::request::Parts;
use rentdesk_core::error::CoreError;
use rentdesk_core::types::DbId;

use super::auth::AuthUser;
use crate::error::AppError;
use crate::state::AppState;

/// Admin-only extractor; any other role is rejected with 403.
pub struct RequireAdmin(pub AuthUser);

impl FromRequestParts<AppState> for RequireAdmin {
    type Rejection = AppError;

    async fn from_request_parts(
        parts: &mut Parts,
        state: &AppState,
    ) -> Result<Self, Self::Rejection> {
        let user = AuthUser::from_request_parts(parts, state).await?;
        if user.is_admin() {
            Ok(RequireAdmin(user))
        } else {
            Err(CoreError::Forbidden("Admin role required".into()).into())
        }
    }
}

/// Any signed-in user, tenant or admin.
pub struct RequireAuth(pub AuthUser);

impl FromRequestParts<AppState> for RequireAuth {
    type Rejection = AppError;

    async fn from_request_parts(
        parts: &mut Parts,
        state: &AppState,
    ) -> Result<Self, Self::Rejection> {
        AuthUser::from_request_parts(parts, state)
            .await
            .map(RequireAuth)
    }
}

impl AuthUser {
    /// Allow the tenant who owns a record, and admins. Everyone else is
    /// rejected with 403.
    pub fn ensure_owner_or_admin(&self, owner_id: DbId) -> Result<(), CoreError> {
        if self.is_admin() || self.user_id == owner_id {
            Ok(())
        } else {
            Err(CoreError::Forbidden(
                "Only the rental's tenant or an admin can access it".into(),
            ))
        }
    }
}
