//! Domain errors shared by the ledger rules, repositories' callers and the
//! HTTP layer.

use crate::types::DbId;

/// An error raised by a rentdesk business rule.
///
/// The HTTP layer maps each variant to one status code, so pick the variant
/// by what the caller did wrong rather than by where the check lives.
#[derive(Debug, thiserror::Error)]
pub enum CoreError {
    /// A referenced user, property or rental does not exist.
    #[error("{entity} {id} does not exist")]
    NotFound { entity: &'static str, id: DbId },

    /// Input that can never succeed as sent (bad amount, date, file name...).
    #[error("Invalid input: {0}")]
    Validation(String),

    /// The request clashes with current state (duplicate email, rental
    /// already ended).
    #[error("Conflict: {0}")]
    Conflict(String),

    /// Missing or bad credentials.
    #[error("Not authenticated: {0}")]
    Unauthorized(String),

    /// Authenticated, but not allowed to touch this resource.
    #[error("Not allowed: {0}")]
    Forbidden(String),

    /// A rental was requested for a property that is not `available`.
    #[error("Property {id} is not available (status: {status})")]
    PropertyUnavailable { id: DbId, status: String },

    #[error("Internal error: {0}")]
    Internal(String),
}
