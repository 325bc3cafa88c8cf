//! Request extractors that authenticate the caller ([`auth::AuthUser`]) and
//! gate routes by role ([`rbac::RequireAdmin`], [`rbac::RequireAuth`]).

pub mod auth;
pub mod rbac;
