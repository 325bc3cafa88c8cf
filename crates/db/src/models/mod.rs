//! Entity models and DTOs, one module per table family.

pub mod dashboard;
pub mod property;
pub mod rental;
pub mod user;
