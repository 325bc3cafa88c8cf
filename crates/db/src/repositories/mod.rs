//! Repositories, one per aggregate. Each takes the pool explicitly so the
//! caller owns the connection handle.

pub mod dashboard_repo;
pub mod property_repo;
pub mod rental_repo;
pub mod user_repo;

pub use dashboard_repo::DashboardRepo;
pub use property_repo::PropertyRepo;
pub use rental_repo::RentalRepo;
pub use user_repo::UserRepo;
