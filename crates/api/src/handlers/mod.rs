pub mod admin;
pub mod auth;
pub mod property;
pub mod rental;
pub mod upload;
