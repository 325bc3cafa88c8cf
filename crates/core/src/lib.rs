//! Domain rules for the rentdesk backend.
//!
//! This crate has no I/O and no internal dependencies so the ledger
//! arithmetic, pagination bounds and upload naming rules can be unit tested
//! in isolation and shared by the repository and HTTP layers.

pub mod error;
pub mod ledger;
pub mod messages;
pub mod pagination;
pub mod roles;
pub mod types;
pub mod uploads;
