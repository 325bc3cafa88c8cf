//! HTTP surface of the rental manager.
//!
//! The binary in `main.rs` only wires configuration, the database and
//! the ledger sweep around [`router::build_app_router`]; the integration
//! tests drive the same router in process.

pub mod auth;
pub mod background;
pub mod config;
pub mod error;
pub mod extract;
pub mod handlers;
pub mod middleware;
pub mod query;
pub mod response;
pub mod router;
pub mod routes;
pub mod state;
pub mod storage;
