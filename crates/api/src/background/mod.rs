//! Jobs that run beside the HTTP server for the life of the process.
//!
//! Each job is an async fn meant for `tokio::spawn` and stops when its
//! [`CancellationToken`](tokio_util::sync::CancellationToken) fires.

pub mod ledger_sweep;
