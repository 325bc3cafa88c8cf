//! Shared response envelope for API handlers.
//!
//! Every successful response uses a `{ "data": ..., "message": { "en", "hi" } }`
//! envelope. Use [`DataResponse`] instead of ad-hoc `serde_json::json!` so the
//! shape is checked at compile time.

use rentdesk_core::messages::Message;
use serde::Serialize;

/// Standard `{ "data": T, "message": {...} }` response envelope.
///
/// ```ignore
/// Ok(Json(DataResponse::new(property, messages::PROPERTY_FOUND)))
/// ```
#[derive(Debug, Serialize)]
pub struct DataResponse<T: Serialize> {
    pub data: T,
    pub message: Message,
}

impl<T: Serialize> DataResponse<T> {
    pub fn new(data: T, message: Message) -> Self {
        Self { data, message }
    }
}
