//! Aggregate counters for the admin dashboard.

use rentdesk_core::types::Amount;
use serde::Serialize;
use sqlx::FromRow;

#[derive(Debug, Clone, FromRow, Serialize)]
pub struct PropertyCounts {
    pub total: i64,
    pub available: i64,
    pub occupied: i64,
    pub maintenance: i64,
}

#[derive(Debug, Clone, FromRow, Serialize)]
pub struct UserCounts {
    pub total: i64,
    pub active: i64,
}

/// Totals over active rentals.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct RentalTotals {
    pub active: i64,
    /// Sum of `monthly_rent`.
    pub monthly_rent: Amount,
    /// Sum of `due_amount`.
    pub total_dues: Amount,
}

#[derive(Debug, Clone, Serialize)]
pub struct DashboardStats {
    pub properties: PropertyCounts,
    pub users: UserCounts,
    pub rentals: RentalTotals,
}
