//! Read-only aggregates for the admin dashboard.

use sqlx::PgPool;

use crate::models::dashboard::{DashboardStats, PropertyCounts, RentalTotals, UserCounts};

pub struct DashboardRepo;

impl DashboardRepo {
    /// Collect property, user and active-rental counters.
    pub async fn stats(pool: &PgPool) -> Result<DashboardStats, sqlx::Error> {
        let properties = sqlx::query_as::<_, PropertyCounts>(
            "SELECT COUNT(*) AS total,
                    COUNT(*) FILTER (WHERE status = 'available') AS available,
                    COUNT(*) FILTER (WHERE status = 'occupied') AS occupied,
                    COUNT(*) FILTER (WHERE status = 'maintenance') AS maintenance
             FROM properties",
        )
        .fetch_one(pool)
        .await?;

        let users = sqlx::query_as::<_, UserCounts>(
            "SELECT COUNT(*) AS total,
                    COUNT(*) FILTER (WHERE is_active) AS active
             FROM users",
        )
        .fetch_one(pool)
        .await?;

        let rentals = sqlx::query_as::<_, RentalTotals>(
            "SELECT COUNT(*) AS active,
                    COALESCE(SUM(monthly_rent), 0)::DOUBLE PRECISION AS monthly_rent,
                    COALESCE(SUM(due_amount), 0)::DOUBLE PRECISION AS total_dues
             FROM rentals
             WHERE status = 'active'",
        )
        .fetch_one(pool)
        .await?;

        Ok(DashboardStats {
            properties,
            users,
            rentals,
        })
    }
}
