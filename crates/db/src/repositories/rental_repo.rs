//! Repository for the `rentals` and `rental_payments` tables.
//!
//! Every write that touches more than one row runs in a single transaction:
//! creating a rental flips its property to `occupied`, terminating or
//! expiring one flips it back to `available`, and recording a payment
//! decrements the due amount in the same statement scope that appends the
//! payment row.

use rentdesk_core::types::{Amount, DbId, Timestamp};
use sqlx::types::Json;
use sqlx::PgPool;

use crate::models::property::PropertyStatus;
use crate::models::rental::{
    CreatePayment, CreateRental, CreateRentalOutcome, DueRollover, Payment, Rental, RentalDetail,
    RentalStatus, RentalWithParties, RentalWithProperty, TerminateOutcome,
};

/// Column list for rental queries.
const COLUMNS: &str = "id, property_id, tenant_id, start_date, end_date, monthly_rent, \
    security_deposit, status, due_amount, next_due_date, agreement, created_at, updated_at";

/// Rental columns qualified by the `r` alias, for joins.
const RENTAL_COLUMNS: &str = "r.id, r.property_id, r.tenant_id, r.start_date, r.end_date, \
    r.monthly_rent, r.security_deposit, r.status, r.due_amount, r.next_due_date, \
    r.agreement, r.created_at, r.updated_at";

/// Property summary columns for joins on the `p` alias.
const PROPERTY_SUMMARY: &str = "p.title AS property_title, p.property_type AS property_type, \
    COALESCE(p.location->>'city', '') AS property_city, p.status AS property_status, \
    p.images AS property_images";

/// Tenant summary columns for joins on the `u` alias.
const TENANT_SUMMARY: &str = "u.name AS tenant_name, u.email AS tenant_email, \
    u.phone AS tenant_phone";

/// Column list for payment queries.
const PAYMENT_COLUMNS: &str = "id, rental_id, amount, payment_date, period_month, period_year, \
    payment_method, transaction_id, status, remarks, created_at";

/// Provides the rental ledger operations.
pub struct RentalRepo;

impl RentalRepo {
    /// Create an active rental and mark its property `occupied`.
    ///
    /// The property row is locked for the duration of the transaction, so two
    /// concurrent creations against the same property serialize on the lock
    /// and the second one observes `occupied`. Any path that does not return
    /// [`CreateRentalOutcome::Created`] rolls back without writing.
    pub async fn create(
        pool: &PgPool,
        input: &CreateRental,
    ) -> Result<CreateRentalOutcome, sqlx::Error> {
        let mut tx = pool.begin().await?;

        let status: Option<PropertyStatus> =
            sqlx::query_scalar("SELECT status FROM properties WHERE id = $1 FOR UPDATE")
                .bind(input.property_id)
                .fetch_optional(&mut *tx)
                .await?;
        let Some(status) = status else {
            return Ok(CreateRentalOutcome::PropertyNotFound);
        };

        let tenant_exists: bool =
            sqlx::query_scalar("SELECT EXISTS(SELECT 1 FROM users WHERE id = $1)")
                .bind(input.tenant_id)
                .fetch_one(&mut *tx)
                .await?;
        if !tenant_exists {
            return Ok(CreateRentalOutcome::TenantNotFound);
        }

        if status != PropertyStatus::Available {
            return Ok(CreateRentalOutcome::PropertyUnavailable(status));
        }

        let query = format!(
            "INSERT INTO rentals
                (property_id, tenant_id, start_date, end_date, monthly_rent,
                 security_deposit, status, due_amount, next_due_date, agreement)
             VALUES ($1, $2, $3, $4, $5, $6, 'active', $5, $7, $8)
             RETURNING {COLUMNS}"
        );
        let rental = sqlx::query_as::<_, Rental>(&query)
            .bind(input.property_id)
            .bind(input.tenant_id)
            .bind(input.start_date)
            .bind(input.end_date)
            .bind(input.monthly_rent)
            .bind(input.security_deposit)
            .bind(input.next_due_date)
            .bind(Json(&input.agreement))
            .fetch_one(&mut *tx)
            .await?;

        sqlx::query("UPDATE properties SET status = 'occupied' WHERE id = $1")
            .bind(input.property_id)
            .execute(&mut *tx)
            .await?;

        tx.commit().await?;
        Ok(CreateRentalOutcome::Created(rental))
    }

    /// Find a rental by its primary key.
    pub async fn find_by_id(pool: &PgPool, id: DbId) -> Result<Option<Rental>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM rentals WHERE id = $1");
        sqlx::query_as::<_, Rental>(&query)
            .bind(id)
            .fetch_optional(pool)
            .await
    }

    /// Payment history of a rental in insertion order.
    pub async fn payments_for(pool: &PgPool, rental_id: DbId) -> Result<Vec<Payment>, sqlx::Error> {
        let query = format!(
            "SELECT {PAYMENT_COLUMNS} FROM rental_payments
             WHERE rental_id = $1
             ORDER BY created_at ASC, id ASC"
        );
        sqlx::query_as::<_, Payment>(&query)
            .bind(rental_id)
            .fetch_all(pool)
            .await
    }

    /// A rental together with its payment history.
    pub async fn find_detail(pool: &PgPool, id: DbId) -> Result<Option<RentalDetail>, sqlx::Error> {
        let Some(rental) = Self::find_by_id(pool, id).await? else {
            return Ok(None);
        };
        let payment_history = Self::payments_for(pool, id).await?;
        Ok(Some(RentalDetail {
            rental,
            payment_history,
        }))
    }

    /// Append a `paid` payment and subtract its amount from the due amount.
    ///
    /// The decrement happens in the database, so concurrent payments on the
    /// same rental never overwrite each other. Returns `None` when the rental
    /// does not exist; nothing is written in that case.
    pub async fn record_payment(
        pool: &PgPool,
        rental_id: DbId,
        input: &CreatePayment,
    ) -> Result<Option<(Rental, Payment)>, sqlx::Error> {
        let mut tx = pool.begin().await?;

        let query = format!(
            "UPDATE rentals SET due_amount = due_amount - $2
             WHERE id = $1
             RETURNING {COLUMNS}"
        );
        let rental = sqlx::query_as::<_, Rental>(&query)
            .bind(rental_id)
            .bind(input.amount)
            .fetch_optional(&mut *tx)
            .await?;
        let Some(rental) = rental else {
            return Ok(None);
        };

        let query = format!(
            "INSERT INTO rental_payments
                (rental_id, amount, payment_date, period_month, period_year,
                 payment_method, transaction_id, status, remarks)
             VALUES ($1, $2, NOW(), $3, $4, $5, $6, 'paid', $7)
             RETURNING {PAYMENT_COLUMNS}"
        );
        let payment = sqlx::query_as::<_, Payment>(&query)
            .bind(rental_id)
            .bind(input.amount)
            .bind(input.period_month)
            .bind(input.period_year)
            .bind(input.payment_method)
            .bind(&input.transaction_id)
            .bind(&input.remarks)
            .fetch_one(&mut *tx)
            .await?;

        tx.commit().await?;
        Ok(Some((rental, payment)))
    }

    /// All rentals of a tenant joined with their property, newest first.
    pub async fn list_for_tenant(
        pool: &PgPool,
        tenant_id: DbId,
    ) -> Result<Vec<RentalWithProperty>, sqlx::Error> {
        let query = format!(
            "SELECT {RENTAL_COLUMNS}, {PROPERTY_SUMMARY}
             FROM rentals r
             JOIN properties p ON p.id = r.property_id
             WHERE r.tenant_id = $1
             ORDER BY r.created_at DESC, r.id DESC"
        );
        sqlx::query_as::<_, RentalWithProperty>(&query)
            .bind(tenant_id)
            .fetch_all(pool)
            .await
    }

    /// Active rentals of a tenant that still owe money.
    pub async fn dues_for_tenant(
        pool: &PgPool,
        tenant_id: DbId,
    ) -> Result<Vec<RentalWithProperty>, sqlx::Error> {
        let query = format!(
            "SELECT {RENTAL_COLUMNS}, {PROPERTY_SUMMARY}
             FROM rentals r
             JOIN properties p ON p.id = r.property_id
             WHERE r.tenant_id = $1 AND r.status = 'active' AND r.due_amount > 0
             ORDER BY r.next_due_date ASC, r.id ASC"
        );
        sqlx::query_as::<_, RentalWithProperty>(&query)
            .bind(tenant_id)
            .fetch_all(pool)
            .await
    }

    /// Every rental joined with property and tenant, newest first.
    pub async fn list_all(pool: &PgPool) -> Result<Vec<RentalWithParties>, sqlx::Error> {
        let query = format!(
            "SELECT {RENTAL_COLUMNS}, {PROPERTY_SUMMARY}, {TENANT_SUMMARY}
             FROM rentals r
             JOIN properties p ON p.id = r.property_id
             JOIN users u ON u.id = r.tenant_id
             ORDER BY r.created_at DESC, r.id DESC"
        );
        sqlx::query_as::<_, RentalWithParties>(&query)
            .fetch_all(pool)
            .await
    }

    /// Active rentals with a positive due amount, earliest due date first.
    pub async fn list_overdue(pool: &PgPool) -> Result<Vec<RentalWithParties>, sqlx::Error> {
        let query = format!(
            "SELECT {RENTAL_COLUMNS}, {PROPERTY_SUMMARY}, {TENANT_SUMMARY}
             FROM rentals r
             JOIN properties p ON p.id = r.property_id
             JOIN users u ON u.id = r.tenant_id
             WHERE r.status = 'active' AND r.due_amount > 0
             ORDER BY r.next_due_date ASC, r.id ASC"
        );
        sqlx::query_as::<_, RentalWithParties>(&query)
            .fetch_all(pool)
            .await
    }

    /// End an active rental and release its property.
    ///
    /// `end_date` replaces the stored end date only when it is after the
    /// start date. A date that is not after the start date keeps the
    /// existing one.
    pub async fn terminate(
        pool: &PgPool,
        id: DbId,
        end_date: Timestamp,
    ) -> Result<TerminateOutcome, sqlx::Error> {
        let mut tx = pool.begin().await?;

        let status: Option<RentalStatus> =
            sqlx::query_scalar("SELECT status FROM rentals WHERE id = $1 FOR UPDATE")
                .bind(id)
                .fetch_optional(&mut *tx)
                .await?;
        match status {
            None => return Ok(TerminateOutcome::NotFound),
            Some(RentalStatus::Active) => {}
            Some(other) => return Ok(TerminateOutcome::NotActive(other)),
        }

        let query = format!(
            "UPDATE rentals SET
                status = 'terminated',
                end_date = CASE WHEN $2 > start_date THEN $2 ELSE end_date END
             WHERE id = $1
             RETURNING {COLUMNS}"
        );
        let rental = sqlx::query_as::<_, Rental>(&query)
            .bind(id)
            .bind(end_date)
            .fetch_one(&mut *tx)
            .await?;

        sqlx::query("UPDATE properties SET status = 'available' WHERE id = $1 AND status = 'occupied'")
            .bind(rental.property_id)
            .execute(&mut *tx)
            .await?;

        tx.commit().await?;
        Ok(TerminateOutcome::Terminated(rental))
    }

    /// Active rentals whose current billing period has started by `now`.
    pub async fn list_due_for_rollover(
        pool: &PgPool,
        now: Timestamp,
    ) -> Result<Vec<DueRollover>, sqlx::Error> {
        sqlx::query_as::<_, DueRollover>(
            "SELECT id, start_date, due_amount, next_due_date, monthly_rent, end_date
             FROM rentals
             WHERE status = 'active'
               AND next_due_date <= $1
               AND (end_date IS NULL OR next_due_date < end_date)
             ORDER BY next_due_date ASC, id ASC",
        )
        .bind(now)
        .fetch_all(pool)
        .await
    }

    /// Charge `charge` and move the due date to `new_next_due`.
    ///
    /// Guarded on the previously observed `next_due_date` so a rental is
    /// never charged twice for the same period. The charge is applied as an
    /// increment, so payments recorded in between are kept. Returns `false`
    /// when the guard no longer matches.
    pub async fn apply_rollover(
        pool: &PgPool,
        id: DbId,
        expected_next_due: Timestamp,
        charge: Amount,
        new_next_due: Timestamp,
    ) -> Result<bool, sqlx::Error> {
        let result = sqlx::query(
            "UPDATE rentals SET due_amount = due_amount + $3, next_due_date = $4
             WHERE id = $1 AND status = 'active' AND next_due_date = $2",
        )
        .bind(id)
        .bind(expected_next_due)
        .bind(charge)
        .bind(new_next_due)
        .execute(pool)
        .await?;
        Ok(result.rows_affected() > 0)
    }

    /// Expire every active rental whose end date has passed and release the
    /// properties. Returns the number of rentals expired.
    pub async fn expire_ended(pool: &PgPool, now: Timestamp) -> Result<u64, sqlx::Error> {
        let mut tx = pool.begin().await?;

        let property_ids: Vec<DbId> = sqlx::query_scalar(
            "UPDATE rentals SET status = 'expired'
             WHERE status = 'active' AND end_date IS NOT NULL AND end_date <= $1
             RETURNING property_id",
        )
        .bind(now)
        .fetch_all(&mut *tx)
        .await?;

        if !property_ids.is_empty() {
            sqlx::query(
                "UPDATE properties SET status = 'available'
                 WHERE id = ANY($1) AND status = 'occupied'",
            )
            .bind(&property_ids)
            .execute(&mut *tx)
            .await?;
        }

        tx.commit().await?;
        Ok(property_ids.len() as u64)
    }
}
