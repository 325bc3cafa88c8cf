//! Periodic ledger maintenance for active rentals.
//!
//! Each sweep first charges every billing period that has started (see
//! [`rentdesk_core::ledger::roll_forward`]) and then expires rentals whose
//! end date has passed, releasing their properties.

use std::time::Duration;

use chrono::Utc;
use rentdesk_core::ledger::{roll_forward, LedgerState};
use rentdesk_core::types::Timestamp;
use rentdesk_db::repositories::RentalRepo;
use sqlx::PgPool;
use tokio_util::sync::CancellationToken;

/// Counters from one sweep.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct SweepReport {
    /// Rentals that were charged at least one period.
    pub rolled_over: u64,
    /// Total billing periods charged.
    pub periods: u64,
    /// Rentals moved to `expired`.
    pub expired: u64,
}

/// Run the ledger sweep loop until `cancel` is triggered.
///
/// The first sweep runs immediately on start.
pub async fn run(pool: PgPool, every: Duration, cancel: CancellationToken) {
    tracing::info!(interval_secs = every.as_secs(), "Ledger sweep job started");

    let mut interval = tokio::time::interval(every);

    loop {
        tokio::select! {
            _ = cancel.cancelled() => {
                tracing::info!("Ledger sweep job stopping");
                break;
            }
            _ = interval.tick() => {
                match sweep_once(&pool, Utc::now()).await {
                    Ok(report) if report == SweepReport::default() => {
                        tracing::debug!("Ledger sweep: nothing to do");
                    }
                    Ok(report) => {
                        tracing::info!(
                            rolled_over = report.rolled_over,
                            periods = report.periods,
                            expired = report.expired,
                            "Ledger sweep completed"
                        );
                    }
                    Err(e) => {
                        tracing::error!(error = %e, "Ledger sweep failed");
                    }
                }
            }
        }
    }
}

/// Apply one rollover pass and one expiry pass as of `now`.
///
/// A rental whose due date moved since it was listed (a concurrent sweep)
/// is skipped; it is picked up again on the next pass if still behind.
pub async fn sweep_once(pool: &PgPool, now: Timestamp) -> Result<SweepReport, sqlx::Error> {
    let mut report = SweepReport::default();

    for due in RentalRepo::list_due_for_rollover(pool, now).await? {
        let state = LedgerState {
            start_date: due.start_date,
            due_amount: due.due_amount,
            next_due_date: due.next_due_date,
            monthly_rent: due.monthly_rent,
            end_date: due.end_date,
        };
        let rollover = match roll_forward(state, now) {
            Ok(r) if r.periods > 0 => r,
            Ok(_) => continue,
            Err(e) => {
                tracing::warn!(rental_id = due.id, error = %e, "Ledger sweep: skipping rental");
                continue;
            }
        };

        let applied = RentalRepo::apply_rollover(
            pool,
            due.id,
            due.next_due_date,
            rollover.charged,
            rollover.next_due_date,
        )
        .await?;
        if applied {
            tracing::debug!(
                rental_id = due.id,
                periods = rollover.periods,
                next_due_date = %rollover.next_due_date,
                "Ledger sweep: rent charged"
            );
            report.rolled_over += 1;
            report.periods += u64::from(rollover.periods);
        }
    }

    report.expired = RentalRepo::expire_ended(pool, now).await?;
    Ok(report)
}
