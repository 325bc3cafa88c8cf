//! Rental ledger rules: due-date arithmetic, rollover and payment checks.
//!
//! The ledger of a rental is its running `due_amount` plus the append-only
//! payment history. A new rental owes its first month immediately, so the
//! initial due amount is one month's rent and the next due date is one
//! calendar month after the start date. Due dates are always counted from
//! the start date, so a month-end clamp in February does not carry into
//! March. Each elapsed billing period adds
//! one more month's rent (see [`roll_forward`]). Payments subtract from the
//! due amount; overpayment is kept as a negative balance (credit) that the
//! next rollover consumes.

use chrono::{Datelike, Months};

use crate::error::CoreError;
use crate::types::{Amount, Timestamp};

/// Earliest billing year accepted on a payment.
pub const MIN_PERIOD_YEAR: i32 = 2000;

/// Latest billing year accepted on a payment.
pub const MAX_PERIOD_YEAR: i32 = 2100;

/// The `n`-th due date of a rental starting at `start`, `n` calendar
/// months later with the day clamped to the target month's length.
pub fn nth_due_date(start: Timestamp, n: u32) -> Result<Timestamp, CoreError> {
    start
        .checked_add_months(Months::new(n))
        .ok_or_else(|| CoreError::Validation(format!("Date {start} is out of range")))
}

/// The first due date of a rental starting at `start`.
pub fn first_due_date(start: Timestamp) -> Result<Timestamp, CoreError> {
    nth_due_date(start, 1)
}

/// Position of `due` in the schedule anchored at `start`: the number of
/// calendar months between the two. Clamping never changes the month, so
/// this inverts [`nth_due_date`].
fn period_index(start: Timestamp, due: Timestamp) -> Result<u32, CoreError> {
    let months = (due.year() - start.year()) * 12 + due.month() as i32 - start.month() as i32;
    u32::try_from(months).map_err(|_| {
        CoreError::Validation(format!("Due date {due} precedes start date {start}"))
    })
}

/// Validate the money terms of a new rental.
pub fn validate_rent_terms(monthly_rent: Amount, security_deposit: Amount) -> Result<(), CoreError> {
    if !monthly_rent.is_finite() || monthly_rent <= 0.0 {
        return Err(CoreError::Validation(
            "monthly_rent must be greater than zero".into(),
        ));
    }
    if !security_deposit.is_finite() || security_deposit < 0.0 {
        return Err(CoreError::Validation(
            "security_deposit must not be negative".into(),
        ));
    }
    Ok(())
}

/// Validate that an optional end date falls after the start date.
pub fn validate_rental_period(start: Timestamp, end: Option<Timestamp>) -> Result<(), CoreError> {
    match end {
        Some(end) if end <= start => Err(CoreError::Validation(
            "end_date must be after start_date".into(),
        )),
        _ => Ok(()),
    }
}

/// Validate a payment amount and its billing period.
pub fn validate_payment(amount: Amount, period_month: i32, period_year: i32) -> Result<(), CoreError> {
    if !amount.is_finite() || amount <= 0.0 {
        return Err(CoreError::Validation(
            "Payment amount must be greater than zero".into(),
        ));
    }
    if !(1..=12).contains(&period_month) {
        return Err(CoreError::Validation(
            "period_month must be between 1 and 12".into(),
        ));
    }
    if !(MIN_PERIOD_YEAR..=MAX_PERIOD_YEAR).contains(&period_year) {
        return Err(CoreError::Validation(format!(
            "period_year must be between {MIN_PERIOD_YEAR} and {MAX_PERIOD_YEAR}"
        )));
    }
    Ok(())
}

/// Sum of outstanding balances.
pub fn total_due<I>(amounts: I) -> Amount
where
    I: IntoIterator<Item = Amount>,
{
    amounts.into_iter().sum()
}

/// Snapshot of the fields the rollover needs from an active rental.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct LedgerState {
    pub start_date: Timestamp,
    pub due_amount: Amount,
    pub next_due_date: Timestamp,
    pub monthly_rent: Amount,
    pub end_date: Option<Timestamp>,
}

/// Outcome of [`roll_forward`].
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Rollover {
    pub due_amount: Amount,
    pub next_due_date: Timestamp,
    /// Number of billing periods that were charged.
    pub periods: u32,
    /// Total rent added to the due amount.
    pub charged: Amount,
}

/// Charge every billing period that started on or before `now`.
///
/// A period is charged when its start (`next_due_date`) is not in the
/// future and, for fixed-term rentals, falls before the end date. Each
/// charge adds `monthly_rent` and moves `next_due_date` to the following
/// month of the schedule anchored at `start_date`.
pub fn roll_forward(state: LedgerState, now: Timestamp) -> Result<Rollover, CoreError> {
    let mut due_amount = state.due_amount;
    let mut next_due_date = state.next_due_date;
    let mut index = period_index(state.start_date, next_due_date)?;
    let mut periods = 0;
    let mut charged = 0.0;

    while next_due_date <= now && state.end_date.map_or(true, |end| next_due_date < end) {
        due_amount += state.monthly_rent;
        charged += state.monthly_rent;
        index += 1;
        next_due_date = nth_due_date(state.start_date, index)?;
        periods += 1;
    }

    Ok(Rollover {
        due_amount,
        next_due_date,
        periods,
        charged,
    })
}
