//! Rental (tenancy) and payment models and DTOs.

use rentdesk_core::types::{Amount, DbId, Timestamp};
use serde::{Deserialize, Serialize};
use sqlx::types::Json;
use sqlx::FromRow;

use crate::models::property::{PropertyStatus, PropertyType};

/// Lifecycle state of a rental, stored in the `rental_status` enum column.
///
/// `active` is the only non-terminal state: a rental leaves it either by
/// manual termination or by expiring at its end date.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, sqlx::Type)]
#[sqlx(type_name = "rental_status", rename_all = "lowercase")]
#[serde(rename_all = "lowercase")]
pub enum RentalStatus {
    Active,
    Terminated,
    Expired,
}

impl RentalStatus {
    pub fn as_str(self) -> &'static str {
        match self {
            RentalStatus::Active => "active",
            RentalStatus::Terminated => "terminated",
            RentalStatus::Expired => "expired",
        }
    }
}

/// How a payment was made.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, sqlx::Type)]
#[sqlx(type_name = "payment_method", rename_all = "snake_case")]
#[serde(rename_all = "snake_case")]
pub enum PaymentMethod {
    Cash,
    Upi,
    BankTransfer,
    Cheque,
    Online,
}

/// Settlement state of a payment. Payments recorded through the API are
/// always `paid`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, sqlx::Type)]
#[sqlx(type_name = "payment_status", rename_all = "lowercase")]
#[serde(rename_all = "lowercase")]
pub enum PaymentStatus {
    Paid,
    Pending,
    Failed,
}

/// Contract terms embedded in the `rentals.agreement` JSONB column.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Agreement {
    pub duration_months: i32,
    /// Yearly rent increment in percent.
    pub rent_increment_pct: f64,
    pub notice_period_days: i32,
    pub terms: Vec<String>,
    pub signed_date: Option<Timestamp>,
    pub agreement_url: Option<String>,
}

/// A rental row from the `rentals` table.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct Rental {
    pub id: DbId,
    pub property_id: DbId,
    pub tenant_id: DbId,
    pub start_date: Timestamp,
    pub end_date: Option<Timestamp>,
    pub monthly_rent: Amount,
    pub security_deposit: Amount,
    pub status: RentalStatus,
    /// Outstanding balance. Negative values are credit from overpayment.
    pub due_amount: Amount,
    pub next_due_date: Timestamp,
    pub agreement: Json<Agreement>,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

/// A payment row from the `rental_payments` table.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct Payment {
    pub id: DbId,
    pub rental_id: DbId,
    pub amount: Amount,
    pub payment_date: Timestamp,
    pub period_month: i32,
    pub period_year: i32,
    pub payment_method: PaymentMethod,
    pub transaction_id: Option<String>,
    pub status: PaymentStatus,
    pub remarks: String,
    pub created_at: Timestamp,
}

/// A rental together with its payment history, oldest payment first.
#[derive(Debug, Clone, Serialize)]
pub struct RentalDetail {
    #[serde(flatten)]
    pub rental: Rental,
    pub payment_history: Vec<Payment>,
}

/// DTO for creating a new rental.
///
/// The due amount is seeded from `monthly_rent` by the repository;
/// `next_due_date` is computed by the caller from the start date.
#[derive(Debug, Clone)]
pub struct CreateRental {
    pub property_id: DbId,
    pub tenant_id: DbId,
    pub start_date: Timestamp,
    pub end_date: Option<Timestamp>,
    pub monthly_rent: Amount,
    pub security_deposit: Amount,
    pub next_due_date: Timestamp,
    pub agreement: Agreement,
}

/// DTO for appending a payment to a rental.
#[derive(Debug, Clone)]
pub struct CreatePayment {
    pub amount: Amount,
    pub period_month: i32,
    pub period_year: i32,
    pub payment_method: PaymentMethod,
    pub transaction_id: Option<String>,
    pub remarks: String,
}

/// Property fields joined onto rental listings.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct PropertySummary {
    #[sqlx(rename = "property_id")]
    pub id: DbId,
    #[sqlx(rename = "property_title")]
    pub title: String,
    #[sqlx(rename = "property_type")]
    #[serde(rename = "type")]
    pub property_type: PropertyType,
    #[sqlx(rename = "property_city")]
    pub city: String,
    #[sqlx(rename = "property_status")]
    pub status: PropertyStatus,
    #[sqlx(rename = "property_images")]
    pub images: Vec<String>,
}

/// Tenant fields joined onto admin rental listings.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct TenantSummary {
    #[sqlx(rename = "tenant_id")]
    pub id: DbId,
    #[sqlx(rename = "tenant_name")]
    pub name: String,
    #[sqlx(rename = "tenant_email")]
    pub email: String,
    #[sqlx(rename = "tenant_phone")]
    pub phone: String,
}

/// A tenant's rental joined with its property.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct RentalWithProperty {
    #[sqlx(flatten)]
    #[serde(flatten)]
    pub rental: Rental,
    #[sqlx(flatten)]
    pub property: PropertySummary,
}

/// A rental joined with its property and tenant, for admin views.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct RentalWithParties {
    #[sqlx(flatten)]
    #[serde(flatten)]
    pub rental: Rental,
    #[sqlx(flatten)]
    pub property: PropertySummary,
    #[sqlx(flatten)]
    pub tenant: TenantSummary,
}

/// Result of a rental creation attempt.
#[derive(Debug)]
pub enum CreateRentalOutcome {
    Created(Rental),
    PropertyNotFound,
    TenantNotFound,
    /// The property exists but is not `available`; nothing was written.
    PropertyUnavailable(PropertyStatus),
}

/// Result of a termination attempt.
#[derive(Debug)]
pub enum TerminateOutcome {
    Terminated(Rental),
    NotFound,
    /// The rental already left the `active` state.
    NotActive(RentalStatus),
}

/// An active rental whose next billing period has started.
#[derive(Debug, Clone, FromRow)]
pub struct DueRollover {
    pub id: DbId,
    /// Anchor of the billing schedule; every due date is a whole number of
    /// months after it.
    pub start_date: Timestamp,
    pub due_amount: Amount,
    pub next_due_date: Timestamp,
    pub monthly_rent: Amount,
    pub end_date: Option<Timestamp>,
}
