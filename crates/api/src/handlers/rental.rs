//! Handlers for the `/rentals` resource: tenancy creation, payments, the
//! tenant's own views, and termination.

use axum::body::Bytes;
use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::Json;
use chrono::Utc;
use rentdesk_core::error::CoreError;
use rentdesk_core::ledger::{
    first_due_date, total_due, validate_payment, validate_rent_terms, validate_rental_period,
};
use rentdesk_core::messages;
use rentdesk_core::types::{Amount, DbId, Timestamp};
use rentdesk_db::models::rental::{
    Agreement, CreatePayment, CreateRental, CreateRentalOutcome, Payment, PaymentMethod,
    RentalDetail, RentalWithProperty, TerminateOutcome,
};
use rentdesk_db::repositories::RentalRepo;
use serde::{Deserialize, Serialize};

use crate::error::{AppError, AppResult};
use crate::extract::ApiJson;
use crate::middleware::rbac::{RequireAdmin, RequireAuth};
use crate::response::DataResponse;
use crate::state::AppState;

// ---------------------------------------------------------------------------
// Request / response types
// ---------------------------------------------------------------------------

/// Request body for `POST /rentals`.
#[derive(Debug, Deserialize)]
pub struct CreateRentalRequest {
    pub property_id: DbId,
    pub tenant_id: DbId,
    pub start_date: Timestamp,
    #[serde(default)]
    pub end_date: Option<Timestamp>,
    pub monthly_rent: Amount,
    #[serde(default)]
    pub security_deposit: Amount,
    #[serde(default)]
    pub agreement: Agreement,
}

/// Request body for `POST /rentals/{id}/payment`.
#[derive(Debug, Deserialize)]
pub struct RecordPaymentRequest {
    pub amount: Amount,
    pub period_month: i32,
    pub period_year: i32,
    pub payment_method: PaymentMethod,
    #[serde(default)]
    pub transaction_id: Option<String>,
    #[serde(default)]
    pub remarks: String,
}

/// Optional body for `POST /rentals/{id}/terminate`.
#[derive(Debug, Default, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct TerminateRequest {
    /// Defaults to now.
    pub end_date: Option<Timestamp>,
}

/// A recorded payment and the balance left after it.
#[derive(Debug, Serialize)]
pub struct PaymentReceipt {
    pub payment: Payment,
    pub due_amount: Amount,
}

/// Outstanding rentals of the caller and their sum.
#[derive(Debug, Serialize)]
pub struct DuesSummary {
    pub dues: Vec<RentalWithProperty>,
    pub total_due: Amount,
}

// ---------------------------------------------------------------------------
// Handlers
// ---------------------------------------------------------------------------

/// POST /api/v1/rentals
///
/// Create an active rental. The property must be `available`; it becomes
/// `occupied` in the same transaction. The first month's rent is due
/// immediately and the next due date is one calendar month after the start.
pub async fn create_rental(
    State(state): State<AppState>,
    RequireAdmin(admin): RequireAdmin,
    ApiJson(input): ApiJson<CreateRentalRequest>,
) -> AppResult<(StatusCode, Json<DataResponse<RentalDetail>>)> {
    validate_rent_terms(input.monthly_rent, input.security_deposit)?;
    validate_rental_period(input.start_date, input.end_date)?;
    let next_due_date = first_due_date(input.start_date)?;

    let create = CreateRental {
        property_id: input.property_id,
        tenant_id: input.tenant_id,
        start_date: input.start_date,
        end_date: input.end_date,
        monthly_rent: input.monthly_rent,
        security_deposit: input.security_deposit,
        next_due_date,
        agreement: input.agreement,
    };

    let rental = match RentalRepo::create(&state.pool, &create).await? {
        CreateRentalOutcome::Created(rental) => rental,
        CreateRentalOutcome::PropertyNotFound => {
            return Err(AppError::Core(CoreError::NotFound {
                entity: "Property",
                id: input.property_id,
            }));
        }
        CreateRentalOutcome::TenantNotFound => {
            return Err(AppError::Core(CoreError::NotFound {
                entity: "User",
                id: input.tenant_id,
            }));
        }
        CreateRentalOutcome::PropertyUnavailable(status) => {
            return Err(AppError::Core(CoreError::PropertyUnavailable {
                id: input.property_id,
                status: status.as_str().to_string(),
            }));
        }
    };

    tracing::info!(
        rental_id = rental.id,
        property_id = rental.property_id,
        tenant_id = rental.tenant_id,
        admin_id = admin.user_id,
        "Rental created"
    );

    let detail = RentalDetail {
        rental,
        payment_history: Vec::new(),
    };
    Ok((
        StatusCode::CREATED,
        Json(DataResponse::new(detail, messages::RENTAL_CREATED)),
    ))
}

/// GET /api/v1/rentals/{id}
///
/// The rental with its payment history. Visible to its tenant and to admins.
pub async fn get_rental(
    State(state): State<AppState>,
    RequireAuth(user): RequireAuth,
    Path(id): Path<DbId>,
) -> AppResult<Json<DataResponse<RentalDetail>>> {
    let detail = RentalRepo::find_detail(&state.pool, id)
        .await?
        .ok_or(AppError::Core(CoreError::NotFound {
            entity: "Rental",
            id,
        }))?;
    user.ensure_owner_or_admin(detail.rental.tenant_id)?;

    Ok(Json(DataResponse::new(detail, messages::RENTAL_FOUND)))
}

/// POST /api/v1/rentals/{id}/payment
///
/// Append a `paid` payment and subtract it from the due amount. Only the
/// rental's tenant or an admin may record payments.
pub async fn record_payment(
    State(state): State<AppState>,
    RequireAuth(user): RequireAuth,
    Path(id): Path<DbId>,
    ApiJson(input): ApiJson<RecordPaymentRequest>,
) -> AppResult<Json<DataResponse<PaymentReceipt>>> {
    validate_payment(input.amount, input.period_month, input.period_year)?;

    let rental = RentalRepo::find_by_id(&state.pool, id)
        .await?
        .ok_or(AppError::Core(CoreError::NotFound {
            entity: "Rental",
            id,
        }))?;
    user.ensure_owner_or_admin(rental.tenant_id)?;

    let create = CreatePayment {
        amount: input.amount,
        period_month: input.period_month,
        period_year: input.period_year,
        payment_method: input.payment_method,
        transaction_id: input.transaction_id.filter(|t| !t.trim().is_empty()),
        remarks: input.remarks,
    };

    let (rental, payment) = RentalRepo::record_payment(&state.pool, id, &create)
        .await?
        .ok_or(AppError::Core(CoreError::NotFound {
            entity: "Rental",
            id,
        }))?;

    tracing::info!(
        rental_id = id,
        payment_id = payment.id,
        amount = payment.amount,
        due_amount = rental.due_amount,
        user_id = user.user_id,
        "Payment recorded"
    );

    Ok(Json(DataResponse::new(
        PaymentReceipt {
            payment,
            due_amount: rental.due_amount,
        },
        messages::PAYMENT_RECORDED,
    )))
}

/// GET /api/v1/rentals/my-rentals
pub async fn my_rentals(
    State(state): State<AppState>,
    RequireAuth(user): RequireAuth,
) -> AppResult<Json<DataResponse<Vec<RentalWithProperty>>>> {
    let rentals = RentalRepo::list_for_tenant(&state.pool, user.user_id).await?;
    Ok(Json(DataResponse::new(rentals, messages::MY_RENTALS)))
}

/// GET /api/v1/rentals/my-dues
///
/// Active rentals of the caller with a positive due amount, plus their sum.
pub async fn my_dues(
    State(state): State<AppState>,
    RequireAuth(user): RequireAuth,
) -> AppResult<Json<DataResponse<DuesSummary>>> {
    let dues = RentalRepo::dues_for_tenant(&state.pool, user.user_id).await?;
    let total_due = total_due(dues.iter().map(|d| d.rental.due_amount));
    Ok(Json(DataResponse::new(
        DuesSummary { dues, total_due },
        messages::MY_DUES,
    )))
}

/// POST /api/v1/rentals/{id}/terminate
///
/// End an active rental and return its property to `available`. The body is
/// optional; `end_date` defaults to now.
pub async fn terminate_rental(
    State(state): State<AppState>,
    RequireAdmin(admin): RequireAdmin,
    Path(id): Path<DbId>,
    body: Bytes,
) -> AppResult<Json<DataResponse<RentalDetail>>> {
    let input: TerminateRequest = if body.iter().all(u8::is_ascii_whitespace) {
        TerminateRequest::default()
    } else {
        serde_json::from_slice(&body).map_err(|e| AppError::BadRequest(e.to_string()))?
    };
    let end_date = input.end_date.unwrap_or_else(Utc::now);

    let rental = match RentalRepo::terminate(&state.pool, id, end_date).await? {
        TerminateOutcome::Terminated(rental) => rental,
        TerminateOutcome::NotFound => {
            return Err(AppError::Core(CoreError::NotFound {
                entity: "Rental",
                id,
            }));
        }
        TerminateOutcome::NotActive(status) => {
            return Err(AppError::Core(CoreError::Conflict(format!(
                "Rental {id} is not active (status: {})",
                status.as_str()
            ))));
        }
    };
    tracing::info!(rental_id = id, admin_id = admin.user_id, "Rental terminated");

    let payment_history = RentalRepo::payments_for(&state.pool, id).await?;
    Ok(Json(DataResponse::new(
        RentalDetail {
            rental,
            payment_history,
        },
        messages::RENTAL_TERMINATED,
    )))
}
