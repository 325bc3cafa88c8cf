//! Handlers for `/auth` (register, login, profile) and `/user/profile`.

use axum::extract::State;
use axum::http::StatusCode;
use axum::Json;
use rentdesk_core::error::CoreError;
use rentdesk_core::messages;
use rentdesk_db::models::user::{Address, CreateUser, User, UserResponse, UserRole};
use rentdesk_db::repositories::UserRepo;
use serde::{Deserialize, Serialize};
use validator::Validate;

use crate::auth::jwt::issue_token;
use crate::auth::password::{check_password_length, hash_password, verify_password};
use crate::error::{AppError, AppResult};
use crate::extract::ValidJson;
use crate::middleware::rbac::RequireAuth;
use crate::response::DataResponse;
use crate::state::AppState;

// ---------------------------------------------------------------------------
// Request / response types
// ---------------------------------------------------------------------------

/// Request body for `POST /auth/register`.
#[derive(Debug, Deserialize, Validate)]
pub struct RegisterRequest {
    #[validate(length(min = 1, max = 100, message = "Name is required"))]
    pub name: String,
    #[validate(email(message = "A valid email is required"))]
    pub email: String,
    #[validate(length(min = 1, max = 20, message = "Phone is required"))]
    pub phone: String,
    pub password: String,
    #[serde(default)]
    pub address: Address,
}

/// Request body for `POST /auth/login`.
#[derive(Debug, Deserialize, Validate)]
pub struct LoginRequest {
    #[validate(email(message = "A valid email is required"))]
    pub email: String,
    #[validate(length(min = 1, message = "Password is required"))]
    pub password: String,
}

/// Successful authentication response returned by register and login.
#[derive(Debug, Serialize)]
pub struct AuthResponse {
    pub token: String,
    /// Token lifetime in seconds.
    pub expires_in: i64,
    pub user: UserResponse,
}

// ---------------------------------------------------------------------------
// Handlers
// ---------------------------------------------------------------------------

/// POST /api/v1/auth/register
///
/// Create a tenant account and return a token for it.
pub async fn register(
    State(state): State<AppState>,
    ValidJson(input): ValidJson<RegisterRequest>,
) -> AppResult<(StatusCode, Json<DataResponse<AuthResponse>>)> {
    check_password_length(&input.password)?;

    let email = input.email.trim().to_string();
    if UserRepo::find_by_email(&state.pool, &email).await?.is_some() {
        return Err(AppError::Core(CoreError::Conflict(
            "User with this email already exists".into(),
        )));
    }

    let password_hash = hash_password(&input.password)
        .map_err(|e| AppError::InternalError(format!("Password hashing error: {e}")))?;

    let create = CreateUser {
        name: input.name.trim().to_string(),
        email,
        phone: input.phone.trim().to_string(),
        password_hash,
        role: UserRole::Tenant,
        address: input.address,
    };
    // A concurrent registration can still race past the lookup above;
    // `uq_users_email` turns that into a 409 as well.
    let user = UserRepo::create(&state.pool, &create).await?;
    tracing::info!(user_id = user.id, "Tenant registered");

    let response = auth_response(&state, user)?;
    Ok((
        StatusCode::CREATED,
        Json(DataResponse::new(response, messages::REGISTERED)),
    ))
}

/// POST /api/v1/auth/login
///
/// Authenticate with email + password. Unknown email, wrong password and
/// deactivated accounts are all rejected with 401.
pub async fn login(
    State(state): State<AppState>,
    ValidJson(input): ValidJson<LoginRequest>,
) -> AppResult<Json<DataResponse<AuthResponse>>> {
    let invalid = || AppError::Core(CoreError::Unauthorized("Invalid email or password".into()));

    let user = UserRepo::find_by_email(&state.pool, input.email.trim())
        .await?
        .ok_or_else(invalid)?;

    let password_valid = verify_password(&input.password, &user.password_hash)
        .map_err(|e| AppError::InternalError(format!("Password verification error: {e}")))?;
    if !password_valid {
        return Err(invalid());
    }

    if !user.is_active {
        return Err(AppError::Core(CoreError::Unauthorized(
            "Account is deactivated".into(),
        )));
    }

    tracing::info!(user_id = user.id, role = user.role.as_str(), "User logged in");
    let response = auth_response(&state, user)?;
    Ok(Json(DataResponse::new(response, messages::LOGGED_IN)))
}

/// GET /api/v1/auth/profile and GET /api/v1/user/profile
pub async fn profile(
    State(state): State<AppState>,
    RequireAuth(user): RequireAuth,
) -> AppResult<Json<DataResponse<UserResponse>>> {
    let found = UserRepo::find_by_id(&state.pool, user.user_id)
        .await?
        .ok_or(AppError::Core(CoreError::NotFound {
            entity: "User",
            id: user.user_id,
        }))?;
    Ok(Json(DataResponse::new(found.into(), messages::PROFILE)))
}

// ---------------------------------------------------------------------------
// Helpers
// ---------------------------------------------------------------------------

fn auth_response(state: &AppState, user: User) -> AppResult<AuthResponse> {
    let token = issue_token(&user, &state.config.jwt)
        .map_err(|e| AppError::InternalError(format!("Token generation error: {e}")))?;

    Ok(AuthResponse {
        token,
        expires_in: state.config.jwt.expires_in_secs(),
        user: user.into(),
    })
}
