//! Access tokens.
//!
//! Tokens are HS256-signed JWTs carrying [`Claims`]. There are no refresh
//! tokens: a tenant whose token lapses logs in again.

use jsonwebtoken::{Algorithm, DecodingKey, EncodingKey, Header, Validation};
use rentdesk_core::types::DbId;
use rentdesk_db::models::user::{User, UserRole};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Default access token lifetime in hours.
const DEFAULT_EXPIRY_HOURS: i64 = 24;

/// Payload of every access token.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Claims {
    /// Subject: the user's id.
    pub sub: DbId,
    pub email: String,
    pub role: UserRole,
    /// Expiry, UTC Unix seconds.
    pub exp: i64,
    /// Issued at, UTC Unix seconds.
    pub iat: i64,
    /// Token id (UUID v4).
    pub jti: String,
}

impl Claims {
    /// Claims for `user_id` issued at `issued_at` and valid for
    /// `lifetime_secs`.
    pub fn new(
        user_id: DbId,
        email: &str,
        role: UserRole,
        issued_at: i64,
        lifetime_secs: i64,
    ) -> Self {
        Self {
            sub: user_id,
            email: email.to_string(),
            role,
            exp: issued_at + lifetime_secs,
            iat: issued_at,
            jti: Uuid::new_v4().to_string(),
        }
    }
}

/// Signing settings.
#[derive(Debug, Clone)]
pub struct JwtConfig {
    /// HMAC secret shared by signing and verification.
    pub secret: String,
    pub expiry_hours: i64,
}

impl JwtConfig {
    /// Read `JWT_SECRET` (required, non-empty) and `JWT_EXPIRY_HOURS`
    /// (default 24).
    ///
    /// # Panics
    ///
    /// On a missing or empty secret or an unparsable expiry, so a
    /// misconfigured server never starts.
    pub fn from_env() -> Self {
        let secret = std::env::var("JWT_SECRET").unwrap_or_default();
        assert!(!secret.is_empty(), "JWT_SECRET must be set to a non-empty value");

        let expiry_hours = match std::env::var("JWT_EXPIRY_HOURS") {
            Ok(raw) => raw
                .parse()
                .unwrap_or_else(|_| panic!("JWT_EXPIRY_HOURS must be an integer, got '{raw}'")),
            Err(_) => DEFAULT_EXPIRY_HOURS,
        };

        Self {
            secret,
            expiry_hours,
        }
    }

    /// Token lifetime in seconds.
    pub fn expires_in_secs(&self) -> i64 {
        self.expiry_hours * 3600
    }
}

/// Issue a fresh access token for `user`.
pub fn issue_token(user: &User, config: &JwtConfig) -> Result<String, jsonwebtoken::errors::Error> {
    let claims = Claims::new(
        user.id,
        &user.email,
        user.role,
        chrono::Utc::now().timestamp(),
        config.expires_in_secs(),
    );
    sign(&claims, config)
}

/// Sign arbitrary claims with the configured secret.
pub fn sign(claims: &Claims, config: &JwtConfig) -> Result<String, jsonwebtoken::errors::Error> {
    jsonwebtoken::encode(
        &Header::new(Algorithm::HS256),
        claims,
        &EncodingKey::from_secret(config.secret.as_bytes()),
    )
}

/// Verify signature and expiry and return the claims.
///
/// Expiry is checked without leeway.
pub fn decode_token(token: &str, config: &JwtConfig) -> Result<Claims, jsonwebtoken::errors::Error> {
    let mut validation = Validation::new(Algorithm::HS256);
    validation.leeway = 0;
    let data = jsonwebtoken::decode::<Claims>(
        token,
        &DecodingKey::from_secret(config.secret.as_bytes()),
        &validation,
    )?;
    Ok(data.claims)
}
