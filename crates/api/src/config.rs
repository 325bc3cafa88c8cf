use std::fmt::Display;
use std::path::PathBuf;
use std::str::FromStr;

use axum::http::HeaderValue;

use crate::auth::jwt::JwtConfig;

/// Runtime settings, read once at startup.
///
/// | Env Var                      | Default                                        |
/// |------------------------------|------------------------------------------------|
/// | `HOST`                       | `0.0.0.0`                                      |
/// | `PORT`                       | `8080`                                         |
/// | `CORS_ORIGINS`               | `http://localhost:5173,http://localhost:3000`  |
/// | `REQUEST_TIMEOUT_SECS`       | `30`                                           |
/// | `UPLOAD_DIR`                 | `./uploads`                                    |
/// | `LEDGER_SWEEP_INTERVAL_SECS` | `3600`                                         |
///
/// JWT settings come from [`JwtConfig::from_env`].
#[derive(Debug, Clone)]
pub struct ServerConfig {
    pub host: String,
    pub port: u16,
    /// Origins allowed by CORS, already validated as header values.
    pub cors_origins: Vec<HeaderValue>,
    /// Requests running longer than this are answered with 408.
    pub request_timeout_secs: u64,
    /// Root of stored uploads, also served at `/uploads`.
    pub upload_dir: PathBuf,
    /// Seconds between two ledger sweeps. Never zero.
    pub ledger_sweep_interval_secs: u64,
    pub jwt: JwtConfig,
}

impl ServerConfig {
    /// Build the configuration from the environment.
    ///
    /// # Panics
    ///
    /// On any value that does not parse, so bad configuration stops the
    /// server before it binds.
    pub fn from_env() -> Self {
        let cors_origins = env_or("CORS_ORIGINS", "http://localhost:5173,http://localhost:3000".to_string())
            .split(',')
            .map(str::trim)
            .filter(|origin| !origin.is_empty())
            .map(|origin| {
                HeaderValue::from_str(origin)
                    .unwrap_or_else(|e| panic!("Invalid CORS origin '{origin}': {e}"))
            })
            .collect();

        let ledger_sweep_interval_secs: u64 = env_or("LEDGER_SWEEP_INTERVAL_SECS", 3600);
        assert!(
            ledger_sweep_interval_secs > 0,
            "LEDGER_SWEEP_INTERVAL_SECS must be greater than zero"
        );

        Self {
            host: env_or("HOST", "0.0.0.0".to_string()),
            port: env_or("PORT", 8080),
            cors_origins,
            request_timeout_secs: env_or("REQUEST_TIMEOUT_SECS", 30),
            upload_dir: env_or("UPLOAD_DIR", PathBuf::from("./uploads")),
            ledger_sweep_interval_secs,
            jwt: JwtConfig::from_env(),
        }
    }
}

/// Parse `key` from the environment, or fall back to `default` when unset.
fn env_or<T>(key: &str, default: T) -> T
where
    T: FromStr,
    T::Err: Display,
{
    match std::env::var(key) {
        Ok(raw) => raw
            .parse()
            .unwrap_or_else(|e| panic!("{key} has an invalid value '{raw}': {e}")),
        Err(_) => default,
    }
}
