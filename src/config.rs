use std::{env, fmt::Display, str::FromStr};

use tracing::{info, warn};

use crate::utils::error::{AppError, AppResult};

const DEV_SESSION_SECRET: &str = "dorm-portal-dev-secret";
const MAX_SESSION_TTL_HOURS: i64 = 24 * 365;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StoreBackend {
    Mongo,
    Memory,
}

impl FromStr for StoreBackend {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "mongo" | "mongodb" => Ok(StoreBackend::Mongo),
            "memory" => Ok(StoreBackend::Memory),
            other => Err(format!("unknown store backend '{other}'")),
        }
    }
}

#[derive(Debug, Clone)]
pub struct Config {
    pub server_addr: String,
    pub cors_origin: Option<String>,
    pub store_backend: StoreBackend,
    pub mongo_uri: Option<String>,
    pub db_name: String,
    pub session_secret: String,
    pub session_ttl_hours: i64,
    pub cookie_secure: bool,
    pub site_name: String,
}

impl Config {
    pub fn load() -> AppResult<Self> {
        let store_backend: StoreBackend = try_load("STORE_BACKEND", "mongo")?;

        let mongo_uri = var("MONGO_URI");
        if store_backend == StoreBackend::Mongo && mongo_uri.is_none() {
            return Err(AppError::InternalError(
                "MONGO_URI must be set when STORE_BACKEND is mongo".to_string(),
            ));
        }

        let session_secret = match (var("SESSION_SECRET"), store_backend) {
            (Some(secret), _) => secret,
            (None, StoreBackend::Memory) => {
                warn!("SESSION_SECRET not set, using the development secret");
                DEV_SESSION_SECRET.to_string()
            }
            (None, StoreBackend::Mongo) => {
                return Err(AppError::InternalError(
                    "SESSION_SECRET must be set".to_string(),
                ))
            }
        };

        Ok(Self {
            server_addr: try_load("SERVER_ADDR", "0.0.0.0:8000")?,
            cors_origin: var("CORS_ORIGIN"),
            store_backend,
            mongo_uri,
            db_name: try_load("DB_NAME", "dormitory")?,
            session_secret,
            session_ttl_hours: session_ttl(try_load("SESSION_TTL_HOURS", "24")?)?,
            cookie_secure: try_load("COOKIE_SECURE", "true")?,
            site_name: try_load("SITE_NAME", "Dormitory 328")?,
        })
    }

    #[cfg(test)]
    pub fn in_memory() -> Self {
        Self {
            server_addr: "127.0.0.1:0".to_string(),
            cors_origin: None,
            store_backend: StoreBackend::Memory,
            mongo_uri: None,
            db_name: "dormitory".to_string(),
            session_secret: DEV_SESSION_SECRET.to_string(),
            session_ttl_hours: 24,
            cookie_secure: false,
            site_name: "Dormitory 328".to_string(),
        }
    }
}

fn session_ttl(hours: i64) -> AppResult<i64> {
    if (1..=MAX_SESSION_TTL_HOURS).contains(&hours) {
        Ok(hours)
    } else {
        Err(AppError::InternalError(format!(
            "Invalid SESSION_TTL_HOURS value '{hours}': expected 1..={MAX_SESSION_TTL_HOURS}"
        )))
    }
}

fn var(key: &str) -> Option<String> {
    env::var(key).ok().filter(|value| !value.trim().is_empty())
}

fn try_load<T: FromStr>(key: &str, default: &str) -> AppResult<T>
where
    T::Err: Display,
{
    let raw = var(key).unwrap_or_else(|| {
        info!("{key} not set, using default: {default}");
        default.to_string()
    });

    raw.trim()
        .parse()
        .map_err(|e| AppError::InternalError(format!("Invalid {key} value '{raw}': {e}")))
}
