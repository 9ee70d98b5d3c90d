/*
 * Responsibility
 * - load environment / .env settings (PORT, DATABASE_URL, CORS, JWT secret)
 * - validate them up front (missing or invalid values fail startup)
 */
use std::fmt;
use std::net::SocketAddr;
use std::str::FromStr;

use base64::{Engine, engine::general_purpose::STANDARD};

/// HS512 needs a key of at least 512 bits.
pub const MIN_JWT_SECRET_BYTES: usize = 64;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AppEnv {
    Development,
    Production,
}

impl AppEnv {
    pub fn from_env() -> Self {
        match std::env::var("APP_ENV")
            .unwrap_or_else(|_| "development".to_string())
            .to_ascii_lowercase()
            .as_str()
        {
            "production" | "prod" => Self::Production,
            _ => Self::Development,
        }
    }

    pub fn is_production(&self) -> bool {
        matches!(self, Self::Production)
    }
}

#[derive(Debug)]
pub enum ConfigError {
    Missing(&'static str),
    Invalid(&'static str),
}

impl fmt::Display for ConfigError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ConfigError::Missing(key) => write!(f, "missing configuration: {}", key),
            ConfigError::Invalid(key) => write!(f, "invalid configuration: {}", key),
        }
    }
}

impl std::error::Error for ConfigError {}

/// Signing material for access/refresh tokens.
#[derive(Clone)]
pub struct JwtConfig {
    secret: Vec<u8>,
}

impl fmt::Debug for JwtConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        // Do not print key material
        f.debug_struct("JwtConfig")
            .field("secret_len", &self.secret.len())
            .finish()
    }
}

impl JwtConfig {
    pub fn from_secret(secret: Vec<u8>) -> Result<Self, ConfigError> {
        if secret.len() < MIN_JWT_SECRET_BYTES {
            return Err(ConfigError::Invalid("JWT_SECRET"));
        }
        Ok(Self { secret })
    }

    /// `encoded` is the standard base64 form stored in `JWT_SECRET`.
    pub fn from_base64(encoded: &str) -> Result<Self, ConfigError> {
        let secret = STANDARD
            .decode(encoded.trim())
            .map_err(|_| ConfigError::Invalid("JWT_SECRET"))?;
        Self::from_secret(secret)
    }

    pub fn secret(&self) -> &[u8] {
        &self.secret
    }
}

#[derive(Debug, Clone)]
pub struct Config {
    pub addr: SocketAddr,
    pub app_env: AppEnv,

    pub database_url: String,
    pub database_max_connections: u32,

    pub cors_allowed_origins: Vec<String>,

    pub jwt: JwtConfig,
}

impl Config {
    pub fn from_env() -> Result<Self, ConfigError> {
        dotenvy::dotenv().ok();

        let port: u16 = std::env::var("PORT")
            .ok()
            .and_then(|s| s.parse().ok())
            .unwrap_or(8080);

        let addr: SocketAddr = SocketAddr::from_str(&format!("0.0.0.0:{}", port))
            .map_err(|_| ConfigError::Invalid("PORT"))?;

        let app_env = AppEnv::from_env();

        let database_url =
            std::env::var("DATABASE_URL").map_err(|_| ConfigError::Missing("DATABASE_URL"))?;

        let database_max_connections = std::env::var("DATABASE_MAX_CONNECTIONS")
            .ok()
            .and_then(|v| v.parse::<u32>().ok())
            .unwrap_or(10);

        let cors_allowed_origins = std::env::var("CORS_ALLOWED_ORIGINS")
            .unwrap_or_default()
            .split(',')
            .map(|s| s.trim().to_string())
            .filter(|s| !s.is_empty())
            .collect::<Vec<_>>();

        let jwt_secret =
            std::env::var("JWT_SECRET").map_err(|_| ConfigError::Missing("JWT_SECRET"))?;
        let jwt = JwtConfig::from_base64(&jwt_secret)?;

        Ok(Self {
            addr,
            app_env,
            database_url,
            database_max_connections,
            cors_allowed_origins,
            jwt,
        })
    }
}
