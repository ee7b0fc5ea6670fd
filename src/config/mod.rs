use std::env;
use std::str::FromStr;

use jsonwebtoken::Algorithm;
use sqlx::postgres::PgConnectOptions;

/// Errors raised while loading [`AppConfig`].
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("missing required environment variable {0}")]
    Missing(&'static str),

    #[error("invalid value {value:?} for {var}")]
    Invalid { var: &'static str, value: String },
}

/// Signing parameters for bearer tokens.
#[derive(Debug, Clone)]
pub struct TokenSettings {
    pub secret: String,
    pub algorithm: Algorithm,
    pub expire_minutes: i64,
}

/// Application configuration loaded from environment variables.
#[derive(Debug, Clone)]
pub struct AppConfig {
    pub database_hostname: String,
    pub database_port: u16,
    pub database_username: String,
    pub database_password: String,
    pub database_name: String,
    pub database_max_connections: u32,
    pub database_connect_retries: u32,
    pub database_retry_delay_secs: u64,
    pub host: String,
    pub port: u16,
    pub token: TokenSettings,
    pub cors_origins: Vec<String>,
}

const DEFAULT_CORS_ORIGINS: &str = "https://www.google.com,http://localhost:3000";

impl AppConfig {
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|key| env::var(key).ok())
    }

    /// Build the configuration from an arbitrary key lookup.
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let required = |var: &'static str| lookup(var).ok_or(ConfigError::Missing(var));
        let optional = |var: &'static str, default: &str| {
            lookup(var).unwrap_or_else(|| default.to_string())
        };

        let algorithm_raw = required("ALGORITHM")?;
        let algorithm = parse_hmac_algorithm(&algorithm_raw).ok_or(ConfigError::Invalid {
            var: "ALGORITHM",
            value: algorithm_raw,
        })?;

        let expire_minutes: i64 = parse(
            "ACCESS_TOKEN_EXPIRE_MINUTES",
            required("ACCESS_TOKEN_EXPIRE_MINUTES")?,
        )?;
        if expire_minutes <= 0 {
            return Err(ConfigError::Invalid {
                var: "ACCESS_TOKEN_EXPIRE_MINUTES",
                value: expire_minutes.to_string(),
            });
        }

        Ok(Self {
            database_hostname: required("DATABASE_HOSTNAME")?,
            database_port: parse("DATABASE_PORT", required("DATABASE_PORT")?)?,
            database_username: required("DATABASE_USERNAME")?,
            database_password: required("DATABASE_PASSWORD")?,
            database_name: required("DATABASE_NAME")?,
            database_max_connections: parse(
                "DATABASE_MAX_CONNECTIONS",
                optional("DATABASE_MAX_CONNECTIONS", "10"),
            )?,
            database_connect_retries: parse(
                "DATABASE_CONNECT_RETRIES",
                optional("DATABASE_CONNECT_RETRIES", "5"),
            )?,
            database_retry_delay_secs: parse(
                "DATABASE_RETRY_DELAY_SECS",
                optional("DATABASE_RETRY_DELAY_SECS", "2"),
            )?,
            host: optional("BACKEND_HOST", "0.0.0.0"),
            port: parse("BACKEND_PORT", optional("BACKEND_PORT", "8000"))?,
            token: TokenSettings {
                secret: required("SECRET_KEY")?,
                algorithm,
                expire_minutes,
            },
            cors_origins: optional("CORS_ORIGINS", DEFAULT_CORS_ORIGINS)
                .split(',')
                .map(str::trim)
                .filter(|s| !s.is_empty())
                .map(str::to_string)
                .collect(),
        })
    }

    /// Postgres connection options assembled from the individual parts.
    ///
    /// Credentials are passed through as-is, so they may contain URL
    /// metacharacters.
    pub fn connect_options(&self) -> PgConnectOptions {
        PgConnectOptions::new()
            .host(&self.database_hostname)
            .port(self.database_port)
            .username(&self.database_username)
            .password(&self.database_password)
            .database(&self.database_name)
    }

    /// Address the HTTP server listens on. The host may be a name or an IP literal.
    pub fn bind_address(&self) -> (&str, u16) {
        (self.host.as_str(), self.port)
    }
}

fn parse<T: FromStr>(var: &'static str, value: String) -> Result<T, ConfigError> {
    value
        .trim()
        .parse()
        .map_err(|_| ConfigError::Invalid { var, value })
}

/// Tokens are signed with a shared secret, so only the HMAC family is accepted.
fn parse_hmac_algorithm(raw: &str) -> Option<Algorithm> {
    match Algorithm::from_str(raw.trim()).ok()? {
        alg @ (Algorithm::HS256 | Algorithm::HS384 | Algorithm::HS512) => Some(alg),
        _ => None,
    }
}
