use secrecy::Secret;
use service_core::config as core_config;
use service_core::error::AppError;
use std::env;

#[derive(Debug, Clone)]
pub struct GenityConfig {
    pub common: core_config::Config,
    pub database: DatabaseConfig,
    pub jwt: JwtConfig,
    /// Reported by `/healthcheck`.
    pub version: String,
}

#[derive(Debug, Clone)]
pub struct DatabaseConfig {
    pub url: Secret<String>,
    pub max_connections: u32,
    pub min_connections: u32,
}

#[derive(Debug, Clone)]
pub struct JwtConfig {
    pub signing_key: Secret<String>,
    pub expiration_hours: i64,
}

impl GenityConfig {
    pub fn load() -> Result<Self, AppError> {
        // Load common config (handles .env and APP__ prefix)
        let common_config = core_config::Config::load()?;

        let is_prod = env::var("ENVIRONMENT").unwrap_or_else(|_| "dev".to_string()) == "prod";

        Ok(GenityConfig {
            common: common_config,
            database: DatabaseConfig {
                url: Secret::new(get_env(
                    "GENITY_DATABASE_URL",
                    Some("postgres://127.0.0.1:5432/genity?sslmode=disable"),
                    is_prod,
                )?),
                max_connections: parse_env("GENITY_DATABASE_MAX_CONNECTIONS", "10")?,
                min_connections: parse_env("GENITY_DATABASE_MIN_CONNECTIONS", "1")?,
            },
            jwt: JwtConfig {
                signing_key: Secret::new(get_env(
                    "GENITY_JWT_SIGNING_KEY",
                    Some("dev-signing-key"),
                    is_prod,
                )?),
                expiration_hours: parse_env("GENITY_JWT_EXPIRATION_HOURS", "72")?,
            },
            version: env::var("APP_VERSION")
                .unwrap_or_else(|_| env!("CARGO_PKG_VERSION").to_string()),
        })
    }
}

fn get_env(key: &str, default: Option<&str>, is_prod: bool) -> Result<String, AppError> {
    match env::var(key) {
        Ok(val) => Ok(val),
        Err(_) => {
            if is_prod {
                Err(AppError::ConfigError(anyhow::anyhow!(
                    "{} is required in production but not set",
                    key
                )))
            } else if let Some(def) = default {
                Ok(def.to_string())
            } else {
                Err(AppError::ConfigError(anyhow::anyhow!(
                    "{} is required but not set",
                    key
                )))
            }
        }
    }
}

/// Tuning knobs keep their defaults in production too.
fn parse_env<T>(key: &str, default: &str) -> Result<T, AppError>
where
    T: std::str::FromStr,
    T::Err: std::fmt::Display,
{
    let raw = get_env(key, Some(default), false)?;
    raw.parse().map_err(|e: T::Err| {
        AppError::ConfigError(anyhow::anyhow!("Invalid value for {}: {}", key, e))
    })
}
