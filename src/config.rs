use serde::Deserialize;
use thiserror::Error;

#[derive(Debug, Error, PartialEq, Eq)]
pub enum ConfigError {
    #[error("JWT_SECRET must be set to a non-empty value")]
    MissingSecret,
    #[error("invalid value for {key}: {value:?}")]
    Invalid { key: &'static str, value: String },
}

#[derive(Debug, Clone, Deserialize)]
pub struct JwtConfig {
    pub secret: String,
    pub issuer: String,
    pub audience: String,
}

#[derive(Debug, Clone, Deserialize)]
pub struct ServerConfig {
    pub host: String,
    pub port: u16,
}

#[derive(Debug, Clone, Deserialize)]
pub struct AppConfig {
    pub database_url: String,
    pub db_max_connections: u32,
    pub jwt: JwtConfig,
    pub server: ServerConfig,
}

impl AppConfig {
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Builds the configuration from an arbitrary key lookup, so tests never touch the process env.
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let var = |key: &str, default: &str| lookup(key).unwrap_or_else(|| default.to_string());

        let database_url = match lookup("DATABASE_URL") {
            Some(url) => url,
            None => format!(
                "postgres://{}:{}@{}:{}/{}?sslmode={}",
                var("DB_USER", "postgres"),
                var("DB_PASSWORD", "postgres123"),
                var("DB_HOST", "127.0.0.1"),
                parse_num::<u16>("DB_PORT", lookup("DB_PORT"), 5432)?,
                var("DB_NAME", "ps_app"),
                var("DB_SSL_MODE", "disable"),
            ),
        };

        let secret = lookup("JWT_SECRET").unwrap_or_default();
        if secret.trim().is_empty() {
            return Err(ConfigError::MissingSecret);
        }
        let jwt = JwtConfig {
            secret,
            issuer: var("JWT_ISSUER", "ps-app"),
            audience: var("JWT_AUDIENCE", "ps-app-users"),
        };

        let server = ServerConfig {
            host: var("APP_HOST", "0.0.0.0"),
            port: parse_num("APP_PORT", lookup("APP_PORT").or_else(|| lookup("PORT")), 8080)?,
        };

        Ok(Self {
            database_url,
            db_max_connections: parse_num("DB_MAX_CONNECTIONS", lookup("DB_MAX_CONNECTIONS"), 10)?,
            jwt,
            server,
        })
    }
}

fn parse_num<T: std::str::FromStr>(
    key: &'static str,
    raw: Option<String>,
    default: T,
) -> Result<T, ConfigError> {
    match raw {
        None => Ok(default),
        Some(value) => value
            .trim()
            .parse::<T>()
            .map_err(|_| ConfigError::Invalid { key, value }),
    }
}
