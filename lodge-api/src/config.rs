/// Configuration management for the API server
///
/// Configuration is read from environment variables, with a `.env` file
/// loaded first when present.
///
/// # Environment Variables
///
/// - `API_HOST`: Host to bind to (default: 0.0.0.0)
/// - `API_PORT`: Port to bind to (default: 5600)
/// - `CORS_ORIGINS`: Comma-separated allowed origins (default: *)
/// - `PRODUCTION`: `true` enables HSTS (default: false)
/// - `DATABASE_URL`: SQLite URL (default: sqlite://database/lodgeliberia.db)
/// - `DATABASE_MAX_CONNECTIONS`: Pool size (default: 5)
/// - `JWT_SECRET`: Secret key for JWT signing (required, at least 32 chars)
/// - `PAYMENT_ORANGE_MONEY_NUMBER`: Orange Money merchant number
/// - `PAYMENT_MOBILE_MONEY_NUMBER`: MTN Mobile Money merchant number
/// - `RUST_LOG`: Log filter
///
/// # Example
///
/// ```no_run
/// use lodge_api::config::Config;
///
/// # fn example() -> anyhow::Result<()> {
/// let config = Config::from_env()?;
/// println!("Server will listen on {}", config.bind_address());
/// # Ok(())
/// # }
/// ```

use lodge_shared::payment::{DEFAULT_MOBILE_MONEY_NUMBER, DEFAULT_ORANGE_MONEY_NUMBER};
use serde::{Deserialize, Serialize};
use std::env;

pub const DEFAULT_DATABASE_URL: &str = "sqlite://database/lodgeliberia.db";
pub const DEFAULT_PORT: u16 = 5600;
pub const MIN_JWT_SECRET_LENGTH: usize = 32;

/// Complete application configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Config {
    pub api: ApiConfig,
    pub database: DatabaseConfig,
    pub jwt: JwtConfig,
    pub payment: PaymentConfig,
}

/// API server configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ApiConfig {
    pub host: String,
    pub port: u16,

    /// Allowed CORS origins; `*` allows any
    pub cors_origins: Vec<String>,

    /// Production mode (enables HSTS)
    pub production: bool,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DatabaseConfig {
    /// SQLite connection URL
    pub url: String,

    pub max_connections: u32,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct JwtConfig {
    /// Secret key for JWT signing
    ///
    /// Generate with: `openssl rand -hex 32`
    pub secret: String,
}

/// Merchant numbers the payment QR codes pay into
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PaymentConfig {
    pub orange_money_number: String,
    pub mobile_money_number: String,
}

impl Default for PaymentConfig {
    fn default() -> Self {
        Self {
            orange_money_number: DEFAULT_ORANGE_MONEY_NUMBER.to_string(),
            mobile_money_number: DEFAULT_MOBILE_MONEY_NUMBER.to_string(),
        }
    }
}

impl Config {
    /// Loads configuration from environment variables
    ///
    /// # Errors
    ///
    /// Returns an error if `JWT_SECRET` is missing or too short, or if a
    /// numeric variable does not parse.
    pub fn from_env() -> anyhow::Result<Self> {
        dotenvy::dotenv().ok();

        let host = env::var("API_HOST").unwrap_or_else(|_| "0.0.0.0".to_string());
        let port = match env::var("API_PORT") {
            Ok(raw) => raw
                .parse::<u16>()
                .map_err(|e| anyhow::anyhow!("API_PORT is not a valid port: {}", e))?,
            Err(_) => DEFAULT_PORT,
        };

        let cors_origins = parse_origins(&env::var("CORS_ORIGINS").unwrap_or_else(|_| "*".to_string()));

        let production = env::var("PRODUCTION")
            .map(|v| matches!(v.trim().to_ascii_lowercase().as_str(), "1" | "true" | "yes"))
            .unwrap_or(false);

        let database_url =
            env::var("DATABASE_URL").unwrap_or_else(|_| DEFAULT_DATABASE_URL.to_string());

        let max_connections = env::var("DATABASE_MAX_CONNECTIONS")
            .unwrap_or_else(|_| "5".to_string())
            .parse::<u32>()?;

        let jwt_secret = env::var("JWT_SECRET")
            .map_err(|_| anyhow::anyhow!("JWT_SECRET environment variable is required"))?;
        validate_jwt_secret(&jwt_secret)?;

        let defaults = PaymentConfig::default();
        let payment = PaymentConfig {
            orange_money_number: env::var("PAYMENT_ORANGE_MONEY_NUMBER")
                .unwrap_or(defaults.orange_money_number),
            mobile_money_number: env::var("PAYMENT_MOBILE_MONEY_NUMBER")
                .unwrap_or(defaults.mobile_money_number),
        };

        Ok(Self {
            api: ApiConfig {
                host,
                port,
                cors_origins,
                production,
            },
            database: DatabaseConfig {
                url: database_url,
                max_connections,
            },
            jwt: JwtConfig { secret: jwt_secret },
            payment,
        })
    }

    /// Returns the server bind address
    pub fn bind_address(&self) -> String {
        format!("{}:{}", self.api.host, self.api.port)
    }
}

fn parse_origins(raw: &str) -> Vec<String> {
    let origins: Vec<String> = raw
        .split(',')
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .map(String::from)
        .collect();

    if origins.is_empty() {
        vec!["*".to_string()]
    } else {
        origins
    }
}

fn validate_jwt_secret(secret: &str) -> anyhow::Result<()> {
    if secret.len() < MIN_JWT_SECRET_LENGTH {
        anyhow::bail!(
            "JWT_SECRET must be at least {} characters long",
            MIN_JWT_SECRET_LENGTH
        );
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn config() -> Config {
        Config {
            api: ApiConfig {
                host: "127.0.0.1".to_string(),
                port: DEFAULT_PORT,
                cors_origins: vec!["*".to_string()],
                production: false,
            },
            database: DatabaseConfig {
                url: "sqlite::memory:".to_string(),
                max_connections: 1,
            },
            jwt: JwtConfig {
                secret: "test-secret-key-at-least-32-bytes-long".to_string(),
            },
            payment: PaymentConfig::default(),
        }
    }

    #[test]
    fn test_bind_address() {
        assert_eq!(config().bind_address(), "127.0.0.1:5600");
    }

    #[test]
    fn test_parse_origins() {
        assert_eq!(parse_origins("*"), vec!["*"]);
        assert_eq!(parse_origins(""), vec!["*"]);
        assert_eq!(
            parse_origins("https://lodgeliberia.com, http://localhost:3000"),
            vec!["https://lodgeliberia.com", "http://localhost:3000"]
        );
    }

    #[test]
    fn test_jwt_secret_length() {
        assert!(validate_jwt_secret("short").is_err());
        assert!(validate_jwt_secret("test-secret-key-at-least-32-bytes-long").is_ok());
    }

    #[test]
    fn test_payment_defaults() {
        let payment = PaymentConfig::default();
        assert_eq!(payment.orange_money_number, "0770722633");
        assert_eq!(payment.mobile_money_number, "0881806488");
    }
}
