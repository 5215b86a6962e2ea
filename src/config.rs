//! Process configuration, read once from the environment at startup.

use anyhow::Result;
use std::env;
use tracing::warn;

/// Built-in development secret used when JWT_SECRET is unset.
/// Long enough for HS256, but well-known: never ship this to production.
pub const DEV_JWT_SECRET: &str = "dev-secret-change-in-production-minimum-32-characters";

/// HS256 wants at least a 256-bit key.
const MIN_SECRET_BYTES: usize = 32;

#[derive(Debug, Clone)]
pub struct Config {
    pub bind_addr: String,
    pub db_path: String,
    pub jwt_secret: String,
}

impl Config {
    /// Gather configuration from the environment.
    ///
    /// Fails fast when JWT_SECRET is set but too short; an unset secret
    /// falls back to the development value with a loud warning.
    pub fn from_env() -> Result<Self> {
        let bind_addr = env::var("BIND_ADDR").unwrap_or_else(|_| "0.0.0.0:3000".to_string());
        let db_path = env::var("DB_PATH").unwrap_or_else(|_| "rigbook.db".to_string());

        let jwt_secret = match env::var("JWT_SECRET") {
            Ok(secret) => {
                if secret.len() < MIN_SECRET_BYTES {
                    anyhow::bail!(
                        "JWT_SECRET must be at least {} bytes, got {}",
                        MIN_SECRET_BYTES,
                        secret.len()
                    );
                }
                secret
            }
            Err(_) => {
                warn!("JWT_SECRET not set - using the built-in development secret. Do not run this configuration in production.");
                DEV_JWT_SECRET.to_string()
            }
        };

        Ok(Self {
            bind_addr,
            db_path,
            jwt_secret,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_dev_secret_is_long_enough() {
        assert!(DEV_JWT_SECRET.len() >= MIN_SECRET_BYTES);
    }
}
