//! Server configuration from command-line flags, environment variables and `.env`.

use crate::auth::MIN_SECRET_LENGTH;
use anyhow::{bail, Result};
use clap::Parser;
use std::net::SocketAddr;

#[derive(Debug, Clone, Parser)]
#[command(name = "veiculos-api", version, about = "Vehicle and administrator CRUD API")]
pub struct Config {
    /// SQLite database file path
    #[arg(short, long, env = "DATABASE_PATH", default_value = "veiculos.db")]
    pub database: String,

    /// Use an in-memory database instead of a file
    #[arg(short, long, env = "DATABASE_MEMORY", default_value_t = false)]
    pub memory: bool,

    /// Host to bind to
    #[arg(long, env = "HOST", default_value = "0.0.0.0")]
    pub host: String,

    /// Server port
    #[arg(short, long, env = "PORT", default_value_t = 3000)]
    pub port: u16,

    /// Token signing secret (at least 32 bytes)
    #[arg(long, env = "JWT_SECRET", hide_env_values = true)]
    pub jwt_secret: String,

    /// Email of an Adm account created at startup when missing
    #[arg(long, env = "SEED_ADMIN_EMAIL", requires = "seed_admin_password")]
    pub seed_admin_email: Option<String>,

    /// Password for the seeded Adm account
    #[arg(long, env = "SEED_ADMIN_PASSWORD", hide_env_values = true, requires = "seed_admin_email")]
    pub seed_admin_password: Option<String>,
}

impl Config {
    /// Loads `.env` (if present) and parses flags with environment fallbacks.
    pub fn load() -> Result<Self> {
        let _ = dotenvy::dotenv();
        let config = Self::parse();
        config.validate()?;
        Ok(config)
    }

    pub fn validate(&self) -> Result<()> {
        if self.jwt_secret.len() < MIN_SECRET_LENGTH {
            bail!(
                "JWT_SECRET must be at least {} bytes (got {})",
                MIN_SECRET_LENGTH,
                self.jwt_secret.len()
            );
        }
        if let Some((email, password)) = self.seed_admin() {
            if email.trim().is_empty() || password.is_empty() {
                bail!("SEED_ADMIN_EMAIL and SEED_ADMIN_PASSWORD must not be empty");
            }
        }
        Ok(())
    }

    pub fn addr(&self) -> Result<SocketAddr> {
        Ok(format!("{}:{}", self.host, self.port).parse()?)
    }

    pub fn seed_admin(&self) -> Option<(&str, &str)> {
        match (&self.seed_admin_email, &self.seed_admin_password) {
            (Some(email), Some(password)) => Some((email.as_str(), password.as_str())),
            _ => None,
        }
    }
}
