use std::net::SocketAddr;

use anyhow::{Context, Result, bail};

/// Placeholder JWT secrets that MUST NOT be used.
const PLACEHOLDER_SECRETS: &[&str] = &[
    "change-me-to-a-random-string",
    "dev-secret-change-me",
];

#[derive(Debug, Clone)]
pub struct Config {
    pub host: String,
    pub port: u16,
    pub jwt_secret: String,
    pub token_ttl_days: i64,
}

impl Config {
    pub fn from_env() -> Result<Self> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    pub fn from_lookup<F>(lookup: F) -> Result<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let jwt_secret = lookup("MINDFUL_JWT_SECRET").unwrap_or_default();
        if jwt_secret.is_empty() || PLACEHOLDER_SECRETS.contains(&jwt_secret.as_str()) {
            bail!("MINDFUL_JWT_SECRET is unset or still a placeholder");
        }

        let host = lookup("MINDFUL_HOST").unwrap_or_else(|| "0.0.0.0".into());
        let port: u16 = lookup("MINDFUL_PORT")
            .unwrap_or_else(|| "5000".into())
            .parse()
            .context("MINDFUL_PORT must be a port number")?;
        let token_ttl_days: i64 = lookup("MINDFUL_TOKEN_TTL_DAYS")
            .unwrap_or_else(|| "30".into())
            .parse()
            .context("MINDFUL_TOKEN_TTL_DAYS must be a whole number of days")?;
        if token_ttl_days <= 0 {
            bail!("MINDFUL_TOKEN_TTL_DAYS must be positive");
        }

        Ok(Self {
            host,
            port,
            jwt_secret,
            token_ttl_days,
        })
    }

    pub fn addr(&self) -> Result<SocketAddr> {
        format!("{}:{}", self.host, self.port)
            .parse()
            .with_context(|| format!("invalid listen address {}:{}", self.host, self.port))
    }
}
