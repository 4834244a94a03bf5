//! Platform Configuration
//!
//! Loaded from environment variables at startup and passed explicitly
//! into the services that need it.

use crate::error::{PlatformError, Result};

/// Log output format
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum LogFormat {
    #[default]
    Text,
    Json,
}

#[derive(Debug, Clone)]
pub struct PlatformConfig {
    /// HTTP listen port
    pub port: u16,
    /// MongoDB connection URL
    pub mongo_url: String,
    /// MongoDB database name
    pub mongo_db: String,
    /// Symmetric secret used to sign identity tokens
    pub token_secret: String,
    /// Token lifetime in seconds
    pub token_ttl_secs: i64,
    /// Payment provider API secret key
    pub payment_secret_key: String,
    /// Payment provider base URL
    pub payment_api_base: String,
    /// Currency used for payment intents
    pub payment_currency: String,
    pub log_format: LogFormat,
}

impl PlatformConfig {
    pub const DEFAULT_PORT: u16 = 5000;
    pub const DEFAULT_MONGO_URL: &'static str = "mongodb://localhost:27017";
    pub const DEFAULT_MONGO_DB: &'static str = "royelDB";
    pub const DEFAULT_TOKEN_TTL_SECS: i64 = 3600;
    pub const DEFAULT_PAYMENT_API_BASE: &'static str = "https://api.stripe.com";
    pub const DEFAULT_PAYMENT_CURRENCY: &'static str = "usd";

    /// Create config from environment variables
    pub fn from_env() -> Result<Self> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Build config from an arbitrary key lookup
    pub fn from_lookup<F>(lookup: F) -> Result<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let port = match lookup("PORT") {
            Some(v) => v
                .parse()
                .map_err(|_| PlatformError::configuration(format!("Invalid PORT: {}", v)))?,
            None => Self::DEFAULT_PORT,
        };

        let mongo_url = lookup("ROYEL_MONGO_URL")
            .or_else(|| {
                let user = lookup("DB_USER")?;
                let pass = lookup("DB_PASS")?;
                let host = lookup("DB_HOST").unwrap_or_else(|| "localhost:27017".to_string());
                Some(credentials_url(&user, &pass, &host))
            })
            .unwrap_or_else(|| Self::DEFAULT_MONGO_URL.to_string());

        let token_ttl_secs = match lookup("ROYEL_TOKEN_TTL_SECS") {
            Some(v) => v.parse().map_err(|_| {
                PlatformError::configuration(format!("Invalid ROYEL_TOKEN_TTL_SECS: {}", v))
            })?,
            None => Self::DEFAULT_TOKEN_TTL_SECS,
        };

        let log_format = match lookup("LOG_FORMAT").as_deref().map(str::to_lowercase).as_deref() {
            Some("json") => LogFormat::Json,
            _ => LogFormat::Text,
        };

        Ok(Self {
            port,
            mongo_url,
            mongo_db: lookup("ROYEL_MONGO_DB").unwrap_or_else(|| Self::DEFAULT_MONGO_DB.to_string()),
            token_secret: required(&lookup, "ACCESS_TOKEN")?,
            token_ttl_secs,
            payment_secret_key: required(&lookup, "PAYMENT_SECRET_KEY")?,
            payment_api_base: lookup("PAYMENT_API_BASE")
                .unwrap_or_else(|| Self::DEFAULT_PAYMENT_API_BASE.to_string()),
            payment_currency: lookup("PAYMENT_CURRENCY")
                .unwrap_or_else(|| Self::DEFAULT_PAYMENT_CURRENCY.to_string()),
            log_format,
        })
    }
}

/// SRV lookup forbids an explicit port, so `host:port` uses a direct connection string
fn credentials_url(user: &str, pass: &str, host: &str) -> String {
    let scheme = if host.contains(':') { "mongodb" } else { "mongodb+srv" };
    format!(
        "{}://{}:{}@{}/?retryWrites=true&w=majority",
        scheme, user, pass, host
    )
}

fn required<F>(lookup: &F, key: &str) -> Result<String>
where
    F: Fn(&str) -> Option<String>,
{
    lookup(key)
        .filter(|v| !v.is_empty())
        .ok_or_else(|| PlatformError::configuration(format!("Missing required variable {}", key)))
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn lookup_from(pairs: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let map: HashMap<String, String> = pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        move |key| map.get(key).cloned()
    }

    #[test]
    fn test_defaults() {
        let config = PlatformConfig::from_lookup(lookup_from(&[
            ("ACCESS_TOKEN", "secret"),
            ("PAYMENT_SECRET_KEY", "sk_test"),
        ]))
        .unwrap();

        assert_eq!(config.port, 5000);
        assert_eq!(config.mongo_url, "mongodb://localhost:27017");
        assert_eq!(config.mongo_db, "royelDB");
        assert_eq!(config.token_ttl_secs, 3600);
        assert_eq!(config.payment_currency, "usd");
        assert_eq!(config.log_format, LogFormat::Text);
    }

    #[test]
    fn test_mongo_url_from_credentials() {
        let config = PlatformConfig::from_lookup(lookup_from(&[
            ("ACCESS_TOKEN", "secret"),
            ("PAYMENT_SECRET_KEY", "sk_test"),
            ("DB_USER", "royel"),
            ("DB_PASS", "pw"),
            ("DB_HOST", "cluster0.example.net"),
        ]))
        .unwrap();

        assert_eq!(
            config.mongo_url,
            "mongodb+srv://royel:pw@cluster0.example.net/?retryWrites=true&w=majority"
        );
    }

    #[test]
    fn test_credentials_without_host_use_direct_connection() {
        let config = PlatformConfig::from_lookup(lookup_from(&[
            ("ACCESS_TOKEN", "secret"),
            ("PAYMENT_SECRET_KEY", "sk_test"),
            ("DB_USER", "royel"),
            ("DB_PASS", "pw"),
        ]))
        .unwrap();

        assert_eq!(
            config.mongo_url,
            "mongodb://royel:pw@localhost:27017/?retryWrites=true&w=majority"
        );
    }

    #[test]
    fn test_credentials_with_host_port_use_direct_connection() {
        let config = PlatformConfig::from_lookup(lookup_from(&[
            ("ACCESS_TOKEN", "secret"),
            ("PAYMENT_SECRET_KEY", "sk_test"),
            ("DB_USER", "royel"),
            ("DB_PASS", "pw"),
            ("DB_HOST", "db.internal:27018"),
        ]))
        .unwrap();

        assert!(config.mongo_url.starts_with("mongodb://royel:pw@db.internal:27018/"));
    }

    #[test]
    fn test_missing_secret_is_configuration_error() {
        let err = PlatformConfig::from_lookup(lookup_from(&[("PAYMENT_SECRET_KEY", "sk_test")]))
            .unwrap_err();
        assert!(matches!(err, PlatformError::Configuration { .. }));
        assert!(err.to_string().contains("ACCESS_TOKEN"));
    }

    #[test]
    fn test_invalid_port() {
        let err = PlatformConfig::from_lookup(lookup_from(&[
            ("PORT", "http"),
            ("ACCESS_TOKEN", "secret"),
            ("PAYMENT_SECRET_KEY", "sk_test"),
        ]))
        .unwrap_err();
        assert!(matches!(err, PlatformError::Configuration { .. }));
    }
}
