//! Service configuration, read from the environment (a `.env` file is
//! loaded first by the binary).

use crate::notification::AppLinks;
use crate::{Result, StorefrontError};

pub const DEFAULT_PORT: u16 = 8083;
pub const DEFAULT_NOTIFICATION_SUBJECT: &str = "storefront.notifications";
pub const DEFAULT_MAIL_FROM: &str = "WorldOfToys <noreply@worldoftoys.com>";

#[derive(Debug, Clone)]
pub struct Config {
    pub database_url: String,
    pub port: u16,
    pub links: AppLinks,
    pub nats_url: Option<String>,
    pub notification_subject: String,
    pub mail_from: String,
}

impl Config {
    pub fn from_env() -> Result<Self> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Builds the configuration from any key lookup; blank values count as unset.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self> {
        let get = |key: &str| lookup(key).map(|v| v.trim().to_string()).filter(|v| !v.is_empty());
        let required = |key: &'static str| get(key).ok_or_else(|| StorefrontError::InvalidConfig(format!("{key} is not set")));

        let port = match get("PORT") {
            Some(raw) => raw.parse().map_err(|_| StorefrontError::InvalidConfig(format!("PORT '{raw}' is not a port number")))?,
            None => DEFAULT_PORT,
        };
        let mail_from = get("MAIL_FROM").unwrap_or_else(|| DEFAULT_MAIL_FROM.to_string());
        if !mail_from.contains('@') {
            return Err(StorefrontError::InvalidConfig(format!("MAIL_FROM '{mail_from}' has no address")));
        }

        Ok(Self {
            database_url: required("DATABASE_URL")?,
            port,
            links: AppLinks::new(&required("APP_BASE_URL")?)?,
            nats_url: get("NATS_URL"),
            notification_subject: get("NOTIFICATION_SUBJECT").unwrap_or_else(|| DEFAULT_NOTIFICATION_SUBJECT.to_string()),
            mail_from,
        })
    }

    pub fn bind_addr(&self) -> String { format!("0.0.0.0:{}", self.port) }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn config(pairs: &[(&str, &str)]) -> Result<Config> {
        let env: HashMap<String, String> = pairs.iter().map(|(k, v)| (k.to_string(), v.to_string())).collect();
        Config::from_lookup(|key| env.get(key).cloned())
    }

    const MINIMAL: [(&str, &str); 2] = [("DATABASE_URL", "postgres://localhost/toys"), ("APP_BASE_URL", "https://worldoftoys.example.com")];

    #[test]
    fn test_defaults() {
        let config = config(&MINIMAL).unwrap();
        assert_eq!(config.port, DEFAULT_PORT);
        assert_eq!(config.notification_subject, DEFAULT_NOTIFICATION_SUBJECT);
        assert_eq!(config.mail_from, DEFAULT_MAIL_FROM);
        assert!(config.nats_url.is_none());
        assert_eq!(config.bind_addr(), "0.0.0.0:8083");
    }

    #[test]
    fn test_missing_required() {
        let err = config(&[("APP_BASE_URL", "https://x.example.com")]).unwrap_err();
        assert!(err.to_string().contains("DATABASE_URL"));
        assert!(config(&[("DATABASE_URL", "postgres://x"), ("APP_BASE_URL", "  ")]).is_err());
    }

    #[test]
    fn test_overrides() {
        let mut pairs = MINIMAL.to_vec();
        pairs.extend([("PORT", "9000"), ("NATS_URL", "nats://localhost:4222"), ("MAIL_FROM", "shop@toys.test")]);
        let config = config(&pairs).unwrap();
        assert_eq!(config.port, 9000);
        assert_eq!(config.nats_url.as_deref(), Some("nats://localhost:4222"));
        assert_eq!(config.mail_from, "shop@toys.test");
    }

    #[test]
    fn test_bad_values() {
        let mut pairs = MINIMAL.to_vec();
        pairs.push(("PORT", "eighty"));
        assert!(config(&pairs).is_err());
        let mut pairs = MINIMAL.to_vec();
        pairs.push(("MAIL_FROM", "nobody"));
        assert!(config(&pairs).is_err());
    }
}
