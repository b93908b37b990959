// src/config.rs
use std::net::IpAddr;

#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("{0} must be set")]
    Missing(&'static str),
    #[error("invalid value for {name}: {value}")]
    Invalid { name: &'static str, value: String },
}

#[derive(Debug, Clone)]
pub struct AppConfig {
    pub database_url: String,
    pub database_max_connections: u32,
    pub jwt_secret: String,
    pub host: IpAddr,
    pub port: u16,
    /// Origin of the web app; storefront links and CORS derive from it.
    pub public_base_url: String,
}

impl AppConfig {
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self, ConfigError> {
        let required = |name: &'static str| {
            lookup(name)
                .filter(|v| !v.trim().is_empty())
                .ok_or(ConfigError::Missing(name))
        };

        let database_url = required("DATABASE_URL")?;
        let jwt_secret = required("JWT_SECRET")?;

        // Unparseable HOST/PORT fall back to the defaults.
        let host = lookup("HOST")
            .and_then(|h| h.parse().ok())
            .unwrap_or(IpAddr::from([127, 0, 0, 1]));
        let port = lookup("PORT").and_then(|p| p.parse().ok()).unwrap_or(3000);

        let database_max_connections = match lookup("DATABASE_MAX_CONNECTIONS") {
            Some(raw) => raw
                .parse::<u32>()
                .ok()
                .filter(|n| *n > 0)
                .ok_or(ConfigError::Invalid {
                    name: "DATABASE_MAX_CONNECTIONS",
                    value: raw,
                })?,
            None => 5,
        };

        let public_base_url = lookup("PUBLIC_BASE_URL")
            .unwrap_or_else(|| "http://localhost:5173".to_string())
            .trim_end_matches('/')
            .to_string();

        Ok(Self {
            database_url,
            database_max_connections,
            jwt_secret,
            host,
            port,
            public_base_url,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn load(vars: &[(&str, &str)]) -> Result<AppConfig, ConfigError> {
        let vars: HashMap<String, String> = vars
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        AppConfig::from_lookup(|key| vars.get(key).cloned())
    }

    #[test]
    fn defaults_apply_when_optional_vars_are_missing() {
        let config = load(&[("DATABASE_URL", "postgres://localhost/app"), ("JWT_SECRET", "s3cret")])
            .unwrap();

        assert_eq!(config.port, 3000);
        assert_eq!(config.host, IpAddr::from([127, 0, 0, 1]));
        assert_eq!(config.database_max_connections, 5);
        assert_eq!(config.public_base_url, "http://localhost:5173");
    }

    #[test]
    fn database_url_is_required() {
        let err = load(&[("JWT_SECRET", "s3cret")]).unwrap_err();
        assert!(matches!(err, ConfigError::Missing("DATABASE_URL")));
    }

    #[test]
    fn blank_secret_counts_as_missing() {
        let err = load(&[("DATABASE_URL", "postgres://localhost/app"), ("JWT_SECRET", "  ")])
            .unwrap_err();
        assert!(matches!(err, ConfigError::Missing("JWT_SECRET")));
    }

    #[test]
    fn bad_pool_size_is_rejected() {
        let err = load(&[
            ("DATABASE_URL", "postgres://localhost/app"),
            ("JWT_SECRET", "s3cret"),
            ("DATABASE_MAX_CONNECTIONS", "zero"),
        ])
        .unwrap_err();
        assert_eq!(err.to_string(), "invalid value for DATABASE_MAX_CONNECTIONS: zero");
    }

    #[test]
    fn trailing_slash_is_trimmed_from_base_url() {
        let config = load(&[
            ("DATABASE_URL", "postgres://localhost/app"),
            ("JWT_SECRET", "s3cret"),
            ("PUBLIC_BASE_URL", "https://loja.example.com/"),
            ("PORT", "8080"),
        ])
        .unwrap();

        assert_eq!(config.public_base_url, "https://loja.example.com");
        assert_eq!(config.port, 8080);
    }
}
