use std::env;
use std::str::FromStr;

use anyhow::{Context, anyhow};
use dotenvy::dotenv;

#[derive(Clone, Debug, PartialEq, Eq)]
pub enum StoreBackend {
    MySql { database_url: String, max_connections: u32 },
    Memory,
}

#[derive(Clone, Debug)]
pub struct Config {
    pub server_addr: String,
    pub store: StoreBackend,

    // Rate limiting
    pub rate_per_min: u32,

    pub api_prefix: String,

    pub log_dir: String,
    pub log_level: tracing::Level,
}

fn parse_or<T>(lookup: &impl Fn(&str) -> Option<String>, key: &str, default: T) -> anyhow::Result<T>
where
    T: FromStr,
    T::Err: std::error::Error + Send + Sync + 'static,
{
    match lookup(key) {
        Some(raw) => raw
            .trim()
            .parse()
            .with_context(|| format!("{key} has an invalid value {raw:?}")),
        None => Ok(default),
    }
}

impl Config {
    pub fn from_env() -> anyhow::Result<Self> {
        dotenv().ok();
        Self::from_lookup(|key| env::var(key).ok())
    }

    /// Builds the config from any key/value source.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> anyhow::Result<Self> {
        let backend = lookup("STORE_BACKEND").unwrap_or_else(|| "mysql".to_string());
        let store = match backend.trim().to_ascii_lowercase().as_str() {
            "mysql" => StoreBackend::MySql {
                database_url: lookup("DATABASE_URL")
                    .ok_or_else(|| anyhow!("DATABASE_URL must be set when STORE_BACKEND=mysql"))?,
                max_connections: parse_or(&lookup, "DB_MAX_CONNECTIONS", 10)?,
            },
            "memory" => StoreBackend::Memory,
            other => return Err(anyhow!("unknown STORE_BACKEND {other:?}, expected mysql or memory")),
        };

        let rate_per_min: u32 = parse_or(&lookup, "RATE_PER_MIN", 1000)?;
        if rate_per_min == 0 {
            return Err(anyhow!("RATE_PER_MIN must be greater than zero"));
        }

        let api_prefix = lookup("API_PREFIX").unwrap_or_else(|| "/api".to_string());
        let api_prefix = api_prefix.trim_end_matches('/').to_string();

        Ok(Self {
            server_addr: lookup("SERVER_ADDR").unwrap_or_else(|| "0.0.0.0:8000".to_string()),
            store,
            rate_per_min,
            api_prefix,
            log_dir: lookup("LOG_DIR").unwrap_or_else(|| "logs".to_string()),
            log_level: parse_or(&lookup, "LOG_LEVEL", tracing::Level::INFO)?,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn config(pairs: &[(&str, &str)]) -> anyhow::Result<Config> {
        let vars: HashMap<String, String> = pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        Config::from_lookup(move |key| vars.get(key).cloned())
    }

    #[test]
    fn defaults_with_memory_backend() {
        let cfg = config(&[("STORE_BACKEND", "memory")]).unwrap();
        assert_eq!(cfg.store, StoreBackend::Memory);
        assert_eq!(cfg.server_addr, "0.0.0.0:8000");
        assert_eq!(cfg.api_prefix, "/api");
        assert_eq!(cfg.rate_per_min, 1000);
        assert_eq!(cfg.log_level, tracing::Level::INFO);
    }

    #[test]
    fn mysql_requires_database_url() {
        assert!(config(&[]).is_err());
        let cfg = config(&[
            ("DATABASE_URL", "mysql://hr:hr@db/hrms_lite"),
            ("DB_MAX_CONNECTIONS", "4"),
        ])
        .unwrap();
        assert_eq!(
            cfg.store,
            StoreBackend::MySql {
                database_url: "mysql://hr:hr@db/hrms_lite".to_string(),
                max_connections: 4
            }
        );
    }

    #[test]
    fn rejects_bad_values() {
        assert!(config(&[("STORE_BACKEND", "mongo")]).is_err());
        assert!(config(&[("STORE_BACKEND", "memory"), ("RATE_PER_MIN", "0")]).is_err());
        assert!(config(&[("STORE_BACKEND", "memory"), ("RATE_PER_MIN", "lots")]).is_err());
        assert!(config(&[("STORE_BACKEND", "memory"), ("LOG_LEVEL", "chatty")]).is_err());
    }

    #[test]
    fn prefix_loses_trailing_slash() {
        let cfg = config(&[("STORE_BACKEND", "memory"), ("API_PREFIX", "/v1/")]).unwrap();
        assert_eq!(cfg.api_prefix, "/v1");
    }
}
