//! Process settings read from the environment (`.env` is honoured by the server binary).

use crate::config::{builtin, load_from_path, CatalogVariant, ResolvedCatalog};
use crate::error::ConfigError;
use crate::response::Envelope;
use std::path::PathBuf;
use std::str::FromStr;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum StoreBackend {
    Postgres,
    Memory,
}

impl FromStr for StoreBackend {
    type Err = ConfigError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "postgres" | "postgresql" => Ok(StoreBackend::Postgres),
            "memory" => Ok(StoreBackend::Memory),
            other => Err(ConfigError::Setting {
                key: "STORE_BACKEND",
                reason: format!("unknown backend '{}' (expected postgres or memory)", other),
            }),
        }
    }
}

#[derive(Clone, Debug)]
pub struct Settings {
    pub bind_addr: String,
    pub store_backend: StoreBackend,
    pub database_url: String,
    pub database_max_connections: u32,
    /// PostgreSQL schema holding one table per collection.
    pub catalog_schema: String,
    pub catalog_variant: CatalogVariant,
    /// When set, the catalog is read from this JSON file instead of the built-in variant.
    pub catalog_path: Option<PathBuf>,
    /// Overrides the catalog's own envelope.
    pub envelope: Option<Envelope>,
    pub body_limit_bytes: usize,
    pub seed_sample_data: bool,
}

impl Default for Settings {
    fn default() -> Self {
        Settings {
            bind_addr: "0.0.0.0:3000".into(),
            store_backend: StoreBackend::Postgres,
            database_url: "postgres://localhost/catalog".into(),
            database_max_connections: 5,
            catalog_schema: "catalog".into(),
            catalog_variant: CatalogVariant::Classic,
            catalog_path: None,
            envelope: None,
            body_limit_bytes: 1024 * 1024,
            seed_sample_data: false,
        }
    }
}

impl Settings {
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Build settings from any key lookup; unset or blank keys keep their defaults.
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let get = |key: &str| lookup(key).map(|v| v.trim().to_string()).filter(|v| !v.is_empty());
        let mut s = Settings::default();
        if let Some(v) = get("BIND_ADDR") {
            s.bind_addr = v;
        }
        if let Some(v) = get("STORE_BACKEND") {
            s.store_backend = v.parse()?;
        }
        if let Some(v) = get("DATABASE_URL") {
            s.database_url = v;
        }
        if let Some(v) = get("DATABASE_MAX_CONNECTIONS") {
            s.database_max_connections = parse_number("DATABASE_MAX_CONNECTIONS", &v)?;
        }
        if let Some(v) = get("CATALOG_SCHEMA") {
            s.catalog_schema = v;
        }
        if let Some(v) = get("CATALOG_VARIANT") {
            s.catalog_variant = v.parse()?;
        }
        s.catalog_path = get("CATALOG_PATH").map(PathBuf::from);
        if let Some(v) = get("CATALOG_ENVELOPE") {
            s.envelope = Some(v.parse().map_err(|reason| ConfigError::Setting {
                key: "CATALOG_ENVELOPE",
                reason,
            })?);
        }
        if let Some(v) = get("BODY_LIMIT_BYTES") {
            s.body_limit_bytes = parse_number("BODY_LIMIT_BYTES", &v)?;
        }
        if let Some(v) = get("SEED_SAMPLE_DATA") {
            s.seed_sample_data = parse_bool("SEED_SAMPLE_DATA", &v)?;
        }
        Ok(s)
    }

    /// The catalog these settings select, with the envelope override applied.
    pub async fn load_catalog(&self) -> Result<ResolvedCatalog, ConfigError> {
        let catalog = match &self.catalog_path {
            Some(path) => load_from_path(path).await?,
            None => builtin(self.catalog_variant)?,
        };
        Ok(match self.envelope {
            Some(envelope) => catalog.with_envelope(envelope),
            None => catalog,
        })
    }
}

fn parse_number<T: FromStr>(key: &'static str, v: &str) -> Result<T, ConfigError> {
    v.parse().map_err(|_| ConfigError::Setting {
        key,
        reason: format!("'{}' is not a valid number", v),
    })
}

fn parse_bool(key: &'static str, v: &str) -> Result<bool, ConfigError> {
    match v.to_lowercase().as_str() {
        "1" | "true" | "yes" | "on" => Ok(true),
        "0" | "false" | "no" | "off" => Ok(false),
        _ => Err(ConfigError::Setting {
            key,
            reason: format!("'{}' is not a boolean", v),
        }),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn settings(pairs: &[(&str, &str)]) -> Result<Settings, ConfigError> {
        let env: HashMap<String, String> = pairs.iter().map(|(k, v)| (k.to_string(), v.to_string())).collect();
        Settings::from_lookup(|k| env.get(k).cloned())
    }

    #[test]
    fn defaults_when_nothing_is_set() {
        let s = settings(&[]).unwrap();
        assert_eq!(s.bind_addr, "0.0.0.0:3000");
        assert_eq!(s.store_backend, StoreBackend::Postgres);
        assert_eq!(s.catalog_variant, CatalogVariant::Classic);
        assert_eq!(s.envelope, None);
        assert!(!s.seed_sample_data);
    }

    #[test]
    fn reads_overrides() {
        let s = settings(&[
            ("STORE_BACKEND", "memory"),
            ("CATALOG_VARIANT", "Storefront"),
            ("CATALOG_ENVELOPE", "bare"),
            ("BODY_LIMIT_BYTES", "2048"),
            ("SEED_SAMPLE_DATA", "yes"),
            ("CATALOG_PATH", "  "),
        ])
        .unwrap();
        assert_eq!(s.store_backend, StoreBackend::Memory);
        assert_eq!(s.catalog_variant, CatalogVariant::Storefront);
        assert_eq!(s.envelope, Some(Envelope::Bare));
        assert_eq!(s.body_limit_bytes, 2048);
        assert!(s.seed_sample_data);
        assert_eq!(s.catalog_path, None);
    }

    #[test]
    fn rejects_bad_values() {
        assert!(matches!(
            settings(&[("STORE_BACKEND", "mongo")]),
            Err(ConfigError::Setting { key: "STORE_BACKEND", .. })
        ));
        assert!(settings(&[("DATABASE_MAX_CONNECTIONS", "many")]).is_err());
        assert!(settings(&[("SEED_SAMPLE_DATA", "maybe")]).is_err());
    }

    #[tokio::test]
    async fn envelope_override_applies_to_builtin_catalog() {
        let s = settings(&[("CATALOG_VARIANT", "storefront"), ("CATALOG_ENVELOPE", "bare")]).unwrap();
        let catalog = s.load_catalog().await.unwrap();
        assert_eq!(catalog.name, "storefront");
        assert_eq!(catalog.envelope, Envelope::Bare);
    }
}
