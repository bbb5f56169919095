//! Load catalog definitions: the embedded variants or a JSON file on disk.

use crate::config::{resolve, CatalogConfig, ResolvedCatalog};
use crate::error::ConfigError;
use std::path::Path;

const CLASSIC: &str = include_str!("../../catalogs/classic.json");
const STOREFRONT: &str = include_str!("../../catalogs/storefront.json");

/// Built-in catalogs. `Classic` serves singular paths with bare bodies; `Storefront` serves plural
/// paths with `{ success, data }` bodies, stock counts and nested specifications.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum CatalogVariant {
    Classic,
    Storefront,
}

impl std::str::FromStr for CatalogVariant {
    type Err = ConfigError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "classic" => Ok(CatalogVariant::Classic),
            "storefront" => Ok(CatalogVariant::Storefront),
            other => Err(ConfigError::Setting {
                key: "CATALOG_VARIANT",
                reason: format!("unknown variant '{}' (expected classic or storefront)", other),
            }),
        }
    }
}

pub fn parse_catalog(json: &str) -> Result<CatalogConfig, ConfigError> {
    Ok(serde_json::from_str(json)?)
}

pub fn builtin_config(variant: CatalogVariant) -> Result<CatalogConfig, ConfigError> {
    match variant {
        CatalogVariant::Classic => parse_catalog(CLASSIC),
        CatalogVariant::Storefront => parse_catalog(STOREFRONT),
    }
}

pub fn builtin(variant: CatalogVariant) -> Result<ResolvedCatalog, ConfigError> {
    resolve(&builtin_config(variant)?)
}

pub async fn load_from_path(path: &Path) -> Result<ResolvedCatalog, ConfigError> {
    let raw = tokio::fs::read_to_string(path)
        .await
        .map_err(|e| ConfigError::Load(format!("{}: {}", path.display(), e)))?;
    let config = parse_catalog(&raw)?;
    tracing::info!(catalog = %config.name, path = %path.display(), "loaded catalog from file");
    resolve(&config)
}
