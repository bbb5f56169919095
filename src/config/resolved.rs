//! Resolved catalog: definitions validated and indexed for runtime use.

use crate::config::{validator, CatalogConfig, FieldConfig};
use crate::error::ConfigError;
use crate::response::Envelope;
use serde::Serialize;
use serde_json::Value;
use std::collections::HashMap;

#[derive(Clone, Debug, Serialize)]
pub struct ResolvedEntity {
    pub path_segment: String,
    pub collection: String,
    pub label: String,
    pub plural_label: String,
    pub fields: Vec<FieldConfig>,
    #[serde(skip)]
    pub samples: Vec<Value>,
}

#[derive(Clone, Debug)]
pub struct ResolvedCatalog {
    pub name: String,
    pub envelope: Envelope,
    pub entities: Vec<ResolvedEntity>,
    entity_by_path: HashMap<String, usize>,
}

impl ResolvedCatalog {
    pub fn entity_by_path(&self, path: &str) -> Option<&ResolvedEntity> {
        self.entity_by_path.get(path).map(|&i| &self.entities[i])
    }

    pub fn with_envelope(mut self, envelope: Envelope) -> Self {
        self.envelope = envelope;
        self
    }
}

/// Validate a catalog definition and build the runtime model.
pub fn resolve(config: &CatalogConfig) -> Result<ResolvedCatalog, ConfigError> {
    validator::validate(config)?;
    let entities: Vec<ResolvedEntity> = config
        .entities
        .iter()
        .map(|e| ResolvedEntity {
            path_segment: e.path_segment.clone(),
            collection: e.collection.clone(),
            label: e.label.clone(),
            plural_label: e.plural_label.clone().unwrap_or_else(|| format!("{}s", e.label)),
            fields: e.fields.clone(),
            samples: e.samples.clone(),
        })
        .collect();
    let entity_by_path = entities
        .iter()
        .enumerate()
        .map(|(i, e)| (e.path_segment.clone(), i))
        .collect();
    Ok(ResolvedCatalog {
        name: config.name.clone(),
        envelope: config.envelope,
        entities,
        entity_by_path,
    })
}
