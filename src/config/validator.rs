//! Catalog validation: naming, field definitions, defaults and samples.

use crate::config::{CatalogConfig, EntityConfig, FieldConfig, FieldKind};
use crate::error::ConfigError;
use crate::service::validation::{is_known_format, RequestValidator};
use chrono::Datelike;
use regex::Regex;
use serde_json::{Map, Value};
use std::collections::HashSet;

/// Path segments taken by non-entity routes under `/api`.
pub const RESERVED_PATH_SEGMENTS: &[&str] = &["catalog", "sample-data"];

pub fn validate(config: &CatalogConfig) -> Result<(), ConfigError> {
    if config.entities.is_empty() {
        return Err(ConfigError::Validation(format!(
            "catalog '{}' must define at least one entity",
            config.name
        )));
    }
    let path_re = Regex::new(r"^[a-z][a-z0-9_-]*$").map_err(|e| ConfigError::Validation(e.to_string()))?;
    let collection_re = Regex::new(r"^[a-z][a-z0-9_]*$").map_err(|e| ConfigError::Validation(e.to_string()))?;

    let mut path_segments = HashSet::new();
    let mut collections = HashSet::new();
    for entity in &config.entities {
        if !path_re.is_match(&entity.path_segment) || RESERVED_PATH_SEGMENTS.contains(&entity.path_segment.as_str()) {
            return Err(ConfigError::Validation(format!(
                "invalid path segment: '{}'",
                entity.path_segment
            )));
        }
        if !collection_re.is_match(&entity.collection) {
            return Err(ConfigError::Validation(format!(
                "invalid collection name: '{}'",
                entity.collection
            )));
        }
        if !path_segments.insert(entity.path_segment.as_str()) {
            return Err(ConfigError::DuplicatePathSegment(entity.path_segment.clone()));
        }
        if !collections.insert(entity.collection.as_str()) {
            return Err(ConfigError::DuplicateCollection(entity.collection.clone()));
        }
        if entity.label.trim().is_empty() {
            return Err(ConfigError::Validation(format!(
                "entity '{}' needs a label",
                entity.path_segment
            )));
        }
        validate_fields(&entity.path_segment, "", &entity.fields)?;
        validate_samples(entity)?;
    }
    Ok(())
}

fn validate_fields(entity: &str, prefix: &str, fields: &[FieldConfig]) -> Result<(), ConfigError> {
    if fields.is_empty() {
        return Err(ConfigError::Validation(format!(
            "entity '{}' declares no fields{}",
            entity,
            if prefix.is_empty() { String::new() } else { format!(" under '{}'", prefix) }
        )));
    }
    let mut names = HashSet::new();
    for field in fields {
        let path = if prefix.is_empty() {
            field.name.clone()
        } else {
            format!("{}.{}", prefix, field.name)
        };
        let invalid = |reason: String| ConfigError::InvalidField {
            entity: entity.to_string(),
            field: path.clone(),
            reason,
        };
        if field.name.is_empty() {
            return Err(invalid("empty field name".into()));
        }
        if !names.insert(field.name.as_str()) {
            return Err(invalid("duplicate field name".into()));
        }
        match field.kind {
            FieldKind::Object => validate_fields(entity, &path, &field.fields)?,
            _ if !field.fields.is_empty() => {
                return Err(invalid("only object fields may declare nested fields".into()));
            }
            _ => {}
        }
        let rules = &field.rules;
        if let Some(format) = &rules.format {
            if !is_known_format(format) {
                return Err(invalid(format!("unknown format '{}'", format)));
            }
        }
        if let (Some(min), Some(max)) = (rules.min_length, rules.max_length) {
            if min > max {
                return Err(invalid("min_length exceeds max_length".into()));
            }
        }
        if let Some(allowed) = &rules.allowed {
            if allowed.is_empty() {
                return Err(invalid("allowed must list at least one value".into()));
            }
            if let Some(bad) = allowed.iter().find(|v| !field.kind.accepts(v)) {
                return Err(invalid(format!("allowed value {} is not a {}", bad, field.kind.as_str())));
            }
        }
        if let Some(default) = &field.default {
            let mut probe = Map::new();
            probe.insert(field.name.clone(), default.clone());
            let year = chrono::Utc::now().year();
            if let Err(errors) = RequestValidator::validate_at(&probe, std::slice::from_ref(field), true, year) {
                let reasons: Vec<String> = errors.into_iter().map(|e| e.message).collect();
                return Err(invalid(format!("default is invalid: {}", reasons.join("; "))));
            }
        }
    }
    Ok(())
}

fn validate_samples(entity: &EntityConfig) -> Result<(), ConfigError> {
    for (index, sample) in entity.samples.iter().enumerate() {
        let invalid = |reason: String| ConfigError::InvalidSample {
            entity: entity.path_segment.clone(),
            index,
            reason,
        };
        let Value::Object(body) = sample else {
            return Err(invalid("sample must be a JSON object".into()));
        };
        if let Err(errors) = RequestValidator::validate(body, &entity.fields) {
            let reasons: Vec<String> = errors.into_iter().map(|e| format!("{}: {}", e.field, e.message)).collect();
            return Err(invalid(reasons.join("; ")));
        }
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn catalog(entities: Value) -> CatalogConfig {
        serde_json::from_value(json!({ "name": "test", "entities": entities })).unwrap()
    }

    fn guitar(path: &str, collection: &str) -> Value {
        json!({
            "path_segment": path,
            "collection": collection,
            "label": "Guitar",
            "fields": [
                { "name": "name", "type": "string", "rules": { "required": true } },
                { "name": "bodyType", "type": "string", "default": "solid", "rules": { "allowed": ["solid", "hollow"] } }
            ]
        })
    }

    #[test]
    fn accepts_a_well_formed_catalog() {
        assert!(validate(&catalog(json!([guitar("guitar", "guitars")]))).is_ok());
    }

    #[test]
    fn rejects_empty_catalog() {
        assert!(matches!(validate(&catalog(json!([]))), Err(ConfigError::Validation(_))));
    }

    #[test]
    fn rejects_duplicate_paths_and_collections() {
        let dup_path = catalog(json!([guitar("guitar", "guitars"), guitar("guitar", "others")]));
        assert!(matches!(validate(&dup_path), Err(ConfigError::DuplicatePathSegment(p)) if p == "guitar"));
        let dup_collection = catalog(json!([guitar("guitar", "guitars"), guitar("guitars", "guitars")]));
        assert!(matches!(validate(&dup_collection), Err(ConfigError::DuplicateCollection(_))));
    }

    #[test]
    fn rejects_reserved_and_malformed_names() {
        assert!(validate(&catalog(json!([guitar("catalog", "guitars")]))).is_err());
        assert!(validate(&catalog(json!([guitar("Guitar", "guitars")]))).is_err());
        assert!(validate(&catalog(json!([guitar("guitar", "gui tars")]))).is_err());
    }

    #[test]
    fn rejects_default_outside_allowed_set() {
        let mut entity = guitar("guitar", "guitars");
        entity["fields"][1]["default"] = json!("flying-v");
        let err = validate(&catalog(json!([entity]))).unwrap_err();
        assert!(matches!(err, ConfigError::InvalidField { ref field, .. } if field == "bodyType"));
    }

    #[test]
    fn rejects_allowed_values_of_the_wrong_type() {
        let mut entity = guitar("guitar", "guitars");
        entity["fields"][1]["rules"]["allowed"] = json!(["solid", 3]);
        assert!(matches!(
            validate(&catalog(json!([entity]))),
            Err(ConfigError::InvalidField { .. })
        ));
    }

    #[test]
    fn rejects_nested_fields_on_scalars_and_empty_objects() {
        let mut entity = guitar("guitar", "guitars");
        entity["fields"][0]["fields"] = json!([{ "name": "x", "type": "string" }]);
        assert!(validate(&catalog(json!([entity]))).is_err());

        let mut entity = guitar("guitar", "guitars");
        entity["fields"]
            .as_array_mut()
            .unwrap()
            .push(json!({ "name": "specifications", "type": "object" }));
        assert!(validate(&catalog(json!([entity]))).is_err());
    }

    #[test]
    fn rejects_samples_that_fail_the_schema() {
        let mut entity = guitar("guitar", "guitars");
        entity["samples"] = json!([{ "name": "Strat" }, { "bodyType": "solid" }]);
        let err = validate(&catalog(json!([entity]))).unwrap_err();
        assert!(matches!(err, ConfigError::InvalidSample { index: 1, .. }));
    }
}
