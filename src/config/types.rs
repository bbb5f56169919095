//! Raw catalog definition types matching the JSON catalog format.

use crate::response::Envelope;
use regex::Regex;
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use serde_json::Value;

/// JSON type a field accepts. `Object` fields carry nested `fields`.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum FieldKind {
    String,
    Number,
    Integer,
    Boolean,
    Object,
}

impl FieldKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            FieldKind::String => "string",
            FieldKind::Number => "number",
            FieldKind::Integer => "integer",
            FieldKind::Boolean => "boolean",
            FieldKind::Object => "object",
        }
    }

    /// Whether `v` has this JSON type. Integers must have no fractional part.
    pub fn accepts(&self, v: &Value) -> bool {
        match self {
            FieldKind::String => v.is_string(),
            FieldKind::Number => v.is_number(),
            FieldKind::Integer => match v {
                Value::Number(n) => n.is_i64() || n.is_u64() || n.as_f64().is_some_and(|f| f.fract() == 0.0),
                _ => false,
            },
            FieldKind::Boolean => v.is_boolean(),
            FieldKind::Object => v.is_object(),
        }
    }
}

/// Numeric bound: a fixed number, or an offset from the current calendar year.
#[derive(Clone, Debug, PartialEq)]
pub enum Bound {
    Fixed(f64),
    CurrentYearPlus(i32),
}

impl Bound {
    pub fn resolve(&self, current_year: i32) -> f64 {
        match self {
            Bound::Fixed(n) => *n,
            Bound::CurrentYearPlus(offset) => f64::from(current_year + offset),
        }
    }
}

impl<'de> Deserialize<'de> for Bound {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        let v = Value::deserialize(deserializer)?;
        match v {
            Value::Number(n) => n
                .as_f64()
                .map(Bound::Fixed)
                .ok_or_else(|| serde::de::Error::custom("bound must be a finite number")),
            Value::Object(mut obj) => {
                if let Some(Value::Number(n)) = obj.remove("current_year_plus") {
                    if let Some(offset) = n.as_i64().and_then(|o| i32::try_from(o).ok()) {
                        return Ok(Bound::CurrentYearPlus(offset));
                    }
                }
                Err(serde::de::Error::custom(format!(
                    "bound object must be {{ \"current_year_plus\": <int> }}; got keys: {:?}",
                    obj.keys().collect::<Vec<_>>()
                )))
            }
            other => Err(serde::de::Error::custom(format!(
                "bound must be a number or {{ \"current_year_plus\": <int> }}; got {}",
                type_name_of_json(&other)
            ))),
        }
    }
}

impl Serialize for Bound {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        match self {
            Bound::Fixed(n) => serializer.serialize_f64(*n),
            Bound::CurrentYearPlus(offset) => {
                serde_json::json!({ "current_year_plus": offset }).serialize(serializer)
            }
        }
    }
}

/// Regex rule compiled once when the catalog is parsed.
#[derive(Clone, Debug)]
pub struct Pattern(Regex);

impl Pattern {
    pub fn new(source: &str) -> Result<Self, regex::Error> {
        Regex::new(source).map(Pattern)
    }

    pub fn as_str(&self) -> &str {
        self.0.as_str()
    }

    pub fn is_match(&self, s: &str) -> bool {
        self.0.is_match(s)
    }
}

impl PartialEq for Pattern {
    fn eq(&self, other: &Self) -> bool {
        self.as_str() == other.as_str()
    }
}

impl<'de> Deserialize<'de> for Pattern {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        let source = String::deserialize(deserializer)?;
        Pattern::new(&source)
            .map_err(|e| serde::de::Error::custom(format!("invalid pattern '{}': {}", source, e)))
    }
}

impl Serialize for Pattern {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        serializer.serialize_str(self.as_str())
    }
}

pub fn type_name_of_json(v: &Value) -> &'static str {
    match v {
        Value::Null => "null",
        Value::Bool(_) => "boolean",
        Value::Number(_) => "number",
        Value::String(_) => "string",
        Value::Array(_) => "array",
        Value::Object(_) => "object",
    }
}

#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct ValidationRule {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub required: Option<bool>,
    /// One of `url`, `email`, `uuid`.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub format: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub max_length: Option<u32>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub min_length: Option<u32>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub pattern: Option<Pattern>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub allowed: Option<Vec<Value>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub minimum: Option<Bound>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub maximum: Option<Bound>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub exclusive_minimum: Option<f64>,
    /// Replaces the generated message for every rule failure on this field (not for missing or mistyped values).
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,
}

impl ValidationRule {
    pub fn is_required(&self) -> bool {
        self.required == Some(true)
    }
}

#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct FieldConfig {
    pub name: String,
    #[serde(rename = "type")]
    pub kind: FieldKind,
    #[serde(default)]
    pub rules: ValidationRule,
    /// Applied on create when the field is absent.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub default: Option<Value>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub fields: Vec<FieldConfig>,
}

#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct EntityConfig {
    pub path_segment: String,
    pub collection: String,
    /// Singular display name used in messages ("Guitar not found").
    pub label: String,
    #[serde(default)]
    pub plural_label: Option<String>,
    pub fields: Vec<FieldConfig>,
    #[serde(default, skip_serializing)]
    pub samples: Vec<Value>,
}

#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct CatalogConfig {
    pub name: String,
    #[serde(default)]
    pub envelope: Envelope,
    pub entities: Vec<EntityConfig>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn bound_parses_number_and_year_offset() {
        let fixed: Bound = serde_json::from_str("1900").unwrap();
        assert_eq!(fixed, Bound::Fixed(1900.0));
        let relative: Bound = serde_json::from_str(r#"{ "current_year_plus": 1 }"#).unwrap();
        assert_eq!(relative, Bound::CurrentYearPlus(1));
        assert_eq!(relative.resolve(2026), 2027.0);
        assert!(serde_json::from_str::<Bound>(r#""soon""#).is_err());
    }

    #[test]
    fn integer_kind_accepts_integral_floats_only() {
        assert!(FieldKind::Integer.accepts(&serde_json::json!(6)));
        assert!(FieldKind::Integer.accepts(&serde_json::json!(6.0)));
        assert!(!FieldKind::Integer.accepts(&serde_json::json!(6.5)));
        assert!(!FieldKind::Integer.accepts(&serde_json::json!("6")));
    }

    #[test]
    fn pattern_compiles_when_parsed() {
        let rule: ValidationRule = serde_json::from_str(r#"{ "pattern": "^[A-Z]{2}-\\d+$" }"#).unwrap();
        let pattern = rule.pattern.unwrap();
        assert!(!pattern.is_match("SKU-12"));
        assert!(pattern.is_match("AB-12"));
        assert!(serde_json::from_str::<ValidationRule>(r#"{ "pattern": "([" }"#).is_err());
    }
}
