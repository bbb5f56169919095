//! Request validation from catalog field rules.

use crate::config::{FieldConfig, FieldKind, ValidationRule};
use crate::error::FieldError;
use chrono::Datelike;
use regex::Regex;
use serde_json::{Map, Value};
use std::sync::OnceLock;

pub struct RequestValidator;

impl RequestValidator {
    /// Validate a create body. Required fields must be present, defaults are filled in and
    /// keys not declared by the schema are dropped. Returns the sanitized document.
    pub fn validate(body: &Map<String, Value>, fields: &[FieldConfig]) -> Result<Map<String, Value>, Vec<FieldError>> {
        Self::validate_at(body, fields, false, chrono::Utc::now().year())
    }

    /// Validate only the fields present in body (for PUT/PATCH). Required is not enforced for
    /// missing fields, no defaults are applied, and null values are ignored.
    pub fn validate_partial(
        body: &Map<String, Value>,
        fields: &[FieldConfig],
    ) -> Result<Map<String, Value>, Vec<FieldError>> {
        Self::validate_at(body, fields, true, chrono::Utc::now().year())
    }

    pub(crate) fn validate_at(
        body: &Map<String, Value>,
        fields: &[FieldConfig],
        partial: bool,
        current_year: i32,
    ) -> Result<Map<String, Value>, Vec<FieldError>> {
        let mut checker = Checker {
            current_year,
            errors: Vec::new(),
        };
        let clean = checker.object("", body, fields, partial);
        if checker.errors.is_empty() {
            Ok(clean)
        } else {
            Err(checker.errors)
        }
    }
}

struct Checker {
    current_year: i32,
    errors: Vec<FieldError>,
}

impl Checker {
    fn object(
        &mut self,
        prefix: &str,
        body: &Map<String, Value>,
        fields: &[FieldConfig],
        partial: bool,
    ) -> Map<String, Value> {
        let mut out = Map::new();
        for field in fields {
            let path = if prefix.is_empty() {
                field.name.clone()
            } else {
                format!("{}.{}", prefix, field.name)
            };
            match body.get(&field.name).filter(|v| !v.is_null()) {
                Some(v) => {
                    if let Some(clean) = self.field(&path, v, field) {
                        out.insert(field.name.clone(), clean);
                    }
                }
                None if partial => {}
                None => {
                    if let Some(default) = &field.default {
                        out.insert(field.name.clone(), default.clone());
                    } else if field.rules.is_required() {
                        self.errors.push(FieldError::new(&path, format!("{} is required", path)));
                    }
                }
            }
        }
        out
    }

    fn field(&mut self, path: &str, v: &Value, field: &FieldConfig) -> Option<Value> {
        if !field.kind.accepts(v) {
            self.errors.push(FieldError::new(
                path,
                format!("{} must be {}", path, kind_phrase(field.kind)),
            ));
            return None;
        }
        if let (FieldKind::Object, Value::Object(inner)) = (field.kind, v) {
            let clean = self.object(path, inner, &field.fields, false);
            return Some(Value::Object(clean));
        }
        match rule_violation(path, v, &field.rules, self.current_year) {
            Some(reason) => {
                let message = field.rules.message.clone().unwrap_or(reason);
                self.errors.push(FieldError::new(path, message));
                None
            }
            None => Some(normalized(field.kind, v)),
        }
    }
}

/// Integral floats given for integer fields are stored as integers (`6.0` becomes `6`).
fn normalized(kind: FieldKind, v: &Value) -> Value {
    match (kind, v) {
        (FieldKind::Integer, Value::Number(n)) if n.is_f64() => n
            .as_f64()
            .map(|f| Value::from(f as i64))
            .unwrap_or_else(|| v.clone()),
        _ => v.clone(),
    }
}

fn kind_phrase(kind: FieldKind) -> &'static str {
    match kind {
        FieldKind::String => "a string",
        FieldKind::Number => "a number",
        FieldKind::Integer => "an integer",
        FieldKind::Boolean => "a boolean",
        FieldKind::Object => "an object",
    }
}

/// First rule `v` breaks, as a message. Type has already been checked.
fn rule_violation(col: &str, v: &Value, rule: &ValidationRule, current_year: i32) -> Option<String> {
    if let Some(s) = v.as_str() {
        let len = s.chars().count();
        if let Some(min) = rule.min_length {
            if len < min as usize {
                return Some(format!("{} must be at least {} characters", col, min));
            }
        }
        if let Some(max) = rule.max_length {
            if len > max as usize {
                return Some(format!("{} must be at most {} characters", col, max));
            }
        }
        if let Some(format) = &rule.format {
            if let Some(reason) = format_violation(col, s, format) {
                return Some(reason);
            }
        }
        if let Some(pattern) = &rule.pattern {
            if !pattern.is_match(s) {
                return Some(format!("{} does not match required pattern", col));
            }
        }
    }
    if let Some(ref allowed) = rule.allowed {
        if !allowed.iter().any(|a| value_eq(v, a)) {
            let options: Vec<String> = allowed
                .iter()
                .map(|a| a.as_str().map(str::to_string).unwrap_or_else(|| a.to_string()))
                .collect();
            return Some(format!("{} must be one of: {}", col, options.join(", ")));
        }
    }
    if let Some(n) = v.as_f64() {
        if let Some(min) = rule.exclusive_minimum {
            if n <= min {
                return Some(format!("{} must be greater than {}", col, min));
            }
        }
        if let Some(min) = &rule.minimum {
            let min = min.resolve(current_year);
            if n < min {
                return Some(format!("{} must be at least {}", col, min));
            }
        }
        if let Some(max) = &rule.maximum {
            let max = max.resolve(current_year);
            if n > max {
                return Some(format!("{} must be at most {}", col, max));
            }
        }
    }
    None
}

fn value_eq(a: &Value, b: &Value) -> bool {
    match (a, b) {
        (Value::String(s), Value::String(t)) => s == t,
        (Value::Number(n), Value::Number(m)) => n.as_f64() == m.as_f64(),
        _ => a == b,
    }
}

fn url_regex() -> &'static Regex {
    static URL: OnceLock<Regex> = OnceLock::new();
    URL.get_or_init(|| Regex::new(r"^[a-zA-Z][a-zA-Z0-9+.-]*://[^\s/?#]+[^\s]*$").expect("static url regex"))
}

fn format_violation(col: &str, s: &str, format: &str) -> Option<String> {
    match format.to_lowercase().as_str() {
        "url" if !url_regex().is_match(s) => Some(format!("{} must be a valid URL", col)),
        "email" if !s.contains('@') || s.len() < 3 => Some(format!("{} must be a valid email", col)),
        "uuid" if uuid::Uuid::parse_str(s).is_err() => Some(format!("{} must be a valid UUID", col)),
        _ => None,
    }
}

/// Formats the validator knows. Used by the catalog integrity check.
pub fn is_known_format(format: &str) -> bool {
    matches!(format.to_lowercase().as_str(), "url" | "email" | "uuid")
}
