//! The `custom_fields` attribute: a set of `{name, type, value}` objects
//!
//! Values are strings in Terraform and typed JSON in NetBox. Updates merge
//! the planned fields into the ones already stored, so fields managed outside
//! Terraform survive an apply.

use regex::Regex;
use serde_json::{Map, Value};
use std::collections::HashMap;
use std::sync::LazyLock;
use tfplug::schema::{Attribute, AttributeBuilder, AttributeType};
use tfplug::types::Dynamic;
use tfplug::validator::{ObjectFieldsValidator, OneOfValidator, StringLengthValidator, StringPatternValidator};

pub const FIELD_TYPES: &[&str] = &[
    "text",
    "longtext",
    "integer",
    "boolean",
    "date",
    "url",
    "json",
    "select",
    "multiselect",
    "object",
    "multiobject",
    "multiple",
    "selection",
];

static NAME_PATTERN: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^[a-z0-9_]+$").expect("valid custom field name pattern"));
static DATE_PATTERN: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^\d{4}-\d{2}-\d{2}$").expect("valid date pattern"));

fn element_type() -> AttributeType {
    AttributeType::object([
        ("name", AttributeType::String),
        ("type", AttributeType::String),
        ("value", AttributeType::String),
    ])
}

pub fn custom_fields_attribute() -> Attribute {
    AttributeBuilder::new("custom_fields", AttributeType::Set(Box::new(element_type())))
        .description(
            "Custom fields managed by Terraform. Fields not listed here are left untouched on update.",
        )
        .optional()
        .validator(ObjectFieldsValidator::create(vec![
            ("name", StringLengthValidator::between(1, 50)),
            (
                "name",
                StringPatternValidator::create(
                    NAME_PATTERN.clone(),
                    "must contain only lowercase letters, digits and underscores",
                ),
            ),
            ("type", OneOfValidator::create(FIELD_TYPES)),
            ("value", StringLengthValidator::at_most(1000)),
        ]))
        .build()
}

/// Computed variant used by data sources
pub fn custom_fields_data_source_attribute() -> Attribute {
    AttributeBuilder::new("custom_fields", AttributeType::Set(Box::new(element_type())))
        .description("Custom fields set on the object, with types inferred from their values")
        .computed()
        .build()
}

#[derive(Debug, Clone, PartialEq)]
pub struct CustomField {
    pub name: String,
    pub field_type: String,
    pub value: String,
}

impl CustomField {
    fn from_dynamic(value: &Dynamic) -> Option<Self> {
        let fields = value.as_map()?;
        let text = |key: &str| {
            fields
                .get(key)
                .and_then(Dynamic::as_str)
                .unwrap_or_default()
                .to_string()
        };
        let name = text("name");
        if name.is_empty() {
            return None;
        }
        Some(Self {
            name,
            field_type: text("type"),
            value: text("value"),
        })
    }

    fn to_dynamic(&self) -> Dynamic {
        Dynamic::Map(HashMap::from([
            ("name".to_string(), Dynamic::from(self.name.as_str())),
            ("type".to_string(), Dynamic::from(self.field_type.as_str())),
            ("value".to_string(), Dynamic::from(self.value.as_str())),
        ]))
    }

    /// Typed JSON value sent to the API; an empty value is null
    pub fn api_value(&self) -> Value {
        let raw = self.value.trim();
        if raw.is_empty() {
            return Value::Null;
        }
        match self.field_type.as_str() {
            "integer" => raw
                .parse::<i64>()
                .map(Value::from)
                .unwrap_or_else(|_| Value::String(self.value.clone())),
            "boolean" => match raw.to_ascii_lowercase().as_str() {
                "true" => Value::Bool(true),
                "false" => Value::Bool(false),
                _ => Value::String(self.value.clone()),
            },
            "json" => serde_json::from_str(raw).unwrap_or_else(|_| Value::String(self.value.clone())),
            "multiselect" | "multiple" => Value::Array(
                raw.split(',')
                    .map(str::trim)
                    .filter(|s| !s.is_empty())
                    .map(|s| Value::String(s.to_string()))
                    .collect(),
            ),
            _ => Value::String(self.value.clone()),
        }
    }
}

/// Decodes a set value; null and unknown decode to `None`
pub fn from_dynamic(value: &Dynamic) -> Option<Vec<CustomField>> {
    let elements = value.as_list()?;
    Some(elements.iter().filter_map(CustomField::from_dynamic).collect())
}

pub fn to_dynamic(fields: &[CustomField]) -> Dynamic {
    let mut sorted: Vec<&CustomField> = fields.iter().collect();
    sorted.sort_by(|a, b| a.name.cmp(&b.name));
    Dynamic::List(sorted.into_iter().map(CustomField::to_dynamic).collect())
}

fn to_api_map(fields: &[CustomField]) -> Map<String, Value> {
    fields
        .iter()
        .map(|f| (f.name.clone(), f.api_value()))
        .collect()
}

/// Custom fields for a create request; a null plan omits the field
pub fn for_create(plan: &Dynamic) -> Option<Map<String, Value>> {
    from_dynamic(plan).map(|fields| to_api_map(&fields))
}

/// Custom fields for an update request, merged with the stored fields
pub fn for_update(plan: &Dynamic, state: &Dynamic) -> Map<String, Value> {
    let stored = from_dynamic(state).map(|fields| to_api_map(&fields));

    let Some(planned) = from_dynamic(plan) else {
        tracing::debug!("custom_fields not configured, preserving stored values");
        return stored.unwrap_or_default();
    };
    if planned.is_empty() {
        tracing::debug!("custom_fields is an empty set, clearing all values");
        return Map::new();
    }

    let mut merged = stored.unwrap_or_default();
    for field in &planned {
        match field.api_value() {
            Value::Null => {
                tracing::debug!("removing custom field {} with empty value", field.name);
                merged.remove(&field.name);
            }
            value => {
                merged.insert(field.name.clone(), value);
            }
        }
    }
    merged
}

/// Renders an API value back to the string form kept in state
fn render(field_type: &str, value: &Value) -> String {
    match value {
        Value::Null => String::new(),
        Value::String(s) => s.trim().to_string(),
        Value::Bool(b) => b.to_string(),
        Value::Number(n) => n.to_string(),
        Value::Array(items) if matches!(field_type, "multiselect" | "multiple") => items
            .iter()
            .map(|item| match item {
                Value::String(s) => s.clone(),
                other => other.to_string(),
            })
            .collect::<Vec<_>>()
            .join(","),
        other => other.to_string(),
    }
}

/// State value for custom fields returned by the API
///
/// Only fields already tracked in state are kept, so values set outside
/// Terraform never show up as drift. A tracked value that converts to the
/// stored API value keeps its configured spelling.
pub fn custom_fields_to_state(current: &Dynamic, api: &Map<String, Value>) -> Dynamic {
    let Some(tracked) = from_dynamic(current) else {
        return Dynamic::Null;
    };
    let fields: Vec<CustomField> = tracked
        .into_iter()
        .map(|field| {
            let value = match api.get(&field.name) {
                Some(v) if field.api_value() == *v => field.value.clone(),
                Some(v) => render(&field.field_type, v),
                None => String::new(),
            };
            CustomField { value, ..field }
        })
        .collect();
    to_dynamic(&fields)
}

fn infer_type(value: &Value) -> &'static str {
    match value {
        Value::Bool(_) => "boolean",
        Value::Number(n) if n.is_i64() || n.is_u64() => "integer",
        Value::Number(_) => "decimal",
        Value::String(s) if DATE_PATTERN.is_match(s) => "date",
        Value::String(s) if s.starts_with("http://") || s.starts_with("https://") => "url",
        Value::String(s) if s.len() > 100 || s.contains('\n') => "longtext",
        Value::String(_) => "text",
        _ => "json",
    }
}

/// All non-null custom fields with types inferred from their values
pub fn custom_fields_from_api(api: &Map<String, Value>) -> Vec<CustomField> {
    let mut fields: Vec<CustomField> = api
        .iter()
        .filter(|(_, value)| !value.is_null())
        .map(|(name, value)| {
            let field_type = infer_type(value);
            CustomField {
                name: name.clone(),
                field_type: field_type.to_string(),
                value: render(field_type, value),
            }
        })
        .collect();
    fields.sort_by(|a, b| a.name.cmp(&b.name));
    fields
}
