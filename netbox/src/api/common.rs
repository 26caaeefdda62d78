//! Common types and utilities for the NetBox API

use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use std::collections::BTreeMap;

/// One page of a list endpoint
#[derive(Debug, Deserialize)]
pub struct Paginated<T> {
    pub count: u64,
    pub next: Option<String>,
    pub previous: Option<String>,
    pub results: Vec<T>,
}

/// Brief representation NetBox uses for related objects
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
pub struct NestedRef {
    pub id: i64,
    #[serde(default)]
    pub display: String,
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default)]
    pub slug: Option<String>,
}

impl NestedRef {
    pub fn new(id: i64, name: &str, slug: Option<&str>) -> Self {
        Self {
            id,
            display: name.to_string(),
            name: Some(name.to_string()),
            slug: slug.map(str::to_string),
        }
    }

    /// Human readable label: name, then display, then the ID
    pub fn label(&self) -> String {
        match (&self.name, self.display.is_empty()) {
            (Some(name), _) => name.clone(),
            (None, false) => self.display.clone(),
            (None, true) => self.id.to_string(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct NestedTag {
    pub id: i64,
    pub name: String,
    pub slug: String,
    #[serde(default)]
    pub color: Option<String>,
}

/// Tag reference sent in request bodies
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct TagRef {
    pub name: String,
    pub slug: String,
}

/// Choice field as returned by the API, e.g. `{"value": "active", "label": "Active"}`
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct Choice {
    pub value: String,
    pub label: String,
}

/// Location of one object collection, `/api/<app>/<name>/`
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Endpoint {
    pub app: &'static str,
    pub name: &'static str,
    /// Label used in diagnostics, e.g. "Tenant Group"
    pub kind: &'static str,
    /// Whether objects of this collection carry a slug
    pub slugged: bool,
    /// Filter that matches an object's human name, `name` unless the
    /// collection names its objects differently (device types use `model`)
    pub name_field: &'static str,
}

impl Endpoint {
    pub const fn new(app: &'static str, name: &'static str, kind: &'static str) -> Self {
        Self {
            app,
            name,
            kind,
            slugged: true,
            name_field: "name",
        }
    }

    /// Collections such as devices or VRFs are looked up by name only
    pub const fn without_slug(mut self) -> Self {
        self.slugged = false;
        self
    }

    pub const fn with_name_field(mut self, field: &'static str) -> Self {
        self.name_field = field;
        self
    }

    pub fn path(&self) -> String {
        format!("/api/{}/{}/", self.app, self.name)
    }

    pub fn object_path(&self, id: i64) -> String {
        format!("/api/{}/{}/{}/", self.app, self.name, id)
    }
}

/// Deserializes `null` as the type's default, for maps NetBox may send as null
pub fn nullable<'de, D, T>(deserializer: D) -> Result<T, D::Error>
where
    D: serde::Deserializer<'de>,
    T: Deserialize<'de> + Default,
{
    Ok(Option::<T>::deserialize(deserializer)?.unwrap_or_default())
}

/// Fields shared by every NetBox object model
pub trait NetBoxModel: DeserializeOwned + Send + Sync {
    fn id(&self) -> i64;
    fn display(&self) -> &str;
    fn description(&self) -> Option<&str>;
    fn comments(&self) -> Option<&str>;
    fn tags(&self) -> &[NestedTag];
    fn custom_fields(&self) -> &Map<String, Value>;
}

/// Implements [`NetBoxModel`] for structs carrying the standard fields
/// (`id`, `display`, `description`, `comments`, `tags`, `custom_fields`)
macro_rules! netbox_model {
    ($($model:ty),+ $(,)?) => {
        $(
            impl $crate::api::common::NetBoxModel for $model {
                fn id(&self) -> i64 {
                    self.id
                }
                fn display(&self) -> &str {
                    &self.display
                }
                fn description(&self) -> Option<&str> {
                    self.description.as_deref()
                }
                fn comments(&self) -> Option<&str> {
                    self.comments.as_deref()
                }
                fn tags(&self) -> &[$crate::api::common::NestedTag] {
                    &self.tags
                }
                fn custom_fields(&self) -> &serde_json::Map<String, serde_json::Value> {
                    &self.custom_fields
                }
            }
        )+
    };
}
pub(crate) use netbox_model;

/// Fields every writable object accepts besides its own
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct CommonFields {
    pub description: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub comments: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub tags: Option<Vec<TagRef>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub custom_fields: Option<Map<String, Value>>,
}

#[derive(Debug, Clone, Default, thiserror::Error)]
#[error("API error details: errors={errors:?}, field_errors={field_errors:?}")]
pub struct ApiErrorDetails {
    pub errors: Option<Vec<String>>,
    pub field_errors: Option<BTreeMap<String, Vec<String>>>,
}

impl ApiErrorDetails {
    /// Parses `{"detail": "..."}` and `{"field": ["message", ...]}` bodies
    pub fn parse(body: &str) -> Option<Self> {
        let Ok(Value::Object(map)) = serde_json::from_str::<Value>(body) else {
            return None;
        };

        let mut errors = Vec::new();
        let mut field_errors = BTreeMap::new();
        for (key, value) in map {
            match value {
                Value::String(message) => errors.push(message),
                Value::Array(items) => {
                    let messages: Vec<String> = items
                        .into_iter()
                        .filter_map(|item| match item {
                            Value::String(s) => Some(s),
                            Value::Null => None,
                            other => Some(other.to_string()),
                        })
                        .collect();
                    field_errors.insert(key, messages);
                }
                _ => {}
            }
        }

        if errors.is_empty() && field_errors.is_empty() {
            return None;
        }
        Some(Self {
            errors: (!errors.is_empty()).then_some(errors),
            field_errors: (!field_errors.is_empty()).then_some(field_errors),
        })
    }
}

#[derive(Debug, Clone, Default)]
pub struct ApiQueryParams {
    params: Vec<(String, String)>,
}

impl ApiQueryParams {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn add<K: Into<String>, V: ToString>(mut self, key: K, value: V) -> Self {
        self.params.push((key.into(), value.to_string()));
        self
    }

    pub fn add_optional<K: Into<String>, V: ToString>(mut self, key: K, value: Option<V>) -> Self {
        if let Some(v) = value {
            self.params.push((key.into(), v.to_string()));
        }
        self
    }

    pub fn to_query_string(&self) -> String {
        if self.params.is_empty() {
            String::new()
        } else {
            format!(
                "?{}",
                self.params
                    .iter()
                    .map(|(k, v)| format!("{}={}", k, urlencoding::encode(v)))
                    .collect::<Vec<_>>()
                    .join("&")
            )
        }
    }
}
