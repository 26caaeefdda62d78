//! Extras models: tags

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

use super::common::{netbox_model, nullable, Endpoint, NestedTag};

pub const TAGS: Endpoint = Endpoint::new("extras", "tags", "Tag");

#[derive(Debug, Clone, Deserialize)]
pub struct Tag {
    pub id: i64,
    #[serde(default)]
    pub display: String,
    pub name: String,
    pub slug: String,
    #[serde(default)]
    pub color: Option<String>,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default)]
    pub tagged_items: Option<i64>,
    // never populated for tags themselves
    #[serde(default)]
    pub comments: Option<String>,
    #[serde(default)]
    pub tags: Vec<NestedTag>,
    #[serde(default, deserialize_with = "nullable")]
    pub custom_fields: Map<String, Value>,
}

#[derive(Debug, Clone, Serialize)]
pub struct TagRequest {
    pub name: String,
    pub slug: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub color: Option<String>,
    pub description: String,
}

netbox_model!(Tag);
