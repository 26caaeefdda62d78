//! Circuit models: providers, circuit types, circuits and their terminations

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

use super::common::{netbox_model, nullable, Choice, CommonFields, Endpoint, NestedRef, NestedTag};

pub const PROVIDERS: Endpoint = Endpoint::new("circuits", "providers", "Provider");
pub const CIRCUIT_TYPES: Endpoint = Endpoint::new("circuits", "circuit-types", "Circuit Type");
pub const CIRCUITS: Endpoint = Endpoint::new("circuits", "circuits", "Circuit")
    .without_slug()
    .with_name_field("cid");
pub const CIRCUIT_TERMINATIONS: Endpoint =
    Endpoint::new("circuits", "circuit-terminations", "Circuit Termination")
        .without_slug()
        .with_name_field("xconnect_id");
pub const PROVIDER_NETWORKS: Endpoint =
    Endpoint::new("circuits", "provider-networks", "Provider Network").without_slug();

#[derive(Debug, Clone, Deserialize)]
pub struct Provider {
    pub id: i64,
    #[serde(default)]
    pub display: String,
    pub name: String,
    pub slug: String,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default)]
    pub comments: Option<String>,
    #[serde(default)]
    pub tags: Vec<NestedTag>,
    #[serde(default, deserialize_with = "nullable")]
    pub custom_fields: Map<String, Value>,
}

#[derive(Debug, Clone, Serialize)]
pub struct ProviderRequest {
    pub name: String,
    pub slug: String,
    #[serde(flatten)]
    pub common: CommonFields,
}

#[derive(Debug, Clone, Deserialize)]
pub struct CircuitType {
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
    pub comments: Option<String>,
    #[serde(default)]
    pub tags: Vec<NestedTag>,
    #[serde(default, deserialize_with = "nullable")]
    pub custom_fields: Map<String, Value>,
}

#[derive(Debug, Clone, Serialize)]
pub struct CircuitTypeRequest {
    pub name: String,
    pub slug: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub color: Option<String>,
    #[serde(flatten)]
    pub common: CommonFields,
}

#[derive(Debug, Clone, Deserialize)]
pub struct Circuit {
    pub id: i64,
    #[serde(default)]
    pub display: String,
    pub cid: String,
    pub provider: NestedRef,
    #[serde(rename = "type")]
    pub circuit_type: NestedRef,
    #[serde(default)]
    pub status: Option<Choice>,
    #[serde(default)]
    pub tenant: Option<NestedRef>,
    #[serde(default)]
    pub install_date: Option<String>,
    #[serde(default)]
    pub termination_date: Option<String>,
    #[serde(default)]
    pub commit_rate: Option<i64>,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default)]
    pub comments: Option<String>,
    #[serde(default)]
    pub tags: Vec<NestedTag>,
    #[serde(default, deserialize_with = "nullable")]
    pub custom_fields: Map<String, Value>,
}

#[derive(Debug, Clone, Serialize)]
pub struct CircuitRequest {
    pub cid: String,
    pub provider: i64,
    #[serde(rename = "type")]
    pub circuit_type: i64,
    pub status: String,
    pub tenant: Option<i64>,
    pub install_date: Option<String>,
    pub termination_date: Option<String>,
    pub commit_rate: Option<i64>,
    #[serde(flatten)]
    pub common: CommonFields,
}

#[derive(Debug, Clone, Deserialize)]
pub struct CircuitTermination {
    pub id: i64,
    #[serde(default)]
    pub display: String,
    pub circuit: NestedRef,
    /// `A` or `Z`
    pub term_side: String,
    #[serde(default)]
    pub site: Option<NestedRef>,
    #[serde(default)]
    pub provider_network: Option<NestedRef>,
    #[serde(default)]
    pub port_speed: Option<i64>,
    #[serde(default)]
    pub upstream_speed: Option<i64>,
    #[serde(default)]
    pub xconnect_id: Option<String>,
    #[serde(default)]
    pub pp_info: Option<String>,
    #[serde(default)]
    pub mark_connected: Option<bool>,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default)]
    pub comments: Option<String>,
    #[serde(default)]
    pub tags: Vec<NestedTag>,
    #[serde(default, deserialize_with = "nullable")]
    pub custom_fields: Map<String, Value>,
}

#[derive(Debug, Clone, Serialize)]
pub struct CircuitTerminationRequest {
    pub circuit: i64,
    pub term_side: String,
    pub site: Option<i64>,
    pub provider_network: Option<i64>,
    pub port_speed: Option<i64>,
    pub upstream_speed: Option<i64>,
    pub xconnect_id: String,
    pub pp_info: String,
    pub mark_connected: bool,
    #[serde(flatten)]
    pub common: CommonFields,
}

netbox_model!(Provider, CircuitType, Circuit, CircuitTermination);
