//! VPN models: tunnel groups and tunnels

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

use super::common::{netbox_model, nullable, Choice, CommonFields, Endpoint, NestedRef, NestedTag};

pub const TUNNEL_GROUPS: Endpoint = Endpoint::new("vpn", "tunnel-groups", "Tunnel Group");
pub const TUNNELS: Endpoint = Endpoint::new("vpn", "tunnels", "Tunnel").without_slug();

#[derive(Debug, Clone, Deserialize)]
pub struct TunnelGroup {
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
pub struct TunnelGroupRequest {
    pub name: String,
    pub slug: String,
    #[serde(flatten)]
    pub common: CommonFields,
}

#[derive(Debug, Clone, Deserialize)]
pub struct Tunnel {
    pub id: i64,
    #[serde(default)]
    pub display: String,
    pub name: String,
    #[serde(default)]
    pub status: Option<Choice>,
    #[serde(default)]
    pub group: Option<NestedRef>,
    #[serde(default)]
    pub encapsulation: Option<Choice>,
    #[serde(default)]
    pub tenant: Option<NestedRef>,
    #[serde(default)]
    pub tunnel_id: Option<i64>,
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
pub struct TunnelRequest {
    pub name: String,
    pub status: String,
    pub group: Option<i64>,
    pub encapsulation: String,
    pub tenant: Option<i64>,
    pub tunnel_id: Option<i64>,
    #[serde(flatten)]
    pub common: CommonFields,
}

netbox_model!(TunnelGroup, Tunnel);
