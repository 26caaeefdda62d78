//! Wireless models: wireless LAN groups and wireless LANs

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

use super::common::{netbox_model, nullable, Choice, CommonFields, Endpoint, NestedRef, NestedTag};

pub const WIRELESS_LAN_GROUPS: Endpoint =
    Endpoint::new("wireless", "wireless-lan-groups", "Wireless LAN Group");
pub const WIRELESS_LANS: Endpoint =
    Endpoint::new("wireless", "wireless-lans", "Wireless LAN").without_slug();

#[derive(Debug, Clone, Deserialize)]
pub struct WirelessLanGroup {
    pub id: i64,
    #[serde(default)]
    pub display: String,
    pub name: String,
    pub slug: String,
    #[serde(default)]
    pub parent: Option<NestedRef>,
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
pub struct WirelessLanGroupRequest {
    pub name: String,
    pub slug: String,
    pub parent: Option<i64>,
    #[serde(flatten)]
    pub common: CommonFields,
}

#[derive(Debug, Clone, Deserialize)]
pub struct WirelessLan {
    pub id: i64,
    #[serde(default)]
    pub display: String,
    pub ssid: String,
    #[serde(default)]
    pub group: Option<NestedRef>,
    #[serde(default)]
    pub status: Option<Choice>,
    #[serde(default)]
    pub vlan: Option<NestedRef>,
    #[serde(default)]
    pub tenant: Option<NestedRef>,
    #[serde(default)]
    pub auth_type: Option<Choice>,
    #[serde(default)]
    pub auth_cipher: Option<Choice>,
    #[serde(default)]
    pub auth_psk: Option<String>,
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
pub struct WirelessLanRequest {
    pub ssid: String,
    pub group: Option<i64>,
    pub status: String,
    pub vlan: Option<i64>,
    pub tenant: Option<i64>,
    pub auth_type: String,
    pub auth_cipher: String,
    pub auth_psk: String,
    #[serde(flatten)]
    pub common: CommonFields,
}

netbox_model!(WirelessLanGroup, WirelessLan);
