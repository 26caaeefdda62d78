//! IPAM models: RIRs, ASNs, aggregates, VRFs, VLANs, prefixes, IP ranges
//! and IP addresses

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

use super::common::{netbox_model, nullable, Choice, CommonFields, Endpoint, NestedRef, NestedTag};

pub const RIRS: Endpoint = Endpoint::new("ipam", "rirs", "RIR");
pub const ASNS: Endpoint = Endpoint::new("ipam", "asns", "ASN")
    .without_slug()
    .with_name_field("asn");
pub const AGGREGATES: Endpoint = Endpoint::new("ipam", "aggregates", "Aggregate")
    .without_slug()
    .with_name_field("prefix");
pub const VRFS: Endpoint = Endpoint::new("ipam", "vrfs", "VRF").without_slug();
pub const ROLES: Endpoint = Endpoint::new("ipam", "roles", "Role");
pub const VLAN_GROUPS: Endpoint = Endpoint::new("ipam", "vlan-groups", "VLAN Group");
pub const VLANS: Endpoint = Endpoint::new("ipam", "vlans", "VLAN").without_slug();
pub const PREFIXES: Endpoint = Endpoint::new("ipam", "prefixes", "Prefix")
    .without_slug()
    .with_name_field("prefix");
pub const IP_RANGES: Endpoint = Endpoint::new("ipam", "ip-ranges", "IP Range")
    .without_slug()
    .with_name_field("start_address");
pub const IP_ADDRESSES: Endpoint = Endpoint::new("ipam", "ip-addresses", "IP Address")
    .without_slug()
    .with_name_field("address");

#[derive(Debug, Clone, Deserialize)]
pub struct Rir {
    pub id: i64,
    #[serde(default)]
    pub display: String,
    pub name: String,
    pub slug: String,
    #[serde(default)]
    pub is_private: Option<bool>,
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
pub struct RirRequest {
    pub name: String,
    pub slug: String,
    pub is_private: bool,
    #[serde(flatten)]
    pub common: CommonFields,
}

#[derive(Debug, Clone, Deserialize)]
pub struct Asn {
    pub id: i64,
    #[serde(default)]
    pub display: String,
    pub asn: i64,
    #[serde(default)]
    pub rir: Option<NestedRef>,
    #[serde(default)]
    pub tenant: Option<NestedRef>,
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
pub struct AsnRequest {
    pub asn: i64,
    pub rir: i64,
    pub tenant: Option<i64>,
    #[serde(flatten)]
    pub common: CommonFields,
}

#[derive(Debug, Clone, Deserialize)]
pub struct Aggregate {
    pub id: i64,
    #[serde(default)]
    pub display: String,
    pub prefix: String,
    pub rir: NestedRef,
    #[serde(default)]
    pub tenant: Option<NestedRef>,
    #[serde(default)]
    pub date_added: Option<String>,
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
pub struct AggregateRequest {
    pub prefix: String,
    pub rir: i64,
    pub tenant: Option<i64>,
    pub date_added: Option<String>,
    #[serde(flatten)]
    pub common: CommonFields,
}

#[derive(Debug, Clone, Deserialize)]
pub struct Vrf {
    pub id: i64,
    #[serde(default)]
    pub display: String,
    pub name: String,
    #[serde(default)]
    pub rd: Option<String>,
    #[serde(default)]
    pub tenant: Option<NestedRef>,
    #[serde(default)]
    pub enforce_unique: Option<bool>,
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
pub struct VrfRequest {
    pub name: String,
    pub rd: Option<String>,
    pub tenant: Option<i64>,
    pub enforce_unique: bool,
    #[serde(flatten)]
    pub common: CommonFields,
}

#[derive(Debug, Clone, Deserialize)]
pub struct Role {
    pub id: i64,
    #[serde(default)]
    pub display: String,
    pub name: String,
    pub slug: String,
    #[serde(default)]
    pub weight: Option<i64>,
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
pub struct RoleRequest {
    pub name: String,
    pub slug: String,
    pub weight: i64,
    #[serde(flatten)]
    pub common: CommonFields,
}

#[derive(Debug, Clone, Deserialize)]
pub struct VlanGroup {
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
pub struct VlanGroupRequest {
    pub name: String,
    pub slug: String,
    #[serde(flatten)]
    pub common: CommonFields,
}

#[derive(Debug, Clone, Deserialize)]
pub struct Vlan {
    pub id: i64,
    #[serde(default)]
    pub display: String,
    pub vid: i64,
    pub name: String,
    #[serde(default)]
    pub site: Option<NestedRef>,
    #[serde(default)]
    pub group: Option<NestedRef>,
    #[serde(default)]
    pub tenant: Option<NestedRef>,
    #[serde(default)]
    pub status: Option<Choice>,
    #[serde(default)]
    pub role: Option<NestedRef>,
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
pub struct VlanRequest {
    pub vid: i64,
    pub name: String,
    pub site: Option<i64>,
    pub group: Option<i64>,
    pub tenant: Option<i64>,
    pub status: String,
    pub role: Option<i64>,
    #[serde(flatten)]
    pub common: CommonFields,
}

#[derive(Debug, Clone, Deserialize)]
pub struct Prefix {
    pub id: i64,
    #[serde(default)]
    pub display: String,
    pub prefix: String,
    #[serde(default)]
    pub site: Option<NestedRef>,
    #[serde(default)]
    pub vrf: Option<NestedRef>,
    #[serde(default)]
    pub tenant: Option<NestedRef>,
    #[serde(default)]
    pub vlan: Option<NestedRef>,
    #[serde(default)]
    pub status: Option<Choice>,
    #[serde(default)]
    pub role: Option<NestedRef>,
    #[serde(default)]
    pub is_pool: Option<bool>,
    #[serde(default)]
    pub mark_utilized: Option<bool>,
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
pub struct PrefixRequest {
    pub prefix: String,
    pub site: Option<i64>,
    pub vrf: Option<i64>,
    pub tenant: Option<i64>,
    pub vlan: Option<i64>,
    pub status: String,
    pub role: Option<i64>,
    pub is_pool: bool,
    pub mark_utilized: bool,
    #[serde(flatten)]
    pub common: CommonFields,
}

#[derive(Debug, Clone, Deserialize)]
pub struct IpAddress {
    pub id: i64,
    #[serde(default)]
    pub display: String,
    pub address: String,
    #[serde(default)]
    pub vrf: Option<NestedRef>,
    #[serde(default)]
    pub tenant: Option<NestedRef>,
    #[serde(default)]
    pub status: Option<Choice>,
    #[serde(default)]
    pub role: Option<Choice>,
    #[serde(default)]
    pub dns_name: Option<String>,
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
pub struct IpAddressRequest {
    pub address: String,
    pub vrf: Option<i64>,
    pub tenant: Option<i64>,
    pub status: String,
    pub role: String,
    pub dns_name: String,
    #[serde(flatten)]
    pub common: CommonFields,
}

#[derive(Debug, Clone, Deserialize)]
pub struct IpRange {
    pub id: i64,
    #[serde(default)]
    pub display: String,
    pub start_address: String,
    pub end_address: String,
    #[serde(default)]
    pub size: Option<i64>,
    #[serde(default)]
    pub vrf: Option<NestedRef>,
    #[serde(default)]
    pub tenant: Option<NestedRef>,
    #[serde(default)]
    pub status: Option<Choice>,
    #[serde(default)]
    pub role: Option<NestedRef>,
    #[serde(default)]
    pub mark_utilized: Option<bool>,
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
pub struct IpRangeRequest {
    pub start_address: String,
    pub end_address: String,
    pub vrf: Option<i64>,
    pub tenant: Option<i64>,
    pub status: String,
    pub role: Option<i64>,
    pub mark_utilized: bool,
    #[serde(flatten)]
    pub common: CommonFields,
}

netbox_model!(
    Rir,
    Asn,
    Aggregate,
    Vrf,
    Role,
    VlanGroup,
    Vlan,
    Prefix,
    IpRange,
    IpAddress,
);
