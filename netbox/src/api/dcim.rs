//! DCIM models: sites and their hierarchy, racks, device types, devices,
//! modules, interfaces and cables

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

use super::common::{netbox_model, nullable, Choice, CommonFields, Endpoint, NestedRef, NestedTag};

pub const REGIONS: Endpoint = Endpoint::new("dcim", "regions", "Region");
pub const SITE_GROUPS: Endpoint = Endpoint::new("dcim", "site-groups", "Site Group");
pub const SITES: Endpoint = Endpoint::new("dcim", "sites", "Site");
pub const LOCATIONS: Endpoint = Endpoint::new("dcim", "locations", "Location");
pub const MANUFACTURERS: Endpoint = Endpoint::new("dcim", "manufacturers", "Manufacturer");
pub const PLATFORMS: Endpoint = Endpoint::new("dcim", "platforms", "Platform");
pub const DEVICE_ROLES: Endpoint = Endpoint::new("dcim", "device-roles", "Device Role");
pub const DEVICE_TYPES: Endpoint =
    Endpoint::new("dcim", "device-types", "Device Type").with_name_field("model");
pub const RACK_ROLES: Endpoint = Endpoint::new("dcim", "rack-roles", "Rack Role");
pub const RACKS: Endpoint = Endpoint::new("dcim", "racks", "Rack").without_slug();
pub const DEVICES: Endpoint = Endpoint::new("dcim", "devices", "Device").without_slug();
pub const MODULE_TYPES: Endpoint = Endpoint::new("dcim", "module-types", "Module Type")
    .without_slug()
    .with_name_field("model");
pub const MODULE_BAYS: Endpoint = Endpoint::new("dcim", "module-bays", "Module Bay").without_slug();
pub const MODULES: Endpoint = Endpoint::new("dcim", "modules", "Module").without_slug();
pub const INTERFACES: Endpoint = Endpoint::new("dcim", "interfaces", "Interface").without_slug();
pub const CABLES: Endpoint = Endpoint::new("dcim", "cables", "Cable")
    .without_slug()
    .with_name_field("label");

#[derive(Debug, Clone, Deserialize)]
pub struct Region {
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
pub struct RegionRequest {
    pub name: String,
    pub slug: String,
    pub parent: Option<i64>,
    #[serde(flatten)]
    pub common: CommonFields,
}

#[derive(Debug, Clone, Deserialize)]
pub struct SiteGroup {
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
pub struct SiteGroupRequest {
    pub name: String,
    pub slug: String,
    pub parent: Option<i64>,
    #[serde(flatten)]
    pub common: CommonFields,
}

#[derive(Debug, Clone, Deserialize)]
pub struct Site {
    pub id: i64,
    #[serde(default)]
    pub display: String,
    pub name: String,
    pub slug: String,
    #[serde(default)]
    pub status: Option<Choice>,
    #[serde(default)]
    pub region: Option<NestedRef>,
    #[serde(default)]
    pub group: Option<NestedRef>,
    #[serde(default)]
    pub tenant: Option<NestedRef>,
    #[serde(default)]
    pub facility: Option<String>,
    #[serde(default)]
    pub time_zone: Option<String>,
    #[serde(default)]
    pub physical_address: Option<String>,
    #[serde(default)]
    pub shipping_address: Option<String>,
    #[serde(default)]
    pub latitude: Option<f64>,
    #[serde(default)]
    pub longitude: Option<f64>,
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
pub struct SiteRequest {
    pub name: String,
    pub slug: String,
    pub status: String,
    pub region: Option<i64>,
    pub group: Option<i64>,
    pub tenant: Option<i64>,
    pub facility: String,
    pub time_zone: Option<String>,
    pub physical_address: String,
    pub shipping_address: String,
    pub latitude: Option<f64>,
    pub longitude: Option<f64>,
    #[serde(flatten)]
    pub common: CommonFields,
}

#[derive(Debug, Clone, Deserialize)]
pub struct Location {
    pub id: i64,
    #[serde(default)]
    pub display: String,
    pub name: String,
    pub slug: String,
    pub site: NestedRef,
    #[serde(default)]
    pub parent: Option<NestedRef>,
    #[serde(default)]
    pub status: Option<Choice>,
    #[serde(default)]
    pub tenant: Option<NestedRef>,
    #[serde(default)]
    pub facility: Option<String>,
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
pub struct LocationRequest {
    pub name: String,
    pub slug: String,
    pub site: i64,
    pub parent: Option<i64>,
    pub status: String,
    pub tenant: Option<i64>,
    pub facility: String,
    #[serde(flatten)]
    pub common: CommonFields,
}

#[derive(Debug, Clone, Deserialize)]
pub struct Manufacturer {
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
pub struct ManufacturerRequest {
    pub name: String,
    pub slug: String,
    #[serde(flatten)]
    pub common: CommonFields,
}

#[derive(Debug, Clone, Deserialize)]
pub struct Platform {
    pub id: i64,
    #[serde(default)]
    pub display: String,
    pub name: String,
    pub slug: String,
    #[serde(default)]
    pub manufacturer: Option<NestedRef>,
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
pub struct PlatformRequest {
    pub name: String,
    pub slug: String,
    pub manufacturer: Option<i64>,
    #[serde(flatten)]
    pub common: CommonFields,
}

#[derive(Debug, Clone, Deserialize)]
pub struct DeviceRole {
    pub id: i64,
    #[serde(default)]
    pub display: String,
    pub name: String,
    pub slug: String,
    #[serde(default)]
    pub color: Option<String>,
    #[serde(default)]
    pub vm_role: Option<bool>,
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
pub struct DeviceRoleRequest {
    pub name: String,
    pub slug: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub color: Option<String>,
    pub vm_role: bool,
    #[serde(flatten)]
    pub common: CommonFields,
}

#[derive(Debug, Clone, Deserialize)]
pub struct DeviceType {
    pub id: i64,
    #[serde(default)]
    pub display: String,
    pub manufacturer: NestedRef,
    pub model: String,
    pub slug: String,
    #[serde(default)]
    pub part_number: Option<String>,
    #[serde(default)]
    pub u_height: Option<f64>,
    #[serde(default)]
    pub is_full_depth: Option<bool>,
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
pub struct DeviceTypeRequest {
    pub manufacturer: i64,
    pub model: String,
    pub slug: String,
    pub part_number: String,
    pub u_height: f64,
    pub is_full_depth: bool,
    #[serde(flatten)]
    pub common: CommonFields,
}

#[derive(Debug, Clone, Deserialize)]
pub struct RackRole {
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
pub struct RackRoleRequest {
    pub name: String,
    pub slug: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub color: Option<String>,
    #[serde(flatten)]
    pub common: CommonFields,
}

#[derive(Debug, Clone, Deserialize)]
pub struct Rack {
    pub id: i64,
    #[serde(default)]
    pub display: String,
    pub name: String,
    pub site: NestedRef,
    #[serde(default)]
    pub location: Option<NestedRef>,
    #[serde(default)]
    pub tenant: Option<NestedRef>,
    #[serde(default)]
    pub status: Option<Choice>,
    #[serde(default)]
    pub role: Option<NestedRef>,
    #[serde(default)]
    pub serial: Option<String>,
    #[serde(default)]
    pub asset_tag: Option<String>,
    #[serde(default)]
    pub u_height: Option<f64>,
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
pub struct RackRequest {
    pub name: String,
    pub site: i64,
    pub location: Option<i64>,
    pub tenant: Option<i64>,
    pub status: String,
    pub role: Option<i64>,
    pub serial: String,
    pub asset_tag: Option<String>,
    pub u_height: f64,
    #[serde(flatten)]
    pub common: CommonFields,
}

#[derive(Debug, Clone, Deserialize)]
pub struct Device {
    pub id: i64,
    #[serde(default)]
    pub display: String,
    #[serde(default)]
    pub name: Option<String>,
    pub device_type: NestedRef,
    pub role: NestedRef,
    pub site: NestedRef,
    #[serde(default)]
    pub location: Option<NestedRef>,
    #[serde(default)]
    pub rack: Option<NestedRef>,
    #[serde(default)]
    pub tenant: Option<NestedRef>,
    #[serde(default)]
    pub platform: Option<NestedRef>,
    #[serde(default)]
    pub serial: Option<String>,
    #[serde(default)]
    pub asset_tag: Option<String>,
    #[serde(default)]
    pub status: Option<Choice>,
    #[serde(default)]
    pub position: Option<f64>,
    #[serde(default)]
    pub face: Option<Choice>,
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
pub struct DeviceRequest {
    pub name: String,
    pub device_type: i64,
    pub role: i64,
    pub site: i64,
    pub location: Option<i64>,
    pub rack: Option<i64>,
    pub tenant: Option<i64>,
    pub platform: Option<i64>,
    pub serial: String,
    pub asset_tag: Option<String>,
    pub status: String,
    pub position: Option<f64>,
    pub face: String,
    #[serde(flatten)]
    pub common: CommonFields,
}

#[derive(Debug, Clone, Deserialize)]
pub struct ModuleType {
    pub id: i64,
    #[serde(default)]
    pub display: String,
    pub manufacturer: NestedRef,
    pub model: String,
    #[serde(default)]
    pub part_number: Option<String>,
    #[serde(default)]
    pub airflow: Option<Choice>,
    #[serde(default)]
    pub weight: Option<f64>,
    #[serde(default)]
    pub weight_unit: Option<Choice>,
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
pub struct ModuleTypeRequest {
    pub manufacturer: i64,
    pub model: String,
    pub part_number: String,
    pub airflow: Option<String>,
    pub weight: Option<f64>,
    pub weight_unit: Option<String>,
    #[serde(flatten)]
    pub common: CommonFields,
}

#[derive(Debug, Clone, Deserialize)]
pub struct ModuleBay {
    pub id: i64,
    #[serde(default)]
    pub display: String,
    pub device: NestedRef,
    pub name: String,
    #[serde(default)]
    pub label: Option<String>,
    #[serde(default)]
    pub position: Option<String>,
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
pub struct ModuleBayRequest {
    pub device: i64,
    pub name: String,
    pub label: String,
    pub position: String,
    #[serde(flatten)]
    pub common: CommonFields,
}

#[derive(Debug, Clone, Deserialize)]
pub struct Module {
    pub id: i64,
    #[serde(default)]
    pub display: String,
    pub device: NestedRef,
    pub module_bay: NestedRef,
    pub module_type: NestedRef,
    #[serde(default)]
    pub status: Option<Choice>,
    #[serde(default)]
    pub serial: Option<String>,
    #[serde(default)]
    pub asset_tag: Option<String>,
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
pub struct ModuleRequest {
    pub device: i64,
    pub module_bay: i64,
    pub module_type: i64,
    pub status: String,
    pub serial: String,
    pub asset_tag: Option<String>,
    #[serde(flatten)]
    pub common: CommonFields,
}

#[derive(Debug, Clone, Deserialize)]
pub struct Interface {
    pub id: i64,
    #[serde(default)]
    pub display: String,
    pub device: NestedRef,
    pub name: String,
    #[serde(default)]
    pub label: Option<String>,
    #[serde(rename = "type")]
    pub interface_type: Choice,
    #[serde(default)]
    pub enabled: Option<bool>,
    #[serde(default)]
    pub parent: Option<NestedRef>,
    #[serde(default)]
    pub bridge: Option<NestedRef>,
    #[serde(default)]
    pub lag: Option<NestedRef>,
    #[serde(default)]
    pub mtu: Option<i64>,
    #[serde(default)]
    pub mac_address: Option<String>,
    #[serde(default)]
    pub speed: Option<i64>,
    #[serde(default)]
    pub duplex: Option<Choice>,
    #[serde(default)]
    pub wwn: Option<String>,
    #[serde(default)]
    pub mgmt_only: Option<bool>,
    #[serde(default)]
    pub mode: Option<Choice>,
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
pub struct InterfaceRequest {
    pub device: i64,
    pub name: String,
    pub label: String,
    #[serde(rename = "type")]
    pub interface_type: String,
    pub enabled: bool,
    pub parent: Option<i64>,
    pub bridge: Option<i64>,
    pub lag: Option<i64>,
    pub mtu: Option<i64>,
    pub mac_address: Option<String>,
    pub speed: Option<i64>,
    pub duplex: Option<String>,
    pub wwn: Option<String>,
    pub mgmt_only: bool,
    pub mode: Option<String>,
    pub mark_connected: bool,
    #[serde(flatten)]
    pub common: CommonFields,
}

/// One end of a cable, e.g. `{"object_type": "dcim.interface", "object_id": 12}`
#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
pub struct CableTermination {
    pub object_type: String,
    pub object_id: i64,
}

#[derive(Debug, Clone, Deserialize)]
pub struct Cable {
    pub id: i64,
    #[serde(default)]
    pub display: String,
    #[serde(default)]
    pub a_terminations: Vec<CableTermination>,
    #[serde(default)]
    pub b_terminations: Vec<CableTermination>,
    /// Plain string in the API, empty when unset
    #[serde(rename = "type", default)]
    pub cable_type: Option<String>,
    #[serde(default)]
    pub status: Option<Choice>,
    #[serde(default)]
    pub tenant: Option<NestedRef>,
    #[serde(default)]
    pub label: Option<String>,
    #[serde(default)]
    pub color: Option<String>,
    #[serde(default)]
    pub length: Option<f64>,
    #[serde(default)]
    pub length_unit: Option<Choice>,
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
pub struct CableRequest {
    pub a_terminations: Vec<CableTermination>,
    pub b_terminations: Vec<CableTermination>,
    #[serde(rename = "type")]
    pub cable_type: String,
    pub status: String,
    pub tenant: Option<i64>,
    pub label: String,
    pub color: String,
    pub length: Option<f64>,
    pub length_unit: Option<String>,
    #[serde(flatten)]
    pub common: CommonFields,
}

netbox_model!(
    Region,
    SiteGroup,
    Site,
    Location,
    Manufacturer,
    Platform,
    DeviceRole,
    DeviceType,
    RackRole,
    Rack,
    Device,
    ModuleType,
    ModuleBay,
    Module,
    Interface,
    Cable,
);
