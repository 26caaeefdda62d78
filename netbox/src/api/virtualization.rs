//! Virtualization models: clusters, virtual machines and their interfaces
//! and disks

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

use super::common::{netbox_model, nullable, Choice, CommonFields, Endpoint, NestedRef, NestedTag};

pub const CLUSTER_TYPES: Endpoint =
    Endpoint::new("virtualization", "cluster-types", "Cluster Type");
pub const CLUSTER_GROUPS: Endpoint =
    Endpoint::new("virtualization", "cluster-groups", "Cluster Group");
pub const CLUSTERS: Endpoint = Endpoint::new("virtualization", "clusters", "Cluster").without_slug();
pub const VIRTUAL_MACHINES: Endpoint =
    Endpoint::new("virtualization", "virtual-machines", "Virtual Machine").without_slug();
pub const VM_INTERFACES: Endpoint =
    Endpoint::new("virtualization", "interfaces", "VM Interface").without_slug();
pub const VIRTUAL_DISKS: Endpoint =
    Endpoint::new("virtualization", "virtual-disks", "Virtual Disk").without_slug();

#[derive(Debug, Clone, Deserialize)]
pub struct ClusterType {
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
pub struct ClusterTypeRequest {
    pub name: String,
    pub slug: String,
    #[serde(flatten)]
    pub common: CommonFields,
}

#[derive(Debug, Clone, Deserialize)]
pub struct ClusterGroup {
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
pub struct ClusterGroupRequest {
    pub name: String,
    pub slug: String,
    #[serde(flatten)]
    pub common: CommonFields,
}

#[derive(Debug, Clone, Deserialize)]
pub struct Cluster {
    pub id: i64,
    #[serde(default)]
    pub display: String,
    pub name: String,
    #[serde(rename = "type")]
    pub cluster_type: NestedRef,
    #[serde(default)]
    pub group: Option<NestedRef>,
    #[serde(default)]
    pub status: Option<Choice>,
    #[serde(default)]
    pub tenant: Option<NestedRef>,
    #[serde(default)]
    pub site: Option<NestedRef>,
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
pub struct ClusterRequest {
    pub name: String,
    #[serde(rename = "type")]
    pub cluster_type: i64,
    pub group: Option<i64>,
    pub status: String,
    pub tenant: Option<i64>,
    pub site: Option<i64>,
    #[serde(flatten)]
    pub common: CommonFields,
}

#[derive(Debug, Clone, Deserialize)]
pub struct VirtualMachine {
    pub id: i64,
    #[serde(default)]
    pub display: String,
    pub name: String,
    #[serde(default)]
    pub status: Option<Choice>,
    #[serde(default)]
    pub site: Option<NestedRef>,
    #[serde(default)]
    pub cluster: Option<NestedRef>,
    #[serde(default)]
    pub role: Option<NestedRef>,
    #[serde(default)]
    pub tenant: Option<NestedRef>,
    #[serde(default)]
    pub platform: Option<NestedRef>,
    #[serde(default)]
    pub vcpus: Option<f64>,
    #[serde(default)]
    pub memory: Option<i64>,
    #[serde(default)]
    pub disk: Option<i64>,
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
pub struct VirtualMachineRequest {
    pub name: String,
    pub status: String,
    pub site: Option<i64>,
    pub cluster: Option<i64>,
    pub role: Option<i64>,
    pub tenant: Option<i64>,
    pub platform: Option<i64>,
    pub vcpus: Option<f64>,
    pub memory: Option<i64>,
    pub disk: Option<i64>,
    #[serde(flatten)]
    pub common: CommonFields,
}

#[derive(Debug, Clone, Deserialize)]
pub struct VmInterface {
    pub id: i64,
    #[serde(default)]
    pub display: String,
    pub virtual_machine: NestedRef,
    pub name: String,
    #[serde(default)]
    pub enabled: Option<bool>,
    #[serde(default)]
    pub parent: Option<NestedRef>,
    #[serde(default)]
    pub bridge: Option<NestedRef>,
    #[serde(default)]
    pub mtu: Option<i64>,
    #[serde(default)]
    pub mac_address: Option<String>,
    #[serde(default)]
    pub mode: Option<Choice>,
    #[serde(default)]
    pub untagged_vlan: Option<NestedRef>,
    #[serde(default)]
    pub tagged_vlans: Vec<NestedRef>,
    #[serde(default)]
    pub vrf: Option<NestedRef>,
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
pub struct VmInterfaceRequest {
    pub virtual_machine: i64,
    pub name: String,
    pub enabled: bool,
    pub parent: Option<i64>,
    pub bridge: Option<i64>,
    pub mtu: Option<i64>,
    pub mac_address: Option<String>,
    pub mode: Option<String>,
    pub untagged_vlan: Option<i64>,
    pub tagged_vlans: Vec<i64>,
    pub vrf: Option<i64>,
    #[serde(flatten)]
    pub common: CommonFields,
}

#[derive(Debug, Clone, Deserialize)]
pub struct VirtualDisk {
    pub id: i64,
    #[serde(default)]
    pub display: String,
    pub virtual_machine: NestedRef,
    pub name: String,
    pub size: i64,
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
pub struct VirtualDiskRequest {
    pub virtual_machine: i64,
    pub name: String,
    pub size: i64,
    #[serde(flatten)]
    pub common: CommonFields,
}

netbox_model!(
    ClusterType,
    ClusterGroup,
    Cluster,
    VirtualMachine,
    VmInterface,
    VirtualDisk,
);
