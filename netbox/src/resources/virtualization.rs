//! Virtualization resources: clusters, virtual machines and their interfaces
//! and disks

use async_trait::async_trait;
use tfplug::schema::Attribute;
use tfplug::types::{AttributePath, Diagnostic, DynamicValue};

use super::attributes;
use super::dcim::INTERFACE_MODES;
use super::NetBoxObject;
use crate::api::common::CommonFields;
use crate::api::dcim::{DEVICE_ROLES, PLATFORMS, SITES};
use crate::api::ipam::{VLANS, VRFS};
use crate::api::tenancy::TENANTS;
use crate::api::virtualization::{
    self as api, CLUSTERS, CLUSTER_GROUPS, CLUSTER_TYPES, VIRTUAL_DISKS, VIRTUAL_MACHINES,
    VM_INTERFACES,
};
use crate::api::Endpoint;
use crate::state::{PlanReader, StateBuilder};

const CLUSTER_STATUSES: &[&str] = &["planned", "staging", "active", "decommissioning", "offline"];
const VM_STATUSES: &[&str] = &[
    "offline",
    "active",
    "planned",
    "staged",
    "failed",
    "decommissioning",
];

pub struct ClusterType;

#[async_trait]
impl NetBoxObject for ClusterType {
    type Model = api::ClusterType;
    type Request = api::ClusterTypeRequest;

    const TYPE_NAME: &'static str = "netbox_cluster_type";
    const ENDPOINT: Endpoint = CLUSTER_TYPES;
    const DESCRIPTION: &'static str = "Manages a cluster type, e.g. VMware vSphere or Proxmox";
    const HAS_COMMENTS: bool = false;

    fn attributes() -> Vec<Attribute> {
        vec![
            attributes::name("Name of the cluster type"),
            attributes::slug("URL-friendly unique identifier"),
        ]
    }

    async fn request(plan: &mut PlanReader<'_>, common: CommonFields) -> Self::Request {
        api::ClusterTypeRequest {
            name: plan.string("name"),
            slug: plan.string("slug"),
            common,
        }
    }

    fn state(model: &Self::Model, state: &mut StateBuilder<'_>) {
        state.string("name", &model.name).string("slug", &model.slug);
    }
}

pub struct ClusterGroup;

#[async_trait]
impl NetBoxObject for ClusterGroup {
    type Model = api::ClusterGroup;
    type Request = api::ClusterGroupRequest;

    const TYPE_NAME: &'static str = "netbox_cluster_group";
    const ENDPOINT: Endpoint = CLUSTER_GROUPS;
    const DESCRIPTION: &'static str = "Manages a cluster group";
    const HAS_COMMENTS: bool = false;

    fn attributes() -> Vec<Attribute> {
        vec![
            attributes::name("Name of the cluster group"),
            attributes::slug("URL-friendly unique identifier"),
        ]
    }

    async fn request(plan: &mut PlanReader<'_>, common: CommonFields) -> Self::Request {
        api::ClusterGroupRequest {
            name: plan.string("name"),
            slug: plan.string("slug"),
            common,
        }
    }

    fn state(model: &Self::Model, state: &mut StateBuilder<'_>) {
        state.string("name", &model.name).string("slug", &model.slug);
    }
}

pub struct Cluster;

#[async_trait]
impl NetBoxObject for Cluster {
    type Model = api::Cluster;
    type Request = api::ClusterRequest;

    const TYPE_NAME: &'static str = "netbox_cluster";
    const ENDPOINT: Endpoint = CLUSTERS;
    const DESCRIPTION: &'static str = "Manages a virtualization cluster";
    const NATURAL_KEY: &'static str = "name";

    fn attributes() -> Vec<Attribute> {
        vec![
            attributes::name("Name of the cluster"),
            attributes::required_reference("type", "Cluster type"),
            attributes::reference("group", "Cluster group"),
            attributes::status(CLUSTER_STATUSES),
            attributes::reference("tenant", "Tenant owning the cluster"),
            attributes::reference("site", "Site hosting the cluster"),
        ]
    }

    async fn request(plan: &mut PlanReader<'_>, common: CommonFields) -> Self::Request {
        api::ClusterRequest {
            name: plan.string("name"),
            cluster_type: plan.required_reference("type", &CLUSTER_TYPES).await,
            group: plan.reference("group", &CLUSTER_GROUPS).await,
            status: plan.string("status"),
            tenant: plan.reference("tenant", &TENANTS).await,
            site: plan.reference("site", &SITES).await,
            common,
        }
    }

    fn state(model: &Self::Model, state: &mut StateBuilder<'_>) {
        state
            .string("name", &model.name)
            .reference("type", Some(&model.cluster_type))
            .reference("group", model.group.as_ref())
            .choice("status", model.status.as_ref())
            .reference("tenant", model.tenant.as_ref())
            .reference("site", model.site.as_ref());
    }
}

pub struct VirtualMachine;

#[async_trait]
impl NetBoxObject for VirtualMachine {
    type Model = api::VirtualMachine;
    type Request = api::VirtualMachineRequest;

    const TYPE_NAME: &'static str = "netbox_virtual_machine";
    const ENDPOINT: Endpoint = VIRTUAL_MACHINES;
    const DESCRIPTION: &'static str = "Manages a virtual machine";
    const NATURAL_KEY: &'static str = "name";

    fn attributes() -> Vec<Attribute> {
        vec![
            attributes::bounded_name("name", "Name of the virtual machine", 64),
            attributes::status(VM_STATUSES),
            attributes::reference("site", "Site the virtual machine runs at"),
            attributes::reference("cluster", "Cluster hosting the virtual machine"),
            attributes::reference("role", "Device role with `vm_role` enabled"),
            attributes::reference("tenant", "Tenant owning the virtual machine"),
            attributes::reference("platform", "Operating system platform"),
            attributes::number("vcpus", "Number of virtual CPUs, fractions allowed"),
            attributes::integer("memory", "Memory in MB", 0, i64::from(i32::MAX)),
            attributes::integer("disk", "Disk space in MB", 0, i64::from(i32::MAX)),
        ]
    }

    async fn request(plan: &mut PlanReader<'_>, common: CommonFields) -> Self::Request {
        api::VirtualMachineRequest {
            name: plan.string("name"),
            status: plan.string("status"),
            site: plan.reference("site", &SITES).await,
            cluster: plan.reference("cluster", &CLUSTERS).await,
            role: plan.reference("role", &DEVICE_ROLES).await,
            tenant: plan.reference("tenant", &TENANTS).await,
            platform: plan.reference("platform", &PLATFORMS).await,
            vcpus: plan.number("vcpus"),
            memory: plan.integer("memory"),
            disk: plan.integer("disk"),
            common,
        }
    }

    fn state(model: &Self::Model, state: &mut StateBuilder<'_>) {
        state
            .string("name", &model.name)
            .choice("status", model.status.as_ref())
            .reference("site", model.site.as_ref())
            .reference("cluster", model.cluster.as_ref())
            .reference("role", model.role.as_ref())
            .reference("tenant", model.tenant.as_ref())
            .reference("platform", model.platform.as_ref())
            .number("vcpus", model.vcpus)
            .integer("memory", model.memory)
            .integer("disk", model.disk);
    }
}

pub struct VmInterface;

#[async_trait]
impl NetBoxObject for VmInterface {
    type Model = api::VmInterface;
    type Request = api::VmInterfaceRequest;

    const TYPE_NAME: &'static str = "netbox_vm_interface";
    const ENDPOINT: Endpoint = VM_INTERFACES;
    const DESCRIPTION: &'static str = "Manages a network interface on a virtual machine";
    const NATURAL_KEY: &'static str = "name";
    const HAS_COMMENTS: bool = false;

    fn attributes() -> Vec<Attribute> {
        vec![
            attributes::required_reference("virtual_machine", "Virtual machine the interface belongs to"),
            attributes::bounded_name("name", "Name of the interface", 64),
            attributes::flag("enabled", "Whether the interface is enabled", true),
            attributes::reference("parent", "Parent interface of a sub-interface"),
            attributes::reference("bridge", "Bridge interface"),
            attributes::integer("mtu", "Maximum transmission unit", 1, 65536),
            attributes::text("mac_address", "MAC address"),
            attributes::choice("mode", "802.1Q mode", INTERFACE_MODES),
            attributes::reference("untagged_vlan", "Untagged (native) VLAN"),
            attributes::references("tagged_vlans", "Tagged VLANs, used with mode `tagged`"),
            attributes::reference("vrf", "VRF of the interface"),
        ]
    }

    async fn request(plan: &mut PlanReader<'_>, common: CommonFields) -> Self::Request {
        api::VmInterfaceRequest {
            virtual_machine: plan.required_reference("virtual_machine", &VIRTUAL_MACHINES).await,
            name: plan.string("name"),
            enabled: plan.bool_or("enabled", true),
            parent: plan.reference("parent", &VM_INTERFACES).await,
            bridge: plan.reference("bridge", &VM_INTERFACES).await,
            mtu: plan.integer("mtu"),
            mac_address: plan.optional_string("mac_address"),
            mode: plan.optional_string("mode"),
            untagged_vlan: plan.reference("untagged_vlan", &VLANS).await,
            tagged_vlans: plan.references("tagged_vlans", &VLANS).await,
            vrf: plan.reference("vrf", &VRFS).await,
            common,
        }
    }

    fn state(model: &Self::Model, state: &mut StateBuilder<'_>) {
        state
            .reference("virtual_machine", Some(&model.virtual_machine))
            .string("name", &model.name)
            .bool("enabled", model.enabled)
            .reference("parent", model.parent.as_ref())
            .reference("bridge", model.bridge.as_ref())
            .integer("mtu", model.mtu)
            .optional_string("mac_address", model.mac_address.as_deref())
            .choice("mode", model.mode.as_ref())
            .reference("untagged_vlan", model.untagged_vlan.as_ref())
            .references("tagged_vlans", &model.tagged_vlans)
            .reference("vrf", model.vrf.as_ref());
    }

    fn validate(config: &DynamicValue) -> Vec<Diagnostic> {
        let tagged = config.get_value(&AttributePath::new("tagged_vlans"));
        let has_tagged = tagged.as_list().is_some_and(|vlans| !vlans.is_empty());
        let mode = config.get_value(&AttributePath::new("mode"));
        if has_tagged && !mode.is_unknown() && mode.as_str() != Some("tagged") {
            vec![Diagnostic::error(
                "Invalid Interface Mode",
                "tagged_vlans can only be set when mode is `tagged`",
            )
            .with_attribute(AttributePath::new("tagged_vlans"))]
        } else {
            vec![]
        }
    }
}

pub struct VirtualDisk;

#[async_trait]
impl NetBoxObject for VirtualDisk {
    type Model = api::VirtualDisk;
    type Request = api::VirtualDiskRequest;

    const TYPE_NAME: &'static str = "netbox_virtual_disk";
    const ENDPOINT: Endpoint = VIRTUAL_DISKS;
    const DESCRIPTION: &'static str = "Manages a virtual disk attached to a virtual machine";
    const NATURAL_KEY: &'static str = "name";
    const HAS_COMMENTS: bool = false;

    fn attributes() -> Vec<Attribute> {
        vec![
            attributes::required_reference("virtual_machine", "Virtual machine the disk is attached to"),
            attributes::bounded_name("name", "Name of the disk", 64),
            attributes::required_integer("size", "Size in MB", 0, 2_147_483_647),
        ]
    }

    async fn request(plan: &mut PlanReader<'_>, common: CommonFields) -> Self::Request {
        api::VirtualDiskRequest {
            virtual_machine: plan.required_reference("virtual_machine", &VIRTUAL_MACHINES).await,
            name: plan.string("name"),
            size: plan.integer("size").unwrap_or_default(),
            common,
        }
    }

    fn state(model: &Self::Model, state: &mut StateBuilder<'_>) {
        state
            .reference("virtual_machine", Some(&model.virtual_machine))
            .string("name", &model.name)
            .integer("size", Some(model.size));
    }
}

#[cfg(test)]
#[path = "./virtualization_test.rs"]
mod virtualization_test;
