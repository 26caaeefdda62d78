//! IPAM resources: RIRs, ASNs, aggregates, VRFs, VLANs, prefixes, IP ranges
//! and IP addresses

use async_trait::async_trait;
use tfplug::schema::{Attribute, AttributeBuilder, AttributeType};

use super::attributes;
use super::NetBoxObject;
use crate::api::common::CommonFields;
use crate::api::dcim::SITES;
use crate::api::ipam::{
    self as api, AGGREGATES, ASNS, IP_ADDRESSES, IP_RANGES, PREFIXES, RIRS, ROLES, VLANS,
    VLAN_GROUPS, VRFS,
};
use crate::api::tenancy::TENANTS;
use crate::api::Endpoint;
use crate::state::{PlanReader, StateBuilder};

const VLAN_STATUSES: &[&str] = &["active", "reserved", "deprecated"];
const PREFIX_STATUSES: &[&str] = &["container", "active", "reserved", "deprecated"];
const IP_RANGE_STATUSES: &[&str] = &["active", "reserved", "deprecated"];
const IP_STATUSES: &[&str] = &["active", "reserved", "deprecated", "dhcp", "slaac"];
const IP_ROLES: &[&str] = &[
    "loopback",
    "secondary",
    "anycast",
    "vip",
    "vrrp",
    "hsrp",
    "glbp",
    "carp",
];

pub struct Rir;

#[async_trait]
impl NetBoxObject for Rir {
    type Model = api::Rir;
    type Request = api::RirRequest;

    const TYPE_NAME: &'static str = "netbox_rir";
    const ENDPOINT: Endpoint = RIRS;
    const DESCRIPTION: &'static str = "Manages a Regional Internet Registry";
    const HAS_COMMENTS: bool = false;

    fn attributes() -> Vec<Attribute> {
        vec![
            attributes::name("Name of the RIR"),
            attributes::slug("URL-friendly unique identifier"),
            attributes::flag(
                "is_private",
                "Whether IP space managed by this RIR is private",
                false,
            ),
        ]
    }

    async fn request(plan: &mut PlanReader<'_>, common: CommonFields) -> Self::Request {
        api::RirRequest {
            name: plan.string("name"),
            slug: plan.string("slug"),
            is_private: plan.bool_or("is_private", false),
            common,
        }
    }

    fn state(model: &Self::Model, state: &mut StateBuilder<'_>) {
        state
            .string("name", &model.name)
            .string("slug", &model.slug)
            .bool("is_private", model.is_private);
    }
}

pub struct Asn;

#[async_trait]
impl NetBoxObject for Asn {
    type Model = api::Asn;
    type Request = api::AsnRequest;

    const TYPE_NAME: &'static str = "netbox_asn";
    const ENDPOINT: Endpoint = ASNS;
    const DESCRIPTION: &'static str = "Manages an autonomous system number";
    const NATURAL_KEY: &'static str = "asn";

    fn attributes() -> Vec<Attribute> {
        vec![
            attributes::required_integer("asn", "16 or 32-bit AS number", 1, 4_294_967_295),
            attributes::required_reference("rir", "RIR responsible for the number"),
            attributes::reference("tenant", "Tenant owning the ASN"),
        ]
    }

    async fn request(plan: &mut PlanReader<'_>, common: CommonFields) -> Self::Request {
        api::AsnRequest {
            asn: plan.integer("asn").unwrap_or_default(),
            rir: plan.required_reference("rir", &RIRS).await,
            tenant: plan.reference("tenant", &TENANTS).await,
            common,
        }
    }

    fn state(model: &Self::Model, state: &mut StateBuilder<'_>) {
        state
            .integer("asn", Some(model.asn))
            .reference("rir", model.rir.as_ref())
            .reference("tenant", model.tenant.as_ref());
    }
}

pub struct Aggregate;

#[async_trait]
impl NetBoxObject for Aggregate {
    type Model = api::Aggregate;
    type Request = api::AggregateRequest;

    const TYPE_NAME: &'static str = "netbox_aggregate";
    const ENDPOINT: Endpoint = AGGREGATES;
    const DESCRIPTION: &'static str = "Manages an aggregate: the top of an IP address hierarchy";
    const NATURAL_KEY: &'static str = "prefix";

    fn attributes() -> Vec<Attribute> {
        vec![
            attributes::required_text("prefix", "IPv4 or IPv6 network in CIDR notation"),
            attributes::required_reference("rir", "RIR the space was allocated by"),
            attributes::reference("tenant", "Tenant owning the aggregate"),
            attributes::text("date_added", "Allocation date, `YYYY-MM-DD`"),
        ]
    }

    async fn request(plan: &mut PlanReader<'_>, common: CommonFields) -> Self::Request {
        api::AggregateRequest {
            prefix: plan.string("prefix"),
            rir: plan.required_reference("rir", &RIRS).await,
            tenant: plan.reference("tenant", &TENANTS).await,
            date_added: plan.optional_string("date_added"),
            common,
        }
    }

    fn state(model: &Self::Model, state: &mut StateBuilder<'_>) {
        state
            .string("prefix", &model.prefix)
            .reference("rir", Some(&model.rir))
            .reference("tenant", model.tenant.as_ref())
            .optional_string("date_added", model.date_added.as_deref());
    }
}

pub struct Vrf;

#[async_trait]
impl NetBoxObject for Vrf {
    type Model = api::Vrf;
    type Request = api::VrfRequest;

    const TYPE_NAME: &'static str = "netbox_vrf";
    const ENDPOINT: Endpoint = VRFS;
    const DESCRIPTION: &'static str = "Manages a VRF (virtual routing and forwarding) table";
    const NATURAL_KEY: &'static str = "name";

    fn attributes() -> Vec<Attribute> {
        vec![
            attributes::name("Name of the VRF"),
            attributes::bounded_text("rd", "Route distinguisher as defined in RFC 4364", 21),
            attributes::reference("tenant", "Tenant owning the VRF"),
            attributes::flag(
                "enforce_unique",
                "Prevent duplicate prefixes and IP addresses within this VRF",
                true,
            ),
        ]
    }

    async fn request(plan: &mut PlanReader<'_>, common: CommonFields) -> Self::Request {
        api::VrfRequest {
            name: plan.string("name"),
            rd: plan.optional_string("rd"),
            tenant: plan.reference("tenant", &TENANTS).await,
            enforce_unique: plan.bool_or("enforce_unique", true),
            common,
        }
    }

    fn state(model: &Self::Model, state: &mut StateBuilder<'_>) {
        state
            .string("name", &model.name)
            .optional_string("rd", model.rd.as_deref())
            .reference("tenant", model.tenant.as_ref())
            .bool("enforce_unique", model.enforce_unique);
    }
}

pub struct Role;

#[async_trait]
impl NetBoxObject for Role {
    type Model = api::Role;
    type Request = api::RoleRequest;

    const TYPE_NAME: &'static str = "netbox_role";
    const ENDPOINT: Endpoint = ROLES;
    const DESCRIPTION: &'static str = "Manages an IPAM role describing the function of prefixes and VLANs";
    const HAS_COMMENTS: bool = false;

    fn attributes() -> Vec<Attribute> {
        vec![
            attributes::name("Name of the role"),
            attributes::slug("URL-friendly unique identifier"),
            attributes::integer_with_default("weight", "Sort weight", 0, 32767, 1000),
        ]
    }

    async fn request(plan: &mut PlanReader<'_>, common: CommonFields) -> Self::Request {
        api::RoleRequest {
            name: plan.string("name"),
            slug: plan.string("slug"),
            weight: plan.integer("weight").unwrap_or(1000),
            common,
        }
    }

    fn state(model: &Self::Model, state: &mut StateBuilder<'_>) {
        state
            .string("name", &model.name)
            .string("slug", &model.slug)
            .integer("weight", model.weight);
    }
}

pub struct VlanGroup;

#[async_trait]
impl NetBoxObject for VlanGroup {
    type Model = api::VlanGroup;
    type Request = api::VlanGroupRequest;

    const TYPE_NAME: &'static str = "netbox_vlan_group";
    const ENDPOINT: Endpoint = VLAN_GROUPS;
    const DESCRIPTION: &'static str = "Manages a VLAN group";
    const HAS_COMMENTS: bool = false;

    fn attributes() -> Vec<Attribute> {
        vec![
            attributes::name("Name of the VLAN group"),
            attributes::slug("URL-friendly unique identifier"),
        ]
    }

    async fn request(plan: &mut PlanReader<'_>, common: CommonFields) -> Self::Request {
        api::VlanGroupRequest {
            name: plan.string("name"),
            slug: plan.string("slug"),
            common,
        }
    }

    fn state(model: &Self::Model, state: &mut StateBuilder<'_>) {
        state.string("name", &model.name).string("slug", &model.slug);
    }
}

pub struct Vlan;

#[async_trait]
impl NetBoxObject for Vlan {
    type Model = api::Vlan;
    type Request = api::VlanRequest;

    const TYPE_NAME: &'static str = "netbox_vlan";
    const ENDPOINT: Endpoint = VLANS;
    const DESCRIPTION: &'static str = "Manages a VLAN";
    const NATURAL_KEY: &'static str = "name";

    fn attributes() -> Vec<Attribute> {
        vec![
            attributes::required_integer("vid", "Numeric VLAN ID", 1, 4094),
            attributes::bounded_name("name", "Name of the VLAN", 64),
            attributes::reference("site", "Site the VLAN is scoped to"),
            attributes::reference("group", "VLAN group"),
            attributes::reference("tenant", "Tenant owning the VLAN"),
            attributes::status(VLAN_STATUSES),
            attributes::reference("role", "Functional role"),
        ]
    }

    async fn request(plan: &mut PlanReader<'_>, common: CommonFields) -> Self::Request {
        api::VlanRequest {
            vid: plan.integer("vid").unwrap_or_default(),
            name: plan.string("name"),
            site: plan.reference("site", &SITES).await,
            group: plan.reference("group", &VLAN_GROUPS).await,
            tenant: plan.reference("tenant", &TENANTS).await,
            status: plan.string("status"),
            role: plan.reference("role", &ROLES).await,
            common,
        }
    }

    fn state(model: &Self::Model, state: &mut StateBuilder<'_>) {
        state
            .integer("vid", Some(model.vid))
            .string("name", &model.name)
            .reference("site", model.site.as_ref())
            .reference("group", model.group.as_ref())
            .reference("tenant", model.tenant.as_ref())
            .choice("status", model.status.as_ref())
            .reference("role", model.role.as_ref());
    }
}

pub struct Prefix;

#[async_trait]
impl NetBoxObject for Prefix {
    type Model = api::Prefix;
    type Request = api::PrefixRequest;

    const TYPE_NAME: &'static str = "netbox_prefix";
    const ENDPOINT: Endpoint = PREFIXES;
    const DESCRIPTION: &'static str = "Manages an IPv4 or IPv6 prefix";
    const NATURAL_KEY: &'static str = "prefix";

    fn attributes() -> Vec<Attribute> {
        vec![
            attributes::required_text("prefix", "IPv4 or IPv6 network in CIDR notation"),
            attributes::reference("site", "Site the prefix is scoped to"),
            attributes::reference("vrf", "VRF the prefix belongs to"),
            attributes::reference("tenant", "Tenant owning the prefix"),
            attributes::reference("vlan", "VLAN the prefix is assigned to"),
            attributes::status(PREFIX_STATUSES),
            attributes::reference("role", "Functional role"),
            attributes::flag(
                "is_pool",
                "All IP addresses within this prefix are considered usable",
                false,
            ),
            attributes::flag("mark_utilized", "Treat the prefix as 100% utilized", false),
        ]
    }

    async fn request(plan: &mut PlanReader<'_>, common: CommonFields) -> Self::Request {
        api::PrefixRequest {
            prefix: plan.string("prefix"),
            site: plan.reference("site", &SITES).await,
            vrf: plan.reference("vrf", &VRFS).await,
            tenant: plan.reference("tenant", &TENANTS).await,
            vlan: plan.reference("vlan", &VLANS).await,
            status: plan.string("status"),
            role: plan.reference("role", &ROLES).await,
            is_pool: plan.bool_or("is_pool", false),
            mark_utilized: plan.bool_or("mark_utilized", false),
            common,
        }
    }

    fn state(model: &Self::Model, state: &mut StateBuilder<'_>) {
        state
            .string("prefix", &model.prefix)
            .reference("site", model.site.as_ref())
            .reference("vrf", model.vrf.as_ref())
            .reference("tenant", model.tenant.as_ref())
            .reference("vlan", model.vlan.as_ref())
            .choice("status", model.status.as_ref())
            .reference("role", model.role.as_ref())
            .bool("is_pool", model.is_pool)
            .bool("mark_utilized", model.mark_utilized);
    }
}

pub struct IpAddress;

#[async_trait]
impl NetBoxObject for IpAddress {
    type Model = api::IpAddress;
    type Request = api::IpAddressRequest;

    const TYPE_NAME: &'static str = "netbox_ip_address";
    const ENDPOINT: Endpoint = IP_ADDRESSES;
    const DESCRIPTION: &'static str = "Manages an individual IPv4 or IPv6 address with its mask";
    const NATURAL_KEY: &'static str = "address";

    fn attributes() -> Vec<Attribute> {
        vec![
            attributes::required_text("address", "IPv4 or IPv6 address with mask, e.g. `10.0.0.1/24`"),
            attributes::reference("vrf", "VRF the address belongs to"),
            attributes::reference("tenant", "Tenant owning the address"),
            attributes::status(IP_STATUSES),
            attributes::choice("role", "Functional role", IP_ROLES),
            attributes::bounded_text("dns_name", "Hostname or FQDN", 255),
        ]
    }

    async fn request(plan: &mut PlanReader<'_>, common: CommonFields) -> Self::Request {
        api::IpAddressRequest {
            address: plan.string("address"),
            vrf: plan.reference("vrf", &VRFS).await,
            tenant: plan.reference("tenant", &TENANTS).await,
            status: plan.string("status"),
            role: plan.string("role"),
            dns_name: plan.string("dns_name"),
            common,
        }
    }

    fn state(model: &Self::Model, state: &mut StateBuilder<'_>) {
        state
            .string("address", &model.address)
            .reference("vrf", model.vrf.as_ref())
            .reference("tenant", model.tenant.as_ref())
            .choice("status", model.status.as_ref())
            .choice("role", model.role.as_ref())
            .optional_string("dns_name", model.dns_name.as_deref());
    }
}

pub struct IpRange;

#[async_trait]
impl NetBoxObject for IpRange {
    type Model = api::IpRange;
    type Request = api::IpRangeRequest;

    const TYPE_NAME: &'static str = "netbox_ip_range";
    const ENDPOINT: Endpoint = IP_RANGES;
    const DESCRIPTION: &'static str = "Manages an arbitrary range of IP addresses";
    const NATURAL_KEY: &'static str = "start_address";

    fn attributes() -> Vec<Attribute> {
        vec![
            attributes::required_text("start_address", "First address of the range with mask, e.g. `10.0.0.10/24`"),
            attributes::required_text("end_address", "Last address of the range with mask, e.g. `10.0.0.50/24`"),
            AttributeBuilder::new("size", AttributeType::Number)
                .description("Number of addresses in the range")
                .computed()
                .build(),
            attributes::reference("vrf", "VRF the range belongs to"),
            attributes::reference("tenant", "Tenant owning the range"),
            attributes::status(IP_RANGE_STATUSES),
            attributes::reference("role", "Functional role"),
            attributes::flag("mark_utilized", "Report the range as fully utilized", false),
        ]
    }

    async fn request(plan: &mut PlanReader<'_>, common: CommonFields) -> Self::Request {
        api::IpRangeRequest {
            start_address: plan.string("start_address"),
            end_address: plan.string("end_address"),
            vrf: plan.reference("vrf", &VRFS).await,
            tenant: plan.reference("tenant", &TENANTS).await,
            status: plan.string("status"),
            role: plan.reference("role", &ROLES).await,
            mark_utilized: plan.bool_or("mark_utilized", false),
            common,
        }
    }

    fn state(model: &Self::Model, state: &mut StateBuilder<'_>) {
        state
            .string("start_address", &model.start_address)
            .string("end_address", &model.end_address)
            .integer("size", model.size)
            .reference("vrf", model.vrf.as_ref())
            .reference("tenant", model.tenant.as_ref())
            .choice("status", model.status.as_ref())
            .reference("role", model.role.as_ref())
            .bool("mark_utilized", model.mark_utilized);
    }
}

#[cfg(test)]
#[path = "./ipam_test.rs"]
mod ipam_test;
