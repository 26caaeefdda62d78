//! DCIM resources: sites and their organisation, racks, device types, devices,
//! modules, interfaces and cables

use async_trait::async_trait;
use std::collections::HashMap;
use tfplug::schema::{Attribute, AttributeBuilder, AttributeType};
use tfplug::types::{AttributePath, Diagnostic, Dynamic, DynamicValue};

use super::attributes;
use super::NetBoxObject;
use crate::api::common::CommonFields;
use crate::api::dcim::{
    self as api, CABLES, DEVICES, DEVICE_ROLES, DEVICE_TYPES, INTERFACES, LOCATIONS,
    MANUFACTURERS, MODULES, MODULE_BAYS, MODULE_TYPES, PLATFORMS, RACKS, RACK_ROLES, REGIONS,
    SITES, SITE_GROUPS,
};
use crate::api::tenancy::TENANTS;
use crate::api::Endpoint;
use crate::state::{PlanReader, StateBuilder};

const SITE_STATUSES: &[&str] = &["planned", "staging", "active", "decommissioning", "retired"];
const RACK_STATUSES: &[&str] = &["reserved", "available", "planned", "active", "deprecated"];
const DEVICE_STATUSES: &[&str] = &[
    "offline",
    "active",
    "planned",
    "staged",
    "failed",
    "inventory",
    "decommissioning",
];
const FACES: &[&str] = &["front", "rear"];
const MODULE_STATUSES: &[&str] = &[
    "offline",
    "active",
    "planned",
    "staged",
    "failed",
    "decommissioning",
];
const AIRFLOWS: &[&str] = &[
    "front-to-rear",
    "rear-to-front",
    "left-to-right",
    "right-to-left",
    "side-to-rear",
    "passive",
    "mixed",
];
const WEIGHT_UNITS: &[&str] = &["kg", "g", "lb", "oz"];
const DUPLEX_MODES: &[&str] = &["half", "full", "auto"];
pub(crate) const INTERFACE_MODES: &[&str] = &["access", "tagged", "tagged-all"];
const CABLE_TYPES: &[&str] = &[
    "cat3",
    "cat5",
    "cat5e",
    "cat6",
    "cat6a",
    "cat7",
    "cat7a",
    "cat8",
    "dac-active",
    "dac-passive",
    "mrj21-trunk",
    "coaxial",
    "mmf",
    "mmf-om1",
    "mmf-om2",
    "mmf-om3",
    "mmf-om4",
    "mmf-om5",
    "smf",
    "smf-os1",
    "smf-os2",
    "aoc",
    "usb",
    "power",
];
const CABLE_STATUSES: &[&str] = &["connected", "planned", "decommissioning"];
const LENGTH_UNITS: &[&str] = &["km", "m", "cm", "mi", "ft", "in"];

pub struct Region;

#[async_trait]
impl NetBoxObject for Region {
    type Model = api::Region;
    type Request = api::RegionRequest;

    const TYPE_NAME: &'static str = "netbox_region";
    const ENDPOINT: Endpoint = REGIONS;
    const DESCRIPTION: &'static str = "Manages a region, a geographic grouping of sites";
    const HAS_COMMENTS: bool = false;

    fn attributes() -> Vec<Attribute> {
        vec![
            attributes::name("Name of the region"),
            attributes::slug("URL-friendly unique identifier"),
            attributes::reference("parent", "Parent region"),
        ]
    }

    async fn request(plan: &mut PlanReader<'_>, common: CommonFields) -> Self::Request {
        api::RegionRequest {
            name: plan.string("name"),
            slug: plan.string("slug"),
            parent: plan.reference("parent", &REGIONS).await,
            common,
        }
    }

    fn state(model: &Self::Model, state: &mut StateBuilder<'_>) {
        state
            .string("name", &model.name)
            .string("slug", &model.slug)
            .reference("parent", model.parent.as_ref());
    }
}

pub struct SiteGroup;

#[async_trait]
impl NetBoxObject for SiteGroup {
    type Model = api::SiteGroup;
    type Request = api::SiteGroupRequest;

    const TYPE_NAME: &'static str = "netbox_site_group";
    const ENDPOINT: Endpoint = SITE_GROUPS;
    const DESCRIPTION: &'static str = "Manages a site group, a functional grouping of sites";
    const HAS_COMMENTS: bool = false;

    fn attributes() -> Vec<Attribute> {
        vec![
            attributes::name("Name of the site group"),
            attributes::slug("URL-friendly unique identifier"),
            attributes::reference("parent", "Parent site group"),
        ]
    }

    async fn request(plan: &mut PlanReader<'_>, common: CommonFields) -> Self::Request {
        api::SiteGroupRequest {
            name: plan.string("name"),
            slug: plan.string("slug"),
            parent: plan.reference("parent", &SITE_GROUPS).await,
            common,
        }
    }

    fn state(model: &Self::Model, state: &mut StateBuilder<'_>) {
        state
            .string("name", &model.name)
            .string("slug", &model.slug)
            .reference("parent", model.parent.as_ref());
    }
}

pub struct Site;

#[async_trait]
impl NetBoxObject for Site {
    type Model = api::Site;
    type Request = api::SiteRequest;

    const TYPE_NAME: &'static str = "netbox_site";
    const ENDPOINT: Endpoint = SITES;
    const DESCRIPTION: &'static str = "Manages a site, typically a building or campus";

    fn attributes() -> Vec<Attribute> {
        vec![
            attributes::name("Name of the site"),
            attributes::slug("URL-friendly unique identifier"),
            attributes::status(SITE_STATUSES),
            attributes::reference("region", "Region the site belongs to"),
            attributes::reference("group", "Site group"),
            attributes::reference("tenant", "Tenant owning the site"),
            attributes::bounded_text("facility", "Local facility ID or description", 50),
            attributes::text("time_zone", "IANA time zone, e.g. `Europe/Berlin`"),
            attributes::bounded_text("physical_address", "Physical location of the building", 200),
            attributes::bounded_text("shipping_address", "Shipping address if different", 200),
            attributes::number("latitude", "GPS latitude in decimal format"),
            attributes::number("longitude", "GPS longitude in decimal format"),
        ]
    }

    async fn request(plan: &mut PlanReader<'_>, common: CommonFields) -> Self::Request {
        api::SiteRequest {
            name: plan.string("name"),
            slug: plan.string("slug"),
            status: plan.string("status"),
            region: plan.reference("region", &REGIONS).await,
            group: plan.reference("group", &SITE_GROUPS).await,
            tenant: plan.reference("tenant", &TENANTS).await,
            facility: plan.string("facility"),
            time_zone: plan.optional_string("time_zone"),
            physical_address: plan.string("physical_address"),
            shipping_address: plan.string("shipping_address"),
            latitude: plan.number("latitude"),
            longitude: plan.number("longitude"),
            common,
        }
    }

    fn state(model: &Self::Model, state: &mut StateBuilder<'_>) {
        state
            .string("name", &model.name)
            .string("slug", &model.slug)
            .choice("status", model.status.as_ref())
            .reference("region", model.region.as_ref())
            .reference("group", model.group.as_ref())
            .reference("tenant", model.tenant.as_ref())
            .optional_string("facility", model.facility.as_deref())
            .optional_string("time_zone", model.time_zone.as_deref())
            .optional_string("physical_address", model.physical_address.as_deref())
            .optional_string("shipping_address", model.shipping_address.as_deref())
            .number("latitude", model.latitude)
            .number("longitude", model.longitude);
    }
}

pub struct Location;

#[async_trait]
impl NetBoxObject for Location {
    type Model = api::Location;
    type Request = api::LocationRequest;

    const TYPE_NAME: &'static str = "netbox_location";
    const ENDPOINT: Endpoint = LOCATIONS;
    const DESCRIPTION: &'static str = "Manages a location inside a site, such as a floor or room";
    const HAS_COMMENTS: bool = false;

    fn attributes() -> Vec<Attribute> {
        vec![
            attributes::name("Name of the location"),
            attributes::slug("URL-friendly unique identifier"),
            attributes::required_reference("site", "Site containing the location"),
            attributes::reference("parent", "Parent location"),
            attributes::status(SITE_STATUSES),
            attributes::reference("tenant", "Tenant owning the location"),
            attributes::bounded_text("facility", "Local facility ID or description", 50),
        ]
    }

    async fn request(plan: &mut PlanReader<'_>, common: CommonFields) -> Self::Request {
        api::LocationRequest {
            name: plan.string("name"),
            slug: plan.string("slug"),
            site: plan.required_reference("site", &SITES).await,
            parent: plan.reference("parent", &LOCATIONS).await,
            status: plan.string("status"),
            tenant: plan.reference("tenant", &TENANTS).await,
            facility: plan.string("facility"),
            common,
        }
    }

    fn state(model: &Self::Model, state: &mut StateBuilder<'_>) {
        state
            .string("name", &model.name)
            .string("slug", &model.slug)
            .reference("site", Some(&model.site))
            .reference("parent", model.parent.as_ref())
            .choice("status", model.status.as_ref())
            .reference("tenant", model.tenant.as_ref())
            .optional_string("facility", model.facility.as_deref());
    }
}

pub struct Manufacturer;

#[async_trait]
impl NetBoxObject for Manufacturer {
    type Model = api::Manufacturer;
    type Request = api::ManufacturerRequest;

    const TYPE_NAME: &'static str = "netbox_manufacturer";
    const ENDPOINT: Endpoint = MANUFACTURERS;
    const DESCRIPTION: &'static str = "Manages a hardware manufacturer";
    const HAS_COMMENTS: bool = false;

    fn attributes() -> Vec<Attribute> {
        vec![
            attributes::name("Name of the manufacturer"),
            attributes::slug("URL-friendly unique identifier"),
        ]
    }

    async fn request(plan: &mut PlanReader<'_>, common: CommonFields) -> Self::Request {
        api::ManufacturerRequest {
            name: plan.string("name"),
            slug: plan.string("slug"),
            common,
        }
    }

    fn state(model: &Self::Model, state: &mut StateBuilder<'_>) {
        state.string("name", &model.name).string("slug", &model.slug);
    }
}

pub struct Platform;

#[async_trait]
impl NetBoxObject for Platform {
    type Model = api::Platform;
    type Request = api::PlatformRequest;

    const TYPE_NAME: &'static str = "netbox_platform";
    const ENDPOINT: Endpoint = PLATFORMS;
    const DESCRIPTION: &'static str = "Manages a platform, the software running on a device";
    const HAS_COMMENTS: bool = false;

    fn attributes() -> Vec<Attribute> {
        vec![
            attributes::name("Name of the platform"),
            attributes::slug("URL-friendly unique identifier"),
            attributes::reference("manufacturer", "Manufacturer limiting the platform"),
        ]
    }

    async fn request(plan: &mut PlanReader<'_>, common: CommonFields) -> Self::Request {
        api::PlatformRequest {
            name: plan.string("name"),
            slug: plan.string("slug"),
            manufacturer: plan.reference("manufacturer", &MANUFACTURERS).await,
            common,
        }
    }

    fn state(model: &Self::Model, state: &mut StateBuilder<'_>) {
        state
            .string("name", &model.name)
            .string("slug", &model.slug)
            .reference("manufacturer", model.manufacturer.as_ref());
    }
}

pub struct DeviceRole;

#[async_trait]
impl NetBoxObject for DeviceRole {
    type Model = api::DeviceRole;
    type Request = api::DeviceRoleRequest;

    const TYPE_NAME: &'static str = "netbox_device_role";
    const ENDPOINT: Endpoint = DEVICE_ROLES;
    const DESCRIPTION: &'static str = "Manages a device role, e.g. core switch or access router";
    const HAS_COMMENTS: bool = false;

    fn attributes() -> Vec<Attribute> {
        vec![
            attributes::name("Name of the device role"),
            attributes::slug("URL-friendly unique identifier"),
            attributes::color(),
            attributes::flag("vm_role", "Whether virtual machines may be assigned this role", true),
        ]
    }

    async fn request(plan: &mut PlanReader<'_>, common: CommonFields) -> Self::Request {
        api::DeviceRoleRequest {
            name: plan.string("name"),
            slug: plan.string("slug"),
            color: plan.optional_string("color"),
            vm_role: plan.bool_or("vm_role", true),
            common,
        }
    }

    fn state(model: &Self::Model, state: &mut StateBuilder<'_>) {
        state
            .string("name", &model.name)
            .string("slug", &model.slug)
            .optional_string("color", model.color.as_deref())
            .bool("vm_role", model.vm_role);
    }
}

pub struct DeviceType;

#[async_trait]
impl NetBoxObject for DeviceType {
    type Model = api::DeviceType;
    type Request = api::DeviceTypeRequest;

    const TYPE_NAME: &'static str = "netbox_device_type";
    const ENDPOINT: Endpoint = DEVICE_TYPES;
    const DESCRIPTION: &'static str = "Manages a device type, a hardware model from a manufacturer";

    fn attributes() -> Vec<Attribute> {
        vec![
            attributes::required_reference("manufacturer", "Manufacturer of the model"),
            attributes::bounded_name("model", "Model name", 100),
            attributes::slug("URL-friendly unique identifier"),
            attributes::bounded_text("part_number", "Discrete part number", 50),
            attributes::integer_with_default("u_height", "Height in rack units", 0, 100, 1),
            attributes::flag(
                "is_full_depth",
                "Whether the device occupies both front and rear rack faces",
                true,
            ),
        ]
    }

    async fn request(plan: &mut PlanReader<'_>, common: CommonFields) -> Self::Request {
        api::DeviceTypeRequest {
            manufacturer: plan.required_reference("manufacturer", &MANUFACTURERS).await,
            model: plan.string("model"),
            slug: plan.string("slug"),
            part_number: plan.string("part_number"),
            u_height: plan.number("u_height").unwrap_or(1.0),
            is_full_depth: plan.bool_or("is_full_depth", true),
            common,
        }
    }

    fn state(model: &Self::Model, state: &mut StateBuilder<'_>) {
        state
            .reference("manufacturer", Some(&model.manufacturer))
            .string("model", &model.model)
            .string("slug", &model.slug)
            .optional_string("part_number", model.part_number.as_deref())
            .number("u_height", model.u_height)
            .bool("is_full_depth", model.is_full_depth);
    }
}

pub struct RackRole;

#[async_trait]
impl NetBoxObject for RackRole {
    type Model = api::RackRole;
    type Request = api::RackRoleRequest;

    const TYPE_NAME: &'static str = "netbox_rack_role";
    const ENDPOINT: Endpoint = RACK_ROLES;
    const DESCRIPTION: &'static str = "Manages a rack role";
    const HAS_COMMENTS: bool = false;

    fn attributes() -> Vec<Attribute> {
        vec![
            attributes::name("Name of the rack role"),
            attributes::slug("URL-friendly unique identifier"),
            attributes::color(),
        ]
    }

    async fn request(plan: &mut PlanReader<'_>, common: CommonFields) -> Self::Request {
        api::RackRoleRequest {
            name: plan.string("name"),
            slug: plan.string("slug"),
            color: plan.optional_string("color"),
            common,
        }
    }

    fn state(model: &Self::Model, state: &mut StateBuilder<'_>) {
        state
            .string("name", &model.name)
            .string("slug", &model.slug)
            .optional_string("color", model.color.as_deref());
    }
}

pub struct Rack;

#[async_trait]
impl NetBoxObject for Rack {
    type Model = api::Rack;
    type Request = api::RackRequest;

    const TYPE_NAME: &'static str = "netbox_rack";
    const ENDPOINT: Endpoint = RACKS;
    const DESCRIPTION: &'static str = "Manages an equipment rack";
    const NATURAL_KEY: &'static str = "name";

    fn attributes() -> Vec<Attribute> {
        vec![
            attributes::name("Name of the rack"),
            attributes::required_reference("site", "Site containing the rack"),
            attributes::reference("location", "Location inside the site"),
            attributes::reference("tenant", "Tenant owning the rack"),
            attributes::status(RACK_STATUSES),
            attributes::reference("role", "Rack role"),
            attributes::bounded_text("serial", "Serial number", 50),
            attributes::bounded_text("asset_tag", "Unique asset tag", 50),
            attributes::integer_with_default("u_height", "Height in rack units", 1, 100, 42),
        ]
    }

    async fn request(plan: &mut PlanReader<'_>, common: CommonFields) -> Self::Request {
        api::RackRequest {
            name: plan.string("name"),
            site: plan.required_reference("site", &SITES).await,
            location: plan.reference("location", &LOCATIONS).await,
            tenant: plan.reference("tenant", &TENANTS).await,
            status: plan.string("status"),
            role: plan.reference("role", &RACK_ROLES).await,
            serial: plan.string("serial"),
            asset_tag: plan.optional_string("asset_tag"),
            u_height: plan.number("u_height").unwrap_or(42.0),
            common,
        }
    }

    fn state(model: &Self::Model, state: &mut StateBuilder<'_>) {
        state
            .string("name", &model.name)
            .reference("site", Some(&model.site))
            .reference("location", model.location.as_ref())
            .reference("tenant", model.tenant.as_ref())
            .choice("status", model.status.as_ref())
            .reference("role", model.role.as_ref())
            .optional_string("serial", model.serial.as_deref())
            .optional_string("asset_tag", model.asset_tag.as_deref())
            .number("u_height", model.u_height);
    }
}

pub struct Device;

#[async_trait]
impl NetBoxObject for Device {
    type Model = api::Device;
    type Request = api::DeviceRequest;

    const TYPE_NAME: &'static str = "netbox_device";
    const ENDPOINT: Endpoint = DEVICES;
    const DESCRIPTION: &'static str = "Manages a device: a physical piece of hardware installed at a site";
    const NATURAL_KEY: &'static str = "name";

    fn attributes() -> Vec<Attribute> {
        vec![
            attributes::bounded_name("name", "Name of the device", 64),
            attributes::required_reference("device_type", "Device type"),
            attributes::required_reference("role", "Device role"),
            attributes::required_reference("site", "Site the device is installed at"),
            attributes::reference("location", "Location inside the site"),
            attributes::reference("rack", "Rack holding the device"),
            attributes::reference("tenant", "Tenant owning the device"),
            attributes::reference("platform", "Software platform"),
            attributes::bounded_text("serial", "Chassis serial number", 50),
            attributes::bounded_text("asset_tag", "Unique asset tag", 50),
            attributes::status(DEVICE_STATUSES),
            attributes::number("position", "Lowest rack unit occupied by the device"),
            attributes::choice("face", "Rack face the device is mounted on", FACES),
        ]
    }

    async fn request(plan: &mut PlanReader<'_>, common: CommonFields) -> Self::Request {
        api::DeviceRequest {
            name: plan.string("name"),
            device_type: plan.required_reference("device_type", &DEVICE_TYPES).await,
            role: plan.required_reference("role", &DEVICE_ROLES).await,
            site: plan.required_reference("site", &SITES).await,
            location: plan.reference("location", &LOCATIONS).await,
            rack: plan.reference("rack", &RACKS).await,
            tenant: plan.reference("tenant", &TENANTS).await,
            platform: plan.reference("platform", &PLATFORMS).await,
            serial: plan.string("serial"),
            asset_tag: plan.optional_string("asset_tag"),
            status: plan.string("status"),
            position: plan.number("position"),
            face: plan.string("face"),
            common,
        }
    }

    fn state(model: &Self::Model, state: &mut StateBuilder<'_>) {
        state
            .string("name", model.name.as_deref().unwrap_or_default())
            .reference("device_type", Some(&model.device_type))
            .reference("role", Some(&model.role))
            .reference("site", Some(&model.site))
            .reference("location", model.location.as_ref())
            .reference("rack", model.rack.as_ref())
            .reference("tenant", model.tenant.as_ref())
            .reference("platform", model.platform.as_ref())
            .optional_string("serial", model.serial.as_deref())
            .optional_string("asset_tag", model.asset_tag.as_deref())
            .choice("status", model.status.as_ref())
            .number("position", model.position)
            .choice("face", model.face.as_ref());
    }

    fn validate(config: &DynamicValue) -> Vec<Diagnostic> {
        let rack = config.get_value(&AttributePath::new("rack"));
        let mut diagnostics = vec![];
        for attr in ["position", "face"] {
            let value = config.get_value(&AttributePath::new(attr));
            if value.is_known() && rack.is_null() {
                diagnostics.push(
                    Diagnostic::error(
                        "Missing Rack",
                        format!("{} can only be set when the device is assigned to a rack", attr),
                    )
                    .with_attribute(AttributePath::new(attr)),
                );
            }
        }
        diagnostics
    }
}

pub struct ModuleType;

#[async_trait]
impl NetBoxObject for ModuleType {
    type Model = api::ModuleType;
    type Request = api::ModuleTypeRequest;

    const TYPE_NAME: &'static str = "netbox_module_type";
    const ENDPOINT: Endpoint = MODULE_TYPES;
    const DESCRIPTION: &'static str = "Manages a module type, a line card or other pluggable hardware model";
    const NATURAL_KEY: &'static str = "model";

    fn attributes() -> Vec<Attribute> {
        vec![
            attributes::required_reference("manufacturer", "Manufacturer of the module"),
            attributes::bounded_name("model", "Model name", 100),
            attributes::bounded_text("part_number", "Discrete part number", 50),
            attributes::choice("airflow", "Direction of airflow", AIRFLOWS),
            attributes::number("weight", "Weight of one module"),
            attributes::choice("weight_unit", "Unit of the weight", WEIGHT_UNITS),
        ]
    }

    async fn request(plan: &mut PlanReader<'_>, common: CommonFields) -> Self::Request {
        api::ModuleTypeRequest {
            manufacturer: plan.required_reference("manufacturer", &MANUFACTURERS).await,
            model: plan.string("model"),
            part_number: plan.string("part_number"),
            airflow: plan.optional_string("airflow"),
            weight: plan.number("weight"),
            weight_unit: plan.optional_string("weight_unit"),
            common,
        }
    }

    fn state(model: &Self::Model, state: &mut StateBuilder<'_>) {
        state
            .reference("manufacturer", Some(&model.manufacturer))
            .string("model", &model.model)
            .optional_string("part_number", model.part_number.as_deref())
            .choice("airflow", model.airflow.as_ref())
            .number("weight", model.weight)
            .choice("weight_unit", model.weight_unit.as_ref());
    }

    fn validate(config: &DynamicValue) -> Vec<Diagnostic> {
        unit_required(config, "weight", "weight_unit")
    }
}

/// A measurement needs its unit
fn unit_required(config: &DynamicValue, value: &str, unit: &str) -> Vec<Diagnostic> {
    let measured = config.get_value(&AttributePath::new(value));
    let unit_value = config.get_value(&AttributePath::new(unit));
    if measured.is_known() && unit_value.is_null() {
        vec![Diagnostic::error(
            "Missing Unit",
            format!("{} must be set together with {}", unit, value),
        )
        .with_attribute(AttributePath::new(unit))]
    } else {
        vec![]
    }
}

pub struct ModuleBay;

#[async_trait]
impl NetBoxObject for ModuleBay {
    type Model = api::ModuleBay;
    type Request = api::ModuleBayRequest;

    const TYPE_NAME: &'static str = "netbox_module_bay";
    const ENDPOINT: Endpoint = MODULE_BAYS;
    const DESCRIPTION: &'static str = "Manages a module bay, a slot in a device that holds a module";
    const NATURAL_KEY: &'static str = "name";
    const HAS_COMMENTS: bool = false;

    fn attributes() -> Vec<Attribute> {
        vec![
            attributes::required_reference("device", "Device containing the bay"),
            attributes::bounded_name("name", "Name of the bay", 64),
            attributes::bounded_text("label", "Physical label", 64),
            attributes::bounded_text("position", "Identifier used when renaming installed components", 30),
        ]
    }

    async fn request(plan: &mut PlanReader<'_>, common: CommonFields) -> Self::Request {
        api::ModuleBayRequest {
            device: plan.required_reference("device", &DEVICES).await,
            name: plan.string("name"),
            label: plan.string("label"),
            position: plan.string("position"),
            common,
        }
    }

    fn state(model: &Self::Model, state: &mut StateBuilder<'_>) {
        state
            .reference("device", Some(&model.device))
            .string("name", &model.name)
            .optional_string("label", model.label.as_deref())
            .optional_string("position", model.position.as_deref());
    }
}

pub struct Module;

#[async_trait]
impl NetBoxObject for Module {
    type Model = api::Module;
    type Request = api::ModuleRequest;

    const TYPE_NAME: &'static str = "netbox_module";
    const ENDPOINT: Endpoint = MODULES;
    const DESCRIPTION: &'static str = "Manages a module installed in a device's module bay";
    const NATURAL_KEY: &'static str = "serial";

    fn attributes() -> Vec<Attribute> {
        vec![
            attributes::required_reference("device", "Device the module is installed in"),
            attributes::required_reference("module_bay", "Module bay holding the module"),
            attributes::required_reference("module_type", "Module type"),
            attributes::status(MODULE_STATUSES),
            attributes::bounded_text("serial", "Serial number", 50),
            attributes::bounded_text("asset_tag", "Unique asset tag", 50),
        ]
    }

    async fn request(plan: &mut PlanReader<'_>, common: CommonFields) -> Self::Request {
        api::ModuleRequest {
            device: plan.required_reference("device", &DEVICES).await,
            module_bay: plan.required_reference("module_bay", &MODULE_BAYS).await,
            module_type: plan.required_reference("module_type", &MODULE_TYPES).await,
            status: plan.string("status"),
            serial: plan.string("serial"),
            asset_tag: plan.optional_string("asset_tag"),
            common,
        }
    }

    fn state(model: &Self::Model, state: &mut StateBuilder<'_>) {
        state
            .reference("device", Some(&model.device))
            .reference("module_bay", Some(&model.module_bay))
            .reference("module_type", Some(&model.module_type))
            .choice("status", model.status.as_ref())
            .optional_string("serial", model.serial.as_deref())
            .optional_string("asset_tag", model.asset_tag.as_deref());
    }
}

pub struct Interface;

#[async_trait]
impl NetBoxObject for Interface {
    type Model = api::Interface;
    type Request = api::InterfaceRequest;

    const TYPE_NAME: &'static str = "netbox_interface";
    const ENDPOINT: Endpoint = INTERFACES;
    const DESCRIPTION: &'static str = "Manages a network interface on a device";
    const NATURAL_KEY: &'static str = "name";
    const HAS_COMMENTS: bool = false;

    fn attributes() -> Vec<Attribute> {
        vec![
            attributes::required_reference("device", "Device the interface belongs to"),
            attributes::bounded_name("name", "Name of the interface", 64),
            attributes::bounded_text("label", "Physical label", 64),
            attributes::required_text(
                "type",
                "Interface type, e.g. `virtual`, `lag`, `1000base-t` or `10gbase-x-sfpp`",
            ),
            attributes::flag("enabled", "Whether the interface is enabled", true),
            attributes::reference("parent", "Parent interface of a sub-interface"),
            attributes::reference("bridge", "Bridge interface"),
            attributes::reference("lag", "LAG interface this interface is a member of"),
            attributes::integer("mtu", "Maximum transmission unit", 1, 65536),
            attributes::text("mac_address", "MAC address"),
            attributes::integer("speed", "Speed in Kbps", 0, 2_147_483_647),
            attributes::choice("duplex", "Duplex mode", DUPLEX_MODES),
            attributes::text("wwn", "World Wide Name, for Fibre Channel interfaces"),
            attributes::flag("mgmt_only", "Whether the interface is used for out-of-band management only", false),
            attributes::choice("mode", "802.1Q mode", INTERFACE_MODES),
            attributes::flag("mark_connected", "Treat the interface as connected without a cable", false),
        ]
    }

    async fn request(plan: &mut PlanReader<'_>, common: CommonFields) -> Self::Request {
        api::InterfaceRequest {
            device: plan.required_reference("device", &DEVICES).await,
            name: plan.string("name"),
            label: plan.string("label"),
            interface_type: plan.string("type"),
            enabled: plan.bool_or("enabled", true),
            parent: plan.reference("parent", &INTERFACES).await,
            bridge: plan.reference("bridge", &INTERFACES).await,
            lag: plan.reference("lag", &INTERFACES).await,
            mtu: plan.integer("mtu"),
            mac_address: plan.optional_string("mac_address"),
            speed: plan.integer("speed"),
            duplex: plan.optional_string("duplex"),
            wwn: plan.optional_string("wwn"),
            mgmt_only: plan.bool_or("mgmt_only", false),
            mode: plan.optional_string("mode"),
            mark_connected: plan.bool_or("mark_connected", false),
            common,
        }
    }

    fn state(model: &Self::Model, state: &mut StateBuilder<'_>) {
        state
            .reference("device", Some(&model.device))
            .string("name", &model.name)
            .optional_string("label", model.label.as_deref())
            .choice("type", Some(&model.interface_type))
            .bool("enabled", model.enabled)
            .reference("parent", model.parent.as_ref())
            .reference("bridge", model.bridge.as_ref())
            .reference("lag", model.lag.as_ref())
            .integer("mtu", model.mtu)
            .optional_string("mac_address", model.mac_address.as_deref())
            .integer("speed", model.speed)
            .choice("duplex", model.duplex.as_ref())
            .optional_string("wwn", model.wwn.as_deref())
            .bool("mgmt_only", model.mgmt_only)
            .choice("mode", model.mode.as_ref())
            .bool("mark_connected", model.mark_connected);
    }
}

pub(crate) fn termination_type() -> AttributeType {
    AttributeType::object([
        ("object_type", AttributeType::String),
        ("object_id", AttributeType::Number),
    ])
}

fn terminations_attribute(side: &str) -> Attribute {
    AttributeBuilder::new(
        &format!("{}_terminations", side),
        AttributeType::List(Box::new(termination_type())),
    )
    .description(format!(
        "{}-side endpoints, each an `object_type` such as `dcim.interface` and an `object_id`",
        side.to_uppercase()
    ))
    .required()
    .build()
}

/// Reads one side of a cable; malformed entries are reported
fn terminations_from_plan(plan: &mut PlanReader<'_>, side: &str) -> Vec<api::CableTermination> {
    let name = format!("{}_terminations", side);
    let elements = plan.value(&name).as_list().unwrap_or_default().to_vec();
    let mut terminations = Vec::with_capacity(elements.len());
    for element in &elements {
        let fields = element.as_map();
        let object_type = fields
            .and_then(|m| m.get("object_type"))
            .and_then(Dynamic::as_str)
            .filter(|s| !s.is_empty());
        let object_id = fields
            .and_then(|m| m.get("object_id"))
            .and_then(Dynamic::as_number);
        match (object_type, object_id) {
            (Some(object_type), Some(object_id)) => terminations.push(api::CableTermination {
                object_type: object_type.to_string(),
                object_id: object_id as i64,
            }),
            _ => plan.error(
                Diagnostic::error(
                    "Invalid Cable Termination",
                    "Every termination needs an object_type and an object_id",
                )
                .with_attribute(AttributePath::new(&name)),
            ),
        }
    }
    terminations
}

pub(crate) fn terminations_to_state(terminations: &[api::CableTermination]) -> Dynamic {
    Dynamic::List(
        terminations
            .iter()
            .map(|t| {
                Dynamic::Map(HashMap::from([
                    ("object_type".to_string(), Dynamic::from(t.object_type.as_str())),
                    ("object_id".to_string(), Dynamic::from(t.object_id)),
                ]))
            })
            .collect(),
    )
}

pub struct Cable;

#[async_trait]
impl NetBoxObject for Cable {
    type Model = api::Cable;
    type Request = api::CableRequest;

    const TYPE_NAME: &'static str = "netbox_cable";
    const ENDPOINT: Endpoint = CABLES;
    const DESCRIPTION: &'static str =
        "Manages a cable connecting interfaces, ports or circuit terminations";
    const NATURAL_KEY: &'static str = "label";

    fn attributes() -> Vec<Attribute> {
        vec![
            terminations_attribute("a"),
            terminations_attribute("b"),
            attributes::choice("type", "Cable type", CABLE_TYPES),
            attributes::status_with_default(CABLE_STATUSES, "connected"),
            attributes::reference("tenant", "Tenant owning the cable"),
            attributes::bounded_text("label", "Physical label attached to the cable", 100),
            attributes::color(),
            attributes::number("length", "Length of the cable"),
            attributes::choice("length_unit", "Unit of the length", LENGTH_UNITS),
        ]
    }

    async fn request(plan: &mut PlanReader<'_>, common: CommonFields) -> Self::Request {
        api::CableRequest {
            a_terminations: terminations_from_plan(plan, "a"),
            b_terminations: terminations_from_plan(plan, "b"),
            cable_type: plan.string("type"),
            status: plan.string("status"),
            tenant: plan.reference("tenant", &TENANTS).await,
            label: plan.string("label"),
            color: plan.string("color"),
            length: plan.number("length"),
            length_unit: plan.optional_string("length_unit"),
            common,
        }
    }

    fn state(model: &Self::Model, state: &mut StateBuilder<'_>) {
        state
            .set("a_terminations", terminations_to_state(&model.a_terminations))
            .set("b_terminations", terminations_to_state(&model.b_terminations))
            .optional_string("type", model.cable_type.as_deref())
            .choice("status", model.status.as_ref())
            .reference("tenant", model.tenant.as_ref())
            .optional_string("label", model.label.as_deref())
            .optional_string("color", model.color.as_deref())
            .number("length", model.length)
            .choice("length_unit", model.length_unit.as_ref());
    }

    fn validate(config: &DynamicValue) -> Vec<Diagnostic> {
        let mut diagnostics = unit_required(config, "length", "length_unit");
        for side in ["a", "b"] {
            let name = format!("{}_terminations", side);
            if let Dynamic::List(elements) = config.get_value(&AttributePath::new(&name)) {
                if elements.is_empty() {
                    diagnostics.push(
                        Diagnostic::error(
                            "Missing Cable Termination",
                            format!("{} needs at least one termination", name),
                        )
                        .with_attribute(AttributePath::new(&name)),
                    );
                }
            }
        }
        diagnostics
    }
}

#[cfg(test)]
#[path = "./dcim_test.rs"]
mod dcim_test;
