//! DCIM lookups: sites, devices, modules, interfaces and cables

use tfplug::schema::AttributeType;

use super::{NetBoxQuery, Output, Outputs};
use crate::api::dcim::{
    self as api, CABLES, DEVICES, INTERFACES, MODULES, MODULE_BAYS, MODULE_TYPES, SITES,
};
use crate::api::Endpoint;
use crate::resources::dcim::{termination_type, terminations_to_state};

pub struct Site;

impl NetBoxQuery for Site {
    type Model = api::Site;

    const TYPE_NAME: &'static str = "netbox_site";
    const ENDPOINT: Endpoint = SITES;
    const DESCRIPTION: &'static str = "Looks up a site by ID, slug or name";
    const FILTERS: &'static [&'static str] = &["slug", "name"];

    fn outputs() -> Outputs {
        Outputs::new()
            .string("name", "Name of the site")
            .string("slug", "URL-friendly unique identifier")
            .string("status", "Operational status")
            .reference("region", "Region")
            .reference("group", "Site group")
            .reference("tenant", "Tenant")
            .string("facility", "Local facility ID or description")
            .string("time_zone", "Time zone")
            .string("physical_address", "Physical location of the building")
            .string("shipping_address", "Shipping address if different from the physical address")
            .number("latitude", "GPS latitude in decimal format")
            .number("longitude", "GPS longitude in decimal format")
    }

    fn state(model: &Self::Model, output: &mut Output) {
        output
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

pub struct Device;

impl NetBoxQuery for Device {
    type Model = api::Device;

    const TYPE_NAME: &'static str = "netbox_device";
    const ENDPOINT: Endpoint = DEVICES;
    const DESCRIPTION: &'static str = "Looks up a device by ID or name";
    const FILTERS: &'static [&'static str] = &["name"];

    fn outputs() -> Outputs {
        Outputs::new()
            .string("name", "Name of the device")
            .reference("device_type", "Device type")
            .reference("role", "Device role")
            .reference("site", "Site")
            .reference("location", "Location")
            .reference("rack", "Rack")
            .reference("tenant", "Tenant")
            .reference("platform", "Platform")
            .string("serial", "Chassis serial number")
            .string("asset_tag", "Unique asset tag")
            .string("status", "Operational status")
            .number("position", "Lowest rack unit occupied")
            .string("face", "Rack face")
    }

    fn state(model: &Self::Model, output: &mut Output) {
        output
            .optional_string("name", model.name.as_deref())
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
}

pub struct ModuleType;

impl NetBoxQuery for ModuleType {
    type Model = api::ModuleType;

    const TYPE_NAME: &'static str = "netbox_module_type";
    const ENDPOINT: Endpoint = MODULE_TYPES;
    const DESCRIPTION: &'static str =
        "Looks up a module type by ID or model, optionally within a manufacturer";
    const FILTERS: &'static [&'static str] = &["model"];
    const SCOPE: &'static [&'static str] = &["manufacturer_id"];

    fn outputs() -> Outputs {
        Outputs::new()
            .reference("manufacturer", "Manufacturer")
            .string("model", "Model name")
            .string("part_number", "Discrete part number")
            .string("airflow", "Direction of airflow")
            .number("weight", "Weight of one module")
            .string("weight_unit", "Unit of the weight")
    }

    fn state(model: &Self::Model, output: &mut Output) {
        output
            .reference("manufacturer", Some(&model.manufacturer))
            .string("model", &model.model)
            .optional_string("part_number", model.part_number.as_deref())
            .choice("airflow", model.airflow.as_ref())
            .number("weight", model.weight)
            .choice("weight_unit", model.weight_unit.as_ref());
    }
}

pub struct ModuleBay;

impl NetBoxQuery for ModuleBay {
    type Model = api::ModuleBay;

    const TYPE_NAME: &'static str = "netbox_module_bay";
    const ENDPOINT: Endpoint = MODULE_BAYS;
    const DESCRIPTION: &'static str = "Looks up a module bay by ID, or by name within a device";
    const FILTERS: &'static [&'static str] = &["name"];
    const SCOPE: &'static [&'static str] = &["device", "device_id"];
    const HAS_COMMENTS: bool = false;

    fn outputs() -> Outputs {
        Outputs::new()
            .reference("device", "Device")
            .string("name", "Name of the bay")
            .string("label", "Physical label")
            .string("position", "Identifier used when renaming installed components")
    }

    fn state(model: &Self::Model, output: &mut Output) {
        output
            .reference("device", Some(&model.device))
            .string("name", &model.name)
            .optional_string("label", model.label.as_deref())
            .optional_string("position", model.position.as_deref());
    }
}

pub struct Module;

impl NetBoxQuery for Module {
    type Model = api::Module;

    const TYPE_NAME: &'static str = "netbox_module";
    const ENDPOINT: Endpoint = MODULES;
    const DESCRIPTION: &'static str =
        "Looks up a module by ID, serial number or the bay it is installed in";
    const FILTERS: &'static [&'static str] = &["serial", "module_bay_id"];
    const SCOPE: &'static [&'static str] = &["device_id"];

    fn outputs() -> Outputs {
        Outputs::new()
            .reference("device", "Device")
            .reference("module_bay", "Module bay")
            .reference("module_type", "Module type")
            .string("status", "Operational status")
            .string("serial", "Serial number")
            .string("asset_tag", "Unique asset tag")
    }

    fn state(model: &Self::Model, output: &mut Output) {
        output
            .reference("device", Some(&model.device))
            .reference("module_bay", Some(&model.module_bay))
            .reference("module_type", Some(&model.module_type))
            .choice("status", model.status.as_ref())
            .optional_string("serial", model.serial.as_deref())
            .optional_string("asset_tag", model.asset_tag.as_deref());
    }
}

pub struct Interface;

impl NetBoxQuery for Interface {
    type Model = api::Interface;

    const TYPE_NAME: &'static str = "netbox_interface";
    const ENDPOINT: Endpoint = INTERFACES;
    const DESCRIPTION: &'static str = "Looks up a device interface by ID, or by name within a device";
    const FILTERS: &'static [&'static str] = &["name"];
    const SCOPE: &'static [&'static str] = &["device", "device_id"];
    const HAS_COMMENTS: bool = false;

    fn outputs() -> Outputs {
        Outputs::new()
            .reference("device", "Device")
            .string("name", "Name of the interface")
            .string("label", "Physical label")
            .string("type", "Interface type")
            .bool("enabled", "Whether the interface is enabled")
            .reference("parent", "Parent interface")
            .reference("bridge", "Bridge interface")
            .reference("lag", "LAG interface")
            .number("mtu", "Maximum transmission unit")
            .string("mac_address", "MAC address")
            .number("speed", "Speed in Kbps")
            .string("duplex", "Duplex mode")
            .string("wwn", "World Wide Name")
            .bool("mgmt_only", "Out-of-band management only")
            .string("mode", "802.1Q mode")
            .bool("mark_connected", "Treated as connected without a cable")
    }

    fn state(model: &Self::Model, output: &mut Output) {
        output
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

pub struct Cable;

impl NetBoxQuery for Cable {
    type Model = api::Cable;

    const TYPE_NAME: &'static str = "netbox_cable";
    const ENDPOINT: Endpoint = CABLES;
    const DESCRIPTION: &'static str = "Looks up a cable by ID or label";
    const FILTERS: &'static [&'static str] = &["label"];

    fn outputs() -> Outputs {
        let terminations = AttributeType::List(Box::new(termination_type()));
        Outputs::new()
            .computed("a_terminations", terminations.clone(), "A-side endpoints")
            .computed("b_terminations", terminations, "B-side endpoints")
            .string("type", "Cable type")
            .string("status", "Connection status")
            .reference("tenant", "Tenant")
            .string("label", "Physical label")
            .string("color", "RGB color in hexadecimal")
            .number("length", "Length of the cable")
            .string("length_unit", "Unit of the length")
    }

    fn state(model: &Self::Model, output: &mut Output) {
        output
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
}

#[cfg(test)]
#[path = "./dcim_test.rs"]
mod dcim_test;
