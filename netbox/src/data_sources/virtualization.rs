//! Virtualization lookups: VM interfaces and virtual disks

use super::{NetBoxQuery, Output, Outputs};
use crate::api::virtualization::{self as api, VIRTUAL_DISKS, VM_INTERFACES};
use crate::api::Endpoint;

pub struct VmInterface;

impl NetBoxQuery for VmInterface {
    type Model = api::VmInterface;

    const TYPE_NAME: &'static str = "netbox_vm_interface";
    const ENDPOINT: Endpoint = VM_INTERFACES;
    const DESCRIPTION: &'static str =
        "Looks up a virtual machine interface by ID, or by name within a virtual machine";
    const FILTERS: &'static [&'static str] = &["name"];
    const SCOPE: &'static [&'static str] = &["virtual_machine", "virtual_machine_id"];
    const HAS_COMMENTS: bool = false;

    fn outputs() -> Outputs {
        Outputs::new()
            .reference("virtual_machine", "Virtual machine")
            .string("name", "Name of the interface")
            .bool("enabled", "Whether the interface is enabled")
            .reference("parent", "Parent interface")
            .reference("bridge", "Bridge interface")
            .number("mtu", "Maximum transmission unit")
            .string("mac_address", "MAC address")
            .string("mode", "802.1Q mode")
            .reference("untagged_vlan", "Untagged VLAN")
            .reference("vrf", "VRF")
    }

    fn state(model: &Self::Model, output: &mut Output) {
        output
            .reference("virtual_machine", Some(&model.virtual_machine))
            .string("name", &model.name)
            .bool("enabled", model.enabled)
            .reference("parent", model.parent.as_ref())
            .reference("bridge", model.bridge.as_ref())
            .integer("mtu", model.mtu)
            .optional_string("mac_address", model.mac_address.as_deref())
            .choice("mode", model.mode.as_ref())
            .reference("untagged_vlan", model.untagged_vlan.as_ref())
            .reference("vrf", model.vrf.as_ref());
    }
}

pub struct VirtualDisk;

impl NetBoxQuery for VirtualDisk {
    type Model = api::VirtualDisk;

    const TYPE_NAME: &'static str = "netbox_virtual_disk";
    const ENDPOINT: Endpoint = VIRTUAL_DISKS;
    const DESCRIPTION: &'static str =
        "Looks up a virtual disk by ID, or by name within a virtual machine";
    const FILTERS: &'static [&'static str] = &["name"];
    const SCOPE: &'static [&'static str] = &["virtual_machine", "virtual_machine_id"];
    const HAS_COMMENTS: bool = false;

    fn outputs() -> Outputs {
        Outputs::new()
            .reference("virtual_machine", "Virtual machine")
            .string("name", "Name of the disk")
            .number("size", "Size in MB")
    }

    fn state(model: &Self::Model, output: &mut Output) {
        output
            .reference("virtual_machine", Some(&model.virtual_machine))
            .string("name", &model.name)
            .integer("size", Some(model.size));
    }
}

#[cfg(test)]
mod tests {
    use super::super::NetBoxDataSource;
    use super::*;
    use crate::api::test_helpers::create_test_client;
    use mockito::{Matcher, Server};
    use std::collections::HashMap;
    use tfplug::types::{Dynamic, DynamicValue};

    fn config(values: &[(&str, Dynamic)]) -> DynamicValue {
        DynamicValue::new(Dynamic::Map(
            values
                .iter()
                .map(|(k, v)| (k.to_string(), v.clone()))
                .collect::<HashMap<_, _>>(),
        ))
    }

    #[test]
    fn scope_attributes_are_optional_inputs() {
        let schema = NetBoxDataSource::<VmInterface>::schema();
        for name in ["name", "virtual_machine", "virtual_machine_id"] {
            let attr = schema.attribute(name).unwrap();
            assert!(attr.optional && attr.computed, "{} should be an input", name);
        }
        assert!(!schema.attribute("mtu").unwrap().optional);
        assert!(schema.attribute("comments").is_none());
    }

    #[test]
    fn scope_collects_only_set_values() {
        let scope = NetBoxDataSource::<VirtualDisk>::scope(&config(&[
            ("name", Dynamic::from("root")),
            ("virtual_machine", Dynamic::Null),
            ("virtual_machine_id", Dynamic::Number(12.0)),
        ]));
        assert_eq!(scope, vec![("virtual_machine_id", "12".to_string())]);
    }

    #[tokio::test]
    async fn interface_name_is_looked_up_within_its_machine() {
        let mut server = Server::new_async().await;
        let mock = server
            .mock("GET", "/api/virtualization/interfaces/")
            .match_query(Matcher::AllOf(vec![
                Matcher::UrlEncoded("name".into(), "eth0".into()),
                Matcher::UrlEncoded("virtual_machine".into(), "app-01".into()),
            ]))
            .with_status(200)
            .with_body(
                r#"{"count": 1, "next": null, "previous": null, "results": [{
                    "id": 31,
                    "display": "eth0",
                    "name": "eth0",
                    "virtual_machine": {"id": 4, "display": "app-01", "name": "app-01"},
                    "enabled": true,
                    "mtu": 9000,
                    "mode": {"value": "tagged", "label": "Tagged"},
                    "tagged_vlans": [{"id": 100, "display": "users", "name": "users"}],
                    "untagged_vlan": null,
                    "tags": [],
                    "custom_fields": {}
                }]}"#,
            )
            .create_async()
            .await;

        let client = create_test_client(&server.url());
        let config = config(&[
            ("name", Dynamic::from("eth0")),
            ("virtual_machine", Dynamic::from("app-01")),
        ]);
        let selector = NetBoxDataSource::<VmInterface>::selector(&config).unwrap();
        let scope = NetBoxDataSource::<VmInterface>::scope(&config);
        let model = NetBoxDataSource::<VmInterface>::find(&client, &selector, &scope)
            .await
            .unwrap();
        mock.assert_async().await;

        let state = NetBoxDataSource::<VmInterface>::to_state(&model);
        let get = |name: &str| state.get_value(&tfplug::types::AttributePath::new(name));
        assert_eq!(get("id"), Dynamic::from("31"));
        assert_eq!(get("virtual_machine"), Dynamic::from("app-01"));
        assert_eq!(get("virtual_machine_id"), Dynamic::Number(4.0));
        assert_eq!(get("mtu"), Dynamic::Number(9000.0));
        assert_eq!(get("mode"), Dynamic::from("tagged"));
        assert!(get("untagged_vlan").is_null());
    }

    #[tokio::test]
    async fn missing_disk_names_the_scope() {
        let mut server = Server::new_async().await;
        let _m = server
            .mock("GET", "/api/virtualization/virtual-disks/")
            .match_query(Matcher::Any)
            .with_status(200)
            .with_body(r#"{"count": 0, "next": null, "previous": null, "results": []}"#)
            .create_async()
            .await;

        let client = create_test_client(&server.url());
        let config = config(&[
            ("name", Dynamic::from("data")),
            ("virtual_machine_id", Dynamic::Number(4.0)),
        ]);
        let selector = NetBoxDataSource::<VirtualDisk>::selector(&config).unwrap();
        let scope = NetBoxDataSource::<VirtualDisk>::scope(&config);
        let diag = NetBoxDataSource::<VirtualDisk>::find(&client, &selector, &scope)
            .await
            .unwrap_err();
        assert_eq!(diag.summary, "Virtual Disk Not Found");
        assert_eq!(
            diag.detail,
            "No virtual disk found with name: data, virtual_machine_id: 4"
        );
    }
}
