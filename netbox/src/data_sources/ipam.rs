//! IPAM lookups: prefixes, IP ranges, VLANs and VRFs

use super::{NetBoxQuery, Output, Outputs};
use crate::api::ipam::{self as api, IP_RANGES, PREFIXES, VLANS, VRFS};
use crate::api::Endpoint;

pub struct Prefix;

impl NetBoxQuery for Prefix {
    type Model = api::Prefix;

    const TYPE_NAME: &'static str = "netbox_prefix";
    const ENDPOINT: Endpoint = PREFIXES;
    const DESCRIPTION: &'static str = "Looks up a prefix by ID or CIDR";
    const FILTERS: &'static [&'static str] = &["prefix"];

    fn outputs() -> Outputs {
        Outputs::new()
            .string("prefix", "Network in CIDR notation")
            .reference("site", "Site")
            .reference("vrf", "VRF")
            .reference("tenant", "Tenant")
            .reference("vlan", "VLAN")
            .string("status", "Operational status")
            .reference("role", "Functional role")
            .bool("is_pool", "All addresses within the prefix are usable")
            .bool("mark_utilized", "The prefix is treated as fully utilized")
    }

    fn state(model: &Self::Model, output: &mut Output) {
        output
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

pub struct Vlan;

impl NetBoxQuery for Vlan {
    type Model = api::Vlan;

    const TYPE_NAME: &'static str = "netbox_vlan";
    const ENDPOINT: Endpoint = VLANS;
    const DESCRIPTION: &'static str = "Looks up a VLAN by ID, VLAN ID or name";
    const FILTERS: &'static [&'static str] = &["vid", "name"];

    fn outputs() -> Outputs {
        Outputs::new()
            .number("vid", "Numeric VLAN ID")
            .string("name", "Name of the VLAN")
            .reference("site", "Site")
            .reference("group", "VLAN group")
            .reference("tenant", "Tenant")
            .string("status", "Operational status")
            .reference("role", "Functional role")
    }

    fn state(model: &Self::Model, output: &mut Output) {
        output
            .integer("vid", Some(model.vid))
            .string("name", &model.name)
            .reference("site", model.site.as_ref())
            .reference("group", model.group.as_ref())
            .reference("tenant", model.tenant.as_ref())
            .choice("status", model.status.as_ref())
            .reference("role", model.role.as_ref());
    }
}

pub struct Vrf;

impl NetBoxQuery for Vrf {
    type Model = api::Vrf;

    const TYPE_NAME: &'static str = "netbox_vrf";
    const ENDPOINT: Endpoint = VRFS;
    const DESCRIPTION: &'static str = "Looks up a VRF by ID or name";
    const FILTERS: &'static [&'static str] = &["name"];

    fn outputs() -> Outputs {
        Outputs::new()
            .string("name", "Name of the VRF")
            .string("rd", "Route distinguisher")
            .reference("tenant", "Tenant")
            .bool("enforce_unique", "Prevent duplicate prefixes and addresses")
    }

    fn state(model: &Self::Model, output: &mut Output) {
        output
            .string("name", &model.name)
            .optional_string("rd", model.rd.as_deref())
            .reference("tenant", model.tenant.as_ref())
            .bool("enforce_unique", model.enforce_unique);
    }
}

pub struct IpRange;

impl NetBoxQuery for IpRange {
    type Model = api::IpRange;

    const TYPE_NAME: &'static str = "netbox_ip_range";
    const ENDPOINT: Endpoint = IP_RANGES;
    const DESCRIPTION: &'static str = "Looks up an IP range by ID or by its start and end addresses";
    const FILTERS: &'static [&'static str] = &["start_address"];
    const SCOPE: &'static [&'static str] = &["end_address"];

    fn outputs() -> Outputs {
        Outputs::new()
            .string("start_address", "First address of the range")
            .string("end_address", "Last address of the range")
            .number("size", "Number of addresses in the range")
            .reference("vrf", "VRF")
            .reference("tenant", "Tenant")
            .string("status", "Operational status")
            .reference("role", "Functional role")
            .bool("mark_utilized", "The range is treated as fully utilized")
    }

    fn state(model: &Self::Model, output: &mut Output) {
        output
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
mod tests {
    use super::super::NetBoxDataSource;
    use super::*;
    use crate::api::test_helpers::create_test_client;
    use mockito::{Matcher, Server};
    use std::collections::HashMap;
    use tfplug::types::{AttributePath, Dynamic, DynamicValue};

    #[test]
    fn vid_is_a_numeric_input() {
        let schema = NetBoxDataSource::<Vlan>::schema();
        let vid = schema.attribute("vid").unwrap();
        assert!(vid.optional && vid.computed);

        let config = DynamicValue::new(Dynamic::Map(HashMap::from([(
            "vid".to_string(),
            Dynamic::Number(100.0),
        )])));
        let selector = NetBoxDataSource::<Vlan>::selector(&config).unwrap();
        assert_eq!(
            selector,
            super::super::Selector::Filter("vid", "100".to_string())
        );
    }

    #[tokio::test]
    async fn prefix_is_found_by_cidr() {
        let mut server = Server::new_async().await;
        let list = server
            .mock("GET", "/api/ipam/prefixes/")
            .match_query(Matcher::UrlEncoded("prefix".into(), "10.0.0.0/16".into()))
            .with_status(200)
            .with_body(
                r#"{"count": 1, "next": null, "previous": null, "results": [{
                    "id": 8,
                    "display": "10.0.0.0/16",
                    "prefix": "10.0.0.0/16",
                    "vrf": {"id": 3, "display": "prod", "name": "prod"},
                    "status": {"value": "container", "label": "Container"},
                    "is_pool": false,
                    "mark_utilized": false,
                    "description": "",
                    "tags": [],
                    "custom_fields": {}
                }]}"#,
            )
            .create_async()
            .await;

        let client = create_test_client(&server.url());
        let selector = super::super::Selector::Filter("prefix", "10.0.0.0/16".to_string());
        let model = NetBoxDataSource::<Prefix>::find(&client, &selector, &[]).await.unwrap();
        list.assert_async().await;

        let state = NetBoxDataSource::<Prefix>::to_state(&model);
        let get = |name: &str| state.get_value(&AttributePath::new(name));
        assert_eq!(get("vrf"), Dynamic::from("prod"));
        assert_eq!(get("vrf_id"), Dynamic::Number(3.0));
        assert_eq!(get("status"), Dynamic::from("container"));
        assert_eq!(get("is_pool"), Dynamic::Bool(false));
        assert!(get("site").is_null());
        assert!(get("site_id").is_null());
        assert_eq!(get("tags"), Dynamic::List(vec![]));
        assert_eq!(get("custom_fields"), Dynamic::List(vec![]));
    }
}
